use chrono::Utc;
use log::debug;

use crate::{
    core::item::{DuplicateLookup, ItemProcessor, Outcome, Rejection},
    error::ImportError,
    item::csv::csv_reader::RawRow,
    product::{
        cleaners::{clean_discontinued, clean_price, clean_stock, parse_timestamp},
        header::{HeaderMapping, ProductFields},
        record::{DEFAULT_DESCRIPTION, ProductRecord},
        rules,
    },
};

/// Turns a data row into an [`Outcome`]: the business rule engine.
///
/// The processor knows nothing about dry-run or live mode. It asks the
/// injected [`DuplicateLookup`] whether a code is known and registers the code
/// of every accepted record with it.
pub struct ProductProcessor<'a> {
    mapping: HeaderMapping,
    lookup: &'a dyn DuplicateLookup,
}

impl<'a> ProductProcessor<'a> {
    pub fn new(mapping: HeaderMapping, lookup: &'a dyn DuplicateLookup) -> Self {
        Self { mapping, lookup }
    }

    fn evaluate(&self, fields: &ProductFields<'_>) -> Result<Outcome<ProductRecord>, ImportError> {
        let price = clean_price(fields.price);
        let stock_level = clean_stock(fields.stock);
        let discontinued = clean_discontinued(fields.discontinued);

        if let Some(reason) = rules::check(fields, price, stock_level) {
            return Ok(Outcome::skipped(fields.name, reason));
        }

        if self.lookup.exists(fields.code)? {
            return Ok(Outcome::skipped(fields.name, Rejection::DuplicateCode));
        }

        let description = if fields.description.is_empty() {
            DEFAULT_DESCRIPTION
        } else {
            fields.description
        };

        let record = ProductRecord {
            code: fields.code.to_string(),
            name: fields.name.to_string(),
            description: description.to_string(),
            added_at: fields.added_at.map(parse_timestamp).transpose()?.flatten(),
            discontinued_at: discontinued.then(|| Utc::now().naive_utc()),
            stock_level,
            price,
        };

        // only once the record is complete, so a failed row never shadows a later one
        self.lookup.register(&record.code)?;

        debug!("Accepted product {} ({})", record.name, record.code);
        Ok(Outcome::Accepted(record))
    }
}

impl ItemProcessor<RawRow, ProductRecord> for ProductProcessor<'_> {
    fn process(&self, row: &RawRow) -> Outcome<ProductRecord> {
        let Some(fields) = self.mapping.map(row) else {
            return Outcome::skipped(row.joined(), Rejection::ColumnMismatch);
        };

        self.evaluate(&fields)
            .unwrap_or_else(|error| Outcome::errored(fields.name, error))
    }
}
