use crate::{error::ImportError, item::csv::csv_reader::RawRow};

pub const PRODUCT_CODE: &str = "Product Code";
pub const PRODUCT_NAME: &str = "Product Name";
pub const PRODUCT_DESCRIPTION: &str = "Product Description";
pub const STOCK: &str = "Stock";
pub const COST_IN_GBP: &str = "Cost in GBP";
pub const DISCONTINUED: &str = "Discontinued";

/// Columns every product file must declare, in any order.
pub const REQUIRED_COLUMNS: [&str; 6] = [
    PRODUCT_CODE,
    PRODUCT_NAME,
    PRODUCT_DESCRIPTION,
    STOCK,
    COST_IN_GBP,
    DISCONTINUED,
];

/// Accepted names for the optional added-at column.
pub const ADDED_AT_COLUMNS: [&str; 2] = ["Date Added", "dtmAdded"];

/// Position of each product attribute in the file, taken from its header row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderMapping {
    code: usize,
    name: usize,
    description: usize,
    stock: usize,
    price: usize,
    discontinued: usize,
    added_at: Option<usize>,
    width: usize,
}

/// A data row viewed through a [`HeaderMapping`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProductFields<'a> {
    pub code: &'a str,
    pub name: &'a str,
    pub description: &'a str,
    pub stock: &'a str,
    pub price: &'a str,
    pub discontinued: &'a str,
    pub added_at: Option<&'a str>,
}

impl HeaderMapping {
    /// Checks the header contract and records where each column sits.
    ///
    /// Unknown columns are ignored. When a name appears twice the first
    /// occurrence is used.
    ///
    /// # Errors
    ///
    /// [`ImportError::HeaderMismatch`] listing every required column the
    /// header lacks.
    pub fn from_header(header: &RawRow) -> Result<Self, ImportError> {
        let position = |name: &str| header.fields.iter().position(|f| f.trim() == name);

        let missing: Vec<String> = REQUIRED_COLUMNS
            .iter()
            .filter(|name| position(name).is_none())
            .map(|name| name.to_string())
            .collect();

        match (
            position(PRODUCT_CODE),
            position(PRODUCT_NAME),
            position(PRODUCT_DESCRIPTION),
            position(STOCK),
            position(COST_IN_GBP),
            position(DISCONTINUED),
        ) {
            (Some(code), Some(name), Some(description), Some(stock), Some(price), Some(discontinued)) => {
                Ok(Self {
                    code,
                    name,
                    description,
                    stock,
                    price,
                    discontinued,
                    added_at: ADDED_AT_COLUMNS.iter().find_map(|name| position(name)),
                    width: header.len(),
                })
            }
            _ => Err(ImportError::HeaderMismatch { missing }),
        }
    }

    /// Number of fields every data row must have.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Maps a row onto named fields.
    ///
    /// Returns `None` when the row width differs from the header's.
    pub fn map<'a>(&self, row: &'a RawRow) -> Option<ProductFields<'a>> {
        if row.len() != self.width {
            return None;
        }

        let field = move |index: usize| row.get(index).unwrap_or_default();

        Some(ProductFields {
            code: field(self.code),
            name: field(self.name),
            description: field(self.description),
            stock: field(self.stock),
            price: field(self.price),
            discontinued: field(self.discontinued),
            added_at: self.added_at.map(field),
        })
    }
}
