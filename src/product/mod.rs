/// Price, stock, flag and timestamp cleaners.
pub mod cleaners;

/// Header contract and the typed view of a data row.
pub mod header;

/// The business rule engine, as an `ItemProcessor`.
pub mod processor;

/// The accepted product record.
pub mod record;

/// Length and admission rules.
pub mod rules;

pub use header::{HeaderMapping, ProductFields, REQUIRED_COLUMNS};
pub use processor::ProductProcessor;
pub use record::ProductRecord;
