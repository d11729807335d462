use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Description stored when the file leaves it blank.
pub const DEFAULT_DESCRIPTION: &str = "No description available";

/// A cleaned product row that passed every rule.
///
/// `code` is the de-duplication key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRecord {
    pub code: String,
    pub name: String,
    pub description: String,
    pub added_at: Option<NaiveDateTime>,
    /// Set to the import time when the row is flagged as discontinued.
    pub discontinued_at: Option<NaiveDateTime>,
    pub stock_level: i64,
    pub price: f64,
}
