use crate::{core::item::Rejection, product::header::ProductFields};

pub const MAX_NAME_LENGTH: usize = 50;
pub const MAX_DESCRIPTION_LENGTH: usize = 255;
pub const MAX_CODE_LENGTH: usize = 10;

/// Below this price a product needs at least [`MIN_STOCK_FOR_CHEAP`] units.
pub const MIN_PRICE: f64 = 5.0;
pub const MIN_STOCK_FOR_CHEAP: i64 = 10;
pub const MAX_PRICE: f64 = 1000.0;

/// Evaluates the field and admission rules against a cleaned row.
///
/// Rules are checked in a fixed order and the first violation is returned:
/// name length, description length, code length, low price together with low
/// stock, high price. Lengths count characters, not bytes.
///
/// Duplicate detection is not part of this function since it needs a lookup.
pub fn check(fields: &ProductFields<'_>, price: f64, stock: i64) -> Option<Rejection> {
    if fields.name.chars().count() > MAX_NAME_LENGTH {
        return Some(Rejection::NameTooLong);
    }
    if fields.description.chars().count() > MAX_DESCRIPTION_LENGTH {
        return Some(Rejection::DescriptionTooLong);
    }
    if fields.code.chars().count() > MAX_CODE_LENGTH {
        return Some(Rejection::CodeTooLong);
    }
    if price < MIN_PRICE && stock < MIN_STOCK_FOR_CHEAP {
        return Some(Rejection::LowPriceAndStock);
    }
    if price > MAX_PRICE {
        return Some(Rejection::HighPrice);
    }
    None
}
