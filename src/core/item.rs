use std::fmt;

use crate::error::ImportError;

/// Result of reading one item: `Ok(None)` once the source is exhausted.
pub type ItemReaderResult<R> = Result<Option<R>, ImportError>;

/// Result of writing a batch of items.
pub type ItemWriterResult = Result<(), ImportError>;

/// Result of a duplicate lookup.
pub type LookupResult<T> = Result<T, ImportError>;

/// Retrieval of input for a step, one item at a time.
pub trait ItemReader<R> {
    fn read(&self) -> ItemReaderResult<R>;
}

/// Business logic applied to every item read.
///
/// Expected rejections are returned as [`Outcome::Skipped`], never as errors,
/// so the step can keep going without inspecting control flow.
pub trait ItemProcessor<I, O> {
    fn process(&self, item: &I) -> Outcome<O>;
}

/// Output of a step. In an import this is the record sink.
pub trait ItemWriter<W> {
    fn write(&self, items: &[W]) -> ItemWriterResult;
    fn flush(&self) -> ItemWriterResult {
        Ok(())
    }
    fn open(&self) -> ItemWriterResult {
        Ok(())
    }
    fn close(&self) -> ItemWriterResult {
        Ok(())
    }
}

/// Answers whether a product code is already known.
///
/// Durable stores reflect every insert on their own, so `register` defaults to
/// a no-op. In-memory implementations record the code there.
pub trait DuplicateLookup {
    fn exists(&self, code: &str) -> LookupResult<bool>;
    fn register(&self, _code: &str) -> LookupResult<()> {
        Ok(())
    }
}

/// Why a row was not imported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    ColumnMismatch,
    NameTooLong,
    DescriptionTooLong,
    CodeTooLong,
    LowPriceAndStock,
    HighPrice,
    DuplicateCode,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            Rejection::ColumnMismatch => "column mismatch",
            Rejection::NameTooLong => "excessive length in product name",
            Rejection::DescriptionTooLong => "excessive length in product description",
            Rejection::CodeTooLong => "excessive length in product code",
            Rejection::LowPriceAndStock => "low price and stock",
            Rejection::HighPrice => "high price",
            Rejection::DuplicateCode => "duplicate code",
        };
        f.write_str(reason)
    }
}

/// Classification of a single row.
///
/// `subject` is what the message talks about: the product name, or the raw
/// row content when the row could not be mapped at all.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<O> {
    Accepted(O),
    Skipped { subject: String, reason: Rejection },
    Errored { subject: String, message: String },
}

impl<O> Outcome<O> {
    pub fn skipped(subject: impl Into<String>, reason: Rejection) -> Self {
        Outcome::Skipped {
            subject: subject.into(),
            reason,
        }
    }

    pub fn errored(subject: impl Into<String>, message: impl fmt::Display) -> Self {
        Outcome::Errored {
            subject: subject.into(),
            message: message.to_string(),
        }
    }

    pub fn is_accepted(&self) -> bool {
        matches!(self, Outcome::Accepted(_))
    }

    /// Human-readable line for the import report. `None` for accepted rows.
    pub fn message(&self) -> Option<String> {
        match self {
            Outcome::Accepted(_) => None,
            Outcome::Skipped {
                subject,
                reason: Rejection::ColumnMismatch,
            } => Some(format!("Skipped row due to column mismatch: {}", subject)),
            Outcome::Skipped { subject, reason } => {
                Some(format!("Skipped product: {} due to {}.", subject, reason))
            }
            Outcome::Errored { subject, message } => Some(format!(
                "Failed to import product: {}. Error: {}",
                subject, message
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Outcome, Rejection};

    #[test]
    fn messages_name_the_subject_and_reason() {
        let mismatch: Outcome<()> = Outcome::skipped("P0001, TV", Rejection::ColumnMismatch);
        assert_eq!(
            mismatch.message().as_deref(),
            Some("Skipped row due to column mismatch: P0001, TV")
        );

        let low: Outcome<()> = Outcome::skipped("Cheap TV", Rejection::LowPriceAndStock);
        assert_eq!(
            low.message().as_deref(),
            Some("Skipped product: Cheap TV due to low price and stock.")
        );

        let failed: Outcome<()> = Outcome::errored("TV", "boom");
        assert_eq!(
            failed.message().as_deref(),
            Some("Failed to import product: TV. Error: boom")
        );

        assert_eq!(Outcome::Accepted(()).message(), None);
    }
}
