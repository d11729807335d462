use std::{io, path::PathBuf};

use thiserror::Error;

#[derive(Error, Debug)]
/// Import error
///
/// `Io`, `HeaderMismatch` and `MissingComponent` abort a job before any row is
/// processed. The remaining variants describe a single row and are folded into
/// that row's outcome by the step.
pub enum ImportError {
    #[error("Unable to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("The file does not have the required headers, missing: {}", missing.join(", "))]
    HeaderMismatch { missing: Vec<String> },

    #[error("Missing required component: {0}")]
    MissingComponent(&'static str),

    #[error("ItemReader from: {0}")]
    ItemReader(String),

    #[error("ItemWriter from: {0}")]
    ItemWriter(String),

    #[error("Duplicate key: {0}")]
    DuplicateKey(String),

    #[error("Duplicate lookup from: {0}")]
    Lookup(String),

    #[error("Unable to parse timestamp '{0}'")]
    InvalidTimestamp(String),
}
