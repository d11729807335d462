/// This module provides the delimited text reader: encoding, delimiter and row splitting.
pub mod csv;

/// This module provides the in-memory duplicate lookup used by dry runs.
pub mod memory;

#[cfg(feature = "sqlite")]
/// This module provides the SQLite record sink and duplicate lookup.
pub mod rdbc;
