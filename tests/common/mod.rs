#![allow(dead_code)]

pub mod mocks;

use std::{
    io::Write,
    path::{Path, PathBuf},
};

use tempfile::NamedTempFile;

pub const HEADER: &str =
    "Product Code,Product Name,Product Description,Stock,Cost in GBP,Discontinued";

/// Path of a file under `tests/fixtures`.
pub fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

/// Writes raw bytes to a temporary file that lives as long as the handle.
pub fn temp_input(content: &[u8]) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content).unwrap();
    file.flush().unwrap();
    file
}
