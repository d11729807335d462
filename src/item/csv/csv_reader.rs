use csv::{ReaderBuilder, StringRecord, StringRecordsIntoIter, Terminator, Trim};
use std::{cell::RefCell, io::Cursor, io::Read};

use crate::{
    core::item::{ItemReader, ItemReaderResult},
    error::ImportError,
    item::csv::encoding::NormalizedText,
};

/// One record of input split into fields. Carries no validity of its own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRow {
    /// 1-based record number. Empty lines are skipped by the reader and not
    /// counted, so this is not a physical line number.
    pub record: u64,
    pub fields: Vec<String>,
}

impl RawRow {
    pub fn new<S: Into<String>>(record: u64, fields: impl IntoIterator<Item = S>) -> Self {
        Self {
            record,
            fields: fields.into_iter().map(Into::into).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// True when every field is empty or whitespace.
    pub fn is_blank(&self) -> bool {
        self.fields.iter().all(|field| field.trim().is_empty())
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.fields.get(index).map(String::as_str)
    }

    /// The raw content, fields joined with `", "`.
    pub fn joined(&self) -> String {
        self.fields.join(", ")
    }
}

impl From<&StringRecord> for RawRow {
    fn from(record: &StringRecord) -> Self {
        let number = record.position().map_or(0, |position| position.line());
        RawRow::new(number, record.iter())
    }
}

/// Splits delimited text into [`RawRow`]s.
///
/// Fields may be wrapped in double quotes to carry the delimiter or a newline.
/// Rows are allowed to differ in width from the header; deciding what a short
/// or long row means is left to the processor. Empty lines yield nothing.
///
/// # Examples
///
/// ```
/// use product_import::item::csv::csv_reader::CsvRowReaderBuilder;
/// use product_import::core::item::ItemReader;
///
/// let reader = CsvRowReaderBuilder::new()
///     .delimiter(b';')
///     .from_reader("code;name\nP1;\"TV; 32 inch\"".as_bytes());
///
/// let header = reader.read().unwrap().unwrap();
/// assert_eq!(header.fields, vec!["code", "name"]);
///
/// let row = reader.read().unwrap().unwrap();
/// assert_eq!(row.fields, vec!["P1", "TV; 32 inch"]);
///
/// assert!(reader.read().unwrap().is_none());
/// ```
pub struct CsvRowReader<R> {
    /// Uses `RefCell` so `read` can advance the iterator through `&self`.
    records: RefCell<StringRecordsIntoIter<R>>,
}

impl<R: Read> ItemReader<RawRow> for CsvRowReader<R> {
    fn read(&self) -> ItemReaderResult<RawRow> {
        match self.records.borrow_mut().next() {
            Some(Ok(record)) => Ok(Some(RawRow::from(&record))),
            Some(Err(error)) => Err(ImportError::ItemReader(error.to_string())),
            None => Ok(None),
        }
    }
}

/// Builder for [`CsvRowReader`].
///
/// Defaults: comma delimiter, `\n` terminator.
pub struct CsvRowReaderBuilder {
    delimiter: u8,
    terminator: Terminator,
}

impl Default for CsvRowReaderBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl CsvRowReaderBuilder {
    pub fn new() -> Self {
        Self {
            delimiter: b',',
            terminator: Terminator::Any(b'\n'),
        }
    }

    pub fn delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn terminator(mut self, terminator: Terminator) -> Self {
        self.terminator = terminator;
        self
    }

    pub fn from_reader<R: Read>(self, rdr: R) -> CsvRowReader<R> {
        let rdr = ReaderBuilder::new()
            .trim(Trim::None)
            .delimiter(self.delimiter)
            .terminator(self.terminator)
            .has_headers(false) // the header is an ordinary first row here
            .flexible(true)
            .from_reader(rdr);

        CsvRowReader {
            records: RefCell::new(rdr.into_records()),
        }
    }

    /// Reads rows out of already normalized text.
    pub fn from_text(self, text: NormalizedText) -> CsvRowReader<Cursor<String>> {
        self.from_reader(Cursor::new(text.into_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::{CsvRowReaderBuilder, RawRow};
    use crate::{core::item::ItemReader, item::csv::encoding::normalize};

    fn read_all<R: std::io::Read>(reader: &super::CsvRowReader<R>) -> Vec<RawRow> {
        let mut rows = Vec::new();
        while let Some(row) = reader.read().unwrap() {
            rows.push(row);
        }
        rows
    }

    #[test]
    fn rows_keep_their_width_and_record_number() {
        let reader = CsvRowReaderBuilder::new().from_reader("a,b,c\n1,2\n\n3,4,5,6".as_bytes());

        let rows = read_all(&reader);

        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0], RawRow::new(1, ["a", "b", "c"]));
        assert_eq!(rows[1], RawRow::new(2, ["1", "2"]));
        // the empty line is skipped without taking a number
        assert_eq!(rows[2], RawRow::new(3, ["3", "4", "5", "6"]));
    }

    #[test]
    fn quoted_fields_may_hold_delimiters_and_newlines() {
        let reader = CsvRowReaderBuilder::new()
            .from_reader("code,description\nP1,\"Large, red\nand shiny\"".as_bytes());

        let rows = read_all(&reader);

        assert_eq!(rows[1].fields, vec!["P1", "Large, red\nand shiny"]);
    }

    #[test]
    fn fields_are_not_trimmed() {
        let reader = CsvRowReaderBuilder::new()
            .delimiter(b'\t')
            .from_text(normalize(b" a \t b\r\n"));

        let rows = read_all(&reader);

        assert_eq!(rows[0].fields, vec![" a ", " b"]);
    }

    #[test]
    fn blank_rows_are_recognised() {
        assert!(RawRow::new(1, ["", "  ", "\t"]).is_blank());
        assert!(!RawRow::new(1, ["", "x"]).is_blank());
        assert_eq!(RawRow::new(1, ["a", "b"]).joined(), "a, b");
    }
}
