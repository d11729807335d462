/// Delimited text input.
///
/// Reading a product file happens in three stages, each in its own module:
///
/// 1. [`encoding`] decodes the raw bytes (UTF-8, falling back to
///    Windows-1252), drops the byte-order mark and unifies line endings.
/// 2. [`delimiter`] sniffs the delimiter from the first line.
/// 3. [`csv_reader`] splits the text into [`csv_reader::RawRow`]s and exposes
///    them through the `ItemReader` trait.
///
/// ```
/// use product_import::item::csv::{
///     csv_reader::CsvRowReaderBuilder, delimiter::detect_delimiter, encoding::normalize,
/// };
/// use product_import::core::item::ItemReader;
///
/// let text = normalize(b"\xEF\xBB\xBFcode|name\r\nP1|TV\r\n");
/// let delimiter = detect_delimiter(text.first_line());
/// assert_eq!(delimiter, b'|');
///
/// let reader = CsvRowReaderBuilder::new().delimiter(delimiter).from_text(text);
/// assert_eq!(reader.read().unwrap().unwrap().fields, vec!["code", "name"]);
/// assert_eq!(reader.read().unwrap().unwrap().fields, vec!["P1", "TV"]);
/// ```
pub mod csv_reader;

/// Delimiter sniffing.
pub mod delimiter;

/// Encoding detection and text normalization.
pub mod encoding;
