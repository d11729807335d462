use std::borrow::Cow;

use encoding_rs::{Encoding, UTF_8, WINDOWS_1252};
use log::debug;

const BYTE_ORDER_MARK: char = '\u{feff}';

/// Text decoded from an input file, ready to be split into rows.
///
/// The content is valid UTF-8, starts without a byte-order mark and only
/// contains `\n` line endings.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedText {
    content: String,
    encoding: &'static Encoding,
}

impl NormalizedText {
    pub fn as_str(&self) -> &str {
        &self.content
    }

    pub fn into_string(self) -> String {
        self.content
    }

    /// Name of the encoding the bytes were decoded from.
    pub fn encoding(&self) -> &'static str {
        self.encoding.name()
    }

    /// The first line, used to sniff the delimiter.
    pub fn first_line(&self) -> &str {
        self.content.lines().next().unwrap_or("")
    }
}

/// Decodes raw file bytes into [`NormalizedText`].
///
/// UTF-8 is tried first. Bytes that are not valid UTF-8 are decoded as
/// Windows-1252, the superset browsers use for ISO-8859-1 labels, which maps
/// every byte and therefore never fails.
pub fn normalize(bytes: &[u8]) -> NormalizedText {
    let (decoded, encoding) = decode(bytes);
    debug!("Detected encoding: {}", encoding.name());

    let content = decoded
        .strip_prefix(BYTE_ORDER_MARK)
        .unwrap_or(&decoded)
        .replace("\r\n", "\n")
        .replace('\r', "\n");

    NormalizedText { content, encoding }
}

fn decode(bytes: &[u8]) -> (Cow<'_, str>, &'static Encoding) {
    if let Some(text) = UTF_8.decode_without_bom_handling_and_without_replacement(bytes) {
        return (text, UTF_8);
    }

    let (text, had_errors) = WINDOWS_1252.decode_without_bom_handling(bytes);
    if !had_errors {
        return (text, WINDOWS_1252);
    }

    (String::from_utf8_lossy(bytes), UTF_8)
}
