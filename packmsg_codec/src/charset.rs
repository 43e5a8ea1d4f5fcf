//! Text codecs for `string` fields.
//!
//! The engine only ever asks a codec for two things: text to bytes, and bytes to text.
//! Truncation and zero termination are the engine's business, not the codec's.

use packmsg_types::SchemaError;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;


/// Charset names this short (including the empty name) select the default codec.
const MAX_DEFAULT_LABEL_LEN: usize = 2;

pub trait TextCodec: Send + Sync {
    fn encode(&self, text: &str) -> Vec<u8>;
    fn decode(&self, bytes: &[u8]) -> String;
}

/// Invalid sequences decode to U+FFFD.
pub struct Utf8;
impl TextCodec for Utf8 {
    fn encode(&self, text: &str) -> Vec<u8> {
        text.as_bytes().to_vec()
    }
    fn decode(&self, bytes: &[u8]) -> String {
        String::from_utf8_lossy(bytes).into_owned()
    }
}

/// ISO-8859-1. Characters above U+00FF encode as `?`.
pub struct Latin1;
impl TextCodec for Latin1 {
    fn encode(&self, text: &str) -> Vec<u8> {
        text.chars()
            .map(|c| u8::try_from(u32::from(c)).unwrap_or(b'?'))
            .collect()
    }
    fn decode(&self, bytes: &[u8]) -> String {
        bytes.iter().map(|b| char::from(*b)).collect()
    }
}

/// Non-ASCII characters encode as `?`; bytes above 0x7F decode to U+FFFD.
pub struct Ascii;
impl TextCodec for Ascii {
    fn encode(&self, text: &str) -> Vec<u8> {
        text.chars()
            .map(|c| if c.is_ascii() { c as u8 } else { b'?' })
            .collect()
    }
    fn decode(&self, bytes: &[u8]) -> String {
        bytes
            .iter()
            .map(|b| {
                if b.is_ascii() {
                    char::from(*b)
                } else {
                    char::REPLACEMENT_CHARACTER
                }
            })
            .collect()
    }
}

/// A named, shareable [`TextCodec`].
#[derive(Clone)]
pub struct Charset {
    label: String,
    codec: Arc<dyn TextCodec>,
}

impl Charset {
    pub fn custom(label: impl Into<String>, codec: Arc<dyn TextCodec>) -> Self {
        Self {
            label: label.into(),
            codec,
        }
    }

    pub fn utf8() -> Self {
        Self::custom("utf8", Arc::new(Utf8))
    }
    pub fn latin1() -> Self {
        Self::custom("latin1", Arc::new(Latin1))
    }
    pub fn ascii() -> Self {
        Self::custom("ascii", Arc::new(Ascii))
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn encode(&self, text: &str) -> Vec<u8> {
        self.codec.encode(text)
    }
    pub fn decode(&self, bytes: &[u8]) -> String {
        self.codec.decode(bytes)
    }
}
impl fmt::Debug for Charset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Charset({})", self.label)
    }
}
impl PartialEq for Charset {
    fn eq(&self, other: &Self) -> bool {
        self.label == other.label
    }
}

/// Charsets by label. Labels match case-insensitively.
#[derive(Clone, Debug)]
pub struct CharsetTable {
    by_label: HashMap<String, Charset>,
}

impl Default for CharsetTable {
    fn default() -> Self {
        let mut table = Self {
            by_label: HashMap::new(),
        };
        for label in ["utf8", "utf-8"] {
            table.insert(label, Charset::utf8());
        }
        for label in ["latin1", "iso-8859-1", "binary"] {
            table.insert(label, Charset::latin1());
        }
        table.insert("ascii", Charset::ascii());
        table
    }
}

impl CharsetTable {
    /// Registers `codec` under `label`, replacing any charset with the same label.
    pub fn register(&mut self, label: &str, codec: Arc<dyn TextCodec>) {
        self.insert(label, Charset::custom(label, codec));
    }

    fn insert(&mut self, label: &str, charset: Charset) {
        self.by_label.insert(label.to_ascii_lowercase(), charset);
    }

    pub fn lookup(&self, label: &str) -> Option<&Charset> {
        self.by_label.get(&label.to_ascii_lowercase())
    }

    /// Resolves the charset named for `field`.
    ///
    /// No name, or a name too short to be a label, selects `default`.
    pub fn resolve(
        &self,
        field: &str,
        label: Option<&str>,
        default: &Charset,
    ) -> Result<Charset, SchemaError> {
        match label {
            Some(label) if label.len() > MAX_DEFAULT_LABEL_LEN => self
                .lookup(label)
                .cloned()
                .ok_or_else(|| SchemaError::UnknownCharset {
                    field: field.to_owned(),
                    charset: label.to_owned(),
                }),
            _ => Ok(default.clone()),
        }
    }
}
