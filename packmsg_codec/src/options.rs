use serde::Deserialize;

/// Codec-wide settings.
///
/// Deserializes from the camelCase JSON form peers already use, e.g.
/// `{"charset": "latin1", "littleEndian": false}`. Missing keys take their defaults.
#[derive(Deserialize, PartialEq, Eq, Clone, Debug)]
#[serde(rename_all = "camelCase", default)]
pub struct CodecOptions {
    /// Default charset of `string` fields that name none. `None` is UTF-8.
    pub charset: Option<String>,
    pub little_endian: bool,
    pub int64_layout: Int64Layout,
}

impl Default for CodecOptions {
    fn default() -> Self {
        Self {
            charset: None,
            little_endian: true,
            int64_layout: Int64Layout::default(),
        }
    }
}

impl CodecOptions {
    pub fn from_json_str(s: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(s)
    }

    pub fn charset(mut self, label: impl Into<String>) -> Self {
        self.charset = Some(label.into());
        self
    }

    pub fn little_endian(mut self, little_endian: bool) -> Self {
        self.little_endian = little_endian;
        self
    }

    pub fn int64_layout(mut self, layout: Int64Layout) -> Self {
        self.int64_layout = layout;
        self
    }

    pub fn byte_order(&self) -> ByteOrder {
        if self.little_endian {
            ByteOrder::Little
        } else {
            ByteOrder::Big
        }
    }
}

#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum ByteOrder {
    Little,
    Big,
}

/// How an `int64` occupies its 8 bytes.
#[derive(Deserialize, PartialEq, Eq, Clone, Copy, Default, Debug)]
#[serde(rename_all = "camelCase")]
pub enum Int64Layout {
    /// Two's-complement 64-bit integer in the codec's byte order.
    #[default]
    Canonical,

    /// The low 32-bit word, then the high 32-bit word, each in the codec's byte order.
    ///
    /// Identical to [`Int64Layout::Canonical`] for little-endian codecs.
    /// Big-endian peers that split 64-bit values into two words send this layout.
    LowWordFirst,
}
