use crate::charset::{Charset, CharsetTable};
use crate::decoder;
use crate::encoder::{self, EncodeError, WriteLen};
use crate::layout::Layout;
use crate::options::CodecOptions;
use crate::path::{self, FieldLocation, FieldPath};
use crate::wire::WireFormat;
use packmsg_types::{Record, Schema, SchemaError};
use std::sync::Arc;
use tracing::trace;


/// Field name reported when the codec-wide charset is unknown.
const OPTIONS_FIELD: &str = "<options>";

/// A compiled schema, ready to encode and decode messages.
///
/// Clones share the compiled layout. Each clone has its own internal buffer,
/// which is allocated by the first [`Self::encode_internal`].
#[derive(Clone, Debug)]
pub struct PackCodec {
    layout: Arc<Layout>,
    options: CodecOptions,
    wire: WireFormat,
    internal_buf: Vec<u8>,
}

/* Construction. */
impl PackCodec {
    pub fn new(schema: &Schema, options: CodecOptions) -> Result<Self, SchemaError> {
        Self::with_charsets(schema, options, &CharsetTable::default())
    }

    /// Compiles `schema`, looking up charset labels in `charsets` instead of the built-in table.
    pub fn with_charsets(
        schema: &Schema,
        options: CodecOptions,
        charsets: &CharsetTable,
    ) -> Result<Self, SchemaError> {
        let default_charset =
            charsets.resolve(OPTIONS_FIELD, options.charset.as_deref(), &Charset::utf8())?;
        let layout = Layout::compile(schema, charsets, &default_charset)?;
        Ok(Self {
            layout: Arc::new(layout),
            wire: WireFormat::from(&options),
            options,
            internal_buf: vec![],
        })
    }

    /// Compiles `schema`, then encodes `data` into the internal buffer.
    pub fn with_data(
        schema: &Schema,
        data: &Record,
        options: CodecOptions,
    ) -> Result<Self, SchemaError> {
        let mut codec = Self::new(schema, options)?;
        codec.encode_internal(data);
        Ok(codec)
    }

    /// Compiles a schema given in the positional JSON form.
    pub fn from_json_schema(json: &str, options: CodecOptions) -> Result<Self, SchemaError> {
        let schema = Schema::from_json_str(json)?;
        Self::new(&schema, options)
    }
}

/* Accessors. */
impl PackCodec {
    /// Bytes in one encoded message.
    pub fn total_len(&self) -> usize {
        self.layout.total_len()
    }

    pub fn layout(&self) -> &Arc<Layout> {
        &self.layout
    }

    pub fn options(&self) -> &CodecOptions {
        &self.options
    }

    /// The message most recently written by [`Self::encode_internal`].
    /// Empty until the first one.
    pub fn internal_buffer(&self) -> &[u8] {
        &self.internal_buf
    }
}

/* Encoding and decoding. */
impl PackCodec {
    /// Encodes `data` into a new zeroed buffer.
    pub fn encode(&self, data: &Record) -> Vec<u8> {
        encoder::encode(
            data,
            self.layout.encode_table(),
            self.layout.total_len(),
            &self.wire,
        )
    }

    /// Encodes `data` into `buf` at `offset`. Fails, writing nothing, if `buf` is too short.
    pub fn encode_into(
        &self,
        data: &Record,
        buf: &mut [u8],
        offset: usize,
    ) -> Result<WriteLen, EncodeError> {
        encoder::encode_into(
            data,
            self.layout.encode_table(),
            self.layout.total_len(),
            buf,
            offset,
            &self.wire,
        )
    }

    /// Encodes `data` over the internal buffer. Slots `data` does not fill keep
    /// the bytes of earlier messages, or are zero on the first call.
    pub fn encode_internal(&mut self, data: &Record) -> &[u8] {
        if self.internal_buf.len() != self.layout.total_len() {
            self.internal_buf = vec![0; self.layout.total_len()];
        }
        encoder::write_record(
            data,
            self.layout.encode_table(),
            &mut self.internal_buf,
            0,
            &self.wire,
        );
        &self.internal_buf
    }

    pub fn decode(&self, buf: &[u8], offset: usize) -> Record {
        decoder::decode(buf, self.layout.decode_table(), offset, &self.wire)
    }

    /// Locates a dot-separated field path, e.g. `"header.seq"`.
    pub fn resolve_path(&self, path: &str) -> Option<FieldLocation> {
        match path.parse::<FieldPath>() {
            Ok(path) => self.resolve(&path),
            Err(e) => {
                trace!(path, "{e}");
                None
            }
        }
    }

    pub fn resolve(&self, path: &FieldPath) -> Option<FieldLocation> {
        path::resolve(&self.layout, path)
    }
}
