//! # Packed message codec
//!
//! Encodes [`Record`]s into packed, C-struct-compatible byte buffers and decodes them
//! back, as described by a [`Schema`].
//!
//! ```ignore
//! let codec = PackCodec::from_json_schema(
//!     r#"[["id", "uint32"], ["name", "string", 8], ["scores", "int16", null, 4]]"#,
//!     CodecOptions::default(),
//! )?;
//! let rec = Record::new().with("id", 7u32).with("name", "alice").with("scores", vec![1i16, 2, 3]);
//! let buf = codec.encode(&rec);
//! assert_eq!(buf.len(), 20);
//! assert_eq!(codec.resolve_path("scores").map(|loc| loc.offset()), Some(12));
//! ```
//!
//! A schema is compiled once, into a [`Layout`]. Encoding and decoding are lenient:
//! - Data fields the schema does not declare are ignored.
//! - Array values longer than the declared count are clamped.
//! - Values of an incompatible kind leave their slots untouched.
//! - Decoding a buffer that ends early yields the fields that fit.
//!
//! Skips are reported through [`tracing`] at trace level. No subscriber is installed.

mod charset;
mod codec;
mod decoder;
mod encoder;
mod layout;
mod options;
mod path;
mod wire;

pub use charset::{Ascii, Charset, CharsetTable, Latin1, TextCodec, Utf8};
pub use codec::PackCodec;
pub use decoder::decode;
pub use encoder::{encode, encode_into, EncodeError, WriteLen};
pub use layout::{DecodeEntry, DecodeTable, EncodeEntry, EncodeTable, FieldAux, Layout};
pub use options::{ByteOrder, CodecOptions, Int64Layout};
pub use path::{resolve, FieldLocation, FieldPath};
pub use wire::WireFormat;

pub use packmsg_types::{
    FieldDecl, FieldKind, Record, ScalarType, Schema, SchemaError, TypeTag, TypeTagInt, Value,
};
