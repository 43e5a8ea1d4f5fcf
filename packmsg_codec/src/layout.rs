//! # Compiled layout
//!
//! Compiling a [`Schema`] assigns every field a byte offset, by accumulating
//! `elem_size * array_count` over the fields in declaration order. There is no padding.
//!
//! ```text
//! [["id","uint32"], ["name","string",8], ["scores","int16",null,4]]
//!
//!  offset  0         4                       12                     20
//!          ├─ id ────┼─ name ────────────────┼─ scores ─────────────┤
//!          │ u32     │ 7 bytes of text + NUL │ i16 │ i16 │ i16 │ i16 │
//! ```
//!
//! A nested struct's element size is the total length of its own compiled layout.
//! No layout may exceed [`MAX_TOTAL_LEN`] bytes.
//!
//! The result is two tables over the same fields: an [`EncodeTable`] keyed by name,
//! and a [`DecodeTable`] in declaration order.

use crate::charset::{Charset, CharsetTable};
use derive_more::Deref;
use packmsg_types::{FieldKind, ScalarType, Schema, SchemaError, TypeTag};
use std::collections::HashMap;
use tracing::debug;


/// The largest layout a buffer can be allocated for.
pub const MAX_TOTAL_LEN: usize = isize::MAX as usize;

/// What a field needs beyond its offset and size, to be read or written.
/// `T` is the nested table type of struct fields.
#[derive(PartialEq, Clone, Debug)]
pub enum FieldAux<T> {
    Scalar(ScalarType),
    Text(Charset),
    Nested(T),
}

#[derive(PartialEq, Clone, Debug)]
pub struct EncodeEntry {
    pub type_tag: TypeTag,
    pub byte_offset: usize,
    pub elem_size: usize,
    pub aux: FieldAux<EncodeTable>,
    pub array_count: usize,
}

/// Encode entries by field name. Iteration follows declaration order.
#[derive(PartialEq, Clone, Default, Debug)]
pub struct EncodeTable {
    entries: Vec<(String, EncodeEntry)>,
    idx_by_name: HashMap<String, usize>,
}

impl EncodeTable {
    pub fn get(&self, name: &str) -> Option<&EncodeEntry> {
        let idx = *self.idx_by_name.get(name)?;
        Some(&self.entries[idx].1)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.idx_by_name.contains_key(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &EncodeEntry)> {
        self.entries.iter().map(|(name, entry)| (name.as_str(), entry))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn insert(&mut self, name: String, entry: EncodeEntry) {
        self.idx_by_name.insert(name.clone(), self.entries.len());
        self.entries.push((name, entry));
    }
}

#[derive(PartialEq, Clone, Debug)]
pub struct DecodeEntry {
    pub byte_offset: usize,
    pub elem_size: usize,
    pub type_tag: TypeTag,
    pub name: String,
    pub aux: FieldAux<DecodeTable>,
    pub array_count: usize,
}

impl DecodeEntry {
    /// Bytes occupied by all elements of the field.
    pub fn span(&self) -> usize {
        self.elem_size * self.array_count
    }

    pub fn nested(&self) -> Option<&DecodeTable> {
        match &self.aux {
            FieldAux::Nested(table) => Some(table),
            _ => None,
        }
    }

    pub fn charset(&self) -> Option<&Charset> {
        match &self.aux {
            FieldAux::Text(charset) => Some(charset),
            _ => None,
        }
    }
}

/// Decode entries in declaration order.
#[derive(Deref, PartialEq, Clone, Default, Debug)]
pub struct DecodeTable(Vec<DecodeEntry>);

#[derive(PartialEq, Clone, Debug)]
pub struct Layout {
    total_len: usize,
    encode_table: EncodeTable,
    decode_table: DecodeTable,
}

impl Layout {
    /// Compiles `schema`. String fields that name no charset get `default_charset`.
    pub fn compile(
        schema: &Schema,
        charsets: &CharsetTable,
        default_charset: &Charset,
    ) -> Result<Self, SchemaError> {
        let compiler = Compiler {
            charsets,
            default_charset,
        };
        let (total_len, encode_table, decode_table) = compiler.compile_fields(schema)?;
        debug!(
            total_len,
            fields = decode_table.len(),
            charset = default_charset.label(),
            "Compiled layout."
        );
        Ok(Self {
            total_len,
            encode_table,
            decode_table,
        })
    }

    pub fn total_len(&self) -> usize {
        self.total_len
    }

    pub fn encode_table(&self) -> &EncodeTable {
        &self.encode_table
    }

    pub fn decode_table(&self) -> &DecodeTable {
        &self.decode_table
    }
}

struct Compiler<'a> {
    charsets: &'a CharsetTable,
    default_charset: &'a Charset,
}

impl<'a> Compiler<'a> {
    fn compile_fields(
        &self,
        fields: &Schema,
    ) -> Result<(usize, EncodeTable, DecodeTable), SchemaError> {
        let mut offset = 0usize;
        let mut encode_table = EncodeTable::default();
        let mut decode_entries = Vec::with_capacity(fields.len());

        for decl in fields.iter() {
            let name = &decl.name;
            if decl.array_count == 0 {
                return Err(SchemaError::malformed(name, "the array count must be positive"));
            }
            if encode_table.contains(name) {
                return Err(SchemaError::DuplicateField {
                    field: name.clone(),
                });
            }

            let (elem_size, enc_aux, dec_aux) = match &decl.kind {
                FieldKind::Scalar(scalar) => (
                    scalar.width(),
                    FieldAux::Scalar(*scalar),
                    FieldAux::Scalar(*scalar),
                ),
                FieldKind::FixedString { capacity, charset } => {
                    if *capacity == 0 {
                        return Err(SchemaError::malformed(
                            name,
                            "a string capacity must leave room for the terminator",
                        ));
                    }
                    let charset =
                        self.charsets
                            .resolve(name, charset.as_deref(), self.default_charset)?;
                    (
                        *capacity,
                        FieldAux::Text(charset.clone()),
                        FieldAux::Text(charset),
                    )
                }
                FieldKind::Struct(nested) => {
                    let (nested_len, nested_enc, nested_dec) = self
                        .compile_fields(nested)
                        .map_err(|e| SchemaError::nested(name, e))?;
                    (
                        nested_len,
                        FieldAux::Nested(nested_enc),
                        FieldAux::Nested(nested_dec),
                    )
                }
            };

            let next_offset = elem_size
                .checked_mul(decl.array_count)
                .and_then(|span| offset.checked_add(span))
                .filter(|next| *next <= MAX_TOTAL_LEN)
                .ok_or_else(|| SchemaError::malformed(name, "the layout size overflows"))?;

            let type_tag = decl.type_tag();
            encode_table.insert(
                name.clone(),
                EncodeEntry {
                    type_tag,
                    byte_offset: offset,
                    elem_size,
                    aux: enc_aux,
                    array_count: decl.array_count,
                },
            );
            decode_entries.push(DecodeEntry {
                byte_offset: offset,
                elem_size,
                type_tag,
                name: name.clone(),
                aux: dec_aux,
                array_count: decl.array_count,
            });

            offset = next_offset;
        }

        Ok((offset, encode_table, DecodeTable(decode_entries)))
    }
}
