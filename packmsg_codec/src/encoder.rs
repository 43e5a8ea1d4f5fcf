use crate::charset::Charset;
use crate::layout::{EncodeEntry, EncodeTable, FieldAux};
use crate::wire::WireFormat;
use derive_more::Deref;
use packmsg_types::{Record, Value};
use thiserror::Error;
use tracing::{enabled, trace, Level};


#[derive(Error, PartialEq, Eq, Debug)]
pub enum EncodeError {
    #[error("Buffer of {available} bytes cannot hold the {needed} bytes to be written")]
    BufferTooSmall { needed: usize, available: usize },
}

#[derive(Deref, PartialEq, Eq, Clone, Copy, Debug)]
pub struct WriteLen(usize);

/// Encodes `data` into a fresh, zeroed buffer of `total_len` bytes.
pub fn encode(
    data: &Record,
    table: &EncodeTable,
    total_len: usize,
    wire: &WireFormat,
) -> Vec<u8> {
    let mut buf = vec![0u8; total_len];
    write_record(data, table, &mut buf, 0, wire);
    buf
}

/// Encodes `data` into `buf`, starting at `offset`.
///
/// Bytes of `buf` that no field value is written to keep their content.
pub fn encode_into(
    data: &Record,
    table: &EncodeTable,
    total_len: usize,
    buf: &mut [u8],
    offset: usize,
    wire: &WireFormat,
) -> Result<WriteLen, EncodeError> {
    let needed = offset.saturating_add(total_len);
    if buf.len() < needed {
        return Err(EncodeError::BufferTooSmall {
            needed,
            available: buf.len(),
        });
    }
    write_record(data, table, buf, offset, wire);
    Ok(WriteLen(total_len))
}

/// Walks the schema's fields in declaration order, writing those that `data` has.
///
/// Values beyond a field's array count are dropped;
/// array slots with no value, or with a [`Value::Null`], keep their bytes.
///
/// `buf` must hold the table's whole layout from `base` on.
pub(crate) fn write_record(
    data: &Record,
    table: &EncodeTable,
    buf: &mut [u8],
    base: usize,
    wire: &WireFormat,
) {
    if enabled!(Level::TRACE) {
        for name in data.names().filter(|name| !table.contains(name)) {
            trace!(field = name, "Not in schema; skipped.");
        }
    }

    for (name, entry) in table.iter() {
        let elems = match data.get(name) {
            None => continue,
            Some(val) => val.elements(),
        };
        if elems.len() > entry.array_count {
            trace!(
                field = name,
                given = elems.len(),
                array_count = entry.array_count,
                "Clamped to array count."
            );
        }

        let mut off = base + entry.byte_offset;
        for (idx, elem) in elems.iter().take(entry.array_count).enumerate() {
            if *elem == Value::Null {
                trace!(field = name, idx, "No value; slot left as is.");
            } else if !write_elem(elem, entry, buf, off, wire) {
                trace!(
                    field = name,
                    idx,
                    kind = elem.kind_name(),
                    "Incompatible value; slot left as is."
                );
            }
            off += entry.elem_size;
        }
    }
}

fn write_elem(
    elem: &Value,
    entry: &EncodeEntry,
    buf: &mut [u8],
    off: usize,
    wire: &WireFormat,
) -> bool {
    match &entry.aux {
        FieldAux::Scalar(scalar) => wire.write_scalar(buf, off, *scalar, elem),
        FieldAux::Text(charset) => match elem.as_str() {
            None => false,
            Some(text) => {
                write_text(text, charset, &mut buf[off..off + entry.elem_size]);
                true
            }
        },
        FieldAux::Nested(nested) => match elem.as_record() {
            None => false,
            Some(rec) => {
                write_record(rec, nested, buf, off, wire);
                true
            }
        },
    }
}

/// Fills the whole `slot`: at most `slot.len() - 1` bytes of encoded text, then zeros.
fn write_text(text: &str, charset: &Charset, slot: &mut [u8]) {
    let bytes = charset.encode(text);
    let text_len = bytes.len().min(slot.len().saturating_sub(1));
    slot[..text_len].copy_from_slice(&bytes[..text_len]);
    slot[text_len..].fill(0);
}
