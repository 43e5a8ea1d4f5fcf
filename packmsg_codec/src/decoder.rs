use crate::layout::{DecodeEntry, DecodeTable, FieldAux};
use crate::wire::WireFormat;
use packmsg_types::{Record, Value};
use tracing::trace;


/// Decodes the message that starts at `offset` of `buf`.
///
/// Decoding is lenient. If `buf` ends early, each element whose bytes are missing
/// is omitted; a string element that is cut short yields the bytes that are there.
/// A field left with no element is omitted too, unless it is an array field,
/// which then decodes as an empty array.
pub fn decode(buf: &[u8], table: &DecodeTable, offset: usize, wire: &WireFormat) -> Record {
    let mut rec = Record::new();
    for entry in table.iter() {
        let mut vals = vec![];
        let mut off = offset.saturating_add(entry.byte_offset);
        for idx in 0..entry.array_count {
            match read_elem(buf, entry, off, wire) {
                Some(val) => vals.push(val),
                None => {
                    // Later elements lie further out.
                    trace!(field = entry.name.as_str(), idx, off, "Past end of buffer.");
                    break;
                }
            }
            off = off.saturating_add(entry.elem_size);
        }

        if entry.array_count > 1 {
            rec.insert(entry.name.as_str(), Value::Array(vals));
        } else if let Some(val) = vals.pop() {
            rec.insert(entry.name.as_str(), val);
        }
    }
    rec
}

fn read_elem(buf: &[u8], entry: &DecodeEntry, off: usize, wire: &WireFormat) -> Option<Value> {
    if off >= buf.len() {
        return None;
    }
    match &entry.aux {
        FieldAux::Scalar(scalar) => wire.read_scalar(buf, off, *scalar),
        FieldAux::Text(charset) => {
            let text_end = off
                .saturating_add(entry.elem_size.saturating_sub(1))
                .min(buf.len());
            let mut text = charset.decode(&buf[off..text_end]);
            if let Some(nul) = text.find('\0') {
                text.truncate(nul);
            }
            Some(Value::Str(text))
        }
        FieldAux::Nested(nested) => Some(Value::Record(decode(buf, nested, off, wire))),
    }
}
