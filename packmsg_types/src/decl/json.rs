//! Loading a [`Schema`] from its positional JSON form.
//!
//! ```text
//! [
//!     [ name, type_tag ],
//!     [ name, "string", capacity ],
//!     [ name, "string", capacity, charset ],
//!     [ name, "string", capacity, charset, array_count ],
//!     [ name, type_tag, null, array_count ],
//!     [ name, "struct", [ ...nested declarations... ], null, array_count ],
//! ]
//! ```
//!
//! `null` marks an absent slot. In slot 3, a number is read as the array count
//! (the short form); anything else is the charset, and the array count follows in slot 4.

use crate::{FieldDecl, FieldKind, ScalarType, Schema, SchemaError, TypeTag};
use serde_json::Value as JsonValue;

const SLOT_NAME: usize = 0;
const SLOT_TYPE: usize = 1;
const SLOT_LEN_OR_FIELDS: usize = 2;
const SLOT_CHARSET: usize = 3;
const SLOT_ARRAY_COUNT: usize = 4;

impl Schema {
    pub fn from_json_str(s: &str) -> Result<Self, SchemaError> {
        let json = serde_json::from_str::<JsonValue>(s)?;
        Self::from_json(&json)
    }

    pub fn from_json(json: &JsonValue) -> Result<Self, SchemaError> {
        let items = json
            .as_array()
            .ok_or_else(|| SchemaError::malformed("", "a schema must be an array"))?;
        items
            .iter()
            .enumerate()
            .map(|(idx, item)| parse_decl(idx, item))
            .collect()
    }
}

fn parse_decl(idx: usize, item: &JsonValue) -> Result<FieldDecl, SchemaError> {
    let slots = match item.as_array() {
        Some(slots) if slots.len() >= 2 => slots,
        Some(_) => {
            return Err(SchemaError::malformed(
                format!("#{idx}"),
                "a declaration needs at least a name and a type tag",
            ))
        }
        None => {
            return Err(SchemaError::malformed(
                format!("#{idx}"),
                "a declaration must be an array",
            ))
        }
    };
    let slot = |i: usize| slots.get(i).filter(|v| !v.is_null());

    let name = slots[SLOT_NAME]
        .as_str()
        .ok_or_else(|| SchemaError::malformed(format!("#{idx}"), "the name must be a string"))?
        .to_owned();

    let tag_name = slots[SLOT_TYPE]
        .as_str()
        .ok_or_else(|| SchemaError::malformed(&name, "the type tag must be a string"))?;
    let tag = TypeTag::from_name(tag_name).ok_or_else(|| SchemaError::UnknownType {
        field: name.clone(),
        tag: tag_name.to_owned(),
    })?;

    let (charset_slot, count_slot) = match slot(SLOT_CHARSET) {
        Some(JsonValue::Number(_)) => (None, slot(SLOT_CHARSET)),
        other => (other, slot(SLOT_ARRAY_COUNT)),
    };

    let kind = match ScalarType::try_from(tag) {
        Ok(scalar) => FieldKind::Scalar(scalar),
        Err(TypeTag::Str) => {
            let capacity = match slot(SLOT_LEN_OR_FIELDS) {
                None => return Err(SchemaError::MissingCapacity { field: name }),
                Some(v) => parse_size(&name, v, "capacity")?,
            };
            let charset = match charset_slot {
                None => None,
                Some(JsonValue::String(s)) => Some(s.clone()),
                Some(_) => {
                    return Err(SchemaError::malformed(&name, "the charset must be a string"))
                }
            };
            FieldKind::FixedString { capacity, charset }
        }
        Err(_) => {
            let nested = slot(SLOT_LEN_OR_FIELDS).ok_or_else(|| {
                SchemaError::malformed(&name, "a struct needs a nested declaration list")
            })?;
            let nested =
                Schema::from_json(nested).map_err(|e| SchemaError::nested(&name, e))?;
            FieldKind::Struct(nested)
        }
    };

    let array_count = match count_slot {
        None => 1,
        Some(v) => parse_size(&name, v, "array count")?,
    };

    Ok(FieldDecl {
        name,
        kind,
        array_count,
    })
}

/// Accepts non-negative integers, and strings holding one.
fn parse_size(name: &str, v: &JsonValue, what: &str) -> Result<usize, SchemaError> {
    let size = match v {
        JsonValue::Number(n) => n.as_u64().and_then(|n| usize::try_from(n).ok()),
        JsonValue::String(s) => s.trim().parse::<usize>().ok(),
        _ => None,
    };
    size.ok_or_else(|| {
        SchemaError::malformed(name, format!("the {what} must be a non-negative integer"))
    })
}
