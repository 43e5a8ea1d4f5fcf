use crate::layout::{DecodeEntry, DecodeTable, Layout};
use anyhow::{anyhow, Error, Result};
use itertools::Itertools;
use owning_ref::OwningRef;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;


/// A field nested within struct fields, e.g. `header.route.hops`.
///
/// Each segment names a field of the struct named by the previous segment.
/// Array fields are located by their first element; there is no index syntax.
#[derive(PartialEq, Eq, Hash, Clone, Debug)]
pub struct FieldPath(Vec<String>);

impl FieldPath {
    pub fn new<S: Into<String>>(segments: impl IntoIterator<Item = S>) -> Self {
        Self(segments.into_iter().map(Into::into).collect())
    }

    pub fn segments(&self) -> &[String] {
        &self.0
    }
}

impl FromStr for FieldPath {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self> {
        let segments = s.split('.').map(str::to_owned).collect::<Vec<_>>();
        if segments.iter().any(String::is_empty) {
            return Err(anyhow!("Field path {s:?} has an empty segment"));
        }
        Ok(Self(segments))
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.iter().join("."))
    }
}

/// Where a field lies in an encoded message, and how it is laid out.
///
/// Holds a share of the [`Layout`] it was resolved against.
#[derive(Clone, Debug)]
pub struct FieldLocation {
    offset: usize,
    entry: OwningRef<Arc<Layout>, DecodeEntry>,
}

impl FieldLocation {
    /// Byte offset from the start of the message.
    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn descriptor(&self) -> &DecodeEntry {
        &self.entry
    }
}

/// Locates `path` in `layout`, without any buffer.
///
/// `None` if a segment names no field, or if a segment other than the last names
/// a field that is not a struct.
pub fn resolve(layout: &Arc<Layout>, path: &FieldPath) -> Option<FieldLocation> {
    let mut offset = 0;
    let entry = OwningRef::new(Arc::clone(layout))
        .try_map(|layout| {
            let (off, entry) = lookup(layout.decode_table(), path.segments(), 0).ok_or(())?;
            offset = off;
            Ok::<_, ()>(entry)
        })
        .ok()?;
    Some(FieldLocation { offset, entry })
}

fn lookup<'a>(
    table: &'a DecodeTable,
    segments: &[String],
    base: usize,
) -> Option<(usize, &'a DecodeEntry)> {
    let (segment, rest) = segments.split_first()?;
    let entry = table.iter().find(|entry| entry.name == *segment)?;
    let offset = base + entry.byte_offset;
    if rest.is_empty() {
        Some((offset, entry))
    } else {
        lookup(entry.nested()?, rest, offset)
    }
}
