use crate::{ScalarType, TypeTag};
use derive_more::{Deref, DerefMut, From, Into};

mod json;

/// One field of a packed layout.
///
/// `array_count` replicates the field that many times, back to back, like a C array member.
#[derive(PartialEq, Clone, Debug)]
pub struct FieldDecl {
    pub name: String,
    pub kind: FieldKind,
    pub array_count: usize,
}

#[derive(PartialEq, Clone, Debug)]
pub enum FieldKind {
    Scalar(ScalarType),

    /// A zero-terminated character array of `capacity` bytes.
    /// At most `capacity - 1` bytes of text are stored; the last byte is always zero.
    ///
    /// `charset` names the text codec; `None` means the codec-wide default.
    FixedString {
        capacity: usize,
        charset: Option<String>,
    },

    /// A nested struct, laid out inline.
    Struct(Schema),
}

impl FieldDecl {
    pub fn scalar(name: impl Into<String>, scalar: ScalarType) -> Self {
        Self {
            name: name.into(),
            kind: FieldKind::Scalar(scalar),
            array_count: 1,
        }
    }

    pub fn string(name: impl Into<String>, capacity: usize) -> Self {
        Self {
            name: name.into(),
            kind: FieldKind::FixedString {
                capacity,
                charset: None,
            },
            array_count: 1,
        }
    }

    pub fn structure(name: impl Into<String>, fields: impl Into<Schema>) -> Self {
        Self {
            name: name.into(),
            kind: FieldKind::Struct(fields.into()),
            array_count: 1,
        }
    }

    pub fn array(mut self, count: usize) -> Self {
        self.array_count = count;
        self
    }

    /// Has no effect on non-string fields.
    pub fn with_charset(mut self, name: impl Into<String>) -> Self {
        if let FieldKind::FixedString { charset, .. } = &mut self.kind {
            *charset = Some(name.into());
        }
        self
    }

    pub fn type_tag(&self) -> TypeTag {
        match &self.kind {
            FieldKind::Scalar(scalar) => TypeTag::from(*scalar),
            FieldKind::FixedString { .. } => TypeTag::Str,
            FieldKind::Struct(_) => TypeTag::Struct,
        }
    }
}

/// An ordered list of field declarations. Declaration order is layout order.
#[derive(From, Into, Deref, DerefMut, PartialEq, Clone, Default, Debug)]
pub struct Schema(Vec<FieldDecl>);

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field(mut self, decl: FieldDecl) -> Self {
        self.0.push(decl);
        self
    }
}

impl FromIterator<FieldDecl> for Schema {
    fn from_iter<I: IntoIterator<Item = FieldDecl>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Schema {
    type Item = &'a FieldDecl;
    type IntoIter = std::slice::Iter<'a, FieldDecl>;
    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
