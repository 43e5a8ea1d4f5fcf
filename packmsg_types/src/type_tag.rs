use anyhow::{anyhow, Result};
use derive_more::{Deref, From};
use num_derive::FromPrimitive;
use num_traits::FromPrimitive;
use std::any;
use std::fmt;
use std::str::FromStr;

#[derive(From, Deref, PartialEq, Eq, Clone, Copy, Debug)]
pub struct TypeTagInt(u8);
impl From<TypeTag> for TypeTagInt {
    fn from(tag: TypeTag) -> Self {
        Self(tag as u8)
    }
}

/// The wire type of a field.
///
/// The integer codes are stable; they are the codes peers use to refer to field types.
#[repr(u8)]
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy, FromPrimitive, Debug)]
pub enum TypeTag {
    Int8 = 0,
    UInt8 = 1,
    Int16 = 2,
    UInt16 = 3,
    Int32 = 4,
    UInt32 = 5,
    Int64 = 6,
    Float32 = 7,
    Float64 = 8,
    Bool = 9,
    Str = 10,
    Struct = 11,
}
impl TryFrom<TypeTagInt> for TypeTag {
    type Error = anyhow::Error;
    fn try_from(int: TypeTagInt) -> Result<Self> {
        TypeTag::from_u8(int.0).ok_or(anyhow!(
            "Unknown {} {}",
            any::type_name::<TypeTagInt>(),
            int.0
        ))
    }
}

impl TypeTag {
    pub const ALL: [TypeTag; 12] = [
        TypeTag::Int8,
        TypeTag::UInt8,
        TypeTag::Int16,
        TypeTag::UInt16,
        TypeTag::Int32,
        TypeTag::UInt32,
        TypeTag::Int64,
        TypeTag::Float32,
        TypeTag::Float64,
        TypeTag::Bool,
        TypeTag::Str,
        TypeTag::Struct,
    ];

    pub fn name(self) -> &'static str {
        match self {
            TypeTag::Int8 => "int8",
            TypeTag::UInt8 => "uint8",
            TypeTag::Int16 => "int16",
            TypeTag::UInt16 => "uint16",
            TypeTag::Int32 => "int32",
            TypeTag::UInt32 => "uint32",
            TypeTag::Int64 => "int64",
            TypeTag::Float32 => "float32",
            TypeTag::Float64 => "float64",
            TypeTag::Bool => "bool",
            TypeTag::Str => "string",
            TypeTag::Struct => "struct",
        }
    }

    /// Looks up a tag by its declared name.
    ///
    /// Besides the canonical names, `float`, `double` and `object` are accepted,
    /// which are the names older peers declare their schemas with.
    pub fn from_name(name: &str) -> Option<Self> {
        let tag = match name {
            "float" => TypeTag::Float32,
            "double" => TypeTag::Float64,
            "object" => TypeTag::Struct,
            _ => return Self::ALL.into_iter().find(|tag| tag.name() == name),
        };
        Some(tag)
    }

    /// The element width of a scalar type. `None` for strings and structs,
    /// whose width comes from their declaration.
    pub fn fixed_width(self) -> Option<usize> {
        ScalarType::try_from(self).ok().map(ScalarType::width)
    }
}
impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
impl FromStr for TypeTag {
    type Err = anyhow::Error;
    fn from_str(s: &str) -> Result<Self> {
        Self::from_name(s).ok_or_else(|| anyhow!("Unknown type tag {s:?}"))
    }
}

/// The fixed-width subset of [`TypeTag`].
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug)]
pub enum ScalarType {
    Int8,
    UInt8,
    Int16,
    UInt16,
    Int32,
    UInt32,
    Int64,
    Float32,
    Float64,
    Bool,
}

impl ScalarType {
    pub fn width(self) -> usize {
        match self {
            ScalarType::Int8 | ScalarType::UInt8 | ScalarType::Bool => 1,
            ScalarType::Int16 | ScalarType::UInt16 => 2,
            ScalarType::Int32 | ScalarType::UInt32 | ScalarType::Float32 => 4,
            ScalarType::Int64 | ScalarType::Float64 => 8,
        }
    }
}

impl From<ScalarType> for TypeTag {
    fn from(scalar: ScalarType) -> Self {
        match scalar {
            ScalarType::Int8 => TypeTag::Int8,
            ScalarType::UInt8 => TypeTag::UInt8,
            ScalarType::Int16 => TypeTag::Int16,
            ScalarType::UInt16 => TypeTag::UInt16,
            ScalarType::Int32 => TypeTag::Int32,
            ScalarType::UInt32 => TypeTag::UInt32,
            ScalarType::Int64 => TypeTag::Int64,
            ScalarType::Float32 => TypeTag::Float32,
            ScalarType::Float64 => TypeTag::Float64,
            ScalarType::Bool => TypeTag::Bool,
        }
    }
}

/// Fails with the tag itself, for `string` and `struct`.
impl TryFrom<TypeTag> for ScalarType {
    type Error = TypeTag;
    fn try_from(tag: TypeTag) -> Result<Self, TypeTag> {
        let scalar = match tag {
            TypeTag::Int8 => ScalarType::Int8,
            TypeTag::UInt8 => ScalarType::UInt8,
            TypeTag::Int16 => ScalarType::Int16,
            TypeTag::UInt16 => ScalarType::UInt16,
            TypeTag::Int32 => ScalarType::Int32,
            TypeTag::UInt32 => ScalarType::UInt32,
            TypeTag::Int64 => ScalarType::Int64,
            TypeTag::Float32 => ScalarType::Float32,
            TypeTag::Float64 => ScalarType::Float64,
            TypeTag::Bool => ScalarType::Bool,
            TypeTag::Str | TypeTag::Struct => return Err(tag),
        };
        Ok(scalar)
    }
}
