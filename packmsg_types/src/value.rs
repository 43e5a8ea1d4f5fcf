use anyhow::{anyhow, Result};
use std::slice;

mod json;

/// The dynamic data object that is encoded into, and decoded from, a packed buffer.
#[derive(PartialEq, Clone, Debug)]
pub enum Value {
    Int(i64),
    UInt(u64),
    Float(f64),
    Bool(bool),
    Str(String),
    Record(Record),
    Array(Vec<Value>),
    /// Holds an array position that has no value.
    Null,
}

macro_rules! impl_from_primitive {
    ($variant:ident, $wide:ty, $($t:ty),+) => {
        $(
            impl From<$t> for Value {
                fn from(v: $t) -> Self {
                    Value::$variant(<$wide>::from(v))
                }
            }
        )+
    };
}
impl_from_primitive!(Int, i64, i8, i16, i32, i64);
impl_from_primitive!(UInt, u64, u8, u16, u32, u64);
impl_from_primitive!(Float, f64, f32, f64);
impl_from_primitive!(Bool, bool, bool);
impl_from_primitive!(Str, String, String, &str);
impl_from_primitive!(Record, Record, Record);

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(elems: Vec<T>) -> Self {
        Value::Array(elems.into_iter().map(Into::into).collect())
    }
}

impl Value {
    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::Int(_) => "int",
            Value::UInt(_) => "uint",
            Value::Float(_) => "float",
            Value::Bool(_) => "bool",
            Value::Str(_) => "string",
            Value::Record(_) => "record",
            Value::Array(_) => "array",
            Value::Null => "null",
        }
    }

    /// The value viewed as a sequence: an array's elements, or else the value itself
    /// as a sequence of one.
    pub fn elements(&self) -> &[Value] {
        match self {
            Value::Array(elems) => elems,
            other => slice::from_ref(other),
        }
    }

    /// Numeric view of a number or bool, with `as` conversion semantics.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            Value::UInt(u) => Some(*u as i64),
            Value::Float(f) => Some(*f as i64),
            Value::Bool(b) => Some(*b as i64),
            _ => None,
        }
    }

    /// Numeric view of a number or bool, with `as` conversion semantics.
    pub fn as_u64(&self) -> Option<u64> {
        match self {
            Value::Int(i) => Some(*i as u64),
            Value::UInt(u) => Some(*u),
            Value::Float(f) => Some(*f as u64),
            Value::Bool(b) => Some(*b as u64),
            _ => None,
        }
    }

    /// Numeric view of a number or bool, with `as` conversion semantics.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(i) => Some(*i as f64),
            Value::UInt(u) => Some(*u as f64),
            Value::Float(f) => Some(*f),
            Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_record(&self) -> Option<&Record> {
        match self {
            Value::Record(rec) => Some(rec),
            _ => None,
        }
    }

    /// Zero, NaN, null and the empty string are false. Records and arrays are always true.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Null => false,
            Value::Int(i) => *i != 0,
            Value::UInt(u) => *u != 0,
            Value::Float(f) => *f != 0.0 && !f.is_nan(),
            Value::Bool(b) => *b,
            Value::Str(s) => !s.is_empty(),
            Value::Record(_) | Value::Array(_) => true,
        }
    }
}

macro_rules! impl_try_from_value {
    ($t:ty, $variant:ident) => {
        impl TryFrom<Value> for $t {
            type Error = anyhow::Error;
            fn try_from(v: Value) -> Result<Self> {
                match v {
                    Value::$variant(inner) => Ok(inner),
                    other => Err(anyhow!(
                        "Expected {} but found {}",
                        std::any::type_name::<$t>(),
                        other.kind_name()
                    )),
                }
            }
        }
    };
}
impl_try_from_value!(i64, Int);
impl_try_from_value!(u64, UInt);
impl_try_from_value!(f64, Float);
impl_try_from_value!(bool, Bool);
impl_try_from_value!(String, Str);
impl_try_from_value!(Record, Record);
impl_try_from_value!(Vec<Value>, Array);

/// Named values, in insertion order.
///
/// Equality ignores order: two records are equal if they hold the same names
/// with equal values.
#[derive(Clone, Default, Debug)]
pub struct Record {
    fields: Vec<(String, Value)>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(name, value);
        self
    }

    /// Replaces in place if `name` is already present, returning the old value.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        let name = name.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(n, _)| *n == name) {
            Some((_, slot)) => Some(std::mem::replace(slot, value)),
            None => {
                self.fields.push((name, value));
                None
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    pub fn remove(&mut self, name: &str) -> Option<Value> {
        let idx = self.fields.iter().position(|(n, _)| n == name)?;
        Some(self.fields.remove(idx).1)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(n, _)| n.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(n, v)| (n.as_str(), v))
    }
}

impl PartialEq for Record {
    fn eq(&self, other: &Record) -> bool {
        self.len() == other.len()
            && self
                .iter()
                .all(|(name, v)| other.get(name).map_or(false, |o| o == v))
    }
}

impl<K, V> FromIterator<(K, V)> for Record
where
    K: Into<String>,
    V: Into<Value>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut rec = Record::new();
        for (k, v) in iter {
            rec.insert(k, v);
        }
        rec
    }
}

impl IntoIterator for Record {
    type Item = (String, Value);
    type IntoIter = std::vec::IntoIter<(String, Value)>;
    fn into_iter(self) -> Self::IntoIter {
        self.fields.into_iter()
    }
}
