use crate::{Record, Value};
use anyhow::{anyhow, Result};
use serde_json::{Map, Number, Value as JsonValue};

/// JSON integers become [`Value::Int`], or [`Value::UInt`] beyond `i64::MAX`.
/// Other numbers become [`Value::Float`].
/// `null` becomes [`Value::Null`], except as an object member, which is dropped.
impl TryFrom<&JsonValue> for Value {
    type Error = anyhow::Error;
    fn try_from(json: &JsonValue) -> Result<Self> {
        let val = match json {
            JsonValue::Null => Value::Null,
            JsonValue::Bool(b) => Value::Bool(*b),
            JsonValue::Number(n) => match (n.as_i64(), n.as_u64(), n.as_f64()) {
                (Some(i), _, _) => Value::Int(i),
                (None, Some(u), _) => Value::UInt(u),
                (None, None, Some(f)) => Value::Float(f),
                (None, None, None) => return Err(anyhow!("Unrepresentable number {n}")),
            },
            JsonValue::String(s) => Value::Str(s.clone()),
            JsonValue::Array(elems) => Value::Array(
                elems.iter().map(Value::try_from).collect::<Result<_>>()?,
            ),
            JsonValue::Object(map) => Value::Record(Record::try_from(map)?),
        };
        Ok(val)
    }
}

impl TryFrom<&Map<String, JsonValue>> for Record {
    type Error = anyhow::Error;
    fn try_from(map: &Map<String, JsonValue>) -> Result<Self> {
        let mut rec = Record::new();
        for (name, json) in map {
            if json.is_null() {
                continue;
            }
            rec.insert(name.clone(), Value::try_from(json)?);
        }
        Ok(rec)
    }
}

impl TryFrom<&JsonValue> for Record {
    type Error = anyhow::Error;
    fn try_from(json: &JsonValue) -> Result<Self> {
        match json {
            JsonValue::Object(map) => Record::try_from(map),
            other => Err(anyhow!("Expected a JSON object but found {other}")),
        }
    }
}

impl Record {
    pub fn from_json_str(s: &str) -> Result<Self> {
        let json = serde_json::from_str::<JsonValue>(s)?;
        Record::try_from(&json)
    }

    pub fn to_json(&self) -> JsonValue {
        JsonValue::from(self)
    }
}

/// Non-finite floats become `null`.
impl From<&Value> for JsonValue {
    fn from(val: &Value) -> Self {
        match val {
            Value::Int(i) => JsonValue::from(*i),
            Value::UInt(u) => JsonValue::from(*u),
            Value::Float(f) => Number::from_f64(*f).map_or(JsonValue::Null, JsonValue::Number),
            Value::Bool(b) => JsonValue::Bool(*b),
            Value::Str(s) => JsonValue::String(s.clone()),
            Value::Record(rec) => JsonValue::from(rec),
            Value::Array(elems) => JsonValue::Array(elems.iter().map(JsonValue::from).collect()),
            Value::Null => JsonValue::Null,
        }
    }
}

impl From<&Record> for JsonValue {
    fn from(rec: &Record) -> Self {
        let map = rec
            .iter()
            .map(|(name, val)| (name.to_owned(), JsonValue::from(val)))
            .collect::<Map<_, _>>();
        JsonValue::Object(map)
    }
}
