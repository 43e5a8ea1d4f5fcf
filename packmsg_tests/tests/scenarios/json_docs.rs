use anyhow::{anyhow, Result};
use packmsg_codec::{CodecOptions, PackCodec, Record, Schema, SchemaError};
use serde_json::{json, Value as JsonValue};

/// A peer's message definition: options, schema and a sample message in one document.
const TELEMETRY_DOC: &str = r#"{
    "options": {"littleEndian": false, "charset": "latin1"},
    "schema": [
        ["station", "string", 6],
        ["seq", "uint16"],
        ["temps", "float", null, 3],
        ["gps", "object", [["lat", "double"], ["lon", "double"]]],
        ["tags", "string", 4, "ascii", 2],
        ["ok", "bool"]
    ],
    "sample": {
        "station": "Zürich",
        "seq": 513,
        "temps": [20.5, -3.25],
        "gps": {"lat": 47.375, "lon": 8.5},
        "tags": ["abc", "défg"],
        "ok": 1,
        "comment": null
    }
}"#;

pub fn schema_options_and_data_from_one_document() -> Result<()> {
    let doc = serde_json::from_str::<JsonValue>(TELEMETRY_DOC)?;
    let options = serde_json::from_value::<CodecOptions>(doc["options"].clone())?;
    let schema = Schema::from_json(&doc["schema"])?;
    let sample = Record::try_from(&doc["sample"])?;
    assert!(!sample.contains("comment"));

    let codec = PackCodec::new(&schema, options)?;
    assert_eq!(codec.total_len(), 6 + 2 + 4 * 3 + 16 + 4 * 2 + 1);

    let buf = codec.encode(&sample);
    assert_eq!(&buf[..8], &[b'Z', 0xFC, b'r', b'i', b'c', 0, 0x02, 0x01]);

    let tags = codec
        .resolve_path("tags")
        .ok_or_else(|| anyhow!("tags not found"))?;
    let tags_at = tags.offset();
    assert_eq!(&buf[tags_at..tags_at + 8], b"abc\0d?f\0");

    let decoded = codec.decode(&buf, 0).to_json();
    assert_eq!(
        decoded,
        json!({
            "station": "Züric",
            "seq": 513,
            "temps": [20.5, -3.25, 0.0],
            "gps": {"lat": 47.375, "lon": 8.5},
            "tags": ["abc", "d?f"],
            "ok": true
        })
    );
    Ok(())
}

fn kind(e: &SchemaError) -> &'static str {
    match e {
        SchemaError::Malformed { .. } => "malformed",
        SchemaError::UnknownType { .. } => "unknown type",
        SchemaError::MissingCapacity { .. } => "missing capacity",
        SchemaError::UnknownCharset { .. } => "unknown charset",
        SchemaError::DuplicateField { .. } => "duplicate",
        SchemaError::Nested { .. } => "nested",
        SchemaError::Json(_) => "json",
    }
}

pub fn bad_documents() -> Result<()> {
    for (schema, exp) in [
        (r#"[["a", "int8"], ["a", "int8"]]"#, "duplicate"),
        (r#"[["s", "string"]]"#, "missing capacity"),
        (r#"[["n", "varint"]]"#, "unknown type"),
        (r#"[["s", "string", 4, "ebcdic"]]"#, "unknown charset"),
        (r#"[["g", "struct", [["x"]]]]"#, "nested"),
        (r#"{"a": "int8"}"#, "malformed"),
        (r#"[["a", "int8"]"#, "json"),
    ] {
        match PackCodec::from_json_schema(schema, CodecOptions::default()) {
            Ok(_) => return Err(anyhow!("{schema} compiled")),
            Err(e) => assert_eq!(kind(&e), exp, "{schema}: {e}"),
        }
    }

    assert!(CodecOptions::from_json_str(r#"{"littleEndian": "yes"}"#).is_err());
    Ok(())
}
