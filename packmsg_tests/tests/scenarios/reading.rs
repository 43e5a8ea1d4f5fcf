use anyhow::Result;
use packmsg_codec::{CodecOptions, PackCodec, Record, Value};
use serde_json::json;

pub const READING_SCHEMA: &str =
    r#"[["id", "uint32"], ["name", "string", 8], ["scores", "int16", null, 4]]"#;

const READING_BYTES: [u8; 20] = [
    0x07, 0x00, 0x00, 0x00, //
    b'a', b'l', b'i', b'c', b'e', 0x00, 0x00, 0x00, //
    0x01, 0x00, 0x02, 0x00, 0x03, 0x00, 0x00, 0x00,
];

pub fn reading() -> Record {
    Record::new()
        .with("id", 7u32)
        .with("name", "alice")
        .with("scores", vec![1i16, 2, 3])
}

pub fn encode_reading() -> Result<()> {
    let codec = PackCodec::from_json_schema(READING_SCHEMA, CodecOptions::default())?;
    assert_eq!(codec.total_len(), 4 + 8 + 2 * 4);
    assert_eq!(codec.encode(&reading()), READING_BYTES);
    Ok(())
}

pub fn decode_reading() -> Result<()> {
    let codec = PackCodec::from_json_schema(READING_SCHEMA, CodecOptions::default())?;
    let rec = codec.decode(&READING_BYTES, 0);

    assert_eq!(u64::try_from(rec.get("id").cloned().unwrap())?, 7);
    assert_eq!(String::try_from(rec.get("name").cloned().unwrap())?, "alice");
    let scores = Vec::<Value>::try_from(rec.get("scores").cloned().unwrap())?;
    let scores = scores
        .into_iter()
        .map(i64::try_from)
        .collect::<Result<Vec<_>>>()?;
    assert_eq!(scores, vec![1, 2, 3, 0]);
    Ok(())
}

pub fn reading_via_json() -> Result<()> {
    let codec = PackCodec::from_json_schema(READING_SCHEMA, CodecOptions::default())?;
    let data = Record::from_json_str(r#"{"id": 7, "name": "alice", "scores": [1, 2, 3]}"#)?;
    let buf = codec.encode(&data);
    assert_eq!(buf, READING_BYTES);

    let decoded = codec.decode(&buf, 0).to_json();
    assert_eq!(
        decoded,
        json!({"id": 7, "name": "alice", "scores": [1, 2, 3, 0]})
    );
    Ok(())
}
