use super::reading::{reading, READING_SCHEMA};
use anyhow::Result;
use packmsg_codec::{CodecOptions, FieldDecl, PackCodec, Record, ScalarType, Schema, Value};

pub fn extra_fields_and_long_arrays() -> Result<()> {
    let codec = PackCodec::from_json_schema(READING_SCHEMA, CodecOptions::default())?;
    let data = reading()
        .with("unit", "kPa")
        .with("scores", vec![1i16, 2, 3, 4, 5, 6]);

    let mut buf = vec![0xEE; codec.total_len() + 2];
    codec.encode_into(&data, &mut buf, 0)?;
    assert_eq!(&buf[12..], &[1, 0, 2, 0, 3, 0, 4, 0, 0xEE, 0xEE]);

    let rec = codec.decode(&buf, 0);
    assert!(!rec.contains("unit"));
    assert_eq!(rec.get("scores"), Some(&Value::from(vec![1i16, 2, 3, 4])));
    Ok(())
}

/// Cutting the buffer anywhere never fails, and never invents a value.
pub fn every_truncated_buffer() -> Result<()> {
    let codec = PackCodec::from_json_schema(READING_SCHEMA, CodecOptions::default())?;
    let full_buf = codec.encode(&reading());
    let full = codec.decode(&full_buf, 0);

    for len in 0..=full_buf.len() {
        let rec = codec.decode(&full_buf[..len], 0);

        assert_eq!(rec.contains("id"), len >= 4, "{len}");
        assert_eq!(rec.contains("name"), len > 4, "{len}");
        if let Some(Value::Str(name)) = rec.get("name") {
            assert!("alice".starts_with(name.as_str()), "{len} {name:?}");
        }

        let scores = rec.get("scores").map(Value::elements).unwrap_or_default();
        let full_scores = full.get("scores").map(Value::elements).unwrap_or_default();
        let exp_ct = len.saturating_sub(12) / 2;
        assert_eq!(scores, &full_scores[..exp_ct], "{len}");
    }
    Ok(())
}

pub fn long_strings() -> Result<()> {
    let schema = Schema::new()
        .field(FieldDecl::string("s", 6))
        .field(FieldDecl::scalar("after", ScalarType::UInt8));
    let codec = PackCodec::new(&schema, CodecOptions::default())?;

    let buf = codec.encode(&Record::new().with("s", "overflowing").with("after", 1));
    assert_eq!(buf, b"overf\0\x01");
    assert_eq!(
        codec.decode(&buf, 0),
        Record::new().with("s", "overf").with("after", 1u8)
    );

    // An embedded terminator cuts the text short.
    let buf = codec.encode(&Record::new().with("s", "ab\0cd"));
    assert_eq!(codec.decode(&buf, 0).get("s"), Some(&Value::from("ab")));
    Ok(())
}
