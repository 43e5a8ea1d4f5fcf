use anyhow::Result;
use packmsg_codec::{CodecOptions, FieldDecl, PackCodec, Record, Schema, Value};

pub fn codec_wide_and_per_field() -> Result<()> {
    let schema = Schema::new()
        .field(FieldDecl::string("plain", 5))
        .field(FieldDecl::string("wide", 5).with_charset("UTF-8"))
        .field(FieldDecl::string("narrow", 5).with_charset("ascii"));
    let data = Record::new()
        .with("plain", "ñu")
        .with("wide", "ñu")
        .with("narrow", "ñu");

    let codec = PackCodec::new(&schema, CodecOptions::default().charset("iso-8859-1"))?;
    let buf = codec.encode(&data);
    assert_eq!(&buf[0..5], &[0xF1, b'u', 0, 0, 0]);
    assert_eq!(&buf[5..10], &[0xC3, 0xB1, b'u', 0, 0]);
    assert_eq!(&buf[10..15], &[b'?', b'u', 0, 0, 0]);

    let exp = Record::new()
        .with("plain", "ñu")
        .with("wide", "ñu")
        .with("narrow", "?u");
    assert_eq!(codec.decode(&buf, 0), exp);

    // Without a codec-wide charset, unmarked fields are UTF-8.
    let codec = PackCodec::new(&schema, CodecOptions::default())?;
    assert_eq!(&codec.encode(&data)[0..5], &[0xC3, 0xB1, b'u', 0, 0]);
    Ok(())
}

/// Truncation counts bytes, not characters.
pub fn truncation_may_split_a_character() -> Result<()> {
    let schema = Schema::new().field(FieldDecl::string("s", 4));
    let codec = PackCodec::new(&schema, CodecOptions::default())?;

    let buf = codec.encode(&Record::new().with("s", "ééé"));
    assert_eq!(buf, vec![0xC3, 0xA9, 0xC3, 0]);
    assert_eq!(
        codec.decode(&buf, 0).get("s"),
        Some(&Value::from("é\u{FFFD}"))
    );

    let codec = PackCodec::new(&schema, CodecOptions::default().charset("latin1"))?;
    let buf = codec.encode(&Record::new().with("s", "ééé"));
    assert_eq!(buf, vec![0xE9, 0xE9, 0xE9, 0]);
    assert_eq!(codec.decode(&buf, 0).get("s"), Some(&Value::from("ééé")));
    Ok(())
}
