use anyhow::Result;
use itertools::Itertools;
use packmsg_codec::{
    CodecOptions, FieldDecl, FieldKind, Int64Layout, PackCodec, Record, ScalarType, Schema, Value,
};
use rand::distributions::Alphanumeric;
use rand::rngs::ThreadRng;
use rand::seq::SliceRandom;
use rand::Rng;

type GenFn = fn(&mut ThreadRng, &str) -> (FieldDecl, Value);

fn gen_int8(rng: &mut ThreadRng, name: &str) -> (FieldDecl, Value) {
    let decl = FieldDecl::scalar(name, ScalarType::Int8);
    (decl, Value::from(rng.gen::<i8>()))
}
fn gen_uint32_array(rng: &mut ThreadRng, name: &str) -> (FieldDecl, Value) {
    let count = rng.gen_range(2..6);
    let decl = FieldDecl::scalar(name, ScalarType::UInt32).array(count);
    let elems = (0..count).map(|_| rng.gen::<u32>()).collect::<Vec<_>>();
    (decl, Value::from(elems))
}
fn gen_int64(rng: &mut ThreadRng, name: &str) -> (FieldDecl, Value) {
    let decl = FieldDecl::scalar(name, ScalarType::Int64);
    (decl, Value::from(rng.gen::<i64>()))
}
fn gen_float32(rng: &mut ThreadRng, name: &str) -> (FieldDecl, Value) {
    let decl = FieldDecl::scalar(name, ScalarType::Float32);
    // Values that a float32 holds exactly.
    (decl, Value::from(f64::from(rng.gen_range(-1e6f32..1e6))))
}
fn gen_float64(rng: &mut ThreadRng, name: &str) -> (FieldDecl, Value) {
    let decl = FieldDecl::scalar(name, ScalarType::Float64);
    (decl, Value::from(rng.gen::<f64>()))
}
fn gen_bool_array(rng: &mut ThreadRng, name: &str) -> (FieldDecl, Value) {
    let decl = FieldDecl::scalar(name, ScalarType::Bool).array(3);
    let elems = (0..3).map(|_| rng.gen::<bool>()).collect::<Vec<_>>();
    (decl, Value::from(elems))
}
fn gen_string(rng: &mut ThreadRng, name: &str) -> (FieldDecl, Value) {
    let capacity = rng.gen_range(1..12);
    let decl = FieldDecl::string(name, capacity);
    let len = rng.gen_range(0..capacity);
    let text = (0..len)
        .map(|_| char::from(rng.sample(Alphanumeric)))
        .collect::<String>();
    (decl, Value::from(text))
}
fn gen_struct(rng: &mut ThreadRng, name: &str) -> (FieldDecl, Value) {
    let (x_decl, x) = gen_int64(rng, "x");
    let (s_decl, s) = gen_string(rng, "s");
    let decl = FieldDecl::structure(name, vec![x_decl, s_decl]).array(2);
    let elems = (0..2)
        .map(|_| Record::new().with("x", x.clone()).with("s", s.clone()))
        .collect::<Vec<_>>();
    (decl, Value::from(elems))
}

/// Every combination of field kinds, in random order, survives an encode then decode.
pub fn random_schemas() -> Result<()> {
    let mut rng = rand::thread_rng();

    let gen_fns: [GenFn; 8] = [
        gen_int8,
        gen_uint32_array,
        gen_int64,
        gen_float32,
        gen_float64,
        gen_bool_array,
        gen_string,
        gen_struct,
    ];

    for mut gen_fns in gen_fns.iter().powerset() {
        gen_fns.shuffle(&mut rng);

        let (decls, vals): (Vec<_>, Vec<_>) = gen_fns
            .iter()
            .enumerate()
            .map(|(i, gen)| gen(&mut rng, &format!("f{i}")))
            .unzip();
        let exp_len = decls
            .iter()
            .map(|decl| decl_len(decl) * decl.array_count)
            .sum::<usize>();
        let data = decls
            .iter()
            .map(|decl| decl.name.clone())
            .zip(vals)
            .collect::<Record>();
        let schema = decls.into_iter().collect::<Schema>();

        let little_endian = rng.gen::<bool>();
        let int64_layout = *[Int64Layout::Canonical, Int64Layout::LowWordFirst]
            .choose(&mut rng)
            .unwrap_or(&Int64Layout::Canonical);
        let opts = CodecOptions::default()
            .little_endian(little_endian)
            .int64_layout(int64_layout);
        let codec = PackCodec::new(&schema, opts)?;
        assert_eq!(codec.total_len(), exp_len);

        let offset = rng.gen_range(0..4);
        let mut buf = vec![0u8; offset + codec.total_len()];
        codec.encode_into(&data, &mut buf, offset)?;
        assert_eq!(buf[offset..], codec.encode(&data)[..]);

        let decoded = codec.decode(&buf, offset);
        assert_eq!(decoded, data, "\n{schema:?}\n{buf:?}\n");
    }

    Ok(())
}

fn decl_len(decl: &FieldDecl) -> usize {
    match &decl.kind {
        FieldKind::Scalar(scalar) => scalar.width(),
        FieldKind::FixedString { capacity, .. } => *capacity,
        FieldKind::Struct(nested) => nested
            .iter()
            .map(|decl| decl_len(decl) * decl.array_count)
            .sum(),
    }
}
