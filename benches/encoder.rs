use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rjs::prelude::*;

const N_ARR: usize = 10;
const N_MAP: usize = 10;

fn big_value() -> Value {
    let items: Vec<Value> = (0..N_ARR).map(|i| Value::from(i as i64)).collect();
    let map: VecMap<Value, Value> = (0..N_MAP)
        .map(|i| (Value::from(format!("key-{}", i)), Value::from(items.clone())))
        .collect();
    let rows: Vec<Value> = std::iter::repeat(Value::Map(map)).take(N_ARR).collect();
    Value::from(rows)
}

fn bench_encode(c: &mut Criterion) {
    let registry = Registry::with_builtins();
    let value = big_value();
    let size = encode_full(&registry, &value).unwrap().len();

    c.bench_function(&format!("encoding a {} byte composite value", size), |b| {
        b.iter(|| black_box(encode_full(&registry, &value).unwrap()))
    });
}

fn bench_decode(c: &mut Criterion) {
    let registry = Registry::with_builtins();
    let encoded = encode_full(&registry, &big_value()).unwrap();

    c.bench_function(
        &format!("decoding a {} byte composite value", encoded.len()),
        |b| b.iter(|| black_box(decode_full(&registry, encoded.clone()).unwrap())),
    );
}

criterion_group!(benches, bench_encode, bench_decode);
criterion_main!(benches);
