use criterion::{black_box, criterion_group, criterion_main, Criterion};
use serde_json::{json, Value};
use tp_compactor::{compact, dumps, parameterize, SchemaOptions};
use tp_core::config::Format;
use tp_core::tokenizer::HeuristicTokenizer;

fn generate_schema(fields: usize) -> Value {
    let mut properties = serde_json::Map::new();
    let mut required = Vec::new();
    for i in 0..fields {
        let key = format!("field_number_{i}");
        properties.insert(
            key.clone(),
            json!({"type": "string", "description": "a field under benchmark"}),
        );
        if i % 2 == 0 {
            required.push(Value::from(key));
        }
    }
    json!({
        "title": "Benchmark",
        "type": "object",
        "properties": properties,
        "required": required,
        "definitions": {
            "Status": {"title": "Status", "enum": ["active", "inactive", "pending"]},
        },
    })
}

fn generate_items(count: usize) -> Vec<Value> {
    (0..count)
        .map(|i| {
            json!({
                "id": format!("0ahUKEa{i}ZQ"),
                "parent_id": i as i64,
                "name": format!("Record {i}"),
                "tags": ["hardware", "store"],
            })
        })
        .collect()
}

fn bench_compact(c: &mut Criterion) {
    let small = generate_schema(10);
    let large = generate_schema(200);
    let options = SchemaOptions::default();
    c.bench_function("compact_10_fields", |b| {
        b.iter(|| black_box(compact(black_box(&small), &options).unwrap()))
    });
    c.bench_function("compact_200_fields", |b| {
        b.iter(|| black_box(compact(black_box(&large), &options).unwrap()))
    });
}

fn bench_dumps_shortest(c: &mut Criterion) {
    let value = json!({
        "items": generate_items(50),
        "meta": {"page": 1, "total": 50},
    });
    c.bench_function("dumps_shortest_50_items", |b| {
        b.iter(|| {
            black_box(dumps(black_box(&value), Format::Shortest, Some(&HeuristicTokenizer)).unwrap())
        })
    });
}

fn bench_parameterize(c: &mut Criterion) {
    let items = generate_items(100);
    let prompt = "summarize 0ahUKEa7ZQ and 0ahUKEa42ZQ against the rest";
    c.bench_function("parameterize_100_items", |b| {
        b.iter(|| black_box(parameterize(black_box(prompt), black_box(&items))))
    });
}

criterion_group!(benches, bench_compact, bench_dumps_shortest, bench_parameterize);
criterion_main!(benches);
