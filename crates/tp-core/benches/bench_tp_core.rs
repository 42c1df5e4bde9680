use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tp_core::tokenizer::{HeuristicTokenizer, Tokenizer};

fn generate_text(size_kb: usize) -> String {
    let base = "{\"user_id\": \"u-1832\", \"name\": \"Acme Widgets\", \"tags\": [\"hardware\", \"store\"], \"rating\": 4.3} ";
    let mut text = String::with_capacity(size_kb * 1024);
    while text.len() < size_kb * 1024 {
        text.push_str(base);
    }
    text.truncate(size_kb * 1024);
    text
}

fn bench_count_tokens(c: &mut Criterion) {
    let text_1k = generate_text(1);
    let text_100k = generate_text(100);
    c.bench_function("heuristic_count_1kb", |b| {
        b.iter(|| black_box(HeuristicTokenizer.count_tokens(black_box(&text_1k))))
    });
    c.bench_function("heuristic_count_100kb", |b| {
        b.iter(|| black_box(HeuristicTokenizer.count_tokens(black_box(&text_100k))))
    });
}

criterion_group!(benches, bench_count_tokens);
criterion_main!(benches);
