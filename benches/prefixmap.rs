use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use fake::faker::lorem::en::Sentence;
use fake::Fake;
use zlex::lexer::operator_table;
use zlex::prefixmap::PrefixMap;
use zlex::Lexer;

fn workload_text(sentences: usize) -> String {
    let mut text = String::new();
    for i in 0..sentences {
        let sentence: String = Sentence(3..8).fake();
        text.push_str(&sentence);
        text.push_str(if i % 3 == 0 { " <<= " } else { " == " });
    }
    text
}

fn bench_update(c: &mut Criterion) {
    let words: Vec<String> = (0..256).map(|_| Sentence(1..3).fake()).collect();
    c.bench_function("prefixmap/update", |b| {
        b.iter(|| {
            let mut map = PrefixMap::new();
            for (value, word) in words.iter().enumerate() {
                map.insert(black_box(word.as_bytes()), value);
            }
            black_box(map.len())
        })
    });
}

fn bench_longest_match(c: &mut Criterion) {
    let table = operator_table();
    let text = workload_text(1_000);
    let bytes = text.as_bytes();
    let mut group = c.benchmark_group("prefixmap/longest_match");
    group.throughput(Throughput::Bytes(bytes.len() as u64));
    group.bench_function("every_offset", |b| {
        b.iter(|| {
            let mut hits = 0usize;
            for offset in 0..bytes.len() {
                if table.longest_match(&bytes[offset..]).is_some() {
                    hits += 1;
                }
            }
            black_box(hits)
        })
    });
    group.finish();
}

fn bench_scan(c: &mut Criterion) {
    let text = workload_text(1_000);
    let mut group = c.benchmark_group("lexer/scan");
    group.throughput(Throughput::Bytes(text.len() as u64));
    group.bench_function("full_source", |b| {
        b.iter(|| black_box(Lexer::new(&text).count()))
    });
    group.finish();
}

criterion_group!(benches, bench_update, bench_longest_match, bench_scan);
criterion_main!(benches);
