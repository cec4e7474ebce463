use criterion::{Criterion, black_box, criterion_group, criterion_main};
use hosts_dom::{AliasEntry, Document, FormatMode};

fn large_hosts_file(blocks: usize, entries: usize) -> String {
    let mut source = String::from("# generated hosts file\n\n");
    for block in 0..blocks {
        source.push_str(&format!("# [{}] group-{block} - generated block\n", block + 1));
        for entry in 0..entries {
            source.push_str(&format!(
                "10.{}.{}.{}   host-{block}-{entry}  alias-{block}-{entry}   # entry {entry}\n",
                block % 256,
                entry / 256,
                entry % 256
            ));
        }
        source.push('\n');
    }
    source
}

fn parse_benchmark(c: &mut Criterion) {
    let source = large_hosts_file(50, 40);
    c.bench_function("Document::parse (2000 entries)", |b| {
        b.iter(|| Document::parse(black_box(&source)))
    });
}

fn render_benchmark(c: &mut Criterion) {
    let source = large_hosts_file(50, 40);
    let doc = Document::parse(&source);

    c.bench_function("Document::render keep", |b| {
        b.iter(|| doc.render(black_box(FormatMode::Keep)))
    });
    c.bench_function("Document::render reformat", |b| {
        b.iter(|| doc.render(black_box(FormatMode::ReFormat)))
    });
}

fn edit_benchmark(c: &mut Criterion) {
    let source = large_hosts_file(50, 40);

    c.bench_function("add entry and render keep", |b| {
        b.iter(|| {
            let mut doc = Document::parse(&source);
            let idx = doc.find_alias_blocks(Some(25), None)[0];
            let entry = AliasEntry::with_aliases("10.99.0.1", ["bench.local"]).unwrap();
            doc.alias_block_mut(idx).unwrap().add_entry(entry);
            doc.render(FormatMode::Keep)
        })
    });
}

criterion_group!(benches, parse_benchmark, render_benchmark, edit_benchmark);
criterion_main!(benches);
