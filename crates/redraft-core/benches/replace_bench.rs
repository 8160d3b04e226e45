use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use redraft_core::{extract_text, replace, ReplaceSettings, ReplacementDirective, WmlDocument};

const W_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";

/// A body of `paragraphs` three-run paragraphs.
fn synthetic_document(paragraphs: usize) -> WmlDocument {
    let body: String = (0..paragraphs)
        .map(|i| {
            format!(
                r#"<w:p><w:r><w:t xml:space="preserve">Paragraph {i} </w:t></w:r><w:r><w:t xml:space="preserve">START old </w:t></w:r><w:r><w:t>text END</w:t></w:r></w:p>"#
            )
        })
        .collect();
    let xml = format!(r#"<w:document xmlns:w="{W_NS}"><w:body>{body}</w:body></w:document>"#);
    WmlDocument::from_main_xml(xml.as_bytes()).unwrap()
}

fn replace_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("replace");
    group.sample_size(20);

    for size in [50, 500] {
        let doc = synthetic_document(size);
        let flat: Vec<ReplacementDirective> = extract_text(&doc)
            .unwrap()
            .into_iter()
            .map(|mut record| {
                record.translated_text = record.text.to_uppercase();
                record.into()
            })
            .collect();
        let anchored = vec![ReplacementDirective::contextual("Unknown", "START", Some("END"), "new")];
        let settings = ReplaceSettings::default();

        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("flat", size), &doc, |b, doc| {
            b.iter(|| replace(doc, &flat, &settings).unwrap())
        });
        group.bench_with_input(BenchmarkId::new("anchored", size), &doc, |b, doc| {
            b.iter(|| replace(doc, &anchored, &settings).unwrap())
        });
        group.bench_with_input(BenchmarkId::new("extract", size), &doc, |b, doc| {
            b.iter(|| extract_text(doc).unwrap())
        });
    }

    group.finish();
}

criterion_group!(benches, replace_benchmark);
criterion_main!(benches);
