//! Benchmarks for package assembly.
//!
//! Run with: cargo bench

use std::io::Cursor;

use criterion::{Criterion, criterion_group, criterion_main};

use quire::{ConversionResult, DocumentMetadata, EpubConfig, OutlineEntry, OutputFile};

/// A synthetic book with many chapters and a three-level outline.
fn synthetic_result(chapters: usize) -> ConversionResult {
    let mut result = ConversionResult::new();
    result.metadata = DocumentMetadata::new("Benchmark Book", "en")
        .with_user_defined("identifier1", "urn:isbn:9780000000001")
        .with_user_defined("creator1", "Jane Doe");

    let body = "<html><body>".to_string() + &"<p>lorem ipsum dolor</p>".repeat(200) + "</body></html>";
    for i in 0..chapters {
        let file = result.add_file(OutputFile::master(
            format!("chapter{i}.xhtml"),
            body.clone().into_bytes(),
        ));
        result
            .outline
            .push(OutlineEntry::new(format!("Chapter {i}"), 1, file));
        for j in 0..4 {
            result.outline.push(
                OutlineEntry::new(format!("Section {i}.{j}"), 2, file)
                    .with_anchor(format!("s{j}")),
            );
        }
    }
    result.add_file(OutputFile::new(
        "style.css",
        "text/css",
        b"body { margin: 0 }".to_vec(),
    ));
    result
}

fn bench_render_documents(c: &mut Criterion) {
    let result = synthetic_result(100);
    c.bench_function("render_documents", |b| {
        b.iter(|| quire::render_documents(&result, &EpubConfig::epub3()));
    });
}

fn bench_write_epub(c: &mut Criterion) {
    let result = synthetic_result(100);
    c.bench_function("write_epub_100_chapters", |b| {
        b.iter(|| {
            let mut buffer = Cursor::new(Vec::new());
            quire::write_epub_to_writer(&result, &EpubConfig::epub3(), &mut buffer).unwrap();
            buffer
        });
    });
}

criterion_group!(benches, bench_render_documents, bench_write_epub);
criterion_main!(benches);
