//! Benchmarks for the conversion pipeline.
//!
//! Run with: cargo bench

use std::hint::black_box;
use std::path::Path;

use criterion::{Criterion, criterion_group, criterion_main};

use hintdown::{ConvertOptions, SourceDocument, batch, convert_document, dom};

/// A help page with `sections` repetitions of the usual block mix.
fn sample_page(sections: usize) -> String {
    let mut html = String::from("<html><head><title>Sample</title></head><body>");
    for i in 0..sections {
        html.push_str(&format!(
            r#"<h2>Section {i}</h2>
            <p>Paragraph {i} with a <a href="page{i}.html">link</a> and some text.</p>
            <ul><li>First</li><li>Second<ol><li>Nested</li></ol></li></ul>
            <div class="note"><p>Note {i}</p><ul><li>Inside</li></ul></div>
            <div><div><span>Wrapped text {i}</span></div></div>"#
        ));
    }
    html.push_str("</body></html>");
    html
}

// ============================================================================
// Parsing
// ============================================================================

fn bench_parse(c: &mut Criterion) {
    let html = sample_page(200);

    c.bench_function("parse_html", |b| {
        b.iter(|| dom::parse_html(black_box(&html)));
    });

    c.bench_function("parse_html_bytes", |b| {
        b.iter(|| dom::parse_html_bytes(black_box(html.as_bytes())));
    });
}

// ============================================================================
// Conversion
// ============================================================================

fn bench_convert(c: &mut Criterion) {
    let dom = dom::parse_html(&sample_page(200));
    let options = ConvertOptions::default();
    let base = Path::new("/nonexistent");

    c.bench_function("convert_document", |b| {
        b.iter(|| convert_document(black_box(&dom), base, &options).unwrap());
    });
}

fn bench_batch(c: &mut Criterion) {
    let options = ConvertOptions::default();
    let mut index = String::from("<ul>");
    let mut pages = Vec::new();
    for i in 0..50 {
        index.push_str(&format!(r#"<li><a href="page{i}.html">Page {i}</a></li>"#));
        pages.push(SourceDocument::from_html(
            format!("page{i}.html"),
            &sample_page(10),
            "/nonexistent",
        ));
    }
    index.push_str("</ul>");
    pages.push(SourceDocument::from_html("index.html", &index, "/nonexistent"));

    c.bench_function("batch_50_pages", |b| {
        b.iter(|| batch::convert(black_box(&pages), &options));
    });
}

criterion_group!(benches, bench_parse, bench_convert, bench_batch);
criterion_main!(benches);
