//! Benchmarks for outline extraction.
//!
//! Run with: cargo bench
//!
//! Documents are built in memory so the numbers cover the outline pipeline
//! only, plus one end-to-end run through the PDF reader.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use pdf_outline::model::{Document, Page, TextRun};
use pdf_outline::outline::{extract_candidates, infer_levels_with, ClusterStrategy};
use pdf_outline::{extract_outline, OutlineOptions};

/// A document with `page_count` pages of mixed heading and body sizes.
fn create_test_document(page_count: u32) -> Document {
    let sizes = [28.0, 20.0, 16.0, 14.0, 12.0, 11.0, 10.0, 9.0];
    let mut doc = Document::new();
    for number in 1..=page_count {
        let mut page = Page::letter(number);
        for (i, size) in sizes.iter().cycle().take(40).enumerate() {
            page.push_run(TextRun::new(
                format!("Run {} on page {}", i, number),
                "Helvetica",
                *size,
                number,
                72.0,
                40.0 + i as f32 * 18.0,
            ));
        }
        doc.add_page(page);
    }
    doc
}

/// Creates a minimal synthetic PDF with the given number of pages.
fn create_test_pdf(page_count: usize) -> Vec<u8> {
    let mut objects = vec![
        "<< /Type /Catalog /Pages 2 0 R >>".to_string(),
        format!(
            "<< /Type /Pages /Kids [{}] /Count {} >>",
            (0..page_count)
                .map(|i| format!("{} 0 R", i * 2 + 3))
                .collect::<Vec<_>>()
                .join(" "),
            page_count
        ),
    ];
    for i in 0..page_count {
        objects.push(format!(
            "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 612 792] /Contents {} 0 R >>",
            i * 2 + 4
        ));
        let text = format!(
            "BT /F1 24 Tf 72 700 Td (Chapter {}) Tj ET\nBT /F1 16 Tf 72 650 Td (Section {}.1) Tj ET\nBT /F1 11 Tf 72 620 Td (Body text for page {}) Tj ET",
            i + 1,
            i + 1,
            i + 1
        );
        objects.push(format!(
            "<< /Length {} >>\nstream\n{}\nendstream",
            text.len(),
            text
        ));
    }

    let mut content = b"%PDF-1.4\n".to_vec();
    let mut offsets = Vec::new();
    for (i, body) in objects.iter().enumerate() {
        offsets.push(content.len());
        content.extend_from_slice(format!("{} 0 obj\n{}\nendobj\n", i + 1, body).as_bytes());
    }
    let xref_offset = content.len();
    content.extend_from_slice(format!("xref\n0 {}\n0000000000 65535 f \n", objects.len() + 1).as_bytes());
    for offset in offsets {
        content.extend_from_slice(format!("{:010} 00000 n \n", offset).as_bytes());
    }
    content.extend_from_slice(
        format!(
            "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{}\n%%EOF\n",
            objects.len() + 1,
            xref_offset
        )
        .as_bytes(),
    );
    content
}

/// Benchmark level inference for both clustering strategies.
fn bench_level_inference(c: &mut Criterion) {
    let doc = create_test_document(20);
    let candidates = extract_candidates(&doc).unwrap();
    let mut group = c.benchmark_group("level_inference");

    let kmeans = OutlineOptions::new();
    group.bench_function("kmeans", |b| {
        b.iter(|| infer_levels_with(black_box(&candidates), &kmeans));
    });

    let exhaustive = OutlineOptions::new().with_strategy(ClusterStrategy::Exhaustive);
    group.bench_function("exhaustive", |b| {
        b.iter(|| infer_levels_with(black_box(&candidates), &exhaustive));
    });

    group.finish();
}

/// Benchmark the outline pipeline at various document sizes.
fn bench_outline_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("outline_pipeline");

    for page_count in [1, 10, 100] {
        let doc = create_test_document(page_count);
        group.bench_function(format!("{}_pages", page_count), |b| {
            b.iter(|| extract_outline(black_box(&doc)).unwrap());
        });
    }

    group.finish();
}

/// Benchmark reading and extracting from PDF bytes.
fn bench_end_to_end(c: &mut Criterion) {
    let data = create_test_pdf(10);
    c.bench_function("end_to_end_10_pages", |b| {
        b.iter(|| pdf_outline::extract_outline_from_bytes(black_box(&data)).unwrap());
    });
}

criterion_group!(
    benches,
    bench_level_inference,
    bench_outline_pipeline,
    bench_end_to_end,
);
criterion_main!(benches);
