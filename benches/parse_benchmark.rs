//! Benchmarks for pdfprobe parsing and summary performance.
//!
//! Run with: cargo bench
//!
//! These benchmarks use synthetic documents built in memory.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};

use pdfprobe::{ContentItem, Page, ParseResult, Summary};

/// Creates a PDF with the given number of pages, each holding a heading
/// and a few body lines.
fn create_test_pdf(page_count: usize) -> Vec<u8> {
    let mut doc = Document::with_version("1.4");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! { "F1" => font_id },
    });

    let mut kids = Vec::new();
    for i in 0..page_count {
        let mut operations = Vec::new();
        let mut line = |y: i64, size: i64, text: String| {
            operations.push(Operation::new("BT", vec![]));
            operations.push(Operation::new(
                "Tf",
                vec![Object::Name(b"F1".to_vec()), Object::Integer(size)],
            ));
            operations.push(Operation::new(
                "Td",
                vec![Object::Integer(72), Object::Integer(y)],
            ));
            operations.push(Operation::new("Tj", vec![Object::string_literal(text)]));
            operations.push(Operation::new("ET", vec![]));
        };

        line(740, 20, format!("Section {}", i + 1));
        for n in 0..20 {
            line(
                700 - n * 14,
                11,
                format!("Benchmark body line {} for pdfprobe layout analysis.", n),
            );
        }

        let data = Content { operations }.encode().unwrap_or_default();
        let content_id = doc.add_object(Stream::new(dictionary! {}, data));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
            "Resources" => resources_id,
        });
        kids.push(Object::Reference(page_id));
    }

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => Object::Integer(count),
            "MediaBox" => vec![
                Object::Integer(0),
                Object::Integer(0),
                Object::Integer(612),
                Object::Integer(792),
            ],
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut buf = Vec::new();
    doc.save_to(&mut buf).unwrap_or_default();
    buf
}

/// Creates a parse result with many typed items per page.
fn create_test_result(page_count: u32) -> ParseResult {
    let kinds = ["text", "heading", "text", "image", "list_item", "table"];
    let mut result = ParseResult::new();
    for n in 1..=page_count {
        let mut page = Page::new(n);
        for i in 0..60 {
            page.push(ContentItem::new(kinds[i % kinds.len()]));
        }
        result.add_page(page);
    }
    result
}

/// Benchmark PDF format detection.
fn bench_format_detection(c: &mut Criterion) {
    let pdf_data = create_test_pdf(1);
    let non_pdf_data = b"<!DOCTYPE html><html><body>Not a PDF</body></html>";

    c.bench_function("detect_valid_pdf", |b| {
        b.iter(|| pdfprobe::detect_format_from_bytes(black_box(&pdf_data)).is_ok());
    });

    c.bench_function("detect_non_pdf", |b| {
        b.iter(|| pdfprobe::detect_format_from_bytes(black_box(non_pdf_data)).is_err());
    });
}

/// Benchmark PDF parsing at various sizes.
fn bench_pdf_parsing(c: &mut Criterion) {
    let mut group = c.benchmark_group("pdf_parsing");

    for page_count in [1, 5, 10].iter() {
        let data = create_test_pdf(*page_count);
        let parser = pdfprobe::PdfParser::with_options(pdfprobe::ParseOptions::new().lenient());

        group.bench_function(format!("{}_pages", page_count), |b| {
            b.iter(|| {
                let _ = parser.parse_bytes(black_box(&data), "bench.pdf");
            });
        });
    }

    group.finish();
}

/// Benchmark summary derivation and rendering.
fn bench_summary(c: &mut Criterion) {
    let result = create_test_result(200);

    c.bench_function("summary_200_pages", |b| {
        b.iter(|| {
            Summary::from_result(black_box(&result))
                .map(|s| s.to_string())
                .unwrap_or_default()
        });
    });
}

criterion_group!(
    benches,
    bench_format_detection,
    bench_pdf_parsing,
    bench_summary,
);
criterion_main!(benches);
