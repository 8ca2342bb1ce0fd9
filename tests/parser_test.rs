//! Integration tests for the built-in PDF parser, using documents built
//! in memory with lopdf.

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, ObjectId, Stream};

use pdfprobe::parser::TableDetectorConfig;
use pdfprobe::{
    DocumentParser, Error, ErrorMode, ParseOptions, ParseResult, PdfParser, Summary,
};

/// Page description for [`build_pdf`].
enum PageSpec {
    Ops(Vec<Operation>),
    /// Contents points at a non-stream object
    Broken,
}

fn text_at(ops: &mut Vec<Operation>, x: i64, y: i64, size: i64, text: &str) {
    ops.push(Operation::new("BT", vec![]));
    ops.push(Operation::new(
        "Tf",
        vec![Object::Name(b"F1".to_vec()), Object::Integer(size)],
    ));
    ops.push(Operation::new(
        "Tm",
        vec![
            Object::Integer(1),
            Object::Integer(0),
            Object::Integer(0),
            Object::Integer(1),
            Object::Integer(x),
            Object::Integer(y),
        ],
    ));
    ops.push(Operation::new("Tj", vec![Object::string_literal(text)]));
    ops.push(Operation::new("ET", vec![]));
}

fn image_at(ops: &mut Vec<Operation>, x: i64, y: i64, w: i64, h: i64) {
    ops.push(Operation::new("q", vec![]));
    ops.push(Operation::new(
        "cm",
        vec![
            Object::Integer(w),
            Object::Integer(0),
            Object::Integer(0),
            Object::Integer(h),
            Object::Integer(x),
            Object::Integer(y),
        ],
    ));
    ops.push(Operation::new("Do", vec![Object::Name(b"Im1".to_vec())]));
    ops.push(Operation::new("Q", vec![]));
}

fn build_pdf(pages: Vec<PageSpec>) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id: ObjectId = doc.new_object_id();

    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });
    let image_id = doc.add_object(Stream::new(
        dictionary! {
            "Type" => "XObject",
            "Subtype" => "Image",
            "Width" => Object::Integer(4),
            "Height" => Object::Integer(2),
            "ColorSpace" => "DeviceGray",
            "BitsPerComponent" => Object::Integer(8),
        },
        vec![0u8; 8],
    ));
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! { "F1" => font_id },
        "XObject" => dictionary! { "Im1" => image_id },
    });

    let mut kids = Vec::new();
    for spec in pages {
        let content_id = match spec {
            PageSpec::Ops(operations) => {
                let data = Content { operations }.encode().unwrap();
                doc.add_object(Stream::new(dictionary! {}, data))
            }
            PageSpec::Broken => doc.add_object(Object::Integer(42)),
        };
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
    let info_id = doc.add_object(dictionary! {
        "Title" => Object::string_literal("Quarterly Report"),
        "CreationDate" => Object::string_literal("D:20250917072739Z"),
    });
    doc.trailer.set("Root", catalog_id);
    doc.trailer.set("Info", info_id);

    let mut buf = Vec::new();
    doc.save_to(&mut buf).unwrap();
    buf
}

/// A report page with a heading, a paragraph, a table, an image and a list item.
fn report_page() -> PageSpec {
    let mut ops = Vec::new();
    text_at(&mut ops, 72, 720, 24, "Quarterly Report");
    text_at(&mut ops, 72, 680, 12, "Revenue grew in every region this quarter.");
    text_at(&mut ops, 72, 666, 12, "Costs were flat.");

    for (y, row) in [
        (620, ["Region", "Q1", "Q2"]),
        (606, ["North", "10", "12"]),
        (592, ["South", "8", "9"]),
    ] {
        for (x, cell) in [72, 200, 300].into_iter().zip(row) {
            text_at(&mut ops, x, y, 12, cell);
        }
    }

    image_at(&mut ops, 72, 450, 100, 50);
    text_at(&mut ops, 72, 420, 12, "- First point");
    PageSpec::Ops(ops)
}

fn plain_page(text: &str) -> PageSpec {
    let mut ops = Vec::new();
    text_at(&mut ops, 72, 700, 12, text);
    PageSpec::Ops(ops)
}

fn types(result: &ParseResult, page: usize) -> Vec<String> {
    result.pages()[page]
        .items()
        .iter()
        .map(|item| item.type_name().to_string())
        .collect()
}

#[test]
fn test_report_page_structure() {
    let data = build_pdf(vec![report_page()]);
    let result = PdfParser::new().parse_bytes(&data, "report.pdf").unwrap();

    assert_eq!(result.source.as_deref(), Some("report.pdf"));
    assert_eq!(result.page_count(), 1);
    assert_eq!(
        types(&result, 0),
        vec!["heading", "text", "table", "image", "list_item"]
    );

    let page = &result.pages()[0];
    assert_eq!(page.page_number, 1);
    assert_eq!(page.width, Some(612.0));
    assert_eq!(page.height, Some(792.0));

    let items = page.items();
    assert_eq!(items[0].text_content(), Some("Quarterly Report"));
    assert_eq!(items[0].extra["level"], serde_json::json!(1));
    assert_eq!(
        items[1].text_content(),
        Some("Revenue grew in every region this quarter. Costs were flat.")
    );
    assert_eq!(
        items[2].extra["rows"],
        serde_json::json!([["Region", "Q1", "Q2"], ["North", "10", "12"], ["South", "8", "9"]])
    );
    assert_eq!(items[3].extra["name"], serde_json::json!("Im1"));
    assert_eq!(items[3].extra["width"], serde_json::json!(4));
    assert_eq!(items[3].extra["height"], serde_json::json!(2));
    assert_eq!(
        items[3].extra["bbox"],
        serde_json::json!([72.0, 450.0, 172.0, 500.0])
    );
    assert_eq!(items[4].text_content(), Some("- First point"));
}

#[test]
fn test_report_summary_lines() {
    let data = build_pdf(vec![report_page(), plain_page("Appendix")]);
    let result = PdfParser::new().parse_bytes(&data, "report.pdf").unwrap();

    let summary = Summary::from_result(&result).unwrap();
    assert_eq!(
        summary.to_string(),
        "Summary:\n\
         Pages processed: 2\n  \
         Page 1: 5 content items\n    \
         Types: 1 heading, 1 text, 1 table, 1 image, 1 list_item\n  \
         Page 2: 1 content items\n    \
         Types: 1 text\n"
    );
}

#[test]
fn test_metadata() {
    let data = build_pdf(vec![plain_page("One"), plain_page("Two")]);
    let result = PdfParser::new().parse_bytes(&data, "doc.pdf").unwrap();

    let metadata = result.metadata.unwrap();
    assert_eq!(metadata.pdf_version, "1.5");
    assert_eq!(metadata.page_count, 2);
    assert!(!metadata.encrypted);
    assert_eq!(metadata.title.as_deref(), Some("Quarterly Report"));
    assert_eq!(
        metadata.created.map(|d| d.to_rfc3339()),
        Some("2025-09-17T07:27:39+00:00".to_string())
    );
}

#[test]
fn test_options_disable_images_and_tables() {
    let data = build_pdf(vec![report_page()]);
    let options = ParseOptions::new().with_images(false).with_tables(false);
    let result = PdfParser::with_options(options)
        .parse_bytes(&data, "report.pdf")
        .unwrap();

    let found = types(&result, 0);
    assert!(!found.iter().any(|t| t == "image"));
    assert!(!found.iter().any(|t| t == "table"));
    assert_eq!(found.first().map(String::as_str), Some("heading"));
}

#[test]
fn test_table_config_thresholds() {
    let data = build_pdf(vec![report_page()]);
    let config = TableDetectorConfig {
        min_rows: 4,
        ..Default::default()
    };
    let options = ParseOptions::new().with_table_config(config);
    let result = PdfParser::with_options(options)
        .parse_bytes(&data, "report.pdf")
        .unwrap();

    let found = types(&result, 0);
    assert!(!found.iter().any(|t| t == "table"));
    assert_eq!(found.first().map(String::as_str), Some("heading"));
    assert!(found.iter().any(|t| t == "image"));
}

#[test]
fn test_max_pages() {
    let data = build_pdf(vec![plain_page("A"), plain_page("B"), plain_page("C")]);
    let options = ParseOptions::new().with_max_pages(2);
    let result = PdfParser::with_options(options)
        .parse_bytes(&data, "doc.pdf")
        .unwrap();

    assert_eq!(result.page_count(), 2);
    assert_eq!(result.metadata.as_ref().unwrap().page_count, 3);
    assert_eq!(result.pages()[1].plain_text(), "B");
}

#[test]
fn test_broken_page_strict_fails() {
    let data = build_pdf(vec![plain_page("Fine"), PageSpec::Broken]);
    let err = PdfParser::new().parse_bytes(&data, "doc.pdf").unwrap_err();
    assert!(matches!(err, Error::PdfParse(_)));
    assert_eq!(err.exit_code(), 3);
}

#[test]
fn test_broken_page_lenient_keeps_empty_page() {
    let data = build_pdf(vec![plain_page("Fine"), PageSpec::Broken]);
    let options = ParseOptions::new().with_error_mode(ErrorMode::Lenient);
    let result = PdfParser::with_options(options)
        .parse_bytes(&data, "doc.pdf")
        .unwrap();

    assert_eq!(result.page_count(), 2);
    let broken = &result.pages()[1];
    assert_eq!(broken.page_number, 2);
    assert_eq!(broken.content, Some(Vec::new()));
    assert_eq!(broken.width, Some(612.0));

    let summary = Summary::from_result(&result).unwrap();
    assert!(summary.to_string().ends_with("  Page 2: 0 content items\n"));
}

#[test]
fn test_leading_junk_before_header() {
    let mut data = b"HTTP junk\r\n".to_vec();
    data.extend(build_pdf(vec![plain_page("Hello")]));

    let result = PdfParser::new().parse_bytes(&data, "junk.pdf").unwrap();
    assert_eq!(result.pages()[0].plain_text(), "Hello");
}

#[test]
fn test_parse_local_file_through_contract() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("hello.pdf");
    std::fs::write(&path, build_pdf(vec![plain_page("Hello")])).unwrap();

    let parser: Box<dyn DocumentParser> = Box::new(PdfParser::new());
    let source = path.to_string_lossy().to_string();
    let result = parser.parse(&source).unwrap();

    assert_eq!(result.source.as_deref(), Some(source.as_str()));
    assert_eq!(types(&result, 0), vec!["text"]);
}

#[test]
fn test_non_pdf_file_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("error.html");
    std::fs::write(&path, "<html><body>Not found</body></html>").unwrap();

    let err = PdfParser::new().parse(&path.to_string_lossy()).unwrap_err();
    assert!(matches!(err, Error::UnknownFormat));
}

#[test]
fn test_missing_file_is_acquisition_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.pdf");

    let err = PdfParser::new().parse(&path.to_string_lossy()).unwrap_err();
    assert_eq!(err.exit_code(), 2);
}
