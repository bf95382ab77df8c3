use super::*;

#[test]
fn file_id_round_trips_through_its_string_form() {
    let id = FileId::new(1_700_000_000_123, 7);
    assert_eq!(id.to_string(), "1700000000123-7");
    assert_eq!("1700000000123-7".parse::<FileId>().unwrap(), id);
}

#[test]
fn file_id_rejects_malformed_strings() {
    for raw in ["", "123", "abc-1", "12-", "-3", "1-2-3"] {
        assert!(raw.parse::<FileId>().is_err(), "{raw:?} should not parse");
    }
}

#[test]
fn id_generator_is_unique_under_identical_clock() {
    let mut ids = IdGenerator::new();
    let a = ids.next_id(42);
    let b = ids.next_id(42);
    assert_ne!(a, b);
    assert_eq!(a.millis(), b.millis());
    assert!(b.seq() > a.seq());
}

#[test]
fn id_generator_resumes_above_observed_ids() {
    let mut ids = IdGenerator::new();
    ids.observe(FileId::new(10, 5));
    ids.observe(FileId::new(11, 2));
    assert_eq!(ids.next_id(10), FileId::new(10, 6));
}

#[test]
fn kind_from_name_uses_trailing_extension() {
    let cases = [
        ("index.html", FileKind::Html),
        ("page.HTM", FileKind::Html),
        ("css/style.css", FileKind::Css),
        ("src/app.js", FileKind::JavaScript),
        ("lib/mod.mjs", FileKind::JavaScript),
        ("main.ts", FileKind::TypeScript),
        ("App.jsx", FileKind::Jsx),
        ("App.tsx", FileKind::Tsx),
        ("package.json", FileKind::Json),
        ("README.md", FileKind::Markdown),
        ("logo.svg", FileKind::Svg),
        ("feed.xml", FileKind::Xml),
        ("ci.yml", FileKind::Yaml),
        ("tool.py", FileKind::Python),
        ("notes.txt", FileKind::PlainText),
        ("archive.tar.gz", FileKind::PlainText),
        ("folder/.keep", FileKind::PlainText),
    ];

    for (name, expected) in cases {
        assert_eq!(FileKind::from_name(name), expected, "name={name:?}");
    }
}

#[test]
fn unknown_extension_is_not_in_the_table() {
    assert_eq!(FileKind::from_extension("png"), None);
    assert_eq!(FileKind::from_extension("txt"), Some(FileKind::PlainText));
}

#[test]
fn record_serializes_with_type_field() {
    let record = FileRecord::new(FileId::new(5, 1), "src/app.js", "let a = 1;");
    let json = serde_json::to_value(&record).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "id": "5-1",
            "name": "src/app.js",
            "content": "let a = 1;",
            "type": "javascript",
        })
    );
}

#[test]
fn unknown_stored_type_falls_back_to_plain_text() {
    let raw = r#"{"id":"1-0","name":"a.txt","content":"","type":"cobol"}"#;
    let record: FileRecord = serde_json::from_str(raw).unwrap();
    assert_eq!(record.kind, FileKind::PlainText);
}

#[test]
fn set_name_recomputes_kind() {
    let mut record = FileRecord::new(FileId::new(1, 0), "a.txt", "");
    record.set_name("a.css".to_string());
    assert_eq!(record.kind, FileKind::Css);
    assert_eq!(record.basename(), "a.css");
    assert_eq!(record.folder(), None);
}
