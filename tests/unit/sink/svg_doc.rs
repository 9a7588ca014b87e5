use super::*;

const DOC: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 100 100">
  <path d="M 0 0 L 1 1" fill="gray"/>
  <path path="" fill="red" d='M 10 20 L 30 40'/>
</svg>"#;

#[test]
fn reads_the_marked_element() {
    let sink = SvgDocumentSink::from_document(DOC, DEFAULT_MARKER_ATTRIBUTE).unwrap();
    assert_eq!(sink.read_path().unwrap(), "M 10 20 L 30 40");
}

#[test]
fn writes_splice_only_the_value() {
    let mut sink = SvgDocumentSink::from_document(DOC, "path").unwrap();
    sink.write_path(" M 11 21 L 31.5 41").unwrap();
    assert_eq!(sink.read_path().unwrap(), " M 11 21 L 31.5 41");
    sink.write_path(" M 1 2").unwrap();
    assert_eq!(sink.read_path().unwrap(), " M 1 2");

    let expected = DOC.replace("d='M 10 20 L 30 40'", "d=' M 1 2'");
    assert_eq!(sink.document(), expected);
    assert!(roxmltree::Document::parse(sink.document()).is_ok());
}

#[test]
fn lookalike_text_in_other_attributes_is_ignored() {
    let doc = r#"<svg><path path="" class=" d='X'" d="M 1 2 L 3 4"><title> d="Y"</title></path></svg>"#;
    let mut sink = SvgDocumentSink::from_document(doc, "path").unwrap();
    assert_eq!(sink.read_path().unwrap(), "M 1 2 L 3 4");

    sink.write_path(" M 5 6 L 7 8").unwrap();
    let parsed = roxmltree::Document::parse(sink.document()).unwrap();
    let node = parsed
        .descendants()
        .find(|n| n.has_attribute("path"))
        .unwrap();
    assert_eq!(node.attribute("d"), Some(" M 5 6 L 7 8"));
    assert_eq!(node.attribute("class"), Some(" d='X'"));
}

#[test]
fn custom_marker_attribute() {
    let doc = r#"<svg><path data-wobble="1" d="M 5 5"/></svg>"#;
    let sink = SvgDocumentSink::from_document(doc, "data-wobble").unwrap();
    assert_eq!(sink.read_path().unwrap(), "M 5 5");
}

#[test]
fn missing_element_is_no_sink() {
    let doc = r#"<svg><path d="M 5 5"/></svg>"#;
    let err = SvgDocumentSink::from_document(doc, "path").unwrap_err();
    assert!(matches!(err, MotionError::NoSink(_)));
}

#[test]
fn missing_d_is_no_sink() {
    let doc = r#"<svg><path path=""/></svg>"#;
    let err = SvgDocumentSink::from_document(doc, "path").unwrap_err();
    assert!(err.to_string().contains("has no 'd' attribute"));
}

#[test]
fn malformed_document_is_reported() {
    let err = SvgDocumentSink::from_document("<svg><path", "path").unwrap_err();
    assert!(matches!(err, MotionError::Other(_)));
}

#[test]
fn markup_in_path_data_is_rejected() {
    let mut sink = SvgDocumentSink::from_document(DOC, "path").unwrap();
    assert!(matches!(
        sink.write_path("M 0 0\" onload=\"x"),
        Err(MotionError::Sink(_))
    ));
    assert_eq!(sink.read_path().unwrap(), "M 10 20 L 30 40");
}

#[test]
fn mirror_receives_every_write() {
    let dir = PathBuf::from("target").join("svg_doc_mirror");
    std::fs::create_dir_all(&dir).unwrap();
    let out = dir.join("mirror.svg");
    let _ = std::fs::remove_file(&out);

    let mut sink = SvgDocumentSink::from_document(DOC, "path")
        .unwrap()
        .mirror_to(&out);
    sink.write_path(" M 9 9 L 8 8").unwrap();
    let written = std::fs::read_to_string(&out).unwrap();
    assert_eq!(written, sink.document());
    assert!(written.contains("d=' M 9 9 L 8 8'"));
}
