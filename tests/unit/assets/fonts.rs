use super::*;

#[test]
fn resolve_prefers_requested_then_default() {
    let mut book = FontBook::new();
    book.insert_bytes("a.ttf", vec![1]);
    book.insert_bytes("b.ttf", vec![2]);
    book.set_default("a.ttf").unwrap();

    let (k, _) = book.resolve(Some(Path::new("b.ttf"))).unwrap();
    assert_eq!(k, Path::new("b.ttf"));
    let (k, _) = book.resolve(None).unwrap();
    assert_eq!(k, Path::new("a.ttf"));
    let (k, _) = book.resolve(Some(Path::new("missing.ttf"))).unwrap();
    assert_eq!(k, Path::new("a.ttf"));
}

#[test]
fn resolve_without_default_is_none() {
    let mut book = FontBook::new();
    book.insert_bytes("a.ttf", vec![1]);
    assert!(book.resolve(None).is_none());
    assert!(book.resolve(Some(Path::new("a.ttf"))).is_some());
}

#[test]
fn set_default_requires_loaded_font() {
    let mut book = FontBook::new();
    assert!(book.set_default("nope.ttf").is_err());
}

#[test]
fn load_missing_file_errors() {
    let mut book = FontBook::new();
    let err = book.load("/definitely/not/here.ttf").unwrap_err();
    assert!(err.to_string().contains("read font"));
}

#[test]
fn font_measure_without_fonts_is_validation_error() {
    let book = FontBook::new();
    let mut m = FontMeasure::new(&book);
    assert_eq!(m.text_width("", 20.0, None).unwrap(), 0.0);
    assert!(matches!(
        m.text_width("abc", 20.0, None),
        Err(FrameloomError::Validation(_))
    ));
}
