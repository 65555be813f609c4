//! Integration tests for collision-avoiding name resolution

use super::test_utils::DropFixture;
use intake::naming::{resolve_batch, resolve_name, NameCandidate, SuffixResolver};
use intake::tree::{scan, TypeFilter};

#[test]
fn test_documented_examples() {
    let none: Vec<String> = Vec::new();
    assert_eq!(resolve_name("photo.jpg", &none), "photo.jpg");
    assert_eq!(resolve_name("photo.jpg", &["photo.jpg"]), "photo-1.jpg");
    assert_eq!(
        resolve_name("photo.jpg", &["photo.jpg", "photo-1.jpg"]),
        "photo-2.jpg"
    );
    assert_eq!(resolve_name("notes", &["notes", "notes-3"]), "notes-4");
}

#[test]
fn test_order_of_existing_names_does_not_matter() {
    let a = resolve_name("report.pdf", &["report-2.pdf", "report.pdf", "report-1.pdf"]);
    let b = resolve_name("report.pdf", &["report-1.pdf", "report-2.pdf", "report.pdf"]);
    assert_eq!(a, "report-3.pdf");
    assert_eq!(a, b);
}

#[test]
fn test_gap_in_suffixes_uses_highest_sorted() {
    // photo-1 is free, but the highest-sorted duplicate decides.
    assert_eq!(
        resolve_name("photo.jpg", &["photo.jpg", "photo-2.jpg"]),
        "photo-3.jpg"
    );
}

#[test]
fn test_other_extensions_and_slugs_ignored() {
    let existing = ["photo.png", "photo-7.png", "photograph.jpg", "my-photo.jpg"];
    assert_eq!(resolve_name("photo.jpg", &existing), "photo.jpg");
}

#[test]
fn test_malformed_names_degrade_to_opaque_slug() {
    let c = NameCandidate::parse("weird name.tar-gz");
    assert_eq!(c.slug, "weird name.tar-gz");
    assert!(c.extension.is_none());
    assert_eq!(
        resolve_name("weird name.tar-gz", &["weird name.tar-gz"]),
        "weird name.tar-gz-1"
    );
}

#[test]
fn test_unicode_names() {
    assert_eq!(resolve_name("café.txt", &["café.txt"]), "café-1.txt");
    assert_eq!(resolve_name("写真.png", &["写真.png", "写真-1.png"]), "写真-2.png");
}

/// Names of a scanned drop resolved against a destination, one after another
#[tokio::test]
async fn test_scan_then_resolve_batch() {
    let fixture = DropFixture::new();
    fixture
        .write("a/photo.jpg", b"1")
        .write("b/photo.jpg", b"2")
        .write("c/notes.txt", b"3");

    let files = scan(vec![fixture.root_entry().await], &TypeFilter::accept_all()).await;
    let names: Vec<&str> = files.iter().map(|f| f.name()).collect();
    assert_eq!(names, vec!["notes.txt", "photo.jpg", "photo.jpg"]);

    let destination = vec!["photo.jpg".to_string(), "notes-1.txt".to_string()];
    let resolved = resolve_batch(&SuffixResolver, names, &destination);
    assert_eq!(resolved, vec!["notes-2.txt", "photo-1.jpg", "photo-2.jpg"]);
}
