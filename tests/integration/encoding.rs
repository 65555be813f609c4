//! Integration tests for reading scanned files as text, data URLs and base64

use super::test_utils::DropFixture;
use intake::codec::{
    format_size, read_as_base64, read_as_data_url, read_as_text, PlainSizeFormatter,
};
use intake::tree::{scan, TypeFilter};

#[tokio::test]
async fn test_scanned_file_conversions() {
    let fixture = DropFixture::new();
    fixture
        .write("notes/windows.txt", b"line one\r\nline two\r\n")
        .write("data/blob.bin", &[0u8, 1, 2, 250]);

    let files = scan(vec![fixture.root_entry().await], &TypeFilter::accept_all()).await;
    assert_eq!(files.len(), 2);

    let bin = &files[0];
    assert_eq!(bin.name(), "blob.bin");
    assert_eq!(bin.mime_type(), "");
    assert_eq!(
        read_as_data_url(bin.blob().as_ref()).await.unwrap(),
        "data:application/octet-stream;base64,AAEC+g=="
    );
    assert_eq!(read_as_base64(bin.blob().as_ref()).await.unwrap(), "AAEC+g==");

    let text = &files[1];
    assert_eq!(
        read_as_text(text.blob().as_ref()).await.unwrap(),
        "line one\nline two\n"
    );
}

#[tokio::test]
async fn test_deleted_file_read_is_an_error() {
    let fixture = DropFixture::new();
    fixture.write("gone.txt", b"soon gone");

    let files = scan(vec![fixture.root_entry().await], &TypeFilter::accept_all()).await;
    std::fs::remove_file(fixture.path("gone.txt")).unwrap();

    assert!(read_as_text(files[0].blob().as_ref()).await.is_err());
}

#[test]
fn test_human_sizes() {
    assert_eq!(format_size(512, &PlainSizeFormatter), "512 B");
    assert_eq!(format_size(10 * 1024, &PlainSizeFormatter), "10.0 KB");
    assert_eq!(
        format_size(5 * 1024 * 1024 * 1024 / 2, &PlainSizeFormatter),
        "2.5 GB"
    );
}
