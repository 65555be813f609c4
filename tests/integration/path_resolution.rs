//! Integration tests for relative path resolution and storage keys

use intake::tree::path::{resolve_relative_path, storage_key};

#[test]
fn test_documented_examples() {
    assert_eq!(resolve_relative_path("a/b/c/../../d.png"), "a/d.png");
    assert_eq!(resolve_relative_path("../a/b.png"), "../a/b.png");
    assert_eq!(resolve_relative_path("a/./b.png"), "a/b.png");
    assert_eq!(
        resolve_relative_path("foo/bar/baz/../../image.jpg"),
        "foo/image.jpg"
    );
    assert_eq!(
        resolve_relative_path("../../foo/image.jpg"),
        "../../foo/image.jpg"
    );
}

#[test]
fn test_already_resolved_paths_unchanged() {
    for path in ["a/b/c.png", "file.txt", "deep/er/still/x"] {
        assert_eq!(resolve_relative_path(path), path);
    }
}

#[test]
fn test_resolution_is_idempotent() {
    for path in [
        "a/b/../c/./d",
        "../x/../y",
        "a/../../b",
        "./a/b/../../c",
        "x//y/../z",
    ] {
        let once = resolve_relative_path(path);
        assert_eq!(resolve_relative_path(&once), once, "path: {}", path);
    }
}

#[test]
fn test_collapse_everything() {
    assert_eq!(resolve_relative_path("a/b/../.."), "");
    assert_eq!(resolve_relative_path("a/.."), "");
}

#[test]
fn test_storage_key_from_dropped_path() {
    assert_eq!(
        storage_key("workspace/files", "drop/img/../cat.png"),
        "workspace/files/drop/cat.png"
    );
    assert_eq!(storage_key("bucket/", "../escape.txt"), "bucket/../escape.txt");
}
