//! Integration tests for scanning dropped files and folders on disk

use super::test_utils::{entry_for, paths, DropFixture};
use intake::tree::local::local_entry;
use intake::tree::{scan, ScanOptions, Scanner, TypeFilter};

/// A dropped folder with a git dir, a readme and an image keeps only the image
#[tokio::test]
async fn test_image_filter_on_dropped_folder() {
    let fixture = DropFixture::new();
    fixture
        .write(".git/config", b"[core]")
        .write("README.md", b"# readme")
        .write("img/cat.png", b"\x89PNG");

    let filter = TypeFilter::parse("image/*");
    let files = scan(vec![fixture.root_entry().await], &filter).await;

    assert_eq!(paths(&files), vec!["drop/img/cat.png"]);
    assert_eq!(files[0].name(), "cat.png");
    assert_eq!(files[0].mime_type(), "image/png");
    assert_eq!(files[0].size(), 4);
    assert_eq!(files[0].bytes().await.unwrap(), b"\x89PNG");
}

/// Files and folders dropped together are merged into one name-sorted list
#[tokio::test]
async fn test_mixed_roots_sorted_by_name() {
    let fixture = DropFixture::new();
    fixture
        .write("zoo.txt", b"z")
        .write("album/Beach.jpg", b"b")
        .write("album/nested/apple.txt", b"a");

    let roots = vec![
        entry_for(&fixture.path("zoo.txt")).await,
        entry_for(&fixture.path("album")).await,
    ];
    let files = scan(roots, &TypeFilter::accept_all()).await;

    assert_eq!(
        paths(&files),
        vec!["album/nested/apple.txt", "album/Beach.jpg", "zoo.txt"]
    );
}

/// Hidden names are dropped at every depth, including hidden roots
#[tokio::test]
async fn test_hidden_entries_never_returned() {
    let fixture = DropFixture::new();
    fixture
        .write(".DS_Store", b"")
        .write("a/.secret/key.txt", b"k")
        .write("a/b/.hidden.txt", b"h")
        .write("a/b/visible.txt", b"v");

    let roots = vec![
        fixture.root_entry().await,
        entry_for(&fixture.path(".DS_Store")).await,
    ];
    let files = scan(roots, &TypeFilter::accept_all()).await;

    assert_eq!(paths(&files), vec!["drop/a/b/visible.txt"]);
    assert!(files.iter().all(|f| !f.name().starts_with('.')));
}

/// A tiny page size still enumerates every child
#[tokio::test]
async fn test_small_pages_enumerate_everything() {
    let fixture = DropFixture::new();
    for i in 0..25 {
        fixture.write(&format!("bulk/file{:02}.txt", i), b"x");
    }

    let root = local_entry(fixture.path("bulk"), 3).await.unwrap();
    let files = scan(vec![root], &TypeFilter::accept_all()).await;

    assert_eq!(files.len(), 25);
    assert_eq!(files[0].name(), "file00.txt");
    assert_eq!(files[24].name(), "file24.txt");
}

/// Repeated scans of the same tree produce the same order
#[tokio::test]
async fn test_rescan_is_deterministic() {
    let fixture = DropFixture::new();
    for name in ["m.txt", "B.txt", "a.txt", "x/c.txt", "x/y/A.txt", "x/a.txt"] {
        fixture.write(name, b"");
    }

    let first = scan(vec![fixture.root_entry().await], &TypeFilter::accept_all()).await;
    let second = scan(vec![fixture.root_entry().await], &TypeFilter::accept_all()).await;

    assert_eq!(paths(&first), paths(&second));
    // Same name in two folders: ties fall back to path order.
    assert_eq!(
        paths(&first),
        vec![
            "drop/a.txt",
            "drop/x/a.txt",
            "drop/x/y/A.txt",
            "drop/B.txt",
            "drop/x/c.txt",
            "drop/m.txt",
        ]
    );
}

/// Exact, wildcard and extension patterns combine
#[tokio::test]
async fn test_combined_accept_list() {
    let fixture = DropFixture::new();
    fixture
        .write("data.json", b"{}")
        .write("photo.JPG", b"j")
        .write("clip.mp4", b"m")
        .write("notes.txt", b"n")
        .write("raw.xyz", b"?");

    let filter = TypeFilter::parse("application/json, video/*, .xyz");
    let files = scan(vec![fixture.root_entry().await], &filter).await;

    assert_eq!(
        paths(&files),
        vec!["drop/clip.mp4", "drop/data.json", "drop/raw.xyz"]
    );
}

/// Scanner options from config: hidden files and depth limit
#[tokio::test]
async fn test_scanner_options() {
    let fixture = DropFixture::new();
    fixture
        .write(".env", b"")
        .write("one/two/three.txt", b"")
        .write("one/top.txt", b"");

    let options = ScanOptions {
        include_hidden: true,
        max_depth: Some(1),
    };
    let files = Scanner::with_options(TypeFilter::accept_all(), options)
        .scan(vec![fixture.root_entry().await])
        .await;

    assert_eq!(paths(&files), vec!["drop/.env"]);
}

/// Missing paths resolve to no entry and are skipped
#[tokio::test]
async fn test_missing_root_skipped() {
    let fixture = DropFixture::new();
    fixture.write("here.txt", b"");

    let roots = vec![
        local_entry(fixture.path("here.txt"), 10).await,
        local_entry(fixture.path("gone.txt"), 10).await,
    ];
    let files = scan(roots, &TypeFilter::accept_all()).await;
    assert_eq!(paths(&files), vec!["here.txt"]);
}

/// A filter matching nothing is an empty result, not an error
#[tokio::test]
async fn test_no_match_is_empty() {
    let fixture = DropFixture::new();
    fixture.write("a.txt", b"").write("b/c.md", b"");

    let filter = TypeFilter::parse("audio/*");
    let files = scan(vec![fixture.root_entry().await], &filter).await;
    assert!(files.is_empty());
}

#[cfg(unix)]
#[tokio::test]
async fn test_unreadable_directory_does_not_abort_scan() {
    use std::os::unix::fs::PermissionsExt;

    let fixture = DropFixture::new();
    fixture.write("ok.txt", b"").write("locked/inner.txt", b"");
    let locked = fixture.path("locked");
    std::fs::set_permissions(&locked, std::fs::Permissions::from_mode(0o000)).unwrap();

    let files = scan(vec![fixture.root_entry().await], &TypeFilter::accept_all()).await;
    std::fs::set_permissions(&locked, std::fs::Permissions::from_mode(0o755)).unwrap();

    // Privileged users can still read the locked directory.
    assert!(paths(&files).contains(&"drop/ok.txt".to_string()));
}

/// Links back to the drop or its parent are not followed, so the scan ends
#[cfg(unix)]
#[tokio::test]
async fn test_symlink_cycles_terminate() {
    let fixture = DropFixture::new();
    fixture.write("a.txt", b"a").write("sub/b.txt", b"b");
    std::os::unix::fs::symlink("..", fixture.path("up")).unwrap();
    std::os::unix::fs::symlink(".", fixture.path("self")).unwrap();
    std::os::unix::fs::symlink("..", fixture.path("sub/loop")).unwrap();

    let files = tokio::time::timeout(
        std::time::Duration::from_secs(30),
        scan(vec![fixture.root_entry().await], &TypeFilter::accept_all()),
    )
    .await
    .expect("scan over symlink cycles should finish");

    assert_eq!(paths(&files), vec!["drop/a.txt", "drop/sub/b.txt"]);
}
