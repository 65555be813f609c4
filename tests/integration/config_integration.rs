//! Integration tests for configuration loading and the scan settings it drives

use super::test_utils::{paths, DropFixture};
use intake::config::{workspace_config_path, ConfigLoader};
use intake::tree::Scanner;

#[tokio::test]
async fn test_workspace_config_drives_scan() {
    let fixture = DropFixture::new();
    fixture
        .write(".hidden.png", b"")
        .write("cat.png", b"")
        .write("readme.md", b"")
        .write("deep/dog.png", b"");

    let config_path = workspace_config_path(fixture.workspace());
    std::fs::create_dir_all(config_path.parent().unwrap()).unwrap();
    std::fs::write(
        &config_path,
        r#"
[scan]
accept = "image/*"
include_hidden = true
max_depth = 1
page_size = 2
"#,
    )
    .unwrap();

    let config = ConfigLoader::load(fixture.workspace()).unwrap();
    assert_eq!(config.scan.page_size, 2);

    let scanner = Scanner::with_options(config.scan.accept.clone(), config.scan.scan_options());
    let root = intake::tree::local::local_entry(&fixture.drop_root, config.scan.page_size)
        .await
        .unwrap();
    let files = scanner.scan(vec![root]).await;

    assert_eq!(paths(&files), vec!["drop/.hidden.png", "drop/cat.png"]);
}

#[test]
fn test_explicit_file_overrides_workspace() {
    let fixture = DropFixture::new();
    let explicit = fixture.workspace().join("explicit.toml");
    std::fs::write(&explicit, "[logging]\nlevel = \"trace\"\n").unwrap();

    let config = ConfigLoader::load_from_file(&explicit).unwrap();
    assert_eq!(config.logging.level, "trace");
    assert!(config.scan.accept.is_empty());
}

#[test]
fn test_invalid_logging_format_rejected() {
    let fixture = DropFixture::new();
    let explicit = fixture.workspace().join("bad.toml");
    std::fs::write(&explicit, "[logging]\nformat = \"yaml\"\n").unwrap();

    assert!(ConfigLoader::load_from_file(&explicit).is_err());
}
