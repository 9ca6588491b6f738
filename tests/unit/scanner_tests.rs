/*!
 * Tests for candidate file discovery
 */

use anyhow::Result;
use std::fs;
use std::path::Path;

use ruslate::app_config::ScanConfig;
use ruslate::scanner::{FileKind, Scanner};

use crate::common;

fn default_scanner() -> Scanner {
    Scanner::from_config(&ScanConfig::default())
}

#[test]
fn test_classify_withShellExtensions_shouldReturnShell() {
    let scanner = default_scanner();

    assert_eq!(scanner.classify(Path::new("deploy.sh")), Some(FileKind::Shell));
    assert_eq!(scanner.classify(Path::new("router.cfg")), Some(FileKind::Shell));
    assert_eq!(scanner.classify(Path::new("net.conf")), Some(FileKind::Shell));
    // Extension match is case-insensitive
    assert_eq!(scanner.classify(Path::new("DEPLOY.SH")), Some(FileKind::Shell));
}

#[test]
fn test_classify_withReadmeNames_shouldReturnMarkdown() {
    let scanner = default_scanner();

    assert_eq!(scanner.classify(Path::new("readme.md")), Some(FileKind::Markdown));
    assert_eq!(scanner.classify(Path::new("README.md")), Some(FileKind::Markdown));
    assert_eq!(scanner.classify(Path::new("Readme.MD")), Some(FileKind::Markdown));
}

#[test]
fn test_classify_withOtherFiles_shouldReturnNone() {
    let scanner = default_scanner();

    assert_eq!(scanner.classify(Path::new("notes.txt")), None);
    assert_eq!(scanner.classify(Path::new("CHANGELOG.md")), None);
    assert_eq!(scanner.classify(Path::new("archive.sh.bak")), None);
    assert_eq!(scanner.classify(Path::new("script")), None);
}

#[test]
fn test_scan_withNestedTree_shouldFindBothKinds() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let root = temp_dir.path().to_path_buf();
    fs::create_dir(root.join("sub"))?;

    common::create_test_file(&root, "top.sh", "echo top\n")?;
    common::create_test_file(&root.join("sub"), "README.md", "# docs\n")?;
    common::create_test_file(&root.join("sub"), "notes.txt", "ignored\n")?;

    let scanner = default_scanner();
    let mut found = scanner.scan(&root)?;
    found.sort_by(|a, b| a.0.cmp(&b.0));

    assert_eq!(found.len(), 2);
    assert_eq!(found[0].1, FileKind::Markdown);
    assert!(found[0].0.ends_with("sub/README.md"));
    assert_eq!(found[1].1, FileKind::Shell);
    assert!(found[1].0.ends_with("top.sh"));
    Ok(())
}

#[test]
fn test_scan_withExcludedDirectory_shouldPruneIt() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let root = temp_dir.path().to_path_buf();
    fs::create_dir(root.join(".git"))?;
    fs::create_dir(root.join("scripts"))?;

    common::create_test_file(&root.join(".git"), "hook.sh", "echo hook\n")?;
    common::create_test_file(&root.join("scripts"), "run.sh", "echo run\n")?;

    let scanner = default_scanner();
    let found = scanner.scan(&root)?;

    assert_eq!(found.len(), 1);
    assert!(found[0].0.ends_with("scripts/run.sh"));
    Ok(())
}

#[test]
fn test_scan_withCustomExclusions_shouldHonorConfig() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let root = temp_dir.path().to_path_buf();
    fs::create_dir(root.join("vendor"))?;

    common::create_test_file(&root.join("vendor"), "third_party.sh", "echo vendored\n")?;

    let config = ScanConfig {
        excluded_dirs: vec!["vendor".to_string()],
        ..ScanConfig::default()
    };
    let scanner = Scanner::from_config(&config);
    let found = scanner.scan(&root)?;

    assert!(found.is_empty());
    Ok(())
}
