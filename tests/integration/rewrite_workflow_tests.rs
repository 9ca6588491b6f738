/*!
 * End-to-end tests for the tree rewrite pass
 */

use anyhow::Result;
use std::fs;
use std::path::PathBuf;

use ruslate::app_config::Config;
use ruslate::app_controller::run_with_translator;
use ruslate::providers::mock::MockTranslator;

use crate::common;

const DEPLOY_SH: &str = "#!/bin/bash\n\
# Основной скрипт развёртывания\n\
echo \"Привет $USER\"\n\
echo \"Запуск завершён\"\n";

const DEPLOY_SH_TRANSLATED: &str = "#!/bin/bash\n\
# Main deployment script\n\
echo \"Привет $USER\"\n\
echo \"Startup finished\"\n";

const ROUTER_CFG: &str = "set hostname router1 # Перезапуск маршрутизатора\n";
const ROUTER_CFG_TRANSLATED: &str = "set hostname router1 # Restarting the router\n";

const README_MD: &str = "# Проект ruslate\n\
\n\
- Поддержка маршрутизаторов\n\
\n\
```\n\
echo \"Привет мир\"\n\
```\n";

const README_MD_TRANSLATED: &str = "# The ruslate project\n\
\n\
- Router support\n\
\n\
```\n\
echo \"Привет мир\"\n\
```\n";

/// Lay out a small tree with candidates, an excluded dir, and an ignored file
fn build_tree(root: &PathBuf) -> Result<()> {
    fs::create_dir(root.join("scripts"))?;
    fs::create_dir(root.join(".git"))?;

    common::create_test_file(&root.join("scripts"), "deploy.sh", DEPLOY_SH)?;
    common::create_test_file(root, "router.cfg", ROUTER_CFG)?;
    common::create_test_file(root, "README.md", README_MD)?;
    common::create_test_file(&root.join(".git"), "hook.sh", "# Привет из хука\n")?;
    common::create_test_file(root, "notes.txt", "Привет из заметок\n")?;
    Ok(())
}

#[tokio::test]
async fn test_run_withStubTranslator_shouldRewriteCandidatesInPlace() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let root = temp_dir.path().to_path_buf();
    build_tree(&root)?;

    let config = Config::default();
    let translator = MockTranslator::working().with_custom_response(common::stub_translate);

    let summary = run_with_translator(&config, &translator, &root).await?;

    assert_eq!(summary.scanned, 3);
    assert_eq!(summary.translated, 3);
    assert_eq!(summary.unchanged, 0);
    assert_eq!(summary.skipped, 0);
    assert_eq!(summary.failed, 0);

    assert_eq!(fs::read_to_string(root.join("scripts/deploy.sh"))?, DEPLOY_SH_TRANSLATED);
    assert_eq!(fs::read_to_string(root.join("router.cfg"))?, ROUTER_CFG_TRANSLATED);
    assert_eq!(fs::read_to_string(root.join("README.md"))?, README_MD_TRANSLATED);

    // Excluded and ignored files stay untouched
    assert_eq!(fs::read_to_string(root.join(".git/hook.sh"))?, "# Привет из хука\n");
    assert_eq!(fs::read_to_string(root.join("notes.txt"))?, "Привет из заметок\n");
    Ok(())
}

#[tokio::test]
async fn test_run_twice_shouldBeIdempotent() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let root = temp_dir.path().to_path_buf();
    build_tree(&root)?;

    let config = Config::default();
    let translator = MockTranslator::working().with_custom_response(common::stub_translate);
    run_with_translator(&config, &translator, &root).await?;

    let second = MockTranslator::working().with_custom_response(common::stub_translate);
    let summary = run_with_translator(&config, &second, &root).await?;

    assert_eq!(summary.translated, 0);
    assert_eq!(summary.unchanged, 3);
    assert_eq!(second.call_count(), 0);
    assert_eq!(fs::read_to_string(root.join("scripts/deploy.sh"))?, DEPLOY_SH_TRANSLATED);
    Ok(())
}

#[tokio::test]
async fn test_run_withFailingTranslator_shouldLeaveTreeUntouched() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let root = temp_dir.path().to_path_buf();
    build_tree(&root)?;

    let config = Config::default();
    let translator = MockTranslator::failing();

    let summary = run_with_translator(&config, &translator, &root).await?;

    assert_eq!(summary.translated, 0);
    assert_eq!(summary.unchanged, 3);
    assert_eq!(summary.failed, 0);

    assert_eq!(fs::read_to_string(root.join("scripts/deploy.sh"))?, DEPLOY_SH);
    assert_eq!(fs::read_to_string(root.join("router.cfg"))?, ROUTER_CFG);
    assert_eq!(fs::read_to_string(root.join("README.md"))?, README_MD);
    Ok(())
}

#[tokio::test]
async fn test_run_withCp1251Script_shouldRewriteInSameEncoding() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let root = temp_dir.path().to_path_buf();

    // "# Перезапуск маршрутизатора\n" encoded as windows-1251
    let mut bytes = vec![b'#', b' '];
    bytes.extend_from_slice(&[
        0xCF, 0xE5, 0xF0, 0xE5, 0xE7, 0xE0, 0xEF, 0xF3, 0xF1, 0xEA, // Перезапуск
        0x20, 0xEC, 0xE0, 0xF0, 0xF8, 0xF0, 0xF3, 0xF2, 0xE8, 0xE7, 0xE0, 0xF2, 0xEE,
        0xF0, 0xE0, // маршрутизатора
    ]);
    bytes.push(b'\n');
    common::create_test_file_bytes(&root, "legacy.sh", &bytes)?;

    let config = Config::default();
    let translator = MockTranslator::working().with_custom_response(common::stub_translate);

    let summary = run_with_translator(&config, &translator, &root).await?;

    assert_eq!(summary.translated, 1);
    assert_eq!(fs::read(root.join("legacy.sh"))?, b"# Restarting the router\n");
    Ok(())
}

#[tokio::test]
async fn test_run_withUndecodableFile_shouldSkipAndContinue() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let root = temp_dir.path().to_path_buf();

    // Restrict candidates to strict UTF-8 so the cp1251 fixture cannot decode
    let mut config = Config::default();
    config.scan.encodings = vec!["utf-8".to_string()];

    let cp1251_bytes = [0xCF, 0xF0, 0xE8, 0xE2, 0xE5, 0xF2];
    common::create_test_file_bytes(&root, "legacy.sh", &cp1251_bytes)?;
    common::create_test_file(&root, "ok.sh", "echo 1 # Привет мир\n")?;

    let translator = MockTranslator::working().with_custom_response(common::stub_translate);
    let summary = run_with_translator(&config, &translator, &root).await?;

    assert_eq!(summary.scanned, 2);
    assert_eq!(summary.skipped, 1);
    assert_eq!(summary.translated, 1);

    assert_eq!(fs::read(root.join("legacy.sh"))?, cp1251_bytes);
    assert_eq!(fs::read_to_string(root.join("ok.sh"))?, "echo 1 # Hello world\n");
    Ok(())
}

#[tokio::test]
async fn test_run_withMissingRoot_shouldFail() {
    let config = Config::default();
    let translator = MockTranslator::working();

    let result =
        run_with_translator(&config, &translator, &PathBuf::from("/no/such/root/12345")).await;

    assert!(result.is_err());
}
