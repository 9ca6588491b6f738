/*!
 * Common test utilities for the ruslate test suite
 */

use anyhow::Result;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Creates a test file with the given content in the specified directory
pub fn create_test_file(dir: &PathBuf, filename: &str, content: &str) -> Result<PathBuf> {
    let file_path = dir.join(filename);
    fs::write(&file_path, content)?;
    Ok(file_path)
}

/// Creates a test file from raw bytes (for legacy-encoding fixtures)
pub fn create_test_file_bytes(dir: &PathBuf, filename: &str, content: &[u8]) -> Result<PathBuf> {
    let file_path = dir.join(filename);
    fs::write(&file_path, content)?;
    Ok(file_path)
}

/// Deterministic stub translation used across the suite.
///
/// Known Russian phrases map to fixed English; anything else maps to a
/// Cyrillic-free placeholder so repeat runs are idempotent.
pub fn stub_translate(text: &str) -> String {
    match text {
        "Привет мир" => "Hello world".to_string(),
        "Привет" => "Hello".to_string(),
        "Пока" => "Bye".to_string(),
        "Мир" => "World".to_string(),
        "Проект ruslate" => "The ruslate project".to_string(),
        "Основной скрипт развёртывания" => "Main deployment script".to_string(),
        "Запуск завершён" => "Startup finished".to_string(),
        "Поддержка маршрутизаторов" => "Router support".to_string(),
        "Перезапуск маршрутизатора" => "Restarting the router".to_string(),
        _ => "translated".to_string(),
    }
}
