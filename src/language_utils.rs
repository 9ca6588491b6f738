use anyhow::{Result, anyhow};
use isolang::Language;

/// Language utilities for ISO language code handling
///
/// The translation backend accepts ISO 639-1 (2-letter) codes plus the
/// pseudo-code `auto` for source-language detection.
/// Check whether a code is a valid ISO 639-1 language code
pub fn is_valid_language_code(code: &str) -> bool {
    let normalized_code = code.trim().to_lowercase();
    normalized_code.len() == 2 && Language::from_639_1(&normalized_code).is_some()
}

/// Get the English name for an ISO 639-1 language code
///
/// `auto` is accepted and maps to "Automatic".
pub fn get_language_name(code: &str) -> Result<String> {
    let normalized_code = code.trim().to_lowercase();

    if normalized_code == "auto" {
        return Ok("Automatic".to_string());
    }

    if let Some(lang) = Language::from_639_1(&normalized_code) {
        return Ok(lang.to_name().to_string());
    }

    Err(anyhow!("Invalid language code: {}", code))
}

/// Validate a source language code (`auto` or ISO 639-1)
pub fn validate_source_language(code: &str) -> Result<()> {
    let normalized_code = code.trim().to_lowercase();
    if normalized_code == "auto" || is_valid_language_code(&normalized_code) {
        Ok(())
    } else {
        Err(anyhow!("Invalid source language code: {}", code))
    }
}

/// Validate a target language code (ISO 639-1 only, `auto` is not a target)
pub fn validate_target_language(code: &str) -> Result<()> {
    if is_valid_language_code(code) {
        Ok(())
    } else {
        Err(anyhow!("Invalid target language code: {}", code))
    }
}
