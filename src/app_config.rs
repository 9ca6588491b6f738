use anyhow::{Result, anyhow};
use serde::{Deserialize, Serialize};
use std::default::Default;
use url::Url;

use crate::encoding::TextEncoding;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Source language code (ISO 639-1, or "auto" for detection)
    #[serde(default = "default_source_language")]
    pub source_language: String,

    /// Target language code (ISO 639-1)
    #[serde(default = "default_target_language")]
    pub target_language: String,

    /// File discovery settings
    #[serde(default)]
    pub scan: ScanConfig,

    /// Translation backend settings
    #[serde(default)]
    pub translation: TranslationConfig,

    /// Code-like suppression policy
    #[serde(default)]
    pub skip: SkipConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Translation provider type
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum TranslationProvider {
    // @provider: Google web endpoint (no API key)
    #[default]
    Google,
}

impl TranslationProvider {
    // @returns: Capitalized provider name
    pub fn display_name(&self) -> &str {
        match self {
            Self::Google => "Google",
        }
    }

    // @returns: Lowercase provider identifier
    pub fn to_lowercase_string(&self) -> String {
        match self {
            Self::Google => "google".to_string(),
        }
    }
}

impl std::fmt::Display for TranslationProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_lowercase_string())
    }
}

impl std::str::FromStr for TranslationProvider {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "google" => Ok(Self::Google),
            _ => Err(anyhow!("Invalid provider type: {}", s)),
        }
    }
}

/// File discovery configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ScanConfig {
    /// Extensions handled as shell-like files (lowercase, no leading dot)
    #[serde(default = "default_target_extensions")]
    pub target_extensions: Vec<String>,

    /// Filenames handled as markdown READMEs (case-insensitive match)
    #[serde(default = "default_readme_names")]
    pub readme_names: Vec<String>,

    /// Directory names pruned from the walk
    #[serde(default = "default_excluded_dirs")]
    pub excluded_dirs: Vec<String>,

    /// Candidate encodings tried in order when opening a file
    #[serde(default = "default_encodings")]
    pub encodings: Vec<String>,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            target_extensions: default_target_extensions(),
            readme_names: default_readme_names(),
            excluded_dirs: default_excluded_dirs(),
            encodings: default_encodings(),
        }
    }
}

impl ScanConfig {
    /// Resolve the configured encoding labels into the probe list
    pub fn candidate_encodings(&self) -> Result<Vec<TextEncoding>> {
        let mut candidates = Vec::with_capacity(self.encodings.len());
        for label in &self.encodings {
            let encoding = TextEncoding::from_label(label)
                .ok_or_else(|| anyhow!("Unknown encoding label in config: {}", label))?;
            // cp1251 and windows-1251 are the same codec; keep one probe
            if !candidates.contains(&encoding) {
                candidates.push(encoding);
            }
        }
        if candidates.is_empty() {
            return Err(anyhow!("Encoding candidate list must not be empty"));
        }
        Ok(candidates)
    }
}

/// Google web endpoint configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct GoogleConfig {
    /// Service endpoint URL
    #[serde(default = "default_google_endpoint")]
    pub endpoint: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for GoogleConfig {
    fn default() -> Self {
        Self {
            endpoint: default_google_endpoint(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Translation service configuration
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct TranslationConfig {
    /// Translation provider to use
    #[serde(default)]
    pub provider: TranslationProvider,

    /// Google endpoint settings
    #[serde(default)]
    pub google: GoogleConfig,

    /// Common translation settings
    #[serde(default)]
    pub common: TranslationCommonConfig,
}

/// Common translation settings applicable to all providers
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TranslationCommonConfig {
    /// Courtesy delay in milliseconds after each request
    #[serde(default = "default_rate_limit_delay_ms")]
    pub rate_limit_delay_ms: u64,

    /// Retry count for failed requests
    #[serde(default = "default_retry_count")]
    pub retry_count: u32,

    /// Backoff base for retries (in milliseconds, doubled on each retry)
    #[serde(default = "default_retry_backoff_ms")]
    pub retry_backoff_ms: u64,
}

impl Default for TranslationCommonConfig {
    fn default() -> Self {
        Self {
            rate_limit_delay_ms: default_rate_limit_delay_ms(),
            retry_count: default_retry_count(),
            retry_backoff_ms: default_retry_backoff_ms(),
        }
    }
}

/// Code-like suppression policy: which span shapes are preserved untranslated
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SkipConfig {
    /// Preserve spans that are pure punctuation/digits
    #[serde(default = "default_true")]
    pub pure_symbols: bool,

    /// Preserve spans containing a `$` shell-variable marker
    #[serde(default = "default_true")]
    pub variables: bool,

    /// Preserve spans containing filesystem-path-looking substrings
    #[serde(default = "default_true")]
    pub paths: bool,

    /// Preserve spans containing IPv4-style dotted quads
    #[serde(default = "default_true")]
    pub ip_addresses: bool,
}

impl Default for SkipConfig {
    fn default() -> Self {
        Self {
            pure_symbols: true,
            variables: true,
            paths: true,
            ip_addresses: true,
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

fn default_source_language() -> String {
    "auto".to_string()
}

fn default_target_language() -> String {
    "en".to_string()
}

fn default_target_extensions() -> Vec<String> {
    vec!["sh".to_string(), "cfg".to_string(), "conf".to_string()]
}

fn default_readme_names() -> Vec<String> {
    vec!["readme.md".to_string()]
}

fn default_excluded_dirs() -> Vec<String> {
    vec![".git".to_string(), ".github".to_string()]
}

fn default_encodings() -> Vec<String> {
    vec!["utf-8".to_string(), "windows-1251".to_string(), "latin1".to_string()]
}

fn default_google_endpoint() -> String {
    "https://translate.googleapis.com".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_rate_limit_delay_ms() -> u64 {
    500 // 500ms courtesy delay between requests
}

fn default_retry_count() -> u32 {
    3 // Default to 3 retries
}

fn default_retry_backoff_ms() -> u64 {
    1000 // 1 second base backoff time, doubled on each retry
}

fn default_true() -> bool {
    true
}

impl Config {
    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        // Validate languages
        crate::language_utils::validate_source_language(&self.source_language)?;
        crate::language_utils::validate_target_language(&self.target_language)?;

        // Validate the endpoint parses as a URL
        Url::parse(&self.translation.google.endpoint)
            .map_err(|e| anyhow!("Invalid endpoint URL '{}': {}", self.translation.google.endpoint, e))?;

        // Validate file discovery settings
        if self.scan.target_extensions.is_empty() && self.scan.readme_names.is_empty() {
            return Err(anyhow!("Scan config matches no files: extension and readme lists are both empty"));
        }
        self.scan.candidate_encodings()?;

        Ok(())
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            source_language: default_source_language(),
            target_language: default_target_language(),
            scan: ScanConfig::default(),
            translation: TranslationConfig::default(),
            skip: SkipConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}
