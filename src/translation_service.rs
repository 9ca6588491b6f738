use async_trait::async_trait;
use log::{debug, warn};
use std::time::Duration;

use crate::app_config::{Config, TranslationProvider as ConfigTranslationProvider};
use crate::errors::{ProviderError, TranslationError};
use crate::providers::Provider;
use crate::providers::google::{GoogleTranslate, TranslateRequest};

// @module: Translation service wrapping the provider client

/// The seam the rewriter sees: one blocking translation at a time.
///
/// Implemented by `TranslationService` for production and by the mock
/// provider for tests.
#[async_trait]
pub trait Translate: Send + Sync {
    /// Translate a single span of text
    async fn translate(&self, text: &str) -> Result<String, TranslationError>;
}

// @enum: Available translation provider implementations
enum TranslationProviderImpl {
    // @variant: Google web endpoint
    Google {
        // @field: Client instance
        client: GoogleTranslate,
    },
}

// @struct: Translation service
pub struct TranslationService {
    // @field: Provider implementation
    provider: TranslationProviderImpl,

    // @field: Source language code ("auto" allowed)
    source_language: String,

    // @field: Target language code
    target_language: String,

    // @field: Courtesy delay after each request
    rate_limit_delay: Duration,

    // @field: Retry count for failed requests
    retry_count: u32,

    // @field: Backoff base, doubled on each retry
    retry_backoff: Duration,
}

impl TranslationService {
    /// Create a translation service from the application config
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let provider = match config.translation.provider {
            ConfigTranslationProvider::Google => TranslationProviderImpl::Google {
                client: GoogleTranslate::new(
                    &config.translation.google.endpoint,
                    config.translation.google.timeout_secs,
                ),
            },
        };

        Ok(Self {
            provider,
            source_language: config.source_language.clone(),
            target_language: config.target_language.clone(),
            rate_limit_delay: Duration::from_millis(config.translation.common.rate_limit_delay_ms),
            retry_count: config.translation.common.retry_count,
            retry_backoff: Duration::from_millis(config.translation.common.retry_backoff_ms),
        })
    }

    // @sends: One request to the active provider
    async fn translate_once(&self, text: &str) -> Result<String, ProviderError> {
        match &self.provider {
            TranslationProviderImpl::Google { client } => {
                let request = TranslateRequest {
                    text: text.to_string(),
                    source_language: self.source_language.clone(),
                    target_language: self.target_language.clone(),
                };
                let response = client.complete(request).await?;
                Ok(GoogleTranslate::extract_text(&response))
            }
        }
    }
}

#[async_trait]
impl Translate for TranslationService {
    async fn translate(&self, text: &str) -> Result<String, TranslationError> {
        let mut attempt: u32 = 0;
        let result = loop {
            match self.translate_once(text).await {
                Ok(translated) => {
                    if translated.is_empty() {
                        break Err(TranslationError::EmptyTranslation);
                    }
                    break Ok(translated);
                }
                Err(e) if attempt < self.retry_count => {
                    let backoff = self.retry_backoff * 2u32.saturating_pow(attempt);
                    warn!(
                        "Translation attempt {} failed ({}), retrying in {:?}",
                        attempt + 1,
                        e,
                        backoff
                    );
                    tokio::time::sleep(backoff).await;
                    attempt += 1;
                }
                Err(e) => break Err(TranslationError::Provider(e)),
            }
        };

        // Courtesy pause before the next request reaches the endpoint
        if !self.rate_limit_delay.is_zero() {
            debug!("Rate limit pause: {:?}", self.rate_limit_delay);
            tokio::time::sleep(self.rate_limit_delay).await;
        }

        result
    }
}
