/*!
 * Mock translator for testing.
 *
 * Simulates the translation collaborator's behaviors:
 * - `MockTranslator::working()` - always succeeds with marked-up text
 * - `MockTranslator::failing()` - always fails with an error
 * - `with_custom_response` - deterministic stub translations
 *
 * Every request is recorded so tests can assert which spans reached the
 * collaborator.
 */

use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use crate::errors::{ProviderError, TranslationError};
use crate::translation_service::Translate;

/// Behavior mode for the mock translator
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MockBehavior {
    /// Always succeeds with a translation
    Working,
    /// Always fails with an error
    Failing,
    /// Returns the input unchanged
    Echo,
}

/// Mock translation collaborator for exercising the rewriter
#[derive(Debug)]
pub struct MockTranslator {
    /// Behavior mode
    behavior: MockBehavior,
    /// Custom response generator (optional)
    custom_response: Option<fn(&str) -> String>,
    /// Every text that reached the collaborator, in call order
    calls: Arc<Mutex<Vec<String>>>,
}

impl MockTranslator {
    /// Create a new mock translator with the specified behavior
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            custom_response: None,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Create a working mock that always succeeds
    pub fn working() -> Self {
        Self::new(MockBehavior::Working)
    }

    /// Create a failing mock that always errors
    pub fn failing() -> Self {
        Self::new(MockBehavior::Failing)
    }

    /// Create a mock that returns its input unchanged
    pub fn echo() -> Self {
        Self::new(MockBehavior::Echo)
    }

    /// Set a custom response generator
    pub fn with_custom_response(mut self, generator: fn(&str) -> String) -> Self {
        self.custom_response = Some(generator);
        self
    }

    /// Texts that reached the collaborator, in call order
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().expect("calls lock poisoned").clone()
    }

    /// Number of requests the collaborator received
    pub fn call_count(&self) -> usize {
        self.calls.lock().expect("calls lock poisoned").len()
    }
}

impl Clone for MockTranslator {
    fn clone(&self) -> Self {
        Self {
            behavior: self.behavior,
            custom_response: self.custom_response,
            calls: Arc::clone(&self.calls),
        }
    }
}

#[async_trait]
impl Translate for MockTranslator {
    async fn translate(&self, text: &str) -> Result<String, TranslationError> {
        self.calls
            .lock()
            .expect("calls lock poisoned")
            .push(text.to_string());

        match self.behavior {
            MockBehavior::Working => {
                if let Some(generator) = self.custom_response {
                    Ok(generator(text))
                } else {
                    Ok(format!("[TRANSLATED] {}", text))
                }
            }
            MockBehavior::Failing => Err(TranslationError::Provider(ProviderError::ApiError {
                status_code: 500,
                message: "Simulated provider failure".to_string(),
            })),
            MockBehavior::Echo => Ok(text.to_string()),
        }
    }
}
