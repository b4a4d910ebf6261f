//! Interfaces of the external services a deck build depends on.
//!
//! The deck builder only sees these traits; HTTP implementations live in
//! `newsdeck-http` and tests substitute in-memory fakes.

use async_trait::async_trait;

use crate::types::Article;
use crate::Result;

/// Fetches a page and extracts its readable article.
#[async_trait]
pub trait ArticleExtractor: Send + Sync {
    /// Extract the article at `url`.
    ///
    /// Implementations report failures as [`crate::Error::ExtractionFailed`].
    async fn extract(&self, url: &str) -> Result<Article>;
}

/// Translates text into a target language.
#[async_trait]
pub trait Translator: Send + Sync {
    /// Translate `text` into the language identified by `target`.
    ///
    /// Implementations report failures, including a missing credential, as
    /// [`crate::Error::TranslationFailed`].
    async fn translate(&self, text: &str, target: &str) -> Result<String>;
}

/// Raw image bytes and their declared content type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageBytes {
    pub bytes: Vec<u8>,
    pub content_type: String,
}

impl ImageBytes {
    pub fn new(bytes: Vec<u8>, content_type: impl Into<String>) -> Self {
        Self {
            bytes,
            content_type: content_type.into(),
        }
    }
}

/// Relays image bytes for a URL.
#[async_trait]
pub trait ImageSource: Send + Sync {
    /// Fetch the image at `url`.
    ///
    /// Implementations report failures as [`crate::Error::ImageUnavailable`].
    async fn fetch(&self, url: &str) -> Result<ImageBytes>;
}
