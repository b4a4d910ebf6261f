//! Error types for deck building.

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building or exporting a slide deck.
#[derive(Error, Debug)]
pub enum Error {
    /// Missing or malformed URL, or unusable input text.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The article extraction collaborator failed or was unreachable.
    #[error("Extraction failed: {0}")]
    ExtractionFailed(String),

    /// The translation collaborator failed, or its credential is missing.
    #[error("Translation failed: {0}")]
    TranslationFailed(String),

    /// The slide image could not be fetched or decoded.
    ///
    /// The slide composer recovers from this with a flat fill; it never
    /// aborts a deck build.
    #[error("Image unavailable: {0}")]
    ImageUnavailable(String),

    /// A layout routine was called with parameters it cannot honour.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Font loading, measuring or rasterizing failed.
    #[error("Render error: {0}")]
    Render(String),

    /// Packaging the deck into an archive failed.
    #[error("Export error: {0}")]
    Export(String),

    /// Configuration could not be read or parsed.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Failed to read or write a file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
