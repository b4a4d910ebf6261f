//! Core domain types, line wrapping, pagination and script detection for
//! turning news articles into slide decks.

pub mod collab;
pub mod config;
pub mod error;
pub mod geometry;
pub mod paginate;
pub mod script;
pub mod text;
pub mod types;
pub mod wrap;

pub use collab::{ArticleExtractor, ImageBytes, ImageSource, Translator};
pub use config::DeckConfig;
pub use error::{Error, Result};
pub use geometry::{Color, FontSpec, Palette, SlideGeometry};
pub use paginate::paginate;
pub use script::{needs_translation, CharRange, Script};
pub use types::{Article, Line, Page, Slide};
pub use wrap::{wrap, MonospaceMeasurer, TextMeasurer};
