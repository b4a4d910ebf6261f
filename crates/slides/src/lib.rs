//! Slide rendering and deck assembly.
//!
//! Takes the layout primitives from `newsdeck-core` and turns an article
//! into a sequence of rendered two-panel slides, then packages them.

pub mod compose;
pub mod cover;
pub mod deck;
pub mod export;
pub mod font;
mod raster;

pub use compose::{ImagePanel, RenderedSlide, SlideComposer};
pub use cover::CoverFit;
pub use deck::{Deck, DeckBuilder};
pub use export::{save_zip, write_zip};
pub use font::{BlockFont, FontBackend, FontdueFont, Measurer};
