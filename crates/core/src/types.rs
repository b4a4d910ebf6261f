//! Domain types for extracted articles and paginated slide content.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::text::clip_chars;

/// An article as returned by the extraction collaborator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    /// Headline of the article.
    pub title: String,

    /// Readable body text.
    pub text: String,

    /// Lead image, if the page advertised or contained one.
    #[serde(rename = "imageUrl")]
    pub image_url: Option<String>,
}

impl Article {
    /// Create a new article.
    pub fn new(
        title: impl Into<String>,
        text: impl Into<String>,
        image_url: Option<String>,
    ) -> Self {
        Self {
            title: title.into(),
            text: text.into(),
            image_url,
        }
    }
}

/// One wrapped line of body text.
///
/// Lines are only produced by [`crate::wrap::wrap`] and are immutable
/// afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Line(String);

impl Line {
    pub(crate) fn new(text: String) -> Self {
        Self(text)
    }

    /// The line's text, tokens joined by single spaces.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Iterate the whitespace-delimited tokens of this line.
    pub fn tokens(&self) -> impl Iterator<Item = &str> {
        self.0.split(' ')
    }
}

impl AsRef<str> for Line {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl PartialEq<&str> for Line {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// A bounded run of consecutive lines shown on one slide.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Page {
    lines: Vec<Line>,
}

impl Page {
    pub(crate) fn from_lines(lines: Vec<Line>) -> Self {
        Self { lines }
    }

    /// A page with no lines, used when the body text is empty.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Lines on this page, in reading order.
    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    /// Number of lines on this page.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether this page has no lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Everything needed to render one slide.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Slide {
    /// 0-based position within the deck.
    pub page_index: usize,

    /// Number of slides in the deck.
    pub total_pages: usize,

    /// Header title, already truncated to the display limit.
    pub title: String,

    /// Body lines shown on this slide.
    pub body: Page,

    /// Image for the right-hand panel.
    pub image_source: Option<String>,
}

impl Slide {
    /// Create a slide, truncating `title` to `title_max_chars` characters.
    pub fn new(
        title: &str,
        body: Page,
        page_index: usize,
        total_pages: usize,
        image_source: Option<String>,
        title_max_chars: usize,
    ) -> Self {
        Self {
            page_index,
            total_pages,
            title: clip_chars(title, title_max_chars).to_string(),
            body,
            image_source,
        }
    }

    /// 1-based ordinal, as shown to readers and used in export file names.
    pub fn number(&self) -> usize {
        self.page_index + 1
    }

    /// Footer label, e.g. `"2 / 5"`.
    pub fn footer(&self) -> String {
        format!("{} / {}", self.number(), self.total_pages)
    }
}
