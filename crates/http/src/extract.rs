//! Readable-article extraction from news pages.
//!
//! The heuristics are deliberately small: the lead image comes from
//! OpenGraph/Twitter metadata or the first content image, the title from
//! `og:title` or `<title>`, and the text from the paragraphs of the main
//! content container.

use async_trait::async_trait;
use newsdeck_core::config::DEFAULT_MAX_BODY_CHARS;
use newsdeck_core::text::{clip_chars, normalize_whitespace};
use newsdeck_core::{Article, ArticleExtractor, Error, Result};
use scraper::{ElementRef, Html, Selector};
use std::sync::LazyLock;
use std::time::Duration;
use unicode_normalization::UnicodeNormalization;
use url::Url;

use crate::{build_client, DEFAULT_TIMEOUT};

/// Metadata carrying a lead image, in order of preference.
static IMAGE_META_SELECTORS: LazyLock<Vec<Selector>> = LazyLock::new(|| {
    [
        r#"meta[property="og:image"]"#,
        r#"meta[name="twitter:image"]"#,
        r#"meta[property="og:image:url"]"#,
    ]
    .iter()
    .map(|css| Selector::parse(css).unwrap())
    .collect()
});

/// Candidate content containers, in order of preference.
static CONTAINER_SELECTORS: LazyLock<Vec<Selector>> = LazyLock::new(|| {
    ["article", "main", "body"]
        .iter()
        .map(|css| Selector::parse(css).unwrap())
        .collect()
});

static OG_TITLE_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(r#"meta[property="og:title"]"#).unwrap());
static TITLE_SELECTOR: LazyLock<Selector> = LazyLock::new(|| Selector::parse("title").unwrap());
static H1_SELECTOR: LazyLock<Selector> = LazyLock::new(|| Selector::parse("h1").unwrap());
static PARAGRAPH_SELECTOR: LazyLock<Selector> = LazyLock::new(|| Selector::parse("p").unwrap());
static IMG_SELECTOR: LazyLock<Selector> = LazyLock::new(|| Selector::parse("img").unwrap());

/// Elements whose text is never shown to readers.
const HIDDEN_ELEMENTS: &[&str] = &["script", "style", "noscript", "template"];

/// Extracts articles by fetching pages over HTTP.
pub struct HttpArticleExtractor {
    client: reqwest::Client,
    max_text_chars: usize,
}

impl HttpArticleExtractor {
    /// Create an extractor with the default timeout.
    pub fn new() -> Result<Self> {
        Self::with_timeout(DEFAULT_TIMEOUT)
    }

    /// Create an extractor whose requests give up after `timeout`.
    pub fn with_timeout(timeout: Duration) -> Result<Self> {
        let client = build_client(timeout)
            .map_err(|e| Error::ExtractionFailed(format!("failed to build HTTP client: {}", e)))?;
        Ok(Self {
            client,
            max_text_chars: DEFAULT_MAX_BODY_CHARS,
        })
    }

    /// Limit the extracted text to `max_text_chars` characters.
    pub fn with_max_text_chars(mut self, max_text_chars: usize) -> Self {
        self.max_text_chars = max_text_chars;
        self
    }
}

#[async_trait]
impl ArticleExtractor for HttpArticleExtractor {
    async fn extract(&self, url: &str) -> Result<Article> {
        let page_url = Url::parse(url)
            .map_err(|e| Error::InvalidInput(format!("malformed url {:?}: {}", url, e)))?;

        let response = self
            .client
            .get(page_url)
            .send()
            .await
            .map_err(|e| Error::ExtractionFailed(format!("fetch failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::ExtractionFailed(format!(
                "fetch failed ({})",
                status.as_u16()
            )));
        }

        // Relative links resolve against the page we ended up on.
        let final_url = response.url().clone();
        let html = response
            .text()
            .await
            .map_err(|e| Error::ExtractionFailed(format!("failed to read page: {}", e)))?;

        log::debug!("Fetched {} ({} bytes of HTML)", final_url, html.len());

        let mut article = parse_article(&html, &final_url);
        if article.text.chars().count() > self.max_text_chars {
            article.text = clip_chars(&article.text, self.max_text_chars).to_string();
        }
        Ok(article)
    }
}

/// Extract title, text and lead image from an HTML document.
pub fn parse_article(html: &str, base_url: &Url) -> Article {
    let document = Html::parse_document(html);
    let container = CONTAINER_SELECTORS
        .iter()
        .find_map(|selector| document.select(selector).next());

    let title = find_title(&document);
    let text = container.map(article_text).unwrap_or_default();
    let image_url = find_image(&document, container).map(|raw| resolve_url(base_url, &raw));

    Article::new(nfc(&title), nfc(&text), image_url)
}

fn find_title(document: &Html) -> String {
    let og_title = document
        .select(&OG_TITLE_SELECTOR)
        .filter_map(|meta| meta.value().attr("content"))
        .map(normalize_whitespace)
        .find(|t| !t.is_empty());

    og_title
        .or_else(|| first_text(document, &TITLE_SELECTOR))
        .or_else(|| first_text(document, &H1_SELECTOR))
        .unwrap_or_default()
}

fn first_text(document: &Html, selector: &Selector) -> Option<String> {
    document
        .select(selector)
        .map(visible_text)
        .find(|t| !t.is_empty())
}

/// Paragraph text joined by blank lines, or all visible text when the
/// container has no paragraphs.
fn article_text(container: ElementRef<'_>) -> String {
    let paragraphs: Vec<String> = container
        .select(&PARAGRAPH_SELECTOR)
        .map(visible_text)
        .filter(|p| !p.is_empty())
        .collect();

    if paragraphs.is_empty() {
        visible_text(container)
    } else {
        paragraphs.join("\n\n")
    }
}

fn find_image(document: &Html, container: Option<ElementRef<'_>>) -> Option<String> {
    let from_meta = IMAGE_META_SELECTORS.iter().find_map(|selector| {
        document
            .select(selector)
            .filter_map(|meta| meta.value().attr("content"))
            .map(str::trim)
            .find(|c| !c.is_empty())
    });

    from_meta
        .or_else(|| {
            let img = container?.select(&IMG_SELECTOR).next()?;
            img.value()
                .attr("src")
                .or_else(|| img.value().attr("data-src"))
                .map(str::trim)
                .filter(|s| !s.is_empty())
        })
        .map(str::to_string)
}

/// Resolve `raw` against `base`; unresolvable values are kept as-is.
fn resolve_url(base: &Url, raw: &str) -> String {
    match base.join(raw) {
        Ok(url) => url.to_string(),
        Err(e) => {
            log::debug!("Keeping unresolvable image url {:?}: {}", raw, e);
            raw.to_string()
        }
    }
}

/// Whitespace-normalized text of `element`, skipping scripts and styles.
///
/// Separate text nodes are kept apart, so `<br>` and adjacent blocks never
/// fuse words.
fn visible_text(element: ElementRef<'_>) -> String {
    let mut pieces = Vec::new();
    for node in element.descendants() {
        let Some(text) = node.value().as_text() else {
            continue;
        };
        let hidden = node
            .parent()
            .and_then(|parent| parent.value().as_element())
            .is_some_and(|parent| HIDDEN_ELEMENTS.contains(&parent.name()));
        if !hidden {
            pieces.push(&**text);
        }
    }
    normalize_whitespace(&pieces.join(" "))
}

fn nfc(text: &str) -> String {
    text.nfc().collect()
}
