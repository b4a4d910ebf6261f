//! Deck building: extraction, optional translation, layout and
//! per-page composition.

use futures::stream::{self, StreamExt, TryStreamExt};
use newsdeck_core::text::{clip_chars, split_translated};
use newsdeck_core::{
    needs_translation, paginate, wrap, Article, ArticleExtractor, DeckConfig, Error, ImageSource,
    Page, Result, Slide, Translator,
};
use std::sync::Arc;
use url::Url;

use crate::compose::{RenderedSlide, SlideComposer};
use crate::font::{FontBackend, Measurer};

/// The slides generated for one article, in reading order.
#[derive(Debug, Clone)]
pub struct Deck {
    /// Title shown on the slides (translated when translation ran).
    pub title: String,

    /// Lead image of the article.
    pub image_url: Option<String>,

    /// Slides ordered by page index.
    pub slides: Vec<RenderedSlide>,
}

impl Deck {
    /// Number of slides.
    pub fn len(&self) -> usize {
        self.slides.len()
    }

    /// Whether the deck has no slides. A built deck always has at least one.
    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }
}

/// Builds decks from article URLs.
pub struct DeckBuilder {
    extractor: Arc<dyn ArticleExtractor>,
    translator: Arc<dyn Translator>,
    fonts: Arc<dyn FontBackend>,
    composer: SlideComposer,
    config: DeckConfig,
}

impl DeckBuilder {
    /// Create a builder from its collaborators.
    pub fn new(
        extractor: Arc<dyn ArticleExtractor>,
        translator: Arc<dyn Translator>,
        images: Arc<dyn ImageSource>,
        fonts: Arc<dyn FontBackend>,
        config: DeckConfig,
    ) -> Self {
        let composer = SlideComposer::new(config.geometry.clone(), Arc::clone(&fonts), images);
        Self {
            extractor,
            translator,
            fonts,
            composer,
            config,
        }
    }

    pub fn config(&self) -> &DeckConfig {
        &self.config
    }

    /// Build the deck for the article at `url`.
    ///
    /// Any extraction or translation failure aborts the whole build; no
    /// partial deck is returned. Image failures only affect the image panel.
    pub async fn build(&self, url: &str) -> Result<Deck> {
        let url = validate_url(url)?;

        let article = self.extractor.extract(url.as_str()).await?;
        log::debug!(
            "Extracted {:?}: {} chars, image: {}",
            article.title,
            article.text.chars().count(),
            article.image_url.as_deref().unwrap_or("none")
        );

        let image_url = article.image_url.clone();
        let (title, body) = self.localize(article).await?;
        let body = clip_chars(&body, self.config.max_body_chars);

        let mut pages = self.layout(body)?;
        let total_pages = pages.len().max(1);
        if pages.is_empty() {
            pages.push(Page::empty());
        }

        let geometry = &self.config.geometry;
        let slides = pages.into_iter().enumerate().map(|(index, page)| {
            Slide::new(
                &title,
                page,
                index,
                total_pages,
                image_url.clone(),
                geometry.title_max_chars,
            )
        });

        let rendered: Vec<RenderedSlide> = stream::iter(slides)
            .map(|slide| self.composer.compose(slide))
            .buffered(self.config.concurrency.max(1))
            .try_collect()
            .await?;

        log::info!("Built {} slide(s) for {:?}", rendered.len(), title);

        Ok(Deck {
            title,
            image_url,
            slides: rendered,
        })
    }

    /// Translate the article into the target language unless it already
    /// contains the target script. Returns `(title, body)`.
    async fn localize(&self, article: Article) -> Result<(String, String)> {
        let script = &self.config.target_script;
        if !needs_translation(&article.title, &article.text, script) {
            log::debug!("Article already contains {} text", script.name);
            return Ok((article.title, article.text));
        }

        log::debug!(
            "Translating into {:?} ({})",
            self.config.target_language,
            script.name
        );
        let payload = format!("{}\n\n{}", article.title, article.text);
        let translated = self
            .translator
            .translate(&payload, &self.config.target_language)
            .await
            .map_err(|e| match e {
                Error::TranslationFailed(_) => e,
                other => Error::TranslationFailed(other.to_string()),
            })?;

        Ok(split_translated(&translated, &article.title, &article.text))
    }

    /// Wrap `body` with the body font and split it into pages.
    ///
    /// Every page reserves the full header band, so the first page gets no
    /// extra offset.
    pub fn layout(&self, body: &str) -> Result<Vec<Page>> {
        let geometry = &self.config.geometry;
        let measurer = Measurer::new(self.fonts.as_ref(), geometry.body_font);
        let lines = wrap(body, geometry.max_text_width(), &measurer)?;
        let pages = paginate(&lines, geometry.max_lines_per_page(), 0)?;
        log::debug!("Wrapped body into {} lines, {} pages", lines.len(), pages.len());
        Ok(pages)
    }
}

/// Parse `url`, accepting only absolute http(s) URLs.
fn validate_url(url: &str) -> Result<Url> {
    let trimmed = url.trim();
    if trimmed.is_empty() {
        return Err(Error::InvalidInput("missing url".to_string()));
    }

    let parsed = Url::parse(trimmed)
        .map_err(|e| Error::InvalidInput(format!("malformed url {:?}: {}", trimmed, e)))?;

    match parsed.scheme() {
        "http" | "https" => Ok(parsed),
        scheme => Err(Error::InvalidInput(format!(
            "unsupported url scheme {:?}",
            scheme
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font::BlockFont;
    use async_trait::async_trait;
    use newsdeck_core::ImageBytes;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;
    use std::time::Duration;

    struct StaticExtractor(Article);

    #[async_trait]
    impl ArticleExtractor for StaticExtractor {
        async fn extract(&self, _url: &str) -> Result<Article> {
            Ok(self.0.clone())
        }
    }

    struct FailingExtractor;

    #[async_trait]
    impl ArticleExtractor for FailingExtractor {
        async fn extract(&self, url: &str) -> Result<Article> {
            Err(Error::ExtractionFailed(format!("fetch failed (404) for {}", url)))
        }
    }

    /// Prefixes each line with `[t]` and records what it was asked.
    #[derive(Default)]
    struct RecordingTranslator {
        calls: Mutex<Vec<(String, String)>>,
    }

    #[async_trait]
    impl Translator for RecordingTranslator {
        async fn translate(&self, text: &str, target: &str) -> Result<String> {
            self.calls
                .lock()
                .unwrap()
                .push((text.to_string(), target.to_string()));
            Ok(text
                .lines()
                .map(|l| if l.is_empty() { String::new() } else { format!("[t]{}", l) })
                .collect::<Vec<_>>()
                .join("\n"))
        }
    }

    struct FailingTranslator;

    #[async_trait]
    impl Translator for FailingTranslator {
        async fn translate(&self, _text: &str, _target: &str) -> Result<String> {
            Err(Error::TranslationFailed("missing TRANSLATE_API_KEY".to_string()))
        }
    }

    /// Every fetch fails; later pages answer faster than earlier ones.
    #[derive(Default)]
    struct SlowBrokenImages {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl ImageSource for SlowBrokenImages {
        async fn fetch(&self, url: &str) -> Result<ImageBytes> {
            let n = self.calls.fetch_add(1, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_millis(20u64.saturating_sub(n as u64 * 2))).await;
            Err(Error::ImageUnavailable(format!("{}: timed out", url)))
        }
    }

    fn builder_with(
        extractor: impl ArticleExtractor + 'static,
        translator: Arc<dyn Translator>,
        images: Arc<dyn ImageSource>,
    ) -> DeckBuilder {
        DeckBuilder::new(
            Arc::new(extractor),
            translator,
            images,
            Arc::new(BlockFont::new()),
            DeckConfig::default(),
        )
    }

    fn odia_words(n: usize) -> String {
        (0..n)
            .map(|i| format!("\u{0B15}{}", i % 10))
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn all_body_text(deck: &Deck) -> String {
        deck.slides
            .iter()
            .flat_map(|s| s.slide.body.lines().iter().map(|l| l.as_str().to_string()))
            .collect::<Vec<_>>()
            .join(" ")
    }

    #[tokio::test]
    async fn test_empty_text_still_yields_one_slide() {
        let builder = builder_with(
            StaticExtractor(Article::new("\u{0B15} title", "", None)),
            Arc::new(FailingTranslator),
            Arc::new(SlowBrokenImages::default()),
        );

        let deck = builder.build("https://news.example/story").await.unwrap();

        assert_eq!(deck.len(), 1);
        let slide = &deck.slides[0].slide;
        assert!(slide.body.is_empty());
        assert_eq!(slide.page_index, 0);
        assert_eq!(slide.total_pages, 1);
    }

    #[tokio::test]
    async fn test_translation_failure_aborts_build() {
        let builder = builder_with(
            StaticExtractor(Article::new("English title", "English body", None)),
            Arc::new(FailingTranslator),
            Arc::new(SlowBrokenImages::default()),
        );

        let err = builder.build("https://news.example/story").await.unwrap_err();
        assert!(matches!(err, Error::TranslationFailed(_)));
    }

    #[tokio::test]
    async fn test_extraction_failure_aborts_build() {
        let builder = builder_with(
            FailingExtractor,
            Arc::new(RecordingTranslator::default()),
            Arc::new(SlowBrokenImages::default()),
        );

        let err = builder.build("https://news.example/story").await.unwrap_err();
        assert!(matches!(err, Error::ExtractionFailed(_)));
    }

    #[tokio::test]
    async fn test_invalid_urls_are_rejected_before_extraction() {
        let builder = builder_with(
            FailingExtractor,
            Arc::new(FailingTranslator),
            Arc::new(SlowBrokenImages::default()),
        );

        for url in ["", "   ", "not a url", "ftp://news.example/story"] {
            let err = builder.build(url).await.unwrap_err();
            assert!(matches!(err, Error::InvalidInput(_)), "{:?} gave {:?}", url, err);
        }
    }

    #[tokio::test]
    async fn test_translates_when_target_script_is_absent() {
        let translator = Arc::new(RecordingTranslator::default());
        let builder = builder_with(
            StaticExtractor(Article::new("Title", "Body words here", None)),
            translator.clone(),
            Arc::new(SlowBrokenImages::default()),
        );

        let deck = builder.build("https://news.example/story").await.unwrap();

        let calls = translator.calls.lock().unwrap();
        assert_eq!(
            *calls,
            vec![("Title\n\nBody words here".to_string(), "or".to_string())]
        );
        assert_eq!(deck.title, "[t]Title");
        assert_eq!(deck.slides[0].slide.title, "[t]Title");
        assert_eq!(all_body_text(&deck), "[t]Body words here");
    }

    #[tokio::test]
    async fn test_skips_translation_for_target_script() {
        let translator = Arc::new(RecordingTranslator::default());
        let body = odia_words(5);
        let builder = builder_with(
            StaticExtractor(Article::new("Title", body.clone(), None)),
            translator.clone(),
            Arc::new(SlowBrokenImages::default()),
        );

        let deck = builder.build("https://news.example/story").await.unwrap();

        assert!(translator.calls.lock().unwrap().is_empty());
        assert_eq!(deck.title, "Title");
        assert_eq!(all_body_text(&deck), body);
    }

    #[tokio::test]
    async fn test_long_body_paginates_in_order() {
        // Tokens are 2 chars; seven per line is 20 chars (528px of 544px).
        let body = odia_words(200);
        let builder = builder_with(
            StaticExtractor(Article::new(
                "Title",
                body.clone(),
                Some("https://img.example/lead.jpg".to_string()),
            )),
            Arc::new(RecordingTranslator::default()),
            Arc::new(SlowBrokenImages::default()),
        );

        let deck = builder.build("https://news.example/story").await.unwrap();

        // 200 tokens at 7 per line = 29 lines; 9 lines per page = 4 pages.
        assert_eq!(deck.len(), 4);
        for (i, rendered) in deck.slides.iter().enumerate() {
            assert_eq!(rendered.slide.page_index, i);
            assert_eq!(rendered.slide.total_pages, 4);
            assert_eq!(
                rendered.slide.image_source.as_deref(),
                Some("https://img.example/lead.jpg")
            );
            assert_eq!(rendered.surface.dimensions(), (1280, 720));
        }
        let lens: Vec<usize> = deck.slides.iter().map(|s| s.slide.body.len()).collect();
        assert_eq!(lens, vec![9, 9, 9, 2]);
        assert_eq!(all_body_text(&deck), body);
        assert_eq!(deck.image_url.as_deref(), Some("https://img.example/lead.jpg"));
    }

    #[tokio::test]
    async fn test_image_failure_does_not_fail_build() {
        let images = Arc::new(SlowBrokenImages::default());
        let builder = builder_with(
            StaticExtractor(Article::new(
                "\u{0B15}",
                odia_words(70),
                Some("https://img.example/lead.jpg".to_string()),
            )),
            Arc::new(FailingTranslator),
            images.clone(),
        );

        let deck = builder.build("https://news.example/story").await.unwrap();

        assert_eq!(deck.len(), 2);
        assert_eq!(images.calls.load(Ordering::SeqCst), 2);
        for rendered in &deck.slides {
            assert_eq!(rendered.surface.get_pixel(960, 360).0, [0x22, 0x22, 0x22, 255]);
        }
    }

    #[tokio::test]
    async fn test_body_is_clipped_before_layout() {
        let builder = DeckBuilder::new(
            Arc::new(StaticExtractor(Article::new("\u{0B15}", odia_words(100), None))),
            Arc::new(FailingTranslator),
            Arc::new(SlowBrokenImages::default()),
            Arc::new(BlockFont::new()),
            DeckConfig::default().with_max_body_chars(8),
        );

        let deck = builder.build("https://news.example/story").await.unwrap();

        assert_eq!(deck.len(), 1);
        assert_eq!(all_body_text(&deck), odia_words(3));
    }

    #[test]
    fn test_layout_lines_fit_max_width() {
        let builder = builder_with(
            FailingExtractor,
            Arc::new(FailingTranslator),
            Arc::new(SlowBrokenImages::default()),
        );
        let font = BlockFont::new();
        let geometry = builder.config().geometry.clone();

        let pages = builder
            .layout("The quick brown fox jumps over the lazy dog. ".repeat(40).as_str())
            .unwrap();

        assert!(pages.len() > 1);
        for page in &pages {
            assert!(page.len() <= geometry.max_lines_per_page());
            for line in page.lines() {
                let width = font.measure(line.as_str(), &geometry.body_font).unwrap();
                assert!(width <= geometry.max_text_width(), "{:?} is {}px", line, width);
            }
        }
    }

    #[test]
    fn test_layout_empty_body_has_no_pages() {
        let builder = builder_with(
            FailingExtractor,
            Arc::new(FailingTranslator),
            Arc::new(SlowBrokenImages::default()),
        );
        assert!(builder.layout("").unwrap().is_empty());
    }
}
