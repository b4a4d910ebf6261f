//! HTTP implementations of the deck builder's collaborators: article
//! extraction, Google Cloud translation and image relaying.

pub mod extract;
pub mod image;
pub mod translate;

pub use extract::{parse_article, HttpArticleExtractor};
pub use image::HttpImageRelay;
pub use translate::GoogleTranslator;

use std::time::Duration;

/// Browser User-Agent sent with page and image requests; some news sites
/// refuse unknown clients.
pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                              (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Default timeout for a single collaborator request.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Build a client that follows redirects and identifies as a browser.
pub(crate) fn build_client(timeout: Duration) -> reqwest::Result<reqwest::Client> {
    reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .redirect(reqwest::redirect::Policy::limited(10))
        .timeout(timeout)
        .build()
}
