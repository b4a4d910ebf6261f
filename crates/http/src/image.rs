//! Image relay: fetches image bytes for the slide composer.

use async_trait::async_trait;
use newsdeck_core::{Error, ImageBytes, ImageSource, Result};
use reqwest::header::CONTENT_TYPE;
use std::time::Duration;

use crate::{build_client, DEFAULT_TIMEOUT};

/// Fetches images directly over HTTP.
pub struct HttpImageRelay {
    client: reqwest::Client,
}

impl HttpImageRelay {
    pub fn new() -> Result<Self> {
        Self::with_timeout(DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(timeout: Duration) -> Result<Self> {
        let client = build_client(timeout).map_err(|e| {
            Error::ImageUnavailable(format!("failed to build HTTP client: {}", e))
        })?;
        Ok(Self { client })
    }
}

#[async_trait]
impl ImageSource for HttpImageRelay {
    async fn fetch(&self, url: &str) -> Result<ImageBytes> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| Error::ImageUnavailable(format!("{}: {}", url, e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::ImageUnavailable(format!(
                "{}: upstream error {}",
                url,
                status.as_u16()
            )));
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("application/octet-stream")
            .to_string();

        let bytes = response
            .bytes()
            .await
            .map_err(|e| Error::ImageUnavailable(format!("{}: {}", url, e)))?;

        Ok(ImageBytes::new(bytes.to_vec(), content_type))
    }
}
