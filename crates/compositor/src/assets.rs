//! Asset gathering
//!
//! The four optional company images (logo, background, payment QR,
//! signature) are fetched concurrently before layout starts, so added
//! latency is bounded by the slowest single fetch. Every fetch failure
//! degrades to an absent image; nothing here is fatal to the render.

use crate::model::CompanyProfile;
use crate::ComposeError;
use async_trait::async_trait;
use log::warn;
use std::collections::HashMap;

/// Fetches raw image bytes for an asset URL
#[async_trait]
pub trait AssetFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, ComposeError>;
}

/// HTTP asset fetcher over reqwest
#[cfg(not(target_arch = "wasm32"))]
pub struct HttpAssetFetcher {
    client: reqwest::Client,
}

#[cfg(not(target_arch = "wasm32"))]
impl HttpAssetFetcher {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl Default for HttpAssetFetcher {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(not(target_arch = "wasm32"))]
#[async_trait]
impl AssetFetcher for HttpAssetFetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, ComposeError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| ComposeError::AssetFetch(e.to_string()))?;

        let bytes = response
            .bytes()
            .await
            .map_err(|e| ComposeError::AssetFetch(e.to_string()))?;

        Ok(bytes.to_vec())
    }
}

/// Asset fetcher backed by a URL -> bytes map
///
/// Used by tests and by callers that already hold the image bytes (the
/// browser front end pre-fetches them).
#[derive(Debug, Clone, Default)]
pub struct InMemoryAssetFetcher {
    entries: HashMap<String, Vec<u8>>,
}

impl InMemoryAssetFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register bytes for a URL
    pub fn insert(&mut self, url: impl Into<String>, bytes: Vec<u8>) {
        self.entries.insert(url.into(), bytes);
    }
}

#[async_trait]
impl AssetFetcher for InMemoryAssetFetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, ComposeError> {
        self.entries
            .get(url)
            .cloned()
            .ok_or_else(|| ComposeError::AssetFetch(format!("no bytes for {url}")))
    }
}

/// The gathered image bytes for one composition
#[derive(Debug, Clone, Default)]
pub struct FetchedAssets {
    /// Company logo
    pub logo: Option<Vec<u8>>,
    /// Page background / watermark
    pub background: Option<Vec<u8>>,
    /// Payment QR (carried, not placed by the current layouts)
    pub payment_qr: Option<Vec<u8>>,
    /// Authorized signature
    pub signature: Option<Vec<u8>>,
}

impl FetchedAssets {
    /// Fetch all of a company's asset URLs concurrently.
    ///
    /// Each slot resolves to `None` when the URL is absent or the fetch
    /// fails; failures are logged and swallowed.
    pub async fn gather(company: &CompanyProfile, fetcher: &dyn AssetFetcher) -> Self {
        let (logo, background, payment_qr, signature) = futures::join!(
            fetch_optional(fetcher, company.logo_url.as_deref(), "logo"),
            fetch_optional(fetcher, company.pdf_background_url.as_deref(), "background"),
            fetch_optional(fetcher, company.payment_qr_url.as_deref(), "payment QR"),
            fetch_optional(
                fetcher,
                company.authorized_signature_url.as_deref(),
                "signature"
            ),
        );

        Self {
            logo,
            background,
            payment_qr,
            signature,
        }
    }
}

async fn fetch_optional(
    fetcher: &dyn AssetFetcher,
    url: Option<&str>,
    what: &str,
) -> Option<Vec<u8>> {
    let url = url?;
    match fetcher.fetch(url).await {
        Ok(bytes) => Some(bytes),
        Err(e) => {
            warn!("{what} image unavailable, rendering without it: {e}");
            None
        }
    }
}
