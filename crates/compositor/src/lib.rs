//! Compositor - sales-order document generation
//!
//! This crate turns a company profile, a customer order and a list of priced
//! line items into a tax-correct GST sales-order PDF. It is organised as
//! three stages:
//!
//! 1. Tax & totals calculation ([`DocumentTotals`]) - pure arithmetic
//! 2. Asset gathering ([`FetchedAssets`]) - concurrent, fail-soft image
//!    fetching via an [`AssetFetcher`]
//! 3. Layout rendering ([`DocumentRenderer`]) - either drawn from scratch
//!    ([`VectorRenderer`]) or stamped onto pre-ruled stationery
//!    ([`OverlayRenderer`])
//!
//! The compositor holds no state between calls and never mutates its
//! inputs; callers validate fields upstream.
//!
//! # Example
//!
//! ```ignore
//! use compositor::{Compositor, HttpAssetFetcher, VectorRenderer};
//!
//! let compositor = Compositor::new(VectorRenderer::default());
//! let fetcher = HttpAssetFetcher::new();
//! let document = compositor.compose(&company, &order, &fetcher).await?;
//! std::fs::write(&document.file_name, &document.pdf)?;
//! ```

mod assets;
mod compose;
mod details;
mod model;
mod render;
mod totals;

pub use assets::{AssetFetcher, FetchedAssets, InMemoryAssetFetcher};
#[cfg(not(target_arch = "wasm32"))]
pub use assets::HttpAssetFetcher;
pub use compose::Compositor;
pub use details::order_details_display;
pub use model::{CompanyProfile, ComposedDocument, OrderContext, OrderLineItem};
pub use render::{
    DocumentRenderer, OverlayLayout, OverlayRenderer, Pos, RenderInput, VectorLayout,
    VectorRenderer,
};
pub use totals::{DocumentTotals, TaxLine};

use thiserror::Error;

/// Errors that can occur while composing a document
#[derive(Debug, Error)]
pub enum ComposeError {
    #[error("Asset fetch failed: {0}")]
    AssetFetch(String),

    #[error("Render error: {0}")]
    Render(String),

    #[error("PDF error: {0}")]
    Pdf(#[from] pdf_core::PdfError),
}

/// Result type for compositor operations
pub type Result<T> = std::result::Result<T, ComposeError>;
