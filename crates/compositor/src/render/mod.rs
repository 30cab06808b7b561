//! Layout rendering
//!
//! One rendering contract, two interchangeable backends: [`VectorRenderer`]
//! draws the whole ruled document on a blank A4 page, [`OverlayRenderer`]
//! stamps the same field set onto caller-supplied pre-ruled stationery.

mod overlay;
mod vector;

pub use overlay::{OverlayLayout, OverlayRenderer, Pos};
pub use vector::{VectorLayout, VectorRenderer};

use crate::assets::FetchedAssets;
use crate::model::{CompanyProfile, OrderContext};
use crate::totals::DocumentTotals;
use crate::Result;

/// Everything a renderer needs, resolved and in hand
///
/// All image bytes are already gathered: rendering never suspends.
pub struct RenderInput<'a> {
    pub company: &'a CompanyProfile,
    pub order: &'a OrderContext,
    /// Resolved voucher number (explicit or derived)
    pub voucher_no: &'a str,
    /// Resolved, formatted order date
    pub order_date: &'a str,
    pub totals: &'a DocumentTotals,
    pub assets: &'a FetchedAssets,
}

/// A layout backend: composes the document fields into PDF bytes
pub trait DocumentRenderer {
    fn render(&self, input: &RenderInput<'_>) -> Result<Vec<u8>>;
}
