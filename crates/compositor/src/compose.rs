//! Composition entry point

use crate::assets::{AssetFetcher, FetchedAssets};
use crate::model::{sales_order_file_name, CompanyProfile, ComposedDocument, OrderContext};
use crate::render::{DocumentRenderer, RenderInput};
use crate::totals::DocumentTotals;
use crate::Result;
use chrono::{Local, Utc};
use gst_text::{format_order_date, voucher_from_timestamp};
use log::{debug, warn};

/// One-shot document compositor over a layout backend
///
/// Each call is independent and idempotent given identical inputs and an
/// explicit voucher number and order date (the defaults are time-derived).
/// Rendering failures are fatal for the invocation; the caller re-invokes.
pub struct Compositor<R: DocumentRenderer> {
    renderer: R,
}

impl<R: DocumentRenderer> Compositor<R> {
    pub fn new(renderer: R) -> Self {
        Self { renderer }
    }

    /// Gather assets, compute totals and render the document.
    ///
    /// Image fetches run concurrently and fail soft; everything after the
    /// join is synchronous.
    pub async fn compose(
        &self,
        company: &CompanyProfile,
        order: &OrderContext,
        fetcher: &dyn AssetFetcher,
    ) -> Result<ComposedDocument> {
        let assets = FetchedAssets::gather(company, fetcher).await;

        let voucher_no = order
            .voucher_number
            .clone()
            .unwrap_or_else(|| voucher_from_timestamp(Utc::now().timestamp_millis()));
        let order_date = order
            .order_date
            .clone()
            .unwrap_or_else(|| format_order_date(Local::now().date_naive()));

        self.compose_prefetched(company, order, &assets, &voucher_no, &order_date)
    }

    /// Compose with pre-gathered image bytes and resolved metadata.
    ///
    /// This is the synchronous tail of [`compose`](Self::compose); callers
    /// that already hold the image bytes (tests, the browser front end)
    /// enter here.
    pub fn compose_prefetched(
        &self,
        company: &CompanyProfile,
        order: &OrderContext,
        assets: &FetchedAssets,
        voucher_no: &str,
        order_date: &str,
    ) -> Result<ComposedDocument> {
        let totals = DocumentTotals::compute(
            &company.state,
            &order.customer_state,
            &order.items,
            order.freight_expense,
        );

        if totals.mixed_units {
            warn!(
                "order {voucher_no}: line items carry differing units; \
                 total quantity sums across them"
            );
        }
        debug!(
            "order {voucher_no}: sub_total={} total_tax={} grand_total={}",
            totals.sub_total, totals.total_tax, totals.grand_total
        );

        let input = RenderInput {
            company,
            order,
            voucher_no,
            order_date,
            totals: &totals,
            assets,
        };

        let pdf = self.renderer.render(&input)?;

        Ok(ComposedDocument {
            pdf,
            file_name: sales_order_file_name(&order.customer_name),
        })
    }
}
