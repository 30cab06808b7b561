//! WASM bindings for sopdf
//!
//! This crate provides a JavaScript-friendly API for the sales-order
//! compositor: the hosting SPA pre-fetches the company's image assets,
//! hands them over as byte arrays, and receives the finished PDF as bytes
//! plus a `blob:` object URL ready for `window.open` and persistence.
//!
//! # Example (JavaScript)
//!
//! ```javascript
//! import init, { SalesOrderPdf, GstFormatter } from 'sopdf-wasm';
//!
//! await init();
//!
//! const pdf = new SalesOrderPdf();
//! pdf.setLogo(logoBytes);
//! pdf.setSignature(signatureBytes);
//!
//! const { bytes, fileName, blobUrl } = pdf.compose(company, order);
//! window.open(blobUrl, '_blank');
//! ```

use compositor::{CompanyProfile, Compositor, FetchedAssets, OrderContext, VectorRenderer};
use wasm_bindgen::prelude::*;

// Initialize panic hook for better error messages in browser console
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

/// GST invoice text utilities
#[wasm_bindgen]
pub struct GstFormatter;

#[wasm_bindgen]
impl GstFormatter {
    /// Render a whole-rupee amount as Indian-convention English words
    ///
    /// @param n - Amount in rupees
    /// @returns Words (e.g. "One Lakh")
    #[wasm_bindgen(js_name = numberToWords)]
    pub fn number_to_words(n: u64) -> String {
        gst_text::number_to_words(n)
    }

    /// Format an amount with en-IN digit grouping
    ///
    /// @param n - Amount
    /// @returns Formatted string (e.g. "12,34,567.89")
    #[wasm_bindgen(js_name = formatAmount)]
    pub fn format_amount(n: f64) -> String {
        gst_text::format_amount(n)
    }

    /// Two-digit GST state code for a state name
    ///
    /// @param name - State name
    /// @returns Code string, or undefined for unknown names
    #[wasm_bindgen(js_name = stateCode)]
    pub fn state_code(name: &str) -> Option<String> {
        gst_text::state_code(name).map(|code| code.to_string())
    }

    /// Display-only order summary derived from structured line items
    ///
    /// @param items - Array of line items
    /// @returns One line per item
    #[wasm_bindgen(js_name = orderDetailsDisplay)]
    pub fn order_details_display(items: JsValue) -> Result<String, JsValue> {
        let items: Vec<compositor::OrderLineItem> = serde_wasm_bindgen::from_value(items)?;
        Ok(compositor::order_details_display(&items))
    }
}

/// Sales-order PDF generator
#[wasm_bindgen]
pub struct SalesOrderPdf {
    assets: FetchedAssets,
}

#[wasm_bindgen]
impl SalesOrderPdf {
    /// Create a generator with no image assets
    #[wasm_bindgen(constructor)]
    pub fn new() -> SalesOrderPdf {
        SalesOrderPdf {
            assets: FetchedAssets::default(),
        }
    }

    /// Supply pre-fetched logo bytes
    #[wasm_bindgen(js_name = setLogo)]
    pub fn set_logo(&mut self, data: &[u8]) {
        self.assets.logo = Some(data.to_vec());
    }

    /// Supply pre-fetched watermark/background bytes
    #[wasm_bindgen(js_name = setBackground)]
    pub fn set_background(&mut self, data: &[u8]) {
        self.assets.background = Some(data.to_vec());
    }

    /// Supply pre-fetched payment QR bytes (carried with the company
    /// record; the current layout does not place it)
    #[wasm_bindgen(js_name = setPaymentQr)]
    pub fn set_payment_qr(&mut self, data: &[u8]) {
        self.assets.payment_qr = Some(data.to_vec());
    }

    /// Supply pre-fetched signature bytes
    #[wasm_bindgen(js_name = setSignature)]
    pub fn set_signature(&mut self, data: &[u8]) {
        self.assets.signature = Some(data.to_vec());
    }

    /// Compose the sales order
    ///
    /// @param company - Company profile object
    /// @param order - Order object (customer, items, freight, metadata)
    /// @returns { bytes: Uint8Array, fileName: string, blobUrl: string }
    pub fn compose(&self, company: JsValue, order: JsValue) -> Result<JsValue, JsValue> {
        let company: CompanyProfile = serde_wasm_bindgen::from_value(company)?;
        let order: OrderContext = serde_wasm_bindgen::from_value(order)?;

        let voucher_no = order.voucher_number.clone().unwrap_or_else(|| {
            gst_text::voucher_from_timestamp(js_sys::Date::now() as i64)
        });
        let order_date = order.order_date.clone().unwrap_or_else(today_display);

        let compositor = Compositor::new(VectorRenderer::default());
        let document = compositor
            .compose_prefetched(&company, &order, &self.assets, &voucher_no, &order_date)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        let blob_url = create_blob_url(&document.pdf)?;

        let result = js_sys::Object::new();
        js_sys::Reflect::set(
            &result,
            &"bytes".into(),
            &js_sys::Uint8Array::from(document.pdf.as_slice()).into(),
        )?;
        js_sys::Reflect::set(&result, &"fileName".into(), &document.file_name.into())?;
        js_sys::Reflect::set(&result, &"blobUrl".into(), &blob_url.into())?;
        Ok(result.into())
    }
}

impl Default for SalesOrderPdf {
    fn default() -> Self {
        Self::new()
    }
}

/// Today's date in the document's display format
fn today_display() -> String {
    let now = js_sys::Date::new_0();
    chrono::NaiveDate::from_ymd_opt(
        now.get_full_year() as i32,
        now.get_month() + 1,
        now.get_date(),
    )
    .map(gst_text::format_order_date)
    .unwrap_or_default()
}

/// Mint a `blob:` object URL for the PDF bytes
fn create_blob_url(bytes: &[u8]) -> Result<String, JsValue> {
    let parts = js_sys::Array::new();
    parts.push(&js_sys::Uint8Array::from(bytes).buffer());

    let options = web_sys::BlobPropertyBag::new();
    options.set_type("application/pdf");

    let blob = web_sys::Blob::new_with_u8_array_sequence_and_options(&parts, &options)?;
    web_sys::Url::create_object_url_with_blob(&blob)
}
