//! Domain model for sales-order composition
//!
//! All types are plain data constructed fresh per invocation from
//! caller-supplied records. The compositor performs no validation of its
//! own: missing or non-numeric fields are the caller's responsibility.

use serde::{Deserialize, Serialize};

/// The selling company, as persisted in its company record
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CompanyProfile {
    /// Legal name
    pub name: String,
    /// Postal address
    pub address: String,
    /// GST registration id
    pub gstin: String,
    /// State name, used for the intra-/inter-state tax split
    pub state: String,
    /// Bank account holder name
    pub bank_account_holder: String,
    /// Bank name
    pub bank_name: String,
    /// Bank account number
    pub bank_account_no: String,
    /// IFSC routing code
    pub bank_ifsc: String,
    /// Company logo image URL
    #[serde(default)]
    pub logo_url: Option<String>,
    /// Page background / watermark image URL
    #[serde(default)]
    pub pdf_background_url: Option<String>,
    /// Payment QR image URL (accepted, not placed by the current layouts)
    #[serde(default)]
    pub payment_qr_url: Option<String>,
    /// Authorized-signature image URL
    #[serde(default)]
    pub authorized_signature_url: Option<String>,
}

/// One priced order line
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrderLineItem {
    /// Product name
    pub name: String,
    /// HSN/SAC tax classification code
    pub hsn_sac: String,
    /// Quantity (positive)
    pub quantity: f64,
    /// Unit rate in rupees
    pub rate: f64,
    /// Unit-of-measure label, e.g. "PCS", "KG"
    pub unit: String,
    /// Per-line discount percentage (0-100)
    pub discount: f64,
    /// Tax rate percentage for the product
    pub tax_rate: f64,
}

impl OrderLineItem {
    /// Rate times quantity, before discount
    pub fn base_amount(&self) -> f64 {
        self.rate * self.quantity
    }

    /// Discount in rupees
    pub fn discount_amount(&self) -> f64 {
        self.base_amount() * (self.discount / 100.0)
    }

    /// The amount printed on the line: base minus discount
    pub fn line_amount(&self) -> f64 {
        self.base_amount() - self.discount_amount()
    }
}

/// A submitted order: customer, freight and line items in entry order
///
/// Item order is preserved and is the invoice row order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrderContext {
    /// Customer name
    pub customer_name: String,
    /// Shipping address (also used as the billing address)
    pub shipping_address: String,
    /// Customer's state name
    pub customer_state: String,
    /// Contact number
    pub contact_number: String,
    /// Customer GSTIN, if registered
    #[serde(default)]
    pub cust_gst_number: Option<String>,
    /// Flat freight addend in rupees, not taxed
    #[serde(default)]
    pub freight_expense: f64,
    /// Line items in entry order
    pub items: Vec<OrderLineItem>,
    /// Explicit voucher number; derived from a timestamp when absent
    #[serde(default)]
    pub voucher_number: Option<String>,
    /// Explicit order date (already formatted); "today" when absent
    #[serde(default)]
    pub order_date: Option<String>,
}

/// The finished document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComposedDocument {
    /// PDF bytes
    pub pdf: Vec<u8>,
    /// Suggested download file name
    pub file_name: String,
}

/// Derive the download file name from the customer name
/// ("SalesOrder_Acme_Traders.pdf")
pub fn sales_order_file_name(customer_name: &str) -> String {
    let joined: Vec<&str> = customer_name.split_whitespace().collect();
    format!("SalesOrder_{}.pdf", joined.join("_"))
}
