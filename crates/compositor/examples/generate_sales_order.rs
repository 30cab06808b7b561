//! Generate a sample sales order PDF
//!
//! Run with: cargo run --example generate_sales_order

use compositor::{
    CompanyProfile, Compositor, InMemoryAssetFetcher, OrderContext, OrderLineItem, VectorRenderer,
};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let company = CompanyProfile {
        name: "Acme Traders".to_string(),
        address: "12 MG Road, Pune 411001".to_string(),
        gstin: "27AAAPA1234A1Z5".to_string(),
        state: "Maharashtra".to_string(),
        bank_account_holder: "Acme Traders".to_string(),
        bank_name: "HDFC Bank".to_string(),
        bank_account_no: "50100123456789".to_string(),
        bank_ifsc: "HDFC0000123".to_string(),
        ..Default::default()
    };

    let order = OrderContext {
        customer_name: "Sharma Stores".to_string(),
        shipping_address: "4 Link Road, Andheri West, Mumbai 400053".to_string(),
        customer_state: "Maharashtra".to_string(),
        contact_number: "9876543210".to_string(),
        cust_gst_number: Some("27AABCS1234B1Z3".to_string()),
        freight_expense: 500.0,
        items: vec![
            OrderLineItem {
                name: "Industrial Widget".to_string(),
                hsn_sac: "8479".to_string(),
                quantity: 2.0,
                rate: 5000.0,
                unit: "PCS".to_string(),
                discount: 20.0,
                tax_rate: 18.0,
            },
            OrderLineItem {
                name: "Mounting Bracket Set".to_string(),
                hsn_sac: "7326".to_string(),
                quantity: 10.0,
                rate: 240.0,
                unit: "PCS".to_string(),
                discount: 0.0,
                tax_rate: 12.0,
            },
        ],
        voucher_number: None,
        order_date: None,
    };

    let compositor = Compositor::new(VectorRenderer::default());
    let fetcher = InMemoryAssetFetcher::new();

    let document = compositor.compose(&company, &order, &fetcher).await?;
    std::fs::write(&document.file_name, &document.pdf)?;
    println!("wrote {} ({} bytes)", document.file_name, document.pdf.len());

    Ok(())
}
