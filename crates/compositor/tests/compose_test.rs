//! End-to-end composition tests
//!
//! Drive the full pipeline with pre-supplied image bytes and reopen the
//! produced PDFs with lopdf to inspect what was actually rendered.

use compositor::{
    CompanyProfile, Compositor, InMemoryAssetFetcher, OrderContext, OrderLineItem,
    OverlayRenderer, VectorRenderer,
};
use lopdf::dictionary;

fn company() -> CompanyProfile {
    CompanyProfile {
        name: "Acme Traders".to_string(),
        address: "12 MG Road, Pune 411001".to_string(),
        gstin: "27AAAPA1234A1Z5".to_string(),
        state: "Maharashtra".to_string(),
        bank_account_holder: "Acme Traders".to_string(),
        bank_name: "HDFC Bank".to_string(),
        bank_account_no: "50100123456789".to_string(),
        bank_ifsc: "HDFC0000123".to_string(),
        ..Default::default()
    }
}

fn order() -> OrderContext {
    OrderContext {
        customer_name: "Sharma Stores".to_string(),
        shipping_address: "4 Link Road, Andheri West, Mumbai 400053".to_string(),
        customer_state: "Maharashtra".to_string(),
        contact_number: "9876543210".to_string(),
        cust_gst_number: Some("27AABCS1234B1Z3".to_string()),
        freight_expense: 0.0,
        items: vec![OrderLineItem {
            name: "Industrial Widget".to_string(),
            hsn_sac: "8479".to_string(),
            quantity: 2.0,
            rate: 5000.0,
            unit: "PCS".to_string(),
            discount: 20.0,
            tax_rate: 18.0,
        }],
        voucher_number: Some("SO/000123".to_string()),
        order_date: Some("05 Aug 26".to_string()),
    }
}

/// Build a one-page stationery PDF in memory for the overlay backend
fn stationery() -> Vec<u8> {
    let mut doc = lopdf::Document::new();

    let pages_id = doc.new_object_id();
    let contents_id = doc.add_object(lopdf::Object::Stream(lopdf::Stream::new(
        lopdf::dictionary! {},
        b"0 0 0 RG\n0.6 w\n24 24 547 793 re\nS\n".to_vec(),
    )));
    let page_id = doc.add_object(lopdf::Object::Dictionary(lopdf::dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "MediaBox" => vec![0.into(), 0.into(), 595.28.into(), 841.89.into()],
        "Resources" => lopdf::dictionary! {},
        "Contents" => contents_id,
    }));
    doc.objects.insert(
        pages_id,
        lopdf::Object::Dictionary(lopdf::dictionary! {
            "Type" => "Pages",
            "Count" => 1,
            "Kids" => vec![page_id.into()],
        }),
    );
    let catalog_id = doc.add_object(lopdf::Object::Dictionary(lopdf::dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    }));
    doc.trailer.set("Root", catalog_id);

    let mut buffer = Vec::new();
    doc.save_to(&mut buffer).unwrap();
    buffer
}

fn png_bytes() -> Vec<u8> {
    let mut bytes = Vec::new();
    let img = image::RgbaImage::from_pixel(16, 8, image::Rgba([20, 60, 160, 255]));
    image::DynamicImage::ImageRgba8(img)
        .write_to(
            &mut std::io::Cursor::new(&mut bytes),
            image::ImageFormat::Png,
        )
        .unwrap();
    bytes
}

/// Decompressed content of every page stream, concatenated
fn page_content(pdf: &[u8]) -> String {
    let doc = lopdf::Document::load_mem(pdf).unwrap();
    let mut content = Vec::new();
    for (_, page_id) in doc.get_pages() {
        content.extend_from_slice(&doc.get_page_content(page_id).unwrap());
    }
    String::from_utf8_lossy(&content).into_owned()
}

#[tokio::test]
async fn test_vector_compose_produces_loadable_pdf() {
    let compositor = Compositor::new(VectorRenderer::default());
    let fetcher = InMemoryAssetFetcher::new();

    let document = compositor
        .compose(&company(), &order(), &fetcher)
        .await
        .unwrap();

    assert_eq!(document.file_name, "SalesOrder_Sharma_Stores.pdf");
    let reloaded = lopdf::Document::load_mem(&document.pdf).unwrap();
    assert_eq!(reloaded.get_pages().len(), 1);
}

#[tokio::test]
async fn test_vector_document_carries_expected_fields() {
    let compositor = Compositor::new(VectorRenderer::default());
    let fetcher = InMemoryAssetFetcher::new();

    let document = compositor
        .compose(&company(), &order(), &fetcher)
        .await
        .unwrap();
    let content = page_content(&document.pdf);

    assert!(content.contains("(SALES ORDER) Tj"));
    assert!(content.contains("(Acme Traders) Tj"));
    assert!(content.contains("(Sharma Stores) Tj"));
    assert!(content.contains("(SO/000123) Tj"));
    assert!(content.contains("(05 Aug 26) Tj"));
    // Intra-state: equal CGST and SGST halves on the pooled amount
    assert!(content.contains("(OUTPUT CGST 9.00%) Tj"));
    assert!(content.contains("(OUTPUT SGST 9.00%) Tj"));
    assert!(content.contains("(720.00) Tj"));
    assert!(content.contains("(8,000.00) Tj"));
    assert!(content.contains("(Round Off) Tj"));
    assert!(content.contains("(Rs. 9,440.00) Tj"));
    assert!(content.contains("(INR Nine Thousand Four Hundred Forty Only) Tj"));
    assert!(content.contains("(This is a Computer Generated Document) Tj"));
    // State-code annotation from the fixed table
    assert!(content.contains("(Maharashtra, Code : 27) Tj"));
}

#[tokio::test]
async fn test_inter_state_renders_igst() {
    let mut inter_company = company();
    inter_company.state = "Delhi".to_string();
    let mut inter_order = order();
    inter_order.freight_expense = 500.0;

    let compositor = Compositor::new(VectorRenderer::default());
    let fetcher = InMemoryAssetFetcher::new();
    let document = compositor
        .compose(&inter_company, &inter_order, &fetcher)
        .await
        .unwrap();
    let content = page_content(&document.pdf);

    assert!(content.contains("(OUTPUT IGST 18%) Tj"));
    assert!(!content.contains("CGST"));
    assert!(content.contains("(Freight Expense) Tj"));
    assert!(content.contains("(Rs. 9,940.00) Tj"));
}

#[tokio::test]
async fn test_zero_tax_rate_emits_no_tax_row() {
    let mut zero_order = order();
    zero_order.items[0].tax_rate = 0.0;

    let compositor = Compositor::new(VectorRenderer::default());
    let fetcher = InMemoryAssetFetcher::new();
    let document = compositor
        .compose(&company(), &zero_order, &fetcher)
        .await
        .unwrap();
    let content = page_content(&document.pdf);

    assert!(!content.contains("CGST"));
    assert!(!content.contains("IGST"));
    assert!(content.contains("(Rs. 8,000.00) Tj"));
}

#[tokio::test]
async fn test_compose_is_idempotent_with_explicit_metadata() {
    let compositor = Compositor::new(VectorRenderer::default());
    let fetcher = InMemoryAssetFetcher::new();

    let first = compositor
        .compose(&company(), &order(), &fetcher)
        .await
        .unwrap();
    let second = compositor
        .compose(&company(), &order(), &fetcher)
        .await
        .unwrap();

    // Explicit voucher and date: the rendered field set is identical
    assert_eq!(page_content(&first.pdf), page_content(&second.pdf));
}

#[tokio::test]
async fn test_images_are_embedded_when_available() {
    let mut with_assets = company();
    with_assets.logo_url = Some("mem://logo".to_string());
    with_assets.pdf_background_url = Some("mem://bg".to_string());
    with_assets.authorized_signature_url = Some("mem://sig".to_string());

    let mut fetcher = InMemoryAssetFetcher::new();
    fetcher.insert("mem://logo", png_bytes());
    fetcher.insert("mem://bg", png_bytes());
    fetcher.insert("mem://sig", png_bytes());

    let compositor = Compositor::new(VectorRenderer::default());
    let document = compositor
        .compose(&with_assets, &order(), &fetcher)
        .await
        .unwrap();
    let content = page_content(&document.pdf);

    assert!(content.contains("/Im1 Do"));
    // Watermark sits under a transparency graphics state
    assert!(content.contains("/GS1 gs"));
}

#[tokio::test]
async fn test_failed_image_fetch_degrades_to_blank() {
    let mut with_assets = company();
    with_assets.logo_url = Some("mem://logo".to_string());

    // Fetcher has no bytes for the URL: render proceeds without the logo
    let fetcher = InMemoryAssetFetcher::new();
    let compositor = Compositor::new(VectorRenderer::default());
    let document = compositor
        .compose(&with_assets, &order(), &fetcher)
        .await
        .unwrap();

    let content = page_content(&document.pdf);
    assert!(!content.contains("/Im1 Do"));
    assert!(content.contains("(SALES ORDER) Tj"));
}

#[tokio::test]
async fn test_corrupt_image_bytes_degrade_to_blank() {
    let mut with_assets = company();
    with_assets.logo_url = Some("mem://logo".to_string());

    let mut fetcher = InMemoryAssetFetcher::new();
    fetcher.insert("mem://logo", vec![0xDE, 0xAD, 0xBE, 0xEF, 0, 0, 0, 0]);

    let compositor = Compositor::new(VectorRenderer::default());
    let document = compositor
        .compose(&with_assets, &order(), &fetcher)
        .await
        .unwrap();

    let content = page_content(&document.pdf);
    assert!(!content.contains("/Im1 Do"));
}

#[tokio::test]
async fn test_overlay_stamps_onto_stationery() {
    let compositor = Compositor::new(OverlayRenderer::new(stationery()));
    let fetcher = InMemoryAssetFetcher::new();

    let document = compositor
        .compose(&company(), &order(), &fetcher)
        .await
        .unwrap();
    let content = page_content(&document.pdf);

    // The stationery's own ruling survives under the stamped values
    assert!(content.contains("24 24 547 793 re"));
    assert!(content.contains("(Acme Traders) Tj"));
    assert!(content.contains("(SO/000123) Tj"));
    assert!(content.contains("(OUTPUT CGST 9.00%) Tj"));
    assert!(content.contains("(INR Nine Thousand Four Hundred Forty Only) Tj"));
}

#[tokio::test]
async fn test_overlay_rejects_invalid_template() {
    let compositor = Compositor::new(OverlayRenderer::new(b"not a pdf".to_vec()));
    let fetcher = InMemoryAssetFetcher::new();

    // A broken template is a rendering failure: fatal for the invocation
    let result = compositor.compose(&company(), &order(), &fetcher).await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_default_voucher_and_date_are_filled() {
    let mut defaulted = order();
    defaulted.voucher_number = None;
    defaulted.order_date = None;

    let compositor = Compositor::new(VectorRenderer::default());
    let fetcher = InMemoryAssetFetcher::new();
    let document = compositor
        .compose(&company(), &defaulted, &fetcher)
        .await
        .unwrap();

    let content = page_content(&document.pdf);
    // The derived voucher keeps the "SO/" prefix
    assert!(content.contains("(SO/"));
}
