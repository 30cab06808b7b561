//! Template-overlay renderer
//!
//! Stamps the document's dynamic values at fixed coordinates onto a
//! caller-supplied pre-ruled stationery PDF (captions and table rules are
//! already printed on the template). Satisfies the same contract as the
//! vector backend and is swappable with it.

use crate::render::{DocumentRenderer, RenderInput};
use crate::Result;
use gst_text::{format_amount, format_plain, state_code};
use log::warn;
use pdf_core::{simple_word_wrap, Align, BuiltinFont, Font, ImageScaleMode, PdfDocument};
use serde::{Deserialize, Serialize};

const REGULAR: Font = Font::Builtin(BuiltinFont::Helvetica);
const BOLD: Font = Font::Builtin(BuiltinFont::HelveticaBold);

/// A stamp position in points, top-origin
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Pos {
    pub x: f64,
    pub y: f64,
}

impl Pos {
    fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Field coordinates on the stationery
///
/// Defaults fit an A4 sheet ruled like the drawn layout of the vector
/// backend; callers with their own stationery supply their own map
/// (deserialized from the template's sidecar JSON).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OverlayLayout {
    pub company_block: Pos,
    pub voucher_no: Pos,
    pub order_date: Pos,
    pub consignee_block: Pos,
    pub buyer_block: Pos,
    /// Top of the first item row
    pub items_top: f64,
    /// Vertical pitch between item rows
    pub row_pitch: f64,
    /// X anchors of the nine item columns (serial, name, hsn, due, qty,
    /// rate, per, disc, amount); amount-bearing columns are right-aligned
    pub columns: [f64; 9],
    /// Right-aligned label anchor for the summary rows
    pub summary_label_x: f64,
    pub amount_in_words: Pos,
    pub bank_block: Pos,
    pub signature_block: Pos,
    pub logo: Pos,
    /// Display widths for the stamped images
    pub logo_width: f64,
    pub signature_width: f64,
    /// Line height for multi-line blocks
    pub line_height: f64,
}

impl Default for OverlayLayout {
    fn default() -> Self {
        Self {
            company_block: Pos::new(88.0, 60.0),
            voucher_no: Pos::new(460.0, 56.0),
            order_date: Pos::new(460.0, 69.0),
            consignee_block: Pos::new(28.0, 170.0),
            buyer_block: Pos::new(302.0, 170.0),
            items_top: 262.0,
            row_pitch: 18.0,
            columns: [37.0, 54.0, 220.0, 268.0, 380.0, 436.0, 444.0, 502.0, 567.0],
            summary_label_x: 495.0,
            amount_in_words: Pos::new(100.0, 700.0),
            bank_block: Pos::new(28.0, 730.0),
            signature_block: Pos::new(567.0, 730.0),
            logo: Pos::new(28.0, 52.0),
            logo_width: 52.0,
            signature_width: 90.0,
            line_height: 10.0,
        }
    }
}

/// Renderer that stamps onto existing stationery bytes
#[derive(Debug, Clone)]
pub struct OverlayRenderer {
    template: Vec<u8>,
    layout: OverlayLayout,
}

impl OverlayRenderer {
    /// Create a renderer for a stationery PDF with the default field map
    pub fn new(template: Vec<u8>) -> Self {
        Self {
            template,
            layout: OverlayLayout::default(),
        }
    }

    /// Override the field coordinate map
    pub fn with_layout(mut self, layout: OverlayLayout) -> Self {
        self.layout = layout;
        self
    }
}

impl DocumentRenderer for OverlayRenderer {
    fn render(&self, input: &RenderInput<'_>) -> Result<Vec<u8>> {
        let mut doc = PdfDocument::open_from_bytes(&self.template)?;
        let layout = &self.layout;
        let totals = input.totals;

        // Company identity
        if let Some(logo) = &input.assets.logo {
            if let Err(e) = doc.insert_image_scaled(
                logo,
                1,
                layout.logo.x,
                layout.logo.y,
                layout.logo_width,
                layout.logo_width,
                ImageScaleMode::FitWidth,
            ) {
                warn!("logo image skipped: {e}");
            }
        }

        let company = input.company;
        let mut y = layout.company_block.y;
        doc.set_font(BOLD, 11.0)?;
        doc.insert_text(&company.name, 1, layout.company_block.x, y, Align::Left)?;
        y += 12.0;
        doc.set_font(REGULAR, 8.0)?;
        for line in simple_word_wrap(&company.address, 52) {
            doc.insert_text(&line, 1, layout.company_block.x, y, Align::Left)?;
            y += layout.line_height;
        }
        doc.insert_text(&company.gstin, 1, layout.company_block.x, y, Align::Left)?;
        y += layout.line_height;
        doc.insert_text(
            &annotate_state(&company.state),
            1,
            layout.company_block.x,
            y,
            Align::Left,
        )?;

        // Voucher metadata
        doc.set_font(BOLD, 8.0)?;
        doc.insert_text(input.voucher_no, 1, layout.voucher_no.x, layout.voucher_no.y, Align::Left)?;
        doc.insert_text(input.order_date, 1, layout.order_date.x, layout.order_date.y, Align::Left)?;

        // Party blocks, both filled from the single customer
        for block in [layout.consignee_block, layout.buyer_block] {
            self.stamp_party(&mut doc, input, block)?;
        }

        // Item rows
        let mut row_y = layout.items_top;
        for (index, item) in input.order.items.iter().enumerate() {
            let cols = &layout.columns;
            doc.set_font(REGULAR, 8.0)?;
            doc.insert_text(&(index + 1).to_string(), 1, cols[0], row_y, Align::Center)?;
            doc.insert_text(&item.hsn_sac, 1, cols[2], row_y, Align::Left)?;
            doc.insert_text(input.order_date, 1, cols[3], row_y, Align::Left)?;
            doc.insert_text(
                &format!("{:.2} {}", item.quantity, item.unit),
                1,
                cols[4],
                row_y,
                Align::Right,
            )?;
            doc.insert_text(&format_amount(item.rate), 1, cols[5], row_y, Align::Right)?;
            doc.insert_text(&item.unit, 1, cols[6], row_y, Align::Left)?;
            doc.insert_text(&format_plain(item.discount), 1, cols[7], row_y, Align::Right)?;
            doc.set_font(BOLD, 8.0)?;
            doc.insert_text(&item.name, 1, cols[1], row_y, Align::Left)?;
            doc.insert_text(
                &format_amount(item.line_amount()),
                1,
                cols[8],
                row_y,
                Align::Right,
            )?;
            row_y += layout.row_pitch;
        }

        // Summary rows follow the items at the same pitch
        let amount_x = layout.columns[8];
        let mut summary: Vec<(String, String)> = Vec::new();
        summary.push(("Sub Total".to_string(), format_amount(totals.sub_total)));
        if totals.freight_expense > 0.0 {
            summary.push((
                "Freight Expense".to_string(),
                format_amount(totals.freight_expense),
            ));
        }
        for tax_line in &totals.tax_lines {
            summary.push((tax_line.label.clone(), format_amount(tax_line.amount)));
        }
        summary.push(("Round Off".to_string(), format_plain(totals.round_off)));

        doc.set_font(BOLD, 8.0)?;
        for (label, value) in summary {
            doc.insert_text(&label, 1, layout.summary_label_x, row_y, Align::Right)?;
            doc.insert_text(&value, 1, amount_x, row_y, Align::Right)?;
            row_y += layout.row_pitch;
        }

        // Total row
        let default_unit = input
            .order
            .items
            .first()
            .map(|item| item.unit.as_str())
            .unwrap_or("Box");
        doc.set_font(BOLD, 9.0)?;
        doc.insert_text(
            &format!("{:.2} {}", totals.total_quantity, default_unit),
            1,
            layout.columns[4],
            row_y,
            Align::Right,
        )?;
        doc.insert_text(
            &format!("Rs. {}", format_amount(totals.grand_total)),
            1,
            amount_x,
            row_y,
            Align::Right,
        )?;

        // Amount in words
        doc.set_font(BOLD, 9.0)?;
        doc.insert_text(
            &totals.amount_in_words,
            1,
            layout.amount_in_words.x,
            layout.amount_in_words.y,
            Align::Left,
        )?;

        // Bank values
        doc.set_font(BOLD, 8.0)?;
        let mut bank_y = layout.bank_block.y;
        for value in [
            company.bank_account_holder.as_str(),
            company.bank_name.as_str(),
            company.bank_account_no.as_str(),
            company.bank_ifsc.as_str(),
        ] {
            doc.insert_text(value, 1, layout.bank_block.x, bank_y, Align::Left)?;
            bank_y += layout.line_height;
        }

        // Signature block
        doc.insert_text(
            &format!("for {}", company.name),
            1,
            layout.signature_block.x,
            layout.signature_block.y,
            Align::Right,
        )?;
        if let Some(signature) = &input.assets.signature {
            if let Err(e) = doc.insert_image_scaled(
                signature,
                1,
                layout.signature_block.x - layout.signature_width,
                layout.signature_block.y + 5.0,
                layout.signature_width,
                36.0,
                ImageScaleMode::FitBox,
            ) {
                warn!("signature image skipped: {e}");
            }
        }
        doc.set_font(REGULAR, 8.0)?;
        doc.insert_text(
            "Authorised Signatory",
            1,
            layout.signature_block.x,
            layout.signature_block.y + 47.0,
            Align::Right,
        )?;

        Ok(doc.to_bytes()?)
    }
}

impl OverlayRenderer {
    fn stamp_party(
        &self,
        doc: &mut PdfDocument,
        input: &RenderInput<'_>,
        block: Pos,
    ) -> Result<()> {
        let order = input.order;
        let mut y = block.y;

        doc.set_font(BOLD, 10.0)?;
        doc.insert_text(&order.customer_name, 1, block.x, y, Align::Left)?;
        y += 11.0;

        doc.set_font(REGULAR, 8.0)?;
        for line in simple_word_wrap(&order.shipping_address, 48) {
            doc.insert_text(&line, 1, block.x, y, Align::Left)?;
            y += self.layout.line_height;
        }
        doc.insert_text(
            &annotate_state(&order.customer_state),
            1,
            block.x,
            y,
            Align::Left,
        )?;
        y += self.layout.line_height;
        doc.insert_text(&order.contact_number, 1, block.x, y, Align::Left)?;
        if let Some(gstin) = &order.cust_gst_number {
            y += self.layout.line_height;
            doc.insert_text(gstin, 1, block.x, y, Align::Left)?;
        }

        Ok(())
    }
}

/// "Maharashtra, Code : 27" — the code suffix is omitted for unknown states
fn annotate_state(state: &str) -> String {
    match state_code(state) {
        Some(code) => format!("{}, Code : {}", state, code),
        None => state.to_string(),
    }
}
