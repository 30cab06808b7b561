//! Vector-drawing renderer
//!
//! Draws the complete ruled sales order on a blank A4 page: header grid,
//! party blocks, the itemized table with its summary rows, amount in
//! words, bank details and signature, and the footer caption.

use crate::render::{DocumentRenderer, RenderInput};
use crate::totals::DocumentTotals;
use crate::Result;
use gst_text::{format_amount, format_plain, state_code};
use log::warn;
use pdf_core::{
    simple_word_wrap, Align, BuiltinFont, Font, ImageScaleMode, PdfDocument, A4_WIDTH,
};
use serde::{Deserialize, Serialize};

const REGULAR: Font = Font::Builtin(BuiltinFont::Helvetica);
const BOLD: Font = Font::Builtin(BuiltinFont::HelveticaBold);

/// Line height for 8pt body text
const LINE: f64 = 10.0;
/// Stroke width of all table rules
const RULE: f64 = 0.6;

/// Tunable layout values for the vector backend
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VectorLayout {
    /// Page margin in points
    pub margin: f64,
    /// Logo display width in points
    pub logo_width: f64,
    /// Signature display width in points
    pub signature_width: f64,
    /// Watermark display width in points
    pub watermark_width: f64,
    /// Watermark opacity (0.0 - 1.0)
    pub watermark_alpha: f64,
}

impl Default for VectorLayout {
    fn default() -> Self {
        Self {
            margin: 24.0,
            logo_width: 52.0,
            signature_width: 90.0,
            watermark_width: 300.0,
            watermark_alpha: 0.08,
        }
    }
}

/// Renderer that draws the document from scratch
#[derive(Debug, Clone, Default)]
pub struct VectorRenderer {
    layout: VectorLayout,
    /// Optional Unicode font for the grand-total figure; when it covers
    /// U+20B9 the rupee sign is used, otherwise "Rs."
    currency_font: Option<Vec<u8>>,
}

impl VectorRenderer {
    pub fn new(layout: VectorLayout) -> Self {
        Self {
            layout,
            currency_font: None,
        }
    }

    /// Supply a TrueType font used for the grand-total figure so the
    /// rupee sign can be typeset (built-in Helvetica has no U+20B9).
    pub fn with_currency_font(mut self, ttf_data: Vec<u8>) -> Self {
        self.currency_font = Some(ttf_data);
        self
    }

    fn content_width(&self) -> f64 {
        A4_WIDTH - 2.0 * self.layout.margin
    }

    fn right_edge(&self) -> f64 {
        A4_WIDTH - self.layout.margin
    }
}

impl DocumentRenderer for VectorRenderer {
    fn render(&self, input: &RenderInput<'_>) -> Result<Vec<u8>> {
        let mut doc = PdfDocument::new_a4();

        let currency_font = self.register_currency_font(&mut doc);

        // The watermark is drawn first so all text sits above it
        if let Some(background) = &input.assets.background {
            if let Err(e) = doc.insert_watermark(
                background,
                1,
                self.layout.watermark_width,
                self.layout.watermark_alpha,
            ) {
                warn!("background image skipped: {e}");
            }
        }

        let mut y = self.draw_title(&mut doc, input)?;
        y = self.draw_header_box(&mut doc, input, y)?;
        y = self.draw_party_blocks(&mut doc, input, y)?;
        y = self.draw_items_table(&mut doc, input, y, currency_font.as_ref())?;
        y = self.draw_words_box(&mut doc, input.totals, y)?;
        y = self.draw_bank_and_signature(&mut doc, input, y)?;
        self.draw_footer_caption(&mut doc, y)?;

        Ok(doc.to_bytes()?)
    }
}

impl VectorRenderer {
    fn register_currency_font(&self, doc: &mut PdfDocument) -> Option<Font> {
        let bytes = self.currency_font.as_ref()?;
        match doc.register_font("currency", bytes) {
            Ok(()) => Some(Font::Embedded("currency".to_string())),
            Err(e) => {
                warn!("currency font unusable, falling back to Helvetica: {e}");
                None
            }
        }
    }

    fn draw_title(&self, doc: &mut PdfDocument, _input: &RenderInput<'_>) -> Result<f64> {
        doc.set_font(BOLD, 14.0)?;
        doc.insert_text("SALES ORDER", 1, A4_WIDTH / 2.0, 38.0, Align::Center)?;
        Ok(46.0)
    }

    /// Company block on the left, voucher metadata grid on the right
    fn draw_header_box(
        &self,
        doc: &mut PdfDocument,
        input: &RenderInput<'_>,
        y: f64,
    ) -> Result<f64> {
        let margin = self.layout.margin;
        let left_width = self.content_width() * 0.55;
        let right_x = margin + left_width;

        // Left cell: logo and company identity
        let mut text_x = margin + 4.0;
        if let Some(logo) = &input.assets.logo {
            match doc.insert_image_scaled(
                logo,
                1,
                text_x,
                y + 6.0,
                self.layout.logo_width,
                self.layout.logo_width,
                ImageScaleMode::FitWidth,
            ) {
                Ok(()) => text_x += self.layout.logo_width + 8.0,
                Err(e) => warn!("logo image skipped: {e}"),
            }
        }

        let mut line_y = y + 14.0;
        doc.set_font(BOLD, 11.0)?;
        doc.insert_text(&input.company.name, 1, text_x, line_y, Align::Left)?;
        line_y += 12.0;

        doc.set_font(REGULAR, 8.0)?;
        for line in simple_word_wrap(&input.company.address, 52) {
            doc.insert_text(&line, 1, text_x, line_y, Align::Left)?;
            line_y += LINE;
        }

        self.bold_label(doc, text_x, line_y, "GSTIN/UIN:", &input.company.gstin)?;
        line_y += LINE;
        self.bold_label(
            doc,
            text_x,
            line_y,
            "State Name:",
            &annotate_state(&input.company.state),
        )?;
        line_y += LINE;

        // Right cell: voucher metadata rows
        let rows: [(&str, &str); 8] = [
            ("Voucher No.", input.voucher_no),
            ("Dated", input.order_date),
            ("Buyer's Ref./Order No.", input.voucher_no),
            ("Mode/Terms of Payment", ""),
            ("Other References", ""),
            ("Dispatched through", ""),
            ("Destination", ""),
            ("Terms of Delivery", ""),
        ];

        let row_height = 13.0;
        let value_x = right_x + (self.right_edge() - right_x) * 0.55;
        let mut row_y = y;
        for (label, value) in rows {
            doc.set_font(REGULAR, 8.0)?;
            doc.insert_text(label, 1, right_x + 4.0, row_y + 9.5, Align::Left)?;
            if !value.is_empty() {
                doc.set_font(BOLD, 8.0)?;
                doc.insert_text(value, 1, value_x + 4.0, row_y + 9.5, Align::Left)?;
            }
            row_y += row_height;
            doc.draw_line(1, right_x, row_y, self.right_edge(), row_y, RULE)?;
        }

        let box_height = (line_y - y + 4.0).max(rows.len() as f64 * row_height);

        doc.draw_rect(1, margin, y, self.content_width(), box_height, RULE)?;
        doc.draw_line(1, right_x, y, right_x, y + box_height, RULE)?;
        doc.draw_line(1, value_x, y, value_x, y + rows.len() as f64 * row_height, RULE)?;

        Ok(y + box_height + 5.0)
    }

    /// The twin Consignee (Ship to) / Buyer (Bill to) blocks, both filled
    /// from the single customer of the order
    fn draw_party_blocks(
        &self,
        doc: &mut PdfDocument,
        input: &RenderInput<'_>,
        y: f64,
    ) -> Result<f64> {
        let margin = self.layout.margin;
        let cell_width = self.content_width() / 2.0;
        let order = input.order;

        let address_lines = simple_word_wrap(&order.shipping_address, 48);
        let gst_lines = if order.cust_gst_number.is_some() { 1 } else { 0 };
        let box_height = 34.0 + (address_lines.len() + 2 + gst_lines) as f64 * LINE;

        for (i, caption) in ["Consignee (Ship to)", "Buyer (Bill to)"].iter().enumerate() {
            let x = margin + i as f64 * cell_width + 4.0;
            let mut line_y = y + 11.0;

            doc.set_font(BOLD, 8.0)?;
            doc.insert_text(caption, 1, x, line_y, Align::Left)?;
            line_y += 12.0;

            doc.set_font(BOLD, 10.0)?;
            doc.insert_text(&order.customer_name, 1, x, line_y, Align::Left)?;
            line_y += 11.0;

            doc.set_font(REGULAR, 8.0)?;
            for line in &address_lines {
                doc.insert_text(line, 1, x, line_y, Align::Left)?;
                line_y += LINE;
            }

            self.bold_label(doc, x, line_y, "State Name:", &annotate_state(&order.customer_state))?;
            line_y += LINE;
            self.bold_label(doc, x, line_y, "Contact:", &order.contact_number)?;
            line_y += LINE;
            if let Some(gstin) = &order.cust_gst_number {
                self.bold_label(doc, x, line_y, "GSTIN:", gstin)?;
            }
        }

        doc.draw_rect(1, margin, y, self.content_width(), box_height, RULE)?;
        doc.draw_line(
            1,
            margin + cell_width,
            y,
            margin + cell_width,
            y + box_height,
            RULE,
        )?;

        Ok(y + box_height + 5.0)
    }

    /// The itemized table: one row per line item in entry order, then the
    /// computed summary rows and the quantity/grand-total footer
    fn draw_items_table(
        &self,
        doc: &mut PdfDocument,
        input: &RenderInput<'_>,
        y: f64,
        currency_font: Option<&Font>,
    ) -> Result<f64> {
        let margin = self.layout.margin;
        let columns = self.column_widths();
        let edges = column_edges(margin, &columns);
        let totals = input.totals;

        // Header row
        let headers = [
            "Sl No.",
            "Description of Goods",
            "HSN/SAC",
            "Due on",
            "Quantity",
            "Rate",
            "per",
            "Disc. %",
            "Amount",
        ];
        let aligns = [
            Align::Center,
            Align::Left,
            Align::Left,
            Align::Left,
            Align::Right,
            Align::Right,
            Align::Left,
            Align::Right,
            Align::Right,
        ];

        let header_height = 16.0;
        doc.set_font(BOLD, 8.0)?;
        for (i, header) in headers.iter().enumerate() {
            let x = cell_anchor(&edges, i, aligns[i]);
            doc.insert_text(header, 1, x, y + 11.0, aligns[i])?;
        }
        self.draw_row_rules(doc, y, header_height, &edges, true)?;
        let mut row_y = y + header_height;

        // Item rows
        for (index, item) in input.order.items.iter().enumerate() {
            let name_lines = simple_word_wrap(&item.name, 36);
            let row_height = 8.0 + name_lines.len() as f64 * LINE;
            let baseline = row_y + 12.0;

            doc.set_font(REGULAR, 8.0)?;
            doc.insert_text(
                &(index + 1).to_string(),
                1,
                cell_anchor(&edges, 0, Align::Center),
                baseline,
                Align::Center,
            )?;
            doc.insert_text(&item.hsn_sac, 1, cell_anchor(&edges, 2, Align::Left), baseline, Align::Left)?;
            doc.insert_text(input.order_date, 1, cell_anchor(&edges, 3, Align::Left), baseline, Align::Left)?;
            doc.insert_text(&item.unit, 1, cell_anchor(&edges, 6, Align::Left), baseline, Align::Left)?;
            doc.insert_text(
                &format_amount(item.rate),
                1,
                cell_anchor(&edges, 5, Align::Right),
                baseline,
                Align::Right,
            )?;
            doc.insert_text(
                &format_plain(item.discount),
                1,
                cell_anchor(&edges, 7, Align::Right),
                baseline,
                Align::Right,
            )?;

            // Quantity: bold figure, regular unit label
            let qty_x = cell_anchor(&edges, 4, Align::Right);
            let unit_width = doc.text_width(&item.unit)?;
            doc.insert_text(&item.unit, 1, qty_x, baseline, Align::Right)?;
            doc.set_font(BOLD, 8.0)?;
            doc.insert_text(
                &format!("{:.2}", item.quantity),
                1,
                qty_x - unit_width - 3.0,
                baseline,
                Align::Right,
            )?;

            for (i, line) in name_lines.iter().enumerate() {
                doc.insert_text(
                    line,
                    1,
                    cell_anchor(&edges, 1, Align::Left),
                    baseline + i as f64 * LINE,
                    Align::Left,
                )?;
            }
            doc.insert_text(
                &format_amount(item.line_amount()),
                1,
                cell_anchor(&edges, 8, Align::Right),
                baseline,
                Align::Right,
            )?;

            self.draw_row_rules(doc, row_y, row_height, &edges, true)?;
            row_y += row_height;
        }

        // Summary rows: Sub Total, Freight (when positive), tax rows,
        // Round Off
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

        let amount_col_x = edges[edges.len() - 2];
        doc.set_font(BOLD, 8.0)?;
        for (label, value) in summary {
            let row_height = 13.0;
            let baseline = row_y + 9.5;
            doc.insert_text(&label, 1, amount_col_x - 4.0, baseline, Align::Right)?;
            doc.insert_text(
                &value,
                1,
                cell_anchor(&edges, 8, Align::Right),
                baseline,
                Align::Right,
            )?;
            self.draw_row_rules(doc, row_y, row_height, &edges, false)?;
            row_y += row_height;
        }

        // Footer: total quantity (first product's unit as the summary
        // unit) and the grand total
        let footer_height = 17.0;
        let baseline = row_y + 12.0;
        let default_unit = input
            .order
            .items
            .first()
            .map(|item| item.unit.as_str())
            .unwrap_or("Box");

        doc.set_font(BOLD, 9.0)?;
        let total_x = (edges[0] + edges[4]) / 2.0;
        doc.insert_text("Total", 1, total_x, baseline, Align::Center)?;
        doc.insert_text(
            &format!("{:.2} {}", totals.total_quantity, default_unit),
            1,
            cell_anchor(&edges, 4, Align::Right),
            baseline,
            Align::Right,
        )?;

        self.draw_grand_total(doc, totals, &edges, baseline, currency_font)?;

        self.draw_row_rules(doc, row_y, footer_height, &edges, false)?;
        doc.draw_line(1, edges[4], row_y, edges[4], row_y + footer_height, RULE)?;
        doc.draw_line(1, edges[5], row_y, edges[5], row_y + footer_height, RULE)?;
        row_y += footer_height;

        Ok(row_y + 5.0)
    }

    /// The grand total figure, with the rupee sign when the configured
    /// font covers it
    fn draw_grand_total(
        &self,
        doc: &mut PdfDocument,
        totals: &DocumentTotals,
        edges: &[f64],
        baseline: f64,
        currency_font: Option<&Font>,
    ) -> Result<()> {
        let x = cell_anchor(edges, 8, Align::Right);
        let figure = format_amount(totals.grand_total);

        match currency_font {
            Some(font) if doc.font_has_glyph(font, '\u{20B9}') => {
                doc.set_font(font.clone(), 10.0)?;
                doc.insert_text(&format!("\u{20B9} {figure}"), 1, x, baseline, Align::Right)?;
            }
            _ => {
                doc.set_font(BOLD, 10.0)?;
                doc.insert_text(&format!("Rs. {figure}"), 1, x, baseline, Align::Right)?;
            }
        }
        Ok(())
    }

    /// Amount chargeable in words, with the fixed legal caveat
    fn draw_words_box(
        &self,
        doc: &mut PdfDocument,
        totals: &DocumentTotals,
        y: f64,
    ) -> Result<f64> {
        let margin = self.layout.margin;
        let box_height = 30.0;

        doc.set_font(REGULAR, 8.0)?;
        doc.insert_text(
            "Amount Chargeable (in words)",
            1,
            margin + 4.0,
            y + 11.0,
            Align::Left,
        )?;
        doc.insert_text("E. & O.E", 1, self.right_edge() - 4.0, y + 11.0, Align::Right)?;

        doc.set_font(BOLD, 9.0)?;
        doc.insert_text(
            &totals.amount_in_words,
            1,
            margin + self.content_width() / 2.0,
            y + 24.0,
            Align::Center,
        )?;

        doc.draw_rect(1, margin, y, self.content_width(), box_height, RULE)?;

        Ok(y + box_height + 5.0)
    }

    /// Bank details on the left, for-company signature block on the right
    fn draw_bank_and_signature(
        &self,
        doc: &mut PdfDocument,
        input: &RenderInput<'_>,
        y: f64,
    ) -> Result<f64> {
        let margin = self.layout.margin;
        let company = input.company;

        let mut line_y = y + 11.0;
        doc.set_font(BOLD, 8.0)?;
        doc.insert_text("Company's Bank Details", 1, margin + 4.0, line_y, Align::Left)?;
        line_y += LINE + 1.0;

        let bank_rows = [
            ("A/c Holder's Name:", company.bank_account_holder.as_str()),
            ("Bank Name:", company.bank_name.as_str()),
            ("A/c No.:", company.bank_account_no.as_str()),
            ("Branch & IFS Code:", company.bank_ifsc.as_str()),
        ];
        for (label, value) in bank_rows {
            self.value_after(doc, margin + 4.0, line_y, label, value)?;
            line_y += LINE;
        }

        // Signature block, bottom-aligned to the right
        let right = self.right_edge() - 4.0;
        doc.set_font(BOLD, 8.0)?;
        doc.insert_text(
            &format!("for {}", company.name),
            1,
            right,
            y + 11.0,
            Align::Right,
        )?;

        let mut caption_y = y + 11.0 + 40.0;
        if let Some(signature) = &input.assets.signature {
            if let Err(e) = doc.insert_image_scaled(
                signature,
                1,
                right - self.layout.signature_width,
                y + 16.0,
                self.layout.signature_width,
                36.0,
                ImageScaleMode::FitBox,
            ) {
                warn!("signature image skipped: {e}");
            }
            caption_y = y + 58.0;
        }

        doc.set_font(REGULAR, 8.0)?;
        doc.insert_text("Authorised Signatory", 1, right, caption_y, Align::Right)?;

        Ok(caption_y.max(line_y) + 6.0)
    }

    fn draw_footer_caption(&self, doc: &mut PdfDocument, y: f64) -> Result<()> {
        doc.set_font(REGULAR, 7.0)?;
        doc.insert_text(
            "This is a Computer Generated Document",
            1,
            A4_WIDTH / 2.0,
            y + 10.0,
            Align::Center,
        )?;
        Ok(())
    }

    /// Outer borders of a table row, plus column dividers for item rows.
    /// Summary rows only divide the amount column off.
    fn draw_row_rules(
        &self,
        doc: &mut PdfDocument,
        y: f64,
        height: f64,
        edges: &[f64],
        all_columns: bool,
    ) -> Result<()> {
        let margin = self.layout.margin;
        doc.draw_rect(1, margin, y, self.content_width(), height, RULE)?;

        if all_columns {
            for &edge in &edges[1..edges.len() - 1] {
                doc.draw_line(1, edge, y, edge, y + height, RULE)?;
            }
        } else {
            let amount_divider = edges[edges.len() - 2];
            doc.draw_line(1, amount_divider, y, amount_divider, y + height, RULE)?;
        }

        Ok(())
    }

    /// Fixed column widths; the description column absorbs the slack
    fn column_widths(&self) -> [f64; 9] {
        let fixed = 26.0 + 48.0 + 52.0 + 64.0 + 56.0 + 28.0 + 38.0 + 72.0;
        let description = self.content_width() - fixed;
        [26.0, description, 48.0, 52.0, 64.0, 56.0, 28.0, 38.0, 72.0]
    }

    /// Bold label followed by a regular value ("GSTIN/UIN: xxx")
    fn bold_label(
        &self,
        doc: &mut PdfDocument,
        x: f64,
        y: f64,
        label: &str,
        value: &str,
    ) -> Result<()> {
        doc.set_font(BOLD, 8.0)?;
        doc.insert_text(label, 1, x, y, Align::Left)?;
        let label_width = doc.text_width(label)?;
        doc.set_font(REGULAR, 8.0)?;
        doc.insert_text(value, 1, x + label_width + 3.0, y, Align::Left)?;
        Ok(())
    }

    /// Regular label followed by a bold value ("Bank Name: xxx")
    fn value_after(
        &self,
        doc: &mut PdfDocument,
        x: f64,
        y: f64,
        label: &str,
        value: &str,
    ) -> Result<()> {
        doc.set_font(REGULAR, 8.0)?;
        doc.insert_text(label, 1, x, y, Align::Left)?;
        let label_width = doc.text_width(label)?;
        doc.set_font(BOLD, 8.0)?;
        doc.insert_text(value, 1, x + label_width + 3.0, y, Align::Left)?;
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

/// Cumulative column boundaries: edges[0] is the table's left edge,
/// edges[n] its right edge
fn column_edges(margin: f64, columns: &[f64; 9]) -> Vec<f64> {
    let mut edges = Vec::with_capacity(columns.len() + 1);
    let mut x = margin;
    edges.push(x);
    for width in columns {
        x += width;
        edges.push(x);
    }
    edges
}

/// Anchor X for text in a column, padded off the cell border
fn cell_anchor(edges: &[f64], column: usize, align: Align) -> f64 {
    match align {
        Align::Left => edges[column] + 4.0,
        Align::Right => edges[column + 1] - 4.0,
        Align::Center => (edges[column] + edges[column + 1]) / 2.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_annotate_state() {
        assert_eq!(annotate_state("Maharashtra"), "Maharashtra, Code : 27");
        assert_eq!(annotate_state("Narnia"), "Narnia");
        assert_eq!(annotate_state(""), "");
    }

    #[test]
    fn test_column_edges_are_cumulative() {
        let layout = VectorRenderer::default();
        let columns = layout.column_widths();
        let edges = column_edges(24.0, &columns);

        assert_eq!(edges.len(), 10);
        assert_eq!(edges[0], 24.0);
        let total: f64 = columns.iter().sum();
        assert!((edges[9] - (24.0 + total)).abs() < 1e-9);
        // The description column absorbs the slack: edges end at the margin
        assert!((edges[9] - (A4_WIDTH - 24.0)).abs() < 1e-9);
    }

    #[test]
    fn test_cell_anchor() {
        let edges = vec![0.0, 100.0, 200.0];
        assert_eq!(cell_anchor(&edges, 0, Align::Left), 4.0);
        assert_eq!(cell_anchor(&edges, 0, Align::Right), 96.0);
        assert_eq!(cell_anchor(&edges, 1, Align::Center), 150.0);
    }

    #[test]
    fn test_layout_defaults() {
        let layout = VectorLayout::default();
        assert_eq!(layout.margin, 24.0);
        assert!(layout.watermark_alpha < 0.1);
    }
}
