//! Tax & totals calculation
//!
//! Pure arithmetic over caller-validated numbers: no validation is
//! performed here, and no domain errors are raised. A negative or NaN rate
//! propagates into a nonsensical but non-crashing total.

use crate::model::OrderLineItem;
use gst_text::{format_plain, number_to_words, same_state};

/// One tax row of the totals block, e.g. "OUTPUT CGST 9.00%"
#[derive(Debug, Clone, PartialEq)]
pub struct TaxLine {
    /// Printed label
    pub label: String,
    /// Tax amount in rupees
    pub amount: f64,
}

/// Every number that appears in the document's totals block
#[derive(Debug, Clone)]
pub struct DocumentTotals {
    /// Sum of line amounts
    pub sub_total: f64,
    /// Sum of quantities across all lines, without unit conversion
    pub total_quantity: f64,
    /// True when line items carry differing unit labels; the quantity sum
    /// is then across heterogeneous units (a documented simplification)
    pub mixed_units: bool,
    /// Flat freight addend, shown only when positive
    pub freight_expense: f64,
    /// CGST+SGST pairs or single IGST rows, one group per distinct nonzero
    /// tax rate, ascending by rate
    pub tax_lines: Vec<TaxLine>,
    /// Sum of all tax rows
    pub total_tax: f64,
    /// Difference between the rounded grand total and the raw sum; always
    /// displayed, can be negative
    pub round_off: f64,
    /// Grand total rounded to whole rupees
    pub grand_total: f64,
    /// "INR <words> Only"
    pub amount_in_words: String,
}

impl DocumentTotals {
    /// Compute the totals block for an order.
    ///
    /// The tax split is decided by trimmed case-insensitive equality of the
    /// two state names: equal means intra-state (CGST+SGST halves),
    /// different means inter-state (IGST). Line amounts sharing a tax rate
    /// are pooled before the tax is computed on the pooled amount.
    pub fn compute(
        company_state: &str,
        customer_state: &str,
        items: &[OrderLineItem],
        freight_expense: f64,
    ) -> Self {
        let mut sub_total = 0.0;
        let mut total_quantity = 0.0;
        let mut rate_pools: Vec<(f64, f64)> = Vec::new();

        for item in items {
            let line_amount = item.line_amount();
            sub_total += line_amount;
            total_quantity += item.quantity;

            match rate_pools.iter_mut().find(|(rate, _)| *rate == item.tax_rate) {
                Some((_, pooled)) => *pooled += line_amount,
                None => rate_pools.push((item.tax_rate, line_amount)),
            }
        }
        rate_pools.sort_by(|a, b| a.0.total_cmp(&b.0));

        let mixed_units = items
            .windows(2)
            .any(|pair| !pair[0].unit.trim().eq_ignore_ascii_case(pair[1].unit.trim()));

        let intra_state = same_state(company_state, customer_state);

        let mut tax_lines = Vec::new();
        let mut total_tax = 0.0;
        for (rate, taxable_amount) in rate_pools {
            if rate <= 0.0 {
                continue;
            }

            if intra_state {
                let half_rate = rate / 2.0;
                let half_tax = taxable_amount * half_rate / 100.0;
                total_tax += half_tax * 2.0;
                tax_lines.push(TaxLine {
                    label: format!("OUTPUT CGST {}%", format_plain(half_rate)),
                    amount: half_tax,
                });
                tax_lines.push(TaxLine {
                    label: format!("OUTPUT SGST {}%", format_plain(half_rate)),
                    amount: half_tax,
                });
            } else {
                let igst = taxable_amount * rate / 100.0;
                total_tax += igst;
                tax_lines.push(TaxLine {
                    label: format!("OUTPUT IGST {:.0}%", rate),
                    amount: igst,
                });
            }
        }

        let raw_total = sub_total + freight_expense + total_tax;
        let grand_total = raw_total.round();
        let round_off = grand_total - raw_total;

        let amount_in_words = format!(
            "INR {} Only",
            number_to_words(grand_total.max(0.0) as u64)
        );

        Self {
            sub_total,
            total_quantity,
            mixed_units,
            freight_expense,
            tax_lines,
            total_tax,
            round_off,
            grand_total,
            amount_in_words,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::OrderLineItem;
    use pretty_assertions::assert_eq;

    fn item(rate: f64, qty: f64, discount: f64, tax: f64) -> OrderLineItem {
        OrderLineItem {
            name: "Widget".to_string(),
            hsn_sac: "8479".to_string(),
            quantity: qty,
            rate,
            unit: "PCS".to_string(),
            discount,
            tax_rate: tax,
        }
    }

    #[test]
    fn test_intra_state_split() {
        // Maharashtra -> Maharashtra: CGST + SGST halves
        let totals = DocumentTotals::compute(
            "Maharashtra",
            "Maharashtra",
            &[item(5000.0, 2.0, 20.0, 18.0)],
            0.0,
        );

        assert_eq!(totals.sub_total, 8000.0);
        assert_eq!(totals.tax_lines.len(), 2);
        assert_eq!(totals.tax_lines[0].label, "OUTPUT CGST 9.00%");
        assert_eq!(totals.tax_lines[1].label, "OUTPUT SGST 9.00%");
        assert!((totals.tax_lines[0].amount - 720.0).abs() < 1e-9);
        assert!((totals.tax_lines[1].amount - 720.0).abs() < 1e-9);
        assert!((totals.total_tax - 1440.0).abs() < 1e-9);
        assert_eq!(totals.grand_total, 9440.0);
        assert!(totals.round_off.abs() < 1e-9);
    }

    #[test]
    fn test_inter_state_single_igst() {
        // Delhi -> Maharashtra: one IGST row, same total
        let totals = DocumentTotals::compute(
            "Delhi",
            "Maharashtra",
            &[item(5000.0, 2.0, 20.0, 18.0)],
            0.0,
        );

        assert_eq!(totals.tax_lines.len(), 1);
        assert_eq!(totals.tax_lines[0].label, "OUTPUT IGST 18%");
        assert!((totals.tax_lines[0].amount - 1440.0).abs() < 1e-9);
        assert_eq!(totals.grand_total, 9440.0);
    }

    #[test]
    fn test_state_comparison_is_case_insensitive() {
        let totals = DocumentTotals::compute(
            " maharashtra ",
            "MAHARASHTRA",
            &[item(100.0, 1.0, 0.0, 18.0)],
            0.0,
        );
        assert_eq!(totals.tax_lines.len(), 2);
    }

    #[test]
    fn test_zero_tax_rate_emits_no_row() {
        let totals = DocumentTotals::compute(
            "Delhi",
            "Maharashtra",
            &[item(100.0, 2.0, 0.0, 0.0)],
            0.0,
        );

        assert!(totals.tax_lines.is_empty());
        assert_eq!(totals.total_tax, 0.0);
        assert_eq!(totals.grand_total, 200.0);
    }

    #[test]
    fn test_freight_added_untaxed() {
        let totals = DocumentTotals::compute(
            "Delhi",
            "Maharashtra",
            &[item(5000.0, 2.0, 20.0, 18.0)],
            500.0,
        );
        assert_eq!(totals.grand_total, 9940.0);
    }

    #[test]
    fn test_no_discount_line_amount_is_exact() {
        let totals =
            DocumentTotals::compute("Delhi", "Delhi", &[item(123.45, 3.0, 0.0, 0.0)], 0.0);
        assert_eq!(totals.sub_total, 123.45 * 3.0);
    }

    #[test]
    fn test_rates_are_pooled_before_tax() {
        // Two lines at 18% pool to one taxable amount; one line at 5%
        let totals = DocumentTotals::compute(
            "Delhi",
            "Maharashtra",
            &[
                item(100.0, 1.0, 0.0, 18.0),
                item(200.0, 1.0, 0.0, 5.0),
                item(300.0, 1.0, 0.0, 18.0),
            ],
            0.0,
        );

        // Ascending by rate: 5% first, then the pooled 18% group
        assert_eq!(totals.tax_lines.len(), 2);
        assert_eq!(totals.tax_lines[0].label, "OUTPUT IGST 5%");
        assert!((totals.tax_lines[0].amount - 10.0).abs() < 1e-9);
        assert_eq!(totals.tax_lines[1].label, "OUTPUT IGST 18%");
        assert!((totals.tax_lines[1].amount - 72.0).abs() < 1e-9);
    }

    #[test]
    fn test_round_off_reconciles() {
        let totals = DocumentTotals::compute(
            "Delhi",
            "Maharashtra",
            &[item(99.99, 1.0, 0.0, 18.0)],
            0.0,
        );

        let raw = totals.sub_total + totals.freight_expense + totals.total_tax;
        assert!((totals.grand_total - (raw + totals.round_off)).abs() < 1e-6);
        assert_eq!(totals.grand_total, totals.grand_total.round());
    }

    #[test]
    fn test_total_quantity_and_mixed_units() {
        let mut second = item(10.0, 1.5, 0.0, 0.0);
        second.unit = "KG".to_string();

        let totals = DocumentTotals::compute(
            "Delhi",
            "Delhi",
            &[item(10.0, 2.0, 0.0, 0.0), second],
            0.0,
        );

        assert_eq!(totals.total_quantity, 3.5);
        assert!(totals.mixed_units);
    }

    #[test]
    fn test_uniform_units_not_flagged() {
        let totals = DocumentTotals::compute(
            "Delhi",
            "Delhi",
            &[item(10.0, 1.0, 0.0, 0.0), item(20.0, 1.0, 0.0, 0.0)],
            0.0,
        );
        assert!(!totals.mixed_units);
    }

    #[test]
    fn test_amount_in_words() {
        let totals = DocumentTotals::compute(
            "Maharashtra",
            "Maharashtra",
            &[item(5000.0, 2.0, 20.0, 18.0)],
            0.0,
        );
        assert_eq!(
            totals.amount_in_words,
            "INR Nine Thousand Four Hundred Forty Only"
        );
    }

    #[test]
    fn test_identical_inputs_identical_totals() {
        let items = [item(5000.0, 2.0, 20.0, 18.0), item(99.5, 3.0, 5.0, 12.0)];
        let a = DocumentTotals::compute("Delhi", "Maharashtra", &items, 250.0);
        let b = DocumentTotals::compute("Delhi", "Maharashtra", &items, 250.0);

        assert_eq!(a.sub_total, b.sub_total);
        assert_eq!(a.total_tax, b.total_tax);
        assert_eq!(a.grand_total, b.grand_total);
        assert_eq!(a.round_off, b.round_off);
        assert_eq!(a.amount_in_words, b.amount_in_words);
    }

    #[test]
    fn test_empty_order() {
        let totals = DocumentTotals::compute("Delhi", "Delhi", &[], 0.0);
        assert_eq!(totals.sub_total, 0.0);
        assert_eq!(totals.grand_total, 0.0);
        assert_eq!(totals.amount_in_words, "INR Zero Only");
        assert!(totals.tax_lines.is_empty());
    }
}
