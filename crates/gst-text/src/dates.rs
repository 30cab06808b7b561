//! Invoice date and voucher-number formatting

use chrono::NaiveDate;

/// Format an order date the way it is printed on the document
/// (e.g. "05 Aug 26").
///
/// # Examples
/// ```
/// use chrono::NaiveDate;
/// use gst_text::format_order_date;
/// let date = NaiveDate::from_ymd_opt(2026, 8, 5).unwrap();
/// assert_eq!(format_order_date(date), "05 Aug 26");
/// ```
pub fn format_order_date(date: NaiveDate) -> String {
    date.format("%d %b %y").to_string()
}

/// Derive the default voucher number from a Unix-millisecond timestamp:
/// "SO/" followed by the last six digits.
///
/// Callers wanting reproducible documents supply an explicit voucher number
/// instead.
pub fn voucher_from_timestamp(millis: i64) -> String {
    let digits = millis.unsigned_abs().to_string();
    let tail = if digits.len() > 6 {
        &digits[digits.len() - 6..]
    } else {
        &digits[..]
    };
    format!("SO/{}", tail)
}
