//! GST Text - Indian GST invoice text formatting
//!
//! This crate provides:
//! - Number-to-words in the Indian convention (Thousand, Lakh, Crore)
//! - Amount rendering with en-IN digit grouping (12,34,567.89)
//! - The fixed GST state-code table (28 states + 8 union territories)
//! - Invoice date and default voucher-number formatting
//!
//! # Example
//!
//! ```ignore
//! use gst_text::{number_to_words, format_amount, state_code};
//!
//! let words = number_to_words(9440);          // "Nine Thousand Four Hundred Forty"
//! let amount = format_amount(1234567.89);     // "12,34,567.89"
//! let code = state_code("Maharashtra");       // Some("27")
//! ```

mod amount;
mod dates;
mod states;
mod words;

pub use amount::{format_amount, format_plain};
pub use dates::{format_order_date, voucher_from_timestamp};
pub use states::{same_state, state_code, STATE_CODES};
pub use words::number_to_words;

use thiserror::Error;

/// Errors that can occur during invoice text formatting
#[derive(Debug, Error)]
pub enum GstTextError {
    #[error("Invalid date: {0}")]
    InvalidDate(String),
}

/// Result type for invoice text operations
pub type Result<T> = std::result::Result<T, GstTextError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_number_to_words() {
        assert_eq!(number_to_words(0), "Zero");
        assert_eq!(number_to_words(100000), "One Lakh");
        assert_eq!(number_to_words(10000000), "One Crore");
    }

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(1234567.89), "12,34,567.89");
        assert_eq!(format_amount(8000.0), "8,000.00");
    }

    #[test]
    fn test_state_code() {
        assert_eq!(state_code("Maharashtra"), Some("27"));
        assert_eq!(state_code("  delhi "), Some("07"));
        assert_eq!(state_code("Atlantis"), None);
    }
}
