//! PDF Core - Low-level PDF construction
//!
//! This crate provides functionality for:
//! - Creating blank single-page documents or opening existing PDFs
//! - Inserting text at specific coordinates with alignment
//! - Drawing lines and rectangles (table rules)
//! - Inserting images (JPEG, PNG), including low-opacity watermarks
//! - Built-in Helvetica metrics plus embedded TrueType fonts
//!
//! # Example
//!
//! ```ignore
//! use pdf_core::{Align, BuiltinFont, Font, PdfDocument};
//!
//! let mut doc = PdfDocument::new_a4();
//! doc.set_font(Font::Builtin(BuiltinFont::HelveticaBold), 14.0);
//! doc.insert_text("SALES ORDER", 1, 297.6, 40.0, Align::Center)?;
//! doc.draw_rect(1, 24.0, 60.0, 547.0, 120.0, 0.6)?;
//! let bytes = doc.to_bytes()?;
//! ```

mod document;
mod font;
mod graphics;
mod image;
mod text;

pub use document::PdfDocument;
pub use font::{BuiltinFont, Font, FontData, FontWeight};
pub use graphics::Color;
pub use image::ImageScaleMode;
pub use text::simple_word_wrap;

use thiserror::Error;

/// Errors that can occur during PDF operations
#[derive(Debug, Error)]
pub enum PdfError {
    #[error("Failed to open PDF: {0}")]
    OpenError(String),

    #[error("Failed to save PDF: {0}")]
    SaveError(String),

    #[error("Font not found: {0}")]
    FontNotFound(String),

    #[error("Font already exists: {0}")]
    FontAlreadyExists(String),

    #[error("Failed to parse font: {0}")]
    FontParseError(String),

    #[error("Invalid page number: {0} (document has {1} pages)")]
    InvalidPage(usize, usize),

    #[error("Image error: {0}")]
    ImageError(String),

    #[error("PDF parsing error: {0}")]
    ParseError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Lopdf error: {0}")]
    LopdfError(#[from] lopdf::Error),
}

/// Result type for PDF operations
pub type Result<T> = std::result::Result<T, PdfError>;

/// Text alignment options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Align {
    #[default]
    Left,
    Center,
    Right,
}

/// A4 page width in points
pub const A4_WIDTH: f64 = 595.28;
/// A4 page height in points
pub const A4_HEIGHT: f64 = 841.89;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_align_default() {
        assert_eq!(Align::default(), Align::Left);
    }

    #[test]
    fn test_a4_dimensions() {
        assert!(A4_WIDTH < A4_HEIGHT);
    }
}
