//! Text rendering utilities

use crate::graphics::Color;

/// Text encoded for a PDF show operator
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EncodedText {
    /// Escaped literal string for WinAnsi-encoded built-in fonts
    Literal(String),
    /// Hex glyph-ID string for Identity-H embedded fonts
    Hex(String),
}

/// Context for rendering text
pub struct TextRenderContext {
    /// PDF font resource name (e.g., "F1")
    pub font_name: String,
    /// Font size in points
    pub font_size: f32,
    /// Text color (RGB)
    pub color: Color,
}

/// Encode text as an escaped PDF literal string for WinAnsiEncoding.
///
/// Parentheses and backslashes are escaped; characters outside the ASCII
/// range are substituted with '?' (the invoice layout only routes ASCII
/// through built-in fonts, anything else goes through an embedded font).
pub fn encode_win_ansi(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    for c in text.chars() {
        match c {
            '(' => out.push_str("\\("),
            ')' => out.push_str("\\)"),
            '\\' => out.push_str("\\\\"),
            c if (' '..='~').contains(&c) => out.push(c),
            _ => out.push('?'),
        }
    }
    out
}

/// Generate PDF operators for text insertion
///
/// Emits BT / rg / Tf / Td / Tj / ET for text at a position. The X
/// coordinate must already account for alignment; Y is in PDF coordinates
/// (from the bottom).
pub fn generate_text_operators(
    encoded: &EncodedText,
    x: f64,
    y: f64,
    ctx: &TextRenderContext,
) -> Vec<u8> {
    let show = match encoded {
        EncodedText::Literal(s) => format!("({s}) Tj"),
        EncodedText::Hex(s) => format!("{s} Tj"),
    };

    let mut ops = String::new();
    ops.push_str("BT\n");
    ops.push_str(&format!(
        "{} {} {} rg\n",
        ctx.color.r, ctx.color.g, ctx.color.b
    ));
    ops.push_str(&format!("/{} {} Tf\n", ctx.font_name, ctx.font_size));
    ops.push_str(&format!("{x} {y} Td\n"));
    ops.push_str(&show);
    ops.push_str("\nET\n");

    ops.into_bytes()
}

/// Split text into lines on spaces, limited by character count.
///
/// Used for the address blocks, whose cells are narrow enough that a
/// character budget is an adequate measure.
pub fn simple_word_wrap(text: &str, max_chars: usize) -> Vec<String> {
    if max_chars == 0 {
        return vec![text.to_string()];
    }

    let mut lines = Vec::new();
    let mut current_line = String::new();

    for word in text.split_whitespace() {
        if current_line.is_empty() {
            current_line = word.to_string();
        } else if current_line.len() + 1 + word.len() <= max_chars {
            current_line.push(' ');
            current_line.push_str(word);
        } else {
            lines.push(current_line);
            current_line = word.to_string();
        }
    }

    if !current_line.is_empty() {
        lines.push(current_line);
    }

    if lines.is_empty() {
        lines.push(String::new());
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx(font: &str, size: f32) -> TextRenderContext {
        TextRenderContext {
            font_name: font.to_string(),
            font_size: size,
            color: Color::black(),
        }
    }

    #[test]
    fn test_encode_win_ansi_plain() {
        assert_eq!(encode_win_ansi("Sub Total"), "Sub Total");
    }

    #[test]
    fn test_encode_win_ansi_escapes() {
        assert_eq!(encode_win_ansi("(Ship to)"), "\\(Ship to\\)");
        assert_eq!(encode_win_ansi("a\\b"), "a\\\\b");
    }

    #[test]
    fn test_encode_win_ansi_substitutes_non_ascii() {
        assert_eq!(encode_win_ansi("₹ 100"), "? 100");
    }

    #[test]
    fn test_generate_text_operators_literal() {
        let ops = generate_text_operators(
            &EncodedText::Literal("Hello".to_string()),
            100.0,
            700.0,
            &ctx("F1", 12.0),
        );
        let ops_str = String::from_utf8(ops).unwrap();

        assert!(ops_str.contains("BT"));
        assert!(ops_str.contains("/F1 12 Tf"));
        assert!(ops_str.contains("100 700 Td"));
        assert!(ops_str.contains("(Hello) Tj"));
        assert!(ops_str.contains("ET"));
    }

    #[test]
    fn test_generate_text_operators_hex() {
        let ops = generate_text_operators(
            &EncodedText::Hex("<00480065>".to_string()),
            50.0,
            600.0,
            &ctx("F2", 9.0),
        );
        let ops_str = String::from_utf8(ops).unwrap();

        assert!(ops_str.contains("/F2 9 Tf"));
        assert!(ops_str.contains("<00480065> Tj"));
    }

    #[test]
    fn test_generate_text_operators_color() {
        let mut c = ctx("F1", 12.0);
        c.color = Color::rgb(1.0, 0.0, 0.0);
        let ops =
            generate_text_operators(&EncodedText::Literal("A".to_string()), 0.0, 0.0, &c);
        let ops_str = String::from_utf8(ops).unwrap();
        assert!(ops_str.contains("1 0 0 rg"));
    }

    #[test]
    fn test_simple_word_wrap() {
        let lines = simple_word_wrap("Hello world this is a test", 12);
        assert_eq!(lines, vec!["Hello world", "this is a", "test"]);
    }

    #[test]
    fn test_simple_word_wrap_single_line() {
        assert_eq!(simple_word_wrap("Short", 100), vec!["Short"]);
    }

    #[test]
    fn test_simple_word_wrap_zero_max() {
        assert_eq!(simple_word_wrap("Hello world", 0), vec!["Hello world"]);
    }

    #[test]
    fn test_simple_word_wrap_empty() {
        assert_eq!(simple_word_wrap("", 10), vec![""]);
        assert_eq!(simple_word_wrap("   ", 10), vec![""]);
    }

    #[test]
    fn test_simple_word_wrap_long_word() {
        // A single over-long word stays on its own line
        let lines = simple_word_wrap("Thiruvananthapuram", 10);
        assert_eq!(lines, vec!["Thiruvananthapuram"]);
    }

    #[test]
    fn test_simple_word_wrap_collapses_spaces() {
        assert_eq!(simple_word_wrap("Hello    world", 20), vec!["Hello world"]);
    }
}
