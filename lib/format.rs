//! Formatting utilities for human-readable output.

use colored::Colorize;

use crate::constants::CONTEXT_WINDOW_TOKENS;

//--------------------------------------------------------------------------------------------------
// Constants
//--------------------------------------------------------------------------------------------------

/// Maximum length for component descriptions in selector rows.
pub const MAX_DESC_LEN: usize = 50;

/// Maximum length for MCP server descriptions in selector rows.
pub const MAX_MCP_DESC_LEN: usize = 40;

//--------------------------------------------------------------------------------------------------
// Functions
//--------------------------------------------------------------------------------------------------

/// Truncate a description to `max` characters with an ellipsis.
pub fn truncate_desc(desc: &str, max: usize) -> String {
    if desc.chars().count() <= max {
        desc.to_string()
    } else {
        let cut: String = desc.chars().take(max.saturating_sub(3)).collect();
        format!("{cut}...")
    }
}

/// Thousands-separated rendering of a token count.
pub fn format_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Token total as a percentage of the context window.
pub fn token_percentage(total: u64) -> f64 {
    total as f64 * 100.0 / CONTEXT_WINDOW_TOKENS as f64
}

/// One-line colored token summary.
/// Green below 5% of the context window, yellow below 10%, red from there.
pub fn token_summary(total: u64) -> String {
    let percentage = token_percentage(total);
    let line = format!(
        "Token usage: {} (~{percentage:.1}%)",
        format_thousands(total)
    );
    let colored = if percentage < 5.0 {
        line.green()
    } else if percentage < 10.0 {
        line.yellow()
    } else {
        line.red()
    };
    colored.to_string()
}

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_desc() {
        assert_eq!(truncate_desc("short", 50), "short");
        let long = "x".repeat(60);
        let truncated = truncate_desc(&long, 50);
        assert_eq!(truncated.chars().count(), 50);
        assert!(truncated.ends_with("..."));
    }

    #[test]
    fn test_truncate_desc_multibyte() {
        let desc = "é".repeat(10);
        assert_eq!(truncate_desc(&desc, 8), format!("{}...", "é".repeat(5)));
    }

    #[test]
    fn test_format_thousands() {
        assert_eq!(format_thousands(0), "0");
        assert_eq!(format_thousands(999), "999");
        assert_eq!(format_thousands(5550), "5,550");
        assert_eq!(format_thousands(200_000), "200,000");
        assert_eq!(format_thousands(1_234_567), "1,234,567");
    }

    #[test]
    fn test_token_percentage() {
        assert_eq!(token_percentage(0), 0.0);
        assert!((token_percentage(5550) - 2.775).abs() < 1e-9);
        assert_eq!(token_percentage(200_000), 100.0);
    }
}
