//! Screen size extraction.

use std::sync::OnceLock;

use regex::Regex;

/// Laptop panels live in this band; anything outside is some other number.
const SCREEN_RANGE_INCHES: std::ops::RangeInclusive<f64> = 10.0..=18.0;

fn patterns() -> &'static [Regex] {
    static PATTERNS: OnceLock<Vec<Regex>> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        [
            // A decimal like 15.6 is unambiguous even without a unit.
            r#"(?i)\b(\d{2}[.,]\d{1,2})\s*(?:["″]|''|-?tommers?\b|inch(?:es)?\b)?"#,
            // A bare integer needs a unit to count as a screen size.
            r#"(?i)\b(\d{2})\s*(?:["″]|''|-?tommers?\b|inch(?:es)?\b)"#,
        ]
        .iter()
        .map(|pattern| Regex::new(pattern).expect("screen pattern"))
        .collect()
    })
}

/// Find the first plausible screen diagonal in the text.
pub fn extract_screen(text: &str) -> Option<f64> {
    patterns()
        .iter()
        .find_map(|pattern| pattern.captures(text))
        .and_then(|captures| captures.get(1)?.as_str().replace(',', ".").parse::<f64>().ok())
        .filter(|inches| SCREEN_RANGE_INCHES.contains(inches))
}
