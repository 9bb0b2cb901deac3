//! CPU extraction and tier classification.

use std::sync::OnceLock;

use regex::Regex;

/// Ordered extraction patterns, most specific first. First match wins.
fn extraction_patterns() -> &'static [Regex] {
    static PATTERNS: OnceLock<Vec<Regex>> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        [
            // Vendor + family + model number.
            r"(?i)\bintel\s+core\s+(?:ultra\s+)?i?[3579][\s-]?\d{3,5}[a-z]{0,2}\b",
            r"(?i)\bcore\s+(?:ultra\s+)?i?[3579][\s-]?\d{3,5}[a-z]{0,2}\b",
            r"(?i)\b(?:amd\s+)?ryzen\s+(?:ai\s+)?[3579]\s+(?:hx\s+)?\d{3,4}[a-z]{0,2}\b",
            r"(?i)\bapple\s+m[1-4](?:\s+(?:pro|max|ultra))?\b",
            r"(?i)\bm[1-4]\s+(?:pro|max|ultra)\b",
            r"(?i)\bsnapdragon\s+x\s+(?:elite|plus)\b",
            // Vendor + family only.
            r"(?i)\bintel\s+core\s+(?:ultra\s+)?i?[3579]\b",
            r"(?i)\bcore\s+(?:ultra\s+)?i?[3579]\b",
            r"(?i)\b(?:amd\s+)?ryzen\s+(?:ai\s+)?[3579]\b",
            r"(?i)\bapple\s+m[1-4]\b",
            r"(?i)\bm[1-4]\b",
            r"(?i)\bi[3579]\b",
            // Low-end families.
            r"(?i)\b(?:intel\s+)?celeron(?:\s+[a-z]?\d{3,5})?\b",
            r"(?i)\b(?:intel\s+)?pentium(?:\s+(?:gold|silver))?(?:\s+[a-z]?\d{3,5})?\b",
            r"(?i)\b(?:amd\s+)?athlon(?:\s+(?:gold|silver))?(?:\s+\d{3,4}[a-z]{0,2})?\b",
            r"(?i)\b(?:amd\s+)?a[4-9][\s-]\d{4}[a-z]?\b",
            r"(?i)\bintel\s+(?:processor\s+)?n\d{2,4}\b",
        ]
        .iter()
        .map(|pattern| Regex::new(pattern).expect("cpu extraction pattern"))
        .collect()
    })
}

/// The tier ladder. Evaluated top to bottom, first match wins, so ordering is
/// load-bearing: the avoid-tier exits before anything else can claim the
/// text, specific generations outrank family fallbacks, and Snapdragon X
/// Plus sits on its own rung below the Elite.
fn tier_ladder() -> &'static [(Regex, u8)] {
    static LADDER: OnceLock<Vec<(Regex, u8)>> = OnceLock::new();
    LADDER.get_or_init(|| {
        [
            // Avoid tier: budget silicon a sales rep should steer away from.
            (r"(?i)celeron|pentium|athlon|\ba[4-9][\s-]\d{4}|\bn\d{2,4}\b", 1),
            // Flagships.
            (r"(?i)\bm[34]\s+(?:pro|max|ultra)\b", 10),
            (r"(?i)core\s+ultra\s+9", 10),
            (r"(?i)i9[\s-]?1[45]\d{3}hx\b", 10),
            (r"(?i)ryzen\s+9\s+\d{3,4}hx\b", 10),
            (r"(?i)snapdragon\s+x\s+elite", 10),
            (r"(?i)ryzen\s+ai\s+9\s+(?:hx\s+)?3\d{2}\b", 10),
            // Strong performers.
            (r"(?i)\bm4\b", 8),
            (r"(?i)core\s+ultra\s+7", 8),
            (r"(?i)i7[\s-]?1[34]\d{3}h\b", 8),
            (r"(?i)ryzen\s+7\s+\d{3,4}h[sx]?\b", 8),
            (r"(?i)ryzen\s+ai\s+9\b", 8),
            (r"(?i)snapdragon\s+x\s+plus", 7),
            // Solid midrange.
            (r"(?i)\bm[123]\b", 6),
            (r"(?i)core\s+ultra\s+5", 6),
            (r"(?i)i5[\s-]?1[234]\d{3}[hp]\b", 6),
            (r"(?i)ryzen\s+5\s+\d{3,4}h[sx]?\b", 6),
            (r"(?i)ryzen\s+7\s+\d{3,4}u\b", 6),
            // Entry level.
            (r"(?i)i3[\s-]?1[234]\d{2,3}[a-z]{0,2}\b", 4),
            (r"(?i)\bcore\s+3\b", 4),
            (r"(?i)ryzen\s+3\b", 4),
            (r"(?i)ryzen\s+5\s+\d{3,4}u\b", 4),
            (r"(?i)i5[\s-]?\d{3,5}u\b", 4),
            // Family fallbacks when no generation or suffix matched above.
            (r"(?i)\bi9\b", 8),
            (r"(?i)\bi7\b", 6),
            (r"(?i)\bi5\b", 5),
            (r"(?i)\bi3\b", 4),
            (r"(?i)ryzen\s+9\b", 8),
            (r"(?i)ryzen\s+7\b", 6),
            (r"(?i)ryzen\s+5\b", 5),
        ]
        .iter()
        .map(|(pattern, tier)| (Regex::new(pattern).expect("cpu tier pattern"), *tier))
        .collect()
    })
}

/// Find the CPU model mentioned in the text, if any.
pub fn extract_cpu(text: &str) -> Option<String> {
    extraction_patterns()
        .iter()
        .find_map(|pattern| pattern.find(text))
        .map(|found| found.as_str().trim().to_owned())
}

/// Rank an extracted CPU string on the 0-10 ladder. 0 means unknown.
pub fn cpu_tier(cpu: &str) -> u8 {
    tier_ladder()
        .iter()
        .find(|(pattern, _)| pattern.is_match(cpu))
        .map(|(_, tier)| *tier)
        .unwrap_or(0)
}
