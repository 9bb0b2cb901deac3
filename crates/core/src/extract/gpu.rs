//! GPU extraction and tier classification.

use std::sync::OnceLock;

use regex::Regex;

fn extraction_patterns() -> &'static [Regex] {
    static PATTERNS: OnceLock<Vec<Regex>> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        [
            // Discrete NVIDIA with model number.
            r"(?i)\b(?:nvidia\s+)?(?:geforce\s+)?rtx\s*\d{4}(?:\s*(?:ti|super))?\b",
            r"(?i)\b(?:nvidia\s+)?(?:geforce\s+)?gtx\s*\d{3,4}(?:\s*ti)?\b",
            // Series mention without a model.
            r"(?i)\bgeforce\s+(?:rtx|gtx)\b",
            // Discrete AMD.
            r"(?i)\bradeon\s+rx\s*\d{3,4}[a-z]{0,2}\b",
            // Intel integrated.
            r"(?i)\b(?:intel\s+)?iris\s+xe(?:\s+graphics)?\b",
            r"(?i)\b(?:intel\s+)?arc\s+(?:a\d{3}m?\s+)?graphics\b",
            r"(?i)\b(?:intel\s+)?uhd\s+graphics(?:\s*\d{3})?\b",
            // AMD integrated.
            r"(?i)\b(?:amd\s+)?radeon(?:\s+\d{3}m)?\s+graphics\b",
        ]
        .iter()
        .map(|pattern| Regex::new(pattern).expect("gpu extraction pattern"))
        .collect()
    })
}

fn tier_ladder() -> &'static [(Regex, u8)] {
    static LADDER: OnceLock<Vec<(Regex, u8)>> = OnceLock::new();
    LADDER.get_or_init(|| {
        [
            (r"(?i)rtx\s*40\d{2}", 7),
            (r"(?i)rtx\s*30\d{2}", 5),
            (r"(?i)\bgtx\b", 3),
            (r"(?i)iris\s+xe|uhd\s+graphics|arc\s+(?:a\d{3}m?\s+)?graphics|radeon(?:\s+\d{3}m)?\s+graphics", 1),
        ]
        .iter()
        .map(|(pattern, tier)| (Regex::new(pattern).expect("gpu tier pattern"), *tier))
        .collect()
    })
}

/// Find the GPU mentioned in the text, if any.
pub fn extract_gpu(text: &str) -> Option<String> {
    extraction_patterns()
        .iter()
        .find_map(|pattern| pattern.find(text))
        .map(|found| found.as_str().trim().to_owned())
}

/// Rank an extracted GPU string. 0 means unknown or unranked discrete.
pub fn gpu_tier(gpu: &str) -> u8 {
    tier_ladder()
        .iter()
        .find(|(pattern, _)| pattern.is_match(gpu))
        .map(|(_, tier)| *tier)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::{extract_gpu, gpu_tier};

    fn tier_of(name: &str) -> u8 {
        let gpu = extract_gpu(name).unwrap_or_else(|| panic!("no gpu found in `{name}`"));
        gpu_tier(&gpu)
    }

    #[test]
    fn rtx_40_series_is_top_tier() {
        assert_eq!(tier_of("NVIDIA GeForce RTX 4070"), 7);
        assert_eq!(tier_of("RTX 4060 Ti"), 7);
    }

    #[test]
    fn rtx_30_series_ranks_below_40() {
        assert_eq!(tier_of("GeForce RTX 3050"), 5);
    }

    #[test]
    fn any_gtx_ranks_three() {
        assert_eq!(tier_of("GeForce GTX 1650"), 3);
        assert_eq!(tier_of("GTX 1080 Ti"), 3);
    }

    #[test]
    fn integrated_graphics_rank_one() {
        assert_eq!(tier_of("Intel Iris Xe"), 1);
        assert_eq!(tier_of("Intel UHD Graphics"), 1);
        assert_eq!(tier_of("Intel Arc Graphics"), 1);
        assert_eq!(tier_of("AMD Radeon 780M Graphics"), 1);
        assert_eq!(tier_of("AMD Radeon Graphics"), 1);
    }

    #[test]
    fn unranked_discrete_cards_are_tier_zero() {
        assert_eq!(tier_of("AMD Radeon RX 7600S"), 0);
    }

    #[test]
    fn no_gpu_in_plain_titles() {
        assert_eq!(extract_gpu("HP Pavilion 15 bærbar computer"), None);
    }

    #[test]
    fn most_specific_pattern_wins() {
        let gpu = extract_gpu("Gaming med GeForce RTX 4080 Super grafik").expect("gpu");
        assert_eq!(gpu, "GeForce RTX 4080 Super");
    }
}
