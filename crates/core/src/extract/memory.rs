//! RAM and storage extraction.
//!
//! The retailer's titles usually carry a combined token like
//! "(i5/16/512 GB)". That path is tried first; the standalone patterns only
//! run when it found nothing, so a title can never mix values from both
//! notations. Extracted values are rendered back into canonical display
//! strings ("16 GB RAM", "512 GB SSD") that re-extract to the same numbers.

use std::sync::OnceLock;

use regex::Regex;

/// RAM sizes outside this range are other numbers wearing a GB suffix.
const RAM_RANGE_GB: std::ops::RangeInclusive<u32> = 4..=64;
/// Anything under this is not a plausible laptop drive.
const MIN_STORAGE_GB: u32 = 64;

#[derive(Debug, Default, PartialEq)]
pub struct MemoryExtraction {
    pub ram: Option<String>,
    pub ram_gb: Option<u32>,
    pub storage: Option<String>,
    pub storage_gb: Option<u32>,
}

fn combined_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(?i)\(\s*[0-9a-zæøå .+-]*?/\s*(\d{1,2})\s*/\s*(\d+(?:[.,]\d)?)\s*(gb|tb)?\s*\)")
            .expect("combined memory pattern")
    })
}

fn ram_patterns() -> &'static [Regex] {
    static PATTERNS: OnceLock<Vec<Regex>> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        [
            r"(?i)\b(\d{1,2})\s*gb\s+(?:ddr[45]|lpddr[45]x?|ram)\b",
            r"(?i)/\s*(\d{1,2})\s*gb\s*/",
        ]
        .iter()
        .map(|pattern| Regex::new(pattern).expect("ram pattern"))
        .collect()
    })
}

fn storage_patterns() -> &'static [(Regex, bool)] {
    static PATTERNS: OnceLock<Vec<(Regex, bool)>> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        [
            // (pattern, value is in terabytes)
            (r"(?i)\b(\d+(?:[.,]\d+)?)\s*tb\b(?:\s*(?:ssd|nvme|hdd))?", true),
            (r"(?i)\b(\d{3,4})\s*gb\b(?:\s*(?:ssd|nvme|hdd))?", false),
        ]
        .iter()
        .map(|(pattern, is_tb)| (Regex::new(pattern).expect("storage pattern"), *is_tb))
        .collect()
    })
}

fn ram_display(gb: u32) -> String {
    format!("{gb} GB RAM")
}

fn storage_display(gb: u32) -> String {
    if gb % 1024 == 0 {
        format!("{} TB SSD", gb / 1024)
    } else {
        format!("{gb} GB SSD")
    }
}

fn parse_decimal(raw: &str) -> Option<f64> {
    raw.replace(',', ".").parse::<f64>().ok()
}

/// Extract RAM and storage from the combined notation, when present.
fn extract_combined(text: &str) -> Option<(Option<u32>, Option<u32>)> {
    let captures = combined_pattern().captures(text)?;

    let ram_gb = captures
        .get(1)
        .and_then(|m| m.as_str().parse::<u32>().ok())
        .filter(|gb| RAM_RANGE_GB.contains(gb));

    let unit_is_tb = captures.get(3).is_some_and(|m| m.as_str().eq_ignore_ascii_case("tb"));
    let storage_gb = captures.get(2).and_then(|m| parse_decimal(m.as_str())).and_then(|value| {
        if unit_is_tb {
            Some((value * 1024.0).round() as u32)
        } else {
            let gb = value.round() as u32;
            (gb >= MIN_STORAGE_GB).then_some(gb)
        }
    });

    if ram_gb.is_none() && storage_gb.is_none() {
        return None;
    }
    Some((ram_gb, storage_gb))
}

fn extract_ram(text: &str) -> Option<u32> {
    ram_patterns()
        .iter()
        .find_map(|pattern| pattern.captures(text))
        .and_then(|captures| captures.get(1)?.as_str().parse::<u32>().ok())
        .filter(|gb| RAM_RANGE_GB.contains(gb))
}

fn extract_storage(text: &str) -> Option<u32> {
    for (pattern, is_tb) in storage_patterns() {
        let Some(captures) = pattern.captures(text) else { continue };
        let Some(value) = captures.get(1).and_then(|m| parse_decimal(m.as_str())) else { continue };

        let gb = if *is_tb { (value * 1024.0).round() as u32 } else { value.round() as u32 };
        if gb >= MIN_STORAGE_GB {
            return Some(gb);
        }
    }
    None
}

pub fn extract_memory(text: &str) -> MemoryExtraction {
    let (ram_gb, storage_gb) = match extract_combined(text) {
        Some(found) => found,
        None => (extract_ram(text), extract_storage(text)),
    };

    MemoryExtraction {
        ram: ram_gb.map(ram_display),
        ram_gb,
        storage: storage_gb.map(storage_display),
        storage_gb,
    }
}
