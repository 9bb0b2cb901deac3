//! Margin classification.
//!
//! A product is flagged as high margin either because it carries the house
//! brand, or because its price ends on one of the campaign endings the
//! merchandising team uses for high-margin stock. The ending set is an
//! explicit policy value so both the ingestion path and the search path run
//! the same classifier with a visible choice of rule.

use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

/// House brand that is always high margin regardless of price.
const HOUSE_BRAND: &str = "cepter";

/// Which price endings mark a product as high margin.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarginEndings {
    /// Prices ending on 98.
    #[default]
    Standard,
    /// Prices ending on 98 or 92.
    Extended,
}

impl MarginEndings {
    pub fn endings(self) -> &'static [&'static str] {
        match self {
            Self::Standard => &["98"],
            Self::Extended => &["98", "92"],
        }
    }
}

impl std::str::FromStr for MarginEndings {
    type Err = DomainError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "standard" => Ok(Self::Standard),
            "extended" => Ok(Self::Extended),
            other => Err(DomainError::InvariantViolation(format!(
                "unsupported margin endings policy `{other}` (expected standard|extended)"
            ))),
        }
    }
}

/// Outcome of margin classification.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MarginVerdict {
    pub is_high_margin: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl MarginVerdict {
    fn high(reason: impl Into<String>) -> Self {
        Self { is_high_margin: true, reason: Some(reason.into()) }
    }
}

/// Classify a product as high margin from brand and price.
///
/// Rules in order: house brand wins, then price ending. The price is floored
/// before the ending check so "3498.75" still ends on 98.
pub fn classify_margin(brand: &str, price: f64, endings: MarginEndings) -> MarginVerdict {
    if brand.trim().eq_ignore_ascii_case(HOUSE_BRAND) {
        return MarginVerdict::high("Cepter brand");
    }

    if price.is_finite() && price >= 0.0 {
        let whole = (price.floor() as u64).to_string();
        for ending in endings.endings() {
            if whole.ends_with(ending) {
                return MarginVerdict::high(format!("Pris ender på {ending}"));
            }
        }
    }

    MarginVerdict::default()
}
