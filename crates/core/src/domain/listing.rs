//! Raw catalog feed records.
//!
//! Listings arrive from the retailer feed as loosely structured JSON. Every
//! field except the title is optional, and numeric fields may be encoded as
//! numbers or strings depending on feed version. Deserialization is lenient:
//! anything unparseable becomes absent rather than an error.

use serde::{Deserialize, Deserializer, Serialize};

/// A single untrusted product listing from the catalog feed.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RawListing {
    /// Display title, e.g. "ASUS Vivobook 15 (i5/16/512 GB) 15.6\" bærbar".
    pub title: String,
    /// Manufacturer name as the feed reports it.
    #[serde(default)]
    pub manufacturer: Option<String>,
    /// Current sales price.
    #[serde(default, deserialize_with = "lenient_price")]
    pub price: Option<f64>,
    /// Price before the current campaign, when the feed carries one.
    #[serde(default, deserialize_with = "lenient_price")]
    pub previous_price: Option<f64>,
    /// Image descriptor (path or absolute URL).
    #[serde(default)]
    pub image: Option<String>,
    /// Product page URL.
    #[serde(default)]
    pub url: Option<String>,
    /// EAN/barcode. Natural key for persisted products when present.
    #[serde(default)]
    pub ean: Option<String>,
    /// Stock indicator. Absent is treated as in stock downstream.
    #[serde(default)]
    pub in_stock: Option<bool>,
    /// Marketing blurb. Denser than the title, so extraction prefers it.
    #[serde(default)]
    pub description: Option<String>,
}

/// Accepts `1234`, `1234.5`, `"1234"`, `"1234,50"`, `null`, or absence.
fn lenient_price<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(f64),
        Text(String),
        Null(Option<()>),
    }

    let parsed = match Raw::deserialize(deserializer)? {
        Raw::Number(value) => Some(value),
        Raw::Text(value) => value.trim().replace('.', "").replace(',', ".").parse::<f64>().ok(),
        Raw::Null(_) => None,
    };

    Ok(parsed.filter(|value| value.is_finite() && *value >= 0.0))
}

#[cfg(test)]
mod tests {
    use super::RawListing;

    #[test]
    fn deserializes_numeric_and_text_prices() {
        let numeric: RawListing =
            serde_json::from_str(r#"{"title": "Laptop", "price": 4999.0}"#).expect("numeric price");
        assert_eq!(numeric.price, Some(4999.0));

        let text: RawListing =
            serde_json::from_str(r#"{"title": "Laptop", "price": "4.999,50"}"#).expect("text price");
        assert_eq!(text.price, Some(4999.5));
    }

    #[test]
    fn malformed_price_becomes_absent() {
        let listing: RawListing =
            serde_json::from_str(r#"{"title": "Laptop", "price": "ring for pris"}"#)
                .expect("listing with junk price");
        assert_eq!(listing.price, None);
    }

    #[test]
    fn negative_price_is_rejected() {
        let listing: RawListing =
            serde_json::from_str(r#"{"title": "Laptop", "price": -1.0}"#).expect("listing");
        assert_eq!(listing.price, None);
    }

    #[test]
    fn only_title_is_required() {
        let listing: RawListing = serde_json::from_str(r#"{"title": "Laptop"}"#).expect("listing");
        assert_eq!(listing.ean, None);
        assert_eq!(listing.in_stock, None);
    }
}
