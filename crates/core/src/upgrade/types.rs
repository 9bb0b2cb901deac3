//! Types for upgrade scoring and selection.

use serde::{Deserialize, Serialize};

use crate::domain::product::Product;

/// Per-factor score points, exposed alongside the display reason so tests
/// and tooling can see where a score came from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub ram: f64,
    pub cpu: f64,
    pub storage: f64,
    pub gpu: f64,
    pub margin: f64,
    pub price: f64,
}

impl ScoreBreakdown {
    pub fn total(&self) -> f64 {
        self.ram + self.cpu + self.storage + self.gpu + self.margin + self.price
    }
}

/// Outcome of scoring one candidate against the reference.
#[derive(Clone, Debug, PartialEq)]
pub struct UpgradeAssessment {
    pub score: f64,
    pub is_valid_upgrade: bool,
    /// Display-ready Danish reason string, None when nothing accrued.
    pub reason: Option<String>,
    pub breakdown: ScoreBreakdown,
}

/// A candidate product with its reference-relative scoring attached.
///
/// Scores are meaningless without the reference product in context, so this
/// type is built fresh per request and never persisted.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScoredCandidate {
    #[serde(flatten)]
    pub product: Product,
    pub is_top_pick: bool,
    pub price_difference: f64,
    pub upgrade_score: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upgrade_reason: Option<String>,
    pub breakdown: ScoreBreakdown,
    #[serde(skip)]
    pub is_valid_upgrade: bool,
}

impl ScoredCandidate {
    pub fn new(product: Product, reference_price: f64, assessment: UpgradeAssessment) -> Self {
        Self {
            price_difference: product.price - reference_price,
            product,
            is_top_pick: false,
            upgrade_score: assessment.score,
            upgrade_reason: assessment.reason,
            breakdown: assessment.breakdown,
            is_valid_upgrade: assessment.is_valid_upgrade,
        }
    }
}
