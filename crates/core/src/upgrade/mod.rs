//! Upgrade scoring and recommendation selection.
//!
//! One scoring implementation serves every caller; the ingestion path and
//! the search path must never grow their own copies of these rules.

pub mod scoring;
pub mod selector;
pub mod types;

pub use scoring::assess_upgrade;
pub use selector::select_recommendations;
pub use types::{ScoreBreakdown, ScoredCandidate, UpgradeAssessment};

/// Upper bound on recommendations handed to presentation layers.
pub const MAX_RECOMMENDATIONS: usize = 8;

/// A candidate may cost at most this multiple of the reference price.
pub const PRICE_CEILING_RATIO: f64 = 1.5;

/// Flat bonus for a high-margin candidate.
pub const HIGH_MARGIN_BONUS: f64 = 25.0;
