pub mod config;
pub mod domain;
pub mod errors;
pub mod extract;
pub mod margin;
pub mod recommend;
pub mod upgrade;

pub use domain::listing::RawListing;
pub use domain::product::{ExtractedSpecs, Product, ProductId};
pub use errors::{ApplicationError, DomainError, InterfaceError};
pub use extract::extract_specs;
pub use margin::{classify_margin, MarginEndings, MarginVerdict};
pub use recommend::{build_product, CandidateSource, RecommendationSet, Recommender};
pub use upgrade::scoring::assess_upgrade;
pub use upgrade::selector::select_recommendations;
pub use upgrade::types::{ScoreBreakdown, ScoredCandidate, UpgradeAssessment};
