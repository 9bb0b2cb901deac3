//! Search orchestration: listing normalization, scoring, and selection.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::listing::RawListing;
use crate::domain::product::{Product, ProductId};
use crate::errors::{ApplicationError, DomainError};
use crate::extract::extract_specs;
use crate::margin::{classify_margin, MarginEndings};
use crate::upgrade::types::ScoredCandidate;
use crate::upgrade::{assess_upgrade, select_recommendations};

/// Where candidate pools come from. Implemented by the product repository;
/// tests supply fixed pools.
#[async_trait]
pub trait CandidateSource: Send + Sync {
    async fn candidates(&self, query: &str) -> Result<Vec<Product>, ApplicationError>;
}

/// Normalize a raw feed listing into a Product.
///
/// Returns None when the listing has no usable price — an unpriced product
/// can never be scored, so it never enters the catalog. Listings without an
/// EAN get a minted id; the EAN doubles as SKU when present.
pub fn build_product(listing: RawListing, endings: MarginEndings) -> Option<Product> {
    let price = listing.price?;
    let specs = extract_specs(&listing.title, listing.description.as_deref());
    let brand = listing.manufacturer.unwrap_or_default();
    let verdict = classify_margin(&brand, price, endings);
    let id = listing.ean.clone().unwrap_or_else(|| Uuid::new_v4().to_string());

    Some(Product {
        id: ProductId(id),
        name: listing.title,
        brand,
        price,
        original_price: listing.previous_price,
        image_url: listing.image,
        product_url: listing.url.unwrap_or_default(),
        sku: listing.ean,
        in_stock: listing.in_stock.unwrap_or(true),
        is_high_margin: verdict.is_high_margin,
        margin_reason: verdict.reason,
        specs,
    })
}

/// A reference product with its ranked upgrade candidates.
#[derive(Clone, Debug, serde::Serialize)]
pub struct RecommendationSet {
    pub reference: Product,
    pub candidates: Vec<ScoredCandidate>,
}

impl RecommendationSet {
    pub fn top_pick(&self) -> Option<&ScoredCandidate> {
        self.candidates.iter().find(|candidate| candidate.is_top_pick)
    }
}

/// Composes scoring and selection over a candidate pool.
#[derive(Clone, Copy, Debug, Default)]
pub struct Recommender;

impl Recommender {
    pub fn new() -> Self {
        Self
    }

    /// Score a pool against the reference and select the recommendations.
    ///
    /// The pool is scored as-is; a pool entry sharing the reference id is
    /// skipped so a store query that returns the reference again cannot
    /// recommend the product to itself.
    pub fn recommend(
        &self,
        reference: Product,
        pool: Vec<Product>,
    ) -> Result<RecommendationSet, DomainError> {
        if !reference.price.is_finite() || reference.price <= 0.0 {
            return Err(DomainError::UnpricedReference);
        }

        let scored: Vec<ScoredCandidate> = pool
            .into_iter()
            .filter(|candidate| candidate.id != reference.id)
            .map(|candidate| {
                let assessment = assess_upgrade(&candidate, &reference);
                ScoredCandidate::new(candidate, reference.price, assessment)
            })
            .collect();

        let candidates = select_recommendations(scored, reference.price);
        Ok(RecommendationSet { reference, candidates })
    }

    /// Pull a pool for the query and recommend against its first hit.
    ///
    /// Returns None when the query matched nothing. A pool of one — the
    /// reference alone — yields a reference-only result.
    pub async fn search(
        &self,
        source: &dyn CandidateSource,
        query: &str,
    ) -> Result<Option<RecommendationSet>, ApplicationError> {
        let mut pool = source.candidates(query).await?;
        if pool.is_empty() {
            return Ok(None);
        }

        let reference = pool.remove(0);
        let set = self.recommend(reference, pool)?;
        Ok(Some(set))
    }
}
