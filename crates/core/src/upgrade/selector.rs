//! Recommendation selection: rank, bound, and pick.

use std::cmp::Ordering;

use crate::upgrade::types::ScoredCandidate;
use crate::upgrade::{MAX_RECOMMENDATIONS, PRICE_CEILING_RATIO};

/// Keep the valid, affordable candidates, best first, at most
/// [`MAX_RECOMMENDATIONS`], and mark the single top pick.
///
/// The top pick is the highest-scoring high-margin candidate; on a tie the
/// earlier (better-ranked) one wins. When no high-margin candidate survives
/// filtering, nothing is marked — an empty or pick-less result is a valid
/// outcome, not an error.
pub fn select_recommendations(
    candidates: Vec<ScoredCandidate>,
    reference_price: f64,
) -> Vec<ScoredCandidate> {
    let mut kept: Vec<ScoredCandidate> = candidates
        .into_iter()
        .filter(|candidate| {
            candidate.is_valid_upgrade
                && candidate.product.price <= reference_price * PRICE_CEILING_RATIO
        })
        .collect();

    // Stable sort: equal scores keep their incoming order.
    kept.sort_by(|a, b| {
        b.upgrade_score.partial_cmp(&a.upgrade_score).unwrap_or(Ordering::Equal)
    });
    kept.truncate(MAX_RECOMMENDATIONS);

    let mut top: Option<(usize, f64)> = None;
    for (index, candidate) in kept.iter().enumerate() {
        if !candidate.product.is_high_margin {
            continue;
        }
        let replaces = match top {
            Some((_, best_score)) => candidate.upgrade_score > best_score,
            None => true,
        };
        if replaces {
            top = Some((index, candidate.upgrade_score));
        }
    }
    if let Some((index, _)) = top {
        kept[index].is_top_pick = true;
    }

    kept
}
