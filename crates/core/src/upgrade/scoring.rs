//! Upgrade scoring: one candidate against one reference product.
//!
//! The score is additive across independent factors, weighted RAM > CPU >
//! storage > GPU. Band bonuses reward absolute capability while the delta
//! bonuses reward improvement over the reference, so a factor can earn both.
//! Missing spec values count as 0: they earn nothing and are only penalized
//! where a rule explicitly requires a known value, so absent data is never
//! punished as if it were a real downgrade.

use crate::domain::product::Product;
use crate::upgrade::types::{ScoreBreakdown, UpgradeAssessment};
use crate::upgrade::{HIGH_MARGIN_BONUS, PRICE_CEILING_RATIO};

/// Score a candidate against the reference and apply the validity gates.
pub fn assess_upgrade(candidate: &Product, reference: &Product) -> UpgradeAssessment {
    let mut breakdown = ScoreBreakdown::default();
    let mut reasons: Vec<String> = Vec::new();
    let mut warnings: Vec<&'static str> = Vec::new();

    let cand_ram = candidate.specs.ram_gb.unwrap_or(0);
    let ref_ram = reference.specs.ram_gb.unwrap_or(0);
    let cand_cpu = candidate.specs.cpu_tier.unwrap_or(0);
    let ref_cpu = reference.specs.cpu_tier.unwrap_or(0);
    let cand_storage = candidate.specs.storage_gb.unwrap_or(0);
    let ref_storage = reference.specs.storage_gb.unwrap_or(0);
    let cand_gpu = candidate.specs.gpu_tier.unwrap_or(0);
    let ref_gpu = reference.specs.gpu_tier.unwrap_or(0);

    // RAM: capability band plus improvement delta.
    if cand_ram >= 32 {
        breakdown.ram += 30.0;
    } else if cand_ram >= 16 {
        breakdown.ram += 20.0;
    } else if cand_ram >= 8 {
        breakdown.ram += 5.0;
    } else if cand_ram > 0 {
        breakdown.ram -= 20.0;
        warnings.push("Under 8GB RAM");
    }
    if cand_ram > ref_ram {
        breakdown.ram += 3.0 * f64::from(cand_ram - ref_ram);
        if ref_ram > 0 {
            reasons.push(format!("Mere RAM ({cand_ram}GB vs {ref_ram}GB)"));
        } else {
            reasons.push(format!("Mere RAM ({cand_ram}GB)"));
        }
    }

    // CPU.
    if cand_cpu >= 8 {
        breakdown.cpu += 15.0;
    } else if cand_cpu >= 6 {
        breakdown.cpu += 10.0;
    } else if cand_cpu == 1 {
        breakdown.cpu -= 40.0;
        warnings.push("Undgå: Celeron/Pentium CPU");
    }
    if cand_cpu > ref_cpu {
        breakdown.cpu += 8.0 * f64::from(cand_cpu - ref_cpu);
        reasons.push("Hurtigere processor".to_owned());
    }

    // Storage.
    if cand_storage >= 1024 {
        breakdown.storage += 10.0;
    } else if cand_storage >= 512 {
        breakdown.storage += 5.0;
    } else if cand_storage > 0 && cand_storage < 256 {
        breakdown.storage -= 5.0;
    }
    if cand_storage > ref_storage {
        breakdown.storage += 0.02 * f64::from(cand_storage - ref_storage);
        reasons.push("Større lagerplads".to_owned());
    }

    // GPU only matters when either side is gaming hardware.
    let gaming_relevant = ref_gpu >= 3 || cand_gpu >= 5;
    if gaming_relevant && cand_gpu > ref_gpu {
        breakdown.gpu += 3.0 * f64::from(cand_gpu - ref_gpu);
        reasons.push("Bedre grafikkort".to_owned());
    }

    if candidate.is_high_margin {
        breakdown.margin += HIGH_MARGIN_BONUS;
        reasons.push("Høj avance".to_owned());
    }

    // Price proximity: the easiest upsell sits close to what the customer
    // already looked at.
    if reference.price > 0.0 {
        let ratio = candidate.price / reference.price;
        if (0.9..=1.2).contains(&ratio) {
            breakdown.price += 10.0;
        } else if ratio > 1.2 && ratio <= 1.4 {
            breakdown.price += 5.0;
        }
    }

    let has_ram_downgrade = ref_ram > 0 && cand_ram > 0 && cand_ram < ref_ram;
    let has_bad_cpu_downgrade = cand_cpu == 1 && ref_cpu >= 4;
    let has_major_cpu_regression =
        cand_cpu > 0 && ref_cpu > 0 && i16::from(cand_cpu) - i16::from(ref_cpu) < -2;
    let over_price_ceiling = candidate.price > reference.price * PRICE_CEILING_RATIO;
    let has_improvement = cand_ram > ref_ram
        || cand_cpu > ref_cpu
        || cand_storage > ref_storage
        || cand_gpu > ref_gpu;

    let is_valid_upgrade = !has_ram_downgrade
        && !has_bad_cpu_downgrade
        && !has_major_cpu_regression
        && !over_price_ceiling
        && (has_improvement || candidate.is_high_margin);

    let mut clauses = reasons;
    if !warnings.is_empty() {
        clauses.push(format!("Advarsel: {}", warnings.join(", ")));
    }
    let reason = (!clauses.is_empty()).then(|| clauses.join(", "));

    UpgradeAssessment { score: breakdown.total(), is_valid_upgrade, reason, breakdown }
}

#[cfg(test)]
mod tests {
    use super::assess_upgrade;
    use crate::domain::product::{ExtractedSpecs, Product, ProductId};

    fn laptop(name: &str, price: f64, specs: ExtractedSpecs, high_margin: bool) -> Product {
        Product {
            id: ProductId(name.to_owned()),
            name: name.to_owned(),
            brand: "Testbrand".to_owned(),
            price,
            original_price: None,
            image_url: None,
            product_url: format!("https://example.dk/p/{name}"),
            sku: None,
            in_stock: true,
            is_high_margin: high_margin,
            margin_reason: high_margin.then(|| "Høj avance".to_owned()),
            specs,
        }
    }

    fn specs(ram_gb: Option<u32>, cpu_tier: Option<u8>, storage_gb: Option<u32>) -> ExtractedSpecs {
        ExtractedSpecs { ram_gb, cpu_tier, storage_gb, ..Default::default() }
    }

    #[test]
    fn ram_band_and_delta_both_count() {
        let reference = laptop("ref", 5000.0, specs(Some(8), None, None), false);
        let candidate = laptop("cand", 5000.0, specs(Some(16), None, None), false);

        let assessment = assess_upgrade(&candidate, &reference);
        // 20 band + 3 per GB over the reference.
        assert_eq!(assessment.breakdown.ram, 20.0 + 3.0 * 8.0);
        assert!(assessment.is_valid_upgrade);
        assert!(assessment.reason.as_deref().unwrap().contains("Mere RAM (16GB vs 8GB)"));
    }

    #[test]
    fn ram_downgrade_is_never_valid() {
        let reference = laptop("ref", 5000.0, specs(Some(16), Some(4), None), false);
        let candidate = laptop("cand", 4000.0, specs(Some(8), Some(8), Some(1024)), true);

        let assessment = assess_upgrade(&candidate, &reference);
        assert!(!assessment.is_valid_upgrade);
        // The score itself is indifferent to validity.
        assert!(assessment.score > 0.0);
    }

    #[test]
    fn missing_ram_on_either_side_is_not_a_downgrade() {
        let reference = laptop("ref", 5000.0, specs(Some(16), None, None), false);
        let candidate = laptop("cand", 5000.0, specs(None, Some(8), None), false);

        let assessment = assess_upgrade(&candidate, &reference);
        assert!(assessment.is_valid_upgrade);
    }

    #[test]
    fn bottom_tier_cpu_against_decent_reference_is_invalid() {
        let reference = laptop("ref", 3000.0, specs(Some(8), Some(4), None), false);
        let candidate = laptop("cand", 2800.0, specs(Some(8), Some(1), None), true);

        let assessment = assess_upgrade(&candidate, &reference);
        assert!(!assessment.is_valid_upgrade);
        assert!(assessment.reason.as_deref().unwrap().contains("Advarsel: Undgå: Celeron/Pentium CPU"));
    }

    #[test]
    fn major_cpu_regression_is_invalid() {
        let reference = laptop("ref", 5000.0, specs(Some(16), Some(10), None), false);
        let candidate = laptop("cand", 5000.0, specs(Some(32), Some(6), None), false);

        let assessment = assess_upgrade(&candidate, &reference);
        assert!(!assessment.is_valid_upgrade);
    }

    #[test]
    fn small_cpu_regression_is_tolerated() {
        let reference = laptop("ref", 5000.0, specs(Some(16), Some(8), None), false);
        let candidate = laptop("cand", 5000.0, specs(Some(32), Some(6), None), false);

        let assessment = assess_upgrade(&candidate, &reference);
        assert!(assessment.is_valid_upgrade);
    }

    #[test]
    fn price_ceiling_is_inclusive() {
        let reference = laptop("ref", 3000.0, specs(Some(8), None, None), false);
        let at_ceiling = laptop("cand", 4500.0, specs(Some(16), None, None), false);
        let over_ceiling = laptop("cand2", 4530.0, specs(Some(16), None, None), false);

        assert!(assess_upgrade(&at_ceiling, &reference).is_valid_upgrade);
        assert!(!assess_upgrade(&over_ceiling, &reference).is_valid_upgrade);
    }

    #[test]
    fn no_improvement_and_no_margin_is_invalid() {
        let reference = laptop("ref", 5000.0, specs(Some(16), Some(6), Some(512)), false);
        let candidate = laptop("cand", 5000.0, specs(Some(16), Some(6), Some(512)), false);

        let assessment = assess_upgrade(&candidate, &reference);
        assert!(!assessment.is_valid_upgrade);
    }

    #[test]
    fn high_margin_alone_keeps_a_sidegrade_valid() {
        let reference = laptop("ref", 5000.0, specs(Some(16), Some(6), Some(512)), false);
        let candidate = laptop("cand", 5000.0, specs(Some(16), Some(6), Some(512)), true);

        let assessment = assess_upgrade(&candidate, &reference);
        assert!(assessment.is_valid_upgrade);
        assert!(assessment.breakdown.margin > 0.0);
        assert!(assessment.reason.as_deref().unwrap().contains("Høj avance"));
    }

    #[test]
    fn gpu_bonus_only_in_gaming_context() {
        // Integrated vs slightly better integrated: nobody cares.
        let reference = laptop("ref", 5000.0, ExtractedSpecs { gpu_tier: Some(1), ..Default::default() }, false);
        let candidate = laptop("cand", 5000.0, ExtractedSpecs { gpu_tier: Some(3), ..Default::default() }, false);
        assert_eq!(assess_upgrade(&candidate, &reference).breakdown.gpu, 0.0);

        // Reference already gaming class: delta counts.
        let gaming_ref = laptop("ref2", 8000.0, ExtractedSpecs { gpu_tier: Some(3), ..Default::default() }, false);
        let gaming_cand = laptop("cand2", 9000.0, ExtractedSpecs { gpu_tier: Some(7), ..Default::default() }, false);
        let assessment = assess_upgrade(&gaming_cand, &gaming_ref);
        assert_eq!(assessment.breakdown.gpu, 3.0 * 4.0);
        assert!(assessment.reason.as_deref().unwrap().contains("Bedre grafikkort"));

        // Strong discrete candidate pulls in the bonus on its own.
        let plain_ref = laptop("ref3", 8000.0, ExtractedSpecs::default(), false);
        let discrete_cand = laptop("cand3", 9000.0, ExtractedSpecs { gpu_tier: Some(5), ..Default::default() }, false);
        assert_eq!(assess_upgrade(&discrete_cand, &plain_ref).breakdown.gpu, 3.0 * 5.0);
    }

    #[test]
    fn price_proximity_bands() {
        let reference = laptop("ref", 5000.0, specs(Some(8), None, None), false);

        let close = laptop("close", 5500.0, specs(Some(16), None, None), false);
        assert_eq!(assess_upgrade(&close, &reference).breakdown.price, 10.0);

        let stretch = laptop("stretch", 6800.0, specs(Some(16), None, None), false);
        assert_eq!(assess_upgrade(&stretch, &reference).breakdown.price, 5.0);

        let far = laptop("far", 7400.0, specs(Some(16), None, None), false);
        assert_eq!(assess_upgrade(&far, &reference).breakdown.price, 0.0);
    }

    #[test]
    fn empty_specs_accrue_no_reason() {
        let reference = laptop("ref", 5000.0, ExtractedSpecs::default(), false);
        let candidate = laptop("cand", 6500.0, ExtractedSpecs::default(), false);

        let assessment = assess_upgrade(&candidate, &reference);
        assert_eq!(assessment.reason, None);
        assert!(!assessment.is_valid_upgrade);
    }

    #[test]
    fn warnings_land_in_a_single_suffix_clause() {
        let reference = laptop("ref", 3000.0, specs(Some(8), Some(1), None), false);
        let candidate = laptop("cand", 3000.0, specs(Some(6), Some(1), Some(512)), true);

        let assessment = assess_upgrade(&candidate, &reference);
        let reason = assessment.reason.expect("reason");
        let advarsel_at = reason.find("Advarsel:").expect("warning clause");
        assert!(reason[advarsel_at..].contains("Under 8GB RAM"));
        assert!(reason[advarsel_at..].contains("Undgå: Celeron/Pentium CPU"));
        assert_eq!(reason.matches("Advarsel:").count(), 1);
    }
}
