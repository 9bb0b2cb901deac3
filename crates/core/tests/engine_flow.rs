//! End-to-end engine flow: raw listings in, ranked recommendations out.

use upsalg_core::domain::listing::RawListing;
use upsalg_core::domain::product::{ExtractedSpecs, Product, ProductId};
use upsalg_core::margin::MarginEndings;
use upsalg_core::recommend::{build_product, Recommender};

fn laptop(
    name: &str,
    price: f64,
    ram_gb: u32,
    cpu_tier: u8,
    high_margin: bool,
) -> Product {
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
        margin_reason: None,
        specs: ExtractedSpecs { ram_gb: Some(ram_gb), cpu_tier: Some(cpu_tier), ..Default::default() },
    }
}

#[test]
fn upgrade_is_kept_and_cpu_trap_is_excluded() {
    let recommender = Recommender::new();
    let reference = laptop("reference", 3000.0, 8, 4, false);
    let upgrade = laptop("upgrade", 3200.0, 16, 6, true);
    let trap = laptop("trap", 2800.0, 8, 1, true);

    let set = recommender.recommend(reference, vec![upgrade, trap]).expect("set");

    assert_eq!(set.candidates.len(), 1);
    let kept = &set.candidates[0];
    assert_eq!(kept.product.name, "upgrade");
    assert!(kept.upgrade_score > 0.0);
    assert!(kept.is_top_pick);
    assert!(kept.upgrade_reason.is_some());
}

#[test]
fn at_most_one_top_pick_and_it_is_high_margin() {
    let recommender = Recommender::new();
    let reference = laptop("reference", 5000.0, 8, 5, false);
    let pool: Vec<Product> = (0..10)
        .map(|i| laptop(&format!("laptop-{i}"), 5200.0 + f64::from(i) * 50.0, 16, 6, i % 2 == 0))
        .collect();

    let set = recommender.recommend(reference, pool).expect("set");

    assert!(set.candidates.len() <= 8);
    let picks: Vec<_> = set.candidates.iter().filter(|c| c.is_top_pick).collect();
    assert_eq!(picks.len(), 1);
    assert!(picks[0].product.is_high_margin);
}

#[test]
fn listings_flow_through_extraction_to_a_recommendation() {
    let reference_listing = RawListing {
        title: "Acer Aspire 3 (i3/8/256 GB) 15.6\" bærbar computer".to_owned(),
        manufacturer: Some("Acer".to_owned()),
        price: Some(3499.0),
        previous_price: None,
        image: None,
        url: Some("https://example.dk/p/aspire3".to_owned()),
        ean: Some("4710180000001".to_owned()),
        in_stock: Some(true),
        description: None,
    };
    let upgrade_listing = RawListing {
        title: "ASUS Vivobook 15 (i5/16/512 GB) 15.6\" bærbar computer".to_owned(),
        manufacturer: Some("Asus".to_owned()),
        price: Some(4498.0),
        previous_price: Some(4999.0),
        image: None,
        url: Some("https://example.dk/p/vivobook15".to_owned()),
        ean: Some("4710180000002".to_owned()),
        in_stock: Some(true),
        description: None,
    };

    let reference =
        build_product(reference_listing, MarginEndings::Standard).expect("reference product");
    let upgrade = build_product(upgrade_listing, MarginEndings::Standard).expect("upgrade product");

    assert_eq!(reference.specs.ram_gb, Some(8));
    assert!(upgrade.is_high_margin, "4498 ends on 98");

    let set = Recommender::new().recommend(reference, vec![upgrade]).expect("set");

    assert_eq!(set.candidates.len(), 1);
    let kept = &set.candidates[0];
    assert_eq!(kept.product.specs.ram_gb, Some(16));
    assert!(kept.is_top_pick);
    assert!((kept.price_difference - 999.0).abs() < f64::EPSILON);
    let reason = kept.upgrade_reason.as_deref().expect("reason");
    assert!(reason.contains("Mere RAM (16GB vs 8GB)"));
    assert!(reason.contains("Høj avance"));
}
