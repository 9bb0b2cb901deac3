//! Sqlite round-trip for the product repository.

use upsalg_core::domain::product::{ExtractedSpecs, Product, ProductId};
use upsalg_db::repositories::{ProductRepository, SqlProductRepository};
use upsalg_db::{connect_with_settings, migrations};

async fn prepared_repository() -> SqlProductRepository {
    let pool = connect_with_settings("sqlite::memory:", 1, 30).await.expect("connect");
    migrations::run_pending(&pool).await.expect("migrations");
    SqlProductRepository::new(pool)
}

fn laptop(id: &str, name: &str, brand: &str, price: f64) -> Product {
    Product {
        id: ProductId(id.to_owned()),
        name: name.to_owned(),
        brand: brand.to_owned(),
        price,
        original_price: Some(price + 500.0),
        image_url: Some(format!("https://example.dk/img/{id}.jpg")),
        product_url: format!("https://example.dk/p/{id}"),
        sku: Some(id.to_owned()),
        in_stock: true,
        is_high_margin: price.floor().to_string().ends_with("98"),
        margin_reason: None,
        specs: ExtractedSpecs {
            cpu: Some("Intel Core i5-1335U".to_owned()),
            cpu_tier: Some(4),
            ram: Some("16 GB RAM".to_owned()),
            ram_gb: Some(16),
            storage: Some("512 GB SSD".to_owned()),
            storage_gb: Some(512),
            screen_size: Some(15.6),
            ..Default::default()
        },
    }
}

#[tokio::test]
async fn upsert_then_search_round_trips_products_and_specs() {
    let repo = prepared_repository().await;

    let original = laptop("4711121000002", "ASUS Vivobook 15", "Asus", 4498.0);
    repo.upsert(std::slice::from_ref(&original)).await.expect("upsert");

    let hits = repo.search("vivobook").await.expect("search");
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0], original);
}

#[tokio::test]
async fn upsert_updates_existing_rows_in_place() {
    let repo = prepared_repository().await;

    repo.upsert(&[laptop("1", "ASUS Vivobook 15", "Asus", 4999.0)]).await.expect("insert");
    repo.upsert(&[laptop("1", "ASUS Vivobook 15 OLED", "Asus", 5498.0)]).await.expect("update");

    assert_eq!(repo.count().await.expect("count"), 1);
    let found = repo
        .find_by_id(&ProductId("1".to_owned()))
        .await
        .expect("find")
        .expect("row present");
    assert_eq!(found.name, "ASUS Vivobook 15 OLED");
    assert_eq!(found.price, 5498.0);
}

#[tokio::test]
async fn search_matches_brand_case_insensitively() {
    let repo = prepared_repository().await;

    repo.upsert(&[
        laptop("1", "Vivobook 15", "Asus", 4498.0),
        laptop("2", "IdeaPad Slim 5", "Lenovo", 4799.0),
    ])
    .await
    .expect("upsert");

    let hits = repo.search("LENOVO").await.expect("search");
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].brand, "Lenovo");
}

#[tokio::test]
async fn like_wildcards_in_queries_are_literal() {
    let repo = prepared_repository().await;

    repo.upsert(&[laptop("1", "Vivobook 15", "Asus", 4498.0)]).await.expect("upsert");

    let hits = repo.search("%").await.expect("search");
    assert!(hits.is_empty(), "a literal percent sign matches nothing");
}

#[tokio::test]
async fn count_reflects_rows() {
    let repo = prepared_repository().await;
    assert_eq!(repo.count().await.expect("empty count"), 0);

    repo.upsert(&[
        laptop("1", "Vivobook 15", "Asus", 4498.0),
        laptop("2", "IdeaPad Slim 5", "Lenovo", 4799.0),
    ])
    .await
    .expect("upsert");

    assert_eq!(repo.count().await.expect("count"), 2);
}
