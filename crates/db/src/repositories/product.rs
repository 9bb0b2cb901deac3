use sqlx::Row;

use upsalg_core::domain::product::{ExtractedSpecs, Product, ProductId};
use upsalg_core::errors::ApplicationError;
use upsalg_core::recommend::CandidateSource;

use super::{ProductRepository, RepositoryError};
use crate::DbPool;

pub struct SqlProductRepository {
    pool: DbPool,
}

impl SqlProductRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn row_to_product(row: &sqlx::sqlite::SqliteRow) -> Result<Product, RepositoryError> {
    let id: String = row.try_get("id").map_err(|e| RepositoryError::Decode(e.to_string()))?;
    let name: String = row.try_get("name").map_err(|e| RepositoryError::Decode(e.to_string()))?;
    let brand: String = row.try_get("brand").map_err(|e| RepositoryError::Decode(e.to_string()))?;
    let price: f64 = row.try_get("price").map_err(|e| RepositoryError::Decode(e.to_string()))?;
    let original_price: Option<f64> =
        row.try_get("original_price").map_err(|e| RepositoryError::Decode(e.to_string()))?;
    let image_url: Option<String> =
        row.try_get("image_url").map_err(|e| RepositoryError::Decode(e.to_string()))?;
    let product_url: String =
        row.try_get("product_url").map_err(|e| RepositoryError::Decode(e.to_string()))?;
    let sku: Option<String> =
        row.try_get("sku").map_err(|e| RepositoryError::Decode(e.to_string()))?;
    let in_stock: bool =
        row.try_get("in_stock").map_err(|e| RepositoryError::Decode(e.to_string()))?;
    let is_high_margin: bool =
        row.try_get("is_high_margin").map_err(|e| RepositoryError::Decode(e.to_string()))?;
    let margin_reason: Option<String> =
        row.try_get("margin_reason").map_err(|e| RepositoryError::Decode(e.to_string()))?;
    let specs_json: String =
        row.try_get("specs").map_err(|e| RepositoryError::Decode(e.to_string()))?;

    // Specs are lenient on read: a row written before an extractor change
    // degrades to empty specs instead of poisoning the whole result set.
    let specs: ExtractedSpecs = serde_json::from_str(&specs_json).unwrap_or_default();

    Ok(Product {
        id: ProductId(id),
        name,
        brand,
        price,
        original_price,
        image_url,
        product_url,
        sku,
        in_stock,
        is_high_margin,
        margin_reason,
        specs,
    })
}

fn escape_like(query: &str) -> String {
    query.replace('\\', "\\\\").replace('%', "\\%").replace('_', "\\_")
}

#[async_trait::async_trait]
impl ProductRepository for SqlProductRepository {
    async fn upsert(&self, products: &[Product]) -> Result<u64, RepositoryError> {
        let mut written = 0u64;

        for product in products {
            let specs_json = serde_json::to_string(&product.specs)
                .map_err(|e| RepositoryError::Decode(e.to_string()))?;

            sqlx::query(
                "INSERT INTO products
                    (id, name, brand, price, original_price, image_url, product_url,
                     sku, in_stock, is_high_margin, margin_reason, specs, updated_at)
                 VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
                 ON CONFLICT(id) DO UPDATE SET
                    name = excluded.name,
                    brand = excluded.brand,
                    price = excluded.price,
                    original_price = excluded.original_price,
                    image_url = excluded.image_url,
                    product_url = excluded.product_url,
                    sku = excluded.sku,
                    in_stock = excluded.in_stock,
                    is_high_margin = excluded.is_high_margin,
                    margin_reason = excluded.margin_reason,
                    specs = excluded.specs,
                    updated_at = excluded.updated_at",
            )
            .bind(&product.id.0)
            .bind(&product.name)
            .bind(&product.brand)
            .bind(product.price)
            .bind(product.original_price)
            .bind(&product.image_url)
            .bind(&product.product_url)
            .bind(&product.sku)
            .bind(product.in_stock)
            .bind(product.is_high_margin)
            .bind(&product.margin_reason)
            .bind(&specs_json)
            .execute(&self.pool)
            .await?;

            written += 1;
        }

        Ok(written)
    }

    async fn search(&self, query: &str) -> Result<Vec<Product>, RepositoryError> {
        let pattern = format!("%{}%", escape_like(query.trim()));

        let rows = sqlx::query(
            "SELECT id, name, brand, price, original_price, image_url, product_url,
                    sku, in_stock, is_high_margin, margin_reason, specs
             FROM products
             WHERE name LIKE ? ESCAPE '\\'
                OR brand LIKE ? ESCAPE '\\'
             ORDER BY name COLLATE NOCASE, id",
        )
        .bind(&pattern)
        .bind(&pattern)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(row_to_product).collect()
    }

    async fn count(&self) -> Result<u64, RepositoryError> {
        let row = sqlx::query("SELECT COUNT(*) AS count FROM products")
            .fetch_one(&self.pool)
            .await?;
        let count: i64 = row.try_get("count").map_err(|e| RepositoryError::Decode(e.to_string()))?;
        Ok(count.max(0) as u64)
    }

    async fn find_by_id(&self, id: &ProductId) -> Result<Option<Product>, RepositoryError> {
        let row = sqlx::query(
            "SELECT id, name, brand, price, original_price, image_url, product_url,
                    sku, in_stock, is_high_margin, margin_reason, specs
             FROM products
             WHERE id = ?",
        )
        .bind(&id.0)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(row_to_product).transpose()
    }
}

#[async_trait::async_trait]
impl CandidateSource for SqlProductRepository {
    async fn candidates(&self, query: &str) -> Result<Vec<Product>, ApplicationError> {
        ProductRepository::search(self, query)
            .await
            .map_err(|error| ApplicationError::Persistence(error.to_string()))
    }
}
