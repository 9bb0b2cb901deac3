use async_trait::async_trait;
use thiserror::Error;

use upsalg_core::domain::product::{Product, ProductId};

pub mod memory;
pub mod product;

pub use memory::InMemoryProductRepository;
pub use product::SqlProductRepository;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("decode error: {0}")]
    Decode(String),
}

/// Store contract for catalog products.
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Insert or update by id. Returns the number of records written.
    async fn upsert(&self, products: &[Product]) -> Result<u64, RepositoryError>;

    /// Case-insensitive substring search over name and brand.
    async fn search(&self, query: &str) -> Result<Vec<Product>, RepositoryError>;

    async fn count(&self) -> Result<u64, RepositoryError>;

    async fn find_by_id(&self, id: &ProductId) -> Result<Option<Product>, RepositoryError>;
}
