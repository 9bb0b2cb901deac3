use std::collections::HashMap;

use tokio::sync::RwLock;

use upsalg_core::domain::product::{Product, ProductId};
use upsalg_core::errors::ApplicationError;
use upsalg_core::recommend::CandidateSource;

use super::{ProductRepository, RepositoryError};

/// In-memory stand-in for the sqlite repository, used by tests and by the
/// engine crate's own test doubles.
#[derive(Default)]
pub struct InMemoryProductRepository {
    products: RwLock<HashMap<String, Product>>,
}

#[async_trait::async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn upsert(&self, incoming: &[Product]) -> Result<u64, RepositoryError> {
        let mut products = self.products.write().await;
        for product in incoming {
            products.insert(product.id.0.clone(), product.clone());
        }
        Ok(incoming.len() as u64)
    }

    async fn search(&self, query: &str) -> Result<Vec<Product>, RepositoryError> {
        let needle = query.trim().to_lowercase();
        let products = self.products.read().await;

        let mut hits: Vec<Product> = products
            .values()
            .filter(|product| {
                product.name.to_lowercase().contains(&needle)
                    || product.brand.to_lowercase().contains(&needle)
            })
            .cloned()
            .collect();

        hits.sort_by(|a, b| {
            a.name.to_lowercase().cmp(&b.name.to_lowercase()).then_with(|| a.id.0.cmp(&b.id.0))
        });
        Ok(hits)
    }

    async fn count(&self) -> Result<u64, RepositoryError> {
        Ok(self.products.read().await.len() as u64)
    }

    async fn find_by_id(&self, id: &ProductId) -> Result<Option<Product>, RepositoryError> {
        Ok(self.products.read().await.get(&id.0).cloned())
    }
}

#[async_trait::async_trait]
impl CandidateSource for InMemoryProductRepository {
    async fn candidates(&self, query: &str) -> Result<Vec<Product>, ApplicationError> {
        ProductRepository::search(self, query)
            .await
            .map_err(|error| ApplicationError::Persistence(error.to_string()))
    }
}
