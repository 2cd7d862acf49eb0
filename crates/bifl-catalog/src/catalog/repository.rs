use super::domain::{Product, ProductId};

/// Storage abstraction for catalog products.
pub trait ProductRepository: Send + Sync {
    fn list(&self) -> Result<Vec<Product>, RepositoryError>;
    fn fetch(&self, id: &ProductId) -> Result<Option<Product>, RepositoryError>;
    /// Insert or replace by id.
    fn upsert(&self, product: Product) -> Result<(), RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}
