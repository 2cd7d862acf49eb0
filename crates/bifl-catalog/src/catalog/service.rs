use std::io::Read;
use std::path::Path;
use std::sync::Arc;

use serde::Serialize;
use tracing::info;

use super::domain::{Product, ProductId};
use super::import::{ProductCsvImporter, ProductImportError};
use super::repository::{ProductRepository, RepositoryError};
use crate::badges::{BadgeDisplay, BadgeEngine, BadgeSet, BadgeThresholds, ScoredProduct};
use crate::compare::ComparableProduct;

/// Listing card for browse pages.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductSummaryView {
    pub id: ProductId,
    pub slug: String,
    pub name: String,
    pub brand: String,
    pub category: String,
    pub price: f64,
    pub thumbnail: Option<String>,
    pub average_score: Option<f64>,
    pub badges: BadgeSet,
}

/// Product detail page payload.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDetailView {
    pub product: Product,
    pub average_score: Option<f64>,
    pub badges: BadgeSet,
    pub badge_details: Vec<BadgeDisplay>,
}

/// Service composing the product repository with the badge rules.
pub struct ProductCatalog<R> {
    repository: Arc<R>,
    engine: Arc<BadgeEngine>,
}

impl<R> ProductCatalog<R>
where
    R: ProductRepository + 'static,
{
    pub fn new(repository: Arc<R>, thresholds: BadgeThresholds) -> Self {
        Self {
            repository,
            engine: Arc::new(BadgeEngine::new(thresholds)),
        }
    }

    /// Products sorted by name, optionally restricted to one category.
    pub fn list(&self, category: Option<&str>) -> Result<Vec<ProductSummaryView>, CatalogError> {
        let mut products = self.repository.list()?;
        if let Some(category) = category.filter(|value| !value.trim().is_empty()) {
            products.retain(|product| product.in_category(category));
        }
        products.sort_by(|a, b| a.name.cmp(&b.name));

        Ok(products
            .into_iter()
            .map(|product| ProductSummaryView {
                badges: self.engine.award(&product.scored()),
                average_score: product.average_score(),
                thumbnail: product.images.first().cloned(),
                id: product.id,
                slug: product.slug,
                name: product.name,
                brand: product.brand,
                category: product.category,
                price: product.price,
            })
            .collect())
    }

    pub fn detail(&self, id: &ProductId) -> Result<ProductDetailView, CatalogError> {
        let product = self.fetch(id)?;
        let badges = self.engine.award(&product.scored());

        Ok(ProductDetailView {
            average_score: product.average_score(),
            badge_details: badges.resolved(),
            badges,
            product,
        })
    }

    /// Compare snapshot of a catalog product.
    pub fn comparable(&self, id: &ProductId) -> Result<ComparableProduct, CatalogError> {
        Ok(self.fetch(id)?.comparable())
    }

    pub fn badges(&self, product: &ScoredProduct) -> BadgeSet {
        self.engine.award(product)
    }

    /// Load a CSV export into the repository, returning how many products were written.
    pub fn import<Rd: Read>(&self, reader: Rd) -> Result<usize, CatalogError> {
        let products = ProductCsvImporter::from_reader(reader)?;
        self.store_imported(products)
    }

    pub fn import_path<P: AsRef<Path>>(&self, path: P) -> Result<usize, CatalogError> {
        let products = ProductCsvImporter::from_path(path)?;
        self.store_imported(products)
    }

    fn store_imported(&self, products: Vec<Product>) -> Result<usize, CatalogError> {
        let count = products.len();
        for product in products {
            self.repository.upsert(product)?;
        }
        info!(count, "imported catalog products");
        Ok(count)
    }

    fn fetch(&self, id: &ProductId) -> Result<Product, CatalogError> {
        self.repository
            .fetch(id)?
            .ok_or_else(|| CatalogError::NotFound(id.clone()))
    }
}

/// Error raised by the catalog service.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("product '{0}' not found")]
    NotFound(ProductId),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error(transparent)]
    Import(#[from] ProductImportError),
}
