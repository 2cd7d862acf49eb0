//! Product catalog records, storage port and the browse/detail service.

pub mod domain;
pub mod import;
pub mod repository;
pub mod router;
pub mod service;


pub use domain::{Product, ProductId};
pub use import::{ProductCsvImporter, ProductImportError};
pub use repository::{ProductRepository, RepositoryError};
pub use router::catalog_router;
pub use service::{CatalogError, ProductCatalog, ProductDetailView, ProductSummaryView};
