use bifl_catalog::badges::{BadgeThresholds, ScoreCard};
use bifl_catalog::catalog::{
    Product, ProductCatalog, ProductId, ProductRepository, RepositoryError,
};
use bifl_catalog::error::AppError;
use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex, PoisonError};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

#[derive(Default, Clone)]
pub(crate) struct MemoryProductRepository {
    products: Arc<Mutex<BTreeMap<ProductId, Product>>>,
}

impl MemoryProductRepository {
    pub(crate) fn seeded(products: Vec<Product>) -> Self {
        let repository = Self::default();
        {
            let mut guard = repository
                .products
                .lock()
                .unwrap_or_else(PoisonError::into_inner);
            for product in products {
                guard.insert(product.id.clone(), product);
            }
        }
        repository
    }
}

impl ProductRepository for MemoryProductRepository {
    fn list(&self) -> Result<Vec<Product>, RepositoryError> {
        let guard = self
            .products
            .lock()
            .map_err(|_| RepositoryError::Unavailable("catalog mutex poisoned".to_string()))?;
        Ok(guard.values().cloned().collect())
    }

    fn fetch(&self, id: &ProductId) -> Result<Option<Product>, RepositoryError> {
        let guard = self
            .products
            .lock()
            .map_err(|_| RepositoryError::Unavailable("catalog mutex poisoned".to_string()))?;
        Ok(guard.get(id).cloned())
    }

    fn upsert(&self, product: Product) -> Result<(), RepositoryError> {
        let mut guard = self
            .products
            .lock()
            .map_err(|_| RepositoryError::Unavailable("catalog mutex poisoned".to_string()))?;
        guard.insert(product.id.clone(), product);
        Ok(())
    }
}

fn sample_product(
    id: &str,
    name: &str,
    brand: &str,
    category: &str,
    price: f64,
    scores: ScoreCard,
) -> Product {
    Product {
        id: ProductId(id.to_string()),
        slug: id.to_string(),
        name: name.to_string(),
        brand: brand.to_string(),
        category: category.to_string(),
        price,
        images: vec![format!("/images/products/{id}.webp")],
        purchase_url: Some(format!("https://shop.example/{id}")),
        scores,
        certification: None,
    }
}

/// Catalog used when no CSV export is configured.
pub(crate) fn sample_products() -> Vec<Product> {
    let mut wool_blanket = sample_product(
        "wool-blanket",
        "Merino Wool Blanket",
        "Faribault",
        "Home",
        189.0,
        ScoreCard::rated(8.2, 8.0, 6.5, 7.0, 9.1, 7.8),
    );
    wool_blanket.certification = Some(vec!["EcoHero".to_string()]);

    vec![
        sample_product(
            "cast-iron-skillet",
            "Cast Iron Skillet 12\"",
            "Lodge",
            "Kitchen",
            44.9,
            ScoreCard::rated(9.5, 9.0, 5.0, 8.5, 5.0, 5.0),
        ),
        sample_product(
            "hiking-socks",
            "Hiker Micro Crew Socks",
            "Darn Tough",
            "Apparel",
            26.0,
            ScoreCard::rated(8.8, 8.6, 3.0, 10.0, 6.5, 9.2),
        ),
        sample_product(
            "chef-knife",
            "Classic 8\" Chef's Knife",
            "Wusthof",
            "Kitchen",
            170.0,
            ScoreCard::rated(8.0, 7.5, 5.0, 7.0, 5.0, 5.0),
        ),
        sample_product(
            "work-boots",
            "Resoleable Work Boots",
            "Red Wing",
            "Apparel",
            349.0,
            ScoreCard::rated(8.9, 9.1, 9.4, 6.0, 6.8, 8.0),
        ),
        wool_blanket,
    ]
}

/// Catalog seeded from the CSV export when one is given, otherwise from the samples.
pub(crate) fn build_catalog(
    catalog_csv: Option<&Path>,
) -> Result<ProductCatalog<MemoryProductRepository>, AppError> {
    match catalog_csv {
        Some(path) => {
            let repository = Arc::new(MemoryProductRepository::default());
            let catalog = ProductCatalog::new(repository, BadgeThresholds::default());
            catalog.import_path(path)?;
            Ok(catalog)
        }
        None => {
            let repository = Arc::new(MemoryProductRepository::seeded(sample_products()));
            Ok(ProductCatalog::new(repository, BadgeThresholds::default()))
        }
    }
}

pub(crate) fn parse_score(raw: &str) -> Result<f64, String> {
    let value: f64 = raw
        .trim()
        .parse()
        .map_err(|err| format!("failed to parse '{raw}' as a score ({err})"))?;
    if (0.0..=10.0).contains(&value) {
        Ok(value)
    } else {
        Err(format!("score {value} is outside the 0-10 scale"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bifl_catalog::catalog::CatalogError;

    #[test]
    fn parse_score_enforces_scale() {
        assert_eq!(parse_score(" 8.5 "), Ok(8.5));
        assert!(parse_score("10.1").is_err());
        assert!(parse_score("-1").is_err());
        assert!(parse_score("high").is_err());
    }

    #[test]
    fn build_catalog_reports_missing_csv() {
        let result = build_catalog(Some(Path::new("/nonexistent/catalog.csv")));
        assert!(matches!(
            result,
            Err(AppError::Catalog(CatalogError::Import(_)))
        ));
    }

    #[test]
    fn build_catalog_defaults_to_samples() {
        let catalog = build_catalog(None).expect("sample catalog");
        assert_eq!(catalog.list(Some("kitchen")).expect("list").len(), 2);
    }

    #[test]
    fn seeded_repository_lists_sample_catalog() {
        let repository = MemoryProductRepository::seeded(sample_products());
        let products = repository.list().expect("list succeeds");
        assert_eq!(products.len(), 5);
        assert!(repository
            .fetch(&ProductId("work-boots".to_string()))
            .expect("fetch succeeds")
            .is_some());
    }
}
