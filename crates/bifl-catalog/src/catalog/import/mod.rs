mod parser;

use std::io::Read;
use std::path::Path;

use super::domain::Product;

#[derive(Debug)]
pub enum ProductImportError {
    Io(std::io::Error),
    Csv(csv::Error),
    DuplicateId(String),
}

impl std::fmt::Display for ProductImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProductImportError::Io(err) => write!(f, "failed to read product export: {}", err),
            ProductImportError::Csv(err) => write!(f, "invalid product CSV data: {}", err),
            ProductImportError::DuplicateId(id) => {
                write!(f, "product id '{}' appears more than once", id)
            }
        }
    }
}

impl std::error::Error for ProductImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ProductImportError::Io(err) => Some(err),
            ProductImportError::Csv(err) => Some(err),
            ProductImportError::DuplicateId(_) => None,
        }
    }
}

impl From<std::io::Error> for ProductImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for ProductImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

/// Reads catalog products from a CSV export.
///
/// Expected headers: `id,slug,name,brand,category,price,image,purchase_url,
/// bifl_total_score,durability_score,repairability_score,warranty_score,
/// sustainability_score,social_score,certification`. `image` and `certification`
/// hold `|`-separated lists, and blank cells are read as missing.
pub struct ProductCsvImporter;

impl ProductCsvImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<Product>, ProductImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<Product>, ProductImportError> {
        let products = parser::parse_products(reader)?;

        let mut seen = std::collections::HashSet::new();
        for product in &products {
            if !seen.insert(product.id.clone()) {
                return Err(ProductImportError::DuplicateId(product.id.0.clone()));
            }
        }

        Ok(products)
    }
}
