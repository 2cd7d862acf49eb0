use std::fmt;

use serde::{Deserialize, Serialize};

use crate::badges::{ScoreCard, ScoredProduct};
use crate::compare::ComparableProduct;

/// Identifier wrapper for catalog products.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ProductId(pub String);

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Catalog record for a product and its scoring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub slug: String,
    pub name: String,
    pub brand: String,
    pub category: String,
    pub price: f64,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub purchase_url: Option<String>,
    #[serde(flatten)]
    pub scores: ScoreCard,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub certification: Option<Vec<String>>,
}

impl Product {
    pub fn average_score(&self) -> Option<f64> {
        self.scores.average()
    }

    pub fn scored(&self) -> ScoredProduct {
        ScoredProduct {
            scores: self.scores.clone(),
            certification: self.certification.clone(),
        }
    }

    pub fn comparable(&self) -> ComparableProduct {
        ComparableProduct {
            id: self.id.0.clone(),
            name: self.name.clone(),
            price: self.price,
            images: self.images.clone(),
            average_score: self.average_score(),
            purchase_url: self.purchase_url.clone(),
        }
    }

    pub fn in_category(&self, category: &str) -> bool {
        self.category.eq_ignore_ascii_case(category.trim())
    }
}
