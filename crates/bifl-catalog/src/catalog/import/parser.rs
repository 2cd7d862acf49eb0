use serde::{Deserialize, Deserializer};
use std::io::Read;

use crate::badges::ScoreCard;
use crate::catalog::domain::{Product, ProductId};

const LIST_SEPARATOR: char = '|';

pub(crate) fn parse_products<R: Read>(reader: R) -> Result<Vec<Product>, csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut products = Vec::new();

    for record in csv_reader.deserialize::<ProductRow>() {
        let row = record?;
        products.push(row.into_product());
    }

    Ok(products)
}

#[derive(Debug, Deserialize)]
struct ProductRow {
    id: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    slug: Option<String>,
    name: String,
    #[serde(default)]
    brand: String,
    #[serde(default)]
    category: String,
    price: f64,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    image: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    purchase_url: Option<String>,
    #[serde(default)]
    bifl_total_score: Option<f64>,
    #[serde(default)]
    durability_score: Option<f64>,
    #[serde(default)]
    repairability_score: Option<f64>,
    #[serde(default)]
    warranty_score: Option<f64>,
    #[serde(default)]
    sustainability_score: Option<f64>,
    #[serde(default)]
    social_score: Option<f64>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    certification: Option<String>,
}

impl ProductRow {
    fn into_product(self) -> Product {
        let slug = self.slug.unwrap_or_else(|| slugify(&self.name));
        Product {
            id: ProductId(self.id),
            slug,
            name: self.name,
            brand: self.brand,
            category: self.category,
            price: self.price,
            images: split_list(self.image.as_deref()),
            purchase_url: self.purchase_url,
            scores: ScoreCard {
                bifl_total_score: self.bifl_total_score,
                durability_score: self.durability_score,
                repairability_score: self.repairability_score,
                warranty_score: self.warranty_score,
                sustainability_score: self.sustainability_score,
                social_score: self.social_score,
            },
            certification: self
                .certification
                .as_deref()
                .map(|raw| split_list(Some(raw)))
                .filter(|labels| !labels.is_empty()),
        }
    }
}

fn split_list(raw: Option<&str>) -> Vec<String> {
    raw.map(|value| {
        value
            .split(LIST_SEPARATOR)
            .map(str::trim)
            .filter(|entry| !entry.is_empty())
            .map(str::to_string)
            .collect()
    })
    .unwrap_or_default()
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

pub(crate) fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    slug.trim_end_matches('-').to_string()
}
