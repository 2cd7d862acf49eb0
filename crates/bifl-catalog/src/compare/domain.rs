use serde::{Deserialize, Serialize};

/// Product snapshot held in a compare set; `id` is the dedup and removal key.
///
/// Field names match the JSON written by the browser storefront, so persisted slots can be
/// shared between the two.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparableProduct {
    pub id: String,
    pub name: String,
    pub price: f64,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub average_score: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub purchase_url: Option<String>,
}

impl ComparableProduct {
    pub fn thumbnail(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }
}
