use serde::{Deserialize, Serialize};

use super::domain::ComparableProduct;
use super::set::MAX_COMPARE;

/// One column of the side-by-side comparison.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompareRow {
    pub product_id: String,
    pub name: String,
    pub price: f64,
    pub average_score: Option<f64>,
    pub purchase_url: Option<String>,
    pub thumbnail: Option<String>,
}

/// Floating bar summary shown while products are selected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompareBar {
    pub count: usize,
    pub capacity: usize,
    pub thumbnails: Vec<String>,
}

/// Data behind the comparison modal and floating bar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompareTable {
    pub rows: Vec<CompareRow>,
    pub bar: CompareBar,
    pub lowest_price_id: Option<String>,
    pub top_score_id: Option<String>,
}

impl CompareTable {
    pub fn from_items(items: &[ComparableProduct]) -> Self {
        let rows: Vec<CompareRow> = items
            .iter()
            .map(|item| CompareRow {
                product_id: item.id.clone(),
                name: item.name.clone(),
                price: item.price,
                average_score: item.average_score,
                purchase_url: item.purchase_url.clone(),
                thumbnail: item.thumbnail().map(str::to_string),
            })
            .collect();

        let bar = CompareBar {
            count: rows.len(),
            capacity: MAX_COMPARE,
            thumbnails: rows.iter().filter_map(|row| row.thumbnail.clone()).collect(),
        };

        // A single row gets no highlights.
        let (lowest_price_id, top_score_id) = if rows.len() < 2 {
            (None, None)
        } else {
            let lowest = rows
                .iter()
                .min_by(|a, b| a.price.total_cmp(&b.price))
                .map(|row| row.product_id.clone());
            let top = rows
                .iter()
                .filter_map(|row| row.average_score.map(|score| (row, score)))
                .max_by(|(_, a), (_, b)| a.total_cmp(b))
                .map(|(row, _)| row.product_id.clone());
            (lowest, top)
        };

        Self {
            rows,
            bar,
            lowest_price_id,
            top_score_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: &str, price: f64, score: Option<f64>, image: Option<&str>) -> ComparableProduct {
        ComparableProduct {
            id: id.to_string(),
            name: id.to_string(),
            price,
            images: image.map(|src| vec![src.to_string()]).unwrap_or_default(),
            average_score: score,
            purchase_url: None,
        }
    }

    #[test]
    fn highlights_cheapest_and_best_scored() {
        let table = CompareTable::from_items(&[
            item("skillet", 45.0, Some(8.9), Some("/img/skillet.jpg")),
            item("dutch-oven", 320.0, Some(9.4), None),
            item("wok", 60.0, None, Some("/img/wok.jpg")),
        ]);

        assert_eq!(table.rows.len(), 3);
        assert_eq!(table.lowest_price_id.as_deref(), Some("skillet"));
        assert_eq!(table.top_score_id.as_deref(), Some("dutch-oven"));
        assert_eq!(table.bar.count, 3);
        assert_eq!(table.bar.capacity, 3);
        assert_eq!(table.bar.thumbnails, vec!["/img/skillet.jpg", "/img/wok.jpg"]);
    }

    #[test]
    fn single_item_has_no_highlights() {
        let table = CompareTable::from_items(&[item("solo", 10.0, Some(7.0), None)]);
        assert!(table.lowest_price_id.is_none());
        assert!(table.top_score_id.is_none());
        assert!(table.bar.thumbnails.is_empty());
    }
}
