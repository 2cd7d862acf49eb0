use serde::{Deserialize, Serialize};

/// Score thresholds (0–10 scale) each badge rule compares against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BadgeThresholds {
    pub gold_standard_total: f64,
    pub gold_standard_durability: f64,
    pub gold_standard_warranty: f64,
    pub lifetime_warranty: f64,
    pub crowd_favorite_social: f64,
    pub repair_friendly_repairability: f64,
    pub eco_hero_sustainability: f64,
    pub approved_total: f64,
    pub approved_durability: f64,
    pub approved_warranty: f64,
}

impl Default for BadgeThresholds {
    fn default() -> Self {
        Self {
            gold_standard_total: 9.0,
            gold_standard_durability: 8.5,
            gold_standard_warranty: 8.0,
            lifetime_warranty: 10.0,
            crowd_favorite_social: 8.5,
            repair_friendly_repairability: 8.5,
            eco_hero_sustainability: 8.0,
            approved_total: 7.5,
            approved_durability: 7.0,
            approved_warranty: 6.0,
        }
    }
}
