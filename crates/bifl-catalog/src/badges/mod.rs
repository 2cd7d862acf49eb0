//! Badge rules: derive achievement badges from a product's sub-scores.
//!
//! Editorial certification always wins over computed badges. Otherwise the rules run in
//! a fixed order and every qualifying badge is awarded, with `BiflApproved` reserved as
//! the fallback for products that earned nothing else.

mod badge;
mod config;
mod rules;
mod scores;

#[cfg(test)]
mod tests;

pub use badge::{Badge, BadgeDisplay, UnknownBadge};
pub use config::BadgeThresholds;
pub use scores::{ScoreCard, ScoredProduct};

use rules::ScoreSignals;
use serde::{Deserialize, Serialize};

/// Stateless evaluator applying a threshold table to scored products.
#[derive(Debug, Clone, Default)]
pub struct BadgeEngine {
    thresholds: BadgeThresholds,
}

impl BadgeEngine {
    pub fn new(thresholds: BadgeThresholds) -> Self {
        Self { thresholds }
    }

    pub fn thresholds(&self) -> &BadgeThresholds {
        &self.thresholds
    }

    pub fn award(&self, product: &ScoredProduct) -> BadgeSet {
        if let Some(labels) = product.editorial_badges() {
            return BadgeSet::Editorial(labels.to_vec());
        }

        let badges = self
            .explain(product)
            .into_iter()
            .filter(|check| check.qualified)
            .map(|check| check.badge)
            .collect();
        BadgeSet::Computed(badges)
    }

    /// Per-rule audit trail; ignores editorial certification.
    pub fn explain(&self, product: &ScoredProduct) -> Vec<BadgeCheck> {
        let signals = ScoreSignals::from_card(&product.scores);
        rules::evaluate(&signals, &self.thresholds)
    }
}

/// Badges for `product` under the default thresholds.
pub fn compute_badges(product: &ScoredProduct) -> BadgeSet {
    BadgeEngine::default().award(product)
}

/// Outcome of a single badge rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BadgeCheck {
    pub badge: Badge,
    pub qualified: bool,
    pub notes: String,
}

/// Awarded badges and where they came from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "source", content = "badges", rename_all = "snake_case")]
pub enum BadgeSet {
    Editorial(Vec<String>),
    Computed(Vec<Badge>),
}

impl BadgeSet {
    pub fn labels(&self) -> Vec<String> {
        match self {
            BadgeSet::Editorial(labels) => labels.clone(),
            BadgeSet::Computed(badges) => badges
                .iter()
                .map(|badge| badge.label().to_string())
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            BadgeSet::Editorial(labels) => labels.len(),
            BadgeSet::Computed(badges) => badges.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_editorial(&self) -> bool {
        matches!(self, BadgeSet::Editorial(_))
    }

    pub fn resolved(&self) -> Vec<BadgeDisplay> {
        match self {
            BadgeSet::Editorial(labels) => labels
                .iter()
                .map(|label| BadgeDisplay::from_label(label))
                .collect(),
            BadgeSet::Computed(badges) => badges.iter().copied().map(BadgeDisplay::from).collect(),
        }
    }
}
