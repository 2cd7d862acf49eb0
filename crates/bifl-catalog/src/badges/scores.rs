use serde::{Deserialize, Serialize};

/// Sub-scores on the 0–10 scale; any of them may be unrated.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreCard {
    #[serde(default)]
    pub bifl_total_score: Option<f64>,
    #[serde(default)]
    pub durability_score: Option<f64>,
    #[serde(default)]
    pub repairability_score: Option<f64>,
    #[serde(default)]
    pub warranty_score: Option<f64>,
    #[serde(default)]
    pub sustainability_score: Option<f64>,
    #[serde(default)]
    pub social_score: Option<f64>,
}

impl ScoreCard {
    /// Fully rated card, arguments in field order.
    pub fn rated(
        total: f64,
        durability: f64,
        repairability: f64,
        warranty: f64,
        sustainability: f64,
        social: f64,
    ) -> Self {
        Self {
            bifl_total_score: Some(total),
            durability_score: Some(durability),
            repairability_score: Some(repairability),
            warranty_score: Some(warranty),
            sustainability_score: Some(sustainability),
            social_score: Some(social),
        }
    }

    /// Mean of the rated dimension scores (the total is excluded), to one decimal.
    pub fn average(&self) -> Option<f64> {
        let rated: Vec<f64> = [
            self.durability_score,
            self.repairability_score,
            self.warranty_score,
            self.sustainability_score,
            self.social_score,
        ]
        .into_iter()
        .flatten()
        .collect();

        if rated.is_empty() {
            return None;
        }

        let mean = rated.iter().sum::<f64>() / rated.len() as f64;
        Some((mean * 10.0).round() / 10.0)
    }
}

/// Input of the badge rules: the score card plus any editorial certification.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoredProduct {
    #[serde(flatten)]
    pub scores: ScoreCard,
    #[serde(default)]
    pub certification: Option<Vec<String>>,
}

impl ScoredProduct {
    pub fn new(scores: ScoreCard) -> Self {
        Self {
            scores,
            certification: None,
        }
    }

    pub fn certified(scores: ScoreCard, certification: Vec<String>) -> Self {
        Self {
            scores,
            certification: Some(certification),
        }
    }

    /// Editorial badges, only when at least one was assigned.
    pub fn editorial_badges(&self) -> Option<&[String]> {
        self.certification
            .as_deref()
            .filter(|labels| !labels.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn average_skips_unrated_dimensions() {
        let card = ScoreCard {
            durability_score: Some(9.0),
            warranty_score: Some(8.0),
            social_score: None,
            ..ScoreCard::default()
        };
        assert_eq!(card.average(), Some(8.5));
        assert_eq!(ScoreCard::default().average(), None);
    }

    #[test]
    fn deserializes_flat_camel_case_payload() {
        let product: ScoredProduct = serde_json::from_str(
            r#"{"biflTotalScore":9.5,"durabilityScore":9,"warrantyScore":null,"certification":["EcoHero"]}"#,
        )
        .expect("valid payload");

        assert_eq!(product.scores.bifl_total_score, Some(9.5));
        assert_eq!(product.scores.durability_score, Some(9.0));
        assert_eq!(product.scores.warranty_score, None);
        assert_eq!(product.scores.social_score, None);
        assert_eq!(product.editorial_badges(), Some(&["EcoHero".to_string()][..]));
    }

    #[test]
    fn empty_certification_is_not_editorial() {
        let product = ScoredProduct::certified(ScoreCard::default(), Vec::new());
        assert!(product.editorial_badges().is_none());
    }
}
