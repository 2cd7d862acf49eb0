use super::badge::Badge;
use super::config::BadgeThresholds;
use super::scores::ScoreCard;
use super::BadgeCheck;

/// Score card with unrated dimensions collapsed to zero.
pub(crate) struct ScoreSignals {
    pub total: f64,
    pub durability: f64,
    pub repairability: f64,
    pub warranty: f64,
    pub sustainability: f64,
    pub social: f64,
}

impl ScoreSignals {
    pub(crate) fn from_card(card: &ScoreCard) -> Self {
        Self {
            total: card.bifl_total_score.unwrap_or(0.0),
            durability: card.durability_score.unwrap_or(0.0),
            repairability: card.repairability_score.unwrap_or(0.0),
            warranty: card.warranty_score.unwrap_or(0.0),
            sustainability: card.sustainability_score.unwrap_or(0.0),
            social: card.social_score.unwrap_or(0.0),
        }
    }
}

fn check(badge: Badge, qualified: bool, notes: String) -> BadgeCheck {
    BadgeCheck {
        badge,
        qualified,
        notes,
    }
}

/// Runs every rule in award order. `BiflApproved` comes last and only
/// qualifies when no other badge did.
pub(crate) fn evaluate(signals: &ScoreSignals, thresholds: &BadgeThresholds) -> Vec<BadgeCheck> {
    let mut checks = Vec::with_capacity(Badge::ALL.len());

    let gold = signals.total >= thresholds.gold_standard_total
        && signals.durability >= thresholds.gold_standard_durability
        && signals.warranty >= thresholds.gold_standard_warranty;
    checks.push(check(
        Badge::GoldStandard,
        gold,
        format!(
            "total {:.1} (>= {:.1}), durability {:.1} (>= {:.1}), warranty {:.1} (>= {:.1})",
            signals.total,
            thresholds.gold_standard_total,
            signals.durability,
            thresholds.gold_standard_durability,
            signals.warranty,
            thresholds.gold_standard_warranty
        ),
    ));

    checks.push(check(
        Badge::LifetimeWarranty,
        signals.warranty >= thresholds.lifetime_warranty,
        format!(
            "warranty {:.1} (>= {:.1})",
            signals.warranty, thresholds.lifetime_warranty
        ),
    ));

    checks.push(check(
        Badge::CrowdFavorite,
        signals.social >= thresholds.crowd_favorite_social,
        format!(
            "social {:.1} (>= {:.1})",
            signals.social, thresholds.crowd_favorite_social
        ),
    ));

    checks.push(check(
        Badge::RepairFriendly,
        signals.repairability >= thresholds.repair_friendly_repairability,
        format!(
            "repairability {:.1} (>= {:.1})",
            signals.repairability, thresholds.repair_friendly_repairability
        ),
    ));

    checks.push(check(
        Badge::EcoHero,
        signals.sustainability >= thresholds.eco_hero_sustainability,
        format!(
            "sustainability {:.1} (>= {:.1})",
            signals.sustainability, thresholds.eco_hero_sustainability
        ),
    ));

    let earned_other = checks.iter().any(|check| check.qualified);
    let meets_baseline = signals.total >= thresholds.approved_total
        && signals.durability >= thresholds.approved_durability
        && signals.warranty >= thresholds.approved_warranty;
    let approved_notes = if earned_other {
        "not considered: a higher badge already qualified".to_string()
    } else {
        format!(
            "total {:.1} (>= {:.1}), durability {:.1} (>= {:.1}), warranty {:.1} (>= {:.1})",
            signals.total,
            thresholds.approved_total,
            signals.durability,
            thresholds.approved_durability,
            signals.warranty,
            thresholds.approved_warranty
        )
    };
    checks.push(check(
        Badge::BiflApproved,
        !earned_other && meets_baseline,
        approved_notes,
    ));

    checks
}
