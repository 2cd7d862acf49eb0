use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Achievement badges a product can earn from its scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Badge {
    GoldStandard,
    LifetimeWarranty,
    CrowdFavorite,
    BiflApproved,
    RepairFriendly,
    EcoHero,
}

impl Badge {
    pub const ALL: [Badge; 6] = [
        Badge::GoldStandard,
        Badge::LifetimeWarranty,
        Badge::CrowdFavorite,
        Badge::BiflApproved,
        Badge::RepairFriendly,
        Badge::EcoHero,
    ];

    /// Stable identifier, also the form editors use in `certification` lists.
    pub const fn label(self) -> &'static str {
        match self {
            Badge::GoldStandard => "GoldStandard",
            Badge::LifetimeWarranty => "LifetimeWarranty",
            Badge::CrowdFavorite => "CrowdFavorite",
            Badge::BiflApproved => "BiflApproved",
            Badge::RepairFriendly => "RepairFriendly",
            Badge::EcoHero => "EcoHero",
        }
    }

    pub const fn display_name(self) -> &'static str {
        match self {
            Badge::GoldStandard => "Gold Standard",
            Badge::LifetimeWarranty => "Lifetime Warranty",
            Badge::CrowdFavorite => "Crowd Favorite",
            Badge::BiflApproved => "BIFL Approved",
            Badge::RepairFriendly => "Repair Friendly",
            Badge::EcoHero => "Eco Hero",
        }
    }

    pub const fn description(self) -> &'static str {
        match self {
            Badge::GoldStandard => {
                "Top-tier overall score backed by exceptional durability and a strong warranty."
            }
            Badge::LifetimeWarranty => "Backed by a full lifetime warranty from the manufacturer.",
            Badge::CrowdFavorite => "Consistently praised by owners across the community.",
            Badge::BiflApproved => "Meets the baseline for a product you can buy once.",
            Badge::RepairFriendly => "Designed to be opened, serviced and repaired.",
            Badge::EcoHero => "Built with sustainable materials and responsible practices.",
        }
    }

    pub const fn icon_path(self) -> &'static str {
        match self {
            Badge::GoldStandard => "/badges/gold-standard.svg",
            Badge::LifetimeWarranty => "/badges/lifetime-warranty.svg",
            Badge::CrowdFavorite => "/badges/crowd-favorite.svg",
            Badge::BiflApproved => "/badges/bifl-approved.svg",
            Badge::RepairFriendly => "/badges/repair-friendly.svg",
            Badge::EcoHero => "/badges/eco-hero.svg",
        }
    }
}

impl fmt::Display for Badge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown badge '{0}'")]
pub struct UnknownBadge(pub String);

impl FromStr for Badge {
    type Err = UnknownBadge;

    /// Accepts the label, the display name or the kebab-case icon stem, ignoring case.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let wanted: String = value
            .trim()
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .map(|c| c.to_ascii_lowercase())
            .collect();

        Badge::ALL
            .into_iter()
            .find(|badge| badge.label().eq_ignore_ascii_case(&wanted))
            .ok_or_else(|| UnknownBadge(value.to_string()))
    }
}

/// Render-ready badge metadata; editorial labels that name no known badge carry text only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BadgeDisplay {
    pub label: String,
    pub display_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon_path: Option<String>,
}

impl From<Badge> for BadgeDisplay {
    fn from(badge: Badge) -> Self {
        Self {
            label: badge.label().to_string(),
            display_name: badge.display_name().to_string(),
            description: Some(badge.description().to_string()),
            icon_path: Some(badge.icon_path().to_string()),
        }
    }
}

impl BadgeDisplay {
    pub fn from_label(label: &str) -> Self {
        match label.parse::<Badge>() {
            Ok(badge) => badge.into(),
            Err(_) => Self {
                label: label.to_string(),
                display_name: label.to_string(),
                description: None,
                icon_path: None,
            },
        }
    }
}
