use super::*;

fn scored(
    total: f64,
    durability: f64,
    repairability: f64,
    warranty: f64,
    sustainability: f64,
    social: f64,
) -> ScoredProduct {
    ScoredProduct::new(ScoreCard::rated(
        total,
        durability,
        repairability,
        warranty,
        sustainability,
        social,
    ))
}

#[test]
fn gold_standard_alone_for_strong_core_scores() {
    let product = scored(9.5, 9.0, 5.0, 8.5, 5.0, 5.0);
    assert_eq!(
        compute_badges(&product),
        BadgeSet::Computed(vec![Badge::GoldStandard])
    );
}

#[test]
fn all_zero_scores_earn_nothing() {
    let product = scored(0.0, 0.0, 0.0, 0.0, 0.0, 0.0);
    let badges = compute_badges(&product);
    assert!(badges.is_empty());
    assert!(!badges.is_editorial());
}

#[test]
fn baseline_scores_fall_back_to_bifl_approved() {
    let product = scored(8.0, 7.5, 5.0, 7.0, 5.0, 5.0);
    assert_eq!(compute_badges(&product).labels(), vec!["BiflApproved"]);
}

#[test]
fn badges_follow_rule_order_not_score_order() {
    let product = scored(9.8, 9.5, 9.9, 10.0, 8.0, 8.5);
    assert_eq!(
        compute_badges(&product),
        BadgeSet::Computed(vec![
            Badge::GoldStandard,
            Badge::LifetimeWarranty,
            Badge::CrowdFavorite,
            Badge::RepairFriendly,
            Badge::EcoHero,
        ])
    );
}

#[test]
fn thresholds_are_inclusive() {
    let product = scored(9.0, 8.5, 8.5, 8.0, 8.0, 8.5);
    let labels = compute_badges(&product).labels();
    assert_eq!(
        labels,
        vec!["GoldStandard", "CrowdFavorite", "RepairFriendly", "EcoHero"]
    );
}

#[test]
fn missing_scores_count_as_zero() {
    let product = ScoredProduct::new(ScoreCard {
        bifl_total_score: Some(9.5),
        durability_score: Some(9.0),
        warranty_score: None,
        ..ScoreCard::default()
    });
    assert!(compute_badges(&product).is_empty());

    let eco_only = ScoredProduct::new(ScoreCard {
        sustainability_score: Some(9.1),
        ..ScoreCard::default()
    });
    assert_eq!(compute_badges(&eco_only).labels(), vec!["EcoHero"]);
}

#[test]
fn certification_overrides_computed_badges() {
    let product = ScoredProduct::certified(
        ScoreCard::rated(9.5, 9.0, 5.0, 8.5, 5.0, 5.0),
        vec!["EcoHero".to_string()],
    );
    assert_eq!(
        compute_badges(&product),
        BadgeSet::Editorial(vec!["EcoHero".to_string()])
    );
}

#[test]
fn certification_is_returned_verbatim_even_when_unknown() {
    let certification = vec!["Staff Pick".to_string(), "GoldStandard".to_string()];
    let product = ScoredProduct::certified(ScoreCard::default(), certification.clone());

    let badges = compute_badges(&product);
    assert_eq!(badges.labels(), certification);

    let resolved = badges.resolved();
    assert!(resolved[0].icon_path.is_none());
    assert_eq!(resolved[1].display_name, "Gold Standard");
}

#[test]
fn empty_certification_falls_through_to_rules() {
    let product = ScoredProduct::certified(
        ScoreCard::rated(8.0, 7.5, 5.0, 7.0, 5.0, 5.0),
        Vec::new(),
    );
    assert_eq!(
        compute_badges(&product),
        BadgeSet::Computed(vec![Badge::BiflApproved])
    );
}

#[test]
fn bifl_approved_never_joins_other_badges() {
    let steps = [0.0, 6.0, 7.0, 7.5, 8.0, 8.5, 9.0, 10.0];
    for total in steps {
        for durability in steps {
            for warranty in steps {
                for other in steps {
                    let product = scored(total, durability, other, warranty, other, other);
                    let labels = compute_badges(&product).labels();
                    if labels.iter().any(|label| label == "BiflApproved") {
                        assert_eq!(labels.len(), 1, "approved mixed with {labels:?}");
                    }
                }
            }
        }
    }
}

#[test]
fn awarding_is_deterministic() {
    let product = scored(9.1, 8.7, 8.6, 10.0, 7.9, 8.4);
    let first = compute_badges(&product);
    let second = compute_badges(&product);
    assert_eq!(first, second);
}

#[test]
fn explain_reports_every_rule_in_order() {
    let engine = BadgeEngine::default();
    let product = scored(9.5, 9.0, 5.0, 8.5, 5.0, 5.0);
    let checks = engine.explain(&product);

    let order: Vec<Badge> = checks.iter().map(|check| check.badge).collect();
    assert_eq!(
        order,
        vec![
            Badge::GoldStandard,
            Badge::LifetimeWarranty,
            Badge::CrowdFavorite,
            Badge::RepairFriendly,
            Badge::EcoHero,
            Badge::BiflApproved,
        ]
    );
    assert!(checks[0].qualified);
    assert!(checks[0].notes.contains("total 9.5"));
    assert!(!checks[5].qualified);
    assert!(checks[5].notes.contains("higher badge"));
}

#[test]
fn custom_thresholds_shift_qualification() {
    let engine = BadgeEngine::new(BadgeThresholds {
        eco_hero_sustainability: 6.0,
        ..BadgeThresholds::default()
    });
    let product = scored(0.0, 0.0, 0.0, 0.0, 6.5, 0.0);
    assert_eq!(engine.award(&product).labels(), vec!["EcoHero"]);
    assert!(compute_badges(&product).is_empty());
}

#[test]
fn badge_set_serializes_with_source_tag() {
    let computed = BadgeSet::Computed(vec![Badge::GoldStandard, Badge::EcoHero]);
    assert_eq!(
        serde_json::to_value(&computed).expect("serializes"),
        serde_json::json!({ "source": "computed", "badges": ["GoldStandard", "EcoHero"] })
    );

    let editorial = BadgeSet::Editorial(vec!["Staff Pick".to_string()]);
    assert_eq!(
        serde_json::to_value(&editorial).expect("serializes"),
        serde_json::json!({ "source": "editorial", "badges": ["Staff Pick"] })
    );
}
