//! Badge scenarios against the public API, including catalog-imported products.

use bifl_catalog::badges::{compute_badges, Badge, BadgeSet, ScoreCard, ScoredProduct};
use bifl_catalog::catalog::ProductCsvImporter;

#[test]
fn reference_scenarios() {
    let gold = ScoredProduct::new(ScoreCard::rated(9.5, 9.0, 5.0, 8.5, 5.0, 5.0));
    assert_eq!(compute_badges(&gold).labels(), vec!["GoldStandard"]);

    let nothing = ScoredProduct::new(ScoreCard::rated(0.0, 0.0, 0.0, 0.0, 0.0, 0.0));
    assert!(compute_badges(&nothing).labels().is_empty());

    let approved = ScoredProduct::new(ScoreCard::rated(8.0, 7.5, 5.0, 7.0, 5.0, 5.0));
    assert_eq!(compute_badges(&approved).labels(), vec!["BiflApproved"]);
}

#[test]
fn unrated_product_earns_nothing() {
    assert_eq!(
        compute_badges(&ScoredProduct::default()),
        BadgeSet::Computed(Vec::new())
    );
}

#[test]
fn imported_products_resolve_badges() {
    let csv = "id,name,price,bifl_total_score,durability_score,repairability_score,warranty_score,sustainability_score,social_score,certification\n\
leatherman,Multitool,120,9.2,9.5,8.9,10,6.0,9.0,\n\
jacket,Wax Jacket,400,7.0,8.0,8.0,5.0,7.0,6.0,EcoHero\n";

    let products = ProductCsvImporter::from_reader(csv.as_bytes()).expect("import succeeds");

    let multitool = compute_badges(&products[0].scored());
    assert_eq!(
        multitool,
        BadgeSet::Computed(vec![
            Badge::GoldStandard,
            Badge::LifetimeWarranty,
            Badge::CrowdFavorite,
            Badge::RepairFriendly,
        ])
    );

    let jacket = compute_badges(&products[1].scored());
    assert!(jacket.is_editorial());
    assert_eq!(jacket.resolved()[0].icon_path.as_deref(), Some("/badges/eco-hero.svg"));
}
