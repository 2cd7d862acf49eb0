use crate::infra::{build_catalog, parse_score};
use bifl_catalog::badges::{BadgeEngine, BadgeSet, ScoreCard, ScoredProduct};
use bifl_catalog::catalog::ProductId;
use bifl_catalog::compare::{
    AddOutcome, CompareSessions, CompareView, MemoryCompareStore, SessionId, MAX_COMPARE,
};
use bifl_catalog::error::AppError;
use clap::Args;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug, Default)]
pub(crate) struct BadgeArgs {
    /// Overall BIFL score (0-10)
    #[arg(long, value_parser = parse_score)]
    pub(crate) total: Option<f64>,
    #[arg(long, value_parser = parse_score)]
    pub(crate) durability: Option<f64>,
    #[arg(long, value_parser = parse_score)]
    pub(crate) repairability: Option<f64>,
    #[arg(long, value_parser = parse_score)]
    pub(crate) warranty: Option<f64>,
    #[arg(long, value_parser = parse_score)]
    pub(crate) sustainability: Option<f64>,
    #[arg(long, value_parser = parse_score)]
    pub(crate) social: Option<f64>,
    /// Editorial badge label; repeat to certify several. Replaces computed badges.
    #[arg(long)]
    pub(crate) certification: Vec<String>,
}

#[derive(Args, Debug)]
pub(crate) struct DemoArgs {
    /// Session whose compare set the demo mutates
    #[arg(long, default_value = "demo")]
    pub(crate) session: String,
    /// Product ids to add in order; more than three shows the capacity limit
    #[arg(
        long = "product",
        default_values_t = [
            "cast-iron-skillet".to_string(),
            "hiking-socks".to_string(),
            "cast-iron-skillet".to_string(),
            "work-boots".to_string(),
            "chef-knife".to_string(),
        ]
    )]
    pub(crate) products: Vec<String>,
    /// Product CSV export to use instead of the sample catalog
    #[arg(long)]
    pub(crate) catalog_csv: Option<PathBuf>,
}

pub(crate) fn run_badges(args: BadgeArgs) {
    let BadgeArgs {
        total,
        durability,
        repairability,
        warranty,
        sustainability,
        social,
        certification,
    } = args;

    let scores = ScoreCard {
        bifl_total_score: total,
        durability_score: durability,
        repairability_score: repairability,
        warranty_score: warranty,
        sustainability_score: sustainability,
        social_score: social,
    };
    let product = if certification.is_empty() {
        ScoredProduct::new(scores)
    } else {
        ScoredProduct::certified(scores, certification)
    };

    let engine = BadgeEngine::default();
    let badges = engine.award(&product);
    render_badges(&badges);

    println!("\nRule trail");
    for check in engine.explain(&product) {
        let marker = if check.qualified { "x" } else { " " };
        println!("  [{}] {}: {}", marker, check.badge.display_name(), check.notes);
    }
    if badges.is_editorial() {
        println!("  (editorial certification overrides the computed rules)");
    }
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        session,
        products,
        catalog_csv,
    } = args;

    let catalog = build_catalog(catalog_csv.as_deref())?;
    let sessions = CompareSessions::new(Arc::new(MemoryCompareStore::default()));
    let session = SessionId(session);

    println!("Compare session '{}'", session.0);
    for product_id in products {
        let id = ProductId(product_id);
        let detail = match catalog.detail(&id) {
            Ok(detail) => detail,
            Err(err) => {
                println!("- skipped: {}", err);
                continue;
            }
        };

        let (outcome, view) = sessions.add(&session, detail.product.comparable());
        let note = match outcome {
            AddOutcome::Added => "added",
            AddOutcome::AlreadyPresent => "already in compare",
            AddOutcome::AtCapacity => "compare set full",
        };
        println!(
            "- {} ({}): {} | {} selected | modal {}",
            detail.product.name,
            detail.badges.labels().join(", "),
            note,
            view.count,
            if view.modal_visible { "open" } else { "closed" }
        );
    }

    let view = sessions.view(&session);
    render_view(&view);

    let table = sessions.table(&session);
    println!("\nSide by side");
    for row in &table.rows {
        let score = row
            .average_score
            .map(|score| format!("{:.1}", score))
            .unwrap_or_else(|| "-".to_string());
        println!("  {:<28} ${:>8.2}  avg {}", row.name, row.price, score);
    }
    if let Some(id) = &table.lowest_price_id {
        println!("  lowest price: {}", id);
    }
    if let Some(id) = &table.top_score_id {
        println!("  top score: {}", id);
    }

    Ok(())
}

fn render_badges(badges: &BadgeSet) {
    if badges.is_empty() {
        println!("No badges earned");
        return;
    }

    let source = if badges.is_editorial() {
        "editorial"
    } else {
        "computed"
    };
    println!("Badges ({})", source);
    for display in badges.resolved() {
        match display.description {
            Some(description) => println!("  - {}: {}", display.display_name, description),
            None => println!("  - {}", display.display_name),
        }
    }
}

fn render_view(view: &CompareView) {
    println!(
        "\nCompare bar: {}/{} items{}",
        view.count,
        MAX_COMPARE,
        if view.can_add_more { "" } else { " (full)" }
    );
    if let Some(updated_at) = view.updated_at {
        println!("  last changed {}", updated_at.to_rfc3339());
    }
    for item in &view.items {
        println!("  - {} [{}]", item.name, item.id);
    }
}
