use crate::infra::{load_hierarchy, read_evaluations};
use chrono::Utc;
use clap::Args;
use geocubo::error::AppError;
use geocubo::mcda::{McdaHierarchy, ScoreCard, ScoringEngine, WeightReport};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct ScoreArgs {
    /// JSON object mapping parameter ids to ratings on the 0-10 scale
    #[arg(long)]
    pub(crate) evaluations: PathBuf,
    /// Project identifier echoed in the score card
    #[arg(long)]
    pub(crate) project_id: Option<String>,
}

pub(crate) fn run_parameters(hierarchy: Option<PathBuf>) -> Result<(), AppError> {
    let hierarchy = load_hierarchy(hierarchy.as_deref())?;
    print!("{}", render_parameters(&hierarchy));
    Ok(())
}

pub(crate) fn run_validate(hierarchy: Option<PathBuf>) -> Result<(), AppError> {
    let hierarchy = load_hierarchy(hierarchy.as_deref())?;
    print!("{}", render_validation(&hierarchy.weight_report()));
    Ok(())
}

pub(crate) fn run_score(hierarchy: Option<PathBuf>, args: ScoreArgs) -> Result<(), AppError> {
    let ScoreArgs {
        evaluations,
        project_id,
    } = args;

    let engine = ScoringEngine::new(Arc::new(load_hierarchy(hierarchy.as_deref())?));
    let evaluations = read_evaluations(&evaluations)?;
    let card = ScoreCard::new(project_id, engine.breakdown(&evaluations), Utc::now());
    print!("{}", render_score_card(&card));
    Ok(())
}

pub(crate) fn render_parameters(hierarchy: &McdaHierarchy) -> String {
    let mut out = format!(
        "MCDA hierarchy: {} categories, {} parameters\n",
        hierarchy.categories().len(),
        hierarchy.parameter_count()
    );

    for category in hierarchy.categories() {
        out.push_str(&format!(
            "\n{} [{}] weight {}%\n",
            category.name, category.id, category.weight
        ));
        for parameter in &category.parameters {
            out.push_str(&format!(
                "- {} [{}] weight {}%\n",
                parameter.name, parameter.id, parameter.weight
            ));
        }
    }
    out
}

pub(crate) fn render_validation(report: &WeightReport) -> String {
    let mut out = format!(
        "Category weights: {} ({})\n",
        report.category_weight_total,
        balance_label(report.categories_balanced)
    );
    for check in &report.categories {
        out.push_str(&format!(
            "- {}: parameter weights {} ({})\n",
            check.category_name,
            check.parameter_weight_total,
            balance_label(check.balanced)
        ));
    }

    if report.is_consistent() {
        out.push_str("Hierarchy is consistent\n");
    } else {
        out.push_str("Hierarchy is inconsistent; scores will be skewed until weights total 100\n");
    }
    out
}

pub(crate) fn render_score_card(card: &ScoreCard) -> String {
    let mut out = String::new();
    if let Some(project_id) = &card.project_id {
        out.push_str(&format!("Project: {project_id}\n"));
    }
    out.push_str(&format!(
        "MCDA score: {:.2} ({}, {})\n",
        card.score, card.band_label, card.color
    ));

    out.push_str("\nCategory breakdown\n");
    for category in &card.breakdown.categories {
        out.push_str(&format!(
            "- {}: {:.2} x {}% = {:.2} ({} rated, {} missing)\n",
            category.category_name,
            category.normalized_score,
            category.weight,
            category.contribution,
            category.evaluated_parameters,
            category.missing_parameters.len()
        ));
    }

    if !card.breakdown.ignored_parameters.is_empty() {
        out.push_str(&format!(
            "\nIgnored unknown parameters: {}\n",
            card.breakdown.ignored_parameters.join(", ")
        ));
    }
    out
}

fn balance_label(balanced: bool) -> &'static str {
    if balanced {
        "ok"
    } else {
        "expected 100"
    }
}
