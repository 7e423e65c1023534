use crate::infra::{build_service, ServiceInputs};
use chrono::{Local, NaiveDate};
use clap::Args;
use scholar_rank::config::AppConfig;
use scholar_rank::error::AppError;
use scholar_rank::ranking::{top_recommendations, RecommendationView};
use scholar_rank::telemetry;
use serde_json::json;
use std::path::PathBuf;

const MISSING_EMAIL: &str = "Email not provided";

#[derive(Args, Debug, Default)]
pub(crate) struct RankArgs {
    /// E-mail address of the applicant to rank offers for
    #[arg(long)]
    pub(crate) email: Option<String>,
    /// JSON file of user documents (defaults to SCHOLAR_APPLICANTS_PATH)
    #[arg(long)]
    pub(crate) applicants: Option<PathBuf>,
    /// Scholarship catalog as JSON or CSV (defaults to SCHOLAR_CATALOG_PATH)
    #[arg(long)]
    pub(crate) catalog: Option<PathBuf>,
    /// Number of offers to print (defaults to SCHOLAR_TOP_N)
    #[arg(long)]
    pub(crate) top: Option<usize>,
    /// Reference date for deadline urgency (YYYY-MM-DD). Defaults to today.
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) today: Option<NaiveDate>,
}

pub(crate) fn run_rank(args: RankArgs) -> Result<(), AppError> {
    let Some(email) = args
        .email
        .as_deref()
        .map(str::trim)
        .filter(|email| !email.is_empty())
        .map(str::to_string)
    else {
        println!("{}", json!({ "error": MISSING_EMAIL }));
        return Err(AppError::Input(MISSING_EMAIL.to_string()));
    };

    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    let settings = config.ranking;
    let inputs = ServiceInputs {
        applicants: args.applicants.or_else(|| settings.applicants_path.clone()),
        catalog: args.catalog.or_else(|| settings.catalog_path.clone()),
        today: Some(args.today.unwrap_or_else(|| Local::now().date_naive())),
    };
    let limit = args.top.unwrap_or(settings.top_n);

    let service = build_service(&settings, inputs)?;
    let views = recommend(&service, &email, limit);
    let rendered = serde_json::to_string_pretty(&views)
        .map_err(|err| AppError::Input(format!("failed to render recommendations: {err}")))?;
    println!("{rendered}");
    Ok(())
}

fn recommend(
    service: &crate::infra::FileBackedService,
    email: &str,
    limit: usize,
) -> Vec<RecommendationView> {
    let ranked = service.recommend(email);
    top_recommendations(&ranked, limit)
}
