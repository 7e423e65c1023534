use chrono::NaiveDate;
use metrics_exporter_prometheus::PrometheusHandle;
use scholar_rank::config::RankingSettings;
use scholar_rank::error::AppError;
use scholar_rank::ranking::sources::{load_applicants, load_catalog};
use scholar_rank::ranking::{
    InMemoryApplicantDirectory, InMemoryScholarshipCatalog, RankingPipeline,
    RecommendationService,
};
use std::path::PathBuf;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::{info, warn};

pub(crate) type FileBackedService =
    RecommendationService<InMemoryApplicantDirectory, InMemoryScholarshipCatalog>;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Data files and the reference date one recommendation service is built from.
#[derive(Debug, Default)]
pub(crate) struct ServiceInputs {
    pub(crate) applicants: Option<PathBuf>,
    pub(crate) catalog: Option<PathBuf>,
    pub(crate) today: Option<NaiveDate>,
}

/// Loads the configured data files into in-memory collaborators.
///
/// A missing path leaves the matching collection empty; an unreadable file is an error.
pub(crate) fn build_service(
    settings: &RankingSettings,
    inputs: ServiceInputs,
) -> Result<FileBackedService, AppError> {
    let directory = match inputs.applicants.as_ref() {
        Some(path) => load_applicants(path)?,
        None => {
            warn!("no applicant file configured; every lookup will miss");
            InMemoryApplicantDirectory::new()
        }
    };

    let catalog = match inputs.catalog.as_ref() {
        Some(path) => load_catalog(path)?,
        None => {
            warn!("no scholarship catalog configured; rankings will be empty");
            InMemoryScholarshipCatalog::new(Vec::new())
        }
    };

    let (applicants, offers) = (directory.len(), catalog.len());

    let mut scoring = settings.scoring_config();
    if let Some(today) = inputs.today {
        scoring = scoring.with_reference_date(today);
    }

    let service = RecommendationService::new(
        Arc::new(directory),
        Arc::new(catalog),
        Arc::new(RankingPipeline::new(scoring)),
    );

    let scoring = service.pipeline().config();
    info!(
        applicants,
        offers,
        max_cgpa = scoring.max_cgpa,
        reference_date = ?scoring.reference_date,
        "loaded recommendation data"
    );
    Ok(service)
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}
