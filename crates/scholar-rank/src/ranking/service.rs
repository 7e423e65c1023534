use std::sync::Arc;

use tracing::{debug, info, warn};

use super::domain::ScoredOffer;
use super::pipeline::RankingPipeline;
use super::repository::{ApplicantDirectory, ScholarshipCatalog};

/// Service composing the applicant directory, the catalog and the ranking pipeline.
pub struct RecommendationService<D, C> {
    directory: Arc<D>,
    catalog: Arc<C>,
    pipeline: Arc<RankingPipeline>,
}

impl<D, C> RecommendationService<D, C>
where
    D: ApplicantDirectory + 'static,
    C: ScholarshipCatalog + 'static,
{
    pub fn new(directory: Arc<D>, catalog: Arc<C>, pipeline: Arc<RankingPipeline>) -> Self {
        Self {
            directory,
            catalog,
            pipeline,
        }
    }

    pub fn pipeline(&self) -> &RankingPipeline {
        &self.pipeline
    }

    /// Full ranked catalog for the applicant registered under `email`.
    ///
    /// Unknown applicants, empty catalogs and collaborator failures all produce an empty
    /// list; failures are logged.
    pub fn recommend(&self, email: &str) -> Vec<ScoredOffer> {
        let email = email.trim();

        let applicant = match self.directory.find_by_email(email) {
            Ok(Some(applicant)) => applicant,
            Ok(None) => {
                info!(email, "no applicant registered under e-mail");
                return Vec::new();
            }
            Err(error) => {
                warn!(email, %error, "applicant lookup failed; treating as not found");
                return Vec::new();
            }
        };

        let catalog = match self.catalog.offers() {
            Ok(offers) => offers,
            Err(error) => {
                warn!(%error, "scholarship catalog unavailable; returning no recommendations");
                return Vec::new();
            }
        };

        let ranked = self.pipeline.rank(Some(&applicant), &catalog);
        debug!(
            email,
            catalog_size = catalog.len(),
            top_score = ranked.first().map(|scored| scored.final_score),
            "ranked scholarship catalog"
        );
        ranked
    }
}
