//! Scholarship relevance ranking.
//!
//! The pure core (`matchers`, `aggregator`, `pipeline`, `text`) turns one applicant and a
//! catalog into an ordered list of scored offers. `repository`, `sources`, `service`,
//! `presentation` and `router` are the collaborators that feed it and expose the result.

pub mod aggregator;
pub mod config;
pub mod domain;
pub mod matchers;
pub mod pipeline;
pub mod presentation;
pub mod repository;
pub mod router;
pub mod service;
pub mod sources;
pub mod text;
pub mod weights;

#[cfg(test)]
mod tests;

pub use config::{ScoringConfig, DEFAULT_MAX_CGPA};
pub use domain::{Applicant, Factor, ScholarshipOffer, ScoredOffer, SubScores, UnknownFactor};
pub use pipeline::RankingPipeline;
pub use presentation::{top_recommendations, RecommendationView, DEFAULT_TOP_N};
pub use repository::{
    ApplicantDirectory, InMemoryApplicantDirectory, InMemoryScholarshipCatalog, RepositoryError,
    ScholarshipCatalog,
};
pub use router::recommendation_router;
pub use service::RecommendationService;
pub use sources::SourceError;
pub use text::{PolarityClassifier, TextAnalyzer};
pub use weights::{WeightParseError, WeightTable};
