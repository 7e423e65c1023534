use std::sync::Arc;

use axum::response::Response;
use serde_json::Value;

use crate::ranking::domain::{Applicant, ScholarshipOffer};
use crate::ranking::repository::{
    ApplicantDirectory, InMemoryApplicantDirectory, InMemoryScholarshipCatalog, RepositoryError,
    ScholarshipCatalog,
};
use crate::ranking::{RankingPipeline, RecommendationService};

pub(super) fn applicant() -> Applicant {
    Applicant {
        address: "Assam India".to_string(),
        gender: "Female".to_string(),
        qualification: "B.Tech".to_string(),
        institution: "IIT Guwahati".to_string(),
        cgpa: 8.5,
    }
}

pub(super) fn offer(name: &str, eligibility: &str) -> ScholarshipOffer {
    ScholarshipOffer {
        name: name.to_string(),
        eligibility: eligibility.to_string(),
        ..ScholarshipOffer::default()
    }
}

pub(super) fn catalog() -> Vec<ScholarshipOffer> {
    vec![
        ScholarshipOffer {
            name: "National Merit Scholarship".to_string(),
            award: "$2,000".to_string(),
            eligibility: "Open to all students with CGPA >= 9.0".to_string(),
            address: "India".to_string(),
            deadline: "2025-11-30".to_string(),
            link: "https://example.org/merit".to_string(),
        },
        ScholarshipOffer {
            name: "Assam Women in Engineering Award".to_string(),
            award: "$5,000".to_string(),
            eligibility: "Female B.Tech students of IIT Guwahati from Assam, minimum CGPA 7.5"
                .to_string(),
            address: "Assam India".to_string(),
            deadline: "October 20, 2025".to_string(),
            link: "https://example.org/awe".to_string(),
        },
        ScholarshipOffer {
            name: "Rural Sports Grant".to_string(),
            award: "Rs. 10000".to_string(),
            eligibility: "Only male applicants from Kerala".to_string(),
            address: "Kerala".to_string(),
            deadline: "not announced".to_string(),
            link: String::new(),
        },
        ScholarshipOffer::default(),
    ]
}

pub(super) fn directory() -> InMemoryApplicantDirectory {
    let directory = InMemoryApplicantDirectory::new();
    directory.insert("asha@example.com", applicant());
    directory
}

pub(super) fn build_service(
) -> RecommendationService<InMemoryApplicantDirectory, InMemoryScholarshipCatalog> {
    RecommendationService::new(
        Arc::new(directory()),
        Arc::new(InMemoryScholarshipCatalog::new(catalog())),
        Arc::new(RankingPipeline::default()),
    )
}

pub(super) struct UnavailableCatalog;

impl ScholarshipCatalog for UnavailableCatalog {
    fn offers(&self) -> Result<Vec<ScholarshipOffer>, RepositoryError> {
        Err(RepositoryError::Unavailable("catalog offline".to_string()))
    }
}

pub(super) struct CorruptDirectory;

impl ApplicantDirectory for CorruptDirectory {
    fn find_by_email(&self, _email: &str) -> Result<Option<Applicant>, RepositoryError> {
        Err(RepositoryError::Corrupt("scoreValue is not a number".to_string()))
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
