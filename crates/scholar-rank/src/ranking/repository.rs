use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use super::domain::{Applicant, ScholarshipOffer};

/// Lookup of applicant profiles by e-mail address.
pub trait ApplicantDirectory: Send + Sync {
    fn find_by_email(&self, email: &str) -> Result<Option<Applicant>, RepositoryError>;
}

/// Source of the full scholarship catalog.
pub trait ScholarshipCatalog: Send + Sync {
    fn offers(&self) -> Result<Vec<ScholarshipOffer>, RepositoryError>;
}

/// Error enumeration for collaborator failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("repository unavailable: {0}")]
    Unavailable(String),
    #[error("corrupt record: {0}")]
    Corrupt(String),
}

impl<T: ApplicantDirectory + ?Sized> ApplicantDirectory for Arc<T> {
    fn find_by_email(&self, email: &str) -> Result<Option<Applicant>, RepositoryError> {
        (**self).find_by_email(email)
    }
}

impl<T: ScholarshipCatalog + ?Sized> ScholarshipCatalog for Arc<T> {
    fn offers(&self) -> Result<Vec<ScholarshipOffer>, RepositoryError> {
        (**self).offers()
    }
}

/// Directory keyed by lower-cased e-mail.
#[derive(Debug, Default, Clone)]
pub struct InMemoryApplicantDirectory {
    applicants: Arc<RwLock<HashMap<String, Applicant>>>,
}

impl InMemoryApplicantDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, email: &str, applicant: Applicant) {
        let mut guard = self
            .applicants
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        guard.insert(email_key(email), applicant);
    }

    pub fn len(&self) -> usize {
        self.applicants
            .read()
            .map(|guard| guard.len())
            .unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl FromIterator<(String, Applicant)> for InMemoryApplicantDirectory {
    fn from_iter<I: IntoIterator<Item = (String, Applicant)>>(iter: I) -> Self {
        let directory = Self::new();
        for (email, applicant) in iter {
            directory.insert(&email, applicant);
        }
        directory
    }
}

impl ApplicantDirectory for InMemoryApplicantDirectory {
    fn find_by_email(&self, email: &str) -> Result<Option<Applicant>, RepositoryError> {
        let guard = self
            .applicants
            .read()
            .map_err(|_| RepositoryError::Unavailable("applicant lock poisoned".to_string()))?;
        Ok(guard.get(&email_key(email)).cloned())
    }
}

/// Catalog held in memory in publication order.
#[derive(Debug, Default, Clone)]
pub struct InMemoryScholarshipCatalog {
    offers: Arc<Vec<ScholarshipOffer>>,
}

impl InMemoryScholarshipCatalog {
    pub fn new(offers: Vec<ScholarshipOffer>) -> Self {
        Self {
            offers: Arc::new(offers),
        }
    }

    pub fn len(&self) -> usize {
        self.offers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.offers.is_empty()
    }
}

impl ScholarshipCatalog for InMemoryScholarshipCatalog {
    fn offers(&self) -> Result<Vec<ScholarshipOffer>, RepositoryError> {
        Ok(self.offers.as_ref().clone())
    }
}

pub(crate) fn email_key(email: &str) -> String {
    email.trim().to_lowercase()
}
