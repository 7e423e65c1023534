//! File-backed loaders for applicant and catalog data.
//!
//! Applicant files hold user documents as exported from the account store; catalogs are
//! JSON (a bare array or a `{"scholarships": [...]}` envelope) or CSV with a header row.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Deserializer};

use super::domain::{lenient_cgpa, Applicant, ScholarshipOffer};
use super::repository::{InMemoryApplicantDirectory, InMemoryScholarshipCatalog};

/// Failure while reading a data file.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("failed to open {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid CSV: {0}")]
    Csv(#[from] csv::Error),
}

#[derive(Debug, Deserialize)]
struct UserDocument {
    email: String,
    #[serde(default, deserialize_with = "empty_if_null")]
    gender: String,
    #[serde(default)]
    address: AddressField,
    #[serde(default)]
    education: EducationDocument,
}

#[derive(Debug, Default, Deserialize)]
#[serde(untagged)]
enum AddressField {
    Text(String),
    Structured {
        #[serde(default)]
        state: Option<String>,
    },
    #[default]
    Missing,
}

impl AddressField {
    fn into_text(self) -> String {
        match self {
            AddressField::Text(text) => text,
            AddressField::Structured { state } => state.unwrap_or_default(),
            AddressField::Missing => String::new(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct EducationDocument {
    #[serde(default, deserialize_with = "empty_if_null")]
    qualification: String,
    #[serde(default, deserialize_with = "empty_if_null")]
    institution: String,
    #[serde(rename = "scoreValue", default, deserialize_with = "lenient_cgpa")]
    score_value: f64,
}

impl UserDocument {
    fn into_entry(self) -> (String, Applicant) {
        let applicant = Applicant {
            address: self.address.into_text(),
            gender: self.gender,
            qualification: self.education.qualification,
            institution: self.education.institution,
            cgpa: self.education.score_value,
        };
        (self.email, applicant)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum CatalogDocument {
    Bare(Vec<ScholarshipOffer>),
    Envelope { scholarships: Vec<ScholarshipOffer> },
}

/// Reads a JSON array of user documents into a directory.
pub fn read_applicants<R: Read>(reader: R) -> Result<InMemoryApplicantDirectory, SourceError> {
    let documents: Vec<UserDocument> = serde_json::from_reader(reader)?;
    Ok(documents
        .into_iter()
        .map(UserDocument::into_entry)
        .collect())
}

pub fn load_applicants(path: impl AsRef<Path>) -> Result<InMemoryApplicantDirectory, SourceError> {
    read_applicants(open(path.as_ref())?)
}

pub fn read_catalog_json<R: Read>(reader: R) -> Result<InMemoryScholarshipCatalog, SourceError> {
    let offers = match serde_json::from_reader(reader)? {
        CatalogDocument::Bare(offers) => offers,
        CatalogDocument::Envelope { scholarships } => scholarships,
    };
    Ok(InMemoryScholarshipCatalog::new(offers))
}

pub fn read_catalog_csv<R: Read>(reader: R) -> Result<InMemoryScholarshipCatalog, SourceError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let mut offers = Vec::new();
    for record in csv_reader.deserialize::<ScholarshipOffer>() {
        offers.push(record?);
    }
    Ok(InMemoryScholarshipCatalog::new(offers))
}

/// Loads a catalog file, picking the CSV reader for `.csv` files and JSON otherwise.
pub fn load_catalog(path: impl AsRef<Path>) -> Result<InMemoryScholarshipCatalog, SourceError> {
    let path = path.as_ref();
    let reader = open(path)?;
    let is_csv = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("csv"))
        .unwrap_or(false);

    if is_csv {
        read_catalog_csv(reader)
    } else {
        read_catalog_json(reader)
    }
}

fn open(path: &Path) -> Result<BufReader<File>, SourceError> {
    File::open(path)
        .map(BufReader::new)
        .map_err(|source| SourceError::Io {
            path: path.to_path_buf(),
            source,
        })
}

fn empty_if_null<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ranking::repository::{ApplicantDirectory, ScholarshipCatalog};

    #[test]
    fn reads_user_documents_with_structured_address() {
        let json = r#"[
            {
                "fullname": "Priya Das",
                "email": "priya@example.com",
                "gender": "Female",
                "address": { "state": "Assam" },
                "education": {
                    "qualification": "B.Tech",
                    "institution": "IIT Guwahati",
                    "yearOfPassing": "2026",
                    "scoreType": "CGPA",
                    "scoreValue": "8.7"
                }
            },
            { "email": "rahul@example.com", "address": "Pune Maharashtra", "gender": null }
        ]"#;

        let directory = read_applicants(json.as_bytes()).expect("documents parse");
        assert_eq!(directory.len(), 2);

        let priya = directory
            .find_by_email("priya@example.com")
            .expect("lookup succeeds")
            .expect("priya present");
        assert_eq!(priya.address, "Assam");
        assert_eq!(priya.qualification, "B.Tech");
        assert_eq!(priya.cgpa, 8.7);

        let rahul = directory
            .find_by_email("rahul@example.com")
            .expect("lookup succeeds")
            .expect("rahul present");
        assert_eq!(rahul.address, "Pune Maharashtra");
        assert!(rahul.gender.is_empty());
        assert_eq!(rahul.cgpa, 0.0);
    }

    #[test]
    fn reads_catalog_envelope_and_bare_array() {
        let envelope = r#"{ "error": false, "scholarships": [ { "name": "A", "category": "x" } ] }"#;
        let bare = r#"[ { "name": "A" }, { "name": "B", "link": null } ]"#;

        let from_envelope = read_catalog_json(envelope.as_bytes()).expect("envelope parses");
        let from_bare = read_catalog_json(bare.as_bytes()).expect("array parses");
        assert_eq!(from_envelope.len(), 1);
        assert_eq!(from_bare.len(), 2);
        assert!(from_bare.offers().expect("offers")[1].link.is_empty());
    }

    #[test]
    fn reads_catalog_csv_with_blank_cells() {
        let csv = "name,award,eligibility,address,deadline,link\n\
                   Merit Award, $5000 ,Open to B.Tech students,Assam,2025-10-31,\n\
                   Need Grant,,,,,https://example.org\n";

        let catalog = read_catalog_csv(csv.as_bytes()).expect("csv parses");
        let offers = catalog.offers().expect("offers");
        assert_eq!(offers.len(), 2);
        assert_eq!(offers[0].award, "$5000");
        assert!(offers[0].link.is_empty());
        assert!(offers[1].eligibility.is_empty());
        assert_eq!(offers[1].link, "https://example.org");
    }

    #[test]
    fn missing_file_reports_path() {
        let err = load_catalog("/nonexistent/catalog.json").expect_err("missing file fails");
        assert!(err.to_string().contains("/nonexistent/catalog.json"));
    }
}
