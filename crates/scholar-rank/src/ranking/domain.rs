use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

/// Applicant profile matched against every offer in the catalog.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Applicant {
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub gender: String,
    #[serde(default)]
    pub qualification: String,
    #[serde(default)]
    pub institution: String,
    /// Raw grade point average on the configured scale.
    #[serde(default, deserialize_with = "lenient_cgpa")]
    pub cgpa: f64,
}

/// Scholarship record as published in the catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScholarshipOffer {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub award: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub eligibility: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub address: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub deadline: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub link: String,
}

/// Scoring dimensions understood by the aggregator.
///
/// The first six are the core factors reported for every offer. The remaining ones are
/// opt-in and only computed when the weight table gives them a non-zero weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Factor {
    Sentiment,
    Address,
    Gender,
    Cgpa,
    Qualification,
    Institution,
    NounOverlap,
    Amount,
    Urgency,
}

impl Factor {
    pub const CORE: [Factor; 6] = [
        Factor::Sentiment,
        Factor::Address,
        Factor::Gender,
        Factor::Cgpa,
        Factor::Qualification,
        Factor::Institution,
    ];

    pub const OPT_IN: [Factor; 3] = [Factor::NounOverlap, Factor::Amount, Factor::Urgency];

    pub fn label(&self) -> &'static str {
        match self {
            Factor::Sentiment => "sentiment",
            Factor::Address => "address",
            Factor::Gender => "gender",
            Factor::Cgpa => "cgpa",
            Factor::Qualification => "qualification",
            Factor::Institution => "institution",
            Factor::NounOverlap => "noun_overlap",
            Factor::Amount => "amount",
            Factor::Urgency => "urgency",
        }
    }
}

impl fmt::Display for Factor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Factor {
    type Err = UnknownFactor;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase();
        Self::CORE
            .iter()
            .chain(Self::OPT_IN.iter())
            .copied()
            .find(|factor| factor.label() == normalized)
            .ok_or_else(|| UnknownFactor(value.trim().to_string()))
    }
}

/// Raised when a factor name does not match any known scoring dimension.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown scoring factor '{0}'")]
pub struct UnknownFactor(pub String);

/// Sub-scores keyed by factor, each rounded to four decimals.
pub type SubScores = BTreeMap<Factor, f64>;

/// Offer paired with its per-factor breakdown and aggregate relevance.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredOffer {
    pub offer: ScholarshipOffer,
    pub sub_scores: SubScores,
    pub final_score: f64,
}

impl ScoredOffer {
    pub fn sub_score(&self, factor: Factor) -> Option<f64> {
        self.sub_scores.get(&factor).copied()
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawText {
    Text(String),
    Integer(i64),
    Float(f64),
    Flag(bool),
}

/// Offer fields are text, but catalogs sometimes carry bare numbers (`"award": 5000`).
/// Scalars are rendered as text; null, arrays and objects become the empty string.
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<RawText>::deserialize(deserializer).unwrap_or(None);
    Ok(match raw {
        Some(RawText::Text(text)) => text,
        Some(RawText::Integer(value)) => value.to_string(),
        Some(RawText::Float(value)) if value.is_finite() => value.to_string(),
        Some(RawText::Flag(value)) => value.to_string(),
        Some(RawText::Float(_)) | None => String::new(),
    })
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawCgpa {
    Number(f64),
    Text(String),
}

/// Accepts numbers or numeric strings; anything unparsable becomes 0.0.
pub(crate) fn lenient_cgpa<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<RawCgpa>::deserialize(deserializer).unwrap_or(None);
    Ok(match raw {
        Some(RawCgpa::Number(value)) => value,
        Some(RawCgpa::Text(text)) => parse_cgpa_text(&text),
        None => 0.0,
    })
}

pub(crate) fn parse_cgpa_text(text: &str) -> f64 {
    text.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .unwrap_or(0.0)
}
