//! Per-factor scoring functions.
//!
//! Every matcher returns a value in [0, 1] and never fails: empty fields score 0.0 and
//! malformed numbers fall back to the documented default.

mod requirements;

use std::collections::{BTreeSet, HashSet};

use chrono::NaiveDate;
use regex::{Regex, RegexBuilder};

use super::domain::{Applicant, ScholarshipOffer};
use super::text::TextAnalyzer;

pub use requirements::{extract_award_amount, parse_cgpa_requirement, parse_deadline};

/// Applicant fields folded, trimmed and pre-processed once per ranking pass.
#[derive(Debug, Clone)]
pub struct NormalizedApplicant {
    pub address: String,
    pub gender: GenderMatcher,
    pub qualification: String,
    pub institution: String,
    pub cgpa: f64,
    address_tokens: HashSet<String>,
    noun_phrases: BTreeSet<String>,
}

impl NormalizedApplicant {
    pub fn new(applicant: &Applicant, max_cgpa: f64, analyzer: &TextAnalyzer) -> Self {
        let address = fold(&applicant.address);
        let qualification = fold(&applicant.qualification);
        let institution = fold(&applicant.institution);

        let address_tokens = tokenize(&address);
        let phrase_source =
            [qualification.as_str(), institution.as_str(), address.as_str()].join(" ");
        let noun_phrases = analyzer.extract_noun_phrases(&phrase_source);

        Self {
            gender: GenderMatcher::new(&applicant.gender),
            cgpa: normalize_cgpa(applicant.cgpa, max_cgpa),
            address,
            qualification,
            institution,
            address_tokens,
            noun_phrases,
        }
    }

    pub fn noun_phrases(&self) -> &BTreeSet<String> {
        &self.noun_phrases
    }
}

/// Whole-word, case-insensitive search for the applicant's gender.
#[derive(Debug, Clone)]
pub struct GenderMatcher {
    pattern: Option<Regex>,
}

impl GenderMatcher {
    pub fn new(gender: &str) -> Self {
        let gender = fold(gender);
        let pattern = if gender.is_empty() {
            None
        } else {
            RegexBuilder::new(&format!(r"\b{}\b", regex::escape(&gender)))
                .case_insensitive(true)
                .build()
                .ok()
        };
        Self { pattern }
    }

    pub fn score(&self, eligibility: &str) -> f64 {
        match &self.pattern {
            Some(pattern) if pattern.is_match(eligibility) => 1.0,
            _ => 0.0,
        }
    }
}

/// Offer text fields lower-cased once for all matchers.
pub struct OfferText<'a> {
    pub offer: &'a ScholarshipOffer,
    pub eligibility: String,
    pub address: String,
}

impl<'a> OfferText<'a> {
    pub fn new(offer: &'a ScholarshipOffer) -> Self {
        Self {
            offer,
            eligibility: fold(&offer.eligibility),
            address: fold(&offer.address),
        }
    }
}

/// Share of the applicant's address tokens found in the offer's address or eligibility.
pub fn address_score(applicant: &NormalizedApplicant, offer: &OfferText<'_>) -> f64 {
    if applicant.address_tokens.is_empty() {
        return 0.0;
    }

    let offer_tokens = tokenize(&format!("{} {}", offer.address, offer.eligibility));
    let shared = applicant
        .address_tokens
        .intersection(&offer_tokens)
        .count();
    bounded(shared as f64 / applicant.address_tokens.len() as f64)
}

pub fn gender_score(applicant: &NormalizedApplicant, offer: &OfferText<'_>) -> f64 {
    applicant.gender.score(&offer.eligibility)
}

/// CGPA divided by the scale maximum, clamped to [0, 1]; 0.0 for non-finite input or a
/// non-positive scale.
pub fn normalize_cgpa(raw: f64, max_cgpa: f64) -> f64 {
    if !raw.is_finite() || !max_cgpa.is_finite() || max_cgpa <= 0.0 {
        return 0.0;
    }
    (raw / max_cgpa).clamp(0.0, 1.0)
}

/// Full credit when the stated minimum is met, proportional credit below it.
///
/// The base score is kept when no minimum is stated. A minimum that normalizes to 0.0 is
/// always met.
pub fn cgpa_score(applicant_norm: f64, eligibility: &str, max_cgpa: f64) -> f64 {
    let Some(required) = parse_cgpa_requirement(eligibility) else {
        return bounded(applicant_norm);
    };

    let required_norm = normalize_cgpa(required, max_cgpa);
    if applicant_norm >= required_norm {
        1.0
    } else if required_norm > 0.0 {
        bounded((applicant_norm / required_norm).min(1.0))
    } else {
        bounded(applicant_norm)
    }
}

/// 1.0 when the non-empty `needle` appears verbatim in the eligibility text.
pub fn containment_score(needle: &str, eligibility: &str) -> f64 {
    if !needle.is_empty() && eligibility.contains(needle) {
        1.0
    } else {
        0.0
    }
}

pub fn qualification_score(applicant: &NormalizedApplicant, offer: &OfferText<'_>) -> f64 {
    containment_score(&applicant.qualification, &offer.eligibility)
}

pub fn institution_score(applicant: &NormalizedApplicant, offer: &OfferText<'_>) -> f64 {
    containment_score(&applicant.institution, &offer.eligibility)
}

/// Text the sentiment factor is computed over: name, award and eligibility.
pub fn sentiment_text(offer: &ScholarshipOffer) -> String {
    [offer.name.trim(), offer.award.trim(), offer.eligibility.trim()]
        .join(" ")
        .trim()
        .to_string()
}

pub fn sentiment_score(analyzer: &TextAnalyzer, offer: &ScholarshipOffer) -> f64 {
    bounded(analyzer.sentiment_score(&sentiment_text(offer)))
}

/// Share of the applicant's keyword spans that also appear in the eligibility text.
pub fn noun_overlap_score(
    analyzer: &TextAnalyzer,
    applicant: &NormalizedApplicant,
    offer: &OfferText<'_>,
) -> f64 {
    if applicant.noun_phrases.is_empty() {
        return 0.0;
    }
    let offer_phrases = analyzer.extract_noun_phrases(&offer.eligibility);
    let overlap = applicant
        .noun_phrases
        .intersection(&offer_phrases)
        .count();
    bounded(overlap as f64 / applicant.noun_phrases.len() as f64)
}

/// Award amount relative to the largest amount in the catalog.
pub fn amount_score(amount: u64, max_amount: u64) -> f64 {
    if max_amount == 0 {
        return 0.0;
    }
    bounded(amount as f64 / max_amount as f64)
}

/// 1.0 for a deadline today, 0.5 tomorrow, decaying as `1 / (days_left + 1)`.
/// Past or unparsable deadlines, or a missing reference date, score 0.0.
pub fn urgency_score(deadline: &str, today: Option<NaiveDate>) -> f64 {
    let (Some(today), Some(deadline)) = (today, parse_deadline(deadline)) else {
        return 0.0;
    };
    let days_left = (deadline - today).num_days();
    if days_left < 0 {
        return 0.0;
    }
    bounded(1.0 / (days_left as f64 + 1.0))
}

fn fold(value: &str) -> String {
    value.trim().to_lowercase()
}

fn tokenize(value: &str) -> HashSet<String> {
    value.split_whitespace().map(str::to_string).collect()
}

fn bounded(value: f64) -> f64 {
    if value.is_finite() {
        value.clamp(0.0, 1.0)
    } else {
        0.0
    }
}
