//! Numeric and date extraction from free-text offer fields.

use chrono::{DateTime, NaiveDate};
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // "cgpa", optional comparison symbols, then the first number. Digits are ASCII only:
    // `\d` would also capture other scripts' digits, which `f64::from_str` rejects.
    static ref CGPA_REQUIREMENT: Regex = Regex::new(r"cgpa\s*[≥>=]*\s*([0-9.]+)").unwrap();
    static ref AMOUNT_RUN: Regex = Regex::new(r"[0-9.,]+").unwrap();
}

const DEADLINE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%m-%d-%Y",
    "%B %d, %Y",
    "%B %d %Y",
    "%b %d, %Y",
    "%b %d %Y",
    "%d %B %Y",
    "%d %b %Y",
    "%d %B, %Y",
    "%d %b, %Y",
];

/// Minimum CGPA stated in eligibility text, if any.
///
/// Only the first "cgpa" mention followed by a number counts. A captured run that is not
/// a valid number (e.g. `"."` or `"8.0.1"`) yields `None`.
pub fn parse_cgpa_requirement(eligibility: &str) -> Option<f64> {
    let lowered = eligibility.to_lowercase();
    let captures = CGPA_REQUIREMENT.captures(&lowered)?;
    captures
        .get(1)?
        .as_str()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

/// Largest whole amount mentioned in award text, 0 when none parses.
///
/// `"$5,000 per year"` gives 5000, `"€2,500-€5,000"` gives 5000.
pub fn extract_award_amount(award: &str) -> u64 {
    if award.trim().is_empty() {
        return 0;
    }

    AMOUNT_RUN
        .find_iter(award)
        .filter_map(|run| run.as_str().replace(',', "").trim().parse::<f64>().ok())
        .filter(|value| value.is_finite() && *value >= 0.0)
        .map(|value| value.trunc() as u64)
        .max()
        .unwrap_or(0)
}

/// Parses a scholarship deadline written in one of the common formats.
pub fn parse_deadline(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim().trim_end_matches('.');
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.date_naive());
    }

    let compact = trimmed.split_whitespace().collect::<Vec<_>>().join(" ");
    let without_ordinals = strip_ordinal_suffixes(&compact);
    DEADLINE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(&without_ordinals, format).ok())
}

fn strip_ordinal_suffixes(value: &str) -> String {
    value
        .split(' ')
        .map(|word| {
            let digits = word.trim_end_matches(',');
            let trailing_comma = if digits.len() < word.len() { "," } else { "" };
            for suffix in ["st", "nd", "rd", "th"] {
                if let Some(number) = digits.strip_suffix(suffix) {
                    if !number.is_empty() && number.chars().all(|c| c.is_ascii_digit()) {
                        return format!("{number}{trailing_comma}");
                    }
                }
            }
            word.to_string()
        })
        .collect::<Vec<_>>()
        .join(" ")
}
