//! Pattern polarity classifier.
//!
//! Averages the polarity of known subjective words. An intensifier directly in front of
//! a word multiplies its polarity, a negation within the two preceding words scales it
//! by -0.5. Text without any subjective word is neutral.

use std::collections::HashMap;

use super::PolarityClassifier;

const NEGATION_FACTOR: f64 = -0.5;

/// Averaged-adjective polarity scorer.
pub struct PatternClassifier {
    polarity: HashMap<&'static str, f64>,
    intensifiers: HashMap<&'static str, f64>,
}

impl PatternClassifier {
    pub fn new() -> Self {
        Self {
            polarity: build_polarity_lexicon(),
            intensifiers: build_intensifiers(),
        }
    }

    pub fn score(&self, text: &str) -> f64 {
        let words: Vec<String> = text
            .split(|c: char| !c.is_alphanumeric() && c != '\'')
            .filter(|word| !word.is_empty())
            .map(str::to_lowercase)
            .collect();

        let mut assessments = Vec::new();
        for (index, word) in words.iter().enumerate() {
            let Some(&base) = self.polarity.get(word.as_str()) else {
                continue;
            };

            let mut value = base;
            if let Some(previous) = index.checked_sub(1).map(|i| words[i].as_str()) {
                if let Some(&multiplier) = self.intensifiers.get(previous) {
                    value *= multiplier;
                }
            }

            let negated = (1..=2)
                .filter_map(|distance| index.checked_sub(distance))
                .any(|i| is_negation(&words[i]));
            if negated {
                value *= NEGATION_FACTOR;
            }

            assessments.push(value.clamp(-1.0, 1.0));
        }

        if assessments.is_empty() {
            return 0.0;
        }
        let mean = assessments.iter().sum::<f64>() / assessments.len() as f64;
        mean.clamp(-1.0, 1.0)
    }
}

impl Default for PatternClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl PolarityClassifier for PatternClassifier {
    fn polarity(&self, text: &str) -> f64 {
        self.score(text)
    }
}

fn is_negation(word: &str) -> bool {
    matches!(word, "not" | "never" | "no" | "without") || word.ends_with("n't")
}

fn build_polarity_lexicon() -> HashMap<&'static str, f64> {
    [
        ("good", 0.7), ("great", 0.8), ("excellent", 1.0), ("best", 1.0),
        ("outstanding", 0.5), ("exceptional", 0.67), ("brilliant", 0.9), ("amazing", 0.6),
        ("wonderful", 1.0), ("fantastic", 0.4), ("superb", 1.0), ("remarkable", 0.75),
        ("impressive", 1.0), ("exemplary", 0.5), ("distinguished", 0.3), ("prestigious", 0.4),
        ("talented", 0.6), ("gifted", 0.5), ("deserving", 0.4), ("worthy", 0.3),
        ("bright", 0.7), ("promising", 0.3), ("strong", 0.43), ("top", 0.5),
        ("helpful", 0.5), ("free", 0.4), ("generous", 0.5), ("full", 0.35),
        ("meritorious", 0.5), ("successful", 0.75), ("qualified", 0.2), ("eligible", 0.1),
        ("happy", 0.8), ("glad", 0.5), ("pleased", 0.5), ("proud", 0.8),
        ("hopeful", 0.3), ("kind", 0.6), ("fair", 0.7), ("secure", 0.4),
        ("safe", 0.5), ("easy", 0.43), ("simple", 0.0), ("better", 0.5),
        ("valuable", 0.3), ("special", 0.36), ("unique", 0.38), ("new", 0.14),
        ("annual", 0.0), ("academic", 0.0), ("financial", 0.0), ("minimum", 0.0),
        ("high", 0.16), ("higher", 0.25), ("large", 0.21), ("major", 0.06),
        ("bad", -0.7), ("poor", -0.4), ("worse", -0.4), ("worst", -1.0),
        ("difficult", -0.5), ("hard", -0.29), ("limited", -0.07), ("strict", -0.2),
        ("expensive", -0.5), ("sad", -0.5), ("unfair", -0.5), ("terrible", -1.0),
        ("low", -0.3), ("lower", -0.1), ("late", -0.3), ("needy", -0.2),
        ("disadvantaged", -0.3), ("ineligible", -0.5), ("restricted", -0.3), ("weak", -0.38),
    ]
    .into_iter()
    .collect()
}

fn build_intensifiers() -> HashMap<&'static str, f64> {
    [
        ("very", 1.3), ("extremely", 1.5), ("highly", 1.3), ("really", 1.2),
        ("truly", 1.2), ("most", 1.4), ("especially", 1.3), ("exceptionally", 1.5),
        ("slightly", 0.6), ("somewhat", 0.7), ("fairly", 0.8), ("quite", 1.1),
    ]
    .into_iter()
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn averages_subjective_words() {
        let classifier = PatternClassifier::new();
        let score = classifier.score("An excellent and difficult programme");
        assert!((score - 0.25).abs() < 1e-9);
    }

    #[test]
    fn intensifier_scales_and_clamps() {
        let classifier = PatternClassifier::new();
        assert!((classifier.score("very good") - 0.91).abs() < 1e-9);
        assert_eq!(classifier.score("extremely excellent"), 1.0);
    }

    #[test]
    fn negation_inverts_and_dampens() {
        let classifier = PatternClassifier::new();
        assert!((classifier.score("not good") + 0.35).abs() < 1e-9);
    }

    #[test]
    fn text_without_subjective_words_is_neutral() {
        let classifier = PatternClassifier::new();
        assert_eq!(classifier.score("Applicants from Assam"), 0.0);
    }
}
