//! Rule-based valence classifier.
//!
//! Scores each token against a valence lexicon (roughly -4..+4), adjusts for boosters,
//! negation, capitalised emphasis and contrastive "but", then squashes the sum into
//! [-1, +1] with `x / sqrt(x^2 + alpha)`.

use std::collections::HashMap;

use super::PolarityClassifier;

const BOOSTER_INCREMENT: f64 = 0.293;
const BOOSTER_DECREMENT: f64 = -0.293;
const CAPS_INCREMENT: f64 = 0.733;
const NEGATION_SCALAR: f64 = -0.74;
const NORMALIZATION_ALPHA: f64 = 15.0;
const EXCLAMATION_STEP: f64 = 0.292;
const MAX_EXCLAMATIONS: usize = 4;
const QUESTION_STEP: f64 = 0.18;
const QUESTION_CAP: f64 = 0.96;

/// Lexicon-driven compound scorer.
pub struct LexiconClassifier {
    valence: HashMap<&'static str, f64>,
    boosters: HashMap<&'static str, f64>,
    negations: Vec<&'static str>,
}

impl LexiconClassifier {
    pub fn new() -> Self {
        Self {
            valence: build_valence_lexicon(),
            boosters: build_booster_lexicon(),
            negations: vec![
                "not", "no", "never", "none", "nobody", "nothing", "neither", "nor",
                "cannot", "without", "hardly", "rarely", "seldom", "despite",
            ],
        }
    }

    /// Compound score in [-1, +1]; 0.0 when no token carries valence.
    pub fn compound(&self, text: &str) -> f64 {
        let tokens = tokenize(text);
        if tokens.is_empty() {
            return 0.0;
        }

        let mixed_case = has_mixed_case(&tokens);
        let mut sentiments: Vec<f64> = Vec::with_capacity(tokens.len());

        for (index, token) in tokens.iter().enumerate() {
            let lower = token.to_lowercase();
            if self.boosters.contains_key(lower.as_str()) {
                sentiments.push(0.0);
                continue;
            }

            let Some(&base) = self.valence.get(lower.as_str()) else {
                sentiments.push(0.0);
                continue;
            };

            let mut valence = base;
            if mixed_case && is_shouted(token) {
                valence += CAPS_INCREMENT.copysign(valence);
            }

            for distance in 1..=3 {
                let Some(previous) = index.checked_sub(distance).map(|i| &tokens[i]) else {
                    break;
                };
                let previous_lower = previous.to_lowercase();
                if let Some(&scalar) = self.boosters.get(previous_lower.as_str()) {
                    let mut boost = scalar.copysign(valence);
                    if mixed_case && is_shouted(previous) {
                        boost += CAPS_INCREMENT.copysign(valence);
                    }
                    let damping = match distance {
                        1 => 1.0,
                        2 => 0.95,
                        _ => 0.9,
                    };
                    valence += boost * damping;
                }
                if self.is_negation(&previous_lower) {
                    valence *= NEGATION_SCALAR;
                }
            }

            sentiments.push(valence);
        }

        apply_but_contrast(&tokens, &mut sentiments);

        let mut sum: f64 = sentiments.iter().sum();
        if sum == 0.0 {
            return 0.0;
        }
        sum += punctuation_emphasis(text).copysign(sum);
        normalize(sum)
    }

    fn is_negation(&self, token: &str) -> bool {
        token.ends_with("n't") || self.negations.contains(&token)
    }
}

impl Default for LexiconClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl PolarityClassifier for LexiconClassifier {
    fn polarity(&self, text: &str) -> f64 {
        self.compound(text)
    }
}

fn tokenize(text: &str) -> Vec<String> {
    text.split_whitespace()
        .map(|raw| {
            raw.trim_matches(|c: char| !c.is_alphanumeric() && c != '\'')
                .to_string()
        })
        .filter(|token| token.chars().count() > 1 || token.eq_ignore_ascii_case("a"))
        .collect()
}

fn is_shouted(token: &str) -> bool {
    token.chars().any(char::is_alphabetic)
        && token
            .chars()
            .filter(|c| c.is_alphabetic())
            .all(char::is_uppercase)
}

fn has_mixed_case(tokens: &[String]) -> bool {
    let shouted = tokens.iter().filter(|token| is_shouted(token)).count();
    shouted > 0 && shouted < tokens.len()
}

fn apply_but_contrast(tokens: &[String], sentiments: &mut [f64]) {
    let Some(pivot) = tokens.iter().position(|token| token.eq_ignore_ascii_case("but")) else {
        return;
    };
    for (index, value) in sentiments.iter_mut().enumerate() {
        if index < pivot {
            *value *= 0.5;
        } else if index > pivot {
            *value *= 1.5;
        }
    }
}

fn punctuation_emphasis(text: &str) -> f64 {
    let exclamations = text.matches('!').count().min(MAX_EXCLAMATIONS);
    let exclamation_boost = exclamations as f64 * EXCLAMATION_STEP;

    let questions = text.matches('?').count();
    let question_boost = match questions {
        0 | 1 => 0.0,
        2 | 3 => questions as f64 * QUESTION_STEP,
        _ => QUESTION_CAP,
    };

    exclamation_boost + question_boost
}

fn normalize(score: f64) -> f64 {
    let normalized = score / (score * score + NORMALIZATION_ALPHA).sqrt();
    normalized.clamp(-1.0, 1.0)
}

fn build_valence_lexicon() -> HashMap<&'static str, f64> {
    [
        // Praise and quality
        ("good", 1.9), ("great", 3.1), ("excellent", 2.7), ("best", 3.2),
        ("outstanding", 3.0), ("exceptional", 2.6), ("brilliant", 2.8), ("amazing", 2.8),
        ("wonderful", 2.7), ("fantastic", 2.6), ("superb", 2.9), ("remarkable", 2.2),
        ("impressive", 2.3), ("exemplary", 2.4), ("distinguished", 2.0), ("prestigious", 2.1),
        ("talented", 2.3), ("gifted", 2.2), ("deserving", 1.9), ("worthy", 1.9),
        ("bright", 1.9), ("promising", 1.7), ("strong", 2.3), ("top", 0.8),
        // Support and opportunity
        ("support", 1.7), ("supported", 1.6), ("supporting", 1.9), ("help", 1.7),
        ("helps", 1.6), ("helpful", 1.8), ("assist", 1.2), ("assistance", 1.4),
        ("aid", 1.3), ("benefit", 2.0), ("benefits", 1.6), ("opportunity", 1.8),
        ("opportunities", 1.6), ("free", 2.3), ("generous", 2.3), ("grant", 1.5),
        ("granted", 1.1), ("award", 2.5), ("awarded", 1.7), ("awards", 2.2),
        ("reward", 2.1), ("rewarding", 2.4), ("scholarship", 0.9), ("prize", 2.3),
        ("encourage", 2.3), ("encouraged", 1.5), ("encourages", 1.9), ("empower", 1.5),
        ("empowering", 1.9), ("inspire", 2.7), ("inspiring", 2.2), ("welcome", 2.0),
        ("welcomed", 1.9), ("fund", 0.8), ("funded", 0.9), ("funding", 0.8),
        // Achievement and merit
        ("merit", 1.2), ("meritorious", 1.8), ("achieve", 1.8), ("achievement", 2.0),
        ("achievements", 1.8), ("accomplished", 1.8), ("success", 2.7), ("successful", 2.8),
        ("succeed", 2.2), ("excellence", 3.1), ("honor", 2.2), ("honour", 2.2),
        ("recognition", 1.5), ("recognized", 1.2), ("qualified", 1.4), ("eligible", 0.6),
        ("win", 2.8), ("winner", 2.8), ("winning", 2.4), ("proud", 2.1),
        // Affect
        ("happy", 2.7), ("glad", 2.0), ("pleased", 1.9), ("delighted", 2.8),
        ("excited", 1.4), ("hope", 1.9), ("hopeful", 2.1), ("love", 3.2),
        ("care", 2.2), ("kind", 2.4), ("fair", 1.3), ("equal", 0.7),
        ("secure", 1.4), ("safe", 1.9), ("easy", 1.9), ("simple", 1.2),
        ("better", 1.9), ("improve", 1.9), ("improved", 2.1), ("growth", 1.6),
        ("bonus", 2.5), ("valuable", 2.1), ("special", 1.7), ("unique", 1.9),
        // Negative
        ("bad", -2.5), ("poor", -2.1), ("worse", -2.1), ("worst", -3.1),
        ("fail", -2.5), ("failed", -2.3), ("failure", -2.3), ("reject", -1.7),
        ("rejected", -2.3), ("rejection", -2.5), ("deny", -1.4), ("denied", -1.9),
        ("disqualified", -1.8), ("ineligible", -1.4), ("penalty", -2.0), ("fine", 0.8),
        ("difficult", -1.5), ("hard", -0.4), ("hardship", -2.2), ("struggle", -1.4),
        ("struggling", -1.9), ("poverty", -2.3), ("needy", -1.4), ("disadvantaged", -1.7),
        ("problem", -1.7), ("problems", -1.7), ("risk", -1.1), ("loss", -1.3),
        ("lost", -1.3), ("lose", -1.7), ("miss", -0.6), ("missed", -1.2),
        ("late", -0.9), ("limited", -0.9), ("restricted", -1.6), ("strict", -0.8),
        ("expensive", -1.3), ("debt", -1.5), ("burden", -1.9), ("stress", -1.8),
        ("sad", -2.1), ("unfortunately", -1.8), ("unfair", -2.1), ("terrible", -2.5),
        ("crisis", -3.1), ("suffer", -2.1), ("suffering", -2.1), ("victim", -2.5),
        ("orphan", -1.4), ("war", -2.9), ("disaster", -3.1), ("cancel", -1.0),
        ("cancelled", -1.0), ("terminate", -1.1), ("terminated", -1.7), ("revoke", -1.5),
    ]
    .into_iter()
    .collect()
}

fn build_booster_lexicon() -> HashMap<&'static str, f64> {
    [
        ("absolutely", BOOSTER_INCREMENT), ("completely", BOOSTER_INCREMENT),
        ("considerably", BOOSTER_INCREMENT), ("deeply", BOOSTER_INCREMENT),
        ("enormously", BOOSTER_INCREMENT), ("entirely", BOOSTER_INCREMENT),
        ("especially", BOOSTER_INCREMENT), ("exceptionally", BOOSTER_INCREMENT),
        ("extremely", BOOSTER_INCREMENT), ("fully", BOOSTER_INCREMENT),
        ("greatly", BOOSTER_INCREMENT), ("highly", BOOSTER_INCREMENT),
        ("hugely", BOOSTER_INCREMENT), ("incredibly", BOOSTER_INCREMENT),
        ("most", BOOSTER_INCREMENT), ("particularly", BOOSTER_INCREMENT),
        ("really", BOOSTER_INCREMENT), ("remarkably", BOOSTER_INCREMENT),
        ("so", BOOSTER_INCREMENT), ("substantially", BOOSTER_INCREMENT),
        ("totally", BOOSTER_INCREMENT), ("truly", BOOSTER_INCREMENT),
        ("very", BOOSTER_INCREMENT),
        ("almost", BOOSTER_DECREMENT), ("barely", BOOSTER_DECREMENT),
        ("marginally", BOOSTER_DECREMENT), ("partly", BOOSTER_DECREMENT),
        ("slightly", BOOSTER_DECREMENT), ("somewhat", BOOSTER_DECREMENT),
        ("occasionally", BOOSTER_DECREMENT), ("less", BOOSTER_DECREMENT),
    ]
    .into_iter()
    .collect()
}
