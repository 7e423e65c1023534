//! Free-text signals: sentiment polarity and keyword spans.

mod lexicon;
mod pattern;
mod phrases;

use std::collections::BTreeSet;

pub use lexicon::LexiconClassifier;
pub use pattern::PatternClassifier;
pub use phrases::extract_noun_phrases;

/// Neutral sentiment returned for blank text.
pub const NEUTRAL_SENTIMENT: f64 = 0.5;

/// A polarity signal over free text, natively ranged [-1, +1].
pub trait PolarityClassifier: Send + Sync {
    fn polarity(&self, text: &str) -> f64;
}

/// Blends two independent polarity classifiers into a [0, 1] sentiment score.
///
/// Both classifiers are read-only after construction, so one analyzer can be shared by
/// every worker scoring a catalog.
pub struct TextAnalyzer {
    rule_based: Box<dyn PolarityClassifier>,
    statistical: Box<dyn PolarityClassifier>,
}

impl TextAnalyzer {
    pub fn new() -> Self {
        Self::with_classifiers(
            Box::new(LexiconClassifier::new()),
            Box::new(PatternClassifier::new()),
        )
    }

    pub fn with_classifiers(
        rule_based: Box<dyn PolarityClassifier>,
        statistical: Box<dyn PolarityClassifier>,
    ) -> Self {
        Self {
            rule_based,
            statistical,
        }
    }

    pub fn sentiment_score(&self, text: &str) -> f64 {
        if text.trim().is_empty() {
            return NEUTRAL_SENTIMENT;
        }

        let rule_based = self.rule_based.polarity(text).clamp(-1.0, 1.0);
        let statistical = self.statistical.polarity(text).clamp(-1.0, 1.0);
        let blended = (rule_based + statistical) / 2.0;
        ((blended + 1.0) / 2.0).clamp(0.0, 1.0)
    }

    pub fn extract_noun_phrases(&self, text: &str) -> BTreeSet<String> {
        extract_noun_phrases(text)
    }
}

impl Default for TextAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}
