use std::sync::Arc;

use rayon::prelude::*;

use super::aggregator::aggregate;
use super::config::ScoringConfig;
use super::domain::{Applicant, Factor, ScholarshipOffer, ScoredOffer};
use super::matchers::{self, NormalizedApplicant, OfferText};
use super::text::TextAnalyzer;

/// Scores a whole catalog against one applicant and orders the result.
///
/// The pipeline holds no mutable state; a single instance can serve concurrent requests.
pub struct RankingPipeline {
    config: ScoringConfig,
    analyzer: Arc<TextAnalyzer>,
}

/// Catalog-wide values some factors are relative to.
struct CatalogContext {
    amounts: Vec<u64>,
    max_amount: u64,
}

impl RankingPipeline {
    pub fn new(config: ScoringConfig) -> Self {
        Self::with_analyzer(config, Arc::new(TextAnalyzer::new()))
    }

    pub fn with_analyzer(config: ScoringConfig, analyzer: Arc<TextAnalyzer>) -> Self {
        Self { config, analyzer }
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    /// Ranks `catalog` for `applicant`, best match first.
    ///
    /// A missing applicant or an empty catalog yields an empty list. Offers with equal
    /// final scores keep their catalog order.
    pub fn rank(
        &self,
        applicant: Option<&Applicant>,
        catalog: &[ScholarshipOffer],
    ) -> Vec<ScoredOffer> {
        let Some(applicant) = applicant else {
            return Vec::new();
        };
        if catalog.is_empty() {
            return Vec::new();
        }

        let applicant = NormalizedApplicant::new(applicant, self.config.max_cgpa, &self.analyzer);
        let context = self.catalog_context(catalog);
        let factors = self.active_factors();

        let score = |(index, offer): (usize, &ScholarshipOffer)| {
            self.score_with_context(&applicant, offer, &factors, &context, index)
        };

        let mut scored: Vec<ScoredOffer> = if catalog.len() >= self.config.parallel_threshold {
            catalog.par_iter().enumerate().map(score).collect()
        } else {
            catalog.iter().enumerate().map(score).collect()
        };

        scored.sort_by(|a, b| b.final_score.total_cmp(&a.final_score));
        scored
    }

    /// Scores a single offer in isolation.
    ///
    /// The amount factor is relative to the catalog, so on its own any non-zero award
    /// scores 1.0 for it.
    pub fn score_offer(&self, applicant: &Applicant, offer: &ScholarshipOffer) -> ScoredOffer {
        let applicant = NormalizedApplicant::new(applicant, self.config.max_cgpa, &self.analyzer);
        let context = self.catalog_context(std::slice::from_ref(offer));
        let factors = self.active_factors();
        self.score_with_context(&applicant, offer, &factors, &context, 0)
    }

    /// Core factors always, opt-in factors only when weighted.
    fn active_factors(&self) -> Vec<Factor> {
        Factor::CORE
            .into_iter()
            .chain(
                Factor::OPT_IN
                    .into_iter()
                    .filter(|factor| self.config.weights.is_enabled(*factor)),
            )
            .collect()
    }

    fn catalog_context(&self, catalog: &[ScholarshipOffer]) -> CatalogContext {
        if !self.config.weights.is_enabled(Factor::Amount) {
            return CatalogContext {
                amounts: Vec::new(),
                max_amount: 0,
            };
        }

        let amounts: Vec<u64> = catalog
            .iter()
            .map(|offer| matchers::extract_award_amount(&offer.award))
            .collect();
        let max_amount = amounts.iter().copied().max().unwrap_or(0);
        CatalogContext {
            amounts,
            max_amount,
        }
    }

    fn score_with_context(
        &self,
        applicant: &NormalizedApplicant,
        offer: &ScholarshipOffer,
        factors: &[Factor],
        context: &CatalogContext,
        index: usize,
    ) -> ScoredOffer {
        let text = OfferText::new(offer);
        let raw = factors.iter().map(|factor| {
            let score = match factor {
                Factor::Sentiment => matchers::sentiment_score(&self.analyzer, offer),
                Factor::Address => matchers::address_score(applicant, &text),
                Factor::Gender => matchers::gender_score(applicant, &text),
                Factor::Cgpa => {
                    matchers::cgpa_score(applicant.cgpa, &text.eligibility, self.config.max_cgpa)
                }
                Factor::Qualification => matchers::qualification_score(applicant, &text),
                Factor::Institution => matchers::institution_score(applicant, &text),
                Factor::NounOverlap => {
                    matchers::noun_overlap_score(&self.analyzer, applicant, &text)
                }
                Factor::Amount => matchers::amount_score(
                    context.amounts.get(index).copied().unwrap_or(0),
                    context.max_amount,
                ),
                Factor::Urgency => {
                    matchers::urgency_score(&offer.deadline, self.config.reference_date)
                }
            };
            (*factor, score)
        });

        let (sub_scores, final_score) = aggregate(raw, &self.config.weights);
        ScoredOffer {
            offer: offer.clone(),
            sub_scores,
            final_score,
        }
    }
}

impl Default for RankingPipeline {
    fn default() -> Self {
        Self::new(ScoringConfig::default())
    }
}
