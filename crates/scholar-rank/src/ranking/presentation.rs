use serde::{Deserialize, Serialize};

use super::domain::{ScoredOffer, SubScores};

pub const DEFAULT_TOP_N: usize = 5;

/// Sanitized representation of one ranked offer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationView {
    pub name: String,
    pub award: String,
    pub eligibility: String,
    pub link: String,
    pub deadline: String,
    pub final_score: f64,
    pub details: SubScores,
}

impl From<&ScoredOffer> for RecommendationView {
    fn from(scored: &ScoredOffer) -> Self {
        let offer = &scored.offer;
        let name = if offer.name.trim().is_empty() {
            "<no name>".to_string()
        } else {
            offer.name.clone()
        };

        Self {
            name,
            award: offer.award.clone(),
            eligibility: offer.eligibility.clone(),
            link: offer.link.clone(),
            deadline: offer.deadline.clone(),
            final_score: scored.final_score,
            details: scored.sub_scores.clone(),
        }
    }
}

/// First `limit` entries of an already ranked list, as views.
pub fn top_recommendations(ranked: &[ScoredOffer], limit: usize) -> Vec<RecommendationView> {
    ranked
        .iter()
        .take(limit)
        .map(RecommendationView::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ranking::domain::{Factor, ScholarshipOffer};
    use serde_json::json;

    fn scored(name: &str, final_score: f64) -> ScoredOffer {
        let mut sub_scores = SubScores::new();
        sub_scores.insert(Factor::Gender, 1.0);
        sub_scores.insert(Factor::Cgpa, 0.625);
        ScoredOffer {
            offer: ScholarshipOffer {
                name: name.to_string(),
                award: "$500".to_string(),
                ..ScholarshipOffer::default()
            },
            sub_scores,
            final_score,
        }
    }

    #[test]
    fn truncates_to_limit() {
        let ranked: Vec<ScoredOffer> = (0..8).map(|i| scored(&format!("s{i}"), 0.5)).collect();
        assert_eq!(top_recommendations(&ranked, DEFAULT_TOP_N).len(), 5);
        assert_eq!(top_recommendations(&ranked[..2], DEFAULT_TOP_N).len(), 2);
    }

    #[test]
    fn serializes_recommendation_shape() {
        let view = RecommendationView::from(&scored("", 0.2708));
        let value = serde_json::to_value(&view).expect("view serializes");
        assert_eq!(
            value,
            json!({
                "name": "<no name>",
                "award": "$500",
                "eligibility": "",
                "link": "",
                "deadline": "",
                "final_score": 0.2708,
                "details": { "gender": 1.0, "cgpa": 0.625 }
            })
        );
    }
}
