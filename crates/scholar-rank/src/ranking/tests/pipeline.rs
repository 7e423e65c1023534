use super::common::*;
use chrono::NaiveDate;

use crate::ranking::aggregator::round4;
use crate::ranking::domain::{Factor, ScholarshipOffer};
use crate::ranking::{RankingPipeline, ScoringConfig, WeightTable};

#[test]
fn scores_stay_within_unit_interval() {
    let pipeline = RankingPipeline::default();
    let ranked = pipeline.rank(Some(&applicant()), &catalog());

    assert_eq!(ranked.len(), 4);
    for scored in &ranked {
        assert!((0.0..=1.0).contains(&scored.final_score));
        assert_eq!(scored.sub_scores.len(), Factor::CORE.len());
        for score in scored.sub_scores.values() {
            assert!((0.0..=1.0).contains(score));
        }
    }
}

#[test]
fn final_score_matches_weighted_sub_scores() {
    let pipeline = RankingPipeline::default();
    for scored in pipeline.rank(Some(&applicant()), &catalog()) {
        let expected: f64 = scored.sub_scores.values().map(|score| score / 6.0).sum();
        assert!(
            (scored.final_score - expected).abs() <= 1e-4,
            "{} scored {} but sub-scores sum to {}",
            scored.offer.name,
            scored.final_score,
            expected
        );
    }
}

#[test]
fn best_matching_offer_ranks_first() {
    let pipeline = RankingPipeline::default();
    let ranked = pipeline.rank(Some(&applicant()), &catalog());

    let top = &ranked[0];
    assert_eq!(top.offer.name, "Assam Women in Engineering Award");
    assert_eq!(top.sub_score(Factor::Gender), Some(1.0));
    assert_eq!(top.sub_score(Factor::Cgpa), Some(1.0));
    assert_eq!(top.sub_score(Factor::Qualification), Some(1.0));
    assert_eq!(top.sub_score(Factor::Institution), Some(1.0));
    assert_eq!(top.sub_score(Factor::Address), Some(1.0));

    for pair in ranked.windows(2) {
        assert!(pair[0].final_score >= pair[1].final_score);
    }
}

#[test]
fn missing_applicant_or_empty_catalog_yields_nothing() {
    let pipeline = RankingPipeline::default();
    assert!(pipeline.rank(None, &catalog()).is_empty());
    assert!(pipeline.rank(Some(&applicant()), &[]).is_empty());
}

#[test]
fn equal_scores_keep_catalog_order() {
    let pipeline = RankingPipeline::default();
    let catalog: Vec<ScholarshipOffer> = ["a", "b", "c"]
        .into_iter()
        .map(|link| ScholarshipOffer {
            link: format!("https://example.org/{link}"),
            ..offer("Goa Residents Grant", "Open to residents of Goa")
        })
        .collect();

    let ranked = pipeline.rank(Some(&applicant()), &catalog);
    let links: Vec<&str> = ranked.iter().map(|s| s.offer.link.as_str()).collect();
    assert_eq!(
        links,
        vec![
            "https://example.org/a",
            "https://example.org/b",
            "https://example.org/c"
        ]
    );
}

#[test]
fn repeated_runs_serialize_identically() {
    let pipeline = RankingPipeline::default();
    let first = serde_json::to_vec(&pipeline.rank(Some(&applicant()), &catalog()))
        .expect("ranking serializes");
    let second = serde_json::to_vec(&pipeline.rank(Some(&applicant()), &catalog()))
        .expect("ranking serializes");
    assert_eq!(first, second);
}

#[test]
fn parallel_scoring_matches_sequential() {
    let catalog: Vec<ScholarshipOffer> = (0..64)
        .flat_map(|i| {
            catalog().into_iter().map(move |mut offer| {
                offer.name = format!("{} #{i}", offer.name);
                offer
            })
        })
        .collect();

    let sequential =
        RankingPipeline::new(ScoringConfig::default().with_parallel_threshold(usize::MAX));
    let parallel = RankingPipeline::new(ScoringConfig::default().with_parallel_threshold(1));

    assert_eq!(
        sequential.rank(Some(&applicant()), &catalog),
        parallel.rank(Some(&applicant()), &catalog)
    );
}

#[test]
fn opt_in_factors_are_only_reported_when_weighted() {
    let pipeline = RankingPipeline::default();
    let scored = pipeline.score_offer(&applicant(), &catalog()[1]);
    assert!(scored.sub_score(Factor::Amount).is_none());
    assert!(scored.sub_score(Factor::Urgency).is_none());
    assert!(scored.sub_score(Factor::NounOverlap).is_none());
}

#[test]
fn amount_factor_is_relative_to_catalog_maximum() {
    let weights = WeightTable::standard().with(Factor::Amount, 0.5);
    let pipeline = RankingPipeline::new(ScoringConfig::default().with_weights(weights));
    let ranked = pipeline.rank(Some(&applicant()), &catalog());

    let amount_of = |name: &str| {
        ranked
            .iter()
            .find(|scored| scored.offer.name == name)
            .and_then(|scored| scored.sub_score(Factor::Amount))
            .expect("amount reported")
    };
    assert_eq!(amount_of("Rural Sports Grant"), 1.0);
    assert_eq!(amount_of("Assam Women in Engineering Award"), 0.5);
    assert_eq!(amount_of("National Merit Scholarship"), 0.2);
    assert_eq!(amount_of(""), 0.0);
}

#[test]
fn urgency_uses_injected_reference_date() {
    let today = NaiveDate::from_ymd_opt(2025, 10, 16).expect("valid date");
    let weights = WeightTable::standard().with(Factor::Urgency, 0.25);
    let pipeline = RankingPipeline::new(
        ScoringConfig::default()
            .with_weights(weights)
            .with_reference_date(today),
    );
    let catalog = catalog();

    let soon = pipeline.score_offer(&applicant(), &catalog[1]);
    assert_eq!(soon.sub_score(Factor::Urgency), Some(0.2));

    let later = pipeline.score_offer(&applicant(), &catalog[0]);
    assert_eq!(later.sub_score(Factor::Urgency), Some(round4(1.0 / 46.0)));

    let unknown = pipeline.score_offer(&applicant(), &catalog[2]);
    assert_eq!(unknown.sub_score(Factor::Urgency), Some(0.0));
}

#[test]
fn overweighted_tables_are_clamped() {
    let mut weights = WeightTable::standard();
    for factor in Factor::CORE {
        weights.set(factor, 1.0);
    }
    let pipeline = RankingPipeline::new(ScoringConfig::default().with_weights(weights));
    let ranked = pipeline.rank(Some(&applicant()), &catalog());
    assert_eq!(ranked[0].final_score, 1.0);
}

#[test]
fn cgpa_scale_follows_configuration() {
    let mut on_four_point_scale = applicant();
    on_four_point_scale.cgpa = 3.0;
    let requirement = offer("Scale", "Minimum CGPA 3.2");

    let pipeline = RankingPipeline::new(ScoringConfig::default().with_max_cgpa(4.0));
    let scored = pipeline.score_offer(&on_four_point_scale, &requirement);
    assert_eq!(scored.sub_score(Factor::Cgpa), Some(0.9375));
}
