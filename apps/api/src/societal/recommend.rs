//! Aggregation & selection — bias scores → per-domain Sugeno scores → winning domain(s).

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::debug;

use crate::societal::bias::bias_adjusted_pair;
use crate::societal::error::{InferenceError, SurveyError};
use crate::societal::keys::{CompoundKey, Domain, Source};
use crate::societal::mapping::{map_to_responses, structure_responses, SurveyResponses};
use crate::societal::round2;
use crate::societal::sugeno::sugeno_domain_influence;

/// Engine output. `domain_scores` and `winning_domains` are authoritative;
/// `reason` is supplementary text.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    pub bias_scores: BTreeMap<CompoundKey, f64>,
    pub domain_scores: BTreeMap<Domain, f64>,
    pub winning_domains: Vec<Domain>,
    pub reason: String,
}

/// Runs the full engine on an ordered 18-answer vector.
pub fn recommend_from_answers(answers: &[f64]) -> Result<Recommendation, SurveyError> {
    let responses = map_to_responses(answers)?;
    compute_recommendation(&responses)
}

/// Runs structuring, bias correction, inference and selection on a semantic-key map.
pub fn compute_recommendation(responses: &SurveyResponses) -> Result<Recommendation, SurveyError> {
    let bias_scores: BTreeMap<CompoundKey, f64> = structure_responses(responses)?
        .into_iter()
        .map(|(key, pair)| (key, bias_adjusted_pair(pair.pos, pair.neg)))
        .collect();

    let domain_scores = score_domains(&bias_scores).map_err(SurveyError::InternalInferenceFailure)?;

    let winning_domains = select_winners(&domain_scores);
    let reason = build_reason(&winning_domains);

    debug!(
        "Societal recommendation computed: scores={:?}, winners={:?}",
        domain_scores, winning_domains
    );

    Ok(Recommendation {
        bias_scores,
        domain_scores,
        winning_domains,
        reason,
    })
}

fn score_domains(
    bias_scores: &BTreeMap<CompoundKey, f64>,
) -> Result<BTreeMap<Domain, f64>, InferenceError> {
    let score_of = |source: Source, domain: Domain| {
        let key = CompoundKey::new(source, domain);
        bias_scores
            .get(&key)
            .copied()
            .ok_or(InferenceError::MissingScore(key))
    };

    Domain::ALL
        .into_iter()
        .map(|domain| {
            let influence = sugeno_domain_influence(
                score_of(Source::Peer, domain)?,
                score_of(Source::Family, domain)?,
                score_of(Source::Role, domain)?,
            );
            if !influence.is_finite() {
                return Err(InferenceError::NonFinite(domain));
            }
            Ok((domain, round2(influence)))
        })
        .collect()
}

/// Every domain whose score equals the maximum, in domain order.
fn select_winners(domain_scores: &BTreeMap<Domain, f64>) -> Vec<Domain> {
    let max = domain_scores
        .values()
        .copied()
        .fold(f64::NEG_INFINITY, f64::max);

    domain_scores
        .iter()
        .filter(|&(_, &score)| score == max)
        .map(|(&domain, _)| domain)
        .collect()
}

fn build_reason(winners: &[Domain]) -> String {
    match winners {
        [single] => format!(
            "The {} domain is recommended due to the highest aggregated influence score \
             from peer, family, and role model factors.",
            single.name().to_lowercase()
        ),
        _ => {
            let names: Vec<String> = winners.iter().map(|d| d.name().to_lowercase()).collect();
            format!(
                "The {} domains are jointly recommended as they share the highest \
                 aggregated influence score.",
                names.join(", ")
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::societal::keys::{Polarity, SemanticKey, QUESTION_ORDER};

    /// Builds an answer vector from a per-statement function.
    fn answers_with(f: impl Fn(SemanticKey) -> f64) -> Vec<f64> {
        QUESTION_ORDER.iter().map(|&k| f(k)).collect()
    }

    /// Strongly favourable answers for `favoured`, neutral for the rest.
    fn favour(favoured: &[Domain]) -> Vec<f64> {
        answers_with(|k| {
            match (favoured.contains(&k.compound.domain), k.polarity) {
                (true, Polarity::Pos) => 5.0,
                (true, Polarity::Neg) => 1.0,
                (false, _) => 3.0,
            }
        })
    }

    #[test]
    fn test_technology_dominant_vector_wins_alone() {
        let rec = recommend_from_answers(&favour(&[Domain::Technology])).unwrap();

        assert_eq!(rec.winning_domains, vec![Domain::Technology]);
        assert_eq!(rec.domain_scores[&Domain::Technology], 8.5);
        assert_eq!(rec.domain_scores[&Domain::Medical], 5.0);
        assert_eq!(rec.domain_scores[&Domain::Government], 5.0);
        assert!(rec.reason.contains("technology"));
        assert!(rec.reason.contains("domain is recommended"));
    }

    #[test]
    fn test_bias_scores_cover_nine_compound_keys() {
        let rec = recommend_from_answers(&favour(&[Domain::Medical])).unwrap();
        assert_eq!(rec.bias_scores.len(), 9);
        for key in CompoundKey::all() {
            let expected = if key.domain == Domain::Medical { 5.0 } else { 3.0 };
            assert_eq!(rec.bias_scores[&key], expected, "{key}");
        }
    }

    #[test]
    fn test_tie_yields_multiple_winners() {
        let rec = recommend_from_answers(&favour(&[Domain::Medical, Domain::Government])).unwrap();

        assert_eq!(rec.winning_domains, vec![Domain::Medical, Domain::Government]);
        assert_eq!(
            rec.reason,
            "The medical, government domains are jointly recommended as they share the \
             highest aggregated influence score."
        );
    }

    #[test]
    fn test_all_neutral_is_three_way_tie() {
        let rec = recommend_from_answers(&[3.0; 18]).unwrap();
        assert_eq!(rec.winning_domains, Domain::ALL.to_vec());
        assert!(rec.reason.contains("technology, medical, government"));
    }

    #[test]
    fn test_rejects_before_inference() {
        assert!(matches!(
            recommend_from_answers(&[3.0; 5]),
            Err(SurveyError::InvalidInputShape { .. })
        ));

        let mut answers = favour(&[Domain::Technology]);
        answers[11] = 7.0;
        assert!(matches!(
            recommend_from_answers(&answers),
            Err(SurveyError::InvalidRangeValue { position: 11, .. })
        ));

        answers[11] = 4.2;
        assert!(recommend_from_answers(&answers).is_err());
    }

    #[test]
    fn test_missing_pair_wrapped_as_internal_failure() {
        let mut responses = map_to_responses(&[3.0; 18]).unwrap();
        responses.remove("role_gov_pos");
        responses.remove("role_gov_neg");

        let err = compute_recommendation(&responses).unwrap_err();
        assert_eq!(err.code(), "INTERNAL_INFERENCE_FAILURE");
        match err {
            SurveyError::InternalInferenceFailure(InferenceError::MissingScore(key)) => {
                assert_eq!(key, CompoundKey::new(Source::Role, Domain::Government));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_degenerate_domain_scores_zero() {
        // peer_med → 4.0 (pos 4, neg 2), family_med → 2.0 (pos 2, neg 4), role_med → 2.0
        let answers = answers_with(|k| match (k.compound.domain, k.compound.source, k.polarity) {
            (Domain::Medical, Source::Peer, Polarity::Pos) => 4.0,
            (Domain::Medical, Source::Peer, Polarity::Neg) => 2.0,
            (Domain::Medical, _, Polarity::Pos) => 2.0,
            (Domain::Medical, _, Polarity::Neg) => 4.0,
            _ => 3.0,
        });
        let rec = recommend_from_answers(&answers).unwrap();
        assert_eq!(rec.domain_scores[&Domain::Medical], 0.0);
        assert_eq!(rec.winning_domains, vec![Domain::Technology, Domain::Government]);
    }

    #[test]
    fn test_repeated_invocations_are_identical() {
        let answers = answers_with(|k| (k.question_number() % 5 + 1) as f64);
        let first = recommend_from_answers(&answers).unwrap();
        let second = recommend_from_answers(&answers).unwrap();
        assert_eq!(first, second);
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }

    #[test]
    fn test_serializes_with_wire_names() {
        let rec = recommend_from_answers(&favour(&[Domain::Technology])).unwrap();
        let json = serde_json::to_value(&rec).unwrap();
        assert_eq!(json["bias_scores"]["peer_tech"], 5.0);
        assert_eq!(json["domain_scores"]["Technology"], 8.5);
        assert_eq!(json["winning_domains"][0], "Technology");
    }
}
