//! Response mapping and structuring — turns raw survey input into validated
//! pos/neg Likert pairs per compound key.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::societal::error::SurveyError;
use crate::societal::keys::{
    lookup_semantic_key, CompoundKey, Polarity, QUESTION_ORDER, SURVEY_LENGTH,
};

/// Semantic key (`role_med_pos`) → submitted value, as received on the wire.
pub type SurveyResponses = BTreeMap<String, f64>;

pub const LIKERT_MIN: u8 = 1;
pub const LIKERT_MAX: u8 = 5;

/// Both validated answers for one compound key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LikertPair {
    pub pos: u8,
    pub neg: u8,
}

/// Maps an ordered answer vector onto the fixed semantic keys.
///
/// Position matters: answer `i` is attributed to `QUESTION_ORDER[i]`.
pub fn map_to_responses(answers: &[f64]) -> Result<SurveyResponses, SurveyError> {
    if answers.len() != SURVEY_LENGTH {
        return Err(SurveyError::InvalidInputShape {
            expected: SURVEY_LENGTH,
            actual: answers.len(),
        });
    }

    answers
        .iter()
        .zip(QUESTION_ORDER.iter())
        .enumerate()
        .map(|(position, (&value, key))| {
            if !is_integral(value) || as_likert(value).is_none() {
                return Err(SurveyError::InvalidRangeValue {
                    position,
                    question: position + 1,
                    value,
                });
            }
            Ok((key.to_string(), value))
        })
        .collect()
}

/// Converts a semantic-key map received as raw JSON into numeric responses.
///
/// Strings, booleans, nulls and nested values are rejected as non-integer
/// Likert values; unknown keys are reported before the value is inspected.
pub fn responses_from_json(raw: &BTreeMap<String, Value>) -> Result<SurveyResponses, SurveyError> {
    raw.iter()
        .map(|(raw_key, value)| {
            let key = lookup_semantic_key(raw_key)
                .ok_or_else(|| SurveyError::UnknownSemanticKey(raw_key.clone()))?;
            let number = value
                .as_f64()
                .ok_or_else(|| SurveyError::NonIntegerLikertValue {
                    key: raw_key.clone(),
                    question: key.question_number(),
                    value: value.to_string(),
                })?;
            Ok((raw_key.clone(), number))
        })
        .collect()
}

/// Resolves each semantic key and groups values into pos/neg pairs.
///
/// Only compound keys that appear in `responses` are produced; each of those
/// must carry both polarities.
pub fn structure_responses(
    responses: &SurveyResponses,
) -> Result<BTreeMap<CompoundKey, LikertPair>, SurveyError> {
    let mut partial: BTreeMap<CompoundKey, (Option<u8>, Option<u8>)> = BTreeMap::new();

    for (raw_key, &value) in responses {
        let key = lookup_semantic_key(raw_key)
            .ok_or_else(|| SurveyError::UnknownSemanticKey(raw_key.clone()))?;

        if !is_integral(value) {
            return Err(SurveyError::NonIntegerLikertValue {
                key: raw_key.clone(),
                question: key.question_number(),
                value: value.to_string(),
            });
        }

        let likert = as_likert(value).ok_or_else(|| SurveyError::LikertOutOfRange {
            key: raw_key.clone(),
            question: key.question_number(),
            value,
        })?;

        let slot = partial.entry(key.compound).or_default();
        match key.polarity {
            Polarity::Pos => slot.0 = Some(likert),
            Polarity::Neg => slot.1 = Some(likert),
        }
    }

    partial
        .into_iter()
        .map(|(compound, pair)| match pair {
            (Some(pos), Some(neg)) => Ok((compound, LikertPair { pos, neg })),
            _ => Err(SurveyError::MissingPolarity(compound)),
        })
        .collect()
}

fn is_integral(value: f64) -> bool {
    value.is_finite() && value.fract() == 0.0
}

fn as_likert(value: f64) -> Option<u8> {
    if (f64::from(LIKERT_MIN)..=f64::from(LIKERT_MAX)).contains(&value) && is_integral(value) {
        Some(value as u8)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::societal::keys::{Domain, Source};
    use serde_json::json;

    fn full_answers() -> Vec<f64> {
        (0..SURVEY_LENGTH).map(|i| (i % 5 + 1) as f64).collect()
    }

    #[test]
    fn test_map_preserves_values_by_position() {
        let answers = full_answers();
        let responses = map_to_responses(&answers).unwrap();
        assert_eq!(responses.len(), SURVEY_LENGTH);
        for (idx, key) in QUESTION_ORDER.iter().enumerate() {
            assert_eq!(responses[&key.to_string()], answers[idx]);
        }
    }

    #[test]
    fn test_map_rejects_short_vector() {
        let err = map_to_responses(&[3.0; 17]).unwrap_err();
        assert!(matches!(
            err,
            SurveyError::InvalidInputShape {
                expected: 18,
                actual: 17
            }
        ));
    }

    #[test]
    fn test_map_rejects_long_vector() {
        let err = map_to_responses(&[3.0; 19]).unwrap_err();
        assert!(matches!(err, SurveyError::InvalidInputShape { actual: 19, .. }));
    }

    #[test]
    fn test_map_names_out_of_range_position() {
        let mut answers = full_answers();
        answers[7] = 6.0;
        let err = map_to_responses(&answers).unwrap_err();
        assert!(matches!(
            err,
            SurveyError::InvalidRangeValue {
                position: 7,
                question: 8,
                ..
            }
        ));
        assert_eq!(
            err.to_string(),
            "Answer to question 8 must be an integer between 1 and 5 (got 6)"
        );

        answers[7] = 0.0;
        assert!(map_to_responses(&answers).is_err());
    }

    #[test]
    fn test_map_rejects_fractional_answer() {
        let mut answers = full_answers();
        answers[3] = 2.5;
        let err = map_to_responses(&answers).unwrap_err();
        assert!(matches!(err, SurveyError::InvalidRangeValue { position: 3, .. }));
    }

    #[test]
    fn test_structure_pairs_every_compound_key() {
        let responses = map_to_responses(&full_answers()).unwrap();
        let structured = structure_responses(&responses).unwrap();
        assert_eq!(structured.len(), 9);

        // role_med_pos is answer 0 (=1), role_med_neg is answer 10 (=1)
        let role_med = structured[&CompoundKey::new(Source::Role, Domain::Medical)];
        assert_eq!(role_med, LikertPair { pos: 1, neg: 1 });
    }

    #[test]
    fn test_structure_rejects_unknown_key() {
        let mut responses = map_to_responses(&full_answers()).unwrap();
        responses.insert("mentor_tech_pos".to_string(), 3.0);
        let err = structure_responses(&responses).unwrap_err();
        assert!(matches!(err, SurveyError::UnknownSemanticKey(k) if k == "mentor_tech_pos"));
    }

    #[test]
    fn test_structure_rejects_non_integer() {
        let mut responses = map_to_responses(&full_answers()).unwrap();
        responses.insert("peer_gov_pos".to_string(), 3.5);
        let err = structure_responses(&responses).unwrap_err();
        assert!(matches!(
            err,
            SurveyError::NonIntegerLikertValue { ref key, question: 16, .. } if key == "peer_gov_pos"
        ));
    }

    #[test]
    fn test_structure_rejects_out_of_range() {
        let mut responses = map_to_responses(&full_answers()).unwrap();
        responses.insert("family_med_neg".to_string(), 9.0);
        let err = structure_responses(&responses).unwrap_err();
        assert!(matches!(err, SurveyError::LikertOutOfRange { ref key, .. } if key == "family_med_neg"));
    }

    #[test]
    fn test_structure_reports_missing_polarity() {
        let mut responses = map_to_responses(&full_answers()).unwrap();
        responses.remove("peer_tech_neg");
        let err = structure_responses(&responses).unwrap_err();
        assert!(matches!(
            err,
            SurveyError::MissingPolarity(k) if k == CompoundKey::new(Source::Peer, Domain::Technology)
        ));
        assert_eq!(
            SurveyError::MissingPolarity(CompoundKey::new(Source::Peer, Domain::Technology))
                .to_string(),
            "Missing positive or negative response for 'peer_tech'"
        );
    }

    #[test]
    fn test_json_responses_accept_numbers() {
        let raw: BTreeMap<String, Value> = BTreeMap::from([
            ("peer_tech_pos".to_string(), json!(4)),
            ("peer_tech_neg".to_string(), json!(2.0)),
        ]);
        let responses = responses_from_json(&raw).unwrap();
        assert_eq!(responses["peer_tech_pos"], 4.0);
        assert_eq!(responses["peer_tech_neg"], 2.0);
    }

    #[test]
    fn test_json_responses_reject_non_numbers() {
        for bad in [json!("4"), json!(true), json!(null), json!([4])] {
            let raw = BTreeMap::from([("peer_tech_pos".to_string(), bad.clone())]);
            let err = responses_from_json(&raw).unwrap_err();
            assert!(
                matches!(
                    err,
                    SurveyError::NonIntegerLikertValue { ref key, question: 12, ref value }
                        if key == "peer_tech_pos" && *value == bad.to_string()
                ),
                "{bad}: {err:?}"
            );
        }
    }

    #[test]
    fn test_json_responses_report_unknown_key_first() {
        let raw = BTreeMap::from([("mentor_tech_pos".to_string(), json!("4"))]);
        assert!(matches!(
            responses_from_json(&raw).unwrap_err(),
            SurveyError::UnknownSemanticKey(k) if k == "mentor_tech_pos"
        ));
    }

    #[test]
    fn test_structure_skips_absent_compound_keys() {
        let mut responses = map_to_responses(&full_answers()).unwrap();
        responses.remove("role_gov_pos");
        responses.remove("role_gov_neg");
        let structured = structure_responses(&responses).unwrap();
        assert_eq!(structured.len(), 8);
    }
}
