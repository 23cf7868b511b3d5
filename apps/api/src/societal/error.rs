use thiserror::Error;

use crate::societal::keys::{CompoundKey, Domain};

/// Rejections and failures raised by the influence engine.
///
/// Every variant except `InternalInferenceFailure` describes a malformed request.
#[derive(Debug, Error)]
pub enum SurveyError {
    #[error("Expected {expected} survey answers, got {actual}")]
    InvalidInputShape { expected: usize, actual: usize },

    /// `position` is the 0-based index into the answer vector, `question` the
    /// 1-based survey number shown to the respondent.
    #[error("Answer to question {question} must be an integer between 1 and 5 (got {value})")]
    InvalidRangeValue {
        position: usize,
        question: usize,
        value: f64,
    },

    #[error("Invalid response key: {0}")]
    UnknownSemanticKey(String),

    /// `value` is the submitted JSON value as written, e.g. `3.5` or `"4"`.
    #[error("Likert value for '{key}' (question {question}) must be an integer (got {value})")]
    NonIntegerLikertValue {
        key: String,
        question: usize,
        value: String,
    },

    #[error("Likert value for '{key}' (question {question}) must be between 1 and 5 (got {value})")]
    LikertOutOfRange {
        key: String,
        question: usize,
        value: f64,
    },

    #[error("Missing positive or negative response for '{0}'")]
    MissingPolarity(CompoundKey),

    #[error("Internal fuzzy inference failure")]
    InternalInferenceFailure(#[source] InferenceError),
}

/// Causes wrapped by [`SurveyError::InternalInferenceFailure`].
#[derive(Debug, Error)]
pub enum InferenceError {
    #[error("No bias-adjusted score for '{0}'")]
    MissingScore(CompoundKey),

    #[error("Non-finite influence score for {0}")]
    NonFinite(Domain),
}

impl SurveyError {
    /// Stable machine-readable code for API error envelopes.
    pub fn code(&self) -> &'static str {
        match self {
            SurveyError::InvalidInputShape { .. } => "INVALID_INPUT_SHAPE",
            SurveyError::InvalidRangeValue { .. } => "INVALID_RANGE_VALUE",
            SurveyError::UnknownSemanticKey(_) => "UNKNOWN_SEMANTIC_KEY",
            SurveyError::NonIntegerLikertValue { .. } => "NON_INTEGER_LIKERT_VALUE",
            SurveyError::LikertOutOfRange { .. } => "LIKERT_OUT_OF_RANGE",
            SurveyError::MissingPolarity(_) => "MISSING_POLARITY",
            SurveyError::InternalInferenceFailure(_) => "INTERNAL_INFERENCE_FAILURE",
        }
    }

    /// True when the caller sent a bad request, false for engine bugs.
    pub fn is_client_error(&self) -> bool {
        !matches!(self, SurveyError::InternalInferenceFailure(_))
    }
}
