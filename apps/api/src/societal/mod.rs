// Societal influence engine: maps the 18-statement influence survey to a career
// domain recommendation through bias correction and Sugeno fuzzy inference.
// The engine (keys → mapping → bias → fuzzy → sugeno → recommend) is pure and
// synchronous; explainer, store and handlers are the hosting layer around it.

pub mod bias;
pub mod error;
pub mod explainer;
pub mod fuzzy;
pub mod handlers;
pub mod keys;
pub mod mapping;
pub mod prompts;
pub mod recommend;
pub mod store;
pub mod sugeno;

pub use error::SurveyError;
pub use keys::Domain;
pub use recommend::{compute_recommendation, recommend_from_answers, Recommendation};

/// Rounds to two decimal places, the precision every reported score uses.
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
