use std::sync::Arc;

use crate::societal::explainer::Explainer;
use crate::societal::store::AnalysisStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Pluggable explanation backend. LlmExplainer when an API key is configured,
    /// TemplateExplainer otherwise.
    pub explainer: Arc<dyn Explainer>,
    pub store: Arc<dyn AnalysisStore>,
}
