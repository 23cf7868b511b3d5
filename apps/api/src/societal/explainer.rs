//! Explanation generation — pluggable, trait-based elaboration of an engine result.
//!
//! Default without an API key: `TemplateExplainer` (static, deterministic).
//! With `ANTHROPIC_API_KEY`: `LlmExplainer` via the shared `LlmClient`.
//!
//! `AppState` holds an `Arc<dyn Explainer>`, chosen at startup from config.

use async_trait::async_trait;

use crate::errors::AppError;
use crate::llm_client::LlmClient;
use crate::societal::keys::{CompoundKey, Domain, Source};
use crate::societal::prompts::{EXPLANATION_PROMPT_TEMPLATE, EXPLANATION_SYSTEM};
use crate::societal::Recommendation;

/// Turns an engine result into student-facing prose.
#[async_trait]
pub trait Explainer: Send + Sync {
    async fn explain(&self, recommendation: &Recommendation) -> Result<String, AppError>;

    /// "llm" | "template" — reported back to callers for transparency.
    fn backend(&self) -> &'static str;
}

// ────────────────────────────────────────────────────────────────────────────
// LlmExplainer
// ────────────────────────────────────────────────────────────────────────────

pub struct LlmExplainer(pub LlmClient);

#[async_trait]
impl Explainer for LlmExplainer {
    async fn explain(&self, recommendation: &Recommendation) -> Result<String, AppError> {
        let prompt = build_explanation_prompt(recommendation);
        let response = self
            .0
            .call(&prompt, EXPLANATION_SYSTEM)
            .await
            .map_err(|e| AppError::Llm(format!("Explanation generation failed: {e}")))?;

        response
            .text()
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .ok_or_else(|| AppError::Llm("Explanation generation returned no text".to_string()))
    }

    fn backend(&self) -> &'static str {
        "llm"
    }
}

fn build_explanation_prompt(recommendation: &Recommendation) -> String {
    let bias_scores = recommendation
        .bias_scores
        .iter()
        .map(|(key, score)| format!("{key}: {score:.2}"))
        .collect::<Vec<_>>()
        .join("\n");
    let domain_scores = recommendation
        .domain_scores
        .iter()
        .map(|(domain, score)| format!("{domain}: {score:.2}"))
        .collect::<Vec<_>>()
        .join("\n");
    let final_domains = recommendation
        .winning_domains
        .iter()
        .map(|d| d.name())
        .collect::<Vec<_>>()
        .join(", ");

    EXPLANATION_PROMPT_TEMPLATE
        .replace("{bias_scores}", &bias_scores)
        .replace("{domain_scores}", &domain_scores)
        .replace("{final_domains}", &final_domains)
}

// ────────────────────────────────────────────────────────────────────────────
// TemplateExplainer
// ────────────────────────────────────────────────────────────────────────────

/// Static-template explainer. No network, same output for the same result.
pub struct TemplateExplainer;

#[async_trait]
impl Explainer for TemplateExplainer {
    async fn explain(&self, recommendation: &Recommendation) -> Result<String, AppError> {
        Ok(template_explanation(recommendation))
    }

    fn backend(&self) -> &'static str {
        "template"
    }
}

pub fn template_explanation(recommendation: &Recommendation) -> String {
    let winners: Vec<&str> = recommendation
        .winning_domains
        .iter()
        .map(|d| d.name())
        .collect();

    let title = match winners.as_slice() {
        [single] => format!("Why {single} suits you"),
        [first, second] => format!("Why {first} and {second} both suit you"),
        _ => format!("Why {} all suit you", join_names(&winners)),
    };

    let mut lines = vec![title, String::new()];
    for source in Source::ALL {
        if let Some((domain, score)) = strongest_domain_for(recommendation, source) {
            lines.push(format!(
                "• {} lean most toward {} ({score:.2} out of 5).",
                source_phrase(source),
                domain.name().to_lowercase()
            ));
        }
    }
    if winners.len() > 1 {
        lines.push(format!(
            "• {} received the same overall influence, so they are worth exploring side by side.",
            join_names(&winners)
        ));
    }

    lines.push(String::new());
    lines.push(format!(
        "{} Talk to someone working in the field and try a short course or project to see how it feels in practice.",
        recommendation.reason
    ));

    lines.join("\n")
}

fn strongest_domain_for(recommendation: &Recommendation, source: Source) -> Option<(Domain, f64)> {
    Domain::ALL
        .into_iter()
        .filter_map(|domain| {
            recommendation
                .bias_scores
                .get(&CompoundKey::new(source, domain))
                .map(|&score| (domain, score))
        })
        .fold(None, |best, (domain, score)| match best {
            Some((_, best_score)) if best_score >= score => best,
            _ => Some((domain, score)),
        })
}

/// "A and B" / "A, B and C".
fn join_names(names: &[&str]) -> String {
    match names {
        [] => String::new(),
        [only] => only.to_string(),
        [init @ .., last] => format!("{} and {last}", init.join(", ")),
    }
}

fn source_phrase(source: Source) -> &'static str {
    match source {
        Source::Peer => "Your friends and peers",
        Source::Family => "Your family and relatives",
        Source::Role => "The role models you admire",
    }
}
