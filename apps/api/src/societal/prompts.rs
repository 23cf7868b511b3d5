// LLM prompt constants for the societal explanation.
// The explanation is presentation only; the engine result is already final.

/// System prompt for the student-facing explanation.
pub const EXPLANATION_SYSTEM: &str = "You are an expert career-counselling assistant. \
    Explain career recommendations to students in simple, friendly language. \
    Do NOT mention algorithms, fuzzy logic, or mathematics.";

/// Explanation prompt template. Replace `{bias_scores}`, `{domain_scores}` and
/// `{final_domains}` before sending.
pub const EXPLANATION_PROMPT_TEMPLATE: &str = r#"Explain the recommendation below to a student.

Guidelines:
- Explain why the recommended domain(s) fit the student
- Refer naturally to peer, family, and role-model influence
- Be supportive and neutral
- If multiple domains are suggested, explain the overlap
- End with 1-2 reflective suggestions

Format:
- Short title
- 3-5 bullet points
- One short closing paragraph

Bias-adjusted influence scores (1-5 scale, per source and domain):
{bias_scores}

Domain scores:
{domain_scores}

Final recommendation:
{final_domains}
"#;
