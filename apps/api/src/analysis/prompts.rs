//! Prompt and response-schema construction for CV analysis.

use serde_json::{json, Value};

/// CV text beyond this many characters is dropped before prompting.
pub const MAX_ANALYSIS_CHARS: usize = 10_000;

/// Builds the single analysis prompt. When a desired industry is given, the
/// scoring, strengths, weaknesses, and role-suggestion instructions are all
/// biased toward that industry.
pub fn build_analysis_prompt(cv_text: &str, desired_industry: Option<&str>) -> String {
    let cv_text = truncate_chars(cv_text, MAX_ANALYSIS_CHARS);

    let mut prompt = String::from(
        "Analyze the CV/resume content below. Act as a professional recruiting (HR) expert.\n\n",
    );

    if let Some(industry) = desired_industry {
        prompt.push_str(&format!(
            "IMPORTANT: The candidate wants to apply for roles in the \"{industry}\" \
             industry. Focus your assessment on how well the CV fits this industry.\n\n"
        ));
    }

    prompt.push_str(&format!("CV content: \"{cv_text}\"\n\n"));

    prompt.push_str("Return the result as JSON with the following fields:\n");
    match desired_industry {
        Some(industry) => {
            prompt.push_str(&format!(
                "- score: a 0-100 rating of the CV's quality for a position in the {industry} industry.\n\
                 - summary: a two-sentence summary of the candidate's professional profile.\n\
                 - strengths: an array of the candidate's 3 most notable strengths relevant to the {industry} industry.\n\
                 - weaknesses: an array of 3 weaknesses or skills to add or improve to work well in the {industry} industry. If the CV does not fit this industry, state the reason clearly.\n\
                 - suggestedRoles: an array of the 3 best-matching job roles. Prefer roles in the {industry} industry where possible, or closely related roles. For each role, you MUST provide a \"suitability\" field explaining why it fits.\n"
            ));
        }
        None => {
            prompt.push_str(
                "- score: a 0-100 rating of the CV's quality.\n\
                 - summary: a two-sentence summary of the candidate's professional profile.\n\
                 - strengths: an array of the candidate's 3 most notable strengths.\n\
                 - weaknesses: an array of 3 weaknesses or skills to add or improve.\n\
                 - suggestedRoles: an array of the 3 best-matching job roles. For each role, you MUST provide a \"suitability\" field explaining why it fits.\n",
            );
        }
    }

    prompt
}

/// The declared output shape sent with every analysis call
/// (Gemini `responseSchema`, OpenAPI-subset types).
pub fn analysis_response_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "score": {"type": "INTEGER"},
            "summary": {"type": "STRING"},
            "strengths": {"type": "ARRAY", "items": {"type": "STRING"}},
            "weaknesses": {"type": "ARRAY", "items": {"type": "STRING"}},
            "suggestedRoles": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "role": {"type": "STRING"},
                        "suitability": {"type": "STRING"}
                    },
                    "required": ["role", "suitability"]
                }
            }
        },
        "required": ["score", "summary", "strengths", "weaknesses", "suggestedRoles"]
    })
}

/// Returns at most the first `max_chars` characters of `text`, on a char
/// boundary.
fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
