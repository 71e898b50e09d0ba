//! The analyze operation: one prompt, one model call, one parsed result.

use crate::analysis::models::CvAnalysis;
use crate::analysis::prompts::{analysis_response_schema, build_analysis_prompt};
use crate::errors::AppError;
use crate::llm_client::GeminiClient;

/// Analyzes CV text with the model and returns the structured assessment.
/// Exactly one external call per invocation; any failure (transport, API
/// error, empty reply, shape mismatch) fails the whole operation — no
/// partial results.
pub async fn analyze_cv(
    cv_text: &str,
    desired_industry: Option<&str>,
    llm: &GeminiClient,
) -> Result<CvAnalysis, AppError> {
    let prompt = build_analysis_prompt(cv_text, desired_industry);
    llm.generate_json::<CvAnalysis>(&prompt, analysis_response_schema())
        .await
        .map_err(|e| AppError::Analysis(format!("CV analysis failed: {e}")))
}
