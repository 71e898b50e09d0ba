use serde::{Deserialize, Serialize};

/// Structured assessment of one CV, produced entirely by the model.
/// The service validates shape via the declared response schema and serde,
/// never value ranges — a score of 0 and a score of 100 are equally valid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CvAnalysis {
    /// 0–100 quality rating.
    pub score: i32,
    /// Two-sentence summary of the candidate's professional profile.
    pub summary: String,
    /// The 3 most notable strengths.
    pub strengths: Vec<String>,
    /// 3 weaknesses or skills to improve.
    pub weaknesses: Vec<String>,
    /// The 3 best-matching roles, each with a suitability rationale.
    #[serde(rename = "suggestedRoles")]
    pub suggested_roles: Vec<SuggestedRole>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuggestedRole {
    pub role: String,
    pub suitability: String,
}
