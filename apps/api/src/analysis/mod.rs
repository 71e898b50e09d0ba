// CV analysis: result models, prompt construction, the one-shot analyze
// operation, and its HTTP handlers.
// All model calls go through llm_client — no direct Gemini calls here.

pub mod analyzer;
pub mod handlers;
pub mod industries;
pub mod models;
pub mod prompts;
