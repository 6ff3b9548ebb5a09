pub mod explanation;
pub mod web_search;

pub use explanation::{Explanation, ExplanationProvider, ExplanationRequest, LlmExplanationProvider};
pub use web_search::{UnifiedWebResearch, WebResearch, WebResearchProvider};
