pub mod agents;
pub mod cli;
pub mod compatibility;
pub mod config;
pub mod error;
pub mod llm;
pub mod logging;
pub mod orchestrator;
pub mod reference;
pub mod types;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use error::{ProviderError, ValidationError};
pub use orchestrator::Orchestrator;
pub use types::{AbundanceLevel, BloomQuery, BloomResponse, ProviderStatus};
