pub mod provider_result;
pub mod query;
pub mod response;

pub use provider_result::{ProviderReport, ProviderResult, ProviderStatus};
pub use query::{BloomQuery, ClimateHint, Coordinates};
pub use response::{AbundanceLevel, BloomResponse, FlowerView, ResponseMetadata, WebResearchView};
