//! Domain layer - Core business logic and entities

pub mod cache;
pub mod error;
pub mod llm;
pub mod materials;
pub mod search;

pub use cache::{Cache, Fingerprint, FingerprintBuilder, Fingerprinted};
pub use error::DomainError;
pub use llm::{FinishReason, LlmProvider, LlmRequest, LlmResponse, Message, MessageRole, Usage};
pub use materials::{Material, PlanParseRequest};
pub use search::{Estimate, ProductQuery, ProductSearchProvider, ProductSummary, StoreContext};
