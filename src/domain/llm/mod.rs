//! LLM chat completion models and the provider seam

mod provider;
mod request;
mod response;

pub use provider::LlmProvider;
pub use request::{LlmRequest, Message, MessageRole};
pub use response::{FinishReason, LlmResponse, Usage};

#[cfg(test)]
pub use provider::mock::MockLlmProvider;
