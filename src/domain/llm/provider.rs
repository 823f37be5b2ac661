use async_trait::async_trait;
use std::fmt::Debug;

use super::{LlmRequest, LlmResponse};
use crate::domain::DomainError;

/// Trait for remote LLM backends consulted for sentiment judgments
#[async_trait]
pub trait LlmProvider: Send + Sync + Debug {
    /// Send a non-streaming chat request
    async fn chat(&self, model: &str, request: LlmRequest) -> Result<LlmResponse, DomainError>;

    /// List the models the backend currently serves
    async fn list_models(&self) -> Result<Vec<String>, DomainError>;

    /// Get the provider name
    fn provider_name(&self) -> &'static str;

    /// Base URL the provider talks to
    fn base_url(&self) -> &str;
}
