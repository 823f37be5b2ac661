use std::sync::Arc;

use super::http_client::HttpClient;
use super::OllamaProvider;
use crate::config::BackendConfig;
use crate::domain::{DomainError, LlmProvider};

/// Factory for creating LLM providers
#[derive(Debug)]
pub struct LlmProviderFactory;

impl LlmProviderFactory {
    /// Create the configured backend provider.
    ///
    /// The transport timeout matches the per-attempt timeout so that a stalled
    /// connection is released together with the attempt that owns it.
    pub fn create(config: &BackendConfig) -> Result<Arc<dyn LlmProvider>, DomainError> {
        let http_client = HttpClient::with_timeout(config.request_timeout())?;
        let provider = OllamaProvider::with_base_url(http_client, &config.base_url);

        Ok(Arc::new(provider))
    }
}
