//! Bounded-concurrency batch analysis

use std::sync::Arc;
use std::time::Instant;

use futures::future::join_all;
use tokio::sync::Semaphore;
use tracing::{info, instrument};

use super::SentimentService;
use crate::domain::DomainError;
use crate::domain::sentiment::SentimentResult;
use crate::infrastructure::observability::record_batch;

/// Fans texts out to the sentiment service, at most `limit` at a time.
///
/// Results are positionally aligned with the inputs regardless of the order
/// in which individual analyses finish.
#[derive(Debug, Clone)]
pub struct BatchService {
    service: Arc<SentimentService>,
    default_limit: usize,
}

impl BatchService {
    pub fn new(service: Arc<SentimentService>, default_limit: usize) -> Result<Self, DomainError> {
        if default_limit == 0 {
            return Err(DomainError::configuration(
                "batch concurrency limit must be greater than zero",
            ));
        }

        Ok(Self {
            service,
            default_limit,
        })
    }

    pub fn default_limit(&self) -> usize {
        self.default_limit
    }

    pub async fn analyze_batch_default(
        &self,
        texts: &[String],
    ) -> Result<Vec<SentimentResult>, DomainError> {
        self.analyze_batch(texts, self.default_limit).await
    }

    #[instrument(skip(self, texts), fields(batch_size = texts.len()))]
    pub async fn analyze_batch(
        &self,
        texts: &[String],
        limit: usize,
    ) -> Result<Vec<SentimentResult>, DomainError> {
        if limit == 0 {
            return Err(DomainError::validation(
                "concurrency limit must be greater than zero",
            ));
        }

        let started = Instant::now();
        let gate = Semaphore::new(limit);

        let tasks = texts.iter().map(|text| {
            let gate = &gate;
            async move {
                let _permit = gate
                    .acquire()
                    .await
                    .map_err(|e| DomainError::internal(format!("Batch gate closed: {}", e)))?;

                Ok::<_, DomainError>(self.service.analyze(text, true).await)
            }
        });

        let results = join_all(tasks)
            .await
            .into_iter()
            .collect::<Result<Vec<_>, _>>()?;

        let elapsed = started.elapsed();
        record_batch(results.len(), elapsed);

        let positive = results.iter().filter(|r| r.is_positive()).count();
        info!(
            batch_size = results.len(),
            positive,
            negative = results.len() - positive,
            limit,
            duration_ms = elapsed.as_millis() as u64,
            "Batch analysis completed"
        );

        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::llm::{Message, MockLlmProvider, MockReply};
    use crate::domain::{LlmProvider, LlmRequest, LlmResponse, SentimentLabel};
    use crate::infrastructure::cache::{InMemoryCacheConfig, InMemoryResultCache};
    use crate::infrastructure::services::SentimentServiceConfig;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    fn batch_service(provider: MockLlmProvider, limit: usize) -> BatchService {
        let cache = Arc::new(InMemoryResultCache::new(InMemoryCacheConfig::default()).unwrap());
        let config = SentimentServiceConfig::default()
            .with_retry_delay(Duration::from_millis(1))
            .with_request_timeout(Duration::from_secs(5));
        let service = SentimentService::new(Arc::new(provider), cache, config).unwrap();

        BatchService::new(Arc::new(service), limit).unwrap()
    }

    fn texts(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    /// Replies by review text; earlier inputs take longer so completion order is reversed
    fn review_handler(request: &LlmRequest) -> MockReply {
        let prompt = &request.messages[0].content;

        if prompt.contains("Review: good product") {
            MockReply::Delayed(
                Duration::from_millis(120),
                r#"{"polarity": 0.7, "label": "positive"}"#.to_string(),
            )
        } else if prompt.contains("Review: terrible item") {
            MockReply::Delayed(
                Duration::from_millis(60),
                r#"{"polarity": -0.8, "label": "negative"}"#.to_string(),
            )
        } else {
            MockReply::Delayed(
                Duration::from_millis(5),
                r#"{"polarity": 0.1, "label": "positive"}"#.to_string(),
            )
        }
    }

    #[tokio::test]
    async fn test_results_are_aligned_with_inputs() {
        let service = batch_service(MockLlmProvider::new("mock").with_handler(review_handler), 2);

        let results = service
            .analyze_batch(&texts(&["good product", "terrible item", "ok"]), 2)
            .await
            .unwrap();

        assert_eq!(results.len(), 3);
        assert_eq!(results[0].polarity(), 0.7);
        assert_eq!(results[1].label(), SentimentLabel::Negative);
        assert_eq!(results[1].polarity(), -0.8);
        assert_eq!(results[2].polarity(), 0.1);
    }

    /// Tracks how many chat calls are running at once
    #[derive(Debug, Default)]
    struct CountingProvider {
        in_flight: AtomicUsize,
        peak: AtomicUsize,
        calls: AtomicUsize,
    }

    #[async_trait::async_trait]
    impl LlmProvider for CountingProvider {
        async fn chat(&self, model: &str, _request: LlmRequest) -> Result<LlmResponse, DomainError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.peak.fetch_max(now, Ordering::SeqCst);

            tokio::time::sleep(Duration::from_millis(20)).await;

            self.in_flight.fetch_sub(1, Ordering::SeqCst);
            Ok(LlmResponse::new(
                model,
                Message::assistant(r#"{"polarity": 0.5, "label": "positive"}"#),
            ))
        }

        async fn list_models(&self) -> Result<Vec<String>, DomainError> {
            Ok(Vec::new())
        }

        fn provider_name(&self) -> &'static str {
            "counting"
        }

        fn base_url(&self) -> &str {
            "http://counting"
        }
    }

    #[tokio::test]
    async fn test_in_flight_calls_never_exceed_limit() {
        let provider = Arc::new(CountingProvider::default());
        let cache = Arc::new(InMemoryResultCache::new(InMemoryCacheConfig::default()).unwrap());
        let service =
            SentimentService::new(provider.clone(), cache, SentimentServiceConfig::default())
                .unwrap();
        let batch = BatchService::new(Arc::new(service), 3).unwrap();

        let inputs: Vec<String> = (0..12).map(|i| format!("review number {}", i)).collect();
        let results = batch.analyze_batch(&inputs, 3).await.unwrap();

        assert_eq!(results.len(), 12);
        assert_eq!(provider.calls.load(Ordering::SeqCst), 12);
        assert_eq!(provider.peak.load(Ordering::SeqCst), 3);
        assert_eq!(provider.in_flight.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_zero_limit_is_rejected() {
        let service = batch_service(MockLlmProvider::new("mock"), 2);

        let result = service.analyze_batch(&texts(&["anything"]), 0).await;

        assert!(matches!(result, Err(DomainError::Validation { .. })));
    }

    #[tokio::test]
    async fn test_empty_batch() {
        let service = batch_service(MockLlmProvider::new("mock"), 2);

        let results = service.analyze_batch(&[], 2).await.unwrap();

        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn test_failing_items_fall_back_without_breaking_alignment() {
        let provider = MockLlmProvider::new("mock").with_handler(|request| {
            if request.messages[0].content.contains("Review: awful") {
                MockReply::Error("backend unavailable".to_string())
            } else {
                MockReply::Content(r#"{"polarity": 0.9, "label": "positive"}"#.to_string())
            }
        });
        let service = batch_service(provider, 2);

        let results = service
            .analyze_batch(&texts(&["great", "awful", "", "great"]), 2)
            .await
            .unwrap();

        assert_eq!(results.len(), 4);
        assert_eq!(results[0].polarity(), 0.9);
        assert_eq!(results[1].label(), SentimentLabel::Negative);
        assert!(results[1].polarity() < 0.0);
        assert_eq!(results[2], SentimentResult::neutral());
        assert_eq!(results[3], results[0]);
    }

    #[tokio::test]
    async fn test_default_limit() {
        let service = batch_service(
            MockLlmProvider::new("mock").with_response(r#"{"polarity": -0.1, "label": "negative"}"#),
            4,
        );

        assert_eq!(service.default_limit(), 4);

        let results = service
            .analyze_batch_default(&texts(&["meh", "not great"]))
            .await
            .unwrap();

        assert_eq!(results.len(), 2);
        assert!(results.iter().all(|r| r.label() == SentimentLabel::Negative));
    }

    #[test]
    fn test_zero_default_limit_is_rejected() {
        let cache = Arc::new(InMemoryResultCache::new(InMemoryCacheConfig::default()).unwrap());
        let service = SentimentService::new(
            Arc::new(MockLlmProvider::new("mock")),
            cache,
            SentimentServiceConfig::default(),
        )
        .unwrap();

        let result = BatchService::new(Arc::new(service), 0);
        assert!(result.is_err());
    }
}
