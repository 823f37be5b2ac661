//! Infrastructure services

mod batch_service;
mod sentiment_service;

pub use batch_service::BatchService;
pub use sentiment_service::{BackendStatus, SentimentService, SentimentServiceConfig};
