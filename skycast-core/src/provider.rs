use std::fmt::Debug;

use async_trait::async_trait;
use thiserror::Error;

use crate::model::WeatherSample;

pub mod openweather;

/// What can go wrong between dispatching a request and holding a usable
/// sample feed. The distinction is for logs; the user-facing surface shows
/// one generic message for all of them.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Non-success HTTP status. Covers "unknown city" and provider-side
    /// failures alike; the provider does not let us tell them apart.
    #[error("provider returned HTTP {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    /// Connection-level failure: DNS, refused connection, aborted transfer.
    #[error("failed to reach the weather provider: {0}")]
    Transport(String),

    /// Response body that does not match the expected shape.
    #[error("unexpected provider response shape: {0}")]
    Malformed(String),
}

/// A provider's answer to one forecast query, before reduction.
#[derive(Debug, Clone)]
pub struct ForecastPayload {
    /// City display name as resolved by the provider.
    pub city: String,
    /// Chronologically ordered sample feed; never empty.
    pub samples: Vec<WeatherSample>,
}

#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn fetch_forecast(&self, city: &str) -> Result<ForecastPayload, ProviderError>;
}
