//! The query orchestrator: turns a submitted city name into state updates.

use tracing::{debug, warn};

use crate::{
    forecast,
    model::{QueryResult, QueryState},
    provider::WeatherProvider,
};

/// The one message shown for any failed query. The provider does not let us
/// distinguish an unknown city from its own failures, and transport or shape
/// problems are deliberately folded into the same surface; logs carry the
/// real cause.
pub const CITY_NOT_FOUND_MESSAGE: &str = "City not found. Check the spelling and try again.";

/// Owns the session's [`QueryState`] and drives the request lifecycle.
///
/// There is no retry, no timeout of its own, and no cancellation; a request
/// that is superseded by a newer submission still runs to completion, but its
/// outcome is discarded by the state's sequence guard.
#[derive(Debug)]
pub struct QueryOrchestrator {
    provider: Box<dyn WeatherProvider>,
    state: QueryState,
    next_seq: u64,
}

impl QueryOrchestrator {
    pub fn new(provider: Box<dyn WeatherProvider>) -> Self {
        Self {
            provider,
            state: QueryState::new(),
            next_seq: 0,
        }
    }

    pub fn state(&self) -> &QueryState {
        &self.state
    }

    /// Submit a city name. A trimmed-empty name is a no-op: no network call,
    /// no state change. Everything else is observable only through
    /// [`Self::state`].
    pub async fn submit(&mut self, city: &str) {
        let city = city.trim();
        if city.is_empty() {
            return;
        }

        self.state.set_query(city);
        self.next_seq += 1;
        let seq = self.next_seq;
        self.state.begin(seq);

        debug!(%city, seq, "dispatching weather query");

        match self.provider.fetch_forecast(city).await {
            Ok(payload) => match forecast::reduce(&payload.samples) {
                Some((current, daily)) => {
                    self.state.settle_ok(
                        seq,
                        QueryResult {
                            city: payload.city,
                            current,
                            daily,
                        },
                    );
                }
                None => {
                    warn!(%city, "provider returned an empty sample feed");
                    self.state.settle_err(seq, CITY_NOT_FOUND_MESSAGE);
                }
            },
            Err(err) => {
                warn!(%city, error = %err, "weather query failed");
                self.state.settle_err(seq, CITY_NOT_FOUND_MESSAGE);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{collections::VecDeque, sync::Mutex};

    use async_trait::async_trait;
    use chrono::{TimeZone, Utc};

    use super::*;
    use crate::{
        model::WeatherSample,
        provider::{ForecastPayload, ProviderError},
    };

    /// Replays a scripted sequence of responses; panics on an unscripted call.
    #[derive(Debug, Default)]
    struct ScriptedProvider {
        responses: Mutex<VecDeque<Result<ForecastPayload, ProviderError>>>,
    }

    impl ScriptedProvider {
        fn with(responses: Vec<Result<ForecastPayload, ProviderError>>) -> Box<Self> {
            Box::new(Self {
                responses: Mutex::new(responses.into()),
            })
        }
    }

    #[async_trait]
    impl WeatherProvider for ScriptedProvider {
        async fn fetch_forecast(&self, _city: &str) -> Result<ForecastPayload, ProviderError> {
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .expect("no network call was expected")
        }
    }

    fn payload(city: &str) -> ForecastPayload {
        ForecastPayload {
            city: city.to_string(),
            samples: vec![WeatherSample {
                timestamp: Utc.with_ymd_and_hms(2021, 6, 21, 9, 0, 0).unwrap(),
                temperature_c: 21.4,
                feels_like_c: 19.6,
                condition: "Clouds".to_string(),
                humidity_pct: 62,
                wind_speed_mps: 4.2,
                pressure_hpa: 1013,
                visibility_m: 8456,
                temp_max_c: 23.7,
                temp_min_c: 15.2,
            }],
        }
    }

    fn not_found() -> ProviderError {
        ProviderError::Status {
            status: reqwest::StatusCode::NOT_FOUND,
            body: r#"{"cod":"404","message":"city not found"}"#.to_string(),
        }
    }

    #[tokio::test]
    async fn empty_input_is_a_no_op() {
        let mut orch = QueryOrchestrator::new(ScriptedProvider::with(Vec::new()));

        orch.submit("").await;
        orch.submit("   \t ").await;

        let state = orch.state();
        assert!(state.query.is_empty());
        assert!(!state.in_flight);
        assert!(state.error.is_none());
        assert!(state.result.is_none());
    }

    #[tokio::test]
    async fn successful_query_stores_the_result() {
        let mut orch =
            QueryOrchestrator::new(ScriptedProvider::with(vec![Ok(payload("London"))]));

        orch.submit("  London ").await;

        let state = orch.state();
        assert_eq!(state.query, "London");
        assert!(!state.in_flight);
        assert!(state.error.is_none());

        let result = state.result.as_ref().unwrap();
        assert_eq!(result.city, "London");
        assert_eq!(result.current.temperature_c, 21);
        assert_eq!(result.current.wind_speed_kph, 15);
    }

    #[tokio::test]
    async fn provider_status_error_sets_the_generic_message() {
        let mut orch = QueryOrchestrator::new(ScriptedProvider::with(vec![Err(not_found())]));

        orch.submit("Atlantis").await;

        let state = orch.state();
        assert!(!state.in_flight);
        assert_eq!(state.error.as_deref(), Some(CITY_NOT_FOUND_MESSAGE));
        assert!(state.result.is_none());
    }

    #[tokio::test]
    async fn malformed_body_surfaces_as_the_same_message() {
        let mut orch = QueryOrchestrator::new(ScriptedProvider::with(vec![Err(
            ProviderError::Malformed("entry has no weather element".to_string()),
        )]));

        orch.submit("London").await;

        let state = orch.state();
        assert!(!state.in_flight);
        assert_eq!(state.error.as_deref(), Some(CITY_NOT_FOUND_MESSAGE));
    }

    #[tokio::test]
    async fn failure_replaces_a_previous_result() {
        let mut orch = QueryOrchestrator::new(ScriptedProvider::with(vec![
            Ok(payload("London")),
            Err(not_found()),
        ]));

        orch.submit("London").await;
        assert!(orch.state().result.is_some());

        orch.submit("Atlantis").await;
        let state = orch.state();
        assert!(state.result.is_none(), "no partial results after a failure");
        assert_eq!(state.error.as_deref(), Some(CITY_NOT_FOUND_MESSAGE));
    }

    #[tokio::test]
    async fn success_clears_a_previous_error() {
        let mut orch = QueryOrchestrator::new(ScriptedProvider::with(vec![
            Err(not_found()),
            Ok(payload("London")),
        ]));

        orch.submit("Atlantis").await;
        assert!(orch.state().error.is_some());

        orch.submit("London").await;
        let state = orch.state();
        assert!(state.error.is_none());
        assert!(state.result.is_some());
    }
}
