//! Core library for the `skycast` CLI.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The OpenWeather forecast client behind a provider trait
//! - The forecast reducer (current snapshot + daily summaries)
//! - The query orchestrator and its state container
//!
//! It is used by `skycast-cli`, but can also be reused by other binaries or services.

pub mod config;
pub mod forecast;
pub mod model;
pub mod provider;
pub mod query;

pub use config::Config;
pub use model::{CurrentConditions, DailyForecastEntry, QueryResult, QueryState, WeatherSample};
pub use provider::{ForecastPayload, ProviderError, WeatherProvider, openweather::OpenWeatherProvider};
pub use query::{CITY_NOT_FOUND_MESSAGE, QueryOrchestrator};
