use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One timestamped data point from the provider's forecast feed.
///
/// Fields are kept in the provider's source units; conversion and rounding
/// happen in [`crate::forecast`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherSample {
    pub timestamp: DateTime<Utc>,
    pub temperature_c: f64,
    pub feels_like_c: f64,
    /// Free-text category, e.g. "Rain" or "Clear".
    pub condition: String,
    pub humidity_pct: u8,
    pub wind_speed_mps: f64,
    pub pressure_hpa: u32,
    pub visibility_m: u32,
    pub temp_max_c: f64,
    pub temp_min_c: f64,
}

/// Snapshot derived from the most recent sample of a response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentConditions {
    pub temperature_c: i32,
    pub feels_like_c: i32,
    pub condition: String,
    pub humidity_pct: u8,
    pub wind_speed_kph: i32,
    pub pressure_hpa: u32,
    pub visibility_km: i32,
}

/// Summary for one calendar day of the forecast.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyForecastEntry {
    /// Short-weekday, short-month, day-number label, e.g. "Fri, Aug 28".
    pub label: String,
    pub high_c: i32,
    pub low_c: i32,
    pub condition: String,
}

/// Everything one successful query produces. Replaced wholesale on the next
/// query; no history is kept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryResult {
    /// City display name as resolved by the provider.
    pub city: String,
    pub current: CurrentConditions,
    pub daily: Vec<DailyForecastEntry>,
}

/// Interaction state owned by the orchestrator.
///
/// Mutation goes through [`QueryState::begin`] and the `settle_*` methods so
/// the lifecycle invariant holds: a new request clears the previous error
/// before attempting, and in-flight clears exactly when the governing request
/// settles. Each dispatch carries a sequence number; a completion whose
/// number is no longer the latest is ignored, so a superseded request can
/// never overwrite the state of a newer one.
#[derive(Debug, Clone, Default)]
pub struct QueryState {
    pub query: String,
    pub in_flight: bool,
    pub error: Option<String>,
    pub result: Option<QueryResult>,
    latest_seq: u64,
}

impl QueryState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_query(&mut self, text: impl Into<String>) {
        self.query = text.into();
    }

    /// Mark a request dispatched: in-flight on, previous error cleared, and
    /// `seq` becomes the latest dispatch.
    pub fn begin(&mut self, seq: u64) {
        self.in_flight = true;
        self.error = None;
        self.latest_seq = seq;
    }

    /// Store a successful result. Ignored if `seq` is not the latest dispatch.
    pub fn settle_ok(&mut self, seq: u64, result: QueryResult) {
        if seq != self.latest_seq {
            return;
        }
        self.result = Some(result);
        self.error = None;
        self.in_flight = false;
    }

    /// Store a failure. Clears any previous result: a failed query never
    /// leaves partial data behind. Ignored if `seq` is not the latest dispatch.
    pub fn settle_err(&mut self, seq: u64, message: impl Into<String>) {
        if seq != self.latest_seq {
            return;
        }
        self.error = Some(message.into());
        self.result = None;
        self.in_flight = false;
    }
}
