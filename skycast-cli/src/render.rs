//! Card-style terminal output: an error banner, a current-conditions card,
//! and up to three forecast cards.

use skycast_core::{CurrentConditions, DailyForecastEntry, QueryResult, QueryState};

/// Closed set of provider condition categories, mapped to display glyphs.
/// Anything outside the set falls back to [`ConditionKind::Unknown`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConditionKind {
    Clear,
    Clouds,
    Rain,
    Drizzle,
    Thunderstorm,
    Snow,
    /// Mist, fog, haze and the other obscuration categories.
    Atmosphere,
    Unknown,
}

impl ConditionKind {
    pub fn from_label(label: &str) -> Self {
        match label.to_lowercase().as_str() {
            "clear" => ConditionKind::Clear,
            "clouds" => ConditionKind::Clouds,
            "rain" => ConditionKind::Rain,
            "drizzle" => ConditionKind::Drizzle,
            "thunderstorm" => ConditionKind::Thunderstorm,
            "snow" => ConditionKind::Snow,
            "mist" | "fog" | "haze" | "smoke" | "dust" | "sand" | "ash" | "squall"
            | "tornado" => ConditionKind::Atmosphere,
            _ => ConditionKind::Unknown,
        }
    }

    pub fn glyph(self) -> &'static str {
        match self {
            ConditionKind::Clear => "☀️",
            ConditionKind::Clouds => "☁️",
            ConditionKind::Rain => "🌧️",
            ConditionKind::Drizzle => "🌦️",
            ConditionKind::Thunderstorm => "⛈️",
            ConditionKind::Snow => "❄️",
            ConditionKind::Atmosphere => "🌫️",
            ConditionKind::Unknown => "🌡️",
        }
    }
}

pub fn render_state(state: &QueryState) {
    if let Some(message) = &state.error {
        println!("! {message}");
        return;
    }

    if let Some(result) = &state.result {
        print!("{}", format_result(result));
    }
}

fn format_result(result: &QueryResult) -> String {
    let mut out = format_current(&result.city, &result.current);

    if !result.daily.is_empty() {
        out.push('\n');
        for entry in &result.daily {
            out.push_str(&format_entry(entry));
        }
    }

    out
}

fn format_current(city: &str, current: &CurrentConditions) -> String {
    let glyph = ConditionKind::from_label(&current.condition).glyph();
    format!(
        "{glyph}  {city}\n   {}°C (feels like {}°C), {}\n   humidity {}%  wind {} km/h  pressure {} hPa  visibility {} km\n",
        current.temperature_c,
        current.feels_like_c,
        current.condition,
        current.humidity_pct,
        current.wind_speed_kph,
        current.pressure_hpa,
        current.visibility_km,
    )
}

fn format_entry(entry: &DailyForecastEntry) -> String {
    let glyph = ConditionKind::from_label(&entry.condition).glyph();
    format!(
        "   {glyph}  {}  {}° / {}°  {}\n",
        entry.label, entry.high_c, entry.low_c, entry.condition,
    )
}
