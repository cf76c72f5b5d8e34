//! The forecast reducer: a pure transformation from the provider's ordered
//! sample feed into the current-conditions snapshot and the daily summaries.

use chrono::{Local, NaiveDate, TimeZone, Timelike};

use crate::model::{CurrentConditions, DailyForecastEntry, WeatherSample};

/// The daily list never grows past this many entries.
pub const MAX_DAILY_ENTRIES: usize = 3;

/// Local hour whose sample represents its calendar day. The provider feed
/// steps in 3-hour increments, so a date whose samples never land exactly on
/// this hour contributes no entry and is skipped.
const REPRESENTATIVE_HOUR: u32 = 12;

/// Reduce in the viewer's local time zone.
pub fn reduce(
    samples: &[WeatherSample],
) -> Option<(CurrentConditions, Vec<DailyForecastEntry>)> {
    reduce_in(samples, &Local)
}

/// Reduce a chronologically ordered sample feed.
///
/// Current conditions come from the first sample alone (the provider's
/// convention: the nearest upcoming sample leads the list). The daily list is
/// built by a single scan: a sample is selected as its date's representative
/// iff its hour in `tz` equals noon and the date has no representative yet,
/// stopping once [`MAX_DAILY_ENTRIES`] are collected.
///
/// Returns `None` only for an empty feed. Pure: same input, same output.
pub fn reduce_in<Tz: TimeZone>(
    samples: &[WeatherSample],
    tz: &Tz,
) -> Option<(CurrentConditions, Vec<DailyForecastEntry>)>
where
    Tz::Offset: std::fmt::Display,
{
    let current = current_conditions(samples.first()?);

    let mut daily = Vec::with_capacity(MAX_DAILY_ENTRIES);
    let mut seen: Vec<NaiveDate> = Vec::with_capacity(MAX_DAILY_ENTRIES);

    for sample in samples {
        if daily.len() == MAX_DAILY_ENTRIES {
            break;
        }

        let local = sample.timestamp.with_timezone(tz);
        if local.hour() != REPRESENTATIVE_HOUR {
            continue;
        }

        let date = local.date_naive();
        if seen.contains(&date) {
            continue;
        }
        seen.push(date);

        daily.push(DailyForecastEntry {
            label: local.format("%a, %b %-d").to_string(),
            high_c: round(sample.temp_max_c),
            low_c: round(sample.temp_min_c),
            condition: sample.condition.clone(),
        });
    }

    Some((current, daily))
}

fn current_conditions(sample: &WeatherSample) -> CurrentConditions {
    CurrentConditions {
        temperature_c: round(sample.temperature_c),
        feels_like_c: round(sample.feels_like_c),
        condition: sample.condition.clone(),
        humidity_pct: sample.humidity_pct,
        // Provider reports wind in m/s; the snapshot shows km/h.
        wind_speed_kph: round(sample.wind_speed_mps * 3.6),
        pressure_hpa: sample.pressure_hpa,
        visibility_km: round(f64::from(sample.visibility_m) / 1000.0),
    }
}

fn round(value: f64) -> i32 {
    value.round() as i32
}
