use crate::Error;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use time::Date;
use utoipa::ToSchema;

time::serde::format_description!(iso_date, Date, "[year]-[month]-[day]");

/// Top level body of the 4-day weather forecast api.
#[derive(Debug, Clone, Deserialize)]
pub struct ForecastEnvelope {
    pub items: Vec<ForecastItem>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ForecastItem {
    pub forecasts: Vec<RawForecastPayload>,
}

/// One forecast day, readings keyed by period (e.g. `low`/`high`).
/// A `null` reading counts as missing.
#[derive(Debug, Clone, Deserialize)]
pub struct RawForecastPayload {
    #[serde(with = "iso_date")]
    pub date: Date,
    pub temperature: BTreeMap<String, Option<f64>>,
    pub relative_humidity: BTreeMap<String, Option<f64>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct DailyAggregate {
    #[serde(with = "iso_date")]
    #[schema(value_type = String, format = Date)]
    pub date: Date,
    /// Mean temperature, absent when the payload had no readings
    pub temperature: Option<f64>,
    /// Mean relative humidity, absent when the payload had no readings
    pub humidity: Option<f64>,
}

impl DailyAggregate {
    pub fn is_complete(&self) -> bool {
        self.temperature.is_some() && self.humidity.is_some()
    }
}

impl From<&RawForecastPayload> for DailyAggregate {
    fn from(payload: &RawForecastPayload) -> Self {
        DailyAggregate {
            date: payload.date,
            temperature: mean(&payload.temperature),
            humidity: mean(&payload.relative_humidity),
        }
    }
}

/// Unweighted mean of the readings that are present, `None` instead of NaN for an empty map.
pub fn mean(readings: &BTreeMap<String, Option<f64>>) -> Option<f64> {
    let values: Vec<f64> = readings.values().filter_map(|value| *value).collect();
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Only the last item is the latest forecast; its days arrive newest first.
pub fn parse_forecast_body(body: &str) -> Result<Vec<DailyAggregate>, Error> {
    let envelope: ForecastEnvelope = serde_json::from_str(body)?;
    let latest = envelope.items.last().ok_or(Error::NoItems)?;
    if latest.forecasts.is_empty() {
        return Err(Error::NoForecasts);
    }
    Ok(latest
        .forecasts
        .iter()
        .rev()
        .map(DailyAggregate::from)
        .collect())
}
