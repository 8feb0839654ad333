use crate::{parse_forecast_body, DailyAggregate, Error};
use async_trait::async_trait;
use log::{debug, info};
use reqwest::Client;
use std::time::Duration;
use time::Date;

pub const DEFAULT_FORECAST_URL: &str =
    "https://api.data.gov.sg/v1/environment/4-day-weather-forecast";

#[async_trait]
pub trait ForecastSource: Sync + Send {
    /// Daily aggregates from the forecast issued for `date`, oldest day first.
    async fn fetch(&self, date: Date) -> Result<Vec<DailyAggregate>, Error>;
}

pub struct ForecastFetcher {
    client: Client,
    base_url: String,
}

impl ForecastFetcher {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, Error> {
        let client = Client::builder()
            .user_agent("forecast_trend/1.0")
            .timeout(timeout)
            .build()
            .map_err(Error::Client)?;
        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl ForecastSource for ForecastFetcher {
    async fn fetch(&self, date: Date) -> Result<Vec<DailyAggregate>, Error> {
        let date_key = date.to_string();
        debug!("requesting: {}?date={}", self.base_url, date_key);
        let response = self
            .client
            .get(&self.base_url)
            .query(&[("date", &date_key)])
            .send()
            .await
            .map_err(|source| Error::Request {
                url: self.base_url.clone(),
                source,
            })?;

        if !response.status().is_success() {
            return Err(Error::Status {
                url: self.base_url.clone(),
                status: response.status(),
            });
        }

        let body = response.text().await.map_err(|source| Error::Body {
            url: self.base_url.clone(),
            source,
        })?;
        let daily = parse_forecast_body(&body)?;
        info!("fetched {} forecast days for {}", daily.len(), date_key);
        Ok(daily)
    }
}
