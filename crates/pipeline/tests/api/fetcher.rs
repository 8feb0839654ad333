use crate::helpers::{forecast_body, spawn_stalled_upstream, spawn_upstream};
use axum::http::StatusCode;
use std::{collections::HashMap, time::Duration};
use time::{macros::date, Date};
use trend_pipeline::{Error, ForecastFetcher, ForecastSource};

fn fetcher(url: String) -> ForecastFetcher {
    ForecastFetcher::new(url, Duration::from_secs(5)).unwrap()
}

#[tokio::test]
async fn fetches_latest_forecast_oldest_day_first() {
    let query_date = date!(2024 - 01 - 25);
    let url = spawn_upstream(HashMap::from([(
        query_date.to_string(),
        (StatusCode::OK, forecast_body(query_date)),
    )]))
    .await;

    let daily = fetcher(url).fetch(query_date).await.unwrap();

    let dates: Vec<Date> = daily.iter().map(|d| d.date).collect();
    assert_eq!(
        dates,
        vec![
            date!(2024 - 01 - 22),
            date!(2024 - 01 - 23),
            date!(2024 - 01 - 24),
            date!(2024 - 01 - 25)
        ]
    );
    // 2024-01-25: low 23, high 31 / low 60, high 90
    assert_eq!(daily[3].temperature, Some(27.0));
    assert_eq!(daily[3].humidity, Some(75.0));
    // 2024-01-22: low 26, high 34 / low 63, high 93
    assert_eq!(daily[0].temperature, Some(30.0));
    assert_eq!(daily[0].humidity, Some(78.0));
}

#[tokio::test]
async fn error_status_is_a_fetch_error() {
    let query_date = date!(2024 - 01 - 25);
    let url = spawn_upstream(HashMap::from([(
        query_date.to_string(),
        (StatusCode::INTERNAL_SERVER_ERROR, forecast_body(query_date)),
    )]))
    .await;

    let result = fetcher(url).fetch(query_date).await;

    assert!(matches!(
        result,
        Err(Error::Status { status, .. }) if status == StatusCode::INTERNAL_SERVER_ERROR
    ));
}

#[tokio::test]
async fn malformed_body_is_a_fetch_error() {
    let query_date = date!(2024 - 01 - 25);
    let url = spawn_upstream(HashMap::from([(
        query_date.to_string(),
        (StatusCode::OK, String::from(r#"{"items": [{"forecasts": "#)),
    )]))
    .await;

    let result = fetcher(url).fetch(query_date).await;

    assert!(matches!(result, Err(Error::Payload(_))));
}

#[tokio::test]
async fn unreachable_upstream_is_a_fetch_error() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let address = listener.local_addr().unwrap();
    drop(listener);

    let result = fetcher(format!("http://{}/forecast", address))
        .fetch(date!(2024 - 01 - 25))
        .await;

    assert!(matches!(result, Err(Error::Request { .. })));
}

#[tokio::test]
async fn client_timeout_is_a_fetch_error() {
    let url = spawn_stalled_upstream(Duration::from_secs(5)).await;
    let fetcher = ForecastFetcher::new(url, Duration::from_millis(100)).unwrap();

    let result = fetcher.fetch(date!(2024 - 01 - 25)).await;

    assert!(matches!(result, Err(Error::Request { source, .. }) if source.is_timeout()));
}

#[tokio::test]
async fn payload_without_humidity_is_a_fetch_error() {
    let query_date = date!(2024 - 01 - 25);
    let body = r#"{"items": [{"forecasts": [
        {"date": "2024-01-25", "temperature": {"low": 24, "high": 32}}
    ]}]}"#;
    let url = spawn_upstream(HashMap::from([(
        query_date.to_string(),
        (StatusCode::OK, String::from(body)),
    )]))
    .await;

    let result = fetcher(url).fetch(query_date).await;

    assert!(matches!(result, Err(Error::Payload(_))));
}
