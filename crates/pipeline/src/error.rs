use reqwest::StatusCode;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Failed to build http client: {0}")]
    Client(#[source] reqwest::Error),
    #[error("Failed to send request to {url}: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("Request to {url} returned status {status}")]
    Status { url: String, status: StatusCode },
    #[error("Failed to read body of response from {url}: {source}")]
    Body {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("Failed to parse forecast payload: {0}")]
    Payload(#[from] serde_json::Error),
    #[error("Forecast response has no items")]
    NoItems,
    #[error("Latest forecast item has no forecasts")]
    NoForecasts,
}
