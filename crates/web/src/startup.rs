use crate::{index_handler, routes, series, trend_handler, Cli};
use anyhow::anyhow;
use axum::{
    body::Body,
    extract::Request,
    http::Method,
    middleware::{self, Next},
    response::IntoResponse,
    routing::get,
    Router,
};
use log::info;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use trend_pipeline::{ForecastFetcher, SeriesAssembler};
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable};

#[derive(Clone)]
pub struct AppState {
    pub assembler: Arc<SeriesAssembler>,
    pub window_size: usize,
}

#[derive(OpenApi)]
#[openapi(
    paths(routes::series::series),
    components(schemas(routes::series::SeriesResponse, trend_pipeline::DailyAggregate)),
    tags(
        (name = "weather trend api", description = "daily mean temperature and humidity assembled from the 4-day weather forecast")
    )
)]
struct ApiDoc;

pub fn build_app_state(cli: &Cli) -> Result<AppState, anyhow::Error> {
    let fetcher = ForecastFetcher::new(cli.forecast_url(), cli.timeout())
        .map_err(|e| anyhow!("error setting up forecast fetcher: {}", e))?;
    info!("fetching forecasts from {}", fetcher.base_url());
    let assembler = Arc::new(SeriesAssembler::new(
        Arc::new(fetcher),
        cli.max_in_flight(),
    ));

    Ok(AppState {
        assembler,
        window_size: cli.window_size(),
    })
}

pub fn app(app_state: AppState) -> Router {
    let api_docs = ApiDoc::openapi();
    let cors = CorsLayer::new()
        // allow `GET` and `POST` when accessing the resource
        .allow_methods([Method::GET, Method::POST])
        // allow requests from any origin
        .allow_origin(Any);
    Router::new()
        .route("/", get(index_handler).post(trend_handler))
        .route("/series", get(series))
        .layer(middleware::from_fn(log_request))
        .with_state(Arc::new(app_state))
        .merge(Scalar::with_url("/docs", api_docs))
        .layer(cors)
}

async fn log_request(request: Request<Body>, next: Next) -> impl IntoResponse {
    let now = time::OffsetDateTime::now_utc();
    let path = request
        .uri()
        .path_and_query()
        .map(|p| p.as_str())
        .unwrap_or_default()
        .to_owned();
    info!(target: "http_request","new request, {} {}", request.method().as_str(), path);

    let response = next.run(request).await;
    let response_time = time::OffsetDateTime::now_utc() - now;
    info!(target: "http_response", "response, code: {}, time: {}", response.status().as_str(), response_time);

    response
}
