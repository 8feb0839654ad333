use crate::{resolve_anchor, AppState};
use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use trend_pipeline::DailyAggregate;
use utoipa::{IntoParams, ToSchema};

#[derive(Clone, Debug, Default, Serialize, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SeriesRequest {
    /// Anchor date as YYYY-MM-DD, today when missing or invalid
    pub start_date: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct SeriesResponse {
    pub start_date: String,
    pub series: Vec<DailyAggregate>,
}

#[utoipa::path(
    get,
    path = "/series",
    params(
        SeriesRequest
    ),
    responses(
        (status = OK, description = "Daily mean temperature and humidity, oldest first", body = SeriesResponse)
    ))]
pub async fn series(
    State(state): State<Arc<AppState>>,
    Query(req): Query<SeriesRequest>,
) -> Json<SeriesResponse> {
    let anchor = resolve_anchor(req.start_date.as_deref());
    let series = state.assembler.assemble(anchor, state.window_size).await;
    Json(SeriesResponse {
        start_date: anchor.to_string(),
        series,
    })
}
