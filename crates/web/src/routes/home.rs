use crate::{render_chart, resolve_anchor, AppState};
use axum::{
    extract::{rejection::FormRejection, State},
    response::Html,
    Form,
};
use serde::Deserialize;
use std::sync::Arc;
use time::Date;
use trend_pipeline::{today, DailyAggregate};

const INDEX_TEMPLATE: &str = include_str!("../../ui/index.html");

#[derive(Clone, Debug, Default, Deserialize)]
pub struct TrendForm {
    pub start_date: Option<String>,
}

pub async fn index_handler(State(state): State<Arc<AppState>>) -> Html<String> {
    trend_page(&state, today()).await
}

/// A form that fails to decode is treated like an empty one.
pub async fn trend_handler(
    State(state): State<Arc<AppState>>,
    form: Result<Form<TrendForm>, FormRejection>,
) -> Html<String> {
    let start_date = form.ok().and_then(|Form(form)| form.start_date);
    let anchor = resolve_anchor(start_date.as_deref());
    trend_page(&state, anchor).await
}

async fn trend_page(state: &AppState, anchor: Date) -> Html<String> {
    let series = state.assembler.assemble(anchor, state.window_size).await;
    Html(render_page(anchor, &series))
}

pub fn render_page(anchor: Date, series: &[DailyAggregate]) -> String {
    INDEX_TEMPLATE
        .replace("{START_DATE}", &anchor.to_string())
        .replace("{CHART}", &render_chart(series))
        .replace("{ROWS}", &render_rows(series))
}

// newest first, unlike the chart
fn render_rows(series: &[DailyAggregate]) -> String {
    series
        .iter()
        .rev()
        .map(|day| {
            format!(
                "<tr><td>{}</td><td>{}</td><td>{}</td></tr>",
                day.date,
                display_reading(day.temperature),
                display_reading(day.humidity)
            )
        })
        .collect::<Vec<String>>()
        .join("\n")
}

fn display_reading(reading: Option<f64>) -> String {
    match reading {
        Some(value) => format!("{:.1}", value),
        None => String::from("-"),
    }
}
