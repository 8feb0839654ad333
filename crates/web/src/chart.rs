use plotly::{
    common::{Mode, Title},
    layout::{Axis, Layout, Margin},
    Plot, Scatter,
};
use trend_pipeline::DailyAggregate;

pub const CHART_DIV_ID: &str = "trend-chart";

/// Inline plotly `<div>` for an ascending series; the page is expected to load plotly.js itself.
///
/// Days missing either reading are left out of both traces.
pub fn render_chart(series: &[DailyAggregate]) -> String {
    let complete: Vec<&DailyAggregate> = series.iter().filter(|day| day.is_complete()).collect();
    let dates: Vec<String> = complete.iter().map(|day| day.date.to_string()).collect();
    let temperatures: Vec<f64> = complete.iter().filter_map(|day| day.temperature).collect();
    let humidities: Vec<f64> = complete.iter().filter_map(|day| day.humidity).collect();

    let temperature_trace = Scatter::new(dates.clone(), temperatures)
        .mode(Mode::LinesMarkers)
        .name("Temperature");
    let humidity_trace = Scatter::new(dates, humidities)
        .mode(Mode::LinesMarkers)
        .name("Humidity");

    let layout = Layout::new()
        .title(Title::with_text(
            "Temperature and Humidity Trend (Last 30 Days)",
        ))
        .x_axis(Axis::new().title(Title::with_text("Date")))
        .y_axis(Axis::new().title(Title::with_text("Value")))
        .margin(Margin::new().left(40).right(40).top(40).bottom(40));

    let mut plot = Plot::new();
    plot.add_trace(temperature_trace);
    plot.add_trace(humidity_trace);
    plot.set_layout(layout);
    plot.to_inline_html(Some(CHART_DIV_ID))
}
