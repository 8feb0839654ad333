use time::{Date, Duration};

/// Days covered by a single upstream forecast response.
pub const FORECAST_SPAN_DAYS: i64 = 4;

pub const DEFAULT_WINDOW_SIZE: usize = 8;

/// Query dates stepping back from `anchor` one forecast span at a time, most recent first.
///
/// The first date is `anchor - 4 days`, so `count` requests cover roughly `4 * count`
/// days of history without overlapping. The plan ends early at the start of the
/// calendar range supported by `time`.
pub fn plan(anchor: Date, count: usize) -> Vec<Date> {
    (1..=count)
        .map_while(|step| {
            let days = i64::try_from(step).ok()?.checked_mul(FORECAST_SPAN_DAYS)?;
            anchor.checked_sub(Duration::days(days))
        })
        .collect()
}
