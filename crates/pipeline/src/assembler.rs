use crate::{plan, DailyAggregate, ForecastSource};
use futures::future::join_all;
use log::{debug, error, warn};
use std::sync::Arc;
use time::Date;
use tokio::sync::Semaphore;

pub const DEFAULT_MAX_IN_FLIGHT: usize = 8;

/// Fans forecast requests out over the planned window and merges the answers into one series.
///
/// The semaphore is shared by every `assemble` call made through this assembler, so the cap
/// applies to all requests in flight against the upstream api, not per call.
pub struct SeriesAssembler {
    source: Arc<dyn ForecastSource>,
    limiter: Arc<Semaphore>,
}

impl SeriesAssembler {
    pub fn new(source: Arc<dyn ForecastSource>, max_in_flight: usize) -> Self {
        Self {
            source,
            limiter: Arc::new(Semaphore::new(max_in_flight.max(1))),
        }
    }

    /// Ascending series for the `count` query dates before `anchor`.
    ///
    /// A date whose fetch fails contributes nothing; the call itself never fails.
    pub async fn assemble(&self, anchor: Date, count: usize) -> Vec<DailyAggregate> {
        let query_dates = plan(anchor, count);
        debug!("query dates for {}: {:?}", anchor, query_dates);

        let tasks: Vec<_> = query_dates
            .into_iter()
            .map(|query_date| {
                let source = Arc::clone(&self.source);
                let limiter = Arc::clone(&self.limiter);
                tokio::spawn(async move {
                    let _permit = match limiter.acquire_owned().await {
                        Ok(permit) => Some(permit),
                        Err(e) => {
                            warn!("fetching {} without an in-flight permit: {}", query_date, e);
                            None
                        }
                    };
                    (query_date, source.fetch(query_date).await)
                })
            })
            .collect();

        let mut fetched: Vec<(Date, DailyAggregate)> = vec![];
        for joined in join_all(tasks).await {
            match joined {
                Ok((query_date, Ok(daily))) => {
                    fetched.extend(daily.into_iter().map(|day| (query_date, day)));
                }
                Ok((query_date, Err(e))) => {
                    error!("error fetching forecast for {}, skipping: {}", query_date, e);
                }
                Err(e) => error!("forecast task did not complete, skipping: {}", e),
            }
        }

        merge(fetched)
    }
}

/// Sorts by forecast date and keeps one record per date.
///
/// Each record is tagged with the query date that produced it; on a clash the most
/// recent query wins, so the result does not depend on task completion order.
pub fn merge(mut fetched: Vec<(Date, DailyAggregate)>) -> Vec<DailyAggregate> {
    fetched.sort_by(|(query_a, day_a), (query_b, day_b)| {
        day_a.date.cmp(&day_b.date).then(query_b.cmp(query_a))
    });
    fetched.dedup_by_key(|(_, day)| day.date);
    fetched.into_iter().map(|(_, day)| day).collect()
}
