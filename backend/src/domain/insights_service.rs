//! Weekly insights: which window is being looked at and what it adds up to.
use chrono::NaiveDateTime;
use std::sync::Arc;
use tracing::{debug, info};

use crate::domain::aggregator::{aggregate, WeeklyAggregate};
use crate::domain::clock::Clock;
use crate::domain::errors::{TrackerError, TrackerResult};
use crate::domain::models::week_window::{window_containing, WeekWindow};
use crate::storage::OrderStorage;

/// Window `offset` weeks from the one containing `now`.
///
/// Only the current week and earlier weeks can be browsed.
pub fn week_for_offset(now: NaiveDateTime, offset: i64) -> TrackerResult<WeekWindow> {
    if offset > 0 {
        return Err(TrackerError::FutureWeek { offset });
    }
    Ok(window_containing(now).shift(offset))
}

pub struct WeeklyInsightsService<S: OrderStorage> {
    order_storage: Arc<S>,
    clock: Arc<dyn Clock>,
}

impl<S: OrderStorage> Clone for WeeklyInsightsService<S> {
    fn clone(&self) -> Self {
        Self {
            order_storage: self.order_storage.clone(),
            clock: self.clock.clone(),
        }
    }
}

impl<S: OrderStorage> WeeklyInsightsService<S> {
    pub fn new(order_storage: Arc<S>, clock: Arc<dyn Clock>) -> Self {
        Self { order_storage, clock }
    }

    pub fn current_week(&self) -> WeekWindow {
        window_containing(self.clock.local_now())
    }

    pub fn week_for_offset(&self, offset: i64) -> TrackerResult<WeekWindow> {
        week_for_offset(self.clock.local_now(), offset)
    }

    /// Recompute the aggregate for `window` from the store.
    pub async fn weekly_aggregate(&self, window: &WeekWindow) -> TrackerResult<WeeklyAggregate> {
        debug!("Aggregating orders for week {}", window);
        let orders = self
            .order_storage
            .query_by_time_range(window.start(), window.end())
            .await
            .map_err(TrackerError::StoreUnavailable)?;

        let result = aggregate(&orders, *window);
        info!(
            "Week {}: {} order(s) across {} member(s)",
            window,
            orders.len(),
            result.per_member_total.len()
        );
        Ok(result)
    }
}
