//! Daily entry and order lookup.
use rust_decimal::Decimal;
use std::str::FromStr;
use std::sync::Arc;
use tracing::{info, warn};

use crate::domain::clock::Clock;
use crate::domain::commands::orders::{RawCostEntry, SubmitDailyOrdersCommand};
use crate::domain::errors::{TrackerError, TrackerResult, ValidationError};
use crate::domain::models::order::Order;
use crate::domain::models::week_window::WeekWindow;
use crate::storage::OrderStorage;

pub struct OrderService<S: OrderStorage> {
    order_storage: Arc<S>,
    clock: Arc<dyn Clock>,
}

impl<S: OrderStorage> Clone for OrderService<S> {
    fn clone(&self) -> Self {
        Self {
            order_storage: self.order_storage.clone(),
            clock: self.clock.clone(),
        }
    }
}

impl<S: OrderStorage> OrderService<S> {
    pub fn new(order_storage: Arc<S>, clock: Arc<dyn Clock>) -> Self {
        Self { order_storage, clock }
    }

    /// Record one day's costs, one pending order per entry.
    ///
    /// Every entry is validated first. If any entry is rejected nothing is
    /// written and all rejections are returned together.
    pub async fn submit_daily_orders(&self, command: SubmitDailyOrdersCommand) -> TrackerResult<Vec<Order>> {
        if command.entries.is_empty() {
            return Err(TrackerError::validation(ValidationError::NoEntries));
        }

        let mut errors = Vec::new();
        let mut accepted = Vec::new();
        for entry in &command.entries {
            match validate_entry(entry) {
                Ok(valid) => accepted.push(valid),
                Err(e) => errors.push(e),
            }
        }

        if !errors.is_empty() {
            warn!("Rejected daily submission: {} invalid entr(y/ies)", errors.len());
            return Err(TrackerError::Validation(errors));
        }

        let timestamp = self.clock.now();
        let orders: Vec<Order> = accepted
            .into_iter()
            .map(|(member_id, cost)| Order::new_pending(&member_id, cost, timestamp))
            .collect();

        self.order_storage
            .append_all(&orders)
            .await
            .map_err(TrackerError::StoreUnavailable)?;

        info!("Recorded {} order(s) at {}", orders.len(), timestamp);
        Ok(orders)
    }

    /// A member's orders inside `window`, oldest first.
    pub async fn orders_for_member(&self, member_id: &str, window: &WeekWindow) -> TrackerResult<Vec<Order>> {
        let mut orders = self
            .order_storage
            .query_by_time_range(window.start(), window.end())
            .await
            .map_err(TrackerError::StoreUnavailable)?;

        orders.retain(|o| o.member_id == member_id && window.contains(o.local_time()));
        Ok(orders)
    }
}

/// Parse and check one raw entry.
pub fn validate_entry(entry: &RawCostEntry) -> Result<(String, Decimal), ValidationError> {
    let member_id = entry.member_id.trim();
    if member_id.is_empty() {
        return Err(ValidationError::BlankMemberId);
    }

    let raw = match entry.cost.as_deref().map(str::trim) {
        Some(raw) if !raw.is_empty() => raw,
        _ => {
            return Err(ValidationError::MissingCost {
                member_id: member_id.to_string(),
            })
        }
    };

    let cost = Decimal::from_str(raw).map_err(|_| ValidationError::InvalidCost {
        member_id: member_id.to_string(),
        raw: raw.to_string(),
    })?;

    if cost <= Decimal::ZERO {
        return Err(ValidationError::NonPositiveCost {
            member_id: member_id.to_string(),
        });
    }

    Ok((member_id.to_string(), cost))
}
