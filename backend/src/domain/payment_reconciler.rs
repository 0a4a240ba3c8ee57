//! Marking a member's orders as paid for one week.
use std::sync::Arc;
use tracing::{info, warn};

use crate::domain::errors::{TrackerError, TrackerResult, ValidationError};
use crate::domain::models::order::PaymentStatus;
use crate::domain::models::week_window::WeekWindow;
use crate::storage::OrderStorage;

pub struct PaymentReconciler<S: OrderStorage> {
    order_storage: Arc<S>,
}

impl<S: OrderStorage> Clone for PaymentReconciler<S> {
    fn clone(&self) -> Self {
        Self {
            order_storage: self.order_storage.clone(),
        }
    }
}

impl<S: OrderStorage> PaymentReconciler<S> {
    pub fn new(order_storage: Arc<S>) -> Self {
        Self { order_storage }
    }

    /// Set every pending order of `member_id` inside `window` to paid.
    ///
    /// Returns how many orders changed. Calling it again with no new orders
    /// returns 0. Orders of other members or other weeks are never touched.
    /// When the store rejects part of the batch the error carries the IDs
    /// left pending; retrying the same call only picks those up.
    pub async fn mark_paid(&self, member_id: &str, window: &WeekWindow) -> TrackerResult<usize> {
        if member_id.trim().is_empty() {
            return Err(TrackerError::validation(ValidationError::BlankMemberId));
        }

        let pending = self
            .order_storage
            .query_by_member_and_time_range_and_status(
                member_id,
                window.start(),
                window.end(),
                PaymentStatus::Pending,
            )
            .await
            .map_err(TrackerError::StoreUnavailable)?;

        // The selection must stay inside member, window and status
        let order_ids: Vec<String> = pending
            .into_iter()
            .filter(|o| o.member_id == member_id && !o.is_paid() && window.contains(o.local_time()))
            .map(|o| o.id)
            .collect();

        if order_ids.is_empty() {
            info!("No pending orders for {} in week {}", member_id, window);
            return Ok(0);
        }

        let outcome = self
            .order_storage
            .update_payment_statuses(&order_ids, PaymentStatus::Paid)
            .await
            .map_err(TrackerError::StoreUnavailable)?;

        if !outcome.is_complete() {
            warn!(
                "Marked {} of {} orders paid for {} in week {}; failed: {:?}",
                outcome.updated.len(),
                order_ids.len(),
                member_id,
                window,
                outcome.failed
            );
            return Err(TrackerError::PartialReconciliation {
                member_id: member_id.to_string(),
                updated: outcome.updated.len(),
                failed_order_ids: outcome.failed,
            });
        }

        info!(
            "Marked {} order(s) paid for {} in week {}",
            outcome.updated.len(),
            member_id,
            window
        );
        Ok(outcome.updated.len())
    }
}
