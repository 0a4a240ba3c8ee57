//! # Storage Traits
//!
//! This module defines the storage abstraction traits that allow different
//! storage backends to be used interchangeably in the domain layer.

use anyhow::Result;
use async_trait::async_trait;
use chrono::NaiveDateTime;

use crate::domain::models::member::Member;
use crate::domain::models::order::{Order, PaymentStatus};

/// Outcome of a multi-record status update
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchUpdate {
    /// Orders whose status now equals the requested status
    pub updated: Vec<String>,
    /// Orders that could not be updated
    pub failed: Vec<String>,
}

impl BatchUpdate {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Trait defining the interface for order storage operations
///
/// Orders are append-only: after creation only `payment_status` changes.
/// Time ranges are local wall-clock instants and inclusive on both ends.
#[async_trait]
pub trait OrderStorage: Send + Sync {
    /// Append all orders as one write; either every order is stored or none is
    async fn append_all(&self, orders: &[Order]) -> Result<()>;

    /// Append a single order
    async fn append(&self, order: &Order) -> Result<()> {
        self.append_all(std::slice::from_ref(order)).await
    }

    /// List orders recorded between `start` and `end`, oldest first
    async fn query_by_time_range(&self, start: NaiveDateTime, end: NaiveDateTime) -> Result<Vec<Order>>;

    /// List one member's orders in a time range with the given status, oldest first
    async fn query_by_member_and_time_range_and_status(
        &self,
        member_id: &str,
        start: NaiveDateTime,
        end: NaiveDateTime,
        status: PaymentStatus,
    ) -> Result<Vec<Order>> {
        let mut orders = self.query_by_time_range(start, end).await?;
        orders.retain(|o| o.member_id == member_id && o.payment_status == status);
        Ok(orders)
    }

    /// Set the payment status of one order. Unknown IDs are an error.
    async fn update_payment_status(&self, order_id: &str, status: PaymentStatus) -> Result<()>;

    /// Set the payment status of many orders
    ///
    /// The default issues one update per order and records which ones failed.
    /// Backends that can rewrite several records at once should override it.
    async fn update_payment_statuses(&self, order_ids: &[String], status: PaymentStatus) -> Result<BatchUpdate> {
        let mut outcome = BatchUpdate::default();
        for order_id in order_ids {
            match self.update_payment_status(order_id, status).await {
                Ok(()) => outcome.updated.push(order_id.clone()),
                Err(e) => {
                    tracing::warn!("Failed to update order {} to {}: {}", order_id, status, e);
                    outcome.failed.push(order_id.clone());
                }
            }
        }
        Ok(outcome)
    }
}

/// Result of adding one member to the roster
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RosterInsert {
    /// The member was appended; holds the roster as stored
    Inserted(Vec<Member>),
    /// A member with the same name is already on the roster
    AlreadyPresent,
}

/// Trait defining the interface for the member roster
#[async_trait]
pub trait MemberStorage: Send + Sync {
    /// The persisted roster, or `None` when no roster has been saved yet
    async fn list_members(&self) -> Result<Option<Vec<Member>>>;

    /// Replace the persisted roster
    async fn store_members(&self, members: &[Member]) -> Result<()>;

    /// Append `member` unless its name is taken, as one atomic step.
    ///
    /// `initial` is the roster to start from when none has been stored yet.
    async fn insert_member(&self, member: &Member, initial: &[Member]) -> Result<RosterInsert>;
}

/// Trait defining the interface for storage connections
///
/// This trait abstracts away the specific connection type and provides
/// factory methods for creating repositories.
pub trait Connection: Send + Sync + Clone {
    type OrderRepository: OrderStorage;
    type MemberRepository: MemberStorage;

    fn create_order_repository(&self) -> Self::OrderRepository;

    fn create_member_repository(&self) -> Self::MemberRepository;
}
