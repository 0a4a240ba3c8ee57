//! # Domain Module
//!
//! Business logic for the tiffin tracker: recording daily orders, bucketing
//! them into Sunday-to-Saturday weeks, reconciling payments and reminding the
//! group to enter the day's orders.
//!
//! ## Module Organization
//!
//! - **models**: `Order`, `Member` and `WeekWindow`
//! - **aggregator**: pure weekly totals and payment status per member
//! - **payment_reconciler**: marks a member's pending orders in a week as paid
//! - **order_service**: validated daily entry and per-member order lookup
//! - **member_service**: the roster offered on the entry form
//! - **insights_service**: week selection and aggregation against the store
//! - **export_service**: CSV rendering of a week
//! - **week_navigator**: last-request-wins browsing state
//! - **reminder**: daily reminder state machine
//!
//! Services receive their stores through constructors; nothing here reaches
//! for global state.

pub mod aggregator;
pub mod clock;
pub mod commands;
pub mod errors;
pub mod export_service;
pub mod insights_service;
pub mod member_service;
pub mod models;
pub mod order_service;
pub mod payment_reconciler;
pub mod reminder;
pub mod week_navigator;

pub use aggregator::*;
pub use clock::*;
pub use errors::*;
pub use export_service::*;
pub use insights_service::*;
pub use member_service::*;
pub use order_service::*;
pub use payment_reconciler::*;
pub use reminder::*;
pub use week_navigator::*;
