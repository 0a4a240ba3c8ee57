//! # Storage Module
//!
//! Handles all data persistence for the tiffin tracker.
//!
//! The domain layer only sees the [`OrderStorage`] and [`MemberStorage`]
//! traits; the CSV implementation keeps orders in `orders.csv` and the
//! roster in `members.yaml` under one data directory.

pub mod csv;
pub mod traits;

#[cfg(test)]
pub mod test_doubles;

pub use traits::*;
