//! Weekly aggregation of orders into per-member totals and payment status.
//!
//! The aggregate is a disposable projection: it is recomputed from the store
//! for every query and never cached across writes.

use rust_decimal::{Decimal, RoundingStrategy};
use std::collections::BTreeMap;

use crate::domain::models::order::Order;
use crate::domain::models::week_window::WeekWindow;

/// Payment state of one member across a whole window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberStatus {
    Paid,
    Unpaid,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WeeklyAggregate {
    pub window: WeekWindow,
    /// Exact sums; round only through [`format_amount`]
    pub per_member_total: BTreeMap<String, Decimal>,
    pub per_member_status: BTreeMap<String, MemberStatus>,
}

impl WeeklyAggregate {
    pub fn empty(window: WeekWindow) -> Self {
        Self {
            window,
            per_member_total: BTreeMap::new(),
            per_member_status: BTreeMap::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.per_member_total.is_empty()
    }

    /// Members with at least one order in the window, sorted by id
    pub fn members(&self) -> impl Iterator<Item = &str> {
        self.per_member_total.keys().map(String::as_str)
    }

    pub fn total_for(&self, member_id: &str) -> Option<Decimal> {
        self.per_member_total.get(member_id).copied()
    }

    pub fn status_for(&self, member_id: &str) -> Option<MemberStatus> {
        self.per_member_status.get(member_id).copied()
    }

    pub fn grand_total(&self) -> Decimal {
        self.per_member_total.values().copied().sum()
    }

    /// Largest member total, zero when empty. Used to scale progress bars.
    pub fn max_total(&self) -> Decimal {
        self.per_member_total
            .values()
            .copied()
            .max()
            .unwrap_or(Decimal::ZERO)
    }
}

/// Fold `orders` into a [`WeeklyAggregate`] for `window`.
///
/// Orders outside the window are ignored. A member is `Paid` only when every
/// one of their in-window orders is paid.
pub fn aggregate(orders: &[Order], window: WeekWindow) -> WeeklyAggregate {
    let mut result = WeeklyAggregate::empty(window);

    for order in orders.iter().filter(|o| window.contains(o.local_time())) {
        *result
            .per_member_total
            .entry(order.member_id.clone())
            .or_insert(Decimal::ZERO) += order.cost;

        let status = result
            .per_member_status
            .entry(order.member_id.clone())
            .or_insert(MemberStatus::Paid);
        if !order.is_paid() {
            *status = MemberStatus::Unpaid;
        }
    }

    result
}

/// Two-decimal presentation of an amount, without currency symbol.
pub fn format_amount(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    format!("{:.2}", rounded)
}
