//! Domain model for a recorded tiffin order.
use chrono::{DateTime, FixedOffset, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentStatus {
    Pending,
    Paid,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "Pending",
            PaymentStatus::Paid => "Paid",
        }
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Pending" => Ok(PaymentStatus::Pending),
            "Paid" => Ok(PaymentStatus::Paid),
            other => Err(format!("Unknown payment status: {}", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: String,
    pub member_id: String,
    pub cost: Decimal,
    pub payment_status: PaymentStatus,
    /// Recorded with the local offset in force at creation; never mutated.
    pub timestamp: DateTime<FixedOffset>,
}

impl Order {
    /// Create a new pending order.
    pub fn new_pending(member_id: &str, cost: Decimal, timestamp: DateTime<FixedOffset>) -> Self {
        let now_millis = timestamp.timestamp_millis().max(0) as u64;
        Self {
            id: Self::generate_id(now_millis),
            member_id: member_id.to_string(),
            cost,
            payment_status: PaymentStatus::Pending,
            timestamp,
        }
    }

    /// Generate a unique order ID.
    /// Format: order-<timestamp_ms>-<random_suffix>
    /// Example: order-1729276800123-9f2c41ab
    pub fn generate_id(timestamp_ms: u64) -> String {
        let suffix: String = Uuid::new_v4().simple().to_string().chars().take(8).collect();
        format!("order-{}-{}", timestamp_ms, suffix)
    }

    /// Wall-clock reading used for week bucketing.
    pub fn local_time(&self) -> NaiveDateTime {
        self.timestamp.naive_local()
    }

    pub fn is_paid(&self) -> bool {
        self.payment_status == PaymentStatus::Paid
    }
}
