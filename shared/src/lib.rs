use serde::{Deserialize, Serialize};
use std::fmt;

/// Payment state of a single recorded order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentStatus {
    /// Recorded but not yet settled
    Pending,
    /// Settled by the member
    Paid,
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaymentStatus::Pending => write!(f, "Pending"),
            PaymentStatus::Paid => write!(f, "Paid"),
        }
    }
}

/// Payment state of a member across a whole week
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MemberPaymentStatus {
    /// Every order of the member in the week is paid
    Paid,
    /// At least one order of the member in the week is still pending
    Unpaid,
}

/// Order ID in format: "order-<epoch_millis>-<suffix>"
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: String,
    /// Member this order was recorded for
    pub member_id: String,
    /// Cost as an exact decimal string (no currency symbol)
    pub cost: String,
    pub payment_status: PaymentStatus,
    /// Human-readable timestamp with timezone (RFC 3339)
    pub timestamp: String,
}

/// One raw cost entry as typed by the user on the daily entry form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyEntry {
    pub member_id: String,
    /// Raw input; validated server side (may be empty or non-numeric)
    pub cost: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmitDailyOrdersRequest {
    pub entries: Vec<DailyEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmitDailyOrdersResponse {
    pub orders: Vec<Order>,
    pub success_message: String,
}

/// Query parameters selecting a week relative to the current one
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WeekQuery {
    /// 0 = current week, -1 = previous week, ...
    pub offset: Option<i64>,
}

/// A Sunday-to-Saturday window as presented to clients
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeekWindowInfo {
    /// Local start of the week (RFC 3339 without offset)
    pub start: String,
    /// Local end of the week, last millisecond of Saturday
    pub end: String,
    pub label: String,
    pub offset: i64,
    /// True when navigating forward is not allowed
    pub is_current_week: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemberWeekSummary {
    pub member_id: String,
    /// Total formatted with exactly two decimal places
    pub total: String,
    pub status: MemberPaymentStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklySummaryResponse {
    pub week: WeekWindowInfo,
    pub members: Vec<MemberWeekSummary>,
    pub grand_total: String,
    /// Largest member total, for scaling per-member bars ("0.00" when empty)
    pub max_total: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkPaidRequest {
    pub member_id: String,
    #[serde(default)]
    pub offset: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkPaidResponse {
    pub member_id: String,
    pub updated_count: usize,
    pub success_message: String,
}

/// Returned when only part of a mark-paid batch could be written
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartialReconciliationResponse {
    pub member_id: String,
    pub updated: usize,
    pub failed_order_ids: Vec<String>,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemberOrdersResponse {
    pub member_id: String,
    pub week: WeekWindowInfo,
    pub orders: Vec<Order>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportWeekResponse {
    pub csv_content: String,
    pub filename: String,
    pub member_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemberListResponse {
    pub members: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddMemberRequest {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddMemberResponse {
    pub members: Vec<String>,
    pub success_message: String,
}

/// Error body shared by all endpoints
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    /// Per-field or per-member messages, empty when not applicable
    #[serde(default)]
    pub details: Vec<String>,
    pub retryable: bool,
}
