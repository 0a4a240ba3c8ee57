use shared::{MemberPaymentStatus, MemberWeekSummary, WeekWindowInfo, WeeklySummaryResponse};

use crate::domain::aggregator::{format_amount, MemberStatus, WeeklyAggregate};
use crate::domain::models::week_window::WeekWindow;

const WINDOW_BOUND_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3f";

/// Mapper from week windows and aggregates to shared DTOs.
pub struct WeekMapper;

impl WeekMapper {
    /// `offset` is relative to the current week, so 0 means no next week.
    pub fn to_window_dto(window: &WeekWindow, offset: i64) -> WeekWindowInfo {
        WeekWindowInfo {
            start: window.start().format(WINDOW_BOUND_FORMAT).to_string(),
            end: window.end().format(WINDOW_BOUND_FORMAT).to_string(),
            label: window.label(),
            offset,
            is_current_week: offset >= 0,
        }
    }

    pub fn status_to_dto(status: MemberStatus) -> MemberPaymentStatus {
        match status {
            MemberStatus::Paid => MemberPaymentStatus::Paid,
            MemberStatus::Unpaid => MemberPaymentStatus::Unpaid,
        }
    }

    pub fn to_summary_dto(aggregate: &WeeklyAggregate, offset: i64) -> WeeklySummaryResponse {
        let members = aggregate
            .per_member_total
            .iter()
            .map(|(member_id, total)| MemberWeekSummary {
                member_id: member_id.clone(),
                total: format_amount(*total),
                status: aggregate
                    .status_for(member_id)
                    .map(Self::status_to_dto)
                    .unwrap_or(MemberPaymentStatus::Unpaid),
            })
            .collect();

        WeeklySummaryResponse {
            week: Self::to_window_dto(&aggregate.window, offset),
            members,
            grand_total: format_amount(aggregate.grand_total()),
            max_total: format_amount(aggregate.max_total()),
        }
    }
}
