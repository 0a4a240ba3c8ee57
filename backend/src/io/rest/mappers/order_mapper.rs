use chrono::SecondsFormat;
use shared::{Order as SharedOrder, PaymentStatus as SharedPaymentStatus};

use crate::domain::commands::orders::{RawCostEntry, SubmitDailyOrdersCommand};
use crate::domain::models::order::{Order as DomainOrder, PaymentStatus as DomainPaymentStatus};

/// Mapper between shared order DTOs and domain orders.
pub struct OrderMapper;

impl OrderMapper {
    pub fn to_dto(domain: DomainOrder) -> SharedOrder {
        SharedOrder {
            id: domain.id,
            member_id: domain.member_id,
            cost: domain.cost.normalize().to_string(),
            payment_status: Self::status_to_dto(domain.payment_status),
            timestamp: domain.timestamp.to_rfc3339_opts(SecondsFormat::Millis, false),
        }
    }

    pub fn status_to_dto(status: DomainPaymentStatus) -> SharedPaymentStatus {
        match status {
            DomainPaymentStatus::Pending => SharedPaymentStatus::Pending,
            DomainPaymentStatus::Paid => SharedPaymentStatus::Paid,
        }
    }

    pub fn to_submit_command(request: shared::SubmitDailyOrdersRequest) -> SubmitDailyOrdersCommand {
        SubmitDailyOrdersCommand {
            entries: request
                .entries
                .into_iter()
                .map(|entry| RawCostEntry {
                    member_id: entry.member_id,
                    cost: entry.cost,
                })
                .collect(),
        }
    }
}
