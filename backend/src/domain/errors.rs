//! Error taxonomy for the tiffin tracker domain.
use thiserror::Error;

/// A single rejected input, reported before anything is written.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please enter a cost for {member_id}")]
    MissingCost { member_id: String },
    #[error("Cost '{raw}' for {member_id} is not a number")]
    InvalidCost { member_id: String, raw: String },
    #[error("Please enter a valid positive cost for {member_id}")]
    NonPositiveCost { member_id: String },
    #[error("Every entry needs a member")]
    BlankMemberId,
    #[error("Member name cannot be empty")]
    BlankMemberName,
    #[error("Member {name} already exists")]
    DuplicateMember { name: String },
    #[error("No entries were submitted")]
    NoEntries,
}

#[derive(Debug, Error)]
pub enum TrackerError {
    #[error("{}", summarize(.0))]
    Validation(Vec<ValidationError>),

    #[error("Order store unavailable: {0}")]
    StoreUnavailable(#[source] anyhow::Error),

    #[error("Marked {updated} order(s) paid for {member_id}, {} could not be updated", .failed_order_ids.len())]
    PartialReconciliation {
        member_id: String,
        updated: usize,
        failed_order_ids: Vec<String>,
    },

    #[error("Cannot navigate {offset} week(s) past the current week")]
    FutureWeek { offset: i64 },
}

impl TrackerError {
    /// Store failures are safe to retry; so are partial reconciliations,
    /// since marking paid is idempotent and scoped.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            TrackerError::StoreUnavailable(_) | TrackerError::PartialReconciliation { .. }
        )
    }

    pub fn validation(error: ValidationError) -> Self {
        TrackerError::Validation(vec![error])
    }
}

fn summarize(errors: &[ValidationError]) -> String {
    match errors {
        [] => "Validation failed".to_string(),
        [single] => single.to_string(),
        [first, rest @ ..] => format!("{} (and {} more)", first, rest.len()),
    }
}

/// Failure to deliver a reminder. Logged by the scheduler, never fatal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NotificationError {
    #[error("Notification permission denied")]
    PermissionDenied,
    #[error("Notification channel unavailable: {0}")]
    ChannelUnavailable(String),
}

pub type TrackerResult<T> = Result<T, TrackerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_message_names_member() {
        let error = TrackerError::validation(ValidationError::NonPositiveCost {
            member_id: "Pranav".to_string(),
        });
        assert_eq!(error.to_string(), "Please enter a valid positive cost for Pranav");
        assert!(!error.is_retryable());
    }

    #[test]
    fn test_validation_message_counts_remaining_errors() {
        let error = TrackerError::Validation(vec![
            ValidationError::MissingCost { member_id: "Vivek".to_string() },
            ValidationError::BlankMemberId,
            ValidationError::NoEntries,
        ]);
        assert_eq!(error.to_string(), "Please enter a cost for Vivek (and 2 more)");
    }

    #[test]
    fn test_store_and_partial_failures_are_retryable() {
        assert!(TrackerError::StoreUnavailable(anyhow::anyhow!("disk gone")).is_retryable());
        let partial = TrackerError::PartialReconciliation {
            member_id: "Dhiraj".to_string(),
            updated: 2,
            failed_order_ids: vec!["order-1-a".to_string()],
        };
        assert!(partial.is_retryable());
        assert_eq!(
            partial.to_string(),
            "Marked 2 order(s) paid for Dhiraj, 1 could not be updated"
        );
        assert!(!TrackerError::FutureWeek { offset: 1 }.is_retryable());
    }
}
