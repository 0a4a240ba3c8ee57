use std::sync::Arc;
use tracing::info;

use crate::domain::commands::members::AddMemberCommand;
use crate::domain::errors::{TrackerError, TrackerResult, ValidationError};
use crate::domain::models::member::Member;
use crate::storage::{MemberStorage, RosterInsert};

/// Roster of members offered on the daily entry form.
///
/// Until a roster is stored, the configured seed members are used.
pub struct MemberService<M: MemberStorage> {
    storage: Arc<M>,
    seed_members: Vec<String>,
}

impl<M: MemberStorage> Clone for MemberService<M> {
    fn clone(&self) -> Self {
        Self {
            storage: self.storage.clone(),
            seed_members: self.seed_members.clone(),
        }
    }
}

impl<M: MemberStorage> MemberService<M> {
    pub fn new(storage: Arc<M>, seed_members: Vec<String>) -> Self {
        Self { storage, seed_members }
    }

    pub async fn list_members(&self) -> TrackerResult<Vec<Member>> {
        let stored = self
            .storage
            .list_members()
            .await
            .map_err(TrackerError::StoreUnavailable)?;

        Ok(stored.unwrap_or_else(|| self.seeds()))
    }

    fn seeds(&self) -> Vec<Member> {
        self.seed_members
            .iter()
            .map(|name| Member::new(name))
            .filter(|m| !m.name.is_empty())
            .collect()
    }

    /// Append a member and persist the roster, seeds included.
    pub async fn add_member(&self, command: AddMemberCommand) -> TrackerResult<Vec<Member>> {
        let member = Member::new(&command.name);
        if member.name.is_empty() {
            return Err(TrackerError::validation(ValidationError::BlankMemberName));
        }

        let outcome = self
            .storage
            .insert_member(&member, &self.seeds())
            .await
            .map_err(TrackerError::StoreUnavailable)?;

        match outcome {
            RosterInsert::Inserted(members) => {
                info!("Roster now has {} member(s)", members.len());
                Ok(members)
            }
            RosterInsert::AlreadyPresent => {
                Err(TrackerError::validation(ValidationError::DuplicateMember { name: member.name }))
            }
        }
    }
}
