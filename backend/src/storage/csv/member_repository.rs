use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fs;
use tracing::info;

use super::connection::CsvConnection;
use crate::domain::models::member::Member;
use crate::storage::traits::{MemberStorage, RosterInsert};

#[derive(Debug, Serialize, Deserialize)]
struct YamlRoster {
    members: Vec<String>,
}

/// Member roster stored as `members.yaml` in the data directory
#[derive(Clone)]
pub struct MemberRepository {
    connection: CsvConnection,
}

impl MemberRepository {
    pub fn new(connection: CsvConnection) -> Self {
        Self { connection }
    }

    fn read_roster(&self) -> Result<Option<Vec<Member>>> {
        let path = self.connection.members_file_path();
        if !path.exists() {
            return Ok(None);
        }

        let yaml_content = fs::read_to_string(&path)?;
        let roster: YamlRoster = serde_yaml::from_str(&yaml_content)?;

        Ok(Some(roster.members.iter().map(|name| Member::new(name)).collect()))
    }

    /// Caller must hold the members write lock.
    fn write_roster(&self, members: &[Member]) -> Result<()> {
        let path = self.connection.members_file_path();
        let roster = YamlRoster {
            members: members.iter().map(|m| m.name.clone()).collect(),
        };
        let yaml_content = serde_yaml::to_string(&roster)?;

        // Atomic write using temp file
        let temp_path = path.with_extension("tmp");
        fs::write(&temp_path, yaml_content)?;
        fs::rename(&temp_path, &path)?;

        info!("Saved roster with {} member(s)", members.len());
        Ok(())
    }
}

#[async_trait]
impl MemberStorage for MemberRepository {
    async fn list_members(&self) -> Result<Option<Vec<Member>>> {
        self.read_roster()
    }

    async fn store_members(&self, members: &[Member]) -> Result<()> {
        let lock = self.connection.members_write_lock();
        let _guard = lock.lock().await;

        self.write_roster(members)
    }

    async fn insert_member(&self, member: &Member, initial: &[Member]) -> Result<RosterInsert> {
        let lock = self.connection.members_write_lock();
        let _guard = lock.lock().await;

        let mut members = self.read_roster()?.unwrap_or_else(|| initial.to_vec());
        if members.iter().any(|m| m.name == member.name) {
            return Ok(RosterInsert::AlreadyPresent);
        }

        members.push(member.clone());
        self.write_roster(&members)?;
        Ok(RosterInsert::Inserted(members))
    }
}
