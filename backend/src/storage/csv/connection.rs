use anyhow::{anyhow, Result};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;

use super::member_repository::MemberRepository;
use super::order_repository::OrderRepository;
use crate::storage::traits::Connection;

pub(crate) const ORDERS_FILE: &str = "orders.csv";
pub(crate) const ORDERS_HEADER: &str = "id,member_id,cost,payment_status,timestamp\n";
const MEMBERS_FILE: &str = "members.yaml";
const DEFAULT_DIRECTORY_NAME: &str = "Tiffin Tracker";

/// CsvConnection manages the data directory and the files inside it
#[derive(Clone)]
pub struct CsvConnection {
    base_directory: Arc<PathBuf>,
    /// Serializes read-modify-write cycles on the orders file
    orders_write_lock: Arc<tokio::sync::Mutex<()>>,
    /// Serializes read-modify-write cycles on the roster file
    members_write_lock: Arc<tokio::sync::Mutex<()>>,
}

impl CsvConnection {
    /// Create a new CSV connection with a base directory
    pub fn new<P: AsRef<Path>>(base_directory: P) -> Result<Self> {
        let base_path = base_directory.as_ref().to_path_buf();

        if !base_path.exists() {
            fs::create_dir_all(&base_path)?;
            info!("Created data directory: {}", base_path.display());
        }

        Ok(Self {
            base_directory: Arc::new(base_path),
            orders_write_lock: Arc::new(tokio::sync::Mutex::new(())),
            members_write_lock: Arc::new(tokio::sync::Mutex::new(())),
        })
    }

    /// Default data directory: `<platform data dir>/Tiffin Tracker`
    pub fn default_directory() -> Result<PathBuf> {
        dirs::data_dir()
            .or_else(dirs::home_dir)
            .map(|dir| dir.join(DEFAULT_DIRECTORY_NAME))
            .ok_or_else(|| anyhow!("Could not determine a data directory"))
    }

    pub fn base_directory(&self) -> &Path {
        &self.base_directory
    }

    pub fn orders_file_path(&self) -> PathBuf {
        self.base_directory.join(ORDERS_FILE)
    }

    pub fn members_file_path(&self) -> PathBuf {
        self.base_directory.join(MEMBERS_FILE)
    }

    pub(crate) fn orders_write_lock(&self) -> Arc<tokio::sync::Mutex<()>> {
        self.orders_write_lock.clone()
    }

    pub(crate) fn members_write_lock(&self) -> Arc<tokio::sync::Mutex<()>> {
        self.members_write_lock.clone()
    }

    /// Ensure the orders file exists with its header row
    pub fn ensure_orders_file_exists(&self) -> Result<()> {
        if !self.base_directory.exists() {
            fs::create_dir_all(self.base_directory.as_ref())?;
        }

        let file_path = self.orders_file_path();
        if !file_path.exists() {
            fs::write(&file_path, ORDERS_HEADER)?;
            info!("Created orders file: {}", file_path.display());
        }

        Ok(())
    }
}

impl Connection for CsvConnection {
    type OrderRepository = OrderRepository;
    type MemberRepository = MemberRepository;

    fn create_order_repository(&self) -> Self::OrderRepository {
        OrderRepository::new(self.clone())
    }

    fn create_member_repository(&self) -> Self::MemberRepository {
        MemberRepository::new(self.clone())
    }
}
