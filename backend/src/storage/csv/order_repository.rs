use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, NaiveDateTime, SecondsFormat};
use csv::{Reader, Writer};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs::{self, File, OpenOptions};
use std::io::{BufReader, BufWriter};
use std::str::FromStr;
use tracing::{debug, info, warn};

use super::connection::CsvConnection;
use crate::domain::models::order::{Order, PaymentStatus};
use crate::domain::models::week_window::within_range;
use crate::storage::traits::{BatchUpdate, OrderStorage};

/// One row of `orders.csv`
#[derive(Debug, Serialize, Deserialize)]
struct OrderRecord {
    id: String,
    member_id: String,
    cost: String,
    payment_status: String,
    timestamp: String,
}

impl OrderRecord {
    fn from_order(order: &Order) -> Self {
        Self {
            id: order.id.clone(),
            member_id: order.member_id.clone(),
            cost: order.cost.to_string(),
            payment_status: order.payment_status.as_str().to_string(),
            timestamp: order.timestamp.to_rfc3339_opts(SecondsFormat::Millis, false),
        }
    }

    fn into_order(self) -> Result<Order> {
        let cost = Decimal::from_str(&self.cost)
            .with_context(|| format!("Invalid cost '{}' for order {}", self.cost, self.id))?;
        let payment_status = PaymentStatus::from_str(&self.payment_status).map_err(|e| anyhow!(e))?;
        let timestamp = DateTime::parse_from_rfc3339(&self.timestamp)
            .with_context(|| format!("Invalid timestamp '{}' for order {}", self.timestamp, self.id))?;

        Ok(Order {
            id: self.id,
            member_id: self.member_id,
            cost,
            payment_status,
            timestamp,
        })
    }
}

/// CSV-based order repository
///
/// All orders live in a single `orders.csv`. Every mutation rewrites the file
/// through a temporary file and an atomic rename, so readers always see a
/// complete file.
#[derive(Clone)]
pub struct OrderRepository {
    connection: CsvConnection,
}

impl OrderRepository {
    /// Create a new CSV order repository
    pub fn new(connection: CsvConnection) -> Self {
        Self { connection }
    }

    /// Read all orders from the CSV file
    fn read_orders(&self) -> Result<Vec<Order>> {
        self.connection.ensure_orders_file_exists()?;

        let file_path = self.connection.orders_file_path();
        let file = File::open(&file_path)?;
        let mut csv_reader = Reader::from_reader(BufReader::new(file));

        let mut orders = Vec::new();
        for result in csv_reader.deserialize::<OrderRecord>() {
            let record = result?;
            orders.push(record.into_order()?);
        }

        debug!("Read {} orders from {}", orders.len(), file_path.display());
        Ok(orders)
    }

    /// Write all orders to the CSV file
    fn write_orders(&self, orders: &[Order]) -> Result<()> {
        let file_path = self.connection.orders_file_path();

        // Create a temporary file for atomic write
        let temp_path = file_path.with_extension("tmp");

        {
            let file = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .open(&temp_path)?;

            let mut csv_writer = Writer::from_writer(BufWriter::new(file));
            for order in orders {
                csv_writer.serialize(OrderRecord::from_order(order))?;
            }
            // Header row is emitted by the first serialize; keep it for empty files too
            if orders.is_empty() {
                csv_writer.write_record(["id", "member_id", "cost", "payment_status", "timestamp"])?;
            }
            csv_writer.flush()?;
        }

        // Atomic move from temp to final file
        fs::rename(&temp_path, &file_path)?;

        Ok(())
    }

    fn in_range(order: &Order, start: NaiveDateTime, end: NaiveDateTime) -> bool {
        within_range(order.local_time(), start, end)
    }
}

#[async_trait]
impl OrderStorage for OrderRepository {
    async fn append_all(&self, new_orders: &[Order]) -> Result<()> {
        if new_orders.is_empty() {
            return Ok(());
        }

        let lock = self.connection.orders_write_lock();
        let _guard = lock.lock().await;

        let mut orders = self.read_orders()?;
        let existing: HashSet<&str> = orders.iter().map(|o| o.id.as_str()).collect();
        if let Some(duplicate) = new_orders.iter().find(|o| existing.contains(o.id.as_str())) {
            return Err(anyhow!("Order {} already exists", duplicate.id));
        }

        orders.extend(new_orders.iter().cloned());

        // Keep the file in chronological order
        orders.sort_by(|a, b| a.timestamp.cmp(&b.timestamp));

        self.write_orders(&orders)?;

        info!("Stored {} order(s) in CSV", new_orders.len());
        Ok(())
    }

    async fn query_by_time_range(&self, start: NaiveDateTime, end: NaiveDateTime) -> Result<Vec<Order>> {
        let mut orders = self.read_orders()?;

        orders.retain(|o| Self::in_range(o, start, end));
        orders.sort_by(|a, b| a.timestamp.cmp(&b.timestamp));

        Ok(orders)
    }

    async fn query_by_member_and_time_range_and_status(
        &self,
        member_id: &str,
        start: NaiveDateTime,
        end: NaiveDateTime,
        status: PaymentStatus,
    ) -> Result<Vec<Order>> {
        let mut orders = self.read_orders()?;

        orders.retain(|o| {
            o.member_id == member_id && o.payment_status == status && Self::in_range(o, start, end)
        });
        orders.sort_by(|a, b| a.timestamp.cmp(&b.timestamp));

        Ok(orders)
    }

    async fn update_payment_status(&self, order_id: &str, status: PaymentStatus) -> Result<()> {
        let outcome = self
            .update_payment_statuses(&[order_id.to_string()], status)
            .await?;

        if outcome.is_complete() {
            Ok(())
        } else {
            Err(anyhow!("Order not found: {}", order_id))
        }
    }

    /// Rewrites the file once for the whole batch
    async fn update_payment_statuses(&self, order_ids: &[String], status: PaymentStatus) -> Result<BatchUpdate> {
        let lock = self.connection.orders_write_lock();
        let _guard = lock.lock().await;

        let mut orders = self.read_orders()?;
        let mut outcome = BatchUpdate::default();

        for order_id in order_ids {
            match orders.iter_mut().find(|o| &o.id == order_id) {
                Some(order) => {
                    order.payment_status = status;
                    outcome.updated.push(order_id.clone());
                }
                None => {
                    warn!("Order not found for status update: {}", order_id);
                    outcome.failed.push(order_id.clone());
                }
            }
        }

        if !outcome.updated.is_empty() {
            self.write_orders(&orders)?;
            info!("Set {} order(s) to {}", outcome.updated.len(), status);
        }

        Ok(outcome)
    }
}
