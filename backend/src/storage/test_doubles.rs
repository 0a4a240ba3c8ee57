//! In-memory storage with fault injection, for service tests.

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use chrono::NaiveDateTime;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;
use tokio::sync::oneshot;

use crate::domain::models::member::Member;
use crate::domain::models::order::{Order, PaymentStatus};
use crate::domain::models::week_window::within_range;
use crate::storage::traits::{MemberStorage, OrderStorage, RosterInsert};

#[derive(Default)]
pub struct InMemoryOrderStorage {
    orders: Mutex<Vec<Order>>,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
    failing_updates: Mutex<HashSet<String>>,
    read_gates: Mutex<HashMap<NaiveDateTime, oneshot::Receiver<()>>>,
    update_calls: AtomicUsize,
}

impl InMemoryOrderStorage {
    pub fn with_orders(orders: Vec<Order>) -> Self {
        Self {
            orders: Mutex::new(orders),
            ..Self::default()
        }
    }

    pub fn snapshot(&self) -> Vec<Order> {
        self.orders.lock().unwrap().clone()
    }

    pub fn set_fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    pub fn fail_update_of(&self, order_id: &str) {
        self.failing_updates.lock().unwrap().insert(order_id.to_string());
    }

    pub fn clear_update_failures(&self) {
        self.failing_updates.lock().unwrap().clear();
    }

    pub fn update_calls(&self) -> usize {
        self.update_calls.load(Ordering::SeqCst)
    }

    /// Hold back range queries starting at `start` until the sender fires.
    pub fn gate_reads_starting_at(&self, start: NaiveDateTime) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        self.read_gates.lock().unwrap().insert(start, rx);
        tx
    }
}

#[async_trait]
impl OrderStorage for InMemoryOrderStorage {
    async fn append_all(&self, orders: &[Order]) -> Result<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(anyhow!("backend offline"));
        }
        self.orders.lock().unwrap().extend(orders.iter().cloned());
        Ok(())
    }

    async fn query_by_time_range(&self, start: NaiveDateTime, end: NaiveDateTime) -> Result<Vec<Order>> {
        let gate = self.read_gates.lock().unwrap().remove(&start);
        if let Some(gate) = gate {
            let _ = gate.await;
        }
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(anyhow!("backend offline"));
        }

        let mut orders: Vec<Order> = self
            .orders
            .lock()
            .unwrap()
            .iter()
            .filter(|o| within_range(o.local_time(), start, end))
            .cloned()
            .collect();
        orders.sort_by(|a, b| a.timestamp.cmp(&b.timestamp));
        Ok(orders)
    }

    async fn update_payment_status(&self, order_id: &str, status: PaymentStatus) -> Result<()> {
        self.update_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_writes.load(Ordering::SeqCst) || self.failing_updates.lock().unwrap().contains(order_id) {
            return Err(anyhow!("write rejected for {}", order_id));
        }

        let mut orders = self.orders.lock().unwrap();
        let order = orders
            .iter_mut()
            .find(|o| o.id == order_id)
            .ok_or_else(|| anyhow!("Order not found: {}", order_id))?;
        order.payment_status = status;
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryMemberStorage {
    members: Mutex<Option<Vec<Member>>>,
}

#[async_trait]
impl MemberStorage for InMemoryMemberStorage {
    async fn list_members(&self) -> Result<Option<Vec<Member>>> {
        Ok(self.members.lock().unwrap().clone())
    }

    async fn store_members(&self, members: &[Member]) -> Result<()> {
        *self.members.lock().unwrap() = Some(members.to_vec());
        Ok(())
    }

    async fn insert_member(&self, member: &Member, initial: &[Member]) -> Result<RosterInsert> {
        let mut stored = self.members.lock().unwrap();
        let mut members = stored.clone().unwrap_or_else(|| initial.to_vec());
        if members.iter().any(|m| m.name == member.name) {
            return Ok(RosterInsert::AlreadyPresent);
        }
        members.push(member.clone());
        *stored = Some(members.clone());
        Ok(RosterInsert::Inserted(members))
    }
}
