//! Daily reminder to enter the day's orders.
//!
//! The scheduler is a two-state machine, `Idle` or `Armed(fire_at)`, driven
//! by a single spawned task. The task waits on one sleep at a time and can be
//! cancelled through its [`ReminderHandle`]. Dropping the handle also stops it.

use async_trait::async_trait;
use chrono::{Duration, NaiveDateTime, NaiveTime};
use std::sync::Arc;
use tokio::sync::{oneshot, watch};
use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::domain::clock::Clock;
use crate::domain::errors::NotificationError;

pub const DEFAULT_REMINDER_TITLE: &str = "Reminder";
pub const DEFAULT_REMINDER_MESSAGE: &str = "Please enter your tiffin orders for today!";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReminderState {
    Idle,
    Armed(NaiveDateTime),
}

/// First occurrence of `time` strictly after `now`.
pub fn next_fire_at(now: NaiveDateTime, time: NaiveTime) -> NaiveDateTime {
    let today = now.date().and_time(time);
    if today > now {
        today
    } else {
        today.checked_add_signed(Duration::days(1)).unwrap_or(today)
    }
}

/// Delivers a reminder to the user.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, title: &str, message: &str) -> Result<(), NotificationError>;
}

/// Emits reminders as log events.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn notify(&self, title: &str, message: &str) -> Result<(), NotificationError> {
        info!(target: "reminder", "{}: {}", title, message);
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReminderSettings {
    pub time: NaiveTime,
    pub title: String,
    pub message: String,
}

impl Default for ReminderSettings {
    fn default() -> Self {
        Self {
            time: NaiveTime::from_hms_opt(21, 0, 0).unwrap_or(NaiveTime::MIN),
            title: DEFAULT_REMINDER_TITLE.to_string(),
            message: DEFAULT_REMINDER_MESSAGE.to_string(),
        }
    }
}

pub struct ReminderScheduler {
    settings: ReminderSettings,
    clock: Arc<dyn Clock>,
    notifier: Arc<dyn Notifier>,
}

impl ReminderScheduler {
    pub fn new(settings: ReminderSettings, clock: Arc<dyn Clock>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            settings,
            clock,
            notifier,
        }
    }

    /// Spawn the scheduler task. Must be called within a tokio runtime.
    pub fn start(self) -> ReminderHandle {
        let (state_tx, state_rx) = watch::channel(ReminderState::Idle);
        let (shutdown_tx, shutdown_rx) = oneshot::channel();
        let task = tokio::spawn(self.run(state_tx, shutdown_rx));

        ReminderHandle {
            shutdown_tx,
            state: state_rx,
            task,
        }
    }

    async fn run(self, state: watch::Sender<ReminderState>, mut shutdown: oneshot::Receiver<()>) {
        let mut last_fire: Option<NaiveDateTime> = None;

        loop {
            let now = self.clock.local_now();
            // Never fire twice for the same slot if the clock lags the timer
            let from = match last_fire {
                Some(fired) if fired > now => fired,
                _ => now,
            };
            let fire_at = next_fire_at(from, self.settings.time);
            state.send_replace(ReminderState::Armed(fire_at));
            info!("Reminder armed for {}", fire_at);

            let wait = fire_at
                .signed_duration_since(now)
                .to_std()
                .unwrap_or(std::time::Duration::ZERO);

            tokio::select! {
                _ = &mut shutdown => break,
                _ = tokio::time::sleep(wait) => {}
            }

            if let Err(e) = self.notifier.notify(&self.settings.title, &self.settings.message).await {
                warn!("Reminder for {} not delivered: {}", fire_at, e);
            }
            last_fire = Some(fire_at);
        }

        state.send_replace(ReminderState::Idle);
        info!("Reminder scheduler stopped");
    }
}

/// Control handle for a running [`ReminderScheduler`].
pub struct ReminderHandle {
    shutdown_tx: oneshot::Sender<()>,
    state: watch::Receiver<ReminderState>,
    task: JoinHandle<()>,
}

impl ReminderHandle {
    pub fn state(&self) -> ReminderState {
        *self.state.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<ReminderState> {
        self.state.clone()
    }

    /// Cancel the pending reminder and wait for the task to exit.
    pub async fn shutdown(self) {
        let _ = self.shutdown_tx.send(());
        if let Err(e) = self.task.await {
            warn!("Reminder task ended abnormally: {}", e);
        }
    }
}
