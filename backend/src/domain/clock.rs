use chrono::{DateTime, FixedOffset, Local, NaiveDateTime, SubsecRound};

/// Source of the current local time.
pub trait Clock: Send + Sync {
    /// Now, carrying the local UTC offset, truncated to milliseconds.
    fn now(&self) -> DateTime<FixedOffset>;

    /// Local wall-clock reading of [`Clock::now`].
    fn local_now(&self) -> NaiveDateTime {
        self.now().naive_local()
    }
}

/// Real-time clock backed by the system local time.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<FixedOffset> {
        Local::now().fixed_offset().trunc_subsecs(3)
    }
}

/// Clock pinned to a settable instant.
#[cfg(test)]
pub struct FixedClock(std::sync::Mutex<DateTime<FixedOffset>>);

#[cfg(test)]
impl FixedClock {
    pub fn new(now: DateTime<FixedOffset>) -> Self {
        Self(std::sync::Mutex::new(now))
    }

    pub fn set(&self, now: DateTime<FixedOffset>) {
        *self.0.lock().unwrap() = now;
    }
}

#[cfg(test)]
impl Clock for FixedClock {
    fn now(&self) -> DateTime<FixedOffset> {
        *self.0.lock().unwrap()
    }
}
