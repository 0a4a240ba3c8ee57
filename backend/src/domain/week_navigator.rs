//! Week-by-week browsing state for an insights view.
//!
//! Only the most recently requested window may update the view. A slow
//! response for a window the user has already navigated away from is
//! discarded.
use chrono::NaiveDateTime;
use std::future::Future;
use std::sync::{Mutex, MutexGuard};
use tracing::debug;

use crate::domain::aggregator::WeeklyAggregate;
use crate::domain::errors::TrackerResult;
use crate::domain::models::week_window::{window_containing, WeekWindow};

#[derive(Debug, Clone, PartialEq)]
pub enum ViewState {
    Loading,
    Loaded(WeeklyAggregate),
    /// Fetch failed. Distinct from a loaded but empty week.
    Failed(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    Applied,
    /// A newer request was issued while this one was in flight.
    Stale,
}

struct NavigatorState {
    selected: WeekWindow,
    generation: u64,
    view: ViewState,
}

pub struct WeekNavigator {
    current: WeekWindow,
    state: Mutex<NavigatorState>,
}

impl WeekNavigator {
    pub fn new(now: NaiveDateTime) -> Self {
        let current = window_containing(now);
        Self {
            current,
            state: Mutex::new(NavigatorState {
                selected: current,
                generation: 0,
                view: ViewState::Loading,
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, NavigatorState> {
        // State is plain data and stays consistent even if a holder panicked
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn selected(&self) -> WeekWindow {
        self.lock().selected
    }

    /// Offset of the selected window from the current week (0 or negative).
    pub fn offset(&self) -> i64 {
        self.lock().selected.weeks_since(&self.current)
    }

    pub fn can_go_next(&self) -> bool {
        self.current.is_after(&self.lock().selected)
    }

    pub fn previous(&self) -> WeekWindow {
        let mut state = self.lock();
        state.selected = state.selected.shift(-1);
        state.selected
    }

    /// Move one week forward. Returns false, leaving the selection alone,
    /// when already at the current week.
    pub fn next(&self) -> bool {
        let mut state = self.lock();
        if !self.current.is_after(&state.selected) {
            return false;
        }
        state.selected = state.selected.shift(1);
        true
    }

    pub fn view(&self) -> ViewState {
        self.lock().view.clone()
    }

    /// Fetch the aggregate for the selected window and apply it unless a
    /// newer load started in the meantime.
    pub async fn load<F, Fut>(&self, fetch: F) -> LoadOutcome
    where
        F: FnOnce(WeekWindow) -> Fut,
        Fut: Future<Output = TrackerResult<WeeklyAggregate>>,
    {
        let (generation, window) = {
            let mut state = self.lock();
            state.generation += 1;
            state.view = ViewState::Loading;
            (state.generation, state.selected)
        };

        let result = fetch(window).await;

        let mut state = self.lock();
        if state.generation != generation {
            debug!("Discarding stale result for week {}", window);
            return LoadOutcome::Stale;
        }
        state.view = match result {
            Ok(aggregate) => ViewState::Loaded(aggregate),
            Err(e) => ViewState::Failed(e.to_string()),
        };
        LoadOutcome::Applied
    }
}
