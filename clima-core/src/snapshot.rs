//! The single slot holding the widget's current snapshot.
//!
//! Every fetch cycle takes a [`CycleTicket`] before it starts and hands it
//! back with its result. A result is only stored if no later-started cycle
//! has already committed, so a slow, superseded cycle can never overwrite
//! newer data. A cycle that is cancelled simply never commits.

use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::model::{WeatherSnapshot, WidgetView};

/// Generation number handed out by [`SnapshotSlot::begin`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct CycleTicket(u64);

impl CycleTicket {
    pub fn generation(&self) -> u64 {
        self.0
    }
}

#[derive(Debug, Default)]
struct SlotState {
    issued: u64,
    committed: u64,
    snapshot: Option<WeatherSnapshot>,
}

#[derive(Debug, Default)]
pub struct SnapshotSlot {
    state: Mutex<SlotState>,
}

impl SnapshotSlot {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, SlotState> {
        // the state is replaced field by field under the lock, never left half-written
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Start a new cycle.
    pub fn begin(&self) -> CycleTicket {
        let mut state = self.lock();
        state.issued += 1;
        CycleTicket(state.issued)
    }

    /// Store the outcome of a cycle. `None` resets the slot to absent.
    ///
    /// Returns `false` when a newer cycle has already committed and the
    /// result was dropped.
    pub fn commit(&self, ticket: CycleTicket, snapshot: Option<WeatherSnapshot>) -> bool {
        let mut state = self.lock();
        if ticket.0 <= state.committed {
            return false;
        }
        state.committed = ticket.0;
        state.snapshot = snapshot;
        true
    }

    pub fn view(&self) -> WidgetView {
        let state = self.lock();
        WidgetView {
            snapshot: state.snapshot.clone(),
            loading: state.issued > state.committed,
        }
    }
}
