use std::sync::{Mutex, MutexGuard, TryLockError};

use crate::design::DesignedFilter;

#[derive(Default)]
pub(crate) struct SlotState {
    /// Newest filter waiting for the audio context.
    pending: Option<DesignedFilter>,
    /// Filter the audio context swapped out; freed by the control context.
    retired: Option<DesignedFilter>,
}

/// Single-slot exchange between the control and audio contexts
///
/// Both sides only ever `try_lock`, so neither waits on the other. A failed
/// attempt is not an error: the producer retries on its next update and the
/// consumer keeps its current filter for the block.
///
/// The audio side never drops a filter. It parks the one it replaces in the
/// slot, and the next `try_swap` (or `collect_retired`) frees it on the
/// control side.
#[derive(Default)]
pub struct HandoffSlot {
    state: Mutex<SlotState>,
}

impl HandoffSlot {
    pub fn new() -> Self {
        Self::default()
    }

    fn try_state(&self) -> Option<MutexGuard<'_, SlotState>> {
        match self.state.try_lock() {
            Ok(guard) => Some(guard),
            // A panic elsewhere cannot leave the two Options torn
            Err(TryLockError::Poisoned(poisoned)) => Some(poisoned.into_inner()),
            Err(TryLockError::WouldBlock) => None,
        }
    }

    /// Offer a new filter to the audio context (control rate)
    ///
    /// Replaces any filter still pending. If the slot is busy the filter is
    /// handed back without blocking so the caller can offer it again.
    pub fn try_swap(&self, filter: DesignedFilter) -> std::result::Result<(), DesignedFilter> {
        match self.try_state() {
            Some(mut state) => {
                state.retired = None;
                state.pending = Some(filter);
                Ok(())
            }
            None => Err(filter),
        }
    }

    /// Replace `active` with the pending filter, if any (audio rate)
    ///
    /// Returns `true` if a new filter was adopted. Never blocks, allocates or
    /// frees memory.
    pub fn try_adopt(&self, active: &mut DesignedFilter) -> bool {
        let Some(mut state) = self.try_state() else {
            return false;
        };
        match state.pending.take() {
            Some(next) => {
                // `pending` is only set by `try_swap`, which empties `retired`
                debug_assert!(state.retired.is_none());
                state.retired = Some(std::mem::replace(active, next));
                true
            }
            None => false,
        }
    }

    /// Whether a filter is waiting for adoption (control rate)
    pub fn has_pending(&self) -> bool {
        self.try_state().is_some_and(|state| state.pending.is_some())
    }

    /// Take the filter the audio context last swapped out (control rate)
    pub fn collect_retired(&self) -> Option<DesignedFilter> {
        self.try_state().and_then(|mut state| state.retired.take())
    }

    /// Hold the lock to simulate the other context mid-exchange
    #[cfg(test)]
    pub(crate) fn hold(&self) -> MutexGuard<'_, SlotState> {
        self.state.lock().unwrap()
    }
}
