//! State change fan-out
//!
//! Observers are either callbacks or channel subscribers. Both receive every
//! published [`GuidanceState`] in order. Channel sends never run user code and
//! happen as soon as a state is published; callbacks are snapshotted and
//! invoked later, outside the simulator's state lock.

use crossbeam_channel::{unbounded, Receiver, Sender};
use parking_lot::Mutex;
use std::sync::Arc;
use tracing::debug;

use super::state::GuidanceState;

/// Callback invoked on each state change
pub type StateCallback = Box<dyn FnMut(&GuidanceState) + Send + 'static>;

/// Registered callback, shareable with a delivery pass in progress
pub type SharedCallback = Arc<Mutex<StateCallback>>;

/// Handle returned by [`super::GuidanceSimulator::on_state_change`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

#[derive(Default)]
pub struct StateObservers {
    next_id: u64,
    callbacks: Vec<(ListenerId, SharedCallback)>,
    subscribers: Vec<Sender<GuidanceState>>,
}

impl StateObservers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_callback(&mut self, callback: StateCallback) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.callbacks.push((id, Arc::new(Mutex::new(callback))));
        id
    }

    pub fn remove_callback(&mut self, id: ListenerId) -> bool {
        let before = self.callbacks.len();
        self.callbacks.retain(|(listener, _)| *listener != id);
        self.callbacks.len() != before
    }

    pub fn subscribe(&mut self) -> Receiver<GuidanceState> {
        let (tx, rx) = unbounded();
        self.subscribers.push(tx);
        rx
    }

    /// Send to every channel subscriber, pruning disconnected ones
    pub fn broadcast(&mut self, state: &GuidanceState) {
        let before = self.subscribers.len();
        self.subscribers.retain(|tx| tx.send(*state).is_ok());
        let dropped = before - self.subscribers.len();
        if dropped > 0 {
            debug!("Pruned {} disconnected state subscribers", dropped);
        }
    }

    /// Callbacks registered right now
    pub fn callbacks(&self) -> Vec<SharedCallback> {
        self.callbacks
            .iter()
            .map(|(_, callback)| Arc::clone(callback))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.callbacks.len() + self.subscribers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Invoke each callback with one state
pub fn notify(callbacks: &[SharedCallback], state: &GuidanceState) {
    for callback in callbacks {
        let mut callback = callback.lock();
        (*callback)(state);
    }
}
