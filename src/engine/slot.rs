//! Per-machine mutable state: current state, pending transition, history.

use crate::core::{Event, EventContext, State, StateHistory};

/// A transition suspended by a `Leave` hook, waiting for `transition()`.
#[derive(Clone, Debug, PartialEq)]
pub struct PendingTransition<S: State, E: Event> {
    context: EventContext<S, E>,
}

impl<S: State, E: Event> PendingTransition<S, E> {
    pub(crate) fn new(context: EventContext<S, E>) -> Self {
        Self { context }
    }

    /// The resolved transition, including the original arguments.
    pub fn context(&self) -> &EventContext<S, E> {
        &self.context
    }

    pub fn destination(&self) -> &S {
        &self.context.dst
    }

    pub(crate) fn into_context(self) -> EventContext<S, E> {
        self.context
    }
}

/// State cell driven by the engine.
///
/// The embedded adapter owns one; objects driven by a shared machine embed
/// one as a field. A fresh slot is unstarted (`current() == None`).
#[derive(Clone, Debug, PartialEq)]
pub struct StateSlot<S: State, E: Event> {
    pub(crate) current: Option<S>,
    pub(crate) pending: Option<PendingTransition<S, E>>,
    pub(crate) history: StateHistory<S, E>,
}

impl<S: State, E: Event> Default for StateSlot<S, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: State, E: Event> StateSlot<S, E> {
    pub fn new() -> Self {
        Self {
            current: None,
            pending: None,
            history: StateHistory::new(),
        }
    }

    /// Slot already in `state`, as if it had been started there.
    pub fn at(state: S) -> Self {
        Self {
            current: Some(state),
            ..Self::new()
        }
    }

    pub fn current(&self) -> Option<&S> {
        self.current.as_ref()
    }

    pub fn is_state(&self, state: &S) -> bool {
        self.current.as_ref() == Some(state)
    }

    pub fn is_started(&self) -> bool {
        self.current.is_some()
    }

    pub fn pending(&self) -> Option<&PendingTransition<S, E>> {
        self.pending.as_ref()
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn history(&self) -> &StateHistory<S, E> {
        &self.history
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::EventArgs;

    type Slot = StateSlot<String, String>;

    #[test]
    fn new_slot_is_unstarted() {
        let slot = Slot::new();
        assert_eq!(slot.current(), None);
        assert!(!slot.is_started());
        assert!(!slot.is_pending());
        assert!(slot.history().is_empty());
    }

    #[test]
    fn slot_at_state() {
        let slot = Slot::at("green".to_string());
        assert!(slot.is_state(&"green".to_string()));
        assert!(!slot.is_state(&"red".to_string()));
        assert!(slot.is_started());
    }

    #[test]
    fn pending_transition_exposes_destination() {
        let pending = PendingTransition::new(EventContext::new(
            "calm".to_string(),
            Some("red".to_string()),
            "yellow".to_string(),
            EventArgs::new().kwarg("id", 1),
        ));

        assert_eq!(pending.destination(), "yellow");
        assert_eq!(pending.context().get("id"), Some(&serde_json::json!(1)));
        assert_eq!(pending.into_context().event, "calm");
    }
}
