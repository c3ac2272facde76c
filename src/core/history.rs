//! State transition history tracking.
//!
//! Machines built with `track_history()` append one record per completed
//! transition. Cancelled and suspended transitions are not recorded; a
//! suspended transition is recorded when it is resumed.

use super::state::{Event, State};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Record of a single completed transition.
///
/// # Example
///
/// ```rust
/// use signalbox::core::StateTransition;
/// use chrono::Utc;
///
/// let transition = StateTransition {
///     event: "warn".to_string(),
///     from: Some("green".to_string()),
///     to: "yellow".to_string(),
///     timestamp: Utc::now(),
/// };
/// assert!(!transition.is_startup());
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct StateTransition<S: State, E: Event> {
    /// The event that caused the transition
    pub event: E,
    /// The state being transitioned from, `None` for the startup transition
    pub from: Option<S>,
    /// The state being transitioned to
    pub to: S,
    /// When the state was changed
    pub timestamp: DateTime<Utc>,
}

impl<S: State, E: Event> StateTransition<S, E> {
    /// True for the transition out of the unstarted sentinel.
    pub fn is_startup(&self) -> bool {
        self.from.is_none()
    }
}

/// Ordered history of completed transitions.
///
/// # Example
///
/// ```rust
/// use signalbox::core::{StateHistory, StateTransition};
/// use chrono::Utc;
///
/// let mut history = StateHistory::new();
/// history.push(StateTransition {
///     event: "init".to_string(),
///     from: None,
///     to: "green".to_string(),
///     timestamp: Utc::now(),
/// });
/// history.push(StateTransition {
///     event: "warn".to_string(),
///     from: Some("green".to_string()),
///     to: "yellow".to_string(),
///     timestamp: Utc::now(),
/// });
///
/// let path = history.get_path();
/// assert_eq!(path, vec!["green", "yellow"]);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct StateHistory<S: State, E: Event> {
    transitions: Vec<StateTransition<S, E>>,
}

impl<S: State, E: Event> Default for StateHistory<S, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: State, E: Event> StateHistory<S, E> {
    pub fn new() -> Self {
        Self {
            transitions: Vec::new(),
        }
    }

    /// Append a transition.
    pub fn push(&mut self, transition: StateTransition<S, E>) {
        self.transitions.push(transition);
    }

    /// Get the path of states traversed.
    ///
    /// Returns the `from` state of the first transition (unless it was the
    /// startup transition), then the `to` state of each transition.
    pub fn get_path(&self) -> Vec<&S> {
        let mut path = Vec::new();
        if let Some(first) = self.transitions.first().and_then(|t| t.from.as_ref()) {
            path.push(first);
        }
        for transition in &self.transitions {
            path.push(&transition.to);
        }
        path
    }

    /// Time between the first and last recorded transition.
    ///
    /// Returns `None` if there are no transitions.
    pub fn duration(&self) -> Option<Duration> {
        if let (Some(first), Some(last)) = (self.transitions.first(), self.transitions.last()) {
            let duration = last.timestamp.signed_duration_since(first.timestamp);
            duration.to_std().ok()
        } else {
            None
        }
    }

    /// Get all transitions in order.
    pub fn transitions(&self) -> &[StateTransition<S, E>] {
        &self.transitions
    }

    pub fn last(&self) -> Option<&StateTransition<S, E>> {
        self.transitions.last()
    }

    pub fn len(&self) -> usize {
        self.transitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transition(from: Option<&str>, to: &str) -> StateTransition<String, String> {
        StateTransition {
            event: "step".to_string(),
            from: from.map(str::to_string),
            to: to.to_string(),
            timestamp: Utc::now(),
        }
    }

    #[test]
    fn new_history_is_empty() {
        let history: StateHistory<String, String> = StateHistory::new();
        assert!(history.is_empty());
        assert!(history.get_path().is_empty());
        assert!(history.duration().is_none());
        assert!(history.last().is_none());
    }

    #[test]
    fn get_path_returns_state_sequence() {
        let mut history = StateHistory::new();
        history.push(transition(Some("initial"), "processing"));
        history.push(transition(Some("processing"), "complete"));

        assert_eq!(history.get_path(), vec!["initial", "processing", "complete"]);
        assert_eq!(history.len(), 2);
    }

    #[test]
    fn get_path_skips_startup_sentinel() {
        let mut history = StateHistory::new();
        history.push(transition(None, "green"));

        assert_eq!(history.get_path(), vec!["green"]);
        assert!(history.transitions()[0].is_startup());
    }

    #[test]
    fn duration_calculates_elapsed_time() {
        let mut history = StateHistory::new();
        history.push(transition(Some("a"), "b"));

        std::thread::sleep(std::time::Duration::from_millis(10));

        history.push(transition(Some("b"), "c"));

        let duration = history.duration();
        assert!(duration.unwrap() >= std::time::Duration::from_millis(10));
    }

    #[test]
    fn single_transition_has_duration_zero() {
        let mut history = StateHistory::new();
        history.push(transition(Some("a"), "b"));

        assert_eq!(history.duration(), Some(std::time::Duration::from_secs(0)));
    }

    #[test]
    fn history_serializes_correctly() {
        let mut history = StateHistory::new();
        history.push(transition(None, "green"));
        history.push(transition(Some("green"), "yellow"));

        let json = serde_json::to_string(&history).unwrap();
        let deserialized: StateHistory<String, String> = serde_json::from_str(&json).unwrap();

        assert_eq!(history, deserialized);
    }
}
