//! Per-invocation event context handed to guards and hooks.

use super::state::{state_name, Event, State};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Arguments supplied by the caller when triggering an event.
///
/// Positional and keyword arguments are carried as JSON values so that any
/// serializable payload can travel with an event.
///
/// # Example
///
/// ```rust
/// use signalbox::core::EventArgs;
///
/// let args = EventArgs::new().arg("positional").kwarg("id", 123);
/// assert_eq!(args.positional()[0], "positional");
/// assert_eq!(args.get("id"), Some(&serde_json::json!(123)));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct EventArgs {
    positional: Vec<Value>,
    named: Map<String, Value>,
}

impl EventArgs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a positional argument.
    pub fn arg(mut self, value: impl Into<Value>) -> Self {
        self.positional.push(value.into());
        self
    }

    /// Set a keyword argument, replacing any previous value for `key`.
    pub fn kwarg(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.named.insert(key.into(), value.into());
        self
    }

    pub fn positional(&self) -> &[Value] {
        &self.positional
    }

    pub fn named(&self) -> &Map<String, Value> {
        &self.named
    }

    /// Look up a keyword argument.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.named.get(key)
    }

    pub fn is_empty(&self) -> bool {
        self.positional.is_empty() && self.named.is_empty()
    }
}

/// Record of one attempted transition.
///
/// Created when an event is triggered, passed to every guard and hook, and
/// kept inside a pending transition or a `Cancelled` error. `src` is `None`
/// when the machine has not been started yet.
#[derive(Clone, Debug, PartialEq)]
pub struct EventContext<S: State, E: Event> {
    pub event: E,
    pub src: Option<S>,
    pub dst: S,
    pub args: EventArgs,
}

impl<S: State, E: Event> EventContext<S, E> {
    pub fn new(event: E, src: Option<S>, dst: S, args: EventArgs) -> Self {
        Self {
            event,
            src,
            dst,
            args,
        }
    }

    /// True when the destination equals the source.
    pub fn is_reflexive(&self) -> bool {
        self.src.as_ref() == Some(&self.dst)
    }

    /// Source name, `none` for an unstarted machine.
    pub fn src_name(&self) -> &str {
        state_name(self.src.as_ref())
    }

    /// Shorthand for a keyword argument.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.args.get(key)
    }
}
