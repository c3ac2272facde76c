//! String identifiers for hooks.
//!
//! Hooks can be registered by name using the conventional identifiers
//! `before_<event>`, `after_<event>`, `enter_<state>`, `reenter_<state>`,
//! `leave_<state>` and `change_state`, optionally prefixed with `on_`.
//! A bare name is an alias: `after_<name>` when `name` is a declared event,
//! `enter_<name>` otherwise, and an identifier spelling a declared event
//! exactly is always that event's alias. Names are turned into states and events by
//! deserializing them, so `state_enum!` variants are addressed by their
//! variant name.

use super::Hook;
use crate::core::{Event, State};
use serde::de::DeserializeOwned;
use serde_json::Value;

fn named<T: DeserializeOwned>(name: &str) -> Option<T> {
    if name.is_empty() {
        return None;
    }
    serde_json::from_value(Value::String(name.to_owned())).ok()
}

impl<S: State, E: Event> Hook<S, E> {
    /// Parse a hook identifier. `events` are the machine's declared events,
    /// used to resolve bare names.
    ///
    /// # Example
    ///
    /// ```rust
    /// use signalbox::hooks::Hook;
    ///
    /// let events = vec!["warn".to_string()];
    /// let hook: Option<Hook<String, String>> = Hook::parse("on_enter_red", &events);
    /// assert_eq!(hook, Some(Hook::Enter("red".to_string())));
    ///
    /// assert_eq!(Hook::<String, String>::parse("warn", &events), Some(Hook::After("warn".to_string())));
    /// assert_eq!(Hook::<String, String>::parse("green", &events), Some(Hook::Enter("green".to_string())));
    /// ```
    pub fn parse(identifier: &str, events: &[E]) -> Option<Self> {
        Self::parse_alias(identifier, events).map(|(hook, _)| hook)
    }

    /// Like [`parse`](Self::parse), also reporting whether the identifier
    /// was a bare-name alias rather than an explicit form.
    pub(crate) fn parse_alias(identifier: &str, events: &[E]) -> Option<(Self, bool)> {
        // Declared events may themselves start with `on_`.
        if let Some(event) = declared(identifier, events) {
            return Some((Self::After(event), true));
        }

        let id = identifier.strip_prefix("on_").unwrap_or(identifier);
        if id == "change_state" {
            return Some((Self::ChangeState, false));
        }

        let prefixed = if let Some(rest) = id.strip_prefix("before_") {
            Some(named(rest).map(Self::Before))
        } else if let Some(rest) = id.strip_prefix("after_") {
            Some(named(rest).map(Self::After))
        } else if let Some(rest) = id.strip_prefix("reenter_") {
            Some(named(rest).map(Self::Reenter))
        } else if let Some(rest) = id.strip_prefix("enter_") {
            Some(named(rest).map(Self::Enter))
        } else if let Some(rest) = id.strip_prefix("leave_") {
            Some(named(rest).map(Self::Leave))
        } else {
            None
        };
        // A recognised prefix never falls back to the bare-name aliases.
        if let Some(hook) = prefixed {
            return hook.map(|hook| (hook, false));
        }

        match declared(id, events) {
            Some(event) => Some((Self::After(event), true)),
            None => named(id).map(|state| (Self::Enter(state), true)),
        }
    }
}

fn declared<E: Event>(name: &str, events: &[E]) -> Option<E> {
    named::<E>(name).filter(|event| events.contains(event))
}
