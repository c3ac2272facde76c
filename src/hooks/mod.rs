//! Lifecycle hooks and the callback registry.
//!
//! Every transition dispatches hooks in a fixed order:
//! `Before(event)`, `Leave(src)`, `Enter(dst)` or `Reenter(dst)`,
//! `ChangeState`, `After(event)`. A hook is looked up in the machine's
//! [`Callbacks`] first and falls back to the model's [`Hooks`] impl.

mod identifier;

use crate::core::{Event, EventContext, State};
use std::collections::HashMap;
use std::fmt;

/// Identifier of one dispatch point.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Hook<S, E> {
    Before(E),
    After(E),
    Enter(S),
    Reenter(S),
    Leave(S),
    ChangeState,
}

impl<S: State, E: Event> fmt::Display for Hook<S, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Before(event) => write!(f, "before_{}", event.name()),
            Self::After(event) => write!(f, "after_{}", event.name()),
            Self::Enter(state) => write!(f, "enter_{}", state.name()),
            Self::Reenter(state) => write!(f, "reenter_{}", state.name()),
            Self::Leave(state) => write!(f, "leave_{}", state.name()),
            Self::ChangeState => f.write_str("change_state"),
        }
    }
}

/// What a hook asks the engine to do next.
///
/// `Cancel` is honoured by `Before` and `Leave` hooks, `Suspend` only by
/// `Leave` hooks (a `Before` hook returning `Suspend` cancels). Hooks that
/// run after the state has changed cannot stop the transition and their flow
/// is ignored.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Flow {
    #[default]
    Continue,
    Cancel,
    Suspend,
}

/// Error raised by application code inside a hook.
pub type HookError = Box<dyn std::error::Error + Send + Sync>;

pub type HookResult = Result<Flow, HookError>;

/// Registered hook callable. Receives the model and the event context.
pub type Callback<S, E, M> = Box<dyn Fn(&mut M, &EventContext<S, E>) -> HookResult + Send + Sync>;

/// Fallback hook handler implemented by models and shared objects.
///
/// Called for every dispatch point that has no registered callback.
///
/// # Example
///
/// ```rust
/// use signalbox::core::EventContext;
/// use signalbox::hooks::{Flow, Hook, HookResult, Hooks};
///
/// #[derive(Default)]
/// struct Journal {
///     lines: Vec<String>,
/// }
///
/// impl Hooks<String, String> for Journal {
///     fn on_hook(&mut self, hook: &Hook<String, String>, _ctx: &EventContext<String, String>) -> HookResult {
///         self.lines.push(hook.to_string());
///         Ok(Flow::Continue)
///     }
/// }
/// ```
pub trait Hooks<S: State, E: Event> {
    fn on_hook(&mut self, hook: &Hook<S, E>, ctx: &EventContext<S, E>) -> HookResult {
        let _ = (hook, ctx);
        Ok(Flow::Continue)
    }
}

impl<S: State, E: Event> Hooks<S, E> for () {}

/// Mapping from hook identifier to zero or one callable.
pub struct Callbacks<S: State, E: Event, M> {
    entries: HashMap<Hook<S, E>, Callback<S, E, M>>,
}

impl<S: State, E: Event, M> Default for Callbacks<S, E, M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: State, E: Event, M> Callbacks<S, E, M> {
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Register `callback` for `hook`, replacing any previous one.
    pub fn insert<F>(&mut self, hook: Hook<S, E>, callback: F)
    where
        F: Fn(&mut M, &EventContext<S, E>) -> HookResult + Send + Sync + 'static,
    {
        self.entries.insert(hook, Box::new(callback));
    }

    pub(crate) fn insert_boxed(&mut self, hook: Hook<S, E>, callback: Callback<S, E, M>) {
        self.entries.insert(hook, callback);
    }

    pub fn get(&self, hook: &Hook<S, E>) -> Option<&Callback<S, E, M>> {
        self.entries.get(hook)
    }

    pub fn contains(&self, hook: &Hook<S, E>) -> bool {
        self.entries.contains_key(hook)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Run the callback for `hook`, or the model's fallback handler.
    pub fn dispatch(&self, hook: &Hook<S, E>, model: &mut M, ctx: &EventContext<S, E>) -> HookResult
    where
        M: Hooks<S, E>,
    {
        tracing::trace!(hook = %hook, event = ctx.event.name(), "dispatching hook");
        match self.entries.get(hook) {
            Some(callback) => callback(model, ctx),
            None => model.on_hook(hook, ctx),
        }
    }
}
