//! Runtime errors raised while triggering events.

use crate::core::{Event, EventContext, State};
use crate::hooks::HookError;
use thiserror::Error;

/// Coarse classification of a [`MachineError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The event cannot be triggered right now.
    InvalidTransition,
    /// A hook or guard vetoed the transition.
    Cancelled,
    /// The machine definition cannot decide the transition.
    Configuration,
    /// Application code inside a hook failed.
    Hook,
}

/// Errors that can occur when triggering or resuming a transition.
#[derive(Debug, Error)]
pub enum MachineError<S: State, E: Event> {
    #[error("event '{event}' is not defined")]
    UnknownEvent { event: String },

    #[error("event '{event}' is inappropriate in current state '{state}'")]
    NotPermitted { event: String, state: String },

    #[error("event '{event}' rejected: a transition is pending")]
    TransitionPending { event: String },

    #[error("no transition is pending")]
    NothingPending,

    #[error(
        "transition '{}' from '{}' to '{}' was cancelled",
        .0.event.name(),
        .0.src_name(),
        .0.dst.name()
    )]
    Cancelled(Box<EventContext<S, E>>),

    #[error("guard {index} of event '{event}' returned {value} with no matching outcome")]
    UnmatchedOutcome {
        event: String,
        index: usize,
        value: bool,
    },

    #[error("hook '{hook}' failed: {source}")]
    Hook {
        hook: String,
        #[source]
        source: HookError,
    },
}

impl<S: State, E: Event> MachineError<S, E> {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::UnknownEvent { .. }
            | Self::NotPermitted { .. }
            | Self::TransitionPending { .. }
            | Self::NothingPending => ErrorKind::InvalidTransition,
            Self::Cancelled(_) => ErrorKind::Cancelled,
            Self::UnmatchedOutcome { .. } => ErrorKind::Configuration,
            Self::Hook { .. } => ErrorKind::Hook,
        }
    }

    pub fn is_invalid_transition(&self) -> bool {
        self.kind() == ErrorKind::InvalidTransition
    }

    pub fn is_cancelled(&self) -> bool {
        self.kind() == ErrorKind::Cancelled
    }

    /// The attempted transition carried by a `Cancelled` error.
    pub fn context(&self) -> Option<&EventContext<S, E>> {
        match self {
            Self::Cancelled(ctx) => Some(ctx),
            _ => None,
        }
    }

    pub(crate) fn cancelled(ctx: EventContext<S, E>) -> Self {
        Self::Cancelled(Box::new(ctx))
    }
}
