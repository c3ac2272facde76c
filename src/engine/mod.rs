//! Transition engine: resolution and hook dispatch.
//!
//! A [`Definition`] is the compiled, immutable part of a machine. It drives
//! [`StateSlot`]s through the dispatch protocol:
//!
//! 1. reject the event if a transition is pending, the event is unknown or
//!    no rule applies from the current state
//! 2. pick the destination: explicit rules before wildcard rules, guards in
//!    order, `Same` resolved to the current state
//! 3. `Before(event)`, which may cancel
//! 4. `Leave(src)`, which may cancel or suspend
//! 5. set the current state
//! 6. `Enter(dst)` or `Reenter(dst)`, `ChangeState`, `After(event)`
//!
//! Hook errors are returned as they occur; completed steps are not undone.

mod definition;
mod error;
mod slot;

pub use definition::{Definition, Initial, StepResult, DEFAULT_STARTUP_EVENT};
pub(crate) use definition::Host;
pub use error::{ErrorKind, MachineError};
pub use slot::{PendingTransition, StateSlot};
