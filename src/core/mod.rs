//! Core state machine types.
//!
//! This module contains the declarative parts of a machine:
//! - State and Event identifiers via the `State` and `Event` traits
//! - Event arguments and the per-invocation event context
//! - Guards and the condition resolver
//! - Transition rules and the transition table
//! - Transition history

mod context;
mod guard;
mod history;
mod state;
mod table;

pub use context::{EventArgs, EventContext};
pub use guard::{resolve, Guard, Outcome, Resolution, Target, Verdict};
pub use history::{StateHistory, StateTransition};
pub use state::{state_name, Event, State, NONE};
pub use table::{Rule, Source, TransitionTable};
