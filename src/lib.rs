//! Signalbox: a declarative finite state machine engine
//!
//! Machines are declared once as a table of rules (event, source states,
//! destination, guards) plus lifecycle hooks, compiled into an immutable
//! [`Definition`](engine::Definition), and then driven either by an embedded
//! [`StateMachine`] that owns its state or by a [`SharedMachine`] that reads
//! and writes a state field of external objects.
//!
//! # Core Concepts
//!
//! - **State / Event**: typed identifiers via the `State` and `Event` traits
//! - **Guards**: predicates over the model that refuse or redirect transitions
//! - **Wildcards**: rules that apply from any state, or stay in the same one
//! - **Hooks**: `before`, `leave`, `enter`/`reenter`, `change_state`, `after`
//! - **Suspension**: a `leave` hook can park a transition until `transition()`
//!
//! # Example
//!
//! ```rust
//! use signalbox::builder::{MachineBuilder, RuleBuilder};
//! use signalbox::engine::Initial;
//! use signalbox::hooks::{Flow, Hook};
//! use signalbox::{event_enum, state_enum};
//!
//! state_enum! {
//!     enum Light {
//!         Green,
//!         Yellow,
//!         Red,
//!     }
//! }
//!
//! event_enum! {
//!     enum Signal {
//!         Init,
//!         Warn,
//!         Panic,
//!         Calm,
//!         Clear,
//!     }
//! }
//!
//! let mut light = MachineBuilder::new()
//!     .initial(Initial::new(Light::Green, Signal::Init))
//!     .event(Signal::Warn, Light::Green, Light::Yellow)
//!     .rule(RuleBuilder::new(Signal::Panic).from(Light::Green).from(Light::Yellow).to(Light::Red))
//!     .event(Signal::Calm, Light::Red, Light::Yellow)
//!     .event(Signal::Clear, Light::Yellow, Light::Green)
//!     .on(Hook::Enter(Light::Red), |_, ctx| {
//!         assert_eq!(ctx.src, Some(Light::Yellow));
//!         Ok(Flow::Continue)
//!     })
//!     .build()
//!     .unwrap()
//!     .start(())
//!     .unwrap();
//!
//! light.trigger(Signal::Warn).unwrap();
//! light.trigger(Signal::Panic).unwrap();
//! assert!(light.is_state(&Light::Red));
//! assert!(light.cannot(&Signal::Warn));
//! ```

pub mod builder;
pub mod core;
pub mod engine;
pub mod hooks;
pub mod machine;

// Re-export commonly used types
pub use builder::{BuildError, MachineBuilder, RuleBuilder};
pub use crate::core::{Event, EventArgs, EventContext, Guard, Outcome, State, Target};
pub use engine::{Definition, Initial, MachineError, StateSlot, StepResult};
pub use hooks::{Flow, Hook, HookResult, Hooks};
pub use machine::{SharedMachine, StateField, StateMachine};
