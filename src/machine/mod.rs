//! Adapters binding a [`Definition`](crate::engine::Definition) to state.
//!
//! - [`StateMachine`] owns its state slot and an application model.
//! - [`SharedMachine`] drives any number of external objects through a
//!   designated [`StateField`].

mod embedded;
mod shared;

pub use embedded::StateMachine;
pub use shared::{SharedMachine, StateField};
