//! State and Event traits for state machine identifiers.
//!
//! States and events are opaque, comparable identifiers. Both traits are
//! implemented for `String` so that machines can be declared with plain
//! names, and the `state_enum!`/`event_enum!` macros derive them for
//! fieldless enums.

use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use std::hash::Hash;

/// Display name of the sentinel state of a machine that was never started.
pub const NONE: &str = "none";

/// Trait for state machine states.
///
/// # Required Traits
///
/// - `Clone`: states are copied into event contexts and history
/// - `Eq` + `Hash`: states key the callback registry and match rule sources
/// - `Debug`: states must be debuggable for diagnostics
/// - `Serialize` + `Deserialize`: states are recorded in history and parsed
///   from hook identifiers
///
/// # Example
///
/// ```rust
/// use signalbox::core::State;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
/// enum Light {
///     Green,
///     Yellow,
///     Red,
/// }
///
/// impl State for Light {
///     fn name(&self) -> &str {
///         match self {
///             Self::Green => "Green",
///             Self::Yellow => "Yellow",
///             Self::Red => "Red",
///         }
///     }
/// }
///
/// assert_eq!(Light::Yellow.name(), "Yellow");
/// ```
pub trait State:
    Clone + Eq + Hash + Debug + Serialize + for<'de> Deserialize<'de> + Send + Sync + 'static
{
    /// Get the state's name for display, logging and hook identifiers.
    fn name(&self) -> &str;
}

/// Trait for the events that drive a state machine.
///
/// Events share the bounds of [`State`]: they key the transition table and
/// the callback registry, and can be parsed from hook identifiers.
pub trait Event:
    Clone + Eq + Hash + Debug + Serialize + for<'de> Deserialize<'de> + Send + Sync + 'static
{
    /// Get the event's name for display, logging and hook identifiers.
    fn name(&self) -> &str;
}

impl State for String {
    fn name(&self) -> &str {
        self
    }
}

impl Event for String {
    fn name(&self) -> &str {
        self
    }
}

/// Name of an optional state, using [`NONE`] for the sentinel.
pub fn state_name<S: State>(state: Option<&S>) -> &str {
    state.map_or(NONE, State::name)
}
