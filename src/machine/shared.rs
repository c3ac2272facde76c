//! Shared adapter: one definition driving many external objects.

use crate::core::{Event, EventArgs, State};
use crate::engine::{Definition, Host, MachineError, StateSlot, StepResult, DEFAULT_STARTUP_EVENT};
use crate::hooks::Hooks;
use std::sync::Arc;

/// Accessor pair designating the [`StateSlot`] field of an object.
pub struct StateField<S: State, E: Event, M> {
    get: fn(&M) -> &StateSlot<S, E>,
    get_mut: fn(&mut M) -> &mut StateSlot<S, E>,
}

impl<S: State, E: Event, M> StateField<S, E, M> {
    pub fn new(get: fn(&M) -> &StateSlot<S, E>, get_mut: fn(&mut M) -> &mut StateSlot<S, E>) -> Self {
        Self { get, get_mut }
    }

    pub fn get<'a>(&self, object: &'a M) -> &'a StateSlot<S, E> {
        (self.get)(object)
    }

    pub fn get_mut<'a>(&self, object: &'a mut M) -> &'a mut StateSlot<S, E> {
        (self.get_mut)(object)
    }
}

impl<S: State, E: Event, M> Clone for StateField<S, E, M> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S: State, E: Event, M> Copy for StateField<S, E, M> {}

/// An object seen through its state field.
struct Projected<'a, S: State, E: Event, M> {
    object: &'a mut M,
    field: StateField<S, E, M>,
}

impl<S: State, E: Event, M> Host<S, E, M> for Projected<'_, S, E, M> {
    fn slot(&self) -> &StateSlot<S, E> {
        self.field.get(&*self.object)
    }

    fn slot_mut(&mut self) -> &mut StateSlot<S, E> {
        self.field.get_mut(&mut *self.object)
    }

    fn model(&self) -> &M {
        &*self.object
    }

    fn model_mut(&mut self) -> &mut M {
        &mut *self.object
    }
}

/// A compiled definition bound to a state field.
///
/// The machine holds no per-object state: every operation takes the object,
/// whose [`StateSlot`] stores the current state and any pending transition.
/// Hooks without a registered callback go to the object's [`Hooks`] impl.
///
/// # Example
///
/// ```rust
/// use signalbox::builder::MachineBuilder;
/// use signalbox::engine::{Initial, StateSlot};
/// use signalbox::hooks::Hooks;
/// use signalbox::core::EventArgs;
///
/// #[derive(Default)]
/// struct Ticket {
///     state: StateSlot<String, String>,
/// }
///
/// impl Hooks<String, String> for Ticket {}
///
/// let machine = MachineBuilder::<String, String, Ticket>::for_model()
///     .initial(Initial::of("open".to_string()))
///     .event("close".to_string(), "open".to_string(), "closed".to_string())
///     .state_field(|t: &Ticket| &t.state, |t: &mut Ticket| &mut t.state)
///     .build_shared()
///     .unwrap();
///
/// let mut ticket = Ticket::default();
/// machine.startup(&mut ticket, EventArgs::new()).unwrap();
/// machine.trigger(&mut ticket, "close".to_string(), EventArgs::new()).unwrap();
/// assert!(machine.is_state(&ticket, &"closed".to_string()));
/// ```
pub struct SharedMachine<S: State, E: Event, M> {
    definition: Arc<Definition<S, E, M>>,
    field: StateField<S, E, M>,
}

impl<S: State, E: Event, M> Clone for SharedMachine<S, E, M> {
    fn clone(&self) -> Self {
        Self {
            definition: Arc::clone(&self.definition),
            field: self.field,
        }
    }
}

impl<S: State, E: Event, M: Hooks<S, E>> SharedMachine<S, E, M> {
    pub fn new(definition: Arc<Definition<S, E, M>>, field: StateField<S, E, M>) -> Self {
        Self { definition, field }
    }

    pub fn definition(&self) -> &Definition<S, E, M> {
        &self.definition
    }

    /// Fire the startup event for `object`.
    pub fn startup(&self, object: &mut M, args: EventArgs) -> Result<StepResult<S>, MachineError<S, E>> {
        let event = self
            .definition
            .initial()
            .map(|initial| initial.event.clone())
            .ok_or_else(|| MachineError::UnknownEvent {
                event: DEFAULT_STARTUP_EVENT.to_string(),
            })?;
        self.trigger(object, event, args)
    }

    /// Trigger `event` on `object`.
    pub fn trigger(
        &self,
        object: &mut M,
        event: E,
        args: EventArgs,
    ) -> Result<StepResult<S>, MachineError<S, E>> {
        let mut host = self.project(object);
        self.definition.fire(&mut host, &event, args)
    }

    /// Complete the transition suspended on `object`.
    pub fn transition(&self, object: &mut M) -> Result<StepResult<S>, MachineError<S, E>> {
        let mut host = self.project(object);
        self.definition.resume(&mut host)
    }

    pub fn slot<'a>(&self, object: &'a M) -> &'a StateSlot<S, E> {
        self.field.get(object)
    }

    pub fn current<'a>(&self, object: &'a M) -> Option<&'a S> {
        self.slot(object).current()
    }

    pub fn is_state(&self, object: &M, state: &S) -> bool {
        self.slot(object).is_state(state)
    }

    pub fn can(&self, object: &M, event: &E) -> bool {
        self.definition.can(self.slot(object), event)
    }

    pub fn cannot(&self, object: &M, event: &E) -> bool {
        !self.can(object, event)
    }

    pub fn is_finished(&self, object: &M) -> bool {
        self.definition.is_finished(self.slot(object))
    }

    pub fn is_pending(&self, object: &M) -> bool {
        self.slot(object).is_pending()
    }

    fn project<'a>(&self, object: &'a mut M) -> Projected<'a, S, E, M> {
        Projected {
            object,
            field: self.field,
        }
    }
}
