//! Embedded adapter: a machine that owns its state and model.

use crate::core::{Event, EventArgs, State, StateHistory};
use crate::engine::{
    Definition, Host, MachineError, PendingTransition, StateSlot, StepResult, DEFAULT_STARTUP_EVENT,
};
use crate::hooks::Hooks;
use std::sync::Arc;

struct Cell<S: State, E: Event, M> {
    slot: StateSlot<S, E>,
    model: M,
}

impl<S: State, E: Event, M> Host<S, E, M> for Cell<S, E, M> {
    fn slot(&self) -> &StateSlot<S, E> {
        &self.slot
    }

    fn slot_mut(&mut self) -> &mut StateSlot<S, E> {
        &mut self.slot
    }

    fn model(&self) -> &M {
        &self.model
    }

    fn model_mut(&mut self) -> &mut M {
        &mut self.model
    }
}

/// State machine owning its current state and an application model.
///
/// Guards and hooks receive the model; hooks without a registered callback
/// fall back to the model's [`Hooks`] impl.
///
/// # Example
///
/// ```rust
/// use signalbox::builder::MachineBuilder;
/// use signalbox::engine::Initial;
///
/// let mut light = MachineBuilder::<String, String>::new()
///     .initial(Initial::of("green".to_string()))
///     .event("warn".to_string(), "green".to_string(), "yellow".to_string())
///     .event("panic".to_string(), "yellow".to_string(), "red".to_string())
///     .build()
///     .unwrap()
///     .start(())
///     .unwrap();
///
/// assert_eq!(light.current(), Some(&"green".to_string()));
/// light.trigger("warn".to_string()).unwrap();
/// assert!(light.is_state(&"yellow".to_string()));
/// assert!(light.cannot(&"warn".to_string()));
/// ```
pub struct StateMachine<S: State, E: Event, M = ()> {
    definition: Arc<Definition<S, E, M>>,
    cell: Cell<S, E, M>,
}

impl<S: State, E: Event, M: Hooks<S, E>> StateMachine<S, E, M> {
    /// Create a machine for `model`.
    ///
    /// With a non-deferred initial state the startup event is fired here, so
    /// the initial `enter` and `change_state` hooks run before this returns.
    pub fn new(definition: Arc<Definition<S, E, M>>, model: M) -> Result<Self, MachineError<S, E>> {
        let startup = definition
            .initial()
            .filter(|initial| !initial.defer)
            .map(|initial| initial.event.clone());

        let mut machine = Self {
            definition,
            cell: Cell {
                slot: StateSlot::new(),
                model,
            },
        };
        if let Some(event) = startup {
            machine.trigger(event)?;
        }
        Ok(machine)
    }

    pub fn definition(&self) -> &Definition<S, E, M> {
        &self.definition
    }

    /// Current state, `None` until the machine is started.
    pub fn current(&self) -> Option<&S> {
        self.cell.slot.current()
    }

    pub fn is_state(&self, state: &S) -> bool {
        self.cell.slot.is_state(state)
    }

    /// Whether `event` could fire now. Guards are not evaluated.
    pub fn can(&self, event: &E) -> bool {
        self.definition.can(&self.cell.slot, event)
    }

    pub fn cannot(&self, event: &E) -> bool {
        !self.can(event)
    }

    pub fn is_finished(&self) -> bool {
        self.definition.is_finished(&self.cell.slot)
    }

    pub fn is_pending(&self) -> bool {
        self.cell.slot.is_pending()
    }

    pub fn pending(&self) -> Option<&PendingTransition<S, E>> {
        self.cell.slot.pending()
    }

    /// Transitions recorded so far. Empty unless history tracking is on.
    pub fn history(&self) -> &StateHistory<S, E> {
        self.cell.slot.history()
    }

    pub fn slot(&self) -> &StateSlot<S, E> {
        &self.cell.slot
    }

    pub fn model(&self) -> &M {
        &self.cell.model
    }

    pub fn model_mut(&mut self) -> &mut M {
        &mut self.cell.model
    }

    pub fn into_model(self) -> M {
        self.cell.model
    }

    pub fn trigger(&mut self, event: E) -> Result<StepResult<S>, MachineError<S, E>> {
        self.trigger_with(event, EventArgs::new())
    }

    pub fn trigger_with(&mut self, event: E, args: EventArgs) -> Result<StepResult<S>, MachineError<S, E>> {
        self.definition.fire(&mut self.cell, &event, args)
    }

    /// Complete a transition suspended by a `leave` hook.
    pub fn transition(&mut self) -> Result<StepResult<S>, MachineError<S, E>> {
        self.definition.resume(&mut self.cell)
    }

    /// Fire the startup event of a deferred initial state.
    pub fn startup(&mut self, args: EventArgs) -> Result<StepResult<S>, MachineError<S, E>> {
        let event = self
            .definition
            .initial()
            .map(|initial| initial.event.clone())
            .ok_or_else(|| MachineError::UnknownEvent {
                event: DEFAULT_STARTUP_EVENT.to_string(),
            })?;
        self.trigger_with(event, args)
    }
}

impl<S: State, E: Event, M: Hooks<S, E>> Definition<S, E, M> {
    /// Wrap the definition in a new embedded machine for `model`.
    pub fn start(self, model: M) -> Result<StateMachine<S, E, M>, MachineError<S, E>> {
        StateMachine::new(Arc::new(self), model)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::MachineBuilder;
    use crate::engine::Initial;
    use crate::hooks::{Flow, Hook};

    fn s(name: &str) -> String {
        name.to_string()
    }

    fn light(initial: Initial<String, String>) -> Definition<String, String, ()> {
        MachineBuilder::new()
            .initial(initial)
            .final_state(s("red"))
            .event(s("warn"), s("green"), s("yellow"))
            .event(s("panic"), s("yellow"), s("red"))
            .build()
            .unwrap()
    }

    #[test]
    fn non_deferred_initial_state_is_entered() {
        let machine = light(Initial::of(s("green"))).start(()).unwrap();

        assert!(machine.is_state(&s("green")));
        assert!(machine.can(&s("warn")));
        assert!(machine.cannot(&s("init")));
    }

    #[test]
    fn deferred_initial_state_waits_for_startup() {
        let mut machine = light(Initial::of(s("green")).deferred()).start(()).unwrap();

        assert_eq!(machine.current(), None);
        assert!(machine.cannot(&s("warn")));

        machine.startup(EventArgs::new()).unwrap();
        assert!(machine.is_state(&s("green")));
    }

    #[test]
    fn custom_startup_event() {
        let mut machine = light(Initial::new(s("green"), s("boot")).deferred())
            .start(())
            .unwrap();

        assert!(machine.can(&s("boot")));
        machine.trigger(s("boot")).unwrap();
        assert!(machine.is_state(&s("green")));
    }

    #[test]
    fn finished_in_final_state() {
        let mut machine = light(Initial::of(s("green"))).start(()).unwrap();
        assert!(!machine.is_finished());

        machine.trigger(s("warn")).unwrap();
        machine.trigger(s("panic")).unwrap();
        assert!(machine.is_finished());
    }

    #[test]
    fn hook_error_during_startup_fails_construction() {
        let definition = MachineBuilder::<String, String>::new()
            .initial(Initial::of(s("green")))
            .on(Hook::Enter(s("green")), |_, _| Err("no power".into()))
            .build()
            .unwrap();

        let err = definition.start(()).err().unwrap();
        assert!(matches!(err, MachineError::Hook { ref hook, .. } if hook == "enter_green"));
    }

    #[derive(Default)]
    struct Log(Vec<String>);

    impl Hooks<String, String> for Log {}

    #[test]
    fn model_is_reachable_from_hooks() {
        let definition = MachineBuilder::<String, String, Log>::for_model()
            .initial(Initial::of(s("green")))
            .event(s("warn"), s("green"), s("yellow"))
            .on(Hook::ChangeState, |log: &mut Log, ctx| {
                log.0.push(format!("{} -> {}", ctx.src_name(), crate::core::State::name(&ctx.dst)));
                Ok(Flow::Continue)
            })
            .build()
            .unwrap();

        let mut machine = definition.start(Log::default()).unwrap();
        machine.trigger(s("warn")).unwrap();

        assert_eq!(machine.into_model().0, vec!["none -> green", "green -> yellow"]);
    }
}
