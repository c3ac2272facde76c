//! Compiled machine definition and the dispatch protocol.

use super::error::MachineError;
use super::slot::{PendingTransition, StateSlot};
use crate::core::{
    resolve, state_name, Event, EventArgs, EventContext, Resolution, State, StateTransition,
    TransitionTable,
};
use crate::hooks::{Callbacks, Flow, Hook, Hooks};
use chrono::Utc;

/// Default name of the synthesized startup event.
pub const DEFAULT_STARTUP_EVENT: &str = "init";

/// Initial state configuration.
///
/// The engine synthesizes a startup rule `event: none -> state`. Unless
/// `defer` is set, the embedded adapter fires it while being constructed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Initial<S, E> {
    pub state: S,
    pub event: E,
    pub defer: bool,
}

impl<S: State, E: Event> Initial<S, E> {
    pub fn new(state: S, event: E) -> Self {
        Self {
            state,
            event,
            defer: false,
        }
    }

    /// Leave the machine unstarted until the startup event is triggered.
    pub fn deferred(mut self) -> Self {
        self.defer = true;
        self
    }
}

impl<S: State, E: Event + From<&'static str>> Initial<S, E> {
    /// Initial state reached through the default `init` event.
    pub fn of(state: S) -> Self {
        Self::new(state, E::from(DEFAULT_STARTUP_EVENT))
    }
}

/// Outcome of a successful trigger or resume.
#[derive(Clone, Debug, PartialEq)]
pub enum StepResult<S: State> {
    /// The state changed (or was re-entered).
    Transitioned { from: Option<S>, to: S },
    /// A `Leave` hook suspended the transition; `transition()` completes it.
    Suspended { to: S },
}

impl<S: State> StepResult<S> {
    pub fn is_suspended(&self) -> bool {
        matches!(self, Self::Suspended { .. })
    }
}

/// Where the engine reads and writes state while dispatching.
///
/// The slot and the model may live in the same object (shared adapter), so
/// implementations hand out one borrow at a time.
pub(crate) trait Host<S: State, E: Event, M> {
    fn slot(&self) -> &StateSlot<S, E>;
    fn slot_mut(&mut self) -> &mut StateSlot<S, E>;
    fn model(&self) -> &M;
    fn model_mut(&mut self) -> &mut M;
}

/// Immutable machine definition: transition table, callbacks, initial and
/// final states. One definition can drive any number of state slots.
pub struct Definition<S: State, E: Event, M> {
    pub(crate) table: TransitionTable<S, E, M>,
    pub(crate) callbacks: Callbacks<S, E, M>,
    pub(crate) initial: Option<Initial<S, E>>,
    pub(crate) final_state: Option<S>,
    pub(crate) track_history: bool,
}

impl<S: State, E: Event, M: Hooks<S, E>> Definition<S, E, M> {
    pub fn table(&self) -> &TransitionTable<S, E, M> {
        &self.table
    }

    pub fn callbacks(&self) -> &Callbacks<S, E, M> {
        &self.callbacks
    }

    pub fn initial(&self) -> Option<&Initial<S, E>> {
        self.initial.as_ref()
    }

    pub fn final_state(&self) -> Option<&S> {
        self.final_state.as_ref()
    }

    /// Declared events, the startup event included.
    pub fn events(&self) -> &[E] {
        self.table.events()
    }

    /// Whether `event` could fire from `slot`: nothing pending and some rule
    /// applies. Guards are not evaluated.
    pub fn can(&self, slot: &StateSlot<S, E>, event: &E) -> bool {
        !slot.is_pending() && self.table.permits(event, slot.current())
    }

    /// Whether `slot` is in the configured final state.
    pub fn is_finished(&self, slot: &StateSlot<S, E>) -> bool {
        match (&self.final_state, slot.current()) {
            (Some(final_state), Some(current)) => final_state == current,
            _ => false,
        }
    }

    /// Run the dispatch protocol for `event`.
    pub(crate) fn fire<H>(
        &self,
        host: &mut H,
        event: &E,
        args: EventArgs,
    ) -> Result<StepResult<S>, MachineError<S, E>>
    where
        H: Host<S, E, M>,
    {
        if host.slot().is_pending() {
            return Err(MachineError::TransitionPending {
                event: event.name().to_string(),
            });
        }

        let ctx = self.select(host, event, args)?;

        self.before(host, &ctx)?;

        if let Some(src) = ctx.src.clone() {
            match self.dispatch(host, Hook::Leave(src), &ctx)? {
                Flow::Continue => {}
                Flow::Cancel => return Err(self.cancel(ctx)),
                Flow::Suspend => {
                    tracing::debug!(
                        event = ctx.event.name(),
                        from = ctx.src_name(),
                        to = ctx.dst.name(),
                        "transition suspended"
                    );
                    let to = ctx.dst.clone();
                    host.slot_mut().pending = Some(PendingTransition::new(ctx));
                    return Ok(StepResult::Suspended { to });
                }
            }
        }

        self.complete(host, ctx)
    }

    /// Complete a suspended transition.
    pub(crate) fn resume<H>(&self, host: &mut H) -> Result<StepResult<S>, MachineError<S, E>>
    where
        H: Host<S, E, M>,
    {
        let pending = host
            .slot_mut()
            .pending
            .take()
            .ok_or(MachineError::NothingPending)?;
        let ctx = pending.into_context();
        tracing::debug!(
            event = ctx.event.name(),
            from = ctx.src_name(),
            to = ctx.dst.name(),
            "resuming suspended transition"
        );
        self.complete(host, ctx)
    }

    /// Find the rule and destination for `event`: the first candidate whose
    /// guards do not refuse.
    fn select<H>(
        &self,
        host: &H,
        event: &E,
        args: EventArgs,
    ) -> Result<EventContext<S, E>, MachineError<S, E>>
    where
        H: Host<S, E, M>,
    {
        let current = host.slot().current().cloned();
        let candidates = self
            .table
            .candidates(event, current.as_ref())
            .ok_or_else(|| MachineError::UnknownEvent {
                event: event.name().to_string(),
            })?;

        let mut refused = None;
        for rule in candidates {
            let Some(declared) = rule.target.resolve(current.as_ref()) else {
                tracing::debug!(
                    event = event.name(),
                    "skipping rule whose destination needs a current state"
                );
                continue;
            };
            let mut ctx = EventContext::new(event.clone(), current.clone(), declared, args.clone());

            match resolve(&rule.guards, host.model(), &ctx) {
                Resolution::Declared => return Ok(ctx),
                Resolution::Redirect(target) => match target.resolve(current.as_ref()) {
                    Some(dst) => {
                        ctx.dst = dst;
                        return Ok(ctx);
                    }
                    None => {
                        tracing::debug!(
                            event = event.name(),
                            "guard redirect to the same state refused before startup"
                        );
                        refused.get_or_insert(ctx);
                    }
                },
                Resolution::Refused => {
                    refused.get_or_insert(ctx);
                }
                Resolution::Unmatched { index, value } => {
                    return Err(MachineError::UnmatchedOutcome {
                        event: event.name().to_string(),
                        index,
                        value,
                    });
                }
            }
        }

        match refused {
            Some(ctx) => Err(self.cancel(ctx)),
            None => Err(MachineError::NotPermitted {
                event: event.name().to_string(),
                state: state_name(current.as_ref()).to_string(),
            }),
        }
    }

    fn before<H>(&self, host: &mut H, ctx: &EventContext<S, E>) -> Result<(), MachineError<S, E>>
    where
        H: Host<S, E, M>,
    {
        match self.dispatch(host, Hook::Before(ctx.event.clone()), ctx)? {
            Flow::Continue => Ok(()),
            Flow::Cancel | Flow::Suspend => Err(self.cancel(ctx.clone())),
        }
    }

    /// Steps after the veto points: mutate, then enter/reenter, change_state
    /// and after hooks. Flows returned here are ignored.
    fn complete<H>(
        &self,
        host: &mut H,
        ctx: EventContext<S, E>,
    ) -> Result<StepResult<S>, MachineError<S, E>>
    where
        H: Host<S, E, M>,
    {
        let slot = host.slot_mut();
        slot.current = Some(ctx.dst.clone());
        if self.track_history {
            slot.history.push(StateTransition {
                event: ctx.event.clone(),
                from: ctx.src.clone(),
                to: ctx.dst.clone(),
                timestamp: Utc::now(),
            });
        }
        tracing::debug!(
            event = ctx.event.name(),
            from = ctx.src_name(),
            to = ctx.dst.name(),
            "state changed"
        );

        let entered = if ctx.is_reflexive() {
            Hook::Reenter(ctx.dst.clone())
        } else {
            Hook::Enter(ctx.dst.clone())
        };
        self.dispatch(host, entered, &ctx)?;
        self.dispatch(host, Hook::ChangeState, &ctx)?;
        self.dispatch(host, Hook::After(ctx.event.clone()), &ctx)?;

        Ok(StepResult::Transitioned {
            from: ctx.src,
            to: ctx.dst,
        })
    }

    fn dispatch<H>(
        &self,
        host: &mut H,
        hook: Hook<S, E>,
        ctx: &EventContext<S, E>,
    ) -> Result<Flow, MachineError<S, E>>
    where
        H: Host<S, E, M>,
    {
        self.callbacks
            .dispatch(&hook, host.model_mut(), ctx)
            .map_err(|source| MachineError::Hook {
                hook: hook.to_string(),
                source,
            })
    }

    fn cancel(&self, ctx: EventContext<S, E>) -> MachineError<S, E> {
        tracing::debug!(
            event = ctx.event.name(),
            from = ctx.src_name(),
            to = ctx.dst.name(),
            "transition cancelled"
        );
        MachineError::cancelled(ctx)
    }
}
