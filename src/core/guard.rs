//! Guard predicates for controlling and branching transitions.
//!
//! A guard pairs a predicate with an outcome map. The predicate's result is
//! looked up in the map to decide whether the transition proceeds to its
//! declared destination, is redirected to another one, or is refused.

use super::context::EventContext;
use super::state::{Event, State};

/// Destination of a rule or guard outcome.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Target<S> {
    /// A concrete destination state.
    State(S),
    /// Whatever state the machine is in when the event fires.
    Same,
}

impl<S: State> Target<S> {
    /// Resolve against the current state. `Same` has no meaning for an
    /// unstarted machine and resolves to `None` there.
    pub fn resolve(&self, current: Option<&S>) -> Option<S> {
        match self {
            Self::State(state) => Some(state.clone()),
            Self::Same => current.cloned(),
        }
    }
}

impl<S> From<S> for Target<S> {
    fn from(state: S) -> Self {
        Self::State(state)
    }
}

/// What a guard does with one predicate result.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome<S> {
    /// Keep the rule's declared destination and let later guards run.
    Proceed,
    /// Use this destination instead; no further guards run.
    Goto(Target<S>),
}

/// Result of evaluating a single guard.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Verdict<S> {
    Proceed,
    Goto(Target<S>),
    /// A bare predicate was not satisfied.
    Refused,
    /// An explicit outcome map had no entry for the result and no fallback.
    Unmatched(bool),
}

/// Result of running a rule's whole guard list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Resolution<S> {
    Declared,
    Redirect(Target<S>),
    Refused,
    Unmatched { index: usize, value: bool },
}

type Predicate<S, E, M> = Box<dyn Fn(&M, &EventContext<S, E>) -> bool + Send + Sync>;

/// Predicate plus outcome map attached to a transition rule.
///
/// Predicates see the application model `M` and the attempted
/// [`EventContext`], whose `dst` is the rule's declared destination.
///
/// # Example
///
/// ```rust
/// use signalbox::core::{EventArgs, EventContext, Guard, Verdict};
///
/// let guard: Guard<String, String, u32> = Guard::new(|budget: &u32, _ctx| *budget > 10);
/// let ctx = EventContext::new(
///     "spend".to_string(),
///     Some("idle".to_string()),
///     "busy".to_string(),
///     EventArgs::new(),
/// );
///
/// assert!(guard.check(&20, &ctx));
/// assert_eq!(guard.evaluate(&20, &ctx), Verdict::Proceed);
/// assert_eq!(guard.evaluate(&5, &ctx), Verdict::Refused);
/// ```
pub struct Guard<S: State, E: Event, M> {
    predicate: Predicate<S, E, M>,
    outcomes: Vec<(bool, Outcome<S>)>,
    otherwise: Option<Outcome<S>>,
    strict: bool,
}

impl<S: State, E: Event, M> Guard<S, E, M> {
    /// Bare predicate: `true` proceeds, anything else refuses the transition.
    pub fn new<F>(predicate: F) -> Self
    where
        F: Fn(&M, &EventContext<S, E>) -> bool + Send + Sync + 'static,
    {
        Guard {
            predicate: Box::new(predicate),
            outcomes: vec![(true, Outcome::Proceed)],
            otherwise: None,
            strict: false,
        }
    }

    /// Predicate with an explicit outcome map, filled with [`Guard::on`] and
    /// [`Guard::otherwise`]. A result without a matching entry is a
    /// configuration error rather than a refusal.
    pub fn branch<F>(predicate: F) -> Self
    where
        F: Fn(&M, &EventContext<S, E>) -> bool + Send + Sync + 'static,
    {
        Guard {
            predicate: Box::new(predicate),
            outcomes: Vec::new(),
            otherwise: None,
            strict: true,
        }
    }

    /// Map a predicate result to an outcome. Later entries for the same
    /// value replace earlier ones.
    pub fn on(mut self, value: bool, outcome: Outcome<S>) -> Self {
        self.outcomes.retain(|(key, _)| *key != value);
        self.outcomes.push((value, outcome));
        self
    }

    /// Redirect to `state` when the predicate returns `value`.
    pub fn goto_on(self, value: bool, state: S) -> Self {
        self.on(value, Outcome::Goto(Target::State(state)))
    }

    /// Fallback outcome for results with no entry of their own.
    pub fn otherwise(mut self, outcome: Outcome<S>) -> Self {
        self.otherwise = Some(outcome);
        self
    }

    /// Redirect to `state` for results with no entry of their own.
    pub fn otherwise_goto(self, state: S) -> Self {
        self.otherwise(Outcome::Goto(Target::State(state)))
    }

    /// True when the outcome map and fallback are both empty.
    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty() && self.otherwise.is_none()
    }

    /// Evaluate the bare predicate.
    pub fn check(&self, model: &M, ctx: &EventContext<S, E>) -> bool {
        (self.predicate)(model, ctx)
    }

    /// Evaluate the predicate and look its result up in the outcome map.
    pub fn evaluate(&self, model: &M, ctx: &EventContext<S, E>) -> Verdict<S> {
        let value = self.check(model, ctx);
        let outcome = self
            .outcomes
            .iter()
            .find(|(key, _)| *key == value)
            .map(|(_, outcome)| outcome)
            .or(self.otherwise.as_ref());

        match outcome {
            Some(Outcome::Proceed) => Verdict::Proceed,
            Some(Outcome::Goto(target)) => Verdict::Goto(target.clone()),
            None if self.strict => Verdict::Unmatched(value),
            None => Verdict::Refused,
        }
    }
}

/// Run a guard list in order.
///
/// The first guard that redirects decides the destination, the first guard
/// that refuses or misses stops resolution, and a list where every guard
/// proceeds (or an empty list) keeps the declared destination.
pub fn resolve<S: State, E: Event, M>(
    guards: &[Guard<S, E, M>],
    model: &M,
    ctx: &EventContext<S, E>,
) -> Resolution<S> {
    for (index, guard) in guards.iter().enumerate() {
        match guard.evaluate(model, ctx) {
            Verdict::Proceed => continue,
            Verdict::Goto(target) => return Resolution::Redirect(target),
            Verdict::Refused => return Resolution::Refused,
            Verdict::Unmatched(value) => return Resolution::Unmatched { index, value },
        }
    }
    Resolution::Declared
}
