//! Transition rules and the immutable table indexing them by event.

use super::guard::{Guard, Target};
use super::state::{Event, State};
use std::collections::HashMap;

/// States a rule applies from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Source<S> {
    /// An explicit set of states.
    States(Vec<S>),
    /// Every started state that has no explicit rule for the event.
    Any,
    /// Only the sentinel state of a machine that was never started.
    Uninitialized,
}

impl<S: State> Source<S> {
    /// Whether the rule applies from `current`. Wildcards never match an
    /// unstarted machine.
    pub fn matches(&self, current: Option<&S>) -> bool {
        match (self, current) {
            (Self::States(states), Some(state)) => states.contains(state),
            (Self::Any, Some(_)) => true,
            (Self::Uninitialized, None) => true,
            _ => false,
        }
    }

    pub fn is_wildcard(&self) -> bool {
        matches!(self, Self::Any)
    }
}

/// One declared transition: event, source, destination and guards.
pub struct Rule<S: State, E: Event, M> {
    pub(crate) event: E,
    pub(crate) source: Source<S>,
    pub(crate) target: Target<S>,
    pub(crate) guards: Vec<Guard<S, E, M>>,
}

impl<S: State, E: Event, M> Rule<S, E, M> {
    pub fn new(event: E, source: Source<S>, target: Target<S>) -> Self {
        Self {
            event,
            source,
            target,
            guards: Vec::new(),
        }
    }

    /// Append a guard; guards run in the order they were added.
    pub fn with_guard(mut self, guard: Guard<S, E, M>) -> Self {
        self.guards.push(guard);
        self
    }

    pub fn event(&self) -> &E {
        &self.event
    }

    pub fn source(&self) -> &Source<S> {
        &self.source
    }

    pub fn target(&self) -> &Target<S> {
        &self.target
    }

    pub fn guards(&self) -> &[Guard<S, E, M>] {
        &self.guards
    }
}

impl<S: State, E: Event, M> From<(E, S, S)> for Rule<S, E, M> {
    fn from((event, from, to): (E, S, S)) -> Self {
        Rule::new(event, Source::States(vec![from]), Target::State(to))
    }
}

impl<S: State, E: Event, M> From<(E, Vec<S>, S)> for Rule<S, E, M> {
    fn from((event, from, to): (E, Vec<S>, S)) -> Self {
        Rule::new(event, Source::States(from), Target::State(to))
    }
}

/// Rules grouped by event, declaration order preserved within each event.
pub struct TransitionTable<S: State, E: Event, M> {
    rules: HashMap<E, Vec<Rule<S, E, M>>>,
    events: Vec<E>,
}

impl<S: State, E: Event, M> TransitionTable<S, E, M> {
    pub fn new(rules: impl IntoIterator<Item = Rule<S, E, M>>) -> Self {
        let mut table = Self {
            rules: HashMap::new(),
            events: Vec::new(),
        };
        for rule in rules {
            table.insert(rule);
        }
        table
    }

    pub(crate) fn insert(&mut self, rule: Rule<S, E, M>) {
        if !self.rules.contains_key(&rule.event) {
            self.events.push(rule.event.clone());
        }
        self.rules.entry(rule.event.clone()).or_default().push(rule);
    }

    /// Candidate rules for `event` from `current`.
    ///
    /// Returns `None` for an unknown event. Otherwise returns the rules whose
    /// explicit source matches, in declaration order, or the wildcard rules
    /// when no explicit rule matches.
    pub fn candidates(&self, event: &E, current: Option<&S>) -> Option<Vec<&Rule<S, E, M>>> {
        let rules = self.rules.get(event)?;

        let explicit: Vec<_> = rules
            .iter()
            .filter(|rule| !rule.source.is_wildcard() && rule.source.matches(current))
            .collect();
        if !explicit.is_empty() {
            return Some(explicit);
        }

        Some(
            rules
                .iter()
                .filter(|rule| rule.source.is_wildcard() && rule.source.matches(current))
                .collect(),
        )
    }

    /// Structural reachability: some rule for `event` applies from `current`.
    pub fn permits(&self, event: &E, current: Option<&S>) -> bool {
        self.rules
            .get(event)
            .is_some_and(|rules| rules.iter().any(|rule| rule.source.matches(current)))
    }

    pub fn contains_event(&self, event: &E) -> bool {
        self.rules.contains_key(event)
    }

    /// Events in the order they were first declared.
    pub fn events(&self) -> &[E] {
        &self.events
    }

    pub fn rules(&self) -> impl Iterator<Item = &Rule<S, E, M>> {
        self.events
            .iter()
            .filter_map(|event| self.rules.get(event))
            .flatten()
    }

    pub fn len(&self) -> usize {
        self.rules.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
