//! Builder for constructing transition rules.

use crate::builder::error::BuildError;
use crate::core::{Event, EventContext, Guard, Rule, Source, State, Target};

/// Builder for constructing rules with a fluent API.
///
/// A rule without any `from` call applies from every state (wildcard).
pub struct RuleBuilder<S: State, E: Event, M> {
    event: E,
    source: Option<Source<S>>,
    target: Option<Target<S>>,
    guards: Vec<Guard<S, E, M>>,
}

impl<S: State, E: Event, M> RuleBuilder<S, E, M> {
    /// Create a rule builder for `event`.
    pub fn new(event: E) -> Self {
        Self {
            event,
            source: None,
            target: None,
            guards: Vec::new(),
        }
    }

    /// Add a source state. Repeated calls build up the source set.
    pub fn from(mut self, state: S) -> Self {
        match &mut self.source {
            Some(Source::States(states)) => states.push(state),
            _ => self.source = Some(Source::States(vec![state])),
        }
        self
    }

    /// Set the source states.
    pub fn from_states(mut self, states: impl IntoIterator<Item = S>) -> Self {
        self.source = Some(Source::States(states.into_iter().collect()));
        self
    }

    /// Apply from every state without an explicit rule for this event.
    pub fn from_any(mut self) -> Self {
        self.source = Some(Source::Any);
        self
    }

    /// Set the destination state (required, or use `to_same`).
    pub fn to(mut self, state: S) -> Self {
        self.target = Some(Target::State(state));
        self
    }

    /// Stay in whatever state the machine is in.
    pub fn to_same(mut self) -> Self {
        self.target = Some(Target::Same);
        self
    }

    /// Add a guard. Guards are evaluated in the order they are added.
    pub fn guard(mut self, guard: Guard<S, E, M>) -> Self {
        self.guards.push(guard);
        self
    }

    /// Add a bare-predicate guard using a closure.
    pub fn when<F>(self, predicate: F) -> Self
    where
        F: Fn(&M, &EventContext<S, E>) -> bool + Send + Sync + 'static,
    {
        self.guard(Guard::new(predicate))
    }

    /// Build the rule.
    pub fn build(self) -> Result<Rule<S, E, M>, BuildError> {
        let target = self.target.ok_or_else(|| BuildError::MissingTarget {
            event: self.event.name().to_string(),
        })?;
        let source = self.source.unwrap_or(Source::Any);

        Ok(self
            .guards
            .into_iter()
            .fold(Rule::new(self.event, source, target), Rule::with_guard))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Outcome;

    type Builder = RuleBuilder<String, String, ()>;

    fn s(name: &str) -> String {
        name.to_string()
    }

    #[test]
    fn builder_requires_target() {
        let result = Builder::new(s("warn")).from(s("green")).build();

        assert!(matches!(result, Err(BuildError::MissingTarget { event }) if event == "warn"));
    }

    #[test]
    fn missing_source_is_wildcard() {
        let rule = Builder::new(s("rest")).to(s("hungry")).build().unwrap();
        assert_eq!(rule.source(), &Source::Any);
    }

    #[test]
    fn from_accumulates_source_states() {
        let rule = Builder::new(s("panic"))
            .from(s("green"))
            .from(s("yellow"))
            .to(s("red"))
            .build()
            .unwrap();

        assert_eq!(rule.source(), &Source::States(vec![s("green"), s("yellow")]));
        assert_eq!(rule.target(), &Target::State(s("red")));
    }

    #[test]
    fn from_after_from_any_restarts_the_set() {
        let rule = Builder::new(s("run")).from_any().from(s("sick")).to_same().build().unwrap();

        assert_eq!(rule.source(), &Source::States(vec![s("sick")]));
        assert_eq!(rule.target(), &Target::Same);
    }

    #[test]
    fn guards_keep_declaration_order() {
        let rule = Builder::new(s("panic"))
            .from_states([s("green"), s("yellow")])
            .to(s("red"))
            .when(|_, _| true)
            .guard(Guard::branch(|_, _| false).otherwise(Outcome::Proceed))
            .build()
            .unwrap();

        assert_eq!(rule.guards().len(), 2);
        assert!(!rule.guards()[0].is_empty());
        assert_eq!(rule.event(), "panic");
    }
}
