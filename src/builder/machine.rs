//! Builder for constructing machine definitions.

use crate::builder::error::BuildError;
use crate::builder::rule::RuleBuilder;
use crate::builder::validate;
use crate::core::{Event, EventContext, Rule, Source, State, Target, TransitionTable};
use crate::engine::{Definition, Initial, StateSlot};
use crate::hooks::{Callback, Callbacks, Hook, HookResult, Hooks};
use crate::machine::{SharedMachine, StateField};
use std::sync::Arc;
use stillwater::validation::Validation;

enum HookKey<S, E> {
    Typed(Hook<S, E>),
    Named(String),
}

/// Builder for machine definitions with a fluent API.
///
/// Problems with individual rules and hook names are collected and reported
/// together by [`build`](MachineBuilder::build).
pub struct MachineBuilder<S: State, E: Event, M = ()> {
    rules: Vec<Result<Rule<S, E, M>, BuildError>>,
    initial: Option<Initial<S, E>>,
    final_state: Option<S>,
    callbacks: Vec<(HookKey<S, E>, Callback<S, E, M>)>,
    track_history: bool,
    state_field: Option<StateField<S, E, M>>,
}

impl<S: State, E: Event> MachineBuilder<S, E, ()> {
    /// Create a builder for a machine without an application model.
    pub fn new() -> Self {
        Self::for_model()
    }
}

impl<S: State, E: Event> Default for MachineBuilder<S, E, ()> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: State, E: Event, M> MachineBuilder<S, E, M> {
    /// Create a builder whose guards and hooks see a model of type `M`.
    pub fn for_model() -> Self {
        Self {
            rules: Vec::new(),
            initial: None,
            final_state: None,
            callbacks: Vec::new(),
            track_history: false,
            state_field: None,
        }
    }

    /// Declare `event` taking `from` to `to`.
    pub fn event(self, event: E, from: S, to: S) -> Self {
        self.add_rule(Rule::from((event, from, to)))
    }

    /// Add a rule from a builder. Build errors are reported by `build()`.
    pub fn rule(mut self, builder: RuleBuilder<S, E, M>) -> Self {
        self.rules.push(builder.build());
        self
    }

    /// Add a pre-built rule.
    pub fn add_rule(mut self, rule: Rule<S, E, M>) -> Self {
        self.rules.push(Ok(rule));
        self
    }

    /// Add several rules, e.g. `(event, from, to)` tuples.
    pub fn rules<R>(mut self, rules: impl IntoIterator<Item = R>) -> Self
    where
        R: Into<Rule<S, E, M>>,
    {
        self.rules.extend(rules.into_iter().map(|rule| Ok(rule.into())));
        self
    }

    pub fn initial(mut self, initial: Initial<S, E>) -> Self {
        self.initial = Some(initial);
        self
    }

    pub fn final_state(mut self, state: S) -> Self {
        self.final_state = Some(state);
        self
    }

    /// Register a callback for `hook`. A later registration for the same
    /// hook replaces an earlier one.
    pub fn on<F>(mut self, hook: Hook<S, E>, callback: F) -> Self
    where
        F: Fn(&mut M, &EventContext<S, E>) -> HookResult + Send + Sync + 'static,
    {
        self.callbacks.push((HookKey::Typed(hook), Box::new(callback)));
        self
    }

    /// Register a callback by identifier, e.g. `"on_enter_green"` or `"warn"`.
    /// See [`Hook::parse`] for the accepted forms. A bare-name alias is only
    /// used when no explicit form is registered for the same hook.
    pub fn on_named<F>(mut self, identifier: impl Into<String>, callback: F) -> Self
    where
        F: Fn(&mut M, &EventContext<S, E>) -> HookResult + Send + Sync + 'static,
    {
        self.callbacks
            .push((HookKey::Named(identifier.into()), Box::new(callback)));
        self
    }

    /// Record completed transitions in each state slot's history.
    pub fn track_history(mut self) -> Self {
        self.track_history = true;
        self
    }

    /// Designate the state field of objects driven by a shared machine.
    pub fn state_field(
        mut self,
        get: fn(&M) -> &StateSlot<S, E>,
        get_mut: fn(&mut M) -> &mut StateSlot<S, E>,
    ) -> Self {
        self.state_field = Some(StateField::new(get, get_mut));
        self
    }

    /// Build the definition, reporting every structural problem at once.
    pub fn build(self) -> Result<Definition<S, E, M>, BuildError> {
        self.compile(Vec::new()).map(|(definition, _)| definition)
    }

    /// Build a shared machine. Requires [`state_field`](Self::state_field).
    pub fn build_shared(self) -> Result<SharedMachine<S, E, M>, BuildError>
    where
        M: Hooks<S, E>,
    {
        let checks = vec![validate::present(
            self.state_field.as_ref(),
            BuildError::MissingStateField,
        )];
        let (definition, field) = self.compile(checks)?;
        let field = field.ok_or(BuildError::MissingStateField)?;
        Ok(SharedMachine::new(Arc::new(definition), field))
    }

    fn compile(
        self,
        mut checks: Vec<validate::Checked>,
    ) -> Result<(Definition<S, E, M>, Option<StateField<S, E, M>>), BuildError> {
        let mut rules = Vec::with_capacity(self.rules.len() + 1);
        if let Some(initial) = &self.initial {
            rules.push(Rule::new(
                initial.event.clone(),
                Source::Uninitialized,
                Target::State(initial.state.clone()),
            ));
        }
        for rule in self.rules {
            match rule {
                Ok(rule) => {
                    checks.push(validate::rule(&rule));
                    rules.push(rule);
                }
                Err(error) => checks.push(Validation::fail(error)),
            }
        }
        let table = TransitionTable::new(rules);

        // Aliases go in first so explicit forms replace them regardless of
        // registration order.
        let mut aliases = Vec::new();
        let mut explicit = Vec::new();
        for (key, callback) in self.callbacks {
            match key {
                HookKey::Typed(hook) => explicit.push((hook, callback)),
                HookKey::Named(identifier) => match Hook::parse_alias(&identifier, table.events()) {
                    Some((hook, true)) => aliases.push((hook, callback)),
                    Some((hook, false)) => explicit.push((hook, callback)),
                    None => checks.push(Validation::fail(BuildError::UnknownHook(identifier))),
                },
            }
        }
        let mut callbacks = Callbacks::new();
        for (hook, callback) in aliases.into_iter().chain(explicit) {
            callbacks.insert_boxed(hook, callback);
        }

        validate::finish(checks)?;

        tracing::debug!(
            rules = table.len(),
            events = table.events().len(),
            callbacks = callbacks.len(),
            "machine definition built"
        );

        let definition = Definition {
            table,
            callbacks,
            initial: self.initial,
            final_state: self.final_state,
            track_history: self.track_history,
        };
        Ok((definition, self.state_field))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{EventArgs, Guard};
    use crate::hooks::Flow;

    type Builder = MachineBuilder<String, String>;

    fn s(name: &str) -> String {
        name.to_string()
    }

    fn ok(_: &mut (), _: &EventContext<String, String>) -> HookResult {
        Ok(Flow::Continue)
    }

    #[test]
    fn builds_table_in_declaration_order() {
        let definition = Builder::new()
            .event(s("warn"), s("green"), s("yellow"))
            .rules(vec![
                (s("panic"), vec![s("green"), s("yellow")], s("red")),
                (s("clear"), vec![s("red")], s("green")),
            ])
            .build()
            .unwrap();

        assert_eq!(definition.events(), &[s("warn"), s("panic"), s("clear")]);
        assert_eq!(definition.table().len(), 3);
        assert!(definition.initial().is_none());
    }

    #[test]
    fn initial_state_synthesizes_startup_rule() {
        let definition = Builder::new()
            .initial(Initial::of(s("green")))
            .event(s("warn"), s("green"), s("yellow"))
            .build()
            .unwrap();

        assert_eq!(definition.events()[0], "init");
        let startup = definition.table().rules().next().unwrap();
        assert_eq!(startup.source(), &Source::Uninitialized);
        assert_eq!(startup.target(), &Target::State(s("green")));
    }

    #[test]
    fn named_hooks_resolve_against_declared_events() {
        let definition = Builder::new()
            .event(s("warn"), s("green"), s("yellow"))
            .on_named("warn", ok)
            .on_named("on_before_warn", ok)
            .on_named("green", ok)
            .on_named("change_state", ok)
            .build()
            .unwrap();

        let callbacks = definition.callbacks();
        assert_eq!(callbacks.len(), 4);
        assert!(callbacks.contains(&Hook::After(s("warn"))));
        assert!(callbacks.contains(&Hook::Before(s("warn"))));
        assert!(callbacks.contains(&Hook::Enter(s("green"))));
        assert!(callbacks.contains(&Hook::ChangeState));
    }

    #[test]
    fn later_registration_replaces_earlier() {
        let definition = Builder::new()
            .event(s("warn"), s("green"), s("yellow"))
            .on(Hook::After(s("warn")), ok)
            .on_named("after_warn", |_, _| Ok(Flow::Cancel))
            .build()
            .unwrap();

        assert_eq!(definition.callbacks().len(), 1);
    }

    #[test]
    fn explicit_form_wins_over_alias_in_either_order() {
        let explicit_first = Builder::new()
            .event(s("warn"), s("green"), s("yellow"))
            .on_named("after_warn", ok)
            .on_named("warn", |_, _| Ok(Flow::Cancel))
            .on_named("enter_yellow", ok)
            .on_named("yellow", |_, _| Ok(Flow::Cancel))
            .build()
            .unwrap();
        let alias_first = Builder::new()
            .event(s("warn"), s("green"), s("yellow"))
            .on_named("warn", |_, _| Ok(Flow::Cancel))
            .on_named("after_warn", ok)
            .on(Hook::Enter(s("yellow")), ok)
            .on_named("on_yellow", |_, _| Ok(Flow::Cancel))
            .build()
            .unwrap();

        let ctx = EventContext::new(s("warn"), Some(s("green")), s("yellow"), EventArgs::new());
        for definition in [explicit_first, alias_first] {
            let callbacks = definition.callbacks();
            assert_eq!(callbacks.len(), 2);
            for hook in [Hook::After(s("warn")), Hook::Enter(s("yellow"))] {
                assert_eq!(callbacks.dispatch(&hook, &mut (), &ctx).unwrap(), Flow::Continue);
            }
        }
    }

    #[test]
    fn declared_on_prefixed_event_keeps_its_after_hook() {
        let definition = Builder::new()
            .event(s("on_time"), s("waiting"), s("done"))
            .on_named("on_time", ok)
            .build()
            .unwrap();

        assert!(definition.callbacks().contains(&Hook::After(s("on_time"))));
        assert!(!definition.callbacks().contains(&Hook::Enter(s("time"))));
    }

    #[test]
    fn all_problems_are_reported_together() {
        let err = Builder::new()
            .rule(RuleBuilder::new(s("warn")).from(s("green")))
            .rules(vec![(s("panic"), Vec::<String>::new(), s("red"))])
            .add_rule(
                Rule::from((s("calm"), s("red"), s("yellow")))
                    .with_guard(Guard::branch(|_, _| true)),
            )
            .on_named("before_", ok)
            .build()
            .err()
            .unwrap();

        let errors = err.errors();
        assert_eq!(errors.len(), 4);
        assert!(errors.contains(&&BuildError::MissingTarget { event: s("warn") }));
        assert!(errors.contains(&&BuildError::EmptySource { event: s("panic") }));
        assert!(errors.contains(&&BuildError::EmptyGuard {
            event: s("calm"),
            index: 0
        }));
        assert!(errors.contains(&&BuildError::UnknownHook(s("before_"))));
    }

    #[test]
    fn shared_machine_requires_state_field() {
        let result = Builder::new()
            .event(s("warn"), s("green"), s("yellow"))
            .build_shared();

        assert!(matches!(result, Err(BuildError::MissingStateField)));
    }
}
