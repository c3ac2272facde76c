//! Builder API for ergonomic machine construction.
//!
//! This module provides fluent builders and macros for declaring machines
//! with minimal boilerplate while keeping states and events typed.

pub mod error;
pub mod machine;
pub mod macros;
pub mod rule;
mod validate;

pub use error::{BuildError, ErrorList};
pub use machine::MachineBuilder;
pub use rule::RuleBuilder;

use crate::core::{Event, EventContext, Guard, Rule, State};

/// Create an unguarded rule from a single source state.
///
/// # Example
///
/// ```
/// use signalbox::builder::simple_rule;
/// use signalbox::core::Rule;
///
/// let rule: Rule<String, String, ()> =
///     simple_rule("warn".to_string(), "green".to_string(), "yellow".to_string());
/// assert_eq!(rule.event(), "warn");
/// ```
pub fn simple_rule<S, E, M>(event: E, from: S, to: S) -> Rule<S, E, M>
where
    S: State,
    E: Event,
{
    Rule::from((event, from, to))
}

/// Create a rule guarded by a bare predicate over the model.
///
/// # Example
///
/// ```
/// use signalbox::builder::guarded_rule;
/// use signalbox::core::Rule;
///
/// struct Account {
///     balance: u32,
/// }
///
/// let rule: Rule<String, String, Account> = guarded_rule(
///     "withdraw".to_string(),
///     "open".to_string(),
///     "open".to_string(),
///     |account: &Account, _ctx| account.balance > 0,
/// );
/// assert_eq!(rule.guards().len(), 1);
/// ```
pub fn guarded_rule<S, E, M, F>(event: E, from: S, to: S, predicate: F) -> Rule<S, E, M>
where
    S: State,
    E: Event,
    F: Fn(&M, &EventContext<S, E>) -> bool + Send + Sync + 'static,
{
    simple_rule(event, from, to).with_guard(Guard::new(predicate))
}
