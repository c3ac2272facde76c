//! Structural checks run by the machine builder.
//!
//! Checks use `Validation` so that every problem in a definition is reported
//! in one pass instead of stopping at the first.

use crate::builder::error::BuildError;
use crate::core::{Event, Rule, Source, State};
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

pub(crate) type Checked = Validation<(), NonEmptyVec<BuildError>>;

/// A rule needs a non-empty source set and guards with at least one outcome.
pub(crate) fn rule<S: State, E: Event, M>(rule: &Rule<S, E, M>) -> Checked {
    let mut checks = vec![source(rule)];
    checks.extend(rule.guards().iter().enumerate().map(|(index, guard)| {
        if guard.is_empty() {
            Validation::fail(BuildError::EmptyGuard {
                event: rule.event().name().to_string(),
                index,
            })
        } else {
            Validation::success(())
        }
    }));

    Validation::all_vec(checks).map(|_| ())
}

fn source<S: State, E: Event, M>(rule: &Rule<S, E, M>) -> Checked {
    match rule.source() {
        Source::States(states) if states.is_empty() => Validation::fail(BuildError::EmptySource {
            event: rule.event().name().to_string(),
        }),
        _ => Validation::success(()),
    }
}

/// Require a value that may be missing, e.g. the shared adapter's state field.
pub(crate) fn present<T>(value: Option<&T>, error: BuildError) -> Checked {
    match value {
        Some(_) => Validation::success(()),
        None => Validation::fail(error),
    }
}

/// Fold accumulated checks into a single result.
pub(crate) fn finish(checks: Vec<Checked>) -> Result<(), BuildError> {
    match Validation::all_vec(checks) {
        Validation::Success(_) => Ok(()),
        Validation::Failure(errors) => Err(BuildError::collect(errors.iter().cloned().collect())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Guard, Target};

    type TestRule = Rule<String, String, ()>;

    fn s(name: &str) -> String {
        name.to_string()
    }

    #[test]
    fn well_formed_rule_passes() {
        let rule: TestRule = Rule::from((s("warn"), s("green"), s("yellow")));
        assert!(super::rule(&rule).is_success());
    }

    #[test]
    fn empty_source_and_empty_guards_are_all_reported() {
        let rule: TestRule = Rule::new(s("warn"), Source::States(vec![]), Target::Same)
            .with_guard(Guard::new(|_, _| true))
            .with_guard(Guard::branch(|_, _| true))
            .with_guard(Guard::branch(|_, _| false));

        match super::rule(&rule) {
            Validation::Failure(errors) => {
                assert_eq!(errors.len(), 3);
                let errors: Vec<_> = errors.iter().cloned().collect();
                assert_eq!(
                    errors[0],
                    BuildError::EmptySource {
                        event: s("warn")
                    }
                );
                assert_eq!(
                    errors[2],
                    BuildError::EmptyGuard {
                        event: s("warn"),
                        index: 2
                    }
                );
            }
            Validation::Success(_) => panic!("expected failures"),
        }
    }

    #[test]
    fn finish_collapses_errors() {
        assert_eq!(finish(vec![Validation::success(())]), Ok(()));
        assert_eq!(
            finish(vec![present::<u8>(None, BuildError::MissingStateField)]),
            Err(BuildError::MissingStateField)
        );

        let err = finish(vec![
            Validation::fail(BuildError::UnknownHook(s("enter_blue"))),
            Validation::success(()),
            Validation::fail(BuildError::MissingStateField),
        ])
        .unwrap_err();
        assert_eq!(err.errors().len(), 2);
    }
}
