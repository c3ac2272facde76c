//! Build errors for machine and rule builders.

use std::fmt;
use thiserror::Error;

/// Errors that can occur when building machine definitions and rules.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum BuildError {
    #[error("Rule for event '{event}' has no destination. Call .to(state) or .to_same()")]
    MissingTarget { event: String },

    #[error("Rule for event '{event}' declares an empty source set")]
    EmptySource { event: String },

    #[error("Guard {index} of event '{event}' has no outcomes. Call .on(..) or .otherwise(..)")]
    EmptyGuard { event: String, index: usize },

    #[error("Unrecognised hook identifier '{0}'")]
    UnknownHook(String),

    #[error("No state field designated. Call .state_field(get, get_mut) before .build_shared()")]
    MissingStateField,

    #[error("{0}")]
    Multiple(ErrorList),
}

impl BuildError {
    /// Collapse accumulated errors: one error stays as is, several become
    /// `Multiple`.
    pub(crate) fn collect(mut errors: Vec<BuildError>) -> Self {
        if errors.len() == 1 {
            errors.remove(0)
        } else {
            Self::Multiple(ErrorList(errors))
        }
    }

    /// Every individual error, flattening `Multiple`.
    pub fn errors(&self) -> Vec<&BuildError> {
        match self {
            Self::Multiple(list) => list.0.iter().collect(),
            other => vec![other],
        }
    }
}

/// Several build errors reported together.
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorList(pub Vec<BuildError>);

impl fmt::Display for ErrorList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} build errors:", self.0.len())?;
        for error in &self.0 {
            write!(f, "\n  - {error}")?;
        }
        Ok(())
    }
}
