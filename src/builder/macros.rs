//! Macros for ergonomic machine declaration.

/// Generate a `State` implementation for a fieldless enum.
///
/// Variants are named after themselves, both for display and for hook
/// identifiers such as `enter_Done`.
///
/// # Example
///
/// ```
/// use signalbox::state_enum;
/// use signalbox::core::State;
///
/// state_enum! {
///     pub enum WorkflowState {
///         Start,
///         Processing,
///         Done,
///     }
/// }
///
/// assert_eq!(WorkflowState::Done.name(), "Done");
/// ```
#[macro_export]
macro_rules! state_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, serde::Serialize, serde::Deserialize)]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant
            ),*
        }

        impl $crate::core::State for $name {
            fn name(&self) -> &str {
                match self {
                    $(Self::$variant => stringify!($variant)),*
                }
            }
        }
    };
}

/// Generate an `Event` implementation for a fieldless enum.
///
/// # Example
///
/// ```
/// use signalbox::event_enum;
/// use signalbox::core::Event;
///
/// event_enum! {
///     pub enum Signal {
///         Warn,
///         Panic,
///     }
/// }
///
/// assert_eq!(Signal::Panic.name(), "Panic");
/// ```
#[macro_export]
macro_rules! event_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, serde::Serialize, serde::Deserialize)]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant
            ),*
        }

        impl $crate::core::Event for $name {
            fn name(&self) -> &str {
                match self {
                    $(Self::$variant => stringify!($variant)),*
                }
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use crate::core::{Event, State};
    use crate::hooks::Hook;

    state_enum! {
        enum TestState {
            Initial,
            Processing,
            Complete,
        }
    }

    event_enum! {
        enum TestEvent {
            Begin,
            Finish,
        }
    }

    #[test]
    fn state_enum_macro_generates_trait() {
        assert_eq!(TestState::Initial.name(), "Initial");
        assert_eq!(TestState::Complete.name(), "Complete");
    }

    #[test]
    fn event_enum_macro_generates_trait() {
        assert_eq!(TestEvent::Begin.name(), "Begin");
    }

    #[test]
    fn variants_are_addressable_by_hook_identifier() {
        let events = [TestEvent::Begin, TestEvent::Finish];
        let hook: Option<Hook<TestState, TestEvent>> = Hook::parse("enter_Processing", &events);
        assert_eq!(hook, Some(Hook::Enter(TestState::Processing)));
        assert_eq!(
            Hook::<TestState, TestEvent>::parse("Finish", &events),
            Some(Hook::After(TestEvent::Finish))
        );
    }

    #[test]
    fn state_enum_supports_visibility() {
        state_enum! {
            pub enum PublicState {
                A,
                B,
            }
        }

        assert_ne!(PublicState::A, PublicState::B);
    }
}
