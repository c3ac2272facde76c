//! Property-based tests for machine dispatch.
//!
//! These tests use proptest to drive machines with random event sequences
//! and check them against a hand-written transition function.

use proptest::prelude::*;
use signalbox::builder::{MachineBuilder, RuleBuilder};
use signalbox::core::StateHistory;
use signalbox::engine::{Initial, MachineError};
use signalbox::hooks::Hook;
use signalbox::{event_enum, state_enum, StateMachine};

state_enum! {
    enum Appetite {
        Hungry,
        Satisfied,
        Full,
        Sick,
    }
}

event_enum! {
    enum Action {
        Init,
        Eat,
        Rest,
        Walk,
        Run,
        Fly,
    }
}

const STATES: [Appetite; 4] = [
    Appetite::Hungry,
    Appetite::Satisfied,
    Appetite::Full,
    Appetite::Sick,
];

const ACTIONS: [Action; 5] = [Action::Eat, Action::Rest, Action::Walk, Action::Run, Action::Fly];

fn arbitrary_action() -> impl Strategy<Value = Action> {
    prop::sample::select(ACTIONS.to_vec())
}

fn arbitrary_state() -> impl Strategy<Value = Appetite> {
    prop::sample::select(STATES.to_vec())
}

/// Expected destination, `None` when the event is not permitted.
fn expected(current: Appetite, action: Action) -> Option<Appetite> {
    use Appetite::*;
    match (action, current) {
        (Action::Eat, Hungry) => Some(Satisfied),
        (Action::Eat, Satisfied) => Some(Full),
        (Action::Eat, Full) => Some(Sick),
        (Action::Eat, Sick) => None,
        (Action::Rest, _) => Some(Hungry),
        (Action::Walk, state) => Some(state),
        (Action::Run, Hungry | Sick) => Some(current),
        (Action::Run, _) => Some(Hungry),
        (Action::Init | Action::Fly, _) => None,
    }
}

fn machine() -> StateMachine<Appetite, Action> {
    MachineBuilder::new()
        .initial(Initial::new(Appetite::Hungry, Action::Init))
        .track_history()
        .event(Action::Eat, Appetite::Hungry, Appetite::Satisfied)
        .event(Action::Eat, Appetite::Satisfied, Appetite::Full)
        .event(Action::Eat, Appetite::Full, Appetite::Sick)
        .rule(RuleBuilder::new(Action::Rest).to(Appetite::Hungry))
        .rule(RuleBuilder::new(Action::Walk).to_same())
        .rule(
            RuleBuilder::new(Action::Run)
                .from_states([Appetite::Hungry, Appetite::Sick])
                .to_same(),
        )
        .rule(RuleBuilder::new(Action::Run).to(Appetite::Hungry))
        .build()
        .unwrap()
        .start(())
        .unwrap()
}

proptest! {
    #[test]
    fn dispatch_matches_transition_function(
        actions in prop::collection::vec(arbitrary_action(), 0..30)
    ) {
        let mut machine = machine();
        let mut current = Appetite::Hungry;

        for action in actions {
            let result = machine.trigger(action);
            match expected(current, action) {
                Some(next) => {
                    prop_assert!(result.is_ok());
                    current = next;
                }
                None => {
                    let err = result.unwrap_err();
                    prop_assert!(err.is_invalid_transition());
                    let unknown = matches!(err, MachineError::UnknownEvent { .. });
                    prop_assert_eq!(unknown, action == Action::Fly);
                }
            }
            prop_assert_eq!(machine.current(), Some(&current));
        }
    }

    #[test]
    fn can_agrees_with_trigger_and_never_mutates(
        actions in prop::collection::vec(arbitrary_action(), 0..20),
        probe in arbitrary_action()
    ) {
        let mut machine = machine();
        for action in actions {
            let _ = machine.trigger(action);
        }

        let before = machine.current().copied();
        let first = machine.can(&probe);
        let second = machine.can(&probe);

        prop_assert_eq!(first, second);
        prop_assert_eq!(machine.current().copied(), before);
        prop_assert!(!machine.is_pending());
        prop_assert_eq!(first, machine.trigger(probe).is_ok());
    }

    #[test]
    fn history_path_follows_every_transition(
        actions in prop::collection::vec(arbitrary_action(), 0..20)
    ) {
        let mut machine = machine();
        let mut expected_path = vec![Appetite::Hungry];

        for action in actions {
            if machine.trigger(action).is_ok() {
                expected_path.push(*machine.current().unwrap());
            }
        }

        let path: Vec<Appetite> = machine.history().get_path().into_iter().copied().collect();
        prop_assert_eq!(path, expected_path);
        prop_assert!(machine.history().transitions()[0].is_startup());
    }

    #[test]
    fn hook_identifiers_parse_back(state in arbitrary_state(), action in arbitrary_action()) {
        let events = ACTIONS.to_vec();
        let hooks = [
            Hook::Before(action),
            Hook::After(action),
            Hook::Enter(state),
            Hook::Reenter(state),
            Hook::Leave(state),
            Hook::ChangeState,
        ];

        for hook in hooks {
            let parsed = Hook::<Appetite, Action>::parse(&hook.to_string(), &events);
            prop_assert_eq!(parsed, Some(hook));
        }
    }

    #[test]
    fn history_roundtrip_serialization(
        actions in prop::collection::vec(arbitrary_action(), 0..10)
    ) {
        let mut machine = machine();
        for action in actions {
            let _ = machine.trigger(action);
        }

        let json = serde_json::to_string(machine.history()).unwrap();
        let deserialized: StateHistory<Appetite, Action> = serde_json::from_str(&json).unwrap();

        prop_assert_eq!(machine.history(), &deserialized);
    }
}
