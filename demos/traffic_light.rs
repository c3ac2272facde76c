//! Traffic Light State Machine
//!
//! This example demonstrates a cyclic machine with a guarded branch.
//!
//! Key concepts:
//! - Typed states and events via `state_enum!` / `event_enum!`
//! - A guard that redirects `panic` to a different destination
//! - Enter and reenter hooks
//! - Final state reporting
//!
//! Run with: cargo run --example traffic_light

use signalbox::builder::{MachineBuilder, RuleBuilder};
use signalbox::core::{Event, Guard, Outcome, State};
use signalbox::engine::Initial;
use signalbox::hooks::{Flow, Hook};
use signalbox::{event_enum, state_enum};

state_enum! {
    enum Light {
        Green,
        Yellow,
        Red,
    }
}

event_enum! {
    enum Signal {
        Init,
        Warn,
        Panic,
        Calm,
        Clear,
    }
}

#[derive(Default)]
struct Junction {
    emergency: bool,
    changes: usize,
}

impl signalbox::Hooks<Light, Signal> for Junction {}

fn main() {
    println!("=== Traffic Light State Machine ===\n");

    let mut light = MachineBuilder::for_model()
        .initial(Initial::new(Light::Green, Signal::Init))
        .final_state(Light::Red)
        .event(Signal::Warn, Light::Green, Light::Yellow)
        .rule(
            RuleBuilder::new(Signal::Panic)
                .from_states([Light::Green, Light::Yellow])
                .to(Light::Red)
                .guard(
                    Guard::branch(|junction: &Junction, _| junction.emergency)
                        .on(true, Outcome::Proceed)
                        .otherwise_goto(Light::Yellow),
                ),
        )
        .event(Signal::Calm, Light::Red, Light::Yellow)
        .event(Signal::Clear, Light::Yellow, Light::Green)
        .on(Hook::ChangeState, |junction: &mut Junction, ctx| {
            junction.changes += 1;
            println!("  {} -> {} ({})", ctx.src_name(), ctx.dst.name(), ctx.event.name());
            Ok(Flow::Continue)
        })
        .on(Hook::Reenter(Light::Yellow), |_, _| {
            println!("  (still yellow, no emergency)");
            Ok(Flow::Continue)
        })
        .build()
        .unwrap()
        .start(Junction::default())
        .unwrap();

    println!("Transition sequence:");
    for signal in [Signal::Warn, Signal::Panic, Signal::Clear, Signal::Warn] {
        light.trigger(signal).unwrap();
    }

    light.model_mut().emergency = true;
    light.trigger(Signal::Panic).unwrap();

    println!("\nCurrent state: {:?}", light.current());
    println!("Finished: {}", light.is_finished());
    println!("Can clear from red: {}", light.can(&Signal::Clear));
    println!("State changes observed: {}", light.model().changes);

    println!("\n=== Example Complete ===");
}
