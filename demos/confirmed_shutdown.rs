//! Confirmed Shutdown
//!
//! This example demonstrates suspending a transition until it is confirmed.
//!
//! Key concepts:
//! - A `leave` hook returning `Flow::Suspend`
//! - Completing the transition later with `transition()`
//! - Events rejected while a transition is pending
//! - A `before` hook vetoing a transition
//!
//! Run with: cargo run --example confirmed_shutdown

use signalbox::builder::MachineBuilder;
use signalbox::core::EventArgs;
use signalbox::engine::{Initial, StepResult};
use signalbox::hooks::{Flow, Hook};

fn main() {
    println!("=== Confirmed Shutdown ===\n");

    let mut server = MachineBuilder::<String, String>::new()
        .initial(Initial::of("running".to_string()))
        .event("drain".to_string(), "running".to_string(), "draining".to_string())
        .event("stop".to_string(), "draining".to_string(), "stopped".to_string())
        .event("resume".to_string(), "draining".to_string(), "running".to_string())
        .on(Hook::Leave("draining".to_string()), |_, ctx| {
            if ctx.dst == "stopped" && ctx.get("force").is_none() {
                println!("  stop requested, waiting for operator confirmation");
                return Ok(Flow::Suspend);
            }
            Ok(Flow::Continue)
        })
        .on(Hook::Before("resume".to_string()), |_, ctx| {
            let allowed = ctx.get("ticket").is_some();
            println!("  resume requested, ticket present: {allowed}");
            Ok(if allowed { Flow::Continue } else { Flow::Cancel })
        })
        .final_state("stopped".to_string())
        .build()
        .unwrap()
        .start(())
        .unwrap();

    server.trigger("drain".to_string()).unwrap();
    println!("State: {:?}", server.current());

    match server.trigger("resume".to_string()) {
        Err(err) => println!("Resume refused: {err}"),
        Ok(_) => println!("Resume unexpectedly allowed"),
    }

    let step = server.trigger("stop".to_string()).unwrap();
    if let StepResult::Suspended { to } = &step {
        println!("Pending transition to '{to}'");
    }

    if let Err(err) = server.trigger_with("resume".to_string(), EventArgs::new().kwarg("ticket", 7)) {
        println!("While pending: {err}");
    }

    println!("Operator confirmed");
    server.transition().unwrap();
    println!("State: {:?}, finished: {}", server.current(), server.is_finished());

    println!("\n=== Example Complete ===");
}
