//! Shared Order Machine
//!
//! This example demonstrates one compiled definition driving many objects.
//!
//! Key concepts:
//! - `SharedMachine` reading state through a designated field
//! - Per-object startup and independent progress
//! - Hooks resolved on the object itself through the `Hooks` trait
//! - Registering hooks by identifier
//!
//! Run with: cargo run --example shared_orders

use signalbox::builder::MachineBuilder;
use signalbox::core::{EventArgs, EventContext};
use signalbox::engine::{Initial, StateSlot};
use signalbox::hooks::{Flow, Hook, HookResult, Hooks};
use signalbox::{event_enum, state_enum};

state_enum! {
    enum OrderState {
        Placed,
        Paid,
        Shipped,
        Cancelled,
    }
}

event_enum! {
    enum OrderEvent {
        Place,
        Pay,
        Ship,
        Cancel,
    }
}

struct Order {
    id: u32,
    state: StateSlot<OrderState, OrderEvent>,
    notes: Vec<String>,
}

impl Order {
    fn new(id: u32) -> Self {
        Self {
            id,
            state: StateSlot::new(),
            notes: Vec::new(),
        }
    }
}

impl Hooks<OrderState, OrderEvent> for Order {
    fn on_hook(
        &mut self,
        hook: &Hook<OrderState, OrderEvent>,
        _ctx: &EventContext<OrderState, OrderEvent>,
    ) -> HookResult {
        if let Hook::Enter(state) = hook {
            self.notes.push(format!("entered {state:?}"));
        }
        Ok(Flow::Continue)
    }
}

fn main() {
    println!("=== Shared Order Machine ===\n");

    let orders = MachineBuilder::for_model()
        .initial(Initial::new(OrderState::Placed, OrderEvent::Place))
        .final_state(OrderState::Shipped)
        .event(OrderEvent::Pay, OrderState::Placed, OrderState::Paid)
        .event(OrderEvent::Ship, OrderState::Paid, OrderState::Shipped)
        .rules(vec![(
            OrderEvent::Cancel,
            vec![OrderState::Placed, OrderState::Paid],
            OrderState::Cancelled,
        )])
        .on_named("on_enter_Cancelled", |order: &mut Order, ctx| {
            let reason = ctx.get("reason").and_then(|v| v.as_str()).unwrap_or("unknown");
            order.notes.push(format!("cancelled: {reason}"));
            Ok(Flow::Continue)
        })
        .state_field(|o: &Order| &o.state, |o: &mut Order| &mut o.state)
        .build_shared()
        .unwrap();

    let mut first = Order::new(1);
    let mut second = Order::new(2);
    orders.startup(&mut first, EventArgs::new()).unwrap();
    orders.startup(&mut second, EventArgs::new()).unwrap();

    orders.trigger(&mut first, OrderEvent::Pay, EventArgs::new()).unwrap();
    orders.trigger(&mut first, OrderEvent::Ship, EventArgs::new()).unwrap();
    orders
        .trigger(
            &mut second,
            OrderEvent::Cancel,
            EventArgs::new().kwarg("reason", "out of stock"),
        )
        .unwrap();

    for order in [&first, &second] {
        println!(
            "Order {}: {:?} (finished: {})",
            order.id,
            orders.current(order),
            orders.is_finished(order)
        );
        for note in &order.notes {
            println!("  - {note}");
        }
    }

    match orders.trigger(&mut second, OrderEvent::Ship, EventArgs::new()) {
        Err(err) => println!("\nShipping a cancelled order: {err}"),
        Ok(_) => println!("\nShipping a cancelled order unexpectedly succeeded"),
    }

    println!("\n=== Example Complete ===");
}
