//! Traffic Light
//!
//! A cyclic three-state table stepped by a fixed tick count per state.
//!
//! Key concepts:
//! - Tick-counted dwell times kept inside the callbacks
//! - Configuration loaded from JSON
//! - Change hook used for reporting
//!
//! Run with: cargo run --example traffic_light

use statetable::{state_ids, StateTable, TableConfig};
use std::cell::Cell;
use std::rc::Rc;

state_ids! {
    enum Light {
        Red = 0x10,
        Green = 0x20,
        Yellow = 0x30,
    }
}

const CONFIG: &str = r#"{ "capacity": 3, "duplicates": "reject" }"#;

/// Callback that stays for `dwell` ticks and then requests `next`.
fn phase(dwell: u32, next: Light, request: &Rc<Cell<Option<Light>>>) -> impl FnMut() + 'static {
    let request = Rc::clone(request);
    let mut ticks = 0;
    move || {
        ticks += 1;
        if ticks == dwell {
            ticks = 0;
            request.set(Some(next));
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Traffic Light Example ===\n");

    let config = TableConfig::from_json(CONFIG)?;
    let request = Rc::new(Cell::new(None));
    let mut table = StateTable::with_config(&config);

    table.try_add(Light::Red, phase(4, Light::Green, &request))?;
    table.try_add(Light::Green, phase(3, Light::Yellow, &request))?;
    table.try_add(Light::Yellow, phase(1, Light::Red, &request))?;

    table.on_change(|prev, next| {
        let from = prev.and_then(|id| Light::try_from(id).ok());
        let to = Light::try_from(next).ok();
        println!("  {:?} -> {:?}", from, to);
    });
    table.try_set(Light::Red)?;

    for _ in 0..16 {
        table.run();
        if let Some(next) = request.take() {
            table.try_set(next)?;
        }
    }

    println!("\nTable: {} of {} slots used", table.len(), table.capacity());
    println!("\n=== Example Complete ===");
    Ok(())
}
