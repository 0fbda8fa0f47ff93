//! Blinking LED
//!
//! A two-state table toggling a (simulated) output pin once per second.
//!
//! Key concepts:
//! - The application owns the table; no global instance
//! - Callbacks do their own timing against an elapsed-time source
//! - Callbacks request the next state through a shared cell that the main
//!   loop applies after each tick
//!
//! Run with: cargo run --example blink

use statetable::{state_ids, StateTable, StateTableBuilder};
use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

state_ids! {
    enum Led {
        On = 0x01,
        Off = 0x02,
    }
}

const PERIOD: Duration = Duration::from_millis(250);
const BLINKS: u32 = 6;

/// Stand-in for a digital output pin.
#[derive(Default)]
struct Pin {
    high: Cell<bool>,
    writes: Cell<u32>,
}

impl Pin {
    fn write(&self, high: bool) {
        self.high.set(high);
        self.writes.set(self.writes.get() + 1);
        println!("  pin 9 -> {}", if high { "HIGH" } else { "LOW" });
    }
}

/// Callback that waits out `PERIOD`, drives the pin, then asks for `next`.
fn toggle(
    pin: &Rc<Pin>,
    since: &Rc<Cell<Instant>>,
    request: &Rc<Cell<Option<Led>>>,
    level: bool,
    next: Led,
) -> impl FnMut() + 'static {
    let pin = Rc::clone(pin);
    let since = Rc::clone(since);
    let request = Rc::clone(request);
    move || {
        if since.get().elapsed() >= PERIOD {
            since.set(Instant::now());
            pin.write(level);
            request.set(Some(next));
        }
    }
}

fn build(pin: &Rc<Pin>, request: &Rc<Cell<Option<Led>>>) -> StateTable {
    let since = Rc::new(Cell::new(Instant::now()));

    let result = StateTableBuilder::new()
        .state(Led::On, toggle(pin, &since, request, true, Led::Off))
        .state(Led::Off, toggle(pin, &since, request, false, Led::On))
        .on_change(|prev, next| tracing::info!(?prev, %next, "led state changed"))
        .initial(Led::On)
        .build();

    match result {
        Ok(table) => table,
        Err(err) => {
            eprintln!("failed to build table: {err}");
            std::process::exit(1);
        }
    }
}

fn main() {
    tracing_subscriber::fmt::init();

    println!("=== Blink Example ===\n");

    let pin = Rc::new(Pin::default());
    let request = Rc::new(Cell::new(None));
    let mut table = build(&pin, &request);

    while pin.writes.get() < BLINKS {
        table.run();
        if let Some(next) = request.take() {
            table.set(next);
        }
        std::thread::sleep(Duration::from_millis(10));
    }

    println!("\nFinal state: {:?}", table.get_current().map(Led::try_from));
    println!("Pin is {}", if pin.high.get() { "HIGH" } else { "LOW" });

    println!("\n=== Example Complete ===");
}
