//! A calculator host with a memory register.
//!
//! It mixes every kind of callable the registry accepts: a free function, static
//! methods, methods on the host and closures. Integer commands report overflow
//! and `div` reports division by zero instead of panicking.

use crate::interpreter::CommandSet;
use crate::registry::Registry;

/// Add two integers, failing instead of wrapping on overflow.
pub fn add(x: i32, y: i32) -> Result<i32, Overflow> {
    x.checked_add(y).ok_or(Overflow)
}

/// Calculator state kept between evaluations.
#[derive(Debug, Default)]
pub struct Arithmetic {
    memory: f64,
}

#[derive(Debug, thiserror::Error)]
#[error("division by zero")]
pub struct DivisionByZero;

#[derive(Debug, thiserror::Error)]
#[error("integer overflow")]
pub struct Overflow;

impl Arithmetic {
    pub fn memory(&self) -> f64 {
        self.memory
    }

    fn inc(x: i32) -> Result<i32, Overflow> {
        x.checked_add(1).ok_or(Overflow)
    }

    fn div(x: f64, y: f64) -> Result<f64, DivisionByZero> {
        if y == 0.0 { Err(DivisionByZero) } else { Ok(x / y) }
    }

    fn store(&mut self, value: f64) -> f64 {
        self.memory = value;
        self.memory
    }

    fn accumulate(&mut self, value: f64) -> f64 {
        self.memory += value;
        self.memory
    }

    fn clear(&mut self) {
        self.memory = 0.0;
    }
}

impl CommandSet for Arithmetic {
    fn register_commands(&self, registry: &mut Registry<Self>) {
        registry
            .function("add", "Add two numbers", add)
            .function("inc", "Increment a number", Arithmetic::inc)
            .function("div", "Divide two numbers", Arithmetic::div)
            .function("mean3", "Mean of three numbers", |a: f64, b: f64, c: f64| {
                (a + b + c) / 3.0
            })
            .method("store", "Store a number in memory", Arithmetic::store)
            .method("acc", "Add a number to memory", Arithmetic::accumulate)
            .method("recall", "Show the number in memory", |a: &mut Arithmetic| a.memory)
            .method("clear", "Reset memory to zero", Arithmetic::clear);
    }
}
