#![allow(dead_code)]

use std::{cell::RefCell, rc::Rc};
use tether::MultiDelegate;

// ============================================================================
// Receivers
// ============================================================================

/// Records every integer it is asked to print.
#[derive(Default)]
pub struct Printer {
    pub printed: Vec<i32>,
}

impl Printer {
    pub fn shared() -> Rc<RefCell<Self>> {
        Rc::new(RefCell::new(Self::default()))
    }

    pub fn print_int(&mut self, value: i32) {
        self.printed.push(value);
    }

    pub fn describe(&self, n: i32, tag: String, times: i32) -> String {
        format!("{tag}{}", n * times)
    }
}

/// Hands out a fixed number through a `&self` method.
pub struct NumberSource {
    pub number: f32,
}

impl NumberSource {
    pub fn shared(number: f32) -> Rc<RefCell<Self>> {
        Rc::new(RefCell::new(Self { number }))
    }

    pub fn return_my_number(&self) -> f32 {
        self.number
    }

    pub fn return_scaled(&self, factor: f32) -> f32 {
        self.number * factor
    }
}

/// Collects names announced to it.
#[derive(Default)]
pub struct Audit {
    pub events: Vec<String>,
}

impl Audit {
    pub fn shared() -> Rc<RefCell<Self>> {
        Rc::new(RefCell::new(Self::default()))
    }

    pub fn record(&mut self, name: &'static str) {
        self.events.push(name.to_string());
    }

    pub fn record_tagged(&mut self, name: &'static str, tag: char) {
        self.events.push(format!("{name}{tag}"));
    }
}

// ============================================================================
// Owners
// ============================================================================

/// An object that announces its own destruction to its listeners.
pub struct Widget {
    pub name: &'static str,
    pub on_destroy: MultiDelegate<fn(&'static str)>,
}

impl Widget {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            on_destroy: MultiDelegate::new(),
        }
    }
}

impl Drop for Widget {
    fn drop(&mut self) {
        self.on_destroy.broadcast((self.name,));
    }
}
