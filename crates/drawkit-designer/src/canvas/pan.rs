//! Middle-button panning driven by periodic ticks.
//!
//! The host owns the clock. While a pan is active it asks for the pending
//! generation and delivers ticks carrying it; a tick whose generation is not
//! the active one (a stale timer firing after release) does nothing.

use drawkit_core::constants::PAN_DIVISOR;

use crate::geometry::Point;

#[derive(Debug, Clone, Default)]
pub struct PanTimer {
    generation: u64,
    active: bool,
    press: Point,
    current: Point,
}

impl PanTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a pan at `press` (view coordinates). Returns its generation.
    pub fn start(&mut self, press: Point) -> u64 {
        self.generation = self.generation.wrapping_add(1);
        self.active = true;
        self.press = press;
        self.current = press;
        self.generation
    }

    pub fn update(&mut self, current: Point) {
        if self.active {
            self.current = current;
        }
    }

    pub fn stop(&mut self) {
        self.active = false;
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Generation the host should deliver with the next tick.
    pub fn pending(&self) -> Option<u64> {
        self.active.then_some(self.generation)
    }

    /// Scroll delta for a tick of `generation`, or `None` for a stale tick.
    pub fn tick(&self, generation: u64) -> Option<Point> {
        if !self.active || generation != self.generation {
            return None;
        }
        Some((self.current - self.press) * (1.0 / PAN_DIVISOR))
    }
}
