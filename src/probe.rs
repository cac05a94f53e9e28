//! Diagnostic hook into the swept solver.

use crate::{shape::Rectanglef, swept::Sweep, Vector2f};
use log::Level;

/// A single obstacle found to constrain a sweep.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    /// Index of the obstacle in the order the solver was given them.
    pub index: usize,
    pub collider: Rectanglef,
    pub obstacle: Rectanglef,
    pub velocity: Vector2f,
    pub sweep: Sweep,
}

/// Observes the solver's contacts. Every method defaults to doing nothing.
pub trait Probe {
    fn contact(&mut self, contact: &Contact) {
        let _ = contact;
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NoProbe;
impl Probe for NoProbe {}

/// Forwards contacts to the `log` facade.
#[derive(Debug, Clone, Copy)]
pub struct LogProbe {
    pub level: Level,
}
impl Default for LogProbe {
    fn default() -> Self {
        LogProbe { level: Level::Trace }
    }
}
impl Probe for LogProbe {
    fn contact(&mut self, c: &Contact) {
        log::log!(
            self.level,
            "contact with obstacle #{} at {}: entry {} exit {}, velocity {}, collider {:?}, obstacle {:?}",
            c.index,
            c.sweep.time,
            c.sweep.entry,
            c.sweep.exit,
            c.velocity,
            c.collider,
            c.obstacle
        );
    }
}

impl<F: FnMut(&Contact)> Probe for F {
    fn contact(&mut self, contact: &Contact) {
        self(contact)
    }
}
