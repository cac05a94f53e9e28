//! Fixed-rate tick accumulator.

use crate::Fp;

/// Converts elapsed wall time into whole simulation ticks.
///
/// Leftover time carries over to the next call. At most `max_frameskip` ticks are handed out per
/// `advance`, any further backlog waits for later calls.
#[derive(Debug, Clone)]
pub struct TickClock {
    tick_length: f64,
    max_frameskip: u32,
    accumulated: f64,
    ticks: u64,
}

impl TickClock {
    pub fn new(ticks_per_second: u32, max_frameskip: u32) -> TickClock {
        assert!(ticks_per_second > 0, "tick rate must be positive");
        let tick_length = 1.0 / ticks_per_second as f64;
        log::debug!(
            "clock running at {} ticks/second ({}s/tick), with a max frame skip of {}",
            ticks_per_second,
            tick_length,
            max_frameskip
        );
        TickClock {
            tick_length,
            max_frameskip,
            accumulated: 0.0,
            ticks: 0,
        }
    }

    /// Seconds per tick.
    #[inline]
    pub fn tick_length(&self) -> Fp {
        self.tick_length as Fp
    }
    /// Total ticks handed out so far.
    #[inline]
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn advance(&mut self, elapsed: f64) -> u32 {
        //! Accounts for `elapsed` seconds and returns how many ticks to run now.
        self.accumulated += elapsed.max(0.0);

        let mut due = 0;
        while self.accumulated >= self.tick_length && due < self.max_frameskip {
            self.accumulated -= self.tick_length;
            due += 1;
        }
        if self.accumulated >= self.tick_length {
            log::debug!("frame skip limit hit, {:.3}s of ticks behind", self.accumulated);
        }

        self.ticks += due as u64;
        due
    }

    pub fn interpolation(&self) -> f64 {
        //! How far into the next tick the accumulated time is, for rendering between ticks.
        (self.accumulated / self.tick_length).min(1.0)
    }
}
