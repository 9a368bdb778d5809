//! The blink control loop as a two-phase state machine.

use core::convert::Infallible;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

use crate::delay::DEFAULT_ITERATIONS_PER_US;
use crate::gpio::Pin;

/// Half of one blink period: how long each phase is held.
pub const DEFAULT_HALF_PERIOD_MS: u32 = 1000;

/// Which way the LED line is being driven.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Asserted,
    Deasserted,
}

impl Phase {
    /// The loop always opens by driving the line high.
    pub const INITIAL: Phase = Phase::Asserted;

    pub const fn next(self) -> Phase {
        match self {
            Phase::Asserted => Phase::Deasserted,
            Phase::Deasserted => Phase::Asserted,
        }
    }
}

/// Board-level knobs, fixed at build time by the firmware.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlinkConfig {
    pub pin: Pin,
    pub half_period_ms: u32,
    pub iterations_per_us: u32,
}

impl BlinkConfig {
    /// GPIO16, one second per phase, stock spin calibration.
    pub const DEFAULT: BlinkConfig = BlinkConfig {
        pin: Pin::LED,
        half_period_ms: DEFAULT_HALF_PERIOD_MS,
        iterations_per_us: DEFAULT_ITERATIONS_PER_US,
    };
}

impl Default for BlinkConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Alternates an output between [`Phase::Asserted`] and
/// [`Phase::Deasserted`], holding each for `half_period_ms`.
#[derive(Debug)]
pub struct Blinker<P, D> {
    led: P,
    delay: D,
    phase: Phase,
    half_period_ms: u32,
}

impl<P: OutputPin, D: DelayNs> Blinker<P, D> {
    pub fn new(led: P, delay: D, half_period_ms: u32) -> Self {
        Self {
            led,
            delay,
            phase: Phase::INITIAL,
            half_period_ms,
        }
    }

    /// Phase the next [`step`](Self::step) will apply.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Drive the line into the current phase, hold it, then advance.
    ///
    /// Returns the phase that was applied. If the pin reports an error the
    /// phase is not advanced and no delay is taken.
    pub fn step(&mut self) -> Result<Phase, P::Error> {
        let applied = self.phase;
        match applied {
            Phase::Asserted => self.led.set_high()?,
            Phase::Deasserted => self.led.set_low()?,
        }
        trace!(phase = ?applied, "led transition");

        self.delay.delay_ms(self.half_period_ms);
        self.phase = applied.next();
        Ok(applied)
    }

    pub fn free(self) -> (P, D) {
        (self.led, self.delay)
    }
}

impl<P, D> Blinker<P, D>
where
    P: OutputPin<Error = Infallible>,
    D: DelayNs,
{
    /// Blink forever. There is no terminal state; only a reset or power
    /// loss ends the loop.
    pub fn run(mut self) -> ! {
        debug!(half_period_ms = self.half_period_ms, "blink loop started");
        loop {
            match self.step() {
                Ok(_) => {}
                Err(never) => match never {},
            }
        }
    }
}
