//! Register-level LED blink for the BCM2837 (Raspberry Pi 3 / Zero 2).
//!
//! The firmware in `blink-led` is a thin shell around this crate: everything
//! that decides *what* gets written to the GPIO block, and *when*, lives here
//! so it can be exercised on a host against a simulated register file.
//!
//! ```text
//! blink   — two-phase state machine, never returns
//!   │
//! gpio    — pin functions, set/clear/level   delay — nop spin, system timer
//!   │                                          │
//! bus     — volatile 32-bit access ────────────┘
//!   │
//! regs    — physical addresses and bit layout
//! ```

#![cfg_attr(not(test), no_std)]

#[macro_use]
mod fmt;

pub mod blink;
pub mod bus;
pub mod delay;
pub mod gpio;
pub mod regs;

#[cfg(test)]
mod sim;

pub use blink::{BlinkConfig, Blinker, Phase, DEFAULT_HALF_PERIOD_MS};
pub use bus::{Bus, Mmio};
pub use delay::{SpinDelay, SystemTimerDelay, DEFAULT_ITERATIONS_PER_US};
pub use gpio::{Error, Function, Gpio, Output, Pin};
