//! GPIO pin configuration and output control.
//!
//! Each operation is a single pass through the [`Bus`]; nothing about the
//! register contents is remembered between calls, so another agent changing
//! the block (firmware, the GPU) is always observed.

use core::convert::Infallible;
use core::fmt;

use embedded_hal::digital::{ErrorType, OutputPin, StatefulOutputPin};

use crate::bus::Bus;
use crate::regs::{self, FSEL_MASK, GPCLR0, GPLEV0, GPSET0};

/// Number of GPIO lines on the BCM2837.
pub const PIN_COUNT: u8 = 54;

/// GPIO errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Pin number outside `0..PIN_COUNT`
    InvalidPin(u8),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidPin(n) => write!(f, "GPIO{} does not exist (0..{})", n, PIN_COUNT),
        }
    }
}

impl core::error::Error for Error {}

/// A GPIO line number known to exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Pin(u8);

impl Pin {
    /// GPIO16, the activity LED line on the blink board.
    pub const LED: Pin = Pin(16);

    pub const fn new(n: u8) -> Result<Self, Error> {
        if n < PIN_COUNT {
            Ok(Pin(n))
        } else {
            Err(Error::InvalidPin(n))
        }
    }

    #[inline]
    pub const fn number(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for Pin {
    type Error = Error;

    fn try_from(n: u8) -> Result<Self, Self::Error> {
        Pin::new(n)
    }
}

/// GPIO function select values (3 bits each)
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Function {
    Input = 0b000,
    Output = 0b001,
    Alt0 = 0b100,
    Alt1 = 0b101,
    Alt2 = 0b110,
    Alt3 = 0b111,
    Alt4 = 0b011,
    Alt5 = 0b010,
}

impl Function {
    /// Decode a 3-bit field. Every encoding is a valid function.
    pub const fn from_bits(bits: u32) -> Self {
        match bits & FSEL_MASK {
            0b000 => Function::Input,
            0b001 => Function::Output,
            0b100 => Function::Alt0,
            0b101 => Function::Alt1,
            0b110 => Function::Alt2,
            0b111 => Function::Alt3,
            0b011 => Function::Alt4,
            _ => Function::Alt5,
        }
    }
}

/// The GPIO block at `base`, reached through `bus`.
#[derive(Debug)]
pub struct Gpio<B> {
    bus: B,
    base: usize,
}

impl<B: Bus> Gpio<B> {
    pub const fn new(bus: B, base: usize) -> Self {
        Self { bus, base }
    }

    /// Select the function of a single pin.
    ///
    /// Read-modify-write of the pin's field only; the other nine pins sharing
    /// the register keep their functions. Writing the same function twice
    /// leaves the register as writing it once.
    pub fn set_function(&mut self, pin: Pin, function: Function) {
        let addr = self.base + regs::fsel_offset(pin.0);
        let shift = regs::fsel_shift(pin.0);
        let mask = FSEL_MASK << shift;

        let mut val = self.bus.read32(addr);
        val = (val & !mask) | ((function as u32) << shift);
        self.bus.write32(addr, val);

        debug!(pin = pin.0, ?function, "gpio function selected");
    }

    /// Current function of a pin, read back from its select register.
    pub fn function(&mut self, pin: Pin) -> Function {
        let addr = self.base + regs::fsel_offset(pin.0);
        Function::from_bits(self.bus.read32(addr) >> regs::fsel_shift(pin.0))
    }

    /// Drive a pin high. Other pins are unaffected: zero bits in the set
    /// register are ignored by the hardware.
    #[inline]
    pub fn set(&mut self, pin: Pin) {
        let addr = self.base + regs::bank_offset(GPSET0, pin.0);
        self.bus.write32(addr, regs::bank_bit(pin.0));
    }

    /// Drive a pin low.
    #[inline]
    pub fn clear(&mut self, pin: Pin) {
        let addr = self.base + regs::bank_offset(GPCLR0, pin.0);
        self.bus.write32(addr, regs::bank_bit(pin.0));
    }

    /// Sampled level of a pin.
    pub fn level(&mut self, pin: Pin) -> bool {
        let addr = self.base + regs::bank_offset(GPLEV0, pin.0);
        self.bus.read32(addr) & regs::bank_bit(pin.0) != 0
    }

    /// Configure `pin` as an output and hand back an owned handle to it.
    pub fn into_output(mut self, pin: Pin) -> Output<B> {
        self.set_function(pin, Function::Output);
        Output { gpio: self, pin }
    }

    pub fn free(self) -> B {
        self.bus
    }
}

/// A pin configured as a push-pull output.
#[derive(Debug)]
pub struct Output<B> {
    gpio: Gpio<B>,
    pin: Pin,
}

impl<B: Bus> Output<B> {
    pub fn pin(&self) -> Pin {
        self.pin
    }

    /// Give the GPIO block back. The pin stays configured as an output.
    pub fn release(self) -> Gpio<B> {
        self.gpio
    }
}

impl<B: Bus> ErrorType for Output<B> {
    type Error = Infallible;
}

impl<B: Bus> OutputPin for Output<B> {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.gpio.clear(self.pin);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.gpio.set(self.pin);
        Ok(())
    }
}

impl<B: Bus> StatefulOutputPin for Output<B> {
    fn is_set_high(&mut self) -> Result<bool, Self::Error> {
        Ok(self.gpio.level(self.pin))
    }

    fn is_set_low(&mut self) -> Result<bool, Self::Error> {
        Ok(!self.gpio.level(self.pin))
    }
}
