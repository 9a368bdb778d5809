//! Blocking delays.
//!
//! Nothing here yields: there is no scheduler underneath, so a delay simply
//! occupies the core until it is over. Callers take `impl DelayNs` so the
//! nop spin can be traded for the system timer without touching them.

use embedded_hal::delay::DelayNs;

use crate::bus::Bus;
use crate::regs::SYSTIMER_CLO;

/// Spin iterations per microsecond, measured on a Pi 3 at the firmware's
/// default clock. Recalibrate for other boards or clock settings.
pub const DEFAULT_ITERATIONS_PER_US: u32 = 6;

/// One instruction's worth of doing nothing that the optimiser must keep.
#[inline(always)]
fn nop() {
    #[cfg(any(target_arch = "aarch64", target_arch = "arm"))]
    // SAFETY: `nop` reads and writes no memory, registers or flags.
    unsafe {
        core::arch::asm!("nop", options(nomem, nostack, preserves_flags));
    }
    #[cfg(not(any(target_arch = "aarch64", target_arch = "arm")))]
    core::hint::spin_loop();
}

#[inline(never)]
fn spin(iterations: u32) {
    for _ in 0..iterations {
        nop();
    }
}

/// Calibration-free busy wait: a fixed number of `nop`s per microsecond.
///
/// Not cycle accurate. Counts are computed with wrapping arithmetic, so a
/// request large enough to overflow comes back as a shorter delay instead of
/// a panic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpinDelay {
    iterations_per_us: u32,
}

impl SpinDelay {
    pub const fn new(iterations_per_us: u32) -> Self {
        Self { iterations_per_us }
    }

    pub const fn iterations_per_us(&self) -> u32 {
        self.iterations_per_us
    }

    /// Number of spin iterations `sleep_microseconds(us)` executes.
    pub const fn iterations_for_us(&self, us: u32) -> u32 {
        us.wrapping_mul(self.iterations_per_us)
    }

    /// Number of spin iterations `sleep_milliseconds(ms)` executes.
    pub const fn iterations_for_ms(&self, ms: u32) -> u32 {
        self.iterations_for_us(ms.wrapping_mul(1000))
    }

    pub fn sleep_microseconds(&self, us: u32) {
        spin(self.iterations_for_us(us));
    }

    pub fn sleep_milliseconds(&self, ms: u32) {
        self.sleep_microseconds(ms.wrapping_mul(1000));
    }
}

impl Default for SpinDelay {
    fn default() -> Self {
        Self::new(DEFAULT_ITERATIONS_PER_US)
    }
}

impl DelayNs for SpinDelay {
    fn delay_ns(&mut self, ns: u32) {
        let iterations = (ns as u64 * self.iterations_per_us as u64).div_ceil(1000);
        spin(iterations as u32);
    }

    fn delay_us(&mut self, us: u32) {
        self.sleep_microseconds(us);
    }

    fn delay_ms(&mut self, ms: u32) {
        self.sleep_milliseconds(ms);
    }
}

/// Longest single wait on the 32-bit counter that wrapping subtraction can
/// still measure unambiguously.
const MAX_TIMER_CHUNK_US: u64 = (u32::MAX >> 1) as u64;

/// Delay that polls the free-running 1 MHz system timer.
///
/// Unlike [`SpinDelay`] it does not depend on the core clock, only on the
/// timer ticking once per microsecond. Still a busy wait: no compare
/// channel or interrupt is armed.
#[derive(Debug)]
pub struct SystemTimerDelay<B> {
    bus: B,
    base: usize,
}

impl<B: Bus> SystemTimerDelay<B> {
    pub const fn new(bus: B, base: usize) -> Self {
        Self { bus, base }
    }

    /// Low 32 bits of the microsecond counter.
    #[inline]
    pub fn now(&mut self) -> u32 {
        self.bus.read32(self.base + SYSTIMER_CLO)
    }

    fn wait_ticks(&mut self, ticks: u32) {
        let start = self.now();
        while self.now().wrapping_sub(start) < ticks {
            core::hint::spin_loop();
        }
    }

    fn wait_long(&mut self, mut us: u64) {
        while us > 0 {
            let chunk = us.min(MAX_TIMER_CHUNK_US);
            self.wait_ticks(chunk as u32);
            us -= chunk;
        }
    }

    pub fn free(self) -> B {
        self.bus
    }
}

impl<B: Bus> DelayNs for SystemTimerDelay<B> {
    fn delay_ns(&mut self, ns: u32) {
        self.wait_ticks(ns.div_ceil(1000));
    }

    fn delay_us(&mut self, us: u32) {
        self.wait_ticks(us);
    }

    fn delay_ms(&mut self, ms: u32) {
        self.wait_long(ms as u64 * 1000);
    }
}
