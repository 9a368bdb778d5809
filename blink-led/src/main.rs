#![no_std]
#![no_main]

use core::arch::global_asm;

use blink_core::regs::GPIO_BASE;
use blink_core::{BlinkConfig, Blinker, Gpio, Mmio};
use panic_halt as _;

// Park secondary cores, set the stack below the image, zero .bss, jump to kernel_main.
global_asm!(include_str!("boot.S"));

// GPIO16, 1000 ms per phase, 6 spin iterations per microsecond.
const CONFIG: BlinkConfig = BlinkConfig::DEFAULT;

#[cfg(not(feature = "system-timer"))]
fn delay() -> impl embedded_hal::delay::DelayNs {
    blink_core::SpinDelay::new(CONFIG.iterations_per_us)
}

#[cfg(feature = "system-timer")]
fn delay() -> impl embedded_hal::delay::DelayNs {
    use blink_core::regs::SYSTIMER_BASE;
    // SAFETY: the system timer block is identity mapped at SYSTIMER_BASE and
    // only read here.
    let bus = unsafe { Mmio::new() };
    blink_core::SystemTimerDelay::new(bus, SYSTIMER_BASE)
}

#[unsafe(no_mangle)]
pub extern "C" fn kernel_main() -> i32 {
    // SAFETY: the MMU is off, so GPIO_BASE is the physical GPIO block, and
    // this is the only core running.
    let bus = unsafe { Mmio::new() };

    // STEP 1: Set GPIO pin 16 as output.
    let led = Gpio::new(bus, GPIO_BASE).into_output(CONFIG.pin);

    // STEP 2: Continuously set and clear it.
    Blinker::new(led, delay(), CONFIG.half_period_ms).run()
}
