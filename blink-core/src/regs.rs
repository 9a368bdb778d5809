//! BCM2837 peripheral addresses and GPIO register layout.
//!
//! Addresses are ARM physical addresses (the VideoCore bus address
//! `0x7E00_0000` is remapped to `PERIPHERAL_BASE`). These values are a
//! contract with the silicon: changing them without matching the board makes
//! every access land on unrelated hardware.

// ============================================================================
// Base Addresses
// ============================================================================

/// BCM2837 peripheral base address (Pi 3 / Pi Zero 2)
pub const PERIPHERAL_BASE: usize = 0x3F00_0000;

/// GPIO controller base
pub const GPIO_BASE: usize = PERIPHERAL_BASE + 0x0020_0000;

/// System timer base (free-running 1 MHz counter)
pub const SYSTIMER_BASE: usize = PERIPHERAL_BASE + 0x0000_3000;

// ============================================================================
// GPIO Register Offsets
// ============================================================================

/// Function select registers (3 bits per pin, 10 pins per register)
pub const GPFSEL0: usize = 0x00; // GPIO 0-9
pub const GPFSEL1: usize = 0x04; // GPIO 10-19
pub const GPFSEL2: usize = 0x08; // GPIO 20-29
pub const GPFSEL3: usize = 0x0C; // GPIO 30-39
pub const GPFSEL4: usize = 0x10; // GPIO 40-49
pub const GPFSEL5: usize = 0x14; // GPIO 50-53

/// Output set registers (write-only, 1 bit per pin)
pub const GPSET0: usize = 0x1C; // GPIO 0-31
pub const GPSET1: usize = 0x20; // GPIO 32-53

/// Output clear registers (write-only, 1 bit per pin)
pub const GPCLR0: usize = 0x28; // GPIO 0-31
pub const GPCLR1: usize = 0x2C; // GPIO 32-53

/// Pin level registers (read-only)
pub const GPLEV0: usize = 0x34; // GPIO 0-31
pub const GPLEV1: usize = 0x38; // GPIO 32-53

// ============================================================================
// System Timer Register Offsets
// ============================================================================

/// Counter low 32 bits
pub const SYSTIMER_CLO: usize = 0x04;

/// Counter high 32 bits
pub const SYSTIMER_CHI: usize = 0x08;

// ============================================================================
// Bit Layout
// ============================================================================

/// Width of one function select field
pub const FSEL_BITS: u32 = 3;

/// Pins covered by one function select register
pub const PINS_PER_FSEL: u32 = 10;

/// Pins covered by one set/clear/level register
pub const PINS_PER_BANK: u32 = 32;

/// Mask of a single function select field before shifting
pub const FSEL_MASK: u32 = 0b111;

/// Offset of the function select register holding `pin`.
#[inline]
pub const fn fsel_offset(pin: u8) -> usize {
    GPFSEL0 + (pin as u32 / PINS_PER_FSEL) as usize * 4
}

/// Bit position of `pin`'s field inside its function select register.
#[inline]
pub const fn fsel_shift(pin: u8) -> u32 {
    (pin as u32 % PINS_PER_FSEL) * FSEL_BITS
}

/// Offset of the set/clear/level register holding `pin`, given bank 0's offset.
#[inline]
pub const fn bank_offset(bank0: usize, pin: u8) -> usize {
    bank0 + (pin as u32 / PINS_PER_BANK) as usize * 4
}

/// Single-bit mask selecting `pin` inside its bank.
#[inline]
pub const fn bank_bit(pin: u8) -> u32 {
    1 << (pin as u32 % PINS_PER_BANK)
}
