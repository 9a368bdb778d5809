//! Volatile access to memory-mapped registers.

use core::ptr::{read_volatile, write_volatile};

/// 32-bit register access by absolute address.
///
/// Every call is one hardware access. Implementations must not cache,
/// merge or reorder accesses: a read always observes the device, a write
/// always reaches it.
pub trait Bus {
    fn read32(&mut self, addr: usize) -> u32;
    fn write32(&mut self, addr: usize, value: u32);
}

impl<B: Bus + ?Sized> Bus for &mut B {
    #[inline(always)]
    fn read32(&mut self, addr: usize) -> u32 {
        (**self).read32(addr)
    }

    #[inline(always)]
    fn write32(&mut self, addr: usize, value: u32) {
        (**self).write32(addr, value)
    }
}

/// The physical address space, accessed with volatile loads and stores.
#[derive(Debug)]
pub struct Mmio {
    _private: (),
}

impl Mmio {
    /// # Safety
    ///
    /// Every address later passed to [`Bus::read32`]/[`Bus::write32`] must be
    /// a 4-byte aligned device register that is identity mapped, and no
    /// other code may be driving the same registers concurrently.
    pub const unsafe fn new() -> Self {
        Self { _private: () }
    }
}

impl Bus for Mmio {
    #[inline(always)]
    fn read32(&mut self, addr: usize) -> u32 {
        // SAFETY: upheld by the caller of `Mmio::new`.
        unsafe { read_volatile(addr as *const u32) }
    }

    #[inline(always)]
    fn write32(&mut self, addr: usize, value: u32) {
        // SAFETY: upheld by the caller of `Mmio::new`.
        unsafe { write_volatile(addr as *mut u32, value) }
    }
}
