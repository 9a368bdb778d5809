//! Host-side model of the GPIO block and system timer for unit tests.

use crate::bus::Bus;
use crate::regs::*;

/// One recorded bus access.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Read { offset: usize, value: u32 },
    Write { offset: usize, value: u32 },
}

/// GPIO register file behind a [`Bus`].
///
/// Set and clear registers are write-only and act on an output latch; the
/// latch is what the level registers report back.
#[derive(Debug)]
pub struct SimGpio {
    base: usize,
    pub fsel: [u32; 6],
    pub latch: [u32; 2],
    pub log: Vec<Access>,
}

impl SimGpio {
    pub fn new(base: usize) -> Self {
        Self {
            base,
            fsel: [0; 6],
            latch: [0; 2],
            log: Vec::new(),
        }
    }

    pub fn writes(&self) -> Vec<(usize, u32)> {
        self.log
            .iter()
            .filter_map(|a| match *a {
                Access::Write { offset, value } => Some((offset, value)),
                Access::Read { .. } => None,
            })
            .collect()
    }

    fn offset(&self, addr: usize) -> usize {
        addr.checked_sub(self.base)
            .unwrap_or_else(|| panic!("access below GPIO block: {addr:#x}"))
    }
}

impl Bus for SimGpio {
    fn read32(&mut self, addr: usize) -> u32 {
        let offset = self.offset(addr);
        let value = match offset {
            GPFSEL0..=GPFSEL5 if offset % 4 == 0 => self.fsel[offset / 4],
            GPSET0 | GPSET1 | GPCLR0 | GPCLR1 => 0,
            GPLEV0 => self.latch[0],
            GPLEV1 => self.latch[1],
            _ => panic!("read from unmodelled GPIO offset {offset:#x}"),
        };
        self.log.push(Access::Read { offset, value });
        value
    }

    fn write32(&mut self, addr: usize, value: u32) {
        let offset = self.offset(addr);
        match offset {
            GPFSEL0..=GPFSEL5 if offset % 4 == 0 => self.fsel[offset / 4] = value,
            GPSET0 => self.latch[0] |= value,
            GPSET1 => self.latch[1] |= value,
            GPCLR0 => self.latch[0] &= !value,
            GPCLR1 => self.latch[1] &= !value,
            _ => panic!("write to unmodelled GPIO offset {offset:#x}"),
        }
        self.log.push(Access::Write { offset, value });
    }
}

/// System timer whose counter advances by `step` on every read of `CLO`.
#[derive(Debug)]
pub struct SimTimer {
    base: usize,
    pub counter: u32,
    pub step: u32,
    pub reads: usize,
}

impl SimTimer {
    pub fn new(base: usize, start: u32, step: u32) -> Self {
        Self {
            base,
            counter: start,
            step,
            reads: 0,
        }
    }
}

impl Bus for SimTimer {
    fn read32(&mut self, addr: usize) -> u32 {
        assert_eq!(addr, self.base + SYSTIMER_CLO, "only CLO is modelled");
        self.reads += 1;
        let now = self.counter;
        self.counter = self.counter.wrapping_add(self.step);
        now
    }

    fn write32(&mut self, addr: usize, _value: u32) {
        panic!("system timer is read-only here: {addr:#x}");
    }
}

/// Route `tracing` output to the test harness. Safe to call from every test.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing_subscriber::filter::LevelFilter::TRACE)
        .try_init();
}
