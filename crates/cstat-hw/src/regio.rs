//! Register access primitives: the [`RegisterBase`] seam, the
//! compose-then-commit [`RegisterValue`] builder, and the software
//! register model used for CI without hardware.

use cstat_chip::field::Field;
use std::collections::HashMap;
use std::sync::Mutex;

/// A borrowed memory-mapped register window for one CSTAT instance.
///
/// The engine never owns a window; every entry point borrows one for the
/// duration of the call. The caller serializes access per instance.
pub trait RegisterBase {
    /// Read a 32-bit register.
    fn read32(&self, offset: usize) -> u32;

    /// Write a 32-bit register.
    fn write32(&self, offset: usize, value: u32);

    /// Read one field of a register.
    fn read_field(&self, offset: usize, field: Field) -> u32 {
        field.extract(self.read32(offset))
    }

    /// Read-modify-write one field of a register.
    ///
    /// For multi-field registers prefer [`RegisterValue`] so the whole
    /// image is committed in a single write.
    fn write_field(&self, offset: usize, field: Field, value: u32) {
        let reg = self.read32(offset);
        self.write32(offset, field.insert(reg, value));
    }
}

/// Builder composing several fields into one register image locally,
/// committed with a single MMIO write. Avoids partial-write hazards when
/// the hardware latches a register between two read-modify-writes.
#[derive(Debug, Clone, Copy, Default)]
pub struct RegisterValue(u32);

impl RegisterValue {
    /// Start from an all-zero image.
    #[must_use]
    pub const fn new() -> Self {
        Self(0)
    }

    /// Start from the current contents of a register.
    #[must_use]
    pub fn read_from(base: &impl RegisterBase, offset: usize) -> Self {
        Self(base.read32(offset))
    }

    /// Set one field in the image.
    #[must_use]
    pub const fn set(self, field: Field, value: u32) -> Self {
        Self(field.insert(self.0, value))
    }

    /// The composed raw value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Commit the image with one write.
    pub fn commit(self, base: &impl RegisterBase, offset: usize) {
        base.write32(offset, self.0);
    }
}

/// Software register model.
///
/// Backs registers with a map, records every write in order, and counts
/// reads per offset. This is the hardware-free test target: sequencing
/// tests assert on the write log, timeout tests assert on read counts.
/// (Same role as a software backend in a driver stack: all tests pass
/// without a physical ISP.)
#[derive(Debug, Default)]
pub struct SimRegisters {
    inner: Mutex<SimState>,
}

#[derive(Debug, Default)]
struct SimState {
    regs: HashMap<usize, u32>,
    writes: Vec<(usize, u32)>,
    reads: HashMap<usize, u32>,
}

impl SimRegisters {
    /// Create an empty model; unwritten registers read as zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Preload a register value without it appearing in the write log.
    pub fn preload(&self, offset: usize, value: u32) {
        self.inner.lock().unwrap().regs.insert(offset, value);
    }

    /// Every `write32` in issue order.
    pub fn write_log(&self) -> Vec<(usize, u32)> {
        self.inner.lock().unwrap().writes.clone()
    }

    /// Writes issued to one offset, in order.
    pub fn writes_to(&self, offset: usize) -> Vec<u32> {
        self.inner
            .lock()
            .unwrap()
            .writes
            .iter()
            .filter(|(o, _)| *o == offset)
            .map(|&(_, v)| v)
            .collect()
    }

    /// Number of `read32` calls against one offset.
    pub fn read_count(&self, offset: usize) -> u32 {
        *self.inner.lock().unwrap().reads.get(&offset).unwrap_or(&0)
    }

    /// Forget the write log and read counters, keep register contents.
    pub fn clear_log(&self) {
        let mut st = self.inner.lock().unwrap();
        st.writes.clear();
        st.reads.clear();
    }
}

impl RegisterBase for SimRegisters {
    fn read32(&self, offset: usize) -> u32 {
        let mut st = self.inner.lock().unwrap();
        *st.reads.entry(offset).or_insert(0) += 1;
        *st.regs.get(&offset).unwrap_or(&0)
    }

    fn write32(&self, offset: usize, value: u32) {
        let mut st = self.inner.lock().unwrap();
        st.regs.insert(offset, value);
        st.writes.push((offset, value));
    }
}
