//! Bit-field descriptor for 32-bit registers.
//!
//! Every multi-value register in [`crate::regs`] is described as a set of
//! `Field` constants. Extraction and insertion are pure value operations so
//! a driver can compose a full register image locally and commit it with a
//! single MMIO write (no partial-write hazard on live hardware).

/// A contiguous bit field inside one 32-bit register.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field {
    /// Bit position of the least-significant bit.
    pub shift: u32,
    /// Width in bits (1..=32).
    pub width: u32,
}

impl Field {
    /// Define a field by LSB position and width.
    #[must_use]
    pub const fn new(shift: u32, width: u32) -> Self {
        Self { shift, width }
    }

    /// In-place mask of this field within the register.
    #[must_use]
    pub const fn mask(self) -> u32 {
        if self.width >= 32 {
            u32::MAX
        } else {
            ((1u32 << self.width) - 1) << self.shift
        }
    }

    /// Largest value this field can hold.
    #[must_use]
    pub const fn max_value(self) -> u32 {
        self.mask() >> self.shift
    }

    /// Extract this field from a register image.
    #[must_use]
    pub const fn extract(self, reg: u32) -> u32 {
        (reg & self.mask()) >> self.shift
    }

    /// Return `reg` with this field replaced by `value`.
    ///
    /// Bits of `value` above the field width are discarded, matching what
    /// the hardware itself would do on a write.
    #[must_use]
    pub const fn insert(self, reg: u32, value: u32) -> u32 {
        (reg & !self.mask()) | ((value << self.shift) & self.mask())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mask_and_max() {
        let f = Field::new(4, 4);
        assert_eq!(f.mask(), 0x0000_00F0);
        assert_eq!(f.max_value(), 0xF);

        let full = Field::new(0, 32);
        assert_eq!(full.mask(), u32::MAX);
    }

    #[test]
    fn insert_extract_round_trip() {
        let f = Field::new(16, 13);
        let reg = f.insert(0xDEAD_0001, 0x1234);
        assert_eq!(reg, 0xD234_0001);
        assert_eq!(f.extract(reg), 0x1234);
        // Bits outside the field untouched
        assert_eq!(reg & !f.mask(), 0xDEAD_0001 & !f.mask());
    }

    #[test]
    fn insert_truncates_oversized_value() {
        let f = Field::new(0, 4);
        assert_eq!(f.insert(0, 0x1F), 0xF);
    }
}
