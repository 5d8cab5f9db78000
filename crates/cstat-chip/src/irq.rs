//! INT1/INT2 bit assignments, enable masks, and the error name table.
//!
//! INT1 carries frame pacing, block-done and every error condition; INT2
//! carries the three thumbnail-statistics completions. The FRO shadow
//! registers replicate the same bit layout for multi-buffer runs.

/// INT1 status/enable bit positions.
pub mod int1 {
    /// Frame start.
    pub const FRAME_START: u32 = 1 << 0;
    /// Configured line reached.
    pub const FRAME_LINE: u32 = 1 << 1;
    /// Frame end (aggregate core-end, not per-block).
    pub const FRAME_END: u32 = 1 << 2;
    /// RGBY histogram statistics ready.
    pub const RGBY_HIST_DONE: u32 = 1 << 3;
    /// COREX shadow copy completed.
    pub const COREX_END: u32 = 1 << 4;
    /// CDAF statistics ready.
    pub const CDAF_DONE: u32 = 1 << 5;

    // Error conditions occupy a contiguous high range.

    /// IRQ raised for a corrupted frame.
    pub const ERR_CORRUPTED_IRQ: u32 = 1 << 16;
    /// COREX copy-engine fault.
    pub const ERR_COREX: u32 = 1 << 17;
    /// SDC (sensor data compressor) fault.
    pub const ERR_SDC: u32 = 1 << 18;
    /// LIC line-buffer overflow.
    pub const ERR_LIC_OVERFLOW: u32 = 1 << 19;
    /// LIC input row count mismatch.
    pub const ERR_LIC_ROW: u32 = 1 << 20;
    /// LIC input column count mismatch.
    pub const ERR_LIC_COL: u32 = 1 << 21;
    /// CINFIFO protocol violation.
    pub const ERR_CINFIFO_PROTOCOL: u32 = 1 << 22;
    /// CINFIFO pixel count mismatch.
    pub const ERR_CINFIFO_PIXEL_CNT: u32 = 1 << 23;
    /// CINFIFO overflow.
    pub const ERR_CINFIFO_OVERFLOW: u32 = 1 << 24;
    /// CINFIFO frame overlap.
    pub const ERR_CINFIFO_OVERLAP: u32 = 1 << 25;

    /// All ten error bits.
    pub const ERR_MASK: u32 = ERR_CORRUPTED_IRQ
        | ERR_COREX
        | ERR_SDC
        | ERR_LIC_OVERFLOW
        | ERR_LIC_ROW
        | ERR_LIC_COL
        | ERR_CINFIFO_PROTOCOL
        | ERR_CINFIFO_PIXEL_CNT
        | ERR_CINFIFO_OVERFLOW
        | ERR_CINFIFO_OVERLAP;

    /// Bits enabled by the driver. Per-block frame-end sub-interrupts stay
    /// masked off: the driver only reacts to the aggregate core end, and
    /// enabling every block bit would make the IRQ wait for all of them.
    pub const ENABLE_MASK: u32 = FRAME_START
        | FRAME_LINE
        | FRAME_END
        | RGBY_HIST_DONE
        | COREX_END
        | CDAF_DONE
        | ERR_MASK;
}

/// INT2 status/enable bit positions.
pub mod int2 {
    /// Pre-processing thumbnail statistics ready.
    pub const PRE_THUMB_DONE: u32 = 1 << 0;
    /// AWB thumbnail statistics ready.
    pub const AWB_THUMB_DONE: u32 = 1 << 1;
    /// RGBY thumbnail statistics ready.
    pub const RGBY_THUMB_DONE: u32 = 1 << 2;

    /// Bits enabled by the driver.
    pub const ENABLE_MASK: u32 = PRE_THUMB_DONE | AWB_THUMB_DONE | RGBY_THUMB_DONE;
}

/// Corruption-interrupt enable mask (`CORRUPT_INT_ENABLE`).
pub const CORRUPT_ENABLE_MASK: u32 = 0x0000_0007;

/// Name for an INT1 error bit position, or `None` for non-error bits.
///
/// Used by the error decoder: non-error status bits share the register and
/// are silently skipped.
#[must_use]
pub const fn err_name(bit: u32) -> Option<&'static str> {
    match bit {
        16 => Some("corrupted IRQ"),
        17 => Some("COREX error"),
        18 => Some("SDC error"),
        19 => Some("LIC overflow"),
        20 => Some("LIC input row error"),
        21 => Some("LIC input column error"),
        22 => Some("CINFIFO protocol error"),
        23 => Some("CINFIFO pixel count error"),
        24 => Some("CINFIFO overflow"),
        25 => Some("CINFIFO overlap"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn err_mask_covers_exactly_the_named_bits() {
        let mut named = 0u32;
        for bit in 0..32 {
            if err_name(bit).is_some() {
                named |= 1 << bit;
            }
        }
        assert_eq!(named, int1::ERR_MASK);
    }

    #[test]
    fn enable_mask_includes_errors() {
        assert_eq!(int1::ENABLE_MASK & int1::ERR_MASK, int1::ERR_MASK);
        assert_eq!(int1::ENABLE_MASK & int1::FRAME_END, int1::FRAME_END);
    }

    #[test]
    fn int2_bits_are_distinct() {
        assert_eq!(
            int2::PRE_THUMB_DONE | int2::AWB_THUMB_DONE | int2::RGBY_THUMB_DONE,
            0b111
        );
    }
}
