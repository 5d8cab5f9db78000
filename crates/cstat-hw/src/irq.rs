//! Interrupt programming, status decode and diagnostics.
//!
//! Status reads OR the block status register with its FRO shadow so
//! multi-buffer runs report through the same path; clears go back to
//! each register separately with the value it contributed (standard
//! write-1-to-clear).

use crate::poll::{poll_until, ISR_CLEAR};
use crate::regio::{RegisterBase, RegisterValue};
use cstat_chip::irq::{err_name, int1, int2, CORRUPT_ENABLE_MASK};
use cstat_chip::regs::{self, int_form};
use tracing::{debug, error, warn};

/// Hardware events decodable from the status words.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventType {
    /// Frame start (INT1).
    FrameStart,
    /// Configured line reached (INT1).
    Line,
    /// Frame end (INT1).
    FrameEnd,
    /// RGBY histogram ready (INT1).
    RgbyHist,
    /// COREX copy completed (INT1).
    CorexEnd,
    /// Any of the ten error conditions (INT1).
    Err,
    /// CDAF statistics ready (INT1).
    Cdaf,
    /// Pre-processing thumbnail ready (INT2).
    PreThumb,
    /// AWB thumbnail ready (INT2).
    AwbThumb,
    /// RGBY thumbnail ready (INT2).
    RgbyThumb,
}

impl EventType {
    /// Bitmask of this event in its status word.
    #[must_use]
    pub const fn mask(self) -> u32 {
        match self {
            Self::FrameStart => int1::FRAME_START,
            Self::Line => int1::FRAME_LINE,
            Self::FrameEnd => int1::FRAME_END,
            Self::RgbyHist => int1::RGBY_HIST_DONE,
            Self::CorexEnd => int1::COREX_END,
            Self::Err => int1::ERR_MASK,
            Self::Cdaf => int1::CDAF_DONE,
            Self::PreThumb => int2::PRE_THUMB_DONE,
            Self::AwbThumb => int2::AWB_THUMB_DONE,
            Self::RgbyThumb => int2::RGBY_THUMB_DONE,
        }
    }
}

/// Test a previously-read status word for an event. Pure classification,
/// no I/O.
#[must_use]
pub const fn is_occurred(status: u32, event: EventType) -> bool {
    status & event.mask() != 0
}

/// Program the interrupt masks for a streaming session.
///
/// Interrupt shape is level. The enable masks come from
/// [`cstat_chip::irq`]; per-block frame-end sub-interrupts are not part
/// of them.
pub fn enable_interrupts(base: &impl RegisterBase) {
    RegisterValue::new()
        .set(int_form::FORM, int_form::FORM_LEVEL)
        .commit(base, regs::INT_FORM_SELECT);

    base.write32(regs::INT1_ENABLE, int1::ENABLE_MASK);
    base.write32(regs::INT2_ENABLE, int2::ENABLE_MASK);
    base.write32(regs::CORRUPT_INT_ENABLE, CORRUPT_ENABLE_MASK);
    debug!("interrupts enabled");
}

/// Mask both interrupt registers off.
pub fn disable_interrupts(base: &impl RegisterBase) {
    base.write32(regs::INT1_ENABLE, 0);
    base.write32(regs::INT2_ENABLE, 0);
    base.write32(regs::CORRUPT_INT_ENABLE, 0);
}

/// Read (and optionally clear) the combined INT1 status.
///
/// The FRO shadow is OR'd in; on clear, each register gets back exactly
/// the bits it reported, never the combined word.
pub fn int1_status(base: &impl RegisterBase, clear: bool) -> u32 {
    combined_status(
        base,
        clear,
        (regs::INT1_STATUS, regs::INT1_CLEAR),
        (regs::FRO_INT0_STATUS, regs::FRO_INT0_CLEAR),
    )
}

/// Read (and optionally clear) the combined INT2 status.
pub fn int2_status(base: &impl RegisterBase, clear: bool) -> u32 {
    combined_status(
        base,
        clear,
        (regs::INT2_STATUS, regs::INT2_CLEAR),
        (regs::FRO_INT1_STATUS, regs::FRO_INT1_CLEAR),
    )
}

fn combined_status(
    base: &impl RegisterBase,
    clear: bool,
    (status, status_clear): (usize, usize),
    (fro, fro_clear): (usize, usize),
) -> u32 {
    let v = base.read32(status);
    let f = base.read32(fro);
    if clear {
        base.write32(status_clear, v);
        base.write32(fro_clear, f);
    }
    v | f
}

/// Wait for the enabled interrupt bits of both registers to clear.
///
/// Non-destructive reads; each register gets its own 1 ms x 1000 budget
/// and a timeout on one is logged without giving up on the other.
pub fn wait_isr_clear(base: &impl RegisterBase) {
    for (name, status, mask) in [
        ("INT1", regs::INT1_STATUS, int1::ENABLE_MASK),
        ("INT2", regs::INT2_STATUS, int2::ENABLE_MASK),
    ] {
        let r = poll_until(name, ISR_CLEAR, || base.read32(status) & mask == 0);
        if let Err(e) = r {
            warn!("{e}; interrupt lines may still be asserted");
        }
    }
}

/// Decode and log the error bits of an INT1 status word.
///
/// Non-error bits share the register and are silently skipped.
pub fn print_err(instance: u32, int1_state: u32) {
    for bit in 0..32 {
        if int1_state & (1 << bit) == 0 {
            continue;
        }
        if let Some(name) = err_name(bit) {
            error!(instance, bit, "CSTAT error: {name}");
        }
    }
}

/// Dump the documented register window through the log, eight registers
/// per line.
pub fn dump_regs(base: &impl RegisterBase) {
    let (start, end) = regs::DUMP_RANGE;
    let mut offset = start;
    while offset <= end {
        let row: Vec<String> = (0..8)
            .map(|i| format!("{:08x}", base.read32(offset + i * 4)))
            .collect();
        debug!("[{offset:#06x}] {}", row.join(" "));
        offset += 32;
    }
}

/// Read and clear the input stall counter. A growing value means the
/// sensor out-paces the pipeline and the LIC budget needs another look.
pub fn dump_and_clear_stalls(base: &impl RegisterBase) -> u32 {
    let stalls = base.read32(regs::STALL_CNT);
    base.write32(regs::STALL_CNT, 0);
    if stalls != 0 {
        warn!(stalls, "input stalls since last readout");
    }
    stalls
}
