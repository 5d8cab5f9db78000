//! COREX shadow-copy controller.
//!
//! COREX double-buffers the configuration registers: a burst of writes
//! lands in shadow SRAM and is committed to the live pipeline atomically
//! at a trigger point, so a frame never sees a half-written register set.
//!
//! The enable sequence seeds the shadow SRAM from the live registers
//! before handing trigger control to the hardware; disabling forces the
//! trigger back to software first so a later enable always starts from
//! the same mode regardless of history.

use crate::poll::{poll_until, COREX_IDLE};
use crate::regio::{RegisterBase, RegisterValue};
use cstat_chip::regs::{self, corex};
use tracing::{debug, error};

/// Shadow-copy commit type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateType {
    /// Copy the shadow set into the live registers at the trigger.
    Copy,
    /// Swap shadow and live sets at the trigger.
    Swap,
    /// No commit; used to force a synchronous idle checkpoint.
    Ignore,
}

impl UpdateType {
    const fn code(self) -> u32 {
        match self {
            Self::Copy => 0,
            Self::Swap => 1,
            Self::Ignore => 2,
        }
    }
}

/// Frame timing used to derive the HW-trigger lead delay.
#[derive(Debug, Clone, Copy)]
pub struct TimeConfig {
    /// Measured vertical-valid duration in microseconds.
    pub vvalid_us: u32,
    /// Requested vertical-valid duration in microseconds.
    pub req_vvalid_us: u32,
    /// Core clock in Hz.
    pub clk_hz: u64,
}

/// Core clock floor applied to the delay computation.
const MIN_CLK_HZ: u64 = 267_000_000;

/// Enable or disable COREX for one instance.
///
/// Enabling marks every shadow slot copy-on-trigger, seeds the shadow
/// SRAM from the live register values, commits that seed once via a SW
/// trigger, then hands the trigger to hardware (unless `sw_trigger_only`
/// pins it to software). Disabling forces SW-trigger mode back on before
/// clearing the enable bit.
///
/// Idle-wait timeouts are logged and absorbed: this is a readiness wait,
/// not a precondition check, and the capture pipeline must not stall on
/// it. The cost is a possibly stale shadow copy for one frame.
pub fn enable(base: &impl RegisterBase, on: bool, sw_trigger_only: bool) {
    if !on {
        base.write_field(regs::COREX_UPDATE_MODE_0, corex::MODE, corex::MODE_SW);
        wait_idle(base);
        base.write_field(regs::COREX_ENABLE, corex::ENABLE, 0);
        debug!("COREX disabled");
        return;
    }

    base.write_field(regs::COREX_ENABLE, corex::ENABLE, 1);
    mark_all_slots_copy(base);

    // Seed the shadow SRAM from the live registers, then commit the seed
    // once so shadow and live agree before any frame runs.
    base.write_field(regs::COREX_UPDATE_MODE_0, corex::MODE, corex::MODE_SW);
    base.write_field(regs::COREX_COPY_FROM_IP_0, corex::COPY, 1);
    wait_idle(base);
    base.write_field(regs::COREX_START_0, corex::START, 1);
    wait_idle(base);

    if !sw_trigger_only {
        base.write_field(regs::COREX_UPDATE_MODE_0, corex::MODE, corex::MODE_HW);
    }
    debug!(sw_trigger_only, "COREX enabled");
}

/// Mark every slot of the type-write table as type 0 (copy-on-trigger).
fn mark_all_slots_copy(base: &impl RegisterBase) {
    base.write_field(regs::COREX_TYPE_WRITE_TRIGGER, corex::TRIGGER, 1);
    let chunks = corex::REG_SLOT_COUNT.div_ceil(corex::SLOTS_PER_WRITE);
    for _ in 0..chunks {
        base.write32(regs::COREX_TYPE_WRITE, 0);
    }
}

/// Request a shadow-copy commit.
///
/// In SW-trigger mode the copy starts immediately. In HW-trigger mode the
/// update type is queued for the next hardware trigger; an [`UpdateType::Ignore`]
/// additionally waits for the copy engine to drain, which callers use as a
/// synchronous checkpoint.
pub fn trigger(base: &impl RegisterBase, update_type: UpdateType) {
    let mode = base.read_field(regs::COREX_UPDATE_MODE_0, corex::MODE);
    if mode == corex::MODE_SW {
        base.write_field(regs::COREX_START_0, corex::START, 1);
        return;
    }

    base.write_field(regs::COREX_UPDATE_TYPE_0, corex::TYPE, update_type.code());
    if update_type == UpdateType::Ignore {
        wait_idle(base);
    }
}

/// Wait for the copy engine to go idle.
///
/// Timeout is logged and absorbed (see [`enable`] for why).
pub fn wait_idle(base: &impl RegisterBase) {
    let r = poll_until("COREX copy engine", COREX_IDLE, || {
        base.read_field(regs::COREX_STATUS_0, corex::BUSY) == 0
    });
    if let Err(e) = r {
        error!("{e}; continuing with a possibly stale shadow copy");
    }
}

/// Program the HW-trigger lead delay from frame timing.
///
/// A non-positive lead time falls back to the reset value. The register is
/// only written when the value actually changes, to keep redundant COREX
/// traffic (and log noise) off the bus.
pub fn set_delay(base: &impl RegisterBase, time: &TimeConfig) {
    let lead_us = i64::from(time.vvalid_us) - i64::from(time.req_vvalid_us);
    let clk = time.clk_hz.max(MIN_CLK_HZ);

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let delay = if lead_us <= 0 {
        corex::DELAY_RESET
    } else {
        (lead_us as u64 * (clk / 1_000_000)).min(u64::from(corex::DELAY.max_value())) as u32
    };

    let current = base.read_field(regs::COREX_DELAY, corex::DELAY);
    if current != delay {
        RegisterValue::new()
            .set(corex::DELAY, delay)
            .commit(base, regs::COREX_DELAY);
        debug!(delay, "COREX HW-trigger delay updated");
    }
}
