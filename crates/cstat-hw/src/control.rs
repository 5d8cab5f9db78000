//! Global control: reset, enable ordering, one-shot triggering, input
//! selection and block defaults.
//!
//! Two hard ordering invariants live here:
//!
//! 1. COREX must be enabled before the global-enable bit is set, or the
//!    first trigger can commit a half-programmed shadow set.
//! 2. A one-shot trigger must only fire on an idle core; triggering
//!    mid-drain corrupts the in-flight frame. This is the one place the
//!    idle-wait result propagates to the caller.

use crate::crop::{self, CropRect, CropStage, GridBlock};
use crate::error::Result;
use crate::poll::{poll_until, CORE_IDLE};
use crate::regio::RegisterBase;
use cstat_chip::regs::{self, global};
use tracing::{debug, error, info};

/// Input bit-width supported by the bayer front end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputBitWidth {
    /// 10-bit samples.
    B10,
    /// 12-bit samples.
    B12,
    /// 14-bit samples.
    B14,
}

impl InputBitWidth {
    const fn code(self) -> u32 {
        match self {
            Self::B10 => 0,
            Self::B12 => 1,
            Self::B14 => 2,
        }
    }
}

/// Soft-reset the block and wait for it to drain.
///
/// # Errors
///
/// Propagates the idle-wait timeout: a core that will not drain after
/// reset is not safe to program.
pub fn reset(base: &impl RegisterBase) -> Result<()> {
    base.write_field(regs::SW_RESET, global::RESET, 1);
    wait_idle(base)
}

/// Wait for the core idle flag.
fn wait_idle(base: &impl RegisterBase) -> Result<()> {
    poll_until("CSTAT core", CORE_IDLE, || {
        base.read_field(regs::IDLE_STATUS, global::IDLE) == 1
    })
}

/// Set or clear the global enable.
///
/// Caller contract: COREX is already enabled when `on` is true (ordering
/// invariant 1 above). Stop-on-corruption tracks the enable state, and
/// the disable path also pulses the clear bit so a re-enable starts from
/// a clean trigger state.
pub fn set_global_enable(base: &impl RegisterBase, on: bool) {
    base.write_field(regs::STOP_ON_CORRUPT, global::STOP_EN, u32::from(on));

    if on {
        base.write_field(regs::GLOBAL_ENABLE, global::ENABLE, 1);
        info!("CSTAT globally enabled");
    } else {
        base.write_field(regs::GLOBAL_ENABLE, global::ENABLE, 0);
        base.write_field(regs::GLOBAL_ENABLE_CLEAR, global::CLEAR, 1);
        info!("CSTAT globally disabled");
    }
}

/// Arm a one-shot (single frame) run.
///
/// Disables global processing, waits for the core to drain, then pulses
/// the FRO one-shot and the plain one-shot, in that order, 0 then 1 each.
///
/// # Errors
///
/// Propagates the idle-wait timeout; see module docs for why this one
/// call site must not absorb it.
pub fn one_shot_enable(base: &impl RegisterBase) -> Result<()> {
    base.write_field(regs::GLOBAL_ENABLE, global::ENABLE, 0);
    wait_idle(base)?;

    base.write_field(regs::FRO_ONE_SHOT_ENABLE, global::ONE_SHOT, 0);
    base.write_field(regs::FRO_ONE_SHOT_ENABLE, global::ONE_SHOT, 1);
    base.write_field(regs::ONE_SHOT_ENABLE, global::ONE_SHOT, 0);
    base.write_field(regs::ONE_SHOT_ENABLE, global::ONE_SHOT, 1);

    debug!("one-shot armed");
    Ok(())
}

/// Select the input path and sample width.
///
/// An unsupported bit width is logged and left at the previous value
/// rather than programming garbage; the path is still selected.
pub fn select_input(base: &impl RegisterBase, path: crate::lic::InputPath, width: Option<InputBitWidth>) {
    base.write_field(
        regs::INPUT_PATH,
        global::PATH,
        u32::from(matches!(path, crate::lic::InputPath::Dma)),
    );
    match width {
        Some(w) => base.write_field(regs::INPUT_PATH, global::BITWIDTH, w.code()),
        None => error!("unsupported input bit width; keeping previous value"),
    }
}

/// Load the stream-start defaults for every pipeline block.
///
/// Crop stages open to the full frame, both grid blocks bypass, and the
/// frame rectangle is the one the sensor negotiated.
pub fn set_default_blocks(base: &impl RegisterBase, frame: &CropRect) {
    let full = CropRect { x: 0, y: 0, w: frame.w, h: frame.h };
    for stage in [CropStage::Input, CropStage::Zoom, CropStage::Bns, CropStage::Menr] {
        crop::set_crop(base, stage, true, &full);
    }
    crop::set_grid_crop(base, GridBlock::Lsc, false, &full);
    crop::set_grid_crop(base, GridBlock::Cag, false, &full);
    debug!(w = frame.w, h = frame.h, "block defaults loaded");
}
