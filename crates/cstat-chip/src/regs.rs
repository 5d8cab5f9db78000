//! CSTAT v1.0 register map.
//!
//! Offsets are byte offsets from the per-instance register window base.
//! Field constants use [`crate::field::Field`]; single-bit enables are
//! also fields so every write goes through the same compose-then-commit
//! path.
//!
//! Shadow-register (COREX) note: every register below the interrupt block
//! is shadowed. A configuration burst only reaches the live pipeline when
//! a COREX copy is triggered, so mid-frame writes never tear.

use crate::field::Field;

// ── Global control ───────────────────────────────────────────────────────────

/// Global pipeline enable.
pub const GLOBAL_ENABLE: usize = 0x0000;
/// Clear pulse for the global-enable logic, used on the disable path.
pub const GLOBAL_ENABLE_CLEAR: usize = 0x0004;
/// Soft reset trigger.
pub const SW_RESET: usize = 0x0008;
/// Stop-processing-on-corruption control.
pub const STOP_ON_CORRUPT: usize = 0x000C;
/// One-shot (single frame) trigger.
pub const ONE_SHOT_ENABLE: usize = 0x0010;
/// One-shot trigger for FRO multi-buffer runs.
pub const FRO_ONE_SHOT_ENABLE: usize = 0x0014;
/// Idle status, reads 1 when the core has drained.
pub const IDLE_STATUS: usize = 0x0018;
/// Input source and bit-width selection.
pub const INPUT_PATH: usize = 0x001C;

/// Fields of the global control registers.
pub mod global {
    use super::Field;

    /// `GLOBAL_ENABLE.ENABLE`
    pub const ENABLE: Field = Field::new(0, 1);
    /// `GLOBAL_ENABLE_CLEAR.CLEAR`
    pub const CLEAR: Field = Field::new(0, 1);
    /// `SW_RESET.RESET`
    pub const RESET: Field = Field::new(0, 1);
    /// `STOP_ON_CORRUPT.ENABLE`
    pub const STOP_EN: Field = Field::new(0, 1);
    /// `ONE_SHOT_ENABLE.ONE_SHOT` / `FRO_ONE_SHOT_ENABLE.ONE_SHOT`
    pub const ONE_SHOT: Field = Field::new(0, 1);
    /// `IDLE_STATUS.IDLE` — 1 when idle.
    pub const IDLE: Field = Field::new(0, 1);
    /// `INPUT_PATH.PATH` — 0 OTF, 1 DMA.
    pub const PATH: Field = Field::new(0, 2);
    /// `INPUT_PATH.BITWIDTH` — encoded input bit width.
    pub const BITWIDTH: Field = Field::new(4, 3);
}

// ── COREX shadow-copy controller ─────────────────────────────────────────────

/// COREX master enable.
pub const COREX_ENABLE: usize = 0x0100;
/// Update mode for shadow set 0: SW or HW triggered.
pub const COREX_UPDATE_MODE_0: usize = 0x0104;
/// Update type for shadow set 0 (copy / swap / ignore).
pub const COREX_UPDATE_TYPE_0: usize = 0x0108;
/// Software copy-start trigger.
pub const COREX_START_0: usize = 0x010C;
/// Seed the shadow SRAM from the live register values.
pub const COREX_COPY_FROM_IP_0: usize = 0x0110;
/// Copy-engine busy status.
pub const COREX_STATUS_0: usize = 0x0114;
/// Arms the type-write table for bulk programming.
pub const COREX_TYPE_WRITE_TRIGGER: usize = 0x0118;
/// Type-write table data port, one write per 32-slot chunk.
pub const COREX_TYPE_WRITE: usize = 0x011C;
/// HW-trigger lead delay in core clock cycles.
pub const COREX_DELAY: usize = 0x0120;

/// Fields of the COREX registers.
pub mod corex {
    use super::Field;

    /// `COREX_ENABLE.ENABLE`
    pub const ENABLE: Field = Field::new(0, 1);
    /// `COREX_UPDATE_MODE_0.MODE` — 1 SW trigger, 0 HW trigger.
    pub const MODE: Field = Field::new(0, 1);
    /// `COREX_UPDATE_TYPE_0.TYPE`
    pub const TYPE: Field = Field::new(0, 2);
    /// `COREX_START_0.START`
    pub const START: Field = Field::new(0, 1);
    /// `COREX_COPY_FROM_IP_0.COPY`
    pub const COPY: Field = Field::new(0, 1);
    /// `COREX_STATUS_0.BUSY` — 1 while the copy engine runs.
    pub const BUSY: Field = Field::new(0, 1);
    /// `COREX_TYPE_WRITE_TRIGGER.TRIGGER`
    pub const TRIGGER: Field = Field::new(0, 1);
    /// `COREX_DELAY.DELAY`
    pub const DELAY: Field = Field::new(0, 16);

    /// Update-mode value: software trigger.
    pub const MODE_SW: u32 = 1;
    /// Update-mode value: hardware trigger.
    pub const MODE_HW: u32 = 0;

    /// Number of shadowed register slots covered by the type-write table.
    pub const REG_SLOT_COUNT: usize = 1024;
    /// Slots marked per `COREX_TYPE_WRITE` data write.
    pub const SLOTS_PER_WRITE: usize = 32;
    /// Reset value of `COREX_DELAY`.
    pub const DELAY_RESET: u32 = 0x10;
}

// ── Interrupts (see crate::irq for bit assignments) ──────────────────────────

/// INT1 enable mask.
pub const INT1_ENABLE: usize = 0x0200;
/// INT1 raw status.
pub const INT1_STATUS: usize = 0x0204;
/// INT1 write-1-to-clear.
pub const INT1_CLEAR: usize = 0x0208;
/// INT2 enable mask.
pub const INT2_ENABLE: usize = 0x020C;
/// INT2 raw status.
pub const INT2_STATUS: usize = 0x0210;
/// INT2 write-1-to-clear.
pub const INT2_CLEAR: usize = 0x0214;
/// FRO shadow of INT1 status.
pub const FRO_INT0_STATUS: usize = 0x0218;
/// FRO shadow of INT1 clear.
pub const FRO_INT0_CLEAR: usize = 0x021C;
/// FRO shadow of INT2 status.
pub const FRO_INT1_STATUS: usize = 0x0220;
/// FRO shadow of INT2 clear.
pub const FRO_INT1_CLEAR: usize = 0x0224;
/// Edge/level/pulse interrupt shape select.
pub const INT_FORM_SELECT: usize = 0x0228;
/// Corruption interrupt enable.
pub const CORRUPT_INT_ENABLE: usize = 0x022C;

/// Fields of the interrupt plumbing registers.
pub mod int_form {
    use super::Field;

    /// `INT_FORM_SELECT.FORM`
    pub const FORM: Field = Field::new(0, 2);
    /// Level-triggered interrupt shape.
    pub const FORM_LEVEL: u32 = 0;
    /// Edge-triggered interrupt shape.
    pub const FORM_EDGE: u32 = 1;
    /// Pulse interrupt shape.
    pub const FORM_PULSE: u32 = 2;
}

// ── Debug / diagnostics ──────────────────────────────────────────────────────

/// Input stall cycle counter, write-to-clear.
pub const STALL_CNT: usize = 0x0280;

/// First and last offsets of the dumpable register window.
pub const DUMP_RANGE: (usize, usize) = (0x0000, 0x08FF);

// ── Crop stages (shared three-register layout) ───────────────────────────────
//
// Every crop stage is CTRL / POS / SIZE at base+0x0/0x4/0x8.

/// Bayer input crop block base.
pub const CROP_IN_BASE: usize = 0x0400;
/// Digital-zoom crop block base.
pub const CROP_ZOOM_BASE: usize = 0x0410;
/// Binning-scaler output crop block base.
pub const CROP_BNS_BASE: usize = 0x0420;
/// Noise-reduction crop block base.
pub const CROP_MENR_BASE: usize = 0x0430;

/// Lens-shading-correction grid block base (crop layout + grid registers).
pub const GRID_LSC_BASE: usize = 0x0480;
/// Chromatic-aberration grid block base (same layout as LSC).
pub const GRID_CAG_BASE: usize = 0x04A0;

/// Register layout of one crop stage, relative to its block base.
pub mod crop {
    use super::Field;

    /// `CTRL` register offset within the block.
    pub const CTRL: usize = 0x0;
    /// `POS` register offset within the block.
    pub const POS: usize = 0x4;
    /// `SIZE` register offset within the block.
    pub const SIZE: usize = 0x8;

    /// `CTRL.BYPASS`
    pub const BYPASS: Field = Field::new(0, 1);
    /// `POS.X` / `SIZE.W`
    pub const X: Field = Field::new(0, 16);
    /// `POS.Y` / `SIZE.H`
    pub const Y: Field = Field::new(16, 16);
}

// ── Binning scaler (BNS) ─────────────────────────────────────────────────────

/// BNS control (bypass).
pub const BNS_CTRL: usize = 0x0500;
/// BNS factor configuration.
pub const BNS_CONFIG: usize = 0x0504;
/// BNS output image size.
pub const BNS_OUTPUT_SIZE: usize = 0x0508;
/// BNS inter-line gap cycles.
pub const BNS_LINE_GAP: usize = 0x050C;
/// X-axis weight table, 4+4+3 taps across three registers.
pub const BNS_WEIGHT_X: [usize; 3] = [0x0510, 0x0514, 0x0518];
/// Y-axis weight table, 4+4+3 taps across three registers.
pub const BNS_WEIGHT_Y: [usize; 3] = [0x051C, 0x0520, 0x0524];

/// Fields of the BNS registers.
pub mod bns {
    use super::Field;

    /// `BNS_CTRL.BYPASS`
    pub const BYPASS: Field = Field::new(0, 1);
    /// `BNS_CONFIG.FACTOR_X`
    pub const FACTOR_X: Field = Field::new(0, 3);
    /// `BNS_CONFIG.FACTOR_Y`
    pub const FACTOR_Y: Field = Field::new(4, 3);
    /// `BNS_OUTPUT_SIZE.W`
    pub const OUT_W: Field = Field::new(0, 16);
    /// `BNS_OUTPUT_SIZE.H`
    pub const OUT_H: Field = Field::new(16, 16);
    /// `BNS_LINE_GAP.GAP`
    pub const GAP: Field = Field::new(0, 8);
    /// Weight taps are packed as four 8-bit lanes per register.
    pub const WEIGHT_LANE: [Field; 4] = [
        Field::new(0, 8),
        Field::new(8, 8),
        Field::new(16, 8),
        Field::new(24, 8),
    ];

    /// Fixed inter-line gap programmed at configuration time.
    pub const LINE_GAP_CYCLES: u32 = 4;
}

// ── Downscalers (LME / FD-pyramid / CDS, shared layout) ──────────────────────

/// Motion-estimation-assist downscaler block base.
pub const DS_LME_BASE: usize = 0x0600;
/// Face-detection-pyramid downscaler block base.
pub const DS_FDPIG_BASE: usize = 0x0640;
/// Content-downscale block base.
pub const DS_CDS_BASE: usize = 0x0680;

/// Register layout of one downscaler, relative to its block base.
pub mod ds {
    use super::Field;

    /// Combined bypass/output-enable control.
    pub const CTRL: usize = 0x00;
    /// Input crop offset.
    pub const CROP_POS: usize = 0x04;
    /// Input crop size.
    pub const CROP_SIZE: usize = 0x08;
    /// Output size.
    pub const OUTPUT_SIZE: usize = 0x0C;
    /// Forward scale factor, X axis (Q4.12).
    pub const SCALE_X: usize = 0x10;
    /// Forward scale factor, Y axis (Q4.12).
    pub const SCALE_Y: usize = 0x14;
    /// Inverse scale factor, X axis.
    pub const INV_SCALE_X: usize = 0x18;
    /// Inverse scale factor, Y axis.
    pub const INV_SCALE_Y: usize = 0x1C;
    /// Inverse-scale shift amount, X axis.
    pub const INV_SHIFT_X: usize = 0x20;
    /// Inverse-scale shift amount, Y axis.
    pub const INV_SHIFT_Y: usize = 0x24;

    /// `CTRL.BYPASS`
    pub const BYPASS: Field = Field::new(0, 1);
    /// `CTRL.OUTPUT_EN`
    pub const OUTPUT_EN: Field = Field::new(1, 1);
    /// `CTRL.CROP_EN` — CDS only; reserved on LME and FD-pyramid.
    pub const CROP_EN: Field = Field::new(2, 1);
    /// `POS.X` / `SIZE.W` packing, shared with the crop stages.
    pub const X: Field = Field::new(0, 16);
    /// `POS.Y` / `SIZE.H` packing.
    pub const Y: Field = Field::new(16, 16);
    /// Forward scale value (Q4.12, 4 integer bits + headroom).
    pub const SCALE: Field = Field::new(0, 20);
    /// Inverse scale value.
    pub const INV_SCALE: Field = Field::new(0, 32);
    /// Inverse shift value (26..=31).
    pub const INV_SHIFT: Field = Field::new(0, 5);
}

// ── Color-space conversion chain ─────────────────────────────────────────────

/// RGB→YUV matrix stage control.
pub const CCM_RGB2YUV_CTRL: usize = 0x0700;
/// RGB→YUV coefficient registers (3x3 matrix, one row per register).
pub const CCM_RGB2YUV_COEF: [usize; 3] = [0x0704, 0x0708, 0x070C];
/// RGB→YUV output offset register.
pub const CCM_RGB2YUV_OFFSET: usize = 0x0710;
/// YUV444→422 horizontal decimation stage control.
pub const CCM_444TO422_CTRL: usize = 0x0720;
/// YUV444→422 filter tap register.
pub const CCM_444TO422_COEF: usize = 0x0724;
/// YUV422→420 vertical decimation stage control.
pub const CCM_422TO420_CTRL: usize = 0x0730;

/// Fields of the conversion-chain registers.
pub mod ccm {
    use super::Field;

    /// `*_CTRL.BYPASS`
    pub const BYPASS: Field = Field::new(0, 1);
    /// Signed 10-bit matrix coefficients, three lanes per register.
    pub const COEF_LANE: [Field; 3] = [
        Field::new(0, 10),
        Field::new(10, 10),
        Field::new(20, 10),
    ];
    /// Chroma offset lanes of `CCM_RGB2YUV_OFFSET`.
    pub const OFFSET_LANE: [Field; 3] = [
        Field::new(0, 10),
        Field::new(10, 10),
        Field::new(20, 10),
    ];
    /// Decimation filter taps, four 8-bit lanes.
    pub const TAP_LANE: [Field; 4] = [
        Field::new(0, 8),
        Field::new(8, 8),
        Field::new(16, 8),
        Field::new(24, 8),
    ];

    /// BT.601 limited-range RGB→YUV rows in Q1.8, row-major.
    pub const BT601_COEF: [[u32; 3]; 3] = [
        [0x042, 0x081, 0x019], // Y  =  0.257 0.504 0.098
        [0x3DA, 0x3B6, 0x070], // Cb = -0.148 -0.291 0.439 (two's complement, 10-bit)
        [0x070, 0x3A2, 0x3EE], // Cr =  0.439 -0.368 -0.071
    ];
    /// Output offsets: Y +16, Cb/Cr +128 (10-bit lanes).
    pub const BT601_OFFSET: [u32; 3] = [16, 128, 128];
    /// 444→422 decimation taps (1/4, 1/2, 1/4 in Q0.8 plus a zero lane).
    pub const DECIM_TAPS: [u32; 4] = [0x40, 0x80, 0x40, 0x00];
}

// ── LIC (line-buffer interface controller) ───────────────────────────────────

/// LIC mode / path / half-PPC configuration.
pub const LIC_CONFIG: usize = 0x0800;
/// Static per-context buffer sizes, contexts 0/1.
pub const LIC_STATIC_SIZE_0: usize = 0x0804;
/// Static per-context buffer sizes, contexts 2/3.
pub const LIC_STATIC_SIZE_1: usize = 0x0808;
/// Sole input-context select for SINGLE mode.
pub const LIC_SINGLE_INPUT: usize = 0x080C;
/// Virtual-line preemption threshold.
pub const LIC_VL_THRESHOLD: usize = 0x0810;
/// Input-line limiting control.
pub const LIC_INPUT_LIMIT: usize = 0x0814;
/// Output hold / disable-mask / hblank constants.
pub const LIC_OUTPUT_CTRL: usize = 0x0818;
/// Register-on-latch fault capture condition mask.
pub const LIC_ROL_CONDITION: usize = 0x081C;
/// Pre-binning SRAM offsets, channels 0/1.
pub const LIC_SRAM_PRE_0: usize = 0x0820;
/// Pre-binning SRAM offsets, channels 2/3.
pub const LIC_SRAM_PRE_1: usize = 0x0824;
/// Post-binning SRAM offsets, channels 0/1.
pub const LIC_SRAM_POST_0: usize = 0x0828;
/// Post-binning SRAM offsets, channels 2/3.
pub const LIC_SRAM_POST_1: usize = 0x082C;

/// Fields of the LIC registers.
pub mod lic_regs {
    use super::Field;

    /// `LIC_CONFIG.MODE` — 0 dynamic, 1 static, 2 single.
    pub const MODE: Field = Field::new(0, 2);
    /// `LIC_CONFIG.INPUT_PATH` — 0 OTF, 1 DMA.
    pub const INPUT_PATH: Field = Field::new(4, 1);
    /// `LIC_CONFIG.HALF_PPC`
    pub const HALF_PPC: Field = Field::new(8, 1);
    /// Low half of a size/offset pair register.
    pub const LO: Field = Field::new(0, 16);
    /// High half of a size/offset pair register.
    pub const HI: Field = Field::new(16, 16);
    /// `LIC_SINGLE_INPUT.CH`
    pub const SINGLE_CH: Field = Field::new(0, 2);
    /// `LIC_VL_THRESHOLD.THRESHOLD`
    pub const THRESHOLD: Field = Field::new(0, 16);
    /// `LIC_INPUT_LIMIT.EN`
    pub const LIMIT_EN: Field = Field::new(0, 1);
    /// `LIC_INPUT_LIMIT.MAX_LINES`
    pub const MAX_LINES: Field = Field::new(4, 4);
    /// `LIC_INPUT_LIMIT.WEIGHT`
    pub const WEIGHT: Field = Field::new(8, 8);
    /// `LIC_OUTPUT_CTRL.HOLD`
    pub const HOLD: Field = Field::new(0, 8);
    /// `LIC_OUTPUT_CTRL.HBLANK`
    pub const HBLANK: Field = Field::new(8, 8);
    /// `LIC_OUTPUT_CTRL.DISABLE_MASK`
    pub const DISABLE_MASK: Field = Field::new(16, 4);
}
