//! LIC (line-buffer interface controller) configuration.
//!
//! The LIC's SRAM line buffers decouple sensor timing from core timing
//! for up to four input contexts. Three allocation policies exist:
//! STATIC (fixed per-context sizes from a caller table), SINGLE (one
//! context owns the input), DYNAMIC (runtime competition for the pool).

use crate::crop::CropRect;
use crate::regio::{RegisterBase, RegisterValue};
use cstat_chip::lic as lic_tab;
use cstat_chip::regs::{self, lic_regs};
use tracing::{debug, error};

/// Line-buffer allocation policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LicMode {
    /// Channels compete for the shared pool at runtime.
    Dynamic,
    /// Fixed per-context buffer sizes from [`LicConfig::static_sizes`].
    Static,
    /// Exactly one context owns the input.
    Single,
}

impl LicMode {
    const fn code(self) -> u32 {
        match self {
            Self::Dynamic => 0,
            Self::Static => 1,
            Self::Single => 2,
        }
    }
}

/// Where the frame enters the block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputPath {
    /// On-the-fly from the sensor interface.
    Otf,
    /// Replayed from memory.
    Dma,
}

/// LIC configuration for one instance.
#[derive(Debug, Clone, Copy)]
pub struct LicConfig {
    /// Allocation policy.
    pub mode: LicMode,
    /// Input source.
    pub input_path: InputPath,
    /// Run the input at half pixels-per-clock.
    pub half_ppc: bool,
    /// Per-context buffer sizes, STATIC mode only.
    pub static_sizes: [u32; lic_tab::CONTEXT_COUNT],
    /// Sole input context, SINGLE mode only.
    pub single_context: u32,
}

/// Virtual-line preemption threshold for a mode/path pair.
///
/// STATIC with OTF input gets one third of the static base: the sensor
/// cannot be back-pressured, so preemption must fire much earlier.
#[must_use]
pub const fn vl_threshold(mode: LicMode, input_path: InputPath) -> u32 {
    match (mode, input_path) {
        (LicMode::Dynamic, _) => lic_tab::DYNAMIC_THRESHOLD,
        (LicMode::Static, InputPath::Otf) => lic_tab::STATIC_THRESHOLD_BASE / 3,
        _ => lic_tab::STATIC_THRESHOLD_BASE,
    }
}

/// Program the LIC for one frame.
pub fn configure(base: &impl RegisterBase, cfg: &LicConfig) {
    RegisterValue::new()
        .set(lic_regs::MODE, cfg.mode.code())
        .set(
            lic_regs::INPUT_PATH,
            u32::from(matches!(cfg.input_path, InputPath::Dma)),
        )
        .set(lic_regs::HALF_PPC, u32::from(cfg.half_ppc))
        .commit(base, regs::LIC_CONFIG);

    match cfg.mode {
        LicMode::Static => {
            RegisterValue::new()
                .set(lic_regs::LO, cfg.static_sizes[0])
                .set(lic_regs::HI, cfg.static_sizes[1])
                .commit(base, regs::LIC_STATIC_SIZE_0);
            RegisterValue::new()
                .set(lic_regs::LO, cfg.static_sizes[2])
                .set(lic_regs::HI, cfg.static_sizes[3])
                .commit(base, regs::LIC_STATIC_SIZE_1);
        }
        LicMode::Single => {
            let ctx = if cfg.single_context as usize >= lic_tab::CONTEXT_COUNT {
                error!(
                    ctx = cfg.single_context,
                    "single-input context out of range, using 0"
                );
                0
            } else {
                cfg.single_context
            };
            RegisterValue::new()
                .set(lic_regs::SINGLE_CH, ctx)
                .commit(base, regs::LIC_SINGLE_INPUT);
        }
        LicMode::Dynamic => {}
    }

    RegisterValue::new()
        .set(lic_regs::THRESHOLD, vl_threshold(cfg.mode, cfg.input_path))
        .commit(base, regs::LIC_VL_THRESHOLD);

    // A DMA source can be back-pressured, so cap it at one in-flight line;
    // an OTF source cannot, so line limiting is off and the input runs at
    // maximum priority instead.
    let limit = match cfg.input_path {
        InputPath::Dma => RegisterValue::new()
            .set(lic_regs::LIMIT_EN, 1)
            .set(lic_regs::MAX_LINES, 1),
        InputPath::Otf => RegisterValue::new()
            .set(lic_regs::LIMIT_EN, 0)
            .set(lic_regs::WEIGHT, lic_tab::MAX_PRIORITY_WEIGHT),
    };
    limit.commit(base, regs::LIC_INPUT_LIMIT);

    RegisterValue::new()
        .set(lic_regs::HOLD, lic_tab::OUTPUT_HOLD_CYCLES)
        .set(lic_regs::HBLANK, lic_tab::OUTPUT_HBLANK_CYCLES)
        .set(lic_regs::DISABLE_MASK, lic_tab::OUTPUT_DISABLE_MASK)
        .commit(base, regs::LIC_OUTPUT_CTRL);

    // Auto-capture the register file on the three memory faults worth a
    // post-mortem.
    let rol = cstat_chip::irq::int1::ERR_LIC_OVERFLOW
        | cstat_chip::irq::int1::ERR_LIC_COL
        | cstat_chip::irq::int1::ERR_LIC_ROW;
    base.write32(regs::LIC_ROL_CONDITION, rol);

    debug!(?cfg.mode, ?cfg.input_path, "LIC configured");
}

/// Program the SRAM line-buffer offsets.
///
/// Context 0 only for now; per-context dynamic offsets are not supported
/// by this revision. Offsets come from the fixed pre-/post-binning tables
/// in the silicon model, two channels packed per register.
pub fn set_sram_offsets(base: &impl RegisterBase, _crop: &CropRect) {
    let pre = &lic_tab::SRAM_OFFSETS_PRE;
    let post = &lic_tab::SRAM_OFFSETS_POST;

    RegisterValue::new()
        .set(lic_regs::LO, pre[0])
        .set(lic_regs::HI, pre[1])
        .commit(base, regs::LIC_SRAM_PRE_0);
    RegisterValue::new()
        .set(lic_regs::LO, pre[2])
        .set(lic_regs::HI, pre[3])
        .commit(base, regs::LIC_SRAM_PRE_1);
    RegisterValue::new()
        .set(lic_regs::LO, post[0])
        .set(lic_regs::HI, post[1])
        .commit(base, regs::LIC_SRAM_POST_0);
    RegisterValue::new()
        .set(lic_regs::LO, post[2])
        .set(lic_regs::HI, post[3])
        .commit(base, regs::LIC_SRAM_POST_1);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::regio::SimRegisters;

    fn static_cfg(input_path: InputPath) -> LicConfig {
        LicConfig {
            mode: LicMode::Static,
            input_path,
            half_ppc: false,
            static_sizes: [2048, 2048, 1024, 1024],
            single_context: 0,
        }
    }

    #[test]
    fn threshold_selection() {
        assert_eq!(vl_threshold(LicMode::Static, InputPath::Otf), 170);
        assert_eq!(vl_threshold(LicMode::Static, InputPath::Dma), 512);
        assert_eq!(vl_threshold(LicMode::Dynamic, InputPath::Otf), 1024);
        assert_eq!(vl_threshold(LicMode::Dynamic, InputPath::Dma), 1024);
    }

    #[test]
    fn static_mode_packs_sizes_two_per_register() {
        let sim = SimRegisters::new();
        configure(&sim, &static_cfg(InputPath::Dma));
        assert_eq!(sim.read32(regs::LIC_STATIC_SIZE_0), (2048 << 16) | 2048);
        assert_eq!(sim.read32(regs::LIC_STATIC_SIZE_1), (1024 << 16) | 1024);
    }

    #[test]
    fn dynamic_mode_skips_static_tables() {
        let sim = SimRegisters::new();
        let cfg = LicConfig { mode: LicMode::Dynamic, ..static_cfg(InputPath::Otf) };
        configure(&sim, &cfg);
        assert!(sim.writes_to(regs::LIC_STATIC_SIZE_0).is_empty());
        assert!(sim.writes_to(regs::LIC_SINGLE_INPUT).is_empty());
    }

    #[test]
    fn dma_input_limits_lines_otf_maxes_weight() {
        let sim = SimRegisters::new();
        configure(&sim, &static_cfg(InputPath::Dma));
        let limit = sim.read32(regs::LIC_INPUT_LIMIT);
        assert_eq!(lic_regs::LIMIT_EN.extract(limit), 1);
        assert_eq!(lic_regs::MAX_LINES.extract(limit), 1);

        configure(&sim, &static_cfg(InputPath::Otf));
        let limit = sim.read32(regs::LIC_INPUT_LIMIT);
        assert_eq!(lic_regs::LIMIT_EN.extract(limit), 0);
        assert_eq!(lic_regs::WEIGHT.extract(limit), lic_tab::MAX_PRIORITY_WEIGHT);
    }

    #[test]
    fn out_of_range_single_context_defaults_to_zero() {
        let sim = SimRegisters::new();
        let cfg = LicConfig {
            mode: LicMode::Single,
            single_context: 7,
            ..static_cfg(InputPath::Otf)
        };
        configure(&sim, &cfg);
        assert_eq!(sim.read32(regs::LIC_SINGLE_INPUT), 0);
    }

    #[test]
    fn sram_offsets_follow_the_fixed_tables() {
        let sim = SimRegisters::new();
        set_sram_offsets(&sim, &CropRect::default());
        assert_eq!(sim.read32(regs::LIC_SRAM_PRE_0), (5440 << 16) | 0);
        assert_eq!(sim.read32(regs::LIC_SRAM_PRE_1), (16320 << 16) | 10880);
        assert_eq!(sim.read32(regs::LIC_SRAM_POST_0), (2720 << 16) | 0);
        assert_eq!(sim.read32(regs::LIC_SRAM_POST_1), (8160 << 16) | 5440);
    }

    #[test]
    fn rol_mask_covers_the_three_memory_faults() {
        let sim = SimRegisters::new();
        configure(&sim, &static_cfg(InputPath::Otf));
        let rol = sim.read32(regs::LIC_ROL_CONDITION);
        assert_eq!(
            rol,
            cstat_chip::irq::int1::ERR_LIC_OVERFLOW
                | cstat_chip::irq::int1::ERR_LIC_COL
                | cstat_chip::irq::int1::ERR_LIC_ROW
        );
    }
}
