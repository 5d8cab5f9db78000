//! Downscaler configurators and fixed-point scale math.
//!
//! Three downscalers share one register protocol: LME (motion-estimation
//! assist), FD-pyramid (face detection) and CDS (content downscale).
//! Forward scale factors are Q4.12; the inverse factor is the classic
//! reciprocal approximation `(1 << shift) / scale` with the shift chosen
//! so the inverse keeps its significant bits as the forward scale grows.

use crate::crop::CropRect;
use crate::regio::{RegisterBase, RegisterValue};
use cstat_chip::regs::{self, ds};
use tracing::debug;

/// Q4.12 unit scale (1.0x).
pub const SCALE_UNIT: u32 = 1 << 12;

/// The three downscaler blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Downscaler {
    /// Motion-estimation-assist downscaler.
    Lme,
    /// Face-detection-pyramid downscaler.
    FdPyramid,
    /// Content downscaler.
    Cds,
}

impl Downscaler {
    const fn base(self) -> usize {
        match self {
            Self::Lme => regs::DS_LME_BASE,
            Self::FdPyramid => regs::DS_FDPIG_BASE,
            Self::Cds => regs::DS_CDS_BASE,
        }
    }

    /// Hardware-enforced maximum output size (width, height).
    #[must_use]
    pub const fn max_output(self) -> (u32, u32) {
        match self {
            Self::Lme => (2016, 1512),
            Self::FdPyramid => (640, 480),
            Self::Cds => (1920, 1080),
        }
    }
}

/// Per-axis fixed-point scale parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AxisScale {
    /// Forward scale, Q4.12.
    pub scale: u32,
    /// Inverse scale, `(1 << shift) / scale`.
    pub inv_scale: u32,
    /// Shift of the inverse representation, 26..=31.
    pub inv_shift: u32,
}

impl AxisScale {
    /// Compute forward and inverse factors for an input/output dimension
    /// pair. `output` of zero degrades to unit scale rather than dividing
    /// by zero; the caller has already clamped sizes, so this only guards
    /// a misbehaving parameter set.
    #[must_use]
    pub fn from_sizes(input: u32, output: u32) -> Self {
        let scale = if output == 0 {
            SCALE_UNIT
        } else {
            input * SCALE_UNIT / output
        };
        let inv_shift = inverse_shift(scale);
        let inv_scale = (1u64 << inv_shift) / u64::from(scale);
        #[allow(clippy::cast_possible_truncation)]
        Self {
            scale,
            inv_scale: inv_scale as u32,
            inv_shift,
        }
    }
}

/// Shift selection for the inverse-scale representation: a step function
/// of the forward scale magnitude. Larger forward scale means a larger
/// shift, keeping the quotient wide enough to matter.
#[must_use]
pub const fn inverse_shift(scale_q12: u32) -> u32 {
    if scale_q12 <= SCALE_UNIT {
        26
    } else if scale_q12 <= 2 * SCALE_UNIT {
        27
    } else if scale_q12 <= 4 * SCALE_UNIT {
        28
    } else if scale_q12 <= 8 * SCALE_UNIT {
        29
    } else if scale_q12 <= 16 * SCALE_UNIT {
        30
    } else {
        31
    }
}

/// Full configuration of one downscaler pass.
#[derive(Debug, Clone, Copy)]
pub struct DownscaleConfig {
    /// Input crop applied before scaling.
    pub input_crop: CropRect,
    /// Output size after scaling.
    pub output_w: u32,
    /// Output height after scaling.
    pub output_h: u32,
    /// X-axis factors.
    pub x: AxisScale,
    /// Y-axis factors.
    pub y: AxisScale,
}

impl DownscaleConfig {
    /// Build a config from an input crop and a (already clamped) output
    /// size, deriving both axes' fixed-point factors.
    #[must_use]
    pub fn from_sizes(input_crop: CropRect, output_w: u32, output_h: u32) -> Self {
        Self {
            input_crop,
            output_w,
            output_h,
            x: AxisScale::from_sizes(input_crop.w, output_w),
            y: AxisScale::from_sizes(input_crop.h, output_h),
        }
    }
}

/// Program one downscaler.
///
/// Disabled writes a single combined bypass/output-disable image. Enabled
/// writes crop, output size and both axes' factors, then flips the block
/// live in one control write. CDS derives its crop-enable purely from a
/// nonzero crop offset; there is no separate flag in the parameter set.
pub fn configure(base: &impl RegisterBase, block: Downscaler, enable: bool, cfg: &DownscaleConfig) {
    let b = block.base();

    if !enable {
        RegisterValue::new()
            .set(ds::BYPASS, 1)
            .set(ds::OUTPUT_EN, 0)
            .commit(base, b + ds::CTRL);
        return;
    }

    RegisterValue::new()
        .set(ds::X, cfg.input_crop.x)
        .set(ds::Y, cfg.input_crop.y)
        .commit(base, b + ds::CROP_POS);
    RegisterValue::new()
        .set(ds::X, cfg.input_crop.w)
        .set(ds::Y, cfg.input_crop.h)
        .commit(base, b + ds::CROP_SIZE);
    RegisterValue::new()
        .set(ds::X, cfg.output_w)
        .set(ds::Y, cfg.output_h)
        .commit(base, b + ds::OUTPUT_SIZE);

    base.write32(b + ds::SCALE_X, ds::SCALE.insert(0, cfg.x.scale));
    base.write32(b + ds::SCALE_Y, ds::SCALE.insert(0, cfg.y.scale));
    base.write32(b + ds::INV_SCALE_X, cfg.x.inv_scale);
    base.write32(b + ds::INV_SCALE_Y, cfg.y.inv_scale);
    base.write32(b + ds::INV_SHIFT_X, ds::INV_SHIFT.insert(0, cfg.x.inv_shift));
    base.write32(b + ds::INV_SHIFT_Y, ds::INV_SHIFT.insert(0, cfg.y.inv_shift));

    let mut ctrl = RegisterValue::new().set(ds::BYPASS, 0).set(ds::OUTPUT_EN, 1);
    if block == Downscaler::Cds {
        let crop_en = u32::from(cfg.input_crop.x != 0 || cfg.input_crop.y != 0);
        ctrl = ctrl.set(ds::CROP_EN, crop_en);
    }
    ctrl.commit(base, b + ds::CTRL);

    debug!(?block, out_w = cfg.output_w, out_h = cfg.output_h, "downscaler configured");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::regio::SimRegisters;

    #[test]
    fn inverse_shift_is_a_step_function() {
        assert_eq!(inverse_shift(SCALE_UNIT), 26); // 1.0x
        assert_eq!(inverse_shift(2 * SCALE_UNIT), 27); // 2.0x exactly
        assert_eq!(inverse_shift(2 * SCALE_UNIT + 1), 28); // just over 2x
        assert_eq!(inverse_shift(16 * SCALE_UNIT), 30); // 16x exactly
        assert_eq!(inverse_shift(16 * SCALE_UNIT + 1), 31); // above 16x
    }

    #[test]
    fn inverse_scale_round_trip_within_truncation() {
        for scale in [SCALE_UNIT, 6144, 8192, 16384, 40960, 65536, 80000] {
            let shift = inverse_shift(scale);
            let inv = (1u64 << shift) / u64::from(scale);
            let product = u64::from(scale) * inv;
            let target = 1u64 << shift;
            assert!(product <= target, "scale {scale}");
            assert!(target - product < u64::from(scale), "scale {scale}");
        }
    }

    #[test]
    fn disabled_block_writes_one_ctrl_image() {
        let sim = SimRegisters::new();
        let cfg = DownscaleConfig::from_sizes(CropRect::default(), 0, 0);
        configure(&sim, Downscaler::Lme, false, &cfg);
        assert_eq!(
            sim.write_log(),
            vec![(regs::DS_LME_BASE + ds::CTRL, ds::BYPASS.insert(0, 1))]
        );
    }

    #[test]
    fn cds_crop_enable_follows_nonzero_offset() {
        let sim = SimRegisters::new();
        let with_offset = DownscaleConfig::from_sizes(
            CropRect { x: 16, y: 0, w: 1920, h: 1080 },
            1920,
            1080,
        );
        configure(&sim, Downscaler::Cds, true, &with_offset);
        let ctrl = sim.read32(regs::DS_CDS_BASE + ds::CTRL);
        assert_eq!(ds::CROP_EN.extract(ctrl), 1);

        let centered = DownscaleConfig::from_sizes(
            CropRect { x: 0, y: 0, w: 1920, h: 1080 },
            1920,
            1080,
        );
        configure(&sim, Downscaler::Cds, true, &centered);
        let ctrl = sim.read32(regs::DS_CDS_BASE + ds::CTRL);
        assert_eq!(ds::CROP_EN.extract(ctrl), 0);
    }

    #[test]
    fn enabled_block_programs_both_axes() {
        let sim = SimRegisters::new();
        let cfg = DownscaleConfig::from_sizes(
            CropRect { x: 0, y: 0, w: 4032, h: 3024 },
            2016,
            1512,
        );
        configure(&sim, Downscaler::Lme, true, &cfg);

        let b = regs::DS_LME_BASE;
        // 2.0x forward scale on both axes.
        assert_eq!(sim.read32(b + ds::SCALE_X), 2 * SCALE_UNIT);
        assert_eq!(sim.read32(b + ds::SCALE_Y), 2 * SCALE_UNIT);
        assert_eq!(sim.read32(b + ds::INV_SHIFT_X), 27);
        // Block live: bypass 0, output enabled.
        let ctrl = sim.read32(b + ds::CTRL);
        assert_eq!(ds::BYPASS.extract(ctrl), 0);
        assert_eq!(ds::OUTPUT_EN.extract(ctrl), 1);
    }
}
