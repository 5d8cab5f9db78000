//! Crop stage configurators.
//!
//! Four crop stages share one register layout (CTRL/POS/SIZE), and the two
//! grid-correction blocks (LSC, CAG) reuse it at their own bases. The
//! uniform contract: disabled sets bypass and returns; enabled writes the
//! rectangle then clears bypass.

use crate::regio::{RegisterBase, RegisterValue};
use cstat_chip::regs::{self, crop};
use tracing::debug;

/// A crop rectangle in pixels.
///
/// `x + w` / `y + h` staying inside the input frame is the caller's
/// contract; the hardware does not police it and neither does this layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CropRect {
    /// Horizontal offset.
    pub x: u32,
    /// Vertical offset.
    pub y: u32,
    /// Width.
    pub w: u32,
    /// Height.
    pub h: u32,
}

/// The four dedicated crop stages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CropStage {
    /// Bayer input crop.
    Input,
    /// Digital-zoom crop.
    Zoom,
    /// Binning-scaler output crop.
    Bns,
    /// Noise-reduction crop.
    Menr,
}

impl CropStage {
    const fn base(self) -> usize {
        match self {
            Self::Input => regs::CROP_IN_BASE,
            Self::Zoom => regs::CROP_ZOOM_BASE,
            Self::Bns => regs::CROP_BNS_BASE,
            Self::Menr => regs::CROP_MENR_BASE,
        }
    }
}

/// The two grid-correction blocks sharing the crop layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridBlock {
    /// Lens-shading correction grid.
    Lsc,
    /// Chromatic-aberration grid.
    Cag,
}

impl GridBlock {
    const fn base(self) -> usize {
        match self {
            Self::Lsc => regs::GRID_LSC_BASE,
            Self::Cag => regs::GRID_CAG_BASE,
        }
    }
}

/// Configure one crop stage.
pub fn set_crop(base: &impl RegisterBase, stage: CropStage, enable: bool, rect: &CropRect) {
    write_crop_block(base, stage.base(), enable, rect);
    debug!(?stage, enable, ?rect, "crop configured");
}

/// Configure the crop of a grid-correction block. Same field layout as the
/// crop stages, different register base.
pub fn set_grid_crop(base: &impl RegisterBase, block: GridBlock, enable: bool, rect: &CropRect) {
    write_crop_block(base, block.base(), enable, rect);
    debug!(?block, enable, ?rect, "grid crop configured");
}

fn write_crop_block(base: &impl RegisterBase, block: usize, enable: bool, rect: &CropRect) {
    if !enable {
        base.write_field(block + crop::CTRL, crop::BYPASS, 1);
        return;
    }

    RegisterValue::new()
        .set(crop::X, rect.x)
        .set(crop::Y, rect.y)
        .commit(base, block + crop::POS);
    RegisterValue::new()
        .set(crop::X, rect.w)
        .set(crop::Y, rect.h)
        .commit(base, block + crop::SIZE);
    base.write_field(block + crop::CTRL, crop::BYPASS, 0);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::regio::SimRegisters;

    #[test]
    fn disabled_stage_only_sets_bypass() {
        let sim = SimRegisters::new();
        set_crop(&sim, CropStage::Input, false, &CropRect::default());
        assert_eq!(sim.write_log(), vec![(regs::CROP_IN_BASE + crop::CTRL, 1)]);
    }

    #[test]
    fn enabled_stage_writes_rect_then_clears_bypass() {
        let sim = SimRegisters::new();
        let rect = CropRect { x: 8, y: 4, w: 4032, h: 3024 };
        set_crop(&sim, CropStage::Zoom, true, &rect);

        let b = regs::CROP_ZOOM_BASE;
        assert_eq!(
            sim.write_log(),
            vec![
                (b + crop::POS, (4 << 16) | 8),
                (b + crop::SIZE, (3024 << 16) | 4032),
                (b + crop::CTRL, 0),
            ]
        );
    }

    #[test]
    fn grid_blocks_share_layout_at_distinct_bases() {
        let sim = SimRegisters::new();
        let rect = CropRect { x: 0, y: 0, w: 64, h: 48 };
        set_grid_crop(&sim, GridBlock::Lsc, true, &rect);
        set_grid_crop(&sim, GridBlock::Cag, true, &rect);

        assert_eq!(
            sim.read32(regs::GRID_LSC_BASE + crop::SIZE),
            sim.read32(regs::GRID_CAG_BASE + crop::SIZE)
        );
        assert_ne!(regs::GRID_LSC_BASE, regs::GRID_CAG_BASE);
    }
}
