//! Color-space conversion chain: RGB→YUV matrix, 444→422 horizontal
//! decimation, 422→420 vertical decimation.
//!
//! The chain feeds the content-downscale write path. Which stages run
//! depends on the negotiated output format: YUV444 needs only the matrix,
//! 422 adds the horizontal stage, 420 adds both decimations. RGB output
//! bypasses the whole chain.

use crate::regio::{RegisterBase, RegisterValue};
use cstat_chip::fmt::HwFormat;
use cstat_chip::regs::{self, ccm};
use tracing::debug;

/// Configure the conversion chain for the negotiated CDS output format.
///
/// Formats that never reach this chain (bayer) bypass every stage, same
/// as RGB.
pub fn configure_chain(base: &impl RegisterBase, output: HwFormat) {
    let (matrix, to422, to420) = match output {
        HwFormat::Yuv444 => (true, false, false),
        HwFormat::Yuv422 => (true, true, false),
        HwFormat::Yuv420 => (true, true, true),
        HwFormat::Rgb | HwFormat::Bayer => (false, false, false),
    };

    set_rgb2yuv(base, matrix);
    set_444to422(base, to422);
    base.write_field(
        regs::CCM_422TO420_CTRL,
        ccm::BYPASS,
        u32::from(!to420),
    );

    debug!(?output, matrix, to422, to420, "conversion chain configured");
}

fn set_rgb2yuv(base: &impl RegisterBase, enable: bool) {
    if !enable {
        base.write_field(regs::CCM_RGB2YUV_CTRL, ccm::BYPASS, 1);
        return;
    }

    for (row, offset) in ccm::BT601_COEF.iter().zip(regs::CCM_RGB2YUV_COEF) {
        let mut image = RegisterValue::new();
        for (lane, &coef) in ccm::COEF_LANE.iter().zip(row) {
            image = image.set(*lane, coef);
        }
        image.commit(base, offset);
    }

    let mut offsets = RegisterValue::new();
    for (lane, &off) in ccm::OFFSET_LANE.iter().zip(&ccm::BT601_OFFSET) {
        offsets = offsets.set(*lane, off);
    }
    offsets.commit(base, regs::CCM_RGB2YUV_OFFSET);

    base.write_field(regs::CCM_RGB2YUV_CTRL, ccm::BYPASS, 0);
}

fn set_444to422(base: &impl RegisterBase, enable: bool) {
    if !enable {
        base.write_field(regs::CCM_444TO422_CTRL, ccm::BYPASS, 1);
        return;
    }

    let mut taps = RegisterValue::new();
    for (lane, &tap) in ccm::TAP_LANE.iter().zip(&ccm::DECIM_TAPS) {
        taps = taps.set(*lane, tap);
    }
    taps.commit(base, regs::CCM_444TO422_COEF);
    base.write_field(regs::CCM_444TO422_CTRL, ccm::BYPASS, 0);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::regio::SimRegisters;

    #[test]
    fn yuv420_enables_all_three_stages() {
        let sim = SimRegisters::new();
        configure_chain(&sim, HwFormat::Yuv420);
        assert_eq!(sim.read_field(regs::CCM_RGB2YUV_CTRL, ccm::BYPASS), 0);
        assert_eq!(sim.read_field(regs::CCM_444TO422_CTRL, ccm::BYPASS), 0);
        assert_eq!(sim.read_field(regs::CCM_422TO420_CTRL, ccm::BYPASS), 0);
    }

    #[test]
    fn yuv444_runs_only_the_matrix() {
        let sim = SimRegisters::new();
        configure_chain(&sim, HwFormat::Yuv444);
        assert_eq!(sim.read_field(regs::CCM_RGB2YUV_CTRL, ccm::BYPASS), 0);
        assert_eq!(sim.read_field(regs::CCM_444TO422_CTRL, ccm::BYPASS), 1);
        assert_eq!(sim.read_field(regs::CCM_422TO420_CTRL, ccm::BYPASS), 1);
    }

    #[test]
    fn rgb_output_bypasses_everything() {
        let sim = SimRegisters::new();
        configure_chain(&sim, HwFormat::Rgb);
        assert_eq!(sim.read_field(regs::CCM_RGB2YUV_CTRL, ccm::BYPASS), 1);
        assert_eq!(sim.read_field(regs::CCM_444TO422_CTRL, ccm::BYPASS), 1);
        assert_eq!(sim.read_field(regs::CCM_422TO420_CTRL, ccm::BYPASS), 1);
    }

    #[test]
    fn matrix_rows_land_in_their_registers() {
        let sim = SimRegisters::new();
        configure_chain(&sim, HwFormat::Yuv444);
        let row0 = sim.read32(regs::CCM_RGB2YUV_COEF[0]);
        let expect = ccm::BT601_COEF[0][0]
            | (ccm::BT601_COEF[0][1] << 10)
            | (ccm::BT601_COEF[0][2] << 20);
        assert_eq!(row0, expect);
    }
}
