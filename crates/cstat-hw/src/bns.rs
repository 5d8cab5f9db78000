//! Binning scaler (BNS) ratio search and configuration.
//!
//! The search is greedy over the five ratios, coarsest reduction first:
//! accept the first ratio whose output still satisfies the downstream
//! minimum size, or the configured floor ratio if none does. The result
//! is "as much binning as the consumers tolerate", minimizing data volume
//! through the rest of the pipeline.

use crate::crop::CropRect;
use crate::regio::{RegisterBase, RegisterValue};
use cstat_chip::bns::BnsRatio;
use cstat_chip::regs::{self, bns};
use tracing::debug;

/// Minimum output size the binned image must still satisfy.
#[derive(Debug, Clone, Copy)]
pub struct MinOutput {
    /// Minimum width.
    pub w: u32,
    /// Minimum height.
    pub h: u32,
}

/// Pick the binning ratio for an input crop.
///
/// Ratios are tried coarsest first ([`BnsRatio::SEARCH_ORDER`]); the first
/// whose truncated output meets `min` wins. `floor` bounds the search: a
/// ratio at or finer than the floor is accepted unconditionally, so the
/// search always terminates with a valid ratio.
#[must_use]
pub fn select_ratio(input: &CropRect, min: MinOutput, floor: BnsRatio) -> BnsRatio {
    for ratio in BnsRatio::SEARCH_ORDER {
        let out_w = ratio.scale(input.w);
        let out_h = ratio.scale(input.h);
        if (out_w >= min.w && out_h >= min.h) || ratio <= floor {
            return ratio;
        }
    }
    // SEARCH_ORDER ends at x1.0, which always satisfies `ratio <= floor`.
    BnsRatio::X1_0
}

/// Program the BNS block for a chosen ratio.
///
/// Returns the binned output crop (offset scaled alongside the size) so
/// the caller can feed the dependent DMA-output size fields; the original
/// crop is left untouched.
pub fn configure(
    base: &impl RegisterBase,
    ratio: BnsRatio,
    input: &CropRect,
) -> CropRect {
    let factor = ratio.factor();
    let out = CropRect {
        x: ratio.scale(input.x),
        y: ratio.scale(input.y),
        w: ratio.scale(input.w),
        h: ratio.scale(input.h),
    };

    RegisterValue::new()
        .set(bns::FACTOR_X, factor.code)
        .set(bns::FACTOR_Y, factor.code)
        .commit(base, regs::BNS_CONFIG);

    write_weights(base, &regs::BNS_WEIGHT_X, &factor.weights);
    write_weights(base, &regs::BNS_WEIGHT_Y, &factor.weights);

    RegisterValue::new()
        .set(bns::OUT_W, out.w)
        .set(bns::OUT_H, out.h)
        .commit(base, regs::BNS_OUTPUT_SIZE);
    RegisterValue::new()
        .set(bns::GAP, bns::LINE_GAP_CYCLES)
        .commit(base, regs::BNS_LINE_GAP);

    // Only the exact no-binning ratio bypasses the scaler datapath.
    let bypass = u32::from(ratio == BnsRatio::X1_0);
    base.write_field(regs::BNS_CTRL, bns::BYPASS, bypass);

    debug!(?ratio, out_w = out.w, out_h = out.h, bypass, "BNS configured");
    out
}

/// Pack the 11-tap kernel into three registers: 4 + 4 + 3 lanes.
fn write_weights(base: &impl RegisterBase, dest: &[usize; 3], weights: &[u32; 11]) {
    for (reg_idx, &offset) in dest.iter().enumerate() {
        let mut image = RegisterValue::new();
        for lane in 0..4 {
            let tap = reg_idx * 4 + lane;
            if tap < weights.len() {
                image = image.set(bns::WEIGHT_LANE[lane], weights[tap]);
            }
        }
        image.commit(base, offset);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::regio::SimRegisters;

    const LMEDS_MIN: MinOutput = MinOutput { w: 2016, h: 1512 };

    #[test]
    fn full_sensor_takes_max_binning_on_first_try() {
        // 4032/8*4 = 2016, 3024/8*4 = 1512: the coarsest ratio meets the
        // minimum exactly, so the search stops there.
        let input = CropRect { x: 0, y: 0, w: 4032, h: 3024 };
        assert_eq!(select_ratio(&input, LMEDS_MIN, BnsRatio::X1_0), BnsRatio::X2_0);
    }

    #[test]
    fn search_is_greedy_toward_coarser_ratios() {
        // 3000x2250: x2.0 gives 1500x1124 (< min), x1.75 gives 1712x1284
        // (< min), x1.5 gives 2000x1500 (< min), x1.25 gives 2400x1800
        // (>= min) — first acceptable ratio wins.
        let input = CropRect { x: 0, y: 0, w: 3000, h: 2250 };
        assert_eq!(select_ratio(&input, LMEDS_MIN, BnsRatio::X1_0), BnsRatio::X1_25);
    }

    #[test]
    fn floor_ratio_short_circuits_the_search() {
        // Even though no ratio reaches the minimum, the floor is accepted.
        let input = CropRect { x: 0, y: 0, w: 1000, h: 800 };
        assert_eq!(
            select_ratio(&input, LMEDS_MIN, BnsRatio::X1_5),
            BnsRatio::X1_5
        );
    }

    #[test]
    fn tiny_input_falls_through_to_no_binning() {
        let input = CropRect { x: 0, y: 0, w: 640, h: 480 };
        assert_eq!(select_ratio(&input, LMEDS_MIN, BnsRatio::X1_0), BnsRatio::X1_0);
    }

    #[test]
    fn configure_returns_binned_crop_without_mutating_input() {
        let sim = SimRegisters::new();
        let input = CropRect { x: 16, y: 8, w: 4032, h: 3024 };
        let out = configure(&sim, BnsRatio::X2_0, &input);

        assert_eq!(out, CropRect { x: 8, y: 4, w: 2016, h: 1512 });
        assert_eq!(input.w, 4032); // caller's crop untouched

        let size = sim.read32(regs::BNS_OUTPUT_SIZE);
        assert_eq!(bns::OUT_W.extract(size), 2016);
        assert_eq!(bns::OUT_H.extract(size), 1512);
    }

    #[test]
    fn weight_packing_uses_three_registers_per_axis() {
        let sim = SimRegisters::new();
        configure(&sim, BnsRatio::X2_0, &CropRect { x: 0, y: 0, w: 4032, h: 3024 });

        let w = BnsRatio::X2_0.factor().weights;
        // First register: taps 0..4 in 8-bit lanes.
        let r0 = sim.read32(regs::BNS_WEIGHT_X[0]);
        assert_eq!(r0, w[0] | (w[1] << 8) | (w[2] << 16) | (w[3] << 24));
        // Last register: taps 8..11, top lane empty.
        let r2 = sim.read32(regs::BNS_WEIGHT_X[2]);
        assert_eq!(r2, w[8] | (w[9] << 8) | (w[10] << 16));
    }

    #[test]
    fn only_unity_ratio_bypasses() {
        let sim = SimRegisters::new();
        configure(&sim, BnsRatio::X1_0, &CropRect { x: 0, y: 0, w: 640, h: 480 });
        assert_eq!(sim.read_field(regs::BNS_CTRL, bns::BYPASS), 1);

        configure(&sim, BnsRatio::X1_5, &CropRect { x: 0, y: 0, w: 640, h: 480 });
        assert_eq!(sim.read_field(regs::BNS_CTRL, bns::BYPASS), 0);
    }
}
