//! Binning scaler (BNS) factor codes, dividers and weight tables.
//!
//! The BNS reduces bayer data volume early in the pipeline with one of
//! five fixed ratios. Output size is `in / divider * multiplier` with
//! truncating integer arithmetic, matching the hardware's fixed-point
//! datapath exactly. Each ratio loads an 11-tap weight kernel.

/// One of the five supported binning ratios, finest reduction last.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum BnsRatio {
    /// No binning (x1.0).
    X1_0,
    /// x1.25 reduction.
    X1_25,
    /// x1.5 reduction.
    X1_5,
    /// x1.75 reduction.
    X1_75,
    /// x2.0 reduction.
    X2_0,
}

/// Fixed datapath parameters of one ratio.
#[derive(Debug, Clone, Copy)]
pub struct BnsFactor {
    /// Value programmed into `BNS_CONFIG.FACTOR_X/Y`.
    pub code: u32,
    /// Input divider.
    pub divider: u32,
    /// Output multiplier.
    pub multiplier: u32,
    /// 11-tap kernel, Q0.7 weights summing to 128.
    pub weights: [u32; 11],
}

impl BnsRatio {
    /// Search order: coarsest reduction first, so the search settles on the
    /// most binning whose output still satisfies the downstream minimum.
    pub const SEARCH_ORDER: [Self; 5] = [
        Self::X2_0,
        Self::X1_75,
        Self::X1_5,
        Self::X1_25,
        Self::X1_0,
    ];

    /// Datapath parameters for this ratio.
    #[must_use]
    pub const fn factor(self) -> BnsFactor {
        match self {
            Self::X1_0 => BnsFactor {
                code: 0,
                divider: 4,
                multiplier: 4,
                weights: [0, 0, 0, 0, 0, 128, 0, 0, 0, 0, 0],
            },
            Self::X1_25 => BnsFactor {
                code: 1,
                divider: 5,
                multiplier: 4,
                weights: [0, 0, 2, 12, 32, 36, 32, 12, 2, 0, 0],
            },
            Self::X1_5 => BnsFactor {
                code: 2,
                divider: 6,
                multiplier: 4,
                weights: [0, 2, 6, 16, 24, 32, 24, 16, 6, 2, 0],
            },
            Self::X1_75 => BnsFactor {
                code: 3,
                divider: 7,
                multiplier: 4,
                weights: [2, 4, 8, 16, 22, 24, 22, 16, 8, 4, 2],
            },
            Self::X2_0 => BnsFactor {
                code: 4,
                divider: 8,
                multiplier: 4,
                weights: [4, 6, 10, 14, 18, 24, 18, 14, 10, 6, 4],
            },
        }
    }

    /// Scale one dimension through this ratio (truncating, as in hardware).
    #[must_use]
    pub const fn scale(self, value: u32) -> u32 {
        let f = self.factor();
        value / f.divider * f.multiplier
    }
}
