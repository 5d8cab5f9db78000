//! LIC (line-buffer interface controller) constants and SRAM geometry.
//!
//! The LIC decouples sensor input timing from core processing timing with
//! SRAM-backed line buffers shared by up to four input contexts.

/// Number of input contexts sharing the line-buffer SRAM.
pub const CONTEXT_COUNT: usize = 4;

/// Virtual-line preemption threshold base for STATIC mode, in SRAM words.
pub const STATIC_THRESHOLD_BASE: u32 = 512;
/// Virtual-line preemption threshold for DYNAMIC mode.
pub const DYNAMIC_THRESHOLD: u32 = 1024;

/// Maximum input-priority weight, programmed when line limiting is off.
pub const MAX_PRIORITY_WEIGHT: u32 = 0xFF;
/// Output hold cycles.
pub const OUTPUT_HOLD_CYCLES: u32 = 2;
/// Output horizontal blank cycles.
pub const OUTPUT_HBLANK_CYCLES: u32 = 45;
/// Output disable mask.
pub const OUTPUT_DISABLE_MASK: u32 = 0x0;

/// Pre-binning SRAM window size in words.
pub const SRAM_PRE_WINDOW: u32 = 16384;
/// Pre-binning offset alignment in pixels.
pub const SRAM_PRE_ALIGN: u32 = 32;
/// Post-binning SRAM window size in words.
pub const SRAM_POST_WINDOW: u32 = 8192;
/// Post-binning offset alignment in pixels.
pub const SRAM_POST_ALIGN: u32 = 16;

/// Per-channel line-buffer offsets before the binning scaler.
pub const SRAM_OFFSETS_PRE: [u32; CONTEXT_COUNT] = [0, 5440, 10880, 16320];
/// Per-channel line-buffer offsets after the binning scaler.
pub const SRAM_OFFSETS_POST: [u32; CONTEXT_COUNT] = [0, 2720, 5440, 8160];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pre_offsets_fit_window_and_alignment() {
        for off in SRAM_OFFSETS_PRE {
            assert!(off < SRAM_PRE_WINDOW);
            assert_eq!(off % SRAM_PRE_ALIGN, 0);
        }
    }

    #[test]
    fn post_offsets_fit_window_and_alignment() {
        for off in SRAM_OFFSETS_POST {
            assert!(off < SRAM_POST_WINDOW);
            assert_eq!(off % SRAM_POST_ALIGN, 0);
        }
    }

    #[test]
    fn offsets_are_monotonic() {
        assert!(SRAM_OFFSETS_PRE.windows(2).all(|w| w[0] < w[1]));
        assert!(SRAM_OFFSETS_POST.windows(2).all(|w| w[0] < w[1]));
    }
}
