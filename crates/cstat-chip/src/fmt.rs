//! Pixel format model: hardware format family, bit width, pixel order,
//! and SBWC compression mode.
//!
//! Capability masks in [`crate::dma`] are bitmasks over the per-family
//! format codes defined here, one bit per code.

/// Hardware format family as seen by the DMA engines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HwFormat {
    /// Raw bayer mosaic.
    Bayer,
    /// YUV 4:4:4.
    Yuv444,
    /// YUV 4:2:2.
    Yuv422,
    /// YUV 4:2:0.
    Yuv420,
    /// Interleaved or planar RGB.
    Rgb,
}

/// Memory ordering of the pixel components.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelOrder {
    /// Component order follows the bayer CFA pattern.
    Cfa,
    /// Y then interleaved CbCr.
    YCbCr,
    /// Y then interleaved CrCb.
    YCrCb,
    /// Interleaved ARGB.
    Argb,
    /// Interleaved RGBA.
    Rgba,
    /// Planar BGR. An 8-bit RGB in this order is stride-compatible with
    /// YUV444 3-plane and is handled as such (see `is_yuv_for_stride`).
    BgrPlanar,
}

/// SBWC compression mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SbwcMode {
    /// Uncompressed.
    None,
    /// Lossless block compression: payload plus per-block header region.
    Lossless,
    /// Lossy block compression at a fixed rate, no header region.
    Lossy,
}

impl SbwcMode {
    /// Hardware encoding of the compression mode (0 / 1 / 2).
    #[must_use]
    pub const fn code(self) -> u32 {
        match self {
            Self::None => 0,
            Self::Lossless => 1,
            Self::Lossy => 2,
        }
    }
}

/// One DMA pixel format as negotiated by the parameter set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelFormat {
    /// Format family.
    pub hw: HwFormat,
    /// Bits per component (8, 10, 12, 14).
    pub bit_width: u32,
    /// Packed (true) or 16-bit-unpacked (false) bayer storage.
    pub packed: bool,
    /// Component ordering.
    pub order: PixelOrder,
    /// Plane count in memory.
    pub planes: u32,
}

/// Bayer format codes. One bit each in the bayer capability mask, and the
/// value programmed into the DMA format register.
pub mod bayer {
    /// 8-bit packed.
    pub const U8_PACK: u32 = 0;
    /// 8-bit stored in 16-bit words.
    pub const U8_UNPACK: u32 = 1;
    /// 10-bit packed.
    pub const U10_PACK: u32 = 2;
    /// 10-bit stored in 16-bit words.
    pub const U10_UNPACK: u32 = 3;
    /// 12-bit packed.
    pub const U12_PACK: u32 = 4;
    /// 12-bit stored in 16-bit words.
    pub const U12_UNPACK: u32 = 5;
    /// 14-bit packed.
    pub const U14_PACK: u32 = 6;
    /// 14-bit stored in 16-bit words.
    pub const U14_UNPACK: u32 = 7;
}

/// YUV format codes.
pub mod yuv {
    /// 4:4:4 single plane.
    pub const YUV444_1P: u32 = 0;
    /// 4:4:4 three planes.
    pub const YUV444_3P: u32 = 1;
    /// 4:2:2 single plane.
    pub const YUV422_1P: u32 = 2;
    /// 4:2:2 two planes.
    pub const YUV422_2P: u32 = 3;
    /// 4:2:0 two planes.
    pub const YUV420_2P: u32 = 4;
    /// 4:2:0 three planes.
    pub const YUV420_3P: u32 = 5;
}

/// RGB format codes.
pub mod rgb {
    /// 8-bit interleaved RGBA.
    pub const RGBA8888: u32 = 0;
    /// 8-bit interleaved ARGB.
    pub const ARGB8888: u32 = 1;
    /// 8-bit planar BGR.
    pub const BGR888_PLANAR: u32 = 2;
}

/// Resolve the bayer DMA format code for a bit width / packing pair.
///
/// Returns `None` for bit widths the bayer path cannot express; callers
/// treat that as a soft failure and disable the channel.
#[must_use]
pub const fn bayer_code(bit_width: u32, packed: bool) -> Option<u32> {
    match (bit_width, packed) {
        (8, true) => Some(bayer::U8_PACK),
        (8, false) => Some(bayer::U8_UNPACK),
        (10, true) => Some(bayer::U10_PACK),
        (10, false) => Some(bayer::U10_UNPACK),
        (12, true) => Some(bayer::U12_PACK),
        (12, false) => Some(bayer::U12_UNPACK),
        (14, true) => Some(bayer::U14_PACK),
        (14, false) => Some(bayer::U14_UNPACK),
        _ => None,
    }
}

/// Resolve the YUV DMA format code for a family / plane-count pair.
#[must_use]
pub const fn yuv_code(hw: HwFormat, planes: u32) -> Option<u32> {
    match (hw, planes) {
        (HwFormat::Yuv444, 1) => Some(yuv::YUV444_1P),
        (HwFormat::Yuv444, 3) => Some(yuv::YUV444_3P),
        (HwFormat::Yuv422, 1) => Some(yuv::YUV422_1P),
        (HwFormat::Yuv422, 2) => Some(yuv::YUV422_2P),
        (HwFormat::Yuv420, 2) => Some(yuv::YUV420_2P),
        (HwFormat::Yuv420, 3) => Some(yuv::YUV420_3P),
        _ => None,
    }
}

/// Resolve the RGB DMA format code for a pixel order.
#[must_use]
pub const fn rgb_code(order: PixelOrder) -> Option<u32> {
    match order {
        PixelOrder::Rgba => Some(rgb::RGBA8888),
        PixelOrder::Argb => Some(rgb::ARGB8888),
        PixelOrder::BgrPlanar => Some(rgb::BGR888_PLANAR),
        _ => None,
    }
}

/// True when the format should take the RGB write path.
#[must_use]
pub const fn is_rgb(fmt: &PixelFormat) -> bool {
    matches!(fmt.hw, HwFormat::Rgb) && !is_yuv_for_stride(fmt)
}

/// True when the format takes the YUV stride path.
///
/// The 8-bit planar-BGR RGB format is handled as YUV444 3-plane here.
/// This mirrors the hardware contract ("8bit RGB planar format is handled
/// as YUV444 3p format"); the rationale is undocumented upstream, so the
/// behavior is preserved exactly. Do not "fix" without hardware-team
/// confirmation.
#[must_use]
pub const fn is_yuv_for_stride(fmt: &PixelFormat) -> bool {
    match fmt.hw {
        HwFormat::Yuv444 | HwFormat::Yuv422 | HwFormat::Yuv420 => true,
        HwFormat::Rgb => {
            matches!(fmt.order, PixelOrder::BgrPlanar) && fmt.bit_width == 8
        }
        HwFormat::Bayer => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bayer_code_rejects_odd_widths() {
        assert!(bayer_code(9, true).is_none());
        assert!(bayer_code(16, false).is_none());
        assert_eq!(bayer_code(12, true), Some(bayer::U12_PACK));
    }

    #[test]
    fn family_codes_need_a_matching_plane_count() {
        assert_eq!(yuv_code(HwFormat::Yuv420, 2), Some(yuv::YUV420_2P));
        assert_eq!(yuv_code(HwFormat::Yuv420, 1), None);
        assert_eq!(yuv_code(HwFormat::Bayer, 1), None);
        assert_eq!(rgb_code(PixelOrder::BgrPlanar), Some(rgb::BGR888_PLANAR));
        assert_eq!(rgb_code(PixelOrder::Cfa), None);
    }

    #[test]
    fn bgr_planar_8bit_is_yuv_for_stride() {
        let quirky = PixelFormat {
            hw: HwFormat::Rgb,
            bit_width: 8,
            packed: true,
            order: PixelOrder::BgrPlanar,
            planes: 3,
        };
        assert!(is_yuv_for_stride(&quirky));
        assert!(!is_rgb(&quirky));

        // 10-bit planar BGR stays on the RGB path.
        let deep = PixelFormat { bit_width: 10, ..quirky };
        assert!(!is_yuv_for_stride(&deep));
        assert!(is_rgb(&deep));
    }
}
