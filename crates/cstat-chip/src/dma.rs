//! DMA channel identities and per-channel format capability masks.
//!
//! CSTAT exposes 13 DMA endpoints: two bayer readers and eleven
//! statistics/image writers. Each channel carries its register block
//! offset, a human-readable name, and three capability masks (bayer /
//! YUV / RGB) over the format codes in [`crate::fmt`].

use crate::fmt::{bayer, rgb, yuv};

/// One CSTAT DMA endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DmaChannel {
    /// Lossy-compressed bayer read. Present in silicon, unsupported by the
    /// driver path.
    RdmaBayerLoss,
    /// Plain bayer read.
    RdmaBayer,
    /// LME downscale write, instance 0.
    WdmaLmeDs0,
    /// LME downscale write, instance 1. Deprecated in v1.0.
    WdmaLmeDs1,
    /// Face-detection-pyramid write.
    WdmaFdPig,
    /// Content-downscale write.
    WdmaCds,
    /// Saturation-flag write. Deprecated in v1.0.
    WdmaSat,
    /// Color-aberration-vector write. Deprecated in v1.0.
    WdmaCav,
    /// DRC grid statistics write.
    WdmaDrcGrid,
    /// Pre-processing thumbnail statistics write.
    WdmaPreThumb,
    /// AWB thumbnail statistics write.
    WdmaAwbThumb,
    /// RGBY histogram statistics write.
    WdmaRgbyHist,
    /// CDAF statistics write.
    WdmaCdaf,
}

/// Format capability of one channel: a bitmask per format family, one bit
/// per format code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FormatMap {
    /// Supported bayer codes.
    pub bayer: u32,
    /// Supported YUV codes.
    pub yuv: u32,
    /// Supported RGB codes.
    pub rgb: u32,
}

const fn bit(code: u32) -> u32 {
    1 << code
}

// Statistics writers move opaque stat records; they accept the 8-bit
// unpacked bayer container and nothing else.
const STAT_ONLY: FormatMap = FormatMap {
    bayer: bit(bayer::U8_UNPACK),
    yuv: 0,
    rgb: 0,
};

impl DmaChannel {
    /// All channels in register-block order.
    pub const ALL: [Self; 13] = [
        Self::RdmaBayerLoss,
        Self::RdmaBayer,
        Self::WdmaLmeDs0,
        Self::WdmaLmeDs1,
        Self::WdmaFdPig,
        Self::WdmaCds,
        Self::WdmaSat,
        Self::WdmaCav,
        Self::WdmaDrcGrid,
        Self::WdmaPreThumb,
        Self::WdmaAwbThumb,
        Self::WdmaRgbyHist,
        Self::WdmaCdaf,
    ];

    /// True for the read direction.
    #[must_use]
    pub const fn is_read(self) -> bool {
        matches!(self, Self::RdmaBayerLoss | Self::RdmaBayer)
    }

    /// Channels dropped from v1.0: configuration requests are accepted and
    /// ignored so legacy parameter sets keep working.
    #[must_use]
    pub const fn is_deprecated(self) -> bool {
        matches!(self, Self::WdmaLmeDs1 | Self::WdmaSat | Self::WdmaCav)
    }

    /// Register block offset of this channel's DMA engine.
    #[must_use]
    pub const fn block_offset(self) -> usize {
        0x1000 + self.index() * 0x100
    }

    /// Position in [`Self::ALL`].
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::RdmaBayerLoss => 0,
            Self::RdmaBayer => 1,
            Self::WdmaLmeDs0 => 2,
            Self::WdmaLmeDs1 => 3,
            Self::WdmaFdPig => 4,
            Self::WdmaCds => 5,
            Self::WdmaSat => 6,
            Self::WdmaCav => 7,
            Self::WdmaDrcGrid => 8,
            Self::WdmaPreThumb => 9,
            Self::WdmaAwbThumb => 10,
            Self::WdmaRgbyHist => 11,
            Self::WdmaCdaf => 12,
        }
    }

    /// Human-readable channel name for diagnostics.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::RdmaBayerLoss => "CSTAT_R_BYR_LOSS",
            Self::RdmaBayer => "CSTAT_R_BYR",
            Self::WdmaLmeDs0 => "CSTAT_W_LMEDS0",
            Self::WdmaLmeDs1 => "CSTAT_W_LMEDS1",
            Self::WdmaFdPig => "CSTAT_W_FDPIG",
            Self::WdmaCds => "CSTAT_W_CDS0",
            Self::WdmaSat => "CSTAT_W_SAT",
            Self::WdmaCav => "CSTAT_W_CAV",
            Self::WdmaDrcGrid => "CSTAT_W_DRCGRID",
            Self::WdmaPreThumb => "CSTAT_W_THSTATPRE",
            Self::WdmaAwbThumb => "CSTAT_W_THSTATAWB",
            Self::WdmaRgbyHist => "CSTAT_W_RGBYHIST",
            Self::WdmaCdaf => "CSTAT_W_CDAF",
        }
    }

    /// Format capability of this channel.
    #[must_use]
    pub const fn format_map(self) -> FormatMap {
        match self {
            // Compressed reader: 10/12/14-bit only, no 8-bit path.
            Self::RdmaBayerLoss => FormatMap {
                bayer: bit(bayer::U10_PACK)
                    | bit(bayer::U10_UNPACK)
                    | bit(bayer::U12_PACK)
                    | bit(bayer::U12_UNPACK)
                    | bit(bayer::U14_PACK)
                    | bit(bayer::U14_UNPACK),
                yuv: 0,
                rgb: 0,
            },
            Self::RdmaBayer => FormatMap {
                bayer: bit(bayer::U8_PACK)
                    | bit(bayer::U8_UNPACK)
                    | bit(bayer::U10_PACK)
                    | bit(bayer::U10_UNPACK)
                    | bit(bayer::U12_PACK)
                    | bit(bayer::U12_UNPACK)
                    | bit(bayer::U14_PACK)
                    | bit(bayer::U14_UNPACK),
                yuv: 0,
                rgb: 0,
            },
            Self::WdmaLmeDs0 | Self::WdmaLmeDs1 => FormatMap {
                bayer: bit(bayer::U8_PACK) | bit(bayer::U8_UNPACK),
                yuv: 0,
                rgb: 0,
            },
            Self::WdmaFdPig => FormatMap {
                bayer: 0,
                yuv: bit(yuv::YUV444_1P),
                rgb: bit(rgb::RGBA8888) | bit(rgb::ARGB8888) | bit(rgb::BGR888_PLANAR),
            },
            Self::WdmaCds => FormatMap {
                bayer: 0,
                yuv: bit(yuv::YUV444_1P)
                    | bit(yuv::YUV444_3P)
                    | bit(yuv::YUV422_1P)
                    | bit(yuv::YUV422_2P)
                    | bit(yuv::YUV420_2P)
                    | bit(yuv::YUV420_3P),
                rgb: bit(rgb::RGBA8888) | bit(rgb::ARGB8888) | bit(rgb::BGR888_PLANAR),
            },
            Self::WdmaSat
            | Self::WdmaCav
            | Self::WdmaDrcGrid
            | Self::WdmaPreThumb
            | Self::WdmaAwbThumb
            | Self::WdmaRgbyHist
            | Self::WdmaCdaf => STAT_ONLY,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn block_offsets_are_distinct() {
        for (i, a) in DmaChannel::ALL.iter().enumerate() {
            for b in &DmaChannel::ALL[i + 1..] {
                assert_ne!(a.block_offset(), b.block_offset());
            }
        }
    }

    #[test]
    fn loss_reader_has_no_8bit_path() {
        let map = DmaChannel::RdmaBayerLoss.format_map();
        assert_eq!(map.bayer & bit(bayer::U8_PACK), 0);
        assert_eq!(map.bayer & bit(bayer::U8_UNPACK), 0);
        assert_ne!(map.bayer & bit(bayer::U10_PACK), 0);
    }

    #[test]
    fn fdpig_is_yuv444_or_rgba_only() {
        let map = DmaChannel::WdmaFdPig.format_map();
        assert_eq!(map.bayer, 0);
        assert_eq!(map.yuv, bit(yuv::YUV444_1P));
        assert_ne!(map.rgb, 0);
    }

    #[test]
    fn exactly_three_deprecated_channels() {
        let n = DmaChannel::ALL.iter().filter(|c| c.is_deprecated()).count();
        assert_eq!(n, 3);
    }
}
