//! DMA configuration and format negotiation.
//!
//! The engine never touches DMA engine registers directly: it sequences
//! calls against the externally-owned [`DmaOps`] object, exactly as the
//! block-level code orders them. What lives here is the policy: which
//! channel accepts which formats, stride and payload arithmetic for plain
//! and SBWC-compressed buffers, address-array layout for FRO
//! multi-buffering, and the downscale output-size negotiation.

use crate::crop::CropRect;
use crate::csconv;
use crate::error::{CstatError, Result};
use crate::regio::RegisterBase;
use crate::scaler::{self, DownscaleConfig, Downscaler};
use cstat_chip::bns::BnsRatio;
use cstat_chip::dma::DmaChannel;
use cstat_chip::fmt::{
    bayer_code, is_yuv_for_stride, rgb_code, yuv_code, HwFormat, PixelFormat, SbwcMode,
};
use tracing::{debug, warn};

/// Max planes per DMA format.
pub const MAX_PLANES: usize = 4;
/// Max FRO buffers in flight.
pub const MAX_BUFFERS: usize = 8;

/// Parameter-set command for one DMA channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DmaCommand {
    /// Program and enable the channel.
    Enable,
    /// Leave the channel off. Not an error.
    Disable,
}

/// Per-channel slice of the parameter set, caller-owned and rebuilt every
/// frame.
#[derive(Debug, Clone)]
pub struct DmaParam {
    /// Enable or disable this channel.
    pub cmd: DmaCommand,
    /// Negotiated pixel format.
    pub format: PixelFormat,
    /// SBWC compression mode.
    pub sbwc: SbwcMode,
    /// Lossy compression rate hint in percent (ignored unless lossy).
    pub comp_rate: u32,
    /// Image width in pixels.
    pub width: u32,
    /// Image height in lines.
    pub height: u32,
    /// Nominal crop for the downscale channels.
    pub crop: CropRect,
    /// Requested output width (downscale channels).
    pub out_w: u32,
    /// Requested output height (downscale channels).
    pub out_h: u32,
    /// Device virtual addresses, buffer-major: `dva[buffer * planes + plane]`.
    pub dva: Vec<u64>,
    /// Plane count.
    pub num_planes: u32,
    /// FRO buffers in flight.
    pub num_buffers: u32,
    /// First buffer index for this trigger.
    pub buffer_index: u32,
    /// Stream through the VOTF interconnect instead of DRAM.
    pub votf: bool,
}

/// The externally-owned generic DMA engine object.
///
/// This layer only decides the call sequence and the values; the engine
/// owns its own registers.
pub trait DmaOps {
    /// Program the pixel format code.
    fn set_format(&mut self, code: u32) -> Result<()>;
    /// Program image width/height.
    fn set_size(&mut self, width: u32, height: u32) -> Result<()>;
    /// Program the stride of one plane.
    fn set_img_stride(&mut self, plane: u32, stride: u32) -> Result<()>;
    /// Program the SBWC header stride (lossless only).
    fn set_header_stride(&mut self, stride: u32) -> Result<()>;
    /// Program the SBWC mode code (0 none, 1 lossless, 2 lossy).
    fn set_comp_sbwc_en(&mut self, code: u32) -> Result<()>;
    /// Program 64-byte payload alignment (compressed modes).
    fn set_comp_64b_align(&mut self, align: bool) -> Result<()>;
    /// Program the lossy compression rate hint.
    fn set_comp_rate(&mut self, rate: u32) -> Result<()>;
    /// Program the per-buffer payload address array of one plane.
    fn set_img_addr(&mut self, plane: u32, addrs: &[u64]) -> Result<()>;
    /// Program the per-buffer SBWC header address array of one plane.
    fn set_header_addr(&mut self, plane: u32, addrs: &[u64]) -> Result<()>;
    /// Enable or disable VOTF streaming.
    fn votf_enable(&mut self, enable: bool) -> Result<()>;
    /// Enable or disable the engine.
    fn enable(&mut self, enable: bool) -> Result<()>;
}

// ── Stride / payload arithmetic ──────────────────────────────────────────────

/// SBWC compression block width in pixels.
pub const SBWC_BLOCK_PX: u32 = 32;

const fn align(v: u32, a: u32) -> u32 {
    v.div_ceil(a) * a
}

/// Stride of an uncompressed plane.
///
/// Packed bayer stores `bit_width` bits per pixel; unpacked widens every
/// sample to a 16-bit word. YUV-path formats (including the 8-bit planar
/// BGR special case) are always byte-per-component.
#[must_use]
pub fn plain_stride(fmt: &PixelFormat, width: u32) -> u32 {
    let row_bytes = if is_yuv_for_stride(fmt) {
        width
    } else if fmt.packed {
        (width * fmt.bit_width).div_ceil(8)
    } else {
        width * 2
    };
    align(row_bytes, 16)
}

/// Payload stride of an SBWC-compressed plane.
#[must_use]
pub fn sbwc_payload_stride(width: u32, bit_width: u32, mode: SbwcMode, comp_rate: u32) -> u32 {
    let blocks = width.div_ceil(SBWC_BLOCK_PX);
    let lossless = align(blocks * SBWC_BLOCK_PX * bit_width / 8, 64);
    match mode {
        SbwcMode::Lossy => align(lossless * comp_rate / 100, 64),
        _ => lossless,
    }
}

/// Header stride of a lossless SBWC plane: two header bytes per block.
#[must_use]
pub fn sbwc_header_stride(width: u32) -> u32 {
    align(width.div_ceil(SBWC_BLOCK_PX) * 2, 16)
}

// ── Address-array programming ────────────────────────────────────────────────

/// Program the per-plane, per-buffer address arrays.
///
/// The payload layout convention for SBWC puts the per-block header
/// region immediately after each plane's payload, so header addresses are
/// `payload + payload_size[plane]` — the offset is per plane, never per
/// buffer.
///
/// # Errors
///
/// Propagates [`DmaOps`] failures; rejects a DVA array shorter than
/// `num_buffers * num_planes`.
pub fn program_addresses(
    ops: &mut dyn DmaOps,
    param: &DmaParam,
    payload_size: &[u64],
) -> Result<()> {
    let planes = param.num_planes as usize;
    let buffers = param.num_buffers as usize;
    if param.dva.len() < planes * buffers {
        return Err(CstatError::invalid_config(format!(
            "DVA array holds {} addresses, need {}",
            param.dva.len(),
            planes * buffers
        )));
    }

    let mut addrs = [0u64; MAX_BUFFERS];
    for plane in 0..planes {
        for buf in 0..buffers {
            let idx = (param.buffer_index as usize + buf) % buffers;
            addrs[buf] = param.dva[idx * planes + plane];
        }
        ops.set_img_addr(plane as u32, &addrs[..buffers])?;
    }

    if param.sbwc != SbwcMode::None {
        let mut headers = [0u64; MAX_BUFFERS];
        for plane in 0..planes {
            let offset = payload_size.get(plane).copied().unwrap_or(0);
            for buf in 0..buffers {
                let idx = (param.buffer_index as usize + buf) % buffers;
                headers[buf] = param.dva[idx * planes + plane] + offset;
            }
            ops.set_header_addr(plane as u32, &headers[..buffers])?;
        }
    }

    Ok(())
}

// ── Read DMA ─────────────────────────────────────────────────────────────────

/// Configure the bayer read channel.
///
/// A `Disable` command turns the engine off and succeeds. A format the
/// bayer path cannot express also turns the engine off and succeeds:
/// degrading one input beats stalling the capture pipeline, and the
/// parameter-set producer sees the condition in the log.
///
/// # Errors
///
/// Returns [`CstatError::InvalidChannel`] for anything but the plain
/// bayer reader (the lossy reader exists in silicon but has no driver
/// path), and propagates [`DmaOps`] failures.
pub fn configure_rdma(
    ops: &mut dyn DmaOps,
    channel: DmaChannel,
    param: &DmaParam,
) -> Result<()> {
    match channel {
        DmaChannel::RdmaBayer => {}
        DmaChannel::RdmaBayerLoss => {
            return Err(CstatError::InvalidChannel {
                name: channel.name(),
                reason: "lossy bayer read is not supported",
            });
        }
        other => {
            return Err(CstatError::InvalidChannel {
                name: other.name(),
                reason: "not a read channel",
            });
        }
    }

    if param.cmd == DmaCommand::Disable {
        ops.enable(false)?;
        return Ok(());
    }

    let Some(code) = bayer_code(param.format.bit_width, param.format.packed) else {
        warn!(
            channel = channel.name(),
            bit_width = param.format.bit_width,
            "bayer format unresolvable; disabling channel"
        );
        ops.enable(false)?;
        return Ok(());
    };

    ops.set_format(code)?;
    ops.set_comp_sbwc_en(param.sbwc.code())?;
    ops.set_size(param.width, param.height)?;

    let mut payload_size = [0u64; MAX_PLANES];
    match param.sbwc {
        SbwcMode::None => {
            let stride = plain_stride(&param.format, param.width);
            for plane in 0..param.num_planes {
                ops.set_img_stride(plane, stride)?;
            }
        }
        SbwcMode::Lossless => {
            let payload =
                sbwc_payload_stride(param.width, param.format.bit_width, param.sbwc, 0);
            for plane in 0..param.num_planes {
                ops.set_img_stride(plane, payload)?;
                payload_size[plane as usize] = u64::from(payload) * u64::from(param.height);
            }
            ops.set_comp_64b_align(true)?;
            ops.set_header_stride(sbwc_header_stride(param.width))?;
        }
        SbwcMode::Lossy => {
            let payload = sbwc_payload_stride(
                param.width,
                param.format.bit_width,
                param.sbwc,
                param.comp_rate,
            );
            for plane in 0..param.num_planes {
                ops.set_img_stride(plane, payload)?;
                payload_size[plane as usize] = u64::from(payload) * u64::from(param.height);
            }
            ops.set_comp_64b_align(true)?;
            ops.set_comp_rate(param.comp_rate)?;
        }
    }

    ops.votf_enable(param.votf)?;
    program_addresses(ops, param, &payload_size[..param.num_planes as usize])?;
    ops.enable(true)?;

    debug!(channel = channel.name(), w = param.width, h = param.height, "RDMA configured");
    Ok(())
}

// ── Downscale output negotiation ─────────────────────────────────────────────

/// Clamp a requested downscale output to what the hardware and the binned
/// input allow. A true minimum: applying it twice yields the same value.
#[must_use]
pub const fn clamp_ds_output(max: u32, input: u32, requested: u32) -> u32 {
    let m = if max < input { max } else { input };
    if m < requested {
        m
    } else {
        requested
    }
}

const fn ds_block(channel: DmaChannel) -> Option<Downscaler> {
    match channel {
        DmaChannel::WdmaLmeDs0 => Some(Downscaler::Lme),
        DmaChannel::WdmaFdPig => Some(Downscaler::FdPyramid),
        DmaChannel::WdmaCds => Some(Downscaler::Cds),
        _ => None,
    }
}

/// Resolve and program a downscale write path.
///
/// The channel's nominal crop is first carried through the chosen BNS
/// ratio (same truncating arithmetic as the BNS search), the requested
/// output is clamped to `min(hardware max, binned input, requested)`, and
/// the matching downscaler block is programmed. Returns the negotiated
/// output size so downstream consumers see the real size, not the
/// requested one.
pub fn resolve_ds_size(
    base: &impl RegisterBase,
    channel: DmaChannel,
    param: &DmaParam,
    ratio: BnsRatio,
) -> Result<(u32, u32)> {
    let Some(block) = ds_block(channel) else {
        return Err(CstatError::InvalidChannel {
            name: channel.name(),
            reason: "not a downscale channel",
        });
    };

    let input = CropRect {
        x: ratio.scale(param.crop.x),
        y: ratio.scale(param.crop.y),
        w: ratio.scale(param.crop.w),
        h: ratio.scale(param.crop.h),
    };
    let (max_w, max_h) = block.max_output();
    let out_w = clamp_ds_output(max_w, input.w, param.out_w);
    let out_h = clamp_ds_output(max_h, input.h, param.out_h);

    let cfg = DownscaleConfig::from_sizes(input, out_w, out_h);
    scaler::configure(base, block, param.cmd == DmaCommand::Enable, &cfg);

    debug!(
        channel = channel.name(),
        out_w, out_h, "downscale output negotiated"
    );
    Ok((out_w, out_h))
}

// ── Write DMA ────────────────────────────────────────────────────────────────

/// Configure one write channel.
///
/// Deprecated channels and `Disable` commands succeed without touching
/// hardware (legacy parameter sets keep working). Downscale channels run
/// the size negotiation first and the CDS channel also programs the color
/// conversion chain. Returns the negotiated output size for downscale
/// channels, `None` otherwise.
///
/// # Errors
///
/// Returns [`CstatError::InvalidChannel`] for read channels, and
/// propagates [`DmaOps`] failures.
pub fn configure_wdma(
    base: &impl RegisterBase,
    ops: &mut dyn DmaOps,
    channel: DmaChannel,
    param: &DmaParam,
    ratio: BnsRatio,
) -> Result<Option<(u32, u32)>> {
    if channel.is_read() {
        return Err(CstatError::InvalidChannel {
            name: channel.name(),
            reason: "not a write channel",
        });
    }

    if channel.is_deprecated() {
        warn!(channel = channel.name(), "deprecated channel ignored");
        return Ok(None);
    }

    if param.cmd == DmaCommand::Disable {
        ops.enable(false)?;
        if ds_block(channel).is_some() {
            // Keep the downscaler bypass in step with the disabled DMA.
            resolve_ds_size(base, channel, param, ratio)?;
        }
        return Ok(None);
    }

    let Some(code) = resolve_write_format(channel, &param.format) else {
        warn!(
            channel = channel.name(),
            format = ?param.format.hw,
            "format not in channel capability mask; disabling channel"
        );
        ops.enable(false)?;
        return Ok(None);
    };

    let negotiated = match ds_block(channel) {
        Some(block) => {
            let (w, h) = resolve_ds_size(base, channel, param, ratio)?;
            if block == Downscaler::Cds {
                csconv::configure_chain(base, param.format.hw);
            }
            Some((w, h))
        }
        None => None,
    };

    let (width, height) = negotiated.unwrap_or((param.width, param.height));
    ops.set_format(code)?;
    ops.set_comp_sbwc_en(SbwcMode::None.code())?;
    ops.set_size(width, height)?;

    let stride = plain_stride(&param.format, width);
    for plane in 0..param.num_planes {
        ops.set_img_stride(plane, stride)?;
    }

    ops.votf_enable(param.votf)?;
    // Write engines run uncompressed; carry that through to the address
    // programming so a leftover SBWC request cannot add header arrays.
    let plain = DmaParam { sbwc: SbwcMode::None, ..param.clone() };
    program_addresses(ops, &plain, &[])?;
    ops.enable(true)?;

    debug!(channel = channel.name(), width, height, "WDMA configured");
    Ok(negotiated)
}

/// Resolve the format code for a write channel and check it against the
/// channel's capability mask.
///
/// Bayer-container stat channels resolve through the bayer table; image
/// outputs use their family code. The planar-BGR quirk lives in the
/// stride path only; the code stays in the RGB family. `None` means the
/// channel cannot carry the format and the engine gets soft-disabled.
fn resolve_write_format(channel: DmaChannel, format: &PixelFormat) -> Option<u32> {
    let map = channel.format_map();
    let (mask, code) = match format.hw {
        HwFormat::Bayer => (map.bayer, bayer_code(format.bit_width, format.packed)?),
        HwFormat::Yuv444 | HwFormat::Yuv422 | HwFormat::Yuv420 => {
            (map.yuv, yuv_code(format.hw, format.planes)?)
        }
        HwFormat::Rgb => (map.rgb, rgb_code(format.order)?),
    };
    (mask & (1 << code) != 0).then_some(code)
}
