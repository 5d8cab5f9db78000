//! Silicon model for the Exynos Pablo CSTAT v1.0 ISP block.
//!
//! This crate has **no dependencies** and **no hardware access** — it is a
//! pure model of the silicon: register offsets and bit fields, interrupt
//! bit assignments, DMA channel identities and their format capabilities,
//! binning-scaler factor tables, and line-buffer (LIC) SRAM geometry.
//!
//! CSTAT is the Color/Statistics stage of the ISP pipeline: bad-pixel
//! correction, binning, downscaling, color-space conversion, and the
//! statistics taps (histogram, thumbnails, CDAF, DRC grid) feeding 3A.
//!
//! # Crate organisation
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`field`] | Bit-field descriptor type used by every register definition |
//! | [`regs`] | Register map — all offsets and field definitions |
//! | [`irq`] | INT1/INT2 bit assignments, enable masks, error-bit name table |
//! | [`dma`] | DMA channel enumeration, names, format capability masks |
//! | [`fmt`] | Pixel format model (hw format, bit width, pixel order, SBWC) |
//! | [`bns`] | Binning-scaler ratio codes, dividers and weight tables |
//! | [`lic`] | LIC thresholds, SRAM window geometry and offset tables |

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod bns;
pub mod dma;
pub mod field;
pub mod fmt;
pub mod irq;
pub mod lic;
pub mod regs;
