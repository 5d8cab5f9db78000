//! Register-programming engine for the Exynos Pablo CSTAT v1.0 ISP block.
//!
//! CSTAT is the Color/Statistics stage of the camera pipeline. This crate
//! turns typed configuration values into the register-write sequences the
//! block requires, honoring its hardware handshakes: COREX shadow-copy
//! double buffering, bounded busy-wait polling, and the strict
//! COREX-before-global-enable ordering.
//!
//! The crate holds no state of its own beyond the immutable tables in
//! [`cstat_chip`]; every entry point is a pure transform from a
//! caller-owned config value to MMIO writes against a borrowed
//! [`RegisterBase`].
//!
//! # Per-frame call sequence
//!
//! ```text
//! reset → corex::enable → control::select_input → crop/bns/scaler/csconv
//!       → dma (read + write channels) → lic → irq::enable_interrupts
//!       → control::one_shot_enable → (hardware runs)
//!       → irq::int1_status / int2_status → irq::print_err on error bits
//! ```
//!
//! # Register windows
//!
//! | Implementation | Use |
//! |----------------|-----|
//! | [`UioRegisters`] | mmap of a live register window via UIO |
//! | [`SimRegisters`] | software register model for CI without hardware |
//!
//! # Error policy
//!
//! Only [`control::reset`] and [`control::one_shot_enable`] propagate an
//! idle-wait timeout; every other internal failure is logged and absorbed
//! with a safe fallback (bypass the block, disable the channel, keep the
//! previous value). Capture pipelines prefer a degraded frame over a
//! stalled pipeline; changing this policy changes observable behavior.

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_panics_doc)]

pub mod bns;
pub mod control;
pub mod corex;
pub mod crop;
pub mod csconv;
pub mod dma;
mod error;
pub mod irq;
pub mod lic;
pub mod poll;
mod regio;
pub mod scaler;
mod uio;

pub use error::{CstatError, Result};
pub use regio::{RegisterBase, RegisterValue, SimRegisters};
pub use uio::UioRegisters;
