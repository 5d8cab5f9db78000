//! Error types for CSTAT hardware operations.

use thiserror::Error;

/// Result type alias for CSTAT operations.
pub type Result<T> = std::result::Result<T, CstatError>;

/// Errors that can occur while driving the CSTAT block.
#[derive(Debug, Error)]
pub enum CstatError {
    /// A bounded busy-wait exhausted its retry budget.
    #[error("{what} still busy after {iterations} polls")]
    Timeout {
        /// The wait site that timed out.
        what: &'static str,
        /// Number of polls performed before giving up.
        iterations: u32,
    },

    /// A DMA channel cannot serve the requested operation.
    #[error("DMA channel {name} not usable here: {reason}")]
    InvalidChannel {
        /// Channel name from the silicon model.
        name: &'static str,
        /// Why the channel was rejected.
        reason: &'static str,
    },

    /// A parameter-set value is outside the hardware's range.
    #[error("Invalid configuration: {reason}")]
    InvalidConfig {
        /// Why the configuration was rejected.
        reason: String,
    },

    /// I/O error while mapping or accessing the register window.
    #[error("I/O error: {source}")]
    Io {
        /// Underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Register window mapping failed.
    #[error("MMIO mapping failed: {reason}")]
    Mmio {
        /// Why the mapping failed.
        reason: String,
    },
}

impl CstatError {
    /// Create a timeout error for a named wait site.
    pub const fn timeout(what: &'static str, iterations: u32) -> Self {
        Self::Timeout { what, iterations }
    }

    /// Create an invalid-configuration error.
    pub fn invalid_config(reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            reason: reason.into(),
        }
    }

    /// Create an MMIO mapping error.
    pub fn mmio(reason: impl Into<String>) -> Self {
        Self::Mmio {
            reason: reason.into(),
        }
    }
}
