//! Memory-mapped register window over UIO.
//!
//! CSTAT is a platform IP block; in userspace bring-up its register window
//! is exported through a UIO node (`/dev/uioN`, map 0). This module maps
//! that window and implements [`RegisterBase`] with volatile accesses.

// MMIO registers are naturally aligned by hardware, so the pointer casts
// below are sound for in-bounds offsets.
#![allow(clippy::cast_ptr_alignment)]

use crate::error::{CstatError, Result};
use crate::regio::RegisterBase;
use rustix::mm::{mmap, munmap, MapFlags, ProtFlags};
use std::fs::File;
use std::os::unix::io::AsFd;
use std::path::Path;

/// A mapped CSTAT register window.
pub struct UioRegisters {
    ptr: *mut u8,
    size: usize,
}

impl std::fmt::Debug for UioRegisters {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UioRegisters")
            .field("ptr", &format_args!("{:p}", self.ptr))
            .field("size", &self.size)
            .finish()
    }
}

// SAFETY: Send - the mapping is process-wide and owned exclusively by this
// value; moving it between threads does not invalidate it.
unsafe impl Send for UioRegisters {}

// SAFETY: Sync - volatile register reads are idempotent from the CPU side,
// and the external driver serializes configuration per instance, matching
// the hardware's single-writer contract.
unsafe impl Sync for UioRegisters {}

impl UioRegisters {
    /// Map the register window behind a UIO device node.
    ///
    /// # Errors
    ///
    /// Returns an error if the node cannot be opened or the mapping fails.
    pub fn map(path: impl AsRef<Path>, size: usize) -> Result<Self> {
        let path = path.as_ref();
        let file = File::options()
            .read(true)
            .write(true)
            .open(path)
            .map_err(CstatError::from)?;

        // SAFETY: mmap is required for MMIO. The fd is a freshly opened UIO
        // node, offset 0 selects map 0 (the register window), and on
        // success ptr is valid for `size` bytes until munmap in Drop.
        let ptr = unsafe {
            mmap(
                std::ptr::null_mut(),
                size,
                ProtFlags::READ | ProtFlags::WRITE,
                MapFlags::SHARED,
                file.as_fd(),
                0,
            )
            .map_err(|e| {
                CstatError::mmio(format!("mmap of {} failed: {e}", path.display()))
            })?
        };

        tracing::info!("Mapped CSTAT window {} at {ptr:p}, size={size:#x}", path.display());

        Ok(Self {
            ptr: ptr.cast(),
            size,
        })
    }
}

impl RegisterBase for UioRegisters {
    /// # Panics
    ///
    /// Panics if `offset + 4` exceeds the mapped window.
    fn read32(&self, offset: usize) -> u32 {
        assert!(offset + 4 <= self.size, "register offset out of bounds");
        // SAFETY: read_volatile is required for MMIO (hardware mutates the
        // value). ptr comes from mmap in map(), offset is bounds-checked,
        // and registers are 4-byte aligned by the hardware map.
        unsafe { std::ptr::read_volatile(self.ptr.add(offset).cast::<u32>()) }
    }

    /// # Panics
    ///
    /// Panics if `offset + 4` exceeds the mapped window.
    fn write32(&self, offset: usize, value: u32) {
        assert!(offset + 4 <= self.size, "register offset out of bounds");
        // SAFETY: write_volatile is required for MMIO (writes have hardware
        // side effects). Same bounds and alignment argument as read32.
        unsafe {
            std::ptr::write_volatile(self.ptr.add(offset).cast::<u32>(), value);
        }
    }
}

impl Drop for UioRegisters {
    fn drop(&mut self) {
        // SAFETY: ptr/size come from the successful mmap in map() and Drop
        // runs at most once; no other references outlive self.
        unsafe {
            let _ = munmap(self.ptr.cast(), self.size);
        }
        tracing::debug!("Unmapped CSTAT register window");
    }
}
