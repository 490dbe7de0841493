//! The memory-readback bridge: the only I/O on the hot path. Copies
//! `line_size` bytes from the traced address space into a caller-supplied
//! buffer, best-effort.

use std::collections::HashMap;

use crate::error::ReadbackError;

/// Abstracts reading live bytes out of the traced process. The host supplies
/// a real implementation backed by `/proc/<pid>/mem`, `ptrace`, or similar;
/// this crate ships two reference implementations for tests and small-scale
/// embedding.
pub trait MemoryReader {
    /// Copy `buf.len()` bytes starting at `addr` into `buf`. Best-effort: a
    /// page that has since become inaccessible should return `Err` rather
    /// than panic, so the engine can skip analysis for that one line.
    fn read_line(&mut self, addr: u64, buf: &mut [u8]) -> Result<(), ReadbackError>;
}

/// A `MemoryReader` that always succeeds and returns zero bytes. Useful for
/// the all-zero-backing-memory scenarios described in the testable
/// properties, and as a placeholder when a host only cares about hit/miss
/// accounting and not byte-level statistics.
#[derive(Debug, Default, Clone, Copy)]
pub struct ZeroMemory;

impl MemoryReader for ZeroMemory {
    fn read_line(&mut self, _addr: u64, buf: &mut [u8]) -> Result<(), ReadbackError> {
        buf.fill(0);
        Ok(())
    }
}

/// A sparse, `HashMap<u64, u8>`-backed memory image. Addresses with no
/// explicit entry read as zero. Suitable for deterministic tests and small
/// demos; not intended for tracing a live process.
#[derive(Debug, Default, Clone)]
pub struct MapMemory {
    bytes: HashMap<u64, u8>,
    /// Addresses (line-granular) that should fail readback, for exercising
    /// the "skip analysis on failure" path.
    poisoned_lines: std::collections::HashSet<u64>,
}

impl MapMemory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn write(&mut self, addr: u64, value: u8) {
        self.bytes.insert(addr, value);
    }

    pub fn write_slice(&mut self, addr: u64, values: &[u8]) {
        for (offset, &value) in values.iter().enumerate() {
            self.write(addr + offset as u64, value);
        }
    }

    /// Mark a line-aligned address as unreadable until [`MapMemory::heal`]
    /// is called with the same address.
    pub fn poison(&mut self, line_start_addr: u64) {
        self.poisoned_lines.insert(line_start_addr);
    }

    pub fn heal(&mut self, line_start_addr: u64) {
        self.poisoned_lines.remove(&line_start_addr);
    }
}

impl MemoryReader for MapMemory {
    fn read_line(&mut self, addr: u64, buf: &mut [u8]) -> Result<(), ReadbackError> {
        if self.poisoned_lines.contains(&addr) {
            return Err(ReadbackError::Inaccessible {
                addr,
                len: buf.len(),
            });
        }
        for (offset, slot) in buf.iter_mut().enumerate() {
            *slot = *self.bytes.get(&(addr + offset as u64)).unwrap_or(&0);
        }
        Ok(())
    }
}
