//! Error types used at the crate's I/O boundaries.
//!
//! Per the error-handling policy this crate implements: configuration
//! mistakes ([`crate::config::ConfigError`]) are fatal at construction time,
//! and readback failures ([`ReadbackError`]) are handled locally by the
//! engine and never surfaced to a host. There is no combined crate-wide
//! error type — the two failure modes are handled at entirely different
//! points (construction vs. the hot path) and are never matched against each
//! other by calling code, so collapsing them into one enum would only add a
//! layer of wrapping `From` impls no call site needs. Internal invariant
//! violations are plain `assert!`/`debug_assert!` panics on the hot path,
//! never a `Result`, since they indicate a bug rather than a recoverable
//! condition.

/// A readback failure for a single line. `MemoryReader` implementations
/// return this; `Engine` catches it locally and never surfaces it to a host.
#[derive(Debug, thiserror::Error)]
pub enum ReadbackError {
    #[error("could not read {len} bytes at 0x{addr:x}: inaccessible")]
    Inaccessible { addr: u64, len: usize },
}
