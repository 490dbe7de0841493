//! A functional (non-timing) last-level cache simulator and DRAM
//! memory-transfer analyzer.
//!
//! An embedding host drives [`engine::Engine`] with load/store addresses as
//! they retire; the engine classifies each as a hit or miss against a
//! direct-mapped or set-associative LRU cache, and on every line fill or
//! dirty eviction feeds the bytes actually moved across the bus to
//! [`transfer::TransferAnalyzer`] and [`reuse::attribute`]. At shutdown,
//! [`report::Reporter`] renders the accumulated [`stats::Stats`] block into
//! the fixed textual report.

pub mod bits;
pub mod config;
pub mod engine;
pub mod error;
pub mod line;
pub mod memory;
pub mod report;
pub mod reuse;
pub mod set;
pub mod stats;
pub mod time;
pub mod transfer;

pub use config::Config;
pub use engine::{AccessKind, Engine};
pub use memory::MemoryReader;
pub use report::Reporter;

/// Install a `tracing_subscriber::fmt` subscriber with an `EnvFilter`
/// defaulting to `memtrans=info`. A convenience for hosts that don't already
/// manage their own subscriber; never required to use the crate.
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("memtrans=info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
