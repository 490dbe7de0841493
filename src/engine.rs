//! The cache engine: address decomposition, set lookup, hit/miss
//! classification, the dirty-eviction path, and the access-splitting loop
//! that walks a multi-line reference across line boundaries.

use crate::config::{Config, ConfigError};
use crate::memory::MemoryReader;
use crate::reuse;
use crate::set::{CacheSet, Outcome};
use crate::stats::Stats;
use crate::time;
use crate::transfer::TransferAnalyzer;

/// The kind of access driving a cache lookup. Indexes `Stats::hit_count` /
/// `Stats::miss_count`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessKind {
    Load = 0,
    Store = 1,
}

/// The cache engine. Owns the set array, the scratch line buffer reused
/// across every miss and eviction, the Hamming LUT (via the transfer
/// analyzer), and the global statistics block.
///
/// Single-threaded and synchronous, per the concurrency model: `access` runs
/// inline on the host's instrumentation thread and never suspends. A host
/// driving this engine from multiple threads must serialize its calls.
pub struct Engine<R: MemoryReader> {
    config: Config,
    sets: Vec<CacheSet>,
    scratch: Vec<u8>,
    analyzer: TransferAnalyzer,
    stats: Stats,
    reader: R,
    line_shift: u32,
    set_index_mask: u64,
    not_line_mask: u64,
    start_ns: u64,
}

impl<R: MemoryReader> Engine<R> {
    /// Construct an engine from a validated [`Config`]. Fails with
    /// [`ConfigError`] if the layout invariants (power-of-two sizes,
    /// non-zero associativity, divisibility) don't hold — this is the
    /// fatal-at-startup path; the host decides whether to abort the process.
    pub fn new(config: Config, reader: R) -> Result<Self, ConfigError> {
        config.validate()?;

        let line_size = config.line_size as usize;
        let num_sets = config.num_sets() as usize;
        let associativity = config.associativity as usize;

        let mut sets = Vec::with_capacity(num_sets);
        for _ in 0..num_sets {
            if associativity == 1 {
                sets.push(CacheSet::new_direct_mapped(line_size));
            } else {
                sets.push(CacheSet::new_lru(associativity, line_size));
            }
        }

        let line_shift = crate::bits::floor_log2(config.line_size) as u32;
        let set_index_mask = num_sets as u64 - 1;
        let not_line_mask = !(config.line_size - 1);

        tracing::info!(
            cache_size = config.cache_size,
            line_size = config.line_size,
            associativity = config.associativity,
            num_sets,
            "cache engine constructed"
        );

        Ok(Self {
            config,
            sets,
            scratch: vec![0u8; line_size],
            analyzer: TransferAnalyzer::new(),
            stats: Stats::new(),
            reader,
            line_shift,
            set_index_mask,
            not_line_mask,
            start_ns: time::monotonic_now_ns(),
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn stats(&self) -> &Stats {
        &self.stats
    }

    pub fn elapsed_secs(&self) -> f64 {
        time::elapsed_secs(self.start_ns, time::monotonic_now_ns())
    }

    /// Drives a single memory reference through the cache, splitting it
    /// across line boundaries as needed.
    ///
    /// This is the hot path: it never allocates (beyond the fixed-size
    /// scratch buffer set up at construction) and never returns a `Result` —
    /// readback failures are handled locally (see `fill_analysis` /
    /// `dirty_eviction`), and a misbehaving caller (`size == 0`) is simply a
    /// no-op rather than a panic.
    pub fn access(&mut self, addr: u64, size: u64, kind: AccessKind) {
        if size == 0 {
            return;
        }

        let line_size = self.config.line_size;
        let end_addr = addr + size;
        let mut addr = addr;
        let mut remaining = size;
        let mut line_start = addr & self.not_line_mask;
        let mut next_line = line_start + line_size;

        while line_start < end_addr {
            let bytes_in_line = remaining.min(next_line - addr);
            let tag = addr >> self.line_shift;
            let set_index = (tag & self.set_index_mask) as usize;
            let access_offset = (addr & (line_size - 1)) as usize;

            let outcome = self.sets[set_index].access(
                tag,
                line_start,
                kind == AccessKind::Store,
                access_offset,
                bytes_in_line as usize,
            );

            match outcome {
                Outcome::Hit => {
                    self.stats.record_hit(kind);
                }
                Outcome::Miss { evicted } => {
                    if let Some(evicted) = evicted {
                        self.dirty_eviction(evicted.line_start_addr, &evicted.accessed);
                    }
                    self.fill_analysis(line_start);
                    self.stats.record_miss(kind);
                }
            }

            addr = next_line;
            remaining -= bytes_in_line;
            line_start = next_line;
            next_line += line_size;
        }
    }

    /// Convenience wrapper for instruction-fetch analysis: a no-op unless
    /// `Config::sim_instructions` is set, in which case it drives a LOAD
    /// access at the instruction pointer.
    pub fn access_instruction_fetch(&mut self, ip: u64, insn_size: u64) {
        if self.config.sim_instructions {
            self.access(ip, insn_size, AccessKind::Load);
        }
    }

    fn fill_analysis(&mut self, line_start: u64) {
        match self.reader.read_line(line_start, &mut self.scratch) {
            Ok(()) => {
                self.analyzer.analyze(
                    &mut self.stats,
                    &self.scratch,
                    self.config.bus_width as usize,
                );
            }
            Err(err) => {
                tracing::warn!(addr = line_start, error = %err, "readback failed on fill; skipping transfer analysis");
            }
        }
    }

    fn dirty_eviction(&mut self, line_start_addr: u64, accessed: &crate::line::AccessedBitmap) {
        self.stats.evict_count += 1;
        match self.reader.read_line(line_start_addr, &mut self.scratch) {
            Ok(()) => {
                reuse::attribute(&mut self.stats, &self.scratch, accessed);
                self.analyzer.analyze(
                    &mut self.stats,
                    &self.scratch,
                    self.config.bus_width as usize,
                );
            }
            Err(err) => {
                tracing::warn!(addr = line_start_addr, error = %err, "readback failed on dirty eviction; skipping analysis");
            }
        }
    }
}
