//! Final aggregation and the fixed textual report schema: miss ratios, bit
//! entropy, reuse ratios, and the full byte-level histograms and matrices.

use std::fmt::Write as _;

use crate::engine::{AccessKind, Engine};
use crate::memory::MemoryReader;

/// Writes the shutdown report described in the external-interfaces contract.
///
/// Runs once; a second call is a no-op rather than re-writing the output or
/// double-counting anything, satisfying the idempotent-shutdown property.
#[derive(Debug, Default)]
pub struct Reporter {
    reported: bool,
}

impl Reporter {
    pub fn new() -> Self {
        Self { reported: false }
    }

    /// Render the report and write it to `engine.config().output_path`.
    pub fn report<R: MemoryReader>(&mut self, engine: &Engine<R>) -> std::io::Result<()> {
        if self.reported {
            return Ok(());
        }
        let text = render(engine);
        std::fs::write(&engine.config().output_path, &text)?;
        tracing::info!(
            output_path = %engine.config().output_path,
            elapsed = engine.elapsed_secs(),
            "report written"
        );
        self.reported = true;
        Ok(())
    }

    /// Render the report as a `String` without touching the filesystem.
    /// Used by tests and by hosts that want to route the report elsewhere.
    pub fn render<R: MemoryReader>(&self, engine: &Engine<R>) -> String {
        render(engine)
    }
}

fn ratio_pct(miss: u64, hit: u64) -> f64 {
    let total = miss + hit;
    if total == 0 {
        0.0
    } else {
        miss as f64 / total as f64 * 100.0
    }
}

fn render<R: MemoryReader>(engine: &Engine<R>) -> String {
    let config = engine.config();
    let stats = engine.stats();

    let load_miss = stats.miss_count[AccessKind::Load as usize];
    let load_hit = stats.hit_count[AccessKind::Load as usize];
    let store_miss = stats.miss_count[AccessKind::Store as usize];
    let store_hit = stats.hit_count[AccessKind::Store as usize];
    let total_miss = load_miss + store_miss;
    let total_hit = load_hit + store_hit;

    let num_beats = config.line_size / config.bus_width;
    let bit_entropy = stats.bit_entropy(num_beats, config.bus_width);
    let utilization = stats.utilization_ratio();

    let mut out = String::with_capacity(1 << 20);

    let _ = writeln!(out, "Elapsed time: {}\n", engine.elapsed_secs());

    let _ = writeln!(out, "Cache size: {} B", config.cache_size);
    let _ = writeln!(
        out,
        "Associativity: {} way{}",
        config.associativity,
        if config.associativity == 1 { "" } else { "s" }
    );
    let _ = writeln!(out, "Line size: {} B", config.line_size);
    let _ = writeln!(out, "DRAM bus width: {} B", config.bus_width);
    let _ = writeln!(
        out,
        "Instructions cache simulation: {}\n",
        if config.sim_instructions { "on" } else { "off" }
    );

    let _ = writeln!(out, "LLC Load Miss Count: {load_miss}");
    let _ = writeln!(out, "LLC Load Hit Count:  {load_hit}");
    let _ = writeln!(
        out,
        "LLC Load Miss Ratio: {}%\n",
        ratio_pct(load_miss, load_hit)
    );

    let _ = writeln!(out, "LLC Store Miss Count: {store_miss}");
    let _ = writeln!(out, "LLC Store Hit Count:  {store_hit}");
    let _ = writeln!(out, "LLC Store Evict Count:{}", stats.evict_count);
    let _ = writeln!(
        out,
        "LLC Store Miss Ratio: {}%\n",
        ratio_pct(store_miss, store_hit)
    );

    let _ = writeln!(out, "LLC Total Miss Count: {total_miss}");
    let _ = writeln!(out, "LLC Total Hit Count:  {total_hit}");
    let _ = writeln!(
        out,
        "LLC Total Miss Ratio: {}%\n",
        ratio_pct(total_miss, total_hit)
    );

    let _ = writeln!(
        out,
        "Total number of bit transitions: {}",
        stats.total_transitions
    );
    let _ = writeln!(out, "Bit entropy: {bit_entropy}");
    let _ = writeln!(out, "Cache line utilization ratio: {utilization}\n");

    let _ = writeln!(out, "Other metrics");

    let _ = writeln!(out, "Sequential 0 counts, bus-wise:");
    for (i, count) in stats.consecutive_zero_counts_bw.iter().enumerate() {
        let _ = writeln!(out, "  {}: {count}", i + 2);
    }
    let _ = writeln!(out, "Sequential 0 counts, transfer-wise:");
    for (i, count) in stats.consecutive_zero_counts_tw.iter().enumerate() {
        let _ = writeln!(out, "  {}: {count}", i + 2);
    }

    let _ = writeln!(out, "Number of bytes with value:");
    for value in 0u16..256 {
        let _ = writeln!(out, "  {value}: {}", stats.byte_counts[value as usize]);
    }

    let _ = writeln!(out, "Transition counts, bus-wise:");
    for i in 0u16..256 {
        for j in 0u16..256 {
            let _ = writeln!(
                out,
                "  {i},{j}: {}",
                stats.transition_counts_bw[i as usize][j as usize]
            );
        }
    }

    let _ = writeln!(out, "Transition counts, transfer-wise:");
    for i in 0u16..256 {
        for j in 0u16..256 {
            let _ = writeln!(
                out,
                "  {i},{j}: {}",
                stats.transition_counts_tw[i as usize][j as usize]
            );
        }
    }

    let _ = writeln!(out, "Reuse counts for values brought in to the cache:");
    for value in 0u16..256 {
        let _ = writeln!(out, "  {value}: {}", stats.reuse_counts[value as usize]);
    }

    let _ = writeln!(out, "Reuse ratios for values brought in to the cache:");
    for value in 0u16..256 {
        let _ = writeln!(out, "  {value}: {}", stats.reuse_ratio(value as u8));
    }

    out
}
