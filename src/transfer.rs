//! The transfer statistics engine: given a cache-line buffer staged on the
//! DRAM bus, updates the byte histogram, the bus-wise and transfer-wise
//! transition matrices, the zero-run histograms, and returns the number of
//! bit transitions observed transfer-wise for that one transfer.

use crate::bits::HammingLut;
use crate::stats::Stats;

/// Analyzes cache-line transfers against the DRAM bus model described in the
/// data model: `bus_width` lanes, `line_size / bus_width` successive beats.
pub struct TransferAnalyzer {
    lut: HammingLut,
}

impl TransferAnalyzer {
    pub fn new() -> Self {
        Self {
            lut: HammingLut::new(),
        }
    }

    /// Analyze one line transfer of `buf` (length `line_size`) over a bus of
    /// `bus_width` bytes, folding counts into `stats` and returning the
    /// number of bit transitions observed transfer-wise for this call.
    ///
    /// `stats.total_transitions` and `stats.count_transitions_called` are
    /// updated exactly once per call, per the contract in the component
    /// design.
    pub fn analyze(&self, stats: &mut Stats, buf: &[u8], bus_width: usize) -> u64 {
        debug_assert!(bus_width > 0 && buf.len() % bus_width == 0);
        let num_beats = buf.len() / bus_width;
        let mut transitions: u64 = 0;
        let mut tw_zero_run = vec![0u32; bus_width];

        for beat in 0..num_beats {
            let row = &buf[beat * bus_width..(beat + 1) * bus_width];
            let mut bw_zero_run: u32 = 0;

            for (lane, &b0) in row.iter().enumerate() {
                stats.byte_counts[b0 as usize] += 1;

                // Bus-wise zero runs: across lanes within this one beat.
                if b0 == 0 {
                    bw_zero_run += 1;
                }
                let at_beat_end = lane == bus_width - 1;
                if b0 != 0 || at_beat_end {
                    if bw_zero_run >= 2 {
                        let bucket = (bw_zero_run - 2).min(6) as usize;
                        stats.consecutive_zero_counts_bw[bucket] += 1;
                    }
                    bw_zero_run = 0;
                }

                // Bus-wise transition matrix.
                if lane > 0 {
                    let prev = row[lane - 1];
                    stats.transition_counts_bw[prev as usize][b0 as usize] += 1;
                }

                // Transfer-wise: between this beat and the next, same lane.
                if beat < num_beats - 1 {
                    let b1 = buf[(beat + 1) * bus_width + lane];
                    transitions += self.lut.get(b0, b1) as u64;
                    stats.transition_counts_tw[b0 as usize][b1 as usize] += 1;

                    if b0 == 0 && b1 == 0 {
                        tw_zero_run[lane] += 1;
                    } else {
                        if tw_zero_run[lane] >= 1 {
                            let bucket = (tw_zero_run[lane] - 1).min(6) as usize;
                            stats.consecutive_zero_counts_tw[bucket] += 1;
                        }
                        tw_zero_run[lane] = 0;
                    }
                } else if tw_zero_run[lane] >= 1 {
                    // Flush any still-open transfer-wise run at the last beat.
                    let bucket = (tw_zero_run[lane] - 1).min(6) as usize;
                    stats.consecutive_zero_counts_tw[bucket] += 1;
                    tw_zero_run[lane] = 0;
                }
            }
        }

        stats.total_transitions += transitions;
        stats.count_transitions_called += 1;
        transitions
    }
}

impl Default for TransferAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}
