//! The reuse analyzer: on eviction, attributes "reused" events to each byte
//! value found in the evicted line's backing memory, using the accessed
//! bitmap collected during the line's residency.

use crate::line::AccessedBitmap;
use crate::stats::Stats;

/// For each byte at index `j` in `buf`, increments `evicted_counts[buf[j]]`,
/// and additionally increments `reuse_counts[buf[j]]` iff `accessed.get(j)`
/// is set — i.e. that byte was touched at least once during the line's
/// residency before eviction.
pub fn attribute(stats: &mut Stats, buf: &[u8], accessed: &AccessedBitmap) {
    debug_assert_eq!(buf.len(), accessed.len());
    for (j, &value) in buf.iter().enumerate() {
        stats.evicted_counts[value as usize] += 1;
        if accessed.get(j) {
            stats.reuse_counts[value as usize] += 1;
        }
    }
}
