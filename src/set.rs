//! Cache set storage: the direct-mapped and LRU variants, and the shared
//! hit/miss/replace contract the engine drives.

use std::collections::VecDeque;

use crate::line::{AccessedBitmap, CacheLine};

/// A snapshot of a cache line evicted during a replacement, captured before
/// the slot is overwritten so the reuse analyzer can attribute byte-level
/// reuse against its `accessed` bitmap.
#[derive(Debug, Clone)]
pub struct EvictedLine {
    pub line_start_addr: u64,
    pub accessed: AccessedBitmap,
}

/// The result of driving a single-line access through a set.
#[derive(Debug)]
pub enum Outcome {
    Hit,
    Miss {
        /// `Some` only when the victim slot held a dirty line, per the
        /// dirty-eviction path.
        evicted: Option<EvictedLine>,
    },
}

/// One set's worth of cache storage: either a single direct-mapped entry or
/// an LRU-ordered sequence of `k` entries.
#[derive(Debug)]
pub enum CacheSet {
    DirectMapped(CacheLine),
    Lru(VecDeque<CacheLine>),
}

impl CacheSet {
    pub fn new_direct_mapped(line_size: usize) -> Self {
        CacheSet::DirectMapped(CacheLine::new(line_size))
    }

    pub fn new_lru(ways: usize, line_size: usize) -> Self {
        let mut lines = VecDeque::with_capacity(ways);
        for _ in 0..ways {
            lines.push_back(CacheLine::new(line_size));
        }
        CacheSet::Lru(lines)
    }

    /// Drive a single-line access: classify hit/miss, apply the appropriate
    /// LRU reordering, and install the new identity on a miss, returning the
    /// identity of anything evicted along the way.
    pub fn access(
        &mut self,
        tag: u64,
        line_start: u64,
        is_store: bool,
        access_offset: usize,
        bytes_in_line: usize,
    ) -> Outcome {
        match self {
            CacheSet::DirectMapped(line) => {
                if line.valid && line.tag == tag {
                    line.record_hit(is_store, access_offset, bytes_in_line);
                    Outcome::Hit
                } else {
                    let evicted = Self::capture_eviction(line);
                    line.install(tag, line_start, is_store, access_offset, bytes_in_line);
                    Outcome::Miss { evicted }
                }
            }
            CacheSet::Lru(lines) => {
                if let Some(pos) = lines.iter().position(|l| l.valid && l.tag == tag) {
                    {
                        let line = &mut lines[pos];
                        line.record_hit(is_store, access_offset, bytes_in_line);
                    }
                    if pos != 0 {
                        let line = lines.remove(pos).expect("position came from this deque");
                        lines.push_front(line);
                    }
                    Outcome::Hit
                } else {
                    let mut victim = lines.pop_back().expect("LRU set has at least one way");
                    let evicted = Self::capture_eviction(&victim);
                    victim.install(tag, line_start, is_store, access_offset, bytes_in_line);
                    lines.push_front(victim);
                    Outcome::Miss { evicted }
                }
            }
        }
    }

    fn capture_eviction(line: &CacheLine) -> Option<EvictedLine> {
        if line.valid && line.dirty {
            Some(EvictedLine {
                line_start_addr: line.line_start_addr,
                accessed: line.accessed.clone(),
            })
        } else {
            None
        }
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        match self {
            CacheSet::DirectMapped(_) => 1,
            CacheSet::Lru(lines) => lines.len(),
        }
    }
}
