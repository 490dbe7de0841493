use memtrans::memory::MapMemory;
use memtrans::{AccessKind, Config, Engine};

/// Scenario 6, reuse attribution: a store-allocated line whose first 4 bytes
/// are touched is evicted by a conflicting store; backing memory at the
/// evicted address holds `[5,5,5,5,0,0,...]`.
#[test]
fn reuse_attributed_to_touched_bytes_on_eviction() {
    let mut mem = MapMemory::new();
    mem.write_slice(0x000, &[5, 5, 5, 5]);

    let config = Config {
        cache_size: 128,
        line_size: 64,
        associativity: 1,
        bus_width: 8,
        ..Config::default()
    };
    let mut engine = Engine::new(config, mem).unwrap();

    // Store miss at A=0x000, touching bytes 0..3.
    engine.access(0x000, 4, AccessKind::Store);
    // Conflicting store evicts the dirty line installed above.
    engine.access(0x080, 1, AccessKind::Store);

    assert_eq!(engine.stats().evict_count, 1);
    assert_eq!(engine.stats().reuse_counts[5], 4);
    assert_eq!(engine.stats().reuse_counts[0], 0);
    assert_eq!(engine.stats().evicted_counts[5], 4);
    assert_eq!(engine.stats().evicted_counts[0], 60);
}
