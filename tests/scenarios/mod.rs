use memtrans::memory::MapMemory;
use memtrans::{AccessKind, Config, Engine};

mod properties;
mod reuse;
mod transfer;

/// A direct-mapped, two-set baseline matching every scenario's fixed layout:
/// `line_size=64`, `cache_size=128`, `bus_width=8`.
fn baseline_config() -> Config {
    Config {
        cache_size: 128,
        line_size: 64,
        associativity: 1,
        bus_width: 8,
        ..Config::default()
    }
}

#[test]
fn single_miss_single_hit() {
    let mut engine = Engine::new(baseline_config(), MapMemory::new()).unwrap();
    engine.access(0x000, 1, AccessKind::Load);
    engine.access(0x004, 1, AccessKind::Load);

    assert_eq!(engine.stats().hit_count[AccessKind::Load as usize], 1);
    assert_eq!(engine.stats().miss_count[AccessKind::Load as usize], 1);
    assert_eq!(engine.stats().evict_count, 0);
    assert_eq!(engine.stats().total_transitions, 0);
    assert_eq!(engine.stats().bit_entropy(64 / 8, 8), 0.0);
}

#[test]
fn conflict_thrash() {
    let mut engine = Engine::new(baseline_config(), MapMemory::new()).unwrap();
    for _ in 0..10 {
        engine.access(0x000, 1, AccessKind::Load);
        engine.access(0x080, 1, AccessKind::Load);
    }
    assert_eq!(engine.stats().miss_count[AccessKind::Load as usize], 20);
    assert_eq!(engine.stats().hit_count[AccessKind::Load as usize], 0);
    assert_eq!(engine.stats().evict_count, 0);
}

#[test]
fn dirty_eviction() {
    let mut engine = Engine::new(baseline_config(), MapMemory::new()).unwrap();
    engine.access(0x000, 1, AccessKind::Store);
    engine.access(0x080, 1, AccessKind::Store);

    assert_eq!(engine.stats().miss_count[AccessKind::Store as usize], 2);
    assert_eq!(engine.stats().evict_count, 1);
}

#[test]
fn multi_line_access() {
    let mut engine = Engine::new(baseline_config(), MapMemory::new()).unwrap();
    // 0x03F straddles the boundary between line 0 and line 1 at 0x040.
    engine.access(0x03F, 4, AccessKind::Load);

    assert_eq!(engine.stats().miss_count[AccessKind::Load as usize], 2);
    assert_eq!(engine.stats().evict_count, 0);
}
