use memtrans::memory::MapMemory;
use memtrans::{AccessKind, Config, Engine};

/// Scenario 5, transfer analyzer sanity: a 64-byte line whose eight 8-byte
/// beats alternate between all-0x00 and all-0xFF produces full bit entropy —
/// every one of the 7 beat-pairs flips all 64 bits.
#[test]
fn alternating_beats_produce_full_entropy() {
    let mut mem = MapMemory::new();
    for addr in 0u64..64 {
        let beat = addr / 8;
        let value = if beat % 2 == 0 { 0x00 } else { 0xFF };
        mem.write(addr, value);
    }

    let config = Config {
        cache_size: 128,
        line_size: 64,
        associativity: 1,
        bus_width: 8,
        ..Config::default()
    };
    let mut engine = Engine::new(config, mem).unwrap();
    engine.access(0x000, 1, AccessKind::Load);

    assert_eq!(engine.stats().total_transitions, 448);
    assert_eq!(engine.stats().count_transitions_called, 1);
    assert_eq!(engine.stats().bit_entropy(64 / 8, 8), 1.0);
}
