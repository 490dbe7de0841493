//! Replays a tiny fixed address trace through the engine and prints the
//! report to stdout via a temp file, the way a host embedding this crate
//! might wire things up for a quick smoke check.

use anyhow::Context;

use memtrans::memory::MapMemory;
use memtrans::{AccessKind, Config, Engine, Reporter};

fn main() -> anyhow::Result<()> {
    memtrans::init_tracing();

    let config = Config {
        cache_size: 4096,
        line_size: 64,
        associativity: 4,
        bus_width: 8,
        output_path: "memtrans-demo.out".into(),
        ..Config::default()
    };

    let mut mem = MapMemory::new();
    for addr in 0u64..4096 {
        mem.write(addr, (addr % 256) as u8);
    }

    let mut engine = Engine::new(config, mem).context("invalid cache layout")?;

    for base in (0u64..4096).step_by(64) {
        engine.access(base, 8, AccessKind::Load);
        engine.access(base, 4, AccessKind::Store);
    }
    // Revisit the first few lines to generate some hits.
    for base in (0u64..512).step_by(64) {
        engine.access(base, 8, AccessKind::Load);
    }

    let mut reporter = Reporter::new();
    reporter
        .report(&engine)
        .context("writing the report output file")?;
    let report = std::fs::read_to_string(&engine.config().output_path)
        .context("reading back the report output file")?;
    println!("{report}");
    Ok(())
}
