//! Compare average probe counts across table sizes on a synthetic stream.
//!
//! Run with: cargo run --release --example compare_engines

use probe_tables::{Driver, EngineKind, OpClass, RunConfig, Schedule, Token};
use probebench::format_average;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const VOCABULARY: usize = 2_000;
const STREAM: usize = 50_000;
const INITIAL: usize = 1_000;

fn main() -> probebench::Result<()> {
    env_logger::init();

    let mut rng = StdRng::seed_from_u64(42);
    let words: Vec<String> = (0..VOCABULARY)
        .map(|_| {
            let len = rng.gen_range(2..=14);
            (0..len).map(|_| rng.gen_range('a'..='z')).collect()
        })
        .collect();
    // Skew towards the front of the vocabulary so repeats are common.
    let tokens: Vec<Token> = (0..STREAM)
        .map(|_| {
            let r: f64 = rng.gen();
            Token::from(words[(r * r * VOCABULARY as f64) as usize].as_str())
        })
        .collect();

    // 1012 in radix 3: insert, search, insert, delete.
    let schedule = Schedule::from_decimal(32);

    println!(
        "{:>8} {:>34} {:>10} {:>10} {:>10} {:>10}",
        "m", "method", "hit", "miss", "insert", "delete"
    );
    for table_size in [1_009, 4_001, 16_411, 65_537] {
        if table_size <= INITIAL + STREAM / 2 {
            // Too small for the closed table to absorb the replay inserts.
            run_row(table_size, &tokens, &schedule, &EngineKind::ALL[..2])?;
            run_row(table_size, &tokens, &schedule, &[EngineKind::Bst])?;
        } else {
            run_row(table_size, &tokens, &schedule, &EngineKind::ALL)?;
        }
    }
    Ok(())
}

fn run_row(
    table_size: usize,
    tokens: &[Token],
    schedule: &Schedule,
    engines: &[EngineKind],
) -> probebench::Result<()> {
    let config = RunConfig::new(table_size, INITIAL, engines.iter().copied(), schedule.clone());
    let summary = Driver::new(config)?.run(tokens)?;
    for engine in &summary.engines {
        let avg = |class| format_average(engine.probes.average(class));
        println!(
            "{:>8} {:>34} {:>10} {:>10} {:>10} {:>10}",
            table_size,
            engine.kind.name(),
            avg(OpClass::SuccessfulSearch),
            avg(OpClass::UnsuccessfulSearch),
            avg(OpClass::Insert),
            avg(OpClass::Delete),
        );
    }
    Ok(())
}
