//! Rendering run results as text and JSON.

use std::fs;
use std::io::Write;
use std::path::Path;

use log::info;
use probe_tables::{EngineReport, OpClass, RunConfig, RunSummary};
use serde::Serialize;

use crate::error::Result;

/// Format an average the way a default-configured C++ stream prints a
/// double: six significant digits, trailing zeros dropped, scientific
/// notation outside `[1e-4, 1e6)`.
pub fn format_average(value: f64) -> String {
    const PRECISION: i32 = 6;

    if value == 0.0 {
        return "0".to_string();
    }
    if !value.is_finite() {
        return value.to_string();
    }

    let sci = format!("{:.*e}", (PRECISION - 1) as usize, value);
    let (mantissa, exponent) = match sci.split_once('e') {
        Some((m, e)) => (m, e.parse::<i32>().unwrap_or(0)),
        None => (sci.as_str(), 0),
    };

    if exponent < -4 || exponent >= PRECISION {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!("{}e{}{:02}", trim_zeros(mantissa), sign, exponent.abs())
    } else {
        let decimals = (PRECISION - 1 - exponent) as usize;
        trim_zeros(&format!("{:.*}", decimals, value)).to_string()
    }
}

fn trim_zeros(s: &str) -> &str {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s
    }
}

/// Print one `Method <code> Probes:` block per engine.
pub fn write_text<W: Write>(out: &mut W, engines: &[EngineReport]) -> Result<()> {
    for engine in engines {
        writeln!(out)?;
        writeln!(out, "Method {} Probes: ", engine.kind.code())?;
        for class in OpClass::ALL {
            writeln!(
                out,
                "Average no. of probe for {}: {}",
                class.label(),
                format_average(engine.probes.average(class))
            )?;
        }
    }
    out.flush()?;
    Ok(())
}

#[derive(Debug, Serialize)]
pub struct JsonReport {
    pub config: ConfigSection,
    pub phases: PhaseSection,
    pub engines: Vec<EngineSection>,
}

#[derive(Debug, Serialize)]
pub struct ConfigSection {
    pub table_size: usize,
    pub initial_inserts: usize,
    pub methods: Vec<u8>,
    pub schedule: String,
    pub tokens: usize,
}

#[derive(Debug, Serialize)]
pub struct PhaseSection {
    pub loaded: usize,
    pub replay_start: usize,
    pub searches: usize,
    pub inserts: usize,
    pub deletes: usize,
}

#[derive(Debug, Serialize)]
pub struct EngineSection {
    pub method: u8,
    pub name: &'static str,
    pub stored: usize,
    pub averages: ClassValues<f64>,
    pub counts: ClassValues<u64>,
}

#[derive(Debug, Serialize)]
pub struct ClassValues<T> {
    pub successful_search: T,
    pub unsuccessful_search: T,
    pub insert: T,
    pub delete: T,
}

impl<T> ClassValues<T> {
    fn from_fn(mut f: impl FnMut(OpClass) -> T) -> Self {
        Self {
            successful_search: f(OpClass::SuccessfulSearch),
            unsuccessful_search: f(OpClass::UnsuccessfulSearch),
            insert: f(OpClass::Insert),
            delete: f(OpClass::Delete),
        }
    }
}

impl JsonReport {
    pub fn new(config: &RunConfig, tokens: usize, summary: &RunSummary) -> Self {
        Self {
            config: ConfigSection {
                table_size: config.table_size,
                initial_inserts: config.initial_inserts,
                methods: config.engines.iter().map(|k| k.code()).collect(),
                schedule: config.schedule.to_string(),
                tokens,
            },
            phases: PhaseSection {
                loaded: summary.loaded,
                replay_start: summary.replay_start,
                searches: summary.searches,
                inserts: summary.inserts,
                deletes: summary.deletes,
            },
            engines: summary
                .engines
                .iter()
                .map(|e| EngineSection {
                    method: e.kind.code(),
                    name: e.kind.name(),
                    stored: e.len,
                    averages: ClassValues::from_fn(|c| e.probes.average(c)),
                    counts: ClassValues::from_fn(|c| e.probes.count(c)),
                })
                .collect(),
        }
    }
}

/// Write `report` as pretty JSON, creating the parent directory if needed.
pub fn write_json(path: &Path, report: &JsonReport) -> Result<()> {
    let json = serde_json::to_string_pretty(report)?;

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    fs::write(path, json)?;
    info!("JSON report written to {}", path.display());
    Ok(())
}
