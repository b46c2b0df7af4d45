//! Printable reports of a designed filter.

mod csv;
mod json;
mod text;

use serde::Serialize;

use crate::design::{self, CoefficientVector, FilterSpec, LinearPhase};

pub use self::csv::CsvFormatter;
pub use self::json::JsonFormatter;
pub use self::text::TextFormatter;

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Csv,
}

/// Magnitude of the response at one probe frequency
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Probe {
    pub frequency_hz: f64,
    pub magnitude_db: f64,
}

/// Everything the reporting tools print about one design
#[derive(Debug, Clone, Serialize)]
pub struct FilterReport {
    pub spec: FilterSpec,
    pub num_taps: usize,
    pub group_delay_samples: usize,
    pub linear_phase: LinearPhase,
    pub probes: Vec<Probe>,
    pub taps: Vec<f64>,
}

impl FilterReport {
    pub fn new(spec: FilterSpec, coefficients: &CoefficientVector, probe_hz: &[f64]) -> Self {
        let probes = probe_hz
            .iter()
            .map(|&frequency_hz| Probe {
                frequency_hz,
                magnitude_db: design::magnitude_db(coefficients, frequency_hz, spec.sample_rate),
            })
            .collect();
        Self {
            spec,
            num_taps: coefficients.len(),
            group_delay_samples: coefficients.group_delay_samples(),
            linear_phase: LinearPhase::classify(coefficients),
            probes,
            taps: coefficients.to_vec(),
        }
    }
}

pub trait Formatter {
    fn format(&self, report: &FilterReport) -> String;
}

pub fn create_formatter(format: OutputFormat, verbose: bool) -> Box<dyn Formatter> {
    match format {
        OutputFormat::Text => Box::new(TextFormatter::new(verbose)),
        OutputFormat::Json => Box::new(JsonFormatter),
        OutputFormat::Csv => Box::new(CsvFormatter),
    }
}
