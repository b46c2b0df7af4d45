use std::fmt::Write;

use super::{FilterReport, Formatter};

pub struct TextFormatter {
    verbose: bool,
}

impl TextFormatter {
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }
}

impl Formatter for TextFormatter {
    fn format(&self, report: &FilterReport) -> String {
        let spec = &report.spec;
        let mut out = String::new();
        let _ = writeln!(
            out,
            "{:?} {:?}, {} taps, group delay {} samples, {:?} phase",
            spec.method, spec.filter_type, report.num_taps, report.group_delay_samples, report.linear_phase
        );
        if self.verbose {
            let _ = writeln!(
                out,
                "window {:?}, fs {} Hz, cutoff {} / {} Hz, stopband {} dB",
                spec.window_type,
                spec.sample_rate,
                spec.cutoff_low,
                spec.cutoff_high,
                spec.stopband_attenuation_db
            );
        }
        for probe in &report.probes {
            let _ = writeln!(out, "  {:>10.1} Hz: {:>8.2} dB", probe.frequency_hz, probe.magnitude_db);
        }
        for (i, tap) in report.taps.iter().enumerate() {
            let _ = writeln!(out, "h[{:>4}] = {:+.12e}", i, tap);
        }
        out
    }
}
