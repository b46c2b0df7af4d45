use std::fmt::Write;

use super::{FilterReport, Formatter};

/// One `index,tap` row per coefficient
pub struct CsvFormatter;

impl Formatter for CsvFormatter {
    fn format(&self, report: &FilterReport) -> String {
        let mut out = String::from("index,tap\n");
        for (i, tap) in report.taps.iter().enumerate() {
            let _ = writeln!(out, "{},{:.17e}", i, tap);
        }
        out
    }
}
