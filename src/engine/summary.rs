use crate::engine::OutputMode;
use serde::Serialize;

/// Bill counts for one converted file, cross-checked downstream against the
/// statement index.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub total_bills: usize,
    pub printed_bills: usize,
    pub suppressed_bills: usize
}

impl RunSummary {
    pub fn record(&mut self, written: bool) {
        self.total_bills += 1;

        if written {
            self.printed_bills += 1;
        } else {
            self.suppressed_bills += 1;
        }
    }

    pub fn report(self, file: String, mode: OutputMode) -> SummaryReport {
        SummaryReport {
            file,
            mode,
            total_bills: self.total_bills,
            printed_bills: self.printed_bills,
            suppressed_bills: self.suppressed_bills
        }
    }
}

/// One stdout row per output file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryReport {
    pub file: String,
    pub mode: OutputMode,
    pub total_bills: usize,
    pub printed_bills: usize,
    pub suppressed_bills: usize
}
