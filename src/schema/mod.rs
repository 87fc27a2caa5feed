pub mod definitions;
#[cfg(test)]
pub mod fixtures;

use crate::types::{ConversionError, Converter, InputLine, PERIOD_COUNT};
use definitions::*;

/// One fixed-width field: output heading, absolute column range and converter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub start: usize,
    pub end: usize,
    pub converter: Converter
}

impl FieldSpec {
    pub const fn new(name: &'static str, start: usize, end: usize, converter: Converter) -> Self {
        Self { name, start, end, converter }
    }

    pub fn raw(&self, line: &InputLine) -> String {
        line.slice(self.start, self.end)
    }

    pub fn convert(&self, raw: &str) -> Result<String, ConversionError> {
        self.converter.apply(raw)
    }
}

/// Maximum occurrences of each repeating block in one output row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    pub max_meters: usize,
    pub max_charges: usize,
    pub max_messages: usize,
    pub max_history: usize
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_meters: 10,
            max_charges: 15,
            max_messages: 5,
            max_history: PERIOD_COUNT
        }
    }
}

/// The record definition table for one file.
///
/// The field tables themselves are static; a layout only selects the
/// budget-billing appendix, the end-of-record marker and the cardinalities.
/// It is fixed once the control line has been read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordLayout {
    pub budget_billing: bool,
    pub eor_required: bool,
    pub limits: Limits
}

impl RecordLayout {
    pub fn new(budget_billing: bool) -> Self {
        Self {
            budget_billing,
            eor_required: true,
            limits: Limits::default()
        }
    }

    pub fn with_eor(mut self, eor_required: bool) -> Self {
        self.eor_required = eor_required;
        self
    }

    pub fn with_limits(mut self, limits: Limits) -> Self {
        self.limits = limits;
        self
    }

    pub fn master(&self) -> &'static [FieldSpec] {
        &MASTER
    }

    pub fn history(&self) -> &'static [FieldSpec] {
        &HISTORY
    }

    pub fn charges(&self) -> &'static [FieldSpec] {
        &CHARGES
    }

    pub fn messages(&self) -> &'static [FieldSpec] {
        &MESSAGES
    }

    pub fn meters(&self) -> &'static [FieldSpec] {
        &METERS
    }

    /// Account totals followed by the budget or non-budget appendix.
    pub fn account_totals(&self) -> impl Iterator<Item = &'static FieldSpec> {
        let appendix: &'static [FieldSpec] = if self.budget_billing { &WITH_BUDGET } else { &WITHOUT_BUDGET };
        ACCOUNT_TOTALS.iter().chain(appendix.iter())
    }

    /// Output column headings. Row assembly follows this order exactly.
    pub fn headings(&self) -> Vec<String> {
        let mut headings = vec!["BILL_DATE".to_string(), "PEN_DATE".to_string()];

        headings.extend(MASTER.iter().map(|spec| spec.name.to_string()));
        headings.extend(repeated(&HISTORY, self.limits.max_history));
        headings.extend(repeated(&CHARGES, self.limits.max_charges));
        headings.extend(repeated(&MESSAGES, self.limits.max_messages));
        headings.extend(
            self.account_totals()
                .filter(|spec| spec.name != BUDGET_MESSAGE)
                .map(|spec| spec.name.to_string())
        );
        headings.extend(repeated(&METERS, self.limits.max_meters));

        if self.budget_billing {
            headings.push(BUDGET_MESSAGE.to_string());
            headings.push(BUDGET_FLAG_HEADING.to_string());
        }

        headings.extend(CUSTOM_HEADINGS.iter().map(|heading| heading.to_string()));

        if self.eor_required {
            headings.push(EOR_HEADING.to_string());
        }

        headings
    }
}

fn repeated(specs: &'static [FieldSpec], count: usize) -> impl Iterator<Item = String> {
    (1..=count).flat_map(move |index| specs.iter().map(move |spec| format!("{}_{index}", spec.name)))
}
