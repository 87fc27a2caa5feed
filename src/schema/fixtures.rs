//! Builds fixed-width extract lines from the field tables so tests never count columns by hand.

use crate::schema::definitions::*;
use crate::schema::FieldSpec;
use crate::types::Converter;

pub struct LineBuilder {
    chars: Vec<char>,
    specs: Vec<FieldSpec>
}

impl LineBuilder {
    pub fn new(prefix: &str, specs: Vec<FieldSpec>) -> Self {
        let width = specs.iter()
            .map(|spec| if spec.end == LINE_END { spec.start } else { spec.end })
            .max()
            .unwrap_or(0)
            .max(prefix.len());

        let mut builder = Self {
            chars: vec![' '; width],
            specs
        };

        builder.write(0, prefix);

        for spec in builder.specs.clone() {
            if spec.converter.is_numeric() {
                let zeros = "0".repeat(spec.end - spec.start);
                builder.write(spec.start, &zeros);
            }
        }

        builder
    }

    pub fn master() -> Self {
        Self::new("MSTR", MASTER.to_vec())
    }

    pub fn history() -> Self {
        Self::new("HIST", HISTORY.to_vec())
    }

    pub fn meter() -> Self {
        Self::new("MTR ", METERS.to_vec())
    }

    pub fn charge() -> Self {
        Self::new("CHGS", CHARGES.to_vec())
    }

    pub fn message() -> Self {
        Self::new("INFM", MESSAGES.to_vec())
    }

    pub fn totals(budget_billing: bool) -> Self {
        let appendix: &[FieldSpec] = if budget_billing { &WITH_BUDGET } else { &WITHOUT_BUDGET };
        Self::new("ACTT", ACCOUNT_TOTALS.iter().chain(appendix).copied().collect())
    }

    pub fn control() -> Self {
        Self::new(CONTROL_PREFIX, CONTROL.to_vec())
    }

    /// Places `value` in the named field. Numeric values are right aligned and
    /// zero filled when they are plain digits; everything else is left aligned.
    pub fn set(mut self, name: &str, value: &str) -> Self {
        let spec = *self.specs.iter()
            .find(|spec| spec.name == name)
            .unwrap_or_else(|| panic!("no field named {name}"));

        if spec.end == LINE_END {
            self.write(spec.start, value);
            return self;
        }

        let width = spec.end - spec.start;
        let text = if spec.converter.is_numeric() && spec.converter != Converter::AccountMultiplier {
            if value.bytes().all(|byte| byte.is_ascii_digit()) {
                format!("{value:0>width$}")
            } else {
                format!("{value:>width$}")
            }
        } else {
            format!("{value:<width$}")
        };

        assert_eq!(text.chars().count(), width, "value '{value}' does not fit {name}");
        self.write(spec.start, &text);
        self
    }

    /// Appends raw text after the last field.
    pub fn append(mut self, text: &str) -> Self {
        self.chars.extend(text.chars());
        self
    }

    pub fn build(self) -> String {
        self.chars.into_iter().collect::<String>().trim_end().to_string()
    }

    fn write(&mut self, start: usize, text: &str) {
        for (offset, character) in text.chars().enumerate() {
            let index = start + offset;

            if index >= self.chars.len() {
                self.chars.resize(index + 1, ' ');
            }

            self.chars[index] = character;
        }
    }
}

/// A control line for the given billing and penalty dates, cycle `02`.
pub fn control_line(bill_date: &str, pen_date: &str) -> String {
    LineBuilder::control()
        .set("BILL_DATE", bill_date)
        .set("PEN_DATE", pen_date)
        .append("               02")
        .build()
}
