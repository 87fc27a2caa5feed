pub mod convert;
mod errors;
mod line;
mod periods;
#[cfg(test)]
mod tests;

use std::fmt::{self, Display, Formatter};

pub use convert::Converter;
pub use errors::ConversionError;
pub use line::InputLine;
pub use periods::{ValidPeriods, PERIOD_COUNT};

/// Record type carried in the first four columns of every extract line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Tag {
    Master,
    History,
    Meter,
    Charge,
    Message,
    Totals,
    Blank,
    Unknown(String)
}

impl Tag {
    pub fn parse(line: &str) -> Self {
        let code: String = line.chars().take(4).collect();

        match code.trim() {
            "MSTR" => Tag::Master,
            "HIST" => Tag::History,
            "MTR" => Tag::Meter,
            "CHGS" => Tag::Charge,
            "INFM" => Tag::Message,
            "ACTT" => Tag::Totals,
            "" => Tag::Blank,
            other => Tag::Unknown(other.to_string())
        }
    }

    pub fn code(&self) -> &str {
        match self {
            Tag::Master => "MSTR",
            Tag::History => "HIST",
            Tag::Meter => "MTR",
            Tag::Charge => "CHGS",
            Tag::Message => "INFM",
            Tag::Totals => "ACTT",
            Tag::Blank => "",
            Tag::Unknown(code) => code
        }
    }
}

impl Display for Tag {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}", self.code())
    }
}
