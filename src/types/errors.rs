use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConversionError {
    #[error("Conversion error: '{0}' is not a number")]
    InvalidNumber(String),
    #[error("Conversion error: '{0}' is not a yyyymmdd date")]
    InvalidDate(String),
    #[error("Conversion error: '{0}' is not a month number")]
    InvalidMonth(String),
    #[error("Conversion error: '{0}' does not start with four multiplier digits")]
    InvalidMultiplier(String)
}
