use crate::types::errors::ConversionError;

const MONTH_NAMES: [&str; 12] = ["Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec"];

/// Names the conversion applied to a raw fixed-width slice.
///
/// Every field in the record layout carries one of these; applying it is a
/// pure function of the raw text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Converter {
    /// Trim surrounding blanks.
    Text,
    /// Pass the slice through untouched.
    Raw,
    AccountNumber,
    Date,
    MonthName,
    Integer,
    Usage,
    Demand,
    Multiplier,
    AccountMultiplier,
    Currency,
    DeleteBillFlag
}

impl Converter {
    pub fn apply(&self, raw: &str) -> Result<String, ConversionError> {
        match self {
            Converter::Text => Ok(raw.trim().to_string()),
            Converter::Raw => Ok(noop(raw)),
            Converter::AccountNumber => Ok(format_account_number(raw)),
            Converter::Date => convert_date(raw),
            Converter::MonthName => month_name(raw),
            Converter::Integer => convert_to_integer(raw),
            Converter::Usage => convert_to_usage(raw),
            Converter::Demand => convert_to_demand(raw),
            Converter::Multiplier => convert_multiplier(raw),
            Converter::AccountMultiplier => convert_account_multiplier(raw),
            Converter::Currency => convert_to_currency(raw),
            Converter::DeleteBillFlag => Ok(raw.trim().to_string())
        }
    }

    /// True for converters that reject blank input.
    #[cfg(test)]
    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            Converter::Integer
                | Converter::Usage
                | Converter::Demand
                | Converter::Multiplier
                | Converter::AccountMultiplier
                | Converter::Currency
        )
    }
}

/// Drops the two character region prefix from the raw account number.
/// Shorter numbers leave the field's trailing blanks, which are trimmed.
pub fn format_account_number(raw: &str) -> String {
    raw.chars().skip(2).collect::<String>().trim().to_string()
}

/// Reorders `yyyymmdd` into `mm/dd/yyyy`. An all-blank field stays blank.
///
/// The digits are not checked against the calendar: the extract writes
/// `00000000` for dates that were never set, and those render as `00/00/0000`.
pub fn convert_date(raw: &str) -> Result<String, ConversionError> {
    let text = raw.trim();

    if text.is_empty() {
        return Ok(String::new());
    }

    if text.len() != 8 || !text.bytes().all(|byte| byte.is_ascii_digit()) {
        return Err(ConversionError::InvalidDate(raw.to_string()));
    }

    let (year, rest) = text.split_at(4);
    let (month, day) = rest.split_at(2);

    Ok(format!("{month}/{day}/{year}"))
}

/// Maps a two digit month number onto its three letter label.
pub fn month_name(raw: &str) -> Result<String, ConversionError> {
    raw.trim()
        .parse::<usize>()
        .ok()
        .and_then(|month| month.checked_sub(1))
        .and_then(|index| MONTH_NAMES.get(index))
        .map(|name| name.to_string())
        .ok_or_else(|| ConversionError::InvalidMonth(raw.to_string()))
}

/// Renders a zoned number with `precision` implied decimal places.
///
/// Leading zeros are stripped, the result is zero padded so at least one digit
/// sits before the decimal point, and a negative value gets a leading minus.
/// The sign may lead or trail the digits, and the legacy `0-7` spelling of a
/// negative value is accepted.
pub fn convert_number(raw: &str, precision: usize) -> Result<String, ConversionError> {
    let (negative, digits) = split_sign(raw.trim())
        .ok_or_else(|| ConversionError::InvalidNumber(raw.to_string()))?;

    let magnitude = digits.trim_start_matches('0');
    let padded = format!("{magnitude:0>width$}", width = precision + 1);
    let (whole, fraction) = padded.split_at(padded.len() - precision);

    let number = if precision == 0 {
        whole.to_string()
    } else {
        format!("{whole}.{fraction}")
    };

    if negative && !magnitude.is_empty() {
        Ok(format!("-{number}"))
    } else {
        Ok(number)
    }
}

fn split_sign(text: &str) -> Option<(bool, &str)> {
    let text = text.strip_prefix('0')
        .filter(|rest| rest.starts_with('-'))
        .unwrap_or(text);

    let (negative, body) = if let Some(rest) = text.strip_prefix('-') {
        (true, rest)
    } else if let Some(rest) = text.strip_prefix('+') {
        (false, rest)
    } else if let Some(rest) = text.strip_suffix('-') {
        (true, rest)
    } else if let Some(rest) = text.strip_suffix('+') {
        (false, rest)
    } else {
        (false, text)
    };

    if body.is_empty() || !body.bytes().all(|byte| byte.is_ascii_digit()) {
        return None;
    }

    Some((negative, body))
}

/// Two decimal amount; credits are written with a trailing `CR` instead of a minus.
pub fn convert_to_currency(raw: &str) -> Result<String, ConversionError> {
    let amount = convert_number(raw, 2)?;

    Ok(match amount.strip_prefix('-') {
        Some(magnitude) => format!("{magnitude}CR"),
        None => amount
    })
}

pub fn convert_to_demand(raw: &str) -> Result<String, ConversionError> {
    convert_number(raw, 3)
}

pub fn convert_to_usage(raw: &str) -> Result<String, ConversionError> {
    convert_number(raw, 2)
}

pub fn convert_to_integer(raw: &str) -> Result<String, ConversionError> {
    convert_number(raw, 0)
}

pub fn convert_multiplier(raw: &str) -> Result<String, ConversionError> {
    convert_number(raw, 4)
}

/// The first four raw digits become the decimal digits, no rounding.
/// Blanks among them are malformed, not zeros.
pub fn convert_account_multiplier(raw: &str) -> Result<String, ConversionError> {
    let digits: String = raw.chars().take(4).collect();

    if digits.len() != 4 || !digits.bytes().all(|byte| byte.is_ascii_digit()) {
        return Err(ConversionError::InvalidMultiplier(raw.to_string()));
    }

    Ok(format!(".{digits}"))
}

/// `Y` marks an electronic-only bill that must not be printed. `N` (paper) and
/// `B` (both) print, as does anything else.
pub fn delete_bill_flag(raw: &str) -> bool {
    raw.trim() == "Y"
}

pub fn noop(raw: &str) -> String {
    raw.to_string()
}
