use super::convert::*;
use super::{ConversionError, Converter, Tag, ValidPeriods, PERIOD_COUNT};
use anyhow::Result;
use chrono::NaiveDate;
use proptest::prelude::*;

#[test]
fn test_convert_number_places_decimal_point_and_strips_zeros() -> Result<()> {
    let test_cases = vec![
        ("000012345", 2, "123.45"),
        ("000000005", 2, "0.05"),
        ("000000000", 2, "0.00"),
        ("000000000", 0, "0"),
        ("000000000", 3, "0.000"),
        ("000012345", 0, "12345"),
        ("000012345", 3, "12.345"),
        ("000012345", 4, "1.2345"),
        ("  0001234", 2, "12.34"),
        ("-00012345", 2, "-123.45"),
        ("+00012345", 2, "123.45"),
        ("00012345-", 2, "-123.45"),
        ("0-7", 0, "-7"),
        ("-00000000", 2, "0.00"),
    ];

    for (raw, precision, expected) in test_cases {
        assert_eq!(convert_number(raw, precision)?, expected, "raw '{raw}' at precision {precision}");
    }

    Ok(())
}

#[test]
fn test_convert_number_rejects_malformed_input() {
    assert_eq!(convert_number("12A45", 2), Err(ConversionError::InvalidNumber("12A45".to_string())));
    assert!(convert_number("", 2).is_err());
    assert!(convert_number("         ", 0).is_err());
    assert!(convert_number("-", 0).is_err());
    assert!(convert_number("1-2", 0).is_err());
    assert!(convert_number("--12", 0).is_err());
}

#[test]
fn test_currency_uses_trailing_credit_marker() -> Result<()> {
    assert_eq!(convert_to_currency("00000012345")?, "123.45");
    assert_eq!(convert_to_currency("-0000012345")?, "123.45CR");
    assert_eq!(convert_to_currency("0000012345-")?, "123.45CR");
    assert_eq!(convert_to_currency("00000000007")?, "0.07");
    assert_eq!(convert_to_currency("00000000000")?, "0.00");

    Ok(())
}

#[test]
fn test_precision_specific_converters() -> Result<()> {
    assert_eq!(convert_to_demand("000012345")?, "12.345");
    assert_eq!(convert_to_usage("000012345")?, "123.45");
    assert_eq!(convert_to_integer("000012345")?, "12345");
    assert_eq!(convert_multiplier("000010000")?, "1.0000");

    Ok(())
}

#[test]
fn test_account_multiplier_keeps_first_four_digits() -> Result<()> {
    assert_eq!(convert_account_multiplier("012399")?, ".0123");
    assert_eq!(convert_account_multiplier("5000")?, ".5000");
    assert!(convert_account_multiplier("12").is_err());
    assert!(convert_account_multiplier("1 2399").is_err());
    assert!(convert_account_multiplier("  0123").is_err());

    Ok(())
}

#[test]
fn test_dates_are_reordered_and_validated() -> Result<()> {
    assert_eq!(convert_date("20240315")?, "03/15/2024");
    assert_eq!(convert_date("        ")?, "");
    assert_eq!(convert_date("00000000")?, "00/00/0000");
    assert_eq!(convert_date("20241315")?, "13/15/2024");
    assert!(convert_date("2024031").is_err());
    assert!(convert_date("2024O315").is_err());

    Ok(())
}

#[test]
fn test_month_names() -> Result<()> {
    assert_eq!(month_name("01")?, "Jan");
    assert_eq!(month_name("12")?, "Dec");
    assert!(month_name("00").is_err());
    assert!(month_name("13").is_err());

    Ok(())
}

#[test]
fn test_account_number_drops_region_prefix() {
    assert_eq!(format_account_number("010075941001"), "0075941001");
    assert_eq!(format_account_number("0175941001    "), "75941001");
}

#[test]
fn test_delete_bill_flag_only_suppresses_on_y() {
    assert!(delete_bill_flag("Y"));
    assert!(!delete_bill_flag("N"));
    assert!(!delete_bill_flag("B"));
    assert!(!delete_bill_flag(" "));
}

#[test]
fn test_converter_dispatch_matches_free_functions() -> Result<()> {
    assert_eq!(Converter::Currency.apply("-0000000150")?, "1.50CR");
    assert_eq!(Converter::Text.apply("  HEBER CITY  ")?, "HEBER CITY");
    assert_eq!(Converter::Raw.apply("  as is ")?, "  as is ");
    assert_eq!(Converter::DeleteBillFlag.apply("Y")?, "Y");
    assert!(Converter::Integer.is_numeric());
    assert!(!Converter::Date.is_numeric());

    Ok(())
}

#[test]
fn test_tag_parsing() {
    assert_eq!(Tag::parse("MSTR010075941001"), Tag::Master);
    assert_eq!(Tag::parse("MTR 0100"), Tag::Meter);
    assert_eq!(Tag::parse("HIST"), Tag::History);
    assert_eq!(Tag::parse(""), Tag::Blank);
    assert_eq!(Tag::parse("    "), Tag::Blank);
    assert_eq!(Tag::parse("XTRA stuff"), Tag::Unknown("XTRA".to_string()));
}

#[test]
fn test_valid_periods_wrap_across_january() -> Result<()> {
    let billing_date = NaiveDate::from_ymd_opt(2024, 1, 15).ok_or_else(|| anyhow::anyhow!("bad date"))?;
    let periods = ValidPeriods::for_billing_date(billing_date);

    assert_eq!(periods.tokens().len(), PERIOD_COUNT);
    assert_eq!(periods.tokens()[0], "202401");
    assert_eq!(periods.tokens()[1], "202312");
    assert_eq!(periods.tokens()[12], "202301");
    assert!(periods.contains("202302"));
    assert!(!periods.contains("202212"));
    assert!(!periods.contains("202402"));

    Ok(())
}

#[test]
fn test_valid_periods_mid_year() -> Result<()> {
    let billing_date = NaiveDate::from_ymd_opt(2024, 6, 3).ok_or_else(|| anyhow::anyhow!("bad date"))?;
    let periods = ValidPeriods::for_billing_date(billing_date);

    let expected = vec![
        "202406", "202405", "202404", "202403", "202402", "202401",
        "202312", "202311", "202310", "202309", "202308", "202307", "202306",
    ];

    assert_eq!(periods.tokens(), expected.as_slice());

    Ok(())
}

#[test]
fn test_valid_periods_december_only_reaches_back_one_month_into_prior_year() -> Result<()> {
    let billing_date = NaiveDate::from_ymd_opt(2023, 12, 31).ok_or_else(|| anyhow::anyhow!("bad date"))?;
    let periods = ValidPeriods::for_billing_date(billing_date);

    assert_eq!(periods.tokens()[11], "202301");
    assert_eq!(periods.tokens()[12], "202212");

    Ok(())
}

fn signed_raw() -> impl Strategy<Value = (String, bool)> {
    ("[0-9]{1,11}", 0..4usize).prop_map(|(digits, sign)| match sign {
        0 => (digits, false),
        1 => (format!("-{digits}"), true),
        2 => (format!("{digits}-"), true),
        _ => (format!("+{digits}"), false)
    })
}

proptest! {
    #[test]
    fn prop_currency_credit_marker_tracks_sign((raw, negative) in signed_raw()) {
        let rendered = convert_to_currency(&raw).map_err(|error| TestCaseError::fail(error.to_string()))?;
        let digits: String = raw.chars().filter(|character| character.is_ascii_digit()).collect();
        let magnitude = digits.trim_start_matches('0');

        prop_assert_eq!(rendered.ends_with("CR"), negative && !magnitude.is_empty());
        prop_assert!(!rendered.starts_with('-') && !rendered.starts_with('+'));

        let body = rendered.trim_end_matches("CR").replace('.', "");
        prop_assert_eq!(body, format!("{magnitude:0>3}"));
    }
}
