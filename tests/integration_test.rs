use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use anyhow::{anyhow, Result};
use tempfile::TempDir;

fn staged_sample(directory: &TempDir) -> Result<PathBuf> {
    let input = directory.path().join("HLAP CYCLE 02.txt");
    fs::copy(Path::new("samples").join("hlap_sample.txt"), &input)?;

    Ok(input)
}

fn read_rows(path: &Path) -> Result<Vec<Vec<String>>> {
    let text = fs::read_to_string(path)?;

    Ok(text.lines().map(|line| line.split('\t').map(str::to_string).collect()).collect())
}

fn column(rows: &[Vec<String>], row: usize, heading: &str) -> Result<String> {
    let index = rows[0].iter().position(|name| name == heading)
        .ok_or_else(|| anyhow!("heading {heading} missing from output"))?;

    Ok(rows[row][index].clone())
}

#[test]
fn test_cli_writes_print_and_full_outputs() -> Result<()> {
    let binary_path = env!("CARGO_BIN_EXE_hlap-convert");
    let directory = tempfile::tempdir()?;
    let input = staged_sample(&directory)?;

    let output = Command::new(binary_path)
        .arg(&input)
        .arg("warn")
        .output()?;

    assert!(output.status.success());

    let print_path = directory.path().join("fxd HLAP CYCLE 02_PRN.csv");
    let full_path = directory.path().join("fxd HLAP CYCLE 02_PDF.csv");

    let stdout = String::from_utf8(output.stdout)?;
    let mut lines = stdout.lines();

    assert_eq!(lines.next(), Some("file,mode,total_bills,printed_bills,suppressed_bills"));
    assert_eq!(lines.next(), Some(format!("{},PRN,3,2,1", print_path.display()).as_str()));
    assert_eq!(lines.next(), Some(format!("{},PDF,3,3,0", full_path.display()).as_str()));

    let print_rows = read_rows(&print_path)?;
    let full_rows = read_rows(&full_path)?;

    assert_eq!(print_rows.len(), 3);
    assert_eq!(full_rows.len(), 4);

    for row in print_rows.iter().chain(full_rows.iter()) {
        assert_eq!(row.len(), print_rows[0].len());
    }

    Ok(())
}

#[test]
fn test_cli_output_values_match_sample() -> Result<()> {
    let binary_path = env!("CARGO_BIN_EXE_hlap-convert");
    let directory = tempfile::tempdir()?;
    let input = staged_sample(&directory)?;

    let output = Command::new(binary_path).arg(&input).output()?;

    assert!(output.status.success());

    let rows = read_rows(&directory.path().join("fxd HLAP CYCLE 02_PDF.csv"))?;

    assert_eq!(column(&rows, 1, "BILL_DATE")?, "03/15/2024");
    assert_eq!(column(&rows, 1, "ACCOUNT_NUMBER")?, "0075941001");
    assert_eq!(column(&rows, 1, "HIST_MONTH_1")?, "Feb");
    assert_eq!(column(&rows, 1, "HIST_USAGE_2")?, "912");
    assert_eq!(column(&rows, 1, "HIST_USAGE_3")?, "");
    assert_eq!(column(&rows, 1, "HIST_USAGE_4")?, "");
    assert_eq!(column(&rows, 1, "PAYMENTS")?, "70.00CR");
    assert_eq!(column(&rows, 1, "METER_ACCT_MULT_1")?, ".0100");
    assert_eq!(column(&rows, 1, "METER_MULTIPLIER_1")?, "1.0000");

    assert_eq!(column(&rows, 2, "ON_PEAK_USE")?, "50");
    assert_eq!(column(&rows, 2, "OFF_PEAK_USE")?, "100");
    assert_eq!(column(&rows, 2, "TOTAL_USE")?, "150");
    assert_eq!(column(&rows, 2, "TOTAL_DEMAND")?, "4.000");
    assert_eq!(column(&rows, 2, "ON_PEAK_CHG")?, "12.10");
    assert_eq!(column(&rows, 2, "OFF_PEAK_CHG")?, "4.50");
    assert_eq!(column(&rows, 2, "BANKED_USAGE")?, "120/35.50");
    assert_eq!(column(&rows, 2, "CHG_DESC_1")?, "BASE CHARGE");
    assert_eq!(column(&rows, 2, "BUDGET_BILL_MSG")?, "YOUR BUDGET AMOUNT IS $35.00");
    assert_eq!(column(&rows, 2, "BUDGET BILLING FLAG")?, "BUDGET BILLING");

    assert_eq!(column(&rows, 3, "PREVIOUS_BALANCE")?, "15.00CR");
    assert_eq!(column(&rows, 3, "EBILL_SW")?, "Y");
    assert_eq!(column(&rows, 3, "EOR")?, "*");

    Ok(())
}

#[test]
fn test_cli_logs_counts_per_output_file() -> Result<()> {
    let binary_path = env!("CARGO_BIN_EXE_hlap-convert");
    let directory = tempfile::tempdir()?;
    let input = staged_sample(&directory)?;

    let output = Command::new(binary_path)
        .arg(&input)
        .env("NO_COLOR", "1")
        .output()?;

    assert!(output.status.success());

    let stderr = String::from_utf8(output.stderr)?;

    for (suffix, total, printed, suppressed) in [("PRN", 3, 2, 1), ("PDF", 3, 3, 0)] {
        let label = directory.path().join(format!("fxd HLAP CYCLE 02_{suffix}.csv"));
        let label = label.display();

        assert!(stderr.contains(&format!("[{label}] Total bills: {total}")));
        assert!(stderr.contains(&format!("[{label}] Printed: {printed}")));
        assert!(stderr.contains(&format!("[{label}] Not printed: {suppressed}")));
    }

    assert!(stderr.lines().filter(|line| line.contains("Total bills:")).all(|line| line.contains("fxd HLAP CYCLE 02_")));

    Ok(())
}

#[test]
fn test_cli_fails_on_truncated_extract_without_leaving_output() -> Result<()> {
    let binary_path = env!("CARGO_BIN_EXE_hlap-convert");
    let directory = tempfile::tempdir()?;
    let input = staged_sample(&directory)?;

    let text = fs::read_to_string(&input)?;
    let truncated: Vec<&str> = text.lines().filter(|line| !line.starts_with("ACTT")).collect();
    fs::write(&input, truncated.join("\n"))?;

    let output = Command::new(binary_path).arg(&input).output()?;

    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    assert!(!directory.path().join("fxd HLAP CYCLE 02_PRN.csv").exists());
    assert!(!directory.path().join("fxd HLAP CYCLE 02_PDF.csv").exists());

    Ok(())
}

#[test]
fn test_cli_requires_an_input_path() -> Result<()> {
    let binary_path = env!("CARGO_BIN_EXE_hlap-convert");
    let output = Command::new(binary_path).output()?;

    assert!(!output.status.success());
    assert!(String::from_utf8(output.stderr)?.starts_with("Usage:"));

    Ok(())
}
