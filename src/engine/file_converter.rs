use crate::engine::{ConvertError, ConvertOptions, InputEncoding, OutputMode, RunSummary};
use crate::models::{Account, AccountError};
use crate::types::InputLine;
use csv::{Terminator, WriterBuilder};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, warn};

/// Drives one extract through an [`Account`] and writes the tab-delimited output.
#[derive(Debug, Clone, Default)]
pub struct FileConverter {
    options: ConvertOptions
}

impl FileConverter {
    pub fn new(options: ConvertOptions) -> Self {
        Self { options }
    }

    /// Converts `input` into `output`. A failed run removes whatever was written.
    pub fn convert_file(&self, input: &Path, output: &Path) -> Result<RunSummary, ConvertError> {
        let name = input.display().to_string();
        let bytes = fs::read(input)?;
        let writer = BufWriter::new(File::create(output)?);

        let result = self.convert_bytes(&name, &bytes, writer);

        match &result {
            Ok(summary) => {
                let output = output.display();

                info!("Created [{output}]");
                info!("[{output}] Total bills: {}", summary.total_bills);
                info!("[{output}] Printed: {}", summary.printed_bills);
                info!("[{output}] Not printed: {}", summary.suppressed_bills);
            }
            Err(failure) => {
                error!("Conversion of [{name}] failed: {failure}");

                if let Err(removal) = fs::remove_file(output) {
                    warn!("Could not remove partial output [{}]: {removal}", output.display());
                }
            }
        }

        result
    }

    pub fn convert_bytes<W: Write>(&self, name: &str, bytes: &[u8], output: W) -> Result<RunSummary, ConvertError> {
        let encoding = self.options.encoding.unwrap_or_else(|| InputEncoding::sniff(bytes));
        let text = encoding.decode(bytes).ok_or_else(|| ConvertError::encoding(name, encoding))?;

        self.convert_text(name, &text, output)
    }

    /// Feeds every line to the accumulator in order. The header is written
    /// once the control line is known; rows are written as accounts close.
    pub fn convert_text<W: Write>(&self, name: &str, text: &str, output: W) -> Result<RunSummary, ConvertError> {
        let mut lines = text.lines().enumerate().map(|(index, line)| InputLine::new(index + 1, line));

        let control = lines.next()
            .ok_or_else(|| ConvertError::account(name, AccountError::missing_control("input is empty")))?;
        let mut account = Account::from_control(&control, self.options.account.clone())
            .map_err(|source| ConvertError::account(name, source))?;

        debug!(
            "[{name}] billing date {}, cycle [{}], budget billing {}, history window {:?}",
            account.control().bill_date,
            account.control().cycle,
            account.layout().budget_billing,
            account.valid_periods().tokens()
        );

        let mut writer = WriterBuilder::new()
            .delimiter(b'\t')
            .terminator(Terminator::Any(b'\n'))
            .from_writer(output);

        writer.write_record(account.headings())?;

        let mut summary = RunSummary::default();

        for line in lines {
            let Some(finished) = account.apply(&line).map_err(|source| ConvertError::account(name, source))? else {
                continue;
            };

            let written = finished.print_bill || self.options.print_all;

            if written {
                writer.write_record(&finished.row)?;
            }

            summary.record(written);
        }

        account.finish().map_err(|source| ConvertError::account(name, source))?;
        writer.flush()?;

        if !account.flagged_rate_codes().is_empty() {
            warn!("[{name}] unrecognized rate codes: {:?}", account.flagged_rate_codes());
        }

        Ok(summary)
    }
}

/// `fxd <stem>_PRN.csv` or `fxd <stem>_PDF.csv` beside the input.
pub fn output_path(input: &Path, mode: OutputMode) -> PathBuf {
    let stem = input.file_stem().map(|stem| stem.to_string_lossy()).unwrap_or_default();
    let file_name = format!("fxd {stem}_{}.csv", mode.suffix());

    match input.parent() {
        Some(directory) => directory.join(file_name),
        None => PathBuf::from(file_name)
    }
}
