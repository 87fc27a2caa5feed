use crate::models::errors::AccountError;
use crate::models::record::{AccountRecord, ControlSection, HistoryPeriod, MasterSection, PeakUsage, TotalsSection};
use crate::models::{AccountConfig, RateClass, RateCodes};
use crate::schema::definitions::*;
use crate::schema::{FieldSpec, RecordLayout};
use crate::types::convert::{convert_date, convert_to_integer, delete_bill_flag};
use crate::types::{ConversionError, Converter, InputLine, Tag, ValidPeriods};
use chrono::NaiveDate;
use std::collections::BTreeSet;
use tracing::{debug, trace, warn};

/// A completed account, ready to be written or suppressed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FinishedAccount {
    pub account_number: String,
    pub print_bill: bool,
    pub row: Vec<String>
}

#[derive(Debug)]
enum AccountState {
    AwaitingMaster,
    Accumulating(Box<AccountBuilder>)
}

/// Reassembles tagged extract lines into one output row per account.
///
/// An `Account` only exists once the control line has been unpacked, so the
/// billing dates and valid history window are always available. Per-account
/// data lives in the `Accumulating` state and is dropped on [`Account::reset`];
/// the control section, layout and history window survive for the whole file.
#[derive(Debug)]
pub struct Account {
    control: ControlSection,
    valid_periods: ValidPeriods,
    layout: RecordLayout,
    rate_codes: RateCodes,
    state: AccountState,
    flagged_rate_codes: BTreeSet<String>
}

impl Account {
    /// Unpacks the first line of the file.
    ///
    /// # Errors
    /// Returns `MissingControlLine` if the billing date is absent or malformed,
    /// since the history window cannot be computed without it.
    pub fn from_control(line: &InputLine, config: AccountConfig) -> Result<Self, AccountError> {
        let [bill_spec, pen_spec, budget_spec] = &CONTROL;

        let raw_bill_date = bill_spec.raw(line);
        let billing_date = NaiveDate::parse_from_str(raw_bill_date.trim(), "%Y%m%d")
            .map_err(|_| AccountError::missing_control(format!("billing date '{raw_bill_date}' on line {}", line.number)))?;

        let raw_pen_date = pen_spec.raw(line);
        let pen_date = convert_date(&raw_pen_date)
            .map_err(|_| AccountError::missing_control(format!("penalty date '{raw_pen_date}' on line {}", line.number)))?;

        let cycle = if line.starts_with(CONTROL_PREFIX) { line.trailing(2) } else { String::new() };
        let layout = config.layout(&budget_spec.raw(line));

        Ok(Self {
            control: ControlSection {
                bill_date: billing_date.format("%m/%d/%Y").to_string(),
                pen_date,
                cycle
            },
            valid_periods: ValidPeriods::for_billing_date(billing_date),
            layout,
            rate_codes: config.rate_codes,
            state: AccountState::AwaitingMaster,
            flagged_rate_codes: BTreeSet::new()
        })
    }

    pub fn control(&self) -> &ControlSection {
        &self.control
    }

    pub fn valid_periods(&self) -> &ValidPeriods {
        &self.valid_periods
    }

    pub fn layout(&self) -> &RecordLayout {
        &self.layout
    }

    pub fn headings(&self) -> Vec<String> {
        self.layout.headings()
    }

    /// Rate codes that looked time-of-use but matched no configured prefix.
    pub fn flagged_rate_codes(&self) -> &BTreeSet<String> {
        &self.flagged_rate_codes
    }

    pub fn is_accumulating(&self) -> bool {
        matches!(self.state, AccountState::Accumulating(_))
    }

    /// Applies one line. Returns the finished account when the line is the `ACTT`
    /// record that closes it; the accumulator is then reset for the next account.
    ///
    /// # Errors
    /// - `SchemaConversion` when a field does not convert.
    /// - `UnterminatedAccount` when a `MSTR` arrives before the previous `ACTT`.
    /// - `UnexpectedRecord` when an account line arrives outside an account.
    pub fn apply(&mut self, line: &InputLine) -> Result<Option<FinishedAccount>, AccountError> {
        if let Tag::Blank | Tag::Unknown(_) = line.tag {
            trace!("Line [{}]:[{}] ignored", line.number, line.tag);
            return Ok(None);
        }

        match line.tag {
            Tag::Master => return self.unpack_master(line).map(|_| None),
            Tag::Totals => return self.unpack_account_totals(line).map(Some),
            _ => {}
        }

        let AccountState::Accumulating(builder) = &mut self.state else {
            return Err(AccountError::unexpected(line));
        };

        match line.tag {
            Tag::History => builder.unpack_history(line, &self.layout, &self.valid_periods)?,
            Tag::Meter => builder.unpack_meter(line, &self.layout, &self.rate_codes, &mut self.flagged_rate_codes)?,
            Tag::Charge => builder.unpack_charge(line, &self.layout)?,
            Tag::Message => builder.unpack_message(line, &self.layout)?,
            Tag::Master | Tag::Totals | Tag::Blank | Tag::Unknown(_) => {}
        }

        Ok(None)
    }

    /// Drops any in-progress account. File-wide state is kept. Runs after every
    /// finalized account.
    pub fn reset(&mut self) {
        self.state = AccountState::AwaitingMaster;
    }

    /// Confirms the input ended between accounts.
    ///
    /// # Errors
    /// Returns `UnterminatedAccount` if an account is still open.
    pub fn finish(&self) -> Result<(), AccountError> {
        match &self.state {
            AccountState::AwaitingMaster => Ok(()),
            AccountState::Accumulating(builder) => {
                Err(AccountError::unterminated(builder.start_line, &builder.master.account_number))
            }
        }
    }

    fn unpack_master(&mut self, line: &InputLine) -> Result<(), AccountError> {
        self.finish()?;

        let fields = unpack_fields(line, self.layout.master().iter())?;
        let print_bill = !fields.suppressed;
        let account_number = fields.values.first().cloned().unwrap_or_default();

        trace!("Account [{account_number}] opened on line [{}]", line.number);

        self.state = AccountState::Accumulating(Box::new(AccountBuilder {
            start_line: line.number,
            master: MasterSection {
                account_number,
                columns: fields.values
            },
            history: Vec::new(),
            charges: Vec::new(),
            charges_closed: false,
            messages: Vec::new(),
            meters: Vec::new(),
            peak: PeakUsage::default(),
            print_bill
        }));

        Ok(())
    }

    fn unpack_account_totals(&mut self, line: &InputLine) -> Result<FinishedAccount, AccountError> {
        if !self.is_accumulating() {
            return Err(AccountError::unexpected(line));
        }

        let mut columns = Vec::new();
        let mut budget_message = String::new();
        let mut budget_billing = false;
        let mut suppressed = false;

        for spec in self.layout.account_totals() {
            let value = convert_field(line, spec)?;

            if spec.converter == Converter::DeleteBillFlag && delete_bill_flag(&value) {
                suppressed = true;
            }

            if spec.name == BUDGET_AR_AMOUNT && !value.contains("CR") && value != "0.00" {
                budget_billing = true;
            }

            if spec.name == BUDGET_MESSAGE {
                budget_message = value;
            } else {
                columns.push(value);
            }
        }

        let AccountState::Accumulating(builder) = &mut self.state else {
            return Err(AccountError::unexpected(line));
        };

        let record = builder.finish(TotalsSection { columns, budget_message, budget_billing }, suppressed);
        self.reset();

        let account_number = record.master.account_number.clone();
        let print_bill = record.print_bill;

        debug!("Account [{account_number}] finalized on line [{}], print: {print_bill}", line.number);

        Ok(FinishedAccount {
            account_number,
            print_bill,
            row: record.into_row(&self.control, &self.layout)
        })
    }
}

#[derive(Debug)]
struct AccountBuilder {
    start_line: usize,
    master: MasterSection,
    history: Vec<HistoryPeriod>,
    charges: Vec<Vec<String>>,
    /// Set by the first message line; later regular charges would land out of position.
    charges_closed: bool,
    messages: Vec<String>,
    meters: Vec<Vec<String>>,
    peak: PeakUsage,
    print_bill: bool
}

impl AccountBuilder {
    fn unpack_history(&mut self, line: &InputLine, layout: &RecordLayout, valid_periods: &ValidPeriods) -> Result<(), AccountError> {
        if self.history.len() >= layout.limits.max_history {
            warn!("Account [{}]: history line [{}] dropped, limit of {} reached", self.master.account_number, line.number, layout.limits.max_history);
            return Ok(());
        }

        let period = line.slice(HISTORY_PERIOD.0, HISTORY_PERIOD.1);
        let consumption = line.slice(HISTORY_CONSUMPTION.0, HISTORY_CONSUMPTION.1);
        let distinct: BTreeSet<char> = consumption.chars().collect();

        if !valid_periods.contains(&period) || distinct.len() <= 1 {
            self.history.push(HistoryPeriod::Blank);
        } else {
            let fields = unpack_fields(line, layout.history().iter())?;
            self.history.push(HistoryPeriod::Period(fields.values));
        }

        Ok(())
    }

    fn unpack_meter(
        &mut self,
        line: &InputLine,
        layout: &RecordLayout,
        rate_codes: &RateCodes,
        flagged: &mut BTreeSet<String>
    ) -> Result<(), AccountError> {
        let fields = unpack_fields(line, layout.meters().iter())?;
        let rate_code = fields.values[METER_RATE].clone();
        let banked = fields.values[METER_BANKED_USE].clone();

        if self.meters.len() < layout.limits.max_meters {
            self.meters.push(fields.values);
        } else {
            warn!("Account [{}]: meter line [{}] dropped, limit of {} reached", self.master.account_number, line.number, layout.limits.max_meters);
        }

        let class = rate_codes.classify(&rate_code);

        match class {
            RateClass::Standard => return Ok(()),
            RateClass::Unrecognized => {
                if flagged.insert(rate_code.clone()) {
                    warn!("Rate code [{rate_code}] on line [{}] looks time-of-use but matches no configured prefix", line.number);
                }
                return Ok(());
            }
            RateClass::OnPeak | RateClass::OffPeak | RateClass::Peak => {}
        }

        let usage = whole_number(line, &METERS[METER_USAGE])?;
        let demand = whole_number(line, &METERS[METER_DEMAND])?;

        match class {
            RateClass::OnPeak => self.peak.add_on_peak(usage, demand),
            RateClass::OffPeak => self.peak.add_off_peak(usage, demand),
            _ => {}
        }

        let banked = match banked.strip_suffix(".00") {
            Some(whole) => whole.to_string(),
            None => banked
        };
        self.peak.banked.push(banked);

        Ok(())
    }

    fn unpack_charge(&mut self, line: &InputLine, layout: &RecordLayout) -> Result<(), AccountError> {
        let fields = unpack_fields(line, layout.charges().iter())?;

        if line.slice(0, usize::MAX).contains(PEAK_CHARGE_MARKER) {
            let amount = fields.values[CHARGE_AMOUNT].clone();

            if fields.values[CHARGE_NAME].starts_with("ON-") {
                self.peak.on_peak_charge = Some(amount);
            } else {
                self.peak.off_peak_charge = Some(amount);
            }

            return Ok(());
        }

        if self.charges_closed {
            warn!("Account [{}]: charge line [{}] arrived after messages and was dropped", self.master.account_number, line.number);
        } else if self.charges.len() >= layout.limits.max_charges {
            warn!("Account [{}]: charge line [{}] dropped, limit of {} reached", self.master.account_number, line.number, layout.limits.max_charges);
        } else {
            self.charges.push(fields.values);
        }

        Ok(())
    }

    fn unpack_message(&mut self, line: &InputLine, layout: &RecordLayout) -> Result<(), AccountError> {
        self.charges_closed = true;

        let fields = unpack_fields(line, layout.messages().iter())?;

        if self.messages.len() >= layout.limits.max_messages {
            warn!("Account [{}]: message line [{}] dropped, limit of {} reached", self.master.account_number, line.number, layout.limits.max_messages);
            return Ok(());
        }

        self.messages.extend(fields.values);

        Ok(())
    }

    /// Moves the gathered sections into a record; the emptied builder is dropped by [`Account::reset`].
    fn finish(&mut self, totals: TotalsSection, suppressed: bool) -> AccountRecord {
        AccountRecord {
            master: std::mem::take(&mut self.master),
            history: std::mem::take(&mut self.history),
            charges: std::mem::take(&mut self.charges),
            messages: std::mem::take(&mut self.messages),
            totals,
            meters: std::mem::take(&mut self.meters),
            peak: std::mem::take(&mut self.peak),
            print_bill: self.print_bill && !suppressed
        }
    }
}

struct UnpackedFields {
    values: Vec<String>,
    /// A delete-bill flag among the fields asked for the bill not to be printed.
    suppressed: bool
}

fn unpack_fields<'a, I>(line: &InputLine, specs: I) -> Result<UnpackedFields, AccountError>
where
    I: Iterator<Item = &'a FieldSpec>,
{
    let mut fields = UnpackedFields { values: Vec::new(), suppressed: false };

    for spec in specs {
        let value = convert_field(line, spec)?;

        if spec.converter == Converter::DeleteBillFlag && delete_bill_flag(&value) {
            fields.suppressed = true;
        }

        fields.values.push(value);
    }

    Ok(fields)
}

fn convert_field(line: &InputLine, spec: &FieldSpec) -> Result<String, AccountError> {
    let raw = spec.raw(line);

    spec.convert(&raw).map_err(|error| AccountError::conversion(line, spec, raw, error))
}

fn whole_number(line: &InputLine, spec: &FieldSpec) -> Result<i64, AccountError> {
    let raw = spec.raw(line);

    convert_to_integer(&raw)
        .and_then(|number| number.parse::<i64>().map_err(|_| ConversionError::InvalidNumber(raw.clone())))
        .map_err(|error| AccountError::conversion(line, spec, raw, error))
}
