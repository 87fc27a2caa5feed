use crate::schema::FieldSpec;
use crate::types::Converter::*;

/// Marks a field that runs through the end of the line.
pub const LINE_END: usize = usize::MAX;

pub const CONTROL_PREFIX: &str = "CYCCTL";

pub static CONTROL: [FieldSpec; 3] = [
    FieldSpec::new("BILL_DATE", 8, 16, Date),
    FieldSpec::new("PEN_DATE", 16, 24, Date),
    FieldSpec::new("BUDGET_SW", 24, 25, Raw),
];

pub static MASTER: [FieldSpec; 14] = [
    FieldSpec::new("ACCOUNT_NUMBER", 4, 16, AccountNumber),
    FieldSpec::new("CUSTOMER_NAME", 21, 51, Text),
    FieldSpec::new("MAIL_ADDRESS_1", 51, 81, Text),
    FieldSpec::new("MAIL_ADDRESS_2", 81, 111, Text),
    FieldSpec::new("MAIL_CITY", 111, 131, Text),
    FieldSpec::new("MAIL_STATE", 131, 133, Text),
    FieldSpec::new("MAIL_ZIP", 133, 143, Text),
    FieldSpec::new("SERVICE_ADDRESS", 143, 173, Text),
    FieldSpec::new("DUE_DATE", 173, 181, Date),
    FieldSpec::new("SERVICE_FROM", 181, 189, Date),
    FieldSpec::new("SERVICE_TO", 189, 197, Date),
    FieldSpec::new("ROUTE", 197, 203, Text),
    FieldSpec::new("DRAFT_SW", 203, 204, Text),
    FieldSpec::new("LOCATION_ID", 204, 214, Text),
];

pub static HISTORY: [FieldSpec; 5] = [
    FieldSpec::new("HIST_YEAR", 21, 25, Text),
    FieldSpec::new("HIST_MONTH", 25, 27, MonthName),
    FieldSpec::new("HIST_USAGE", 28, 37, Integer),
    FieldSpec::new("HIST_DAYS", 37, 40, Integer),
    FieldSpec::new("HIST_DEMAND", 40, 49, Demand),
];

/// `yyyymm` of the history period.
pub const HISTORY_PERIOD: (usize, usize) = (21, 27);
/// Consumption digits checked for the repeated-digit "no data" sentinel.
pub const HISTORY_CONSUMPTION: (usize, usize) = (28, 37);

pub static CHARGES: [FieldSpec; 2] = [
    FieldSpec::new("CHG_DESC", 21, 51, Text),
    FieldSpec::new("CHG_AMT", 51, 62, Currency),
];

pub const CHARGE_NAME: usize = 0;
pub const CHARGE_AMOUNT: usize = 1;
/// Charge text that routes an amount to the on/off-peak columns.
pub const PEAK_CHARGE_MARKER: &str = "-PEAK CHARGES";

pub static MESSAGES: [FieldSpec; 1] = [
    FieldSpec::new("MESSAGE", 21, LINE_END, Text),
];

pub static METERS: [FieldSpec; 21] = [
    FieldSpec::new("METER_NUMBER", 21, 33, Text),
    FieldSpec::new("METER_RATE", 33, 43, Text),
    FieldSpec::new("METER_READ_FROM", 43, 51, Date),
    FieldSpec::new("METER_READ_TO", 51, 59, Date),
    FieldSpec::new("METER_PREV_READ", 59, 68, Integer),
    FieldSpec::new("METER_CURR_READ", 68, 77, Integer),
    FieldSpec::new("METER_USAGE", 77, 86, Integer),
    FieldSpec::new("METER_DEMAND", 86, 95, Demand),
    FieldSpec::new("METER_MULTIPLIER", 95, 104, Multiplier),
    FieldSpec::new("METER_ACCT_MULT", 104, 110, AccountMultiplier),
    FieldSpec::new("METER_DAYS", 110, 113, Integer),
    FieldSpec::new("METER_READ_CODE", 113, 114, Text),
    FieldSpec::new("METER_KVAR", 114, 123, Demand),
    FieldSpec::new("METER_POWER_FACTOR", 123, 129, Integer),
    FieldSpec::new("METER_LOCATION", 129, 149, Text),
    FieldSpec::new("METER_AVG_DAILY_USE", 149, 156, Usage),
    FieldSpec::new("METER_PY_USAGE", 156, 165, Integer),
    FieldSpec::new("METER_PY_DAYS", 165, 168, Integer),
    FieldSpec::new("METER_PY_AVG_DAILY_USE", 168, 175, Usage),
    FieldSpec::new("METER_GENERATION", 175, 184, Integer),
    FieldSpec::new("METER_BANKED_USE", 184, 193, Usage),
];

pub const METER_RATE: usize = 1;
pub const METER_USAGE: usize = 6;
pub const METER_DEMAND: usize = 7;
pub const METER_BANKED_USE: usize = 20;

pub static ACCOUNT_TOTALS: [FieldSpec; 7] = [
    FieldSpec::new("PREVIOUS_BALANCE", 21, 32, Currency),
    FieldSpec::new("PAYMENTS", 32, 43, Currency),
    FieldSpec::new("ADJUSTMENTS", 43, 54, Currency),
    FieldSpec::new("CURRENT_CHARGES", 54, 65, Currency),
    FieldSpec::new("PENALTY", 65, 76, Currency),
    FieldSpec::new("TOTAL_DUE", 76, 87, Currency),
    FieldSpec::new("AMOUNT_AFTER_DUE", 87, 98, Currency),
];

pub static WITH_BUDGET: [FieldSpec; 4] = [
    FieldSpec::new("BUDGET_AMOUNT", 98, 109, Currency),
    FieldSpec::new(BUDGET_AR_AMOUNT, 109, 120, Currency),
    FieldSpec::new(BUDGET_MESSAGE, 120, 180, Text),
    FieldSpec::new("EBILL_SW", 180, 181, DeleteBillFlag),
];

pub static WITHOUT_BUDGET: [FieldSpec; 1] = [
    FieldSpec::new("EBILL_SW", 180, 181, DeleteBillFlag),
];

pub const BUDGET_AR_AMOUNT: &str = "BUDGET_AR_AMT";
pub const BUDGET_MESSAGE: &str = "BUDGET_BILL_MSG";
pub const BUDGET_FLAG_HEADING: &str = "BUDGET BILLING FLAG";
pub const BUDGET_FLAG_VALUE: &str = "BUDGET BILLING";

pub const CUSTOM_HEADINGS: [&str; 8] = [
    "CYCLE",
    "ON_PEAK_USE",
    "ON_PEAK_CHG",
    "OFF_PEAK_USE",
    "OFF_PEAK_CHG",
    "TOTAL_USE",
    "TOTAL_DEMAND",
    "BANKED_USAGE",
];

pub const EOR_HEADING: &str = "EOR";
pub const EOR_MARKER: &str = "*";
