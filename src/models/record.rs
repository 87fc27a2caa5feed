use crate::schema::definitions::{BUDGET_FLAG_VALUE, EOR_MARKER};
use crate::schema::RecordLayout;
use rust_decimal::Decimal;

/// File-wide values taken from the control line; shared by every account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlSection {
    pub bill_date: String,
    pub pen_date: String,
    pub cycle: String
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MasterSection {
    pub account_number: String,
    pub columns: Vec<String>
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HistoryPeriod {
    /// Stale or empty history; rendered as blank columns.
    Blank,
    Period(Vec<String>)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TotalsSection {
    pub columns: Vec<String>,
    pub budget_message: String,
    pub budget_billing: bool
}

/// Scratch values for the time-of-use columns at the end of the row.
///
/// Usage and demand are raw whole numbers; demand is in thousandths.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PeakUsage {
    pub on_peak_use: Option<i64>,
    pub on_peak_demand: Option<i64>,
    pub on_peak_charge: Option<String>,
    pub off_peak_use: Option<i64>,
    pub off_peak_demand: Option<i64>,
    pub off_peak_charge: Option<String>,
    pub banked: Vec<String>
}

impl PeakUsage {
    pub fn add_on_peak(&mut self, usage: i64, demand: i64) {
        self.on_peak_use = Some(self.on_peak_use.unwrap_or(0) + usage);
        self.on_peak_demand = Some(self.on_peak_demand.unwrap_or(0) + demand);
    }

    pub fn add_off_peak(&mut self, usage: i64, demand: i64) {
        self.off_peak_use = Some(self.off_peak_use.unwrap_or(0) + usage);
        self.off_peak_demand = Some(self.off_peak_demand.unwrap_or(0) + demand);
    }

    /// CYCLE through BANKED_USAGE, in heading order.
    fn columns(&self, cycle: &str) -> Vec<String> {
        let total_use = self.on_peak_use.unwrap_or(0) + self.off_peak_use.unwrap_or(0);
        let total_demand = self.on_peak_demand.unwrap_or(0) + self.off_peak_demand.unwrap_or(0);

        vec![
            cycle.to_string(),
            optional(self.on_peak_use),
            self.on_peak_charge.clone().unwrap_or_default(),
            optional(self.off_peak_use),
            self.off_peak_charge.clone().unwrap_or_default(),
            if total_use == 0 { String::new() } else { total_use.to_string() },
            if total_use == 0 { String::new() } else { Decimal::new(total_demand, 3).to_string() },
            self.banked.join("/"),
        ]
    }
}

fn optional(value: Option<i64>) -> String {
    value.map(|value| value.to_string()).unwrap_or_default()
}

/// Everything gathered for one account between `MSTR` and `ACTT`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountRecord {
    pub master: MasterSection,
    pub history: Vec<HistoryPeriod>,
    pub charges: Vec<Vec<String>>,
    pub messages: Vec<String>,
    pub totals: TotalsSection,
    pub meters: Vec<Vec<String>>,
    pub peak: PeakUsage,
    pub print_bill: bool
}

impl AccountRecord {
    /// Flattens the record into the output column order given by
    /// [`RecordLayout::headings`], padding every repeating block to its maximum.
    pub fn into_row(self, control: &ControlSection, layout: &RecordLayout) -> Vec<String> {
        let limits = layout.limits;
        let mut row = vec![control.bill_date.clone(), control.pen_date.clone()];

        row.extend(self.master.columns);

        let history_width = layout.history().len();
        let history = self.history.into_iter().map(|period| match period {
            HistoryPeriod::Blank => vec![String::new(); history_width],
            HistoryPeriod::Period(columns) => columns
        });
        extend_padded(&mut row, history, limits.max_history, history_width);
        extend_padded(&mut row, self.charges, limits.max_charges, layout.charges().len());
        extend_padded(&mut row, self.messages.into_iter().map(|message| vec![message]), limits.max_messages, 1);

        row.extend(self.totals.columns);

        extend_padded(&mut row, self.meters, limits.max_meters, layout.meters().len());

        if layout.budget_billing {
            row.push(self.totals.budget_message);
            row.push(if self.totals.budget_billing { BUDGET_FLAG_VALUE.to_string() } else { String::new() });
        }

        row.extend(self.peak.columns(&control.cycle));

        if layout.eor_required {
            row.push(EOR_MARKER.to_string());
        }

        row
    }
}

fn extend_padded<I>(row: &mut Vec<String>, blocks: I, count: usize, width: usize)
where
    I: IntoIterator<Item = Vec<String>>,
{
    let mut used = 0;

    for block in blocks.into_iter().take(count) {
        row.extend(block);
        used += 1;
    }

    for _ in used..count {
        row.extend(std::iter::repeat_n(String::new(), width));
    }
}
