use chrono::{Datelike, NaiveDate};

/// Number of history periods a bill may show: the billing month plus the twelve before it.
pub const PERIOD_COUNT: usize = 13;

/// The `yyyymm` tokens a history line may carry for the current billing cycle.
///
/// The extract sometimes repeats stale history from earlier cycles; a line whose
/// period falls outside this window is rendered blank rather than misattributed.
/// Tokens are kept newest first, the order history lines arrive in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidPeriods {
    tokens: Vec<String>
}

impl ValidPeriods {
    pub fn for_billing_date(billing_date: NaiveDate) -> Self {
        let (mut year, mut month) = (billing_date.year(), billing_date.month());
        let mut tokens = Vec::with_capacity(PERIOD_COUNT);

        for _ in 0..PERIOD_COUNT {
            tokens.push(format!("{year:04}{month:02}"));

            if month == 1 {
                month = 12;
                year -= 1;
            } else {
                month -= 1;
            }
        }

        Self { tokens }
    }

    pub fn contains(&self, token: &str) -> bool {
        self.tokens.iter().any(|valid| valid == token)
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }
}
