use crate::models::RateCodes;
use crate::schema::{Limits, RecordLayout};

/// Settings that shape how accounts are unpacked for one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountConfig {
    /// Forces the budget-billing appendix on or off. `None` follows the
    /// control line's budget switch.
    pub budget_billing: Option<bool>,
    pub eor_required: bool,
    pub limits: Limits,
    pub rate_codes: RateCodes
}

impl Default for AccountConfig {
    fn default() -> Self {
        Self {
            budget_billing: None,
            eor_required: true,
            limits: Limits::default(),
            rate_codes: RateCodes::default()
        }
    }
}

impl AccountConfig {
    #[cfg(test)]
    pub fn with_budget_billing(mut self, budget_billing: bool) -> Self {
        self.budget_billing = Some(budget_billing);
        self
    }

    #[cfg(test)]
    pub fn with_eor(mut self, eor_required: bool) -> Self {
        self.eor_required = eor_required;
        self
    }

    #[cfg(test)]
    pub fn with_limits(mut self, limits: Limits) -> Self {
        self.limits = limits;
        self
    }

    /// Resolves the layout once the control line's budget switch is known.
    /// A blank switch keeps budget billing on.
    pub fn layout(&self, budget_switch: &str) -> RecordLayout {
        let budget_billing = self.budget_billing.unwrap_or(budget_switch.trim() != "N");

        RecordLayout::new(budget_billing)
            .with_eor(self.eor_required)
            .with_limits(self.limits)
    }
}
