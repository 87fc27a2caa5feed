/// How a meter's rate code feeds the time-of-use columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateClass {
    OnPeak,
    OffPeak,
    /// Time-of-use rate without an on/off suffix; contributes banked usage only.
    Peak,
    Standard,
    /// Matches neither prefix list but carries an on/off suffix.
    Unrecognized
}

/// Rate code prefixes that mark on/off-peak meters.
///
/// Codes starting with a peak prefix are time-of-use; codes ending in `OF` or
/// `OFF` are off-peak and codes ending in `ON` are on-peak. A code that matches
/// neither list yet ends in one of those suffixes is classed `Unrecognized` so
/// it can be reported instead of silently ignored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateCodes {
    pub peak_prefixes: Vec<String>,
    pub standard_prefixes: Vec<String>
}

impl Default for RateCodes {
    fn default() -> Self {
        Self {
            peak_prefixes: ["R-", "RN-", "RL-", "RNL"].iter().map(|prefix| prefix.to_string()).collect(),
            standard_prefixes: ["RC-", "RG-"].iter().map(|prefix| prefix.to_string()).collect()
        }
    }
}

impl RateCodes {
    #[cfg(test)]
    pub fn with_peak_prefix(mut self, prefix: &str) -> Self {
        self.peak_prefixes.push(prefix.to_string());
        self
    }

    #[cfg(test)]
    pub fn with_standard_prefix(mut self, prefix: &str) -> Self {
        self.standard_prefixes.push(prefix.to_string());
        self
    }

    pub fn classify(&self, rate_code: &str) -> RateClass {
        let rate_code = rate_code.trim();
        let has_prefix = |prefixes: &[String]| prefixes.iter().any(|prefix| rate_code.starts_with(prefix.as_str()));
        let off_peak = rate_code.ends_with("OF") || rate_code.ends_with("OFF");
        let on_peak = rate_code.ends_with("ON");

        if has_prefix(&self.peak_prefixes) {
            if off_peak {
                RateClass::OffPeak
            } else if on_peak {
                RateClass::OnPeak
            } else {
                RateClass::Peak
            }
        } else if has_prefix(&self.standard_prefixes) || !(off_peak || on_peak) {
            RateClass::Standard
        } else {
            RateClass::Unrecognized
        }
    }
}
