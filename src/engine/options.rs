use crate::models::AccountConfig;
#[cfg(test)]
use crate::schema::Limits;
use encoding_rs::{Encoding, UTF_8, WINDOWS_1252};
use serde::Serialize;
use std::borrow::Cow;

/// Character encodings an extract may arrive in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEncoding {
    Utf8,
    /// Extended 8-bit text from the billing system's Windows host.
    Windows1252
}

impl InputEncoding {
    /// Picks UTF-8 when the bytes are valid UTF-8, otherwise Windows-1252.
    pub fn sniff(bytes: &[u8]) -> Self {
        match std::str::from_utf8(bytes) {
            Ok(_) => InputEncoding::Utf8,
            Err(_) => InputEncoding::Windows1252
        }
    }

    /// Returns `None` when the bytes contain sequences invalid for this encoding.
    pub fn decode<'a>(&self, bytes: &'a [u8]) -> Option<Cow<'a, str>> {
        let (text, had_errors) = self.encoding().decode_with_bom_removal(bytes);

        if had_errors { None } else { Some(text) }
    }

    fn encoding(&self) -> &'static Encoding {
        match self {
            InputEncoding::Utf8 => UTF_8,
            InputEncoding::Windows1252 => WINDOWS_1252
        }
    }
}

/// The two outputs produced from every extract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum OutputMode {
    /// Paper-print run; suppressed bills are left out.
    #[serde(rename = "PRN")]
    Print,
    /// Full statement run; every bill is written.
    #[serde(rename = "PDF")]
    Pdf
}

impl OutputMode {
    pub const ALL: [OutputMode; 2] = [OutputMode::Print, OutputMode::Pdf];

    pub fn suffix(&self) -> &'static str {
        match self {
            OutputMode::Print => "PRN",
            OutputMode::Pdf => "PDF"
        }
    }

    pub fn print_all(&self) -> bool {
        matches!(self, OutputMode::Pdf)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConvertOptions {
    pub print_all: bool,
    /// `None` sniffs the input.
    pub encoding: Option<InputEncoding>,
    pub account: AccountConfig
}

impl ConvertOptions {
    pub fn for_mode(mode: OutputMode) -> Self {
        Self::default().with_print_all(mode.print_all())
    }

    pub fn with_print_all(mut self, print_all: bool) -> Self {
        self.print_all = print_all;
        self
    }

    #[cfg(test)]
    pub fn with_encoding(mut self, encoding: InputEncoding) -> Self {
        self.encoding = Some(encoding);
        self
    }

    #[cfg(test)]
    pub fn with_eor(mut self, eor_required: bool) -> Self {
        self.account = self.account.with_eor(eor_required);
        self
    }

    #[cfg(test)]
    pub fn with_limits(mut self, limits: Limits) -> Self {
        self.account = self.account.with_limits(limits);
        self
    }
}
