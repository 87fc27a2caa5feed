use crate::schema::FieldSpec;
use crate::types::{ConversionError, InputLine, Tag};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AccountError {
    #[error("Line [{line}]:[{tag}] columns {start}..{end} '{raw}': {source}")]
    SchemaConversion {
        line: usize,
        tag: Tag,
        field: &'static str,
        start: usize,
        end: usize,
        raw: String,
        #[source]
        source: ConversionError
    },
    #[error("Account [{account}] starting on line [{line}] was not terminated by an ACTT record")]
    UnterminatedAccount {
        line: usize,
        account: String
    },
    #[error("Control line is missing or unusable: {reason}")]
    MissingControlLine {
        reason: String
    },
    #[error("Line [{line}]:[{tag}] does not belong to any account")]
    UnexpectedRecord {
        line: usize,
        tag: Tag
    }
}

impl AccountError {
    pub fn conversion(line: &InputLine, spec: &FieldSpec, raw: String, source: ConversionError) -> Self {
        Self::SchemaConversion {
            line: line.number,
            tag: line.tag.clone(),
            field: spec.name,
            start: spec.start,
            end: spec.end,
            raw,
            source
        }
    }

    pub fn unterminated(line: usize, account: &str) -> Self {
        Self::UnterminatedAccount {
            line,
            account: account.to_string()
        }
    }

    pub fn missing_control(reason: impl Into<String>) -> Self {
        Self::MissingControlLine { reason: reason.into() }
    }

    pub fn unexpected(line: &InputLine) -> Self {
        Self::UnexpectedRecord {
            line: line.number,
            tag: line.tag.clone()
        }
    }
}
