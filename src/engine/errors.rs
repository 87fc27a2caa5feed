use crate::engine::InputEncoding;
use crate::models::AccountError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Output error: {0}")]
    Csv(#[from] csv::Error),
    #[error("File [{path}] is not valid {encoding:?} text")]
    Encoding {
        path: String,
        encoding: InputEncoding
    },
    #[error("File [{path}]: {source}")]
    Account {
        path: String,
        #[source]
        source: AccountError
    }
}

impl ConvertError {
    pub fn encoding(path: &str, encoding: InputEncoding) -> Self {
        Self::Encoding {
            path: path.to_string(),
            encoding
        }
    }

    pub fn account(path: &str, source: AccountError) -> Self {
        Self::Account {
            path: path.to_string(),
            source
        }
    }
}
