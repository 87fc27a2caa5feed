mod errors;
mod file_converter;
mod options;
mod summary;

pub use errors::ConvertError;
pub use file_converter::{output_path, FileConverter};
pub use options::{ConvertOptions, InputEncoding, OutputMode};
pub use summary::{RunSummary, SummaryReport};
