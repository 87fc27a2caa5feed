mod account;
mod config;
mod errors;
mod rate_code;
mod record;

pub use account::Account;
pub use config::AccountConfig;
pub use errors::AccountError;
pub use rate_code::{RateClass, RateCodes};
