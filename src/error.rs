use thiserror::Error;

/// Why a raw instant could not be turned into a calendar date.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InstantError {
    #[error("unparseable instant '{0}'")]
    Unparseable(String),

    #[error("epoch value {0} ms is outside the supported date range")]
    OutOfRange(i64),

    #[error("epoch value is not a finite number")]
    NonFinite,
}
