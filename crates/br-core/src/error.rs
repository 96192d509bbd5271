use thiserror::Error;

pub type BrResult<T> = Result<T, BrError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum BrError {
    #[error("Non-finite numeric value for {what}: {value}")]
    NonFinite { what: &'static str, value: f64 },

    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    #[error("Value out of range for {what}: {value} not in [{min}, {max}]")]
    OutOfRange {
        what: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("Invariant violated: {what}")]
    Invariant { what: &'static str },
}
