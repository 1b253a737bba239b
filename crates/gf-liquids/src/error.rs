//! Error types for liquid handling.

use thiserror::Error;

pub type LiquidResult<T> = Result<T, LiquidError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LiquidError {
    #[error("Invalid color string: {got:?}")]
    InvalidColor { got: String },

    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    #[error("Non-physical value: {what}")]
    NonPhysical { what: &'static str },
}
