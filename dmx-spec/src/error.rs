//! # Error Types for the DMX instruction set

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SpecError {
    #[error("Invalid register: {0} (valid names: R0-R7)")]
    InvalidRegister(String),

    #[error("Malformed word on line {line}: {text:?}")]
    MalformedWord { line: usize, text: String },
}

pub type Result<T> = std::result::Result<T, SpecError>;
