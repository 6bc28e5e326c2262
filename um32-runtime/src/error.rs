//! Runtime error types for the UM-32 execution engine
//!
//! Every variant is fatal: the machine never continues past an error.

use thiserror::Error;
use um32_spec::{Platter, SpecError};

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("spec error: {0}")]
    Spec(#[from] SpecError),

    #[error("illegal instruction {word:#010x} at finger {finger}")]
    IllegalInstruction { word: Platter, finger: Platter },

    #[error("division by zero at finger {finger}")]
    DivisionByZero { finger: Platter },

    #[error("invalid array handle {handle:#x}")]
    InvalidHandle { handle: Platter },

    #[error("index {index} out of bounds for array {handle:#x} of length {len}")]
    IndexOutOfBounds {
        handle: Platter,
        index: Platter,
        len: usize,
    },

    #[error("execution finger {finger} outside program array of length {len}")]
    FingerOutOfBounds { finger: Platter, len: usize },

    #[error("output value {value:#x} exceeds one byte")]
    OutputRange { value: Platter },

    #[error("abandonment of the program array")]
    AbandonProgramArray,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, RuntimeError>;
