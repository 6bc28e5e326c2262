//! # Error Types for the UM-32 Machine Definitions

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SpecError {
    #[error("malformed program: image size {len} is not a multiple of 4 bytes")]
    MalformedImage { len: usize },

    #[error("illegal opcode: {0:#x}")]
    IllegalOpcode(u8),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
