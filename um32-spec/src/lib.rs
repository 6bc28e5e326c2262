//! # UM-32 Machine Definitions
//!
//! Machine-level types for the UM-32 "Universal Machine": the 32-bit
//! platter, the eight-register file, the fourteen operators and their
//! bit-level encoding, and the big-endian program image format.
//!
//! ## Key Features
//! - 32-bit words ("platters"); all arithmetic is modulo 2^32
//! - Fourteen operators selected by the top four bits of a platter
//! - A distinguished orthography form carrying a 25-bit immediate
//! - Program images are headerless sequences of big-endian words

pub mod encoding;
pub mod error;
pub mod instruction;
pub mod opcode;
pub mod program;
pub mod register;

pub use error::SpecError;
pub use instruction::Instruction;
pub use opcode::Opcode;
pub use program::ProgramImage;
pub use register::{Register, NUM_REGISTERS};

/// Machine word: every register, array element, and instruction is one.
pub type Platter = u32;

/// Number of operators in the instruction set.
pub const NUM_OPCODES: usize = 14;

/// Handle of the array holding the executing program.
pub const PROGRAM_HANDLE: Platter = 0;
