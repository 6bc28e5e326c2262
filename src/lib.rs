//! UM-32 Universal Machine
//!
//! A stack-less register virtual machine with a flat heap of dynamically
//! allocated platter arrays. This facade crate re-exports the machine-level
//! definitions and the execution engine.

pub use um32_runtime as runtime;
pub use um32_spec as spec;

pub use um32_runtime::{run, ExecutionResult, Vm, VmConfig};
pub use um32_spec::{Instruction, Opcode, Platter, ProgramImage, Register};
