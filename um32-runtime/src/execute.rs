//! Single-instruction dispatch for the UM-32
//!
//! The fetch step has already advanced the finger when an instruction
//! arrives here, so error locations refer to the platter one behind the
//! current finger.

use crate::error::{Result, RuntimeError};
use crate::heap::ArrayHeap;
use crate::io::Console;
use crate::state::{HaltReason, VmState};
use um32_spec::{Instruction, Platter};

/// End-of-input marker stored by the input operator
pub const EOF_PLATTER: Platter = 0xFFFF_FFFF;

/// Execute a single decoded instruction.
pub fn execute<C: Console>(
    inst: &Instruction,
    state: &mut VmState,
    heap: &mut ArrayHeap,
    console: &mut C,
) -> Result<()> {
    match *inst {
        Instruction::ConditionalMove { a, b, c } => {
            if state.read_reg(c) != 0 {
                let value = state.read_reg(b);
                state.write_reg(a, value);
            }
        }

        Instruction::ArrayIndex { a, b, c } => {
            let value = heap.load(state.read_reg(b), state.read_reg(c))?;
            state.write_reg(a, value);
        }

        Instruction::ArrayAmendment { a, b, c } => {
            heap.store(state.read_reg(a), state.read_reg(b), state.read_reg(c))?;
        }

        Instruction::Addition { a, b, c } => {
            let result = state.read_reg(b).wrapping_add(state.read_reg(c));
            state.write_reg(a, result);
        }

        Instruction::Multiplication { a, b, c } => {
            let result = state.read_reg(b).wrapping_mul(state.read_reg(c));
            state.write_reg(a, result);
        }

        Instruction::Division { a, b, c } => {
            let divisor = state.read_reg(c);
            if divisor == 0 {
                return Err(RuntimeError::DivisionByZero {
                    finger: state.finger.wrapping_sub(1),
                });
            }
            let result = state.read_reg(b) / divisor;
            state.write_reg(a, result);
        }

        Instruction::NotAnd { a, b, c } => {
            let result = !(state.read_reg(b) & state.read_reg(c));
            state.write_reg(a, result);
        }

        Instruction::Halt => {
            state.halt(HaltReason::Halt);
        }

        Instruction::Allocation { b, c } => {
            let handle = heap.allocate(state.read_reg(c));
            state.write_reg(b, handle);
        }

        Instruction::Abandonment { c } => {
            heap.abandon(state.read_reg(c))?;
        }

        Instruction::Output { c } => {
            let value = state.read_reg(c);
            if value > 0xFF {
                return Err(RuntimeError::OutputRange { value });
            }
            console.write_byte(value as u8)?;
        }

        Instruction::Input { c } => {
            let value = match console.read_byte()? {
                Some(byte) => byte as Platter,
                None => EOF_PLATTER,
            };
            state.write_reg(c, value);
        }

        Instruction::LoadProgram { b, c } => {
            heap.load_program(state.read_reg(b))?;
            state.finger = state.read_reg(c);
        }

        Instruction::Orthography { a, value } => {
            state.write_reg(a, value);
        }
    }

    Ok(())
}
