//! UM-32 instruction set
//!
//! Decoded form of the fourteen operators. Decoding a platter can only fail
//! on an operator number above 13; operand fields are three-bit register
//! indices and are valid by construction.

use crate::encoding;
use crate::error::SpecError;
use crate::opcode::Opcode;
use crate::register::Register;
use serde::{Deserialize, Serialize};
use std::fmt;

/// UM-32 instruction
///
/// Each variant carries only the operands its operator actually consumes,
/// so the executor never reads a field the encoding leaves meaningless.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Instruction {
    /// if C != 0 then A := B
    ConditionalMove { a: Register, b: Register, c: Register },
    /// A := heap[B][C]
    ArrayIndex { a: Register, b: Register, c: Register },
    /// heap[A][B] := C
    ArrayAmendment { a: Register, b: Register, c: Register },
    /// A := (B + C) mod 2^32
    Addition { a: Register, b: Register, c: Register },
    /// A := (B * C) mod 2^32
    Multiplication { a: Register, b: Register, c: Register },
    /// A := B / C, unsigned
    Division { a: Register, b: Register, c: Register },
    /// A := ~(B & C)
    NotAnd { a: Register, b: Register, c: Register },
    /// Stop the machine
    Halt,
    /// B := handle of a fresh zeroed array of C platters
    Allocation { b: Register, c: Register },
    /// Release the array at handle C
    Abandonment { c: Register },
    /// Emit the low byte of C
    Output { c: Register },
    /// C := next input byte, or all ones on end of input
    Input { c: Register },
    /// heap[0] := copy of heap[B]; finger := C
    LoadProgram { b: Register, c: Register },
    /// A := value (25-bit immediate)
    Orthography { a: Register, value: u32 },
}

impl Instruction {
    /// Decode a 32-bit platter.
    ///
    /// Bits 9-27 of the standard form are ignored. The only failure is an
    /// operator number above 13.
    pub fn decode(word: u32) -> Result<Self, SpecError> {
        let opcode = Opcode::from_word(word)
            .ok_or_else(|| SpecError::IllegalOpcode(encoding::extract_opcode(word) as u8))?;

        let inst = match opcode {
            Opcode::Orthography => Instruction::Orthography {
                a: encoding::extract_orthography_a(word),
                value: encoding::extract_orthography_value(word),
            },
            _ => {
                let a = encoding::extract_a(word);
                let b = encoding::extract_b(word);
                let c = encoding::extract_c(word);
                match opcode {
                    Opcode::ConditionalMove => Instruction::ConditionalMove { a, b, c },
                    Opcode::ArrayIndex => Instruction::ArrayIndex { a, b, c },
                    Opcode::ArrayAmendment => Instruction::ArrayAmendment { a, b, c },
                    Opcode::Addition => Instruction::Addition { a, b, c },
                    Opcode::Multiplication => Instruction::Multiplication { a, b, c },
                    Opcode::Division => Instruction::Division { a, b, c },
                    Opcode::NotAnd => Instruction::NotAnd { a, b, c },
                    Opcode::Halt => Instruction::Halt,
                    Opcode::Allocation => Instruction::Allocation { b, c },
                    Opcode::Abandonment => Instruction::Abandonment { c },
                    Opcode::Output => Instruction::Output { c },
                    Opcode::Input => Instruction::Input { c },
                    Opcode::LoadProgram => Instruction::LoadProgram { b, c },
                    Opcode::Orthography => unreachable!(),
                }
            }
        };
        Ok(inst)
    }

    /// The operator this instruction decodes from
    pub const fn opcode(&self) -> Opcode {
        match self {
            Instruction::ConditionalMove { .. } => Opcode::ConditionalMove,
            Instruction::ArrayIndex { .. } => Opcode::ArrayIndex,
            Instruction::ArrayAmendment { .. } => Opcode::ArrayAmendment,
            Instruction::Addition { .. } => Opcode::Addition,
            Instruction::Multiplication { .. } => Opcode::Multiplication,
            Instruction::Division { .. } => Opcode::Division,
            Instruction::NotAnd { .. } => Opcode::NotAnd,
            Instruction::Halt => Opcode::Halt,
            Instruction::Allocation { .. } => Opcode::Allocation,
            Instruction::Abandonment { .. } => Opcode::Abandonment,
            Instruction::Output { .. } => Opcode::Output,
            Instruction::Input { .. } => Opcode::Input,
            Instruction::LoadProgram { .. } => Opcode::LoadProgram,
            Instruction::Orthography { .. } => Opcode::Orthography,
        }
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let op = self.opcode();
        match *self {
            Instruction::ConditionalMove { a, b, c }
            | Instruction::ArrayIndex { a, b, c }
            | Instruction::ArrayAmendment { a, b, c }
            | Instruction::Addition { a, b, c }
            | Instruction::Multiplication { a, b, c }
            | Instruction::Division { a, b, c }
            | Instruction::NotAnd { a, b, c } => write!(f, "{}({}, {}, {})", op, a, b, c),
            Instruction::Halt => write!(f, "{}", op),
            Instruction::Allocation { b, c } | Instruction::LoadProgram { b, c } => {
                write!(f, "{}({}, {})", op, b, c)
            }
            Instruction::Abandonment { c }
            | Instruction::Output { c }
            | Instruction::Input { c } => write!(f, "{}({})", op, c),
            Instruction::Orthography { a, value } => write!(f, "{}({}, {})", op, a, value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoding::{encode, encode_orthography};

    #[test]
    fn test_decode_standard_form() {
        let word = encode(3, Register::R0, Register::R1, Register::R2);
        assert_eq!(
            Instruction::decode(word).unwrap(),
            Instruction::Addition {
                a: Register::R0,
                b: Register::R1,
                c: Register::R2,
            }
        );
    }

    #[test]
    fn test_decode_halt() {
        assert_eq!(Instruction::decode(0x7000_0000).unwrap(), Instruction::Halt);
        // Operand bits of halt are ignored
        assert_eq!(Instruction::decode(0x7FFF_FFFF).unwrap(), Instruction::Halt);
    }

    #[test]
    fn test_decode_orthography() {
        let inst = Instruction::decode(0xD000_0041).unwrap();
        assert_eq!(
            inst,
            Instruction::Orthography {
                a: Register::R0,
                value: 65,
            }
        );

        let word = encode_orthography(Register::R5, 0x01FF_FFFF);
        assert_eq!(
            Instruction::decode(word).unwrap(),
            Instruction::Orthography {
                a: Register::R5,
                value: 0x01FF_FFFF,
            }
        );
    }

    #[test]
    fn test_decode_ignores_unused_bits() {
        let word = encode(6, Register::R4, Register::R4, Register::R4) | 0x0FFF_FE00;
        assert_eq!(
            Instruction::decode(word).unwrap(),
            Instruction::NotAnd {
                a: Register::R4,
                b: Register::R4,
                c: Register::R4,
            }
        );
    }

    #[test]
    fn test_decode_illegal_opcode() {
        for word in [0xE000_0000u32, 0xF000_0000, 0xEFFF_FFFF] {
            match Instruction::decode(word) {
                Err(SpecError::IllegalOpcode(op)) => assert!(op > 13),
                other => panic!("expected IllegalOpcode, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_operand_variants_drop_unused_registers() {
        let word = encode(8, Register::R1, Register::R2, Register::R3);
        assert_eq!(
            Instruction::decode(word).unwrap(),
            Instruction::Allocation {
                b: Register::R2,
                c: Register::R3,
            }
        );

        let word = encode(10, Register::R1, Register::R2, Register::R3);
        assert_eq!(
            Instruction::decode(word).unwrap(),
            Instruction::Output { c: Register::R3 }
        );
    }

    #[test]
    fn test_opcode_accessor() {
        let inst = Instruction::decode(0xD000_0000).unwrap();
        assert_eq!(inst.opcode(), Opcode::Orthography);
        assert_eq!(Instruction::Halt.opcode(), Opcode::Halt);
    }

    #[test]
    fn test_display() {
        let inst = Instruction::decode(encode(0, Register::R1, Register::R2, Register::R3)).unwrap();
        assert_eq!(inst.to_string(), "conditional_move(r1, r2, r3)");
        assert_eq!(Instruction::Halt.to_string(), "halt");
        let inst = Instruction::decode(encode_orthography(Register::R6, 42)).unwrap();
        assert_eq!(inst.to_string(), "orthography(r6, 42)");
    }
}
