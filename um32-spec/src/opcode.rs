//! # UM-32 Operator Definitions
//!
//! The fourteen operators of the Universal Machine. The operator number
//! lives in the top four bits of a platter (values 0-13; 14 and 15 are
//! illegal and surface at execution time, not at load time).

use crate::encoding;
use serde::{Deserialize, Serialize};

/// Operator number (4 bits, values 0-13)
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Opcode {
    /// if C != 0 then A := B
    ConditionalMove = 0,
    /// A := heap[B][C]
    ArrayIndex = 1,
    /// heap[A][B] := C
    ArrayAmendment = 2,
    /// A := (B + C) mod 2^32
    Addition = 3,
    /// A := (B * C) mod 2^32
    Multiplication = 4,
    /// A := B / C (unsigned); C = 0 is a runtime fatal
    Division = 5,
    /// A := ~(B & C)
    NotAnd = 6,
    /// stop the machine
    Halt = 7,
    /// B := fresh zeroed array of C platters
    Allocation = 8,
    /// release the array at handle C
    Abandonment = 9,
    /// emit the low byte of C
    Output = 10,
    /// C := next input byte, or all ones on end of input
    Input = 11,
    /// heap[0] := copy of heap[B]; finger := C
    LoadProgram = 12,
    /// A := 25-bit immediate (the special load-value form)
    Orthography = 13,
}

impl Opcode {
    /// Try to convert from u8
    pub const fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Opcode::ConditionalMove),
            1 => Some(Opcode::ArrayIndex),
            2 => Some(Opcode::ArrayAmendment),
            3 => Some(Opcode::Addition),
            4 => Some(Opcode::Multiplication),
            5 => Some(Opcode::Division),
            6 => Some(Opcode::NotAnd),
            7 => Some(Opcode::Halt),
            8 => Some(Opcode::Allocation),
            9 => Some(Opcode::Abandonment),
            10 => Some(Opcode::Output),
            11 => Some(Opcode::Input),
            12 => Some(Opcode::LoadProgram),
            13 => Some(Opcode::Orthography),
            _ => None,
        }
    }

    /// Convert to u8
    #[inline]
    pub const fn to_u8(self) -> u8 {
        self as u8
    }

    /// Extract the operator from a 32-bit instruction platter (bits 28-31)
    #[inline]
    pub const fn from_word(word: u32) -> Option<Self> {
        Self::from_u8(encoding::extract_opcode(word) as u8)
    }

    /// True for the orthography form (register A and 25-bit immediate)
    #[inline]
    pub const fn is_orthography(self) -> bool {
        matches!(self, Opcode::Orthography)
    }

    /// True for operators that touch the array heap
    #[inline]
    pub const fn touches_heap(self) -> bool {
        matches!(
            self,
            Opcode::ArrayIndex
                | Opcode::ArrayAmendment
                | Opcode::Allocation
                | Opcode::Abandonment
                | Opcode::LoadProgram
        )
    }

    /// Historical operator name
    pub const fn mnemonic(self) -> &'static str {
        match self {
            Opcode::ConditionalMove => "conditional_move",
            Opcode::ArrayIndex => "array_index",
            Opcode::ArrayAmendment => "array_amendment",
            Opcode::Addition => "addition",
            Opcode::Multiplication => "multiplication",
            Opcode::Division => "division",
            Opcode::NotAnd => "not_and",
            Opcode::Halt => "halt",
            Opcode::Allocation => "allocation",
            Opcode::Abandonment => "abandonment",
            Opcode::Output => "output",
            Opcode::Input => "input",
            Opcode::LoadProgram => "load_program",
            Opcode::Orthography => "orthography",
        }
    }
}

impl std::fmt::Display for Opcode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.mnemonic())
    }
}
