//! # Instruction Encoding Constants and Helpers
//!
//! Centralized constants and helper functions for the UM-32 instruction
//! encoding.
//!
//! ## Instruction Formats (32-bit platter)
//!
//! ```text
//! standard:    [opcode:4][unused:19][a:3][b:3][c:3]
//! orthography: [opcode:4][a:3][value:25]
//! ```
//!
//! Bits 9-27 of the standard form are unused and must be ignored, never
//! rejected.

use crate::register::Register;

// ============================================================================
// Bit Position Constants
// ============================================================================

/// Operator field: bits 28-31 (4 bits)
pub const OPCODE_SHIFT: u32 = 28;

/// Register A field, standard form: bits 6-8
pub const REG_A_SHIFT: u32 = 6;

/// Register B field, standard form: bits 3-5
pub const REG_B_SHIFT: u32 = 3;

/// Register C field, standard form: bits 0-2
pub const REG_C_SHIFT: u32 = 0;

/// Register A field, orthography form: bits 25-27
pub const ORTH_REG_SHIFT: u32 = 25;

// ============================================================================
// Field Masks
// ============================================================================

/// Operator mask (4 bits)
pub const OPCODE_MASK: u32 = 0xF;

/// Register field mask (3 bits)
pub const REGISTER_MASK: u32 = 0x7;

/// Immediate mask, orthography form (25 bits)
pub const ORTH_VALUE_MASK: u32 = 0x01FF_FFFF;

// ============================================================================
// Field Extraction Functions
// ============================================================================

/// Extract the operator number from a platter (bits 28-31)
#[inline]
pub const fn extract_opcode(word: u32) -> u32 {
    (word >> OPCODE_SHIFT) & OPCODE_MASK
}

/// Extract register A from a standard-form platter (bits 6-8)
#[inline]
pub const fn extract_a(word: u32) -> Register {
    Register::from_bits(word >> REG_A_SHIFT)
}

/// Extract register B from a standard-form platter (bits 3-5)
#[inline]
pub const fn extract_b(word: u32) -> Register {
    Register::from_bits(word >> REG_B_SHIFT)
}

/// Extract register C from a standard-form platter (bits 0-2)
#[inline]
pub const fn extract_c(word: u32) -> Register {
    Register::from_bits(word >> REG_C_SHIFT)
}

/// Extract register A from an orthography-form platter (bits 25-27)
#[inline]
pub const fn extract_orthography_a(word: u32) -> Register {
    Register::from_bits(word >> ORTH_REG_SHIFT)
}

/// Extract the 25-bit immediate from an orthography-form platter (bits 0-24)
#[inline]
pub const fn extract_orthography_value(word: u32) -> u32 {
    word & ORTH_VALUE_MASK
}

// ============================================================================
// Builders (inverse of extraction, for tooling and tests)
// ============================================================================

/// Build a standard-form platter from an operator number and three registers
#[inline]
pub const fn encode(opcode: u32, a: Register, b: Register, c: Register) -> u32 {
    ((opcode & OPCODE_MASK) << OPCODE_SHIFT)
        | ((a as u32) << REG_A_SHIFT)
        | ((b as u32) << REG_B_SHIFT)
        | ((c as u32) << REG_C_SHIFT)
}

/// Build an orthography-form platter from register A and a 25-bit immediate
#[inline]
pub const fn encode_orthography(a: Register, value: u32) -> u32 {
    (13 << OPCODE_SHIFT) | ((a as u32) << ORTH_REG_SHIFT) | (value & ORTH_VALUE_MASK)
}
