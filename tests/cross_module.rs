//! Cross-module integration: spec-crate encodings driven through the runtime

use um32_runtime::{BufferConsole, HaltReason, RuntimeError, Vm, VmConfig};
use um32_spec::encoding::{self, encode, encode_orthography};
use um32_spec::{Instruction, Opcode, ProgramImage, Register, SpecError};

const HALT: u32 = 0x7000_0000;

// ============================================================================
// Encoding <-> decoding
// ============================================================================

#[test]
fn test_every_opcode_round_trips_through_decode() {
    for value in 0u8..14 {
        let op = Opcode::from_u8(value).unwrap();
        let word = if op == Opcode::Orthography {
            encode_orthography(Register::R2, 12345)
        } else {
            encode(value as u32, Register::R1, Register::R2, Register::R3)
        };
        let inst = Instruction::decode(word).unwrap();
        assert_eq!(inst.opcode(), op);
        assert_eq!(encoding::extract_opcode(word), value as u32);
    }
}

#[test]
fn test_illegal_opcodes_fail_decode_only_above_13() {
    assert!(Instruction::decode(0xD000_0000).is_ok());
    for value in 14u32..16 {
        let word = value << 28;
        assert!(matches!(
            Instruction::decode(word),
            Err(SpecError::IllegalOpcode(_))
        ));
    }
}

// ============================================================================
// Image -> VM
// ============================================================================

#[test]
fn test_image_bytes_drive_the_vm() {
    // Serialize a program to disk format, reload it, and run it.
    let image = ProgramImage::from_words(vec![0xD000_0041, 0xA000_0000, HALT]);
    let reloaded = ProgramImage::from_bytes(&image.to_bytes()).unwrap();
    assert_eq!(image, reloaded);
    assert_eq!(image.digest(), reloaded.digest());

    let mut console = BufferConsole::default();
    let vm = Vm::new(reloaded, &mut console, VmConfig::default()).unwrap();
    let result = vm.run().unwrap();
    assert_eq!(result.halt_reason, HaltReason::Halt);
    assert_eq!(console.outputs(), b"A");
}

#[test]
fn test_big_endian_byte_order_reaches_execution() {
    // 0x70 0x00 0x00 0x00 must decode as halt, not as byte-swapped junk.
    let image = ProgramImage::from_bytes(&[0x70, 0x00, 0x00, 0x00]).unwrap();
    let mut console = BufferConsole::default();
    let vm = Vm::new(image, &mut console, VmConfig::default()).unwrap();
    assert_eq!(vm.run().unwrap().halt_reason, HaltReason::Halt);
}

#[test]
fn test_malformed_image_converts_to_runtime_error() {
    let err: RuntimeError = ProgramImage::from_bytes(&[0x70, 0x00, 0x00])
        .unwrap_err()
        .into();
    assert!(err.to_string().contains("malformed program"));
}

// ============================================================================
// Runtime faults carry machine context
// ============================================================================

#[test]
fn test_division_by_zero_reports_finger() {
    let words = vec![
        encode_orthography(Register::R1, 7),
        encode(5, Register::R0, Register::R1, Register::R2), // r2 is 0
        HALT,
    ];
    let mut console = BufferConsole::default();
    let vm = Vm::new(
        ProgramImage::from_words(words),
        &mut console,
        VmConfig::default(),
    )
    .unwrap();
    match vm.run() {
        Err(RuntimeError::DivisionByZero { finger }) => assert_eq!(finger, 1),
        other => panic!("expected DivisionByZero, got {:?}", other),
    }
}

#[test]
fn test_abandoning_the_program_array_is_fatal() {
    // abandon r0 with r0 = 0: handle 0 may never be abandoned
    let words = vec![encode(9, Register::R0, Register::R0, Register::R0), HALT];
    let mut console = BufferConsole::default();
    let vm = Vm::new(
        ProgramImage::from_words(words),
        &mut console,
        VmConfig::default(),
    )
    .unwrap();
    assert!(matches!(vm.run(), Err(RuntimeError::AbandonProgramArray)));
}

#[test]
fn test_use_of_unallocated_handle_is_fatal() {
    let words = vec![
        encode_orthography(Register::R1, 42), // never allocated
        encode(1, Register::R2, Register::R1, Register::R0), // r2 := heap[42][0]
        HALT,
    ];
    let mut console = BufferConsole::default();
    let vm = Vm::new(
        ProgramImage::from_words(words),
        &mut console,
        VmConfig::default(),
    )
    .unwrap();
    assert!(matches!(
        vm.run(),
        Err(RuntimeError::InvalidHandle { handle: 42 })
    ));
}
