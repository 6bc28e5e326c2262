//! Virtual machine driver for the UM-32
//!
//! Owns the register state, the array heap, and the host console, and
//! drives the fetch-decode-dispatch loop until the halt operator stops the
//! machine or a fatal error ends execution.

use crate::error::{Result, RuntimeError};
use crate::execute::execute;
use crate::heap::ArrayHeap;
use crate::io::Console;
use crate::state::{HaltReason, VmState};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use um32_spec::{encoding, Instruction, Opcode, ProgramImage};

/// VM configuration
///
/// The defaults yield exact UM-32 semantics; every option is a pure
/// acceleration or diagnostic and never changes observable behavior.
#[derive(Debug, Clone, Default)]
pub struct VmConfig {
    /// Back heap arrays with shared buffers so load-program is a
    /// reference-count bump instead of a linear copy
    pub copy_on_write: bool,

    /// Speculatively fast-path the typical successor of certain operators
    pub branch_prediction: bool,

    /// Write each executed opcode as one byte to this binary file
    pub opcode_trace: Option<PathBuf>,

    /// Print each executed instruction to standard error
    pub trace: bool,

    /// Stop with `HaltReason::StepLimit` after this many instructions
    pub max_steps: Option<u64>,
}

/// Execution result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExecutionResult {
    /// Number of instructions executed
    pub steps: u64,

    /// Reason for halting
    pub halt_reason: HaltReason,
}

/// UM-32 virtual machine
pub struct Vm<C: Console> {
    /// Registers, finger, step counter, halt status
    state: VmState,

    /// Heap of platter arrays; array 0 is the program
    heap: ArrayHeap,

    /// Host byte I/O
    console: C,

    /// Configuration
    config: VmConfig,

    /// Opcode-trace sink, if configured
    opcode_trace: Option<BufWriter<File>>,
}

impl<C: Console> Vm<C> {
    /// Create a VM with the image installed as array 0.
    pub fn new(image: ProgramImage, console: C, config: VmConfig) -> Result<Self> {
        let opcode_trace = match &config.opcode_trace {
            Some(path) => Some(BufWriter::new(File::create(path)?)),
            None => None,
        };

        Ok(Vm {
            state: VmState::new(),
            heap: ArrayHeap::new(image.into_words(), config.copy_on_write),
            console,
            config,
            opcode_trace,
        })
    }

    /// Run the machine until halt.
    pub fn run(mut self) -> Result<ExecutionResult> {
        while !self.state.is_halted() {
            if self.at_step_limit() {
                self.state.halt(HaltReason::StepLimit);
                break;
            }
            self.step()?;
        }

        if let Some(writer) = self.opcode_trace.as_mut() {
            writer.flush()?;
        }

        Ok(ExecutionResult {
            steps: self.state.steps,
            halt_reason: self.state.halt_reason.unwrap_or(HaltReason::Halt),
        })
    }

    /// One fetch-decode-dispatch cycle.
    fn step(&mut self) -> Result<()> {
        let finger = self.state.finger;
        let program = self.heap.program();
        let word = match program.get(finger as usize) {
            Some(&word) => word,
            None => {
                return Err(RuntimeError::FingerOutOfBounds {
                    finger,
                    len: program.len(),
                })
            }
        };
        self.state.finger = finger.wrapping_add(1);

        let inst = Instruction::decode(word)
            .map_err(|_| RuntimeError::IllegalInstruction { word, finger })?;

        if self.config.trace {
            eprintln!(
                "[{:10}] finger={:#010x} {}",
                self.state.steps, finger, inst
            );
        }

        if let Some(writer) = self.opcode_trace.as_mut() {
            writer.write_all(&[inst.opcode().to_u8()])?;
        }

        execute(&inst, &mut self.state, &mut self.heap, &mut self.console)?;
        self.state.inc_steps();

        if self.config.branch_prediction && !self.state.is_halted() {
            // Typical successors: a conditional move guards a jump, and an
            // amendment is usually followed by reloading a constant.
            match inst {
                Instruction::ConditionalMove { .. } => self.step_if_next(Opcode::LoadProgram)?,
                Instruction::ArrayAmendment { .. } => self.step_if_next(Opcode::Orthography)?,
                _ => {}
            }
        }

        Ok(())
    }

    /// Speculative fast path: execute the next instruction now if it is
    /// the predicted operator. Runs the same fetch, trace, dispatch, and
    /// step accounting as the main loop, so observable behavior is
    /// identical.
    fn step_if_next(&mut self, predicted: Opcode) -> Result<()> {
        if self.at_step_limit() {
            return Ok(());
        }
        let word = match self.heap.program().get(self.state.finger as usize) {
            Some(&word) => word,
            None => return Ok(()),
        };
        if encoding::extract_opcode(word) == predicted.to_u8() as u32 {
            self.step()?;
        }
        Ok(())
    }

    fn at_step_limit(&self) -> bool {
        self.config
            .max_steps
            .map_or(false, |limit| self.state.steps >= limit)
    }

    /// Current state (for debugging and embedding)
    pub fn state(&self) -> &VmState {
        &self.state
    }

    /// Heap (for debugging and embedding)
    pub fn heap(&self) -> &ArrayHeap {
        &self.heap
    }
}
