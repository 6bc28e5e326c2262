//! UM-32 Runtime
//!
//! Execute UM-32 program images: the array heap, the optional
//! copy-on-write backing, the fetch-decode-dispatch loop, and the host
//! console adapter.

pub mod cow;
pub mod error;
pub mod execute;
pub mod heap;
pub mod io;
pub mod state;
pub mod vm;

pub use cow::CowVec;
pub use error::{Result, RuntimeError};
pub use heap::ArrayHeap;
pub use io::{BufferConsole, Console, StdConsole};
pub use state::{HaltReason, VmState};
pub use vm::{ExecutionResult, Vm, VmConfig};

use um32_spec::ProgramImage;

/// Run an image on the standard console.
pub fn run(image: ProgramImage, config: VmConfig) -> Result<ExecutionResult> {
    let vm = Vm::new(image, StdConsole::new(), config)?;
    vm.run()
}
