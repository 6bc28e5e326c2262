//! Host console adapter
//!
//! Byte-oriented input and output, no translation. End of input is sticky:
//! once reported, every later read reports it again (the machine encodes
//! it as an all-ones platter).

use std::collections::VecDeque;
use std::io::{self, Read, Write};

/// Byte-level host I/O consumed by the input and output operators
pub trait Console {
    /// Read one byte; `None` means end of input.
    fn read_byte(&mut self) -> io::Result<Option<u8>>;

    /// Emit one byte. Must become visible promptly, in particular before
    /// the machine halts.
    fn write_byte(&mut self, byte: u8) -> io::Result<()>;
}

impl<T: Console + ?Sized> Console for &mut T {
    fn read_byte(&mut self) -> io::Result<Option<u8>> {
        (**self).read_byte()
    }

    fn write_byte(&mut self, byte: u8) -> io::Result<()> {
        (**self).write_byte(byte)
    }
}

/// Standard input/output console
pub struct StdConsole {
    stdin: io::Stdin,
    stdout: io::Stdout,
    eof: bool,
}

impl StdConsole {
    pub fn new() -> Self {
        StdConsole {
            stdin: io::stdin(),
            stdout: io::stdout(),
            eof: false,
        }
    }
}

impl Default for StdConsole {
    fn default() -> Self {
        Self::new()
    }
}

impl Console for StdConsole {
    fn read_byte(&mut self) -> io::Result<Option<u8>> {
        if self.eof {
            return Ok(None);
        }
        let mut buf = [0u8; 1];
        loop {
            match self.stdin.read(&mut buf) {
                Ok(0) => {
                    self.eof = true;
                    return Ok(None);
                }
                Ok(_) => return Ok(Some(buf[0])),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
    }

    fn write_byte(&mut self, byte: u8) -> io::Result<()> {
        self.stdout.write_all(&[byte])?;
        self.stdout.flush()
    }
}

/// In-memory console for tests and embedding
#[derive(Debug, Clone, Default)]
pub struct BufferConsole {
    inputs: VecDeque<u8>,
    outputs: Vec<u8>,
}

impl BufferConsole {
    pub fn new(inputs: impl Into<VecDeque<u8>>) -> Self {
        BufferConsole {
            inputs: inputs.into(),
            outputs: Vec::new(),
        }
    }

    pub fn outputs(&self) -> &[u8] {
        &self.outputs
    }

    pub fn take_outputs(&mut self) -> Vec<u8> {
        std::mem::take(&mut self.outputs)
    }
}

impl Console for BufferConsole {
    fn read_byte(&mut self) -> io::Result<Option<u8>> {
        Ok(self.inputs.pop_front())
    }

    fn write_byte(&mut self, byte: u8) -> io::Result<()> {
        self.outputs.push(byte);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buffer_console_reads_in_order() {
        let mut console = BufferConsole::new(vec![1, 2, 3]);
        assert_eq!(console.read_byte().unwrap(), Some(1));
        assert_eq!(console.read_byte().unwrap(), Some(2));
        assert_eq!(console.read_byte().unwrap(), Some(3));
    }

    #[test]
    fn test_buffer_console_eof_is_sticky() {
        let mut console = BufferConsole::new(vec![9]);
        assert_eq!(console.read_byte().unwrap(), Some(9));
        assert_eq!(console.read_byte().unwrap(), None);
        assert_eq!(console.read_byte().unwrap(), None);
    }

    #[test]
    fn test_buffer_console_collects_output() {
        let mut console = BufferConsole::default();
        console.write_byte(b'H').unwrap();
        console.write_byte(b'i').unwrap();
        assert_eq!(console.outputs(), b"Hi");
        assert_eq!(console.take_outputs(), b"Hi");
        assert!(console.outputs().is_empty());
    }
}
