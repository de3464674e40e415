//! Shared fakes for the crate's tests: a writer capturing guest output and a
//! keyboard playing back a scripted key sequence.

use crate::emulator::Emulator;
use crate::errors::ExecutionError;
use crate::hardware::keyboard::KeyboardInputProvider;
use crate::hardware::registers::PC_START;
use std::collections::VecDeque;
use std::io;
use std::io::Write;

/// Collects everything the guest writes so tests can assert on it.
pub struct StringWriter {
    buffer: io::Cursor<Vec<u8>>,
}

impl Write for StringWriter {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        self.buffer.write(data)
    }
    fn flush(&mut self) -> io::Result<()> {
        self.buffer.flush()
    }
}

impl StringWriter {
    pub fn new() -> Self {
        Self {
            buffer: io::Cursor::new(Vec::new()),
        }
    }
    /// The captured output; guest bytes outside ASCII come back as
    /// replacement characters rather than failing the test early.
    pub fn get_string(&self) -> String {
        String::from_utf8_lossy(self.buffer.get_ref()).into_owned()
    }
}

/// Plays back a fixed key sequence; optionally reports "no key" for the
/// first few polls so busy-wait loops actually loop.
pub struct ScriptedInputProvider {
    keys: VecDeque<u8>,
    not_ready_polls: usize,
}

impl ScriptedInputProvider {
    pub fn new(keys: &[u8]) -> Self {
        Self {
            keys: keys.iter().copied().collect(),
            not_ready_polls: 0,
        }
    }
    pub fn with_delayed_readiness(keys: &[u8], not_ready_polls: usize) -> Self {
        Self {
            keys: keys.iter().copied().collect(),
            not_ready_polls,
        }
    }
}

impl KeyboardInputProvider for ScriptedInputProvider {
    fn check_key(&mut self) -> io::Result<bool> {
        if self.not_ready_polls > 0 {
            self.not_ready_polls -= 1;
            return Ok(false);
        }
        Ok(!self.keys.is_empty())
    }
    fn read_char(&mut self) -> io::Result<u8> {
        self.keys.pop_front().ok_or_else(|| {
            io::Error::new(io::ErrorKind::UnexpectedEof, "keyboard script exhausted")
        })
    }
}

/// An emulator wired to a scripted keyboard and a capturing stdout, with the
/// program placed at the default start address.
pub struct FakeEmulator {
    pub inner: Emulator,
    stdout: StringWriter,
}

impl FakeEmulator {
    pub fn new(program: &[u16], keys: &[u8]) -> Self {
        let mut inner = Emulator::new(Box::new(ScriptedInputProvider::new(keys)));
        inner.memory_mut().load_image(PC_START, program);
        Self {
            inner,
            stdout: StringWriter::new(),
        }
    }

    pub fn run(&mut self) -> Result<(), ExecutionError> {
        self.inner.execute_with(&mut self.stdout)
    }

    pub fn output(&self) -> String {
        self.stdout.get_string()
    }
}
