//! The machine itself: registers and memory driven by the
//! fetch-decode-execute loop.

pub mod instruction;
pub mod opcodes;
#[cfg(test)]
pub mod test_helpers;
pub mod trap_routines;

use crate::errors::{ExecutionError, LoadImageError};
use crate::hardware::keyboard::{KeyboardInputProvider, TerminalInputProvider};
use crate::hardware::memory::Memory;
use crate::hardware::registers::Registers;
use crate::loader;
use self::instruction::Instruction;
use std::io;
use std::io::Write;
use std::ops::ControlFlow;
use std::path::Path;
use tracing::{debug, trace};

/// The sixteen LC-3 opcodes in their architectural numbering.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Opcode {
    Br = 0,
    Add,
    Ld,
    St,
    Jsr,
    And,
    Ldr,
    Str,
    Rti,
    Not,
    Ldi,
    Sti,
    Jmp,
    Res,
    Lea,
    Trap,
}

impl Opcode {
    /// Decodes instruction bits \[15:12\]; total since only four bits are
    /// inspected.
    fn decode(bits: u8) -> Self {
        match bits & 0xF {
            0 => Self::Br,
            1 => Self::Add,
            2 => Self::Ld,
            3 => Self::St,
            4 => Self::Jsr,
            5 => Self::And,
            6 => Self::Ldr,
            7 => Self::Str,
            8 => Self::Rti,
            9 => Self::Not,
            10 => Self::Ldi,
            11 => Self::Sti,
            12 => Self::Jmp,
            13 => Self::Res,
            14 => Self::Lea,
            _ => Self::Trap,
        }
    }
}

/// The public facing emulator used to run LC-3 programs.
///
/// Owns the whole machine state; the keyboard provider passed at
/// construction is the only connection to the outside world besides the
/// writer given to [`Emulator::execute_with`].
pub struct Emulator {
    memory: Memory,
    registers: Registers,
}

impl Default for Emulator {
    fn default() -> Self {
        Self::new(Box::new(TerminalInputProvider::new()))
    }
}

impl Emulator {
    /// Builds a machine in its power-on state reading keys from `keyboard`.
    #[must_use]
    pub fn new(keyboard: Box<dyn KeyboardInputProvider>) -> Self {
        Self {
            memory: Memory::new(keyboard),
            registers: Registers::new(),
        }
    }

    /// Loads one object image into memory at the origin the file names.
    /// Images loaded later overwrite earlier ones where they overlap.
    ///
    /// # Errors
    /// - the file cannot be opened or ends before the origin word
    pub fn load_image_file(&mut self, path: impl AsRef<Path>) -> Result<(), LoadImageError> {
        let (origin, words) = loader::read_image_file(path)?;
        self.memory.load_image(origin, &words);
        Ok(())
    }

    #[must_use]
    pub fn registers(&self) -> &Registers {
        &self.registers
    }
    pub fn registers_mut(&mut self) -> &mut Registers {
        &mut self.registers
    }
    #[must_use]
    pub fn memory(&self) -> &Memory {
        &self.memory
    }
    pub fn memory_mut(&mut self) -> &mut Memory {
        &mut self.memory
    }

    /// Restores the power-on register file so the loaded image can be run
    /// again from the start address.
    pub fn reset_registers(&mut self) {
        self.registers = Registers::new();
    }

    /// Runs the fetch-decode-execute loop until HALT, doing console output
    /// through the process stdout.
    ///
    /// # Errors
    /// - a reserved opcode or unknown trap vector is decoded
    /// - console I/O fails
    pub fn execute(&mut self) -> Result<(), ExecutionError> {
        let mut stdout = io::stdout().lock();
        self.execute_with(&mut stdout)
    }

    /// Like [`Emulator::execute`], but guest output goes to `stdout`.
    ///
    /// # Errors
    /// - see [`Emulator::execute`]
    pub fn execute_with(&mut self, stdout: &mut impl Write) -> Result<(), ExecutionError> {
        debug!(pc = self.registers.pc().as_binary(), "starting execution");
        loop {
            if self.step(stdout)?.is_break() {
                debug!("guest halted");
                return Ok(());
            }
        }
    }

    fn step(&mut self, stdout: &mut impl Write) -> Result<ControlFlow<()>, ExecutionError> {
        let bits = self.memory.read(self.registers.pc().as_binary())?;
        self.registers.inc_pc();
        let i = Instruction::from(bits);
        let opcode = Opcode::decode(i.op_code());
        trace!(?opcode, instr = bits, pc = self.registers.pc().as_binary());
        match opcode {
            Opcode::Add => opcodes::add(i, &mut self.registers),
            Opcode::And => opcodes::and(i, &mut self.registers),
            Opcode::Not => opcodes::not(i, &mut self.registers),
            Opcode::Br => opcodes::br(i, &mut self.registers),
            Opcode::Jmp => opcodes::jmp(i, &mut self.registers),
            Opcode::Jsr => opcodes::jsr(i, &mut self.registers),
            Opcode::Ld => opcodes::ld(i, &mut self.registers, &mut self.memory)?,
            Opcode::Ldi => opcodes::ldi(i, &mut self.registers, &mut self.memory)?,
            Opcode::Ldr => opcodes::ldr(i, &mut self.registers, &mut self.memory)?,
            Opcode::Lea => opcodes::lea(i, &mut self.registers),
            Opcode::St => opcodes::st(i, &self.registers, &mut self.memory),
            Opcode::Sti => opcodes::sti(i, &self.registers, &mut self.memory)?,
            Opcode::Str => opcodes::str(i, &self.registers, &mut self.memory),
            Opcode::Trap => {
                return match trap_routines::execute_trap(
                    i,
                    &mut self.registers,
                    &mut self.memory,
                    stdout,
                ) {
                    ControlFlow::Continue(()) => Ok(ControlFlow::Continue(())),
                    ControlFlow::Break(Ok(())) => Ok(ControlFlow::Break(())),
                    ControlFlow::Break(Err(e)) => Err(e),
                };
            }
            Opcode::Res | Opcode::Rti => {
                return Err(ExecutionError::ReservedInstructionFound(i.op_code()));
            }
        }
        Ok(ControlFlow::Continue(()))
    }
}

/// Builds an emulator with the terminal keyboard and the given images loaded
/// in order.
///
/// # Errors
/// - any image cannot be opened or ends before its origin word
pub fn from_image_files<P: AsRef<Path>>(paths: &[P]) -> Result<Emulator, LoadImageError> {
    let mut emulator = Emulator::default();
    for path in paths {
        emulator.load_image_file(path)?;
    }
    Ok(emulator)
}
