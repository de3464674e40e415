//! This code does emulate the trap routines but does not implement them via
//! the opcodes of the LC-3 but directly.
//!
//! In the real system the code for these routines is at the target of the
//! [Trap Vector Tables](https://cs131.info/Assembly/Instructions/TRAPRoutines.html#trap-vector-table).
//!
//! Every routine flushes after writing: the hosting terminal is line
//! buffered, while guests print prompts and board redraws without newlines.

use crate::emulator::instruction::Instruction;
use crate::errors::ExecutionError;
use crate::hardware::memory::Memory;
use crate::hardware::registers::{Registers, from_binary};
use std::io;
use std::io::Write;
use std::ops::ControlFlow;

const TRAP_GETC: u16 = 0x20;
const TRAP_OUT: u16 = 0x21;
const TRAP_PUTS: u16 = 0x22;
const TRAP_IN: u16 = 0x23;
const TRAP_PUTSP: u16 = 0x24;
const TRAP_HALT: u16 = 0x25;

/// TRAP: saves the return address in R7, then runs the service routine named
/// by the vector.
/// ```text
///  15__12__11__8___7______0_
/// | 1111 | 0000 | trapvect8 |
///  -------------------------
/// ```
/// `Break(Ok(()))` means HALT was requested; errors break with the cause.
pub fn execute_trap(
    i: Instruction,
    regs: &mut Registers,
    memory: &mut Memory,
    stdout: &mut impl Write,
) -> ControlFlow<Result<(), ExecutionError>> {
    regs.set(7, regs.pc());
    match i.trap_vector() {
        TRAP_GETC => get_c(regs, memory),
        TRAP_OUT => out(regs, stdout),
        TRAP_PUTS => put_s(regs, memory, stdout),
        TRAP_IN => in_trap(regs, memory, stdout),
        TRAP_PUTSP => put_sp(regs, memory, stdout),
        TRAP_HALT => halt(stdout),
        unknown => ControlFlow::Break(Err(ExecutionError::UnknownTrapRoutine(unknown))),
    }
}

/// GETC: Read a single character from the keyboard. The character is not
/// echoed onto the console.
///
/// Its ASCII code is copied into R0. The high eight bits of R0 are cleared.
fn get_c(regs: &mut Registers, memory: &mut Memory) -> ControlFlow<Result<(), ExecutionError>> {
    match memory.wait_key() {
        Ok(key) => {
            regs.set(0, from_binary(key));
            regs.update_conditional_register(0);
            ControlFlow::Continue(())
        }
        Err(e) => ControlFlow::Break(Err(e)),
    }
}

/// IN: Print a prompt on the screen and read a single character echoed back
/// from the keyboard. Otherwise, like 0x20 GETC.
fn in_trap(
    regs: &mut Registers,
    memory: &mut Memory,
    stdout: &mut impl Write,
) -> ControlFlow<Result<(), ExecutionError>> {
    write_bytes_out(b"Enter a character: ", stdout)?;
    match memory.wait_key() {
        Ok(key) => {
            regs.set(0, from_binary(key));
            regs.update_conditional_register(0);
            #[expect(
                clippy::cast_possible_truncation,
                reason = "wait_key zero-extends a byte"
            )]
            let echo = key as u8;
            write_bytes_out(&[echo], stdout)
        }
        Err(e) => ControlFlow::Break(Err(e)),
    }
}

/// OUT: Write a character in R0\[7:0\] to the console display.
fn out(regs: &Registers, stdout: &mut impl Write) -> ControlFlow<Result<(), ExecutionError>> {
    #[expect(
        clippy::cast_possible_truncation,
        reason = "only the low byte of R0 is a character"
    )]
    let character = regs.get(0).as_binary() as u8;
    write_bytes_out(&[character], stdout)
}

#[expect(
    clippy::cast_possible_truncation,
    reason = "Truncation is what is expected here"
)]
fn put_one_char_per_u16(input: u16, append_to: &mut Vec<u8>) {
    append_to.push(input as u8);
}

#[expect(
    clippy::cast_possible_truncation,
    reason = "Truncation is what is expected here"
)]
fn put_two_chars_per_u16(input: u16, append_to: &mut Vec<u8>) {
    append_to.push(input as u8);
    let high = (input >> 8) as u8;
    if high != 0 {
        append_to.push(high);
    }
}

fn put(
    regs: &Registers,
    mem: &Memory,
    stdout: &mut impl Write,
    handle_char: fn(u16, &mut Vec<u8>),
) -> ControlFlow<Result<(), ExecutionError>> {
    let mut address = regs.get(0).as_binary();
    let mut bytes = Vec::with_capacity(120);
    while mem[address] != 0 {
        handle_char(mem[address], &mut bytes);
        address = address.wrapping_add(1);
    }
    write_bytes_out(&bytes, stdout)
}

/// PUTS: print the null-delimited string starting at the address in R0, one
/// character per word.
fn put_s(
    regs: &Registers,
    mem: &Memory,
    stdout: &mut impl Write,
) -> ControlFlow<Result<(), ExecutionError>> {
    put(regs, mem, stdout, put_one_char_per_u16)
}

/// PUTSP: Packed version of PUTS
///
/// The ASCII code contained in bits \[7:0\] of a memory location is written to
/// the console first, then the one in bits \[15:8\] unless it is 0x00.
/// Writing terminates with a zero word.
fn put_sp(
    regs: &Registers,
    mem: &Memory,
    stdout: &mut impl Write,
) -> ControlFlow<Result<(), ExecutionError>> {
    put(regs, mem, stdout, put_two_chars_per_u16)
}

/// HALT: End the program with a message on stdout.
fn halt(stdout: &mut impl Write) -> ControlFlow<Result<(), ExecutionError>> {
    write_bytes_out(b"HALT\n", stdout)?;
    ControlFlow::Break(Ok(()))
}

fn write_bytes_out(
    bytes: &[u8],
    stdout: &mut impl Write,
) -> ControlFlow<Result<(), ExecutionError>> {
    match stdout.write_all(bytes).and_then(|()| stdout.flush()) {
        Ok(()) => ControlFlow::Continue(()),
        Err(e) => wrap_io_error_in_cf(&e),
    }
}

fn wrap_io_error_in_cf(error: &io::Error) -> ControlFlow<Result<(), ExecutionError>, ()> {
    ControlFlow::Break(Err(ExecutionError::IOInputOutputError(error.to_string())))
}
