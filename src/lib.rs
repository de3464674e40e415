//! # LC-3 virtual machine.
//!
//! `lc3-vm` executes object images assembled for the LC-3 (Little Computer 3)
//! architecture: a 16-bit word-addressed machine with eight general purpose
//! registers, a condition flag and 65 536 words of memory. Images are loaded
//! at the origin their file names, and the machine runs until the guest
//! executes `TRAP HALT`. Console I/O goes through the host terminal.
//!
//! # Example
//! ```
//! use lc3_vm::emulator::Emulator;
//!
//! let mut emu = Emulator::default();
//! // ADD R1, R1, #2; HALT
//! emu.memory_mut().load_image(0x3000, &[0x1262, 0xF025]);
//! let mut out = Vec::new();
//! emu.execute_with(&mut out).unwrap();
//! assert_eq!(out, b"HALT\n");
//! assert_eq!(emu.registers().get(1).as_binary(), 2);
//! ```
//!
//! # Errors
//! - an image file cannot be opened or ends before its origin word
//! - the guest decodes a reserved opcode or an unknown trap vector

pub mod emulator;
pub mod errors;
pub mod hardware;
pub mod loader;
pub mod numbers;
pub mod terminal;

pub use emulator::Emulator;
