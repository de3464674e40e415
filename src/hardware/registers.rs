use crate::numbers;
use std::cmp::Ordering;
use std::fmt::{Debug, Formatter};

/// Address execution starts at; everything below is the OS region by
/// convention.
pub const PC_START: u16 = 0x3000;

#[derive(Copy, Clone, PartialEq, Eq)]
pub struct Register(u16);

impl Register {
    #[must_use]
    pub const fn as_binary(self) -> u16 {
        self.0
    }
    #[must_use]
    pub const fn as_decimal(self) -> i16 {
        numbers::twos_complement_to_decimal(self.0)
    }
}

/// Wraps a raw word as a register value.
#[must_use]
pub const fn from_binary(bits: u16) -> Register {
    Register(bits)
}

/// Wraps a signed integer as a register value in two's complement.
#[must_use]
pub const fn from_decimal(value: i16) -> Register {
    Register(numbers::decimal_to_twos_complement(value))
}

impl Debug for Register {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "({:#06X} {:#018b} {})",
            self.0,
            self.0,
            self.as_decimal()
        )
    }
}
impl PartialEq<u16> for Register {
    fn eq(&self, other: &u16) -> bool {
        self.0.eq(other)
    }
}
impl PartialOrd<u16> for Register {
    fn partial_cmp(&self, other: &u16) -> Option<Ordering> {
        self.0.partial_cmp(other)
    }
}
impl From<u16> for Register {
    fn from(value: u16) -> Self {
        Self(value)
    }
}
impl From<Register> for u16 {
    fn from(value: Register) -> Self {
        value.0
    }
}

/// The register file: eight general registers, the program counter and the
/// condition flag.
pub struct Registers {
    general_purpose: [Register; 8],
    pc: Register,
    cond: ConditionFlag,
}

impl Registers {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            general_purpose: [Register(0); 8],
            pc: Register(PC_START),
            cond: ConditionFlag::Zero,
        }
    }
    #[must_use]
    pub const fn pc(&self) -> Register {
        self.pc
    }
    /// Post-fetch increment; wraps at the end of the address space.
    pub const fn inc_pc(&mut self) {
        self.pc = Register(self.pc.0.wrapping_add(1));
    }
    pub const fn set_pc(&mut self, val: u16) {
        self.pc = Register(val);
    }
    #[must_use]
    pub fn get(&self, r: u8) -> Register {
        debug_assert!(r <= 7, "general purpose register {r} does not exist");
        self.general_purpose[usize::from(r)]
    }
    pub fn set(&mut self, r: u8, value: Register) {
        debug_assert!(r <= 7, "general purpose register {r} does not exist");
        self.general_purpose[usize::from(r)] = value;
    }
    #[must_use]
    pub const fn get_conditional_register(&self) -> ConditionFlag {
        self.cond
    }
    /// Derives N/Z/P from the register that was just written.
    pub fn update_conditional_register(&mut self, r: u8) {
        let val = self.get(r);
        self.cond = ConditionFlag::from(val);
    }
}

impl Default for Registers {
    fn default() -> Self {
        Self::new()
    }
}

impl Debug for Registers {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for (index, val) in self.general_purpose.iter().enumerate() {
            writeln!(f, "R{index}:   {val:?}")?;
        }
        writeln!(f)?;
        writeln!(f, "PC:   {:?}", self.pc)?;
        writeln!(f, "Cond: {:?}", self.cond)?;
        Ok(())
    }
}

/// Exactly one of these is set after any instruction that writes a general
/// register.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConditionFlag {
    Pos = 1 << 0, // Positive
    Zero = 1 << 1,
    Neg = 1 << 2, // Negative
}

impl From<Register> for ConditionFlag {
    fn from(value: Register) -> Self {
        match value.as_decimal() {
            0 => Self::Zero,
            negative if negative < 0 => Self::Neg,
            _ => Self::Pos,
        }
    }
}
