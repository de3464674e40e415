//! Errors that can occur using this crate.
//!
//! The crate's code is designed in a way that functions/methods _can_ trigger all the enum variants
//! specified in the returned [`Result`]

use displaydoc::Display;
use std::error::Error;
use std::fmt::{Debug, Display, Formatter};

/// Possible errors while loading an object image.
///
/// Issues are files that cannot be opened and files too short to carry an
/// origin word. `Display` and `Debug` provide all necessary details.
#[rustfmt::skip]
#[derive(Display, PartialEq, Eq)]
pub enum LoadImageError {
    /// Cannot open image file '{path}': {message}
    ImageOpen { path: String, message: String },
    /// Image file '{path}' ends before the origin word
    ImageFormat { path: String },
}
impl LoadImageError {
    /// The path of the image the error refers to.
    #[must_use]
    pub fn path(&self) -> &str {
        match self {
            Self::ImageOpen { path, .. } | Self::ImageFormat { path } => path,
        }
    }
}
impl Debug for LoadImageError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(self, f)
    }
}
impl Error for LoadImageError {}

/// Possible errors during program execution.
///
/// `Display` and `Debug` provide all necessary details.
#[rustfmt::skip]
#[derive(Display, PartialEq, Eq)]
pub enum ExecutionError {
    /// Reserved opcode {0:#06b} decoded, most probably the image is not a valid LC-3 program
    ReservedInstructionFound(u8),
    /// Error reading the keyboard or writing program output: {0}
    IOInputOutputError(String),
    /// Unknown trap routine found: {0:#06X}
    UnknownTrapRoutine(u16),
}
impl Debug for ExecutionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(self, f)
    }
}
impl Error for ExecutionError {}

impl From<std::io::Error> for ExecutionError {
    fn from(error: std::io::Error) -> Self {
        Self::IOInputOutputError(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use googletest::prelude::*;

    #[gtest]
    pub fn test_load_image_error_messages() {
        let err = LoadImageError::ImageOpen {
            path: "2048.obj".into(),
            message: "No such file or directory (os error 2)".into(),
        };
        expect_that!(
            err.to_string(),
            eq("Cannot open image file '2048.obj': No such file or directory (os error 2)")
        );
        expect_that!(err.path(), eq("2048.obj"));

        let err = LoadImageError::ImageFormat {
            path: "empty.obj".into(),
        };
        expect_that!(
            err.to_string(),
            eq("Image file 'empty.obj' ends before the origin word")
        );
        expect_that!(err.path(), eq("empty.obj"));
    }

    #[gtest]
    pub fn test_execution_error_messages() {
        expect_that!(
            ExecutionError::ReservedInstructionFound(0b1101).to_string(),
            eq("Reserved opcode 0b1101 decoded, most probably the image is not a valid LC-3 program")
        );
        expect_that!(
            ExecutionError::UnknownTrapRoutine(0x26).to_string(),
            eq("Unknown trap routine found: 0x0026")
        );
    }
}
