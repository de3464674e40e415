//! Object-image reader.
//!
//! An LC-3 object file is a contiguous big-endian byte stream: one origin
//! word naming the load address, then zero or more payload words.

use crate::errors::LoadImageError;
use byteorder::{BigEndian, ReadBytesExt};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::debug;

/// Reads an object file into its origin word and payload words.
///
/// The payload may be empty. A trailing odd byte is discarded, as is
/// everything past what fits into memory (the truncation itself happens at
/// load time, see [`crate::hardware::Memory::load_image`]).
///
/// # Errors
/// - [`LoadImageError::ImageOpen`] when the file cannot be opened
/// - [`LoadImageError::ImageFormat`] when it ends before the origin word
pub fn read_image_file(path: impl AsRef<Path>) -> Result<(u16, Vec<u16>), LoadImageError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| LoadImageError::ImageOpen {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;
    let mut reader = BufReader::new(file);

    let origin = reader
        .read_u16::<BigEndian>()
        .map_err(|_| LoadImageError::ImageFormat {
            path: path.display().to_string(),
        })?;

    let mut words = Vec::new();
    while let Ok(word) = reader.read_u16::<BigEndian>() {
        words.push(word);
    }

    debug!(path = %path.display(), origin, words = words.len(), "image read");
    Ok((origin, words))
}
