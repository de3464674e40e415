//! Keyboard side of the terminal adapter.
//!
//! The machine consumes exactly two capabilities: a non-blocking readiness
//! poll and a blocking one-byte read. Guests either busy-wait on the mapped
//! keyboard status register or block inside the `GETC`/`IN` traps.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers, poll, read};
use std::io;
use std::time::Duration;

pub trait KeyboardInputProvider {
    /// True iff a key is available right now; must not block.
    ///
    /// # Errors
    /// - the underlying event source fails
    fn check_key(&mut self) -> io::Result<bool>;
    /// Blocks until one key is available and returns it as a byte.
    ///
    /// # Errors
    /// - the underlying event source fails
    fn read_char(&mut self) -> io::Result<u8>;
}

/// Reads keys from the hosting terminal via crossterm events.
///
/// Polling has to consume the event to know whether it carries a usable key,
/// so a successful poll stashes the byte until the next `read_char`.
pub struct TerminalInputProvider {
    pending: Option<u8>,
}

impl TerminalInputProvider {
    #[must_use]
    pub const fn new() -> Self {
        Self { pending: None }
    }
}

impl Default for TerminalInputProvider {
    fn default() -> Self {
        Self::new()
    }
}

/// Maps a key event to the byte a raw-mode terminal would deliver.
///
/// Curses-style guests (2048, rogue) poll for control bytes, so Enter,
/// Escape, Backspace, Tab and Ctrl-letter chords all map to their ASCII
/// counterparts. Anything else is dropped.
fn key_event_byte(event: &KeyEvent) -> Option<u8> {
    if event.kind == KeyEventKind::Release {
        return None;
    }
    match event.code {
        KeyCode::Char(c) if event.modifiers.contains(KeyModifiers::CONTROL) => match c {
            'a'..='z' => Some(c as u8 - b'a' + 1),
            _ => None,
        },
        KeyCode::Char(c) if c.is_ascii() => Some(c as u8),
        KeyCode::Enter => Some(b'\n'),
        KeyCode::Tab => Some(b'\t'),
        KeyCode::Backspace => Some(0x08),
        KeyCode::Esc => Some(0x1B),
        _ => None,
    }
}

impl KeyboardInputProvider for TerminalInputProvider {
    fn check_key(&mut self) -> io::Result<bool> {
        if self.pending.is_some() {
            return Ok(true);
        }
        // drain queued non-key events (resize, focus) without blocking
        while poll(Duration::from_secs(0))? {
            if let Some(event) = read()?.as_key_event()
                && let Some(byte) = key_event_byte(&event)
            {
                self.pending = Some(byte);
                return Ok(true);
            }
        }
        Ok(false)
    }

    fn read_char(&mut self) -> io::Result<u8> {
        if let Some(byte) = self.pending.take() {
            return Ok(byte);
        }
        loop {
            if let Some(event) = read()?.as_key_event()
                && let Some(byte) = key_event_byte(&event)
            {
                return Ok(byte);
            }
        }
    }
}
