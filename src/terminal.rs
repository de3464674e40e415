//! Raw-mode handling for the hosting terminal.
//!
//! Guest programs poll the keyboard one key at a time, so canonical line
//! buffering and echo must be off while the machine runs. The previous
//! terminal state is restored when the returned guard drops, on every exit
//! path.

use std::io::stdin;
use std::os::fd::{AsRawFd, RawFd};
use termios::{ECHO, ICANON, Termios};

pub struct RawLock {
    fd: RawFd,
    termios_orig: Termios,
}

impl Drop for RawLock {
    fn drop(&mut self) {
        // terminal stays in raw mode but no means to repair
        let _ = termios::tcsetattr(self.fd, termios::TCSANOW, &self.termios_orig);
    }
}

/// Switches stdin to non-canonical, non-echoing mode until the guard drops.
///
/// Only `ICANON` and `ECHO` are cleared; output processing stays untouched so
/// the guest's `\n` still reaches the terminal as a line break.
///
/// # Errors
/// - stdin is not a terminal or the mode switch is rejected
pub fn disable_input_buffering() -> Result<RawLock, std::io::Error> {
    let fd = stdin().as_raw_fd();
    let termios_orig = Termios::from_fd(fd)?;
    let mut termios_raw = termios_orig;
    // https://man7.org/linux/man-pages/man3/termios.3.html
    termios_raw.c_lflag &= !(ICANON | ECHO);
    termios::tcsetattr(fd, termios::TCSANOW, &termios_raw)?;
    Ok(RawLock { fd, termios_orig })
}
