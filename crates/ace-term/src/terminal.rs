// SPDX-License-Identifier: MIT
//
// Terminal queries.
//
// Safety: `ioctl(TIOCGWINSZ)` and `isatty` are the standard POSIX interfaces
// for these questions. Each unsafe block is a single libc call.
#![allow(unsafe_code)]
//
// The editor never takes over the screen. It only needs to know how wide the
// terminal is (to wrap printed lines) and which standard streams are
// attached to one (to decide on prompts and colour).

// ─── Size ───────────────────────────────────────────────────────────────────

/// Terminal dimensions in character cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Size {
    /// Number of columns (width in character cells).
    pub cols: u16,
    /// Number of rows (height in character cells).
    pub rows: u16,
}

/// A standard stream, for tty checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stream {
    Stdin,
    Stdout,
    Stderr,
}

#[cfg(unix)]
impl Stream {
    const fn fd(self) -> libc::c_int {
        match self {
            Self::Stdin => libc::STDIN_FILENO,
            Self::Stdout => libc::STDOUT_FILENO,
            Self::Stderr => libc::STDERR_FILENO,
        }
    }
}

// ─── Terminal Queries ───────────────────────────────────────────────────────

/// Query the terminal size via `ioctl(TIOCGWINSZ)` on stderr, where printed
/// lines go.
///
/// Returns `None` if stderr is not a terminal or the query fails.
#[cfg(unix)]
#[must_use]
pub fn get_size() -> Option<Size> {
    let mut ws: libc::winsize = unsafe { std::mem::zeroed() };
    let result = unsafe { libc::ioctl(libc::STDERR_FILENO, libc::TIOCGWINSZ, &mut ws) };

    if result == 0 && ws.ws_col > 0 && ws.ws_row > 0 {
        Some(Size {
            cols: ws.ws_col,
            rows: ws.ws_row,
        })
    } else {
        None
    }
}

#[cfg(not(unix))]
#[must_use]
pub fn get_size() -> Option<Size> {
    None
}

/// Check whether `stream` is connected to a terminal (TTY).
#[cfg(unix)]
#[must_use]
pub fn is_tty(stream: Stream) -> bool {
    unsafe { libc::isatty(stream.fd()) != 0 }
}

#[cfg(not(unix))]
#[must_use]
pub fn is_tty(_stream: Stream) -> bool {
    false
}

// ─── Tests ──────────────────────────────────────────────────────────────────
