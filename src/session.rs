// CLASSIFICATION: COMMUNITY
// Filename: session.rs v0.2
// Author: Lukas Bower
// Date Modified: 2027-07-19

//! Session state: a cursor plus the mode it was opened with.

use bitflags::bitflags;

bitflags! {
    /// Access mode requested when opening a session.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct OpenMode: u8 {
        /// Session intends to read.
        const READ = 0b0001;
        /// Session intends to write.
        const WRITE = 0b0010;
        /// Start writing at the current end of data.
        const APPEND = 0b0100;
    }
}

impl OpenMode {
    /// True for sessions opened to write without reading back.
    pub fn is_write_only(self) -> bool {
        self.contains(OpenMode::WRITE) && !self.contains(OpenMode::READ)
    }
}

/// Per-open state for one device session.
///
/// Carries no storage of its own; all data lives in the device. The
/// cursor is a plain signed offset and may be moved out of range by a
/// seek; the device validates it on the next read or write.
#[derive(Debug)]
pub struct Session {
    pub(crate) cursor: i64,
    mode: OpenMode,
}

impl Session {
    pub(crate) fn new(cursor: i64, mode: OpenMode) -> Self {
        Self { cursor, mode }
    }

    /// Offset the next read or write will use.
    pub fn cursor(&self) -> i64 {
        self.cursor
    }

    /// Mode the session was opened with.
    pub fn mode(&self) -> OpenMode {
        self.mode
    }
}
