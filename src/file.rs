// CLASSIFICATION: COMMUNITY
// Filename: file.rs v0.2
// Author: Lukas Bower
// Date Modified: 2027-08-01

//! `std::io` adapter over a device session.
//!
//! Callers that expect ordinary file semantics get them through
//! [`DevFile`], which maps the device operations onto the standard
//! `Read`, `Write`, and `Seek` traits.

use std::io::{self, Read, Seek, SeekFrom, Write};

use crate::device::{DevError, RamDev};
use crate::session::{OpenMode, Session};

/// File-style handle borrowing a device and owning one session.
pub struct DevFile<'d> {
    dev: &'d RamDev,
    session: Session,
}

impl<'d> DevFile<'d> {
    /// Open a new session on `dev` with the given mode.
    pub fn open(dev: &'d RamDev, mode: OpenMode) -> Self {
        Self {
            dev,
            session: dev.open(mode),
        }
    }

    /// Current session cursor.
    pub fn cursor(&self) -> i64 {
        self.session.cursor()
    }

    /// Close the underlying session.
    pub fn close(self) {
        self.dev.close(self.session);
    }
}

impl Read for DevFile<'_> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        Ok(self.dev.read(&mut self.session, buf))
    }
}

impl Write for DevFile<'_> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self.dev.write(&mut self.session, buf) {
            Ok(n) => Ok(n),
            // std callers expect a short count for partial progress;
            // only a write that stored nothing surfaces as an error.
            Err(DevError::CapacityExceeded { written, .. }) if written > 0 => Ok(written),
            Err(err) => Err(io::Error::new(io::ErrorKind::WriteZero, err)),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Seek for DevFile<'_> {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        let cursor = self.dev.seek(&mut self.session, pos);
        u64::try_from(cursor).map_err(|_| {
            io::Error::new(io::ErrorKind::InvalidInput, "negative stream position")
        })
    }
}
