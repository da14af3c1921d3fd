// CLASSIFICATION: COMMUNITY
// Filename: device.rs v0.4
// Author: Lukas Bower
// Date Modified: 2027-08-02

//! Core state machine for the RAM-backed byte device.
//!
//! One buffer and one logical length are shared by every session. A
//! single mutex guards the pair, and each read or write runs its whole
//! sequence under the lock so sparse zero-fill, copy, and length
//! update are never interleaved between sessions.

use std::io::SeekFrom;
use std::sync::{Mutex, MutexGuard};

use log::{debug, info, warn};
use thiserror::Error;

use crate::session::{OpenMode, Session};
use crate::DevConfig;

/// Errors returned by device operations.
#[derive(Debug, Error)]
pub enum DevError {
    /// The backing store could not be reserved at initialization.
    #[error("cannot allocate {requested} byte backing store")]
    Allocation {
        /// Capacity that was requested.
        requested: usize,
    },
    /// A write ran out of device capacity before every byte was
    /// stored. Bytes counted by `written` are committed and readable.
    #[error("device full: stored {written} of {requested} bytes")]
    CapacityExceeded {
        /// Bytes committed before capacity was reached.
        written: usize,
        /// Bytes the caller asked to store.
        requested: usize,
    },
    /// Device registry failure while installing or removing a device.
    #[error("device registry: {0}")]
    Registry(#[from] crate::registry::RegistryError),
}

/// Buffer and high-water mark, guarded together.
///
/// `data` is `None` once teardown has released the store; `length`
/// never exceeds the configured capacity.
struct Shared {
    data: Option<Vec<u8>>,
    length: usize,
}

/// Fixed-capacity byte device backed by RAM.
///
/// All sessions observe and mutate the same buffer and length; a
/// session is just a cursor handed back by [`RamDev::open`] and passed
/// to every operation.
pub struct RamDev {
    cfg: DevConfig,
    shared: Mutex<Shared>,
}

impl RamDev {
    /// Allocate the zeroed backing store and become ready.
    pub fn new(cfg: DevConfig) -> Result<Self, DevError> {
        let mut data = Vec::new();
        data.try_reserve_exact(cfg.capacity)
            .map_err(|_| DevError::Allocation {
                requested: cfg.capacity,
            })?;
        data.resize(cfg.capacity, 0);
        info!("ramdev {}: {} byte store ready", cfg.name, cfg.capacity);
        Ok(Self {
            cfg,
            shared: Mutex::new(Shared {
                data: Some(data),
                length: 0,
            }),
        })
    }

    fn lock(&self) -> MutexGuard<'_, Shared> {
        match self.shared.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    /// Release the backing store. Safe to call repeatedly; open
    /// sessions keep their cursors but all subsequent reads hit
    /// end-of-data and writes report exhaustion.
    pub fn teardown(&self) {
        let mut shared = self.lock();
        if shared.data.take().is_some() {
            shared.length = 0;
            info!("ramdev {}: store released", self.cfg.name);
        }
    }

    /// Open a session. Append starts at the current end of data; a
    /// write-only open discards previous content by resetting the
    /// length (stored bytes are not cleared, later sparse writes zero
    /// the gap). Other modes start at offset zero.
    pub fn open(&self, mode: OpenMode) -> Session {
        let mut shared = self.lock();
        let cursor = if mode.contains(OpenMode::APPEND) {
            shared.length as i64
        } else {
            if mode.is_write_only() {
                shared.length = 0;
            }
            0
        };
        debug!(
            "ramdev {}: open mode={:?} cursor={}",
            self.cfg.name, mode, cursor
        );
        Session::new(cursor, mode)
    }

    /// Copy bytes from the session cursor into `buf`, stopping at the
    /// end of data. Advances the cursor by the count copied and
    /// returns it; 0 is the normal end-of-data signal, never an error.
    /// A cursor outside the initialized range yields 0 bytes.
    pub fn read(&self, session: &mut Session, buf: &mut [u8]) -> usize {
        let shared = self.lock();
        let Some(data) = shared.data.as_ref() else {
            return 0;
        };
        let Ok(pos) = usize::try_from(session.cursor) else {
            return 0;
        };
        if pos >= shared.length {
            return 0;
        }
        let n = buf.len().min(shared.length - pos);
        buf[..n].copy_from_slice(&data[pos..pos + n]);
        session.cursor += n as i64;
        n
    }

    /// Store `buf` at the session cursor, zero-filling any gap between
    /// the current end of data and the cursor first.
    ///
    /// Copying stops at capacity. A full copy returns `Ok(count)`; a
    /// short or empty copy returns [`DevError::CapacityExceeded`]
    /// carrying the committed count; those bytes stay stored and the
    /// length reflects them. A negative cursor addresses no byte and
    /// stores nothing.
    pub fn write(&self, session: &mut Session, buf: &[u8]) -> Result<usize, DevError> {
        let capacity = self.cfg.capacity;
        let mut shared = self.lock();
        let Shared { data, length } = &mut *shared;
        let (Some(data), Ok(mut pos)) = (data.as_mut(), usize::try_from(session.cursor)) else {
            return Err(DevError::CapacityExceeded {
                written: 0,
                requested: buf.len(),
            });
        };
        // A write-only reopen shrinks `length` without clearing bytes;
        // fill the gap up to the cursor so reads never see stale data.
        while *length < pos && *length < capacity {
            data[*length] = 0;
            *length += 1;
        }
        let n = buf.len().min(capacity.saturating_sub(pos));
        if n > 0 {
            data[pos..pos + n].copy_from_slice(&buf[..n]);
        }
        pos += n;
        session.cursor = pos as i64;
        if pos > *length {
            *length = pos.min(capacity);
        }
        if n == buf.len() {
            Ok(n)
        } else {
            warn!(
                "ramdev {}: capacity reached, stored {} of {} bytes",
                self.cfg.name,
                n,
                buf.len()
            );
            Err(DevError::CapacityExceeded {
                written: n,
                requested: buf.len(),
            })
        }
    }

    /// Reposition the session cursor. The result is not bounds-checked
    /// here; it may go negative or past capacity, and is validated by
    /// the next read or write. Returns the new cursor.
    pub fn seek(&self, session: &mut Session, target: SeekFrom) -> i64 {
        let length = self.lock().length;
        let new = match target {
            SeekFrom::Start(offset) => i64::try_from(offset).unwrap_or(i64::MAX),
            SeekFrom::Current(offset) => session.cursor.saturating_add(offset),
            SeekFrom::End(offset) => (length as i64).saturating_add(offset),
        };
        debug!(
            "ramdev {}: seek {:?} old={} new={}",
            self.cfg.name, target, session.cursor, new
        );
        session.cursor = new;
        new
    }

    /// Close a session. Buffer and length are untouched.
    pub fn close(&self, session: Session) {
        debug!("ramdev {}: close cursor={}", self.cfg.name, session.cursor);
    }

    /// Current high-water mark of initialized data.
    pub fn len(&self) -> usize {
        self.lock().length
    }

    /// True when no byte has been initialized yet.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Fixed capacity of the backing store.
    pub fn capacity(&self) -> usize {
        self.cfg.capacity
    }

    /// Device identifier from the configuration.
    pub fn name(&self) -> &str {
        &self.cfg.name
    }

    /// False once teardown has released the backing store.
    pub fn is_ready(&self) -> bool {
        self.lock().data.is_some()
    }
}
