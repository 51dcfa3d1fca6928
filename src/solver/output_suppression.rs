//! Silencing of native solver logs
//!
//! CBC and Gurobi write their logs straight to the process' stdout and stderr.
//! When a model asks for the log to be hidden, the backend holds a
//! [`QuietOutput`] for the duration of the solve.
//!
//! The `gag` crate allows only one gag per stream at a time, so the gags are
//! shared: every concurrent holder gets a reference-counted handle to the same
//! [`Gag`], which is released when the last handle is dropped.

use std::io;
use std::sync::{Arc, Mutex, PoisonError, Weak};

use gag::Gag;
use tracing::warn;

/// A shared handle on one stream's gag
pub struct StreamGag {
    gag: Arc<Gag>,
}

impl StreamGag {
    pub fn stdout() -> io::Result<Self> {
        STDOUT.acquire()
    }

    pub fn stderr() -> io::Result<Self> {
        STDERR.acquire()
    }
}

struct SharedGag {
    current: Mutex<Weak<Gag>>,
    open: fn() -> io::Result<Gag>,
}

impl SharedGag {
    const fn new(open: fn() -> io::Result<Gag>) -> Self {
        Self {
            current: Mutex::new(Weak::new()),
            open,
        }
    }

    fn acquire(&self) -> io::Result<StreamGag> {
        // The guarded value is a weak pointer, still valid after a panic
        let mut current = self.current.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(gag) = current.upgrade() {
            return Ok(StreamGag { gag });
        }

        let gag = Arc::new((self.open)()?);
        *current = Arc::downgrade(&gag);
        Ok(StreamGag { gag })
    }
}

static STDOUT: SharedGag = SharedGag::new(Gag::stdout);
static STDERR: SharedGag = SharedGag::new(Gag::stderr);

/// Both standard streams silenced while alive
pub struct QuietOutput {
    _stdout: StreamGag,
    _stderr: StreamGag,
}

impl QuietOutput {
    pub fn acquire() -> io::Result<Self> {
        Ok(Self {
            _stdout: StreamGag::stdout()?,
            _stderr: StreamGag::stderr()?,
        })
    }

    /// Silence the solver unless its log was requested
    ///
    /// Failing to redirect the streams is not fatal: the solve goes ahead with
    /// the log visible.
    pub fn unless(show_log: bool) -> Option<Self> {
        if show_log {
            return None;
        }
        match Self::acquire() {
            Ok(quiet) => Some(quiet),
            Err(err) => {
                warn!(error = %err, "could not silence solver output");
                None
            }
        }
    }
}
