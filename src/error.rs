//! Fatal tracer errors.
//!
//! Only failures that abort [`crate::tracer::Tracer::run`] are represented here. Decode
//! failures and domain anomalies (unknown syscall ids, argument-less signatures) are folded
//! into the emitted [`crate::value::Trace`] instead rather than treated as errors — they describe
//! the tracee's behavior, not a failure of the tracer itself.

use std::io;

use nix::errno::Errno;
use thiserror::Error;

/// Fatal error surfaced from [`crate::tracer::Tracer::run`].
///
/// Any of these terminates the tracer loop immediately; none of them is retried internally.
#[derive(Debug, Error)]
pub enum TracerError {
    /// Starting the child process failed.
    #[error("failed to start traced child: {0}")]
    Spawn(#[source] io::Error),

    /// A `ptrace` request to the kernel failed.
    #[error("ptrace request failed: {0}")]
    Ptrace(#[source] Errno),

    /// `waitpid` on the tracee failed.
    #[error("wait on tracee failed: {0}")]
    Wait(#[source] Errno),

    /// The wait status reported something this crate has no mapping for (e.g. the tracee was
    /// stopped by a signal we don't know how to resume from safely).
    #[error("unexpected wait status for tracee: {0}")]
    UnexpectedWaitStatus(String),
}

impl From<Errno> for TracerError {
    fn from(e: Errno) -> Self {
        TracerError::Ptrace(e)
    }
}
