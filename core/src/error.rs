use std::fmt;

use crate::pcb::Pid;

/// Common result type of paging-core operations.
pub type SimResult<T> = Result<T, SimError>;

/// Error taxonomy for the paging core. None of these are fatal to the
/// simulator: every public operation returns one of these (or a more
/// specific outcome enum) rather than panicking. See `spec.md` §7.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimError {
    /// A PID was supplied that is not present in the registry.
    UnknownPid(Pid),

    /// `access(pid, page)` was called with `page` outside the process's
    /// page table.
    PageOutOfRange {
        pid: Pid,
        page: usize,
        page_count: usize,
    },

    /// No free frame and no free swap slot were available where one was
    /// required to make progress.
    Exhausted(&'static str),

    /// Admission was requested for a process whose computed page count is
    /// zero. Per spec.md §7 this is "driver misuse"; the caller should
    /// expect the process to be terminated immediately with reason
    /// `"no pages"` rather than placed in READY.
    ZeroPageProcess,

    /// An internal consistency check failed (double-release of a frame or
    /// slot, a PTE disagreeing with the frame it claims to occupy, ...).
    /// Reaching this variant is a bug in the core itself.
    InvariantViolation(String),
}

impl fmt::Display for SimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimError::UnknownPid(pid) => write!(f, "unknown pid {pid}"),
            SimError::PageOutOfRange {
                pid,
                page,
                page_count,
            } => write!(
                f,
                "pid {pid}: page {page} out of range (process has {page_count} pages)"
            ),
            SimError::Exhausted(reason) => write!(f, "exhausted: {reason}"),
            SimError::ZeroPageProcess => write!(f, "process has zero pages"),
            SimError::InvariantViolation(msg) => write!(f, "invariant violation: {msg}"),
        }
    }
}

impl std::error::Error for SimError {}

impl SimError {
    /// Checks a driver-misuse invariant (spec.md §7): double-release of a
    /// frame/slot, or a PTE disagreeing with the frame/slot it claims to
    /// occupy. Panics with this error's message when `cond` is false, but
    /// only in debug builds, matching the crate's other internal
    /// consistency checks.
    #[track_caller]
    pub(crate) fn debug_assert(cond: bool, msg: impl Into<String>) {
        if cfg!(debug_assertions) && !cond {
            panic!("{}", SimError::InvariantViolation(msg.into()));
        }
    }
}
