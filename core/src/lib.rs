//! A demand-paged virtual memory simulator: RAM frames, a swap area,
//! pluggable victim-selection policies, a TLB, and a process registry
//! driven one scheduling tick at a time.
//!
//! This crate is the deterministic simulation core. It does no file I/O
//! and prints nothing; the only source of non-determinism is `tick()`'s
//! own internally-seeded RNG, used to decide random process arrivals and
//! to pick which page of the running process gets referenced. Everything
//! else — config file parsing, a driver loop, console rendering — lives
//! in the `pagesim-cli` front end built on top of this crate.
//!
//! # Usage
//!
//! ```
//! use pagesim_core::{CoreConfig, PagingEngine, PolicyKind};
//!
//! let config = CoreConfig::simple(1024, 1024, 256, PolicyKind::Fifo, false, 0);
//! let mut engine = PagingEngine::new(config, 42);
//! let pid = engine.admit("demo", 512, 1, 100);
//! engine.access(pid, 0);
//! let snap = engine.snapshot();
//! assert_eq!(snap.metrics.total_accesses, 1);
//! ```

mod config;
mod engine;
mod error;
mod event;
mod frame;
mod metrics;
mod pcb;
mod policy;
mod pte;
mod registry;
mod snapshot;
mod swap;
mod tlb;

pub use config::{CoreConfig, PolicyKind};
pub use engine::{AccessOutcome, PagingEngine, TickOutcome};
pub use error::{SimError, SimResult};
pub use event::{Event, EventCategory};
pub use metrics::Metrics;
pub use pcb::{Pcb, Pid, ProcessState, TerminationReason};
pub use pte::{PageTableEntry, Residency};
pub use snapshot::{FrameSummary, PcbSummary, SlotSummary, Snapshot};
