//! Pluggable victim-selection strategies over occupied RAM frames.
//!
//! The three strategies share a four-operation contract (`on_load`,
//! `on_access`, `on_evict`, `select_victim`) but are modeled as a tagged
//! enum rather than a trait object (spec.md §9, "Policy as variant"): the
//! policy is chosen once at construction and is immutable for a run, so
//! there is no need to pay for dynamic dispatch or to support mixing
//! strategies within one engine.

mod clock;
mod fifo;
mod lru;

pub use clock::ClockPolicy;
pub use fifo::FifoPolicy;
pub use lru::LruPolicy;

use crate::config::PolicyKind;
use crate::frame::FrameStore;

#[derive(Debug)]
pub enum ReplacementPolicy {
    Fifo(FifoPolicy),
    Lru(LruPolicy),
    Clock(ClockPolicy),
}

impl ReplacementPolicy {
    pub fn new(kind: PolicyKind) -> ReplacementPolicy {
        match kind {
            PolicyKind::Fifo => ReplacementPolicy::Fifo(FifoPolicy::new()),
            PolicyKind::Lru => ReplacementPolicy::Lru(LruPolicy::new()),
            PolicyKind::Clock => ReplacementPolicy::Clock(ClockPolicy::new()),
        }
    }

    /// Called whenever a page is placed into `frame`, whether by
    /// admission, a fault, or a swap-in.
    pub fn on_load(&mut self, frame: usize, frames: &mut FrameStore, tick: u64) {
        match self {
            ReplacementPolicy::Fifo(p) => p.on_load(frame, frames, tick),
            ReplacementPolicy::Lru(p) => p.on_load(frame, frames, tick),
            ReplacementPolicy::Clock(p) => p.on_load(frame, frames, tick),
        }
    }

    /// Called on every resident access, whether served by the TLB or the
    /// page table.
    pub fn on_access(&mut self, frame: usize, frames: &mut FrameStore, tick: u64) {
        match self {
            ReplacementPolicy::Fifo(p) => p.on_access(frame, frames, tick),
            ReplacementPolicy::Lru(p) => p.on_access(frame, frames, tick),
            ReplacementPolicy::Clock(p) => p.on_access(frame, frames, tick),
        }
    }

    /// Called when `frame` becomes free for any reason: eviction or
    /// process termination.
    pub fn on_evict(&mut self, frame: usize) {
        match self {
            ReplacementPolicy::Fifo(p) => p.on_evict(frame),
            ReplacementPolicy::Lru(p) => p.on_evict(frame),
            ReplacementPolicy::Clock(p) => p.on_evict(frame),
        }
    }

    /// Returns an occupied frame to be evicted, without mutating the
    /// free/occupied state of that frame (spec.md §9: selection and
    /// free-queue updates must not be interleaved). Only meaningful when
    /// no free frame exists; the caller still must check for `None`,
    /// which can happen if RAM has zero frames.
    pub fn select_victim(&mut self, frames: &mut FrameStore) -> Option<usize> {
        match self {
            ReplacementPolicy::Fifo(p) => p.select_victim(frames),
            ReplacementPolicy::Lru(p) => p.select_victim(frames),
            ReplacementPolicy::Clock(p) => p.select_victim(frames),
        }
    }
}
