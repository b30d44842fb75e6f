use crate::metrics::Metrics;
use crate::pcb::{Pid, ProcessState};

/// One frame's worth of information in a `Snapshot` (spec.md §6).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameSummary {
    Empty,
    Occupied { pid: Pid, page: usize },
}

/// One slot's worth of information in a `Snapshot`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotSummary {
    Empty,
    Occupied { pid: Pid, page: usize },
}

/// A condensed view of one PCB for `Snapshot::processes`.
#[derive(Debug, Clone)]
pub struct PcbSummary {
    pub pid: Pid,
    pub name: String,
    pub state: ProcessState,
    pub page_count: usize,
    pub resident_pages: usize,
    pub swapped_pages: usize,
    pub remaining_instructions: u64,
}

/// An immutable view of the engine's state at one instant: frames, slots,
/// PCB summaries, TLB contents, and metrics (spec.md §6).
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub frames: Vec<FrameSummary>,
    pub slots: Vec<SlotSummary>,
    pub processes: Vec<PcbSummary>,
    pub tlb_entries: Vec<(Pid, usize, usize)>,
    pub metrics: Metrics,
}

impl Snapshot {
    pub fn frames_used(&self) -> usize {
        self.frames
            .iter()
            .filter(|f| matches!(f, FrameSummary::Occupied { .. }))
            .count()
    }

    /// `0.0` when RAM has zero frames, matching the page-fault-rate
    /// convention of never dividing by zero.
    pub fn ram_utilization(&self) -> f64 {
        if self.frames.is_empty() {
            0.0
        } else {
            self.frames_used() as f64 / self.frames.len() as f64
        }
    }
}
