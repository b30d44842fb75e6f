use crate::pte::PageTableEntry;

/// Process identifier. Monotonically assigned from 1 and never reused
/// (spec.md §3).
pub type Pid = u32;

/// Coarse scheduling state of a process (spec.md §3).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessState {
    New,
    Ready,
    Running,
    Waiting,
    Terminated,
}

/// Why a process left the terminated set's lifecycle. Recorded verbatim in
/// the terminated PCB and in the matching `TERMINATE` event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TerminationReason {
    /// Ran its instruction count down to zero (spec.md §4.5.6).
    Completed,
    /// Admission computed a zero-page process (spec.md §7).
    NoPages,
    /// `force_terminate` was called by the driver.
    Forced,
}

impl std::fmt::Display for TerminationReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            TerminationReason::Completed => "completed",
            TerminationReason::NoPages => "no pages",
            TerminationReason::Forced => "forced",
        };
        write!(f, "{s}")
    }
}

/// Process control block: identity, bookkeeping, and the page table backing
/// its address space (spec.md §3).
#[derive(Debug, Clone)]
pub struct Pcb {
    pub pid: Pid,
    pub name: String,
    pub size_kb: u64,
    pub priority: u8,
    pub total_instructions: u64,
    pub remaining_instructions: u64,
    pub state: ProcessState,
    pub page_table: Vec<PageTableEntry>,
    pub termination_reason: Option<TerminationReason>,
}

impl Pcb {
    pub fn new(
        pid: Pid,
        name: String,
        size_kb: u64,
        priority: u8,
        total_instructions: u64,
        page_count: usize,
    ) -> Pcb {
        Pcb {
            pid,
            name,
            size_kb,
            priority,
            total_instructions,
            remaining_instructions: total_instructions,
            state: ProcessState::New,
            page_table: vec![PageTableEntry::unmapped(); page_count],
            termination_reason: None,
        }
    }

    pub fn page_count(&self) -> usize {
        self.page_table.len()
    }
}

/// Computes `ceil(size_kb / page_kb)`, the fixed page count of a process
/// (spec.md §3). `page_kb` is assumed to already be at least 1.
pub fn page_count_for(size_kb: u64, page_kb: u64) -> usize {
    (if size_kb == 0 {
        0
    } else {
        (size_kb + page_kb - 1) / page_kb
    }) as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_count_rounds_up() {
        assert_eq!(page_count_for(768, 256), 3);
        assert_eq!(page_count_for(1, 256), 1);
        assert_eq!(page_count_for(0, 256), 0);
    }
}
