use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::CoreConfig;
use crate::error::{SimError, SimResult};
use crate::event::{EventCategory, EventLog};
use crate::frame::{FrameStore, ResidentPage};
use crate::metrics::Metrics;
use crate::pcb::{page_count_for, Pcb, Pid, TerminationReason};
use crate::policy::ReplacementPolicy;
use crate::pte::{PageTableEntry, Residency};
use crate::registry::Registry;
use crate::snapshot::{FrameSummary, PcbSummary, SlotSummary, Snapshot};
use crate::swap::{SwapStore, SwappedPage};
use crate::tlb::Tlb;

/// Result of a single `access()` call (spec.md §6). A total enumeration:
/// the core never panics its way out of a bad access, it reports one of
/// these four outcomes and lets the caller decide what to do (spec.md §7).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessOutcome {
    /// Resolved without a fault: TLB hit or resident page-table hit.
    Hit,
    /// Resolved after a page fault: the page had to be loaded from swap or
    /// initialized fresh.
    HitAfterFault,
    /// `pid` is unknown, or `page` is outside the process's page table.
    Invalid,
    /// The access faulted but could not be serviced: no free frame and no
    /// free swap slot to make room for one.
    FaultUnresolved,
}

/// What happened during one `tick()` call, for a driver that wants to
/// report on it without re-deriving it from the event log.
#[derive(Debug, Clone, Copy)]
pub struct TickOutcome {
    pub admitted: Option<Pid>,
    pub promoted: Option<Pid>,
    pub accessed: Option<(Pid, usize, AccessOutcome)>,
    pub completed: Option<Pid>,
}

/// The paging engine: the orchestrator tying together the frame store,
/// swap store, replacement policy, registry, and TLB (spec.md §4.5).
///
/// Every public method here is a single atomic step with respect to the
/// invariants of spec.md §3: it either leaves every invariant restored, or
/// it reports failure without partially mutating cross-component state
/// (spec.md §5).
pub struct PagingEngine {
    config: CoreConfig,
    frames: FrameStore,
    swap: SwapStore,
    policy: ReplacementPolicy,
    registry: Registry,
    tlb: Tlb,
    metrics: Metrics,
    event_log: EventLog,
    access_clock: u64,
    rng: StdRng,
}

impl PagingEngine {
    pub fn new(config: CoreConfig, seed: u64) -> PagingEngine {
        let tlb_size = if config.tlb_enabled { config.tlb_size } else { 0 };
        PagingEngine {
            frames: FrameStore::new(config.num_frames),
            swap: SwapStore::new(config.num_slots),
            policy: ReplacementPolicy::new(config.policy),
            registry: Registry::new(),
            tlb: Tlb::new(tlb_size),
            metrics: Metrics::new(),
            event_log: EventLog::new(),
            access_clock: 0,
            rng: StdRng::seed_from_u64(seed),
            config,
        }
    }

    fn log(&mut self, category: EventCategory, message: impl Into<String>) {
        let tick = self.metrics.ticks;
        self.event_log.push(tick, category, message);
    }

    /// Looks up `pid`, yielding `SimError::UnknownPid` on a miss. The sole
    /// point of truth for "does this PID exist" across `access`, `suspend`,
    /// `resume`, and `force_terminate` (spec.md §7 "invalid operand").
    fn resolve(&self, pid: Pid) -> SimResult<&Pcb> {
        self.registry.lookup(pid).ok_or(SimError::UnknownPid(pid))
    }

    // ---- 4.5.1 Admission -------------------------------------------------

    /// Admits a new process. Always succeeds in the sense of returning a
    /// valid PID; a process may begin life partly in RAM and partly in
    /// swap, and partial placement failure never aborts admission
    /// (spec.md §4.5.1).
    pub fn admit(&mut self, name: impl Into<String>, size_kb: u64, priority: u8, instructions: u64) -> Pid {
        let pid = self.registry.allocate_pid();
        let name = name.into();
        let page_count = page_count_for(size_kb, self.config.page_kb);
        let pcb = Pcb::new(pid, name.clone(), size_kb, priority, instructions, page_count);

        self.registry.enqueue_ready(pcb);
        self.log(
            EventCategory::Admit,
            format!("pid {pid} ({name}) admitted, {page_count} pages"),
        );

        if page_count == 0 {
            log::warn!("{}", SimError::ZeroPageProcess);
            self.terminate_internal(pid, TerminationReason::NoPages);
            return pid;
        }

        for page in 0..page_count {
            self.place_new_page(pid, page);
        }

        pid
    }

    /// Places one brand-new logical page of an already-registered process
    /// (spec.md §4.5.1, steps 1-2).
    ///
    /// Admission never evicts another resident page to make room: the
    /// worked end-to-end scenarios of spec.md §8 (e.g. "Basic
    /// fault-and-swap", "CLOCK second chance") place admission overflow
    /// directly in swap and only trigger real eviction later, during the
    /// fault path of `access()`. Taken literally, §4.5.1's prose describes
    /// admission calling `select_victim`/evicting before ever falling back
    /// to swap — but every literal-value scenario in §8 requires the
    /// opposite priority. This implementation follows the worked
    /// scenarios; see DESIGN.md for the resolution.
    fn place_new_page(&mut self, pid: Pid, page: usize) {
        let tick = self.metrics.ticks;

        match self.frames.acquire() {
            Some(frame) => self.load_into_frame(pid, page, frame, tick),
            None => self.place_directly_in_swap(pid, page, tick),
        }
    }

    fn load_into_frame(&mut self, pid: Pid, page: usize, frame: usize, tick: u64) {
        self.frames.place(
            frame,
            ResidentPage {
                pid,
                page,
                loaded_at: tick,
                last_access: self.access_clock,
                referenced: false,
            },
        );
        self.policy.on_load(frame, &mut self.frames, self.access_clock);
        if let Some(pcb) = self.registry.lookup_mut(pid) {
            pcb.page_table[page] = PageTableEntry {
                residency: Residency::Resident { frame },
                last_access: self.access_clock,
            };
        }
        self.tlb.insert(pid, page, frame);
        self.log(
            EventCategory::Load,
            format!("pid {pid} page {page} loaded into frame {frame}"),
        );
    }

    /// Fallback of spec.md §4.5.1 step 2: RAM is exhausted and no victim
    /// can be produced (or eviction itself failed for lack of a swap
    /// slot). Stores the page directly in swap if a slot is free;
    /// otherwise the PTE remains Unmapped and the failure is logged.
    fn place_directly_in_swap(&mut self, pid: Pid, page: usize, tick: u64) {
        match self.swap.acquire() {
            Some(slot) => {
                self.swap.place(slot, SwappedPage { pid, page, stored_at: tick });
                if let Some(pcb) = self.registry.lookup_mut(pid) {
                    pcb.page_table[page] = PageTableEntry {
                        residency: Residency::Swapped { slot },
                        last_access: self.access_clock,
                    };
                }
                self.metrics.swap_outs += 1;
                self.log(
                    EventCategory::SwapOut,
                    format!("pid {pid} page {page} placed directly in swap slot {slot}"),
                );
            }
            None => {
                let e = SimError::Exhausted("no free frame or swap slot");
                log::warn!("pid {pid} page {page}: {e}");
                self.log(EventCategory::Error, format!("pid {pid} page {page}: {e}"));
            }
        }
    }

    // ---- 4.5.2 Eviction ----------------------------------------------

    /// Evicts the page currently resident in `frame`, writing it to a
    /// free swap slot. Fails (leaving the frame resident) if no swap slot
    /// is free (spec.md §4.5.2).
    fn evict_frame(&mut self, frame: usize) -> Result<(), ()> {
        let resident = *self
            .frames
            .get(frame)
            .expect("evict_frame called on an empty frame");

        let Some(slot) = self.swap.acquire() else {
            log::warn!("eviction of frame {frame} failed: no free swap slot");
            self.log(
                EventCategory::Error,
                format!("eviction of frame {frame} failed: no free swap slot"),
            );
            return Err(());
        };

        self.swap.place(
            slot,
            SwappedPage {
                pid: resident.pid,
                page: resident.page,
                stored_at: self.metrics.ticks,
            },
        );
        if let Some(pcb) = self.registry.lookup_mut(resident.pid) {
            pcb.page_table[resident.page] = PageTableEntry {
                residency: Residency::Swapped { slot },
                last_access: resident.last_access,
            };
        }
        self.frames.release(frame);
        self.policy.on_evict(frame);
        self.tlb.invalidate_frame(frame);
        self.metrics.swap_outs += 1;

        self.log(
            EventCategory::SwapOut,
            format!(
                "pid {} page {} evicted from frame {frame} to slot {slot}",
                resident.pid, resident.page
            ),
        );
        self.log(EventCategory::Evict, format!("frame {frame} freed"));
        Ok(())
    }

    /// Produces a free frame by any means necessary: an already-free
    /// frame, or a victim evicted on the spot. Returns `None` only when
    /// both RAM and swap are exhausted. The frame is guaranteed acquired
    /// (not just selected) before this returns, satisfying spec.md §5's
    /// requirement that the output frame of an eviction-during-fault be
    /// acquired before the faulting page's PTE is committed.
    fn obtain_free_frame(&mut self) -> Option<usize> {
        if let Some(frame) = self.frames.acquire() {
            return Some(frame);
        }
        let victim = self.policy.select_victim(&mut self.frames)?;
        match self.evict_frame(victim) {
            Ok(()) => self.frames.acquire(),
            Err(()) => None,
        }
    }

    // ---- 4.5.3 Page-fault service --------------------------------------

    /// Resolves one memory reference to `page` of `pid` (spec.md §4.5.3).
    /// Advances the access clock by one on every call, including ones
    /// that return `Invalid`.
    pub fn access(&mut self, pid: Pid, page: usize) -> AccessOutcome {
        self.access_clock += 1;
        let clock = self.access_clock;
        let tick = self.metrics.ticks;

        if let Err(e) = self.resolve(pid) {
            self.log(EventCategory::Error, format!("access: {e}"));
            return AccessOutcome::Invalid;
        }

        if self.tlb.is_enabled() {
            if let Some(frame) = self.tlb.lookup(pid, page) {
                if let Some(rp) = self.frames.get_mut(frame) {
                    rp.last_access = clock;
                    rp.referenced = true;
                }
                self.policy.on_access(frame, &mut self.frames, clock);
                self.metrics.total_accesses += 1;
                return AccessOutcome::Hit;
            }
        }

        let page_count = self.resolve(pid).expect("checked above").page_count();
        if page >= page_count {
            let e = SimError::PageOutOfRange { pid, page, page_count };
            self.log(EventCategory::Error, format!("access: {e}"));
            return AccessOutcome::Invalid;
        }

        self.metrics.total_accesses += 1;
        let residency = self.resolve(pid).expect("checked above").page_table[page].residency;

        match residency {
            Residency::Resident { frame } => {
                if let Some(rp) = self.frames.get_mut(frame) {
                    rp.last_access = clock;
                    rp.referenced = true;
                }
                self.policy.on_access(frame, &mut self.frames, clock);
                if let Some(pcb) = self.registry.lookup_mut(pid) {
                    pcb.page_table[page].last_access = clock;
                }
                self.tlb.insert(pid, page, frame);
                AccessOutcome::Hit
            }
            Residency::Swapped { slot } => {
                self.metrics.total_faults += 1;
                self.log(EventCategory::Fault, format!("pid {pid} page {page} fault (swapped)"));

                match self.obtain_free_frame() {
                    Some(frame) => {
                        self.swap.release(slot);
                        self.frames.place(
                            frame,
                            ResidentPage {
                                pid,
                                page,
                                loaded_at: tick,
                                last_access: clock,
                                referenced: false,
                            },
                        );
                        self.policy.on_load(frame, &mut self.frames, clock);
                        if let Some(pcb) = self.registry.lookup_mut(pid) {
                            pcb.page_table[page] = PageTableEntry {
                                residency: Residency::Resident { frame },
                                last_access: clock,
                            };
                        }
                        self.metrics.swap_ins += 1;
                        self.tlb.insert(pid, page, frame);
                        self.log(
                            EventCategory::SwapIn,
                            format!("pid {pid} page {page} swapped in from slot {slot} to frame {frame}"),
                        );
                        AccessOutcome::HitAfterFault
                    }
                    None => {
                        let e = SimError::Exhausted("no free frame or swap slot");
                        self.log(EventCategory::Error, format!("pid {pid} page {page}: {e}"));
                        AccessOutcome::FaultUnresolved
                    }
                }
            }
            Residency::Unmapped => {
                self.metrics.total_faults += 1;
                self.log(EventCategory::Fault, format!("pid {pid} page {page} fault (unmapped)"));

                match self.obtain_free_frame() {
                    Some(frame) => {
                        self.frames.place(
                            frame,
                            ResidentPage {
                                pid,
                                page,
                                loaded_at: tick,
                                last_access: clock,
                                referenced: false,
                            },
                        );
                        self.policy.on_load(frame, &mut self.frames, clock);
                        if let Some(pcb) = self.registry.lookup_mut(pid) {
                            pcb.page_table[page] = PageTableEntry {
                                residency: Residency::Resident { frame },
                                last_access: clock,
                            };
                        }
                        self.tlb.insert(pid, page, frame);
                        self.log(
                            EventCategory::Load,
                            format!("pid {pid} page {page} loaded fresh into frame {frame}"),
                        );
                        AccessOutcome::HitAfterFault
                    }
                    None => {
                        let e = SimError::Exhausted("no free frame or swap slot");
                        self.log(EventCategory::Error, format!("pid {pid} page {page}: {e}"));
                        AccessOutcome::FaultUnresolved
                    }
                }
            }
        }
    }

    // ---- 4.5.4 Termination ---------------------------------------------

    /// Requests termination of `pid`. Unknown PIDs are logged, not raised
    /// (spec.md §6).
    pub fn force_terminate(&mut self, pid: Pid) {
        if !self.terminate_internal(pid, TerminationReason::Forced) {
            log::warn!("force_terminate: {}", SimError::UnknownPid(pid));
        }
    }

    fn terminate_internal(&mut self, pid: Pid, reason: TerminationReason) -> bool {
        let Some(pcb) = self.registry.take_for_termination(pid) else {
            return false;
        };

        for pte in &pcb.page_table {
            match pte.residency {
                Residency::Resident { frame } => {
                    self.frames.release(frame);
                    self.policy.on_evict(frame);
                }
                Residency::Swapped { slot } => {
                    self.swap.release(slot);
                }
                Residency::Unmapped => {}
            }
        }
        self.tlb.invalidate_pid(pid);

        self.log(EventCategory::Terminate, format!("pid {pid} terminated ({reason})"));
        self.registry.file_terminated(pcb, reason);
        true
    }

    // ---- 4.5.5 Suspend / resume -----------------------------------------

    /// Pure queue movement; the engine does not reclaim frames or slots
    /// on suspend (spec.md §4.5.5).
    pub fn suspend(&mut self, pid: Pid) {
        if self.registry.suspend(pid) {
            self.log(EventCategory::State, format!("pid {pid} suspended"));
        } else {
            log::warn!("suspend: {} (or not in a suspendable state)", SimError::UnknownPid(pid));
        }
    }

    pub fn resume(&mut self, pid: Pid) {
        if self.registry.resume(pid) {
            self.log(EventCategory::State, format!("pid {pid} resumed"));
        } else {
            log::warn!("resume: {} (or not waiting)", SimError::UnknownPid(pid));
        }
    }

    // ---- 4.5.6 Scheduling tick -------------------------------------------

    /// Advances the tick counter, optionally admits a randomly generated
    /// process per `arrival_prob`, ensures a RUNNING process, and
    /// simulates one reference to a uniformly random page of the running
    /// PCB (spec.md §4.5.6). Decrements the running PCB's remaining
    /// instruction count and terminates it normally at zero.
    pub fn tick(&mut self) -> TickOutcome {
        self.metrics.ticks += 1;

        let mut admitted = None;
        if self.config.arrival_prob > 0.0 && self.rng.gen::<f64>() < self.config.arrival_prob {
            let max_mem = self.config.max_random_proc_mem_kb.max(1);
            let max_instr = self.config.max_random_instr.max(1);
            let size_kb = self.rng.gen_range(1..=max_mem);
            let instructions = self.rng.gen_range(1..=max_instr);
            let tick = self.metrics.ticks;
            let pid = self.admit(format!("auto-{tick}"), size_kb, 1, instructions);
            admitted = Some(pid);
        }

        let promoted = self.registry.ensure_running();
        if let Some(pid) = promoted {
            self.log(EventCategory::State, format!("pid {pid} promoted to running"));
        }

        let mut accessed = None;
        let mut completed = None;
        if let Some(running_pid) = self.registry.running_pid() {
            let page_count = self
                .registry
                .lookup(running_pid)
                .map(|p| p.page_count())
                .unwrap_or(0);
            if page_count > 0 {
                let page = self.rng.gen_range(0..page_count);
                let outcome = self.access(running_pid, page);
                accessed = Some((running_pid, page, outcome));

                if let Some(pcb) = self.registry.running_mut() {
                    if pcb.remaining_instructions > 0 {
                        pcb.remaining_instructions -= 1;
                    }
                    if pcb.remaining_instructions == 0 {
                        completed = Some(running_pid);
                    }
                }
                if completed.is_some() {
                    self.terminate_internal(running_pid, TerminationReason::Completed);
                }
            }
        }

        TickOutcome {
            admitted,
            promoted,
            accessed,
            completed,
        }
    }

    // ---- Introspection -----------------------------------------------

    pub fn snapshot(&self) -> Snapshot {
        let frames = self
            .frames
            .iter()
            .map(|(_, page)| match page {
                Some(p) => FrameSummary::Occupied { pid: p.pid, page: p.page },
                None => FrameSummary::Empty,
            })
            .collect();

        let slots = (0..self.swap.len())
            .map(|i| match self.swap.get(i) {
                Some(p) => SlotSummary::Occupied { pid: p.pid, page: p.page },
                None => SlotSummary::Empty,
            })
            .collect();

        let processes = self
            .registry
            .all()
            .map(|pcb| PcbSummary {
                pid: pcb.pid,
                name: pcb.name.clone(),
                state: pcb.state,
                page_count: pcb.page_count(),
                resident_pages: pcb.page_table.iter().filter(|pte| pte.is_resident()).count(),
                swapped_pages: pcb.page_table.iter().filter(|pte| pte.is_swapped()).count(),
                remaining_instructions: pcb.remaining_instructions,
            })
            .collect();

        let tlb_entries = self.tlb.entries().collect();

        Snapshot {
            frames,
            slots,
            processes,
            tlb_entries,
            metrics: self.metrics,
        }
    }

    pub fn event_log(&self) -> &[crate::event::Event] {
        self.event_log.as_slice()
    }

    pub fn lookup(&self, pid: Pid) -> Option<&Pcb> {
        self.registry.lookup(pid)
    }
}
