/// Which replacement strategy a run uses. Chosen once at construction and
/// immutable for the life of the engine (spec.md §4.2).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolicyKind {
    Fifo,
    Lru,
    Clock,
}

impl PolicyKind {
    /// Parses the `replacement` configuration key. Case-insensitive;
    /// unknown values degrade to FIFO per spec.md §6.
    pub fn from_config_str(s: &str) -> PolicyKind {
        match s.to_ascii_uppercase().as_str() {
            "LRU" => PolicyKind::Lru,
            "CLOCK" => PolicyKind::Clock,
            "FIFO" => PolicyKind::Fifo,
            _ => PolicyKind::Fifo,
        }
    }
}

/// The already-validated configuration the paging core is constructed from.
/// Everything here has been range-checked and converted from raw
/// configuration keys by the front end; the core itself does no file I/O
/// and no clamping (spec.md §1's front-end/core split).
#[derive(Debug, Clone)]
pub struct CoreConfig {
    /// Number of RAM frames: `ram_kb / page_kb`, floored.
    pub num_frames: usize,
    /// Number of swap slots: `swap_kb / page_kb`, floored.
    pub num_slots: usize,
    /// Uniform page/frame/slot size in KB. Only used to compute page counts
    /// for admitted processes; the core stores no byte-level payloads.
    pub page_kb: u64,
    /// Victim-selection strategy.
    pub policy: PolicyKind,
    /// Whether the TLB is consulted at all.
    pub tlb_enabled: bool,
    /// TLB capacity when enabled. Ignored when `tlb_enabled` is false.
    pub tlb_size: usize,
    /// Probability in `[0, 1]` that `tick()` auto-admits a randomly
    /// generated process.
    pub arrival_prob: f64,
    /// Upper bound (inclusive) on the size, in KB, of a `tick()`-generated
    /// process.
    pub max_random_proc_mem_kb: u64,
    /// Upper bound (inclusive) on the instruction count of a
    /// `tick()`-generated process.
    pub max_random_instr: u64,
}

impl CoreConfig {
    /// Computes `ram_kb / page_kb` and `swap_kb / page_kb`, each floored to
    /// zero when `page_kb` exceeds the corresponding store size (spec.md
    /// boundary behavior B1).
    #[allow(clippy::too_many_arguments)]
    pub fn from_kb(
        ram_kb: u64,
        swap_kb: u64,
        page_kb: u64,
        policy: PolicyKind,
        tlb_enabled: bool,
        tlb_size: usize,
        arrival_prob: f64,
        max_random_proc_mem_kb: u64,
        max_random_instr: u64,
    ) -> CoreConfig {
        let page_kb = page_kb.max(1);
        CoreConfig {
            num_frames: (ram_kb / page_kb) as usize,
            num_slots: (swap_kb / page_kb) as usize,
            page_kb,
            policy,
            tlb_enabled,
            tlb_size,
            arrival_prob: arrival_prob.clamp(0.0, 1.0),
            max_random_proc_mem_kb,
            max_random_instr,
        }
    }

    /// Convenience constructor for tests and demos that don't care about
    /// the random-arrival machinery of `tick()`.
    pub fn simple(
        ram_kb: u64,
        swap_kb: u64,
        page_kb: u64,
        policy: PolicyKind,
        tlb_enabled: bool,
        tlb_size: usize,
    ) -> CoreConfig {
        CoreConfig::from_kb(
            ram_kb,
            swap_kb,
            page_kb,
            policy,
            tlb_enabled,
            tlb_size,
            0.0,
            0,
            0,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_replacement_degrades_to_fifo() {
        assert_eq!(PolicyKind::from_config_str("banana"), PolicyKind::Fifo);
        assert_eq!(PolicyKind::from_config_str("lru"), PolicyKind::Lru);
        assert_eq!(PolicyKind::from_config_str("CLOCK"), PolicyKind::Clock);
    }

    #[test]
    fn page_larger_than_ram_yields_zero_frames() {
        let cfg = CoreConfig::simple(256, 512, 1024, PolicyKind::Fifo, false, 0);
        assert_eq!(cfg.num_frames, 0);
    }

    #[test]
    fn arrival_prob_is_clamped_to_unit_interval() {
        let cfg = CoreConfig::from_kb(256, 256, 256, PolicyKind::Fifo, false, 0, 4.0, 10, 10);
        assert_eq!(cfg.arrival_prob, 1.0);
    }
}
