/// Counters reported by `snapshot()` (spec.md §6).
#[derive(Debug, Clone, Copy, Default)]
pub struct Metrics {
    pub total_accesses: u64,
    pub total_faults: u64,
    pub swap_ins: u64,
    pub swap_outs: u64,
    pub ticks: u64,
}

impl Metrics {
    pub fn new() -> Metrics {
        Metrics::default()
    }

    /// `faults / accesses`, defined as `0.0` when there have been no
    /// accesses yet (spec.md §6).
    pub fn page_fault_rate(&self) -> f64 {
        if self.total_accesses == 0 {
            0.0
        } else {
            self.total_faults as f64 / self.total_accesses as f64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fault_rate_is_zero_with_no_accesses() {
        let m = Metrics::new();
        assert_eq!(m.page_fault_rate(), 0.0);
    }

    #[test]
    fn fault_rate_divides_faults_by_accesses() {
        let m = Metrics {
            total_accesses: 4,
            total_faults: 1,
            ..Metrics::default()
        };
        assert_eq!(m.page_fault_rate(), 0.25);
    }
}
