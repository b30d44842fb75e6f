use std::fs;
use std::path::Path;

use pagesim_core::{CoreConfig, PolicyKind};
use serde::Deserialize;

/// Raw, on-disk shape of the configuration surface of spec.md §6. Every
/// field is optional so a config file only needs to override what it
/// cares about; `Config::validate` fills in defaults and clamps the rest.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    pub ram_kb: u64,
    pub swap_kb: u64,
    pub page_kb: u64,
    pub replacement: String,
    pub tlb_enabled: bool,
    pub tlb_size: usize,
    pub arrival_prob: f64,
    pub max_random_proc_mem_kb: u64,
    pub max_random_instr: u64,
}

impl Default for Config {
    fn default() -> Config {
        Config {
            ram_kb: 4096,
            swap_kb: 4096,
            page_kb: 256,
            replacement: "FIFO".to_string(),
            tlb_enabled: true,
            tlb_size: 4,
            arrival_prob: 0.1,
            max_random_proc_mem_kb: 1024,
            max_random_instr: 50,
        }
    }
}

impl Config {
    /// Reads and parses a TOML config file. Missing keys fall back to
    /// `Config::default()`'s values.
    pub fn load(path: &Path) -> Result<Config, String> {
        let text = fs::read_to_string(path).map_err(|e| format!("reading {}: {e}", path.display()))?;
        toml::from_str(&text).map_err(|e| format!("parsing {}: {e}", path.display()))
    }

    /// Turns the raw, possibly-malformed file contents into the validated
    /// `CoreConfig` the paging engine is constructed from. Out-of-range
    /// values are corrected rather than rejected, each logged once
    /// (spec.md §6's `replacement`/`arrival_prob` degrade-not-fail rules).
    pub fn into_core_config(self) -> CoreConfig {
        let policy = PolicyKind::from_config_str(&self.replacement);
        if policy == PolicyKind::Fifo && !self.replacement.eq_ignore_ascii_case("fifo") {
            log::warn!("unknown replacement policy {:?}, degrading to FIFO", self.replacement);
        }

        let arrival_prob = self.arrival_prob.clamp(0.0, 1.0);
        if (arrival_prob - self.arrival_prob).abs() > f64::EPSILON {
            log::warn!(
                "arrival_prob {} outside [0, 1], clamped to {}",
                self.arrival_prob,
                arrival_prob
            );
        }

        CoreConfig::from_kb(
            self.ram_kb,
            self.swap_kb,
            self.page_kb,
            policy,
            self.tlb_enabled,
            self.tlb_size,
            arrival_prob,
            self.max_random_proc_mem_kb,
            self.max_random_instr,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_produce_a_usable_core_config() {
        let cfg = Config::default().into_core_config();
        assert!(cfg.num_frames > 0);
        assert!(cfg.num_slots > 0);
    }

    #[test]
    fn unknown_replacement_degrades_without_erroring() {
        let cfg = Config {
            replacement: "banana".to_string(),
            ..Config::default()
        };
        assert_eq!(cfg.into_core_config().policy, PolicyKind::Fifo);
    }

    #[test]
    fn out_of_range_arrival_prob_is_clamped() {
        let cfg = Config {
            arrival_prob: 5.0,
            ..Config::default()
        };
        assert_eq!(cfg.into_core_config().arrival_prob, 1.0);
    }
}
