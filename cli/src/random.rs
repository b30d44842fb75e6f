//! Random process generation for the interactive "admit random process"
//! driver command. This is separate from `PagingEngine::tick()`'s own
//! internal arrival-probability admissions: that randomness belongs to
//! the core's scheduling model (spec.md §4.5.6) and is seeded once at
//! construction, whereas this is a front-end convenience for a human
//! driving the simulator one command at a time.

use pagesim_core::{CoreConfig, Pid};
use rand::Rng;

const NAMES: &[&str] = &["alpha", "bravo", "charlie", "delta", "echo", "foxtrot", "golf", "hotel"];

pub struct RandomProcessGenerator {
    rng: rand::rngs::ThreadRng,
}

impl RandomProcessGenerator {
    pub fn new() -> RandomProcessGenerator {
        RandomProcessGenerator { rng: rand::thread_rng() }
    }

    /// Admits one process with a uniformly random size and instruction
    /// count, bounded by the run's configured maxima.
    pub fn admit_random(&mut self, engine: &mut pagesim_core::PagingEngine, config: &CoreConfig) -> Pid {
        let name = NAMES[self.rng.gen_range(0..NAMES.len())];
        let size_kb = self.rng.gen_range(1..=config.max_random_proc_mem_kb.max(1));
        let instructions = self.rng.gen_range(1..=config.max_random_instr.max(1));
        let priority = self.rng.gen_range(1..=5u8);
        engine.admit(name, size_kb, priority, instructions)
    }
}

impl Default for RandomProcessGenerator {
    fn default() -> RandomProcessGenerator {
        RandomProcessGenerator::new()
    }
}
