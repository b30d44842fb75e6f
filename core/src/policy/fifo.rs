use std::collections::VecDeque;

use crate::frame::FrameStore;

/// Oldest-load-wins replacement. Maintains its own queue of occupied frames
/// in load order, independent of the frame store's free-frame queue
/// (spec.md §4.2).
#[derive(Debug, Default)]
pub struct FifoPolicy {
    queue: VecDeque<usize>,
}

impl FifoPolicy {
    pub fn new() -> FifoPolicy {
        FifoPolicy::default()
    }

    pub fn on_load(&mut self, frame: usize, _frames: &mut FrameStore, _tick: u64) {
        self.queue.push_back(frame);
    }

    pub fn on_access(&mut self, _frame: usize, _frames: &mut FrameStore, _tick: u64) {
        // FIFO ignores access recency entirely.
    }

    /// Removes `frame` from the queue wherever it sits. Termination can
    /// release a frame that is not at the head, so this is a linear scan
    /// rather than an unconditional `pop_front`.
    pub fn on_evict(&mut self, frame: usize) {
        if let Some(pos) = self.queue.iter().position(|&f| f == frame) {
            self.queue.remove(pos);
        }
    }

    /// Returns the head of the load-order queue without removing it. The
    /// caller is responsible for calling `on_evict` once the eviction
    /// actually happens (spec.md §9, unified victim-selection contract).
    pub fn select_victim(&mut self, _frames: &mut FrameStore) -> Option<usize> {
        self.queue.front().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn victim_is_oldest_load() {
        let mut frames = FrameStore::new(3);
        let mut p = FifoPolicy::new();
        p.on_load(0, &mut frames, 0);
        p.on_load(1, &mut frames, 1);
        p.on_load(2, &mut frames, 2);
        assert_eq!(p.select_victim(&mut frames), Some(0));
    }

    #[test]
    fn evict_mid_queue_does_not_disturb_order() {
        let mut frames = FrameStore::new(3);
        let mut p = FifoPolicy::new();
        p.on_load(0, &mut frames, 0);
        p.on_load(1, &mut frames, 1);
        p.on_load(2, &mut frames, 2);
        p.on_evict(1);
        assert_eq!(p.select_victim(&mut frames), Some(0));
        p.on_evict(0);
        assert_eq!(p.select_victim(&mut frames), Some(2));
    }
}
