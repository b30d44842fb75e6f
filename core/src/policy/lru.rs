use crate::frame::FrameStore;

/// Least-recently-used replacement. No auxiliary structure beyond the
/// `last_access` tick already carried by each resident descriptor
/// (spec.md §4.2).
#[derive(Debug, Default)]
pub struct LruPolicy;

impl LruPolicy {
    pub fn new() -> LruPolicy {
        LruPolicy
    }

    pub fn on_load(&mut self, frame: usize, frames: &mut FrameStore, tick: u64) {
        if let Some(p) = frames.get_mut(frame) {
            p.last_access = tick;
        }
    }

    pub fn on_access(&mut self, frame: usize, frames: &mut FrameStore, tick: u64) {
        if let Some(p) = frames.get_mut(frame) {
            p.last_access = tick;
        }
    }

    pub fn on_evict(&mut self, _frame: usize) {
        // No auxiliary structure to update.
    }

    /// Scans all frames and returns the occupied one with the smallest
    /// `last_access`, lowest index first on ties.
    pub fn select_victim(&mut self, frames: &mut FrameStore) -> Option<usize> {
        frames
            .iter()
            .filter_map(|(idx, page)| page.map(|p| (idx, p.last_access)))
            .min_by_key(|&(idx, last_access)| (last_access, idx))
            .map(|(idx, _)| idx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::ResidentPage;

    fn load(frames: &mut FrameStore, frame: usize, pid: u32, page: usize, tick: u64) {
        frames.place(
            frame,
            ResidentPage {
                pid,
                page,
                loaded_at: tick,
                last_access: tick,
                referenced: false,
            },
        );
    }

    #[test]
    fn victim_is_least_recently_accessed() {
        let mut frames = FrameStore::new(3);
        load(&mut frames, 0, 1, 0, 0);
        load(&mut frames, 1, 1, 1, 1);
        load(&mut frames, 2, 1, 2, 2);
        let mut p = LruPolicy::new();
        p.on_access(0, &mut frames, 5);
        // frame 1 now has the oldest last_access (1).
        assert_eq!(p.select_victim(&mut frames), Some(1));
    }

    #[test]
    fn ties_break_on_lowest_index() {
        let mut frames = FrameStore::new(2);
        load(&mut frames, 0, 1, 0, 3);
        load(&mut frames, 1, 1, 1, 3);
        let mut p = LruPolicy::new();
        assert_eq!(p.select_victim(&mut frames), Some(0));
    }
}
