use linked_hash_map::LinkedHashMap;

use crate::pcb::Pid;

/// Fixed-capacity ordered cache of `(pid, page) -> frame` entries with
/// most-recently-used at the back (spec.md §4.4). Built on `LinkedHashMap`
/// rather than a hand-rolled vector scan, the same way
/// `seantronsen-virtual_memory_sim`'s own `TLB` caches logical-to-physical
/// mappings: a hash lookup for `lookup`/`insert` and the map's intrinsic
/// insertion order for capacity eviction, instead of a linear `position()`
/// scan per operation.
#[derive(Debug)]
pub struct Tlb {
    capacity: usize,
    map: LinkedHashMap<(Pid, usize), usize>,
}

impl Tlb {
    pub fn new(capacity: usize) -> Tlb {
        Tlb {
            capacity,
            map: LinkedHashMap::new(),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.capacity > 0
    }

    /// Returns the frame on hit and promotes the entry to most-recently-used.
    pub fn lookup(&mut self, pid: Pid, page: usize) -> Option<usize> {
        self.map.get_refresh(&(pid, page)).map(|frame| *frame)
    }

    /// Promotes an existing key, or inserts a new one. If capacity is
    /// exceeded after insertion, the oldest entry is dropped.
    pub fn insert(&mut self, pid: Pid, page: usize, frame: usize) {
        if self.capacity == 0 {
            return;
        }
        self.map.insert((pid, page), frame);
        while self.map.len() > self.capacity {
            self.map.pop_front();
        }
    }

    /// Removes every entry whose key's PID matches, used on termination.
    pub fn invalidate_pid(&mut self, pid: Pid) {
        let stale: Vec<_> = self.map.keys().filter(|&&(p, _)| p == pid).copied().collect();
        for key in stale {
            self.map.remove(&key);
        }
    }

    /// Removes every entry referencing `frame`, used on eviction.
    pub fn invalidate_frame(&mut self, frame: usize) {
        let stale: Vec<_> = self
            .map
            .iter()
            .filter(|&(_, &f)| f == frame)
            .map(|(&key, _)| key)
            .collect();
        for key in stale {
            self.map.remove(&key);
        }
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn entries(&self) -> impl Iterator<Item = (Pid, usize, usize)> + '_ {
        self.map.iter().map(|(&(pid, page), &frame)| (pid, page, frame))
    }
}
