use std::fmt;

/// One captured, immutable machine state and its temporal coordinates.
#[derive(Clone, PartialEq, Eq)]
pub struct Snapshot {
    state: Box<[u8]>,
    display: Box<[u8]>,
    cycles: u64,
    frames: u64,
}

impl Snapshot {
    pub(crate) fn new(state: Vec<u8>, display: Vec<u8>, cycles: u64, frames: u64) -> Self {
        Self {
            state: state.into_boxed_slice(),
            display: display.into_boxed_slice(),
            cycles,
            frames,
        }
    }

    /// The serialized machine state, opaque to the rewind core.
    pub fn state(&self) -> &[u8] {
        &self.state
    }

    /// The serialized display state, opaque to the rewind core.
    pub fn display(&self) -> &[u8] {
        &self.display
    }

    /// Elapsed cycle count at capture time.
    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    /// Elapsed frame count at capture time.
    pub fn frames(&self) -> u64 {
        self.frames
    }
}

impl fmt::Debug for Snapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Snapshot")
            .field("cycles", &self.cycles)
            .field("frames", &self.frames)
            .field("state_len", &self.state.len())
            .field("display_len", &self.display.len())
            .finish_non_exhaustive()
    }
}

/// Capacity-bounded chronological sequence of [Snapshot]s plus a cursor
/// marking the current point in time.
///
/// The sequence is index-addressed; the cursor is a plain index in
/// `[0, len]`, where `len` means "present" (no rewind active). Entries are
/// never reordered, and cycle counts strictly increase oldest to newest.
/// All mutation goes through [RewindManager](crate::RewindManager).
#[derive(Debug, Default)]
pub struct HistoryStore {
    states: Vec<Snapshot>,
    cursor: usize,
}

impl HistoryStore {
    /// An empty store with the cursor at the present.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of retained snapshots.
    pub fn len(&self) -> usize {
        self.states.len()
    }

    /// Whether no snapshots are retained.
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// The cursor position, in `[0, len]`; `len` means "present".
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// The snapshot at `index`, oldest first.
    pub fn get(&self, index: usize) -> Option<&Snapshot> {
        self.states.get(index)
    }

    /// The oldest retained snapshot.
    pub fn oldest(&self) -> Option<&Snapshot> {
        self.states.first()
    }

    /// The newest retained snapshot.
    pub fn newest(&self) -> Option<&Snapshot> {
        self.states.last()
    }

    /// Iterate oldest to newest; reverse for newest to oldest.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &Snapshot> + '_ {
        self.states.iter()
    }

    pub(crate) fn states(&self) -> &[Snapshot] {
        &self.states
    }

    /// Insert at the tail and move the cursor to the present.
    pub(crate) fn append(&mut self, snapshot: Snapshot) {
        debug_assert!(
            self.states
                .last()
                .map_or(true, |last| last.cycles() < snapshot.cycles()),
            "snapshot cycle counts must strictly increase"
        );
        self.states.push(snapshot);
        self.cursor = self.states.len();
    }

    /// Drop every entry in `[index, len)`.
    pub(crate) fn truncate_from(&mut self, index: usize) {
        self.states.truncate(index);
        self.cursor = self.cursor.min(self.states.len());
    }

    /// Remove the entry at `index`, preserving the order of the rest.
    pub(crate) fn evict(&mut self, index: usize) -> Snapshot {
        let snapshot = self.states.remove(index);
        if self.cursor > index {
            self.cursor -= 1;
        }
        snapshot
    }

    pub(crate) fn set_cursor(&mut self, cursor: usize) {
        debug_assert!(cursor <= self.states.len());
        self.cursor = cursor;
    }

    pub(crate) fn clear(&mut self) {
        self.states.clear();
        self.cursor = 0;
    }
}

#[cfg(test)]
pub(crate) fn test_snapshot(cycles: u64) -> Snapshot {
    Snapshot::new(cycles.to_le_bytes().to_vec(), Vec::new(), cycles, cycles / 10)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn append_keeps_chronological_order_and_advances_cursor() {
        let mut store = HistoryStore::new();
        for cycles in [100, 200, 300] {
            store.append(test_snapshot(cycles));
        }
        assert_eq!(store.len(), 3);
        assert_eq!(store.cursor(), 3);
        assert_eq!(store.oldest().map(Snapshot::cycles), Some(100));
        assert_eq!(store.newest().map(Snapshot::cycles), Some(300));

        let forward: Vec<u64> = store.iter().map(Snapshot::cycles).collect();
        assert_eq!(forward, vec![100, 200, 300]);
        let backward: Vec<u64> = store.iter().rev().map(Snapshot::cycles).collect();
        assert_eq!(backward, vec![300, 200, 100]);
    }

    #[test]
    fn truncate_from_drops_tail_and_clamps_cursor() {
        let mut store = HistoryStore::new();
        for cycles in [100, 200, 300, 400] {
            store.append(test_snapshot(cycles));
        }
        store.truncate_from(2);
        assert_eq!(store.len(), 2);
        assert_eq!(store.cursor(), 2);
        assert_eq!(store.newest().map(Snapshot::cycles), Some(200));
    }

    #[test]
    fn evict_preserves_order_and_shifts_cursor() {
        let mut store = HistoryStore::new();
        for cycles in [100, 200, 300, 400] {
            store.append(test_snapshot(cycles));
        }
        let evicted = store.evict(1);
        assert_eq!(evicted.cycles(), 200);
        let remaining: Vec<u64> = store.iter().map(Snapshot::cycles).collect();
        assert_eq!(remaining, vec![100, 300, 400]);
        assert_eq!(store.cursor(), 3);
    }

    #[test]
    fn clear_resets_to_empty() {
        let mut store = HistoryStore::new();
        store.append(test_snapshot(100));
        store.clear();
        assert!(store.is_empty());
        assert_eq!(store.cursor(), 0);
    }
}
