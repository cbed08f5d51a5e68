use crate::store::HistoryStore;

/// Capacity and retention parameters for the history store.
///
/// The defaults match a 60 Hz machine capturing one state per frame: one
/// second of exact single-step history, plus enough coarse entries for
/// multi-second jumps, under a hard ceiling of 112 snapshots.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetentionPolicy {
    /// Hard ceiling on the number of retained snapshots. Must be at least 3.
    pub max_size: usize,
    /// Count of most-recent entries that compaction never touches.
    pub single_steps: usize,
    /// Minimum coarse entries retained for long-range jumps; participates in
    /// the default `max_size` derivation.
    pub second_steps: usize,
    /// Run length of equally-spaced entries that triggers thinning.
    pub merge_count: u32,
}

impl RetentionPolicy {
    /// Number of guaranteed single-step rewinds.
    pub const DEFAULT_SINGLE_STEPS: usize = 60;
    /// Number of guaranteed coarse (~one second) rewinds.
    pub const DEFAULT_SECOND_STEPS: usize = 10;
    /// Threshold for thinning same-step entries (4 merges to 2/3 each).
    pub const DEFAULT_MERGE_COUNT: u32 = 4;

    /// Derive a capacity from the retention parameters.
    pub fn derived_max_size(single_steps: usize, second_steps: usize, merge_count: u32) -> usize {
        single_steps + (second_steps - merge_count as usize) + 46
    }
}

impl Default for RetentionPolicy {
    fn default() -> Self {
        Self {
            max_size: Self::derived_max_size(
                Self::DEFAULT_SINGLE_STEPS,
                Self::DEFAULT_SECOND_STEPS,
                Self::DEFAULT_MERGE_COUNT,
            ),
            single_steps: Self::DEFAULT_SINGLE_STEPS,
            second_steps: Self::DEFAULT_SECOND_STEPS,
            merge_count: Self::DEFAULT_MERGE_COUNT,
        }
    }
}

/// Thin the store to free at least one slot before an insert at capacity.
///
/// Scans newest to oldest, skipping the `single_steps` most recent entries.
/// A run of `merge_count` adjacent pairs with the same cycle step is thinned
/// by evicting one interior entry, which halves the sampling density of the
/// run while preserving its time envelope. If the scan frees nothing, the
/// second-oldest entry is evicted outright; the oldest entry always survives
/// as the anchor for maximum-depth rewinds. The newest entry is never
/// touched.
pub(crate) fn compress(store: &mut HistoryStore, policy: &RetentionPolicy) {
    debug_assert!(policy.max_size > 2);
    let before = store.len();

    if before > policy.single_steps + 2 {
        let mut last_step: u64 = 0;
        let mut run: u32 = 0;
        // `i` is the older entry of each adjacent pair, walking newest to
        // oldest through the unprotected region.
        let mut i = before - 2 - policy.single_steps;
        loop {
            let states = store.states();
            let step = states[i + 1].cycles() - states[i].cycles();
            if step == last_step {
                run += 1;
                if run >= policy.merge_count && i + 2 < store.len() {
                    store.evict(i + 1);
                    // The two pairs around the hole merge into one wider
                    // step, so the run continues at length 2.
                    run = 2;
                }
            } else {
                last_step = step;
                run = 1;
            }
            if i == 0 {
                break;
            }
            i -= 1;
        }
    }

    // No run was thinned: drop the second-oldest entry instead.
    if store.len() >= policy.max_size && store.len() > 2 {
        store.evict(1);
    }

    tracing::debug!(before, after = store.len(), "compacted history");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{test_snapshot, Snapshot};

    fn store_with_cycles(cycles: impl IntoIterator<Item = u64>) -> HistoryStore {
        let mut store = HistoryStore::new();
        for c in cycles {
            store.append(test_snapshot(c));
        }
        store
    }

    fn cycles_of(store: &HistoryStore) -> Vec<u64> {
        store.iter().map(Snapshot::cycles).collect()
    }

    #[test]
    fn uniform_spacing_thins_below_capacity() {
        let policy = RetentionPolicy::default();
        let mut store = store_with_cycles((1..=policy.max_size as u64).map(|i| i * 60));
        assert_eq!(store.len(), policy.max_size);

        let recent_before: Vec<Snapshot> = store
            .iter()
            .rev()
            .take(policy.single_steps)
            .cloned()
            .collect();

        compress(&mut store, &policy);

        assert!(store.len() < policy.max_size);
        let recent_after: Vec<Snapshot> = store
            .iter()
            .rev()
            .take(policy.single_steps)
            .cloned()
            .collect();
        assert_eq!(recent_before, recent_after);
    }

    #[test]
    fn distinct_steps_fall_back_to_second_oldest() {
        let policy = RetentionPolicy {
            max_size: 8,
            single_steps: 2,
            second_steps: 4,
            merge_count: 4,
        };
        // Strictly widening steps, so no run ever forms.
        let mut store = store_with_cycles([10, 30, 60, 100, 150, 210, 280, 360]);

        compress(&mut store, &policy);

        assert_eq!(cycles_of(&store), vec![10, 60, 100, 150, 210, 280, 360]);
    }

    #[test]
    fn compaction_never_touches_newest_or_oldest() {
        let policy = RetentionPolicy {
            max_size: 10,
            single_steps: 3,
            second_steps: 4,
            merge_count: 3,
        };
        let mut store = store_with_cycles((1..=10).map(|i| i * 60));

        compress(&mut store, &policy);

        assert!(store.len() < 10);
        assert_eq!(store.oldest().map(Snapshot::cycles), Some(60));
        assert_eq!(store.newest().map(Snapshot::cycles), Some(600));
    }

    #[test]
    fn run_thinning_evicts_interior_entries_only() {
        let policy = RetentionPolicy {
            max_size: 10,
            single_steps: 3,
            second_steps: 4,
            merge_count: 4,
        };
        // A single uniform run of step 60 below the protected window.
        let mut store = store_with_cycles((1..=10).map(|i| i * 60));

        compress(&mut store, &policy);

        let after = cycles_of(&store);
        // Interior entries thinned; ends and the three most recent entries
        // intact.
        assert_eq!(after, vec![60, 180, 300, 360, 420, 480, 540, 600]);
    }

    #[test]
    fn monotonicity_survives_compaction() {
        let policy = RetentionPolicy {
            max_size: 16,
            single_steps: 4,
            second_steps: 4,
            merge_count: 3,
        };
        let mut store = store_with_cycles((1..=16).map(|i| i * 60));

        compress(&mut store, &policy);

        let after = cycles_of(&store);
        assert!(after.windows(2).all(|pair| pair[0] < pair[1]));
    }
}
