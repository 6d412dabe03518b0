//! Entity groups: the race-freedom unit of pairwise scheduling.

use orrery_engine::span_sizes;

/// A contiguous range of entity indices, `[start, stop)`.
///
/// Groups partition `[0, N)` exactly; boundaries are fixed when the
/// schedule is planned and must outlive it (the store's fixed entity
/// count guarantees this).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Group {
    /// First entity index in the group.
    pub start: usize,
    /// One past the last entity index in the group.
    pub stop: usize,
}

impl Group {
    /// Number of entities in the group.
    pub fn len(&self) -> usize {
        self.stop - self.start
    }

    /// `true` if the group covers no entities.
    pub fn is_empty(&self) -> bool {
        self.stop == self.start
    }

    /// Iterate the entity indices in the group.
    pub fn indices(&self) -> std::ops::Range<usize> {
        self.start..self.stop
    }
}

/// Partition `[0, entity_count)` into `count` contiguous groups of
/// near-equal size, remainder to the first groups — the same balance
/// rule the listing partitioner uses.
///
/// # Panics
///
/// Panics if `count > entity_count` with `count > 0` would produce an
/// empty group; callers derive `count` as `min(entity_count, …)`, so
/// every group is non-empty. `count == 0` is allowed only with
/// `entity_count == 0`.
pub fn group_entities(entity_count: usize, count: usize) -> Vec<Group> {
    if count == 0 {
        assert_eq!(entity_count, 0, "cannot group entities into zero groups");
        return Vec::new();
    }
    assert!(
        count <= entity_count,
        "more groups than entities would leave empty groups"
    );
    let mut groups = Vec::with_capacity(count);
    let mut start = 0;
    for size in span_sizes(entity_count, count) {
        groups.push(Group {
            start,
            stop: start + size,
        });
        start += size;
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn groups_partition_the_index_space() {
        let groups = group_entities(10, 4);
        assert_eq!(groups.len(), 4);
        assert_eq!(groups[0], Group { start: 0, stop: 3 });
        assert_eq!(groups[1], Group { start: 3, stop: 6 });
        assert_eq!(groups[2], Group { start: 6, stop: 8 });
        assert_eq!(groups[3], Group { start: 8, stop: 10 });
    }

    #[test]
    fn singleton_groups_when_counts_match() {
        let groups = group_entities(3, 3);
        assert!(groups.iter().all(|g| g.len() == 1));
    }

    #[test]
    fn empty_world_has_no_groups() {
        assert!(group_entities(0, 0).is_empty());
    }

    #[test]
    #[should_panic(expected = "empty groups")]
    fn more_groups_than_entities_panics() {
        group_entities(2, 3);
    }

    proptest! {
        #[test]
        fn cover_is_exact_contiguous_and_balanced(
            n in 1usize..300,
            count_seed in 1usize..300,
        ) {
            let count = count_seed.min(n);
            let groups = group_entities(n, count);
            prop_assert_eq!(groups.len(), count);
            prop_assert_eq!(groups[0].start, 0);
            prop_assert_eq!(groups[count - 1].stop, n);
            for pair in groups.windows(2) {
                prop_assert_eq!(pair[0].stop, pair[1].start);
            }
            let max = groups.iter().map(Group::len).max().unwrap();
            let min = groups.iter().map(Group::len).min().unwrap();
            prop_assert!(max - min <= 1);
            prop_assert!(min >= 1);
        }
    }
}
