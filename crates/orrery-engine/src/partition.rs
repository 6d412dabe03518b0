//! Balanced contiguous partitioning of a calculation list across slots.

use orrery_core::Calculation;

/// The subset of an engine's calculations assigned to one worker slot.
///
/// Listings are built once at engine registration and then round-trip
/// between the driver and their worker every round, carrying the
/// calculations by value.
pub struct Listing {
    pub(crate) calcs: Vec<Box<dyn Calculation>>,
}

impl Listing {
    /// Number of calculations in this listing.
    pub fn len(&self) -> usize {
        self.calcs.len()
    }

    /// `true` if the listing carries no work.
    pub fn is_empty(&self) -> bool {
        self.calcs.is_empty()
    }
}

impl std::fmt::Debug for Listing {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Listing").field("calcs", &self.calcs.len()).finish()
    }
}

/// Sizes of a balanced contiguous split of `total` items over `parts`
/// slots.
///
/// With `used = min(parts, total)`: the first `total % used` slots get
/// `total / used + 1` items, the remaining used slots get `total / used`,
/// and slots past `used` get zero. The returned vector always has length
/// `parts`.
///
/// # Panics
///
/// Panics if `parts` is zero.
pub fn span_sizes(total: usize, parts: usize) -> Vec<usize> {
    assert!(parts > 0, "cannot split across zero slots");
    let used = parts.min(total);
    let mut sizes = vec![0; parts];
    if used == 0 {
        return sizes;
    }
    let base = total / used;
    let extra = total % used;
    for (i, size) in sizes.iter_mut().enumerate().take(used) {
        *size = if i < extra { base + 1 } else { base };
    }
    sizes
}

/// Split `items` into `parts` contiguous, order-preserving chunks per
/// [`span_sizes`]. Chunk `i` holds the items assigned to slot `i`;
/// unused trailing slots get empty chunks.
///
/// Contiguity is deliberate: calculations built in entity order keep
/// their cache locality within one worker, and no load migrates once
/// assigned.
pub fn partition<T>(items: Vec<T>, parts: usize) -> Vec<Vec<T>> {
    let sizes = span_sizes(items.len(), parts);
    let mut it = items.into_iter();
    sizes
        .into_iter()
        .map(|n| it.by_ref().take(n).collect())
        .collect()
}

/// Partition an engine's calculations into per-slot listings.
pub(crate) fn listings(calcs: Vec<Box<dyn Calculation>>, parts: usize) -> Vec<Listing> {
    partition(calcs, parts)
        .into_iter()
        .map(|calcs| Listing { calcs })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn exact_division() {
        assert_eq!(span_sizes(8, 4), vec![2, 2, 2, 2]);
    }

    #[test]
    fn remainder_goes_to_first_slots() {
        assert_eq!(span_sizes(10, 4), vec![3, 3, 2, 2]);
        assert_eq!(span_sizes(7, 3), vec![3, 2, 2]);
    }

    #[test]
    fn fewer_items_than_slots_leaves_trailing_slots_empty() {
        assert_eq!(span_sizes(2, 5), vec![1, 1, 0, 0, 0]);
        assert_eq!(span_sizes(0, 3), vec![0, 0, 0]);
    }

    #[test]
    fn partition_preserves_order() {
        let chunks = partition((0..10).collect(), 3);
        assert_eq!(chunks, vec![vec![0, 1, 2, 3], vec![4, 5, 6], vec![7, 8, 9]]);
    }

    #[test]
    #[should_panic(expected = "zero slots")]
    fn zero_parts_panics() {
        span_sizes(4, 0);
    }

    proptest! {
        #[test]
        fn sizes_cover_total_exactly(total in 0usize..500, parts in 1usize..40) {
            let sizes = span_sizes(total, parts);
            prop_assert_eq!(sizes.len(), parts);
            prop_assert_eq!(sizes.iter().sum::<usize>(), total);
        }

        #[test]
        fn used_sizes_differ_by_at_most_one(total in 0usize..500, parts in 1usize..40) {
            let sizes = span_sizes(total, parts);
            let used: Vec<_> = sizes.iter().copied().filter(|&s| s > 0).collect();
            if let (Some(max), Some(min)) = (used.iter().max(), used.iter().min()) {
                prop_assert!(max - min <= 1);
            }
            // Zero-sized slots only appear when there are more slots
            // than items.
            if total >= parts {
                prop_assert!(sizes.iter().all(|&s| s > 0));
            }
        }

        #[test]
        fn concatenation_reproduces_input(total in 0usize..500, parts in 1usize..40) {
            let items: Vec<usize> = (0..total).collect();
            let chunks = partition(items.clone(), parts);
            let flat: Vec<usize> = chunks.into_iter().flatten().collect();
            prop_assert_eq!(flat, items);
        }
    }
}
