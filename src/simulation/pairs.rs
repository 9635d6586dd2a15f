//! Unordered pair enumeration shared by the gravity and collision passes
//!
//! Pairs come out as `(i, j)` with `i < j`, first index major, the same order
//! the all-pairs scans in this crate rely on for tie-breaks.

/// Every unordered pair of indices in `0..n`
pub fn unordered_pairs(n: usize) -> impl Iterator<Item = (usize, usize)> {
    (0..n).flat_map(move |i| ((i + 1)..n).map(move |j| (i, j)))
}

/// Two distinct mutable elements of one slice
///
/// Panics if `i == j` or either index is out of bounds.
pub fn pair_mut<T>(items: &mut [T], i: usize, j: usize) -> (&mut T, &mut T) {
    assert!(i != j, "pair_mut needs two distinct indices");
    if i < j {
        let (left, right) = items.split_at_mut(j);
        (&mut left[i], &mut right[0])
    } else {
        let (left, right) = items.split_at_mut(i);
        (&mut right[0], &mut left[j])
    }
}
