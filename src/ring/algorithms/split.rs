use log::debug;

use crate::error::RingError;
use crate::ring::cursor::Cursor;
use crate::ring::{Element, Ring};

/// The share of one destination ring in [`split_with`]: `repeats` chunks of
/// `chunk` elements each.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SplitPlan {
    pub chunk: usize,
    pub repeats: usize,
}

impl SplitPlan {
    pub fn new(chunk: usize, repeats: usize) -> Self {
        Self { chunk, repeats }
    }
}

/// Distribute copies of the elements of `source` into `r1` and `r2`, by
/// alternating chunks of `r1_chunk` and `r2_chunk` elements, until `r1`
/// received `r1_repeats` chunks and `r2` received `r2_repeats` chunks.
///
/// See [`split_with`] for the details.
///
/// # Examples
///
/// ```
/// use bi_ring::{split, Ring};
/// use std::iter::FromIterator;
///
/// let source = Ring::from_iter((1..=11).map(|key| (key, key)));
/// let (mut r1, mut r2) = (Ring::new(), Ring::new());
/// split(&source, &mut r1, 2, 3, &mut r2, 3, 4).unwrap();
///
/// assert_eq!(r1.keys().copied().collect::<Vec<_>>(), vec![1, 2, 6, 7, 11, 1]);
/// assert_eq!(
///     r2.keys().copied().collect::<Vec<_>>(),
///     vec![3, 4, 5, 8, 9, 10, 2, 3, 4, 5, 6, 7]
/// );
/// ```
#[allow(clippy::too_many_arguments)]
pub fn split<K: Clone, I: Clone>(
    source: &Ring<K, I>,
    r1: &mut Ring<K, I>,
    r1_chunk: usize,
    r1_repeats: usize,
    r2: &mut Ring<K, I>,
    r2_chunk: usize,
    r2_repeats: usize,
) -> Result<(), RingError> {
    split_with(
        source,
        (r1, SplitPlan::new(r1_chunk, r1_repeats)),
        (r2, SplitPlan::new(r2_chunk, r2_repeats)),
    )
}

/// Distribute copies of the elements of `source` into two destination rings.
///
/// A cursor starts at the head of `source` and only moves forward, wrapping
/// around as often as needed. Each round appends one chunk to the first ring
/// and then one chunk to the second ring, and uses up one repeat of each plan.
/// Once a plan has no repeats left, its chunks are skipped without moving the
/// cursor. Rounds go on until both plans run out of repeats.
///
/// Elements are appended with [`Ring::push_back`], so the destination rings
/// keep their previous elements.
///
/// # Errors
///
/// Returns [`RingError::NullDereference`] if `source` is empty while an
/// element is still to be copied. The destination rings keep what they
/// received up to that point.
pub fn split_with<K: Clone, I: Clone>(
    source: &Ring<K, I>,
    (r1, mut plan1): (&mut Ring<K, I>, SplitPlan),
    (r2, mut plan2): (&mut Ring<K, I>, SplitPlan),
) -> Result<(), RingError> {
    let (r1_len, r2_len) = (r1.len(), r2.len());
    let mut cursor = source.cursor_begin();
    loop {
        take_chunk(&mut cursor, r1, &mut plan1)?;
        take_chunk(&mut cursor, r2, &mut plan2)?;
        if plan1.repeats == 0 && plan2.repeats == 0 {
            break;
        }
    }
    debug!(
        "split {} elements into {} and {} elements",
        source.len(),
        r1.len() - r1_len,
        r2.len() - r2_len
    );
    Ok(())
}

/// Copy one chunk of `plan` into `into`, if a repeat is left, and use the
/// repeat up.
fn take_chunk<K: Clone, I: Clone>(
    cursor: &mut Cursor<'_, K, I>,
    into: &mut Ring<K, I>,
    plan: &mut SplitPlan,
) -> Result<(), RingError> {
    if plan.repeats > 0 {
        for _ in 0..plan.chunk {
            let Element { key, info } = cursor.fetch_next().get()?;
            into.push_back(key.clone(), info.clone());
        }
    }
    plan.repeats = plan.repeats.saturating_sub(1);
    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::ring::tests::{init_logger, ring_eq};
    use crate::ring::{split, split_with, Ring, SplitPlan};
    use crate::RingError;
    use std::iter::FromIterator;

    fn source(keys: std::ops::RangeInclusive<i32>) -> Ring<i32, i32> {
        Ring::from_iter(keys.map(|key| (key, key)))
    }

    fn pairs(keys: &[i32]) -> Vec<(i32, i32)> {
        keys.iter().map(|&key| (key, key)).collect()
    }

    #[test]
    fn split_wraps_around_source() {
        init_logger();
        let source = source(1..=11);
        let (mut r1, mut r2) = (Ring::new(), Ring::new());
        split(&source, &mut r1, 2, 3, &mut r2, 3, 4).unwrap();
        ring_eq(&r1, pairs(&[1, 2, 6, 7, 11, 1]));
        ring_eq(&r2, pairs(&[3, 4, 5, 8, 9, 10, 2, 3, 4, 5, 6, 7]));
        ring_eq(&source, pairs(&[1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11]));
    }

    #[test]
    fn split_exhausted_share_does_not_move_cursor() {
        let source = source(1..=5);
        let (mut r1, mut r2) = (Ring::new(), Ring::new());
        split(&source, &mut r1, 1, 1, &mut r2, 1, 3).unwrap();
        ring_eq(&r1, pairs(&[1]));
        ring_eq(&r2, pairs(&[2, 3, 4]));
    }

    #[test]
    fn split_appends_to_destinations() {
        let source = source(1..=3);
        let mut r1 = Ring::from_iter([(0, 0)]);
        let mut r2 = Ring::new();
        split_with(
            &source,
            (&mut r1, SplitPlan::new(1, 2)),
            (&mut r2, SplitPlan::new(2, 1)),
        )
        .unwrap();
        ring_eq(&r1, pairs(&[0, 1, 1]));
        ring_eq(&r2, pairs(&[2, 3]));
    }

    #[test]
    fn split_without_repeats() {
        let source = source(1..=3);
        let (mut r1, mut r2) = (Ring::new(), Ring::new());
        split(&source, &mut r1, 2, 0, &mut r2, 2, 0).unwrap();
        assert!(r1.is_empty());
        assert!(r2.is_empty());

        split(&source, &mut r1, 0, 3, &mut r2, 0, 1).unwrap();
        assert!(r1.is_empty());
        assert!(r2.is_empty());
    }

    #[test]
    fn split_empty_source() {
        let source = Ring::<i32, i32>::new();
        let (mut r1, mut r2) = (Ring::new(), Ring::new());
        assert_eq!(
            split(&source, &mut r1, 2, 1, &mut r2, 2, 1),
            Err(RingError::NullDereference)
        );
        assert!(r1.is_empty());
        assert_eq!(split(&source, &mut r1, 0, 2, &mut r2, 0, 2), Ok(()));
    }
}
