use std::cmp::Ordering;
use std::fmt;

/// Decides where [`Collection::add`](crate::Collection::add) places a new element.
///
/// This is the only behavior that differs between collection variants; every
/// other operation is shared.
pub trait InsertionPolicy<T> {
    /// Returns the index in `0..=items.len()` at which `element` is inserted.
    fn position(&self, items: &[T], element: &T) -> usize;
}

/// Adds at the tail.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub struct Append;

impl<T> InsertionPolicy<T> for Append {
    #[inline]
    fn position(&self, items: &[T], _element: &T) -> usize {
        items.len()
    }
}

/// Adds at the head, so the most recently added element comes first.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub struct Prepend;

impl<T> InsertionPolicy<T> for Prepend {
    #[inline]
    fn position(&self, _items: &[T], _element: &T) -> usize {
        0
    }
}

/// Adds behind the last element that is less than or equal to the new one.
///
/// Keeps the collection ascending as long as it is only grown through `add`.
/// Equal elements stay in insertion order.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub struct Sorted;

impl<T: Ord> InsertionPolicy<T> for Sorted {
    fn position(&self, items: &[T], element: &T) -> usize {
        items.partition_point(|item| item <= element)
    }
}

/// Like [`Sorted`], ordered by a caller supplied comparator.
#[derive(Clone, Copy)]
pub struct SortedBy<F>(pub F);

impl<T, F> InsertionPolicy<T> for SortedBy<F>
where
    F: Fn(&T, &T) -> Ordering,
{
    fn position(&self, items: &[T], element: &T) -> usize {
        items.partition_point(|item| (self.0)(item, element) != Ordering::Greater)
    }
}

impl<F> fmt::Debug for SortedBy<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SortedBy(..)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn append_and_prepend_pick_the_ends() {
        let items = [1, 2, 3];
        assert_eq!(Append.position(&items, &0), 3);
        assert_eq!(Prepend.position(&items, &0), 0);
    }

    #[test]
    fn sorted_inserts_after_equal_elements() {
        let items = [1, 2, 2, 4];
        assert_eq!(Sorted.position(&items, &0), 0);
        assert_eq!(Sorted.position(&items, &2), 3);
        assert_eq!(Sorted.position(&items, &5), 4);
    }

    #[test]
    fn sorted_by_follows_the_comparator() {
        let descending = SortedBy(|a: &i32, b: &i32| b.cmp(a));
        let items = [9, 5, 1];
        assert_eq!(descending.position(&items, &7), 1);
        assert_eq!(descending.position(&items, &0), 3);
    }
}
