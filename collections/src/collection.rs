//! An ordered, index-addressable collection with an optional run-time type constraint.
//!
//! Every operation is implemented once on [`Collection`]. Variants only differ
//! in their [`InsertionPolicy`], which decides where [`Collection::add`] puts
//! a new element:
//!
//! ```
//! use ordo_collections::{List, PrependList};
//!
//! let list = List::from_items([1, 2, 3]).unwrap();
//! assert_eq!(list.as_slice(), &[1, 2, 3]);
//!
//! let reversed = PrependList::from_items([1, 2, 3]).unwrap();
//! assert_eq!(reversed.as_slice(), &[3, 2, 1]);
//! ```

use std::cmp::Ordering;
use std::fmt;
use std::ops::Index;

use log::{debug, trace};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::CollectionError;
use crate::iter::{IntoIter, Iter};
use crate::policy::{Append, InsertionPolicy, Prepend, Sorted};
use crate::typed::Typed;

/// A collection whose `add` appends.
pub type List<T> = Collection<T, Append>;
/// A collection whose `add` prepends.
pub type PrependList<T> = Collection<T, Prepend>;
/// A collection whose `add` keeps the elements in ascending order.
pub type SortedList<T> = Collection<T, Sorted>;

/// A growable sequence of elements without gaps, optionally restricted to a
/// single element type tag.
///
/// Indices are always contiguous: removing an element shifts every following
/// element down by one. The type constraint only applies to insertions made
/// after it was set; elements already present are never re-checked.
pub struct Collection<T: Typed, P = Append> {
    items: Vec<T>,
    constraint: Option<T::Tag>,
    policy: P,
}

impl<T, P> Collection<T, P>
where
    T: Typed,
    P: InsertionPolicy<T> + Default,
{
    /// Creates an empty, unconstrained collection.
    #[inline]
    pub fn new() -> Self {
        Self::with_policy(P::default())
    }

    /// Creates a collection seeded with `items`, each one inserted through [`add`](Self::add).
    pub fn from_items<I>(items: I) -> Result<Self, CollectionError>
    where
        I: IntoIterator<Item = T>,
    {
        let mut collection = Self::new();
        collection.add_all(items)?;
        Ok(collection)
    }

    /// Creates a collection constrained to `tag` and seeded with `items`.
    ///
    /// Fails on the first seed element that does not carry `tag`.
    pub fn with_type<I>(tag: T::Tag, items: I) -> Result<Self, CollectionError>
    where
        I: IntoIterator<Item = T>,
    {
        let mut collection = Self::new();
        collection.set_type(Some(tag));
        collection.add_all(items)?;
        Ok(collection)
    }
}

impl<T, P> Collection<T, P>
where
    T: Typed,
    P: InsertionPolicy<T>,
{
    /// Creates an empty, unconstrained collection using the given insertion policy.
    pub fn with_policy(policy: P) -> Self {
        Collection {
            items: Vec::new(),
            constraint: None,
            policy,
        }
    }

    pub fn policy(&self) -> &P {
        &self.policy
    }

    /// Inserts `element` wherever the insertion policy places it.
    pub fn add(&mut self, element: T) -> Result<(), CollectionError> {
        self.validate_element(&element)?;
        let index = self.policy.position(&self.items, &element);
        trace!(index, len = self.items.len(), "Adding element");
        self.items.insert(index, element);
        Ok(())
    }

    /// Inserts `element` at the tail.
    pub fn append(&mut self, element: T) -> Result<(), CollectionError> {
        self.validate_element(&element)?;
        self.items.push(element);
        Ok(())
    }

    /// Inserts `element` at the head.
    pub fn prepend(&mut self, element: T) -> Result<(), CollectionError> {
        self.validate_element(&element)?;
        self.items.insert(0, element);
        Ok(())
    }

    /// Adds every element in order. Not atomic: elements added before a
    /// failing one stay in the collection.
    pub fn add_all<I>(&mut self, elements: I) -> Result<(), CollectionError>
    where
        I: IntoIterator<Item = T>,
    {
        for element in elements {
            self.add(element)?;
        }
        Ok(())
    }

    pub fn get_type(&self) -> Option<T::Tag> {
        self.constraint
    }

    /// Replaces the type constraint. `None` disables enforcement.
    pub fn set_type(&mut self, tag: Option<T::Tag>) {
        trace!(?tag, "Setting collection type");
        self.constraint = tag;
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[inline]
    pub fn count(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Calls `callback` with every index and element in ascending order.
    pub fn each<F>(&self, mut callback: F) -> &Self
    where
        F: FnMut(usize, &T),
    {
        for (index, element) in self.iter() {
            callback(index, element);
        }
        self
    }

    /// Returns the index of the first element matching `predicate`.
    pub fn find_index<F>(&self, predicate: F) -> Option<usize>
    where
        F: FnMut(&T) -> bool,
    {
        self.items.iter().position(predicate)
    }

    /// Returns the first element matching `predicate`.
    pub fn find_one<F>(&self, predicate: F) -> Option<&T>
    where
        F: FnMut(&T) -> bool,
    {
        self.find_index(predicate).map(|index| &self.items[index])
    }

    /// Returns the indices of all elements matching `predicate`, ascending.
    pub fn find_indexes<F>(&self, mut predicate: F) -> Vec<usize>
    where
        F: FnMut(&T) -> bool,
    {
        self.items
            .iter()
            .enumerate()
            .filter_map(|(index, element)| predicate(element).then_some(index))
            .collect()
    }

    /// Returns a new collection of the same variant holding copies of every
    /// element matching `predicate`, in their original order.
    ///
    /// The result carries the same policy and type constraint. Matches are
    /// appended directly rather than routed through `add`, so a prepending or
    /// sorting policy does not reorder them.
    pub fn find_all<F>(&self, mut predicate: F) -> Self
    where
        T: Clone,
        P: Clone,
        F: FnMut(&T) -> bool,
    {
        let mut found = Self::with_policy(self.policy.clone());
        found.constraint = self.constraint;
        found.items = self
            .items
            .iter()
            .filter(|&element| predicate(element))
            .cloned()
            .collect();
        found
    }

    pub fn first(&self) -> Result<&T, CollectionError> {
        self.at(0usize)
    }

    /// Fails like `at(-1)` when the collection is empty.
    pub fn last(&self) -> Result<&T, CollectionError> {
        match self.items.len().checked_sub(1) {
            Some(index) => self.at(index),
            None => Err(CollectionError::InvalidIndex),
        }
    }

    /// Bounds-checked access.
    ///
    /// Fails with an `InvalidArgument` error if `index` does not convert to a
    /// `usize` (i.e. it is negative) and with `OutOfRange` past the last element.
    pub fn at<I>(&self, index: I) -> Result<&T, CollectionError>
    where
        I: TryInto<usize>,
    {
        let index = self.locate(index)?;
        Ok(&self.items[index])
    }

    /// Alias of [`at`](Self::at).
    #[inline]
    pub fn index<I>(&self, index: I) -> Result<&T, CollectionError>
    where
        I: TryInto<usize>,
    {
        self.at(index)
    }

    /// Alias of [`at`](Self::at).
    #[inline]
    pub fn get<I>(&self, index: I) -> Result<&T, CollectionError>
    where
        I: TryInto<usize>,
    {
        self.at(index)
    }

    /// Returns whether `index` addresses an element. Never fails.
    pub fn exists<I>(&self, index: I) -> bool
    where
        I: TryInto<usize>,
    {
        self.validate_index(index).is_ok()
    }

    /// Writes `element` at `index`, or appends it when no index is given.
    ///
    /// With an index, both the index and the element are validated. Without
    /// one, the element is pushed as-is: it is a structural write that skips
    /// the insertion policy and the type constraint.
    pub fn set<I>(&mut self, index: Option<I>, element: T) -> Result<(), CollectionError>
    where
        I: TryInto<usize>,
    {
        match index {
            Some(index) => {
                let index = self.locate(index)?;
                self.validate_element(&element)?;
                self.items[index] = element;
            }
            None => self.items.push(element),
        }
        Ok(())
    }

    /// Alias of [`remove_at`](Self::remove_at).
    #[inline]
    pub fn unset<I>(&mut self, index: I) -> Result<T, CollectionError>
    where
        I: TryInto<usize>,
    {
        self.remove_at(index)
    }

    /// Removes and returns the element at `index`, shifting later elements down.
    pub fn remove_at<I>(&mut self, index: I) -> Result<T, CollectionError>
    where
        I: TryInto<usize>,
    {
        let index = self.locate(index)?;
        trace!(index, len = self.items.len(), "Removing element");
        Ok(self.items.remove(index))
    }

    /// Removes the first element matching `predicate`. Returns whether one was found.
    pub fn remove<F>(&mut self, predicate: F) -> bool
    where
        F: FnMut(&T) -> bool,
    {
        match self.find_index(predicate) {
            Some(index) => {
                trace!(index, len = self.items.len(), "Removing element");
                self.items.remove(index);
                true
            }
            None => false,
        }
    }

    /// Removes elements matching `predicate` until none is left and returns
    /// how many were removed.
    ///
    /// Each round scans the current, already shrunk sequence from the start,
    /// so a stateful predicate sees elements more than once.
    pub fn remove_all<F>(&mut self, mut predicate: F) -> usize
    where
        F: FnMut(&T) -> bool,
    {
        let mut removed = 0;
        while self.remove(&mut predicate) {
            removed += 1;
        }
        removed
    }

    /// Removes all elements. The type constraint is kept.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Sorts the elements in place with `compare`.
    pub fn sort<F>(&mut self, compare: F) -> &mut Self
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        self.items.sort_by(compare);
        self
    }

    /// Iterates over `(index, element)` pairs in ascending index order.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(&self.items)
    }

    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    /// Returns a copy of the elements.
    pub fn to_array(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.items.clone()
    }

    pub fn into_vec(self) -> Vec<T> {
        self.items
    }

    /// Serializes the elements as a compact JSON array.
    pub fn to_json(&self) -> Result<String, serde_json::Error>
    where
        T: Serialize,
    {
        serde_json::to_string(&self.items)
    }

    fn validate_index<I>(&self, index: I) -> Result<usize, CollectionError>
    where
        I: TryInto<usize>,
    {
        let index = index
            .try_into()
            .map_err(|_| CollectionError::InvalidIndex)?;
        if index >= self.items.len() {
            return Err(CollectionError::OutOfRange {
                index,
                len: self.items.len(),
            });
        }
        Ok(index)
    }

    /// Like `validate_index`, logging the rejection for callers that fail on it.
    fn locate<I>(&self, index: I) -> Result<usize, CollectionError>
    where
        I: TryInto<usize>,
    {
        self.validate_index(index).map_err(|err| {
            debug!(%err, "Rejecting index");
            err
        })
    }

    fn validate_element(&self, element: &T) -> Result<(), CollectionError> {
        let Some(expected) = self.constraint else {
            return Ok(());
        };
        let found = element.type_tag();
        if found != expected {
            debug!(?expected, ?found, "Rejecting element of wrong type");
            return Err(CollectionError::TypeMismatch {
                expected: format!("{expected:?}"),
                found: format!("{found:?}"),
            });
        }
        Ok(())
    }
}

impl<T, P> Default for Collection<T, P>
where
    T: Typed,
    P: InsertionPolicy<T> + Default,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T, P> Clone for Collection<T, P>
where
    T: Typed + Clone,
    P: Clone,
{
    fn clone(&self) -> Self {
        Collection {
            items: self.items.clone(),
            constraint: self.constraint,
            policy: self.policy.clone(),
        }
    }
}

impl<T, P> fmt::Debug for Collection<T, P>
where
    T: Typed + fmt::Debug,
    P: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Collection")
            .field("items", &self.items)
            .field("constraint", &self.constraint)
            .field("policy", &self.policy)
            .finish()
    }
}

impl<T, P> PartialEq for Collection<T, P>
where
    T: Typed + PartialEq,
    P: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.items == other.items
            && self.constraint == other.constraint
            && self.policy == other.policy
    }
}

impl<T, P> Eq for Collection<T, P>
where
    T: Typed + Eq,
    P: Eq,
{
}

impl<T: Typed, P> Index<usize> for Collection<T, P> {
    type Output = T;

    /// Panics if `index` is out of bounds, like indexing a slice.
    /// Use [`Collection::at`] for a checked lookup.
    fn index(&self, index: usize) -> &T {
        &self.items[index]
    }
}

impl<T: Typed, P> AsRef<[T]> for Collection<T, P> {
    fn as_ref(&self) -> &[T] {
        &self.items
    }
}

impl<T: Typed, P> From<Collection<T, P>> for Vec<T> {
    fn from(collection: Collection<T, P>) -> Vec<T> {
        collection.items
    }
}

impl<'a, T, P> IntoIterator for &'a Collection<T, P>
where
    T: Typed,
    P: InsertionPolicy<T>,
{
    type Item = (usize, &'a T);
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

impl<T: Typed, P> IntoIterator for Collection<T, P> {
    type Item = (usize, T);
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> IntoIter<T> {
        IntoIter::new(self.items)
    }
}

impl<T, P> Serialize for Collection<T, P>
where
    T: Typed + Serialize,
{
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.items.serialize(serializer)
    }
}

impl<'de, T, P> Deserialize<'de> for Collection<T, P>
where
    T: Typed + Deserialize<'de>,
    P: InsertionPolicy<T> + Default,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let mut collection = Self::new();
        collection.items = Vec::<T>::deserialize(deserializer)?;
        Ok(collection)
    }
}
