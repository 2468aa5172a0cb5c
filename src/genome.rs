//! Set-encoded genomes.
//!
//! A [`Genome`] is a set of distinct item identifiers. The set is ordered, so
//! iterating over it, and thus picking a random member, is reproducible for a
//! fixed random source.

use std::{collections::BTreeSet, fmt};

use itertools::Itertools;

/// Identifier of an item of the universe `[0, universe)`.
pub type Item = usize;

/// A set of distinct items. May be empty.
#[derive(Clone, PartialEq, Eq, Hash, Debug, Default)]
pub struct Genome(BTreeSet<Item>);

impl Genome {
  /// Creates an empty genome.
  pub fn new() -> Self {
    Self::default()
  }

  /// Returns the number of items in the genome.
  pub fn len(&self) -> usize {
    self.0.len()
  }

  /// Returns `true` if the genome contains no items.
  pub fn is_empty(&self) -> bool {
    self.0.is_empty()
  }

  /// Returns `true` if the genome contains `item`.
  pub fn contains(&self, item: Item) -> bool {
    self.0.contains(&item)
  }

  /// Adds an item. Returns `false` if it was already present.
  pub fn insert(&mut self, item: Item) -> bool {
    self.0.insert(item)
  }

  /// Removes an item. Returns `false` if it wasn't present.
  pub fn remove(&mut self, item: Item) -> bool {
    self.0.remove(&item)
  }

  /// Returns the `n`-th smallest item.
  pub fn nth(&self, n: usize) -> Option<Item> {
    self.0.iter().nth(n).copied()
  }

  /// Iterates over items in ascending order.
  pub fn iter(&self) -> impl ExactSizeIterator<Item = Item> + '_ {
    self.0.iter().copied()
  }

  /// Returns `true` if every item lies in `[0, universe)`.
  pub fn is_within(&self, universe: usize) -> bool {
    self.0.last().map_or(true, |&item| item < universe)
  }

  /// Crosses two genomes. The first child holds the items common to both
  /// parents, the second one holds the items found in exactly one of them.
  ///
  /// Children never share an item and together hold every item of both
  /// parents.
  ///
  /// # Examples
  /// ```
  /// # use setmoga::genome::Genome;
  /// let a = Genome::from_iter([1, 2, 3]);
  /// let b = Genome::from_iter([2, 3, 4]);
  /// let (common, unique) = a.cross(b);
  /// assert_eq!(common, Genome::from_iter([2, 3]));
  /// assert_eq!(unique, Genome::from_iter([1, 4]));
  /// ```
  pub fn cross(self, other: Self) -> (Self, Self) {
    let common = self.0.intersection(&other.0).copied().collect();
    let unique = self.0.symmetric_difference(&other.0).copied().collect();
    (Self(common), Self(unique))
  }
}

impl FromIterator<Item> for Genome {
  fn from_iter<T: IntoIterator<Item = Item>>(iter: T) -> Self {
    Self(iter.into_iter().collect())
  }
}

impl IntoIterator for Genome {
  type Item = Item;
  type IntoIter = std::collections::btree_set::IntoIter<Item>;

  fn into_iter(self) -> Self::IntoIter {
    self.0.into_iter()
  }
}

impl fmt::Display for Genome {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{{{}}}", self.0.iter().join(", "))
  }
}

#[cfg(test)]
mod tests {
  use proptest::prelude::*;

  use super::*;

  fn genome(universe: usize) -> impl Strategy<Value = Genome> {
    prop::collection::btree_set(0..universe, 0..universe).prop_map(Genome)
  }

  #[test]
  fn test_set_semantics() {
    let mut g = Genome::from_iter([3, 1, 3, 2]);
    assert_eq!(g.len(), 3);
    assert!(!g.insert(1));
    assert!(g.insert(7));
    assert!(g.remove(3));
    assert!(!g.remove(3));
    assert_eq!(g.iter().collect::<Vec<_>>(), [1, 2, 7]);
    assert_eq!(g.nth(2), Some(7));
    assert_eq!(g.nth(3), None);
  }

  #[test]
  fn test_is_within() {
    assert!(Genome::new().is_within(0));
    assert!(Genome::from_iter([0, 4]).is_within(5));
    assert!(!Genome::from_iter([0, 5]).is_within(5));
  }

  #[test]
  fn test_display() {
    assert_eq!(Genome::new().to_string(), "{}");
    assert_eq!(Genome::from_iter([4, 0, 2]).to_string(), "{0, 2, 4}");
  }

  #[test]
  fn test_cross_degenerate_parents() {
    let (common, unique) = Genome::new().cross(Genome::new());
    assert!(common.is_empty());
    assert!(unique.is_empty());

    let a = Genome::from_iter([1, 5, 9]);
    let (common, unique) = a.clone().cross(a.clone());
    assert_eq!(common, a);
    assert!(unique.is_empty());

    let (common, unique) = a.clone().cross(Genome::new());
    assert!(common.is_empty());
    assert_eq!(unique, a);
  }

  proptest! {
    #[test]
    fn cross_conserves_items(a in genome(32), b in genome(32)) {
      let union: BTreeSet<_> = a.0.union(&b.0).copied().collect();
      let (common, unique) = a.cross(b);
      prop_assert!(common.0.is_disjoint(&unique.0));
      let joined: BTreeSet<_> = common.0.union(&unique.0).copied().collect();
      prop_assert_eq!(joined, union);
    }

    #[test]
    fn cross_stays_within_universe(a in genome(16), b in genome(16)) {
      let (common, unique) = a.cross(b);
      prop_assert!(common.is_within(16));
      prop_assert!(unique.is_within(16));
    }
  }
}
