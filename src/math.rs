use std::{collections::BTreeSet, hash::Hash};

/// Type alias for sets, we use this to hide which type of `HashSet` we are actually using.
pub type Set<S> = fxhash::FxHashSet<S>;
/// Type alias for maps, we use this to hide which type of `HashMap` we are actually using.
pub type Map<K, V> = fxhash::FxHashMap<K, V>;

/// A partition groups elements of type `I` into disjoint, non-empty blocks. Throughout the
/// crate the partitioned elements are states of the combined state space of two processes,
/// and two states share a block precisely if refinement has not (yet) told them apart.
///
/// Equality of partitions is order-insensitive: two partitions are equal if they consist of
/// the same blocks, regardless of the order in which the blocks are stored.
#[derive(Debug, Clone)]
pub struct Partition<I: Hash + Eq>(Vec<BTreeSet<I>>);

impl<I: Hash + Eq> std::ops::Deref for Partition<I> {
    type Target = Vec<BTreeSet<I>>;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<'a, I: Hash + Eq> IntoIterator for &'a Partition<I> {
    type Item = &'a BTreeSet<I>;
    type IntoIter = std::slice::Iter<'a, BTreeSet<I>>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl<I: Hash + Eq> PartialEq for Partition<I> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|o| other.contains(o))
    }
}
impl<I: Hash + Eq> Eq for Partition<I> {}

impl<I: Hash + Eq + Ord> Partition<I> {
    /// Returns the size of the partition, i.e. the number of blocks.
    pub fn size(&self) -> usize {
        self.0.len()
    }

    /// Builds a new partition from an iterator that yields iterators which yield
    /// elements of type `I`.
    pub fn new<X: IntoIterator<Item = I>, Y: IntoIterator<Item = X>>(iter: Y) -> Self {
        Self(
            iter.into_iter()
                .map(|it| it.into_iter().collect::<BTreeSet<_>>())
                .collect(),
        )
    }

    /// Builds the trivial partition holding all given elements in a single block.
    pub fn trivial<X: IntoIterator<Item = I>>(elements: X) -> Self {
        Self(vec![elements.into_iter().collect()])
    }

    /// Removes the given block from the partition, returning whether it was present.
    pub fn remove_block(&mut self, block: &BTreeSet<I>) -> bool {
        match self.0.iter().position(|b| b == block) {
            Some(i) => {
                self.0.swap_remove(i);
                true
            }
            None => false,
        }
    }

    /// Appends a block to the partition. The caller guarantees disjointness from the
    /// existing blocks.
    pub fn push_block(&mut self, block: BTreeSet<I>) {
        debug_assert!(!block.is_empty());
        self.0.push(block);
    }

    /// Finds the block containing the given element, if any.
    pub fn block_of(&self, element: &I) -> Option<&BTreeSet<I>> {
        self.0.iter().find(|b| b.contains(element))
    }
}

impl<I: Hash + Eq + Ord> From<Vec<BTreeSet<I>>> for Partition<I> {
    fn from(value: Vec<BTreeSet<I>>) -> Self {
        Self(value)
    }
}
