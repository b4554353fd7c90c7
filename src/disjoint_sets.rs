//! Disjoint sets (union-find) over densely assigned integer labels.
//!
//! Labels are handed out sequentially starting at 1; label 0 is reserved to mean "unassigned" so
//! callers can store labels in plain integer fields. Storage starts at a default capacity and
//! doubles whenever a new label would not fit.

/// A label for a member of a disjoint set.
pub type Label = usize;

/// The reserved label for something that has not been assigned a set.
pub const UNASSIGNED: Label = 0;

/// Initial storage capacity, in labels.
const DEFAULT_CAPACITY: usize = 128;

/// Disjoint sets with union by rank and path compression, stored as parallel rank and parent
/// arrays indexed by label.
#[derive(Debug, Clone)]
pub struct DisjointSets {
    /// The label to assign to the next made set.
    next_label: Label,
    rank: Vec<u32>,
    parent: Vec<Label>,
}

impl Default for DisjointSets {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }
}

impl DisjointSets {
    /// Create with storage for `capacity` labels (including the reserved label 0).
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(2);
        Self {
            next_label: UNASSIGNED + 1,
            rank: vec![0; capacity],
            parent: (0..capacity).collect(),
        }
    }

    /// The number of labels storage can hold before it must grow.
    pub fn capacity(&self) -> usize {
        self.parent.len()
    }

    /// The number of labels made so far.
    pub fn len(&self) -> usize {
        self.next_label - 1
    }

    /// Make a new singleton set, returning its label.
    pub fn make_set(&mut self) -> Label {
        while self.next_label >= self.capacity() {
            let old_capacity = self.capacity();
            let new_capacity = old_capacity
                .checked_mul(2)
                .expect("disjoint sets capacity should not overflow");
            self.rank.resize(new_capacity, 0);
            self.parent.extend(old_capacity..new_capacity);
        }

        let label = self.next_label;
        self.parent[label] = label;
        self.rank[label] = 0;
        self.next_label += 1;
        label
    }

    /// Find the representative label of the set containing `label`, compressing the path walked.
    ///
    /// # Panics
    ///
    /// If `label` is unassigned or was never made by [`DisjointSets::make_set`].
    pub fn find(&mut self, label: Label) -> Label {
        assert!(
            label != UNASSIGNED && label < self.next_label,
            "label {label} is not a made set"
        );

        let mut root = label;
        while self.parent[root] != root {
            root = self.parent[root];
        }

        // point every label on the path directly at the root
        let mut current = label;
        while self.parent[current] != root {
            let next = self.parent[current];
            self.parent[current] = root;
            current = next;
        }

        root
    }

    /// Merge the sets containing `a` and `b`, returning the representative of the merged set.
    ///
    /// # Panics
    ///
    /// If either label is not a made set.
    pub fn union(&mut self, a: Label, b: Label) -> Label {
        let root_a = self.find(a);
        let root_b = self.find(b);
        if root_a == root_b {
            return root_a;
        }

        match self.rank[root_a].cmp(&self.rank[root_b]) {
            std::cmp::Ordering::Less => {
                self.parent[root_a] = root_b;
                root_b
            }
            std::cmp::Ordering::Greater => {
                self.parent[root_b] = root_a;
                root_a
            }
            std::cmp::Ordering::Equal => {
                self.parent[root_b] = root_a;
                self.rank[root_a] += 1;
                root_a
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_start_at_one() {
        let mut sets = DisjointSets::default();
        assert_eq!(sets.make_set(), 1);
        assert_eq!(sets.make_set(), 2);
        assert_eq!(sets.len(), 2);
    }

    #[test]
    fn singletons_are_their_own_representative() {
        let mut sets = DisjointSets::default();
        let labels: Vec<_> = (0..5).map(|_| sets.make_set()).collect();
        for label in labels {
            assert_eq!(sets.find(label), label);
        }
    }

    #[test]
    fn union_merges_transitively() {
        let mut sets = DisjointSets::default();
        let a = sets.make_set();
        let b = sets.make_set();
        let c = sets.make_set();
        let d = sets.make_set();

        sets.union(a, b);
        sets.union(c, b);
        assert_eq!(sets.find(a), sets.find(c));
        assert_ne!(sets.find(a), sets.find(d));

        let root = sets.union(d, a);
        for label in [a, b, c, d] {
            assert_eq!(sets.find(label), root);
        }
    }

    #[test]
    fn storage_doubles_past_capacity() {
        let mut sets = DisjointSets::with_capacity(4);
        assert_eq!(sets.capacity(), 4);

        let labels: Vec<_> = (0..10).map(|_| sets.make_set()).collect();
        assert_eq!(labels.last(), Some(&10));
        assert_eq!(sets.capacity(), 16);

        // merging across the grown storage still works
        sets.union(labels[0], labels[9]);
        assert_eq!(sets.find(labels[9]), sets.find(labels[0]));
    }

    #[test]
    fn find_is_stable_after_compression() {
        let mut sets = DisjointSets::default();
        let labels: Vec<_> = (0..20).map(|_| sets.make_set()).collect();
        for pair in labels.windows(2) {
            sets.union(pair[0], pair[1]);
        }

        let first: Vec<_> = labels.iter().map(|&label| sets.find(label)).collect();
        let second: Vec<_> = labels.iter().map(|&label| sets.find(label)).collect();
        assert_eq!(first, second);
        assert!(first.iter().all(|&root| root == first[0]));
    }

    #[test]
    #[should_panic(expected = "is not a made set")]
    fn unassigned_label_panics() {
        let mut sets = DisjointSets::default();
        sets.make_set();
        sets.find(UNASSIGNED);
    }
}
