//! Label equivalence resolution
//!
//! Provisional labels that the sequential labeler found touching each other
//! are merged here. The recorded collisions are edges of an undirected graph
//! over label ids; a disjoint-set forest collapses each connected component
//! of that graph onto its smallest label, and the surviving roots are then
//! renumbered into a gap-free range starting at [`MIN_LABEL`].

use crate::error::{RegionError, RegionResult};
use crate::grid::MIN_LABEL;
use std::collections::HashSet;

/// Unordered pair of colliding labels, stored as `(smaller, larger)`
pub type Collision = (i32, i32);

/// Set of label collisions gathered during provisional labeling
#[derive(Debug, Clone, Default)]
pub struct CollisionSet {
    pairs: HashSet<Collision>,
}

impl CollisionSet {
    /// Create an empty collision set
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that labels `a` and `b` belong to the same region.
    ///
    /// The pair is normalized so `(a, b)` and `(b, a)` are one entry.
    /// Self-collisions are ignored.
    pub fn register(&mut self, a: i32, b: i32) {
        if a != b {
            self.pairs.insert((a.min(b), a.max(b)));
        }
    }

    /// Number of distinct pairs recorded
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Check whether no collision was recorded
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Iterate over the recorded pairs in unspecified order
    pub fn iter(&self) -> impl Iterator<Item = &Collision> {
        self.pairs.iter()
    }
}

/// Disjoint-set forest over label ids `0..size`.
///
/// The root of every set is its smallest member, so resolution does not
/// depend on the order in which collisions are visited.
#[derive(Debug, Clone)]
pub struct LabelEquivalence {
    parent: Vec<i32>,
}

impl LabelEquivalence {
    /// Create a forest in which every label is its own set
    pub fn new(size: usize) -> Self {
        Self {
            parent: (0..size as i32).collect(),
        }
    }

    /// Number of label ids covered
    pub fn size(&self) -> usize {
        self.parent.len()
    }

    fn check(&self, label: i32) -> RegionResult<usize> {
        if label >= 0 && (label as usize) < self.parent.len() {
            Ok(label as usize)
        } else {
            Err(RegionError::LabelOutOfRange {
                label,
                table_size: self.parent.len(),
            })
        }
    }

    /// Find the representative (smallest label) of the set containing `label`.
    ///
    /// # Errors
    ///
    /// Returns [`RegionError::LabelOutOfRange`] if `label` is not covered.
    pub fn find(&mut self, label: i32) -> RegionResult<i32> {
        let mut root = self.check(label)?;
        while self.parent[root] as usize != root {
            // path halving
            let grandparent = self.parent[self.parent[root] as usize];
            self.parent[root] = grandparent;
            root = grandparent as usize;
        }
        Ok(root as i32)
    }

    /// Merge the sets containing `a` and `b`.
    ///
    /// # Errors
    ///
    /// Returns [`RegionError::LabelOutOfRange`] if either label is not covered.
    pub fn union(&mut self, a: i32, b: i32) -> RegionResult<()> {
        let root_a = self.find(a)?;
        let root_b = self.find(b)?;
        if root_a < root_b {
            self.parent[root_b as usize] = root_a;
        } else if root_b < root_a {
            self.parent[root_a as usize] = root_b;
        }
        Ok(())
    }

    /// Build the `provisional -> final` replacement table.
    ///
    /// Entries 0 and 1 map to themselves. Of the labels in
    /// `MIN_LABEL..size`, those for which `used` returns true are resolved to
    /// their root, and the distinct roots are renumbered in ascending order
    /// starting at [`MIN_LABEL`]. Unused labels map to 0.
    ///
    /// Returns the table and the largest final label (0 if none).
    pub fn replacement_table<F>(&mut self, used: F) -> RegionResult<(Vec<i32>, i32)>
    where
        F: Fn(i32) -> bool,
    {
        let size = self.parent.len();
        let mut compacted = vec![0i32; size];
        let mut table = vec![0i32; size];
        for (i, entry) in table.iter_mut().enumerate().take((MIN_LABEL as usize).min(size)) {
            *entry = i as i32;
        }

        // roots are never larger than their members, so visiting labels in
        // ascending order assigns compact ids in ascending root order
        let mut next = MIN_LABEL;
        let mut max_label = 0;
        for label in MIN_LABEL..size as i32 {
            if !used(label) {
                continue;
            }
            let root = self.find(label)?;
            let slot = compacted.get_mut(root as usize).ok_or(RegionError::LabelOutOfRange {
                label: root,
                table_size: size,
            })?;
            if *slot == 0 {
                *slot = next;
                max_label = next;
                next += 1;
            }
            table[label as usize] = *slot;
        }

        Ok((table, max_label))
    }
}

/// Resolve `collisions` over labels `0..=max_label`.
///
/// Every label that occurs in the grid (`used`) ends up mapped to the final
/// label of its equivalence class; see
/// [`LabelEquivalence::replacement_table`].
///
/// # Errors
///
/// Returns [`RegionError::LabelOutOfRange`] if a collision names a label
/// beyond `max_label`.
pub fn resolve_collisions<F>(
    collisions: &CollisionSet,
    max_label: i32,
    used: F,
) -> RegionResult<(Vec<i32>, i32)>
where
    F: Fn(i32) -> bool,
{
    let mut forest = LabelEquivalence::new(max_label.max(0) as usize + 1);
    for &(a, b) in collisions.iter() {
        forest.union(a, b)?;
    }
    forest.replacement_table(used)
}
