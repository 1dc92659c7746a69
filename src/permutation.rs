//! Filepath: src/permutation.rs
//!
//! Stage 2: derive the rank permutation from the captured numbers.
//!
//! [`RankPermutation`] holds both directions of the mapping:
//!
//! - `from_pos[rank]`: input index of the element holding the rank-th
//!   smallest number.
//! - `to_pos[index]`: rank of the element at input `index`.
//!
//! Ties are broken by input position (the sort is stable), so equal numbers
//! keep their relative order.
//!
//! ```text
//! numbers:  8 7 3 6 2 1 4
//! sorted:   1 2 3 4 6 7 8
//! from_pos: 5 4 2 6 3 1 0
//! to_pos:   6 5 2 4 1 0 3
//! ```

use crate::element::Number;

/// A permutation of `0..len` together with its inverse.
///
/// # Invariants
///
/// - `from_pos` and `to_pos` are both permutations of `0..len`.
/// - `to_pos[from_pos[r]] == r` and `from_pos[to_pos[i]] == i`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RankPermutation {
    from_pos: Vec<usize>,
    to_pos: Vec<usize>,
}

impl RankPermutation {
    /// Rank `numbers` ascending, breaking ties by index.
    ///
    /// O(N log N) time, two O(N) index arrays. `numbers` is only read.
    #[must_use]
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(level = "debug", skip_all, fields(len = numbers.len()))
    )]
    pub fn derive(numbers: &[Number]) -> Self {
        let mut from_pos: Vec<usize> = (0..numbers.len()).collect();

        // Stable: equal numbers keep their input order.
        from_pos.sort_by_key(|&index| numbers[index]);

        let to_pos: Vec<usize> = Self::invert(&from_pos);
        let perm = Self { from_pos, to_pos };

        #[cfg(debug_assertions)]
        perm.debug_assert_valid();

        perm
    }

    /// Inverse of `perm` in a single linear pass.
    fn invert(perm: &[usize]) -> Vec<usize> {
        let mut inverse: Vec<usize> = vec![0; perm.len()];

        for (rank, &index) in perm.iter().enumerate() {
            inverse[index] = rank;
        }

        inverse
    }

    /// Number of ranked elements.
    #[must_use]
    #[inline]
    pub fn len(&self) -> usize {
        self.from_pos.len()
    }

    /// Whether there is nothing to rank.
    #[must_use]
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.from_pos.is_empty()
    }

    /// Rank to input index.
    #[must_use]
    #[inline]
    pub fn from_pos(&self) -> &[usize] {
        &self.from_pos
    }

    /// Input index to rank.
    #[must_use]
    #[inline]
    pub fn to_pos(&self) -> &[usize] {
        &self.to_pos
    }

    /// Rank of the element at input `index`.
    ///
    /// # Panics
    /// Panics if `index >= len()`.
    #[must_use]
    #[inline]
    pub fn rank_of(&self, index: usize) -> usize {
        self.to_pos[index]
    }

    /// Input index of the element with the given `rank`.
    ///
    /// # Panics
    /// Panics if `rank >= len()`.
    #[must_use]
    #[inline]
    pub fn index_at(&self, rank: usize) -> usize {
        self.from_pos[rank]
    }

    /// Whether every element already sits at its own rank.
    #[must_use]
    pub fn is_identity(&self) -> bool {
        self.to_pos.iter().enumerate().all(|(i, &r)| i == r)
    }

    /// Iterate the non-trivial cycles of `to_pos`.
    ///
    /// Each cycle is reported once, starting from its lowest index and
    /// following `i -> to_pos[i]`. Fixed points are skipped.
    #[must_use]
    pub fn cycles(&self) -> Cycles<'_> {
        Cycles {
            to_pos: &self.to_pos,
            visited: vec![false; self.to_pos.len()],
            next: 0,
        }
    }

    #[cfg(debug_assertions)]
    fn debug_assert_valid(&self) {
        debug_assert_eq!(self.from_pos.len(), self.to_pos.len());

        for (rank, &index) in self.from_pos.iter().enumerate() {
            debug_assert_eq!(
                self.to_pos[index], rank,
                "to_pos is not the inverse of from_pos at rank {rank}"
            );
        }
    }
}

/// Iterator over the cycles of a [`RankPermutation`]. See
/// [`RankPermutation::cycles`].
#[derive(Debug)]
pub struct Cycles<'a> {
    to_pos: &'a [usize],
    visited: Vec<bool>,
    next: usize,
}

impl Iterator for Cycles<'_> {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        while self.next < self.to_pos.len() {
            let start: usize = self.next;
            self.next += 1;

            if self.visited[start] || self.to_pos[start] == start {
                continue;
            }

            let mut cycle: Vec<usize> = Vec::new();
            let mut index: usize = start;

            while !self.visited[index] {
                self.visited[index] = true;
                cycle.push(index);
                index = self.to_pos[index];
            }

            debug_assert_eq!(index, start, "cycle did not close");
            return Some(cycle);
        }

        None
    }
}
