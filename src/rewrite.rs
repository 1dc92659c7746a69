//! Filepath: src/rewrite.rs
//!
//! Stage 4: write every element's final number with as few writes as possible.
//!
//! # Plan
//!
//! A [`RewritePlan`] gives every element a target number and at most one
//! *successor*: the pending element whose target is this element's current
//! number. A successor cannot be written until its predecessor has moved
//! off that value, otherwise two elements would hold the same number.
//!
//! Elements already holding their target are fixed points. They are never
//! written and never appear as successors.
//!
//! # Execution
//!
//! Every pending element has out-degree at most one, so the successor graph
//! is a set of chains hanging off closed cycles.
//!
//! 1. **Chains.** Repeatedly write any pending element whose target value is
//!    free (in-degree zero), then release its successor. One write each.
//! 2. **Cycles.** Whatever is left is a union of closed cycles of length
//!    L >= 2. Park the spare in the entry element, walk the successors
//!    writing each target, and finish by writing the entry's target. L + 1
//!    writes per cycle.
//!
//! With one spare write per cycle of at least two elements, the total never
//! exceeds `ceil(3N/2)`. All 2-cycles reach the bound exactly. No element is
//! written more than twice.
//!
//! Rank plans never contain cycles. Ranks preserve the order of numbers, so
//! following successors from the lowest-ranked element of a would-be cycle
//! yields a contradiction. Only redistribute plans reach step 2.

use crate::element::{Element, Number};
use crate::permutation::RankPermutation;
use crate::report::WriteReport;
use crate::snapshot::Snapshot;
use crate::tracing_helpers::{debug_log, trace_log};

// ============================================================================
//  RewritePlan
// ============================================================================

/// Final numbers plus the order constraints between writes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RewritePlan {
    targets: Vec<Number>,
    pending: Vec<bool>,
    successor: Vec<Option<usize>>,
}

impl RewritePlan {
    /// Plan for dense ranking: element `i` ends up holding `to_pos[i]`.
    ///
    /// The successor of `j` is the element whose rank equals `j`'s current
    /// number, if that number lies in `0..len`.
    #[must_use]
    pub fn ranks(numbers: &[Number], perm: &RankPermutation) -> Self {
        let len: usize = numbers.len();
        debug_assert_eq!(len, perm.len());

        let targets: Vec<Number> = perm.to_pos().iter().map(|&rank| rank_number(rank)).collect();
        let pending: Vec<bool> = Self::pending_mask(numbers, &targets);

        // waiter[r] = pending element whose final rank is r
        let mut waiter: Vec<Option<usize>> = vec![None; len];
        for (index, &rank) in perm.to_pos().iter().enumerate() {
            if pending[index] {
                waiter[rank] = Some(index);
            }
        }

        let successor: Vec<Option<usize>> = numbers
            .iter()
            .enumerate()
            .map(|(index, &number)| {
                if !pending[index] {
                    return None;
                }

                usize::try_from(number)
                    .ok()
                    .and_then(|value| waiter.get(value).copied().flatten())
                    .filter(|&next| next != index)
            })
            .collect();

        Self {
            targets,
            pending,
            successor,
        }
    }

    /// Plan for redistribution: the existing numbers are moved so the
    /// element at position `p` holds the `p`-th smallest one.
    ///
    /// Element `j`'s number travels to position `to_pos[j]`, which is
    /// therefore its successor.
    #[must_use]
    pub fn redistribute(numbers: &[Number], perm: &RankPermutation) -> Self {
        debug_assert_eq!(numbers.len(), perm.len());

        let targets: Vec<Number> = perm.from_pos().iter().map(|&index| numbers[index]).collect();
        let pending: Vec<bool> = Self::pending_mask(numbers, &targets);

        let successor: Vec<Option<usize>> = perm
            .to_pos()
            .iter()
            .enumerate()
            .map(|(index, &next)| (pending[index] && pending[next] && next != index).then_some(next))
            .collect();

        Self {
            targets,
            pending,
            successor,
        }
    }

    fn pending_mask(numbers: &[Number], targets: &[Number]) -> Vec<bool> {
        numbers.iter().zip(targets).map(|(current, target)| current != target).collect()
    }

    /// Number of elements covered by the plan.
    #[must_use]
    #[inline]
    pub fn len(&self) -> usize {
        self.targets.len()
    }

    /// Whether the plan covers no elements.
    #[must_use]
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    /// Final number for every element, indexed like the input.
    #[must_use]
    #[inline]
    pub fn targets(&self) -> &[Number] {
        &self.targets
    }

    /// Whether element `index` needs at least one write.
    #[must_use]
    #[inline]
    pub fn is_pending(&self, index: usize) -> bool {
        self.pending[index]
    }

    /// Element that must wait for `index` to move before it can be written.
    #[must_use]
    #[inline]
    pub fn successor(&self, index: usize) -> Option<usize> {
        self.successor[index]
    }

    /// Elements that need no write.
    #[must_use]
    pub fn fixed_points(&self) -> usize {
        self.pending.iter().filter(|&&p| !p).count()
    }
}

/// Rank as a [`Number`]. Snapshot capture guarantees every rank fits.
#[inline]
#[allow(clippy::cast_possible_wrap)]
const fn rank_number(rank: usize) -> Number {
    rank as Number
}

// ============================================================================
//  CycleRewriter
// ============================================================================

/// Executes a [`RewritePlan`] against a [`Snapshot`].
pub struct CycleRewriter<'p> {
    plan: &'p RewritePlan,
    done: Vec<bool>,
    writes: usize,
    cycles: usize,
}

impl<'p> CycleRewriter<'p> {
    /// Prepare to execute `plan`.
    #[must_use]
    pub fn new(plan: &'p RewritePlan) -> Self {
        Self {
            plan,
            done: vec![false; plan.len()],
            writes: 0,
            cycles: 0,
        }
    }

    /// Write every pending element of the plan.
    ///
    /// `find_spare` is called at most once, and only if some cycle needs
    /// breaking. It must return a value that no element currently holds
    /// and that is not a target.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(level = "debug", skip_all, fields(len = self.plan.len()))
    )]
    pub fn run<E, F>(mut self, snapshot: &mut Snapshot<'_, E>, mut find_spare: F) -> WriteReport
    where
        E: Element + ?Sized,
        F: FnMut() -> Number,
    {
        debug_assert_eq!(snapshot.len(), self.plan.len());

        self.write_chains(snapshot);

        let mut spare: Option<Number> = None;

        for entry in 0..self.plan.len() {
            if !self.plan.is_pending(entry) || self.done[entry] {
                continue;
            }

            let value: Number = *spare.get_or_insert_with(&mut find_spare);
            self.write_cycle(snapshot, entry, value);
        }

        let report = WriteReport {
            len: self.plan.len(),
            writes: self.writes,
            fixed_points: self.plan.fixed_points(),
            cycles: self.cycles,
            spare,
        };

        debug_log!(
            writes = report.writes,
            fixed_points = report.fixed_points,
            cycles = report.cycles,
            "rewrite finished"
        );

        report
    }

    /// Step 1: drain every pending element whose target value is free.
    fn write_chains<E: Element + ?Sized>(&mut self, snapshot: &mut Snapshot<'_, E>) {
        let len: usize = self.plan.len();
        let mut blockers: Vec<usize> = vec![0; len];

        for index in 0..len {
            if let Some(next) = self.plan.successor(index) {
                blockers[next] += 1;
            }
        }

        let mut ready: Vec<usize> = (0..len)
            .rev()
            .filter(|&index| self.plan.is_pending(index) && blockers[index] == 0)
            .collect();

        while let Some(index) = ready.pop() {
            self.finalize(snapshot, index);

            if let Some(next) = self.plan.successor(index) {
                blockers[next] -= 1;

                if blockers[next] == 0 {
                    ready.push(next);
                }
            }
        }

        trace_log!(writes = self.writes, "chains written");
    }

    /// Step 2: rotate one closed cycle through the spare.
    fn write_cycle<E: Element + ?Sized>(
        &mut self,
        snapshot: &mut Snapshot<'_, E>,
        entry: usize,
        spare: Number,
    ) {
        // Park the spare so the entry's number is free for its successor.
        snapshot.write(entry, spare);
        self.writes += 1;

        let mut length: usize = 1;
        let mut cursor: Option<usize> = self.plan.successor(entry);

        while let Some(index) = cursor {
            if index == entry {
                break;
            }

            self.finalize(snapshot, index);
            length += 1;
            cursor = self.plan.successor(index);
        }

        debug_assert_eq!(cursor, Some(entry), "rewrite cycle did not close");

        self.finalize(snapshot, entry);
        self.cycles += 1;

        debug_log!(entry, length, spare, "cycle rotated");
    }

    #[inline]
    fn finalize<E: Element + ?Sized>(&mut self, snapshot: &mut Snapshot<'_, E>, index: usize) {
        debug_assert!(!self.done[index], "element {index} finalized twice");

        snapshot.write(index, self.plan.targets[index]);
        self.done[index] = true;
        self.writes += 1;
    }
}
