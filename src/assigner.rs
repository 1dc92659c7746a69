//! Filepath: src/assigner.rs
//!
//! [`NumberAssigner`]: configuration and the four-stage pipeline.
//!
//! ```text
//! Snapshot -> RankPermutation -> (spare, on demand) -> CycleRewriter
//! ```
//!
//! Only the last stage writes to the elements.

use crate::element::Element;
use crate::error::AssignError;
use crate::permutation::RankPermutation;
use crate::report::WriteReport;
use crate::rewrite::{CycleRewriter, RewritePlan};
use crate::snapshot::Snapshot;
use crate::spare::find_spare;
use crate::tracing_helpers::debug_log;

/// What the elements should hold after a pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum AssignMode {
    /// Dense ranks: the element with the k-th smallest number gets `k`.
    #[default]
    Rank,

    /// Keep the existing numbers but move them so the collection reads in
    /// ascending order: position `p` gets the `p`-th smallest number.
    Redistribute,
}

/// Renumbers a collection of [`Element`]s with a minimal number of writes.
///
/// # Example
///
/// ```rust
/// use renumber::{AssignMode, Number, NumberAssigner};
///
/// let mut numbers: Vec<Number> = vec![1, 0];
///
/// // Ranks of [1, 0] are [1, 0]: nothing to do.
/// let report = NumberAssigner::new().assign(numbers.iter_mut())?;
/// assert_eq!(report.writes, 0);
///
/// // Sorting the numbers into place is a 2-cycle: spare, then both targets.
/// let report = NumberAssigner::new()
///     .mode(AssignMode::Redistribute)
///     .assign(numbers.iter_mut())?;
/// assert_eq!(numbers, vec![0, 1]);
/// assert_eq!(report.writes, 3);
/// # Ok::<(), renumber::AssignError>(())
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NumberAssigner {
    mode: AssignMode,
}

impl NumberAssigner {
    /// Assigner with the default [`AssignMode::Rank`].
    #[must_use]
    pub const fn new() -> Self {
        Self {
            mode: AssignMode::Rank,
        }
    }

    /// Select what the elements should hold afterwards.
    #[must_use]
    pub const fn mode(mut self, mode: AssignMode) -> Self {
        self.mode = mode;
        self
    }

    /// The configured mode.
    #[must_use]
    pub const fn assign_mode(&self) -> AssignMode {
        self.mode
    }

    /// Renumber `elements` in place.
    ///
    /// Elements that already hold their final number are not written.
    /// For pairwise-distinct inputs no write ever duplicates a number
    /// another element still holds. At most `ceil(3N/2)` writes are made.
    ///
    /// # Errors
    ///
    /// Returns [`AssignError`] if the input breaks its contract. This is
    /// detected before any write.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(level = "debug", skip(elements), err)
    )]
    pub fn assign<'a, E, I>(&self, elements: I) -> Result<WriteReport, AssignError>
    where
        E: Element + ?Sized + 'a,
        I: IntoIterator<Item = &'a mut E>,
        I::IntoIter: ExactSizeIterator,
    {
        let mut snapshot: Snapshot<'a, E> = Snapshot::capture(elements)?;

        if snapshot.is_empty() {
            return Ok(WriteReport::default());
        }

        let perm = RankPermutation::derive(snapshot.numbers());

        let plan: RewritePlan = match self.mode {
            AssignMode::Rank => RewritePlan::ranks(snapshot.numbers(), &perm),
            AssignMode::Redistribute => RewritePlan::redistribute(snapshot.numbers(), &perm),
        };

        debug_log!(
            len = plan.len(),
            fixed_points = plan.fixed_points(),
            "rewrite planned"
        );

        // The spare is computed from the captured numbers; writes never
        // introduce a value outside those numbers and the rank range.
        let numbers = snapshot.numbers().to_vec();
        let floor = snapshot.len_number();
        let report = CycleRewriter::new(&plan)
            .run(&mut snapshot, || find_spare(&numbers, &perm, floor));

        debug_assert!(report.writes <= report.write_bound());

        Ok(report)
    }
}

/// Renumber `elements` into dense rank order using the default assigner.
///
/// ```rust
/// let mut numbers: Vec<i64> = vec![8, 7, 3, 6, 2, 1, 4];
/// renumber::assign_numbers(numbers.iter_mut())?;
///
/// assert_eq!(numbers, vec![6, 5, 2, 4, 1, 0, 3]);
/// # Ok::<(), renumber::AssignError>(())
/// ```
///
/// # Errors
///
/// See [`NumberAssigner::assign`].
pub fn assign_numbers<'a, E, I>(elements: I) -> Result<WriteReport, AssignError>
where
    E: Element + ?Sized + 'a,
    I: IntoIterator<Item = &'a mut E>,
    I::IntoIter: ExactSizeIterator,
{
    NumberAssigner::new().assign(elements)
}
