//! Filepath: src/spare.rs
//!
//! Stage 3: choose the spare value used to break rewrite cycles.
//!
//! The spare is parked in one element of a cycle while the rest of the cycle
//! rotates. It must never be mistaken for a final target and must never
//! duplicate a number some element still holds:
//!
//! - Final ranks are `0..len`, so anything `>= len` is never a target.
//! - Among values `>= len`, take the smallest one no element holds.
//!
//! Finding it takes a single scan of the sorted order, starting at the first
//! rank whose number is `>= len`. The scan stops at the first gap.

use crate::element::Number;
use crate::permutation::RankPermutation;

/// Smallest `spare >= floor` that does not appear in `numbers`.
///
/// `perm` must be the [`RankPermutation`] derived from `numbers`. Pass the
/// collection length as `floor` to stay clear of every final rank.
#[must_use]
#[cfg_attr(
    feature = "tracing",
    tracing::instrument(level = "debug", skip(numbers, perm), ret)
)]
pub fn find_spare(numbers: &[Number], perm: &RankPermutation, floor: Number) -> Number {
    debug_assert_eq!(numbers.len(), perm.len());

    let from_pos: &[usize] = perm.from_pos();
    let start: usize = from_pos.partition_point(|&index| numbers[index] < floor);
    let mut spare: Number = floor;

    for &index in &from_pos[start..] {
        let number: Number = numbers[index];

        if number > spare {
            break;
        }

        // Duplicates of an already-passed value compare below `spare`.
        if number == spare {
            spare += 1;
        }
    }

    spare
}
