//! # `renumber`
//!
//! Rewrite the integer numbers carried by a collection of elements into dense
//! rank order, using as few writes as possible.
//!
//! Each element holds a number. After a pass, the element with the k-th
//! smallest number holds `k`, and ties keep their input order. Writes are
//! treated as the expensive primitive, because elements usually stand in for
//! persisted records:
//!
//! - Elements that already hold their final number are never written.
//! - No write duplicates a number another element still holds, as long as
//!   the input numbers were distinct.
//! - A pass never makes more than `ceil(3N/2)` writes. Dense ranking needs
//!   at most `N`.
//!
//! ```rust
//! use renumber::Number;
//!
//! let mut numbers: Vec<Number> = vec![8, 7, 3, 6, 2, 1, 4];
//! let report = renumber::assign_numbers(numbers.iter_mut())?;
//!
//! assert_eq!(numbers, vec![6, 5, 2, 4, 1, 0, 3]);
//! assert!(report.writes <= report.write_bound());
//! # Ok::<(), renumber::AssignError>(())
//! ```
//!
//! ## Design
//!
//! A pass runs four stages. Only the last one writes:
//!
//! | Stage | Module |
//! |-------|--------|
//! | Snapshot the collection, read every number once | [`snapshot`] |
//! | Derive rank permutation `from_pos` / `to_pos` | [`permutation`] |
//! | Pick a spare value for breaking cycles | [`spare`] |
//! | Write chains, then rotate cycles through the spare | [`rewrite`] |
//!
//! [`AssignMode::Redistribute`] keeps the existing numbers and moves them so
//! that the collection reads in ascending order. That is the mode where the
//! permutation's cycles, and therefore the spare, actually come into play.
//!
//! ## Logging
//!
//! Enable the `tracing` feature to get per-stage spans and per-write events.
//! Call [`init_tracing`] (or install your own subscriber) to see them.

#![deny(missing_docs)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod assigner;
pub mod element;
pub mod error;
pub mod permutation;
pub mod report;
pub mod rewrite;
pub mod snapshot;
pub mod spare;

mod tracing_helpers;

// Re-export main types for convenience
pub use assigner::{AssignMode, NumberAssigner, assign_numbers};
pub use element::{Element, Number};
pub use error::AssignError;
pub use permutation::RankPermutation;
pub use report::WriteReport;

/// Install a `tracing` subscriber filtered by `RUST_LOG`.
///
/// Defaults to `renumber=info` when `RUST_LOG` is unset. Safe to call more
/// than once; later calls are ignored. Without the `tracing` feature this
/// does nothing.
pub fn init_tracing() {
    #[cfg(feature = "tracing")]
    {
        use tracing_subscriber::EnvFilter;

        let filter: EnvFilter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("renumber=info"));

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .with_writer(std::io::stderr)
            .compact()
            .try_init();
    }
}
