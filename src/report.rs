//! Filepath: src/report.rs
//!
//! Summary of one renumbering pass.

use std::fmt as StdFmt;

use crate::element::Number;

/// What a pass did to the elements.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WriteReport {
    /// Number of elements in the collection.
    pub len: usize,

    /// Total calls to [`crate::Element::set_number`].
    pub writes: usize,

    /// Elements that already held their final number and were not written.
    pub fixed_points: usize,

    /// Cycles broken with the spare value. Each costs one extra write.
    pub cycles: usize,

    /// Spare value parked in cycle entries, if any cycle needed breaking.
    pub spare: Option<Number>,
}

impl WriteReport {
    /// Upper bound on writes for a collection of this length: `ceil(3 * len / 2)`.
    #[must_use]
    #[inline]
    pub const fn write_bound(&self) -> usize {
        (3 * self.len).div_ceil(2)
    }

    /// Elements that received at least one write.
    #[must_use]
    #[inline]
    pub const fn moved(&self) -> usize {
        self.len - self.fixed_points
    }

    /// Whether the pass left every element untouched.
    #[must_use]
    #[inline]
    pub const fn is_noop(&self) -> bool {
        self.writes == 0
    }
}

impl StdFmt::Display for WriteReport {
    fn fmt(&self, f: &mut StdFmt::Formatter<'_>) -> StdFmt::Result {
        writeln!(f, "Summary:")?;
        writeln!(f, "  Elements:     {}", self.len)?;
        writeln!(f, "  Writes:       {} (bound {})", self.writes, self.write_bound())?;
        writeln!(f, "  Fixed points: {}", self.fixed_points)?;
        write!(f, "  Cycles:       {}", self.cycles)?;

        if let Some(spare) = self.spare {
            write!(f, " (spare {spare})")?;
        }

        Ok(())
    }
}
