//! Filepath: src/snapshot.rs
//!
//! Stage 1: materialize the caller's collection into an indexable sequence.
//!
//! The rewrite needs random positional access, and the incoming collection
//! may be a linked list or any other iterator. The snapshot collects the
//! element borrows and reads every number exactly once. Later stages work
//! on the cached numbers and only come back to the elements to write.

use crate::element::{Element, Number};
use crate::error::AssignError;
use crate::tracing_helpers::{trace_log, warn_log};

/// Mutable borrows of every element, in input order, plus the numbers they
/// held when captured.
///
/// The cached numbers are never updated by [`Snapshot::write`]. They always
/// describe the state before the pass began.
pub struct Snapshot<'a, E: ?Sized> {
    elements: Vec<&'a mut E>,
    numbers: Vec<Number>,
}

impl<'a, E: Element + ?Sized> Snapshot<'a, E> {
    /// Capture `elements`, checking the iterator's reported length.
    ///
    /// # Errors
    ///
    /// - [`AssignError::LengthMismatch`] if the iterator yields a different
    ///   number of elements than [`ExactSizeIterator::len`] reported.
    /// - [`AssignError::TooManyElements`] if the ranks would not fit in a
    ///   [`Number`].
    ///
    /// No element is written in either case.
    pub fn capture<I>(elements: I) -> Result<Self, AssignError>
    where
        I: IntoIterator<Item = &'a mut E>,
        I::IntoIter: ExactSizeIterator,
    {
        let iter = elements.into_iter();
        let reported: usize = iter.len();
        let elements: Vec<&'a mut E> = iter.collect();

        if elements.len() != reported {
            warn_log!(reported, actual = elements.len(), "element iterator misreported its length");

            return Err(AssignError::LengthMismatch {
                reported,
                actual: elements.len(),
            });
        }

        if Number::try_from(elements.len()).is_err() {
            return Err(AssignError::TooManyElements {
                len: elements.len(),
            });
        }

        let numbers: Vec<Number> = elements.iter().map(|e| e.number()).collect();

        trace_log!(len = numbers.len(), "snapshot captured");

        Ok(Self { elements, numbers })
    }
}

impl<E: Element + ?Sized> Snapshot<'_, E> {
    /// Number of captured elements.
    #[must_use]
    #[inline]
    pub fn len(&self) -> usize {
        self.numbers.len()
    }

    /// Whether the snapshot holds no elements.
    #[must_use]
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.numbers.is_empty()
    }

    /// Numbers as they were at capture time, indexed like the input.
    #[must_use]
    #[inline]
    pub fn numbers(&self) -> &[Number] {
        &self.numbers
    }

    /// Collection length as a [`Number`]. This is the lowest value outside
    /// the final rank range `0..len`.
    #[must_use]
    #[inline]
    #[allow(clippy::cast_possible_wrap)]
    pub fn len_number(&self) -> Number {
        // capture() rejected lengths that do not fit.
        self.numbers.len() as Number
    }

    /// Write `number` into the element at `index`.
    ///
    /// # Panics
    /// Panics if `index >= len()`.
    #[inline]
    pub fn write(&mut self, index: usize, number: Number) {
        trace_log!(index, number, "write");

        self.elements[index].set_number(number);
    }
}
