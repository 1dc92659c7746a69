//! Filepath: src/element.rs
//!
//! The [`Element`] capability set.
//!
//! An element is anything with a readable and writable integer number.
//! Reads are assumed cheap and side-effect free. Writes are the expensive
//! primitive the rewrite minimizes, since an element usually stands in for
//! a persisted record.

/// Integer type held by every element.
pub type Number = i64;

/// An entity carrying a single integer number.
///
/// # Example
///
/// ```rust
/// use renumber::{Element, Number};
///
/// struct Row {
///     position: Number,
///     dirty: bool,
/// }
///
/// impl Element for Row {
///     fn number(&self) -> Number {
///         self.position
///     }
///
///     fn set_number(&mut self, number: Number) {
///         self.position = number;
///         self.dirty = true;
///     }
/// }
///
/// let mut rows = vec![
///     Row { position: 40, dirty: false },
///     Row { position: 10, dirty: false },
/// ];
/// renumber::assign_numbers(rows.iter_mut()).unwrap();
///
/// assert_eq!(rows[0].position, 1);
/// assert_eq!(rows[1].position, 0);
/// ```
pub trait Element {
    /// Return the current number. Must not have side effects.
    fn number(&self) -> Number;

    /// Overwrite the current number. May be called several times; the last
    /// value written is authoritative.
    fn set_number(&mut self, number: Number);
}

impl Element for Number {
    #[inline]
    fn number(&self) -> Number {
        *self
    }

    #[inline]
    fn set_number(&mut self, number: Number) {
        *self = number;
    }
}

impl<E: Element + ?Sized> Element for &mut E {
    #[inline]
    fn number(&self) -> Number {
        (**self).number()
    }

    #[inline]
    fn set_number(&mut self, number: Number) {
        (**self).set_number(number);
    }
}

impl<E: Element + ?Sized> Element for Box<E> {
    #[inline]
    fn number(&self) -> Number {
        (**self).number()
    }

    #[inline]
    fn set_number(&mut self, number: Number) {
        (**self).set_number(number);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_number_is_element() {
        let mut n: Number = 7;
        assert_eq!(n.number(), 7);

        n.set_number(-3);
        assert_eq!(n, -3);
    }

    #[test]
    fn test_forwarding_impls() {
        let mut boxed: Box<dyn Element> = Box::new(5 as Number);
        boxed.set_number(9);
        assert_eq!(boxed.number(), 9);

        fn overwrite<E: Element>(mut element: E, number: Number) -> Number {
            element.set_number(number);
            element.number()
        }

        let mut raw: Number = 1;
        assert_eq!(overwrite(&mut raw, 2), 2);
        assert_eq!(raw, 2);
    }
}
