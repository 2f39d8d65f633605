//! Candidate change-point curves and the bounded, pruned stack that holds
//! them.
//!
//! A [`Curve`] is a point on a log-likelihood-ratio trajectory: the
//! accumulated counts and background since some candidate change-point `t`,
//! plus the cumulative LLR contribution `m` the curve had when it was
//! created. [`CurveStack`] keeps these ordered so that each curve dominates
//! the one below it (see [`crate::focus`] for the domination test), using
//! the same raw head/tail-over-a-fixed-buffer idiom used elsewhere for a
//! fixed backing buffer, just with `Curve` elements instead of bytes.

use crate::PF_MAXCURVES;

const ARR_LEN: usize = PF_MAXCURVES + 1;

/// A candidate change-point record `(x, b, t, m)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Curve {
    /// Accumulated counts since the candidate change.
    pub x: i64,
    /// Accumulated background since the candidate change.
    pub b: f64,
    /// Step index at which this candidate was created.
    pub t: i64,
    /// Cumulative LLR contribution up to this curve's creation.
    pub m: f64,
}

impl Curve {
    /// The all-zero sentinel representing "no change yet".
    pub const NULL: Curve = Curve {
        x: 0,
        b: 0.0,
        t: 0,
        m: 0.0,
    };

    /// A floor sentinel no real curve can dominate (`x = i64::MAX`).
    pub const TAIL: Curve = Curve {
        x: i64::MAX,
        b: 0.0,
        t: 0,
        m: 0.0,
    };
}

/// Bounded, pruned stack of [`Curve`]s over a circular buffer.
///
/// Capacity is [`PF_MAXCURVES`]; the backing array has one extra sentinel
/// slot so `head == tail` can unambiguously mean "empty" (the standard
/// circular-buffer convention). Always contains at least `TAIL` then `NULL`
/// at the bottom once [`reset`][Self::reset] or [`new`][Self::new] has run.
pub(crate) struct CurveStack {
    arr: [Curve; ARR_LEN],
    head: usize,
    tail: usize,
    overflow_count: u64,
}

impl CurveStack {
    pub fn new() -> Self {
        let mut s = CurveStack {
            arr: [Curve::NULL; ARR_LEN],
            head: 0,
            tail: 0,
            overflow_count: 0,
        };
        s.reset();
        s
    }

    #[inline]
    fn inc(idx: usize) -> usize {
        if idx + 1 == ARR_LEN {
            0
        } else {
            idx + 1
        }
    }

    #[inline]
    fn dec(idx: usize) -> usize {
        if idx == 0 {
            ARR_LEN - 1
        } else {
            idx - 1
        }
    }

    pub fn empty(&self) -> bool {
        self.head == self.tail
    }

    pub fn full(&self) -> bool {
        Self::inc(self.head) == self.tail
    }

    /// Pushes `curve`. If the stack is full, the oldest real curve (just
    /// above `TAIL`) is dropped and replaced with a fresh `TAIL` sentinel to
    /// make room, the bounded-memory approximation from Ward 2023.
    pub fn push(&mut self, curve: Curve) {
        if self.full() {
            self.tail = Self::inc(self.tail);
            self.arr[self.tail] = Curve::TAIL;
            self.overflow_count += 1;
        }
        self.arr[self.head] = curve;
        self.head = Self::inc(self.head);
    }

    /// Pops and returns the top curve.
    ///
    /// # Panics (debug only)
    ///
    /// Panics if the stack is empty. The lifecycle of [`Focus`][crate::focus::Focus]
    /// guarantees this never happens; this is a programmer-error contract,
    /// not a runtime condition to recover from.
    pub fn pop(&mut self) -> Curve {
        debug_assert!(!self.empty(), "pop on empty curve stack");
        self.head = Self::dec(self.head);
        self.arr[self.head]
    }

    /// Returns the top curve without removing it.
    ///
    /// # Panics (debug only)
    ///
    /// Panics if the stack is empty, see [`pop`][Self::pop].
    pub fn peek(&self) -> Curve {
        debug_assert!(!self.empty(), "peek on empty curve stack");
        self.arr[Self::dec(self.head)]
    }

    /// Resets the stack to exactly `TAIL` then `NULL`.
    pub fn reset(&mut self) {
        self.head = 0;
        self.tail = 0;
        self.push(Curve::TAIL);
        self.push(Curve::NULL);
    }

    /// Number of times a push has discarded the oldest curve because the
    /// stack was full. Pure observability; never affects control flow.
    pub fn overflow_count(&self) -> u64 {
        self.overflow_count
    }

    /// Number of curves currently on the stack.
    #[cfg(test)]
    pub fn len(&self) -> usize {
        if self.head >= self.tail {
            self.head - self.tail
        } else {
            self.head + ARR_LEN - self.tail
        }
    }

    /// The raw index of the current top, for [`crate::focus`]'s `maximize`
    /// walk, which needs to inspect curves below the top without popping
    /// them off the stack.
    pub(crate) fn head_index(&self) -> usize {
        self.head
    }

    /// Steps `idx` one slot towards the bottom of the stack.
    pub(crate) fn dec_index(&self, idx: usize) -> usize {
        Self::dec(idx)
    }

    /// Reads the curve at a raw index obtained from
    /// [`head_index`][Self::head_index] / [`dec_index`][Self::dec_index].
    pub(crate) fn at(&self, idx: usize) -> Curve {
        self.arr[idx]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn curve(x: i64) -> Curve {
        Curve {
            x,
            b: 1.0,
            t: x,
            m: 0.0,
        }
    }

    #[test]
    fn new_stack_has_tail_then_null() {
        let s = CurveStack::new();
        assert_eq!(s.len(), 2);
        assert_eq!(s.peek(), Curve::NULL);
    }

    #[test]
    fn push_pop_roundtrip() {
        let mut s = CurveStack::new();
        s.push(curve(1));
        assert_eq!(s.peek(), curve(1));
        let popped = s.pop();
        assert_eq!(popped, curve(1));
        assert_eq!(s.peek(), Curve::NULL);
    }

    #[test]
    fn reset_leaves_tail_then_null() {
        let mut s = CurveStack::new();
        s.push(curve(1));
        s.push(curve(2));
        s.reset();
        assert_eq!(s.len(), 2);
        assert_eq!(s.peek(), Curve::NULL);
        let n = s.pop();
        assert_eq!(n, Curve::NULL);
        let t = s.pop();
        assert_eq!(t, Curve::TAIL);
    }

    #[test]
    fn overflow_drops_oldest_and_counts_it() {
        let mut s = CurveStack::new();
        for i in 0..(PF_MAXCURVES as i64 + 5) {
            s.push(curve(i));
        }
        assert_eq!(s.len(), PF_MAXCURVES);
        assert!(s.overflow_count() >= 5);
    }

    #[test]
    fn empty_and_full_track_capacity() {
        let mut s = CurveStack::new();
        assert!(!s.empty());
        assert!(!s.full());
        for i in 0..(PF_MAXCURVES - 2) {
            s.push(curve(i as i64));
        }
        assert!(s.full());
    }
}
