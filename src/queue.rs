//! Bounded FIFO window over the `m` most recent counts.
//!
//! Counts are parked here before they are allowed to influence the
//! background estimate, so that source photons the detector is currently
//! testing cannot pollute the rate used to test them. See
//! [`crate::ses`] for how the delay is used.

/// A circular-buffer FIFO of exactly `m + 1` slots, holding the last `m`
/// counts.
///
/// There is no graceful handling of misuse (enqueue on full, dequeue on
/// empty): the [`FocusSes`][crate::ses::FocusSes] lifecycle guarantees
/// correct use, exactly as [`crate::curve::CurveStack`] guarantees correct
/// use of its own stack.
pub(crate) struct CountQueue {
    arr: Vec<i64>,
    head: usize,
    tail: usize,
    m: usize,
}

impl CountQueue {
    /// Allocates a queue that holds up to `m` counts. This is the one
    /// allocation this crate performs on the steady path, and it happens
    /// once, here, at construction.
    pub fn new(m: usize) -> Self {
        CountQueue {
            arr: vec![0; m + 1],
            head: 0,
            tail: 0,
            m,
        }
    }

    #[inline]
    fn wrap(&self, idx: usize) -> usize {
        if idx == self.arr.len() { 0 } else { idx }
    }

    pub fn empty(&self) -> bool {
        self.head == self.tail
    }

    pub fn full(&self) -> bool {
        self.wrap(self.tail + 1) == self.head
    }

    /// # Panics (debug only)
    ///
    /// Panics if the queue is full.
    pub fn enqueue(&mut self, n: i64) {
        debug_assert!(!self.full(), "enqueue on full count queue");
        self.arr[self.tail] = n;
        self.tail = self.wrap(self.tail + 1);
    }

    /// # Panics (debug only)
    ///
    /// Panics if the queue is empty.
    pub fn dequeue(&mut self) -> i64 {
        debug_assert!(!self.empty(), "dequeue on empty count queue");
        let v = self.arr[self.head];
        self.head = self.wrap(self.head + 1);
        v
    }

    /// Mean of the counts currently enqueued, used to seed the background
    /// estimate once the queue has filled for the first time.
    ///
    /// # Panics (debug only)
    ///
    /// Panics if the queue is not full.
    pub fn mean(&self) -> f64 {
        debug_assert!(self.full(), "mean requires a full count queue");
        let mut total: i64 = 0;
        let mut i = self.head;
        while i != self.tail {
            total += self.arr[i];
            i = self.wrap(i + 1);
        }
        total as f64 / self.m as f64
    }
}
