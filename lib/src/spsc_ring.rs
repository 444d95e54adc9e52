//! Lock-free single-producer/single-consumer ring.
//!
//! The producer owns `head`, the consumer owns `tail`. Each side publishes
//! its index with `Release` and observes the other's with `Acquire`, so a
//! slot is never read before its write is visible and never overwritten
//! before its read has completed.
//!
//! Indices run freely and wrap at `u32::MAX`; the slot is `index & (N - 1)`.
//! `N` must be a power of two so that wrap-around keeps the mapping
//! consistent. The ring is full when `head - tail == N`, so all `N` slots
//! are usable.

use core::cell::UnsafeCell;
use core::mem::MaybeUninit;
use core::sync::atomic::{AtomicU32, Ordering};

pub struct SpscRing<T, const N: usize> {
    head: AtomicU32,
    tail: AtomicU32,
    slots: [UnsafeCell<MaybeUninit<T>>; N],
}

// SAFETY: a slot is accessed by at most one side at a time, as established
// by the head/tail protocol above. Callers uphold the single-producer and
// single-consumer contracts of `push` and `pop`.
unsafe impl<T: Send, const N: usize> Sync for SpscRing<T, N> {}

impl<T: Copy, const N: usize> SpscRing<T, N> {
    const VALID_CAPACITY: () = assert!(N.is_power_of_two() && N <= (1 << 31));

    pub const fn new() -> Self {
        let () = Self::VALID_CAPACITY;
        Self {
            head: AtomicU32::new(0),
            tail: AtomicU32::new(0),
            slots: [const { UnsafeCell::new(MaybeUninit::uninit()) }; N],
        }
    }

    #[inline]
    pub const fn capacity(&self) -> usize {
        N
    }

    /// Number of queued elements as seen by the caller. Exact only on the
    /// producer or consumer side; approximate elsewhere.
    #[inline]
    pub fn len(&self) -> usize {
        let head = self.head.load(Ordering::Acquire);
        let tail = self.tail.load(Ordering::Acquire);
        head.wrapping_sub(tail) as usize
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.len() >= N
    }

    /// Append `value`. Returns false and drops it when the ring is full.
    ///
    /// # Safety
    /// At most one thread of execution may be inside `push` at any time.
    /// Callers serialize producers, e.g. under an interrupt-masking lock.
    pub unsafe fn push(&self, value: T) -> bool {
        let head = self.head.load(Ordering::Relaxed);
        let tail = self.tail.load(Ordering::Acquire);
        if head.wrapping_sub(tail) as usize >= N {
            return false;
        }
        let slot = &self.slots[head as usize & (N - 1)];
        // SAFETY: the slot lies outside [tail, head) so the consumer is not
        // reading it, and the caller guarantees no concurrent producer.
        unsafe { (*slot.get()).write(value) };
        self.head.store(head.wrapping_add(1), Ordering::Release);
        true
    }

    /// Remove the oldest element.
    ///
    /// # Safety
    /// At most one thread of execution may be inside `pop` at any time.
    pub unsafe fn pop(&self) -> Option<T> {
        let tail = self.tail.load(Ordering::Relaxed);
        let head = self.head.load(Ordering::Acquire);
        if head == tail {
            return None;
        }
        let slot = &self.slots[tail as usize & (N - 1)];
        // SAFETY: the slot lies in [tail, head), so the producer finished
        // writing it before publishing `head`.
        let value = unsafe { (*slot.get()).assume_init_read() };
        self.tail.store(tail.wrapping_add(1), Ordering::Release);
        Some(value)
    }
}

impl<T: Copy, const N: usize> Default for SpscRing<T, N> {
    fn default() -> Self {
        Self::new()
    }
}
