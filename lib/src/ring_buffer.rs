/// Fixed-capacity FIFO over an inline array.
///
/// Not synchronized; wrap it in an `IrqMutex` when an interrupt handler
/// fills it.
#[derive(Debug)]
pub struct RingBuffer<T, const N: usize> {
    data: [T; N],
    head: usize,
    tail: usize,
    count: usize,
}

impl<T: Copy, const N: usize> RingBuffer<T, N> {
    /// Const constructor for statics; `fill` only seeds unused slots.
    #[inline]
    pub const fn new_with(fill: T) -> Self {
        Self {
            data: [fill; N],
            head: 0,
            tail: 0,
            count: 0,
        }
    }

    #[inline]
    pub const fn len(&self) -> usize {
        self.count
    }

    #[inline]
    pub const fn capacity(&self) -> usize {
        N
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.count == 0
    }

    #[inline]
    pub const fn is_full(&self) -> bool {
        self.count >= N
    }

    #[inline]
    pub fn reset(&mut self) {
        self.head = 0;
        self.tail = 0;
        self.count = 0;
    }

    /// Push, discarding the oldest element when full.
    pub fn push_overwrite(&mut self, value: T) {
        if self.is_full() {
            self.tail = (self.tail + 1) % N;
            self.count -= 1;
        }
        self.data[self.head] = value;
        self.head = (self.head + 1) % N;
        self.count += 1;
    }

    /// Push without overwrite; false if full.
    pub fn try_push(&mut self, value: T) -> bool {
        if self.is_full() {
            return false;
        }
        self.data[self.head] = value;
        self.head = (self.head + 1) % N;
        self.count += 1;
        true
    }

    pub fn try_pop(&mut self) -> Option<T> {
        if self.is_empty() {
            return None;
        }
        let value = self.data[self.tail];
        self.tail = (self.tail + 1) % N;
        self.count -= 1;
        Some(value)
    }

    pub fn peek(&self) -> Option<&T> {
        if self.is_empty() {
            None
        } else {
            Some(&self.data[self.tail])
        }
    }
}

impl<T: Copy + Default, const N: usize> Default for RingBuffer<T, N> {
    fn default() -> Self {
        Self::new_with(T::default())
    }
}
