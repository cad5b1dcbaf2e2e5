//! Fixed-capacity circular buffer backing the windowed indicators.

#[derive(Debug, Clone, PartialEq)]
pub struct RingBuffer {
    data: Vec<f64>,
    pos: usize,
    len: usize,
}

impl RingBuffer {
    /// Callers guarantee `capacity > 0`; indicator constructors reject zero windows.
    pub fn new(capacity: usize) -> Self {
        debug_assert!(capacity > 0);
        RingBuffer {
            data: vec![0.0; capacity],
            pos: 0,
            len: 0,
        }
    }

    /// Stores `value`, returning the evicted value once the buffer is full.
    pub fn push(&mut self, value: f64) -> Option<f64> {
        let evicted = if self.is_full() {
            Some(self.data[self.pos])
        } else {
            self.len += 1;
            None
        };
        self.data[self.pos] = value;
        self.pos = (self.pos + 1) % self.data.len();
        evicted
    }

    pub fn capacity(&self) -> usize {
        self.data.len()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn is_full(&self) -> bool {
        self.len == self.data.len()
    }

    /// Oldest stored value.
    pub fn oldest(&self) -> Option<f64> {
        if self.is_empty() {
            None
        } else if self.is_full() {
            Some(self.data[self.pos])
        } else {
            Some(self.data[0])
        }
    }

    /// Stored values in insertion order, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        let start = if self.is_full() { self.pos } else { 0 };
        (0..self.len).map(move |i| self.data[(start + i) % self.data.len()])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fills_then_evicts_oldest() {
        let mut buf = RingBuffer::new(3);
        assert_eq!(buf.push(1.0), None);
        assert_eq!(buf.push(2.0), None);
        assert!(!buf.is_full());
        assert_eq!(buf.push(3.0), None);
        assert!(buf.is_full());
        assert_eq!(buf.push(4.0), Some(1.0));
        assert_eq!(buf.push(5.0), Some(2.0));
        assert_eq!(buf.len(), 3);
    }

    #[test]
    fn iter_is_oldest_first() {
        let mut buf = RingBuffer::new(3);
        buf.push(1.0);
        buf.push(2.0);
        assert_eq!(buf.iter().collect::<Vec<_>>(), vec![1.0, 2.0]);
        buf.push(3.0);
        buf.push(4.0);
        assert_eq!(buf.iter().collect::<Vec<_>>(), vec![2.0, 3.0, 4.0]);
    }

    #[test]
    fn oldest_tracks_wraparound() {
        let mut buf = RingBuffer::new(2);
        assert_eq!(buf.oldest(), None);
        buf.push(7.0);
        assert_eq!(buf.oldest(), Some(7.0));
        buf.push(8.0);
        buf.push(9.0);
        assert_eq!(buf.oldest(), Some(8.0));
    }
}
