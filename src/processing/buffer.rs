use std::collections::VecDeque;

/// Samples kept per channel in the reference dashboard.
pub const DEFAULT_CAPACITY: usize = 100;

// BUFFER COMPONENT ------------------------------------------------------------

/// Fixed-capacity FIFO of samples in chronological order.
#[derive(Debug, Clone)]
pub struct RollingBuffer {
    samples: VecDeque<f64>,
    capacity: usize,
}

impl RollingBuffer {
    pub fn new(capacity: usize) -> Self {
        Self {
            samples: VecDeque::with_capacity(capacity + 1),
            capacity,
        }
    }

    /// Appends at the back and evicts the oldest sample once over capacity.
    pub fn append(&mut self, sample: f64) {
        self.samples.push_back(sample);
        if self.samples.len() > self.capacity {
            self.samples.pop_front();
        }
    }

    /// Snapshot of the current samples, oldest first.
    pub fn contents(&self) -> Vec<f64> {
        self.samples.iter().copied().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &f64> + '_ {
        self.samples.iter()
    }

    pub fn latest(&self) -> Option<f64> {
        self.samples.back().copied()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for RollingBuffer {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}
