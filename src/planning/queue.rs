//! Binary min-heap keyed by integer cost
//!
//! The planner relies on lazy deletion instead of decrease-key, so the
//! heap only needs push, pop-min and peek. Items with equal keys come
//! out in no particular order.

/// Vec-backed binary min-heap over `(key, item)` pairs
#[derive(Debug, Clone)]
pub struct MinHeap<T> {
    items: Vec<(u32, T)>,
}

impl<T> MinHeap<T> {
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: Vec::with_capacity(capacity),
        }
    }

    /// Insert an item with the given key, sifting it up
    pub fn push(&mut self, key: u32, item: T) {
        self.items.push((key, item));
        self.sift_up(self.items.len() - 1);
    }

    /// Remove and return the item with the lowest key
    ///
    /// Returns `None` on an empty heap; popping empty is a normal
    /// termination signal for the search loops, not an error.
    pub fn pop(&mut self) -> Option<(u32, T)> {
        if self.items.is_empty() {
            return None;
        }
        let last = self.items.len() - 1;
        self.items.swap(0, last);
        let min = self.items.pop();
        if !self.items.is_empty() {
            self.sift_down(0);
        }
        min
    }

    /// Non-destructive look at the current minimum
    pub fn peek(&self) -> Option<(u32, &T)> {
        self.items.first().map(|(key, item)| (*key, item))
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    fn sift_up(&mut self, mut idx: usize) {
        while idx > 0 {
            let parent = (idx - 1) / 2;
            if self.items[idx].0 >= self.items[parent].0 {
                break;
            }
            self.items.swap(idx, parent);
            idx = parent;
        }
    }

    fn sift_down(&mut self, mut idx: usize) {
        let len = self.items.len();
        loop {
            let left = 2 * idx + 1;
            let right = 2 * idx + 2;
            let mut smallest = idx;
            if left < len && self.items[left].0 < self.items[smallest].0 {
                smallest = left;
            }
            if right < len && self.items[right].0 < self.items[smallest].0 {
                smallest = right;
            }
            if smallest == idx {
                break;
            }
            self.items.swap(idx, smallest);
            idx = smallest;
        }
    }
}

impl<T> Default for MinHeap<T> {
    fn default() -> Self {
        Self::new()
    }
}
