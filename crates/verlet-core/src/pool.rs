use crate::error::PoolError;

/// Fixed-capacity contiguous storage with a live count and O(1) swap-remove.
///
/// Slots `[0, len)` are live. Slots `[len, capacity)` hold stale values that are
/// overwritten when claimed. Removal moves the last live element into the hole, so
/// an index is only meaningful until the next removal.
#[derive(Clone, Debug)]
pub struct FixedCapacityPool<T> {
    items: Vec<T>,
    count: usize,
}

impl<T: Clone + Default> FixedCapacityPool<T> {
    pub fn new(capacity: usize) -> Self {
        Self {
            items: vec![T::default(); capacity],
            count: 0,
        }
    }

    /// Change the capacity. Existing slots below `new_capacity` keep their data;
    /// live elements past the new end are lost and the live count is clamped.
    pub fn resize(&mut self, new_capacity: usize) {
        if new_capacity < self.count {
            log::warn!(
                "pool resize to {} drops {} live elements",
                new_capacity,
                self.count - new_capacity
            );
        }
        self.items.resize(new_capacity, T::default());
        self.count = self.count.min(new_capacity);
    }
}

impl<T> FixedCapacityPool<T> {
    #[inline]
    pub fn len(&self) -> usize {
        self.count
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.count == self.items.len()
    }

    /// Claim the next free slot, or `None` (without mutating) when full.
    ///
    /// The slot still holds whatever value it last had; callers overwrite it.
    pub fn next_index(&mut self) -> Option<usize> {
        if self.is_full() {
            return None;
        }
        self.count += 1;
        Some(self.count - 1)
    }

    /// Claim the next slot and write `value` into it.
    pub fn push(&mut self, value: T) -> Result<usize, PoolError> {
        let idx = self.next_index().ok_or(PoolError::Full {
            capacity: self.capacity(),
        })?;
        self.items[idx] = value;
        Ok(idx)
    }

    /// Swap-remove the live element at `index`.
    ///
    /// Panics if `index` is not live.
    pub fn remove(&mut self, index: usize) {
        assert!(
            index < self.count,
            "remove index {} out of bounds (live count: {})",
            index,
            self.count
        );
        self.items.swap(index, self.count - 1);
        self.count -= 1;
    }

    /// `remove` for a possibly-absent slot, as returned by [`next_index`](Self::next_index).
    pub fn remove_opt(&mut self, index: Option<usize>) {
        if let Some(index) = index {
            self.remove(index);
        }
    }

    /// Remove every live element for which `keep` returns false.
    ///
    /// Visits each element exactly once: after a removal the relocated element at the
    /// same index is examined next.
    pub fn retain_swap<F: FnMut(&mut T) -> bool>(&mut self, mut keep: F) {
        let mut i = 0;
        while i < self.count {
            if keep(&mut self.items[i]) {
                i += 1;
            } else {
                self.remove(i);
            }
        }
    }

    /// Drop all live elements. Capacity is unchanged.
    pub fn clear(&mut self) {
        self.count = 0;
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.as_slice().get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.as_mut_slice().get_mut(index)
    }

    pub fn try_get(&self, index: usize) -> Result<&T, PoolError> {
        self.get(index).ok_or(PoolError::OutOfBounds {
            index,
            count: self.count,
        })
    }

    pub fn try_get_mut(&mut self, index: usize) -> Result<&mut T, PoolError> {
        let count = self.count;
        self.get_mut(index)
            .ok_or(PoolError::OutOfBounds { index, count })
    }

    /// Live elements.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.items[..self.count]
    }

    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.items[..self.count]
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.as_slice().iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.as_mut_slice().iter_mut()
    }

    /// Mutable references to two distinct live elements.
    ///
    /// Panics if `a == b` or either index is not live.
    pub fn pair_mut(&mut self, a: usize, b: usize) -> (&mut T, &mut T) {
        assert_ne!(a, b, "pair_mut requires distinct indices");
        let live = self.as_mut_slice();
        if a < b {
            let (lo, hi) = live.split_at_mut(b);
            (&mut lo[a], &mut hi[0])
        } else {
            let (lo, hi) = live.split_at_mut(a);
            (&mut hi[0], &mut lo[b])
        }
    }
}

impl<T> std::ops::Index<usize> for FixedCapacityPool<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        &self.as_slice()[index]
    }
}

impl<T> std::ops::IndexMut<usize> for FixedCapacityPool<T> {
    fn index_mut(&mut self, index: usize) -> &mut T {
        &mut self.as_mut_slice()[index]
    }
}

impl<'a, T> IntoIterator for &'a FixedCapacityPool<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
