//! Bounded tracker for the k closest rows seen so far.
//!
//! Offers arrive in arbitrary order. Below capacity every offer is kept;
//! at capacity an offer replaces the current farthest slot when it is
//! strictly closer, after which the farthest slot is found again by a
//! linear scan. Ties keep whichever pair was seen first.

use crate::{Error, Result};
use ordered_float::OrderedFloat;
use smallvec::SmallVec;

/// A held (row, distance) pair
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighbor {
    pub id: usize,
    pub distance: f32,
}

impl Neighbor {
    /// NaN sorts above every number, so a NaN distance is always the farthest
    #[inline]
    fn key(&self) -> OrderedFloat<f32> {
        OrderedFloat(self.distance)
    }
}

#[derive(Debug, Clone)]
pub struct NeighborTracker {
    k: usize,
    slots: SmallVec<[Neighbor; 16]>,
    max_slot: usize,
}

impl NeighborTracker {
    pub fn new(k: usize) -> Result<Self> {
        if k == 0 {
            return Err(Error::InvalidK(k));
        }
        Ok(Self {
            k,
            slots: SmallVec::with_capacity(k.min(64)),
            max_slot: 0,
        })
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.k
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Distance of the current farthest held neighbor
    #[inline]
    pub fn max_distance(&self) -> Option<f32> {
        self.slots.get(self.max_slot).map(|n| n.distance)
    }

    pub fn offer(&mut self, id: usize, distance: f32) {
        let candidate = Neighbor { id, distance };

        if self.slots.len() < self.k {
            self.slots.push(candidate);
            let last = self.slots.len() - 1;
            if last == 0 || candidate.key() > self.slots[self.max_slot].key() {
                self.max_slot = last;
            }
            return;
        }

        if candidate.key() < self.slots[self.max_slot].key() {
            self.slots[self.max_slot] = candidate;
            self.rescan_max();
        }
    }

    /// Starts from the overwritten slot and only moves on a strictly larger
    /// distance. The overwritten slot stays the max on ties; otherwise the
    /// first strictly larger slot wins.
    fn rescan_max(&mut self) {
        let mut max_key = self.slots[self.max_slot].key();
        for (slot, neighbor) in self.slots.iter().enumerate() {
            if neighbor.key() > max_key {
                max_key = neighbor.key();
                self.max_slot = slot;
            }
        }
    }

    /// Held row identifiers in slot order (not sorted by distance)
    pub fn selected(&self) -> Vec<usize> {
        self.slots.iter().map(|n| n.id).collect()
    }

    pub fn neighbors(&self) -> &[Neighbor] {
        &self.slots
    }
}
