//! Slot availability - capacity accounting for one class occurrence

use serde::Serialize;

/// Occupancy of a class occurrence against its capacity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SlotAvailability {
    pub capacity: i32,
    pub occupied: i64,
}

impl SlotAvailability {
    pub const fn new(capacity: i32, occupied: i64) -> Self {
        Self { capacity, occupied }
    }

    /// Seats left; never negative even if occupancy overshot capacity
    pub fn available(&self) -> i64 {
        (i64::from(self.capacity) - self.occupied).max(0)
    }

    /// One more reservation fits
    #[inline]
    pub fn has_room(&self) -> bool {
        self.occupied < i64::from(self.capacity)
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        !self.has_room()
    }
}
