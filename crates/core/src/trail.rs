//! Bounded pointer trail.
//!
//! Keeps the most recent pointer positions for the decorative cursor trail.
//! Once full, each new point evicts the oldest one.

use std::collections::VecDeque;

use crate::types::Point;

/// Number of points kept by [`Trail::new`].
pub const DEFAULT_TRAIL_CAPACITY: usize = 50;

/// A FIFO of recent pointer positions with a fixed maximum length.
///
/// The capacity is chosen by whoever creates the trail and is never stored
/// alongside the points.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trail {
    points: VecDeque<Point>,
    capacity: usize,
}

impl Trail {
    /// Create an empty trail holding up to [`DEFAULT_TRAIL_CAPACITY`] points.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_TRAIL_CAPACITY)
    }

    /// Create an empty trail holding up to `capacity` points (at least one).
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            points: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Record a pointer position, dropping the oldest points beyond capacity.
    pub fn push(&mut self, point: Point) {
        self.points.push_back(point);
        while self.points.len() > self.capacity {
            self.points.pop_front();
        }
    }

    /// Points from oldest to newest.
    pub fn points(&self) -> impl ExactSizeIterator<Item = &Point> + DoubleEndedIterator {
        self.points.iter()
    }

    /// The current cursor position: the newest point.
    #[must_use]
    pub fn cursor(&self) -> Option<Point> {
        self.points.back().copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }
}

impl Default for Trail {
    fn default() -> Self {
        Self::new()
    }
}

impl Extend<Point> for Trail {
    fn extend<I: IntoIterator<Item = Point>>(&mut self, iter: I) {
        for point in iter {
            self.push(point);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_capacity_is_fifty() {
        let trail = Trail::new();
        assert_eq!(trail.capacity(), 50);
        assert!(trail.is_empty());
        assert_eq!(trail.cursor(), None);
    }

    #[test]
    fn test_keeps_newest_points_in_order() {
        let mut trail = Trail::new();
        trail.extend((0..120).map(|i| Point::new(i, -i)));

        assert_eq!(trail.len(), 50);
        let xs: Vec<i32> = trail.points().map(|p| p.x).collect();
        assert_eq!(xs, (70..120).collect::<Vec<_>>());
        assert_eq!(trail.cursor(), Some(Point::new(119, -119)));
    }

    #[test]
    fn test_below_capacity_keeps_everything() {
        let mut trail = Trail::with_capacity(3);
        trail.push(Point::new(1, 1));
        trail.push(Point::new(2, 2));
        assert_eq!(trail.len(), 2);

        trail.push(Point::new(3, 3));
        trail.push(Point::new(4, 4));
        let points: Vec<Point> = trail.points().copied().collect();
        assert_eq!(
            points,
            [Point::new(2, 2), Point::new(3, 3), Point::new(4, 4)]
        );
    }

    #[test]
    fn test_zero_capacity_is_clamped() {
        let mut trail = Trail::with_capacity(0);
        trail.push(Point::new(1, 2));
        trail.push(Point::new(3, 4));
        assert_eq!(trail.capacity(), 1);
        assert_eq!(trail.len(), 1);
        assert_eq!(trail.cursor(), Some(Point::new(3, 4)));
    }

    #[test]
    fn test_clear() {
        let mut trail = Trail::new();
        trail.push(Point::new(5, 5));
        trail.clear();
        assert!(trail.is_empty());
        assert_eq!(trail.capacity(), 50);
    }
}
