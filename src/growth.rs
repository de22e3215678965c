use std::collections::HashSet;

use crate::grid::Position;

/// Tracks body indices that are mid-growth ("bulging").
///
/// A marker is placed on the head when a fruit is eaten and rides one
/// segment towards the tail per tick. It expires once it would reach the
/// tail, so every live marker satisfies `index < len - 1`.
#[derive(Debug, Clone, Default)]
pub struct GrowthTracker {
    markers: Vec<usize>,
}

impl GrowthTracker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a marker on the head segment.
    pub fn register(&mut self) {
        if !self.markers.contains(&0) {
            self.markers.push(0);
        }
    }

    /// Moves every marker one segment towards the tail of a body of `len`.
    pub fn advance(&mut self, len: usize) {
        self.markers = self
            .markers
            .iter()
            .map(|index| index + 1)
            .filter(|&index| index + 1 < len)
            .collect();
    }

    /// Current marker indices, head-most first.
    #[must_use]
    pub fn indices(&self) -> Vec<usize> {
        let mut indices = self.markers.clone();
        indices.sort_unstable();
        indices
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    /// Cells of `body` currently carrying a marker.
    #[must_use]
    pub fn bulging_cells(&self, body: &[Position]) -> HashSet<Position> {
        self.markers
            .iter()
            .filter_map(|&index| body.get(index).copied())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::GrowthTracker;
    use crate::grid::Position;

    #[test]
    fn marker_rides_towards_the_tail_and_expires() {
        let mut tracker = GrowthTracker::new();
        tracker.register();

        tracker.advance(5);
        assert_eq!(tracker.indices(), vec![1]);
        tracker.advance(5);
        tracker.advance(5);
        assert_eq!(tracker.indices(), vec![3]);

        // Index 4 would be the tail of a five-segment body.
        tracker.advance(5);
        assert!(tracker.is_empty());
    }

    #[test]
    fn markers_never_sit_on_the_tail() {
        let mut tracker = GrowthTracker::new();
        tracker.register();

        tracker.advance(2);

        assert!(tracker.is_empty());
    }

    #[test]
    fn several_markers_move_in_lockstep() {
        let mut tracker = GrowthTracker::new();
        tracker.register();
        tracker.advance(10);
        tracker.advance(10);
        tracker.register();

        tracker.advance(10);

        assert_eq!(tracker.indices(), vec![1, 3]);
    }

    #[test]
    fn bulging_cells_map_indices_to_body_positions() {
        let mut tracker = GrowthTracker::new();
        tracker.register();
        tracker.advance(4);
        let body = [
            Position::new(3, 1),
            Position::new(2, 1),
            Position::new(1, 1),
            Position::new(0, 1),
        ];

        let cells = tracker.bulging_cells(&body);

        assert_eq!(cells.len(), 1);
        assert!(cells.contains(&Position::new(2, 1)));
    }
}
