use crate::grid::{Offset, Point};

/// A forced via-point on a single segment's route.
///
/// A waypoint belongs to exactly one segment (it lives in that segment's
/// ordered waypoint list) and does not create electrical branching by
/// itself. Clicking a waypoint is treated as clicking its owning segment.
#[derive(Debug, Clone)]
pub struct Waypoint {
    position: Point,
    staged: Offset,
}

impl Waypoint {
    /// Creates a waypoint at the given position.
    #[must_use]
    pub fn new(position: Point) -> Self {
        Self {
            position,
            staged: Offset::ZERO,
        }
    }

    /// Effective location: the committed position plus any staged move.
    #[must_use]
    pub fn location(&self) -> Point {
        self.position.translated(self.staged)
    }

    /// Accumulates a staged move on top of any existing one.
    pub fn stage_move(&mut self, dx: i32, dy: i32) {
        self.staged = self.staged.shifted(dx, dy);
    }

    /// Folds the staged move into the committed position.
    pub fn commit_move(&mut self) {
        self.position = self.location();
        self.staged = Offset::ZERO;
    }

    /// Drops the staged move, restoring the committed position.
    pub fn discard_move(&mut self) {
        self.staged = Offset::ZERO;
    }
}
