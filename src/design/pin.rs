use crate::grid::{Direction, Offset, Point};

slotmap::new_key_type! {
    /// Unique identifier for a design terminal.
    pub struct PinId;
}

/// A design terminal: a named wire connection point belonging to the design
/// itself, typically anchored to its boundary.
#[derive(Debug, Clone)]
pub struct PinData {
    pub name: String,
    /// Direction a wire should leave this terminal.
    pub direction: Direction,
    position: Point,
    staged: Offset,
}

impl PinData {
    /// Creates a terminal at the given position.
    #[must_use]
    pub fn new(name: impl Into<String>, position: Point, direction: Direction) -> Self {
        Self {
            name: name.into(),
            direction,
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
