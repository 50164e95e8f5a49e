use crate::grid::{Offset, Point};

slotmap::new_key_type! {
    /// Unique identifier for a junction node in the wire graph.
    pub struct NodeId;
}

/// A free-standing wire junction.
///
/// Junctions exist wherever three or more wires meet, and wherever a wire
/// terminates in empty space. A junction of degree 2 or less is transient:
/// the cleanup pass merges or removes it (see
/// [`RemoveSegment`](crate::operations::RemoveSegment)).
#[derive(Debug, Clone)]
pub struct NodeData {
    position: Point,
    staged: Offset,
}

impl NodeData {
    /// Creates a junction at the given position.
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

    /// The currently staged move, if any.
    #[must_use]
    pub fn staged_offset(&self) -> Offset {
        self.staged
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
