/// A staged move applied on top of an element's committed position.
///
/// Interactive edits (dragging, design resizing) preview a move by staging
/// an offset on the affected elements. The effective location of an element
/// is its committed position plus its staged offset; committing folds the
/// offset into the position, discarding zeroes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Offset {
    pub dx: i32,
    pub dy: i32,
}

impl Offset {
    /// The zero offset (no staged move).
    pub const ZERO: Self = Self { dx: 0, dy: 0 };

    /// Creates a new offset.
    #[must_use]
    pub fn new(dx: i32, dy: i32) -> Self {
        Self { dx, dy }
    }

    /// Returns `true` if no move is staged.
    #[must_use]
    pub fn is_zero(self) -> bool {
        self == Self::ZERO
    }

    /// Returns this offset with additional deltas accumulated onto it.
    #[must_use]
    pub fn shifted(self, dx: i32, dy: i32) -> Self {
        Self::new(self.dx + dx, self.dy + dy)
    }
}
