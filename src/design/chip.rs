use crate::grid::{Direction, Offset, Point};

slotmap::new_key_type! {
    /// Unique identifier for a placed chip.
    pub struct ChipId;
}

/// A terminal on a chip, positioned relative to the chip's origin.
#[derive(Debug, Clone)]
pub struct ChipPin {
    pub name: String,
    /// Position relative to the chip origin.
    pub position: Point,
    /// Direction a wire should leave this terminal.
    pub direction: Direction,
}

impl ChipPin {
    /// Creates a chip terminal at the given chip-relative position.
    #[must_use]
    pub fn new(name: impl Into<String>, position: Point, direction: Direction) -> Self {
        Self {
            name: name.into(),
            position,
            direction,
        }
    }
}

/// A placed chip.
///
/// The footprint spans `[x, x + width] x [y, y + height]` inclusive and
/// blocks wire routing. Chip terminals sit on the footprint outline and
/// take precedence over it in hit-testing, so they stay routable.
#[derive(Debug, Clone)]
pub struct ChipData {
    pub width: i32,
    pub height: i32,
    pub pins: Vec<ChipPin>,
    position: Point,
    staged: Offset,
}

impl ChipData {
    /// Creates a chip with its origin at the given position.
    #[must_use]
    pub fn new(position: Point, width: i32, height: i32, pins: Vec<ChipPin>) -> Self {
        Self {
            width,
            height,
            pins,
            position,
            staged: Offset::ZERO,
        }
    }

    /// Effective origin: the committed position plus any staged move.
    #[must_use]
    pub fn location(&self) -> Point {
        self.position.translated(self.staged)
    }

    /// Design-space location of the indexed terminal, if it exists.
    #[must_use]
    pub fn pin_location(&self, index: usize) -> Option<Point> {
        self.pins
            .get(index)
            .map(|pin| self.location().offset_by(pin.position.x, pin.position.y))
    }

    /// Returns `true` if the point falls within the chip's footprint.
    #[must_use]
    pub fn footprint_contains(&self, point: Point) -> bool {
        let origin = self.location();
        point.x >= origin.x
            && point.x <= origin.x + self.width
            && point.y >= origin.y
            && point.y <= origin.y + self.height
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
