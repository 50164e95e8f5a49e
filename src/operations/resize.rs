use crate::design::Design;
use crate::error::{DesignError, Result};
use crate::operations::RerouteAll;

/// Resizes the design grid, optionally carrying the elements along.
///
/// With `shift_x`/`shift_y` set, elements move with the resized edge by the
/// dimension delta; terminals anchored to an edge stay put on their locked
/// axis. Terminals sitting on the old right or bottom edge are re-anchored
/// to the moved edge either way. Moves are staged first and committed as a
/// unit, then every wire is rerouted against the new bounds.
pub struct Resize {
    width: i32,
    height: i32,
    shift_x: bool,
    shift_y: bool,
}

impl Resize {
    /// Creates a new `Resize` operation.
    #[must_use]
    pub fn new(width: i32, height: i32, shift_x: bool, shift_y: bool) -> Self {
        Self {
            width,
            height,
            shift_x,
            shift_y,
        }
    }

    /// Executes the resize and the follow-up reroute of every wire.
    ///
    /// # Errors
    ///
    /// Returns an error if the new dimensions are below
    /// [`Design::MIN_DIMENSION`].
    pub fn execute(&self, design: &mut Design) -> Result<()> {
        if self.width < Design::MIN_DIMENSION || self.height < Design::MIN_DIMENSION {
            return Err(DesignError::InvalidDimensions {
                width: self.width,
                height: self.height,
            }
            .into());
        }

        let dx = if self.shift_x {
            self.width - design.width()
        } else {
            0
        };
        let dy = if self.shift_y {
            self.height - design.height()
        } else {
            0
        };
        if dx != 0 || dy != 0 {
            stage_shift(design, dx, dy);
        }

        let old_width = design.width();
        let old_height = design.height();
        design.set_dimensions(self.width, self.height);

        // Terminals on the old right/bottom edges follow the moved edge;
        // top and left terminals are anchored at zero and stay.
        let (new_width, new_height) = (self.width, self.height);
        for (_, pin) in design.pins_mut() {
            let location = pin.location();
            let sx = if location.x == old_width && location.y > 0 && location.y < old_height {
                new_width - location.x
            } else {
                0
            };
            let sy = if location.y == old_height && location.x > 0 && location.x < old_width {
                new_height - location.y
            } else {
                0
            };
            if sx != 0 || sy != 0 {
                pin.stage_move(sx, sy);
            }
        }

        design.commit_staged_moves();
        RerouteAll::new().execute(design)
    }
}

/// Stages the element shift for a resize. Terminals move only along axes
/// where they sit in the design interior; chips, junctions and waypoints
/// move wholesale.
fn stage_shift(design: &mut Design, dx: i32, dy: i32) {
    let (width, height) = (design.width(), design.height());
    for (_, pin) in design.pins_mut() {
        let location = pin.location();
        let sx = if location.x > 0 && location.x < width { dx } else { 0 };
        let sy = if location.y > 0 && location.y < height { dy } else { 0 };
        if sx != 0 || sy != 0 {
            pin.stage_move(sx, sy);
        }
    }
    for (_, chip) in design.chips_mut() {
        chip.stage_move(dx, dy);
    }
    for (_, node) in design.graph.nodes_mut() {
        node.stage_move(dx, dy);
    }
    for (_, segment) in design.graph.segments_mut() {
        for waypoint in &mut segment.waypoints {
            waypoint.stage_move(dx, dy);
        }
    }
}
