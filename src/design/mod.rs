pub mod chip;
pub mod pin;

pub use chip::{ChipData, ChipId, ChipPin};
pub use pin::{PinData, PinId};

use slotmap::SlotMap;

use crate::error::{DesignError, Result, TopologyError};
use crate::grid::{Direction, Point};
use crate::routing::{self, RoutingGrid};
use crate::topology::{Endpoint, NodeId, SegmentId, WireGraph};

/// What occupies a grid point.
///
/// Hit-testing resolves in this precedence order: design terminals, chip
/// terminals, chip footprints, junctions, waypoints, then wire segments.
/// A terminal on a chip outline therefore wins over the footprint beneath
/// it, and a waypoint wins over the rest of its segment's route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Occupant {
    Pin(PinId),
    ChipPin(ChipId, usize),
    Chip(ChipId),
    Node(NodeId),
    /// A waypoint, addressed by its owning segment and index.
    Waypoint(SegmentId, usize),
    Segment(SegmentId),
}

/// The design container: grid dimensions, terminals, placed chips, and the
/// wire graph.
///
/// All edit operations run to completion inside the call that triggered
/// them; the design is exclusively owned by the editing thread and
/// mutation is never safe to interleave (see the operation structs in
/// [`operations`](crate::operations)).
#[derive(Debug, Default)]
pub struct Design {
    width: i32,
    height: i32,
    pins: SlotMap<PinId, PinData>,
    chips: SlotMap<ChipId, ChipData>,
    pub graph: WireGraph,
}

impl Design {
    /// Minimum grid dimension along either axis.
    pub const MIN_DIMENSION: i32 = 2;

    /// Creates an empty design of the given dimensions.
    ///
    /// # Errors
    ///
    /// Returns an error if either dimension is below
    /// [`Design::MIN_DIMENSION`].
    pub fn new(width: i32, height: i32) -> Result<Self> {
        if width < Self::MIN_DIMENSION || height < Self::MIN_DIMENSION {
            return Err(DesignError::InvalidDimensions { width, height }.into());
        }
        Ok(Self {
            width,
            height,
            ..Self::default()
        })
    }

    /// Width of the design grid.
    #[must_use]
    pub fn width(&self) -> i32 {
        self.width
    }

    /// Height of the design grid.
    #[must_use]
    pub fn height(&self) -> i32 {
        self.height
    }

    pub(crate) fn set_dimensions(&mut self, width: i32, height: i32) {
        self.width = width;
        self.height = height;
    }

    // --- Terminals and chips ---

    /// Adds a design terminal and returns its id.
    pub fn add_pin(&mut self, data: PinData) -> PinId {
        self.pins.insert(data)
    }

    /// Returns a reference to a design terminal.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal is not part of this design.
    pub fn pin(&self, id: PinId) -> Result<&PinData> {
        self.pins
            .get(id)
            .ok_or_else(|| TopologyError::EntityNotFound("pin").into())
    }

    /// Removes a design terminal.
    pub fn remove_pin(&mut self, id: PinId) -> Option<PinData> {
        self.pins.remove(id)
    }

    /// Iterates over all design terminals.
    pub fn pins(&self) -> impl Iterator<Item = (PinId, &PinData)> {
        self.pins.iter()
    }

    /// Iterates mutably over all design terminals.
    pub fn pins_mut(&mut self) -> impl Iterator<Item = (PinId, &mut PinData)> {
        self.pins.iter_mut()
    }

    /// Places a chip and returns its id.
    pub fn add_chip(&mut self, data: ChipData) -> ChipId {
        self.chips.insert(data)
    }

    /// Returns a reference to a placed chip.
    ///
    /// # Errors
    ///
    /// Returns an error if the chip is not part of this design.
    pub fn chip(&self, id: ChipId) -> Result<&ChipData> {
        self.chips
            .get(id)
            .ok_or_else(|| TopologyError::EntityNotFound("chip").into())
    }

    /// Removes a placed chip.
    pub fn remove_chip(&mut self, id: ChipId) -> Option<ChipData> {
        self.chips.remove(id)
    }

    /// Iterates over all placed chips.
    pub fn chips(&self) -> impl Iterator<Item = (ChipId, &ChipData)> {
        self.chips.iter()
    }

    /// Iterates mutably over all placed chips.
    pub fn chips_mut(&mut self) -> impl Iterator<Item = (ChipId, &mut ChipData)> {
        self.chips.iter_mut()
    }

    // --- Spatial query ---

    /// Classifies whatever occupies a grid point, if anything.
    #[must_use]
    pub fn element_at(&self, point: Point) -> Option<Occupant> {
        if let Some((id, _)) = self.pins.iter().find(|(_, pin)| pin.location() == point) {
            return Some(Occupant::Pin(id));
        }
        for (id, chip) in &self.chips {
            for index in 0..chip.pins.len() {
                if chip.pin_location(index) == Some(point) {
                    return Some(Occupant::ChipPin(id, index));
                }
            }
        }
        if let Some((id, _)) = self
            .chips
            .iter()
            .find(|(_, chip)| chip.footprint_contains(point))
        {
            return Some(Occupant::Chip(id));
        }
        if let Some((id, _)) = self.graph.nodes().find(|(_, node)| node.location() == point) {
            return Some(Occupant::Node(id));
        }
        for (id, segment) in self.graph.segments() {
            if let Some(index) = segment
                .waypoints
                .iter()
                .position(|waypoint| waypoint.location() == point)
            {
                return Some(Occupant::Waypoint(id, index));
            }
        }
        self.graph
            .segments()
            .find(|(_, segment)| segment.route_contains(point))
            .map(|(id, _)| Occupant::Segment(id))
    }

    // --- Endpoint resolution ---

    /// Effective design-space location of a segment endpoint.
    ///
    /// # Errors
    ///
    /// Returns an error if the referenced entity is not part of this
    /// design.
    pub fn endpoint_location(&self, endpoint: Endpoint) -> Result<Point> {
        match endpoint {
            Endpoint::Pin(id) => Ok(self.pin(id)?.location()),
            Endpoint::Chip(id, index) => self
                .chip(id)?
                .pin_location(index)
                .ok_or_else(|| TopologyError::EntityNotFound("chip pin").into()),
            Endpoint::Node(id) => Ok(self.graph.node(id)?.location()),
        }
    }

    /// Preferred wire direction at a segment endpoint. Junctions have none.
    #[must_use]
    pub fn preferred_direction(&self, endpoint: Endpoint) -> Option<Direction> {
        match endpoint {
            Endpoint::Pin(id) => self.pins.get(id).map(|pin| pin.direction),
            Endpoint::Chip(id, index) => self
                .chips
                .get(id)
                .and_then(|chip| chip.pins.get(index))
                .map(|pin| pin.direction),
            Endpoint::Node(_) => None,
        }
    }

    // --- Routing ---

    /// Recomputes a segment's cached route from the current effective
    /// endpoint and waypoint locations. The cache is cleared when no route
    /// exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the segment or one of its endpoints is not part
    /// of this design.
    pub fn reroute_segment(&mut self, id: SegmentId) -> Result<()> {
        let segment = self.graph.segment(id)?;
        let (start, end) = (segment.start(), segment.end());
        let waypoints = segment.waypoint_locations();

        let start_point = self.endpoint_location(start)?;
        let end_point = self.endpoint_location(end)?;
        let start_direction = self.preferred_direction(start);
        let end_direction = self.preferred_direction(end);

        let route = routing::route(
            self,
            start_point,
            start_direction,
            end_point,
            end_direction,
            &waypoints,
        );
        self.graph.segment_mut(id)?.route = route;
        Ok(())
    }

    // --- Exports ---

    /// The undirected endpoint connectivity of the wire graph, consumed by
    /// simulation; route geometry is not included.
    #[must_use]
    pub fn connectivity(&self) -> Vec<(SegmentId, [Endpoint; 2])> {
        self.graph
            .segments()
            .map(|(id, segment)| (id, segment.endpoints()))
            .collect()
    }

    /// How far the given design edge can be pulled inward before
    /// disturbing an element.
    ///
    /// Terminals anchored to a perpendicular edge are ignored on that
    /// axis; chips, junctions and waypoints keep a one-unit buffer so they
    /// never end up on the design border. The result is clamped to
    /// `[0, dimension - 2]` so a design can never be shrunk to nothing.
    #[must_use]
    pub fn open_distance(&self, direction: Direction) -> i32 {
        let extents = self.element_extents();
        let (value, limit) = match direction {
            Direction::Left => (extents.min_x, self.width - 2),
            Direction::Right => (extents.max_x.map(|x| self.width - x), self.width - 2),
            Direction::Up => (extents.min_y, self.height - 2),
            Direction::Down => (extents.max_y.map(|y| self.height - y), self.height - 2),
        };
        value.map_or(limit, |v| v.clamp(0, limit))
    }

    // --- Staged moves ---

    /// Commits every staged element move in the design.
    pub fn commit_staged_moves(&mut self) {
        for pin in self.pins.values_mut() {
            pin.commit_move();
        }
        for chip in self.chips.values_mut() {
            chip.commit_move();
        }
        for (_, node) in self.graph.nodes_mut() {
            node.commit_move();
        }
        for (_, segment) in self.graph.segments_mut() {
            for waypoint in &mut segment.waypoints {
                waypoint.commit_move();
            }
        }
    }

    /// Discards every staged element move in the design.
    pub fn discard_staged_moves(&mut self) {
        for pin in self.pins.values_mut() {
            pin.discard_move();
        }
        for chip in self.chips.values_mut() {
            chip.discard_move();
        }
        for (_, node) in self.graph.nodes_mut() {
            node.discard_move();
        }
        for (_, segment) in self.graph.segments_mut() {
            for waypoint in &mut segment.waypoints {
                waypoint.discard_move();
            }
        }
    }

    fn element_extents(&self) -> Extents {
        let mut extents = Extents::default();
        for pin in self.pins.values() {
            let location = pin.location();
            if location.x > 0 && location.x < self.width {
                extents.include_x(location.x);
            }
            if location.y > 0 && location.y < self.height {
                extents.include_y(location.y);
            }
        }
        for chip in self.chips.values() {
            extents.include(chip.location().offset_by(-1, -1));
            extents.include(
                chip.location()
                    .offset_by(chip.width + 1, chip.height + 1),
            );
        }
        for (_, node) in self.graph.nodes() {
            extents.include(node.location().offset_by(-1, -1));
            extents.include(node.location().offset_by(1, 1));
        }
        for (_, segment) in self.graph.segments() {
            for waypoint in &segment.waypoints {
                extents.include(waypoint.location().offset_by(-1, -1));
                extents.include(waypoint.location().offset_by(1, 1));
            }
        }
        extents
    }
}

impl RoutingGrid for Design {
    fn width(&self) -> i32 {
        self.width
    }

    fn height(&self) -> i32 {
        self.height
    }

    fn is_obstructed(&self, point: Point) -> bool {
        matches!(self.element_at(point), Some(Occupant::Chip(_)))
    }
}

/// Bounding extents of the design's elements, per axis.
#[derive(Debug, Default)]
struct Extents {
    min_x: Option<i32>,
    max_x: Option<i32>,
    min_y: Option<i32>,
    max_y: Option<i32>,
}

impl Extents {
    fn include_x(&mut self, x: i32) {
        self.min_x = Some(self.min_x.map_or(x, |v| v.min(x)));
        self.max_x = Some(self.max_x.map_or(x, |v| v.max(x)));
    }

    fn include_y(&mut self, y: i32) {
        self.min_y = Some(self.min_y.map_or(y, |v| v.min(y)));
        self.max_y = Some(self.max_y.map_or(y, |v| v.max(y)));
    }

    fn include(&mut self, point: Point) {
        self.include_x(point.x);
        self.include_y(point.y);
    }
}
