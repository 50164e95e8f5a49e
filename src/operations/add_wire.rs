use tracing::debug;

use crate::design::{Design, Occupant};
use crate::error::{DesignError, Result, RoutingError};
use crate::grid::{Direction, Point};
use crate::operations::SplitSegment;
use crate::routing;
use crate::topology::{Endpoint, NodeData, SegmentData, SegmentId, Waypoint};

/// Draws a wire between two clicked points, through ordered waypoints.
///
/// Each click point is resolved into a routable: an existing junction or
/// terminal is used directly, a point on a wire splits that wire at the
/// point and connects to the new junction, and empty space materializes a
/// fresh junction. Resolution is probed read-only first and the route is
/// computed before anything mutates, so a failed route leaves the design
/// exactly as it was.
pub struct AddWire {
    start: Point,
    end: Point,
    waypoints: Vec<Point>,
}

/// How a clicked point will be resolved into an endpoint once the route is
/// known to exist.
enum Anchor {
    /// An entity that can terminate a wire already sits here.
    Existing(Endpoint),
    /// The click landed on a wire; commit by splitting it here.
    Split(SegmentId),
    /// Empty space; commit by materializing a junction.
    Fresh,
}

impl AddWire {
    /// Creates a new `AddWire` operation.
    #[must_use]
    pub fn new(start: Point, end: Point, waypoints: Vec<Point>) -> Self {
        Self {
            start,
            end,
            waypoints,
        }
    }

    /// Executes the edit, returning the inserted segment.
    ///
    /// # Errors
    ///
    /// Returns an error if either click point sits on a chip footprint, or
    /// no route exists between the resolved endpoints. Neither failure
    /// mutates the design.
    pub fn execute(&self, design: &mut Design) -> Result<SegmentId> {
        let (start_anchor, start_direction) = probe(design, self.start)?;
        let (_, end_direction) = probe(design, self.end)?;

        let route = routing::route(
            design,
            self.start,
            start_direction,
            self.end,
            end_direction,
            &self.waypoints,
        )
        .ok_or(RoutingError::Unreachable {
            from: self.start,
            to: self.end,
        })?;

        // The route exists; commit the endpoint resolutions. The end is
        // probed again because committing the start may have split the very
        // segment under the end point.
        let start_endpoint = commit(design, start_anchor, self.start)?;
        let (end_anchor, _) = probe(design, self.end)?;
        let end_endpoint = commit(design, end_anchor, self.end)?;

        let waypoints = self.waypoints.iter().map(|&w| Waypoint::new(w)).collect();
        let segment = design.graph.add_segment(SegmentData::new(
            start_endpoint,
            end_endpoint,
            waypoints,
        ));
        design.graph.segment_mut(segment)?.route = Some(route);

        debug!(from = %self.start, to = %self.end, "inserted wire segment");
        Ok(segment)
    }
}

/// Classifies the occupant of a click point without mutating anything.
fn probe(design: &Design, point: Point) -> Result<(Anchor, Option<Direction>)> {
    if point.x < 0 || point.x > design.width() || point.y < 0 || point.y > design.height() {
        return Err(DesignError::OutOfBounds(point).into());
    }
    match design.element_at(point) {
        Some(Occupant::Node(node)) => Ok((Anchor::Existing(Endpoint::Node(node)), None)),
        Some(Occupant::Pin(pin)) => {
            let endpoint = Endpoint::Pin(pin);
            Ok((Anchor::Existing(endpoint), design.preferred_direction(endpoint)))
        }
        Some(Occupant::ChipPin(chip, index)) => {
            let endpoint = Endpoint::Chip(chip, index);
            Ok((Anchor::Existing(endpoint), design.preferred_direction(endpoint)))
        }
        Some(Occupant::Waypoint(segment, _) | Occupant::Segment(segment)) => {
            Ok((Anchor::Split(segment), None))
        }
        Some(Occupant::Chip(_)) => Err(RoutingError::InvalidEndpoint(point).into()),
        None => Ok((Anchor::Fresh, None)),
    }
}

/// Resolves an anchor into a concrete endpoint, mutating the design where
/// needed.
fn commit(design: &mut Design, anchor: Anchor, point: Point) -> Result<Endpoint> {
    match anchor {
        Anchor::Existing(endpoint) => Ok(endpoint),
        Anchor::Split(segment) => {
            let (node, _) = SplitSegment::new(segment, point).execute(design)?;
            Ok(Endpoint::Node(node))
        }
        Anchor::Fresh => Ok(Endpoint::Node(design.graph.add_node(NodeData::new(point)))),
    }
}
