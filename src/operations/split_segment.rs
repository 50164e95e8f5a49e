use tracing::debug;

use crate::design::Design;
use crate::error::{Result, TopologyError};
use crate::grid::Point;
use crate::topology::{Endpoint, NodeData, NodeId, SegmentData, SegmentId};

/// Splits a wire segment at a point on its route, inserting a junction.
///
/// The segment keeps the part of its route before the split point and the
/// waypoints on that side; a new sibling segment spans from the junction to
/// the segment's original end and takes the remaining waypoints. A split
/// point that coincides with an existing waypoint consumes that waypoint
/// instead of keeping it on either side.
pub struct SplitSegment {
    segment: SegmentId,
    point: Point,
}

impl SplitSegment {
    /// Creates a new `SplitSegment` operation.
    #[must_use]
    pub fn new(segment: SegmentId, point: Point) -> Self {
        Self { segment, point }
    }

    /// Executes the split, returning the new junction and the sibling
    /// segment.
    ///
    /// # Errors
    ///
    /// Returns an error if the segment is missing, has no cached route, or
    /// the point does not lie on that route.
    pub fn execute(&self, design: &mut Design) -> Result<(NodeId, SegmentId)> {
        let segment = design.graph.segment(self.segment)?;
        if segment.route().is_none() {
            return Err(TopologyError::RouteMissing.into());
        }
        if !segment.route_contains(self.point) {
            return Err(TopologyError::PointNotOnRoute(self.point).into());
        }

        let locations = segment.waypoint_locations();
        let (index, consume) = match locations.iter().position(|&loc| loc == self.point) {
            Some(found) => (found, true),
            None => {
                let route = segment.route().unwrap_or(&[]);
                (waypoints_before(route, &locations, self.point), false)
            }
        };
        let original_end = segment.end();

        // Partition the waypoints, dropping the consumed one if the split
        // landed exactly on it.
        let mut tail = design
            .graph
            .segment_mut(self.segment)?
            .waypoints
            .split_off(index);
        if consume {
            tail.remove(0);
        }

        let node = design.graph.add_node(NodeData::new(self.point));
        let sibling = design.graph.add_segment(SegmentData::new(
            Endpoint::Node(node),
            original_end,
            tail,
        ));
        design.graph.set_segment_end(self.segment, Endpoint::Node(node))?;

        design.reroute_segment(self.segment)?;
        design.reroute_segment(sibling)?;

        debug!(point = %self.point, "split segment at junction");
        Ok((node, sibling))
    }
}

/// Counts the waypoints that lie before `point` along the cached route.
///
/// Walks the route's corner spans and the ordered waypoints together. When
/// a waypoint and the split point share a span, the waypoint counts as
/// earlier only when its offset from the split point opposes the span
/// direction; consumed waypoints re-examine the same span so several
/// waypoints sharing it partition correctly.
fn waypoints_before(route: &[Point], waypoints: &[Point], point: Point) -> usize {
    let mut index = 0;
    for span in route.windows(2) {
        let (from, to) = (span[0], span[1]);
        let point_here = point.is_between(from, to);
        while index < waypoints.len() {
            let waypoint = waypoints[index];
            if !waypoint.is_between(from, to) {
                break;
            }
            if point_here {
                let (span_dx, span_dy) = (to.x - from.x, to.y - from.y);
                let (dx, dy) = (waypoint.x - point.x, waypoint.y - point.y);
                let before =
                    (span_dx == 0 && span_dy * dy < 0) || (span_dy == 0 && span_dx * dx < 0);
                if !before {
                    return index;
                }
            }
            index += 1;
        }
        if point_here {
            break;
        }
    }
    index
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::topology::{NodeData, Waypoint};

    fn p(x: i32, y: i32) -> Point {
        Point::new(x, y)
    }

    /// A routed segment between two fresh junctions, with waypoints.
    fn segment_between(
        design: &mut Design,
        start: Point,
        end: Point,
        waypoints: &[Point],
    ) -> SegmentId {
        let a = design.graph.add_node(NodeData::new(start));
        let b = design.graph.add_node(NodeData::new(end));
        let waypoints = waypoints.iter().map(|&w| Waypoint::new(w)).collect();
        let id = design
            .graph
            .add_segment(SegmentData::new(Endpoint::Node(a), Endpoint::Node(b), waypoints));
        design.reroute_segment(id).unwrap();
        id
    }

    #[test]
    fn split_partitions_route_and_waypoints() {
        let mut design = Design::new(10, 10).unwrap();
        let segment = segment_between(&mut design, p(0, 0), p(6, 0), &[p(4, 0)]);

        let (node, sibling) = SplitSegment::new(segment, p(2, 0)).execute(&mut design).unwrap();

        let kept = design.graph.segment(segment).unwrap();
        assert_eq!(kept.end(), Endpoint::Node(node));
        assert!(kept.waypoints.is_empty());
        assert_eq!(kept.route(), Some(&[p(0, 0), p(2, 0)][..]));

        let new = design.graph.segment(sibling).unwrap();
        assert_eq!(new.start(), Endpoint::Node(node));
        assert_eq!(new.waypoint_locations(), vec![p(4, 0)]);
        assert_eq!(new.route(), Some(&[p(2, 0), p(6, 0)][..]));

        assert_eq!(design.graph.degree(node), 2);
    }

    #[test]
    fn split_at_a_waypoint_consumes_it() {
        let mut design = Design::new(10, 10).unwrap();
        let segment = segment_between(&mut design, p(0, 0), p(6, 0), &[p(3, 0)]);

        let (_, sibling) = SplitSegment::new(segment, p(3, 0)).execute(&mut design).unwrap();

        assert!(design.graph.segment(segment).unwrap().waypoints.is_empty());
        assert!(design.graph.segment(sibling).unwrap().waypoints.is_empty());
    }

    #[test]
    fn waypoints_sharing_the_split_span_partition_by_side() {
        let mut design = Design::new(10, 10).unwrap();
        // Both waypoints and the split point lie on the single span of a
        // straight route.
        let segment = segment_between(&mut design, p(0, 0), p(6, 0), &[p(2, 0), p(4, 0)]);

        let (_, sibling) = SplitSegment::new(segment, p(3, 0)).execute(&mut design).unwrap();

        assert_eq!(
            design.graph.segment(segment).unwrap().waypoint_locations(),
            vec![p(2, 0)]
        );
        assert_eq!(
            design.graph.segment(sibling).unwrap().waypoint_locations(),
            vec![p(4, 0)]
        );
    }

    #[test]
    fn several_waypoints_before_the_split_all_stay_behind() {
        let mut design = Design::new(10, 10).unwrap();
        let segment = segment_between(&mut design, p(0, 0), p(8, 0), &[p(2, 0), p(3, 0), p(6, 0)]);

        let (_, sibling) = SplitSegment::new(segment, p(5, 0)).execute(&mut design).unwrap();

        assert_eq!(
            design.graph.segment(segment).unwrap().waypoint_locations(),
            vec![p(2, 0), p(3, 0)]
        );
        assert_eq!(
            design.graph.segment(sibling).unwrap().waypoint_locations(),
            vec![p(6, 0)]
        );
    }

    #[test]
    fn split_point_off_the_route_fails_fast() {
        let mut design = Design::new(10, 10).unwrap();
        let segment = segment_between(&mut design, p(0, 0), p(6, 0), &[]);

        let result = SplitSegment::new(segment, p(3, 3)).execute(&mut design);
        assert!(result.is_err());
        // The failed split left the segment untouched.
        assert_eq!(
            design.graph.segment(segment).unwrap().route(),
            Some(&[p(0, 0), p(6, 0)][..])
        );
    }

    #[test]
    fn split_on_a_corner_route_keeps_waypoint_order() {
        let mut design = Design::new(10, 10).unwrap();
        // Waypoint forces a corner; split downstream of it.
        let segment = segment_between(&mut design, p(0, 0), p(4, 4), &[p(4, 0)]);

        let (node, sibling) = SplitSegment::new(segment, p(4, 2)).execute(&mut design).unwrap();

        assert_eq!(
            design.graph.segment(segment).unwrap().waypoint_locations(),
            vec![p(4, 0)]
        );
        assert!(design.graph.segment(sibling).unwrap().waypoints.is_empty());
        assert_eq!(design.graph.node(node).unwrap().location(), p(4, 2));
    }
}
