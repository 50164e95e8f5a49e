use tracing::debug;

use crate::design::Design;
use crate::error::{Result, TopologyError};
use crate::topology::{Endpoint, NodeId, SegmentId, Waypoint};

/// Merges two segments that meet at a shared junction into one.
///
/// The first segment absorbs the second and ends up spanning the two
/// non-shared endpoints; the junction survives visually as a waypoint of
/// the merged segment, then the absorbed segment and the junction itself
/// are removed. Used by cleanup to eliminate degree-2 junctions.
pub struct MergeSegments {
    segment: SegmentId,
    other: SegmentId,
    node: NodeId,
}

impl MergeSegments {
    /// Creates a new `MergeSegments` operation.
    #[must_use]
    pub fn new(segment: SegmentId, other: SegmentId, node: NodeId) -> Self {
        Self {
            segment,
            other,
            node,
        }
    }

    /// Executes the merge. The first segment is retained and rerouted; the
    /// second segment and the shared junction are removed.
    ///
    /// # Errors
    ///
    /// Returns an error if either segment is missing, the segments are the
    /// same, or they do not both terminate at the junction.
    pub fn execute(&self, design: &mut Design) -> Result<()> {
        if self.segment == self.other {
            return Err(TopologyError::NotIncident.into());
        }
        let junction = Endpoint::Node(self.node);
        let merge_location = design.graph.node(self.node)?.location();

        let this_at_start = endpoint_side(design, self.segment, junction)?;
        let other_at_start = endpoint_side(design, self.other, junction)?;

        let other_data = design
            .graph
            .remove_segment(self.other)
            .ok_or(TopologyError::EntityNotFound("segment"))?;
        let new_endpoint = if other_at_start {
            other_data.end()
        } else {
            other_data.start()
        };

        // Concatenate the waypoint runs so the combined sequence still runs
        // start to end, reversing the absorbed run when both segments met
        // the junction from the same endpoint kind. The junction itself
        // becomes a waypoint between the two runs.
        let mut absorbed = other_data.waypoints;
        if this_at_start == other_at_start {
            absorbed.reverse();
        }
        let merge_waypoint = Waypoint::new(merge_location);
        {
            let segment = design.graph.segment_mut(self.segment)?;
            if this_at_start {
                absorbed.push(merge_waypoint);
                absorbed.append(&mut segment.waypoints);
                segment.waypoints = absorbed;
            } else {
                segment.waypoints.push(merge_waypoint);
                segment.waypoints.append(&mut absorbed);
            }
        }

        if this_at_start {
            design.graph.set_segment_start(self.segment, new_endpoint)?;
        } else {
            design.graph.set_segment_end(self.segment, new_endpoint)?;
        }
        design.graph.remove_node(self.node);
        design.reroute_segment(self.segment)?;

        debug!(at = %merge_location, "merged segments at junction");
        Ok(())
    }
}

/// Returns `true` if the segment starts at the endpoint, `false` if it ends
/// there, and an error if the endpoint is on neither side.
fn endpoint_side(design: &Design, segment: SegmentId, endpoint: Endpoint) -> Result<bool> {
    let segment = design.graph.segment(segment)?;
    if segment.start() == endpoint {
        Ok(true)
    } else if segment.end() == endpoint {
        Ok(false)
    } else {
        Err(TopologyError::NotIncident.into())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::grid::Point;
    use crate::operations::SplitSegment;
    use crate::topology::{NodeData, SegmentData};

    fn p(x: i32, y: i32) -> Point {
        Point::new(x, y)
    }

    fn design() -> Design {
        Design::new(12, 12).unwrap()
    }

    #[test]
    fn merge_spans_the_non_shared_endpoints() {
        let mut design = design();
        let a = design.graph.add_node(NodeData::new(p(0, 0)));
        let m = design.graph.add_node(NodeData::new(p(4, 0)));
        let b = design.graph.add_node(NodeData::new(p(8, 0)));

        let left = design.graph.add_segment(SegmentData::new(
            Endpoint::Node(a),
            Endpoint::Node(m),
            Vec::new(),
        ));
        let right = design.graph.add_segment(SegmentData::new(
            Endpoint::Node(m),
            Endpoint::Node(b),
            Vec::new(),
        ));
        design.reroute_segment(left).unwrap();
        design.reroute_segment(right).unwrap();

        MergeSegments::new(left, right, m).execute(&mut design).unwrap();

        let merged = design.graph.segment(left).unwrap();
        assert_eq!(merged.start(), Endpoint::Node(a));
        assert_eq!(merged.end(), Endpoint::Node(b));
        // The junction survives as a waypoint.
        assert_eq!(merged.waypoint_locations(), vec![p(4, 0)]);
        assert!(design.graph.node(m).is_err());
        assert!(design.graph.segment(right).is_err());
    }

    #[test]
    fn merge_reverses_waypoints_when_segments_meet_start_to_start() {
        let mut design = design();
        let m = design.graph.add_node(NodeData::new(p(4, 0)));
        let a = design.graph.add_node(NodeData::new(p(0, 0)));
        let b = design.graph.add_node(NodeData::new(p(10, 0)));

        // Both segments start at the shared junction.
        let left = design.graph.add_segment(SegmentData::new(
            Endpoint::Node(m),
            Endpoint::Node(a),
            vec![Waypoint::new(p(2, 0))],
        ));
        let right = design.graph.add_segment(SegmentData::new(
            Endpoint::Node(m),
            Endpoint::Node(b),
            vec![Waypoint::new(p(6, 0)), Waypoint::new(p(8, 0))],
        ));
        design.reroute_segment(left).unwrap();
        design.reroute_segment(right).unwrap();

        MergeSegments::new(left, right, m).execute(&mut design).unwrap();

        let merged = design.graph.segment(left).unwrap();
        assert_eq!(merged.start(), Endpoint::Node(b));
        assert_eq!(merged.end(), Endpoint::Node(a));
        // Absorbed run reversed, junction in the middle, kept run after.
        assert_eq!(
            merged.waypoint_locations(),
            vec![p(8, 0), p(6, 0), p(4, 0), p(2, 0)]
        );
    }

    #[test]
    fn split_then_merge_restores_the_original_segment() {
        let mut design = design();
        let a = design.graph.add_node(NodeData::new(p(0, 0)));
        let b = design.graph.add_node(NodeData::new(p(8, 0)));
        let segment = design.graph.add_segment(SegmentData::new(
            Endpoint::Node(a),
            Endpoint::Node(b),
            vec![Waypoint::new(p(2, 0)), Waypoint::new(p(6, 0))],
        ));
        design.reroute_segment(segment).unwrap();

        let (node, sibling) = SplitSegment::new(segment, p(4, 0)).execute(&mut design).unwrap();
        MergeSegments::new(segment, sibling, node)
            .execute(&mut design)
            .unwrap();

        let merged = design.graph.segment(segment).unwrap();
        assert_eq!(merged.start(), Endpoint::Node(a));
        assert_eq!(merged.end(), Endpoint::Node(b));
        // Original waypoints are back, plus the reintroduced midpoint.
        assert_eq!(
            merged.waypoint_locations(),
            vec![p(2, 0), p(4, 0), p(6, 0)]
        );
        assert_eq!(merged.route(), Some(&[p(0, 0), p(8, 0)][..]));
    }

    #[test]
    fn merging_a_segment_with_itself_fails() {
        let mut design = design();
        let a = design.graph.add_node(NodeData::new(p(0, 0)));
        let m = design.graph.add_node(NodeData::new(p(4, 0)));
        let segment = design.graph.add_segment(SegmentData::new(
            Endpoint::Node(a),
            Endpoint::Node(m),
            Vec::new(),
        ));
        assert!(MergeSegments::new(segment, segment, m)
            .execute(&mut design)
            .is_err());
    }
}
