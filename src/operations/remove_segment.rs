use tracing::{debug, trace};

use crate::design::Design;
use crate::error::{Result, TopologyError};
use crate::operations::MergeSegments;
use crate::topology::{NodeId, SegmentId};

/// Removes a wire segment and restores the junction degree invariant.
///
/// After the removal, cleanup runs to a fixed point: a junction of degree 2
/// has its two segments merged into one, a junction of degree 1 has its
/// sole segment removed (which can cascade), and a junction of degree 0 is
/// deleted. Every cleanup step removes at least one node or segment from a
/// finite graph, so the cascade always terminates. When it finishes, every
/// remaining junction has degree 3 or more.
pub struct RemoveSegment {
    segment: SegmentId,
}

impl RemoveSegment {
    /// Creates a new `RemoveSegment` operation.
    #[must_use]
    pub fn new(segment: SegmentId) -> Self {
        Self { segment }
    }

    /// Executes the removal and the cleanup cascade.
    ///
    /// # Errors
    ///
    /// Returns an error if the segment is not part of the design.
    pub fn execute(&self, design: &mut Design) -> Result<()> {
        design
            .graph
            .remove_segment(self.segment)
            .ok_or(TopologyError::EntityNotFound("segment"))?;
        cleanup(design)
    }
}

/// Consolidates transient junctions until none of degree 2 or less remain.
fn cleanup(design: &mut Design) -> Result<()> {
    loop {
        let transient = design
            .graph
            .nodes()
            .map(|(id, _)| id)
            .find(|&id| design.graph.degree(id) <= 2);
        let Some(node) = transient else {
            break;
        };

        let incident = distinct_incident(design, node);
        match incident.as_slice() {
            [] => {
                trace!("dropping orphaned junction");
                design.graph.remove_node(node);
            }
            [segment] => {
                trace!("removing sole segment of a dangling junction");
                design
                    .graph
                    .remove_segment(*segment)
                    .ok_or(TopologyError::EntityNotFound("segment"))?;
                design.graph.remove_node(node);
            }
            [first, second] => {
                MergeSegments::new(*first, *second, node).execute(design)?;
            }
            _ => unreachable!("degree was at most 2"),
        }
    }
    debug!("wire cleanup reached a fixed point");
    Ok(())
}

/// The distinct segments incident to a junction.
fn distinct_incident(design: &Design, node: NodeId) -> Vec<SegmentId> {
    let mut incident: Vec<SegmentId> = design.graph.incident_segments(node).to_vec();
    incident.sort_unstable();
    incident.dedup();
    incident
}
