pub mod endpoint;
pub mod node;
pub mod segment;
pub mod waypoint;

pub use endpoint::Endpoint;
pub use node::{NodeData, NodeId};
pub use segment::{SegmentData, SegmentId};
pub use waypoint::Waypoint;

use slotmap::{SecondaryMap, SlotMap};

use crate::error::TopologyError;

/// Central arena that owns the wire graph: junction nodes and wire
/// segments.
///
/// Entities reference each other via typed ids (generational indices),
/// avoiding self-referential structures and enabling safe mutation. The
/// incidence index maps every junction to the segments touching it and is
/// maintained incrementally by insertion, removal and endpoint
/// reassignment, so degree queries during cleanup never rescan the segment
/// set. A self-referential segment (both endpoints on one junction) is
/// recorded once per endpoint but counts once toward the junction's degree.
#[derive(Debug, Default)]
pub struct WireGraph {
    nodes: SlotMap<NodeId, NodeData>,
    segments: SlotMap<SegmentId, SegmentData>,
    incidence: SecondaryMap<NodeId, Vec<SegmentId>>,
}

impl WireGraph {
    /// Creates a new, empty wire graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // --- Node operations ---

    /// Inserts a junction and returns its id.
    pub fn add_node(&mut self, data: NodeData) -> NodeId {
        let id = self.nodes.insert(data);
        self.incidence.insert(id, Vec::new());
        id
    }

    /// Returns a reference to the junction data, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the graph.
    pub fn node(&self, id: NodeId) -> Result<&NodeData, TopologyError> {
        self.nodes
            .get(id)
            .ok_or(TopologyError::EntityNotFound("node"))
    }

    /// Returns a mutable reference to the junction data, or an error if not
    /// found.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the graph.
    pub fn node_mut(&mut self, id: NodeId) -> Result<&mut NodeData, TopologyError> {
        self.nodes
            .get_mut(id)
            .ok_or(TopologyError::EntityNotFound("node"))
    }

    /// Removes a junction, returning its data if it existed.
    pub fn remove_node(&mut self, id: NodeId) -> Option<NodeData> {
        self.incidence.remove(id);
        self.nodes.remove(id)
    }

    /// Iterates over all junctions.
    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &NodeData)> {
        self.nodes.iter()
    }

    /// Iterates mutably over all junctions.
    pub fn nodes_mut(&mut self) -> impl Iterator<Item = (NodeId, &mut NodeData)> {
        self.nodes.iter_mut()
    }

    // --- Segment operations ---

    /// Inserts a segment and returns its id, recording it against any
    /// junction endpoints.
    pub fn add_segment(&mut self, data: SegmentData) -> SegmentId {
        let endpoints = data.endpoints();
        let id = self.segments.insert(data);
        for endpoint in endpoints {
            if let Some(node) = endpoint.node() {
                self.attach(node, id);
            }
        }
        id
    }

    /// Returns a reference to the segment data, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the graph.
    pub fn segment(&self, id: SegmentId) -> Result<&SegmentData, TopologyError> {
        self.segments
            .get(id)
            .ok_or(TopologyError::EntityNotFound("segment"))
    }

    /// Returns a mutable reference to the segment data, or an error if not
    /// found.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the graph.
    pub fn segment_mut(&mut self, id: SegmentId) -> Result<&mut SegmentData, TopologyError> {
        self.segments
            .get_mut(id)
            .ok_or(TopologyError::EntityNotFound("segment"))
    }

    /// Removes a segment, detaching it from any junction endpoints.
    pub fn remove_segment(&mut self, id: SegmentId) -> Option<SegmentData> {
        let data = self.segments.remove(id)?;
        for endpoint in data.endpoints() {
            if let Some(node) = endpoint.node() {
                self.detach(node, id);
            }
        }
        Some(data)
    }

    /// Iterates over all segments.
    pub fn segments(&self) -> impl Iterator<Item = (SegmentId, &SegmentData)> {
        self.segments.iter()
    }

    /// Iterates mutably over all segments.
    pub fn segments_mut(&mut self) -> impl Iterator<Item = (SegmentId, &mut SegmentData)> {
        self.segments.iter_mut()
    }

    /// Reassigns a segment's start endpoint, keeping incidence in sync.
    ///
    /// # Errors
    ///
    /// Returns an error if the segment is not found in the graph.
    pub fn set_segment_start(
        &mut self,
        id: SegmentId,
        endpoint: Endpoint,
    ) -> Result<(), TopologyError> {
        let segment = self
            .segments
            .get_mut(id)
            .ok_or(TopologyError::EntityNotFound("segment"))?;
        let old = segment.start;
        segment.start = endpoint;
        self.reattach(id, old, endpoint);
        Ok(())
    }

    /// Reassigns a segment's end endpoint, keeping incidence in sync.
    ///
    /// # Errors
    ///
    /// Returns an error if the segment is not found in the graph.
    pub fn set_segment_end(
        &mut self,
        id: SegmentId,
        endpoint: Endpoint,
    ) -> Result<(), TopologyError> {
        let segment = self
            .segments
            .get_mut(id)
            .ok_or(TopologyError::EntityNotFound("segment"))?;
        let old = segment.end;
        segment.end = endpoint;
        self.reattach(id, old, endpoint);
        Ok(())
    }

    // --- Incidence queries ---

    /// The segments recorded against a junction, one entry per endpoint.
    #[must_use]
    pub fn incident_segments(&self, node: NodeId) -> &[SegmentId] {
        self.incidence.get(node).map_or(&[], Vec::as_slice)
    }

    /// Number of distinct segments whose start or end is the junction.
    #[must_use]
    pub fn degree(&self, node: NodeId) -> usize {
        let incident = self.incident_segments(node);
        incident
            .iter()
            .enumerate()
            .filter(|&(i, segment)| !incident[..i].contains(segment))
            .count()
    }

    fn attach(&mut self, node: NodeId, segment: SegmentId) {
        if let Some(list) = self.incidence.get_mut(node) {
            list.push(segment);
        }
    }

    fn detach(&mut self, node: NodeId, segment: SegmentId) {
        if let Some(list) = self.incidence.get_mut(node) {
            if let Some(index) = list.iter().position(|s| *s == segment) {
                list.swap_remove(index);
            }
        }
    }

    fn reattach(&mut self, id: SegmentId, old: Endpoint, new: Endpoint) {
        if let Some(node) = old.node() {
            self.detach(node, id);
        }
        if let Some(node) = new.node() {
            self.attach(node, id);
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::grid::Point;

    fn p(x: i32, y: i32) -> Point {
        Point::new(x, y)
    }

    #[test]
    fn incidence_tracks_insert_and_remove() {
        let mut graph = WireGraph::new();
        let a = graph.add_node(NodeData::new(p(0, 0)));
        let b = graph.add_node(NodeData::new(p(4, 0)));

        let segment = graph.add_segment(SegmentData::new(
            Endpoint::Node(a),
            Endpoint::Node(b),
            Vec::new(),
        ));
        assert_eq!(graph.degree(a), 1);
        assert_eq!(graph.degree(b), 1);

        graph.remove_segment(segment);
        assert_eq!(graph.degree(a), 0);
        assert_eq!(graph.degree(b), 0);
    }

    #[test]
    fn incidence_follows_endpoint_reassignment() {
        let mut graph = WireGraph::new();
        let a = graph.add_node(NodeData::new(p(0, 0)));
        let b = graph.add_node(NodeData::new(p(4, 0)));
        let c = graph.add_node(NodeData::new(p(2, 2)));

        let segment = graph.add_segment(SegmentData::new(
            Endpoint::Node(a),
            Endpoint::Node(b),
            Vec::new(),
        ));
        graph.set_segment_end(segment, Endpoint::Node(c)).unwrap();

        assert_eq!(graph.degree(a), 1);
        assert_eq!(graph.degree(b), 0);
        assert_eq!(graph.degree(c), 1);
    }

    #[test]
    fn self_referential_segment_counts_once() {
        let mut graph = WireGraph::new();
        let a = graph.add_node(NodeData::new(p(0, 0)));
        graph.add_segment(SegmentData::new(
            Endpoint::Node(a),
            Endpoint::Node(a),
            Vec::new(),
        ));
        assert_eq!(graph.incident_segments(a).len(), 2);
        assert_eq!(graph.degree(a), 1);
    }

    #[test]
    fn removed_entities_report_not_found() {
        let mut graph = WireGraph::new();
        let a = graph.add_node(NodeData::new(p(0, 0)));
        graph.remove_node(a);
        assert!(graph.node(a).is_err());
    }
}
