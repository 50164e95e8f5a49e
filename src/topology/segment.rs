use crate::grid::Point;
use crate::topology::{Endpoint, NodeId, Waypoint};

slotmap::new_key_type! {
    /// Unique identifier for a wire segment in the wire graph.
    pub struct SegmentId;
}

/// A topological wire edge: two endpoints, the ordered waypoints its route
/// must pass through, and a cached geometric route.
///
/// The cached route, when present, is the corner-reduced polyline produced
/// by the router: its first point is the start location, its last point the
/// end location, and every waypoint location lies on it in order. Endpoints
/// are reassigned through [`WireGraph`](crate::topology::WireGraph) so the
/// incidence index stays consistent.
#[derive(Debug, Clone)]
pub struct SegmentData {
    pub(crate) start: Endpoint,
    pub(crate) end: Endpoint,
    /// Ordered waypoints the route must pass through.
    pub waypoints: Vec<Waypoint>,
    pub(crate) route: Option<Vec<Point>>,
}

impl SegmentData {
    /// Creates a segment between two endpoints. The route cache starts
    /// empty; route it through the owning design before use.
    #[must_use]
    pub fn new(start: Endpoint, end: Endpoint, waypoints: Vec<Waypoint>) -> Self {
        Self {
            start,
            end,
            waypoints,
            route: None,
        }
    }

    /// The segment's start endpoint.
    #[must_use]
    pub fn start(&self) -> Endpoint {
        self.start
    }

    /// The segment's end endpoint.
    #[must_use]
    pub fn end(&self) -> Endpoint {
        self.end
    }

    /// Both endpoints, start first.
    #[must_use]
    pub fn endpoints(&self) -> [Endpoint; 2] {
        [self.start, self.end]
    }

    /// Returns `true` if either endpoint is the given junction.
    #[must_use]
    pub fn has_endpoint(&self, node: NodeId) -> bool {
        self.start == Endpoint::Node(node) || self.end == Endpoint::Node(node)
    }

    /// The cached corner-reduced route, if the last routing attempt
    /// succeeded.
    #[must_use]
    pub fn route(&self) -> Option<&[Point]> {
        self.route.as_deref()
    }

    /// Effective locations of the segment's waypoints, in order.
    #[must_use]
    pub fn waypoint_locations(&self) -> Vec<Point> {
        self.waypoints.iter().map(Waypoint::location).collect()
    }

    /// Returns `true` if the point lies on the cached route polyline.
    ///
    /// A segment with no cached route contains nothing.
    #[must_use]
    pub fn route_contains(&self, point: Point) -> bool {
        let Some(route) = self.route.as_deref() else {
            return false;
        };
        route
            .windows(2)
            .any(|span| point.is_between(span[0], span[1]))
    }
}
