use crate::grid::Point;

/// The obstruction and bounds queries the router needs from a design.
///
/// Valid routing coordinates span `[0, width] x [0, height]` inclusive;
/// points on the boundary are legal routing locations. Within bounds, only
/// obstructed points (chip footprints) are barred; pins, junctions and
/// other wires may be routed across freely.
pub trait RoutingGrid {
    /// Width of the design grid.
    fn width(&self) -> i32;

    /// Height of the design grid.
    fn height(&self) -> i32;

    /// Returns `true` if the point is occupied by a blocking obstacle.
    fn is_obstructed(&self, point: Point) -> bool;

    /// Returns `true` if a wire may pass through or terminate at the point.
    fn is_routable(&self, point: Point) -> bool {
        point.x >= 0
            && point.x <= self.width()
            && point.y >= 0
            && point.y <= self.height()
            && !self.is_obstructed(point)
    }
}
