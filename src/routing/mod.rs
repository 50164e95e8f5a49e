pub mod grid;
pub mod polyline;
pub mod router;

pub use grid::RoutingGrid;
pub use polyline::reduce_to_corners;
pub use router::route;
