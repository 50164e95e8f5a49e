use thiserror::Error;

use crate::grid::Point;

/// Top-level error type for the Gridwire routing kernel.
#[derive(Debug, Error)]
pub enum GridwireError {
    #[error(transparent)]
    Routing(#[from] RoutingError),

    #[error(transparent)]
    Topology(#[from] TopologyError),

    #[error(transparent)]
    Design(#[from] DesignError),
}

/// Errors related to wire routing.
#[derive(Debug, Error)]
pub enum RoutingError {
    #[error("no route exists from {from} to {to}")]
    Unreachable { from: Point, to: Point },

    #[error("point {0} is not a valid routing endpoint")]
    InvalidEndpoint(Point),
}

/// Errors related to topological operations on the wire graph.
#[derive(Debug, Error)]
pub enum TopologyError {
    #[error("entity not found: {0}")]
    EntityNotFound(&'static str),

    #[error("point {0} does not lie on the segment's route")]
    PointNotOnRoute(Point),

    #[error("segment has no computed route")]
    RouteMissing,

    #[error("segments do not share the node they are being merged at")]
    NotIncident,
}

/// Errors related to the design container.
#[derive(Debug, Error)]
pub enum DesignError {
    #[error("design dimensions {width}x{height} are too small")]
    InvalidDimensions { width: i32, height: i32 },

    #[error("point {0} is outside the design bounds")]
    OutOfBounds(Point),
}

/// Convenience type alias for results using [`GridwireError`].
pub type Result<T> = std::result::Result<T, GridwireError>;
