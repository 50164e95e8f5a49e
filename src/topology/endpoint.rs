use crate::design::{ChipId, PinId};
use crate::topology::NodeId;

/// A segment endpoint: any entity a wire can terminate at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    /// A design terminal.
    Pin(PinId),
    /// A terminal of a placed chip, addressed by the pin's index within
    /// the chip.
    Chip(ChipId, usize),
    /// A free-standing junction.
    Node(NodeId),
}

impl Endpoint {
    /// Returns the junction id when this endpoint is a node.
    #[must_use]
    pub fn node(self) -> Option<NodeId> {
        match self {
            Self::Node(node) => Some(node),
            Self::Pin(_) | Self::Chip(..) => None,
        }
    }
}
