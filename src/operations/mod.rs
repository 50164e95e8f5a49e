pub mod add_wire;
pub mod merge_segments;
pub mod remove_segment;
pub mod reroute;
pub mod resize;
pub mod split_segment;

pub use add_wire::AddWire;
pub use merge_segments::MergeSegments;
pub use remove_segment::RemoveSegment;
pub use reroute::RerouteAll;
pub use resize::Resize;
pub use split_segment::SplitSegment;
