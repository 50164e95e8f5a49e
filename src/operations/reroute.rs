use crate::design::Design;
use crate::error::Result;
use crate::topology::SegmentId;

/// Recomputes the cached route of every segment in the design.
///
/// Invoked after bulk topology changes such as a design resize, where any
/// segment's endpoints may have moved.
#[derive(Debug, Default)]
pub struct RerouteAll;

impl RerouteAll {
    /// Creates a new `RerouteAll` operation.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Executes the reroute pass over every segment, unconditionally.
    ///
    /// # Errors
    ///
    /// Returns an error if a segment references an entity that is no
    /// longer part of the design.
    pub fn execute(&self, design: &mut Design) -> Result<()> {
        let segments: Vec<SegmentId> = design.graph.segments().map(|(id, _)| id).collect();
        for segment in segments {
            design.reroute_segment(segment)?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::design::ChipData;
    use crate::grid::Point;
    use crate::operations::AddWire;

    fn p(x: i32, y: i32) -> Point {
        Point::new(x, y)
    }

    #[test]
    fn reroutes_around_newly_placed_chips() {
        let mut design = Design::new(10, 10).unwrap();
        let segment = AddWire::new(p(0, 0), p(6, 0), Vec::new())
            .execute(&mut design)
            .unwrap();
        assert_eq!(
            design.graph.segment(segment).unwrap().route(),
            Some(&[p(0, 0), p(6, 0)][..])
        );

        // A chip dropped across the straight route forces a detour.
        design.add_chip(ChipData::new(p(2, 0), 1, 1, Vec::new()));
        RerouteAll::new().execute(&mut design).unwrap();

        let route = design.graph.segment(segment).unwrap().route().unwrap();
        assert!(route.windows(2).all(|span| {
            !p(2, 0).is_between(span[0], span[1]) && !p(3, 0).is_between(span[0], span[1])
        }));
    }
}
