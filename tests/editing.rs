//! End-to-end editing session against the public API: draw, branch, prune
//! and resize a small design, checking the graph invariants along the way.

#![allow(clippy::expect_used)]

use gridwire::design::{ChipData, ChipPin, Design, Occupant, PinData};
use gridwire::grid::{Direction, Point};
use gridwire::operations::{AddWire, RemoveSegment, Resize};

fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing_subscriber::filter::LevelFilter::WARN.into());
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_test_writer()
        .try_init();
}

fn p(x: i32, y: i32) -> Point {
    Point::new(x, y)
}

/// Every junction left behind by an edit session is a real branch point.
fn assert_junction_invariant(design: &Design) {
    for (node, _) in design.graph.nodes() {
        let degree = design.graph.degree(node);
        assert!(degree >= 3, "transient junction of degree {degree} survived");
    }
}

#[test]
fn editing_session_keeps_the_graph_consistent() {
    init_tracing();

    let mut design = Design::new(16, 12).expect("valid dimensions");
    design.add_pin(PinData::new("in", p(0, 6), Direction::Right));
    design.add_pin(PinData::new("out", p(16, 6), Direction::Left));
    design.add_chip(ChipData::new(
        p(6, 4),
        3,
        4,
        vec![
            ChipPin::new("a", p(0, 1), Direction::Left),
            ChipPin::new("q", p(3, 2), Direction::Right),
        ],
    ));

    // Wire the input pin to the gate's input terminal, and the gate's
    // output terminal across to the design output.
    let lead_in = AddWire::new(p(0, 6), p(6, 5), Vec::new())
        .execute(&mut design)
        .expect("input lead routes");
    assert!(design
        .graph
        .segment(lead_in)
        .expect("lead exists")
        .route()
        .is_some());
    AddWire::new(p(9, 6), p(16, 6), Vec::new())
        .execute(&mut design)
        .expect("output lead routes");

    // Branch off the output lead from below; the click lands mid-wire and
    // splits it, leaving a three-way junction.
    let branch = AddWire::new(p(12, 11), p(12, 6), Vec::new())
        .execute(&mut design)
        .expect("branch routes");
    let junction = design
        .graph
        .segment(branch)
        .expect("branch exists")
        .end()
        .node()
        .expect("branch ends on a junction");
    assert_eq!(design.graph.degree(junction), 3);
    assert_eq!(design.element_at(p(12, 6)), Some(Occupant::Node(junction)));

    // No route may pass through the chip footprint; only the two terminal
    // points on its outline are legal.
    for (_, segment) in design.graph.segments() {
        let route = segment.route().expect("all segments routed");
        for span in route.windows(2) {
            for x in 6..=9 {
                for y in 4..=8 {
                    if (x, y) != (6, 5) && (x, y) != (9, 6) {
                        assert!(
                            !p(x, y).is_between(span[0], span[1]),
                            "route crosses the chip at ({x}, {y})"
                        );
                    }
                }
            }
        }
    }

    // Pruning the branch collapses the junction back into a single wire
    // and sweeps the branch's free end away with it.
    RemoveSegment::new(branch)
        .execute(&mut design)
        .expect("branch removal cleans up");
    assert!(design.graph.node(junction).is_err());
    assert_eq!(design.graph.nodes().count(), 0);
    assert_junction_invariant(&design);

    // Growing the design re-anchors the output pin and reroutes the wires.
    Resize::new(20, 12, false, false)
        .execute(&mut design)
        .expect("resize succeeds");
    let connectivity = design.connectivity();
    assert_eq!(connectivity.len(), design.graph.segments().count());
    for (segment, _) in connectivity {
        let route = design
            .graph
            .segment(segment)
            .expect("segment exists")
            .route()
            .expect("rerouted after resize");
        assert!(route.iter().all(|point| point.x <= 20 && point.y <= 12));
    }
}
