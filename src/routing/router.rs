use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};

use tracing::{debug, trace};

use crate::grid::{Direction, Point};
use crate::routing::grid::RoutingGrid;
use crate::routing::polyline::reduce_to_corners;

/// Penalty added each time a route changes direction.
const CORNER_PENALTY: f64 = 0.5;

/// Corner penalty used when comparing candidate approach paths at a
/// waypoint. Slightly cheaper than [`CORNER_PENALTY`] so the search prefers
/// cornering exactly at a waypoint over cornering beside it. Applied only
/// inside the candidate comparison, never to the accumulated cost.
const WAYPOINT_CORNER_PENALTY: f64 = 0.4;

/// Penalty for leaving the start (or reaching the end) against the
/// endpoint's preferred wire direction.
const DIRECTION_PENALTY: f64 = 5.0;

/// Neighbor expansion order. Fixing this (together with the queue
/// tie-break) makes equally-cheap routes deterministic.
const EXPANSION_ORDER: [Direction; 4] = [
    Direction::Right,
    Direction::Left,
    Direction::Up,
    Direction::Down,
];

/// Computes the cheapest orthogonal wire route between two points.
///
/// The search is a modified A*: the heuristic is the Manhattan distance
/// (plus half a corner when the displacement bends), and the actual cost
/// adds penalties for corners and for contradicting the endpoints'
/// preferred wire directions. Preferences are biases, not requirements:
/// when honoring one would force a far costlier path, it is overridden.
/// `preferred_end` names the side the wire should arrive *from*, so it is
/// compared against the reverse of the final step.
///
/// Waypoints are hard constraints routed as chained searches. Each waypoint
/// is approached from all four cardinal neighbors, keeping every viable
/// approach alive as a candidate partial path; the next leg picks the
/// cheapest candidate per expansion, which keeps the corner count minimal
/// across the whole route instead of per leg.
///
/// Returns the corner-reduced polyline (first point = `start`, last =
/// `end`), or `None` when either endpoint is invalid or no path exists.
pub fn route(
    grid: &impl RoutingGrid,
    start: Point,
    preferred_start: Option<Direction>,
    end: Point,
    preferred_end: Option<Direction>,
    waypoints: &[Point],
) -> Option<Vec<Point>> {
    match route_full(grid, start, preferred_start, end, preferred_end, waypoints) {
        Some(path) => {
            let corners = reduce_to_corners(&path.points);
            trace!(%start, %end, cost = path.cost, corners = corners.len(), "routed wire");
            Some(corners)
        }
        None => {
            debug!(%start, %end, "no route found");
            None
        }
    }
}

/// A complete unit-step path from the overall route start to some point,
/// with its accumulated cost.
#[derive(Debug, Clone)]
pub(crate) struct Candidate {
    pub(crate) points: Vec<Point>,
    pub(crate) cost: f64,
}

impl Candidate {
    /// The path's final point.
    fn tip(&self) -> Point {
        self.points[self.points.len() - 1]
    }

    /// The point visited immediately before the final point, if any.
    fn before_tip(&self) -> Option<Point> {
        self.points.len().checked_sub(2).map(|i| self.points[i])
    }
}

/// Routes the full unit-step path, chaining one search per waypoint plus a
/// final leg to the end point.
pub(crate) fn route_full(
    grid: &impl RoutingGrid,
    start: Point,
    preferred_start: Option<Direction>,
    end: Point,
    preferred_end: Option<Direction>,
    waypoints: &[Point],
) -> Option<Candidate> {
    let mut incoming: Option<Vec<Candidate>> = None;
    let mut from = start;

    for &waypoint in waypoints {
        let start_direction = if from == start { preferred_start } else { None };
        let candidates =
            approach_waypoint(grid, from, start_direction, waypoint, incoming.as_deref());
        if candidates.is_empty() {
            return None;
        }
        incoming = Some(candidates);
        from = waypoint;
    }

    let start_direction = if from == start { preferred_start } else { None };
    search_leg(
        grid,
        from,
        start_direction,
        end,
        preferred_end,
        incoming.as_deref(),
    )
}

/// Builds the set of candidate paths reaching a waypoint, one per viable
/// cardinal approach direction.
///
/// Each approach is a full search to the neighboring point, extended by the
/// final step onto the waypoint. Approaches whose path already passes
/// through the waypoint are discarded, since re-leaving the waypoint would
/// double back over it.
fn approach_waypoint(
    grid: &impl RoutingGrid,
    from: Point,
    preferred_from: Option<Direction>,
    waypoint: Point,
    incoming: Option<&[Candidate]>,
) -> Vec<Candidate> {
    EXPANSION_ORDER
        .iter()
        .filter_map(|&direction| {
            let adjacent = waypoint.step(direction);
            let path = search_leg(grid, from, preferred_from, adjacent, None, incoming)?;
            if path.before_tip() == Some(waypoint) {
                return None;
            }
            let cost = path.cost
                + step_cost(path.before_tip(), path.tip(), waypoint, None, None, false);
            let mut points = path.points;
            points.push(waypoint);
            Some(Candidate { points, cost })
        })
        .collect()
}

/// State of a visited search node.
struct NodeState {
    previous: Option<Point>,
    /// The inherited candidate path, set only on the first step out of a
    /// leg start that had incoming candidates. Which candidate a route
    /// inherits depends on which first step wins, so it is recorded here
    /// and stitched in during reconstruction.
    inherited: Option<Vec<Point>>,
    cost: f64,
    estimate: f64,
}

/// Priority-queue entry; the queue is a min-heap on the cost estimate, with
/// ties broken by point order for determinism.
struct QueueEntry {
    estimate: f64,
    point: Point,
}

impl PartialEq for QueueEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for QueueEntry {}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed: BinaryHeap is a max-heap and we want the cheapest first.
        other
            .estimate
            .total_cmp(&self.estimate)
            .then_with(|| other.point.cmp(&self.point))
    }
}

/// A* search for a single leg.
///
/// When `incoming` candidates are present (the leg starts at a waypoint),
/// the first step out of the leg start picks the cheapest candidate that
/// does not double back onto the chosen next point, inheriting its cost and
/// full path prefix.
fn search_leg(
    grid: &impl RoutingGrid,
    start: Point,
    preferred_start: Option<Direction>,
    end: Point,
    preferred_end: Option<Direction>,
    incoming: Option<&[Candidate]>,
) -> Option<Candidate> {
    if !grid.is_routable(start) || !grid.is_routable(end) {
        return None;
    }

    // Degenerate leg: resolve to the cheapest incoming candidate, if any.
    if start == end {
        return incoming?
            .iter()
            .min_by(|a, b| a.cost.total_cmp(&b.cost))
            .cloned();
    }

    let mut states: HashMap<Point, NodeState> = HashMap::new();
    let mut queue: BinaryHeap<QueueEntry> = BinaryHeap::new();

    let start_estimate = heuristic(start, end);
    states.insert(
        start,
        NodeState {
            previous: None,
            inherited: None,
            cost: 0.0,
            estimate: start_estimate,
        },
    );
    queue.push(QueueEntry {
        estimate: start_estimate,
        point: start,
    });

    while let Some(entry) = queue.pop() {
        let current = entry.point;
        let (current_cost, current_previous) = {
            let state = &states[&current];
            // Stale queue entry from before the node was improved.
            if entry.estimate > state.estimate {
                continue;
            }
            (state.cost, state.previous)
        };

        if current == end {
            return Some(reconstruct(&states, current, current_cost));
        }

        for direction in EXPANSION_ORDER {
            let next = current.step(direction);
            if !grid.is_routable(next) {
                continue;
            }

            let mut base_cost = current_cost;
            let mut previous = current_previous;
            let mut inherited = None;

            if previous.is_none() {
                if let Some(candidates) = incoming.filter(|c| !c.is_empty()) {
                    // Entering the leg proper: pick the cheapest incoming
                    // candidate for this particular next point, skipping
                    // candidates that would double back onto it. The
                    // comparison discounts corners at the waypoint itself.
                    let best = candidates
                        .iter()
                        .filter(|candidate| candidate.before_tip() != Some(next))
                        .min_by(|a, b| {
                            let cost_a = a.cost
                                + step_cost(a.before_tip(), current, next, None, None, true);
                            let cost_b = b.cost
                                + step_cost(b.before_tip(), current, next, None, None, true);
                            cost_a.total_cmp(&cost_b)
                        });
                    match best {
                        Some(candidate) => {
                            base_cost = candidate.cost;
                            previous = candidate.before_tip();
                            inherited = Some(candidate.points.clone());
                        }
                        // No candidate can continue this way.
                        None => continue,
                    }
                }
            }

            let start_direction = if current == start { preferred_start } else { None };
            let end_direction = if next == end { preferred_end } else { None };
            let cost =
                base_cost + step_cost(previous, current, next, start_direction, end_direction, false);

            let state = states.entry(next).or_insert(NodeState {
                previous: None,
                inherited: None,
                cost: f64::INFINITY,
                estimate: f64::INFINITY,
            });
            if cost < state.cost {
                state.previous = Some(current);
                state.cost = cost;
                state.estimate = cost + heuristic(next, end);
                state.inherited = inherited;
                queue.push(QueueEntry {
                    estimate: state.estimate,
                    point: next,
                });
            }
        }
    }

    None
}

/// Walks the predecessor chain back from the leg end, stitching in the
/// inherited candidate prefix when the chain reaches the leg's first step.
fn reconstruct(states: &HashMap<Point, NodeState>, end: Point, cost: f64) -> Candidate {
    let mut tail = Vec::new();
    let mut prefix: Option<Vec<Point>> = None;
    let mut cursor = Some(end);

    while let Some(point) = cursor {
        tail.push(point);
        let Some(state) = states.get(&point) else { break };
        if let Some(inherited) = &state.inherited {
            // The inherited path already ends at the leg start, so stop
            // before the chain would add it a second time.
            prefix = Some(inherited.clone());
            break;
        }
        cursor = state.previous;
    }
    tail.reverse();

    let points = match prefix {
        Some(mut points) => {
            points.extend(tail);
            points
        }
        None => tail,
    };
    Candidate { points, cost }
}

/// Estimated remaining cost: Manhattan distance, plus half a corner when
/// the displacement bends in both axes.
fn heuristic(from: Point, to: Point) -> f64 {
    let dx = to.x - from.x;
    let dy = to.y - from.y;
    let mut cost = f64::from(dx.abs() + dy.abs());
    if dx != 0 && dy != 0 {
        cost += CORNER_PENALTY;
    }
    cost
}

/// Actual cost of stepping from `current` to `next`, having arrived at
/// `current` from `previous`.
fn step_cost(
    previous: Option<Point>,
    current: Point,
    next: Point,
    preferred_start: Option<Direction>,
    preferred_end: Option<Direction>,
    corner_at_waypoint: bool,
) -> f64 {
    let dx = next.x - current.x;
    let dy = next.y - current.y;
    let mut cost = f64::from(dx.abs() + dy.abs());

    if let Some(previous) = previous {
        if current.x - previous.x != dx || current.y - previous.y != dy {
            cost += if corner_at_waypoint {
                WAYPOINT_CORNER_PENALTY
            } else {
                CORNER_PENALTY
            };
        }
    }
    if let Some(direction) = preferred_start {
        let (px, py) = direction.delta();
        if dx != px || dy != py {
            cost += DIRECTION_PENALTY;
        }
    }
    // The end preference names the side the wire arrives from, so compare
    // it against the reversed step.
    if let Some(direction) = preferred_end {
        let (px, py) = direction.delta();
        if -dx != px || -dy != py {
            cost += DIRECTION_PENALTY;
        }
    }

    cost
}
