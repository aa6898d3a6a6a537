//! Greedy multi-stop route optimization.
//!
//! The only distance signal available per spot is its scalar distance from
//! the trip origin, so the visiting order is the nearest-next order over that
//! metric. N is small (a handful of user-picked spots); determinism matters
//! more than exactness here, so ties break by ascending spot id.

use crate::models::{Itinerary, RouteLeg, SelectionSet, Spot, Waypoint};

/// Compute the visiting order over a selection and emit a 1-indexed
/// itinerary from the origin through every spot, closed by a synthetic leg to
/// the summit. Pure and total: 0- or 1-member selections yield a valid,
/// trivially short itinerary (callers enforce their own minimum-count
/// preconditions).
pub fn optimize(selection: &SelectionSet) -> Itinerary {
    let mut remaining: Vec<&Spot> = selection.members().collect();
    let mut legs = Vec::with_capacity(remaining.len() + 1);
    let mut from = Waypoint::Origin;
    let mut order = 1;

    while !remaining.is_empty() {
        let next_idx = nearest_next(&remaining);
        let next = remaining.swap_remove(next_idx);
        let to = Waypoint::Spot {
            id: next.id,
            name: next.name.clone(),
        };
        legs.push(RouteLeg {
            order,
            from,
            to: to.clone(),
        });
        from = to;
        order += 1;
    }

    legs.push(RouteLeg {
        order,
        from,
        to: Waypoint::Summit,
    });

    Itinerary::new(legs)
}

/// Index of the unvisited spot with the smallest distance from origin,
/// ties broken by ascending id.
fn nearest_next(remaining: &[&Spot]) -> usize {
    let mut best = 0;
    for (i, spot) in remaining.iter().enumerate().skip(1) {
        let current = remaining[best];
        let closer = spot
            .distance_from_origin_km
            .total_cmp(&current.distance_from_origin_km)
            .then(spot.id.cmp(&current.id))
            .is_lt();
        if closer {
            best = i;
        }
    }
    best
}
