use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One endpoint of an itinerary leg.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Waypoint {
    /// The implicit start of the trip.
    Origin,
    /// A selected spot.
    Spot { id: u64, name: String },
    /// The synthetic terminal: arrival at the destination mountain itself.
    Summit,
}

/// One ordered hop in a multi-stop itinerary. Orders are 1-indexed and form
/// a total order over the selection.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RouteLeg {
    pub order: u32,
    pub from: Waypoint,
    pub to: Waypoint,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Itinerary {
    pub id: Uuid,
    pub legs: Vec<RouteLeg>,
}

impl Itinerary {
    pub fn new(legs: Vec<RouteLeg>) -> Self {
        Itinerary {
            id: Uuid::new_v4(),
            legs,
        }
    }

    /// Spot ids in visiting order, excluding origin and summit.
    pub fn visiting_order(&self) -> Vec<u64> {
        self.legs
            .iter()
            .filter_map(|leg| match &leg.to {
                Waypoint::Spot { id, .. } => Some(*id),
                _ => None,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_visiting_order_skips_summit() {
        let itinerary = Itinerary::new(vec![
            RouteLeg {
                order: 1,
                from: Waypoint::Origin,
                to: Waypoint::Spot {
                    id: 7,
                    name: "falls".into(),
                },
            },
            RouteLeg {
                order: 2,
                from: Waypoint::Spot {
                    id: 7,
                    name: "falls".into(),
                },
                to: Waypoint::Summit,
            },
        ]);

        assert_eq!(itinerary.visiting_order(), vec![7]);
    }
}
