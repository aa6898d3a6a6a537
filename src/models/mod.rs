mod coordinates;
mod itinerary;
mod search;
mod spot;
mod transport;

pub use coordinates::Coordinates;
pub use itinerary::{Itinerary, RouteLeg, Waypoint};
pub use search::{SearchQuery, SearchResult};
pub use spot::{SelectionSet, Spot, SpotCategory};
pub use transport::{ModeComparison, ModeOption, RouteCandidate, TransportMode};
