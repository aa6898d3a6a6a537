use crate::error::{PlanError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum SpotCategory {
    TouristSpot,
    Restaurant,
    Cafe,
    Hotel,
}

impl SpotCategory {
    pub const ALL: [SpotCategory; 4] = [
        SpotCategory::TouristSpot,
        SpotCategory::Restaurant,
        SpotCategory::Cafe,
        SpotCategory::Hotel,
    ];

    /// Content-type code used by the tourism provider. Cafes are listed under
    /// the provider's food category; the requested category is kept on the
    /// parsed spot.
    pub fn provider_content_type(&self) -> &str {
        match self {
            SpotCategory::TouristSpot => "12",
            SpotCategory::Restaurant => "39",
            SpotCategory::Cafe => "39",
            SpotCategory::Hotel => "32",
        }
    }
}

impl fmt::Display for SpotCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SpotCategory::TouristSpot => "tourist_spot",
            SpotCategory::Restaurant => "restaurant",
            SpotCategory::Cafe => "cafe",
            SpotCategory::Hotel => "hotel",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for SpotCategory {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "tourist_spot" | "tourist" => Ok(SpotCategory::TouristSpot),
            "restaurant" => Ok(SpotCategory::Restaurant),
            "cafe" => Ok(SpotCategory::Cafe),
            "hotel" => Ok(SpotCategory::Hotel),
            _ => Err(format!("Invalid spot category: {}", s)),
        }
    }
}

/// A point of interest near a destination mountain, scoped to one planning
/// session.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Spot {
    pub id: u64,
    pub name: String,
    pub category: SpotCategory,
    pub distance_from_origin_km: f64,
    pub rating: f32,
}

impl Spot {
    pub fn new(
        id: u64,
        name: String,
        category: SpotCategory,
        distance_from_origin_km: f64,
        rating: f32,
    ) -> Self {
        Spot {
            id,
            name,
            category,
            distance_from_origin_km,
            rating: rating.clamp(0.0, 5.0),
        }
    }
}

/// The spots the user has picked from the candidate list. Unique by id;
/// storage order is irrelevant, the optimizer produces the deterministic
/// visiting order.
#[derive(Debug, Default)]
pub struct SelectionSet {
    spots: HashMap<u64, Spot>,
}

impl SelectionSet {
    pub fn new() -> Self {
        SelectionSet::default()
    }

    /// Add the spot if absent, remove it if present. Returns true when the
    /// spot is selected after the call.
    pub fn toggle(&mut self, spot: Spot) -> bool {
        if self.spots.remove(&spot.id).is_some() {
            false
        } else {
            self.spots.insert(spot.id, spot);
            true
        }
    }

    pub fn members(&self) -> impl Iterator<Item = &Spot> {
        self.spots.values()
    }

    pub fn contains(&self, id: u64) -> bool {
        self.spots.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.spots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spots.is_empty()
    }

    pub fn clear(&mut self) {
        self.spots.clear();
    }

    /// Precondition check for selection-dependent actions: directions need at
    /// least one spot, the optimal route needs at least two.
    pub fn require_at_least(&self, needed: usize) -> Result<()> {
        let have = self.spots.len();
        if have < needed {
            return Err(PlanError::InsufficientSelection { needed, have });
        }
        Ok(())
    }
}
