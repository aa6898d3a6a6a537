use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Transport modes compared for a single origin/destination pair.
///
/// Declaration order doubles as the fixed recommendation priority (car, bus,
/// bicycle, walking, taxi), so the derived `Ord` is the final tie-break.
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord,
)]
#[serde(rename_all = "lowercase")]
pub enum TransportMode {
    Car,
    Bus,
    Bicycle,
    Walking,
    Taxi,
}

impl TransportMode {
    pub const ALL: [TransportMode; 5] = [
        TransportMode::Car,
        TransportMode::Bus,
        TransportMode::Bicycle,
        TransportMode::Walking,
        TransportMode::Taxi,
    ];

    /// Returns the directions provider profile name for this mode
    pub fn provider_profile(&self) -> &str {
        match self {
            TransportMode::Car => "driving",
            TransportMode::Bus => "transit",
            TransportMode::Bicycle => "cycling",
            TransportMode::Walking => "walking",
            TransportMode::Taxi => "taxi",
        }
    }
}

impl fmt::Display for TransportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TransportMode::Car => "car",
            TransportMode::Bus => "bus",
            TransportMode::Bicycle => "bicycle",
            TransportMode::Walking => "walking",
            TransportMode::Taxi => "taxi",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for TransportMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "car" | "driving" => Ok(TransportMode::Car),
            "bus" | "transit" => Ok(TransportMode::Bus),
            "bicycle" | "bike" | "cycling" => Ok(TransportMode::Bicycle),
            "walk" | "walking" => Ok(TransportMode::Walking),
            "taxi" => Ok(TransportMode::Taxi),
            _ => Err(format!("Invalid transport mode: '{}'", s)),
        }
    }
}

/// One candidate route as returned by the directions provider, assumed
/// pre-ranked (first is the provider's preferred route).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RouteCandidate {
    pub duration_seconds: u32,
    pub distance_km: f64,
    /// Monetary cost in the provider's currency unit; absent for free modes.
    pub cost: Option<u32>,
}

/// A candidate annotated with its mode and best-flag for UI highlighting.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ModeOption {
    pub mode: TransportMode,
    pub duration_seconds: u32,
    pub distance_km: f64,
    pub cost: Option<u32>,
    /// Exactly one option per mode carries this flag.
    pub best: bool,
}

impl ModeOption {
    pub fn duration_minutes(&self) -> u32 {
        (self.duration_seconds + 59) / 60
    }
}

/// Per-mode ranked options for one origin/destination pair. Modes for which
/// the provider returned no candidates are absent from the map.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ModeComparison {
    pub options: BTreeMap<TransportMode, Vec<ModeOption>>,
}

impl ModeComparison {
    /// The provider's preferred candidate for a mode, if the mode has any.
    pub fn best(&self, mode: TransportMode) -> Option<&ModeOption> {
        self.options.get(&mode).and_then(|opts| opts.first())
    }

    /// The overall recommendation: the mode whose best candidate has minimum
    /// duration; ties broken by minimum cost (an absent cost loses to any
    /// present cost), then by the fixed mode priority.
    pub fn recommended(&self) -> Option<TransportMode> {
        let mut winner: Option<(TransportMode, u32, u32)> = None;

        // BTreeMap iterates in priority order, so replacing only on strict
        // improvement realizes the final tie-break.
        for (mode, opts) in &self.options {
            let Some(best) = opts.first() else { continue };
            let cost_key = best.cost.unwrap_or(u32::MAX);
            let candidate = (*mode, best.duration_seconds, cost_key);

            winner = match winner {
                None => Some(candidate),
                Some((_, dur, cost))
                    if best.duration_seconds < dur
                        || (best.duration_seconds == dur && cost_key < cost) =>
                {
                    Some(candidate)
                }
                Some(current) => Some(current),
            };
        }

        winner.map(|(mode, _, _)| mode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn option(mode: TransportMode, duration_seconds: u32, cost: Option<u32>) -> ModeOption {
        ModeOption {
            mode,
            duration_seconds,
            distance_km: 100.0,
            cost,
            best: true,
        }
    }

    fn comparison(entries: Vec<ModeOption>) -> ModeComparison {
        let mut options = BTreeMap::new();
        for entry in entries {
            options.insert(entry.mode, vec![entry]);
        }
        ModeComparison { options }
    }

    #[test]
    fn test_transport_mode_from_str() {
        assert_eq!("car".parse::<TransportMode>().unwrap(), TransportMode::Car);
        assert_eq!(
            "CYCLING".parse::<TransportMode>().unwrap(),
            TransportMode::Bicycle
        );
        assert!("teleport".parse::<TransportMode>().is_err());
    }

    #[test]
    fn test_mode_priority_is_declaration_order() {
        assert!(TransportMode::Car < TransportMode::Bus);
        assert!(TransportMode::Bus < TransportMode::Bicycle);
        assert!(TransportMode::Bicycle < TransportMode::Walking);
        assert!(TransportMode::Walking < TransportMode::Taxi);
    }

    #[test]
    fn test_recommended_strictly_faster_mode_wins() {
        // car 2h34m / 248050 vs bus 3h15m / 230000: car is strictly faster.
        let cmp = comparison(vec![
            option(TransportMode::Car, 2 * 3600 + 34 * 60, Some(248_050)),
            option(TransportMode::Bus, 3 * 3600 + 15 * 60, Some(230_000)),
        ]);
        assert_eq!(cmp.recommended(), Some(TransportMode::Car));
    }

    #[test]
    fn test_recommended_duration_tie_broken_by_cost() {
        // Equal durations: the cheaper bus wins.
        let cmp = comparison(vec![
            option(TransportMode::Car, 9_240, Some(248_050)),
            option(TransportMode::Bus, 9_240, Some(230_000)),
        ]);
        assert_eq!(cmp.recommended(), Some(TransportMode::Bus));
    }

    #[test]
    fn test_recommended_full_tie_broken_by_mode_priority() {
        let cmp = comparison(vec![
            option(TransportMode::Bus, 9_240, Some(1_000)),
            option(TransportMode::Car, 9_240, Some(1_000)),
            option(TransportMode::Taxi, 9_240, Some(1_000)),
        ]);
        assert_eq!(cmp.recommended(), Some(TransportMode::Car));
    }

    #[test]
    fn test_recommended_absent_cost_loses_duration_tie() {
        let cmp = comparison(vec![
            option(TransportMode::Walking, 9_240, None),
            option(TransportMode::Taxi, 9_240, Some(50_000)),
        ]);
        assert_eq!(cmp.recommended(), Some(TransportMode::Taxi));
    }

    #[test]
    fn test_recommended_empty_comparison() {
        assert_eq!(ModeComparison::default().recommended(), None);
    }

    #[test]
    fn test_duration_minutes_rounds_up() {
        assert_eq!(option(TransportMode::Car, 61, None).duration_minutes(), 2);
        assert_eq!(option(TransportMode::Car, 120, None).duration_minutes(), 2);
    }
}
