//! Hop-count fare lookup.

use std::fmt;

/// Hop count beyond which the maximum fare applies.
const MAX_SLAB_HOPS: usize = 20;

/// Fare charged when the journey exceeds the slab table.
const MAXIMUM_FARE: u32 = 60;

/// Fare for the shortest journeys.
const MINIMUM_FARE: u32 = 10;

/// A fare in whole rupees.
///
/// Fares rise by 5 for every two hops, from 10 for one or two hops up to
/// 55 for nineteen or twenty, and are capped at 60 beyond that.
///
/// # Examples
///
/// ```
/// use metro_server::domain::Fare;
///
/// assert_eq!(Fare::for_hops(1).rupees(), 10);
/// assert_eq!(Fare::for_hops(3).rupees(), 15);
/// assert_eq!(Fare::for_hops(25).rupees(), 60);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Fare(u32);

impl Fare {
    /// Fare for a journey of `hops` station-to-station hops.
    ///
    /// Zero hops is charged as one.
    pub fn for_hops(hops: usize) -> Self {
        let hops = hops.max(1);
        if hops > MAX_SLAB_HOPS {
            return Fare(MAXIMUM_FARE);
        }
        let slab = ((hops - 1) / 2) as u32;
        Fare(MINIMUM_FARE + 5 * slab)
    }

    /// Fare for a journey visiting `stations` stations, endpoints included.
    pub fn for_stations(stations: usize) -> Self {
        Self::for_hops(stations.saturating_sub(1))
    }

    /// The fare amount.
    pub fn rupees(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for Fare {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "₹{}", self.0)
    }
}
