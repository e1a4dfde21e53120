//! Domain types for the metro journey planner.
//!
//! This module contains the core domain model types that represent
//! validated network data. Types enforce their invariants at construction
//! time, so code that receives them can trust their validity.

mod error;
mod fare;
mod line;
mod station;

pub use error::DomainError;
pub use fare::Fare;
pub use line::{InvalidLineId, Line, LineId, StationOrder};
pub use station::{Coordinate, Station, normalize_station_name};
