//! Routing over the transit graph.
//!
//! Path finders (fewest hops, shortest weighted distance, bounded
//! alternates, reachability) are methods on [`TransitGraph`]. A path is
//! then split into single-line segments with interchange points, and
//! [`Planner`] combines both into a [`Route`] carrying a fare and an
//! estimated travel time.
//!
//! [`TransitGraph`]: crate::network::TransitGraph

mod config;
mod error;
mod explore;
mod path;
mod route;
mod search;
mod segment;


pub use config::PlannerConfig;
pub use error::RouteError;
pub use path::Path;
pub use route::{Planner, Route, RouteMode};
pub use segment::{Interchange, RouteSegment, interchanges};
