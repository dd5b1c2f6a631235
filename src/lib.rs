// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

//! Turn-by-turn directions from routed trip paths.
//!
//! A [TripPath] is a sequence of nodes and edges found by a route search.
//! Directex turns it into [TripDirections]: a list of maneuvers (depart, turns,
//! ramps, roundabouts, ferries, transit legs and arrive) with guide signs,
//! transit details and textual and verbal instructions in one of the
//! [built-in languages](narrative::DICTIONARIES), plus a trip summary.
//!
//! # Example
//!
//! ```no_run
//! let path = directex::path::read_from_file(
//!     "path/to/trip.xml",
//!     directex::path::FileFormat::Unknown,
//! ).expect("failed to load trip.xml");
//!
//! let options = directex::Options::from_request("imperial", "en-US");
//! let directions = directex::build_directions(&options, &path)
//!     .expect("failed to build directions");
//!
//! for maneuver in &directions.maneuvers {
//!     println!("{}", maneuver.instruction.as_deref().unwrap_or_default());
//! }
//! ```

mod directions;
mod error;
pub mod heading;
pub mod maneuver;
pub mod narrative;
mod options;
pub mod path;
pub mod signs;
pub mod transit;
pub mod turn;

pub use directions::{
    assemble, DirectionsBuilder, DirectionsLocation, DirectionsLocationType, DirectionsManeuver,
    DirectionsSideOfStreet, Summary, TripDirections,
};
pub use error::Error;
pub use maneuver::{Maneuver, ManeuverType};
pub use options::{Options, Units, KM_PER_MILE};
pub use path::TripPath;

/// Builds [TripDirections] for the provided [TripPath].
///
/// Shorthand for `DirectionsBuilder::new(*options).build(path)`.
pub fn build_directions(options: &Options, path: &TripPath) -> Result<TripDirections, Error> {
    DirectionsBuilder::new(*options).build(path)
}
