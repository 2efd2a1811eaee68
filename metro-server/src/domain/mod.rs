//! Domain types for the metro network.
//!
//! These types represent validated network data. Identifiers are validated
//! at construction time, so code that receives them can trust their shape.

mod line;
mod station;
mod time;

pub use line::{InvalidLineId, LineId};
pub use station::{Station, StationId};
pub use time::TravelTime;
