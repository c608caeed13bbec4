//! `ran-topology` — the spatial model of the radio network.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                 |
//! |--------------|----------------------------------------------------------|
//! | [`site`]     | `SitePosition` — planar site coordinate                  |
//! | [`topology`] | `Topology`: placement, distance matrix, neighbor search  |
//! | [`error`]    | `TopologyError`, `TopologyResult<T>`                     |
//!
//! The topology is intentionally a simplified proximity model: it exists to
//! answer "which site is closest to this one" so the engine can pick an
//! offload target for a fully dark cell.  It is not a propagation or
//! interference model.

pub mod error;
pub mod site;
pub mod topology;

#[cfg(test)]
mod tests;

pub use error::{TopologyError, TopologyResult};
pub use site::SitePosition;
pub use topology::Topology;
