//! `ran-traffic` — per-step traffic demand for the ran-sim simulator.
//!
//! Two providers behind one trait:
//!
//! | Provider             | Source                          | Horizon        |
//! |----------------------|---------------------------------|----------------|
//! | [`TrafficTrace`]     | Precomputed (steps × sectors)   | trace length   |
//! |                      | matrices, cycled modulo length  |                |
//! | [`SyntheticTraffic`] | Uniform draws per call          | none (engine   |
//! |                      |                                 | uses its own)  |
//!
//! The engine is generic over [`TrafficProvider`] and never knows which mode
//! is in use.

pub mod error;
pub mod provider;
pub mod synthetic;
pub mod trace;


pub use error::{TrafficError, TrafficResult};
pub use provider::{TrafficProvider, TrafficSnapshot};
pub use synthetic::SyntheticTraffic;
pub use trace::TrafficTrace;
