//! `ran-data` — the dataset boundary of the ran-sim simulator.
//!
//! A dataset bundle is a directory holding everything a reproducible
//! dataset-backed run needs:
//!
//! | File            | Contents                                             |
//! |-----------------|------------------------------------------------------|
//! | `manifest.json` | Originating `RanConfig` + site positions             |
//! | `users.csv`     | (steps × sectors) connected-user counts              |
//! | `traffic.csv`   | (steps × sectors) demanded load, Mbps                |
//!
//! Bundles are named `data_C{cells}_S{steps}_U{max_users}` under a datasets
//! root.  [`DatasetBundle::load`] fails with an explicit not-found error if
//! the named bundle is absent — the caller is told to run the builder first.

pub mod bundle;
pub mod error;
pub mod profile;


pub use bundle::{bundle_name, DatasetBundle};
pub use error::{DataError, DataResult};
pub use profile::diurnal_trace;
