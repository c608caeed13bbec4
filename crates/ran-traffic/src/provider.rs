//! The provider trait and the per-step snapshot it produces.

/// One step's traffic: per-sector connected users and demanded load (Mbps).
///
/// Immutable once produced for a given step; the engine owns the copy it is
/// handed and carries it in its episode state.
#[derive(Clone, Debug, PartialEq)]
pub struct TrafficSnapshot {
    pub users: Vec<u32>,
    pub load: Vec<f64>,
}

impl TrafficSnapshot {
    pub fn sector_count(&self) -> usize {
        self.users.len()
    }

    pub fn total_users(&self) -> u64 {
        self.users.iter().map(|&u| u as u64).sum()
    }

    pub fn total_load(&self) -> f64 {
        self.load.iter().sum()
    }
}

/// Source of per-step traffic.
///
/// `snapshot` takes `&mut self` because the synthetic provider draws from an
/// owned RNG; the trace provider is effectively read-only.
pub trait TrafficProvider {
    /// Number of sectors each snapshot covers.  Fixed for the provider's
    /// lifetime; validated against the network shape at engine construction.
    fn sector_count(&self) -> usize;

    /// `Some(steps)` if this provider has a natural episode length (a
    /// recorded trace), `None` if it can produce traffic forever.  The
    /// engine derives its termination criterion from this.
    fn horizon(&self) -> Option<u64>;

    /// Traffic for step `step`.  Trace providers cycle modulo their length;
    /// synthetic providers draw fresh values on every call.
    fn snapshot(&mut self, step: u64) -> TrafficSnapshot;
}
