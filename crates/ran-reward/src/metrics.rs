//! The fixed metric scope a formula evaluates against.

/// One step's metrics, as exposed to reward formulas.
///
/// `switches` and `users_active` are integer quantities upstream; they are
/// carried as `f64` here because the formula language is numeric-only.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct StepMetrics {
    /// Total instantaneous power, watts.
    pub power: f64,
    /// Fraction of demanded traffic not served, in [0, 1].
    pub drop_rate: f64,
    /// Sector activation toggles since the previous step.
    pub switches: f64,
    /// Connected users summed over all sectors.
    pub users_active: f64,
}

/// A metric name, resolved once at parse time so evaluation is an indexed
/// load rather than a string lookup.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Metric {
    Power,
    DropRate,
    Switches,
    UsersActive,
}

impl Metric {
    pub(crate) fn from_name(name: &str) -> Option<Metric> {
        match name {
            "power" => Some(Metric::Power),
            "drop_rate" => Some(Metric::DropRate),
            "switches" => Some(Metric::Switches),
            "users_active" => Some(Metric::UsersActive),
            _ => None,
        }
    }
}

impl StepMetrics {
    #[inline]
    pub(crate) fn get(&self, metric: Metric) -> f64 {
        match metric {
            Metric::Power => self.power,
            Metric::DropRate => self.drop_rate,
            Metric::Switches => self.switches,
            Metric::UsersActive => self.users_active,
        }
    }
}
