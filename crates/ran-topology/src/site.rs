//! Planar site coordinate.
//!
//! Sites live on an abstract 2-D plane measured in kilometres.  `f64` is
//! deliberate: neighbor search breaks distance ties by cell id, and exact tie
//! detection needs the symmetric positions of a hexagonal grid to produce
//! bit-identical distances.

/// A site position on the simulation plane, in km.
#[derive(Copy, Clone, Debug, PartialEq)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct SitePosition {
    pub x_km: f64,
    pub y_km: f64,
}

impl SitePosition {
    #[inline]
    pub fn new(x_km: f64, y_km: f64) -> Self {
        Self { x_km, y_km }
    }

    /// Euclidean distance in km.
    #[inline]
    pub fn distance_km(self, other: SitePosition) -> f64 {
        self.distance_sq(other).sqrt()
    }

    /// Squared Euclidean distance — cheaper when only comparing.
    #[inline]
    pub fn distance_sq(self, other: SitePosition) -> f64 {
        let dx = self.x_km - other.x_km;
        let dy = self.y_km - other.y_km;
        dx * dx + dy * dy
    }
}

impl std::fmt::Display for SitePosition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.3}, {:.3})", self.x_km, self.y_km)
    }
}
