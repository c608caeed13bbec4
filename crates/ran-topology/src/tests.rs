//! Unit tests for ran-topology.

#[cfg(test)]
mod helpers {
    use crate::{SitePosition, Topology};

    /// Three sites on a line: 0 at the origin, 1 one km east, 2 three km east.
    pub fn line3() -> Topology {
        Topology::from_positions(
            vec![
                SitePosition::new(0.0, 0.0),
                SitePosition::new(1.0, 0.0),
                SitePosition::new(3.0, 0.0),
            ],
            1.0,
        )
        .unwrap()
    }

    /// Site 0 flanked symmetrically: 1 east and 2 west, both exactly 2 km out.
    pub fn tied_pair() -> Topology {
        Topology::from_positions(
            vec![
                SitePosition::new(0.0, 0.0),
                SitePosition::new(2.0, 0.0),
                SitePosition::new(-2.0, 0.0),
            ],
            1.0,
        )
        .unwrap()
    }
}

#[cfg(test)]
mod construction {
    use ran_core::{CellId, SimRng};

    use crate::{SitePosition, Topology, TopologyError};

    #[test]
    fn empty_positions_rejected() {
        let r = Topology::from_positions(vec![], 1.0);
        assert!(matches!(r, Err(TopologyError::NoSites)));
    }

    #[test]
    fn matrix_symmetric_with_zero_diagonal() {
        let t = super::helpers::line3();
        for i in 0..3u32 {
            assert_eq!(t.distance(CellId(i), CellId(i)).unwrap(), 0.0);
            for j in 0..3u32 {
                assert_eq!(
                    t.distance(CellId(i), CellId(j)).unwrap(),
                    t.distance(CellId(j), CellId(i)).unwrap(),
                );
            }
        }
        assert_eq!(t.distance(CellId(0), CellId(2)).unwrap(), 3.0);
    }

    #[test]
    fn out_of_range_distance_errors() {
        let t = super::helpers::line3();
        let r = t.distance(CellId(0), CellId(9));
        assert!(matches!(r, Err(TopologyError::CellOutOfRange(CellId(9), 3))));
    }

    #[test]
    fn hexagonal_is_deterministic() {
        let a = Topology::hexagonal(19, 1.5).unwrap();
        let b = Topology::hexagonal(19, 1.5).unwrap();
        assert_eq!(a.positions(), b.positions());
    }

    #[test]
    fn hexagonal_ring1_at_isd() {
        // Sites 1..=6 form the first ring, each exactly one inter-site
        // distance from the centre site.
        let t = Topology::hexagonal(7, 1.5).unwrap();
        for j in 1..=6u32 {
            let d = t.distance(CellId(0), CellId(j)).unwrap();
            assert!((d - 1.5).abs() < 1e-12, "ring-1 cell {j} at {d} km");
        }
    }

    #[test]
    fn scattered_deterministic_under_seed() {
        let mut r1 = SimRng::new(99);
        let mut r2 = SimRng::new(99);
        let a = Topology::scattered(8, 1.5, &mut r1).unwrap();
        let b = Topology::scattered(8, 1.5, &mut r2).unwrap();
        assert_eq!(a.positions(), b.positions());
    }

    #[test]
    fn scattered_within_square() {
        let mut rng = SimRng::new(1);
        let t = Topology::scattered(16, 2.0, &mut rng).unwrap();
        let side = 4.0 * 2.0; // sqrt(16) * isd
        for p in t.positions() {
            assert!((0.0..side).contains(&p.x_km));
            assert!((0.0..side).contains(&p.y_km));
        }
    }

    #[test]
    fn single_site_allowed() {
        let t = Topology::from_positions(vec![SitePosition::new(0.0, 0.0)], 1.0).unwrap();
        assert_eq!(t.num_cells(), 1);
    }
}

#[cfg(test)]
mod neighbor_search {
    use ran_core::CellId;

    use crate::Topology;

    #[test]
    fn picks_closest() {
        let t = super::helpers::line3();
        assert_eq!(t.nearest_neighbor(CellId(0), &[]), Some(CellId(1)));
        assert_eq!(t.nearest_neighbor(CellId(2), &[]), Some(CellId(1)));
    }

    #[test]
    fn never_returns_self() {
        let t = super::helpers::line3();
        for i in 0..3u32 {
            assert_ne!(t.nearest_neighbor(CellId(i), &[]), Some(CellId(i)));
        }
    }

    #[test]
    fn respects_exclusions() {
        let t = super::helpers::line3();
        assert_eq!(
            t.nearest_neighbor(CellId(0), &[CellId(1)]),
            Some(CellId(2)),
        );
    }

    #[test]
    fn none_when_all_excluded() {
        let t = super::helpers::line3();
        assert_eq!(t.nearest_neighbor(CellId(0), &[CellId(1), CellId(2)]), None);
    }

    #[test]
    fn tie_breaks_to_lowest_id() {
        // Cells 1 and 2 are exactly equidistant from cell 0.
        let t = super::helpers::tied_pair();
        assert_eq!(t.nearest_neighbor(CellId(0), &[]), Some(CellId(1)));
        // With 1 excluded the tied partner is the answer.
        assert_eq!(t.nearest_neighbor(CellId(0), &[CellId(1)]), Some(CellId(2)));
    }

    #[test]
    fn hexagonal_ring_tie_is_deterministic() {
        // All six ring-1 cells tie; the lowest id must win every time.
        let t = Topology::hexagonal(7, 1.0).unwrap();
        for _ in 0..10 {
            assert_eq!(t.nearest_neighbor(CellId(0), &[]), Some(CellId(1)));
        }
    }

    #[test]
    fn single_site_has_no_neighbor() {
        let t = Topology::from_positions(
            vec![crate::SitePosition::new(0.0, 0.0)],
            1.0,
        )
        .unwrap();
        assert_eq!(t.nearest_neighbor(CellId(0), &[]), None);
    }
}
