//! Dataset bundle persistence.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use ran_core::{RanConfig, SimRng};
use ran_topology::{SitePosition, Topology, TopologyResult};
use ran_traffic::TrafficTrace;

use crate::profile::diurnal_trace;
use crate::{DataError, DataResult};

/// Contents of `manifest.json`: everything but the matrices.
#[derive(Serialize, Deserialize)]
struct Manifest {
    config: RanConfig,
    positions: Vec<SitePosition>,
}

/// An in-memory dataset: the originating config, the site positions, and the
/// recorded traffic.  Built by [`generate`](Self::generate), persisted with
/// [`save`](Self::save), and restored with [`load`](Self::load).
#[derive(Debug)]
pub struct DatasetBundle {
    pub config: RanConfig,
    pub positions: Vec<SitePosition>,
    pub trace: TrafficTrace,
}

impl DatasetBundle {
    // ── Generation ────────────────────────────────────────────────────────

    /// Generate a bundle from scratch: scattered site placement plus a
    /// diurnal traffic trace, both derived from `config.episode.seed`.
    pub fn generate(config: RanConfig) -> DataResult<Self> {
        config.validate()?;
        let mut rng = SimRng::new(config.episode.seed);

        let topology = Topology::scattered(
            config.network.num_cells,
            config.network.inter_site_distance_km,
            &mut rng.child(0),
        )?;
        let positions = topology.positions().to_vec();

        let trace = diurnal_trace(&config, &mut rng.child(1))?;

        Ok(Self { config, positions, trace })
    }

    /// Canonical bundle directory name, e.g. `data_C5_S24_U50`.
    pub fn name(&self) -> String {
        bundle_name(&self.config)
    }

    /// Rebuild the topology this bundle was generated with.
    pub fn topology(&self) -> TopologyResult<Topology> {
        Topology::from_positions(
            self.positions.clone(),
            self.config.network.inter_site_distance_km,
        )
    }

    // ── Persistence ───────────────────────────────────────────────────────

    /// Write the bundle under `root`, creating `root/<name>/`.  Returns the
    /// bundle directory.
    pub fn save(&self, root: &Path) -> DataResult<PathBuf> {
        let dir = root.join(self.name());
        std::fs::create_dir_all(&dir)?;

        let manifest = Manifest {
            config: self.config.clone(),
            positions: self.positions.clone(),
        };
        serde_json::to_writer_pretty(File::create(dir.join("manifest.json"))?, &manifest)?;

        write_matrix_csv(
            &dir.join("users.csv"),
            self.trace.user_rows().map(|row| {
                row.iter().map(|v| v.to_string()).collect::<Vec<_>>()
            }),
            self.trace.sector_count(),
        )?;
        write_matrix_csv(
            &dir.join("traffic.csv"),
            self.trace.load_rows().map(|row| {
                row.iter().map(|v| v.to_string()).collect::<Vec<_>>()
            }),
            self.trace.sector_count(),
        )?;

        Ok(dir)
    }

    /// Load `root/<name>/`.  A missing bundle is a [`DataError::NotFound`]
    /// whose message tells the caller to run the builder first.
    pub fn load(root: &Path, name: &str) -> DataResult<Self> {
        let dir = root.join(name);
        let manifest_path = dir.join("manifest.json");
        if !manifest_path.exists() {
            return Err(DataError::NotFound { path: dir });
        }

        let manifest: Manifest =
            serde_json::from_reader(BufReader::new(File::open(&manifest_path)?))?;

        let users = read_matrix_csv(&dir.join("users.csv"), |s| {
            s.parse::<u32>().map_err(|e| format!("bad user count {s:?}: {e}"))
        })?;
        let load = read_matrix_csv(&dir.join("traffic.csv"), |s| {
            s.parse::<f64>().map_err(|e| format!("bad load value {s:?}: {e}"))
        })?;
        let trace = TrafficTrace::from_rows(users, load)?;

        // The matrices must describe the same network the manifest does.
        let expected = manifest.config.layout().total_sectors();
        if trace.sector_count() != expected {
            return Err(DataError::Parse(format!(
                "trace covers {} sectors but the manifest network has {expected}",
                trace.sector_count(),
            )));
        }

        Ok(Self {
            config: manifest.config,
            positions: manifest.positions,
            trace,
        })
    }
}

/// Canonical name for the bundle a config produces — keeps builders and
/// loaders agreeing without passing paths around.
pub fn bundle_name(config: &RanConfig) -> String {
    format!(
        "data_C{}_S{}_U{}",
        config.network.num_cells, config.traffic.trace_steps, config.traffic.max_users
    )
}

// ── CSV helpers ───────────────────────────────────────────────────────────────

/// One header row `sector_0..sector_{n-1}`, then one record per step.
fn write_matrix_csv<I>(path: &Path, rows: I, sectors: usize) -> DataResult<()>
where
    I: Iterator<Item = Vec<String>>,
{
    let mut writer = csv::Writer::from_path(path)?;
    let header: Vec<String> = (0..sectors).map(|i| format!("sector_{i}")).collect();
    writer.write_record(&header)?;
    for row in rows {
        writer.write_record(&row)?;
    }
    writer.flush()?;
    Ok(())
}

fn read_matrix_csv<T>(
    path: &Path,
    parse: impl Fn(&str) -> Result<T, String>,
) -> DataResult<Vec<Vec<T>>> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        let row: Vec<T> = record
            .iter()
            .map(|s| parse(s.trim()).map_err(DataError::Parse))
            .collect::<DataResult<_>>()?;
        rows.push(row);
    }
    Ok(rows)
}
