use crate::base::Error;
use crate::fields::{cell_centroids, distance, FvMesh, ScalarField};
use crate::StrError;
use gemlab::mesh::Mesh;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::BufReader;
use std::path::{Path, PathBuf};

/// Defines the relative tolerance to compare recorded times
const TIME_TOLERANCE: f64 = 1e-10;

/// Defines the relative tolerance to compare cell centroids
const CENTROID_TOLERANCE: f64 = 1e-10;

/// Holds the time history (index) of a thermal case
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TimeHistory {
    /// Holds the indices of the field files
    pub indices: Vec<usize>,

    /// Holds the simulation times corresponding to each field file
    pub times: Vec<f64>,
}

/// Holds the named cell-centered scalar fields recorded at a given time
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FieldSnapshot {
    /// Holds the recorded time
    pub time: f64,

    /// Holds the values of each field (ncell)
    pub scalars: BTreeMap<String, Vec<f64>>,
}

/// Generates the path of the time history file
pub fn path_summary(dir: &Path) -> PathBuf {
    dir.join("summary.json")
}

/// Generates the path of the mesh file
pub fn path_mesh(dir: &Path) -> PathBuf {
    dir.join("mesh.json")
}

/// Generates the path of the field files
pub fn path_fields(dir: &Path, index: usize) -> PathBuf {
    dir.join(format!("fields-{:0>20}.json", index))
}

/// Reads a JSON file and reports failures as configuration errors
fn read_json<T>(path: &Path) -> Result<T, Error>
where
    T: for<'de> Deserialize<'de>,
{
    let file = File::open(path).map_err(|_| Error::config(format!("cannot open {:?}", path)))?;
    let reader = BufReader::new(file);
    serde_json::from_reader(reader).map_err(|e| Error::config(format!("cannot parse {:?}: {}", path, e)))
}

/// Writes a JSON file
fn write_json<T: Serialize>(path: &Path, data: &T) -> Result<(), StrError> {
    if let Some(p) = path.parent() {
        fs::create_dir_all(p).map_err(|_| "cannot create directory")?;
    }
    let mut file = File::create(path).map_err(|_| "cannot create file")?;
    serde_json::to_writer(&mut file, data).map_err(|_| "cannot write file")?;
    Ok(())
}

/// Holds a (previously computed) thermal case stored on disk
///
/// The case directory contains:
///
/// * `summary.json` -- the time history
/// * `mesh.json` -- the mesh of the thermal case
/// * `fields-<index>.json` -- the fields recorded at each time (see [FieldSnapshot])
pub struct ThermalCase {
    /// Holds the case directory
    dir: PathBuf,

    /// Holds the time history
    pub history: TimeHistory,

    /// Holds the mesh of the thermal case
    pub mesh: Mesh,

    /// Holds the cell centroids of the thermal mesh
    centroids: Vec<Vec<f64>>,
}

impl ThermalCase {
    /// Reads the time history and the mesh of a thermal case
    pub fn open(dir: &Path) -> Result<Self, Error> {
        if !dir.is_dir() {
            return Err(Error::config(format!("thermal case directory {:?} does not exist", dir)));
        }
        let history: TimeHistory = read_json(&path_summary(dir))?;
        if history.indices.len() != history.times.len() {
            return Err(Error::config(format!(
                "time history of {:?} has {} indices but {} times",
                dir,
                history.indices.len(),
                history.times.len()
            )));
        }
        let path = path_mesh(dir);
        let mesh = Mesh::read_json(&path).map_err(|e| Error::config(format!("cannot read {:?}: {}", path, e)))?;
        let centroids =
            cell_centroids(&mesh).map_err(|e| Error::config(format!("invalid mesh in {:?}: {}", path, e)))?;
        Ok(ThermalCase {
            dir: dir.to_path_buf(),
            history,
            mesh,
            centroids,
        })
    }

    /// Returns the case directory
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Finds the recorded time matching a simulation time
    ///
    /// Returns `(index, recorded_time)` of the latest recorded time ≤ `time`. If `time` precedes
    /// all recorded times, the earliest record is returned. Returns None if nothing was recorded.
    pub fn find_index(&self, time: f64) -> Option<(usize, f64)> {
        let tol = TIME_TOLERANCE * f64::max(1.0, time.abs());
        let mut latest: Option<(usize, f64)> = None;
        let mut earliest: Option<(usize, f64)> = None;
        for (index, t) in self.history.indices.iter().zip(&self.history.times) {
            if *t <= time + tol && latest.map_or(true, |(_, tl)| *t > tl) {
                latest = Some((*index, *t));
            }
            if earliest.map_or(true, |(_, te)| *t < te) {
                earliest = Some((*index, *t));
            }
        }
        if latest.is_none() {
            if let Some((_, te)) = earliest {
                log::warn!(
                    "time {:?} precedes the thermal case history in {:?}; using the earliest time {:?}",
                    time,
                    self.dir,
                    te
                );
            }
            return earliest;
        }
        latest
    }

    /// Reads a field recorded at the time matching a simulation time
    ///
    /// Returns `(field, recorded_time)` with values on the thermal mesh, or None if the
    /// field is not available.
    pub fn read_scalar(&self, name: &str, time: f64) -> Result<Option<(ScalarField, f64)>, Error> {
        let (index, recorded_time) = match self.find_index(time) {
            Some(found) => found,
            None => return Ok(None),
        };
        let mut snapshot: FieldSnapshot = read_json(&path_fields(&self.dir, index))?;
        match snapshot.scalars.remove(name) {
            Some(values) => Ok(Some((
                ScalarField {
                    name: name.to_string(),
                    values,
                },
                recorded_time,
            ))),
            None => Ok(None),
        }
    }

    /// Maps a field of the thermal mesh onto the solid mesh
    ///
    /// If the meshes have coincident cell centroids, the values are copied; otherwise, each
    /// solid cell takes the value of the nearest thermal cell (nearest centroid).
    ///
    /// # Input
    ///
    /// * `field` -- the field on the thermal mesh
    /// * `found_time` -- the recorded time of the field
    /// * `expected_time` -- the simulation time when the field was requested
    /// * `solid` -- the solid mesh
    pub fn map_to(
        &self,
        field: &ScalarField,
        found_time: f64,
        expected_time: f64,
        solid: &FvMesh,
    ) -> Result<ScalarField, Error> {
        let mismatch = |reason: String| Error::MeshMismatch {
            expected_field: field.name.clone(),
            found_field: field.name.clone(),
            expected_time,
            found_time,
            reason,
        };
        if self.mesh.ndim != solid.ndim() {
            return Err(mismatch(format!(
                "the thermal mesh is {}D but the solid mesh is {}D",
                self.mesh.ndim,
                solid.ndim()
            )));
        }
        if self.centroids.len() == 0 {
            return Err(mismatch("the thermal mesh has no cells".to_string()));
        }
        if field.values.len() != self.centroids.len() {
            return Err(mismatch(format!(
                "the field has {} values but the thermal mesh has {} cells",
                field.values.len(),
                self.centroids.len()
            )));
        }
        if self.coincides_with(solid) {
            return Ok(field.clone());
        }
        let values = solid
            .centroids
            .iter()
            .map(|x| {
                let mut nearest = 0;
                let mut d_min = f64::INFINITY;
                for (i, y) in self.centroids.iter().enumerate() {
                    let d = distance(x, y);
                    if d < d_min {
                        d_min = d;
                        nearest = i;
                    }
                }
                field.values[nearest]
            })
            .collect();
        Ok(ScalarField {
            name: field.name.clone(),
            values,
        })
    }

    /// Returns true if the thermal and solid meshes have coincident cell centroids
    fn coincides_with(&self, solid: &FvMesh) -> bool {
        if self.centroids.len() != solid.centroids.len() {
            return false;
        }
        self.centroids.iter().zip(&solid.centroids).all(|(a, b)| {
            let scale = a.iter().fold(1.0, |acc: f64, v| acc.max(v.abs()));
            distance(a, b) <= CENTROID_TOLERANCE * scale
        })
    }
}

/// Writes the files of a thermal case
///
/// This is used by thermal solvers (and tests) to record the fields that
/// will later be read by [ThermalCase].
pub struct ThermalCaseWriter {
    /// Holds the case directory
    dir: PathBuf,

    /// Holds the time history
    history: TimeHistory,
}

impl ThermalCaseWriter {
    /// Allocates a new instance and writes the mesh file
    pub fn new(dir: &Path, mesh: &Mesh) -> Result<Self, StrError> {
        fs::create_dir_all(dir).map_err(|_| "cannot create thermal case directory")?;
        mesh.write_json(&path_mesh(dir))?;
        Ok(ThermalCaseWriter {
            dir: dir.to_path_buf(),
            history: TimeHistory {
                indices: Vec::new(),
                times: Vec::new(),
            },
        })
    }

    /// Writes the fields recorded at a given time and updates the time history file
    pub fn write_fields(&mut self, time: f64, fields: &[&ScalarField]) -> Result<(), StrError> {
        if let Some(last) = self.history.times.last() {
            if time <= *last {
                return Err("recorded times must be increasing");
            }
        }
        let snapshot = FieldSnapshot {
            time,
            scalars: fields.iter().map(|f| (f.name.clone(), f.values.clone())).collect(),
        };
        let index = self.history.indices.len();
        write_json(&path_fields(&self.dir, index), &snapshot)?;
        self.history.indices.push(index);
        self.history.times.push(time);
        write_json(&path_summary(&self.dir), &self.history)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
