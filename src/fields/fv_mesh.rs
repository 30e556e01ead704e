use crate::StrError;
use gemlab::mesh::{Cell, CellId, Mesh, PointId};
use gemlab::shapes::GeoKind;
use std::collections::HashMap;

/// Holds the local point indices of the faces (edges in 2D) of a Tri3
static TRI3_FACES: [&[usize]; 3] = [&[0, 1], &[1, 2], &[2, 0]];

/// Holds the local point indices of the faces (edges in 2D) of a Qua4
static QUA4_FACES: [&[usize]; 4] = [&[0, 1], &[1, 2], &[2, 3], &[3, 0]];

/// Holds the local point indices of the faces of a Tet4
static TET4_FACES: [&[usize]; 4] = [&[0, 3, 2], &[0, 1, 3], &[0, 2, 1], &[1, 2, 3]];

/// Holds the local point indices of the faces of a Hex8
static HEX8_FACES: [&[usize]; 6] = [
    &[0, 4, 7, 3],
    &[1, 2, 6, 5],
    &[0, 1, 5, 4],
    &[2, 3, 7, 6],
    &[0, 3, 2, 1],
    &[4, 5, 6, 7],
];

/// Returns the local faces of a cell or None if the kind is not supported
fn local_faces(kind: GeoKind) -> Option<&'static [&'static [usize]]> {
    match kind {
        GeoKind::Tri3 => Some(&TRI3_FACES[..]),
        GeoKind::Qua4 => Some(&QUA4_FACES[..]),
        GeoKind::Tet4 => Some(&TET4_FACES[..]),
        GeoKind::Hex8 => Some(&HEX8_FACES[..]),
        _ => None,
    }
}

/// Computes the centroid (average of point coordinates) of a set of points
fn centroid(mesh: &Mesh, points: &[PointId]) -> Vec<f64> {
    let mut x = vec![0.0; mesh.ndim];
    for p in points {
        for d in 0..mesh.ndim {
            x[d] += mesh.points[*p].coords[d];
        }
    }
    let n = points.len() as f64;
    x.iter_mut().for_each(|v| *v /= n);
    x
}

/// Computes the Euclidean distance between two points
pub(crate) fn distance(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(u, v)| (u - v) * (u - v)).sum::<f64>().sqrt()
}

/// Checks that a mesh (e.g., read from a file) can be safely traversed
///
/// Point and cell ids must match their positions, points must have `ndim` coordinates and
/// cells must refer to existing points.
pub fn check_mesh(mesh: &Mesh) -> Result<(), StrError> {
    if mesh.ndim != 2 && mesh.ndim != 3 {
        return Err("the space dimension of the mesh must be 2 or 3");
    }
    for (index, point) in mesh.points.iter().enumerate() {
        if point.id != index {
            return Err("point ids must be sequential and start at zero");
        }
        if point.coords.len() != mesh.ndim {
            return Err("the number of point coordinates must equal the space dimension");
        }
    }
    for (index, cell) in mesh.cells.iter().enumerate() {
        if cell.id != index {
            return Err("cell ids must be sequential and start at zero");
        }
        if cell.points.len() == 0 {
            return Err("a cell must have at least one point");
        }
        if cell.points.iter().any(|p| *p >= mesh.points.len()) {
            return Err("a cell refers to a point that does not exist");
        }
    }
    Ok(())
}

/// Computes the centroids of all cells in a mesh
pub fn cell_centroids(mesh: &Mesh) -> Result<Vec<Vec<f64>>, StrError> {
    check_mesh(mesh)?;
    Ok(mesh.cells.iter().map(|cell: &Cell| centroid(mesh, &cell.points)).collect())
}

/// Holds a mesh with the data needed by cell- and face-centered discretizations
///
/// Each face has an owner cell and, for interior faces, a neighbour cell.
/// The interpolation weight `w` of a face is such that:
///
/// ```text
/// φ_face = w φ_owner + (1 - w) φ_neighbour
/// ```
///
/// Boundary faces take the owner value (w = 1).
pub struct FvMesh {
    /// Holds the underlying mesh
    pub mesh: Mesh,

    /// Holds the cell centroids (ncell)
    pub centroids: Vec<Vec<f64>>,

    /// Holds the owner cell of each face (nface)
    pub owner: Vec<CellId>,

    /// Holds the neighbour cell of each face; None for boundary faces (nface)
    pub neighbour: Vec<Option<CellId>>,

    /// Holds the interpolation weight of each face (nface)
    pub weights: Vec<f64>,
}

impl FvMesh {
    /// Allocates a new instance
    ///
    /// **Note:** Only Tri3 and Qua4 (2D) and Tet4 and Hex8 (3D) cells are supported.
    pub fn new(mesh: Mesh) -> Result<Self, StrError> {
        if mesh.cells.len() == 0 {
            return Err("there are no cells in the mesh");
        }
        let centroids = cell_centroids(&mesh)?;
        let mut owner = Vec::new();
        let mut neighbour: Vec<Option<CellId>> = Vec::new();
        let mut face_centers = Vec::new();
        let mut face_ids: HashMap<Vec<PointId>, usize> = HashMap::new();
        for cell in &mesh.cells {
            let faces = local_faces(cell.kind).ok_or("cell kind is not supported by FvMesh")?;
            for local in faces {
                let points = local
                    .iter()
                    .map(|m| cell.points.get(*m).copied())
                    .collect::<Option<Vec<PointId>>>()
                    .ok_or("a cell has fewer points than required by its kind")?;
                let mut key = points.clone();
                key.sort();
                match face_ids.get(&key) {
                    Some(f) => {
                        if neighbour[*f].is_some() {
                            return Err("a face cannot be shared by more than two cells");
                        }
                        neighbour[*f] = Some(cell.id);
                    }
                    None => {
                        face_ids.insert(key, owner.len());
                        owner.push(cell.id);
                        neighbour.push(None);
                        face_centers.push(centroid(&mesh, &points));
                    }
                }
            }
        }
        let weights = owner
            .iter()
            .zip(&neighbour)
            .zip(&face_centers)
            .map(|((o, n), xf)| match n {
                Some(n) => {
                    let d_own = distance(&centroids[*o], xf);
                    let d_nei = distance(&centroids[*n], xf);
                    if d_own + d_nei > 0.0 {
                        d_nei / (d_own + d_nei)
                    } else {
                        0.5
                    }
                }
                None => 1.0,
            })
            .collect();
        Ok(FvMesh {
            mesh,
            centroids,
            owner,
            neighbour,
            weights,
        })
    }

    /// Returns the space dimension
    pub fn ndim(&self) -> usize {
        self.mesh.ndim
    }

    /// Returns the number of cells
    pub fn ncell(&self) -> usize {
        self.mesh.cells.len()
    }

    /// Returns the number of faces
    pub fn nface(&self) -> usize {
        self.owner.len()
    }

    /// Interpolates cell values onto the faces
    pub fn interpolate(&self, cell_values: &[f64]) -> Result<Vec<f64>, StrError> {
        if cell_values.len() != self.ncell() {
            return Err("the number of cell values must equal the number of cells");
        }
        let face_values = (0..self.nface())
            .map(|f| {
                let w = self.weights[f];
                let v_own = cell_values[self.owner[f]];
                match self.neighbour[f] {
                    Some(n) => w * v_own + (1.0 - w) * cell_values[n],
                    None => v_own,
                }
            })
            .collect();
        Ok(face_values)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::{cell_centroids, check_mesh, FvMesh};
    use crate::fields::SampleMeshes;
    use gemlab::mesh::{Cell, Mesh, Point};
    use gemlab::shapes::GeoKind;
    use russell_lab::approx_eq;

    #[test]
    fn new_captures_errors() {
        let mesh = Mesh {
            ndim: 2,
            points: Vec::new(),
            cells: Vec::new(),
        };
        assert_eq!(FvMesh::new(mesh).err(), Some("there are no cells in the mesh"));

        #[rustfmt::skip]
        let mesh = Mesh {
            ndim: 2,
            points: vec![
                Point { id: 0, marker: 0, coords: vec![0.0, 0.0] },
                Point { id: 1, marker: 0, coords: vec![1.0, 0.0] },
                Point { id: 2, marker: 0, coords: vec![0.5, 0.0] },
                Point { id: 3, marker: 0, coords: vec![0.0, 1.0] },
                Point { id: 4, marker: 0, coords: vec![0.5, 0.5] },
                Point { id: 5, marker: 0, coords: vec![0.0, 0.5] },
            ],
            cells: vec![
                Cell { id: 0, attribute: 1, kind: GeoKind::Tri6, points: vec![0, 1, 3, 2, 4, 5] },
            ],
        };
        assert_eq!(FvMesh::new(mesh).err(), Some("cell kind is not supported by FvMesh"));
    }

    #[test]
    fn check_mesh_captures_errors() {
        let mut mesh = SampleMeshes::strip_qua4(1, 1.0);
        assert_eq!(check_mesh(&mesh), Ok(()));

        mesh.ndim = 1;
        assert_eq!(check_mesh(&mesh).err(), Some("the space dimension of the mesh must be 2 or 3"));
        mesh.ndim = 2;

        mesh.points[1].coords = vec![1.0];
        assert_eq!(
            check_mesh(&mesh).err(),
            Some("the number of point coordinates must equal the space dimension")
        );
        assert_eq!(
            cell_centroids(&mesh).err(),
            Some("the number of point coordinates must equal the space dimension")
        );
        mesh.points[1].coords = vec![0.0, 1.0];

        mesh.points[3].id = 7;
        assert_eq!(check_mesh(&mesh).err(), Some("point ids must be sequential and start at zero"));
        mesh.points[3].id = 3;

        mesh.cells[0].points[2] = 4;
        assert_eq!(check_mesh(&mesh).err(), Some("a cell refers to a point that does not exist"));
        assert_eq!(FvMesh::new(mesh.clone()).err(), Some("a cell refers to a point that does not exist"));
        mesh.cells[0].points[2] = 3;

        mesh.cells[0].id = 1;
        assert_eq!(check_mesh(&mesh).err(), Some("cell ids must be sequential and start at zero"));
        mesh.cells[0].id = 0;

        mesh.cells[0].points = vec![0, 2];
        assert_eq!(
            FvMesh::new(mesh.clone()).err(),
            Some("a cell has fewer points than required by its kind")
        );
        mesh.cells[0].points = Vec::new();
        assert_eq!(check_mesh(&mesh).err(), Some("a cell must have at least one point"));
    }

    #[test]
    fn new_works_2d() {
        //  5-------4-------3
        //  |  [0]  |  [1]  |
        //  0-------1-------2
        let fv = FvMesh::new(SampleMeshes::strip_qua4(2, 2.0)).unwrap();
        assert_eq!(fv.ndim(), 2);
        assert_eq!(fv.ncell(), 2);
        assert_eq!(fv.nface(), 7);
        assert_eq!(fv.centroids, vec![vec![0.5, 0.5], vec![1.5, 0.5]]);
        let interior: Vec<_> = (0..fv.nface()).filter(|f| fv.neighbour[*f].is_some()).collect();
        assert_eq!(interior.len(), 1);
        let f = interior[0];
        assert_eq!(fv.owner[f], 0);
        assert_eq!(fv.neighbour[f], Some(1));
        approx_eq(fv.weights[f], 0.5, 1e-15);
    }

    #[test]
    fn new_works_3d() {
        let fv = FvMesh::new(SampleMeshes::strip_hex8(3, 3.0)).unwrap();
        assert_eq!(fv.ndim(), 3);
        assert_eq!(fv.ncell(), 3);
        assert_eq!(fv.nface(), 16);
        let n_interior = fv.neighbour.iter().filter(|n| n.is_some()).count();
        assert_eq!(n_interior, 2);
        let centroids = cell_centroids(&fv.mesh).unwrap();
        approx_eq(centroids[2][0], 2.5, 1e-15);
        approx_eq(centroids[2][1], 0.5, 1e-15);
        approx_eq(centroids[2][2], 0.5, 1e-15);
    }

    #[test]
    fn interpolate_works() {
        let fv = FvMesh::new(SampleMeshes::strip_qua4(2, 2.0)).unwrap();
        assert_eq!(
            fv.interpolate(&[1.0]).err(),
            Some("the number of cell values must equal the number of cells")
        );
        let face_values = fv.interpolate(&[10.0, 20.0]).unwrap();
        for f in 0..fv.nface() {
            match fv.neighbour[f] {
                Some(_) => approx_eq(face_values[f], 15.0, 1e-14),
                None => approx_eq(face_values[f], if fv.owner[f] == 0 { 10.0 } else { 20.0 }, 1e-15),
            }
        }

        // uniform field
        let face_values = fv.interpolate(&[300.0, 300.0]).unwrap();
        assert!(face_values.iter().all(|v| *v == 300.0));
    }
}
