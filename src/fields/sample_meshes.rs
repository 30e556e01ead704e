use gemlab::mesh::{Cell, Mesh, Point};
use gemlab::shapes::GeoKind;

/// Holds sample meshes
pub struct SampleMeshes {}

impl SampleMeshes {
    /// Returns a strip of Qua4 cells along x with unit height
    ///
    /// ```text
    /// 1.0  1-------3-------5  ...
    ///      |  [0]  |  [1]  |
    /// 0.0  0-------2-------4  ...
    ///     0.0
    /// ```
    ///
    /// # Input
    ///
    /// * `ncell` -- number of cells along x
    /// * `length` -- total length along x
    pub fn strip_qua4(ncell: usize, length: f64) -> Mesh {
        let dx = length / (ncell as f64);
        let mut points = Vec::new();
        for i in 0..(ncell + 1) {
            let x = (i as f64) * dx;
            points.push(Point {
                id: 2 * i,
                marker: 0,
                coords: vec![x, 0.0],
            });
            points.push(Point {
                id: 2 * i + 1,
                marker: 0,
                coords: vec![x, 1.0],
            });
        }
        let cells = (0..ncell)
            .map(|i| Cell {
                id: i,
                attribute: 1,
                kind: GeoKind::Qua4,
                points: vec![2 * i, 2 * i + 2, 2 * i + 3, 2 * i + 1],
            })
            .collect();
        Mesh { ndim: 2, points, cells }
    }

    /// Returns a strip of Hex8 cells along x with unit height and depth
    ///
    /// # Input
    ///
    /// * `ncell` -- number of cells along x
    /// * `length` -- total length along x
    pub fn strip_hex8(ncell: usize, length: f64) -> Mesh {
        let dx = length / (ncell as f64);
        let yz = [(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)];
        let mut points = Vec::new();
        for i in 0..(ncell + 1) {
            let x = (i as f64) * dx;
            for (m, (y, z)) in yz.iter().enumerate() {
                points.push(Point {
                    id: 4 * i + m,
                    marker: 0,
                    coords: vec![x, *y, *z],
                });
            }
        }
        let cells = (0..ncell)
            .map(|i| {
                let (a, b) = (4 * i, 4 * (i + 1));
                Cell {
                    id: i,
                    attribute: 1,
                    kind: GeoKind::Hex8,
                    points: vec![a, b, b + 1, a + 1, a + 3, b + 3, b + 2, a + 2],
                }
            })
            .collect();
        Mesh { ndim: 3, points, cells }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
