use nalgebra::Point3;

/// An axis-aligned cuboid in 3D space using raw meter coordinates.
///
/// Used as the spatial domain of a snapshot, as the cell shape of the cell
/// snapshot kind, and as the per-cell sampling bounds of the Voronoi kind.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Box3 {
    /// Minimum corner in meters
    pub min: Point3<f64>,
    /// Maximum corner in meters
    pub max: Point3<f64>,
}

impl Box3 {
    pub fn new(min: Point3<f64>, max: Point3<f64>) -> Self {
        Self { min, max }
    }

    /// The cube [-half, half]³.
    pub fn cube(half: f64) -> Self {
        Self {
            min: Point3::new(-half, -half, -half),
            max: Point3::new(half, half, half),
        }
    }

    /// Smallest box containing all the given points.
    pub fn from_points<'a>(points: impl Iterator<Item = &'a Point3<f64>>) -> Self {
        points.fold(
            Self {
                min: Point3::new(f64::INFINITY, f64::INFINITY, f64::INFINITY),
                max: Point3::new(f64::NEG_INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY),
            },
            |bounds, p| Self {
                min: Point3::new(
                    bounds.min.x.min(p.x),
                    bounds.min.y.min(p.y),
                    bounds.min.z.min(p.z),
                ),
                max: Point3::new(
                    bounds.max.x.max(p.x),
                    bounds.max.y.max(p.y),
                    bounds.max.z.max(p.z),
                ),
            },
        )
    }

    /// True when the point lies inside the closed box.
    pub fn contains(&self, p: &Point3<f64>) -> bool {
        p.x >= self.min.x
            && p.x <= self.max.x
            && p.y >= self.min.y
            && p.y <= self.max.y
            && p.z >= self.min.z
            && p.z <= self.max.z
    }

    /// Center point of the box.
    pub fn center(&self) -> Point3<f64> {
        Point3::new(
            (self.min.x + self.max.x) / 2.0,
            (self.min.y + self.max.y) / 2.0,
            (self.min.z + self.max.z) / 2.0,
        )
    }

    /// Edge lengths along the three axes.
    pub fn extent(&self) -> [f64; 3] {
        [
            self.max.x - self.min.x,
            self.max.y - self.min.y,
            self.max.z - self.min.z,
        ]
    }

    /// Volume in m³.
    pub fn volume(&self) -> f64 {
        let [dx, dy, dz] = self.extent();
        dx * dy * dz
    }

    /// Grow the box by a margin on all sides, clipped to an outer box.
    pub fn grown(&self, margin: f64, clip: &Box3) -> Box3 {
        Box3 {
            min: Point3::new(
                (self.min.x - margin).max(clip.min.x),
                (self.min.y - margin).max(clip.min.y),
                (self.min.z - margin).max(clip.min.z),
            ),
            max: Point3::new(
                (self.max.x + margin).min(clip.max.x),
                (self.max.y + margin).min(clip.max.y),
                (self.max.z + margin).min(clip.max.z),
            ),
        }
    }
}
