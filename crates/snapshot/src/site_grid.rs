//! Uniform bin grids for position-to-entity lookup.
//!
//! Entities are binned once at setup into a flat arena: a per-bin offset
//! table plus one contiguous entry array, referenced by index. Queries walk
//! bins instead of entities, so nearest-site lookup on a Voronoi snapshot
//! and containment candidates on a cell snapshot cost a handful of bin
//! scans rather than a pass over the whole entity list.

use nalgebra::Point3;

use crate::geometry::Box3;

/// Shared binning math for the point and box grids.
#[derive(Debug, Clone)]
struct BinLayout {
    domain: Box3,
    dims: [usize; 3],
    bin_size: [f64; 3],
}

impl BinLayout {
    fn new(domain: Box3, target_bins: usize) -> Self {
        let per_axis = (target_bins as f64).cbrt().ceil().max(1.0) as usize;
        let dims = [per_axis, per_axis, per_axis];
        let extent = domain.extent();
        let bin_size = [
            extent[0] / dims[0] as f64,
            extent[1] / dims[1] as f64,
            extent[2] / dims[2] as f64,
        ];
        Self {
            domain,
            dims,
            bin_size,
        }
    }

    fn num_bins(&self) -> usize {
        self.dims[0] * self.dims[1] * self.dims[2]
    }

    fn axis_index(&self, axis: usize, coordinate: f64) -> usize {
        let origin = [self.domain.min.x, self.domain.min.y, self.domain.min.z][axis];
        let i = ((coordinate - origin) / self.bin_size[axis]).floor() as isize;
        i.clamp(0, self.dims[axis] as isize - 1) as usize
    }

    fn bin_of(&self, p: &Point3<f64>) -> [usize; 3] {
        [
            self.axis_index(0, p.x),
            self.axis_index(1, p.y),
            self.axis_index(2, p.z),
        ]
    }

    fn flat(&self, bin: [usize; 3]) -> usize {
        (bin[0] * self.dims[1] + bin[1]) * self.dims[2] + bin[2]
    }

    fn min_bin_size(&self) -> f64 {
        self.bin_size[0].min(self.bin_size[1]).min(self.bin_size[2])
    }
}

/// Flat arena of per-bin entity index lists.
#[derive(Debug, Clone)]
struct BinArena {
    offsets: Vec<usize>, // len num_bins + 1
    entries: Vec<usize>,
}

impl BinArena {
    fn build(num_bins: usize, assignments: impl Iterator<Item = (usize, usize)> + Clone) -> Self {
        let mut counts = vec![0usize; num_bins + 1];
        for (bin, _) in assignments.clone() {
            counts[bin + 1] += 1;
        }
        for i in 1..counts.len() {
            counts[i] += counts[i - 1];
        }
        let offsets = counts.clone();

        let mut cursor = offsets.clone();
        let mut entries = vec![0usize; offsets[num_bins]];
        for (bin, entity) in assignments {
            entries[cursor[bin]] = entity;
            cursor[bin] += 1;
        }
        Self { offsets, entries }
    }

    fn bin(&self, flat: usize) -> &[usize] {
        &self.entries[self.offsets[flat]..self.offsets[flat + 1]]
    }
}

/// A uniform bin grid over point sites supporting nearest-site and
/// radius queries.
#[derive(Debug, Clone)]
pub struct SiteGrid {
    layout: BinLayout,
    arena: BinArena,
    positions: Vec<Point3<f64>>,
}

impl SiteGrid {
    /// Bin the given sites over the domain. The grid aims at an average
    /// occupancy of one site per bin.
    pub fn new(domain: Box3, positions: &[Point3<f64>]) -> Self {
        let layout = BinLayout::new(domain, positions.len().max(1));
        let assignments = positions
            .iter()
            .enumerate()
            .map(|(i, p)| (layout.flat(layout.bin_of(p)), i));
        let arena = BinArena::build(layout.num_bins(), assignments);
        Self {
            layout,
            arena,
            positions: positions.to_vec(),
        }
    }

    /// The domain the grid was built over.
    pub fn domain(&self) -> &Box3 {
        &self.layout.domain
    }

    /// Index of the site nearest to the query point, or None for a point
    /// outside the domain or an empty grid.
    ///
    /// On a Voronoi tessellation the nearest site identifies the cell
    /// containing the point, by definition of the tessellation.
    pub fn nearest(&self, p: &Point3<f64>) -> Option<usize> {
        if self.positions.is_empty() || !self.layout.domain.contains(p) {
            return None;
        }

        let center = self.layout.bin_of(p);
        let max_shell = self.layout.dims.iter().max().copied().unwrap_or(1);
        let h = self.layout.min_bin_size();

        let mut best: Option<(usize, f64)> = None;
        for shell in 0..=max_shell {
            // A site in a bin at Chebyshev shell distance s is at least
            // (s - 1) * h away, so once the best candidate beats that
            // bound no farther shell can improve on it.
            if let Some((_, best_dist)) = best {
                if (shell as f64 - 1.0) * h > best_dist {
                    break;
                }
            }
            for flat in self.shell_bins(center, shell) {
                for &site in self.arena.bin(flat) {
                    let dist = (self.positions[site] - p).norm();
                    if best.map_or(true, |(_, d)| dist < d) {
                        best = Some((site, dist));
                    }
                }
            }
        }
        best.map(|(site, _)| site)
    }

    /// Indices of all sites within the given radius of the query point.
    pub fn within_radius(&self, p: &Point3<f64>, radius: f64) -> Vec<usize> {
        let mut result = Vec::new();
        if self.positions.is_empty() {
            return result;
        }

        let lo = self.layout.bin_of(&Point3::new(p.x - radius, p.y - radius, p.z - radius));
        let hi = self.layout.bin_of(&Point3::new(p.x + radius, p.y + radius, p.z + radius));
        for ix in lo[0]..=hi[0] {
            for iy in lo[1]..=hi[1] {
                for iz in lo[2]..=hi[2] {
                    for &site in self.arena.bin(self.layout.flat([ix, iy, iz])) {
                        if (self.positions[site] - p).norm() <= radius {
                            result.push(site);
                        }
                    }
                }
            }
        }
        result
    }

    /// Bins forming the Chebyshev shell at the given distance around the
    /// center bin, clipped to the grid.
    fn shell_bins(&self, center: [usize; 3], shell: usize) -> Vec<usize> {
        let mut bins = Vec::new();
        let s = shell as isize;
        let c = [center[0] as isize, center[1] as isize, center[2] as isize];
        let dims = [
            self.layout.dims[0] as isize,
            self.layout.dims[1] as isize,
            self.layout.dims[2] as isize,
        ];

        for dx in -s..=s {
            for dy in -s..=s {
                for dz in -s..=s {
                    if dx.abs().max(dy.abs()).max(dz.abs()) != s {
                        continue;
                    }
                    let bin = [c[0] + dx, c[1] + dy, c[2] + dz];
                    if bin.iter().zip(dims.iter()).all(|(b, d)| *b >= 0 && b < d) {
                        bins.push(
                            self.layout
                                .flat([bin[0] as usize, bin[1] as usize, bin[2] as usize]),
                        );
                    }
                }
            }
        }
        bins
    }
}

/// A uniform bin grid over axis-aligned boxes supporting containment
/// candidate queries for the cell snapshot kind.
#[derive(Debug, Clone)]
pub struct BoxGrid {
    layout: BinLayout,
    arena: BinArena,
}

impl BoxGrid {
    /// Bin the given boxes over the domain; a box lands in every bin it
    /// overlaps.
    pub fn new(domain: Box3, boxes: &[Box3]) -> Self {
        let layout = BinLayout::new(domain, boxes.len().max(1));

        let mut pairs = Vec::new();
        for (index, b) in boxes.iter().enumerate() {
            let lo = layout.bin_of(&b.min);
            let hi = layout.bin_of(&b.max);
            for ix in lo[0]..=hi[0] {
                for iy in lo[1]..=hi[1] {
                    for iz in lo[2]..=hi[2] {
                        pairs.push((layout.flat([ix, iy, iz]), index));
                    }
                }
            }
        }

        let arena = BinArena::build(layout.num_bins(), pairs.iter().copied());
        Self { layout, arena }
    }

    /// Indices of the boxes that may contain the query point; the caller
    /// still performs the exact containment test.
    pub fn candidates(&self, p: &Point3<f64>) -> &[usize] {
        if !self.layout.domain.contains(p) {
            return &[];
        }
        self.arena.bin(self.layout.flat(self.layout.bin_of(p)))
    }
}
