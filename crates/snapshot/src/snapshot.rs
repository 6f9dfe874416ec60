//! Imported discretizations of a medium: particles, cells, or a Voronoi
//! mesh, read from column text.
//!
//! The import follows a two-phase protocol. A snapshot is first opened
//! with its mandatory coordinate and mass/density columns, then optional
//! columns are enabled one by one (metallicity, temperature, velocity,
//! magnetic field, SED family parameters) and the mass-density policy is
//! configured. `read_and_close` finally parses the rows, applies the
//! policy, estimates cell volumes where the tessellation requires it, and
//! builds the spatial index and the cumulative mass table. After that the
//! snapshot is immutable and all queries are thread-safe.

use log::info;
use nalgebra::{Point3, Vector3};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaChaRng;
use spectra::SnapshotParameter;

use crate::columns::{ColumnSpec, Quantity, TextColumnFile};
use crate::error::{ImportError, ImportResult};
use crate::geometry::Box3;
use crate::site_grid::{BoxGrid, SiteGrid};

/// Seed for the lattice Monte Carlo volume estimate, fixed so setup is
/// reproducible run to run.
const VOLUME_ESTIMATE_SEED: u64 = 0x566f_726f_6e6f_6921;

/// Lattice points per cell used for the volume estimate.
const VOLUME_SAMPLES_PER_CELL: usize = 128;

/// Attempts before interior rejection sampling of a Voronoi cell gives up.
const MAX_POSITION_ATTEMPTS: usize = 256;

/// Quadrature steps for the column densities along the principal axes.
const COLUMN_DENSITY_STEPS: usize = 1024;

/// What the mass/density column of a snapshot stores.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    /// Integrated mass per entity (kg after conversion)
    Mass,
    /// Mass density per entity (kg/m³ after conversion)
    MassDensity,
    /// Particle count per entity
    Number,
    /// Particle number density per entity (1/m³)
    NumberDensity,
}

impl ValueKind {
    fn quantity(self) -> Quantity {
        match self {
            ValueKind::Mass => Quantity::Mass,
            ValueKind::MassDensity => Quantity::MassVolumeDensity,
            ValueKind::Number => Quantity::Number,
            ValueKind::NumberDensity => Quantity::NumberVolumeDensity,
        }
    }

    fn is_density(self) -> bool {
        matches!(self, ValueKind::MassDensity | ValueKind::NumberDensity)
    }

    fn holds_number(self) -> bool {
        matches!(self, ValueKind::Number | ValueKind::NumberDensity)
    }
}

/// How raw mass/density values become effective values.
///
/// The mass fraction always multiplies. Metallicity multiplies when
/// enabled and imported. A positive temperature cutoff zeroes entities
/// hotter than the maximum; a cutoff of zero disables the check.
#[derive(Debug, Clone, Copy)]
pub struct MassDensityPolicy {
    pub mass_fraction: f64,
    pub max_temperature: f64,
    pub use_metallicity: bool,
}

impl Default for MassDensityPolicy {
    fn default() -> Self {
        Self {
            mass_fraction: 1.0,
            max_temperature: 0.0,
            use_metallicity: true,
        }
    }
}

/// The tessellation kind of a snapshot. Closed: the propagation engine
/// only ever meets these three discretizations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotKind {
    /// Smoothed particles: x y z h columns
    Particle,
    /// Axis-aligned cuboid cells: xmin ymin zmin xmax ymax zmax columns
    Cell,
    /// Voronoi mesh sites in a configured cuboidal domain: x y z columns
    Voronoi,
}

/// One imported entity after unit conversion.
#[derive(Debug, Clone)]
struct Entity {
    position: Point3<f64>,
    raw_value: f64,
    metallicity: Option<f64>,
    temperature: Option<f64>,
    velocity: Option<Vector3<f64>>,
    magnetic_field: Option<Vector3<f64>>,
    parameters: Vec<f64>,
}

/// Spatial index built at read time, one variant per snapshot kind.
#[derive(Debug, Clone)]
enum SpatialIndex {
    Particle {
        grid: SiteGrid,
        smoothing: Vec<f64>,
        max_smoothing: f64,
    },
    Cell {
        grid: BoxGrid,
        bounds: Vec<Box3>,
    },
    Voronoi {
        grid: SiteGrid,
        volumes: Vec<f64>,
        sample_bounds: Vec<Box3>,
    },
}

/// An immutable set of imported entities with position-indexed queries.
#[derive(Debug)]
pub struct Snapshot {
    file: Option<TextColumnFile>,
    kind: SnapshotKind,
    value_kind: ValueKind,
    configured_domain: Option<Box3>,

    import_metallicity: bool,
    import_temperature: bool,
    import_velocity: bool,
    import_magnetic_field: bool,
    parameter_info: Vec<SnapshotParameter>,
    policy: MassDensityPolicy,

    domain: Box3,
    entities: Vec<Entity>,
    effective: Vec<f64>,
    cumulative: Vec<f64>,
    total: f64,
    index: Option<SpatialIndex>,
}

impl Snapshot {
    /// Open a Voronoi mesh snapshot over the given cuboidal domain.
    pub fn open_voronoi(
        file: TextColumnFile,
        domain: Box3,
        value_kind: ValueKind,
    ) -> ImportResult<Self> {
        for (axis, extent) in domain.extent().iter().enumerate() {
            if !(*extent > 0.0) {
                return Err(ImportError::DegenerateDomain {
                    axis,
                    extent_m: *extent,
                });
            }
        }
        Ok(Self::new(file, SnapshotKind::Voronoi, value_kind, Some(domain)))
    }

    /// Open a smoothed-particle snapshot; the domain is derived from the
    /// particle positions and smoothing lengths at read time.
    pub fn open_particle(file: TextColumnFile, value_kind: ValueKind) -> Self {
        Self::new(file, SnapshotKind::Particle, value_kind, None)
    }

    /// Open a cell snapshot; the domain is derived from the cell bounds at
    /// read time.
    pub fn open_cell(file: TextColumnFile, value_kind: ValueKind) -> Self {
        Self::new(file, SnapshotKind::Cell, value_kind, None)
    }

    fn new(
        file: TextColumnFile,
        kind: SnapshotKind,
        value_kind: ValueKind,
        configured_domain: Option<Box3>,
    ) -> Self {
        Self {
            file: Some(file),
            kind,
            value_kind,
            configured_domain,
            import_metallicity: false,
            import_temperature: false,
            import_velocity: false,
            import_magnetic_field: false,
            parameter_info: Vec::new(),
            policy: MassDensityPolicy::default(),
            domain: Box3::cube(0.0),
            entities: Vec::new(),
            effective: Vec::new(),
            cumulative: Vec::new(),
            total: 0.0,
            index: None,
        }
    }

    /// Enable the metallicity column.
    pub fn import_metallicity(&mut self) {
        self.import_metallicity = true;
    }

    /// Enable the temperature column.
    pub fn import_temperature(&mut self) {
        self.import_temperature = true;
    }

    /// Enable the three velocity component columns.
    pub fn import_velocity(&mut self) {
        self.import_velocity = true;
    }

    /// Enable the three magnetic field component columns.
    pub fn import_magnetic_field(&mut self) {
        self.import_magnetic_field = true;
    }

    /// Enable trailing parameter columns for a material mix or SED family.
    pub fn import_parameters(&mut self, info: Vec<SnapshotParameter>) {
        self.parameter_info = info;
    }

    /// Configure how raw values become effective values.
    pub fn set_mass_density_policy(&mut self, policy: MassDensityPolicy) {
        self.policy = policy;
    }

    /// Parse the file, apply the policy, and build the spatial index and
    /// cumulative mass table. Must be called exactly once, serially,
    /// before any query.
    pub fn read_and_close(&mut self) -> ImportResult<()> {
        let file = self
            .file
            .take()
            .expect("read_and_close must be called exactly once");

        let specs = self.column_specs();
        let rows = file.read(&specs)?;
        let entities: Vec<Entity> = rows.iter().map(|row| self.entity_from_row(row)).collect();
        self.entities = entities;

        // Domain: configured for Voronoi, derived from the data otherwise
        self.domain = match self.kind {
            SnapshotKind::Voronoi => self.configured_domain.unwrap(),
            SnapshotKind::Particle => {
                let bounds = Box3::from_points(self.entities.iter().map(|e| &e.position));
                let max_h = rows.iter().map(|r| r[3]).fold(0.0, f64::max);
                bounds.grown(max_h, &Box3::cube(f64::INFINITY))
            }
            SnapshotKind::Cell => {
                let mins = rows.iter().map(|r| Point3::new(r[0], r[1], r[2]));
                let maxs = rows.iter().map(|r| Point3::new(r[3], r[4], r[5]));
                let all: Vec<Point3<f64>> = mins.chain(maxs).collect();
                Box3::from_points(all.iter())
            }
        };

        // Spatial index per kind; the Voronoi variant also estimates cell
        // volumes and sampling bounds from a seeded lattice
        let index = match self.kind {
            SnapshotKind::Particle => {
                let positions: Vec<Point3<f64>> =
                    self.entities.iter().map(|e| e.position).collect();
                let smoothing: Vec<f64> = rows.iter().map(|r| r[3]).collect();
                let max_smoothing = smoothing.iter().copied().fold(0.0, f64::max);
                SpatialIndex::Particle {
                    grid: SiteGrid::new(self.domain, &positions),
                    smoothing,
                    max_smoothing,
                }
            }
            SnapshotKind::Cell => {
                let bounds: Vec<Box3> = rows
                    .iter()
                    .map(|r| {
                        Box3::new(Point3::new(r[0], r[1], r[2]), Point3::new(r[3], r[4], r[5]))
                    })
                    .collect();
                SpatialIndex::Cell {
                    grid: BoxGrid::new(self.domain, &bounds),
                    bounds,
                }
            }
            SnapshotKind::Voronoi => {
                let positions: Vec<Point3<f64>> =
                    self.entities.iter().map(|e| e.position).collect();
                let grid = SiteGrid::new(self.domain, &positions);
                let (volumes, sample_bounds) =
                    estimate_voronoi_cells(&self.domain, &positions, &grid);
                SpatialIndex::Voronoi {
                    grid,
                    volumes,
                    sample_bounds,
                }
            }
        };
        self.index = Some(index);

        // Effective value per entity: policy multipliers on the integrated
        // value, converting densities through the entity volume
        let effective: Vec<f64> = (0..self.entities.len())
            .map(|i| {
                let entity = &self.entities[i];
                let mut value = entity.raw_value;
                if self.value_kind.is_density() {
                    value *= self.entity_volume(i);
                }
                value *= self.policy.mass_fraction;
                if self.policy.use_metallicity {
                    if let Some(z) = entity.metallicity {
                        value *= z;
                    }
                }
                if self.policy.max_temperature > 0.0 {
                    if let Some(t) = entity.temperature {
                        if t > self.policy.max_temperature {
                            value = 0.0;
                        }
                    }
                }
                value
            })
            .collect();
        self.effective = effective;

        self.cumulative = Vec::with_capacity(self.effective.len() + 1);
        self.cumulative.push(0.0);
        let mut running = 0.0;
        for v in &self.effective {
            running += v;
            self.cumulative.push(running);
        }
        self.total = running;

        info!(
            "Imported {} entities from '{}' (total {:.6e} {})",
            self.entities.len(),
            file.name(),
            self.total,
            if self.holds_number() { "particles" } else { "kg" }
        );
        Ok(())
    }

    // ------------------------------------------------------------------
    // Queries (valid after read_and_close)
    // ------------------------------------------------------------------

    /// True when raw values are particle counts or number densities
    /// rather than masses.
    pub fn holds_number(&self) -> bool {
        self.value_kind.holds_number()
    }

    /// Number of imported entities.
    pub fn num_entities(&self) -> usize {
        self.entities.len()
    }

    /// Site position (particle position, cell centroid, Voronoi site) of
    /// the entity with the given index, in meters.
    pub fn position(&self, index: usize) -> Point3<f64> {
        self.entities[index].position
    }

    /// The spatial domain of the snapshot.
    pub fn domain(&self) -> &Box3 {
        &self.domain
    }

    /// Total effective mass (kg) or particle count of the snapshot.
    pub fn mass(&self) -> f64 {
        self.total
    }

    /// Effective mass (kg) or particle count of one entity.
    pub fn entity_mass(&self, index: usize) -> f64 {
        self.effective[index]
    }

    /// Mass density (kg/m³) or number density (1/m³) at a position; zero
    /// outside the domain and outside every entity.
    pub fn density(&self, position: &Point3<f64>) -> f64 {
        match self.index.as_ref().expect("snapshot not read yet") {
            SpatialIndex::Particle {
                grid,
                smoothing,
                max_smoothing,
            } => {
                let mut rho = 0.0;
                for i in grid.within_radius(position, *max_smoothing) {
                    let h = smoothing[i];
                    let d = (self.entities[i].position - position).norm();
                    if d < h && h > 0.0 {
                        rho += self.effective[i] / sphere_volume(h);
                    }
                }
                rho
            }
            SpatialIndex::Cell { grid, bounds } => grid
                .candidates(position)
                .iter()
                .copied()
                .filter(|&i| bounds[i].contains(position))
                .map(|i| self.effective[i] / bounds[i].volume())
                .sum(),
            SpatialIndex::Voronoi { grid, volumes, .. } => match grid.nearest(position) {
                Some(i) if volumes[i] > 0.0 => self.effective[i] / volumes[i],
                _ => 0.0,
            },
        }
    }

    /// Index of the entity containing the position, or None outside the
    /// domain (and, for particles, outside every smoothing sphere).
    pub fn entity_at(&self, position: &Point3<f64>) -> Option<usize> {
        match self.index.as_ref().expect("snapshot not read yet") {
            SpatialIndex::Particle {
                grid,
                smoothing,
                max_smoothing,
            } => grid
                .within_radius(position, *max_smoothing)
                .into_iter()
                .filter(|&i| (self.entities[i].position - position).norm() < smoothing[i])
                .min_by(|&a, &b| {
                    let da = (self.entities[a].position - position).norm();
                    let db = (self.entities[b].position - position).norm();
                    da.partial_cmp(&db).unwrap()
                }),
            SpatialIndex::Cell { grid, bounds } => grid
                .candidates(position)
                .iter()
                .copied()
                .find(|&i| bounds[i].contains(position)),
            SpatialIndex::Voronoi { grid, .. } => grid.nearest(position),
        }
    }

    /// Bulk velocity (m/s) at a position; zero when not imported or
    /// outside the domain.
    pub fn velocity(&self, position: &Point3<f64>) -> Vector3<f64> {
        self.entity_at(position)
            .and_then(|i| self.entities[i].velocity)
            .unwrap_or_else(Vector3::zeros)
    }

    /// Bulk velocity (m/s) of one entity.
    pub fn velocity_of(&self, index: usize) -> Vector3<f64> {
        self.entities[index].velocity.unwrap_or_else(Vector3::zeros)
    }

    /// Magnetic field (T) at a position; zero when not imported.
    pub fn magnetic_field(&self, position: &Point3<f64>) -> Vector3<f64> {
        self.entity_at(position)
            .and_then(|i| self.entities[i].magnetic_field)
            .unwrap_or_else(Vector3::zeros)
    }

    /// Temperature (K) at a position; zero when not imported.
    pub fn temperature(&self, position: &Point3<f64>) -> f64 {
        self.entity_at(position)
            .and_then(|i| self.entities[i].temperature)
            .unwrap_or(0.0)
    }

    /// Metallicity at a position; zero when not imported.
    pub fn metallicity(&self, position: &Point3<f64>) -> f64 {
        self.entity_at(position)
            .and_then(|i| self.entities[i].metallicity)
            .unwrap_or(0.0)
    }

    /// Parameter vector at a position; zeros of the declared arity when
    /// outside the domain.
    pub fn parameters(&self, position: &Point3<f64>) -> Vec<f64> {
        self.entity_at(position)
            .map(|i| self.entities[i].parameters.clone())
            .unwrap_or_else(|| vec![0.0; self.parameter_info.len()])
    }

    /// Parameter vector of one entity.
    pub fn parameters_of(&self, index: usize) -> &[f64] {
        &self.entities[index].parameters
    }

    /// Draw a position distributed proportionally to effective mass.
    ///
    /// Selects an entity through the cumulative mass table in O(log n),
    /// then samples a point in its interior. Returns None when the
    /// snapshot carries no mass, or when Voronoi rejection sampling
    /// exhausts its attempt budget.
    pub fn generate_position(&self, rng: &mut ChaChaRng) -> Option<Point3<f64>> {
        if !(self.total > 0.0) {
            return None;
        }
        let u: f64 = rng.random();
        let target = u * self.total;
        let entity = self
            .cumulative
            .partition_point(|&c| c <= target)
            .min(self.entities.len())
            .saturating_sub(1)
            .min(self.entities.len() - 1);
        self.generate_position_in(entity, rng)
    }

    /// Draw a position inside the given entity.
    pub fn generate_position_in(
        &self,
        index: usize,
        rng: &mut ChaChaRng,
    ) -> Option<Point3<f64>> {
        match self.index.as_ref().expect("snapshot not read yet") {
            SpatialIndex::Particle { smoothing, .. } => {
                let center = self.entities[index].position;
                let h = smoothing[index];
                // Uniform in the smoothing sphere: r ∝ u^(1/3), isotropic direction
                let r = h * rng.random::<f64>().cbrt();
                let cos_theta: f64 = 2.0 * rng.random::<f64>() - 1.0;
                let sin_theta = (1.0 - cos_theta * cos_theta).sqrt();
                let phi = 2.0 * std::f64::consts::PI * rng.random::<f64>();
                Some(Point3::new(
                    center.x + r * sin_theta * phi.cos(),
                    center.y + r * sin_theta * phi.sin(),
                    center.z + r * cos_theta,
                ))
            }
            SpatialIndex::Cell { bounds, .. } => Some(uniform_in_box(&bounds[index], rng)),
            SpatialIndex::Voronoi {
                grid,
                sample_bounds,
                ..
            } => {
                let bounds = &sample_bounds[index];
                for _ in 0..MAX_POSITION_ATTEMPTS {
                    let p = uniform_in_box(bounds, rng);
                    if grid.nearest(&p) == Some(index) {
                        return Some(p);
                    }
                }
                None
            }
        }
    }

    /// Column density along the x axis through the domain center
    /// (kg/m², or 1/m² for number-holding snapshots).
    pub fn sigma_x(&self) -> f64 {
        self.column_density(0)
    }

    /// Column density along the y axis through the domain center.
    pub fn sigma_y(&self) -> f64 {
        self.column_density(1)
    }

    /// Column density along the z axis through the domain center.
    pub fn sigma_z(&self) -> f64 {
        self.column_density(2)
    }

    /// Fixed-step quadrature of the density along one principal axis.
    fn column_density(&self, axis: usize) -> f64 {
        let center = self.domain.center();
        let extent = self.domain.extent()[axis];
        let origin = [self.domain.min.x, self.domain.min.y, self.domain.min.z][axis];
        let step = extent / COLUMN_DENSITY_STEPS as f64;

        let mut sigma = 0.0;
        for i in 0..COLUMN_DENSITY_STEPS {
            let coordinate = origin + (i as f64 + 0.5) * step;
            let mut p = center;
            p[axis] = coordinate;
            sigma += self.density(&p) * step;
        }
        sigma
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    fn num_coordinate_columns(&self) -> usize {
        match self.kind {
            SnapshotKind::Particle => 4, // x y z h
            SnapshotKind::Cell => 6,     // two corners
            SnapshotKind::Voronoi => 3,  // site
        }
    }

    fn column_specs(&self) -> Vec<ColumnSpec> {
        let mut specs = Vec::new();
        match self.kind {
            SnapshotKind::Particle => {
                for name in ["x", "y", "z", "smoothing length"] {
                    specs.push(ColumnSpec::new(name, Quantity::Length));
                }
            }
            SnapshotKind::Cell => {
                for name in ["xmin", "ymin", "zmin", "xmax", "ymax", "zmax"] {
                    specs.push(ColumnSpec::new(name, Quantity::Length));
                }
            }
            SnapshotKind::Voronoi => {
                for name in ["x", "y", "z"] {
                    specs.push(ColumnSpec::new(name, Quantity::Length));
                }
            }
        }
        let value_name = match self.value_kind {
            ValueKind::Mass => "mass",
            ValueKind::MassDensity => "mass density",
            ValueKind::Number => "number",
            ValueKind::NumberDensity => "number density",
        };
        specs.push(ColumnSpec::new(value_name, self.value_kind.quantity()));

        if self.import_metallicity {
            specs.push(ColumnSpec::new("metallicity", Quantity::Dimensionless));
        }
        if self.import_temperature {
            specs.push(ColumnSpec::new("temperature", Quantity::Temperature));
        }
        if self.import_velocity {
            for name in ["vx", "vy", "vz"] {
                specs.push(ColumnSpec::new(name, Quantity::Velocity));
            }
        }
        if self.import_magnetic_field {
            for name in ["Bx", "By", "Bz"] {
                specs.push(ColumnSpec::new(name, Quantity::MagneticField));
            }
        }
        for parameter in &self.parameter_info {
            let quantity = match parameter.unit {
                Some("W") | Some("Lsun") => Quantity::Luminosity,
                _ => Quantity::Dimensionless,
            };
            specs.push(ColumnSpec::new(parameter.name, quantity));
        }
        specs
    }

    fn entity_from_row(&self, row: &[f64]) -> Entity {
        let coords = self.num_coordinate_columns();
        let position = match self.kind {
            SnapshotKind::Cell => Point3::new(
                (row[0] + row[3]) / 2.0,
                (row[1] + row[4]) / 2.0,
                (row[2] + row[5]) / 2.0,
            ),
            _ => Point3::new(row[0], row[1], row[2]),
        };

        let mut cursor = coords;
        let raw_value = row[cursor];
        cursor += 1;

        let metallicity = self.import_metallicity.then(|| {
            let z = row[cursor];
            cursor += 1;
            z
        });
        let temperature = self.import_temperature.then(|| {
            let t = row[cursor];
            cursor += 1;
            t
        });
        let velocity = self.import_velocity.then(|| {
            let v = Vector3::new(row[cursor], row[cursor + 1], row[cursor + 2]);
            cursor += 3;
            v
        });
        let magnetic_field = self.import_magnetic_field.then(|| {
            let b = Vector3::new(row[cursor], row[cursor + 1], row[cursor + 2]);
            cursor += 3;
            b
        });
        let parameters = row[cursor..cursor + self.parameter_info.len()].to_vec();

        Entity {
            position,
            raw_value,
            metallicity,
            temperature,
            velocity,
            magnetic_field,
            parameters,
        }
    }

    /// Interior volume of one entity in m³. For the Voronoi kind this is
    /// the lattice estimate computed at read time.
    pub fn entity_volume(&self, index: usize) -> f64 {
        match self.index.as_ref().expect("snapshot not read yet") {
            SpatialIndex::Particle { smoothing, .. } => sphere_volume(smoothing[index]),
            SpatialIndex::Cell { bounds, .. } => bounds[index].volume(),
            SpatialIndex::Voronoi { volumes, .. } => volumes[index],
        }
    }
}

/// Volume of a sphere with the given radius.
fn sphere_volume(radius: f64) -> f64 {
    4.0 / 3.0 * std::f64::consts::PI * radius.powi(3)
}

/// Uniform sample inside an axis-aligned box.
fn uniform_in_box(b: &Box3, rng: &mut ChaChaRng) -> Point3<f64> {
    let [dx, dy, dz] = b.extent();
    Point3::new(
        b.min.x + dx * rng.random::<f64>(),
        b.min.y + dy * rng.random::<f64>(),
        b.min.z + dz * rng.random::<f64>(),
    )
}

/// Estimate Voronoi cell volumes and sampling bounds by assigning a seeded
/// random lattice of points to their nearest sites.
///
/// The volume of a cell is its share of lattice points times the domain
/// volume; the sampling bounds are the bounding box of its points, grown
/// by one lattice spacing so the cell boundary is covered. Cells that
/// capture no lattice point get zero volume and a minimal box around
/// their site.
fn estimate_voronoi_cells(
    domain: &Box3,
    positions: &[Point3<f64>],
    grid: &SiteGrid,
) -> (Vec<f64>, Vec<Box3>) {
    let n = positions.len();
    let total_samples = n * VOLUME_SAMPLES_PER_CELL;
    let mut rng = ChaChaRng::seed_from_u64(VOLUME_ESTIMATE_SEED);

    let mut counts = vec![0usize; n];
    let mut seen: Vec<Option<Box3>> = vec![None; n];

    for _ in 0..total_samples {
        let p = uniform_in_box(domain, &mut rng);
        if let Some(site) = grid.nearest(&p) {
            counts[site] += 1;
            let point_box = Box3::new(p, p);
            seen[site] = Some(match seen[site] {
                Some(existing) => Box3::from_points(
                    [existing.min, existing.max, p].iter(),
                ),
                None => point_box,
            });
        }
    }

    let spacing = (domain.volume() / total_samples as f64).cbrt();
    let volumes: Vec<f64> = counts
        .iter()
        .map(|&c| c as f64 / total_samples as f64 * domain.volume())
        .collect();
    let sample_bounds: Vec<Box3> = seen
        .iter()
        .enumerate()
        .map(|(i, b)| match b {
            Some(existing) => existing.grown(spacing, domain),
            None => Box3::new(positions[i], positions[i]).grown(spacing, domain),
        })
        .collect();

    (volumes, sample_bounds)
}
