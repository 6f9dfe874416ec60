//! Imported medium discretizations: column-text import, spatial indexing
//! and mass-proportional position sampling.

pub mod columns;
pub mod error;
pub mod geometry;
pub mod site_grid;
pub mod snapshot;

#[cfg(test)]
mod snapshot_test;

pub use columns::{ColumnSpec, Quantity, TextColumnFile};
pub use error::{ImportError, ImportResult};
pub use geometry::Box3;
pub use site_grid::{BoxGrid, SiteGrid};
pub use snapshot::{MassDensityPolicy, Snapshot, SnapshotKind, ValueKind};
