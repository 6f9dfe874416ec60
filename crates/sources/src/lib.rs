//! Primary sources and the photon-packet launch subsystem.

pub mod allocation;
pub mod geometric;
pub mod imported;
pub mod packet;
pub mod random;
pub mod source;
pub mod system;

#[cfg(test)]
mod allocation_test;
#[cfg(test)]
mod geometric_test;

pub use geometric::{GeometricSource, SourceGeometry};
pub use imported::ImportedSource;
pub use packet::{PhotonPacket, StokesVector};
pub use random::{isotropic_direction, packet_rng};
pub use source::Source;
pub use system::{ConfigError, SourceSystem, SourceSystemConfig};
