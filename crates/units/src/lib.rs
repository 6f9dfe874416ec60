pub mod length;
pub mod luminosity;
pub mod mass;
pub mod surface_density;
pub mod temperature;
pub mod velocity;
pub mod volume_density;

#[cfg(test)]
mod mass_test;
#[cfg(test)]
mod volume_density_test;

pub use length::Length;
pub use luminosity::{Luminosity, SOLAR_LUMINOSITY_W};
pub use mass::{Mass, HYDROGEN_MASS_KG, SOLAR_MASS_KG};
pub use surface_density::SurfaceDensity;
pub use temperature::Temperature;
pub use velocity::{Velocity, SPEED_OF_LIGHT};
pub use volume_density::VolumeDensity;
