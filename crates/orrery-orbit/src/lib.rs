//! Circular, coplanar orbital positions measured from a fixed calendar epoch.

mod epoch;
mod error;
mod orbital;

pub use epoch::{Epoch, SECONDS_PER_DAY, parse_date};
pub use error::OrbitError;
pub use orbital::{
    ORBIT_PATH_INNER, ORBIT_PATH_OUTER, OrbitCalculator, OrbitalParams, PlanarPosition,
    orbit_path_radii, orbital_angle, planar_position,
};
