//! Physics behind recorded trajectories: Earth geometry, the forces on a
//! launch vehicle, and launch mass estimates. All quantities are SI and
//! positions are geocentric Cartesian (origin at the Earth's centre).

pub mod earth;
pub mod forces;
pub mod launch;

pub use earth::{geocentric_radius, geodetic_height, geodetic_to_xyz, origin_distance};
pub use forces::{atm_density, drag_abs, gravity, thrust_abs};
pub use launch::{launch_mass, orbital_velocity, VehicleSpec};
