use nalgebra::Vector3;

use super::earth::{geodetic_height, EARTH_MASS, GRAVITATIONAL_CONSTANT};

pub const AIR_DENSITY_SEA_LEVEL: f64 = 1.225; // kg/m³
pub const SCALE_HEIGHT: f64 = 8500.0; // m

/// Newtonian gravity on a body of `mass` kg, pointing at the Earth's centre.
pub fn gravity(position: &Vector3<f64>, mass: f64) -> Vector3<f64> {
    let r = position.norm();
    -position * (GRAVITATIONAL_CONSTANT * EARTH_MASS * mass / r.powi(3))
}

/// Exponential atmosphere, kg/m³.
pub fn atm_density(position: &Vector3<f64>) -> f64 {
    AIR_DENSITY_SEA_LEVEL * (-geodetic_height(position) / SCALE_HEIGHT).exp()
}

/// Magnitude of aerodynamic drag, N.
pub fn drag_abs(velocity: &Vector3<f64>, drag_coeff: f64, position: &Vector3<f64>, area: f64) -> f64 {
    0.5 * drag_coeff * velocity.norm_squared() * atm_density(position) * area
}

/// Magnitude of thrust from expelling `dm` kg of propellant over `dt` s.
pub fn thrust_abs(exhaust_velocity: f64, dm: f64, dt: f64) -> f64 {
    exhaust_velocity * dm / dt
}
