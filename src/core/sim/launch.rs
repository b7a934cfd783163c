use super::earth::{EARTH_MASS, EARTH_POLAR_RADIUS, GRAVITATIONAL_CONSTANT};

/// Mass and engine figures of a launch vehicle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VehicleSpec {
    pub name: &'static str,
    pub total_mass: f64,       // kg
    pub dry_mass: f64,         // kg
    pub diameter: f64,         // m
    pub exhaust_velocity: f64, // m/s
}

impl VehicleSpec {
    pub const FALCON_9_FT: VehicleSpec = VehicleSpec {
        name: "Falcon 9 FT",
        total_mass: 544.6e3,
        dry_mass: 27.9e3,
        diameter: 5.2633,
        exhaust_velocity: 2.77e3,
    };

    /// Diameter gives the combined area of the core and both boosters.
    pub const FALCON_HEAVY: VehicleSpec = VehicleSpec {
        name: "Falcon Heavy",
        total_mass: 1385.5e3,
        dry_mass: 55.5e3,
        diameter: 6.339,
        exhaust_velocity: 2.77e3,
    };

    pub fn cross_section(&self) -> f64 {
        std::f64::consts::PI * (self.diameter / 2.0).powi(2)
    }

    pub fn propellant_mass(&self) -> f64 {
        self.total_mass - self.dry_mass
    }
}

/// Circular orbital velocity `height` metres above the pole, m/s.
pub fn orbital_velocity(height: f64) -> f64 {
    (GRAVITATIONAL_CONSTANT * EARTH_MASS / (EARTH_POLAR_RADIUS + height)).sqrt()
}

/// Lift-off mass needed to put `payload_mass` into orbit at `height` via
/// the rocket equation; `k` is the structure-to-payload mass ratio.
pub fn launch_mass(payload_mass: f64, exhaust_velocity: f64, height: f64, k: f64) -> f64 {
    (orbital_velocity(height) / exhaust_velocity).exp() * payload_mass * (k + 1.0)
}
