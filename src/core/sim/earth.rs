use nalgebra::Vector3;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------
pub const GRAVITATIONAL_CONSTANT: f64 = 6.674_30e-11; // m³ kg⁻¹ s⁻²
pub const EARTH_MASS: f64 = 5.9722e24; // kg
pub const EARTH_POLAR_RADIUS: f64 = 6356.7523e3; // m
pub const EARTH_EQUATORIAL_RADIUS: f64 = 6378.1370e3; // m

/// First eccentricity squared of the reference ellipsoid.
pub const ECC_SQR: f64 = 1.0
    - (EARTH_POLAR_RADIUS / EARTH_EQUATORIAL_RADIUS)
        * (EARTH_POLAR_RADIUS / EARTH_EQUATORIAL_RADIUS);

/// Second eccentricity squared.
pub const SEC_ECC_SQR: f64 = ECC_SQR / (1.0 - ECC_SQR);

pub fn origin_distance(position: &Vector3<f64>) -> f64 {
    position.norm()
}

/// Distance from the Earth's centre of a point `height` metres above the
/// ellipsoid at geocentric latitude `lat` (radians).
pub fn geocentric_radius(lat: f64, height: f64) -> f64 {
    let a = EARTH_EQUATORIAL_RADIUS;
    let b = EARTH_POLAR_RADIUS;
    let (sin, cos) = lat.sin_cos();

    let num = (a * a * cos).powi(2) + (b * b * sin).powi(2);
    let den = (a * cos).powi(2) + (b * sin).powi(2);
    (num / den).sqrt() + height
}

/// Latitude and longitude in degrees, height in metres.
pub fn geodetic_to_xyz(lat_deg: f64, lon_deg: f64, height: f64) -> Vector3<f64> {
    let lat = lat_deg.to_radians();
    let lon = lon_deg.to_radians();
    let r = geocentric_radius(lat, height);

    Vector3::new(
        r * lat.cos() * lon.cos(),
        r * lat.cos() * lon.sin(),
        r * lat.sin(),
    )
}

/// Height above the ellipsoid, using Bowring's closed form for the latitude.
pub fn geodetic_height(position: &Vector3<f64>) -> f64 {
    let a = EARTH_EQUATORIAL_RADIUS;
    let b = EARTH_POLAR_RADIUS;
    let p = position.x.hypot(position.y);
    let z = position.z;

    let theta = (z * a).atan2(p * b);
    let (st, ct) = theta.sin_cos();
    let lat = (z + SEC_ECC_SQR * b * st.powi(3)).atan2(p - ECC_SQR * a * ct.powi(3));

    let (sin, cos) = lat.sin_cos();
    // stable at both the equator and the poles
    p * cos + z * sin - a * (1.0 - ECC_SQR * sin * sin).sqrt()
}
