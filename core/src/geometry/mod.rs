//! Geometry

// Define macros for property based testing.
#[cfg(test)]
#[macro_export]
macro_rules! prop_range {
    ($name: ident, $t: ty, $r: expr) => {
        prop_compose! {
            fn $name()(f in $r) -> $t {
                f
            }
        }
    };
}

#[cfg(test)]
#[macro_export]
macro_rules! prop_vector3 {
    ($name: ident, $t: ty, $xr: expr, $yr: expr, $zr: expr) => {
        prop_compose! {
            fn $name()(x in $xr, y in $yr, z in $zr) -> Vector3<$t> {
                Vector3 { x, y, z }
            }
        }
    };
}

#[cfg(test)]
#[macro_export]
macro_rules! prop_point2 {
    ($name: ident, $t: ty, $xr: expr, $yr: expr) => {
        prop_compose! {
            fn $name()(x in $xr, y in $yr) -> Point2<$t> {
                Point2 { x, y }
            }
        }
    };
}

/// Generates unit directions from spherical coordinates. `$ct` is the range
/// for cos(θ) and `$phi` the range for φ.
#[cfg(test)]
#[macro_export]
macro_rules! prop_direction {
    ($name: ident, $ct: expr, $phi: expr) => {
        prop_compose! {
            fn $name()(cos_theta in $ct, phi in $phi) -> Vector3f {
                let sin_theta = (1.0 - cos_theta * cos_theta).max(0.0).sqrt();
                Vector3f::new(sin_theta * phi.cos(), sin_theta * phi.sin(), cos_theta)
            }
        }
    };
}

mod common;
mod coordinate_system;
mod normal;
mod point2;
mod vector2;
mod vector3;

// Re-export
pub use common::*;
pub use coordinate_system::*;
pub use normal::*;
pub use point2::*;
pub use vector2::*;
pub use vector3::*;
