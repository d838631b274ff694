//! Fresnel Dielectrics

use super::*;
use std::mem::swap;

/// Returns the fresnel reflection for dielectric materials and unpolarized
/// light. The cosine is measured on the `eta_i` side of the interface; a
/// negative value means the incident direction lies on the `eta_t` side and
/// the indices are exchanged.
///
/// The exchange happens here, not in the caller. Callers always pass the pair
/// as seen from the side the normal points to, together with the signed
/// cosine, and never pre-swap it.
///
/// * `cos_theta_i` - cos(θi) for angle between incident direction and the
///                   interface normal.
/// * `eta_i`       - index of refraction for medium that incident ray is in.
/// * `eta_t`       - index of refraction for medium that incident ray is entering.
pub fn fr_dielectric(cos_theta_i: Float, eta_i: Float, eta_t: Float) -> Float {
    let mut cos_theta_i = clamp(cos_theta_i, -1.0, 1.0);
    let mut eta_i = eta_i;
    let mut eta_t = eta_t;

    // Potentially swap indices of refraction.
    let entering = cos_theta_i > 0.0;
    if !entering {
        swap(&mut eta_i, &mut eta_t);
        cos_theta_i = abs(cos_theta_i);
    }

    // Compute cos_theta_t using Snell's law.
    let sin_theta_i = max(0.0, 1.0 - cos_theta_i * cos_theta_i).sqrt();
    let sin_theta_t = eta_i / eta_t * sin_theta_i;

    // Handle total internal reflection.
    if sin_theta_t >= 1.0 {
        1.0
    } else {
        let cos_theta_t = max(0.0, 1.0 - sin_theta_t * sin_theta_t).sqrt();
        let r_parl = ((eta_t * cos_theta_i) - (eta_i * cos_theta_t))
            / ((eta_t * cos_theta_i) + (eta_i * cos_theta_t));
        let r_perp = ((eta_i * cos_theta_i) - (eta_t * cos_theta_t))
            / ((eta_i * cos_theta_i) + (eta_t * cos_theta_t));
        (r_parl * r_parl + r_perp * r_perp) / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::*;
    use proptest::prelude::*;

    #[test]
    fn normal_incidence() {
        let expected = ((1.5 - 1.0) / (1.5 + 1.0)) * ((1.5 - 1.0) / (1.5 + 1.0));
        assert!(approx_eq!(f32, fr_dielectric(1.0, 1.0, 1.5), expected, epsilon = 1e-6));
        assert!(approx_eq!(f32, fr_dielectric(-1.0, 1.0, 1.5), expected, epsilon = 1e-6));
    }

    #[test]
    fn grazing_incidence_reflects_everything() {
        assert!(approx_eq!(f32, fr_dielectric(0.0, 1.0, 1.5), 1.0, epsilon = 1e-6));
    }

    #[test]
    fn total_internal_reflection() {
        // Critical angle leaving glass is about 41.8 degrees.
        let cos_75 = radians(75.0).cos();
        assert_eq!(fr_dielectric(cos_75, 1.5, 1.0), 1.0);
        assert_eq!(fr_dielectric(-cos_75, 1.0, 1.5), 1.0);

        let cos_30 = radians(30.0).cos();
        assert!(fr_dielectric(cos_30, 1.5, 1.0) < 1.0);
    }

    #[test]
    fn matched_indices_transmit_everything() {
        assert!(approx_eq!(f32, fr_dielectric(0.3, 1.33, 1.33), 0.0, epsilon = 1e-6));
    }

    proptest! {
        #[test]
        fn reflectance_is_bounded(
            cos in -1.0..1.0f32,
            eta_i in 1.0..2.0f32,
            eta_t in 1.0..2.0f32,
        ) {
            let f = fr_dielectric(cos, eta_i, eta_t);
            prop_assert!(f >= 0.0 && f <= 1.0);
        }

        #[test]
        fn swapping_sign_equals_swapping_indices(cos in 0.001..1.0f32, eta_t in 1.0..2.0f32) {
            prop_assert_eq!(fr_dielectric(-cos, 1.0, eta_t), fr_dielectric(cos, eta_t, 1.0));
        }
    }
}
