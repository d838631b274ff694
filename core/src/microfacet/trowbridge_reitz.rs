//! Trowbridge-Reitz Distribution

use super::*;

/// Smallest roughness accepted. Smaller values approach a delta distribution.
pub const MIN_ROUGHNESS: Float = 0.02;

/// Implements the isotropic Trowbridge-Reitz (GGX) distribution.
#[derive(Copy, Clone, Debug)]
pub struct TrowbridgeReitzDistribution {
    /// α = sqrt(2) * σ where σ is the RMS slope of microfacets.
    alpha: Float,
}

impl TrowbridgeReitzDistribution {
    /// Create a new `TrowbridgeReitzDistribution`.
    ///
    /// * `alpha` - α = sqrt(2) * σ where σ is the RMS slope of microfacets.
    pub fn new(alpha: Float) -> Self {
        Self {
            alpha: clamp(alpha, MIN_ROUGHNESS * MIN_ROUGHNESS, 1.0),
        }
    }

    /// Create a new `TrowbridgeReitzDistribution` from a perceptual roughness.
    ///
    /// * `roughness` - Roughness parameter value.
    pub fn from_roughness(roughness: Float) -> Self {
        Self::new(Self::roughness_to_alpha(roughness))
    }

    /// Maps scalar roughness parameter in [0, 1] to alpha. The roughness is
    /// clamped to [MIN_ROUGHNESS, 1] and squared.
    ///
    /// * `roughness` - Roughness parameter value.
    pub fn roughness_to_alpha(roughness: Float) -> Float {
        let roughness = if roughness.is_nan() {
            MIN_ROUGHNESS
        } else {
            clamp(roughness, MIN_ROUGHNESS, 1.0)
        };
        roughness * roughness
    }

    /// Returns α.
    pub fn alpha(&self) -> Float {
        self.alpha
    }
}

impl MicrofacetDistribution for TrowbridgeReitzDistribution {
    /// Return the differential area of microfacets oriented with the surface
    /// normal `wh`.
    ///
    /// * `wh` - A sample normal from the distrubition of normal vectors.
    fn d(&self, wh: &Vector3f) -> Float {
        let cos_h = cos_theta(wh);
        if cos_h <= 0.0 {
            0.0
        } else {
            let alpha2 = self.alpha * self.alpha;
            let t = cos_h * cos_h * (alpha2 - 1.0) + 1.0;
            alpha2 / (PI * t * t)
        }
    }

    /// Returns the invisible masked microfacet area per visible microfacet area.
    ///
    /// * `w` - The direction from camera/viewer.
    fn lambda(&self, w: &Vector3f) -> Float {
        let tan2_theta = tan_2_theta(w);
        if tan2_theta.is_infinite() || tan2_theta.is_nan() {
            INFINITY
        } else {
            let alpha2_tan2_theta = self.alpha * self.alpha * tan2_theta;
            (-1.0 + (1.0 + alpha2_tan2_theta).sqrt()) / 2.0
        }
    }

    /// Returns a sample from the distribution of normals visible from `wo`.
    ///
    /// * `wo` - Outgoing direction in the upper hemisphere.
    /// * `u`  - The 2D uniform random values.
    fn sample_wh(&self, wo: &Vector3f, u: &Point2f) -> Vector3f {
        // Stretch wo to the configuration with α = 1.
        let vh = Vector3f::new(self.alpha * wo.x, self.alpha * wo.y, wo.z).normalize();

        // Orthonormal basis around vh.
        let lensq = vh.x * vh.x + vh.y * vh.y;
        let t1 = if lensq > 1e-10 {
            Vector3f::new(-vh.y, vh.x, 0.0) / lensq.sqrt()
        } else {
            Vector3f::new(1.0, 0.0, 0.0)
        };
        let t2 = vh.cross(&t1);

        // Sample the projected area of the hemisphere.
        let r = u[0].sqrt();
        let phi = TWO_PI * u[1];
        let p1 = r * phi.cos();
        let p2_disk = r * phi.sin();
        let s = 0.5 * (1.0 + vh.z);
        let p2 = (1.0 - s) * max(0.0, 1.0 - p1 * p1).sqrt() + s * p2_disk;

        // Reproject onto the hemisphere and unstretch.
        let nh = p1 * t1 + p2 * t2 + max(0.0, 1.0 - p1 * p1 - p2 * p2).sqrt() * vh;
        Vector3f::new(self.alpha * nh.x, self.alpha * nh.y, max(0.0, nh.z)).normalize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::RNG;
    use float_cmp::*;
    use proptest::prelude::*;

    /// Midpoint quadrature of `f` over the upper hemisphere in (cos θ, φ).
    fn hemisphere_integral<F: Fn(&Vector3f) -> Float>(f: F, n_theta: usize, n_phi: usize) -> f64 {
        let d_cos = 1.0 / n_theta as f64;
        let d_phi = TWO_PI as f64 / n_phi as f64;
        let mut sum = 0.0;
        for i in 0..n_theta {
            let cos_t = ((i as f64 + 0.5) * d_cos) as Float;
            let sin_t = max(0.0, 1.0 - cos_t * cos_t).sqrt();
            for j in 0..n_phi {
                let phi = ((j as f64 + 0.5) * d_phi) as Float;
                let w = Vector3f::new(sin_t * phi.cos(), sin_t * phi.sin(), cos_t);
                sum += f(&w) as f64;
            }
        }
        sum * d_cos * d_phi
    }

    #[test]
    fn roughness_is_clamped() {
        assert_eq!(TrowbridgeReitzDistribution::roughness_to_alpha(0.0), 0.02 * 0.02);
        assert_eq!(TrowbridgeReitzDistribution::roughness_to_alpha(-1.0), 0.02 * 0.02);
        assert_eq!(TrowbridgeReitzDistribution::roughness_to_alpha(2.0), 1.0);
        assert_eq!(TrowbridgeReitzDistribution::roughness_to_alpha(0.5), 0.25);
        assert_eq!(TrowbridgeReitzDistribution::from_roughness(0.0).alpha(), 0.02 * 0.02);
        assert_eq!(TrowbridgeReitzDistribution::new(0.0).alpha(), 0.02 * 0.02);
    }

    #[test]
    fn d_is_zero_below_horizon() {
        let distrib = TrowbridgeReitzDistribution::from_roughness(0.5);
        assert_eq!(distrib.d(&Vector3f::new(0.0, 0.0, -1.0)), 0.0);
        assert_eq!(distrib.d(&Vector3f::new(1.0, 0.0, 0.0)), 0.0);
    }

    #[test]
    fn d_is_normalized() {
        for roughness in [0.5, 0.8, 1.0] {
            let distrib = TrowbridgeReitzDistribution::from_roughness(roughness);
            let integral = hemisphere_integral(|wh| distrib.d(wh) * cos_theta(wh), 2048, 16);
            assert!(
                approx_eq!(f64, integral, 1.0, epsilon = 1e-2),
                "roughness {} integral {}",
                roughness,
                integral
            );
        }
    }

    #[test]
    fn g1_at_normal_incidence_and_back_facing() {
        let distrib = TrowbridgeReitzDistribution::from_roughness(0.7);
        let up = Vector3f::new(0.0, 0.0, 1.0);
        assert_eq!(distrib.g1(&up, &up), 1.0);

        let wh = Vector3f::new(0.6, 0.0, 0.8);
        let w = Vector3f::new(-0.9, 0.0, 0.4359);
        assert!(w.dot(&wh) < 0.0);
        assert_eq!(distrib.g1(&w, &wh), 0.0);
        assert_eq!(distrib.g(&up, &w, &wh), 0.0);

        let grazing = Vector3f::new(1.0, 0.0, 0.0);
        assert_eq!(distrib.g1(&grazing, &up), 0.0);
    }

    #[test]
    fn g1_matches_closed_form() {
        let distrib = TrowbridgeReitzDistribution::from_roughness(0.6);
        let alpha = distrib.alpha();
        let theta = radians(50.0);
        let w = Vector3f::new(theta.sin(), 0.0, theta.cos());
        let up = Vector3f::new(0.0, 0.0, 1.0);
        let tan2 = theta.tan() * theta.tan();
        let expected = 2.0 / (1.0 + (1.0 + alpha * alpha * tan2).sqrt());
        assert!(approx_eq!(f32, distrib.g1(&w, &up), expected, epsilon = 1e-5));
    }

    #[test]
    fn visible_normal_pdf_is_normalized() {
        for roughness in [0.5, 0.8, 1.0] {
            let distrib = TrowbridgeReitzDistribution::from_roughness(roughness);
            for theta in [0.0, 30.0, 60.0, 80.0] {
                let theta = radians(theta);
                let wo = Vector3f::new(theta.sin(), 0.0, theta.cos());
                let integral = hemisphere_integral(|wh| distrib.pdf(&wo, wh), 1024, 256);
                assert!(
                    approx_eq!(f64, integral, 1.0, epsilon = 2e-2),
                    "roughness {} theta {} integral {}",
                    roughness,
                    theta,
                    integral
                );
            }
        }
    }

    #[test]
    fn visible_normal_samples_follow_pdf() {
        // Compare the mean of wh.x and wh.z under sampling against the same
        // moments of the pdf computed by quadrature.
        let distrib = TrowbridgeReitzDistribution::from_roughness(0.7);
        let theta = radians(45.0);
        let wo = Vector3f::new(theta.sin(), 0.0, theta.cos());

        let mut rng = RNG::new(7);
        let n = 100_000;
        let (mut sx, mut sz) = (0.0_f64, 0.0_f64);
        for _ in 0..n {
            let u = Point2f::new(rng.uniform_float(), rng.uniform_float());
            let wh = distrib.sample_wh(&wo, &u);
            sx += wh.x as f64;
            sz += wh.z as f64;
        }
        let mx = hemisphere_integral(|wh| wh.x * distrib.pdf(&wo, wh), 1024, 256);
        let mz = hemisphere_integral(|wh| wh.z * distrib.pdf(&wo, wh), 1024, 256);
        assert!(approx_eq!(f64, sx / n as f64, mx, epsilon = 1e-2), "{} vs {}", sx / n as f64, mx);
        assert!(approx_eq!(f64, sz / n as f64, mz, epsilon = 1e-2), "{} vs {}", sz / n as f64, mz);
    }

    prop_direction!(upper_direction, 0.0..1.0f32, 0.0..TWO_PI);
    prop_range!(roughness, f32, 0.0..1.0f32);

    proptest! {
        #[test]
        fn sampled_normals_are_visible(
            wo in upper_direction(),
            r in roughness(),
            u0 in 0.0..1.0f32,
            u1 in 0.0..1.0f32,
        ) {
            let distrib = TrowbridgeReitzDistribution::from_roughness(r);
            let wh = distrib.sample_wh(&wo, &Point2f::new(u0, u1));
            prop_assert!(wh.is_finite());
            prop_assert!(approx_eq!(f32, wh.length(), 1.0, epsilon = 1e-4));
            prop_assert!(wh.z >= 0.0);
        }

        #[test]
        fn pdf_is_finite_and_non_negative(wo in upper_direction(), wh in upper_direction(), r in roughness()) {
            let distrib = TrowbridgeReitzDistribution::from_roughness(r);
            let pdf = distrib.pdf(&wo, &wh);
            prop_assert!(pdf.is_finite() && pdf >= 0.0);
        }
    }
}
