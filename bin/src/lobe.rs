//! Scattering lobe measurements

use dielectric_core::geometry::*;
use dielectric_core::image_io::write_image;
use dielectric_core::interaction::*;
use dielectric_core::pbrt::*;
use dielectric_core::reflection::*;
use dielectric_core::sampler::*;
use dielectric_materials::*;
use indicatif::{ProgressBar, ProgressStyle};

/// Samples per progress bar update.
const PROGRESS_CHUNK: usize = 1024;

/// Returns the unit vector for spherical angles.
///
/// * `theta` - Polar angle from +Z in radians.
/// * `phi`   - Azimuth from +X in radians.
pub fn spherical_direction(theta: Float, phi: Float) -> Vector3f {
    let (sin_theta, cos_theta) = theta.sin_cos();
    Vector3f::new(sin_theta * phi.cos(), sin_theta * phi.sin(), cos_theta)
}

/// Integrates `density()` over the sphere with the midpoint rule in (cos θ, φ).
///
/// * `bsdf`  - The BSDF.
/// * `wo`    - Outgoing direction.
/// * `si`    - Surface interaction.
/// * `n_cos` - Number of cos θ intervals.
/// * `n_phi` - Number of φ intervals.
pub fn density_integral(bsdf: &BSDF, wo: &Vector3f, si: &SurfaceInteraction, n_cos: usize, n_phi: usize) -> f64 {
    let d_cos = 2.0 / n_cos as f64;
    let d_phi = std::f64::consts::TAU / n_phi as f64;

    let mut sum = 0.0;
    for i in 0..n_cos {
        let cos = -1.0 + (i as f64 + 0.5) * d_cos;
        let sin = (1.0 - cos * cos).max(0.0).sqrt();
        for j in 0..n_phi {
            let phi = (j as f64 + 0.5) * d_phi;
            let wi = Vector3f::new((sin * phi.cos()) as Float, (sin * phi.sin()) as Float, cos as Float);
            sum += bsdf.density(wo, &wi, si, BxDFType::ALL) as f64;
        }
    }
    sum * d_cos * d_phi
}

/// Summary of repeated calls to `sample()`.
#[derive(Copy, Clone, Debug, Default)]
pub struct LobeStats {
    /// Number of samples drawn.
    pub samples: usize,

    /// Samples that produced no direction.
    pub failures: usize,

    /// Samples that reflected.
    pub reflections: usize,

    /// Sum of throughput * |cos θi|.
    pub weight_sum: f64,

    /// Largest relative difference between a sample's pdf and `density()`.
    pub max_pdf_error: Float,

    /// Largest relative difference between a sample's value and `evaluate()`.
    pub max_value_error: Float,
}

impl LobeStats {
    /// Fraction of samples that produced no direction.
    pub fn failure_rate(&self) -> f64 {
        if self.samples == 0 {
            0.0
        } else {
            self.failures as f64 / self.samples as f64
        }
    }

    /// Fraction of produced directions that are reflections.
    pub fn reflected_fraction(&self) -> f64 {
        let scattered = self.samples - self.failures;
        if scattered == 0 {
            0.0
        } else {
            self.reflections as f64 / scattered as f64
        }
    }

    /// Monte Carlo estimate of the directional albedo.
    pub fn albedo(&self) -> f64 {
        if self.samples == 0 {
            0.0
        } else {
            self.weight_sum / self.samples as f64
        }
    }

    /// Accumulates a single call to `sample()`.
    ///
    /// * `bsdf`   - The BSDF.
    /// * `wo`     - Outgoing direction.
    /// * `si`     - Surface interaction.
    /// * `sample` - The result of `sample()`.
    fn add(&mut self, bsdf: &BSDF, wo: &Vector3f, si: &SurfaceInteraction, sample: Option<BxDFSample>) {
        self.samples += 1;
        let s = match sample {
            Some(s) => s,
            None => {
                self.failures += 1;
                return;
            }
        };

        if s.bxdf_type.contains(BxDFType::REFLECTION) {
            self.reflections += 1;
        }
        self.weight_sum += (s.throughput().y() * abs_cos_theta(&s.wi)) as f64;

        let pdf = bsdf.density(wo, &s.wi, si, BxDFType::ALL);
        let f = bsdf.evaluate(wo, &s.wi, si, BxDFType::ALL);
        self.max_pdf_error = max(self.max_pdf_error, relative_error(s.pdf, pdf));
        self.max_value_error = max(self.max_value_error, relative_error(s.f.y(), f.y()));
    }
}

/// Returns |a - b| / max(|a|, |b|), or 0 when both are 0.
///
/// * `a` - First value.
/// * `b` - Second value.
fn relative_error(a: Float, b: Float) -> Float {
    let m = max(abs(a), abs(b));
    if m == 0.0 {
        0.0
    } else {
        abs(a - b) / m
    }
}

/// Draws `n` samples from the BSDF and checks them against `density()` and
/// `evaluate()`.
///
/// * `bsdf`          - The BSDF.
/// * `wo`            - Outgoing direction.
/// * `si`            - Surface interaction.
/// * `sampler`       - Source of random values.
/// * `n`             - Number of samples.
/// * `show_progress` - Draw a progress bar.
pub fn sample_lobe(
    bsdf: &BSDF,
    wo: &Vector3f,
    si: &SurfaceInteraction,
    sampler: &mut dyn Sampler,
    n: usize,
    show_progress: bool,
) -> LobeStats {
    let progress = if show_progress {
        let progress = ProgressBar::new(n as u64);
        progress.set_style(
            ProgressStyle::with_template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} samples")
                .unwrap_or_else(|_| ProgressStyle::default_bar()),
        );
        progress
    } else {
        ProgressBar::hidden()
    };

    let mut stats = LobeStats::default();
    for i in 0..n {
        let u = ScatterSample::from_sampler(sampler);
        let sample = bsdf.sample(wo, &u, si, BxDFType::ALL);
        stats.add(bsdf, wo, si, sample);

        if (i + 1) % PROGRESS_CHUNK == 0 {
            progress.inc(PROGRESS_CHUNK as u64);
        }
    }
    progress.finish_and_clear();

    stats
}

/// Returns a lat-long RGB image of log(1 + density). Rows run from θ = 0 at
/// the top to θ = π at the bottom and columns span φ in [0, 2π). Values are
/// normalized so the brightest pixel is 1.
///
/// * `bsdf`   - The BSDF.
/// * `wo`     - Outgoing direction.
/// * `si`     - Surface interaction.
/// * `width`  - Image width.
/// * `height` - Image height.
pub fn density_image(bsdf: &BSDF, wo: &Vector3f, si: &SurfaceInteraction, width: usize, height: usize) -> Vec<Float> {
    let mut values = Vec::with_capacity(width * height);
    for y in 0..height {
        let theta = PI * (y as Float + 0.5) / height as Float;
        for x in 0..width {
            let phi = TWO_PI * (x as Float + 0.5) / width as Float;
            let wi = spherical_direction(theta, phi);
            values.push(bsdf.density(wo, &wi, si, BxDFType::ALL).ln_1p());
        }
    }

    let peak = values.iter().fold(0.0, |m: Float, &v| max(m, v));
    let scale = if peak > 0.0 { 1.0 / peak } else { 0.0 };
    values.iter().flat_map(|&v| [v * scale; 3]).collect()
}

/// Writes the density image.
///
/// * `path`   - Output file path.
/// * `rgb`    - RGB pixels.
/// * `width`  - Image width.
/// * `height` - Image height.
pub fn write_density_image(path: &str, rgb: &[Float], width: usize, height: usize) -> Result<(), String> {
    info!("Writing density lobe to {path}");
    write_image(path, rgb, width, height)
}
