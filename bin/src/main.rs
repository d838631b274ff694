#[macro_use]
extern crate log;

mod lobe;

use dielectric_core::app::*;
use dielectric_core::geometry::*;
use dielectric_core::interaction::*;
use dielectric_core::pbrt::*;
use dielectric_core::reflection::*;
use dielectric_core::spectrum::*;
use dielectric_materials::*;
use dielectric_samplers::RandomSampler;
use lobe::*;
use std::process::exit;

fn main() {
    // Initialize `env_logger`.
    env_logger::init();

    if let Err(e) = run(options()) {
        error!("{e}");
        exit(1);
    }
}

fn run(opts: &Options) -> Result<(), String> {
    opts.validate()?;

    let bsdf = BSDF::from(RoughDielectric::new(Spectrum::ONE, opts.roughness, opts.eta_i, opts.ior));
    let si = SurfaceInteraction::default();
    let wo = outgoing_direction(opts.theta);
    info!("Outgoing direction {wo}");

    let fresnel = fr_dielectric(cos_theta(&wo), opts.eta_i, opts.ior);

    info!("Integrating density over the sphere");
    let integral = density_integral(&bsdf, &wo, &si, opts.resolution, opts.resolution);

    info!("Drawing {} samples", opts.samples);
    let mut sampler = RandomSampler::new(Some(opts.seed));
    let stats = sample_lobe(&bsdf, &wo, &si, &mut sampler, opts.samples, !opts.quiet);

    if !opts.quiet {
        println!("roughness          {}", opts.roughness);
        println!("eta (i, t)         {}, {}", opts.eta_i, opts.ior);
        println!("theta              {}", opts.theta);
        println!("fresnel            {fresnel:.6}");
        println!("density integral   {integral:.6}");
        println!("no-scatter rate    {:.6}", stats.failure_rate());
        println!("reflected fraction {:.6}", stats.reflected_fraction());
        println!("albedo             {:.6}", stats.albedo());
        println!("max pdf error      {:.3e}", stats.max_pdf_error);
        println!("max value error    {:.3e}", stats.max_value_error);
    }

    if let Some(path) = opts.image_file.as_ref() {
        let (width, height) = opts.image_resolution();
        let rgb = density_image(&bsdf, &wo, &si, width, height);
        write_density_image(path, &rgb, width, height)?;
    }

    Ok(())
}

/// Returns the direction at `theta` degrees from the normal in the xz-plane.
/// Angles past 90 degrees lie inside the material.
///
/// * `theta` - Polar angle in degrees.
fn outgoing_direction(theta: Float) -> Vector3f {
    spherical_direction(radians(theta), 0.0)
}
