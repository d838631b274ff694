//! Application related stuff

use crate::pbrt::Float;
use clap::Parser;

lazy_static! {
    /// The global application options.
    pub static ref OPTIONS: Options = Options::parse();
}

/// Returns the global application options.
pub fn options() -> &'static Options {
    &OPTIONS
}

/// Options for the scattering lobe diagnostics.
#[derive(Parser, Clone, Debug)]
#[clap(author, version, about, long_about = None)]
pub struct Options {
    /// Surface roughness.
    #[clap(
        long,
        short = 'r',
        value_name = "FLOAT",
        default_value_t = 0.06,
        help = "Surface roughness in [0.01, 1]."
    )]
    pub roughness: Float,

    /// Index of refraction of the transmitted side.
    #[clap(
        long,
        value_name = "FLOAT",
        default_value_t = 1.5,
        help = "Index of refraction of the material."
    )]
    pub ior: Float,

    /// Index of refraction of the incident side.
    #[clap(
        long = "eta-i",
        value_name = "FLOAT",
        default_value_t = 1.0,
        help = "Index of refraction of the surrounding medium."
    )]
    pub eta_i: Float,

    /// Angle between the outgoing direction and the normal.
    #[clap(
        long,
        value_name = "DEGREES",
        default_value_t = 30.0,
        help = "Angle of the outgoing direction from the normal, in degrees. Values above 90 place it inside the material."
    )]
    pub theta: Float,

    /// Number of directions to sample.
    #[clap(
        long,
        short = 'n',
        value_name = "NUM",
        default_value_t = 100_000,
        help = "Number of samples to draw."
    )]
    pub samples: usize,

    /// Seed for the sampler.
    #[clap(long, value_name = "NUM", default_value_t = 0, help = "Sampler seed.")]
    pub seed: u64,

    /// Width of the lat-long image and number of φ steps in the quadrature.
    #[clap(
        long,
        value_name = "NUM",
        default_value_t = 256,
        help = "Width of the density image; the height is half of it."
    )]
    pub resolution: usize,

    /// Path to the image file.
    #[clap(
        long = "outfile",
        short = 'o',
        value_name = "FILE",
        help = "Write a lat-long image of the density lobe to the given PNG file."
    )]
    pub image_file: Option<String>,

    /// Suppress all text output other than error messages.
    #[clap(long, help = "Suppress all text output other than error messages.")]
    pub quiet: bool,
}

impl Options {
    /// Checks the options for values that cannot be used.
    pub fn validate(&self) -> Result<(), String> {
        if !(self.theta >= 0.0 && self.theta <= 180.0) {
            return Err(format!("theta {} is outside [0, 180]", self.theta));
        }
        if self.samples == 0 {
            return Err(String::from("samples must be positive"));
        }
        if self.resolution < 2 {
            return Err(format!("resolution {} is too small", self.resolution));
        }
        if !(self.eta_i > 0.0) {
            return Err(format!("eta-i {} must be positive", self.eta_i));
        }
        Ok(())
    }

    /// Returns the (width, height) of the density image.
    pub fn image_resolution(&self) -> (usize, usize) {
        (self.resolution, self.resolution / 2)
    }
}
