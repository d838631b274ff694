//! Random Sampler.

use dielectric_core::geometry::*;
use dielectric_core::pbrt::*;
use dielectric_core::rng::*;
use dielectric_core::sampler::*;

/// Implements a sampler that uses a PRNG to generate uniformly random samples.
#[derive(Clone)]
pub struct RandomSampler {
    /// The random number generator.
    pub rng: RNG,
}

impl RandomSampler {
    /// Create a new `RandomSampler`.
    ///
    /// * `seed` - Optional seed for the random number generator.
    pub fn new(seed: Option<u64>) -> Self {
        Self {
            rng: match seed {
                Some(s) => RNG::new(s),
                None => RNG::default(),
            },
        }
    }
}

impl Default for RandomSampler {
    fn default() -> Self {
        Self::new(None)
    }
}

impl Sampler for RandomSampler {
    /// Generates a new instance of an initial `Sampler` for use by a rendering thread.
    ///
    /// * `seed` - The seed for the random number generator.
    fn clone_sampler(&self, seed: u64) -> Box<dyn Sampler + Send> {
        Box::new(Self::new(Some(seed)))
    }

    /// Returns the sample value for the next dimension of the current sample vector.
    fn get_1d(&mut self) -> Float {
        self.rng.uniform_float()
    }

    /// Returns the sample value for the next two dimensions of the current sample vector.
    fn get_2d(&mut self) -> Point2f {
        self.rng.uniform_point2()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::*;

    #[test]
    fn values_in_unit_interval() {
        let mut sampler = RandomSampler::new(Some(7));
        let mut sum = 0.0;
        let n = 10_000;
        for _ in 0..n {
            let u = sampler.get_1d();
            assert!((0.0..1.0).contains(&u));
            let p = sampler.get_2d();
            assert!((0.0..1.0).contains(&p[0]) && (0.0..1.0).contains(&p[1]));
            sum += u;
        }
        assert!(approx_eq!(Float, sum / n as Float, 0.5, epsilon = 0.02));
    }

    #[test]
    fn seeds_are_deterministic() {
        let mut a = RandomSampler::new(Some(3));
        let mut b = a.clone_sampler(3);
        let mut c = a.clone_sampler(4);
        let (x, y, z) = (a.get_1d(), b.get_1d(), c.get_1d());
        assert_eq!(x, y);
        assert_ne!(x, z);

        let s1 = ScatterSample::from_sampler(&mut RandomSampler::new(Some(11)));
        let s2 = ScatterSample::from_sampler(&mut RandomSampler::new(Some(11)));
        assert_eq!(s1, s2);
    }
}
