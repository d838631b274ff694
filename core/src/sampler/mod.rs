//! Sampler

use crate::geometry::*;
use crate::pbrt::*;

/// Sampler interface.
pub trait Sampler {
    /// Generates a new instance of an initial `Sampler` for use by a rendering thread.
    ///
    /// * `seed` - The seed for the random number generator (if any).
    fn clone_sampler(&self, seed: u64) -> Box<dyn Sampler + Send>;

    /// Returns the sample value for the next dimension of the current sample vector.
    fn get_1d(&mut self) -> Float;

    /// Returns the sample value for the next two dimensions of the current sample vector.
    fn get_2d(&mut self) -> Point2f;
}

/// The random input consumed by a single BSDF sampling step.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct ScatterSample {
    /// Values used to pick the microfacet normal.
    pub u: Point2f,

    /// Value used to choose between the reflection and transmission lobes.
    pub u_lobe: Float,
}

impl ScatterSample {
    /// Create a new `ScatterSample`.
    ///
    /// * `u`      - Values used to pick the microfacet normal.
    /// * `u_lobe` - Value used to choose between lobes.
    pub fn new(u: Point2f, u_lobe: Float) -> Self {
        Self { u, u_lobe }
    }

    /// Draws the next 2D value and then the next 1D value from a sampler.
    ///
    /// * `sampler` - The sampler.
    pub fn from_sampler(sampler: &mut dyn Sampler) -> Self {
        let u = sampler.get_2d();
        let u_lobe = sampler.get_1d();
        Self { u, u_lobe }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct CountingSampler {
        next: Float,
    }

    impl Sampler for CountingSampler {
        fn clone_sampler(&self, _seed: u64) -> Box<dyn Sampler + Send> {
            Box::new(Self { next: 0.0 })
        }

        fn get_1d(&mut self) -> Float {
            self.next += 0.125;
            self.next
        }

        fn get_2d(&mut self) -> Point2f {
            let x = self.get_1d();
            let y = self.get_1d();
            Point2f::new(x, y)
        }
    }

    #[test]
    fn draws_2d_before_1d() {
        let mut sampler = CountingSampler { next: 0.0 };
        let s = ScatterSample::from_sampler(&mut sampler);
        assert_eq!(s, ScatterSample::new(Point2f::new(0.125, 0.25), 0.375));
    }
}
