//! MIPMap

use crate::geometry::*;
use crate::pbrt::*;
use crate::texture::TextureFilter;
use std::ops::{Add, Mul};

/// Enumeration for the image wrapping convention for out-of-bounds texels.
#[derive(Copy, Clone, Debug, Hash, PartialEq, Eq)]
pub enum ImageWrap {
    /// Repeat.
    Repeat,
    /// Black.
    Black,
    /// Clamp.
    Clamp,
}

/// A single level of the image pyramid.
#[derive(Clone)]
struct Level<T> {
    /// Width in texels.
    width: usize,

    /// Height in texels.
    height: usize,

    /// Texels stored in row-major order.
    texels: Vec<T>,
}

/// Image pyramid of increasingly lower resolution prefiltered versions of
/// the original image.
#[derive(Clone)]
pub struct MIPMap<T> {
    /// Determines how to handle out-of-bounds texels.
    wrap_mode: ImageWrap,

    /// The pyramid levels, finest first.
    pyramid: Vec<Level<T>>,
}

impl<T> MIPMap<T>
where
    T: Copy + Default + Add<Output = T> + Mul<Float, Output = T>,
{
    /// Create a new `MIPMap`. Returns `None` if the image is empty or the
    /// number of texels does not match the resolution.
    ///
    /// * `resolution` - Image resolution.
    /// * `img`        - Texels in row-major order.
    /// * `wrap_mode`  - Determines how to handle out-of-bounds texels.
    pub fn new(resolution: &Point2<usize>, img: &[T], wrap_mode: ImageWrap) -> Option<Self> {
        let (width, height) = (resolution[0], resolution[1]);
        if width == 0 || height == 0 || img.len() != width * height {
            return None;
        }

        let mut pyramid = vec![Level {
            width,
            height,
            texels: img.to_vec(),
        }];

        // Box filter four texels from the finer level until 1x1.
        loop {
            let finer = &pyramid[pyramid.len() - 1];
            if finer.width == 1 && finer.height == 1 {
                break;
            }

            let s_res = max(1, finer.width / 2);
            let t_res = max(1, finer.height / 2);
            let mut texels = Vec::with_capacity(s_res * t_res);
            for t in 0..t_res {
                for s in 0..s_res {
                    let (s, t) = (2 * s as isize, 2 * t as isize);
                    let tx0 = finer.texel(wrap_mode, s, t);
                    let tx1 = finer.texel(wrap_mode, s + 1, t);
                    let tx2 = finer.texel(wrap_mode, s, t + 1);
                    let tx3 = finer.texel(wrap_mode, s + 1, t + 1);
                    texels.push((tx0 + tx1 + tx2 + tx3) * 0.25);
                }
            }

            pyramid.push(Level {
                width: s_res,
                height: t_res,
                texels,
            });
        }

        Some(Self { wrap_mode, pyramid })
    }

    /// Returns the width of the highest resolution level.
    pub fn width(&self) -> usize {
        self.pyramid[0].width
    }

    /// Returns the height of the highest resolution level.
    pub fn height(&self) -> usize {
        self.pyramid[0].height
    }

    /// Returns the number of levels in the pyramid.
    pub fn levels(&self) -> usize {
        self.pyramid.len()
    }

    /// Returns a texel at a given level with the wrap mode applied.
    ///
    /// * `level` - The pyramid level.
    /// * `s`     - The s-coordinate.
    /// * `t`     - The t-coordinate.
    pub fn texel(&self, level: usize, s: isize, t: isize) -> T {
        let level = min(level, self.levels() - 1);
        self.pyramid[level].texel(self.wrap_mode, s, t)
    }

    /// Filters the texture at the given coordinates.
    ///
    /// * `st`     - The (s, t) coordinates.
    /// * `width`  - Filter width in (s, t) space; used by `TriLinear`.
    /// * `filter` - Reconstruction filter.
    pub fn lookup(&self, st: &Point2f, width: Float, filter: TextureFilter) -> T {
        match filter {
            TextureFilter::Nearest => self.nearest(0, st),
            TextureFilter::Linear => self.bilerp(0, st),
            TextureFilter::TriLinear => self.lookup_triangle(st, width),
        }
    }

    /// Trilinear interpolation between the two levels that bracket the
    /// filter width.
    ///
    /// * `st`    - The (s, t) coordinates.
    /// * `width` - Filter width in (s, t) space.
    fn lookup_triangle(&self, st: &Point2f, width: Float) -> T {
        let levels = self.levels();
        let level = (levels - 1) as Float + max(width, 1e-8).log2();

        if level < 0.0 {
            self.bilerp(0, st)
        } else if level >= (levels - 1) as Float {
            self.texel(levels - 1, 0, 0)
        } else {
            let i_level = level.floor() as usize;
            let delta = level - i_level as Float;
            self.bilerp(i_level, st) * (1.0 - delta) + self.bilerp(i_level + 1, st) * delta
        }
    }

    fn nearest(&self, level: usize, st: &Point2f) -> T {
        let l = &self.pyramid[level];
        let s = (st[0] * l.width as Float).floor() as isize;
        let t = (st[1] * l.height as Float).floor() as isize;
        l.texel(self.wrap_mode, s, t)
    }

    fn bilerp(&self, level: usize, st: &Point2f) -> T {
        let l = &self.pyramid[level];

        let s = st[0] * l.width as Float - 0.5;
        let t = st[1] * l.height as Float - 0.5;

        let s0 = s.floor();
        let t0 = t.floor();

        let ds = s - s0;
        let dt = t - t0;

        let (s0, t0) = (s0 as isize, t0 as isize);
        let tx0 = l.texel(self.wrap_mode, s0, t0);
        let tx1 = l.texel(self.wrap_mode, s0, t0 + 1);
        let tx2 = l.texel(self.wrap_mode, s0 + 1, t0);
        let tx3 = l.texel(self.wrap_mode, s0 + 1, t0 + 1);

        tx0 * ((1.0 - ds) * (1.0 - dt)) + tx1 * ((1.0 - ds) * dt) + tx2 * (ds * (1.0 - dt)) + tx3 * (ds * dt)
    }
}

impl<T: Copy + Default> Level<T> {
    /// Compute texel `(s, t)` accounting for boundary conditions.
    fn texel(&self, wrap_mode: ImageWrap, s: isize, t: isize) -> T {
        let (w, h) = (self.width as isize, self.height as isize);
        let (s, t) = match wrap_mode {
            ImageWrap::Repeat => (s.rem_euclid(w), t.rem_euclid(h)),
            ImageWrap::Clamp => (clamp(s, 0, w - 1), clamp(t, 0, h - 1)),
            ImageWrap::Black => {
                if s < 0 || t < 0 || s >= w || t >= h {
                    return T::default();
                }
                (s, t)
            }
        };
        self.texels[t as usize * self.width + s as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::*;

    fn checker() -> MIPMap<Float> {
        // 4x2 image, rows: [0 1 0 1] [1 0 1 0]
        let img = [0.0, 1.0, 0.0, 1.0, 1.0, 0.0, 1.0, 0.0];
        MIPMap::new(&Point2::new(4, 2), &img, ImageWrap::Repeat).unwrap()
    }

    #[test]
    fn rejects_bad_dimensions() {
        assert!(MIPMap::<Float>::new(&Point2::new(0, 4), &[], ImageWrap::Repeat).is_none());
        assert!(MIPMap::new(&Point2::new(2, 2), &[0.0; 3], ImageWrap::Repeat).is_none());
    }

    #[test]
    fn pyramid_levels() {
        let m = checker();
        assert_eq!(m.width(), 4);
        assert_eq!(m.height(), 2);
        // 4x2 -> 2x1 -> 1x1
        assert_eq!(m.levels(), 3);
        assert!(approx_eq!(Float, m.texel(1, 0, 0), 0.5, epsilon = 1e-6));
        assert!(approx_eq!(Float, m.texel(2, 0, 0), 0.5, epsilon = 1e-6));
    }

    #[test]
    fn wrap_modes() {
        let img = [1.0, 2.0, 3.0, 4.0];
        let repeat = MIPMap::new(&Point2::new(2, 2), &img, ImageWrap::Repeat).unwrap();
        let clamp = MIPMap::new(&Point2::new(2, 2), &img, ImageWrap::Clamp).unwrap();
        let black = MIPMap::new(&Point2::new(2, 2), &img, ImageWrap::Black).unwrap();
        assert_eq!(repeat.texel(0, -1, 0), 2.0);
        assert_eq!(repeat.texel(0, 2, 3), 3.0);
        assert_eq!(clamp.texel(0, -5, 7), 3.0);
        assert_eq!(black.texel(0, 2, 0), 0.0);
        assert_eq!(black.texel(0, 1, 1), 4.0);
    }

    #[test]
    fn nearest_and_linear() {
        let m = checker();
        assert_eq!(m.lookup(&Point2f::new(0.3, 0.2), 0.0, TextureFilter::Nearest), 1.0);
        assert_eq!(m.lookup(&Point2f::new(0.1, 0.9), 0.0, TextureFilter::Nearest), 1.0);

        // Texel centers reproduce the texel value.
        let v = m.lookup(&Point2f::new(0.375, 0.25), 0.0, TextureFilter::Linear);
        assert!(approx_eq!(Float, v, 1.0, epsilon = 1e-5));

        // Midway between columns blends evenly.
        let v = m.lookup(&Point2f::new(0.25, 0.25), 0.0, TextureFilter::Linear);
        assert!(approx_eq!(Float, v, 0.5, epsilon = 1e-5));
    }

    #[test]
    fn trilinear_widens_to_average() {
        let m = checker();
        let fine = m.lookup(&Point2f::new(0.375, 0.25), 0.0, TextureFilter::TriLinear);
        assert!(approx_eq!(Float, fine, 1.0, epsilon = 1e-5));

        let coarse = m.lookup(&Point2f::new(0.375, 0.25), 1.0, TextureFilter::TriLinear);
        assert!(approx_eq!(Float, coarse, 0.5, epsilon = 1e-5));
    }
}
