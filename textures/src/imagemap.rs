//! Image Texture

use dielectric_core::geometry::*;
use dielectric_core::image_io::*;
use dielectric_core::interaction::*;
use dielectric_core::mipmap::*;
use dielectric_core::pbrt::*;
use dielectric_core::spectrum::*;
use dielectric_core::texture::*;
use std::ops::{Add, Mul};

/// Stores an image texture with MIPMaps using texels of type `T`.
#[derive(Clone)]
pub struct ImageTexture<T> {
    /// 2D mapping.
    mapping: UVMapping2D,

    /// The mipmaps.
    mipmap: MIPMap<T>,

    /// The file the texels were loaded from.
    path: Option<String>,
}

impl<T> ImageTexture<T>
where
    T: Copy + Default + Add<Output = T> + Mul<Float, Output = T>,
{
    /// Create a new `ImageTexture<T>` from texels already in memory.
    ///
    /// * `resolution` - Image resolution.
    /// * `texels`     - Texels in row-major order.
    /// * `mapping`    - The 2D mapping.
    /// * `wrap_mode`  - Image wrapping convention.
    pub fn from_texels(
        resolution: &Point2<usize>,
        texels: &[T],
        mapping: UVMapping2D,
        wrap_mode: ImageWrap,
    ) -> Result<Self, String> {
        let mipmap = MIPMap::new(resolution, texels, wrap_mode).ok_or_else(|| {
            format!(
                "{} texels do not fill a {}x{} image",
                texels.len(),
                resolution[0],
                resolution[1]
            )
        })?;
        Ok(Self {
            mapping,
            mipmap,
            path: None,
        })
    }

    /// Returns the image resolution.
    pub fn resolution(&self) -> Point2<usize> {
        Point2::new(self.mipmap.width(), self.mipmap.height())
    }
}

/// Returns true if texels of the image file are stored sRGB encoded.
///
/// * `path` - The path to the image file.
pub fn is_gamma_encoded(path: &str) -> bool {
    matches!(get_extension_from_filename(path).as_deref(), Some("png") | Some("tga"))
}

macro_rules! new_image_texture {
    ($t: ty, $convert: expr) => {
        impl ImageTexture<$t> {
            /// Create a new `ImageTexture` by loading an image file.
            ///
            /// * `path`      - The path to the image file.
            /// * `mapping`   - The 2D mapping.
            /// * `wrap_mode` - Image wrapping convention.
            /// * `gamma`     - Do gamma correction for the texel values.
            pub fn new(path: &str, mapping: UVMapping2D, wrap_mode: ImageWrap, gamma: bool) -> Result<Self, String> {
                let image = read_image(path, gamma).map_err(|err| {
                    error!("Unable to load texture: {}", err);
                    err
                })?;

                let texels: Vec<$t> = image.pixels.iter().map($convert).collect();
                let mut texture = Self::from_texels(&image.resolution, &texels, mapping, wrap_mode)?;
                texture.path = Some(String::from(path));

                info!(
                    "Loaded texture {} ({}x{}, {} levels)",
                    path,
                    texture.mipmap.width(),
                    texture.mipmap.height(),
                    texture.mipmap.levels()
                );
                Ok(texture)
            }
        }
    };
}
new_image_texture!(RGBSpectrum, |s: &RGBSpectrum| *s);
new_image_texture!(Float, |s: &RGBSpectrum| s.y());

impl<T> Texture<T> for ImageTexture<T>
where
    T: Copy + Default + Add<Output = T> + Mul<Float, Output = T>,
{
    /// Evaluate the texture at surface interaction.
    ///
    /// * `si`     - Surface interaction.
    /// * `filter` - Reconstruction filter.
    fn evaluate(&self, si: &SurfaceInteraction, filter: TextureFilter) -> T {
        // Get the (s, t) mapping for the intersection.
        let st = self.mapping.map(si);
        self.mipmap.lookup(&st.p, st.filter_width(), filter)
    }

    /// Returns the file the texels were loaded from.
    fn source_path(&self) -> Option<&str> {
        self.path.as_deref()
    }
}
