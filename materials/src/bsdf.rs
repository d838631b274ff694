//! BSDF

use crate::RoughDielectric;
use dielectric_core::geometry::*;
use dielectric_core::interaction::*;
use dielectric_core::mipmap::ImageWrap;
use dielectric_core::paramset::*;
use dielectric_core::pbrt::*;
use dielectric_core::reflection::*;
use dielectric_core::sampler::ScatterSample;
use dielectric_core::spectrum::*;
use dielectric_core::texture::*;
use dielectric_textures::*;
use std::sync::Arc;

/// State shared by all BSDF models: the base color texture and an optional
/// tangent-space normal map.
pub struct BSDFBase {
    /// Base color.
    color: TextureSlot<Spectrum>,

    /// Tangent-space normal map.
    normal_map: OptionTextureSlot<Spectrum>,
}

impl BSDFBase {
    /// Create a new `BSDFBase`.
    ///
    /// * `color`      - Base color texture.
    /// * `normal_map` - Optional tangent-space normal map.
    pub fn new(color: ArcTexture<Spectrum>, normal_map: Option<ArcTexture<Spectrum>>) -> Self {
        Self {
            color: TextureSlot::new(color),
            normal_map: OptionTextureSlot::new(normal_map),
        }
    }

    /// Create a new `BSDFBase` with a uniform color and no normal map.
    ///
    /// * `color` - The color.
    pub fn from_color(color: Spectrum) -> Self {
        Self::new(ConstantTexture::arc(color), None)
    }

    /// Create a new `BSDFBase` with the color loaded from an image file.
    ///
    /// * `path` - Path to the image file.
    pub fn from_file(path: &str) -> Result<Self, String> {
        Ok(Self::new(load_color_map(path)?, None))
    }

    /// Returns the non-negative base color at the surface interaction.
    ///
    /// * `si` - Surface interaction.
    #[inline]
    pub fn color(&self, si: &SurfaceInteraction) -> Spectrum {
        self.color.evaluate(si, TextureFilter::TriLinear).clamp_default()
    }

    /// Returns the shading frame at the surface interaction, perturbed by the
    /// normal map if there is one.
    ///
    /// * `si` - Surface interaction.
    pub fn shading_frame(&self, si: &SurfaceInteraction) -> ShadingFrame {
        let frame = ShadingFrame::from(si);
        match self.normal_map.evaluate(si, TextureFilter::TriLinear) {
            Some(texel) => frame.perturb_with_texel(&texel.to_rgb()),
            None => frame,
        }
    }

    /// Returns the base color texture.
    pub fn color_texture(&self) -> ArcTexture<Spectrum> {
        self.color.get()
    }

    /// Replaces the base color texture and returns the previous one.
    ///
    /// * `color` - The new texture.
    pub fn set_color_texture(&self, color: ArcTexture<Spectrum>) -> ArcTexture<Spectrum> {
        self.color.replace(color)
    }

    /// Returns the normal map.
    pub fn normal_map(&self) -> Option<ArcTexture<Spectrum>> {
        self.normal_map.get()
    }

    /// Replaces the normal map and returns the previous one.
    ///
    /// * `normal_map` - The new normal map or `None` to remove it.
    pub fn set_normal_map(&self, normal_map: Option<ArcTexture<Spectrum>>) -> Option<ArcTexture<Spectrum>> {
        self.normal_map.replace(normal_map)
    }
}

/// Loads a color texture. 8-bit images are decoded from sRGB.
///
/// * `path` - Path to the image file.
pub fn load_color_map(path: &str) -> Result<ArcTexture<Spectrum>, String> {
    let texture = ImageTexture::<Spectrum>::new(path, UVMapping2D::default(), ImageWrap::Repeat, is_gamma_encoded(path))?;
    Ok(Arc::new(texture))
}

/// Loads a tangent-space normal map. Texels are used as stored.
///
/// * `path` - Path to the image file.
pub fn load_normal_map(path: &str) -> Result<ArcTexture<Spectrum>, String> {
    let texture = ImageTexture::<Spectrum>::new(path, UVMapping2D::default(), ImageWrap::Repeat, false)?;
    Ok(Arc::new(texture))
}

fn get_color(base: &BSDFBase) -> ParameterValue {
    let texture = base.color_texture();
    match (texture.constant_value(), texture.source_path()) {
        (Some(c), _) => ParameterValue::Color(c),
        (None, Some(path)) => ParameterValue::TextureMap(String::from(path)),
        (None, None) => ParameterValue::Color(texture.evaluate(&SurfaceInteraction::default(), TextureFilter::TriLinear)),
    }
}

fn set_color(base: &BSDFBase, value: &ParameterValue) -> Result<(), String> {
    let texture = match value {
        ParameterValue::Color(c) => ConstantTexture::arc(*c),
        ParameterValue::TextureMap(path) => load_color_map(path)?,
        other => return Err(format!("Color cannot be set from a {} value", other.param_type())),
    };
    base.set_color_texture(texture);
    Ok(())
}

fn get_normal_map(base: &BSDFBase) -> ParameterValue {
    let path = base
        .normal_map()
        .and_then(|t| t.source_path().map(String::from))
        .unwrap_or_default();
    ParameterValue::NormalMap(path)
}

fn set_normal_map(base: &BSDFBase, value: &ParameterValue) -> Result<(), String> {
    match value {
        ParameterValue::NormalMap(path) if path.is_empty() => {
            base.set_normal_map(None);
            Ok(())
        }
        ParameterValue::NormalMap(path) => {
            base.set_normal_map(Some(load_normal_map(path)?));
            Ok(())
        }
        other => Err(format!("NormalMap cannot be set from a {} value", other.param_type())),
    }
}

static BASE_PARAMETERS: [ParameterDescriptor<BSDFBase>; 2] = [
    ParameterDescriptor {
        name: "Color",
        param_type: ParameterType::Color,
        min: 0.0,
        max: 1.0,
        get: get_color,
        set: set_color,
    },
    ParameterDescriptor {
        name: "NormalMap",
        param_type: ParameterType::NormalMap,
        min: 0.0,
        max: 0.0,
        get: get_normal_map,
        set: set_normal_map,
    },
];

/// Parameters every BSDF exposes ahead of its own.
pub static BASE_PARAMETER_TABLE: ParameterTable<BSDFBase> = ParameterTable::new(&BASE_PARAMETERS);

/// The BSDF models.
pub enum BSDF {
    /// Rough dielectric interface with GGX microfacets.
    RoughDielectric(RoughDielectric),
}

impl BSDF {
    /// Returns the scattering types the BSDF can produce.
    pub fn get_type(&self) -> BxDFType {
        match self {
            Self::RoughDielectric(bsdf) => bsdf.get_type(),
        }
    }

    /// Returns true if the BSDF produces any of the requested scattering types.
    ///
    /// * `types` - Requested scattering types.
    pub fn has_type(&self, types: BxDFType) -> bool {
        self.get_type().matches(types)
    }

    /// Returns the shared base state.
    pub fn base(&self) -> &BSDFBase {
        match self {
            Self::RoughDielectric(bsdf) => bsdf.base(),
        }
    }

    /// Returns the value of the BSDF for a pair of world space directions.
    ///
    /// * `wo`    - Outgoing direction.
    /// * `wi`    - Incident direction.
    /// * `si`    - Surface interaction.
    /// * `types` - Requested scattering types.
    pub fn evaluate(&self, wo: &Vector3f, wi: &Vector3f, si: &SurfaceInteraction, types: BxDFType) -> Spectrum {
        match self {
            Self::RoughDielectric(bsdf) => bsdf.evaluate(wo, wi, si, types),
        }
    }

    /// Returns the solid angle density with which `sample()` produces `wi`.
    ///
    /// * `wo`    - Outgoing direction.
    /// * `wi`    - Incident direction.
    /// * `si`    - Surface interaction.
    /// * `types` - Requested scattering types.
    pub fn density(&self, wo: &Vector3f, wi: &Vector3f, si: &SurfaceInteraction, types: BxDFType) -> Float {
        match self {
            Self::RoughDielectric(bsdf) => bsdf.density(wo, wi, si, types),
        }
    }

    /// Samples an incident direction. Returns `None` when no direction could
    /// be produced.
    ///
    /// * `wo`    - Outgoing direction.
    /// * `u`     - The random values.
    /// * `si`    - Surface interaction.
    /// * `types` - Requested scattering types.
    pub fn sample(
        &self,
        wo: &Vector3f,
        u: &ScatterSample,
        si: &SurfaceInteraction,
        types: BxDFType,
    ) -> Option<BxDFSample> {
        match self {
            Self::RoughDielectric(bsdf) => bsdf.sample(wo, u, si, types),
        }
    }

    /// Returns the number of editable parameters.
    pub fn get_parameter_count(&self) -> usize {
        match self {
            Self::RoughDielectric(bsdf) => bsdf.get_parameter_count(),
        }
    }

    /// Returns the name of the parameter at `idx`.
    ///
    /// * `idx` - Parameter index.
    pub fn get_parameter_name(&self, idx: usize) -> Option<&'static str> {
        match self {
            Self::RoughDielectric(bsdf) => bsdf.get_parameter_name(idx),
        }
    }

    /// Reads a named parameter.
    ///
    /// * `name` - Parameter name.
    pub fn get_parameter(&self, name: &str) -> Option<Parameter> {
        match self {
            Self::RoughDielectric(bsdf) => bsdf.get_parameter(name),
        }
    }

    /// Writes a named parameter.
    ///
    /// * `name`  - Parameter name.
    /// * `value` - The new value.
    pub fn set_parameter(&self, name: &str, value: &ParameterValue) -> Result<(), String> {
        match self {
            Self::RoughDielectric(bsdf) => bsdf.set_parameter(name, value),
        }
    }
}

impl From<RoughDielectric> for BSDF {
    fn from(bsdf: RoughDielectric) -> Self {
        Self::RoughDielectric(bsdf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::*;

    fn tilted_normal_map() -> ArcTexture<Spectrum> {
        // Encodes n = (sin 0.3, 0, cos 0.3).
        let (s, c) = (0.3 as Float).sin_cos();
        let texel = Spectrum::from_rgb(&[0.5 + 0.5 * s, 0.5, 0.5 + 0.5 * c]);
        let t = ImageTexture::from_texels(&Point2::new(1, 1), &[texel], UVMapping2D::default(), ImageWrap::Repeat);
        Arc::new(t.unwrap())
    }

    #[test]
    fn color_is_non_negative() {
        let base = BSDFBase::from_color(Spectrum::from_rgb(&[-1.0, 0.5, 2.0]));
        let c = base.color(&SurfaceInteraction::default());
        assert_eq!(c, Spectrum::from_rgb(&[0.0, 0.5, 2.0]));
    }

    #[test]
    fn normal_map_perturbs_frame() {
        let si = SurfaceInteraction::default();
        let base = BSDFBase::new(ConstantTexture::arc(Spectrum::ONE), Some(tilted_normal_map()));
        let frame = base.shading_frame(&si);
        let (s, c) = (0.3 as Float).sin_cos();
        assert!(approx_eq!(Float, frame.ns.x, s, epsilon = 1e-2));
        assert!(approx_eq!(Float, frame.ns.y, 0.0, epsilon = 1e-2));
        assert!(approx_eq!(Float, frame.ns.z, c, epsilon = 1e-2));

        let old = base.set_normal_map(None);
        assert!(old.is_some());
        let frame = base.shading_frame(&si);
        assert_eq!(frame.ns, Normal3f::UP);
    }

    #[test]
    fn base_parameters() {
        let base = BSDFBase::from_color(Spectrum::new(0.25));
        assert_eq!(BASE_PARAMETER_TABLE.count(), 2);
        assert_eq!(
            BASE_PARAMETER_TABLE.get(&base, "Color").map(|p| p.value),
            Some(ParameterValue::Color(Spectrum::new(0.25)))
        );
        assert_eq!(
            BASE_PARAMETER_TABLE.get(&base, "NormalMap").map(|p| p.value),
            Some(ParameterValue::NormalMap(String::new()))
        );

        let red = Spectrum::from_rgb(&[1.0, 0.0, 0.0]);
        assert!(BASE_PARAMETER_TABLE.set(&base, "Color", &ParameterValue::Color(red)).is_ok());
        assert_eq!(base.color(&SurfaceInteraction::default()), red);

        let missing = ParameterValue::TextureMap(String::from("does/not/exist.png"));
        assert!(BASE_PARAMETER_TABLE.set(&base, "Color", &missing).is_err());
        assert_eq!(base.color(&SurfaceInteraction::default()), red);

        let missing = ParameterValue::NormalMap(String::from("does/not/exist.png"));
        assert!(BASE_PARAMETER_TABLE.set(&base, "NormalMap", &missing).is_err());
        assert!(base.normal_map().is_none());
    }

    #[test]
    fn dispatch_matches_model() {
        let model = RoughDielectric::default();
        let bsdf = BSDF::from(RoughDielectric::default());
        let si = SurfaceInteraction::default();
        let wo = Vector3f::new(0.3, 0.1, 0.9).normalize();
        let wi = Vector3f::new(-0.2, 0.3, 0.8).normalize();

        assert!(bsdf.has_type(BxDFType::TRANSMISSION));
        assert!(!bsdf.has_type(BxDFType::DIFFUSE | BxDFType::SPECULAR));
        assert_eq!(bsdf.evaluate(&wo, &wi, &si, BxDFType::ALL), model.evaluate(&wo, &wi, &si, BxDFType::ALL));
        assert_eq!(bsdf.density(&wo, &wi, &si, BxDFType::ALL), model.density(&wo, &wi, &si, BxDFType::ALL));
        assert_eq!(bsdf.get_parameter_count(), 4);
        assert_eq!(bsdf.get_parameter_name(0), Some("Color"));
        assert!(bsdf.get_parameter("IOR").is_some());
        assert!(bsdf.set_parameter("Bogus", &ParameterValue::Float(1.0)).is_err());
        assert!(bsdf.base().normal_map().is_none());
    }
}
