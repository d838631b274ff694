//! Rough Dielectric

use crate::bsdf::*;
use dielectric_core::geometry::*;
use dielectric_core::interaction::*;
use dielectric_core::microfacet::*;
use dielectric_core::mipmap::ImageWrap;
use dielectric_core::parallel::AtomicFloat;
use dielectric_core::paramset::*;
use dielectric_core::pbrt::*;
use dielectric_core::reflection::*;
use dielectric_core::sampler::ScatterSample;
use dielectric_core::spectrum::*;
use dielectric_core::texture::*;
use dielectric_textures::*;
use std::sync::atomic::Ordering;
use std::sync::Arc;

/// Default roughness.
pub const DEFAULT_ROUGHNESS: Float = 0.06;

/// Default roughness for materials with a file-backed color.
pub const DEFAULT_FILE_ROUGHNESS: Float = 0.05;

/// Glossy reflection.
const REFLECT_SCATTER: BxDFType = BxDFType::REFLECTION.union(BxDFType::GLOSSY);

/// Glossy transmission.
const REFRACT_SCATTER: BxDFType = BxDFType::TRANSMISSION.union(BxDFType::GLOSSY);

/// Rough interface between two dielectrics. Scattering is modelled with GGX
/// microfacets that both reflect and refract, weighted by the Fresnel
/// reflectance of each microfacet.
///
/// `eta_i` is the index of refraction on the side the shading normal points
/// to and `eta_t` the one on the other side.
pub struct RoughDielectric {
    /// Base color and normal map.
    base: BSDFBase,

    /// Roughness in [0, 1].
    roughness: TextureSlot<Float>,

    /// Index of refraction on the side of the normal.
    eta_i: Float,

    /// Index of refraction on the opposite side. Editable as "IOR".
    eta_t: AtomicFloat,
}

/// State read once per query from the material and the surface interaction.
struct Context {
    /// Base color.
    color: Spectrum,

    /// Shading frame.
    frame: ShadingFrame,

    /// Microfacet distribution.
    distrib: TrowbridgeReitzDistribution,

    /// Index of refraction on the side of the normal.
    eta_i: Float,

    /// Index of refraction on the opposite side.
    eta_t: Float,
}

/// A classified direction pair.
struct HalfVector {
    /// Microfacet normal oriented to the upper hemisphere.
    wh: Vector3f,

    /// True for reflection, false for refraction.
    reflect: bool,

    /// Index of refraction on the side of `wo`.
    eta_o: Float,

    /// Index of refraction on the side of `wi`.
    eta_i: Float,
}

impl RoughDielectric {
    /// Create a new `RoughDielectric` with a uniform color.
    ///
    /// * `reflectance` - The color.
    /// * `roughness`   - Roughness in [0, 1].
    /// * `eta_i`       - Index of refraction on the side of the normal.
    /// * `eta_t`       - Index of refraction on the opposite side.
    pub fn new(reflectance: Spectrum, roughness: Float, eta_i: Float, eta_t: Float) -> Self {
        Self::from_base(BSDFBase::from_color(reflectance), roughness, eta_i, eta_t)
    }

    /// Create a new `RoughDielectric` with a color texture and an optional
    /// normal map.
    ///
    /// * `color`      - The color texture.
    /// * `normal_map` - Optional tangent-space normal map.
    /// * `roughness`  - Roughness in [0, 1].
    /// * `eta_i`      - Index of refraction on the side of the normal.
    /// * `eta_t`      - Index of refraction on the opposite side.
    pub fn with_textures(
        color: ArcTexture<Spectrum>,
        normal_map: Option<ArcTexture<Spectrum>>,
        roughness: Float,
        eta_i: Float,
        eta_t: Float,
    ) -> Self {
        Self::from_base(BSDFBase::new(color, normal_map), roughness, eta_i, eta_t)
    }

    /// Create a new `RoughDielectric` with the color loaded from an image file.
    ///
    /// * `path`      - Path to the image file.
    /// * `roughness` - Roughness in [0, 1].
    /// * `eta_i`     - Index of refraction on the side of the normal.
    /// * `eta_t`     - Index of refraction on the opposite side.
    pub fn from_file(path: &str, roughness: Float, eta_i: Float, eta_t: Float) -> Result<Self, String> {
        Ok(Self::from_base(BSDFBase::from_file(path)?, roughness, eta_i, eta_t))
    }

    fn from_base(base: BSDFBase, roughness: Float, eta_i: Float, eta_t: Float) -> Self {
        debug!(
            "RoughDielectric {{ roughness: {}, eta_i: {}, eta_t: {} }}",
            roughness, eta_i, eta_t
        );
        Self {
            base,
            roughness: TextureSlot::new(ConstantTexture::arc(roughness)),
            eta_i,
            eta_t: AtomicFloat::new(eta_t),
        }
    }

    /// Returns the scattering types the BSDF can produce.
    pub fn get_type(&self) -> BxDFType {
        BxDFType::REFLECTION | BxDFType::TRANSMISSION | BxDFType::GLOSSY
    }

    /// Returns the base color and normal map state.
    pub fn base(&self) -> &BSDFBase {
        &self.base
    }

    /// Returns the index of refraction on the side of the normal.
    pub fn eta_i(&self) -> Float {
        self.eta_i
    }

    /// Returns the index of refraction on the opposite side.
    pub fn eta_t(&self) -> Float {
        self.eta_t.load(Ordering::Acquire)
    }

    /// Sets the index of refraction on the opposite side.
    ///
    /// * `eta_t` - The index of refraction.
    pub fn set_eta_t(&self, eta_t: Float) {
        self.eta_t.store(eta_t, Ordering::Release);
    }

    /// Returns the roughness texture.
    pub fn roughness_texture(&self) -> ArcTexture<Float> {
        self.roughness.get()
    }

    /// Replaces the roughness texture and returns the previous one.
    ///
    /// * `roughness` - The new texture.
    pub fn set_roughness_texture(&self, roughness: ArcTexture<Float>) -> ArcTexture<Float> {
        self.roughness.replace(roughness)
    }

    fn context(&self, si: &SurfaceInteraction) -> Context {
        let roughness = self.roughness.evaluate(si, TextureFilter::Linear);
        Context {
            color: self.base.color(si),
            frame: self.base.shading_frame(si),
            distrib: TrowbridgeReitzDistribution::from_roughness(roughness),
            eta_i: self.eta_i,
            eta_t: self.eta_t(),
        }
    }

    /// Returns the value of the BSDF for a pair of world space directions.
    ///
    /// * `wo`    - Outgoing direction.
    /// * `wi`    - Incident direction.
    /// * `si`    - Surface interaction.
    /// * `types` - Requested scattering types.
    pub fn evaluate(&self, wo: &Vector3f, wi: &Vector3f, si: &SurfaceInteraction, types: BxDFType) -> Spectrum {
        let ctx = self.context(si);
        let wo = ctx.frame.world_to_local(wo);
        let wi = ctx.frame.world_to_local(wi);

        let value = evaluate_local(&ctx, &wo, &wi, types);
        if value == 0.0 {
            Spectrum::ZERO
        } else {
            ctx.color * value
        }
    }

    /// Returns the solid angle density with which `sample()` produces `wi`.
    ///
    /// * `wo`    - Outgoing direction.
    /// * `wi`    - Incident direction.
    /// * `si`    - Surface interaction.
    /// * `types` - Requested scattering types.
    pub fn density(&self, wo: &Vector3f, wi: &Vector3f, si: &SurfaceInteraction, types: BxDFType) -> Float {
        let ctx = self.context(si);
        let wo = ctx.frame.world_to_local(wo);
        let wi = ctx.frame.world_to_local(wi);

        density_local(&ctx, &wo, &wi, types)
    }

    /// Samples an incident direction by drawing a visible microfacet normal
    /// and then reflecting or refracting about it. Returns `None` when the
    /// sampled direction is invalid.
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
        let sample_reflect = types.requests_glossy(BxDFType::REFLECTION);
        let sample_refract = types.requests_glossy(BxDFType::TRANSMISSION);
        if !sample_reflect && !sample_refract {
            return None;
        }

        let ctx = self.context(si);
        let wo = ctx.frame.world_to_local(wo);
        let cos_o = cos_theta(&wo);
        if cos_o == 0.0 || cos_o.is_nan() {
            return None;
        }

        let wh = ctx.distrib.sample_wh(&(wo * sign(cos_o)), &u.u);
        let wh = wh * sign(cos_theta(&wh));
        if wh.is_zero() {
            return None;
        }

        let f = fr_dielectric(wo.dot(&wh), ctx.eta_i, ctx.eta_t);
        let choose_reflect = if sample_reflect && sample_refract {
            u.u_lobe < f
        } else {
            sample_reflect
        };

        let (wi, sampled_type) = if choose_reflect {
            let wi = reflect(&wo, &wh);
            if !same_hemisphere(&wo, &wi) {
                return None;
            }
            (wi, REFLECT_SCATTER)
        } else {
            let (eta_o, eta_i) = oriented_etas(&ctx, cos_o > 0.0);
            let n = if wo.dot(&wh) < 0.0 { -wh } else { wh };
            let wi = refract(&wo, &n, eta_o / eta_i)?;
            if wi.z * cos_o >= 0.0 {
                return None;
            }
            (wi, REFRACT_SCATTER)
        };

        let pdf = density_local(&ctx, &wo, &wi, types);
        if !(pdf > 0.0) {
            return None;
        }

        let value = evaluate_local(&ctx, &wo, &wi, types);
        let f = if value == 0.0 {
            Spectrum::ZERO
        } else {
            ctx.color * value
        };
        Some(BxDFSample::new(f, pdf, ctx.frame.local_to_world(&wi), sampled_type))
    }

    /// Returns the number of editable parameters.
    pub fn get_parameter_count(&self) -> usize {
        BASE_PARAMETER_TABLE.count() + ROUGH_DIELECTRIC_PARAMETER_TABLE.count()
    }

    /// Returns the name of the parameter at `idx`. Base parameters come first.
    ///
    /// * `idx` - Parameter index.
    pub fn get_parameter_name(&self, idx: usize) -> Option<&'static str> {
        let n_base = BASE_PARAMETER_TABLE.count();
        if idx < n_base {
            BASE_PARAMETER_TABLE.name(idx)
        } else {
            ROUGH_DIELECTRIC_PARAMETER_TABLE.name(idx - n_base)
        }
    }

    /// Reads a named parameter.
    ///
    /// * `name` - Parameter name.
    pub fn get_parameter(&self, name: &str) -> Option<Parameter> {
        BASE_PARAMETER_TABLE
            .get(&self.base, name)
            .or_else(|| ROUGH_DIELECTRIC_PARAMETER_TABLE.get(self, name))
    }

    /// Writes a named parameter.
    ///
    /// * `name`  - Parameter name.
    /// * `value` - The new value.
    pub fn set_parameter(&self, name: &str, value: &ParameterValue) -> Result<(), String> {
        if BASE_PARAMETER_TABLE.contains(name) {
            BASE_PARAMETER_TABLE.set(&self.base, name, value)
        } else {
            ROUGH_DIELECTRIC_PARAMETER_TABLE.set(self, name, value)
        }
    }
}

impl Default for RoughDielectric {
    /// Returns a white interface between air and glass.
    fn default() -> Self {
        Self::new(Spectrum::ONE, DEFAULT_ROUGHNESS, 1.0, 1.5)
    }
}

/// Returns the indices of refraction on the side of `wo` and on the side of
/// `wi` for a refracted pair.
///
/// * `ctx`      - Query state.
/// * `entering` - True if `wo` is on the side of the normal.
#[inline]
fn oriented_etas(ctx: &Context, entering: bool) -> (Float, Float) {
    if entering {
        (ctx.eta_i, ctx.eta_t)
    } else {
        (ctx.eta_t, ctx.eta_i)
    }
}

/// Classifies a local direction pair and computes its microfacet normal.
/// Returns `None` when the pair cannot be produced by the requested lobes.
///
/// * `ctx`   - Query state.
/// * `wo`    - Outgoing direction.
/// * `wi`    - Incident direction.
/// * `types` - Requested scattering types.
fn half_vector(ctx: &Context, wo: &Vector3f, wi: &Vector3f, types: BxDFType) -> Option<HalfVector> {
    let cos_o = cos_theta(wo);
    let cos_i = cos_theta(wi);
    let fac = cos_o * cos_i;
    if fac == 0.0 || fac.is_nan() {
        return None;
    }

    let reflect = fac > 0.0;
    let (eta_o, eta_i) = oriented_etas(ctx, cos_o > 0.0);

    let wh = if reflect {
        if !types.requests_glossy(BxDFType::REFLECTION) {
            return None;
        }
        *wo + *wi
    } else {
        if !types.requests_glossy(BxDFType::TRANSMISSION) {
            return None;
        }
        -(eta_o * *wo + eta_i * *wi)
    };
    if wh.is_zero() {
        return None;
    }

    let wh = wh.normalize();
    let wh = wh * sign(cos_theta(&wh));
    if wh.is_zero() {
        return None;
    }

    // A refracted direction always leaves on the far side of the microfacet.
    if !reflect && wo.dot(&wh) * wi.dot(&wh) > 0.0 {
        return None;
    }

    Some(HalfVector {
        wh,
        reflect,
        eta_o,
        eta_i,
    })
}

/// Returns the scalar part of the BSDF for local directions.
///
/// * `ctx`   - Query state.
/// * `wo`    - Outgoing direction.
/// * `wi`    - Incident direction.
/// * `types` - Requested scattering types.
fn evaluate_local(ctx: &Context, wo: &Vector3f, wi: &Vector3f, types: BxDFType) -> Float {
    let h = match half_vector(ctx, wo, wi, types) {
        Some(h) => h,
        None => return 0.0,
    };

    let d = ctx.distrib.d(&h.wh);
    if d == 0.0 {
        return 0.0;
    }

    // Fully shadowed. The cosine product below may also have underflowed.
    let g = ctx.distrib.g(wo, wi, &h.wh);
    if g == 0.0 {
        return 0.0;
    }

    let f = fr_dielectric(wo.dot(&h.wh), ctx.eta_i, ctx.eta_t);
    let cos_o = cos_theta(wo);
    let cos_i = cos_theta(wi);

    let value = if h.reflect {
        abs(f * d * g / (4.0 * cos_i * cos_o))
    } else {
        let o_dot_h = wo.dot(&h.wh);
        let i_dot_h = wi.dot(&h.wh);
        let sqrt_denom = h.eta_o * o_dot_h + h.eta_i * i_dot_h;

        // Radiance is not rescaled for solid angle compression.
        let factor: Float = 1.0;

        let value = (1.0 - f) * d * g * h.eta_i * h.eta_i * o_dot_h * i_dot_h
            / (sqrt_denom * sqrt_denom * cos_o * cos_i);
        abs(value * factor * factor)
    };

    assert!(
        value.is_finite() && value >= 0.0,
        "invalid BSDF value {} for wo = {}, wi = {}",
        value,
        wo,
        wi
    );
    value
}

/// Returns the solid angle density of `wi` for local directions.
///
/// * `ctx`   - Query state.
/// * `wo`    - Outgoing direction.
/// * `wi`    - Incident direction.
/// * `types` - Requested scattering types.
fn density_local(ctx: &Context, wo: &Vector3f, wi: &Vector3f, types: BxDFType) -> Float {
    let h = match half_vector(ctx, wo, wi, types) {
        Some(h) => h,
        None => return 0.0,
    };

    // Change of variables dwh/dwi.
    let dwh_dwi = if h.reflect {
        1.0 / (4.0 * wi.dot(&h.wh))
    } else {
        let o_dot_h = wo.dot(&h.wh);
        let i_dot_h = wi.dot(&h.wh);
        let sqrt_denom = h.eta_o * o_dot_h + h.eta_i * i_dot_h;
        h.eta_i * h.eta_i * i_dot_h / (sqrt_denom * sqrt_denom)
    };

    let mut wh_prob = ctx.distrib.pdf(&(*wo * sign(cos_theta(wo))), &h.wh);
    if types.requests_glossy(BxDFType::REFLECTION) && types.requests_glossy(BxDFType::TRANSMISSION) {
        let f = fr_dielectric(wo.dot(&h.wh), ctx.eta_i, ctx.eta_t);
        wh_prob *= if h.reflect { f } else { 1.0 - f };
    }

    let pdf = abs(wh_prob * dwh_dwi);
    assert!(
        pdf.is_finite(),
        "invalid density {} for wo = {}, wi = {}",
        pdf,
        wo,
        wi
    );
    pdf
}

fn get_roughness(m: &RoughDielectric) -> ParameterValue {
    let texture = m.roughness_texture();
    match (texture.constant_value(), texture.source_path()) {
        (Some(r), _) => ParameterValue::Float(r),
        (None, Some(path)) => ParameterValue::TextureMap(String::from(path)),
        (None, None) => ParameterValue::Float(texture.evaluate(&SurfaceInteraction::default(), TextureFilter::Linear)),
    }
}

fn set_roughness(m: &RoughDielectric, value: &ParameterValue) -> Result<(), String> {
    let texture: ArcTexture<Float> = match value {
        ParameterValue::Float(r) => ConstantTexture::arc(*r),
        ParameterValue::TextureMap(path) => Arc::new(ImageTexture::<Float>::new(
            path,
            UVMapping2D::default(),
            ImageWrap::Repeat,
            false,
        )?),
        other => return Err(format!("Roughness cannot be set from a {} value", other.param_type())),
    };
    m.set_roughness_texture(texture);
    Ok(())
}

fn get_ior(m: &RoughDielectric) -> ParameterValue {
    ParameterValue::Float(m.eta_t())
}

fn set_ior(m: &RoughDielectric, value: &ParameterValue) -> Result<(), String> {
    match value {
        ParameterValue::Float(eta) => {
            m.set_eta_t(*eta);
            Ok(())
        }
        other => Err(format!("IOR cannot be set from a {} value", other.param_type())),
    }
}

static ROUGH_DIELECTRIC_PARAMETERS: [ParameterDescriptor<RoughDielectric>; 2] = [
    ParameterDescriptor {
        name: "Roughness",
        param_type: ParameterType::Float,
        min: 0.01,
        max: 1.0,
        get: get_roughness,
        set: set_roughness,
    },
    ParameterDescriptor {
        name: "IOR",
        param_type: ParameterType::Float,
        min: 1.0 + 1e-4,
        max: 1.8,
        get: get_ior,
        set: set_ior,
    },
];

/// Parameters of `RoughDielectric` after the base parameters.
pub static ROUGH_DIELECTRIC_PARAMETER_TABLE: ParameterTable<RoughDielectric> =
    ParameterTable::new(&ROUGH_DIELECTRIC_PARAMETERS);
