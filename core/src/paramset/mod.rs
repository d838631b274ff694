//! Parameter Sets

use crate::pbrt::*;
use crate::spectrum::*;
use std::fmt;

mod table;

// Re-export
pub use table::*;

/// Type tag of an editable parameter.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ParameterType {
    /// A scalar.
    Float,

    /// An RGB color.
    Color,

    /// A color texture loaded from an image file.
    TextureMap,

    /// A tangent-space normal map loaded from an image file.
    NormalMap,
}

impl fmt::Display for ParameterType {
    /// Formats the value using the given formatter.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Float => write!(f, "float"),
            Self::Color => write!(f, "color"),
            Self::TextureMap => write!(f, "texture map"),
            Self::NormalMap => write!(f, "normal map"),
        }
    }
}

/// Value of an editable parameter.
#[derive(Clone, Debug, PartialEq)]
pub enum ParameterValue {
    /// A scalar.
    Float(Float),

    /// An RGB color.
    Color(Spectrum),

    /// Path to a color texture image.
    TextureMap(String),

    /// Path to a normal map image.
    NormalMap(String),
}

impl ParameterValue {
    /// Returns the type tag of the value.
    pub fn param_type(&self) -> ParameterType {
        match self {
            Self::Float(_) => ParameterType::Float,
            Self::Color(_) => ParameterType::Color,
            Self::TextureMap(_) => ParameterType::TextureMap,
            Self::NormalMap(_) => ParameterType::NormalMap,
        }
    }
}

impl fmt::Display for ParameterValue {
    /// Formats the value using the given formatter.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Float(v) => write!(f, "{}", v),
            Self::Color(c) => write!(f, "{}", c),
            Self::TextureMap(p) | Self::NormalMap(p) => write!(f, "'{}'", p),
        }
    }
}

/// A parameter as seen by an editor.
#[derive(Clone, Debug, PartialEq)]
pub struct Parameter {
    /// Current value.
    pub value: ParameterValue,

    /// Lower bound for scalar values.
    pub min: Float,

    /// Upper bound for scalar values.
    pub max: Float,
}

impl Parameter {
    /// Create a new `Parameter`.
    ///
    /// * `value` - Current value.
    /// * `min`   - Lower bound for scalar values.
    /// * `max`   - Upper bound for scalar values.
    pub fn new(value: ParameterValue, min: Float, max: Float) -> Self {
        Self { value, min, max }
    }

    /// Returns the type tag of the value.
    pub fn param_type(&self) -> ParameterType {
        self.value.param_type()
    }
}

impl fmt::Display for Parameter {
    /// Formats the value using the given formatter.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}, {}]", self.value, self.min, self.max)
    }
}
