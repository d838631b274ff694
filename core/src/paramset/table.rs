//! Parameter Descriptor Tables

use super::*;

/// Describes one named parameter of `T` along with how to read and write it.
pub struct ParameterDescriptor<T: 'static> {
    /// Parameter name.
    pub name: &'static str,

    /// Value type the parameter accepts.
    pub param_type: ParameterType,

    /// Lower bound for scalar values.
    pub min: Float,

    /// Upper bound for scalar values.
    pub max: Float,

    /// Reads the current value.
    pub get: fn(&T) -> ParameterValue,

    /// Writes a new value. The value has already been checked with
    /// `accepts()` and scalars are clamped to [min, max].
    pub set: fn(&T, &ParameterValue) -> Result<(), String>,
}

impl<T: 'static> ParameterDescriptor<T> {
    /// Returns true if the parameter can be set from a value of the given
    /// type. Scalar and color parameters may also be backed by a texture map.
    ///
    /// * `param_type` - The value type.
    pub fn accepts(&self, param_type: ParameterType) -> bool {
        param_type == self.param_type
            || (param_type == ParameterType::TextureMap
                && matches!(self.param_type, ParameterType::Float | ParameterType::Color))
    }
}

/// A static table of parameter descriptors for `T`.
pub struct ParameterTable<T: 'static> {
    descriptors: &'static [ParameterDescriptor<T>],
}

impl<T: 'static> ParameterTable<T> {
    /// Create a new `ParameterTable`.
    ///
    /// * `descriptors` - The parameter descriptors.
    pub const fn new(descriptors: &'static [ParameterDescriptor<T>]) -> Self {
        Self { descriptors }
    }

    /// Returns the number of parameters.
    pub fn count(&self) -> usize {
        self.descriptors.len()
    }

    /// Returns the name of the parameter at `idx`.
    ///
    /// * `idx` - Parameter index.
    pub fn name(&self, idx: usize) -> Option<&'static str> {
        self.descriptors.get(idx).map(|d| d.name)
    }

    /// Returns the descriptor for a named parameter.
    ///
    /// * `name` - Parameter name.
    pub fn find(&self, name: &str) -> Option<&'static ParameterDescriptor<T>> {
        self.descriptors.iter().find(|d| d.name == name)
    }

    /// Returns true if the table has a parameter with the given name.
    ///
    /// * `name` - Parameter name.
    pub fn contains(&self, name: &str) -> bool {
        self.find(name).is_some()
    }

    /// Reads a named parameter.
    ///
    /// * `obj`  - The object owning the parameters.
    /// * `name` - Parameter name.
    pub fn get(&self, obj: &T, name: &str) -> Option<Parameter> {
        self.find(name)
            .map(|d| Parameter::new((d.get)(obj), d.min, d.max))
    }

    /// Writes a named parameter. Scalars outside the bounds are clamped.
    ///
    /// * `obj`   - The object owning the parameters.
    /// * `name`  - Parameter name.
    /// * `value` - The new value.
    pub fn set(&self, obj: &T, name: &str, value: &ParameterValue) -> Result<(), String> {
        let d = self.find(name).ok_or_else(|| {
            warn!("Unknown parameter '{}'.", name);
            format!("unknown parameter '{}'", name)
        })?;

        if !d.accepts(value.param_type()) {
            return Err(format!(
                "parameter '{}' expects a {} value, got {}",
                name,
                d.param_type,
                value.param_type()
            ));
        }

        let value = match value {
            ParameterValue::Float(v) if v.is_nan() => {
                return Err(format!("parameter '{}' cannot be NaN", name));
            }
            ParameterValue::Float(v) if *v < d.min || *v > d.max => {
                let clamped = clamp(*v, d.min, d.max);
                warn!(
                    "Parameter '{}' value {} is outside [{}, {}]; using {}.",
                    name, v, d.min, d.max, clamped
                );
                ParameterValue::Float(clamped)
            }
            _ => value.clone(),
        };

        (d.set)(obj, &value)?;
        info!("Parameter '{}' set to {}.", name, value);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parallel::AtomicFloat;
    use float_cmp::*;
    use std::sync::atomic::Ordering;
    use std::sync::Mutex;

    struct Knobs {
        gain: AtomicFloat,
        tint: Mutex<Spectrum>,
    }

    fn get_gain(k: &Knobs) -> ParameterValue {
        ParameterValue::Float(k.gain.load(Ordering::Acquire))
    }

    fn set_gain(k: &Knobs, v: &ParameterValue) -> Result<(), String> {
        match v {
            ParameterValue::Float(g) => {
                k.gain.store(*g, Ordering::Release);
                Ok(())
            }
            _ => Err("expected float".to_string()),
        }
    }

    fn get_tint(k: &Knobs) -> ParameterValue {
        ParameterValue::Color(*k.tint.lock().unwrap())
    }

    fn set_tint(k: &Knobs, v: &ParameterValue) -> Result<(), String> {
        match v {
            ParameterValue::Color(c) => {
                *k.tint.lock().unwrap() = *c;
                Ok(())
            }
            _ => Err("expected color".to_string()),
        }
    }

    static KNOBS: [ParameterDescriptor<Knobs>; 2] = [
        ParameterDescriptor {
            name: "Gain",
            param_type: ParameterType::Float,
            min: 0.5,
            max: 2.0,
            get: get_gain,
            set: set_gain,
        },
        ParameterDescriptor {
            name: "Tint",
            param_type: ParameterType::Color,
            min: 0.0,
            max: 1.0,
            get: get_tint,
            set: set_tint,
        },
    ];

    static TABLE: ParameterTable<Knobs> = ParameterTable::new(&KNOBS);

    fn knobs() -> Knobs {
        Knobs {
            gain: AtomicFloat::new(1.0),
            tint: Mutex::new(Spectrum::ONE),
        }
    }

    #[test]
    fn names_and_lookup() {
        assert_eq!(TABLE.count(), 2);
        assert_eq!(TABLE.name(0), Some("Gain"));
        assert_eq!(TABLE.name(1), Some("Tint"));
        assert_eq!(TABLE.name(2), None);
        assert!(TABLE.contains("Tint"));
        assert!(!TABLE.contains("tint"));

        let k = knobs();
        let p = TABLE.get(&k, "Gain").unwrap();
        assert_eq!(p.value, ParameterValue::Float(1.0));
        assert_eq!(p.min, 0.5);
        assert_eq!(p.max, 2.0);
        assert_eq!(p.param_type(), ParameterType::Float);
        assert!(TABLE.get(&k, "Missing").is_none());
    }

    #[test]
    fn set_clamps_scalars() {
        let k = knobs();
        assert!(TABLE.set(&k, "Gain", &ParameterValue::Float(1.5)).is_ok());
        assert!(approx_eq!(Float, k.gain.load(Ordering::Acquire), 1.5, ulps = 1));

        assert!(TABLE.set(&k, "Gain", &ParameterValue::Float(10.0)).is_ok());
        assert!(approx_eq!(Float, k.gain.load(Ordering::Acquire), 2.0, ulps = 1));

        assert!(TABLE.set(&k, "Gain", &ParameterValue::Float(-1.0)).is_ok());
        assert!(approx_eq!(Float, k.gain.load(Ordering::Acquire), 0.5, ulps = 1));

        assert!(TABLE.set(&k, "Gain", &ParameterValue::Float(Float::NAN)).is_err());
        assert!(approx_eq!(Float, k.gain.load(Ordering::Acquire), 0.5, ulps = 1));
    }

    #[test]
    fn set_rejects_bad_input() {
        let k = knobs();
        assert!(TABLE.set(&k, "Gain", &ParameterValue::Color(Spectrum::ZERO)).is_err());
        assert!(TABLE.set(&k, "Gain", &ParameterValue::NormalMap(String::from("n.png"))).is_err());
        assert!(KNOBS[0].accepts(ParameterType::TextureMap));
        assert!(KNOBS[1].accepts(ParameterType::TextureMap));
        assert!(!KNOBS[1].accepts(ParameterType::NormalMap));

        // The setter itself may refuse a texture.
        assert!(TABLE.set(&k, "Gain", &ParameterValue::TextureMap(String::from("g.png"))).is_err());
        assert!(TABLE
            .set(&k, "Nope", &ParameterValue::Float(1.0))
            .unwrap_err()
            .contains("Nope"));

        // Colors are not clamped against scalar bounds.
        let c = Spectrum::from_rgb(&[2.0, 0.5, 0.0]);
        assert!(TABLE.set(&k, "Tint", &ParameterValue::Color(c)).is_ok());
        assert_eq!(TABLE.get(&k, "Tint").unwrap().value, ParameterValue::Color(c));
    }
}
