//! BxDF Sample

use super::*;

/// Stores evaluation of BxDF samples.
#[derive(Copy, Clone, Debug)]
pub struct BxDFSample {
    /// The sample value.
    pub f: Spectrum,

    /// The value of the PDF.
    pub pdf: Float,

    /// The sampled inbound direction.
    pub wi: Vector3f,

    /// The type of BxDF that was sampled.
    pub bxdf_type: BxDFType,
}

impl BxDFSample {
    /// Create a new `BxDFSample`.
    ///
    /// * `f`         - The sample value.
    /// * `pdf`       - The value of the PDF.
    /// * `wi`        - The sampled inbound direction.
    /// * `bxdf_type` - The type of BxDF.
    pub fn new(f: Spectrum, pdf: Float, wi: Vector3f, bxdf_type: BxDFType) -> Self {
        Self { f, pdf, wi, bxdf_type }
    }

    /// Returns the importance sampling weight f / pdf.
    pub fn throughput(&self) -> Spectrum {
        if self.pdf > 0.0 {
            self.f / self.pdf
        } else {
            Spectrum::ZERO
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn throughput_divides_by_pdf() {
        let s = BxDFSample::new(
            Spectrum::new(2.0),
            4.0,
            Vector3f::new(0.0, 0.0, 1.0),
            BxDFType::REFLECTION | BxDFType::GLOSSY,
        );
        assert_eq!(s.throughput(), Spectrum::new(0.5));

        let s = BxDFSample::new(Spectrum::ONE, 0.0, Vector3f::ZERO, BxDFType::empty());
        assert!(s.throughput().is_black());
    }
}
