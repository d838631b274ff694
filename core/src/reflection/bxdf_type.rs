//! BxDF Type

use bitflags::bitflags;

bitflags! {
    /// Stores combinations of reflection models.
    #[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
    pub struct BxDFType: u8 {
        const REFLECTION = 1;
        const TRANSMISSION = 2;
        const DIFFUSE = 4;
        const GLOSSY = 8;
        const SPECULAR = 16;
        const ALL = Self::REFLECTION.bits()
            | Self::TRANSMISSION.bits()
            | Self::DIFFUSE.bits()
            | Self::GLOSSY.bits()
            | Self::SPECULAR.bits();
    }
}

impl BxDFType {
    /// Tests a single type flag and returns whether it is set or not.
    ///
    /// * `other` - BxDFType flag to match.
    pub fn matches(&self, other: Self) -> bool {
        self.intersects(other)
    }

    /// Returns true if a request mask includes the glossy lobe in the given
    /// direction. A lobe only counts as requested when both its direction bit
    /// and `GLOSSY` are present.
    ///
    /// * `direction` - `REFLECTION` or `TRANSMISSION`.
    pub fn requests_glossy(&self, direction: Self) -> bool {
        self.contains(direction | Self::GLOSSY)
    }
}
