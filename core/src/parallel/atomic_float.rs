//! AtomicFloat

use crate::pbrt::{bits_to_float, float_to_bits, Float};
use std::fmt;
use std::sync::atomic::{AtomicU32, Ordering};

/// Implement atomic floating point value using `AtomicU32`.
pub struct AtomicFloat {
    /// Bit representation of floating point value.
    bits: AtomicU32, // Use AtomicU64 when Float = f64
}

impl AtomicFloat {
    /// Create a new `AtomicFloat`.
    ///
    /// * `v` - The value.
    pub fn new(v: Float) -> Self {
        Self {
            bits: AtomicU32::new(float_to_bits(v)),
        }
    }

    /// Loads the floating point value.
    ///
    /// * `order` - Memory ordering of this operation
    pub fn load(&self, order: Ordering) -> Float {
        bits_to_float(self.bits.load(order))
    }

    /// Stores the floating point value.
    ///
    /// * `v`     - The value.
    /// * `order` - Memory ordering of this operation
    pub fn store(&self, v: Float, order: Ordering) {
        self.bits.store(float_to_bits(v), order);
    }

    /// Stores the floating point value and returns the previous one.
    ///
    /// * `v`     - The value.
    /// * `order` - Memory ordering of this operation
    pub fn swap(&self, v: Float, order: Ordering) -> Float {
        bits_to_float(self.bits.swap(float_to_bits(v), order))
    }
}

impl Default for AtomicFloat {
    /// Returns the "default value" for `AtomicFloat`.
    fn default() -> Self {
        Self::new(0.0)
    }
}

impl Clone for AtomicFloat {
    fn clone(&self) -> Self {
        Self::new(self.load(Ordering::Acquire))
    }
}

impl fmt::Debug for AtomicFloat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AtomicFloat({})", self.load(Ordering::Relaxed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn load_store_swap() {
        let a = AtomicFloat::new(1.5);
        assert_eq!(a.load(Ordering::Acquire), 1.5);
        a.store(-0.25, Ordering::Release);
        assert_eq!(a.swap(2.0, Ordering::AcqRel), -0.25);
        assert_eq!(a.clone().load(Ordering::Acquire), 2.0);
        assert_eq!(AtomicFloat::default().load(Ordering::Acquire), 0.0);
    }

    #[test]
    fn readers_see_whole_values() {
        let a = Arc::new(AtomicFloat::new(1.0));
        let writer = {
            let a = Arc::clone(&a);
            thread::spawn(move || {
                for i in 0..1000 {
                    a.store(if i % 2 == 0 { 1.0 } else { 1.8 }, Ordering::Release);
                }
            })
        };
        for _ in 0..1000 {
            let v = a.load(Ordering::Acquire);
            assert!(v == 1.0 || v == 1.8);
        }
        writer.join().unwrap();
    }
}
