use crate::{
    encoding::{Data, De, Decoder, Encoder, Ser},
    errors::Result,
    from_fn,
};
use half::f16;
use std::{convert::TryFrom, fmt};

/// A float stored as its IEEE-754 bit pattern, so it can be compared, ordered and hashed.
///
/// Ordering goes by width, then by bit pattern; it is total but not numeric.
#[derive(Eq, PartialEq, Ord, PartialOrd, Copy, Clone, Hash, Debug)]
pub enum Float {
    Single(u32),
    Double(u64),
}

use Float::*;

impl Float {
    /// The value widened to `f64`.
    pub fn to_f64(self) -> f64 {
        match self {
            Single(n) => f64::from(f32::from_bits(n)),
            Double(n) => f64::from_bits(n),
        }
    }
}

from_fn!(Float, f32, |f: f32| Single(f.to_bits()));
from_fn!(Float, f64, |f: f64| Double(f.to_bits()));
from_fn!(Float, f16, |f: f16| Single(f.to_f32().to_bits()));

impl TryFrom<Float> for f32 {
    type Error = Float;

    fn try_from(f: Float) -> std::result::Result<Self, Float> {
        match f {
            Single(n) => Ok(f32::from_bits(n)),
            _ => Err(f),
        }
    }
}

impl TryFrom<Float> for f64 {
    type Error = Float;

    fn try_from(f: Float) -> std::result::Result<Self, Float> {
        match f {
            Double(n) => Ok(f64::from_bits(n)),
            _ => Err(f),
        }
    }
}

impl fmt::Display for Float {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Single(n) => write!(f, "{}", f32::from_bits(*n)),
            Double(n) => write!(f, "{}", f64::from_bits(*n)),
        }
    }
}

impl Ser for Float {
    fn ser<E: Encoder + ?Sized>(&self, e: &mut E) -> Result<()> {
        match self {
            Single(n) => e.emit_float(f32::from_bits(*n)),
            Double(n) => e.emit_double(f64::from_bits(*n)),
        }
    }
}

impl De for Float {
    fn de<D: Decoder + ?Sized>(d: &mut D) -> Result<Self> {
        match d.next_data()? {
            Data::Float(f) => Ok(Float::from(f)),
            Data::Double(f) => Ok(Float::from(f)),
            other => Err(crate::encoding::de::mismatch("float", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nan_is_reflexive() {
        let nan = Float::from(std::f64::NAN);
        assert_eq!(nan, nan);
        assert!(f64::try_from(nan).unwrap().is_nan());
    }

    #[test]
    fn widths_stay_apart() {
        assert_ne!(Float::from(1.5f32), Float::from(1.5f64));
        assert_eq!(Float::from(1.5f32).to_f64(), 1.5);
        assert_eq!(Float::from(f16::from_f32(0.5)), Float::from(0.5f32));
        assert_eq!(f32::try_from(Float::from(2.0f64)), Err(Float::from(2.0f64)));
    }
}
