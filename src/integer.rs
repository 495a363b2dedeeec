use crate::{
    encoding::{Data, De, Decoder, Encoder, Ser},
    errors::Result,
    from_fn,
};
use std::{
    cmp::Ordering,
    convert::TryFrom,
    fmt,
    hash::{Hash, Hasher},
};

/// An integer as it appears on the wire: any `u64` or any `i64`.
///
/// Non-negative values are always `Pos`; `Neg` is for negative values only. Every
/// constructor here keeps that invariant, and comparison, ordering and hashing go by the
/// numeric value, so a hand-built `Neg(5)` still equals `Pos(5)`.
#[derive(Copy, Clone, Debug)]
pub enum Integer {
    Pos(u64),
    Neg(i64),
}

use Integer::*;

impl Integer {
    fn wide(self) -> i128 {
        match self {
            Pos(u) => i128::from(u),
            Neg(i) => i128::from(i),
        }
    }

    /// Indicates whether the value is below zero.
    pub fn is_negative(self) -> bool { self.wide() < 0 }

    /// The value as a `u64`, if it is non-negative.
    pub fn to_u64(self) -> Option<u64> {
        match self {
            Pos(u) => Some(u),
            Neg(i) if i >= 0 => Some(i as u64),
            Neg(_) => None,
        }
    }

    /// The value as an `i64`, if it fits.
    pub fn to_i64(self) -> Option<i64> {
        match self {
            Pos(u) if u <= i64::max_value() as u64 => Some(u as i64),
            Pos(_) => None,
            Neg(i) => Some(i),
        }
    }
}

from_fn!(Integer, u64, Pos);
from_fn!(Integer, i64, |i: i64| if i >= 0 { Pos(i as u64) } else { Neg(i) });
from_fn!(Integer, u8, |u| Pos(u64::from(u)));
from_fn!(Integer, u16, |u| Pos(u64::from(u)));
from_fn!(Integer, u32, |u| Pos(u64::from(u)));
from_fn!(Integer, usize, |u: usize| Pos(u as u64));
from_fn!(Integer, i8, |i| Integer::from(i64::from(i)));
from_fn!(Integer, i16, |i| Integer::from(i64::from(i)));
from_fn!(Integer, i32, |i| Integer::from(i64::from(i)));
from_fn!(Integer, isize, |i: isize| Integer::from(i as i64));

impl TryFrom<Integer> for u64 {
    type Error = Integer;

    fn try_from(i: Integer) -> std::result::Result<Self, Integer> { i.to_u64().ok_or(i) }
}

impl TryFrom<Integer> for i64 {
    type Error = Integer;

    fn try_from(i: Integer) -> std::result::Result<Self, Integer> { i.to_i64().ok_or(i) }
}

impl PartialEq for Integer {
    fn eq(&self, other: &Integer) -> bool { self.wide() == other.wide() }
}

impl Eq for Integer {}

impl PartialOrd for Integer {
    fn partial_cmp(&self, other: &Integer) -> Option<Ordering> { Some(self.cmp(other)) }
}

impl Ord for Integer {
    fn cmp(&self, other: &Integer) -> Ordering { self.wide().cmp(&other.wide()) }
}

impl Hash for Integer {
    fn hash<H: Hasher>(&self, state: &mut H) { self.wide().hash(state) }
}

impl fmt::Display for Integer {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Pos(u) => write!(f, "{}", u),
            Neg(i) => write!(f, "{}", i),
        }
    }
}

impl Ser for Integer {
    fn ser<E: Encoder + ?Sized>(&self, e: &mut E) -> Result<()> {
        match self.to_u64() {
            Some(u) => e.emit_uint(u),
            None => e.emit_int(self.wide() as i64),
        }
    }
}

impl De for Integer {
    fn de<D: Decoder + ?Sized>(d: &mut D) -> Result<Self> {
        match d.next_data()? {
            Data::Uint(u) => Ok(Pos(u)),
            Data::Int(i) => Ok(Integer::from(i)),
            other => Err(crate::encoding::de::mismatch("integer", other)),
        }
    }
}
