use crate::{float::Float, integer::Integer, vecmap::VecMap, Value};
use bytes::Bytes;
use half::f16;
use num_traits::FromPrimitive;
use std::{
    collections::{BTreeMap, HashMap},
    convert::TryFrom,
    hash::{BuildHasher, Hash},
};

/// A value representable as a [`Value`].
///
/// Conversions follow the wire shapes of [`Ser`](crate::encoding::Ser): encoding
/// `x.to_value()` gives the bytes of `x`, up to the order of map entries.
pub trait ValueRep: Clone + Sized {
    /// Converts value into a [`Value`].
    ///
    /// # Example
    ///
    /// ```
    /// use mpack::rep::*;
    ///
    /// let v_num = 1u8.to_value();
    /// ```
    fn to_value(&self) -> Value { self.clone().into_value() }

    /// Consumes value, converting it into a [`Value`].
    ///
    /// # Example
    ///
    /// ```
    /// use mpack::rep::*;
    ///
    /// let v_num = 1u8.into_value();
    /// ```
    fn into_value(self) -> Value { self.to_value() }

    /// Converts value from a [`Value`].
    ///
    /// # Arguments
    ///
    /// `v: Value` - The value to be converted.
    ///
    /// # Example
    ///
    /// ```
    /// use mpack::rep::*;
    ///
    /// let v = "foo".to_string().into_value();
    ///
    /// assert_eq!(String::from_value(v).unwrap(), "foo");
    /// ```
    fn from_value(v: Value) -> Option<Self>;
}

impl ValueRep for Value {
    fn into_value(self) -> Value { self }

    fn from_value(v: Value) -> Option<Self> { Some(v) }
}

macro_rules! try_from_value_rep {
    ($t:ty) => {
        impl ValueRep for $t {
            fn into_value(self) -> Value { self.into() }

            fn from_value(v: Value) -> Option<Self> { <$t>::try_from(v).ok() }
        }
    };
}

try_from_value_rep!(bool);
try_from_value_rep!(Integer);
try_from_value_rep!(Float);
try_from_value_rep!(Bytes);

macro_rules! int_value_rep {
    ($($t:ty),*) => {
        $(
            impl ValueRep for $t {
                fn into_value(self) -> Value { self.into() }

                fn from_value(v: Value) -> Option<Self> {
                    match Integer::from_value(v)? {
                        Integer::Pos(u) => <$t>::from_u64(u),
                        Integer::Neg(i) => <$t>::from_i64(i),
                    }
                }
            }
        )*
    };
}

int_value_rep!(u8, u16, u32, u64, usize, i8, i16, i32, i64, isize);

impl ValueRep for f32 {
    fn into_value(self) -> Value { self.into() }

    fn from_value(v: Value) -> Option<Self> { f32::try_from(Float::from_value(v)?).ok() }
}

impl ValueRep for f64 {
    fn into_value(self) -> Value { self.into() }

    fn from_value(v: Value) -> Option<Self> { Some(Float::from_value(v)?.to_f64()) }
}

impl ValueRep for f16 {
    fn into_value(self) -> Value { self.into() }

    fn from_value(v: Value) -> Option<Self> {
        let f = f32::from_value(v)?;
        let h = f16::from_f32(f);
        if h.to_f32() == f || f.is_nan() {
            Some(h)
        } else {
            None
        }
    }
}

impl ValueRep for String {
    fn into_value(self) -> Value { Value::Raw(Bytes::from(self.into_bytes())) }

    fn to_value(&self) -> Value { Value::Raw(Bytes::from(self.as_bytes())) }

    fn from_value(v: Value) -> Option<Self> {
        String::from_utf8(Bytes::from_value(v)?.to_vec()).ok()
    }
}

impl ValueRep for () {
    fn into_value(self) -> Value { Value::Nil }

    fn from_value(v: Value) -> Option<()> {
        if v.is_nil() {
            Some(())
        } else {
            None
        }
    }
}

impl<T: ValueRep> ValueRep for Option<T> {
    fn into_value(self) -> Value { self.map_or(Value::Nil, T::into_value) }

    fn to_value(&self) -> Value { self.as_ref().map_or(Value::Nil, T::to_value) }

    fn from_value(v: Value) -> Option<Self> {
        match v {
            Value::Nil => Some(None),
            v => T::from_value(v).map(Some),
        }
    }
}

impl<T: ValueRep> ValueRep for Box<T> {
    fn into_value(self) -> Value { (*self).into_value() }

    fn to_value(&self) -> Value { (**self).to_value() }

    fn from_value(v: Value) -> Option<Self> { T::from_value(v).map(Box::new) }
}

impl<T: ValueRep> ValueRep for Vec<T> {
    fn into_value(self) -> Value { Value::Array(self.into_iter().map(T::into_value).collect()) }

    fn to_value(&self) -> Value { Value::Array(self.iter().map(T::to_value).collect()) }

    fn from_value(v: Value) -> Option<Self> {
        v.into_vec().ok()?.into_iter().map(T::from_value).collect()
    }
}

fn pairs_from_value<K: ValueRep, V: ValueRep>(v: Value) -> Option<Vec<(K, V)>> {
    v.into_vecmap()
        .ok()?
        .into_iter()
        .map(|(k, v)| Some((K::from_value(k)?, V::from_value(v)?)))
        .collect()
}

impl<K: ValueRep + Ord, V: ValueRep> ValueRep for VecMap<K, V> {
    fn into_value(self) -> Value {
        Value::Map(
            self.into_iter()
                .map(|(k, v)| (k.into_value(), v.into_value()))
                .collect(),
        )
    }

    fn to_value(&self) -> Value {
        Value::Map(self.iter().map(|(k, v)| (k.to_value(), v.to_value())).collect())
    }

    fn from_value(v: Value) -> Option<Self> { pairs_from_value(v).map(VecMap::from) }
}

impl<K: ValueRep + Ord, V: ValueRep> ValueRep for BTreeMap<K, V> {
    fn into_value(self) -> Value {
        Value::Map(
            self.into_iter()
                .map(|(k, v)| (k.into_value(), v.into_value()))
                .collect(),
        )
    }

    fn from_value(v: Value) -> Option<Self> { Some(pairs_from_value(v)?.into_iter().collect()) }
}

impl<K, V, S> ValueRep for HashMap<K, V, S>
where
    K: ValueRep + Eq + Hash,
    V: ValueRep,
    S: BuildHasher + Default + Clone,
{
    fn into_value(self) -> Value {
        Value::Map(
            self.into_iter()
                .map(|(k, v)| (k.into_value(), v.into_value()))
                .collect(),
        )
    }

    fn from_value(v: Value) -> Option<Self> { Some(pairs_from_value(v)?.into_iter().collect()) }
}

macro_rules! tuple_value_rep {
    ($len:expr => $($name:ident . $idx:tt),+) => {
        impl<$($name: ValueRep),+> ValueRep for ($($name,)+) {
            fn into_value(self) -> Value { Value::Array(vec![$(self.$idx.into_value()),+]) }

            fn from_value(v: Value) -> Option<Self> {
                let arr = v.into_vec().ok()?;
                if arr.len() != $len {
                    return None;
                }
                let mut iter = arr.into_iter();
                Some(($($name::from_value(iter.next()?)?,)+))
            }
        }
    };
}

tuple_value_rep!(1 => A.0);
tuple_value_rep!(2 => A.0, B.1);
tuple_value_rep!(3 => A.0, B.1, C.2);
tuple_value_rep!(4 => A.0, B.1, C.2, D.3);
tuple_value_rep!(5 => A.0, B.1, C.2, D.3, E.4);
tuple_value_rep!(6 => A.0, B.1, C.2, D.3, E.4, F.5);
