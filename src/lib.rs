//! # mpack
//!
//! A MessagePack codec with a private extension for arrays whose length is not known up
//! front.
//!
//! Values go out through an [`Encoder`](encoding::Encoder), which writes tag bytes and
//! payloads to any [`Writer`](encoding::Writer): a `Vec<u8>`, a growable
//! [`BufferedMemoryWriter`](encoding::BufferedMemoryWriter) or a
//! [`FileWriter`](encoding::FileWriter). They come back through a
//! [`Decoder`](encoding::Decoder) pulling from a [`Reader`](encoding::Reader).
//!
//! # Usage
//!
//! Anything implementing [`Ser`](encoding::Ser) and [`De`](encoding::De) can be encoded
//! and decoded directly. Both traits can usually be derived:
//!
//! ```
//! use mpack::prelude::*;
//!
//! #[derive(MsgPack, Debug, PartialEq)]
//! /// A silly enum, we shall make an example of it.
//! enum SillyEnum {
//!     Foo,
//!     Bar(u8, String),
//!     Baz { x: i32, y: f32 },
//! }
//!
//! let silly_example = SillyEnum::Bar(1, "hello".to_string());
//!
//! // encode
//! let encoded = encode_full(&silly_example).unwrap();
//!
//! // and then immediately decode, because this is a silly example
//! let decoded: SillyEnum = decode_full(&encoded).unwrap();
//!
//! assert_eq!(silly_example, decoded);
//! ```
//!
//! When the shape of the data is not known in advance, decode into a [`Value`]:
//!
//! ```
//! use mpack::prelude::*;
//!
//! let bytes = [
//!     0x94, 0x01, 0xa2, 0x61, 0x62, 0xc3, 0xcb, 0x40, 0x0c, 0, 0, 0, 0, 0, 0,
//! ];
//!
//! let value: Value = decode_full(&bytes).unwrap();
//! assert_eq!(
//!     value,
//!     Value::from(vec![
//!         Value::from(1u8),
//!         Value::from("ab"),
//!         Value::from(true),
//!         Value::from(3.5f64),
//!     ])
//! );
//!
//! assert_eq!(encode_full(&value).unwrap(), bytes.to_vec());
//! ```
//!
//! # Streaming
//!
//! A decoder that runs out of input does not fail hard. It rolls the reader back to the
//! start of the item and reports [`Error::NeedMoreData`] with the number of bytes the item
//! needs, so the same call can simply be repeated once more bytes have arrived. See
//! [`StreamReader`](encoding::StreamReader).
//!
//! # Wire format
//!
//! Standard MessagePack, big-endian throughout; see [`encoding::constants`] for the tag
//! table. Integers and lengths always use the narrowest form that holds them. The bytes
//! `0xc4` and `0xc5` open and close a length-less array when the `extensions` feature is
//! on (the default); without it they decode as reserved tags.

#![warn(
    deprecated_in_future,
    unsafe_code,
    unused_labels,
    keyword_idents,
    missing_copy_implementations,
    missing_debug_implementations,
    macro_use_extern_crate,
    trivial_casts,
    unused_extern_crates,
    unused_import_braces
)]
#![allow(clippy::cast_lossless)]

/// Procedural macro deriving [`Ser`](encoding::Ser) and [`De`](encoding::De).
pub use mpack_derive::MsgPack;

pub mod buffer;
pub mod encoding;
pub mod errors;
pub mod float;
pub mod integer;
pub mod options;
pub mod prelude;
pub mod rep;
mod util;
pub mod vecmap;

pub use errors::{Error, Result};
pub use options::Options;

use bytes::Bytes;
use float::Float;
use half::f16;
use integer::Integer;
use rep::ValueRep;
use std::{collections::HashMap, fmt};
use vecmap::VecMap;

#[derive(Eq, PartialEq, Ord, PartialOrd, Clone, Hash, Debug)]
/// A MessagePack value of any shape.
///
/// # Example
///
/// ```
/// use mpack::prelude::*;
///
/// let b = Value::Bool(true);
///
/// let val = match b {
///     Value::Bool(b) => b,
///     _ => panic!(),
/// };
///
/// assert!(val);
/// ```
pub enum Value {
    /// Nil. Corresponds to [`None`] and `()`.
    Nil,
    Bool(bool),
    Int(Integer),
    Float(Float),
    /// Raw byte string, used for both text and binary data.
    Raw(Bytes),
    Array(Vec<Value>),
    /// Map. Any value can be a key.
    ///
    /// ```
    /// use mpack::prelude::*;
    ///
    /// let vmap = VecMap::from(vec![(Value::from("hello world"), Value::from(1u8))]);
    ///
    /// let map = Value::Map(vmap);
    /// ```
    Map(VecMap<Value, Value>),
    /// Already encoded MessagePack, written out verbatim. Decoding never produces it.
    ///
    /// ```
    /// use mpack::prelude::*;
    ///
    /// let inner = Value::packed(&(1u8, "x")).unwrap();
    /// let outer = Value::from(vec![inner]);
    ///
    /// assert_eq!(encode_full(&outer).unwrap(), vec![0x91, 0x92, 0x01, 0xa1, b'x']);
    /// ```
    Packed(Bytes),
}

use Value::*;

fn wrong_kind(expected: &str, found: &Value) -> Error {
    Error::invalid(format!(
        "expected {}, found {}",
        expected,
        found.kind_name()
    ))
}

impl Value {
    /// A short name for the variant, for messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Nil => "nil",
            Bool(_) => "bool",
            Int(_) => "integer",
            Value::Float(_) => "float",
            Raw(_) => "raw",
            Array(_) => "array",
            Map(_) => "map",
            Packed(_) => "packed",
        }
    }

    /// Encodes `t` now and wraps the bytes, to be spliced into a larger value later.
    ///
    /// # Arguments
    ///
    /// * `t` - The value to be encoded.
    pub fn packed<T: encoding::Ser + ?Sized>(t: &T) -> Result<Value> {
        encoding::encode_full(t).map(|v| Packed(Bytes::from(v)))
    }

    /// Converts a bytestring literal to a [`Value::Raw`].
    ///
    /// # Example
    ///
    /// ```
    /// use mpack::Value;
    ///
    /// let raw = Value::from_static(b"this is an example");
    /// ```
    pub fn from_static(bytes: &'static [u8]) -> Value { Raw(Bytes::from_static(bytes)) }

    /// Indicates whether a value is [`Value::Nil`].
    ///
    /// # Example
    ///
    /// ```
    /// use mpack::Value::Nil;
    ///
    /// assert!(Nil.is_nil());
    /// ```
    pub fn is_nil(&self) -> bool {
        match self {
            Nil => true,
            _ => false,
        }
    }

    /// Returns the boolean in a [`Value::Bool`].
    pub fn to_bool(&self) -> Result<bool> {
        match self {
            Bool(b) => Ok(*b),
            other => Err(wrong_kind("bool", other)),
        }
    }

    /// Returns the integer in a [`Value::Int`].
    ///
    /// # Example
    ///
    /// ```
    /// use mpack::prelude::*;
    ///
    /// let v = Value::from(-3i8);
    ///
    /// assert_eq!(v.to_integer().unwrap().to_i64(), Some(-3));
    /// ```
    pub fn to_integer(&self) -> Result<Integer> {
        match self {
            Int(i) => Ok(*i),
            other => Err(wrong_kind("integer", other)),
        }
    }

    /// Returns a [`Value::Float`] widened to `f64`.
    pub fn to_f64(&self) -> Result<f64> {
        match self {
            Value::Float(f) => Ok(f.to_f64()),
            other => Err(wrong_kind("float", other)),
        }
    }

    /// Returns the bytes of a [`Value::Raw`].
    pub fn to_bytes(&self) -> Result<&Bytes> {
        match self {
            Raw(s) => Ok(s),
            other => Err(wrong_kind("raw", other)),
        }
    }

    /// Returns a [`Value::Raw`] as text.
    ///
    /// # Errors
    ///
    /// Also fails if the bytes are not valid UTF-8.
    pub fn to_str(&self) -> Result<&str> {
        std::str::from_utf8(self.to_bytes()?).map_err(|_| Error::invalid("raw is not valid utf-8"))
    }

    /// Returns the elements of a [`Value::Array`].
    pub fn to_vec(&self) -> Result<&Vec<Value>> {
        match self {
            Array(a) => Ok(a),
            other => Err(wrong_kind("array", other)),
        }
    }

    /// Consumes a [`Value::Array`], returning its elements.
    ///
    /// # Example
    ///
    /// ```
    /// use mpack::prelude::*;
    ///
    /// let v = Value::from(vec![1u8, 2, 3]);
    ///
    /// assert_eq!(v.into_vec().unwrap().len(), 3);
    /// ```
    pub fn into_vec(self) -> Result<Vec<Value>> {
        match self {
            Array(a) => Ok(a),
            other => Err(wrong_kind("array", &other)),
        }
    }

    /// Returns the pairs of a [`Value::Map`].
    pub fn to_vecmap(&self) -> Result<&VecMap<Value, Value>> {
        match self {
            Map(m) => Ok(m),
            other => Err(wrong_kind("map", other)),
        }
    }

    /// Consumes a [`Value::Map`], returning its pairs.
    pub fn into_vecmap(self) -> Result<VecMap<Value, Value>> {
        match self {
            Map(m) => Ok(m),
            other => Err(wrong_kind("map", &other)),
        }
    }

    /// Consumes a [`Value::Map`], collecting its pairs into a [`HashMap`].
    pub fn into_map(self) -> Result<HashMap<Value, Value>> {
        Ok(self.into_vecmap()?.into_hashmap())
    }

    /// Consumes a value, converting it to a value of type `T`.
    ///
    /// # Example
    ///
    /// ```
    /// use mpack::prelude::*;
    ///
    /// let num: u8 = Value::from(1u8).into_rep().unwrap();
    ///
    /// assert_eq!(num, 1);
    /// ```
    pub fn into_rep<T: ValueRep>(self) -> Result<T> {
        let kind = self.kind_name();
        T::from_value(self).ok_or_else(|| {
            Error::invalid(format!(
                "{} does not convert to {}",
                kind,
                std::any::type_name::<T>()
            ))
        })
    }
}

fn fmt_bytes(bytes: &Bytes) -> String {
    match std::str::from_utf8(bytes) {
        Ok(s) => format!("{:?}", s),
        Err(_) => {
            let mut bytes_string: String = "b\"".to_owned();
            bytes
                .iter()
                .for_each(|c| bytes_string.push_str(&format!("{:02x}", c)));
            bytes_string.push('"');

            bytes_string
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Nil => write!(f, "nil"),
            Bool(b) => write!(f, "{}", b),
            Int(i) => write!(f, "{}", i),
            Value::Float(x) => write!(f, "{}", x),
            Raw(bytes) => write!(f, "{}", fmt_bytes(bytes)),
            Packed(bytes) => {
                write!(f, "packed(")?;
                for c in bytes.iter() {
                    write!(f, "{:02x}", c)?;
                }
                write!(f, ")")
            }
            Array(a) => {
                write!(f, "[")?;
                for (i, v) in a.iter().enumerate() {
                    if i != 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", v)?;
                }
                write!(f, "]")
            }
            Map(m) => {
                write!(f, "{{")?;
                for (i, (k, v)) in m.iter().enumerate() {
                    if i != 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}: {}", k, v)?;
                }
                write!(f, "}}")
            }
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Value { Raw(Bytes::from(s)) }
}

impl From<String> for Value {
    fn from(s: String) -> Value { Raw(Bytes::from(s)) }
}

impl From<()> for Value {
    fn from(_: ()) -> Value { Nil }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(v: Vec<T>) -> Value { Array(v.into_iter().map(T::into).collect()) }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(o: Option<T>) -> Value { o.map_or(Nil, T::into) }
}

from_fn!(Value, bool, Bool);
try_from_ctor!(Value, bool, Bool);

from_fn!(Value, Integer, Int);
try_from_ctor!(Value, Integer, Int);

from_fn!(Value, Float, Value::Float);
try_from_ctor!(Value, Float, Value::Float);

from_fn!(Value, Bytes, Raw);
try_from_ctor!(Value, Bytes, Raw);

from_fn!(Value, VecMap<Value, Value>, Map);
try_from_ctor!(Value, Vec<Value>, Array);
try_from_ctor!(Value, VecMap<Value, Value>, Map);

// Integers
compose_from!(Value, Integer, u8);
compose_from!(Value, Integer, u16);
compose_from!(Value, Integer, u32);
compose_from!(Value, Integer, u64);
compose_from!(Value, Integer, usize);
compose_from!(Value, Integer, i8);
compose_from!(Value, Integer, i16);
compose_from!(Value, Integer, i32);
compose_from!(Value, Integer, i64);
compose_from!(Value, Integer, isize);

// Floats
compose_from!(Value, Float, f32);
compose_from!(Value, Float, f64);
compose_from!(Value, Float, f16);
