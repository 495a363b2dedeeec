//! [`Ser`] and [`De`] for containers, tuples and length-less streams.
//!
//! Sequences and sets are arrays, maps are maps and tuples are arrays of fixed arity.
//! Everything composes, so a `Vec<HashMap<String, (u8, bool)>>` needs no extra code.
//!
//! A container that runs short partway through leaves the cursor inside it; use
//! [`try_decode`](super::try_decode) to rewind to the start of the whole value.

use super::{de::*, ser::*};
use crate::{
    errors::{Error, Result},
    vecmap::VecMap,
};
use std::{
    collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque},
    hash::{BuildHasher, Hash},
};

// every element takes at least one byte, so never reserve more than what is left
#[inline]
pub(crate) fn prealloc<D: Decoder + ?Sized>(d: &D, len: usize) -> usize { len.min(d.remaining()) }

impl<T: Ser> Ser for [T] {
    fn ser<E: Encoder + ?Sized>(&self, e: &mut E) -> Result<()> {
        e.emit_array(self.len())?;
        for t in self {
            t.ser(e)?;
        }
        Ok(())
    }
}

impl<T: Ser> Ser for Vec<T> {
    fn ser<E: Encoder + ?Sized>(&self, e: &mut E) -> Result<()> { self.as_slice().ser(e) }
}

impl<T: Ser> Ser for VecDeque<T> {
    fn ser<E: Encoder + ?Sized>(&self, e: &mut E) -> Result<()> {
        e.emit_array(self.len())?;
        for t in self {
            t.ser(e)?;
        }
        Ok(())
    }
}

impl<T: Ser> Ser for BTreeSet<T> {
    fn ser<E: Encoder + ?Sized>(&self, e: &mut E) -> Result<()> {
        e.emit_array(self.len())?;
        for t in self {
            t.ser(e)?;
        }
        Ok(())
    }
}

impl<T: Ser, S: BuildHasher> Ser for HashSet<T, S> {
    fn ser<E: Encoder + ?Sized>(&self, e: &mut E) -> Result<()> {
        e.emit_array(self.len())?;
        for t in self {
            t.ser(e)?;
        }
        Ok(())
    }
}

impl<T: De> De for Vec<T> {
    fn de<D: Decoder + ?Sized>(d: &mut D) -> Result<Self> {
        let len = d.get_array()?;
        let mut out = Vec::with_capacity(prealloc(d, len));
        for _ in 0..len {
            out.push(T::de(d)?);
        }
        Ok(out)
    }
}

impl<T: De> De for VecDeque<T> {
    fn de<D: Decoder + ?Sized>(d: &mut D) -> Result<Self> {
        let len = d.get_array()?;
        let mut out = VecDeque::with_capacity(prealloc(d, len));
        for _ in 0..len {
            out.push_back(T::de(d)?);
        }
        Ok(out)
    }
}

impl<T: De + Ord> De for BTreeSet<T> {
    fn de<D: Decoder + ?Sized>(d: &mut D) -> Result<Self> {
        let len = d.get_array()?;
        let mut out = BTreeSet::new();
        for _ in 0..len {
            out.insert(T::de(d)?);
        }
        Ok(out)
    }
}

impl<T: De + Eq + Hash, S: BuildHasher + Default> De for HashSet<T, S> {
    fn de<D: Decoder + ?Sized>(d: &mut D) -> Result<Self> {
        let len = d.get_array()?;
        let mut out = HashSet::with_capacity_and_hasher(prealloc(d, len), S::default());
        for _ in 0..len {
            out.insert(T::de(d)?);
        }
        Ok(out)
    }
}

// map header, then key and value of each pair
macro_rules! map_ser {
    ($self:ident, $e:ident) => {{
        $e.emit_map($self.len())?;
        for (k, v) in $self {
            k.ser($e)?;
            v.ser($e)?;
        }
        Ok(())
    }};
}

impl<K: Ser, V: Ser> Ser for BTreeMap<K, V> {
    fn ser<E: Encoder + ?Sized>(&self, e: &mut E) -> Result<()> { map_ser!(self, e) }
}

impl<K: Ser, V: Ser, S: BuildHasher> Ser for HashMap<K, V, S> {
    fn ser<E: Encoder + ?Sized>(&self, e: &mut E) -> Result<()> { map_ser!(self, e) }
}

impl<K: Ser + Ord, V: Ser> Ser for VecMap<K, V> {
    fn ser<E: Encoder + ?Sized>(&self, e: &mut E) -> Result<()> {
        e.emit_map(self.len())?;
        for (k, v) in self.iter() {
            k.ser(e)?;
            v.ser(e)?;
        }
        Ok(())
    }
}

impl<K: De + Ord, V: De> De for BTreeMap<K, V> {
    fn de<D: Decoder + ?Sized>(d: &mut D) -> Result<Self> {
        let len = d.get_map()?;
        let mut out = BTreeMap::new();
        for _ in 0..len {
            let k = K::de(d)?;
            out.insert(k, V::de(d)?);
        }
        Ok(out)
    }
}

impl<K: De + Eq + Hash, V: De, S: BuildHasher + Default> De for HashMap<K, V, S> {
    fn de<D: Decoder + ?Sized>(d: &mut D) -> Result<Self> {
        let len = d.get_map()?;
        let mut out = HashMap::with_capacity_and_hasher(prealloc(d, len), S::default());
        for _ in 0..len {
            let k = K::de(d)?;
            out.insert(k, V::de(d)?);
        }
        Ok(out)
    }
}

impl<K: De + Ord, V: De> De for VecMap<K, V> {
    fn de<D: Decoder + ?Sized>(d: &mut D) -> Result<Self> {
        let len = d.get_map()?;
        let mut out = VecMap::with_capacity(prealloc(d, len));
        for _ in 0..len {
            let k = K::de(d)?;
            out.insert(k, V::de(d)?);
        }
        Ok(out)
    }
}

macro_rules! tuple_impls {
    ($len:expr, $($typ:ident . $idx:tt),*) => {
        impl<$($typ: Ser),*> Ser for ($($typ,)*) {
            fn ser<Enc: Encoder + ?Sized>(&self, e: &mut Enc) -> Result<()> {
                e.emit_array($len)?;
                $(self.$idx.ser(e)?;)*
                Ok(())
            }
        }

        impl<$($typ: De),*> De for ($($typ,)*) {
            fn de<Dec: Decoder + ?Sized>(d: &mut Dec) -> Result<Self> {
                d.get_array_of($len)?;
                Ok(($($typ::de(d)?,)*))
            }
        }
    };
}

tuple_impls!(1, A.0);
tuple_impls!(2, A.0, B.1);
tuple_impls!(3, A.0, B.1, C.2);
tuple_impls!(4, A.0, B.1, C.2, D.3);
tuple_impls!(5, A.0, B.1, C.2, D.3, E.4);
tuple_impls!(6, A.0, B.1, C.2, D.3, E.4, F.5);
tuple_impls!(7, A.0, B.1, C.2, D.3, E.4, F.5, G.6);
tuple_impls!(8, A.0, B.1, C.2, D.3, E.4, F.5, G.6, H.7);
tuple_impls!(9, A.0, B.1, C.2, D.3, E.4, F.5, G.6, H.7, I.8);
tuple_impls!(10, A.0, B.1, C.2, D.3, E.4, F.5, G.6, H.7, I.8, J.9);
tuple_impls!(11, A.0, B.1, C.2, D.3, E.4, F.5, G.6, H.7, I.8, J.9, K.10);
tuple_impls!(12, A.0, B.1, C.2, D.3, E.4, F.5, G.6, H.7, I.8, J.9, K.10, L.11);

/// Emits `items` as a length-less array: begin marker, each item, end marker.
///
/// # Example
///
/// ```
/// use mpack::encoding::encode_stream;
///
/// let mut out = Vec::new();
/// encode_stream(&mut out, (1u8..=3).map(|i| i * 2)).unwrap();
///
/// assert_eq!(out, vec![0xc4, 0x02, 0x04, 0x06, 0xc5]);
/// ```
pub fn encode_stream<E, I>(e: &mut E, items: I) -> Result<()>
where
    E: Encoder + ?Sized,
    I: IntoIterator,
    I::Item: Ser,
{
    e.emit_array_begin()?;
    for item in items {
        item.ser(e)?;
    }
    e.emit_array_end()
}

/// Reads a length-less array written by [`encode_stream`].
pub fn decode_stream<T: De, D: Decoder + ?Sized>(d: &mut D) -> Result<Vec<T>> {
    d.get_array_begin()?;
    let mut out = Vec::new();
    loop {
        match d.peek_next()? {
            Data::NeedMoreData(n) => return Err(Error::NeedMoreData(n)),
            Data::ArrayEnd => {
                d.get_array_end()?;
                return Ok(out);
            }
            _ => out.push(T::de(d)?),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
/// A sequence that goes over the wire as a length-less array.
pub struct Stream<T>(pub Vec<T>);

impl<T: Ser> Ser for Stream<T> {
    fn ser<E: Encoder + ?Sized>(&self, e: &mut E) -> Result<()> { encode_stream(e, &self.0) }
}

impl<T: De> De for Stream<T> {
    fn de<D: Decoder + ?Sized>(d: &mut D) -> Result<Self> { decode_stream(d).map(Stream) }
}

/// Tuples whose sequences can be written column by column.
pub trait EncodeColumns: Sized {
    /// Emit one array per tuple field, each holding that field of every row.
    fn encode_columns<E: Encoder + ?Sized>(rows: &[Self], e: &mut E) -> Result<()>;
}

/// Tuples that can be rebuilt from the columns [`EncodeColumns`] writes.
pub trait DecodeColumns: Sized {
    /// Read one array per tuple field and zip them back into rows.
    fn decode_columns<D: Decoder + ?Sized>(d: &mut D) -> Result<Vec<Self>>;
}

macro_rules! columns_impl {
    ($($typ:ident . $idx:tt => $col:ident, $item:ident);*) => {
        impl<$($typ: Ser),*> EncodeColumns for ($($typ,)*) {
            fn encode_columns<Enc: Encoder + ?Sized>(rows: &[Self], e: &mut Enc) -> Result<()> {
                $(
                    e.emit_array(rows.len())?;
                    for row in rows {
                        row.$idx.ser(e)?;
                    }
                )*
                Ok(())
            }
        }

        impl<$($typ: De),*> DecodeColumns for ($($typ,)*) {
            fn decode_columns<Dec: Decoder + ?Sized>(d: &mut Dec) -> Result<Vec<Self>> {
                $(let $col = Vec::<$typ>::de(d)?;)*

                let lens = [$($col.len()),*];
                if lens.iter().any(|&len| len != lens[0]) {
                    return Err(Error::invalid(format!(
                        "interleaved columns differ in length: {:?}",
                        lens
                    )));
                }

                let mut out = Vec::with_capacity(lens[0]);
                $(let mut $col = $col.into_iter();)*
                while let ($(Some($item),)*) = ($($col.next(),)*) {
                    out.push(($($item,)*));
                }
                Ok(out)
            }
        }
    };
}

columns_impl!(A.0 => a, ai; B.1 => b, bi);
columns_impl!(A.0 => a, ai; B.1 => b, bi; C.2 => c, ci);
columns_impl!(A.0 => a, ai; B.1 => b, bi; C.2 => c, ci; D.3 => d_, di);
columns_impl!(A.0 => a, ai; B.1 => b, bi; C.2 => c, ci; D.3 => d_, di; E.4 => e_, ei);
columns_impl!(A.0 => a, ai; B.1 => b, bi; C.2 => c, ci; D.3 => d_, di; E.4 => e_, ei; F.5 => f, fi);

/// Encodes rows of tuples column-wise.
///
/// `[(1, "a"), (2, "b"), (3, "c")]` becomes the two arrays `[1, 2, 3]` and
/// `["a", "b", "c"]`, one after the other.
///
/// # Example
///
/// ```
/// use mpack::encoding::encode_interleaved;
///
/// let mut out = Vec::new();
/// encode_interleaved(&mut out, &[(1u8, "a"), (2, "b")]).unwrap();
///
/// assert_eq!(out, vec![0x92, 0x01, 0x02, 0x92, 0xa1, b'a', 0xa1, b'b']);
/// ```
pub fn encode_interleaved<T: EncodeColumns, E: Encoder + ?Sized>(e: &mut E, rows: &[T]) -> Result<()> {
    T::encode_columns(rows, e)
}

/// Decodes rows written by [`encode_interleaved`].
///
/// # Errors
///
/// Returns [`Error::InvalidDecode`] if the columns have different lengths.
pub fn decode_interleaved<T: DecodeColumns, D: Decoder + ?Sized>(d: &mut D) -> Result<Vec<T>> {
    T::decode_columns(d)
}
