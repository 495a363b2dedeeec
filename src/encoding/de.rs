use super::{constants::*, reader::Reader};
use crate::errors::{Error, Result};
use bytes::Bytes;
use half::f16;
use num_traits::FromPrimitive;
use std::any::type_name;
use tracing::trace;

/// One decoded item header.
///
/// Containers carry their element (or pair) count and raws their body length; the
/// contents follow in the input. A `Raw(len)` is only returned once `len` body bytes are
/// readable.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Data {
    Uint(u64),
    Int(i64),
    Float(f32),
    Double(f64),
    Nil,
    Bool(bool),
    /// Counted array with this many elements.
    Array(u32),
    /// Map with this many key-value pairs.
    Map(u32),
    /// Raw byte string of this length.
    Raw(u32),
    /// Start of a length-less array.
    ArrayBegin,
    /// End of the innermost length-less array.
    ArrayEnd,
    /// A tag this format revision leaves unassigned.
    Reserved(u8),
    /// A tag outside every assigned and reserved range. The current tag table leaves no
    /// such byte, so [`Decoder::read_next`] does not produce it.
    Invalid(u8),
    /// The input ends inside this item, which needs this many bytes counted from its
    /// first one. Nothing was consumed.
    NeedMoreData(usize),
}

/// The variant of a [`Data`], without its payload.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Kind {
    Uint,
    Int,
    Float,
    Double,
    Nil,
    Bool,
    Array,
    Map,
    Raw,
    ArrayBegin,
    ArrayEnd,
    Reserved,
    Invalid,
    NeedMoreData,
}

impl Data {
    pub fn kind(&self) -> Kind {
        match self {
            Data::Uint(_) => Kind::Uint,
            Data::Int(_) => Kind::Int,
            Data::Float(_) => Kind::Float,
            Data::Double(_) => Kind::Double,
            Data::Nil => Kind::Nil,
            Data::Bool(_) => Kind::Bool,
            Data::Array(_) => Kind::Array,
            Data::Map(_) => Kind::Map,
            Data::Raw(_) => Kind::Raw,
            Data::ArrayBegin => Kind::ArrayBegin,
            Data::ArrayEnd => Kind::ArrayEnd,
            Data::Reserved(_) => Kind::Reserved,
            Data::Invalid(_) => Kind::Invalid,
            Data::NeedMoreData(_) => Kind::NeedMoreData,
        }
    }
}

/// The error for an item of the wrong kind.
pub(crate) fn mismatch(expected: &str, found: Data) -> Error {
    match found {
        Data::Reserved(tag) => Error::invalid(format!(
            "expected {}, found reserved tag {:#04x}",
            expected, tag
        )),
        Data::Invalid(tag) => Error::invalid(format!(
            "expected {}, found invalid tag {:#04x}",
            expected, tag
        )),
        other => Error::invalid(format!("expected {}, found {:?}", expected, other.kind())),
    }
}

// Rolls back the `$consumed` bytes of the current item and bails out when fewer than
// `$wanted` more bytes are available.
macro_rules! need {
    ($r:ident, $consumed:expr, $wanted:expr) => {{
        let consumed: usize = $consumed;
        let wanted: usize = $wanted;
        if !$r.can_read(wanted) {
            $r.unread(consumed)?;
            let needed = consumed.saturating_add(wanted);
            trace!(position = $r.position(), needed, "short read, rolled back");
            return Ok(Data::NeedMoreData(needed));
        }
    }};
}

/// Pulls items from a [`Reader`]. Implemented for every reader.
///
/// [`Decoder::read_next`] never fails on truncated input: it reports
/// [`Data::NeedMoreData`] and leaves the cursor where it was, so the call can be
/// repeated once more input has arrived. The typed getters turn that report into
/// [`Error::NeedMoreData`], again with the cursor rolled back to the start of the item.
///
/// # Example
///
/// ```
/// use mpack::encoding::{Data, Decoder, MemoryReader};
///
/// let mut r = MemoryReader::new(&[0x92, 0x01, 0xa1, b'x']);
///
/// assert_eq!(r.read_next().unwrap(), Data::Array(2));
/// assert_eq!(r.get_uint().unwrap(), 1);
/// assert_eq!(r.get_bytes().unwrap(), "x");
/// ```
pub trait Decoder: Reader {
    /// Consume the next item header.
    ///
    /// # Errors
    ///
    /// Only errors from the underlying reader are returned; truncation is reported as
    /// [`Data::NeedMoreData`].
    fn read_next(&mut self) -> Result<Data>;

    /// Decode the next item header without consuming it.
    fn peek_next(&mut self) -> Result<Data>;

    /// Like [`Decoder::read_next`], but truncation is an [`Error::NeedMoreData`].
    fn next_data(&mut self) -> Result<Data>;

    /// Read an unsigned integer. Signed encodings are accepted when non-negative.
    fn get_uint(&mut self) -> Result<u64>;

    /// Read a signed integer. Unsigned encodings are accepted up to `i64::MAX`.
    fn get_int(&mut self) -> Result<i64>;

    /// Read an unsigned integer and narrow it to `T`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDecode`] if the value does not fit `T`.
    fn get_unsigned<T: FromPrimitive>(&mut self) -> Result<T>;

    /// Read a signed integer and narrow it to `T`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDecode`] if the value does not fit `T`.
    fn get_signed<T: FromPrimitive>(&mut self) -> Result<T>;

    /// Read a float32. Float64 encodings are rejected.
    fn get_f32(&mut self) -> Result<f32>;

    /// Read a float64, or a float32 widened to `f64`.
    fn get_f64(&mut self) -> Result<f64>;

    fn get_bool(&mut self) -> Result<bool>;

    fn get_nil(&mut self) -> Result<()>;

    /// Read a raw header and return the body length. The body is guaranteed readable and
    /// must be consumed next, e.g. by [`Decoder::get_raw_body`].
    fn get_raw(&mut self) -> Result<usize>;

    /// Consume a raw body into `buf`, which must be exactly as long as the body.
    fn get_raw_body(&mut self, buf: &mut [u8]) -> Result<()>;

    /// Read a whole raw item, header and body.
    fn get_bytes(&mut self) -> Result<Bytes>;

    /// Read a counted array header and return its length.
    fn get_array(&mut self) -> Result<usize>;

    /// Read a counted array header of exactly `len` elements.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDecode`] on any other length.
    fn get_array_of(&mut self, len: usize) -> Result<()>;

    /// Read a map header and return its number of pairs.
    fn get_map(&mut self) -> Result<usize>;

    fn get_array_begin(&mut self) -> Result<()>;

    fn get_array_end(&mut self) -> Result<()>;
}

impl<R: Reader + ?Sized> Decoder for R {
    fn read_next(&mut self) -> Result<Data> {
        need!(self, 0, 1);
        let c = self.read_byte()?;

        let data = match c {
            0x00..=POS_FIXNUM_MAX => Data::Uint(u64::from(c)),
            0x80..=0x8f => Data::Map(u32::from(c & MASK_FIXCOL_LEN)),
            0x90..=0x9f => Data::Array(u32::from(c & MASK_FIXCOL_LEN)),
            0xa0..=0xbf => {
                let len = c & MASK_FIXRAW_LEN;
                need!(self, 1, len as usize);
                Data::Raw(u32::from(len))
            }
            NEG_FIXNUM..=0xff => Data::Int(i64::from(c as i8)),
            NIL => Data::Nil,
            FALSE => Data::Bool(false),
            TRUE => Data::Bool(true),
            ARRAY_BEGIN if cfg!(feature = "extensions") => Data::ArrayBegin,
            ARRAY_END if cfg!(feature = "extensions") => Data::ArrayEnd,
            FLOAT32 => {
                need!(self, 1, 4);
                Data::Float(self.read_float()?)
            }
            FLOAT64 => {
                need!(self, 1, 8);
                Data::Double(self.read_double()?)
            }
            UINT8 => {
                need!(self, 1, 1);
                Data::Uint(u64::from(self.read_byte()?))
            }
            UINT16 => {
                need!(self, 1, 2);
                Data::Uint(u64::from(self.read2()?))
            }
            UINT32 => {
                need!(self, 1, 4);
                Data::Uint(u64::from(self.read4()?))
            }
            UINT64 => {
                need!(self, 1, 8);
                Data::Uint(self.read8()?)
            }
            INT8 => {
                need!(self, 1, 1);
                Data::Int(i64::from(self.read_byte()? as i8))
            }
            INT16 => {
                need!(self, 1, 2);
                Data::Int(i64::from(self.read2()? as i16))
            }
            INT32 => {
                need!(self, 1, 4);
                Data::Int(i64::from(self.read4()? as i32))
            }
            INT64 => {
                need!(self, 1, 8);
                Data::Int(self.read8()? as i64)
            }
            RAW16 => {
                need!(self, 1, 2);
                let len = self.read2()?;
                need!(self, 3, len as usize);
                Data::Raw(u32::from(len))
            }
            RAW32 => {
                need!(self, 1, 4);
                let len = self.read4()?;
                need!(self, 5, len as usize);
                Data::Raw(len)
            }
            ARRAY16 => {
                need!(self, 1, 2);
                Data::Array(u32::from(self.read2()?))
            }
            ARRAY32 => {
                need!(self, 1, 4);
                Data::Array(self.read4()?)
            }
            MAP16 => {
                need!(self, 1, 2);
                Data::Map(u32::from(self.read2()?))
            }
            MAP32 => {
                need!(self, 1, 4);
                Data::Map(self.read4()?)
            }
            0xc1 | 0xc4..=0xc9 | 0xd4..=0xd9 => Data::Reserved(c),
        };

        Ok(data)
    }

    fn peek_next(&mut self) -> Result<Data> {
        let start = self.position();
        let data = self.read_next()?;
        self.unread(self.position() - start)?;
        Ok(data)
    }

    #[inline]
    fn next_data(&mut self) -> Result<Data> {
        match self.read_next()? {
            Data::NeedMoreData(n) => Err(Error::NeedMoreData(n)),
            data => Ok(data),
        }
    }

    fn get_uint(&mut self) -> Result<u64> {
        match self.next_data()? {
            Data::Uint(u) => Ok(u),
            Data::Int(i) if i >= 0 => Ok(i as u64),
            Data::Int(i) => Err(Error::invalid(format!(
                "expected unsigned integer, found negative value {}",
                i
            ))),
            other => Err(mismatch("unsigned integer", other)),
        }
    }

    fn get_int(&mut self) -> Result<i64> {
        match self.next_data()? {
            Data::Int(i) => Ok(i),
            Data::Uint(u) if u <= i64::max_value() as u64 => Ok(u as i64),
            Data::Uint(u) => Err(Error::invalid(format!(
                "expected signed integer, unsigned value {} is too large",
                u
            ))),
            other => Err(mismatch("signed integer", other)),
        }
    }

    fn get_unsigned<T: FromPrimitive>(&mut self) -> Result<T> {
        let u = self.get_uint()?;
        T::from_u64(u).ok_or_else(|| {
            Error::invalid(format!("{} is out of range for {}", u, type_name::<T>()))
        })
    }

    fn get_signed<T: FromPrimitive>(&mut self) -> Result<T> {
        let i = self.get_int()?;
        T::from_i64(i).ok_or_else(|| {
            Error::invalid(format!("{} is out of range for {}", i, type_name::<T>()))
        })
    }

    fn get_f32(&mut self) -> Result<f32> {
        match self.next_data()? {
            Data::Float(f) => Ok(f),
            other => Err(mismatch("float32", other)),
        }
    }

    fn get_f64(&mut self) -> Result<f64> {
        match self.next_data()? {
            Data::Double(f) => Ok(f),
            Data::Float(f) => Ok(f64::from(f)),
            other => Err(mismatch("float64", other)),
        }
    }

    fn get_bool(&mut self) -> Result<bool> {
        match self.next_data()? {
            Data::Bool(b) => Ok(b),
            other => Err(mismatch("bool", other)),
        }
    }

    fn get_nil(&mut self) -> Result<()> {
        match self.next_data()? {
            Data::Nil => Ok(()),
            other => Err(mismatch("nil", other)),
        }
    }

    fn get_raw(&mut self) -> Result<usize> {
        match self.next_data()? {
            Data::Raw(len) => Ok(len as usize),
            other => Err(mismatch("raw", other)),
        }
    }

    fn get_raw_body(&mut self, buf: &mut [u8]) -> Result<()> { self.read(buf) }

    fn get_bytes(&mut self) -> Result<Bytes> {
        let len = self.get_raw()?;
        self.read_bytes(len)
    }

    fn get_array(&mut self) -> Result<usize> {
        match self.next_data()? {
            Data::Array(len) => Ok(len as usize),
            other => Err(mismatch("array", other)),
        }
    }

    fn get_array_of(&mut self, len: usize) -> Result<()> {
        let found = self.get_array()?;
        if found == len {
            Ok(())
        } else {
            Err(Error::invalid(format!(
                "wrong arity: expected {} elements, found {}",
                len, found
            )))
        }
    }

    fn get_map(&mut self) -> Result<usize> {
        match self.next_data()? {
            Data::Map(len) => Ok(len as usize),
            other => Err(mismatch("map", other)),
        }
    }

    fn get_array_begin(&mut self) -> Result<()> {
        match self.next_data()? {
            Data::ArrayBegin => Ok(()),
            other => Err(mismatch("array begin marker", other)),
        }
    }

    fn get_array_end(&mut self) -> Result<()> {
        match self.next_data()? {
            Data::ArrayEnd => Ok(()),
            other => Err(mismatch("array end marker", other)),
        }
    }
}

/// Values that can be deserialized.
pub trait De: Sized {
    /// Read a value of type `Self` from a [`Decoder`].
    ///
    /// # Arguments
    ///
    /// * `d` - The [`Decoder`] to be read from.
    fn de<D: Decoder + ?Sized>(d: &mut D) -> Result<Self>;
}

macro_rules! unsigned_de {
    ($($typ:ty),*) => {
        $(impl De for $typ {
            #[inline]
            fn de<D: Decoder + ?Sized>(d: &mut D) -> Result<Self> { d.get_unsigned() }
        })*
    };
}

macro_rules! signed_de {
    ($($typ:ty),*) => {
        $(impl De for $typ {
            #[inline]
            fn de<D: Decoder + ?Sized>(d: &mut D) -> Result<Self> { d.get_signed() }
        })*
    };
}

unsigned_de!(u8, u16, u32, u64, usize);
signed_de!(i8, i16, i32, i64, isize);

impl De for f32 {
    fn de<D: Decoder + ?Sized>(d: &mut D) -> Result<Self> { d.get_f32() }
}

impl De for f64 {
    fn de<D: Decoder + ?Sized>(d: &mut D) -> Result<Self> { d.get_f64() }
}

impl De for f16 {
    fn de<D: Decoder + ?Sized>(d: &mut D) -> Result<Self> {
        let f = d.get_f32()?;
        let h = f16::from_f32(f);
        if h.to_f32() == f || f.is_nan() {
            Ok(h)
        } else {
            Err(Error::invalid(format!("{} is not exactly representable as f16", f)))
        }
    }
}

impl De for bool {
    fn de<D: Decoder + ?Sized>(d: &mut D) -> Result<Self> { d.get_bool() }
}

impl De for () {
    fn de<D: Decoder + ?Sized>(d: &mut D) -> Result<Self> { d.get_nil() }
}

impl De for Bytes {
    fn de<D: Decoder + ?Sized>(d: &mut D) -> Result<Self> { d.get_bytes() }
}

impl De for String {
    fn de<D: Decoder + ?Sized>(d: &mut D) -> Result<Self> {
        let bs = d.get_bytes()?;
        String::from_utf8(bs.to_vec()).map_err(|_| Error::invalid("raw is not valid utf-8"))
    }
}

impl<T: De> De for Box<T> {
    fn de<D: Decoder + ?Sized>(d: &mut D) -> Result<Self> { T::de(d).map(Box::new) }
}

impl<T: De> De for Option<T> {
    fn de<D: Decoder + ?Sized>(d: &mut D) -> Result<Self> {
        match d.peek_next()? {
            Data::NeedMoreData(n) => Err(Error::NeedMoreData(n)),
            Data::Nil => {
                d.get_nil()?;
                Ok(None)
            }
            _ => T::de(d).map(Some),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoding::reader::MemoryReader;

    fn next(bytes: &[u8]) -> Data { MemoryReader::new(bytes).read_next().unwrap() }

    #[test]
    fn dispatch() {
        assert_eq!(next(&[0x00]), Data::Uint(0));
        assert_eq!(next(&[0x7f]), Data::Uint(127));
        assert_eq!(next(&[0x83]), Data::Map(3));
        assert_eq!(next(&[0x9f]), Data::Array(15));
        assert_eq!(next(&[0xa2, b'a', b'b']), Data::Raw(2));
        assert_eq!(next(&[0xe0]), Data::Int(-32));
        assert_eq!(next(&[0xff]), Data::Int(-1));
        assert_eq!(next(&[0xc0]), Data::Nil);
        assert_eq!(next(&[0xc2]), Data::Bool(false));
        assert_eq!(next(&[0xc3]), Data::Bool(true));
        assert_eq!(next(&[0xca, 0x3f, 0xc0, 0, 0]), Data::Float(1.5));
        assert_eq!(
            next(&[0xcb, 0x40, 0x0c, 0, 0, 0, 0, 0, 0]),
            Data::Double(3.5)
        );
        assert_eq!(next(&[0xcc, 0xff]), Data::Uint(255));
        assert_eq!(next(&[0xcd, 0x01, 0x00]), Data::Uint(256));
        assert_eq!(next(&[0xce, 0, 1, 0, 0]), Data::Uint(65536));
        assert_eq!(
            next(&[0xcf, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff]),
            Data::Uint(u64::max_value())
        );
        assert_eq!(next(&[0xd0, 0x80]), Data::Int(-128));
        assert_eq!(next(&[0xd1, 0xff, 0x7f]), Data::Int(-129));
        assert_eq!(next(&[0xd2, 0xff, 0xff, 0x7f, 0xff]), Data::Int(-32769));
        assert_eq!(
            next(&[0xd3, 0x80, 0, 0, 0, 0, 0, 0, 0]),
            Data::Int(i64::min_value())
        );
        assert_eq!(next(&[0xdc, 0x00, 0x10]), Data::Array(16));
        assert_eq!(next(&[0xdd, 0, 1, 0, 0]), Data::Array(65536));
        assert_eq!(next(&[0xde, 0x00, 0x10]), Data::Map(16));
        assert_eq!(next(&[0xdf, 0, 1, 0, 0]), Data::Map(65536));
    }

    #[test]
    #[cfg(feature = "extensions")]
    fn length_less_markers() {
        assert_eq!(next(&[0xc4]), Data::ArrayBegin);
        assert_eq!(next(&[0xc5]), Data::ArrayEnd);
    }

    #[test]
    #[cfg(not(feature = "extensions"))]
    fn markers_are_reserved_without_extensions() {
        assert_eq!(next(&[0xc4]), Data::Reserved(0xc4));
        assert_eq!(next(&[0xc5]), Data::Reserved(0xc5));
    }

    #[test]
    fn reserved_tags() {
        for &tag in &[0xc1, 0xc6, 0xc7, 0xc8, 0xc9, 0xd4, 0xd5, 0xd6, 0xd7, 0xd8, 0xd9] {
            let bytes = [tag, 0, 0, 0];
            let mut r = MemoryReader::new(&bytes);
            assert_eq!(r.read_next().unwrap(), Data::Reserved(tag));
            assert_eq!(r.position(), 1);
        }

        let err = MemoryReader::new(&[0xc1]).get_uint().unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid decode: expected unsigned integer, found reserved tag 0xc1"
        );
    }

    #[test]
    fn short_reads_roll_back() {
        let cases: &[(&[u8], usize)] = &[
            (&[], 1),
            (&[0xcd, 0x01], 3),
            (&[0xcc], 2),
            (&[0xcf, 0, 0, 0], 9),
            (&[0xca], 5),
            (&[0xa3, b'a'], 4),
            (&[0xda, 0x00], 3),
            (&[0xda, 0x00, 0x05, b'a'], 8),
            (&[0xdb, 0, 0, 0, 2, b'x'], 7),
            (&[0xdd, 0, 0], 5),
            (&[0xdf], 5),
        ];

        for &(bytes, needed) in cases {
            let mut r = MemoryReader::new(bytes);
            assert_eq!(r.read_next().unwrap(), Data::NeedMoreData(needed), "{:?}", bytes);
            assert_eq!(r.position(), 0);

            match r.get_uint() {
                Err(Error::NeedMoreData(n)) => assert_eq!(n, needed),
                other => panic!("expected need more data, got {:?}", other),
            }
            assert_eq!(r.position(), 0);
        }
    }

    #[test]
    fn largest_raw_header_needs_saturate() {
        let mut r = MemoryReader::new(&[0xdb, 0xff, 0xff, 0xff, 0xff, b'x']);
        let needed = 5usize.saturating_add(u32::max_value() as usize);
        assert_eq!(r.read_next().unwrap(), Data::NeedMoreData(needed));
        assert_eq!(r.position(), 0);
    }

    #[test]
    fn peek_does_not_consume() {
        let mut r = MemoryReader::new(&[0xcd, 0x01, 0x00, 0xc0]);
        assert_eq!(r.peek_next().unwrap(), Data::Uint(256));
        assert_eq!(r.position(), 0);
        assert_eq!(r.get_uint().unwrap(), 256);
        assert_eq!(r.peek_next().unwrap(), Data::Nil);
        assert_eq!(r.position(), 3);
    }

    #[test]
    fn integer_tag_tolerance() {
        // signed tag, unsigned target
        assert_eq!(MemoryReader::new(&[0xd0, 0x05]).get_uint().unwrap(), 5);
        assert!(MemoryReader::new(&[0xff]).get_uint().is_err());

        // unsigned tag, signed target
        assert_eq!(MemoryReader::new(&[0x05]).get_int().unwrap(), 5);
        let too_big = [0xcf, 0x80, 0, 0, 0, 0, 0, 0, 0];
        assert!(MemoryReader::new(&too_big).get_int().is_err());

        // narrowing
        assert_eq!(u8::de(&mut MemoryReader::new(&[0xcc, 0xff])).unwrap(), 255);
        assert!(u8::de(&mut MemoryReader::new(&[0xcd, 0x01, 0x00])).is_err());
        assert_eq!(i8::de(&mut MemoryReader::new(&[0x7f])).unwrap(), 127);
        assert!(i8::de(&mut MemoryReader::new(&[0xcc, 0x80])).is_err());
        assert_eq!(i16::de(&mut MemoryReader::new(&[0xd0, 0x80])).unwrap(), -128);
    }

    #[test]
    fn floats() {
        let single = [0xca, 0x3f, 0xc0, 0, 0];
        assert_eq!(f32::de(&mut MemoryReader::new(&single)).unwrap(), 1.5);
        assert_eq!(f64::de(&mut MemoryReader::new(&single)).unwrap(), 1.5);
        assert_eq!(
            f16::de(&mut MemoryReader::new(&single)).unwrap(),
            f16::from_f32(1.5)
        );

        let double = [0xcb, 0x40, 0x0c, 0, 0, 0, 0, 0, 0];
        assert!(f32::de(&mut MemoryReader::new(&double)).is_err());

        // 0.1 has no exact f16 form
        let mut tenth = vec![0xca];
        tenth.extend_from_slice(&0.1f32.to_bits().to_be_bytes());
        assert!(f16::de(&mut MemoryReader::new(&tenth)).is_err());
    }

    #[test]
    fn raws() {
        let mut r = MemoryReader::new(&[0xa2, b'h', b'i', 0xa1, 0xff]);
        assert_eq!(String::de(&mut r).unwrap(), "hi");
        assert!(String::de(&mut r).is_err());

        let mut r = MemoryReader::new(&[0xa3, 1, 2, 3]);
        let len = r.get_raw().unwrap();
        let mut body = vec![0; len];
        r.get_raw_body(&mut body).unwrap();
        assert_eq!(body, vec![1, 2, 3]);
        assert!(r.at_end());
    }

    #[test]
    fn options_and_arity() {
        let mut r = MemoryReader::new(&[0xc0, 0x07]);
        assert_eq!(Option::<u8>::de(&mut r).unwrap(), None);
        assert_eq!(Option::<u8>::de(&mut r).unwrap(), Some(7));

        let mut r = MemoryReader::new(&[0x92]);
        match r.get_array_of(3) {
            Err(Error::InvalidDecode(msg)) => assert!(msg.contains("arity")),
            other => panic!("expected arity mismatch, got {:?}", other),
        }
    }
}
