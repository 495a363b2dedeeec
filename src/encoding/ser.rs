use super::{constants::*, writer::Writer};
use crate::errors::{Error, Result};
use bytes::Bytes;
use half::f16;

/// Emit operations for MessagePack items. Implemented for every [`Writer`].
///
/// Containers are written as a header followed by their elements, which the caller emits
/// one by one; nothing here checks that the element count matches the header.
pub trait Encoder: Writer {
    /// Emit a `u8`, as a positive fixnum if it fits in 7 bits.
    ///
    /// # Arguments
    ///
    /// * `v: u8` - The value to be emitted.
    fn emit_uint8(&mut self, v: u8) -> Result<()>;
    /// Emit a `u16` with the `0xcd` tag.
    fn emit_uint16(&mut self, v: u16) -> Result<()>;
    /// Emit a `u32` with the `0xce` tag.
    fn emit_uint32(&mut self, v: u32) -> Result<()>;
    /// Emit a `u64` with the `0xcf` tag.
    fn emit_uint64(&mut self, v: u64) -> Result<()>;
    /// Emit an unsigned integer in the narrowest form that holds it.
    ///
    /// # Arguments
    ///
    /// * `v: u64` - The value to be emitted.
    ///
    /// # Example
    ///
    /// ```
    /// use mpack::encoding::Encoder;
    ///
    /// let mut out = Vec::new();
    /// out.emit_uint(0x7f).unwrap();
    /// out.emit_uint(0x100).unwrap();
    ///
    /// assert_eq!(out, vec![0x7f, 0xcd, 0x01, 0x00]);
    /// ```
    fn emit_uint(&mut self, v: u64) -> Result<()>;

    /// Emit an `i8`, as a negative fixnum if it lies in `-32..=-1`.
    ///
    /// # Arguments
    ///
    /// * `v: i8` - The value to be emitted.
    fn emit_int8(&mut self, v: i8) -> Result<()>;
    /// Emit an `i16` with the `0xd1` tag.
    fn emit_int16(&mut self, v: i16) -> Result<()>;
    /// Emit an `i32` with the `0xd2` tag.
    fn emit_int32(&mut self, v: i32) -> Result<()>;
    /// Emit an `i64` with the `0xd3` tag.
    fn emit_int64(&mut self, v: i64) -> Result<()>;
    /// Emit a signed integer in the narrowest signed form that holds it.
    ///
    /// Non-negative values still get a signed tag; use [`Encoder::emit_uint`] for those
    /// when the shortest encoding matters.
    ///
    /// # Arguments
    ///
    /// * `v: i64` - The value to be emitted.
    fn emit_int(&mut self, v: i64) -> Result<()>;

    fn emit_nil(&mut self) -> Result<()>;
    fn emit_true(&mut self) -> Result<()>;
    fn emit_false(&mut self) -> Result<()>;
    fn emit_bool(&mut self, v: bool) -> Result<()>;

    /// Emit an `f32` with the `0xca` tag.
    fn emit_float(&mut self, v: f32) -> Result<()>;
    /// Emit an `f64` with the `0xcb` tag.
    fn emit_double(&mut self, v: f64) -> Result<()>;

    /// Emit a raw byte string: length header, then the body.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedValue`] if the body is longer than `u32::MAX`.
    fn emit_raw(&mut self, raw: &[u8]) -> Result<()>;
    /// Emit an array header for `len` elements.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedValue`] if `len` exceeds `u32::MAX`.
    fn emit_array(&mut self, len: usize) -> Result<()>;
    /// Emit a map header for `len` key-value pairs.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedValue`] if `len` exceeds `u32::MAX`.
    fn emit_map(&mut self, len: usize) -> Result<()>;

    /// Open a length-less array. Elements follow until [`Encoder::emit_array_end`].
    fn emit_array_begin(&mut self) -> Result<()>;
    /// Close the innermost length-less array.
    fn emit_array_end(&mut self) -> Result<()>;

    /// Write already encoded bytes verbatim.
    fn emit_packed(&mut self, packed: &[u8]) -> Result<()>;
}

fn wire_len(len: usize, what: &str) -> Result<u32> {
    if len > u32::max_value() as usize {
        Err(Error::UnsupportedValue(format!(
            "{} of length {} does not fit a 32-bit length",
            what, len
        )))
    } else {
        Ok(len as u32)
    }
}

// fix tag for short lengths, otherwise the 16- or 32-bit form
macro_rules! emit_len {
    ($out:ident, $len:expr, $fix:expr, $fix_max:expr, $tag16:expr, $tag32:expr) => {{
        let len = $len;
        if len <= $fix_max as u32 {
            $out.write_byte($fix | len as u8)
        } else if len <= u32::from(u16::max_value()) {
            $out.write_byte($tag16)?;
            $out.write2(len as u16)
        } else {
            $out.write_byte($tag32)?;
            $out.write4(len)
        }
    }};
}

impl<W: Writer + ?Sized> Encoder for W {
    fn emit_uint8(&mut self, v: u8) -> Result<()> {
        if v > POS_FIXNUM_MAX {
            self.write_byte(UINT8)?;
        }
        self.write_byte(v)
    }

    fn emit_uint16(&mut self, v: u16) -> Result<()> {
        self.write_byte(UINT16)?;
        self.write2(v)
    }

    fn emit_uint32(&mut self, v: u32) -> Result<()> {
        self.write_byte(UINT32)?;
        self.write4(v)
    }

    fn emit_uint64(&mut self, v: u64) -> Result<()> {
        self.write_byte(UINT64)?;
        self.write8(v)
    }

    #[inline]
    fn emit_uint(&mut self, v: u64) -> Result<()> {
        if v <= u64::from(u8::max_value()) {
            self.emit_uint8(v as u8)
        } else if v <= u64::from(u16::max_value()) {
            self.emit_uint16(v as u16)
        } else if v <= u64::from(u32::max_value()) {
            self.emit_uint32(v as u32)
        } else {
            self.emit_uint64(v)
        }
    }

    fn emit_int8(&mut self, v: i8) -> Result<()> {
        if (v as u8) & NEG_FIXNUM != NEG_FIXNUM {
            self.write_byte(INT8)?;
        }
        self.write_byte(v as u8)
    }

    fn emit_int16(&mut self, v: i16) -> Result<()> {
        self.write_byte(INT16)?;
        self.write2(v as u16)
    }

    fn emit_int32(&mut self, v: i32) -> Result<()> {
        self.write_byte(INT32)?;
        self.write4(v as u32)
    }

    fn emit_int64(&mut self, v: i64) -> Result<()> {
        self.write_byte(INT64)?;
        self.write8(v as u64)
    }

    #[inline]
    fn emit_int(&mut self, v: i64) -> Result<()> {
        if v >= i64::from(i8::min_value()) && v <= i64::from(i8::max_value()) {
            self.emit_int8(v as i8)
        } else if v >= i64::from(i16::min_value()) && v <= i64::from(i16::max_value()) {
            self.emit_int16(v as i16)
        } else if v >= i64::from(i32::min_value()) && v <= i64::from(i32::max_value()) {
            self.emit_int32(v as i32)
        } else {
            self.emit_int64(v)
        }
    }

    fn emit_nil(&mut self) -> Result<()> { self.write_byte(NIL) }

    fn emit_true(&mut self) -> Result<()> { self.write_byte(TRUE) }

    fn emit_false(&mut self) -> Result<()> { self.write_byte(FALSE) }

    fn emit_bool(&mut self, v: bool) -> Result<()> {
        if v {
            self.emit_true()
        } else {
            self.emit_false()
        }
    }

    fn emit_float(&mut self, v: f32) -> Result<()> {
        self.write_byte(FLOAT32)?;
        self.write_float(v)
    }

    fn emit_double(&mut self, v: f64) -> Result<()> {
        self.write_byte(FLOAT64)?;
        self.write_double(v)
    }

    fn emit_raw(&mut self, raw: &[u8]) -> Result<()> {
        let len = wire_len(raw.len(), "raw")?;
        emit_len!(self, len, FIXRAW, MASK_FIXRAW_LEN, RAW16, RAW32)?;
        if len > 0 {
            self.write(raw)?;
        }
        Ok(())
    }

    fn emit_array(&mut self, len: usize) -> Result<()> {
        let len = wire_len(len, "array")?;
        emit_len!(self, len, FIXARRAY, MASK_FIXCOL_LEN, ARRAY16, ARRAY32)
    }

    fn emit_map(&mut self, len: usize) -> Result<()> {
        let len = wire_len(len, "map")?;
        emit_len!(self, len, FIXMAP, MASK_FIXCOL_LEN, MAP16, MAP32)
    }

    fn emit_array_begin(&mut self) -> Result<()> { self.write_byte(ARRAY_BEGIN) }

    fn emit_array_end(&mut self) -> Result<()> { self.write_byte(ARRAY_END) }

    fn emit_packed(&mut self, packed: &[u8]) -> Result<()> { self.write(packed) }
}

/// A value that can be serialized.
pub trait Ser {
    /// Emit `self` through `e`.
    ///
    /// # Arguments
    ///
    /// * `e` - The [`Encoder`] to be written to.
    fn ser<E: Encoder + ?Sized>(&self, e: &mut E) -> Result<()>;
}

macro_rules! unsigned_ser {
    ($($typ:ty),*) => {
        $(impl Ser for $typ {
            #[inline]
            fn ser<E: Encoder + ?Sized>(&self, e: &mut E) -> Result<()> {
                e.emit_uint(*self as u64)
            }
        })*
    };
}

macro_rules! signed_ser {
    ($($typ:ty),*) => {
        $(impl Ser for $typ {
            #[inline]
            fn ser<E: Encoder + ?Sized>(&self, e: &mut E) -> Result<()> {
                if *self >= 0 {
                    e.emit_uint(*self as u64)
                } else {
                    e.emit_int(*self as i64)
                }
            }
        })*
    };
}

unsigned_ser!(u8, u16, u32, u64, usize);
signed_ser!(i8, i16, i32, i64, isize);

impl Ser for f32 {
    fn ser<E: Encoder + ?Sized>(&self, e: &mut E) -> Result<()> { e.emit_float(*self) }
}

impl Ser for f64 {
    fn ser<E: Encoder + ?Sized>(&self, e: &mut E) -> Result<()> { e.emit_double(*self) }
}

impl Ser for f16 {
    fn ser<E: Encoder + ?Sized>(&self, e: &mut E) -> Result<()> { e.emit_float(self.to_f32()) }
}

impl Ser for bool {
    fn ser<E: Encoder + ?Sized>(&self, e: &mut E) -> Result<()> { e.emit_bool(*self) }
}

impl Ser for () {
    fn ser<E: Encoder + ?Sized>(&self, e: &mut E) -> Result<()> { e.emit_nil() }
}

impl Ser for str {
    fn ser<E: Encoder + ?Sized>(&self, e: &mut E) -> Result<()> { e.emit_raw(self.as_bytes()) }
}

impl Ser for String {
    fn ser<E: Encoder + ?Sized>(&self, e: &mut E) -> Result<()> { e.emit_raw(self.as_bytes()) }
}

impl Ser for Bytes {
    fn ser<E: Encoder + ?Sized>(&self, e: &mut E) -> Result<()> { e.emit_raw(self) }
}

impl<'a, T: Ser + ?Sized> Ser for &'a T {
    fn ser<E: Encoder + ?Sized>(&self, e: &mut E) -> Result<()> { (**self).ser(e) }
}

impl<T: Ser + ?Sized> Ser for Box<T> {
    fn ser<E: Encoder + ?Sized>(&self, e: &mut E) -> Result<()> { (**self).ser(e) }
}

impl<T: Ser> Ser for Option<T> {
    fn ser<E: Encoder + ?Sized>(&self, e: &mut E) -> Result<()> {
        match self {
            None => e.emit_nil(),
            Some(t) => t.ser(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uint(v: u64) -> Vec<u8> {
        let mut out = Vec::new();
        out.emit_uint(v).unwrap();
        out
    }

    fn int(v: i64) -> Vec<u8> {
        let mut out = Vec::new();
        out.emit_int(v).unwrap();
        out
    }

    fn ser<T: Ser + ?Sized>(t: &T) -> Vec<u8> {
        let mut out = Vec::new();
        t.ser(&mut out).unwrap();
        out
    }

    #[test]
    fn uint_boundaries() {
        assert_eq!(uint(0), vec![0x00]);
        assert_eq!(uint(127), vec![0x7f]);
        assert_eq!(uint(128), vec![0xcc, 0x80]);
        assert_eq!(uint(255), vec![0xcc, 0xff]);
        assert_eq!(uint(256), vec![0xcd, 0x01, 0x00]);
        assert_eq!(uint(65535), vec![0xcd, 0xff, 0xff]);
        assert_eq!(uint(65536), vec![0xce, 0x00, 0x01, 0x00, 0x00]);
        assert_eq!(uint(0xffff_ffff), vec![0xce, 0xff, 0xff, 0xff, 0xff]);
        assert_eq!(
            uint(0x1_0000_0000),
            vec![0xcf, 0, 0, 0, 0x01, 0, 0, 0, 0]
        );
        assert_eq!(uint(u64::max_value()), vec![0xcf, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff]);
    }

    #[test]
    fn int_boundaries() {
        assert_eq!(int(-1), vec![0xff]);
        assert_eq!(int(-32), vec![0xe0]);
        assert_eq!(int(-33), vec![0xd0, 0xdf]);
        assert_eq!(int(-128), vec![0xd0, 0x80]);
        assert_eq!(int(-129), vec![0xd1, 0xff, 0x7f]);
        assert_eq!(int(-32768), vec![0xd1, 0x80, 0x00]);
        assert_eq!(int(-32769), vec![0xd2, 0xff, 0xff, 0x7f, 0xff]);
        assert_eq!(
            int(i64::min_value()),
            vec![0xd3, 0x80, 0, 0, 0, 0, 0, 0, 0]
        );
        // signed tag even for non-negative values
        assert_eq!(int(5), vec![0xd0, 0x05]);
        assert_eq!(int(200), vec![0xd1, 0x00, 0xc8]);
    }

    #[test]
    fn signed_types_use_shortest_form() {
        assert_eq!(ser(&5i8), vec![0x05]);
        assert_eq!(ser(&200i32), vec![0xcc, 0xc8]);
        assert_eq!(ser(&-1i64), vec![0xff]);
        assert_eq!(ser(&-200i16), vec![0xd1, 0xff, 0x38]);
        assert_eq!(ser(&300usize), vec![0xcd, 0x01, 0x2c]);
    }

    #[test]
    fn constants() {
        assert_eq!(ser(&()), vec![0xc0]);
        assert_eq!(ser(&false), vec![0xc2]);
        assert_eq!(ser(&true), vec![0xc3]);
        assert_eq!(ser(&None::<u8>), vec![0xc0]);
        assert_eq!(ser(&Some(3u8)), vec![0x03]);
    }

    #[test]
    fn floats() {
        assert_eq!(ser(&1.5f32), vec![0xca, 0x3f, 0xc0, 0x00, 0x00]);
        assert_eq!(ser(&3.5f64), vec![0xcb, 0x40, 0x0c, 0, 0, 0, 0, 0, 0]);
        assert_eq!(ser(&f16::from_f32(1.5)), vec![0xca, 0x3f, 0xc0, 0x00, 0x00]);
    }

    #[test]
    fn raw_lengths() {
        assert_eq!(ser(""), vec![0xa0]);
        assert_eq!(ser("ab"), vec![0xa2, b'a', b'b']);

        let s31 = vec![b'x'; 31];
        let out = ser(&Bytes::from(s31));
        assert_eq!(out[0], 0xbf);
        assert_eq!(out.len(), 32);

        let s32 = vec![b'x'; 32];
        let out = ser(&Bytes::from(s32));
        assert_eq!(out[..3], [0xda, 0x00, 0x20]);
        assert_eq!(out.len(), 35);

        let s65535 = vec![0; 65535];
        let out = ser(&Bytes::from(s65535));
        assert_eq!(out[..3], [0xda, 0xff, 0xff]);

        let s65536 = vec![0; 65536];
        let out = ser(&Bytes::from(s65536));
        assert_eq!(out[..5], [0xdb, 0x00, 0x01, 0x00, 0x00]);
        assert_eq!(out.len(), 65541);
    }

    #[test]
    fn container_headers() {
        let mut out = Vec::new();
        out.emit_array(0).unwrap();
        out.emit_array(15).unwrap();
        out.emit_array(16).unwrap();
        out.emit_array(65536).unwrap();
        assert_eq!(
            out,
            vec![0x90, 0x9f, 0xdc, 0x00, 0x10, 0xdd, 0x00, 0x01, 0x00, 0x00]
        );

        let mut out = Vec::new();
        out.emit_map(1).unwrap();
        out.emit_map(15).unwrap();
        out.emit_map(16).unwrap();
        out.emit_map(65535).unwrap();
        out.emit_map(65536).unwrap();
        assert_eq!(
            out,
            vec![
                0x81, 0x8f, 0xde, 0x00, 0x10, 0xde, 0xff, 0xff, 0xdf, 0x00, 0x01, 0x00, 0x00
            ]
        );
    }

    #[test]
    #[cfg(target_pointer_width = "64")]
    fn oversized_length_is_unsupported() {
        let mut out = Vec::new();
        match out.emit_array(u32::max_value() as usize + 1) {
            Err(Error::UnsupportedValue(_)) => {}
            other => panic!("expected unsupported value, got {:?}", other),
        }
        assert!(out.is_empty());
    }

    #[test]
    fn markers_and_packed() {
        let mut out = Vec::new();
        out.emit_array_begin().unwrap();
        out.emit_packed(&[0x01, 0x02]).unwrap();
        out.emit_array_end().unwrap();
        assert_eq!(out, vec![0xc4, 0x01, 0x02, 0xc5]);
    }
}
