//! # MessagePack encoder and decoder
//!
//! The byte-level [`Writer`] and [`Reader`] traits and their memory and file backings,
//! the [`Encoder`] and [`Decoder`] built on them, the [`Ser`] and [`De`] traits with
//! impls for primitives and std containers, and the entry points below.
//!
//! # Example
//!
//! ```
//! use mpack::prelude::*;
//!
//! // a struct that will store some data
//! #[derive(MsgPack, PartialEq, Debug, Clone)]
//! struct SomeData {
//!     x: usize,
//!     y: i32,
//! }
//!
//! // here it is storing some data
//! let some_data = SomeData { x: 1, y: 2 };
//!
//! // and we've encoded it
//! let enc_full = encode_full(&some_data).unwrap();
//!
//! // let's encode it a different way too
//! let out = &mut Vec::new();
//! encode(&some_data, out).unwrap();
//!
//! // but they are equivalent
//! assert_eq!(*out, enc_full);
//! assert_eq!(enc_full, vec![0x92, 0x01, 0x02]);
//!
//! // decoding straight to the type
//! let dec_full: SomeData = decode_full(&enc_full).unwrap();
//! assert_eq!(dec_full, some_data);
//!
//! // or to a dynamic value first
//! let dec_val: Value = decode_full(&enc_full).unwrap();
//! assert_eq!(dec_val, Value::from(vec![1u8, 2]));
//! ```

use crate::{
    errors::{Error, Result},
    options::Options,
    Value,
};
use bytes::Bytes;
use std::{marker::PhantomData, path::Path};
use tracing::trace;

pub mod collections;
pub mod constants;
pub mod de;
pub mod reader;
pub mod ser;
pub mod value;
pub mod writer;

pub use collections::*;
pub use de::*;
pub use reader::*;
pub use ser::*;
pub use value::*;
pub use writer::*;

/// Encodes `t`, appending the output to `out`.
///
/// # Arguments
///
/// * `t` - The value to be encoded.
/// * `out` - Where the encoder output is stored.
///
/// # Example
///
/// ```
/// use mpack::prelude::*;
///
/// // output buffer
/// let out = &mut Vec::new();
///
/// // encode value
/// encode(&Value::Nil, out).unwrap();
///
/// assert_eq!(*out, vec![0xc0]);
/// ```
pub fn encode<T: Ser + ?Sized>(t: &T, out: &mut Vec<u8>) -> Result<()> { t.ser(out) }

/// Encodes `t` into a fresh buffer.
///
/// # Example
///
/// ```
/// use mpack::prelude::*;
///
/// let enc = encode_full(&(true, -1i8)).unwrap();
///
/// assert_eq!(enc, vec![0x92, 0xc3, 0xff]);
/// ```
pub fn encode_full<T: Ser + ?Sized>(t: &T) -> Result<Vec<u8>> {
    let mut w = BufferedMemoryWriter::new(Options::default().initial_buffer_size)?;
    t.ser(&mut w)?;
    Ok(w.into_vec())
}

/// Decodes one `T` from `d`.
pub fn decode<T: De, D: Decoder + ?Sized>(d: &mut D) -> Result<T> { T::de(d) }

/// Decodes a `T` that must span all of `bytes`.
///
/// # Errors
///
/// Besides the errors of `T`'s decoder, [`Error::InvalidDecode`] if bytes are left over.
///
/// # Example
///
/// ```
/// use mpack::prelude::*;
///
/// let v: Vec<u8> = decode_full(&[0x92, 0x01, 0x02]).unwrap();
/// assert_eq!(v, vec![1, 2]);
///
/// assert!(decode_full::<u8>(&[0x01, 0x02]).is_err());
/// ```
pub fn decode_full<T: De>(bytes: &[u8]) -> Result<T> {
    let mut r = MemoryReader::new(bytes);
    let t = T::de(&mut r)?;
    if r.at_end() {
        Ok(t)
    } else {
        Err(Error::invalid(format!(
            "{} trailing bytes after value",
            r.remaining()
        )))
    }
}

/// Decodes one `T`, leaving `d` untouched on failure.
///
/// Typed decoders built from several items (tuples, collections, derived types) stop at
/// the first short item. This puts the cursor back where the value started and, for
/// [`Error::NeedMoreData`], counts the bytes needed from there.
///
/// # Example
///
/// ```
/// use mpack::prelude::*;
///
/// let mut r = StreamReader::new();
/// r.feed(&[0x92, 0x01]);
///
/// assert!(match try_decode::<(u8, u8), _>(&mut r) {
///     Err(Error::NeedMoreData(3)) => true,
///     _ => false,
/// });
/// assert_eq!(r.position(), 0);
///
/// r.feed(&[0x02]);
/// assert_eq!(try_decode::<(u8, u8), _>(&mut r).unwrap(), (1, 2));
/// ```
pub fn try_decode<T: De, D: Decoder + ?Sized>(d: &mut D) -> Result<T> {
    let start = d.position();

    T::de(d).or_else(|err| {
        let consumed = d.position() - start;
        d.unread(consumed)?;
        trace!(position = start, consumed = consumed, "decode failed, rewound");
        match err {
            Error::NeedMoreData(n) => Err(Error::NeedMoreData(consumed.saturating_add(n))),
            err => Err(err),
        }
    })
}

/// Encodes a [`Value`] with the given options.
///
/// # Example
///
/// ```
/// use mpack::prelude::*;
///
/// let v = Value::from(vec![Value::from("a"), Value::Nil]);
/// let out = dump(&v, &Options::default()).unwrap();
///
/// assert_eq!(out, vec![0x92, 0xa1, b'a', 0xc0]);
/// ```
pub fn dump(value: &Value, opts: &Options) -> Result<Bytes> {
    let mut w = BufferedMemoryWriter::new(opts.initial_buffer_size)?;
    dump_value(&mut w, value, opts)?;
    Ok(w.to_bytes())
}

/// Encodes a [`Value`] into a new file at `path`, replacing any existing one.
pub fn dump_to_file<P: AsRef<Path>>(path: P, value: &Value, opts: &Options) -> Result<()> {
    let mut w = FileWriter::create(path)?;
    dump_value(&mut w, value, opts)?;
    w.flush()
}

/// Encodes `t` into a new file at `path`, replacing any existing one.
pub fn save_to_file<T: Ser + ?Sized, P: AsRef<Path>>(path: P, t: &T) -> Result<()> {
    let mut w = FileWriter::create(path)?;
    t.ser(&mut w)?;
    w.flush()
}

/// Decodes the first [`Value`] in `bytes`; anything after it is ignored.
///
/// # Example
///
/// ```
/// use mpack::prelude::*;
///
/// let v = load(&[0xc3, 0xc0], &Options::default()).unwrap();
///
/// assert_eq!(v, Value::Bool(true));
/// ```
pub fn load(bytes: &[u8], opts: &Options) -> Result<Value> {
    load_value(&mut MemoryReader::new(bytes), opts)
}

/// Decodes the first `T` in the file at `path`.
pub fn load_from_file<T: De, P: AsRef<Path>>(path: P) -> Result<T> {
    let mut r = FileReader::open(path)?;
    T::de(&mut r)
}

/// Iterator over back-to-back values, returned by [`each`].
///
/// Yields values until the reader is at its end. The first error is yielded and ends the
/// iteration.
#[derive(Debug)]
pub struct Items<'r, T, D: ?Sized> {
    d: &'r mut D,
    failed: bool,
    _item: PhantomData<T>,
}

impl<'r, T: De, D: Decoder + ?Sized> Iterator for Items<'r, T, D> {
    type Item = Result<T>;

    fn next(&mut self) -> Option<Result<T>> {
        if self.failed || self.d.at_end() {
            return None;
        }

        let res = T::de(&mut *self.d);
        self.failed = res.is_err();
        Some(res)
    }
}

/// Iterates over a flat concatenation of `T`s in `d`.
///
/// # Example
///
/// ```
/// use mpack::prelude::*;
///
/// let mut r = MemoryReader::new(&[0x01, 0xa1, b'x', 0xc0]);
///
/// let all: mpack::Result<Vec<Value>> = each(&mut r).collect();
/// assert_eq!(
///     all.unwrap(),
///     vec![Value::from(1u8), Value::from("x"), Value::Nil]
/// );
/// ```
pub fn each<T: De, D: Decoder + ?Sized>(d: &mut D) -> Items<'_, T, D> {
    Items {
        d,
        failed: false,
        _item: PhantomData,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{env, fs};

    fn temp_path(name: &str) -> std::path::PathBuf {
        env::temp_dir().join(format!("mpack-mod-{}-{}", std::process::id(), name))
    }

    #[test]
    fn encode_appends() {
        let mut out = vec![0xc0];
        encode(&1u8, &mut out).unwrap();
        encode("a", &mut out).unwrap();
        assert_eq!(out, vec![0xc0, 0x01, 0xa1, b'a']);
    }

    #[test]
    fn decode_full_trailing() {
        match decode_full::<u8>(&[0x01, 0xc0]) {
            Err(Error::InvalidDecode(msg)) => assert_eq!(msg, "1 trailing bytes after value"),
            other => panic!("unexpected {:?}", other),
        }
        match decode_full::<u16>(&[0xcd, 0x01]) {
            Err(Error::NeedMoreData(3)) => {}
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn try_decode_rewinds_on_any_error() {
        let bytes = [0x92, 0x01, 0xa1, b'x'];
        let mut r = MemoryReader::new(&bytes);
        assert!(try_decode::<(u8, u8), _>(&mut r).is_err());
        assert_eq!(r.position(), 0);
        assert_eq!(try_decode::<(u8, String), _>(&mut r).unwrap(), (1, "x".to_string()));
        assert!(r.at_end());
    }

    #[test]
    fn try_decode_counts_from_value_start() {
        // [u16 = 256, "hi"] cut inside the raw body
        let bytes = [0x92, 0xcd, 0x01, 0x00, 0xa2, b'h'];
        let mut r = MemoryReader::new(&bytes);
        match try_decode::<(u16, String), _>(&mut r) {
            Err(Error::NeedMoreData(7)) => {}
            other => panic!("unexpected {:?}", other),
        }
        assert_eq!(r.position(), 0);
    }

    #[test]
    fn dump_uses_options() {
        let v = Value::from(vec![Value::from(vec![Value::Nil])]);
        let opts = Options::default().with_initial_buffer_size(0);
        assert_eq!(dump(&v, &opts).unwrap(), vec![0x91, 0x91, 0xc0]);

        match dump(&v, &opts.with_max_depth(2)) {
            Err(Error::NestingTooDeep) => {}
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn load_reads_first_value() {
        let v = load(&[0x91, 0x01, 0xff], &Options::default()).unwrap();
        assert_eq!(v, Value::from(vec![1u8]));
    }

    #[test]
    fn each_stops_at_first_error() {
        let mut r = MemoryReader::new(&[0x01, 0xc1, 0x02]);
        let items: Vec<Result<Value>> = each(&mut r).collect();
        assert_eq!(items.len(), 2);
        assert_eq!(*items[0].as_ref().unwrap(), Value::from(1u8));
        assert!(items[1].is_err());
    }

    #[test]
    fn files() {
        let path = temp_path("roundtrip");

        let v = Value::from(vec![Value::from(-5i8), Value::from("file")]);
        dump_to_file(&path, &v, &Options::default()).unwrap();
        assert_eq!(load_from_file::<Value, _>(&path).unwrap(), v);

        save_to_file(&path, &vec![1u32, 70_000]).unwrap();
        assert_eq!(fs::read(&path).unwrap(), vec![0x92, 0x01, 0xce, 0, 1, 0x11, 0x70]);
        assert_eq!(load_from_file::<Vec<u32>, _>(&path).unwrap(), vec![1, 70_000]);

        fs::remove_file(&path).unwrap();

        match load_from_file::<Value, _>(&path) {
            Err(Error::File { .. }) => {}
            other => panic!("unexpected {:?}", other),
        }
    }
}
