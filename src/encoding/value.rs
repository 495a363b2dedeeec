//! Encoding and decoding of [`Value`] trees.
//!
//! Both directions walk the tree with an explicit stack instead of recursing, so nesting
//! is limited only by [`Options::max_depth`].

use super::{collections::prealloc, de::*, ser::*};
use crate::{
    errors::{Error, Result},
    float::Float,
    integer::Integer,
    options::Options,
    vecmap::VecMap,
    Value,
};
use smallvec::SmallVec;
use std::mem;
use tracing::debug;

fn check_depth(level: usize, opts: &Options) -> Result<()> {
    match opts.max_depth {
        Some(max) if level >= max => {
            debug!(level, max_depth = max, "nesting too deep");
            Err(Error::NestingTooDeep)
        }
        _ => Ok(()),
    }
}

/// Encodes a [`Value`], checking nesting against `opts.max_depth`.
///
/// # Arguments
///
/// * `e` - Where the output goes.
/// * `value` - The value to be encoded.
/// * `opts` - Only `max_depth` is used here.
///
/// # Errors
///
/// [`Error::NestingTooDeep`] when a value sits at level `max_depth` or deeper (the value
/// itself is level 0). Output written before the error is left in place.
///
/// # Example
///
/// ```
/// use mpack::{encoding::dump_value, Error, Options, Value};
///
/// let nested = Value::from(vec![Value::from(vec![1u8])]);
///
/// let mut out = Vec::new();
/// dump_value(&mut out, &nested, &Options::default()).unwrap();
/// assert_eq!(out, vec![0x91, 0x91, 0x01]);
///
/// let mut out = Vec::new();
/// let err = dump_value(&mut out, &nested, &Options::default().with_max_depth(2));
/// assert!(match err {
///     Err(Error::NestingTooDeep) => true,
///     _ => false,
/// });
/// ```
pub fn dump_value<E: Encoder + ?Sized>(e: &mut E, value: &Value, opts: &Options) -> Result<()> {
    let mut todo: SmallVec<[(&Value, usize); 16]> = SmallVec::new();
    todo.push((value, 0));

    while let Some((v, level)) = todo.pop() {
        check_depth(level, opts)?;

        match v {
            Value::Nil => e.emit_nil()?,
            Value::Bool(b) => e.emit_bool(*b)?,
            Value::Int(i) => i.ser(e)?,
            Value::Float(f) => f.ser(e)?,
            Value::Raw(bs) => e.emit_raw(bs)?,
            Value::Packed(bs) => e.emit_packed(bs)?,
            Value::Array(items) => {
                e.emit_array(items.len())?;
                todo.extend(items.iter().rev().map(|item| (item, level + 1)));
            }
            Value::Map(map) => {
                e.emit_map(map.len())?;
                let start = todo.len();
                for (key, val) in map {
                    todo.push((key, level + 1));
                    todo.push((val, level + 1));
                }
                todo[start..].reverse();
            }
        }
    }

    Ok(())
}

// A container whose elements are still being read.
enum Frame {
    Array { items: Vec<Value>, left: usize },
    Map { map: VecMap<Value, Value>, key: Option<Value>, left: usize },
    Stream(Vec<Value>),
}

impl Frame {
    // Adds an element, returning the container once it is complete.
    fn push(&mut self, v: Value) -> Option<Value> {
        match self {
            Frame::Array { items, left } => {
                items.push(v);
                *left -= 1;
                if *left == 0 {
                    Some(Value::Array(mem::replace(items, Vec::new())))
                } else {
                    None
                }
            }
            Frame::Map { map, key, left } => match key.take() {
                None => {
                    *key = Some(v);
                    None
                }
                Some(k) => {
                    map.insert(k, v);
                    *left -= 1;
                    if *left == 0 {
                        Some(Value::Map(mem::replace(map, VecMap::new())))
                    } else {
                        None
                    }
                }
            },
            Frame::Stream(items) => {
                items.push(v);
                None
            }
        }
    }
}

fn load_tree<D: Decoder + ?Sized>(d: &mut D, opts: &Options) -> Result<Value> {
    let mut open: SmallVec<[Frame; 8]> = SmallVec::new();

    loop {
        let data = d.next_data()?;

        let mut value = match data {
            Data::ArrayEnd => match open.pop() {
                Some(Frame::Stream(items)) => Value::Array(items),
                Some(_) => return Err(Error::invalid("end marker inside a counted container")),
                None => return Err(Error::invalid("end marker outside of a length-less array")),
            },
            data => {
                check_depth(open.len(), opts)?;

                match data {
                    Data::Uint(u) => Value::Int(Integer::Pos(u)),
                    Data::Int(i) => Value::Int(Integer::from(i)),
                    Data::Float(f) => Value::Float(Float::from(f)),
                    Data::Double(f) => Value::Float(Float::from(f)),
                    Data::Nil => Value::Nil,
                    Data::Bool(b) => Value::Bool(b),
                    Data::Raw(len) => Value::Raw(d.read_bytes(len as usize)?),
                    Data::Array(0) => Value::Array(Vec::new()),
                    Data::Array(len) => {
                        let len = len as usize;
                        open.push(Frame::Array {
                            items: Vec::with_capacity(prealloc(d, len)),
                            left: len,
                        });
                        continue;
                    }
                    Data::Map(0) => Value::Map(VecMap::new()),
                    Data::Map(len) => {
                        let len = len as usize;
                        open.push(Frame::Map {
                            map: VecMap::with_capacity(prealloc(d, len)),
                            key: None,
                            left: len,
                        });
                        continue;
                    }
                    Data::ArrayBegin => {
                        open.push(Frame::Stream(Vec::new()));
                        continue;
                    }
                    other => return Err(mismatch("value", other)),
                }
            }
        };

        // hand the finished value to its parents, closing every container it completes
        loop {
            let done = match open.last_mut() {
                None => return Ok(value),
                Some(frame) => frame.push(value),
            };

            match done {
                Some(full) => {
                    open.pop();
                    value = full;
                }
                None => break,
            }
        }
    }
}

/// Decodes one [`Value`], checking nesting against `opts.max_depth`.
///
/// Counted containers, length-less arrays and any mix of the two are rebuilt. An end
/// marker closes the innermost length-less array; anywhere else it is an error.
///
/// # Errors
///
/// * [`Error::NeedMoreData`] when the input ends inside the value. The reader is rewound
///   to the start of the value and the count is the number of bytes needed from there.
/// * [`Error::NestingTooDeep`] as for [`dump_value`].
/// * [`Error::InvalidDecode`] for reserved tags and stray end markers.
///
/// # Example
///
/// ```
/// use mpack::{
///     encoding::{load_value, MemoryReader, Reader},
///     Error, Options, Value,
/// };
///
/// let mut r = MemoryReader::new(&[0xc4, 0x01, 0xc4, 0xc5, 0xc5]);
/// let v = load_value(&mut r, &Options::default()).unwrap();
/// assert_eq!(v, Value::from(vec![Value::from(1u8), Value::Array(vec![])]));
///
/// let mut r = MemoryReader::new(&[0x92, 0x01, 0xa3, b'a']);
/// assert!(match load_value(&mut r, &Options::default()) {
///     Err(Error::NeedMoreData(6)) => true,
///     _ => false,
/// });
/// assert_eq!(r.position(), 0);
/// ```
pub fn load_value<D: Decoder + ?Sized>(d: &mut D, opts: &Options) -> Result<Value> {
    let start = d.position();

    match load_tree(d, opts) {
        Err(Error::NeedMoreData(n)) => {
            let consumed = d.position() - start;
            d.unread(consumed)?;
            Err(Error::NeedMoreData(consumed.saturating_add(n)))
        }
        res => res,
    }
}

impl Ser for Value {
    fn ser<E: Encoder + ?Sized>(&self, e: &mut E) -> Result<()> {
        dump_value(e, self, &Options::default())
    }
}

impl De for Value {
    fn de<D: Decoder + ?Sized>(d: &mut D) -> Result<Self> { load_value(d, &Options::default()) }
}
