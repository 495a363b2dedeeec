//! Tag bytes.
//!
//! | Tag byte(s) | Meaning |
//! |---|---|
//! | `0x00-0x7f` | positive fixnum |
//! | `0x80-0x8f` | fixed map, size in the low nibble |
//! | `0x90-0x9f` | fixed array, size in the low nibble |
//! | `0xa0-0xbf` | fixed raw, size in the low 5 bits |
//! | `0xc0` | nil |
//! | `0xc2` / `0xc3` | false / true |
//! | `0xc4` / `0xc5` | length-less array begin / end |
//! | `0xca` / `0xcb` | float32 / float64 |
//! | `0xcc-0xcf` | uint8 / 16 / 32 / 64 |
//! | `0xd0-0xd3` | int8 / 16 / 32 / 64 |
//! | `0xda` / `0xdb` | raw16 / raw32 |
//! | `0xdc` / `0xdd` | array16 / array32 |
//! | `0xde` / `0xdf` | map16 / map32 |
//! | `0xe0-0xff` | negative fixnum |
//! | `0xc1`, `0xc6-0xc9`, `0xd4-0xd9` | reserved |

/// Largest positive fixnum, 0x7f
pub const POS_FIXNUM_MAX: u8 = 0b0111_1111;
/// Negative fixnum prefix, 0xe0
pub const NEG_FIXNUM: u8 = 0b1110_0000;

/// Fixed map type bits, 0x80
pub const FIXMAP: u8 = 0b1000_0000;
/// Fixed array type bits, 0x90
pub const FIXARRAY: u8 = 0b1001_0000;
/// Fixed raw type bits, 0xa0
pub const FIXRAW: u8 = 0b1010_0000;

/// Length bits of fixed maps and arrays, 0x0f
pub const MASK_FIXCOL_LEN: u8 = 0b0000_1111;
/// Length bits of fixed raws, 0x1f
pub const MASK_FIXRAW_LEN: u8 = 0b0001_1111;

pub const NIL: u8 = 0xc0;
pub const FALSE: u8 = 0xc2;
pub const TRUE: u8 = 0xc3;

/// Length-less array begin marker.
pub const ARRAY_BEGIN: u8 = 0xc4;
/// Length-less array end marker.
pub const ARRAY_END: u8 = 0xc5;

pub const FLOAT32: u8 = 0xca;
pub const FLOAT64: u8 = 0xcb;

pub const UINT8: u8 = 0xcc;
pub const UINT16: u8 = 0xcd;
pub const UINT32: u8 = 0xce;
pub const UINT64: u8 = 0xcf;

pub const INT8: u8 = 0xd0;
pub const INT16: u8 = 0xd1;
pub const INT32: u8 = 0xd2;
pub const INT64: u8 = 0xd3;

pub const RAW16: u8 = 0xda;
pub const RAW32: u8 = 0xdb;

pub const ARRAY16: u8 = 0xdc;
pub const ARRAY32: u8 = 0xdd;

pub const MAP16: u8 = 0xde;
pub const MAP32: u8 = 0xdf;
