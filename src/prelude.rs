pub use crate::{
    encoding::{
        decode, decode_full, dump, dump_to_file, each, encode, encode_full, load,
        load_from_file, save_to_file, try_decode, BufferedMemoryWriter, Data, De, Decoder,
        Encoder, FileReader, FileWriter, MemoryReader, Reader, Ser, StreamReader, Writer,
    },
    errors::Error,
    float::Float,
    integer::Integer,
    options::Options,
    rep::*,
    vecmap::VecMap,
    MsgPack, Value,
};
pub use bytes::Bytes;
pub use half::f16;
pub use std::convert::TryFrom;
