use crate::{
    buffer::ResizableBuffer,
    errors::{Error, Result},
};
use byteorder::{BigEndian, ByteOrder};
use bytes::Bytes;
use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};
use tracing::debug;

/// A byte sink. Every multi-byte helper is big-endian and built on [`Writer::write`].
pub trait Writer {
    /// Append all of `buf`.
    fn write(&mut self, buf: &[u8]) -> Result<()>;

    /// Append one byte.
    fn write_byte(&mut self, byte: u8) -> Result<()> { self.write(&[byte]) }

    /// Append a big-endian `u16`.
    fn write2(&mut self, v: u16) -> Result<()> {
        let mut buf = [0; 2];
        BigEndian::write_u16(&mut buf, v);
        self.write(&buf)
    }

    /// Append a big-endian `u32`.
    fn write4(&mut self, v: u32) -> Result<()> {
        let mut buf = [0; 4];
        BigEndian::write_u32(&mut buf, v);
        self.write(&buf)
    }

    /// Append a big-endian `u64`.
    fn write8(&mut self, v: u64) -> Result<()> {
        let mut buf = [0; 8];
        BigEndian::write_u64(&mut buf, v);
        self.write(&buf)
    }

    /// Append the IEEE-754 bit pattern of an `f32`.
    fn write_float(&mut self, v: f32) -> Result<()> { self.write4(v.to_bits()) }

    /// Append the IEEE-754 bit pattern of an `f64`.
    fn write_double(&mut self, v: f64) -> Result<()> { self.write8(v.to_bits()) }
}

impl Writer for Vec<u8> {
    fn write(&mut self, buf: &[u8]) -> Result<()> {
        self.extend_from_slice(buf);
        Ok(())
    }

    fn write_byte(&mut self, byte: u8) -> Result<()> {
        self.push(byte);
        Ok(())
    }
}

impl<'a, W: Writer + ?Sized> Writer for &'a mut W {
    fn write(&mut self, buf: &[u8]) -> Result<()> { (**self).write(buf) }

    fn write_byte(&mut self, byte: u8) -> Result<()> { (**self).write_byte(byte) }
}

#[derive(Debug)]
/// A [`Writer`] backed by a [`ResizableBuffer`].
///
/// # Example
///
/// ```
/// use mpack::encoding::{BufferedMemoryWriter, Writer};
///
/// let mut w = BufferedMemoryWriter::new(32).unwrap();
/// w.write2(0x0102).unwrap();
///
/// assert_eq!(w.data(), &[1, 2]);
/// ```
pub struct BufferedMemoryWriter {
    buf: ResizableBuffer,
    write_pos: usize,
}

impl BufferedMemoryWriter {
    /// Creates a writer with room for at least `initial_size` bytes.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfMemory`] if the initial allocation fails.
    pub fn new(initial_size: usize) -> Result<Self> {
        Ok(BufferedMemoryWriter {
            buf: ResizableBuffer::with_capacity(initial_size)?,
            write_pos: 0,
        })
    }

    /// Number of bytes written so far.
    pub fn size(&self) -> usize { self.write_pos }

    /// The bytes written so far.
    pub fn data(&self) -> &[u8] { &self.buf.data()[..self.write_pos] }

    /// Forgets everything written, keeping the allocation.
    pub fn reset(&mut self) { self.write_pos = 0 }

    /// Copies the written bytes out into a `Vec`.
    pub fn into_vec(self) -> Vec<u8> { self.data().to_vec() }

    /// Copies the written bytes out into [`Bytes`].
    pub fn to_bytes(&self) -> Bytes { Bytes::from(self.data()) }
}

impl Writer for BufferedMemoryWriter {
    fn write(&mut self, buf: &[u8]) -> Result<()> {
        if buf.is_empty() {
            return Ok(());
        }
        self.buf
            .ptr_at(self.write_pos, buf.len())?
            .copy_from_slice(buf);
        self.write_pos += buf.len();
        Ok(())
    }

    fn write_byte(&mut self, byte: u8) -> Result<()> {
        self.buf.ptr_at(self.write_pos, 1)?[0] = byte;
        self.write_pos += 1;
        Ok(())
    }
}

#[derive(Debug)]
/// A [`Writer`] appending to a file. The file is closed when the writer is dropped; call
/// [`FileWriter::flush`] first to see buffered write errors.
pub struct FileWriter {
    file: BufWriter<File>,
}

impl FileWriter {
    /// Wraps an already open file.
    pub fn new(file: File) -> Self { FileWriter { file: BufWriter::new(file) } }

    /// Opens `path` for writing, creating it or truncating it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::File`] if the file cannot be opened.
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|e| Error::file("failed to open file", e))?;
        debug!(path = %path.display(), "opened file for writing");
        Ok(Self::new(file))
    }

    /// Pushes buffered bytes to the file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::File`] if the write fails.
    pub fn flush(&mut self) -> Result<()> {
        self.file.flush().map_err(|e| Error::file("write error", e))
    }

    /// Flushes and hands back the file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::File`] if the final flush fails.
    pub fn into_inner(self) -> Result<File> {
        self.file
            .into_inner()
            .map_err(|e| Error::file("write error", e.into_error()))
    }
}

impl Writer for FileWriter {
    fn write(&mut self, buf: &[u8]) -> Result<()> {
        self.file
            .write_all(buf)
            .map_err(|e| Error::file("write error", e))
    }
}
