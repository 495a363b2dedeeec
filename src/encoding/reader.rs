use crate::errors::{Error, Result};
use byteorder::{BigEndian, ByteOrder};
use bytes::{Bytes, BytesMut};
use std::{
    fs::File,
    io::{self, BufReader, Read, Seek, SeekFrom},
    path::Path,
};
use tracing::debug;

/// A bounded byte source with a cursor.
///
/// `position() <= size()` always holds, and a reader is at its end exactly when the two
/// are equal. Every multi-byte helper is big-endian and built on [`Reader::read`].
pub trait Reader {
    /// Fill `buf` completely.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EndOfStream`] if fewer than `buf.len()` bytes remain, in which
    /// case nothing is consumed. Backends that do I/O may also return [`Error::File`].
    fn read(&mut self, buf: &mut [u8]) -> Result<()>;

    /// Bytes consumed so far.
    fn position(&self) -> usize;

    /// Total bytes this reader knows about.
    fn size(&self) -> usize;

    /// Moves the cursor back by `n` bytes, un-consuming them.
    ///
    /// # Panics
    ///
    /// Panics if `n` exceeds [`Reader::position`].
    fn unread(&mut self, n: usize) -> Result<()>;

    /// Bytes left to consume.
    fn remaining(&self) -> usize { self.size().saturating_sub(self.position()) }

    /// Whether at least `n` more bytes can be consumed.
    fn can_read(&self, n: usize) -> bool { self.remaining() >= n }

    /// Whether every known byte has been consumed.
    fn at_end(&self) -> bool { self.position() == self.size() }

    fn read_byte(&mut self) -> Result<u8> {
        let mut buf = [0; 1];
        self.read(&mut buf)?;
        Ok(buf[0])
    }

    fn read2(&mut self) -> Result<u16> {
        let mut buf = [0; 2];
        self.read(&mut buf)?;
        Ok(BigEndian::read_u16(&buf))
    }

    fn read4(&mut self) -> Result<u32> {
        let mut buf = [0; 4];
        self.read(&mut buf)?;
        Ok(BigEndian::read_u32(&buf))
    }

    fn read8(&mut self) -> Result<u64> {
        let mut buf = [0; 8];
        self.read(&mut buf)?;
        Ok(BigEndian::read_u64(&buf))
    }

    fn read_float(&mut self) -> Result<f32> { self.read4().map(f32::from_bits) }

    fn read_double(&mut self) -> Result<f64> { self.read8().map(f64::from_bits) }

    /// Reads the next `len` bytes into an owned buffer.
    fn read_bytes(&mut self, len: usize) -> Result<Bytes> {
        if !self.can_read(len) {
            return Err(Error::EndOfStream);
        }
        let mut out = vec![0; len];
        self.read(&mut out)?;
        Ok(Bytes::from(out))
    }
}

impl<'a, R: Reader + ?Sized> Reader for &'a mut R {
    fn read(&mut self, buf: &mut [u8]) -> Result<()> { (**self).read(buf) }

    fn position(&self) -> usize { (**self).position() }

    fn size(&self) -> usize { (**self).size() }

    fn unread(&mut self, n: usize) -> Result<()> { (**self).unread(n) }

    fn read_bytes(&mut self, len: usize) -> Result<Bytes> { (**self).read_bytes(len) }
}

#[derive(Clone, Debug)]
/// A [`Reader`] over a borrowed byte slice.
///
/// # Example
///
/// ```
/// use mpack::encoding::{MemoryReader, Reader};
///
/// let mut r = MemoryReader::new(&[0x01, 0x02, 0x03]);
///
/// assert_eq!(r.read2().unwrap(), 0x0102);
/// assert_eq!(r.remaining(), 1);
/// ```
pub struct MemoryReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> MemoryReader<'a> {
    pub fn new(data: &'a [u8]) -> Self { MemoryReader { data, pos: 0 } }

    /// The bytes not consumed yet.
    pub fn rest(&self) -> &'a [u8] { &self.data[self.pos..] }
}

impl<'a> Reader for MemoryReader<'a> {
    fn read(&mut self, buf: &mut [u8]) -> Result<()> {
        let end = self.pos + buf.len();
        if end > self.data.len() {
            return Err(Error::EndOfStream);
        }
        buf.copy_from_slice(&self.data[self.pos..end]);
        self.pos = end;
        Ok(())
    }

    fn position(&self) -> usize { self.pos }

    fn size(&self) -> usize { self.data.len() }

    fn unread(&mut self, n: usize) -> Result<()> {
        assert!(n <= self.pos, "unread past the start of the input");
        self.pos -= n;
        Ok(())
    }

    fn read_bytes(&mut self, len: usize) -> Result<Bytes> {
        if !self.can_read(len) {
            return Err(Error::EndOfStream);
        }
        let out = Bytes::from(&self.data[self.pos..self.pos + len]);
        self.pos += len;
        Ok(out)
    }
}

#[derive(Clone, Debug, Default)]
/// A [`Reader`] over input that arrives in pieces.
///
/// Bytes handed to [`StreamReader::feed`] are appended behind the ones already held. A
/// decoder that runs short rolls back and reports how much it needs; feed more and retry.
///
/// # Example
///
/// ```
/// use mpack::encoding::{Decoder, StreamReader};
/// use mpack::Error;
///
/// let mut r = StreamReader::new();
/// r.feed(&[0xcd, 0x01]);
///
/// match r.get_uint() {
///     Err(Error::NeedMoreData(n)) => assert_eq!(n, 3),
///     other => panic!("{:?}", other),
/// }
///
/// r.feed(&[0x02]);
/// assert_eq!(r.get_uint().unwrap(), 0x0102);
/// ```
pub struct StreamReader {
    data: BytesMut,
    pos: usize,
}

impl StreamReader {
    pub fn new() -> Self { Self::default() }

    /// Appends newly arrived bytes.
    pub fn feed(&mut self, bytes: &[u8]) { self.data.extend_from_slice(bytes) }

    /// Drops the consumed prefix. Positions restart at zero.
    pub fn compact(&mut self) {
        self.data.advance(self.pos);
        self.pos = 0;
    }

    /// The bytes not consumed yet.
    pub fn rest(&self) -> &[u8] { &self.data[self.pos..] }
}

impl Reader for StreamReader {
    fn read(&mut self, buf: &mut [u8]) -> Result<()> {
        let end = self.pos + buf.len();
        if end > self.data.len() {
            return Err(Error::EndOfStream);
        }
        buf.copy_from_slice(&self.data[self.pos..end]);
        self.pos = end;
        Ok(())
    }

    fn position(&self) -> usize { self.pos }

    fn size(&self) -> usize { self.data.len() }

    fn unread(&mut self, n: usize) -> Result<()> {
        assert!(n <= self.pos, "unread past the start of the input");
        self.pos -= n;
        Ok(())
    }
}

#[derive(Debug)]
/// A [`Reader`] over a file.
///
/// The size is probed when the reader is created. If the file is still being written,
/// [`FileReader::refresh_size`] picks up whatever has been appended since.
pub struct FileReader {
    file: BufReader<File>,
    pos: usize,
    size: usize,
}

impl FileReader {
    /// Opens `path` for reading and probes its size.
    ///
    /// # Errors
    ///
    /// Returns [`Error::File`] if the file cannot be opened or seeked.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let mut file = File::open(path).map_err(|e| Error::file("failed to open file", e))?;

        let size = file
            .seek(SeekFrom::End(0))
            .map_err(|e| Error::file("fseek failed", e))?;
        file.seek(SeekFrom::Start(0))
            .map_err(|e| Error::file("fseek failed", e))?;

        debug!(path = %path.display(), size, "opened file for reading");
        Ok(Self::new(file, size as usize))
    }

    /// Wraps an open file positioned at its start, holding `size` bytes.
    pub fn new(file: File, size: usize) -> Self {
        FileReader {
            file: BufReader::new(file),
            pos: 0,
            size,
        }
    }

    /// Re-probes the file size.
    ///
    /// # Errors
    ///
    /// Returns [`Error::File`] if the metadata cannot be read, or if the file has shrunk
    /// below the current position. The known size is left unchanged in both cases.
    pub fn refresh_size(&mut self) -> Result<usize> {
        let meta = self
            .file
            .get_ref()
            .metadata()
            .map_err(|e| Error::file("failed to get file size", e))?;
        let size = meta.len() as usize;
        if size < self.pos {
            return Err(Error::file(
                "file shrank below the read position",
                io::Error::new(
                    io::ErrorKind::UnexpectedEof,
                    format!("size {} is below position {}", size, self.pos),
                ),
            ));
        }
        self.size = size;
        Ok(self.size)
    }
}

impl Reader for FileReader {
    fn read(&mut self, buf: &mut [u8]) -> Result<()> {
        if !self.can_read(buf.len()) {
            return Err(Error::EndOfStream);
        }
        if let Err(e) = self.file.read_exact(buf) {
            // a partial read has moved the file, put it back under the cursor
            self.file
                .seek(SeekFrom::Start(self.pos as u64))
                .map_err(|e| Error::file("fseek failed", e))?;
            return Err(Error::file("read error", e));
        }
        self.pos += buf.len();
        Ok(())
    }

    fn position(&self) -> usize { self.pos }

    fn size(&self) -> usize { self.size }

    fn unread(&mut self, n: usize) -> Result<()> {
        assert!(n <= self.pos, "unread past the start of the input");
        self.file
            .seek_relative(-(n as i64))
            .map_err(|e| Error::file("fseek failed", e))?;
        self.pos -= n;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{fs, io::Write};

    #[test]
    fn memory_reader_cursor() {
        let data = [0xab, 0, 1, 0, 0, 0, 2, 0, 0, 0, 0, 0, 0, 0, 3];
        let mut r = MemoryReader::new(&data);

        assert_eq!(r.size(), 15);
        assert_eq!(r.read_byte().unwrap(), 0xab);
        assert_eq!(r.read2().unwrap(), 1);
        assert_eq!(r.read4().unwrap(), 2);
        assert_eq!(r.position(), 7);
        assert_eq!(r.read8().unwrap(), 3);
        assert!(r.at_end());

        r.unread(8).unwrap();
        assert_eq!(r.remaining(), 8);
        assert_eq!(r.rest(), &data[7..]);
    }

    #[test]
    fn short_read_consumes_nothing() {
        let mut r = MemoryReader::new(&[1, 2, 3]);
        match r.read4() {
            Err(Error::EndOfStream) => {}
            other => panic!("expected end of stream, got {:?}", other),
        }
        assert_eq!(r.position(), 0);
        assert!(r.can_read(3));
        assert!(!r.can_read(4));
    }

    #[test]
    fn floats() {
        let mut r = MemoryReader::new(&[0x3f, 0x80, 0, 0, 0xc0, 0, 0, 0, 0, 0, 0, 0]);
        assert_eq!(r.read_float().unwrap(), 1.0);
        assert_eq!(r.read_double().unwrap(), -2.0);
    }

    #[test]
    fn stream_reader_feed_and_compact() {
        let mut r = StreamReader::new();
        assert!(r.at_end());

        r.feed(&[1, 2]);
        assert_eq!(r.read_byte().unwrap(), 1);
        assert!(r.read2().is_err());

        r.feed(&[3]);
        assert_eq!(r.read2().unwrap(), 0x0203);

        r.feed(&[4, 5]);
        r.compact();
        assert_eq!(r.position(), 0);
        assert_eq!(r.size(), 2);
        assert_eq!(r.rest(), &[4, 5]);
        assert_eq!(r.read_bytes(2).unwrap(), Bytes::from(&[4u8, 5][..]));
    }

    #[test]
    fn file_reader() {
        let path = std::env::temp_dir().join(format!("mpack-reader-{}", std::process::id()));
        fs::write(&path, &[0, 1, 2, 3, 4]).unwrap();

        let mut r = FileReader::open(&path).unwrap();
        assert_eq!(r.size(), 5);
        assert_eq!(r.read2().unwrap(), 1);
        r.unread(1).unwrap();
        assert_eq!(r.read_byte().unwrap(), 1);
        assert_eq!(r.read_bytes(3).unwrap(), Bytes::from(&[2u8, 3, 4][..]));
        assert!(r.at_end());
        match r.read_byte() {
            Err(Error::EndOfStream) => {}
            other => panic!("expected end of stream, got {:?}", other),
        }

        fs::OpenOptions::new()
            .append(true)
            .open(&path)
            .unwrap()
            .write_all(&[5])
            .unwrap();
        assert_eq!(r.refresh_size().unwrap(), 6);
        assert_eq!(r.read_byte().unwrap(), 5);

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn file_reader_refuses_shrunk_file() {
        let path = std::env::temp_dir().join(format!("mpack-shrink-{}", std::process::id()));
        fs::write(&path, &[0, 1, 2, 3, 4]).unwrap();

        let mut r = FileReader::open(&path).unwrap();
        r.read_bytes(5).unwrap();
        fs::OpenOptions::new()
            .write(true)
            .open(&path)
            .unwrap()
            .set_len(2)
            .unwrap();

        match r.refresh_size() {
            Err(Error::File { reason, .. }) => {
                assert_eq!(reason, "file shrank below the read position")
            }
            other => panic!("expected file error, got {:?}", other),
        }
        assert_eq!(r.position(), 5);
        assert_eq!(r.size(), 5);
        assert!(r.at_end());
        assert_eq!(r.remaining(), 0);
        assert!(!r.can_read(1));

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn failed_file_read_keeps_cursor() {
        let path = std::env::temp_dir().join(format!("mpack-partial-{}", std::process::id()));
        fs::write(&path, &[0, 1, 2, 3, 4]).unwrap();

        let mut r = FileReader::open(&path).unwrap();
        fs::OpenOptions::new()
            .write(true)
            .open(&path)
            .unwrap()
            .set_len(2)
            .unwrap();

        // the probed size still says 5, the file only yields 2
        match r.read4() {
            Err(Error::File { reason, .. }) => assert_eq!(reason, "read error"),
            other => panic!("expected file error, got {:?}", other),
        }
        assert_eq!(r.position(), 0);

        fs::write(&path, &[0, 1, 2, 3, 4]).unwrap();
        assert_eq!(r.read4().unwrap(), 0x0001_0203);
        assert_eq!(r.read_byte().unwrap(), 4);

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn file_reader_open_failure() {
        let path = std::env::temp_dir().join("mpack-no-such-file-for-reading");
        match FileReader::open(&path) {
            Err(Error::File { reason, .. }) => assert_eq!(reason, "failed to open file"),
            other => panic!("expected file error, got {:?}", other),
        }
    }
}
