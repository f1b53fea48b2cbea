use std::fs::File;
use std::io::{Cursor, Read, Seek, SeekFrom};
use std::path::Path;

use binrw::{BinRead, Endian};

use crate::error::{Error, Result};

pub trait ReadSeek: Read + Seek {}
impl<T: Read + Seek> ReadSeek for T {}

/// Cursor over one input archive.
///
/// The position is tracked explicitly so every step of a directory parser can see (and log)
/// where it is. All reads are checked against the total length first: asking for bytes past
/// the end is a `TruncatedInput` error (`TruncatedRecord` for binrw structs), never a short read.
pub struct ArchiveReader {
    inner: Box<dyn ReadSeek>,
    len: u64,
    pos: u64,
}

impl ArchiveReader {
    pub fn open(path: &Path) -> Result<Self> {
        let file = File::open(path)?;
        Self::new(file)
    }

    pub fn new<R: Read + Seek + 'static>(mut inner: R) -> Result<Self> {
        let len = inner.seek(SeekFrom::End(0))?;
        inner.seek(SeekFrom::Start(0))?;
        Ok(Self { inner: Box::new(inner), len, pos: 0 })
    }

    pub fn from_bytes(data: Vec<u8>) -> Self {
        let len = data.len() as u64;
        Self { inner: Box::new(Cursor::new(data)), len, pos: 0 }
    }

    pub fn len(&self) -> u64 {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn position(&self) -> u64 {
        self.pos
    }

    pub fn remaining(&self) -> u64 {
        self.len.saturating_sub(self.pos)
    }

    pub fn at_end(&self) -> bool {
        self.pos >= self.len
    }

    /// Fails unless `offset..offset + length` lies inside the input.
    pub fn check_range(&self, what: &str, offset: u64, length: u64) -> Result<()> {
        match offset.checked_add(length) {
            Some(end) if end <= self.len => Ok(()),
            _ => Err(Error::TruncatedInput {
                what: what.to_string(),
                offset,
                length,
                available: self.len,
            }),
        }
    }

    pub fn seek(&mut self, offset: u64) -> Result<()> {
        self.check_range("seek target", offset, 0)?;
        self.inner.seek(SeekFrom::Start(offset))?;
        self.pos = offset;
        Ok(())
    }

    pub fn skip(&mut self, count: u64) -> Result<()> {
        self.check_range("skipped bytes", self.pos, count)?;
        self.seek(self.pos + count)
    }

    pub fn read_bytes(&mut self, length: usize) -> Result<Vec<u8>> {
        self.check_range("read", self.pos, length as u64)?;
        let mut buf = vec![0u8; length];
        self.inner.read_exact(&mut buf)?;
        self.pos += length as u64;
        Ok(buf)
    }

    pub fn read_at(&mut self, offset: u64, length: u64) -> Result<Vec<u8>> {
        self.check_range("read", offset, length)?;
        self.seek(offset)?;
        self.read_bytes(length as usize)
    }

    pub fn read_all(&mut self) -> Result<Vec<u8>> {
        self.read_at(0, self.len)
    }

    /// Reads up to `size` bytes at `offset` without moving the cursor. Near the end of the
    /// input the result is shorter; past the end it is empty. Used by detectors.
    pub fn peek(&mut self, offset: u64, size: usize) -> Result<Vec<u8>> {
        if offset >= self.len {
            return Ok(Vec::new());
        }
        let available = (self.len - offset).min(size as u64) as usize;
        self.inner.seek(SeekFrom::Start(offset))?;
        let mut buffer = vec![0u8; available];
        self.inner.read_exact(&mut buffer)?;

        // put the cursor back where the parser left it
        self.inner.seek(SeekFrom::Start(self.pos))?;
        Ok(buffer)
    }

    pub fn read_le<T>(&mut self) -> Result<T>
    where
        T: for<'a> BinRead<Args<'a> = ()>,
    {
        self.read_type(Endian::Little)
    }

    pub fn read_be<T>(&mut self) -> Result<T>
    where
        T: for<'a> BinRead<Args<'a> = ()>,
    {
        self.read_type(Endian::Big)
    }

    fn read_type<T>(&mut self, endian: Endian) -> Result<T>
    where
        T: for<'a> BinRead<Args<'a> = ()>,
    {
        let start = self.pos;
        match T::read_options(&mut self.inner, endian, ()) {
            Ok(value) => {
                self.pos = self.inner.stream_position()?;
                Ok(value)
            }
            Err(err) if err.is_eof() => {
                let what = std::any::type_name::<T>().rsplit("::").next().unwrap_or("record");
                // count-driven records have no fixed size, so only the bytes left are known
                Err(Error::TruncatedRecord {
                    what: what.to_string(),
                    offset: start,
                    available: self.len.saturating_sub(start),
                })
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Consumes `magic.len()` bytes and checks them against `magic`.
    pub fn expect_magic(&mut self, magic: &[u8], format: &'static str) -> Result<()> {
        let start = self.pos;
        if self.remaining() < magic.len() as u64 {
            return Err(Error::mismatch(format, "file is shorter than its signature"));
        }
        let found = self.read_bytes(magic.len())?;
        if found != magic {
            return Err(Error::mismatch(
                format,
                format!("expected magic {:02x?} at {:#x}, found {:02x?}", magic, start, found),
            ));
        }
        Ok(())
    }

    /// Reads a NUL-terminated byte string, one byte at a time. The terminator is consumed
    /// but not returned.
    pub fn read_cstring(&mut self) -> Result<Vec<u8>> {
        let start = self.pos;
        let mut out = Vec::new();
        loop {
            if self.at_end() {
                return Err(Error::TruncatedInput {
                    what: "unterminated name".to_string(),
                    offset: start,
                    length: out.len() as u64 + 1,
                    available: self.len,
                });
            }
            let byte = self.read_le::<u8>()?;
            if byte == 0 {
                return Ok(out);
            }
            out.push(byte);
        }
    }
}
