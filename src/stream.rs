//! Byte-stream capability consumed by the codec.
//!
//! The codec never touches files or sockets itself; callers hand it anything
//! implementing [`Stream`]. Opening maps to constructing an implementation
//! and closing to dropping it.

use alloc::vec::Vec;

use crate::error::TgaError;

/// Position for [`Stream::seek`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SeekFrom {
    /// Offset from the start of the stream.
    Start(u64),
    /// Signed offset from the current position.
    Current(i64),
    /// Signed offset from the end of the stream.
    End(i64),
}

/// Byte stream the codec reads from and writes to.
///
/// `read` and `write` transfer as many bytes as the medium allows and return
/// the count. The codec goes through [`Stream::read_exact`] and
/// [`Stream::write_all`], which treat a short count as a hard failure — it
/// never retries or proceeds on partial transfers. Implementations that only
/// support one direction fail the other at call time, the same way a
/// read-mode file handle rejects writes.
pub trait Stream {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, TgaError>;
    fn write(&mut self, buf: &[u8]) -> Result<usize, TgaError>;
    fn seek(&mut self, pos: SeekFrom) -> Result<u64, TgaError>;

    /// Fill `buf` completely or fail with [`TgaError::ReadFailed`].
    fn read_exact(&mut self, buf: &mut [u8]) -> Result<(), TgaError> {
        if self.read(buf)? == buf.len() {
            Ok(())
        } else {
            Err(TgaError::ReadFailed)
        }
    }

    /// Write `buf` completely or fail with [`TgaError::WriteFailed`].
    fn write_all(&mut self, buf: &[u8]) -> Result<(), TgaError> {
        if self.write(buf)? == buf.len() {
            Ok(())
        } else {
            Err(TgaError::WriteFailed)
        }
    }
}

/// Read-only stream over a borrowed byte slice.
#[derive(Debug)]
pub struct MemStream<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> MemStream<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Current read position.
    pub fn position(&self) -> usize {
        self.pos
    }
}

impl Stream for MemStream<'_> {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, TgaError> {
        let n = buf.len().min(self.data.len() - self.pos);
        buf[..n].copy_from_slice(&self.data[self.pos..self.pos + n]);
        self.pos += n;
        Ok(n)
    }

    fn write(&mut self, _buf: &[u8]) -> Result<usize, TgaError> {
        Err(TgaError::WriteFailed)
    }

    fn seek(&mut self, pos: SeekFrom) -> Result<u64, TgaError> {
        self.pos = resolve_seek(pos, self.pos, self.data.len())?;
        Ok(self.pos as u64)
    }
}

/// Growable in-memory stream, readable and writable.
#[derive(Debug, Default)]
pub struct VecStream {
    buf: Vec<u8>,
    pos: usize,
}

impl VecStream {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_vec(buf: Vec<u8>) -> Self {
        Self { buf, pos: 0 }
    }

    /// Consume the stream, returning the accumulated bytes.
    pub fn into_inner(self) -> Vec<u8> {
        self.buf
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.buf
    }
}

impl Stream for VecStream {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, TgaError> {
        let n = buf.len().min(self.buf.len() - self.pos);
        buf[..n].copy_from_slice(&self.buf[self.pos..self.pos + n]);
        self.pos += n;
        Ok(n)
    }

    fn write(&mut self, buf: &[u8]) -> Result<usize, TgaError> {
        let overlap = buf.len().min(self.buf.len() - self.pos);
        self.buf[self.pos..self.pos + overlap].copy_from_slice(&buf[..overlap]);
        self.buf.extend_from_slice(&buf[overlap..]);
        self.pos += buf.len();
        Ok(buf.len())
    }

    fn seek(&mut self, pos: SeekFrom) -> Result<u64, TgaError> {
        self.pos = resolve_seek(pos, self.pos, self.buf.len())?;
        Ok(self.pos as u64)
    }
}

fn resolve_seek(pos: SeekFrom, current: usize, len: usize) -> Result<usize, TgaError> {
    let target = match pos {
        SeekFrom::Start(offset) => offset
            .try_into()
            .map_err(|_| TgaError::ReadFailed)?,
        SeekFrom::Current(offset) => current
            .checked_add_signed(offset as isize)
            .ok_or(TgaError::ReadFailed)?,
        SeekFrom::End(offset) => len
            .checked_add_signed(offset as isize)
            .ok_or(TgaError::ReadFailed)?,
    };
    if target > len {
        return Err(TgaError::ReadFailed);
    }
    Ok(target)
}

/// File-backed stream.
#[cfg(feature = "std")]
#[derive(Debug)]
pub struct FileStream {
    file: std::fs::File,
}

#[cfg(feature = "std")]
impl FileStream {
    /// Open an existing file for reading.
    pub fn open(path: impl AsRef<std::path::Path>) -> Result<Self, TgaError> {
        let path = path.as_ref();
        let file = std::fs::File::open(path)
            .map_err(|e| TgaError::OpenFailed(alloc::format!("{}: {e}", path.display())))?;
        Ok(Self { file })
    }

    /// Create (or truncate) a file for writing.
    pub fn create(path: impl AsRef<std::path::Path>) -> Result<Self, TgaError> {
        let path = path.as_ref();
        let file = std::fs::File::create(path)
            .map_err(|e| TgaError::OpenFailed(alloc::format!("{}: {e}", path.display())))?;
        Ok(Self { file })
    }
}

#[cfg(feature = "std")]
impl Stream for FileStream {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, TgaError> {
        use std::io::Read;
        // fread semantics: fill as much as possible, stop only at EOF or error.
        let mut total = 0;
        while total < buf.len() {
            match self.file.read(&mut buf[total..]) {
                Ok(0) => break,
                Ok(n) => total += n,
                Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
                Err(_) => return Err(TgaError::ReadFailed),
            }
        }
        Ok(total)
    }

    fn write(&mut self, buf: &[u8]) -> Result<usize, TgaError> {
        use std::io::Write;
        self.file
            .write_all(buf)
            .map_err(|_| TgaError::WriteFailed)?;
        Ok(buf.len())
    }

    fn seek(&mut self, pos: SeekFrom) -> Result<u64, TgaError> {
        use std::io::Seek;
        let pos = match pos {
            SeekFrom::Start(o) => std::io::SeekFrom::Start(o),
            SeekFrom::Current(o) => std::io::SeekFrom::Current(o),
            SeekFrom::End(o) => std::io::SeekFrom::End(o),
        };
        self.file.seek(pos).map_err(|_| TgaError::ReadFailed)
    }
}
