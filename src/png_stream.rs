// Reference used for this module:
// http://www.libpng.org/pub/png/spec/1.2/PNG-Structure.html

use crate::error::{Error, Result};
use crc32fast::Hasher;
use std::{
    borrow::Cow,
    fs::File,
    io::{self, BufReader, BufWriter, ErrorKind, Read, Write},
    path::Path,
};

pub const PNG_MAGIC: [u8; 8] = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];

/// Bytes a chunk occupies beyond its data: length, type tag and CRC.
pub const CHUNK_OVERHEAD: u64 = 4 + 4 + 4;

/// Largest chunk data length a PNG allows (2^31-1).
pub const MAX_CHUNK_DATA_LEN: u64 = 0x7FFF_FFFF;

/// One length-prefixed, typed, checksummed record.
///
/// Chunks read from a file keep the CRC they were stored with, valid or not.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    pub type_tag: [u8; 4],
    pub data: Vec<u8>,
    pub crc32: u32,
}

impl Chunk {
    /// Build a chunk with a freshly computed CRC.
    pub fn new(type_tag: [u8; 4], data: Vec<u8>) -> Self {
        let crc32 = chunk_crc(&type_tag, &data);
        Self {
            type_tag,
            data,
            crc32,
        }
    }

    pub fn type_str(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.type_tag)
    }

    pub fn encoded_len(&self) -> u64 {
        CHUNK_OVERHEAD + self.data.len() as u64
    }

    pub fn crc_is_valid(&self) -> bool {
        chunk_crc(&self.type_tag, &self.data) == self.crc32
    }

    fn write_to<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        let len = u32::try_from(self.data.len()).map_err(|_| {
            io::Error::new(ErrorKind::InvalidInput, "chunk data too long for length field")
        })?;
        writer.write_all(&len.to_be_bytes())?;
        writer.write_all(&self.type_tag)?;
        writer.write_all(&self.data)?;
        writer.write_all(&self.crc32.to_be_bytes())
    }
}

/// CRC-32 over `type_tag ‖ data`, as stored in the chunk footer.
pub fn chunk_crc(type_tag: &[u8; 4], data: &[u8]) -> u32 {
    let mut hasher = Hasher::new();
    hasher.update(type_tag);
    hasher.update(data);
    hasher.finalize()
}

/// Ordered chunks of a PNG file, signature excluded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChunkStream {
    chunks: Vec<Chunk>,
}

impl ChunkStream {
    pub fn new(chunks: Vec<Chunk>) -> Self {
        Self { chunks }
    }

    /// Parse a PNG held in memory.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        ChunkReader::new(bytes, bytes.len() as u64).read_stream()
    }

    /// Parse the PNG at `path`. The file handle is closed before returning.
    pub fn read_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = match File::open(path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(Error::FileNotFound(path.to_path_buf()))
            }
            Err(e) => return Err(e.into()),
        };
        let len = file.metadata()?.len();
        ChunkReader::new(BufReader::new(file), len).read_stream()
    }

    pub fn chunks(&self) -> &[Chunk] {
        &self.chunks
    }

    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    /// Serialized size: signature plus every chunk with its overhead.
    pub fn encoded_len(&self) -> u64 {
        PNG_MAGIC.len() as u64 + self.chunks.iter().map(Chunk::encoded_len).sum::<u64>()
    }

    /// Insert `chunk` immediately before the final chunk, whatever its type.
    ///
    /// With a single chunk this inserts at the front. An empty stream has no
    /// final chunk and is rejected.
    pub fn insert_before_last(&mut self, chunk: Chunk) -> Result<()> {
        let Some(last) = self.chunks.len().checked_sub(1) else {
            return Err(Error::MalformedStream);
        };
        self.chunks.insert(last, chunk);
        Ok(())
    }

    /// Emit the signature followed by every chunk, unchanged.
    pub fn write_to<W: Write>(&self, mut writer: W) -> io::Result<()> {
        writer.write_all(&PNG_MAGIC)?;
        for chunk in &self.chunks {
            chunk.write_to(&mut writer)?;
        }
        writer.flush()
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.encoded_len() as usize);
        // Writing into a Vec cannot fail
        _ = self.write_to(&mut out);
        out
    }

    /// Write the stream to `writer` through a buffer.
    pub fn write_buffered<W: Write>(&self, writer: W) -> io::Result<()> {
        self.write_to(BufWriter::new(writer))
    }
}

/// Sequential chunk reader over a source of known total length.
pub struct ChunkReader<R> {
    reader: R,
    len: u64,
    offset: u64,
}

impl<R: Read> ChunkReader<R> {
    pub fn new(reader: R, len: u64) -> Self {
        Self {
            reader,
            len,
            offset: 0,
        }
    }

    pub fn read_stream(mut self) -> Result<ChunkStream> {
        // Read magic
        let mut magic = [0u8; 8];
        if self.remaining() < magic.len() as u64 {
            return Err(Error::NotAPng);
        }
        self.read_exact(&mut magic)?;
        if magic != PNG_MAGIC {
            return Err(Error::NotAPng);
        }

        let mut chunks = Vec::new();
        while self.remaining() > 0 {
            chunks.push(self.read_chunk()?);
        }

        Ok(ChunkStream::new(chunks))
    }

    fn read_chunk(&mut self) -> Result<Chunk> {
        // Read chunk length and type
        let mut buf = [0u8; 8];
        self.read_exact(&mut buf)?;
        let chunk_len = u32::from_be_bytes([buf[0], buf[1], buf[2], buf[3]]);
        let type_tag = [buf[4], buf[5], buf[6], buf[7]];

        // Data and CRC footer must both fit before anything is allocated
        self.ensure_remaining(chunk_len as u64 + 4)?;
        let mut data = vec![0u8; chunk_len as usize];
        self.read_exact(&mut data)?;

        let mut crc = [0u8; 4];
        self.read_exact(&mut crc)?;

        Ok(Chunk {
            type_tag,
            data,
            crc32: u32::from_be_bytes(crc),
        })
    }

    fn read_exact(&mut self, buf: &mut [u8]) -> Result<()> {
        let needed = buf.len() as u64;
        self.ensure_remaining(needed)?;
        match self.reader.read_exact(buf) {
            Ok(()) => (),
            Err(e) if e.kind() == ErrorKind::UnexpectedEof => {
                // Source was shorter than its reported length
                return Err(self.truncated(needed));
            }
            Err(e) => return Err(e.into()),
        }
        self.offset += needed;
        Ok(())
    }

    fn ensure_remaining(&self, needed: u64) -> Result<()> {
        if needed > self.remaining() {
            return Err(self.truncated(needed));
        }
        Ok(())
    }

    fn truncated(&self, needed: u64) -> Error {
        Error::TruncatedFile {
            offset: self.offset,
            needed,
            remaining: self.remaining(),
        }
    }

    fn remaining(&self) -> u64 {
        self.len.saturating_sub(self.offset)
    }
}
