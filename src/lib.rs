//! Pad PNG files to a specific size.
//!
//! The PNG is parsed into its chunks, a `tEXt` chunk filled with
//! [`FILLER_BYTE`] is inserted before the final chunk, and the chunks are
//! written back out. Chunks other than the padding are copied verbatim,
//! including their stored CRCs.
//!
//! ```no_run
//! use pngpadder::{pad_file, SizeDirective};
//!
//! let report = pad_file("in.png", "out.png", SizeDirective::ToSize(4096))?;
//! assert_eq!(report.output_size, 4096);
//! # Ok::<(), pngpadder::Error>(())
//! ```

pub mod error;
pub mod padding;
pub mod png_stream;
pub mod util;

pub use error::{Error, Result};
pub use padding::{pad, padding_chunk, resolve, SizeDirective, FILLER_BYTE};
pub use png_stream::{Chunk, ChunkReader, ChunkStream, PNG_MAGIC};

use std::path::Path;

/// Sizes involved in one padding run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PadReport {
    pub input_size: u64,
    pub pad_amount: u64,
    pub output_size: u64,
}

/// Pad the PNG at `input` according to `directive` and write it to `output`.
///
/// `output` is replaced only once the padded image has been fully written.
pub fn pad_file<I, O>(input: I, output: O, directive: SizeDirective) -> Result<PadReport>
where
    I: AsRef<Path>,
    O: AsRef<Path>,
{
    let input = input.as_ref();
    if !input.try_exists()? {
        return Err(Error::FileNotFound(input.to_path_buf()));
    }

    let mut stream = ChunkStream::read_file(input)?;
    let report = pad_stream(&mut stream, directive)?;

    util::write_atomically(output, |file| stream.write_buffered(file))?;
    Ok(report)
}

/// In-memory variant of [`pad_file`].
pub fn pad_bytes(png: &[u8], directive: SizeDirective) -> Result<Vec<u8>> {
    let mut stream = ChunkStream::from_bytes(png)?;
    pad_stream(&mut stream, directive)?;
    Ok(stream.to_bytes())
}

fn pad_stream(stream: &mut ChunkStream, directive: SizeDirective) -> Result<PadReport> {
    let input_size = stream.encoded_len();
    let pad_amount = resolve(directive, input_size)?;
    pad(stream, pad_amount)?;
    Ok(PadReport {
        input_size,
        pad_amount,
        output_size: stream.encoded_len(),
    })
}
