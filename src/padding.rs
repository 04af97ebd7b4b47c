use crate::{
    error::{Error, Result},
    png_stream::{Chunk, ChunkStream, CHUNK_OVERHEAD, MAX_CHUNK_DATA_LEN},
};

/// Byte repeated through the padding chunk's data.
pub const FILLER_BYTE: u8 = b'a';

/// Ancillary text chunk, which readers that skip unknown text still accept.
pub const PADDING_CHUNK_TYPE: [u8; 4] = *b"tEXt";

/// How much bigger the output should be.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizeDirective {
    /// Grow the file to exactly this many bytes
    ToSize(i64),
    /// Grow the file by this many bytes
    ByDelta(i64),
}

/// Number of bytes to add for `directive` to a file of `current_size` bytes.
///
/// Only `ToSize` is checked against the current size. Either way the result
/// must cover a whole empty chunk and its data must fit one chunk.
pub fn resolve(directive: SizeDirective, current_size: u64) -> Result<u64> {
    let pad_amount = match directive {
        SizeDirective::ToSize(target) => {
            if target < 0 || (target as u64) < current_size {
                return Err(Error::TargetTooSmall {
                    current: current_size,
                    target,
                });
            }
            target - current_size as i64
        }
        SizeDirective::ByDelta(extra) => extra,
    };

    if pad_amount < CHUNK_OVERHEAD as i64 {
        return Err(Error::PaddingTooSmall(pad_amount));
    }
    let pad_amount = pad_amount as u64;
    check_not_too_large(pad_amount)?;
    Ok(pad_amount)
}

fn check_not_too_large(pad_amount: u64) -> Result<()> {
    let max = MAX_CHUNK_DATA_LEN + CHUNK_OVERHEAD;
    if pad_amount > max {
        return Err(Error::PaddingTooLarge {
            requested: pad_amount,
            max,
        });
    }
    Ok(())
}

/// The chunk that adds exactly `pad_amount` bytes once serialized.
pub fn padding_chunk(pad_amount: u64) -> Result<Chunk> {
    let Some(data_len) = pad_amount.checked_sub(CHUNK_OVERHEAD) else {
        return Err(Error::PaddingTooSmall(pad_amount as i64));
    };
    check_not_too_large(pad_amount)?;
    Ok(Chunk::new(
        PADDING_CHUNK_TYPE,
        vec![FILLER_BYTE; data_len as usize],
    ))
}

/// Insert one padding chunk of `pad_amount` bytes before the final chunk.
pub fn pad(stream: &mut ChunkStream, pad_amount: u64) -> Result<()> {
    let chunk = padding_chunk(pad_amount)?;
    stream.insert_before_last(chunk)
}
