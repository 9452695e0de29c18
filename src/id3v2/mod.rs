use std::io::prelude::*;
use std::io::SeekFrom;

use crate::tools::read_field;
use crate::Error;

mod read;
mod regex;
pub mod structure;
pub mod tools;
mod write;

pub use self::read::FrameReader;
pub use self::write::{rewrite, Rewrite};

use self::structure::TagCollection;

// tag header, copied through and never looked at
pub const HEADER_SIZE: usize = 10;

pub const FRAME_ID_SIZE: usize = 4;
pub const FRAME_SIZE_SIZE: usize = 4;
pub const FLAG_SIZE: usize = 2;
pub const FRAME_HEADER_SIZE: usize = FRAME_ID_SIZE + FRAME_SIZE_SIZE + FLAG_SIZE;

/// Collect up to `limit` supported frames from a whole tagged stream.
///
/// Any failure throws away whatever was collected so far.
pub fn get<T: Read + Seek>(input: &mut T, limit: usize) -> Result<TagCollection, Error> {
    let end = input.seek(SeekFrom::End(0))?;
    input.seek(SeekFrom::Start(0))?;

    let mut header = [0; HEADER_SIZE];
    read_field(input, &mut header, 0, "tag header")?;

    let frames = FrameReader::new(input, end)
        .with_limit(limit)
        .collect::<Result<Vec<_>, Error>>()?;
    Ok(TagCollection::new(frames))
}

#[cfg(test)]
mod tests;
