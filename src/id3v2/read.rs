use std::io::prelude::*;

use tracing::debug;

use crate::id3v2::structure::{Frame, FrameHeader};
use crate::id3v2::tools::{decode_size, is_frame_id};
use crate::id3v2::{FLAG_SIZE, FRAME_HEADER_SIZE, FRAME_ID_SIZE, FRAME_SIZE_SIZE, HEADER_SIZE};
use crate::tools::{read_field, read_field_or_end, read_vec, skip};
use crate::{Error, CATALOG};

/// What sits at the current position of the tag region.
#[derive(Debug)]
pub enum Next {
    Frame(FrameHeader),
    // not a frame id; the bytes are handed back so they can be copied
    End([u8; FRAME_ID_SIZE]),
    Eof,
}

pub fn frame_header<T: Read>(input: &mut T, offset: u64) -> Result<Next, Error> {
    // 4: Frame ID      $xx xx xx xx
    // 4: Size          byte-reversed
    // 2: Flags         $xx xx
    let mut id = [0; FRAME_ID_SIZE];
    if !read_field_or_end(input, &mut id, offset, "frame id")? {
        return Ok(Next::Eof);
    }
    if !is_frame_id(&id) {
        return Ok(Next::End(id));
    }

    let mut size = [0; FRAME_SIZE_SIZE];
    read_field(input, &mut size, offset + 4, "frame size")?;

    let mut flags = [0; FLAG_SIZE];
    read_field(input, &mut flags, offset + 8, "frame flags")?;

    Ok(Next::Frame(FrameHeader {
        id,
        size: decode_size(size),
        flags,
    }))
}

/// Walks the frames of a tag, yielding the supported ones.
///
/// The input must sit right behind the tag header. Frames with ids outside the
/// catalog are skipped. The walk ends at `end`, after `limit` yielded frames,
/// at the first id that is not a frame id, or at the first error.
pub struct FrameReader<R> {
    input: R,
    position: u64,
    end: u64,
    limit: usize,
    found: usize,
    done: bool,
}

impl<R: Read> FrameReader<R> {
    pub fn new(input: R, end: u64) -> FrameReader<R> {
        FrameReader {
            input,
            position: HEADER_SIZE as u64,
            end,
            limit: CATALOG.len(),
            found: 0,
            done: false,
        }
    }

    pub fn with_limit(mut self, limit: usize) -> FrameReader<R> {
        self.limit = limit;
        self
    }

    /// Offset of the next unread byte, counted from the start of the tag.
    pub fn position(&self) -> u64 {
        self.position
    }

    fn next_frame(&mut self) -> Result<Option<Frame>, Error> {
        while self.found < self.limit && self.position < self.end {
            let header = match frame_header(&mut self.input, self.position)? {
                Next::Frame(h) => h,
                Next::End(_) | Next::Eof => break,
            };
            self.position += FRAME_HEADER_SIZE as u64;

            let kind = match header.kind() {
                Some(k) => k,
                None => {
                    debug!(frame = %header.name(), size = header.size, "skipping frame");
                    skip(&mut self.input, header.size as u64, self.position, "frame body")?;
                    self.position += header.size as u64;
                    continue;
                }
            };

            let len = header.payload_len().ok_or_else(|| Error::FrameSize {
                id: header.name(),
                size: 0,
            })?;

            // encoding byte, not interpreted
            let mut encoding = [0; 1];
            read_field(&mut self.input, &mut encoding, self.position, "frame encoding")?;

            let payload = read_vec(&mut self.input, len as u64, self.position + 1, "frame payload")?;
            self.position += header.size as u64;
            self.found += 1;

            debug!(frame = %header.name(), size = header.size, "read frame");
            return Ok(Some(Frame {
                kind,
                size: header.size,
                payload,
            }));
        }
        Ok(None)
    }
}

impl<R: Read> Iterator for FrameReader<R> {
    type Item = Result<Frame, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.next_frame() {
            Ok(Some(frame)) => Some(Ok(frame)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}
