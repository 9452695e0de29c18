use std::convert::TryFrom;
use std::io::prelude::*;

use tracing::{debug, info, warn};

use crate::id3v2::read::{frame_header, Next};
use crate::id3v2::structure::FrameHeader;
use crate::id3v2::{FRAME_HEADER_SIZE, HEADER_SIZE};
use crate::tools::{copy_rest, read_field, read_vec, write_field};
use crate::{Error, FrameKind};

/// What a rewrite pass did to the stream.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Rewrite {
    Replaced { old_size: u32, new_size: u32 },
    // target frame never showed up; output is a plain copy
    Unchanged,
}

/// Copy a tagged stream from `input` to `output`, swapping the payload of the
/// first `target` frame for `payload`.
///
/// Every frame ahead of the target is copied as read. The target keeps its
/// id, flags and encoding byte; its size becomes `payload.len() + 1`. From
/// there on the rest of the input is copied byte for byte, so later frames
/// and the audio data are untouched.
///
/// Nothing is ever written back over `output`: each frame is held until it is
/// known whether it is the target, so any plain `Write` will do.
pub fn rewrite<R: Read, W: Write>(
    input: &mut R,
    output: &mut W,
    target: FrameKind,
    payload: &[u8],
) -> Result<Rewrite, Error> {
    let new_size = u32::try_from(payload.len())
        .ok()
        .and_then(|len| len.checked_add(1))
        .ok_or_else(|| Error::FrameSize {
            id: target.to_string(),
            size: payload.len() as u64 + 1,
        })?;

    let mut header = [0; HEADER_SIZE];
    read_field(input, &mut header, 0, "tag header")?;
    write_field(output, &header)?;

    let mut offset = HEADER_SIZE as u64;
    let mut outcome = Rewrite::Unchanged;

    loop {
        let frame = match frame_header(input, offset)? {
            Next::Frame(h) => h,
            Next::End(id) => {
                write_field(output, &id)?;
                break;
            }
            Next::Eof => break,
        };
        let body_offset = offset + FRAME_HEADER_SIZE as u64;
        let body = read_vec(input, frame.size as u64, body_offset, "frame body")?;

        if &frame.id == target.id() {
            // the encoding byte stays; only size and payload change
            let encoding = *body.first().ok_or_else(|| Error::FrameSize {
                id: frame.name(),
                size: 0,
            })?;
            let replacement = FrameHeader {
                size: new_size,
                ..frame
            };
            write_field(output, &replacement.to_bytes())?;
            write_field(output, &[encoding])?;
            write_field(output, payload)?;

            info!(
                frame = %frame.name(),
                offset,
                old_size = frame.size,
                new_size,
                "replaced frame"
            );
            outcome = Rewrite::Replaced {
                old_size: frame.size,
                new_size,
            };
            break;
        }

        debug!(frame = %frame.name(), size = frame.size, offset, "copying frame");
        write_field(output, &frame.to_bytes())?;
        write_field(output, &body)?;
        offset = body_offset + frame.size as u64;
    }

    let rest = copy_rest(input, output)?;
    output.flush().map_err(Error::WriteFailure)?;
    debug!(bytes = rest, "copied remaining data");

    if outcome == Rewrite::Unchanged {
        warn!(frame = %target, "frame not found, output is an unmodified copy");
    }
    Ok(outcome)
}
