pub mod encoding;

use std::io;
use std::io::prelude::*;

use crate::Error;

fn truncated(offset: u64, wanted: &'static str) -> Error {
    Error::TruncatedStream { offset, wanted }
}

// fill the whole buffer or report where the stream ran dry
pub fn read_field<R: Read>(
    input: &mut R,
    buf: &mut [u8],
    offset: u64,
    wanted: &'static str,
) -> Result<(), Error> {
    match input.read_exact(buf) {
        Ok(()) => Ok(()),
        Err(ref e) if e.kind() == io::ErrorKind::UnexpectedEof => Err(truncated(offset, wanted)),
        Err(e) => Err(Error::Io(e)),
    }
}

/// Like `read_field`, but a stream that is already exhausted is not an error.
///
/// Returns `Ok(false)` when not a single byte was left, so callers can tell a
/// clean end on a frame boundary from a frame cut in half.
pub fn read_field_or_end<R: Read>(
    input: &mut R,
    buf: &mut [u8],
    offset: u64,
    wanted: &'static str,
) -> Result<bool, Error> {
    let mut filled = 0;
    while filled < buf.len() {
        match input.read(&mut buf[filled..]) {
            Ok(0) if filled == 0 => return Ok(false),
            Ok(0) => return Err(truncated(offset, wanted)),
            Ok(n) => filled += n,
            Err(ref e) if e.kind() == io::ErrorKind::Interrupted => {}
            Err(e) => return Err(Error::Io(e)),
        }
    }
    Ok(true)
}

// move forward without keeping anything
pub fn skip<R: Read>(
    input: &mut R,
    len: u64,
    offset: u64,
    wanted: &'static str,
) -> Result<(), Error> {
    let skipped = io::copy(&mut input.by_ref().take(len), &mut io::sink())?;
    if skipped < len {
        return Err(truncated(offset, wanted));
    }
    Ok(())
}

/// Read `len` bytes into a fresh buffer.
///
/// The buffer grows with what actually arrives, so a bogus size field cannot
/// make us allocate gigabytes before the truncation is noticed.
pub fn read_vec<R: Read>(
    input: &mut R,
    len: u64,
    offset: u64,
    wanted: &'static str,
) -> Result<Vec<u8>, Error> {
    let mut vec = Vec::new();
    input.by_ref().take(len).read_to_end(&mut vec)?;
    if (vec.len() as u64) < len {
        return Err(truncated(offset, wanted));
    }
    Ok(vec)
}

pub fn write_field<W: Write>(output: &mut W, buf: &[u8]) -> Result<(), Error> {
    output.write_all(buf).map_err(Error::WriteFailure)
}

/// Copy everything left in `input` to `output`, returning the byte count.
pub fn copy_rest<R: Read, W: Write>(input: &mut R, output: &mut W) -> Result<u64, Error> {
    let mut buf = [0; 8192];
    let mut total = 0;
    loop {
        let n = match input.read(&mut buf) {
            Ok(0) => return Ok(total),
            Ok(n) => n,
            Err(ref e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(Error::Io(e)),
        };
        write_field(output, &buf[..n])?;
        total += n as u64;
    }
}
