#[macro_use]
extern crate lazy_static;

mod catalog;
pub use crate::catalog::FrameKind;
pub use crate::catalog::CATALOG;

mod config;
pub use crate::config::Config;

mod id3v2;
pub use crate::id3v2::rewrite;
pub use crate::id3v2::structure::{Frame, FrameHeader, TagCollection};
pub use crate::id3v2::tools::{decode_size, encode_size, swap_size};
pub use crate::id3v2::{
    FrameReader, Rewrite, FLAG_SIZE, FRAME_HEADER_SIZE, FRAME_ID_SIZE, HEADER_SIZE,
};

mod dispatch;
pub use crate::dispatch::edit;
pub use crate::dispatch::replace_file;
pub use crate::dispatch::validate_path;
pub use crate::dispatch::view;
pub use crate::dispatch::EditRequest;

mod tools;


use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid frame selector: {0}")]
    InvalidSelector(String),

    #[error("File should be an .mp3 file: {}", .0.display())]
    InvalidPath(PathBuf),

    #[error("The new frame data should not be empty")]
    MissingPayload,

    #[error("Cannot store {text:?} as latin-1: {reason}")]
    UnencodableText { text: String, reason: String },

    #[error("Unable to open file {}: {source}", path.display())]
    FileOpen {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Stream ended at offset {offset} while reading {wanted}")]
    TruncatedStream { offset: u64, wanted: &'static str },

    #[error("Could not write to destination: {0}")]
    WriteFailure(#[source] io::Error),

    #[error("Could not replace {} with {}: {source}", to.display(), from.display())]
    ReplaceFailure {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Frame {id} has unusable size {size}")]
    FrameSize { id: String, size: u64 },

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}
