use std::slice;

use crate::id3v2::tools::{encode_size, frame_name};
use crate::id3v2::{FLAG_SIZE, FRAME_HEADER_SIZE, FRAME_ID_SIZE};
use crate::tools::encoding::decode_iso_8859_1;
use crate::FrameKind;

/// The fixed part in front of every frame.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameHeader {
    pub id: [u8; FRAME_ID_SIZE],
    // decoded; counts the encoding byte plus the payload
    pub size: u32,
    pub flags: [u8; FLAG_SIZE],
}

impl FrameHeader {
    pub fn kind(&self) -> Option<FrameKind> {
        FrameKind::from_id(&self.id)
    }

    pub fn name(&self) -> String {
        frame_name(&self.id)
    }

    /// Number of payload bytes behind the encoding byte.
    ///
    /// `None` for a zero size, which leaves no room for the encoding byte.
    pub fn payload_len(&self) -> Option<u32> {
        self.size.checked_sub(1)
    }

    pub fn to_bytes(&self) -> [u8; FRAME_HEADER_SIZE] {
        let mut arr = [0; FRAME_HEADER_SIZE];
        arr[0..4].copy_from_slice(&self.id);
        arr[4..8].copy_from_slice(&encode_size(self.size));
        arr[8..10].copy_from_slice(&self.flags);
        arr
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frame {
    pub kind: FrameKind,
    pub size: u32,
    pub payload: Vec<u8>,
}

impl Frame {
    pub fn id(&self) -> &'static [u8; FRAME_ID_SIZE] {
        self.kind.id()
    }

    pub fn text(&self) -> String {
        decode_iso_8859_1(&self.payload)
    }
}

/// Frames collected by one view pass, in the order they were found.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TagCollection {
    frames: Vec<Frame>,
}

impl TagCollection {
    pub fn new(frames: Vec<Frame>) -> TagCollection {
        TagCollection { frames }
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn iter(&self) -> slice::Iter<'_, Frame> {
        self.frames.iter()
    }

    /// First frame of the given kind.
    pub fn get(&self, kind: FrameKind) -> Option<&Frame> {
        self.frames.iter().find(|f| f.kind == kind)
    }

    pub fn into_frames(self) -> Vec<Frame> {
        self.frames
    }
}

impl<'a> IntoIterator for &'a TagCollection {
    type Item = &'a Frame;
    type IntoIter = slice::Iter<'a, Frame>;

    fn into_iter(self) -> Self::IntoIter {
        self.frames.iter()
    }
}
