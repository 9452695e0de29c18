use std::fmt;

use crate::Error;

/// The text frames this crate knows how to show and edit.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub enum FrameKind {
    Artist,
    Title,
    Album,
    Year,
    Genre,
    Lyricist,
    Composer,
    Comment,
}

// display order, also the order of the help table
pub const CATALOG: [FrameKind; 8] = [
    FrameKind::Artist,
    FrameKind::Title,
    FrameKind::Album,
    FrameKind::Year,
    FrameKind::Genre,
    FrameKind::Lyricist,
    FrameKind::Composer,
    FrameKind::Comment,
];

impl FrameKind {
    pub fn id(self) -> &'static [u8; 4] {
        match self {
            FrameKind::Artist => b"TPE1",
            FrameKind::Title => b"TIT2",
            FrameKind::Album => b"TALB",
            FrameKind::Year => b"TYER",
            FrameKind::Genre => b"TCON",
            FrameKind::Lyricist => b"TEXT",
            FrameKind::Composer => b"TCOM",
            FrameKind::Comment => b"COMM",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            FrameKind::Artist => "Artist",
            FrameKind::Title => "Title",
            FrameKind::Album => "Album",
            FrameKind::Year => "Year",
            FrameKind::Genre => "Genre",
            FrameKind::Lyricist => "Lyricist",
            FrameKind::Composer => "Composer",
            FrameKind::Comment => "Comments",
        }
    }

    /// Command line token selecting this frame for editing.
    pub fn selector(self) -> &'static str {
        match self {
            FrameKind::Artist => "-a",
            FrameKind::Title => "-t",
            FrameKind::Album => "-A",
            FrameKind::Year => "-y",
            FrameKind::Genre => "-m",
            FrameKind::Lyricist => "-l",
            FrameKind::Composer => "-c",
            FrameKind::Comment => "-C",
        }
    }

    pub fn from_id(id: &[u8]) -> Option<FrameKind> {
        CATALOG.iter().copied().find(|k| &k.id()[..] == id)
    }

    pub fn from_selector(token: &str) -> Result<FrameKind, Error> {
        CATALOG
            .iter()
            .copied()
            .find(|k| k.selector() == token)
            .ok_or_else(|| Error::InvalidSelector(token.to_string()))
    }
}

impl fmt::Display for FrameKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        // ids are plain ascii
        write!(f, "{}", String::from_utf8_lossy(self.id()))
    }
}
