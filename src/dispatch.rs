use std::fs;
use std::fs::File;
use std::io;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::id3v2;
use crate::tools::encoding::encode_iso_8859_1;
use crate::Config;
use crate::Error;
use crate::FrameKind;
use crate::Rewrite;
use crate::TagCollection;

macro_rules! unsupported {
    ($path:ident) => {{
        match $path.extension().and_then(|e| e.to_str()) {
            Some("mp3") => (),
            None | Some(_) => return Err(Error::InvalidPath($path.to_path_buf())),
        }
    }};
}

fn open(path: &Path) -> Result<File, Error> {
    File::open(path).map_err(|source| Error::FileOpen {
        path: path.to_path_buf(),
        source,
    })
}

pub fn validate_path<P: AsRef<Path>>(path: P) -> Result<PathBuf, Error> {
    let path = path.as_ref();
    unsupported!(path);
    Ok(path.to_path_buf())
}

pub fn view<P: AsRef<Path>>(path: P, config: &Config) -> Result<TagCollection, Error> {
    let path = path.as_ref();
    unsupported!(path);

    let mut input = BufReader::new(open(path)?);
    let tags = id3v2::get(&mut input, config.frame_limit)?;
    info!(path = %path.display(), frames = tags.len(), "read tag");
    Ok(tags)
}

/// One frame replacement, checked and ready to run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EditRequest {
    pub kind: FrameKind,
    pub path: PathBuf,
    pub payload: Vec<u8>,
}

impl EditRequest {
    /// Build a request from a selector token, a file and the words of the
    /// new text, which are joined with single spaces.
    pub fn new<P, S>(selector: &str, path: P, words: &[S]) -> Result<EditRequest, Error>
    where
        P: AsRef<Path>,
        S: AsRef<str>,
    {
        let kind = FrameKind::from_selector(selector)?;
        let path = validate_path(path)?;

        let text = words.iter().map(|w| w.as_ref()).collect::<Vec<_>>().join(" ");
        if text.is_empty() {
            return Err(Error::MissingPayload);
        }

        Ok(EditRequest {
            kind,
            path,
            payload: encode_iso_8859_1(&text)?,
        })
    }
}

fn same_file(a: &Path, b: &Path) -> bool {
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

// best effort, the original is intact either way
fn discard(path: &Path) {
    if let Err(e) = fs::remove_file(path) {
        warn!(path = %path.display(), error = %e, "could not remove temporary file");
    }
}

/// Rewrite the file named by `request` through `config.temp_path`.
///
/// The original is only replaced once the whole rewrite went through. When
/// the frame is not in the file the temporary copy is dropped and the
/// original stays as it was.
pub fn edit(request: &EditRequest, config: &Config) -> Result<Rewrite, Error> {
    let path = request.path.as_path();
    unsupported!(path);

    let tmp_path = config.temp_path.as_path();
    if same_file(path, tmp_path) {
        return Err(Error::FileOpen {
            path: tmp_path.to_path_buf(),
            source: io::Error::new(
                io::ErrorKind::AlreadyExists,
                "temporary file is the file being edited",
            ),
        });
    }

    let file = open(path)?;
    let tmp_file = File::create(tmp_path).map_err(|source| Error::FileOpen {
        path: tmp_path.to_path_buf(),
        source,
    })?;

    let result = {
        let mut input = BufReader::new(file);
        let mut output = BufWriter::new(tmp_file);
        id3v2::rewrite(&mut input, &mut output, request.kind, &request.payload).and_then(
            |outcome| {
                output.get_ref().sync_all().map_err(Error::WriteFailure)?;
                Ok(outcome)
            },
        )
    };

    match result {
        Err(e) => {
            discard(tmp_path);
            Err(e)
        }
        Ok(Rewrite::Unchanged) => {
            info!(path = %path.display(), "file left unchanged");
            discard(tmp_path);
            Ok(Rewrite::Unchanged)
        }
        Ok(outcome) => {
            replace_file(tmp_path, path)?;
            info!(path = %path.display(), frame = %request.kind, "tag edited");
            Ok(outcome)
        }
    }
}

/// Move `from` over `to`.
///
/// Atomic when both live on the same filesystem. On failure `from` is left
/// where it is so the rewritten data is not lost.
pub fn replace_file<P: AsRef<Path>, Q: AsRef<Path>>(from: P, to: Q) -> Result<(), Error> {
    let (from, to) = (from.as_ref(), to.as_ref());
    fs::rename(from, to).map_err(|source| Error::ReplaceFailure {
        from: from.to_path_buf(),
        to: to.to_path_buf(),
        source,
    })
}
