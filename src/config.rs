use std::path::PathBuf;

use crate::CATALOG;

/// Knobs shared by the view and edit entry points.
#[derive(Clone, Debug)]
pub struct Config {
    /// Where a rewrite is staged before it replaces the original.
    pub temp_path: PathBuf,
    /// Stop viewing after this many recognized frames.
    pub frame_limit: usize,
}

impl Default for Config {
    fn default() -> Config {
        Config {
            temp_path: PathBuf::from("temp.mp3"),
            frame_limit: CATALOG.len(),
        }
    }
}
