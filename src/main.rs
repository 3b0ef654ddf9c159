//! Mdview - split-screen 3D mesh viewer.

use std::path::PathBuf;

use anyhow::Result;

fn main() -> Result<()> {
    let initial_file: Option<PathBuf> = std::env::args().nth(1).map(PathBuf::from);
    mdview::viewer::run(initial_file)
}
