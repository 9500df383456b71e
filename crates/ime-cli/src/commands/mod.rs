//! CLI command implementations

pub mod exec;
pub mod repl;
pub mod run;

use anyhow::{Context, Result};
use ime_core::Image;
use ime_ops::CommandKind;
use std::path::Path;

/// Load image from path
pub fn load_image(path: &Path) -> Result<Image> {
    ime_io::read_image(path).with_context(|| format!("Failed to load: {}", path.display()))
}

/// Save image to path
pub fn save_image(path: &Path, image: &Image) -> Result<()> {
    ime_io::write_image(path, image).with_context(|| format!("Failed to save: {}", path.display()))
}

/// Prints every filter command with its argument synopsis.
pub fn list() {
    println!("load PATH NAME");
    println!("save PATH NAME");
    println!("run SCRIPT");
    println!("exit");
    for kind in CommandKind::ALL {
        println!("{} {}", kind, kind.usage());
    }
}
