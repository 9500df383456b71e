//! Line-oriented controller over an in-memory image store.
//!
//! A [`Session`] owns the named images and interprets one command line at a
//! time. `load`, `save`, `run` and `exit` are handled here; anything else is
//! handed to [`ime_ops::Command`].

use anyhow::{Context, Result, bail};
use ime_core::{ImageStore, MemoryStore};
use ime_ops::Command;
use std::io::BufRead;
use std::path::{Path, PathBuf};
#[allow(unused_imports)]
use tracing::{debug, error, info, trace};

/// Nesting limit for `run` inside scripts.
pub const MAX_SCRIPT_DEPTH: usize = 16;

/// What the caller should do after a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Keep reading.
    Continue,
    /// `exit` was seen.
    Exit,
}

/// Controller state shared by every input mode.
#[derive(Debug, Default)]
pub struct Session {
    store: MemoryStore,
    failures: usize,
    depth: usize,
    verbose: bool,
}

impl Session {
    pub fn new(verbose: bool) -> Self {
        Self {
            verbose,
            ..Self::default()
        }
    }

    pub fn store(&self) -> &MemoryStore {
        &self.store
    }

    /// Number of lines that failed so far.
    pub fn failures(&self) -> usize {
        self.failures
    }

    /// Executes one line, reporting a failure instead of returning it.
    pub fn execute_line(&mut self, line: &str) -> Flow {
        match self.try_line(line) {
            Ok(flow) => flow,
            Err(e) => {
                self.failures += 1;
                error!(line = line.trim(), "{e:#}");
                eprintln!("Error: {e:#}");
                Flow::Continue
            }
        }
    }

    /// Executes every line from `reader` until it ends or `exit` is seen.
    pub fn execute_lines<R: BufRead>(&mut self, reader: R) -> Result<Flow> {
        for line in reader.lines() {
            let line = line.context("Failed to read command input")?;
            if self.execute_line(&line) == Flow::Exit {
                return Ok(Flow::Exit);
            }
        }
        Ok(Flow::Continue)
    }

    /// Executes a script file.
    pub fn run_script(&mut self, path: &Path) -> Result<Flow> {
        if self.depth >= MAX_SCRIPT_DEPTH {
            bail!("Script nesting deeper than {MAX_SCRIPT_DEPTH}: {}", path.display());
        }
        let file = std::fs::File::open(path)
            .with_context(|| format!("Script not found: {}", path.display()))?;
        info!(script = %path.display(), "run script");

        self.depth += 1;
        let flow = self.execute_lines(std::io::BufReader::new(file));
        self.depth -= 1;
        flow
    }

    fn try_line(&mut self, line: &str) -> Result<Flow> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(Flow::Continue);
        }

        let mut tokens: Vec<String> = line.split_whitespace().map(str::to_string).collect();
        tokens[0] = tokens[0].to_lowercase();
        trace!(?tokens, "execute_line");

        match tokens[0].as_str() {
            "exit" => {
                expect_args(&tokens, 0, "exit")?;
                Ok(Flow::Exit)
            }
            "load" => {
                expect_args(&tokens, 2, "load PATH NAME")?;
                let path = PathBuf::from(&tokens[1]);
                let image = crate::commands::load_image(&path)?;
                info!(path = %path.display(), name = %tokens[2], w = image.width(), h = image.height(), "load");
                self.store.store(&tokens[2], image);
                Ok(Flow::Continue)
            }
            "save" => {
                expect_args(&tokens, 2, "save PATH NAME")?;
                let path = PathBuf::from(&tokens[1]);
                let image = self.store.fetch(&tokens[2]).with_context(|| {
                    format!("Nothing to save (loaded: {})", self.store.names().join(", "))
                })?;
                crate::commands::save_image(&path, image)?;
                info!(path = %path.display(), name = %tokens[2], "save");
                if self.verbose {
                    println!("Saved {} to {}", tokens[2], path.display());
                }
                Ok(Flow::Continue)
            }
            "run" => {
                expect_args(&tokens, 1, "run SCRIPT")?;
                self.run_script(Path::new(&tokens[1]))
            }
            _ => {
                let command = Command::parse(&tokens)?;
                command.execute(&mut self.store)?;
                info!(command = %command.kind(), "executed");
                Ok(Flow::Continue)
            }
        }
    }
}

fn expect_args(tokens: &[String], n: usize, usage: &str) -> Result<()> {
    if tokens.len() != n + 1 {
        bail!("Invalid arguments, expected: {usage}");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ime_core::{Image, Pixel};
    use std::io::Cursor;

    fn write_ppm(dir: &Path, name: &str) -> PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, "P3\n2 2\n255\n100 100 100 150 150 150\n200 200 200 50 50 50\n")
            .unwrap();
        path
    }

    #[test]
    fn test_comments_and_blank_lines() {
        let mut s = Session::new(false);
        assert_eq!(s.execute_line(""), Flow::Continue);
        assert_eq!(s.execute_line("   # load a b"), Flow::Continue);
        assert_eq!(s.failures(), 0);
    }

    #[test]
    fn test_load_filter_save() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_ppm(dir.path(), "in.ppm");
        let output = dir.path().join("out.ppm");

        let script = format!(
            "load {} img\nDITHER img d\nsave {} d\n",
            input.display(),
            output.display()
        );
        let mut s = Session::new(false);
        assert_eq!(s.execute_lines(Cursor::new(script)).unwrap(), Flow::Continue);
        assert_eq!(s.failures(), 0);

        let saved = ime_io::read_image(&output).unwrap();
        assert_eq!(saved.pixel(0, 0), Pixel::gray(0, 255));
        assert_eq!(saved.pixel(0, 1), Pixel::gray(255, 255));
    }

    #[test]
    fn test_errors_do_not_stop_the_run() {
        let mut s = Session::new(false);
        let script = "blur missing out\nfrobnicate a b\nbrighten x y\nexit\nblur a b\n";
        assert_eq!(s.execute_lines(Cursor::new(script)).unwrap(), Flow::Exit);
        assert_eq!(s.failures(), 3);
    }

    #[test]
    fn test_exit_case_insensitive() {
        let mut s = Session::new(false);
        assert_eq!(s.execute_line("  EXIT "), Flow::Exit);
    }

    #[test]
    fn test_nested_script() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_ppm(dir.path(), "in.ppm");
        let inner = dir.path().join("inner.txt");
        std::fs::write(&inner, format!("load {} img\nvertical-flip img v\n", input.display()))
            .unwrap();

        let mut s = Session::new(false);
        s.execute_line(&format!("run {}", inner.display()));
        assert_eq!(s.failures(), 0);
        let v = s.store().fetch("v").unwrap();
        assert_eq!(v.pixel(0, 0), Pixel::gray(200, 255));
    }

    #[test]
    fn test_self_recursive_script_is_bounded() {
        let dir = tempfile::tempdir().unwrap();
        let script = dir.path().join("loop.txt");
        std::fs::write(&script, format!("run {}\n", script.display())).unwrap();

        let mut s = Session::new(false);
        s.execute_line(&format!("run {}", script.display()));
        assert_eq!(s.failures(), 1);
    }

    #[test]
    fn test_missing_script_and_bad_arity() {
        let mut s = Session::new(false);
        s.execute_line("run /definitely/not/here.txt");
        s.execute_line("load only-one-arg");
        s.execute_line("save a.png");
        assert_eq!(s.failures(), 3);
    }

    #[test]
    fn test_save_unknown_image() {
        let dir = tempfile::tempdir().unwrap();
        let mut s = Session::new(false);
        s.store.store("b", Image::filled(1, 1, Pixel::WHITE).unwrap());
        s.store.store("a", Image::filled(1, 1, Pixel::WHITE).unwrap());
        let err = s
            .try_line(&format!("save {} ghost", dir.path().join("g.png").display()))
            .unwrap_err();
        assert!(format!("{err:#}").contains("loaded: a, b"));

        s.execute_line(&format!("save {} ghost", dir.path().join("g.png").display()));
        assert_eq!(s.failures(), 1);
        assert!(!dir.path().join("g.png").exists());
    }

    #[test]
    fn test_store_is_shared_across_lines() {
        let mut s = Session::new(false);
        s.store.store("img", Image::filled(3, 1, Pixel::gray(10, 255)).unwrap());
        s.execute_line("brighten 20 img img");
        assert_eq!(s.store().fetch("img").unwrap().pixel(0, 2), Pixel::gray(30, 255));
    }
}
