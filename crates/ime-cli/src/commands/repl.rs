//! Interactive mode

use crate::session::{Flow, Session};
use anyhow::Result;
use std::io::{self, BufRead, Write};
#[allow(unused_imports)]
use tracing::{debug, info, trace};

const PROMPT: &str = "ime> ";

/// Reads commands from stdin until `exit` or end of input.
///
/// Failures are reported and skipped, so the result is always true.
pub fn run(verbose: bool) -> Result<bool> {
    let mut session = Session::new(verbose);
    let stdin = io::stdin();
    let mut out = io::stdout();

    println!("Enter commands, `exit` to quit.");
    loop {
        write!(out, "{PROMPT}")?;
        out.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        if session.execute_line(&line) == Flow::Exit {
            break;
        }
    }

    debug!(failures = session.failures(), images = session.store().len(), "repl finished");
    Ok(true)
}
