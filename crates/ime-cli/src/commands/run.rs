//! Script mode

use crate::RunArgs;
use crate::session::Session;
use anyhow::Result;
#[allow(unused_imports)]
use tracing::{debug, info, trace};

/// Runs a script file. Returns false if any line failed.
pub fn run(args: RunArgs, verbose: bool) -> Result<bool> {
    trace!(script = %args.script.display(), "run::run");

    let mut session = Session::new(verbose);
    session.run_script(&args.script)?;

    if verbose {
        println!("Done ({} failed).", session.failures());
    }
    Ok(session.failures() == 0)
}
