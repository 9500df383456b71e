//! One-shot mode
//!
//! Only `load`/`save` pairs make sense across invocations, so this is mainly
//! useful for `exec run SCRIPT` or quick checks of command syntax.

use crate::ExecArgs;
use crate::session::Session;
use anyhow::Result;
#[allow(unused_imports)]
use tracing::{debug, info, trace};

/// Runs a single command line. Returns false if it failed.
pub fn run(args: ExecArgs, verbose: bool) -> Result<bool> {
    let line = args.tokens.join(" ");
    trace!(line = %line, "exec::run");

    let mut session = Session::new(verbose);
    session.execute_line(&line);
    Ok(session.failures() == 0)
}
