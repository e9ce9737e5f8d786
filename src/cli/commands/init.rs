//! init command - Initialize the alley

use crate::cli::handler::{Arguments, Context};
use crate::ui::output;
use anyhow::Result;

pub const DOCUMENTATION: &str = "Initialize alley";

/// Initialize the alley.
///
/// Lanes and alley state are not modelled yet; the command only reports
/// that.
pub fn init(ctx: &Context, _args: &Arguments) -> Result<()> {
    tracing::debug!(cwd = %ctx.cwd.display(), "alley init requested");
    output::warn("alley initialization is not implemented yet", ctx.verbosity);
    Ok(())
}
