//! bowl command - Bowl a frame

use crate::cli::handler::{Arguments, Context};
use crate::ui::output;
use anyhow::Result;

pub const DOCUMENTATION: &str = "Bowl";

/// Bowl a frame.
pub fn bowl(ctx: &Context, _args: &Arguments) -> Result<()> {
    output::warn("bowling is not implemented yet", ctx.verbosity);
    Ok(())
}
