//! completion command - Generate shell completion scripts

use std::str::FromStr;

use crate::cli::handler::{Arguments, Context};
use anyhow::{anyhow, Result};
use clap_complete::{generate, Shell};

pub const DOCUMENTATION: &str = "Generate shell completion scripts

shell: one of bash, elvish, fish, powershell, zsh";

/// Generate shell completion scripts.
pub fn completion(_ctx: &Context, args: &Arguments) -> Result<()> {
    let name = args.require("shell")?;
    let shell = Shell::from_str(&name.to_ascii_lowercase())
        .map_err(|_| anyhow!("unsupported shell '{name}'"))?;

    let mut cmd = crate::cli::build()?.command;
    let bin = cmd.get_name().to_string();
    generate(shell, &mut cmd, bin, &mut std::io::stdout());
    Ok(())
}
