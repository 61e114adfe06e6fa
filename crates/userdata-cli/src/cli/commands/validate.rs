//! `userdatactl validate` - Decode a userdata file from local disk.

use anyhow::{Context as _, Result};
use colored::Colorize;

use super::Context;
use crate::cli::args::ValidateArgs;
use crate::output::{self, OutputFormat};

pub fn execute(ctx: &Context, args: &ValidateArgs) -> Result<()> {
    let config = userdata::Configuration::load(&args.path)
        .with_context(|| format!("{} is not valid userdata", args.path.display()))?;

    if ctx.output_format == OutputFormat::Pretty {
        let verdict = format!("{}: valid", args.path.display());
        if ctx.color() {
            println!("{}", verdict.green().bold());
        } else {
            println!("{verdict}");
        }
    }
    println!("{}", output::render(&config, ctx.output_format, ctx.color())?);

    Ok(())
}
