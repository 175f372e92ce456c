//! Health Command
//!
//! Reports whether the validator can serve requests. Configuration state
//! only; the generation service is not contacted.

use crate::cli::ui::Output;
use crate::cli::util::{CommandContext, OutputFormat};
use crate::types::Result;

pub fn run(format: OutputFormat) -> Result<()> {
    let ctx = CommandContext::load()?;
    let report = ctx.service.health();

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Text => Output::new().health(&report),
    }

    Ok(())
}
