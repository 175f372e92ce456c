//! Validate Command
//!
//! Validates a single listing against the policy.
//!
//! Usage:
//!   listing-validator validate "Listing text"
//!   listing-validator validate --file listing.txt [-f json]
//!   cat listing.txt | listing-validator validate

use std::path::PathBuf;

use crate::cli::ui::Output;
use crate::cli::util::{CommandContext, OutputFormat, read_listing};
use crate::types::Result;
use crate::validator::check_listing_bounds;

pub async fn run(text: Option<String>, file: Option<PathBuf>, format: OutputFormat) -> Result<()> {
    let ctx = CommandContext::load()?;
    let listing = read_listing(text, file.as_deref())?;

    check_listing_bounds(&listing, &ctx.config.request)?;
    let result = ctx.service.validate(&listing).await?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&result)?),
        OutputFormat::Text => Output::new().result(&result),
    }

    Ok(())
}
