//! Batch Command
//!
//! Validates many listings concurrently; results are reported in input order.
//!
//! Usage:
//!   listing-validator batch --file listings.json [-f json]
//!   listing-validator batch --file listings.txt

use futures::StreamExt;
use serde::Serialize;
use std::path::Path;
use tracing::info;

use crate::cli::ui::Output;
use crate::cli::util::{CommandContext, OutputFormat, parse_batch};
use crate::config::RequestConfig;
use crate::types::{Result, ValidationResult, ValidatorError};
use crate::validator::{ValidatorService, check_listing_bounds};

/// Outcome for one input listing
#[derive(Debug, Serialize)]
pub struct BatchEntry {
    /// Zero-based position in the input
    pub index: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<ValidationResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

pub async fn run(file: &Path, format: OutputFormat) -> Result<()> {
    let ctx = CommandContext::load()?;
    let listings = parse_batch(&std::fs::read_to_string(file)?)?;

    if !ctx.service.is_ready() {
        return Err(ValidatorError::ServiceUnavailable(
            crate::constants::service::UNAVAILABLE_MESSAGE.to_string(),
        ));
    }

    info!(
        "Validating {} listings ({} at a time)",
        listings.len(),
        ctx.config.request.batch_concurrency
    );

    let entries = validate_all(
        &ctx.service,
        &ctx.config.request,
        listings,
        ctx.config.request.batch_concurrency,
    )
    .await;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&entries)?),
        OutputFormat::Text => print_entries(&entries),
    }

    Ok(())
}

/// Validate each listing independently with bounded concurrency.
/// Out-of-bounds listings are reported per entry.
pub async fn validate_all(
    service: &ValidatorService,
    limits: &RequestConfig,
    listings: Vec<String>,
    concurrency: usize,
) -> Vec<BatchEntry> {
    futures::stream::iter(listings.into_iter().enumerate())
        .map(|(index, listing)| async move {
            let outcome = match check_listing_bounds(&listing, limits) {
                Ok(()) => service.validate(&listing).await,
                Err(e) => Err(e),
            };
            match outcome {
                Ok(result) => BatchEntry {
                    index,
                    result: Some(result),
                    error: None,
                },
                Err(e) => BatchEntry {
                    index,
                    result: None,
                    error: Some(e.to_string()),
                },
            }
        })
        .buffered(concurrency.max(1))
        .collect()
        .await
}

fn print_entries(entries: &[BatchEntry]) {
    let output = Output::new();
    let mut compliant = 0;

    for entry in entries {
        output.header(&format!("Listing #{}", entry.index + 1));
        match (&entry.result, &entry.error) {
            (Some(result), _) => {
                if result.is_compliant() {
                    compliant += 1;
                }
                output.result(result);
            }
            (None, Some(error)) => output.error(error),
            (None, None) => {}
        }
    }

    println!();
    output.info(&format!(
        "{} of {} listings compliant",
        compliant,
        entries.len()
    ));
}
