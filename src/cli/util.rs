//! CLI Common Utilities
//!
//! Shared initialization and input handling for CLI commands.

use std::io::Read;
use std::path::Path;

use crate::config::{Config, ConfigLoader};
use crate::types::{Result, ValidatorError};
use crate::validator::ValidatorService;

/// Command execution context
///
/// Loaded configuration plus the validator built from it. A missing
/// credential does not fail loading; the service is then unavailable.
#[derive(Debug, Clone)]
pub struct CommandContext {
    pub config: Config,
    pub service: ValidatorService,
}

impl CommandContext {
    pub fn load() -> Result<Self> {
        let config = ConfigLoader::load()?;
        Self::from_config(config)
    }

    pub fn from_config(config: Config) -> Result<Self> {
        let service = ValidatorService::from_config(&config)?;
        Ok(Self { config, service })
    }
}

/// Output format selected with `--format`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Invalid format '{}'. Valid values: text, json", s)),
        }
    }
}

/// Listing text from the argument, a file, or stdin (in that order).
/// The text is passed on verbatim; no trimming.
pub fn read_listing(text: Option<String>, file: Option<&Path>) -> Result<String> {
    if let Some(text) = text {
        return Ok(text);
    }

    if let Some(path) = file {
        return Ok(std::fs::read_to_string(path)?);
    }

    let mut buffer = String::new();
    std::io::stdin().read_to_string(&mut buffer)?;
    if buffer.is_empty() {
        return Err(ValidatorError::InvalidListing(
            "no listing given (pass TEXT, --file, or pipe it on stdin)".to_string(),
        ));
    }
    Ok(buffer)
}

/// Batch input: a JSON array of strings, or one listing per non-empty line
pub fn parse_batch(content: &str) -> Result<Vec<String>> {
    let trimmed = content.trim_start();
    if trimmed.starts_with('[') {
        return Ok(serde_json::from_str::<Vec<String>>(trimmed)?);
    }

    Ok(content
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(str::to_string)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_batch_json_array() {
        let listings = parse_batch(r#"["First listing text", "Second listing text"]"#).unwrap();
        assert_eq!(listings, vec!["First listing text", "Second listing text"]);
    }

    #[test]
    fn test_parse_batch_lines() {
        let listings = parse_batch("First listing text\n\n  \nSecond listing text\n").unwrap();
        assert_eq!(listings, vec!["First listing text", "Second listing text"]);
    }

    #[test]
    fn test_parse_batch_rejects_non_string_array() {
        assert!(parse_batch("[1, 2, 3]").is_err());
    }

    #[test]
    fn test_read_listing_prefers_argument() {
        let listing = read_listing(Some("Inline listing".to_string()), None).unwrap();
        assert_eq!(listing, "Inline listing");
    }

    #[test]
    fn test_read_listing_from_file_verbatim() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "  Listing with padding \n").unwrap();

        let listing = read_listing(None, Some(file.path())).unwrap();
        assert_eq!(listing, "  Listing with padding \n");
    }

    #[test]
    fn test_output_format() {
        assert_eq!("json".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert_eq!("TEXT".parse::<OutputFormat>().unwrap(), OutputFormat::Text);
        assert!("yaml".parse::<OutputFormat>().is_err());
    }
}
