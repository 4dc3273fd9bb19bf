use super::ExtractionArgs;
use crate::cli::output::format_offers;
use crate::config::AppConfig;
use crate::errors::{AppError, AppResult};
use crate::processor::OfferPipeline;
use crate::types::RawMessage;
use clap::Args;
use serde_json::Value;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::info;

/// Extract offers from a saved list of relay messages
#[derive(Args)]
pub struct ExtractCommand {
    /// JSON file with relay messages, or `-` for stdin
    #[arg(long)]
    pub input: PathBuf,

    /// Only consider messages on this content topic
    #[arg(long)]
    pub topic: Option<String>,

    #[command(flatten)]
    pub extraction: ExtractionArgs,
}

impl ExtractCommand {
    pub fn run(&self) -> AppResult<()> {
        let app_config = AppConfig::get_defaults()?;
        let options = self.extraction.options(&app_config, self.topic.clone());

        let messages = load_messages(&self.input)?;
        info!("Loaded {} message(s) from {}", messages.len(), self.input.display());

        let results = OfferPipeline::new(options).run(&messages);
        let stats = results.stats.clone();
        let offers = results.partition();

        println!("{}", format_offers(&offers, &stats, self.extraction.format)?);
        Ok(())
    }
}

/// Read a message list from a file, or stdin for `-`
pub fn load_messages(path: &Path) -> AppResult<Vec<RawMessage>> {
    let text = if path.as_os_str() == "-" {
        io::read_to_string(io::stdin())?
    } else {
        fs::read_to_string(path)?
    };
    parse_messages(&text)
}

/// Parse either a bare JSON array of messages or `{"messages": [...]}`
///
/// A structurally invalid entry fails the whole input with its index; the
/// pipeline only tolerates bad payloads, not bad envelopes.
pub fn parse_messages(text: &str) -> AppResult<Vec<RawMessage>> {
    let value: Value = serde_json::from_str(text)?;

    let entries = match value {
        Value::Array(entries) => entries,
        Value::Object(mut object) => match object.remove("messages") {
            Some(Value::Array(entries)) => entries,
            _ => {
                return Err(AppError::InvalidData(
                    "expected a JSON array of messages or an object with a \"messages\" array"
                        .to_string(),
                ))
            }
        },
        _ => {
            return Err(AppError::InvalidData(
                "expected a JSON array of messages".to_string(),
            ))
        }
    };

    entries
        .into_iter()
        .enumerate()
        .map(|(index, entry)| {
            serde_json::from_value(entry).map_err(|e| AppError::InvalidMessage {
                index,
                reason: e.to_string(),
            })
        })
        .collect()
}
