pub mod config;
pub mod extract;
pub mod fetch;
pub mod post;

use crate::cli::output::OutputFormat;
use crate::config::AppConfig;
use crate::processor::ExtractionOptions;
use clap::Args;

/// Extraction flags shared by `extract` and `fetch`
#[derive(Args, Debug, Clone, Default)]
pub struct ExtractionArgs {
    /// Display handle identifying your own offers (overrides config)
    #[arg(long)]
    pub handle: Option<String>,

    /// Lenient extraction: placeholders for missing fields and free-text scraping
    #[arg(long)]
    pub debug: bool,

    /// Do not count the native offer schema as "mine" without the handle
    #[arg(long)]
    pub no_native_schema: bool,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,
}

impl ExtractionArgs {
    /// Configured options with CLI flags applied on top
    ///
    /// `topic` replaces the configured topic filter outright; `None` disables
    /// filtering.
    pub fn options(&self, app_config: &AppConfig, topic: Option<String>) -> ExtractionOptions {
        let handle = self
            .handle
            .clone()
            .unwrap_or_else(|| app_config.identity.handle.clone());
        let debug_mode = self.debug || app_config.extraction.debug_mode;
        let native_schema_is_mine =
            !self.no_native_schema && app_config.extraction.native_schema_is_mine;

        let mut options = ExtractionOptions::new(handle, debug_mode)
            .with_native_schema_is_mine(native_schema_is_mine);
        options.content_topic = topic;
        options
    }
}
