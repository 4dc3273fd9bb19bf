use super::ExtractionArgs;
use crate::cli::output::format_offers;
use crate::config::AppConfig;
use crate::errors::{AppError, AppResult};
use crate::processor::OfferPipeline;
use crate::relay::RelayClient;
use clap::Args;
use std::time::Duration;
use tracing::{info, warn};

/// Subscribe to content topics on a relay node and list their offers
#[derive(Args)]
pub struct FetchCommand {
    /// Content topic to read (repeatable; defaults to extraction.content_topic)
    #[arg(long = "topic")]
    pub topics: Vec<String>,

    /// Relay node base URL (overrides config)
    #[arg(long)]
    pub relay_url: Option<String>,

    /// Keep polling and re-list offers every interval
    #[arg(long)]
    pub watch: bool,

    /// Poll interval in seconds when watching (overrides config)
    #[arg(long)]
    pub interval: Option<u64>,

    #[command(flatten)]
    pub extraction: ExtractionArgs,
}

impl FetchCommand {
    pub async fn run(&self) -> AppResult<()> {
        let app_config = AppConfig::get_defaults()?;

        let mut relay_config = app_config.relay.clone();
        if let Some(url) = &self.relay_url {
            relay_config.url = url.clone();
        }

        let topics = if self.topics.is_empty() {
            vec![app_config.extraction.content_topic.clone()]
        } else {
            self.topics.clone()
        };

        let interval = self
            .interval
            .unwrap_or(app_config.polling.interval_seconds);
        if interval == 0 {
            return Err(AppError::Config(
                "--interval must be greater than 0".to_string(),
            ));
        }

        // Messages are fetched per topic already, so no further topic filter
        let pipeline = OfferPipeline::new(self.extraction.options(&app_config, None));
        let client = RelayClient::new(&relay_config)?;

        info!("Using relay at {}", client.base_url());
        client.subscribe(&topics).await?;

        let mut ticker = tokio::time::interval(Duration::from_secs(interval));
        loop {
            tokio::select! {
                _ = ticker.tick() => {}
                _ = tokio::signal::ctrl_c() => {
                    info!("Interrupted, stopping");
                    break;
                }
            }

            match self.poll_once(&client, &pipeline, &topics).await {
                Ok(output) => println!("{}", output),
                // A failed poll only loses this round when watching
                Err(e) if self.watch => warn!("Poll failed: {}", e),
                Err(e) => return Err(e),
            }

            if !self.watch {
                break;
            }
        }

        Ok(())
    }

    /// One full pass: fetch every topic and rebuild the offer list from scratch
    async fn poll_once(
        &self,
        client: &RelayClient,
        pipeline: &OfferPipeline,
        topics: &[String],
    ) -> AppResult<String> {
        let messages = client.fetch_topics(topics).await?;
        let results = pipeline.run(&messages);
        let stats = results.stats.clone();
        let offers = results.partition();
        format_offers(&offers, &stats, self.extraction.format)
    }
}
