use crate::config::AppConfig;
use crate::errors::{AppError, AppResult};
use crate::processor::{extract_offer, ExtractionMode};
use crate::relay::RelayClient;
use crate::types::NativeOffer;
use crate::utils::time::wall_clock_millis;
use clap::Args;
use tracing::info;

/// Publish an offer in the native flat format
#[derive(Args)]
pub struct PostCommand {
    /// Asset being offered
    #[arg(long)]
    pub from_asset: String,

    /// Amount being offered
    #[arg(long)]
    pub from_amount: f64,

    /// Asset wanted in exchange
    #[arg(long)]
    pub to_asset: String,

    /// Amount wanted in exchange
    #[arg(long)]
    pub to_amount: f64,

    /// Content topic to publish on (defaults to extraction.content_topic)
    #[arg(long)]
    pub topic: Option<String>,

    /// Relay node base URL (overrides config)
    #[arg(long)]
    pub relay_url: Option<String>,

    /// Print the relay message instead of publishing it
    #[arg(long)]
    pub dry_run: bool,
}

impl PostCommand {
    pub async fn run(&self) -> AppResult<()> {
        let app_config = AppConfig::get_defaults()?;
        let topic = self
            .topic
            .clone()
            .unwrap_or_else(|| app_config.extraction.content_topic.clone());

        let offer = build_offer(
            &self.from_asset,
            self.from_amount,
            &self.to_asset,
            self.to_amount,
            wall_clock_millis(),
        )?;
        let message = offer.to_raw_message(&topic)?;

        if self.dry_run {
            println!("{}", serde_json::to_string_pretty(&message)?);
            return Ok(());
        }

        let mut relay_config = app_config.relay.clone();
        if let Some(url) = &self.relay_url {
            relay_config.url = url.clone();
        }

        let client = RelayClient::new(&relay_config)?;
        client.publish(&message).await?;

        info!("Offer published to {}", topic);
        println!(
            "Published {} {} -> {} {} on {}",
            offer.from_amount, offer.from_asset, offer.to_amount, offer.to_asset, topic
        );
        Ok(())
    }
}

/// Build a native offer that strict readers will accept
///
/// Readers drop offers with a zero amount or empty asset, so those are
/// refused here rather than published and silently ignored.
pub fn build_offer(
    from_asset: &str,
    from_amount: f64,
    to_asset: &str,
    to_amount: f64,
    timestamp_ms: i64,
) -> AppResult<NativeOffer> {
    for (name, amount) in [("from-amount", from_amount), ("to-amount", to_amount)] {
        if !amount.is_finite() || amount <= 0.0 {
            return Err(AppError::InvalidData(format!(
                "{} must be a positive number, got {}",
                name, amount
            )));
        }
    }

    let offer = NativeOffer::new(
        &from_asset.trim().to_uppercase(),
        from_amount,
        &to_asset.trim().to_uppercase(),
        to_amount,
        timestamp_ms,
    );

    if extract_offer(&offer.to_json()?, ExtractionMode::Strict).is_none() {
        return Err(AppError::InvalidData(
            "offer would not be recognised by readers (empty asset?)".to_string(),
        ));
    }

    Ok(offer)
}
