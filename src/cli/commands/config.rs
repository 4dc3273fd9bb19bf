use crate::config::AppConfig;
use crate::errors::AppResult;
use clap::Args;

/// Print the effective configuration (defaults, files and environment merged)
#[derive(Args)]
pub struct ConfigCommand {}

impl ConfigCommand {
    pub fn run(&self) -> AppResult<()> {
        let app_config = AppConfig::load()?;
        print!("{}", app_config.to_toml()?);
        Ok(())
    }
}
