use std::path::PathBuf;

use anyhow::{Result, anyhow};
use clap::Parser;
use circle_snake::game::{GameConfig, RetryPolicy};
use circle_snake::logging;
use circle_snake::modes::HumanMode;

#[derive(Parser)]
#[command(name = "circle_snake")]
#[command(version, about = "Snake in a circular arena")]
struct Cli {
    /// JSON config file; flags below override its values
    #[arg(long)]
    config: Option<PathBuf>,

    /// Arena radius in cells
    #[arg(long)]
    radius: Option<u32>,

    /// Milliseconds between ticks
    #[arg(long)]
    speed_ms: Option<u64>,

    /// Food placement attempts before giving up on a free cell
    #[arg(long)]
    max_attempts: Option<u32>,

    /// Food sampler behaviour once attempts run out
    #[arg(long, value_enum)]
    retry_policy: Option<CliRetryPolicy>,

    /// Ignore 180-degree turns
    #[arg(long)]
    prevent_reversal: bool,

    /// Seed for food placement
    #[arg(long)]
    seed: Option<u64>,

    /// Where to write the log
    #[arg(long, default_value = "circle_snake.log")]
    log_file: PathBuf,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    log_level: tracing::Level,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum CliRetryPolicy {
    Faithful,
    Strict,
}

impl From<CliRetryPolicy> for RetryPolicy {
    fn from(policy: CliRetryPolicy) -> Self {
        match policy {
            CliRetryPolicy::Faithful => RetryPolicy::Faithful,
            CliRetryPolicy::Strict => RetryPolicy::Strict,
        }
    }
}

impl Cli {
    fn game_config(&self) -> Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => GameConfig::load(path)?,
            None => GameConfig::default(),
        };

        if let Some(radius) = self.radius {
            config.circle_radius = radius;
        }
        if let Some(speed) = self.speed_ms {
            config.game_speed_ms = speed;
        }
        if let Some(attempts) = self.max_attempts {
            config.max_attempts = attempts;
        }
        if let Some(policy) = self.retry_policy {
            config.retry_policy = policy.into();
        }
        if self.prevent_reversal {
            config.prevent_reversal = true;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }

        config.validate().map_err(|e| anyhow!("Invalid configuration: {}", e))?;
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    logging::init(&cli.log_file, cli.log_level)?;
    let config = cli.game_config()?;
    tracing::debug!(?config, "configuration loaded");

    let mut human_mode = HumanMode::new(config)?;
    human_mode.run().await?;

    Ok(())
}
