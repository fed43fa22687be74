mod nearby;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "fooddesert-cli")]
#[command(about = "Food desert grocery store lookup")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Find grocery stores near a point
    Nearby {
        /// Longitude of the search origin, in degrees
        #[arg(long, allow_hyphen_values = true)]
        lng: f64,
        /// Latitude of the search origin, in degrees
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,
        /// Search radius in meters (defaults to FOODDESERT_DEFAULT_RADIUS_METERS)
        #[arg(long)]
        radius: Option<u32>,
        /// Print the stores as a JSON array
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let Some(command) = cli.command else {
        println!("fooddesert-cli ready; run `fooddesert-cli nearby --help`");
        return Ok(());
    };

    let config = fooddesert_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    match command {
        Commands::Nearby {
            lng,
            lat,
            radius,
            json,
        } => nearby::run_nearby(&config, lng, lat, radius, json).await,
    }
}
