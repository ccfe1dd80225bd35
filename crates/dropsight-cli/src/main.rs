use std::collections::BTreeSet;

use clap::{Parser, Subcommand};

use dropsight_core::CycleParams;

#[derive(Debug, Parser)]
#[command(name = "dropsight-cli")]
#[command(about = "Dropsight trend pipeline command line interface")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Run one pipeline cycle and print the ranked batch.
    Cycle {
        /// Sell price multiplier; defaults to DROPSIGHT_DEFAULT_MARKUP.
        #[arg(long)]
        markup: Option<f64>,
        /// Flat shipping cost; defaults to DROPSIGHT_DEFAULT_SHIPPING.
        #[arg(long)]
        shipping: Option<f64>,
    },
    /// Summarise the persisted snapshot history.
    History,
    /// Show the top gainer between the two most recent snapshots.
    TopGainer,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let config = dropsight_core::load_app_config()?;

    let pool_config = dropsight_db::PoolConfig::from_app_config(&config);
    let pool = dropsight_db::connect_pool(&config.database_url, pool_config).await?;
    dropsight_db::run_migrations(&pool).await?;

    match cli.command {
        Commands::Cycle { markup, shipping } => {
            let products = dropsight_core::load_products(&config.products_path)?.products;
            let client = dropsight_sources::build_client(
                config.source_timeout_secs,
                &config.source_user_agent,
            )?;
            let sources = dropsight_sources::SourceConfig::from_app_config(&config);
            let params = CycleParams {
                markup: markup.unwrap_or(config.default_markup),
                shipping: shipping.unwrap_or(config.default_shipping),
            };

            let batch =
                dropsight_pipeline::run_cycle(&pool, &client, &sources, &products, params).await;

            println!(
                "{:<24} {:>8} {:>8} {:>8} {:>10}",
                "product", "price", "margin", "trend", "potential"
            );
            for row in &batch {
                println!(
                    "{:<24} {:>8.2} {:>7.1}% {:>8.2} {:>10.2}",
                    row.product, row.price, row.profit_margin, row.trend_score, row.profit_potential
                );
            }
        }
        Commands::History => {
            let history = dropsight_db::load_history(&pool).await?;
            let times: BTreeSet<_> = history.iter().map(|row| row.time).collect();
            if let (Some(first), Some(last)) = (times.first(), times.last()) {
                println!(
                    "{} rows across {} snapshots, {} to {}",
                    history.len(),
                    times.len(),
                    first.to_rfc3339(),
                    last.to_rfc3339()
                );
            } else {
                println!("no snapshots yet");
            }
        }
        Commands::TopGainer => {
            let history = dropsight_db::load_history(&pool).await?;
            match dropsight_pipeline::compute_top_gainer(&history) {
                Some(gainer) => println!("{} ({:+.1})", gainer.product, gainer.delta),
                None => println!("no data yet"),
            }
        }
    }

    Ok(())
}
