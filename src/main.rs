use anyhow::Context;
use clap::{Parser, Subcommand};
use mensa::config::{AppConfig, ConfigLoader};
use mensa::identity::create_identity_resolver;
use mensa::observability::init_tracing;
use mensa::services::create_page_aggregator;
use serde::Serialize;
use std::path::PathBuf;
use tracing::info;

#[derive(Parser)]
#[command(name = "mensa", version, about = "Today's canteen menu with your favorites and a recommendation")]
struct Cli {
    /// 配置文件路径（TOML 或 YAML）
    #[arg(long, short, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Print today's meals with favorite flags and the recommendation as JSON
    Today {
        #[arg(long)]
        pretty: bool,
    },
    /// Manage favorite meals
    Favorite {
        #[command(subcommand)]
        action: FavoriteAction,
    },
    /// Print the resolved identity
    Whoami,
}

#[derive(Subcommand)]
enum FavoriteAction {
    /// Mark a meal as favorite
    Add { meal: String },
    /// Remove a meal from favorites
    Remove { meal: String },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = match cli.config {
        Some(path) => ConfigLoader::load_from(path)?,
        None => ConfigLoader::load()?,
    };
    ConfigLoader::validate(&config)?;

    let _guard = init_tracing(&config.logging);
    info!(base_url = %config.backend.base_url, "Configuration loaded successfully");

    // Identity is settled before any request goes out
    let identity = create_identity_resolver(&config.identity).resolve();

    let command = cli.command.unwrap_or(Command::Today { pretty: false });

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to build runtime")?;

    runtime.block_on(run(command, &config, &identity))
}

async fn run(command: Command, config: &AppConfig, identity: &str) -> anyhow::Result<()> {
    match command {
        Command::Today { pretty } => {
            let aggregator = create_page_aggregator(&config.backend)?;
            let page = aggregator.aggregate(identity).await;
            print_json(&page, pretty)?;
        }
        Command::Favorite { action } => {
            let aggregator = create_page_aggregator(&config.backend)?;
            let preferences = match action {
                FavoriteAction::Add { meal } => aggregator
                    .backend()
                    .add_favorite(identity, &meal)
                    .await
                    .with_context(|| format!("failed to add favorite {:?}", meal))?,
                FavoriteAction::Remove { meal } => aggregator
                    .backend()
                    .remove_favorite(identity, &meal)
                    .await
                    .with_context(|| format!("failed to remove favorite {:?}", meal))?,
            };
            print_json(&preferences, true)?;
        }
        Command::Whoami => println!("{}", identity),
    }

    Ok(())
}

fn print_json<T: Serialize>(value: &T, pretty: bool) -> anyhow::Result<()> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{}", json);
    Ok(())
}
