use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::*;
use dotenvy::dotenv;
use std::sync::Arc;

pub mod actions;
pub mod config;
pub mod dashboard;
pub mod interface;
pub mod logger;
pub mod menu;

#[derive(Parser, Debug)]
#[command(name = "dream-ai", version, about = "Dream.AI menu (CLI and web page)")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// Interactive menu (default).
    Menu,
    /// Serve only the web page.
    Serve {
        #[arg(long)]
        host: Option<String>,
        #[arg(long)]
        port: Option<u16>,
    },
}

/// Run the application: load `.env`, load config and API keys, then start the
/// menu or the web page.
///
/// When `enable_dashboard = true` in `dreamai.toml`, the menu also spawns the
/// web page as a background task.
pub async fn run(cli: Cli) -> Result<()> {
    // Load environment variables from .env
    dotenv().ok();

    let mut config = config::AppConfig::load();
    let api_keys = config::ApiKeys::from_env();

    match cli.command.unwrap_or(Command::Menu) {
        Command::Menu => {
            // The menu and its background page share one session log.
            let logger = session_logger(&config)?;
            if config.enable_dashboard {
                let state = Arc::new(DashboardState::new(config.clone(), api_keys, logger.clone()));
                let addr = config.dashboard_addr();
                println!("{} http://{}", "✓ Web page:".green(), addr);
                tokio::spawn(async move {
                    if let Err(e) = dashboard::start_dashboard(state, &addr).await {
                        eprintln!("{} {:#}", "✗ Web page stopped:".red(), e);
                    }
                });
            }

            tokio::task::spawn_blocking(move || interface::start_repl(logger)).await??;
        }
        Command::Serve { host, port } => {
            if let Some(host) = host {
                config.dashboard_host = host;
            }
            if let Some(port) = port {
                config.dashboard_port = port;
            }
            let addr = config.dashboard_addr();
            let logger = session_logger(&config)?;
            let state = Arc::new(DashboardState::new(config, api_keys, logger));
            println!("{} http://{}", "✓ Web page:".green(), addr);
            dashboard::start_dashboard(state, &addr).await?;
        }
    }

    Ok(())
}

fn session_logger(config: &AppConfig) -> Result<Option<logger::Logger>> {
    if !config.enable_logging {
        return Ok(None);
    }
    Ok(Some(logger::Logger::new(&config.log_dir)?))
}

// Re-exports for library consumers
pub use actions::MenuAction;
pub use config::{ApiKeys, AppConfig};
pub use dashboard::DashboardState;
pub use menu::{dispatch, resolve_choice, MenuOutcome, QuitReason};
