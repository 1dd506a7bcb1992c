//! Course Advisor — section discovery server and chat shell.

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use courseadvisor_core::{AdvisorConfig, Capability, CapabilitySet, SectionsConfig};
use courseadvisor_runtime::Advisor;
use courseadvisor_server::{repl, routes, AppState};
use courseadvisor_store::{loader, Catalog};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "courseadvisor")]
#[command(version)]
#[command(about = "Course section discovery: HTTP API and interactive advisor")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// Sections dataset (.json, .json.lzma or .json.xz); overrides SECTIONS_PATH
    #[arg(long, global = true)]
    sections: Option<PathBuf>,

    /// Withhold a capability, e.g. find_sections_filtered (repeatable)
    #[arg(long = "disable", value_name = "CAPABILITY", global = true)]
    disable: Vec<Capability>,

    /// Conversation log file; overrides CONVO_LOG
    #[arg(long, global = true)]
    log: Option<PathBuf>,

    /// Disable the conversation log
    #[arg(long, global = true, conflicts_with = "log")]
    no_log: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Start the HTTP server (default)
    Serve {
        /// Listen port; overrides PORT
        #[arg(long, short)]
        port: Option<u16>,
    },
    /// Interactive advisor on stdin/stdout
    Chat,
    /// Load a dataset and print its diagnostics
    Validate {
        /// Dataset file (defaults to the configured location)
        path: Option<PathBuf>,
    },
}

impl Cli {
    fn config(&self) -> anyhow::Result<AdvisorConfig> {
        let mut config = AdvisorConfig::from_env()?;
        if let Some(path) = &self.sections {
            config.sections = SectionsConfig::with_path(path);
        }
        if self.no_log {
            config.conversation_log = None;
        } else if let Some(path) = &self.log {
            config.conversation_log = Some(path.clone());
        }
        Ok(config)
    }

    fn capabilities(&self) -> CapabilitySet {
        self.disable
            .iter()
            .fold(CapabilitySet::all(), |set, c| set.without(*c))
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut config = cli.config()?;
    let capabilities = cli.capabilities();

    match cli.command {
        None => serve(config, capabilities).await,
        Some(Command::Serve { port }) => {
            if let Some(port) = port {
                config.port = port;
            }
            serve(config, capabilities).await
        }
        Some(Command::Chat) => chat(config, capabilities).await,
        Some(Command::Validate { path }) => {
            let result = match path {
                Some(path) => loader::load_file(&path),
                None => loader::load_dataset(&config.sections),
            };
            match result {
                Ok(dataset) => {
                    println!("{}", serde_json::to_string_pretty(&dataset.info)?);
                    Ok(())
                }
                Err(e) => {
                    eprintln!("Dataset invalid: {}", e);
                    std::process::exit(1);
                }
            }
        }
    }
}

async fn serve(config: AdvisorConfig, capabilities: CapabilitySet) -> anyhow::Result<()> {
    let port = config.port;
    let state = Arc::new(AppState::new(config, capabilities));
    let app = routes::build_router(state);

    let addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Course advisor listening on {}", addr);

    axum::serve(listener, app).await?;
    Ok(())
}

async fn chat(config: AdvisorConfig, capabilities: CapabilitySet) -> anyhow::Result<()> {
    tokio::task::spawn_blocking(move || {
        let catalog = Arc::new(Catalog::new(config.sections.clone()));
        let advisor = Advisor::new(catalog, &config).with_capabilities(capabilities);
        repl::run(&advisor, std::io::stdin().lock(), std::io::stdout())
    })
    .await??;
    Ok(())
}
