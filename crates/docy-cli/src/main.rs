use clap::{Parser, Subcommand};
use colored::Colorize;
use docy_core::Config;
use docy_store::Stores;
use log::debug;

mod commands;
mod logging;
mod render;

use commands::{AgentCommand, ChatCommand, FileCommand, ProjectCommand, TaskCommand};
use render::Output;

#[derive(Parser)]
#[command(name = "docy")]
#[command(about = "Command-line client for the docy project API")]
#[command(version)]
struct Cli {
    /// API base URL, overrides the config file and DOCY_API_BASE
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Enable debug logging
    #[arg(long, short, global = true, env = "DOCY_DEBUG")]
    debug: bool,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage projects
    Projects {
        #[command(subcommand)]
        action: ProjectCommand,
    },
    /// Manage agents
    Agents {
        #[command(subcommand)]
        action: AgentCommand,
    },
    /// Chats and their messages
    Chats {
        #[command(subcommand)]
        action: ChatCommand,
    },
    /// Files in the server workspace
    Files {
        #[command(subcommand)]
        action: FileCommand,
    },
    /// Manage tasks
    Tasks {
        #[command(subcommand)]
        action: TaskCommand,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    logging::init_logging(cli.debug);

    if let Err(err) = run(cli).await {
        eprintln!("{}", format!("❌ {err}").red());
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = Config::load();
    if let Some(base_url) = cli.base_url {
        config.api_base = base_url;
    }
    debug!("Using API at {}", config.base_url());

    let stores = Stores::from_config(&config)?;
    let out = Output { json: cli.json };

    match cli.command {
        Commands::Projects { action } => commands::projects(&stores.projects, action, out).await,
        Commands::Agents { action } => commands::agents(&stores.agents, action, out).await,
        Commands::Chats { action } => commands::chats(&stores.chats, action, out).await,
        Commands::Files { action } => commands::files(&stores.files, action, out).await,
        Commands::Tasks { action } => commands::tasks(&stores.tasks, action, out).await,
    }
}
