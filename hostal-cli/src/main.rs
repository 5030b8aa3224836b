use clap::{Parser, Subcommand};
use colored::Colorize;
use hostal_core::{
    CliErrorDisplay, ConfigLoadError, HostalConfig, HostalError, LoggingConfig, Notification,
};
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;
mod context;
mod output;

use commands::{
    handle_categories_command, handle_config_command, handle_messages_command,
    handle_reservations_command, handle_rooms_command, handle_states_command, CategoriesCommand,
    ConfigCommand, MessagesCommand, ReservationsCommand, RoomsCommand, StatesCommand,
};
use context::CliContext;

const VERSION: &str = env!("CARGO_PKG_VERSION");
const NAME: &str = env!("CARGO_PKG_NAME");

#[derive(Parser)]
#[command(name = "hostal")]
#[command(version = VERSION)]
#[command(about = "Hostal - hotel back office for rooms, reservations and support messages")]
#[command(long_about = r#"
Hostal manages a hotel's room inventory, room categories and states,
reservations and the support inbox through the hotel REST API.

Point it at the backend with HOSTAL_API_URL (or api.base_url in
~/.config/hostal/config.toml), then start with 'hostal rooms list' or
'hostal reservations list'.
"#)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(short, long, global = true)]
    verbose: bool,

    #[arg(long, global = true, env = "HOSTAL_API_URL", help = "Base URL of the hotel API")]
    api_url: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    #[command(about = "Manage rooms")]
    Rooms {
        #[command(subcommand)]
        action: Option<RoomsCommand>,
    },

    #[command(about = "Manage room categories and their base prices")]
    Categories {
        #[command(subcommand)]
        action: Option<CategoriesCommand>,
    },

    #[command(about = "Manage room states")]
    States {
        #[command(subcommand)]
        action: Option<StatesCommand>,
    },

    #[command(about = "Manage reservations and move them through their lifecycle")]
    Reservations {
        #[command(subcommand)]
        action: Option<ReservationsCommand>,
    },

    #[command(about = "Read and answer support messages")]
    Messages {
        #[command(subcommand)]
        action: Option<MessagesCommand>,
    },

    #[command(about = "Show or initialize the configuration")]
    Config {
        #[command(subcommand)]
        action: Option<ConfigCommand>,
    },

    #[command(about = "Show version information")]
    Version {
        #[arg(short, long)]
        detailed: bool,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let loaded = HostalConfig::load();

    init_logging(cli.verbose, loaded.as_ref().ok().map(|c| &c.logging));
    if let Err(e) = &loaded {
        debug!(error = %e, "Configuration could not be loaded");
    }

    match run(cli, loaded).await {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            report_error(&e);
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: bool, logging: Option<&LoggingConfig>) {
    let level = match logging {
        _ if verbose => "debug",
        Some(l) => l.level.as_str(),
        None => "warn",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let json = logging.map(|l| l.json_format).unwrap_or(false);

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
            .init();
    }
}

fn report_error(e: &anyhow::Error) {
    match e.downcast_ref::<HostalError>() {
        Some(err) => {
            err.log();
            let notification = Notification::from_error(err);
            eprintln!("{} {}", "✗".red().bold(), notification.message.red());
            eprint!("{}", CliErrorDisplay::new(err).to_string().dimmed());
        }
        None => eprintln!("{}: {:#}", "Error".red().bold(), e),
    }
}

async fn run(cli: Cli, loaded: Result<HostalConfig, ConfigLoadError>) -> anyhow::Result<()> {
    let api_url = cli.api_url.as_deref();

    match cli.command {
        Commands::Rooms { action } => {
            handle_rooms_command(&CliContext::new(loaded?, api_url)?, action).await
        }
        Commands::Categories { action } => {
            handle_categories_command(&CliContext::new(loaded?, api_url)?, action).await
        }
        Commands::States { action } => {
            handle_states_command(&CliContext::new(loaded?, api_url)?, action).await
        }
        Commands::Reservations { action } => {
            handle_reservations_command(&CliContext::new(loaded?, api_url)?, action).await
        }
        Commands::Messages { action } => {
            handle_messages_command(&CliContext::new(loaded?, api_url)?, action).await
        }
        Commands::Config { action } => handle_config_command(loaded, api_url, action),
        Commands::Version { detailed } => cmd_version(detailed),
    }
}

fn cmd_version(detailed: bool) -> anyhow::Result<()> {
    if detailed {
        println!("{}", "Hostal Version Information".cyan().bold());
        println!("{}", "═".repeat(40).dimmed());
        println!("  {:<15} {}", "Version:".bold(), VERSION);
        println!("  {:<15} {}", "Name:".bold(), NAME);
        println!("  {:<15} Apache-2.0", "License:".bold());
        println!();
        println!("  {}", "Resources:".bold());
        println!("    ▣ Rooms");
        println!("    ◈ Room categories");
        println!("    ◇ Room states");
        println!("    ◷ Reservations");
        println!("    ✉ Support messages");
        println!();
        println!("  {}", "Build Information:".bold());
        println!("    Rust Edition: 2021");
        #[cfg(debug_assertions)]
        println!("    Build:        Debug");
        #[cfg(not(debug_assertions))]
        println!("    Build:        Release");
    } else {
        println!("hostal {}", VERSION);
    }

    Ok(())
}
