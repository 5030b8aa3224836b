use anyhow::{bail, Context, Result};
use clap::Subcommand;
use colored::Colorize;
use hostal_core::{
    default_config_file, ensure_config_dir, get_config_paths, ConfigLoadError, HostalConfig,
};

#[derive(Subcommand)]
pub enum ConfigCommand {
    #[command(about = "Print the effective configuration")]
    Show {
        #[arg(
            short,
            long,
            default_value = "text",
            help = "Output format (text, toml, json)"
        )]
        format: String,
    },

    #[command(about = "List the files configuration is read from")]
    Path,

    #[command(about = "Write a default config file")]
    Init {
        #[arg(short, long, help = "Overwrite an existing file")]
        force: bool,
    },
}

pub fn handle_config_command(
    loaded: Result<HostalConfig, ConfigLoadError>,
    api_url: Option<&str>,
    cmd: Option<ConfigCommand>,
) -> Result<()> {
    match cmd.unwrap_or(ConfigCommand::Show {
        format: "text".to_string(),
    }) {
        ConfigCommand::Show { format } => {
            let mut config = loaded?;
            if let Some(url) = api_url {
                config.api.base_url = url.to_string();
            }
            cmd_config_show(&config, &format)
        }
        ConfigCommand::Path => cmd_config_path(),
        ConfigCommand::Init { force } => cmd_config_init(force),
    }
}

fn cmd_config_show(config: &HostalConfig, format: &str) -> Result<()> {
    let mut redacted = config.clone();
    if redacted.api.token.is_some() {
        redacted.api.token = Some("****".to_string());
    }

    match format {
        "json" => println!("{}", serde_json::to_string_pretty(&redacted)?),
        "toml" => print!("{}", toml::to_string_pretty(&redacted)?),
        "text" => {
            println!("{}", "Hostal Configuration".cyan().bold());
            println!("{}", "═".repeat(40).dimmed());
            println!();
            println!("  {}", "API".yellow().bold());
            println!("    Base URL:        {}", redacted.api.base_url);
            println!(
                "    Token:           {}",
                redacted.api.token.as_deref().unwrap_or("(none)")
            );
            println!("    Timeout:         {}s", redacted.api.timeout_secs);
            println!("    Connect timeout: {}s", redacted.api.connect_timeout_secs);
            println!();
            println!("  {}", "Logging".yellow().bold());
            println!("    Level:           {}", redacted.log_level());
            println!("    JSON:            {}", redacted.logging.json_format);
            println!();
            println!("  {}", "Display".yellow().bold());
            println!("    Color:           {}", redacted.display.color);
            println!("    Date format:     {}", redacted.display.date_format);
            println!("    Currency:        {}", redacted.display.currency);
            println!("    Page size:       {}", redacted.display.page_size);
        }
        other => bail!("Unknown output format '{}', expected text, toml or json", other),
    }
    Ok(())
}

fn cmd_config_path() -> Result<()> {
    println!("{}", "Configuration files (later files win)".cyan().bold());
    for path in get_config_paths() {
        let marker = if path.exists() {
            "✓".green()
        } else {
            "·".dimmed()
        };
        println!("  {} {}", marker, path.display());
    }
    println!();
    println!(
        "  {}",
        "HOSTAL_API_URL, HOSTAL_API_TOKEN and HOSTAL__<SECTION>__<KEY> override files".dimmed()
    );
    Ok(())
}

fn cmd_config_init(force: bool) -> Result<()> {
    let path = default_config_file().context("Could not determine config directory")?;
    if path.exists() && !force {
        bail!(
            "{} already exists; use --force to overwrite",
            path.display()
        );
    }

    ensure_config_dir().context("Failed to create config directory")?;
    let contents = toml::to_string_pretty(&HostalConfig::default())?;
    std::fs::write(&path, contents)
        .with_context(|| format!("Failed to write {}", path.display()))?;

    println!(
        "{} {}",
        "✓".green().bold(),
        format!("Wrote {}", path.display()).green()
    );
    Ok(())
}
