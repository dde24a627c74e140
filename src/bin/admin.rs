//! CLI administration tool for linkedin-connect.
//!
//! Inspects the resolved configuration and exercises the upstream without
//! starting the HTTP server.
//!
//! # Usage
//!
//! ```bash
//! # Show the resolved configuration (API key masked)
//! cargo run --bin admin -- config
//!
//! # Mint a hosted auth link and print it
//! cargo run --bin admin -- link --provider linkedin
//!
//! # List the operations the upstream client supports
//! cargo run --bin admin -- capabilities
//! ```
//!
//! # Environment Variables
//!
//! Same as the server: `.env` or `env.local` is loaded first, see
//! [`linkedin_connect::config`].

use linkedin_connect::config::{self, Config};
use linkedin_connect::domain::provider::Provider;
use linkedin_connect::domain::settings::EffectiveConfig;
use linkedin_connect::state::AppState;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;

/// CLI tool for managing linkedin-connect.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level commands.
#[derive(Subcommand)]
enum Commands {
    /// Print the resolved configuration
    Config,

    /// Mint a hosted auth link
    Link {
        /// Provider to link (e.g. LINKEDIN, WHATSAPP)
        #[arg(short, long, default_value = "LINKEDIN")]
        provider: Provider,
    },

    /// List upstream client operations
    Capabilities,
}

#[tokio::main]
async fn main() -> Result<()> {
    let env_file = config::load_env_files();

    let cli = Cli::parse();

    let config = config::load_from_env().context("Invalid configuration")?;
    if let Some(path) = env_file {
        println!("{} {}", "Loaded".bright_black(), path.display());
    }

    match cli.command {
        Commands::Config => handle_config(&config),
        Commands::Link { provider } => handle_link(&config, provider).await?,
        Commands::Capabilities => handle_capabilities(&config)?,
    }

    Ok(())
}

/// Prints every resolved value, API key and client secret masked.
fn handle_config(config: &Config) {
    let effective = config.resolve();

    println!("{}", "⚙️  Configuration".bright_blue().bold());
    println!();

    row("Listen address", config.listen_addr());
    row(
        "Public base URL",
        format!(
            "{} ({:?})",
            effective.public_base_url, effective.base_url_source
        ),
    );
    row(
        "API origin",
        effective
            .api_origin
            .as_ref()
            .map(ToString::to_string)
            .unwrap_or_else(|| "-".to_string()),
    );

    match &effective.upstream {
        Some(upstream) => {
            row("Upstream", upstream.base_url.to_string());
            row("API key", config::mask_secret(upstream.api_key()));
        }
        None => row("Upstream", "not configured".yellow().to_string()),
    }

    row("Callback URL mode", format!("{:?}", effective.callback_policy));
    print_callbacks(&effective);
    row("API URL mode", format!("{:?}", effective.api_url_mode));
    row("Proxy mode", format!("{:?}", effective.proxy_mode));
    row(
        "Proxy prefixes",
        effective
            .proxy_routes
            .iter()
            .map(|r| {
                if r.strip_prefix {
                    format!("{} (stripped)", r.prefix)
                } else {
                    r.prefix.clone()
                }
            })
            .collect::<Vec<_>>()
            .join(", "),
    );
    row(
        "Hosted UI origin",
        effective
            .cors
            .allow_origin()
            .to_str()
            .unwrap_or("<invalid>")
            .to_string(),
    );
    row(
        "Providers",
        effective
            .providers
            .iter()
            .map(|p| p.as_str())
            .collect::<Vec<_>>()
            .join(", "),
    );
    match &effective.linkedin {
        Some(app) => {
            row("LinkedIn client", app.client_id.clone());
            row("LinkedIn secret", config::mask_secret(app.client_secret()));
            row("LinkedIn redirect", app.redirect_uri.to_string());
        }
        None => row("LinkedIn OAuth", "disabled".bright_black().to_string()),
    }
    row(
        "Upstream timeout",
        format!("{}s", effective.upstream_timeout.as_secs()),
    );
    println!();
}

/// Callback URLs as they would be sent without a request origin.
fn print_callbacks(effective: &EffectiveConfig) {
    let callbacks = effective.callback_urls(None);
    let show = |url: Option<url::Url>| {
        url.map(|u| u.to_string())
            .unwrap_or_else(|| "(omitted)".bright_black().to_string())
    };

    row("  success", show(callbacks.success));
    row("  failure", show(callbacks.failure));
    row("  notify", show(callbacks.notify));
}

/// Mints one hosted auth link through the same services the server uses.
async fn handle_link(config: &Config, provider: Provider) -> Result<()> {
    println!("{}", "🔗 Hosted auth link".bright_blue().bold());
    println!();

    let state = AppState::from_config(config.resolve()).context("Failed to build HTTP client")?;

    match state.link_issuer.start_hosted_link(provider, None).await {
        Ok(url) => {
            println!("  Provider: {}", provider.as_str().cyan());
            println!("  Expires:  {}", "in 15 minutes".bright_black());
            println!("  URL:      {}", url.as_str().bright_yellow().bold());
            println!();
            Ok(())
        }
        Err(e) => {
            println!("{} {}", "❌".red(), e.to_string().red());
            Err(anyhow::anyhow!("Failed to create hosted auth link: {}", e))
        }
    }
}

/// Lists the operations of the wired upstream client.
fn handle_capabilities(config: &Config) -> Result<()> {
    println!("{}", "📋 Upstream capabilities".bright_blue().bold());
    println!();

    let state = AppState::from_config(config.resolve()).context("Failed to build HTTP client")?;
    let capabilities = state.link_issuer.capabilities();

    if capabilities.is_empty() {
        println!(
            "{}",
            "  Upstream not configured: set UNIPILE_DSN and UNIPILE_API_KEY".yellow()
        );
        return Ok(());
    }

    println!(
        "  {:<20} {:<7} {:<32} {}",
        "Name".bright_white().bold(),
        "Method".bright_white().bold(),
        "Path".bright_white().bold(),
        "Description".bright_white().bold()
    );
    println!("  {}", "─".repeat(90).bright_black());

    for capability in &capabilities {
        println!(
            "  {:<20} {:<7} {:<32} {}",
            capability.name.cyan(),
            capability.method,
            capability.path.bright_black(),
            capability.description
        );
    }
    println!();

    Ok(())
}

fn row(label: &str, value: impl AsRef<str>) {
    println!("  {:<20} {}", label.bright_white(), value.as_ref());
}
