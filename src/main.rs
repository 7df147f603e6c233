use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use kumbuk::config::Config;
use kumbuk::pipeline::Pipeline;
use kumbuk::routing::UserRole;

/// Kumbuk - chat orchestration backend for the local-services marketplace.
#[derive(Parser, Debug)]
#[command(name = "kumbuk")]
#[command(version)]
#[command(about = "Chat orchestration backend for the Kumbuk marketplace.", long_about = None)]
struct Cli {
    /// Override the config directory (also via KUMBUK_CONFIG_DIR)
    #[arg(long, global = true)]
    config_dir: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the HTTP/WebSocket gateway
    #[command(long_about = "\
Start the HTTP/WebSocket gateway.

Serves POST /message, GET /health, GET /session/{id} and the
/ws/{user_id} WebSocket endpoint. Bind address defaults to the values
in your config file (server.host / server.port).

Examples:
  kumbuk serve                   # use config defaults
  kumbuk serve -p 8080           # listen on port 8080
  kumbuk serve --host 0.0.0.0    # bind to all interfaces
  kumbuk serve -p 0              # random available port")]
    Serve {
        /// Port to listen on (use 0 for a random port); defaults to config server.port
        #[arg(short, long)]
        port: Option<u16>,

        /// Host to bind to; defaults to config server.host
        #[arg(long)]
        host: Option<String>,
    },

    /// Run a single message through the pipeline and print the reply
    #[command(long_about = "\
Run a single message through the orchestration pipeline.

Useful for exercising extraction and routing without starting the
gateway.

Examples:
  kumbuk chat -m \"Find me a plumber in Colombo\"
  kumbuk chat -m \"How much did I earn this month?\" --role provider
  kumbuk chat -m \"Hello\" --json")]
    Chat {
        /// The message to process
        #[arg(short, long)]
        message: String,

        /// Session id to append to (a fresh session is created otherwise)
        #[arg(short, long)]
        session: Option<String>,

        /// Declared role: consumer or provider
        #[arg(long, default_value = "consumer")]
        role: String,

        /// Print the full response envelope as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show resolved configuration and backends
    Status,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(config_dir) = &cli.config_dir {
        if config_dir.trim().is_empty() {
            bail!("--config-dir cannot be empty");
        }
        std::env::set_var("KUMBUK_CONFIG_DIR", config_dir);
    }

    // Initialize logging - respects RUST_LOG env var, defaults to INFO
    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .finish();
    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    let mut config = Config::load_or_init().await?;
    config.apply_env_overrides();

    match cli.command {
        Commands::Serve { port, host } => {
            let port = port.unwrap_or(config.server.port);
            let host = host.unwrap_or_else(|| config.server.host.clone());
            if port == 0 {
                info!("starting Kumbuk gateway on {host} (random port)");
            } else {
                info!("starting Kumbuk gateway on {host}:{port}");
            }
            kumbuk::gateway::run_gateway(&host, port, config).await
        }

        Commands::Chat {
            message,
            session,
            role,
            json,
        } => {
            let pipeline = Pipeline::from_config(&config);
            let outcome = pipeline
                .process_message("cli", &message, session.as_deref(), UserRole::parse(&role))
                .await?;

            if json {
                println!("{}", serde_json::to_string_pretty(&outcome.envelope)?);
            } else {
                println!("[{}] {}", outcome.agent, outcome.envelope.message);
                for suggestion in &outcome.envelope.suggestions {
                    println!("  - {suggestion}");
                }
            }
            Ok(())
        }

        Commands::Status => {
            println!("Kumbuk Status");
            println!();
            println!("Version:   {}", env!("CARGO_PKG_VERSION"));
            println!("Config:    {}", config.config_path.display());
            println!("Server:    {}:{}", config.server.host, config.server.port);
            println!("Sessions:  in_memory (max {} history entries per query)",
                config.sessions.max_history_entries);
            println!("Directory: in_memory ({} seed providers)",
                kumbuk::directory::seed_providers().len());
            println!();
            println!("Integrations:");
            println!(
                "  Graph:    {}",
                config.integrations.graph_uri.as_deref().unwrap_or("(unset)")
            );
            println!(
                "  Realtime: {}",
                config
                    .integrations
                    .realtime_database_url
                    .as_deref()
                    .unwrap_or("(unset)")
            );
            println!(
                "  Cloud:    {}",
                config
                    .integrations
                    .google_cloud_project
                    .as_deref()
                    .unwrap_or("(unset)")
            );
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_has_no_flag_conflicts() {
        Cli::command().debug_assert();
    }

    #[test]
    fn chat_invocation_parses() {
        let cli = Cli::try_parse_from(["kumbuk", "chat", "-m", "hello", "--role", "provider"])
            .expect("chat invocation should parse");
        match cli.command {
            Commands::Chat { message, role, .. } => {
                assert_eq!(message, "hello");
                assert_eq!(role, "provider");
            }
            other => panic!("expected chat command, got {other:?}"),
        }
    }

    #[test]
    fn serve_accepts_port_and_host() {
        let cli = Cli::try_parse_from(["kumbuk", "serve", "-p", "8080", "--host", "0.0.0.0"])
            .expect("serve invocation should parse");
        match cli.command {
            Commands::Serve { port, host } => {
                assert_eq!(port, Some(8080));
                assert_eq!(host.as_deref(), Some("0.0.0.0"));
            }
            other => panic!("expected serve command, got {other:?}"),
        }
    }
}
