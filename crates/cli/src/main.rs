use anyhow::Context;
use clap::{Parser, Subcommand};

use bookshelf_kernel::settings::Settings;

/// bookshelf - book and collection catalog service
#[derive(Parser)]
#[command(name = "bookshelf")]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the catalog API
    Serve {
        /// Override the configured bind host
        #[arg(long)]
        host: Option<String>,
        /// Override the configured bind port
        #[arg(long)]
        port: Option<u16>,
    },
    /// Print the effective settings as JSON
    Settings,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut settings = Settings::load().with_context(|| "failed to load bookshelf settings")?;

    match cli.command {
        Commands::Serve { host, port } => {
            if let Some(host) = host {
                settings.server.host = host;
            }
            if let Some(port) = port {
                settings.server.port = port;
            }

            bookshelf_telemetry::init(&settings.telemetry)?;
            tracing::info!(
                env = ?settings.environment,
                address = %settings.server.bind_address(),
                "bookshelf CLI serving"
            );

            bookshelf_app::run(settings).await
        }
        Commands::Settings => {
            let rendered = serde_json::to_string_pretty(&settings)
                .context("failed to render settings")?;
            println!("{rendered}");
            Ok(())
        }
    }
}
