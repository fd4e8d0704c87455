use anyhow::Context;
use clap::Parser;
use drr_server::config::{Args, Command};
use drr_server::serverless::{self, ServerlessEvent};
use drr_server::{telemetry, Application, Config};
use tokio::io::AsyncReadExt;

/// Wait for shutdown signal (SIGTERM or Ctrl+C)
async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, shutting down gracefully...");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM, shutting down gracefully...");
        },
    }
}

async fn read_event(path: Option<std::path::PathBuf>) -> anyhow::Result<ServerlessEvent> {
    let raw = match path {
        Some(path) => tokio::fs::read_to_string(&path)
            .await
            .with_context(|| format!("Failed to read event file {}", path.display()))?,
        None => {
            let mut raw = String::new();
            tokio::io::stdin().read_to_string(&mut raw).await?;
            raw
        }
    };
    serde_json::from_str(&raw).context("Event is not a valid invocation document")
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let config = Config::load(&args)?;

    telemetry::init_telemetry()?;
    tracing::debug!("{:?}", args);

    match args.command.unwrap_or(Command::Serve) {
        Command::Serve => Application::new(config)?.serve(shutdown_signal()).await,
        Command::Invoke { event } => {
            let event = read_event(event).await?;
            let app = Application::new(config)?;
            let response = serverless::invoke(app.router(), event, &app.config().function_prefix).await?;
            println!("{}", serde_json::to_string(&response)?);
            Ok(())
        }
    }
}
