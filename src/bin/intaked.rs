use std::sync::Arc;

use arrrg::CommandLine;
use arrrg_derive::CommandLine;
use axum::Router;
use tokio::net::TcpListener;
use tokio::signal;

use intake::{
    FormService, FormStore, InMemoryFormStore, PgFormStore, create_form_router,
    create_health_router,
};

#[derive(CommandLine, Default, PartialEq, Eq)]
struct Args {
    #[arrrg(optional, "PostgreSQL database URL (in-memory storage when omitted)")]
    database_url: Option<String>,
    #[arrrg(optional, "Host to bind the HTTP server")]
    host: Option<String>,
    #[arrrg(optional, "Port to bind the HTTP server")]
    port: Option<u16>,
    #[arrrg(flag, "Enable verbose logging")]
    verbose: bool,
}

const HELP_TEXT: &str = r#"intaked - Intake daemon

USAGE:
    intaked [OPTIONS]

OPTIONS:
    --database-url <URL>    PostgreSQL database URL [default: in-memory storage]
    --host <HOST>           Host to bind the HTTP server [default: 127.0.0.1]
    --port <PORT>           Port to bind the HTTP server [default: 8080]
    --verbose               Enable verbose logging

DESCRIPTION:
    Runs the intake daemon with client form management endpoints mounted
    under /api/v1/ and a health endpoint at the root.

    Without --database-url the daemon keeps records in memory; this mode is
    intended for development and loses all data on shutdown.

    The server supports graceful shutdown via SIGTERM or Ctrl+C.

API ENDPOINTS:
    Client Forms:
      POST   /api/v1/form          Create a new client form
      GET    /api/v1/form          List all client forms (newest first)
      GET    /api/v1/form/{id}     Get a specific client form
      PUT    /api/v1/form/{id}     Apply a partial update
      DELETE /api/v1/form/{id}     Delete a client form

    Health:
      GET    /health               Service liveness check"#;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let (args, free) = Args::from_command_line("USAGE: intaked [OPTIONS]");

    if !free.is_empty() && free[0] == "help" {
        println!("{}", HELP_TEXT);
        return Ok(());
    }

    let config = ServerConfig::from_args(args);

    let default_filter = if config.verbose { "intake=debug,info" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter)),
        )
        .init();

    // Pick the storage backend
    let store: Arc<dyn FormStore> = match &config.database_url {
        Some(url) => {
            let pool = sqlx::PgPool::connect(url)
                .await
                .map_err(|e| format!("Failed to connect to {}: {}", url, e))?;
            Arc::new(PgFormStore::new(pool))
        }
        None => Arc::new(InMemoryFormStore::new()),
    };
    let service = FormService::new(store);

    let app = Router::new()
        .nest("/api/v1", create_form_router(service))
        .merge(create_health_router());

    // Bind to address
    let addr = format!("{}:{}", config.host, config.port);
    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|e| format!("Failed to bind to {}: {}", addr, e))?;

    println!("🚀 Intake daemon started successfully!");
    println!("📡 Server listening on: http://{}", addr);
    match &config.database_url {
        Some(url) => println!("💾 Storage: PostgreSQL ({})", url),
        None => println!("💾 Storage: in-memory (records lost on shutdown)"),
    }
    println!("💡 Use Ctrl+C or send SIGTERM for graceful shutdown");
    println!();

    // Set up graceful shutdown
    let shutdown_signal = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    // Run server with graceful shutdown
    let server = axum::serve(listener, app);

    tokio::select! {
        result = server => {
            if let Err(e) = result {
                eprintln!("❌ Server error: {}", e);
                std::process::exit(1);
            }
        }
        () = shutdown_signal => {
            println!();
            println!("🛑 Shutdown signal received, stopping server gracefully...");
            println!("👋 Intake daemon stopped");
        }
    }

    Ok(())
}

struct ServerConfig {
    database_url: Option<String>,
    host: String,
    port: u16,
    verbose: bool,
}

impl ServerConfig {
    fn from_args(args: Args) -> Self {
        Self {
            database_url: args.database_url,
            host: args.host.unwrap_or_else(|| "127.0.0.1".to_string()),
            port: args.port.unwrap_or(8080),
            verbose: args.verbose,
        }
    }
}
