mod api;
mod appstate;
mod batch;
mod config;
mod error;
mod local;
mod sheet;
mod storage;

use crate::appstate::appstate::AppState;
use crate::batch::client::{AgentClient, DEFAULT_AGENT_URL, DEFAULT_TIMEOUT_SECS};
use crate::batch::models::{Artifact, BatchInput};
use crate::batch::orchestrator::run_batch;
use crate::batch::reporter::LogReporter;
use crate::config::config::ServerConfig;
use crate::error::AgentError;
use crate::storage::s3::S3Store;
use actix_web::{App, HttpResponse, HttpServer, middleware::Logger, web};
use clap::{Args, Parser, Subcommand};
use env_logger::Env;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

#[derive(Parser)]
#[command(name = "sheet-agent", version, about = "Ship files listed in a spreadsheet to S3")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the local agent: file fetch, S3 upload and liveness endpoints.
    Serve,
    /// Upload every file listed in a spreadsheet through a running agent.
    Ship(ShipArgs),
}

#[derive(Args)]
struct ShipArgs {
    /// Spreadsheet with `Name` and `File_Link` columns.
    #[arg(long)]
    sheet: PathBuf,

    /// Companion archive uploaded after the rows.
    #[arg(long)]
    archive: Option<PathBuf>,

    #[arg(long, env = "AGENT_URL", default_value = DEFAULT_AGENT_URL)]
    agent_url: String,

    /// Per-request timeout in seconds.
    #[arg(long, env = "REQUEST_TIMEOUT_SECS", default_value_t = DEFAULT_TIMEOUT_SECS)]
    timeout_secs: u64,
}

fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let result = match cli.command {
        Command::Serve => serve(),
        Command::Ship(args) => ship(args),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn serve() -> Result<(), AgentError> {
    let config = ServerConfig::from_env()?;
    actix_web::rt::System::new().block_on(run_server(config))
}

async fn run_server(config: ServerConfig) -> Result<(), AgentError> {
    match &config.local_root {
        Some(root) => log::info!("local file reads confined to {}", root.display()),
        None => log::warn!(
            "LOCAL_FILE_ROOT is not set: get-local-file will read any path this process can access"
        ),
    }

    let store = S3Store::connect(&config.s3).await;
    let state = web::Data::new(AppState {
        store: Arc::new(store),
        local_root: config.local_root.clone(),
        max_upload_bytes: config.max_upload_bytes,
    });

    log::info!(
        "Server running on {}:{} (bucket {})",
        config.host,
        config.port,
        config.s3.bucket
    );

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .configure(api::configure)
            .wrap(Logger::default())
            .default_service(web::route().to(|req: actix_web::HttpRequest| async move {
                log::info!("404 Not Found: {}", req.path());
                HttpResponse::NotFound().body("Not Found")
            }))
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await?;

    Ok(())
}

fn ship(args: ShipArgs) -> Result<(), AgentError> {
    let sheet = Artifact::read(&args.sheet)
        .map_err(|e| AgentError::Parse(format!("{}: {e}", args.sheet.display())))?;
    let archive = args
        .archive
        .as_deref()
        .map(Artifact::read)
        .transpose()?;

    let client = AgentClient::new(&args.agent_url, Duration::from_secs(args.timeout_secs))?;
    match client.ping() {
        Ok(reply) => log::info!("agent at {}: {reply}", args.agent_url),
        Err(e) => log::warn!("{e}"),
    }

    let report = run_batch(
        BatchInput { sheet, archive },
        &client,
        &client,
        &mut LogReporter::new(),
    )?;

    for artifact in report.artifacts.iter().filter(|a| a.error.is_some()) {
        log::warn!("{} {} was not uploaded", artifact.kind, artifact.object_name);
    }
    Ok(())
}
