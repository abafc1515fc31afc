//! RiverChart command-line client.

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use riverchart_application::{
    ClientContext, ClientPorts, Credentials, Outcome, PersistentKv, SessionState,
};
use riverchart_domain::{ContentId, RequestOptions};
use riverchart_infrastructure::{
    FileKvStore, InMemoryKv, LoggingNavigator, ReqwestTransport, SettingsRepository, SystemClock,
    TracingFeedback,
};
use serde_json::{Map, Value};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "riverchart")]
#[command(about = "RiverChart content client", version)]
struct Cli {
    /// Settings file (defaults to the platform config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Key-value store file holding the session
    #[arg(long, global = true)]
    storage: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in with username and password
    Login {
        #[arg(long)]
        username: String,
        #[arg(long)]
        password: String,
    },
    /// Log out and forget the stored session
    Logout,
    /// Show the logged-in user
    Whoami,
    /// List collected content ids
    Collections,
    /// Collect or uncollect a content item
    Toggle {
        /// Content id
        content_id: ContentId,
    },
    /// Issue an authenticated GET and print the data
    Get {
        /// Path relative to the API base URL, or an absolute URL
        path: String,
    },
    /// Upload a file as multipart form data
    Upload {
        /// Target path
        path: String,
        /// Local file
        file: PathBuf,
        /// Form field carrying the file
        #[arg(long)]
        field: Option<String>,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

async fn build_context(cli: &Cli) -> Result<ClientContext, Box<dyn std::error::Error>> {
    let repository = cli
        .config
        .clone()
        .map_or_else(SettingsRepository::new, SettingsRepository::with_path);
    let settings = repository.load_with_env().await?;

    let storage_path = cli
        .storage
        .clone()
        .or_else(|| settings.storage_file.clone())
        .or_else(SettingsRepository::default_storage_path);
    let storage: Arc<dyn PersistentKv> = match storage_path {
        Some(path) => Arc::new(FileKvStore::open(path)?),
        None => {
            warn!("no storage location, session will not persist");
            Arc::new(InMemoryKv::new())
        }
    };

    info!(base_url = %settings.api_base_url, "client configured");
    let ports = ClientPorts {
        transport: Arc::new(ReqwestTransport::new()?),
        storage,
        feedback: Arc::new(TracingFeedback::new()),
        navigator: Arc::new(LoggingNavigator),
        clock: Arc::new(SystemClock::new()),
        platform_auth: None,
    };
    Ok(ClientContext::new(settings, ports))
}

fn print_json(value: &Value) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

async fn run(cli: Cli) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let ctx = build_context(&cli).await?;
    ctx.session.restore().await;

    match cli.command {
        Commands::Login { username, password } => {
            match ctx
                .session
                .login(Some(Credentials::password(username, password)))
                .await
            {
                Outcome::Success(user_id) => println!("logged in as user {user_id}"),
                Outcome::Failure(err) => {
                    eprintln!("login failed: {err}");
                    return Ok(ExitCode::FAILURE);
                }
            }
        }
        Commands::Logout => {
            ctx.sign_out().await;
            println!("logged out");
        }
        Commands::Whoami => match ctx.session.state().await {
            SessionState::Anonymous => println!("not logged in"),
            SessionState::Authenticated { user_id } => match ctx.session.get_user_info().await {
                Outcome::Success(Some(profile)) => print_json(&profile)?,
                Outcome::Success(None) => println!("user {user_id}"),
                Outcome::Failure(err) => {
                    eprintln!("user {user_id}: profile unavailable: {err}");
                    return Ok(ExitCode::FAILURE);
                }
            },
        },
        Commands::Collections => {
            if !ctx.session.is_logged_in().await {
                println!("not logged in");
                return Ok(ExitCode::FAILURE);
            }
            ctx.collections.load_collections().await;
            for id in ctx.collections.snapshot().await {
                println!("{id}");
            }
        }
        Commands::Toggle { content_id } => {
            ctx.collections.load_collections().await;
            if let Outcome::Failure(err) = ctx.collections.toggle_collection(content_id).await {
                eprintln!("toggle failed: {err}");
                return Ok(ExitCode::FAILURE);
            }
            let state = if ctx.collections.is_collected(content_id).await {
                "collected"
            } else {
                "not collected"
            };
            println!("{content_id}: {state}");
        }
        Commands::Get { path } => print_json(&ctx.gateway.get(&path, None).await?)?,
        Commands::Upload { path, file, field } => {
            let body = ctx
                .uploads
                .upload(
                    &path,
                    file,
                    field.as_deref(),
                    Map::new(),
                    &RequestOptions::default(),
                )
                .await?;
            print_json(&body)?;
        }
    }

    Ok(ExitCode::SUCCESS)
}
