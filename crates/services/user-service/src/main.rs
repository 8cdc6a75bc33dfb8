//! User Service - command line access to the user store.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing::{debug, error};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use user_service_lib::config::UserServiceConfig;
use user_service_lib::UserCommand;

#[derive(Parser)]
#[command(name = "user-service")]
#[command(about = "Manage user records and profile images")]
struct Cli {
    /// Directory holding the document collections
    #[arg(long, global = true, env = "USER_SERVICE_DATA_DIR")]
    data_dir: Option<String>,

    /// Directory holding uploaded objects
    #[arg(long, global = true, env = "USER_SERVICE_BLOB_DIR")]
    blob_dir: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List all users
    List {
        /// Select the user at this position
        #[arg(long)]
        select: Option<usize>,
    },
    /// Show a single user
    Get { id: String },
    /// Create a user
    Insert {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
    },
    /// Replace a user's name and email
    Update {
        id: String,
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
    },
    /// Upload a profile image and link it to the user
    UpdateImage { id: String, file: PathBuf },
    /// Delete a user
    Delete { id: String },
}

impl From<Commands> for UserCommand {
    fn from(command: Commands) -> Self {
        match command {
            Commands::List { select } => UserCommand::List { select },
            Commands::Get { id } => UserCommand::Get { id },
            Commands::Insert { name, email } => UserCommand::Insert { name, email },
            Commands::Update { id, name, email } => UserCommand::Update { id, name, email },
            Commands::UpdateImage { id, file } => UserCommand::UpdateImage { id, file },
            Commands::Delete { id } => UserCommand::Delete { id },
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    // Load environment variables
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = UserServiceConfig::from_env().with_dirs(cli.data_dir, cli.blob_dir);

    // Initialize tracing
    let default_filter = config.service.log_level.clone();
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
    debug!("{} starting", config.service.service_name);

    match user_service_lib::run(config, cli.command.into()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{} failed: {}", e.code(), e);
            if e.is_transient() {
                eprintln!("error: {} (retrying may succeed)", e.user_message());
            } else {
                eprintln!("error: {}", e.user_message());
            }
            ExitCode::FAILURE
        }
    }
}
