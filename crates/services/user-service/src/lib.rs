//! User Service Library
//!
//! Create, read, update and delete user records in a document store, upload
//! profile images to a blob store and present the records as a selectable
//! list. Stores sit behind traits so in-memory fakes can stand in for the
//! file-backed ones.

pub mod config;
pub mod infra;
pub mod presentation;
pub mod repository;
pub mod service;

use std::path::PathBuf;
use std::sync::Arc;

use tracing::{info, warn};

use common::AppResult;
use domain::{NewUser, UpdateUser, User};

use crate::config::UserServiceConfig;
use crate::infra::Session;
use crate::presentation::{BlobImageLoader, ImageSource, UserList};
use crate::service::{UserManager, UserService};

/// User command to run against a session.
#[derive(Debug, Clone)]
pub enum UserCommand {
    List { select: Option<usize> },
    Get { id: String },
    Insert { name: String, email: String },
    Update { id: String, name: String, email: String },
    UpdateImage { id: String, file: PathBuf },
    Delete { id: String },
}

/// Open a session, run one command and always close the session again.
pub async fn run(config: UserServiceConfig, command: UserCommand) -> AppResult<()> {
    let session = Session::open(&config).await?;
    let result = execute(&session, command).await;
    let closed = session.close().await;
    result.and(closed)
}

/// Run a single command against an open session.
pub async fn execute(session: &Session, command: UserCommand) -> AppResult<()> {
    let service = UserManager::new(Arc::new(session.users()));

    match command {
        UserCommand::List { select } => {
            let mut list = UserList::new(|user: &User| {
                println!("User: {}", user.name);
            });
            let count = list.refresh(&service).await?;
            info!("Loaded {} users", count);

            let loader = BlobImageLoader::new(session.blobs());
            for rendered in list.render(&loader).await {
                let image = match &rendered.image {
                    ImageSource::Loaded(bytes) => format!("image {} bytes", bytes.len()),
                    ImageSource::Placeholder => "no image".to_string(),
                };
                println!(
                    "{}\t{}\t{}\t{}",
                    rendered.row.id, rendered.row.name, rendered.row.email, image
                );
            }

            if let Some(index) = select {
                if !list.select(index) {
                    warn!("No user at position {}", index);
                }
            }
        }
        UserCommand::Get { id } => {
            let user = service.get_user(&id).await?;
            println!("{}", serde_json::to_string_pretty(&user)?);
        }
        UserCommand::Insert { name, email } => {
            let id = service.create_user(NewUser::new(name, email)).await?;
            info!("Created user {}", id);
            println!("{}", id);
        }
        UserCommand::Update { id, name, email } => {
            service.update_user(&id, UpdateUser::new(name, email)).await?;
            info!("Updated user {}", id);
        }
        UserCommand::UpdateImage { id, file } => {
            let url = service.update_user_image(&id, &file).await?;
            info!("Image for user {} stored at {}", id, url);
            println!("{}", url);
        }
        UserCommand::Delete { id } => {
            service.delete_user(&id).await?;
            info!("Deleted user {}", id);
        }
    }

    Ok(())
}
