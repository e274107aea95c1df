//! Create-admin command - Bootstraps a staff account.

use validator::Validate;

use crate::cli::args::CreateAdminArgs;
use crate::config::Config;
use crate::domain::{UserInput, UserRole};
use crate::errors::{AppError, AppResult};
use crate::infra::Database;
use crate::services::{ServiceContainer, Services};

/// Execute the create-admin command
pub async fn execute(args: CreateAdminArgs, config: Config) -> AppResult<()> {
    let input = UserInput {
        username: args.username,
        role: UserRole::Admin,
        password: Some(args.password),
        email: args.email,
        first_name: None,
        last_name: None,
    };
    input
        .validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let db = Database::connect(&config.database_url).await?;
    let services = Services::from_connection(db.get_connection(), config);

    let user = services.users().create_user(input).await?;
    tracing::info!(user_id = user.id, username = %user.username, "admin account created");
    println!("Created admin '{}' (id {})", user.username, user.id);

    Ok(())
}
