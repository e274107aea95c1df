//! CLI argument definitions.
//!
//! Uses clap derive macros for type-safe argument parsing.

use clap::{Parser, Subcommand};

use crate::config::{DEFAULT_SERVER_HOST, DEFAULT_SERVER_PORT};

/// MovieHub - movie catalog API
#[derive(Parser, Debug)]
#[command(name = "moviehub")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the HTTP server
    Serve(ServeArgs),

    /// Run database migrations
    Migrate(MigrateArgs),

    /// Create an account with the admin role
    CreateAdmin(CreateAdminArgs),
}

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Host to bind to
    #[arg(short = 'H', long, default_value = DEFAULT_SERVER_HOST, env = "SERVER_HOST")]
    pub host: String,

    /// Port to listen on
    #[arg(short, long, default_value_t = DEFAULT_SERVER_PORT, env = "SERVER_PORT")]
    pub port: u16,
}

/// Arguments for the migrate command
#[derive(Parser, Debug)]
pub struct MigrateArgs {
    #[command(subcommand)]
    pub action: MigrateAction,
}

/// Migration actions
#[derive(Subcommand, Debug)]
pub enum MigrateAction {
    /// Run pending migrations
    Up,
    /// Rollback last migration
    Down,
    /// Show migration status
    Status,
    /// Reset and re-run all migrations
    Fresh,
}

/// Arguments for the create-admin command
#[derive(Parser, Debug)]
pub struct CreateAdminArgs {
    #[arg(long)]
    pub username: String,

    /// Plain-text password (minimum 8 characters)
    #[arg(long, env = "ADMIN_PASSWORD")]
    pub password: String,

    #[arg(long)]
    pub email: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serve_defaults() {
        let cli = Cli::try_parse_from(["moviehub", "serve"]).unwrap();
        match cli.command {
            Commands::Serve(args) => assert_eq!(args.port, DEFAULT_SERVER_PORT),
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_create_admin_requires_username() {
        assert!(Cli::try_parse_from(["moviehub", "create-admin", "--password", "pw12345678"]).is_err());

        let cli = Cli::try_parse_from([
            "moviehub",
            "-v",
            "create-admin",
            "--username",
            "root",
            "--password",
            "pw12345678",
        ])
        .unwrap();
        assert!(cli.verbose);
        assert!(matches!(cli.command, Commands::CreateAdmin(ref a) if a.username == "root" && a.email.is_none()));
    }

    #[test]
    fn test_migrate_actions() {
        let cli = Cli::try_parse_from(["moviehub", "migrate", "fresh"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Migrate(MigrateArgs { action: MigrateAction::Fresh })
        ));
    }
}
