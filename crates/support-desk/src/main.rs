//! Support Desk - CLI entry point
//!
//! This binary drives the simulated call console and the support chat,
//! manages local accounts and prints records fetched from the remote API.

mod commands;

use clap::{Parser, Subcommand};
use commands::*;
use std::path::PathBuf;
use std::process::ExitCode;
use support_desk::account_store::{AccountStore, ProfileUpdate};
use support_desk::config::loader::ConfigLoader;
use support_desk::logging;

/// Support desk console
#[derive(Parser)]
#[command(name = "sdesk")]
#[command(version, about = "Support desk console: calls, accounts and records")]
struct Cli {
    /// Configuration file (defaults to the XDG config path)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands for the sdesk CLI
#[derive(Subcommand)]
enum Commands {
    /// Open the interactive call console (reads intents from stdin)
    Call {
        /// Contact name shown in the console
        #[arg(long)]
        contact: Option<String>,
    },

    /// Open the support chat (reads messages from stdin)
    Chat {
        /// Name the support bot answers under
        #[arg(long)]
        agent: Option<String>,
    },

    /// Register a new account and log it in
    Signup {
        /// Display name
        #[arg(long)]
        name: String,
        /// Login email
        #[arg(long)]
        email: String,
        /// Password
        #[arg(long)]
        password: String,
    },

    /// Log in to an existing account
    Login {
        /// Login email
        #[arg(long)]
        email: String,
        /// Password
        #[arg(long)]
        password: String,
    },

    /// Log out of the current account
    Logout,

    /// Show the logged-in account
    Whoami {
        /// Print raw JSON
        #[arg(long)]
        json: bool,
    },

    /// Update the logged-in account
    Profile {
        /// New display name
        #[arg(long)]
        name: Option<String>,
        /// New login email
        #[arg(long)]
        email: Option<String>,
        /// New avatar initials
        #[arg(long)]
        avatar: Option<String>,
    },

    /// List users from the records API
    Users {
        /// Print raw JSON
        #[arg(long)]
        json: bool,
    },

    /// Show one user from the records API
    User {
        /// User ID
        id: u64,
        /// Print raw JSON
        #[arg(long)]
        json: bool,
    },

    /// List posts from the records API
    Posts {
        /// Maximum number of posts
        #[arg(long)]
        limit: Option<u32>,
        /// Print raw JSON
        #[arg(long)]
        json: bool,
    },

    /// Manage configuration file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Actions for the `config` subcommand.
#[derive(Subcommand)]
enum ConfigAction {
    /// Create default configuration file
    Init {
        /// Overwrite existing configuration (creates backup)
        #[arg(long)]
        force: bool,
    },
    /// Show configuration file path
    Path,
    /// Validate configuration file
    Validate,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let config_path = cli.config.as_deref();

    // Config commands must work even when the file is broken.
    if let Commands::Config { action } = &cli.command {
        logging::init("info");
        return match action {
            ConfigAction::Init { force } => run_config_init(config_path, *force),
            ConfigAction::Path => run_config_path(config_path),
            ConfigAction::Validate => run_config_validate(config_path),
        };
    }

    let config = match ConfigLoader::load(config_path) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Config error: {e}");
            return ExitCode::FAILURE;
        }
    };
    logging::init(config.logging.log_level.as_filter());

    let store = || AccountStore::open(config.accounts.resolved_path());

    match cli.command {
        Commands::Call { contact } => run_call_command(&config, contact),
        Commands::Chat { agent } => run_chat_command(&config, agent),
        Commands::Signup {
            name,
            email,
            password,
        } => run_signup_command(&store(), &name, &email, &password),
        Commands::Login { email, password } => run_login_command(&store(), &email, &password),
        Commands::Logout => run_logout_command(&store()),
        Commands::Whoami { json } => run_whoami_command(&store(), json),
        Commands::Profile {
            name,
            email,
            avatar,
        } => run_profile_command(
            &store(),
            ProfileUpdate {
                name,
                email,
                avatar,
            },
        ),
        Commands::Users { json } => run_users_command(&config.api, json),
        Commands::User { id, json } => run_user_command(&config.api, id, json),
        Commands::Posts { limit, json } => run_posts_command(&config.api, limit, json),
        Commands::Config { .. } => ExitCode::SUCCESS,
    }
}

#[cfg(test)]
mod cli_tests;
