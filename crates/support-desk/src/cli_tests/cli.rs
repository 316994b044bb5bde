//! CLI argument parsing tests.

use crate::{Cli, Commands, ConfigAction};
use clap::{CommandFactory, Parser};
use std::path::PathBuf;

#[test]
fn verify_cli() {
    Cli::command().debug_assert();
}

#[test]
fn test_call_contact_defaults_to_none() {
    let cli = Cli::try_parse_from(["sdesk", "call"]).expect("parse");
    match cli.command {
        Commands::Call { contact } => assert!(contact.is_none()),
        _ => panic!("unexpected command variant"),
    }
}

#[test]
fn test_chat_agent_override() {
    let cli = Cli::try_parse_from(["sdesk", "chat", "--agent", "Nadia"]).expect("parse");
    match cli.command {
        Commands::Chat { agent } => assert_eq!(agent.as_deref(), Some("Nadia")),
        _ => panic!("unexpected command variant"),
    }
}

#[test]
fn test_global_config_after_subcommand() {
    let cli = Cli::try_parse_from(["sdesk", "users", "--config", "/tmp/sd.toml"]).expect("parse");
    assert_eq!(cli.config, Some(PathBuf::from("/tmp/sd.toml")));
    assert!(matches!(cli.command, Commands::Users { json: false }));
}

#[test]
fn test_signup_requires_all_fields() {
    let result = Cli::try_parse_from(["sdesk", "signup", "--name", "A", "--email", "a@x.io"]);
    assert!(result.is_err());
}

#[test]
fn test_user_id_must_be_numeric() {
    assert!(Cli::try_parse_from(["sdesk", "user", "abc"]).is_err());
    let cli = Cli::try_parse_from(["sdesk", "user", "3", "--json"]).expect("parse");
    assert!(matches!(cli.command, Commands::User { id: 3, json: true }));
}

#[test]
fn test_posts_limit() {
    let cli = Cli::try_parse_from(["sdesk", "posts", "--limit", "5"]).expect("parse");
    match cli.command {
        Commands::Posts { limit, json } => {
            assert_eq!(limit, Some(5));
            assert!(!json);
        }
        _ => panic!("unexpected command variant"),
    }
}

#[test]
fn test_profile_fields_are_optional() {
    let cli = Cli::try_parse_from(["sdesk", "profile", "--name", "New Name"]).expect("parse");
    match cli.command {
        Commands::Profile {
            name,
            email,
            avatar,
        } => {
            assert_eq!(name.as_deref(), Some("New Name"));
            assert!(email.is_none());
            assert!(avatar.is_none());
        }
        _ => panic!("unexpected command variant"),
    }
}

#[test]
fn test_config_init_force_flag() {
    let cli = Cli::try_parse_from(["sdesk", "config", "init", "--force"]).expect("parse");
    match cli.command {
        Commands::Config {
            action: ConfigAction::Init { force },
        } => assert!(force),
        _ => panic!("unexpected command variant"),
    }
}

#[test]
fn test_config_without_action_fails() {
    assert!(Cli::try_parse_from(["sdesk", "config"]).is_err());
}
