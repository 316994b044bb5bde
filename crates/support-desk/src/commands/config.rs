//! `config` command: create, locate and validate the configuration file.

use std::path::Path;
use std::process::ExitCode;
use support_desk::config::{default, loader::ConfigLoader, xdg};

pub(crate) fn run_config_init(path: Option<&Path>, force: bool) -> ExitCode {
    let result = match path {
        Some(path) => default::create_default_config_at(path, force).map(|()| path.to_path_buf()),
        None => default::create_default_config(force),
    };
    match result {
        Ok(path) => {
            println!("Created configuration at {}", path.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Config error: {e}");
            ExitCode::FAILURE
        }
    }
}

pub(crate) fn run_config_path(path: Option<&Path>) -> ExitCode {
    match path {
        Some(path) => println!("{}", path.display()),
        None => println!("{}", xdg::config_path().display()),
    }
    ExitCode::SUCCESS
}

pub(crate) fn run_config_validate(path: Option<&Path>) -> ExitCode {
    match ConfigLoader::load(path) {
        Ok(config) => {
            println!("Configuration is valid");
            println!("{config:#?}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Config error: {e}");
            ExitCode::FAILURE
        }
    }
}
