//! Account commands backed by the local account document.
//!
//! - `signup` / `login` / `logout` - session management
//! - `whoami` - print the logged-in account
//! - `profile` - update the logged-in account

use std::process::ExitCode;
use support_desk::account_store::{
    AccountStore, ProfileUpdate, User, LOGIN_SUCCESS, PROFILE_UPDATE_SUCCESS, SIGNUP_SUCCESS,
};

fn print_user(user: &User) {
    println!(
        "{} <{}> [{}] id={}",
        user.name,
        user.email,
        user.avatar.as_deref().unwrap_or("-"),
        user.id
    );
}

/// Prints `Error: <message>` and returns failure.
fn fail(e: impl std::fmt::Display) -> ExitCode {
    eprintln!("Error: {}", e);
    ExitCode::FAILURE
}

pub(crate) fn run_signup_command(
    store: &AccountStore,
    name: &str,
    email: &str,
    password: &str,
) -> ExitCode {
    match store.signup(name, email, password) {
        Ok(user) => {
            println!("{}", SIGNUP_SUCCESS);
            print_user(&user);
            ExitCode::SUCCESS
        }
        Err(e) => fail(e),
    }
}

pub(crate) fn run_login_command(store: &AccountStore, email: &str, password: &str) -> ExitCode {
    match store.login(email, password) {
        Ok(user) => {
            println!("{}", LOGIN_SUCCESS);
            print_user(&user);
            ExitCode::SUCCESS
        }
        Err(e) => fail(e),
    }
}

pub(crate) fn run_logout_command(store: &AccountStore) -> ExitCode {
    match store.logout() {
        Ok(()) => {
            println!("Logged out");
            ExitCode::SUCCESS
        }
        Err(e) => fail(e),
    }
}

pub(crate) fn run_whoami_command(store: &AccountStore, json: bool) -> ExitCode {
    match store.current_user() {
        Ok(Some(user)) if json => match serde_json::to_string_pretty(&user) {
            Ok(s) => {
                println!("{}", s);
                ExitCode::SUCCESS
            }
            Err(e) => fail(e),
        },
        Ok(Some(user)) => {
            print_user(&user);
            ExitCode::SUCCESS
        }
        Ok(None) => fail("Not authenticated"),
        Err(e) => fail(e),
    }
}

pub(crate) fn run_profile_command(store: &AccountStore, update: ProfileUpdate) -> ExitCode {
    if update.is_empty() {
        return fail("nothing to update (use --name, --email or --avatar)");
    }
    match store.update_profile(update) {
        Ok(user) => {
            println!("{}", PROFILE_UPDATE_SUCCESS);
            print_user(&user);
            ExitCode::SUCCESS
        }
        Err(e) => fail(e),
    }
}
