//! Records commands: fetch users and posts from the remote API.

use serde::Serialize;
use std::process::ExitCode;
use support_desk::config::schema::ApiConfig;
use support_desk::records_api::{ApiError, Client, Post, User};

/// Builds a client from the `[api]` section.
fn client(api: &ApiConfig) -> Result<Client, String> {
    let timeout = api.timeout().map_err(|e| e.to_string())?;
    Ok(Client::with_timeout(api.base_url.clone(), timeout))
}

/// Prints `value` as JSON or with `plain`, or the error.
fn report<T: Serialize>(
    result: Result<T, ApiError>,
    json: bool,
    plain: impl FnOnce(&T),
) -> ExitCode {
    match result {
        Ok(value) if json => match serde_json::to_string_pretty(&value) {
            Ok(s) => {
                println!("{}", s);
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("Error: failed to encode JSON: {}", e);
                ExitCode::FAILURE
            }
        },
        Ok(value) => {
            plain(&value);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn user_row(user: &User) {
    println!(
        "{:>4}  {:<24}  {:<28}  {}",
        user.id, user.name, user.email, user.company.name
    );
}

fn post_row(post: &Post) {
    println!("{:>4}  user {:>3}  {}", post.id, post.user_id, post.title);
}

pub(crate) fn run_users_command(api: &ApiConfig, json: bool) -> ExitCode {
    let client = match client(api) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };
    report(client.fetch_users(), json, |users: &Vec<User>| {
        users.iter().for_each(user_row)
    })
}

pub(crate) fn run_user_command(api: &ApiConfig, id: u64, json: bool) -> ExitCode {
    let client = match client(api) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };
    report(client.fetch_user_by_id(id), json, |user: &User| {
        println!("{} (@{})", user.name, user.username);
        println!("  email:   {}", user.email);
        println!("  phone:   {}", user.phone);
        println!("  website: {}", user.website);
        println!("  company: {}", user.company.name);
    })
}

pub(crate) fn run_posts_command(api: &ApiConfig, limit: Option<u32>, json: bool) -> ExitCode {
    let client = match client(api) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };
    report(client.fetch_posts(limit), json, |posts: &Vec<Post>| {
        posts.iter().for_each(post_row)
    })
}
