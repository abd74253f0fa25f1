//
//  campus-client
//  cli/auth.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! Authentication commands.
//!
//! The session token returned by the backend is stored in the config file
//! under `api.token`, so later invocations start authenticated.

use std::io::BufRead;

use anyhow::{bail, Context, Result};
use clap::{Args, Subcommand};
use serde::Serialize;

use crate::api::services::Credentials;
use crate::config::Config;
use crate::output::{print_field, TableOutput};

use super::GlobalOptions;

#[derive(Args, Debug)]
pub struct AuthCommand {
    #[command(subcommand)]
    pub command: AuthSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum AuthSubcommand {
    /// Log in with email and password
    Login(LoginArgs),

    /// Log out and forget the saved token
    Logout,

    /// Show who is logged in
    Status,
}

#[derive(Args, Debug)]
pub struct LoginArgs {
    /// Account email
    #[arg(long, short = 'e')]
    pub email: String,

    /// Account password (read from stdin when omitted)
    #[arg(long, env = "CAMPUS_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,
}

impl AuthCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        match &self.command {
            AuthSubcommand::Login(args) => login(args, global).await,
            AuthSubcommand::Logout => logout(global).await,
            AuthSubcommand::Status => status(global).await,
        }
    }
}

async fn login(args: &LoginArgs, global: &GlobalOptions) -> Result<()> {
    let password = match &args.password {
        Some(password) => password.clone(),
        None => read_password_from_stdin()?,
    };

    let client = global.client()?;
    let session = client
        .auth()
        .login(&Credentials::new(&args.email, password))
        .await
        .into_result()?;

    let mut config = Config::load()?;
    config.api.token = Some(session.token.clone());
    config.save()?;

    let writer = global.writer();
    writer.write_success(&format!("Logged in as {}", session.user.username));
    writer.write_raw(
        &serde_json::json!({ "user": session.user, "expiresAt": session.expires_at }),
        "",
    )
}

async fn logout(global: &GlobalOptions) -> Result<()> {
    let client = global.client()?;
    let writer = global.writer();

    if client.is_authenticated() {
        if let Some(error) = client.auth().logout().await.error() {
            writer.write_warning(&format!("Server logout failed: {}", error));
        }
    }

    let mut config = Config::load()?;
    config.api.token = None;
    config.save()?;

    writer.write_success("Logged out");
    writer.write_raw(&serde_json::json!({ "success": true }), "")
}

async fn status(global: &GlobalOptions) -> Result<()> {
    let config = global.config()?;
    let client = config.client()?;

    let user = if client.is_authenticated() {
        match client.users().current().await.into_result() {
            Ok(user) => Some(user.username),
            Err(e) if e.is_auth_error() => None,
            Err(e) => return Err(e.into()),
        }
    } else {
        None
    };

    global.writer().write(&AuthStatus {
        base_url: config.api.base_url,
        logged_in: user.is_some(),
        username: user,
        token_saved: config.api.token.is_some(),
    })
}

fn read_password_from_stdin() -> Result<String> {
    let mut line = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut line)
        .context("Failed to read password from stdin")?;
    let password = line.trim_end_matches(['\r', '\n']).to_string();
    if password.is_empty() {
        bail!("No password given. Pass --password or pipe it on stdin.");
    }
    Ok(password)
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AuthStatus {
    base_url: String,
    logged_in: bool,
    username: Option<String>,
    token_saved: bool,
}

impl TableOutput for AuthStatus {
    fn print_table(&self, color: bool) {
        print_field("Server", &self.base_url, color);
        match &self.username {
            Some(name) => print_field("Logged in as", name, color),
            None if self.token_saved => print_field("Status", "token saved but rejected, log in again", color),
            None => print_field("Status", "not logged in", color),
        }
    }
}
