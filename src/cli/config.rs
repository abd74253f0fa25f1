//
//  campus-client
//  cli/config.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! CLI configuration commands
//!
//! Reads and writes the config file. Environment overrides are shown by
//! `config list` but never saved.

use anyhow::Result;
use clap::{Args, Subcommand};
use console::style;

use crate::config::{Config, ENV_API_URL, ENV_TOKEN};
use crate::output::{OutputFormat, TableBuilder};

use super::GlobalOptions;

#[derive(Args, Debug)]
pub struct ConfigCommand {
    #[command(subcommand)]
    pub command: ConfigSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum ConfigSubcommand {
    /// Print a value
    Get(GetArgs),

    /// Change a value
    Set(SetArgs),

    /// Print every value
    #[command(visible_alias = "ls")]
    List,

    /// Print the config file path
    Path,
}

#[derive(Args, Debug)]
pub struct GetArgs {
    /// Key, e.g. api.base_url
    pub key: String,
}

#[derive(Args, Debug)]
pub struct SetArgs {
    /// Key, e.g. retry.max_retries
    pub key: String,

    /// New value
    pub value: String,
}

impl ConfigCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        match &self.command {
            ConfigSubcommand::Get(args) => get(args, global),
            ConfigSubcommand::Set(args) => set(args, global),
            ConfigSubcommand::List => list(global),
            ConfigSubcommand::Path => path(global),
        }
    }
}

fn get(args: &GetArgs, global: &GlobalOptions) -> Result<()> {
    let config = Config::load_effective()?;
    let value = config.get(&args.key)?;

    if global.json {
        let result = serde_json::json!({ "key": args.key, "value": value });
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else if let Some(v) = value {
        println!("{}", v);
    }
    Ok(())
}

fn set(args: &SetArgs, global: &GlobalOptions) -> Result<()> {
    let mut config = Config::load()?;
    config.set(&args.key, &args.value)?;
    config.save()?;

    if global.json {
        let result = serde_json::json!({ "success": true, "key": args.key, "value": args.value });
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!("{} Set {} = {}", style("✓").green(), style(&args.key).cyan(), args.value);
    }
    Ok(())
}

fn list(global: &GlobalOptions) -> Result<()> {
    let config = Config::load_effective()?;
    let entries: Vec<(&str, String)> = config
        .entries()
        .into_iter()
        .map(|(key, value)| (key, display_value(key, value)))
        .collect();

    match global.format() {
        OutputFormat::Json => {
            let map: serde_json::Map<String, serde_json::Value> = entries
                .iter()
                .map(|(k, v)| (k.to_string(), serde_json::Value::from(v.as_str())))
                .collect();
            println!("{}", serde_json::to_string_pretty(&map)?);
        }
        OutputFormat::Table => {
            TableBuilder::new()
                .headers(["KEY", "VALUE"])
                .rows(entries.iter().map(|(k, v)| [k.to_string(), v.clone()]))
                .print();
            for var in [ENV_API_URL, ENV_TOKEN] {
                if std::env::var_os(var).is_some() {
                    println!("{} {} is set and overrides the file", style("note:").dim(), var);
                }
            }
        }
    }
    Ok(())
}

fn path(global: &GlobalOptions) -> Result<()> {
    let path = Config::config_path()?;
    if global.json {
        println!("{}", serde_json::json!({ "path": path.display().to_string() }));
    } else {
        println!("{}", path.display());
    }
    Ok(())
}

/// Tokens are masked; unset values print as `-`.
fn display_value(key: &str, value: Option<String>) -> String {
    match value {
        None => "-".to_string(),
        Some(token) if key == "api.token" => mask(&token),
        Some(v) => v,
    }
}

fn mask(token: &str) -> String {
    let visible: String = token.chars().take(4).collect();
    if token.chars().count() <= 8 {
        "****".to_string()
    } else {
        format!("{}****", visible)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_is_masked() {
        assert_eq!(display_value("api.token", Some("eyJhbGciOiJIUzI1NiJ9".into())), "eyJh****");
        assert_eq!(display_value("api.token", Some("short".into())), "****");
        assert_eq!(display_value("api.base_url", Some("http://x".into())), "http://x");
        assert_eq!(display_value("api.token", None), "-");
    }
}
