//
//  campus-client
//  cli/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! CLI command definitions using clap derive macros

mod auth;
mod challenge;
mod config;
mod forum;
mod project;
mod user;

pub use auth::AuthCommand;
pub use challenge::ChallengeCommand;
pub use config::ConfigCommand;
pub use forum::ForumCommand;
pub use project::ProjectCommand;
pub use user::UserCommand;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::api::{ApiClient, PageQuery};
use crate::config::Config;
use crate::output::{OutputFormat, OutputWriter};

#[derive(Parser, Debug)]
#[command(
    name = "campus",
    version,
    about = "Work with the Campus learning platform from the command line",
    long_about = "campus browses challenges, the community forum, projects and profiles.\n\n\
                  Log in with 'campus auth login' to submit solutions and post replies.",
    propagate_version = true,
    after_help = "Use 'campus <command> --help' for more information about a command."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalOptions,
}

/// Options accepted by every command.
#[derive(Parser, Debug, Clone, Default)]
pub struct GlobalOptions {
    /// Output JSON instead of tables
    #[arg(long, global = true)]
    pub json: bool,

    /// API base URL for this invocation
    #[arg(long, global = true, value_name = "URL")]
    pub base_url: Option<String>,
}

impl GlobalOptions {
    pub fn format(&self) -> OutputFormat {
        OutputFormat::from_json_flag(self.json)
    }

    pub fn writer(&self) -> OutputWriter {
        OutputWriter::new(self.format())
    }

    /// The effective configuration with `--base-url` applied last.
    pub fn config(&self) -> Result<Config> {
        let mut config = Config::load_effective()?;
        if let Some(url) = &self.base_url {
            config.set("api.base_url", url)?;
        }
        Ok(config)
    }

    pub fn client(&self) -> Result<ApiClient> {
        self.config()?.client()
    }
}

/// Paging flags shared by list commands.
#[derive(clap::Args, Debug, Clone, Copy)]
pub struct PageArgs {
    /// Page number, starting at 1
    #[arg(long, default_value = "1")]
    pub page: u32,

    /// Items per page
    #[arg(long, short = 'l', default_value = "20")]
    pub limit: u32,
}

impl PageArgs {
    pub fn query(&self) -> PageQuery {
        PageQuery::new(self.page, self.limit)
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Log in, log out and show the session
    #[command(visible_alias = "login")]
    Auth(AuthCommand),

    /// Browse and solve practice challenges
    #[command(visible_alias = "ch")]
    Challenge(ChallengeCommand),

    /// Read and reply to forum threads
    Forum(ForumCommand),

    /// Browse showcase projects
    #[command(visible_alias = "proj")]
    Project(ProjectCommand),

    /// View profiles and statistics
    User(UserCommand),

    /// Read and change configuration
    Config(ConfigCommand),

    /// Print the version
    Version,
}

/// Summary printed under a list, e.g. `Page 2 of 3 (45 total)`.
pub(crate) fn page_footer<T>(page: &crate::api::PaginatedResult<T>) -> String {
    let mut footer = format!("Page {} of {} ({} total)", page.page, page.total_pages().max(1), page.total);
    if let Some(next) = page.next_page() {
        footer.push_str(&format!(", next: --page {}", next));
    }
    footer
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::PaginatedResult;

    #[test]
    fn test_parse_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["campus", "challenge", "list", "--json", "--base-url", "http://x/api"])
            .unwrap();
        assert!(cli.global.json);
        assert_eq!(cli.global.base_url.as_deref(), Some("http://x/api"));
    }

    #[test]
    fn test_page_footer() {
        let page = PaginatedResult::new(vec![1, 2], 45, 2, 20);
        assert_eq!(page_footer(&page), "Page 2 of 3 (45 total), next: --page 3");
    }
}
