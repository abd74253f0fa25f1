//
//  campus-client
//  cli/user.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! Profile and statistics commands.

use anyhow::Result;
use clap::{Args, Subcommand};
use serde::Serialize;

use crate::api::services::{User, UserStats};
use crate::api::ApiClient;
use crate::output::{print_field, print_header, TableOutput};

use super::GlobalOptions;

#[derive(Args, Debug)]
pub struct UserCommand {
    #[command(subcommand)]
    pub command: UserSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum UserSubcommand {
    /// View a profile
    View(UserArgs),

    /// Show learning statistics
    Stats(UserArgs),
}

#[derive(Args, Debug)]
pub struct UserArgs {
    /// User ID (defaults to the signed-in user)
    pub id: Option<String>,
}

impl UserCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        let client = global.client()?;
        let writer = global.writer();

        match &self.command {
            UserSubcommand::View(args) => {
                let user = profile(&client, args.id.as_deref()).await?;
                writer.write(&user)
            }
            UserSubcommand::Stats(args) => {
                let user = profile(&client, args.id.as_deref()).await?;
                let stats = client.users().stats(&user.id).await.into_result()?;
                writer.write(&StatsView {
                    username: user.username,
                    stats,
                })
            }
        }
    }
}

async fn profile(client: &ApiClient, id: Option<&str>) -> Result<User> {
    let users = client.users();
    let user = match id {
        Some(id) => users.get(id).await,
        None => users.current().await,
    };
    Ok(user.into_result()?)
}

impl TableOutput for User {
    fn print_table(&self, color: bool) {
        print_header(self.display_name.as_deref().unwrap_or(&self.username));
        print_field("Username", &self.username, color);
        print_field("ID", &self.id, color);
        if let Some(email) = &self.email {
            print_field("Email", email, color);
        }
        if let Some(role) = &self.role {
            print_field("Role", role, color);
        }
        if let Some(joined) = self.joined_at {
            print_field("Joined", &joined.format("%Y-%m-%d").to_string(), color);
        }
        if let Some(bio) = &self.bio {
            println!();
            println!("{}", bio);
        }
    }
}

#[derive(Debug, Serialize)]
struct StatsView {
    username: String,
    #[serde(flatten)]
    stats: UserStats,
}

impl TableOutput for StatsView {
    fn print_table(&self, color: bool) {
        let s = &self.stats;
        print_header(&format!("Statistics for {}", self.username));
        print_field("Challenges completed", &s.challenges_completed.to_string(), color);
        print_field("Total points", &s.total_points.to_string(), color);
        print_field(
            "Streak",
            &format!("{} days (best {})", s.current_streak, s.longest_streak),
            color,
        );
        print_field("Forum posts", &s.forum_posts.to_string(), color);
        print_field("Projects", &s.projects.to_string(), color);
        if let Some(rank) = s.rank {
            print_field("Rank", &format!("#{}", rank), color);
        }
    }
}
