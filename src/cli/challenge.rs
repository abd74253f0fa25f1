//
//  campus-client
//  cli/challenge.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! Challenge commands: list, view and submit.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use console::style;
use serde::Serialize;

use crate::api::services::{
    Challenge, ChallengeFilter, ChallengeSubmission, Difficulty, LeaderboardEntry, SubmissionResult,
};
use crate::api::PaginatedResult;
use crate::output::{format_bool, format_status, print_field, print_header, truncate, TableBuilder, TableOutput};

use super::{page_footer, GlobalOptions, PageArgs};

#[derive(Args, Debug)]
pub struct ChallengeCommand {
    #[command(subcommand)]
    pub command: ChallengeSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum ChallengeSubcommand {
    /// List challenges
    #[command(visible_alias = "ls")]
    List(ListArgs),

    /// View a challenge
    View(ViewArgs),

    /// Submit a solution
    Submit(SubmitArgs),
}

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Filter by difficulty
    #[arg(long, short = 'd')]
    pub difficulty: Option<Difficulty>,

    /// Filter by category
    #[arg(long, short = 'c')]
    pub category: Option<String>,

    /// Search in titles and descriptions
    #[arg(long, short = 'S')]
    pub search: Option<String>,

    #[command(flatten)]
    pub page: PageArgs,
}

#[derive(Args, Debug)]
pub struct ViewArgs {
    /// Challenge ID
    pub id: String,

    /// Include the leaderboard
    #[arg(long)]
    pub leaderboard: bool,

    /// Include your past submissions
    #[arg(long)]
    pub submissions: bool,
}

#[derive(Args, Debug)]
pub struct SubmitArgs {
    /// Challenge ID
    pub id: String,

    /// File containing the solution
    #[arg(long, short = 'f')]
    pub file: PathBuf,

    /// Language of the solution
    #[arg(long, short = 'L', default_value = "rust")]
    pub language: String,
}

impl ChallengeCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        match &self.command {
            ChallengeSubcommand::List(args) => list(args, global).await,
            ChallengeSubcommand::View(args) => view(args, global).await,
            ChallengeSubcommand::Submit(args) => submit(args, global).await,
        }
    }
}

async fn list(args: &ListArgs, global: &GlobalOptions) -> Result<()> {
    let client = global.client()?;
    let filter = ChallengeFilter {
        page: args.page.query(),
        difficulty: args.difficulty,
        category: args.category.clone(),
        search: args.search.clone(),
    };

    let page = client.challenges().list(&filter).await.into_result()?;
    global.writer().write(&page)
}

async fn view(args: &ViewArgs, global: &GlobalOptions) -> Result<()> {
    let client = global.client()?;
    let challenges = client.challenges();

    let challenge = challenges.get(&args.id).await.into_result()?;
    let leaderboard = if args.leaderboard {
        Some(challenges.leaderboard(&args.id).await.into_result()?)
    } else {
        None
    };
    let submissions = if args.submissions {
        Some(challenges.submissions(&args.id).await.into_result()?)
    } else {
        None
    };

    global.writer().write(&ChallengeDetail {
        challenge,
        leaderboard,
        submissions,
    })
}

async fn submit(args: &SubmitArgs, global: &GlobalOptions) -> Result<()> {
    let code = std::fs::read_to_string(&args.file)
        .with_context(|| format!("Failed to read {}", args.file.display()))?;

    let client = global.client()?;
    let submission = ChallengeSubmission {
        code,
        language: args.language.clone(),
    };
    let result = client
        .challenges()
        .submit(&args.id, &submission)
        .await
        .into_result()?;

    global.writer().write(&result)
}

impl TableOutput for PaginatedResult<Challenge> {
    fn print_table(&self, color: bool) {
        if self.items.is_empty() {
            println!("No challenges found");
            return;
        }

        TableBuilder::new()
            .color(color)
            .headers(["ID", "TITLE", "DIFFICULTY", "POINTS", "DONE"])
            .rows(self.items.iter().map(|c| {
                [
                    c.id.clone(),
                    truncate(&c.title, 48),
                    format_status(c.difficulty.as_str(), color),
                    c.points.to_string(),
                    format_bool(c.completed, color),
                ]
            }))
            .print();
        println!("{}", page_footer(self));
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ChallengeDetail {
    #[serde(flatten)]
    challenge: Challenge,
    #[serde(skip_serializing_if = "Option::is_none")]
    leaderboard: Option<Vec<LeaderboardEntry>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    submissions: Option<Vec<SubmissionResult>>,
}

impl TableOutput for ChallengeDetail {
    fn print_table(&self, color: bool) {
        let c = &self.challenge;
        print_header(&c.title);
        print_field("ID", &c.id, color);
        print_field("Difficulty", &format_status(c.difficulty.as_str(), color), color);
        print_field("Points", &c.points.to_string(), color);
        if let Some(category) = &c.category {
            print_field("Category", category, color);
        }
        if !c.tags.is_empty() {
            print_field("Tags", &c.tags.join(", "), color);
        }
        print_field("Completed", &format_bool(c.completed, color), color);

        if !c.description.is_empty() {
            println!();
            println!("{}", c.description);
        }

        if let Some(code) = &c.starter_code {
            println!();
            println!("{}", style("Starter code:").bold());
            for line in code.lines() {
                println!("  {}", line);
            }
        }

        if let Some(entries) = &self.leaderboard {
            println!();
            print_header("Leaderboard");
            if entries.is_empty() {
                println!("No scores yet");
            } else {
                TableBuilder::new()
                    .color(color)
                    .headers(["RANK", "USER", "SCORE"])
                    .rows(entries.iter().map(|e| [e.rank.to_string(), e.username.clone(), e.score.to_string()]))
                    .print();
            }
        }

        if let Some(submissions) = &self.submissions {
            println!();
            print_header("Your submissions");
            if submissions.is_empty() {
                println!("No submissions yet");
            }
            for submission in submissions {
                submission.print_table(color);
            }
        }
    }
}

impl TableOutput for SubmissionResult {
    fn print_table(&self, color: bool) {
        let (passed, total) = self.tally();
        let verdict = if self.passed { "passed" } else { "failed" };
        let when = self
            .submitted_at
            .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_default();

        println!(
            "{} {}  {}/{} tests  score {}  {}",
            style(&self.id).dim(),
            format_status(verdict, color),
            passed,
            total,
            self.score,
            when
        );
        for case in self.test_results.iter().filter(|t| !t.passed) {
            let message = case.message.as_deref().unwrap_or("failed");
            println!("    {} {}: {}", style("✗").red(), case.name, message);
        }
    }
}
